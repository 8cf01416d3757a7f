// Layout and rendering: header with search, video panel beside the "up next"
// list, and the overlays (search results, help, error bar, loading screen).

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::components::recommendation_list::RecommendationList;
use crate::components::search_bar::SearchBar;
use crate::components::search_results::SearchResults;
use crate::components::status_bar::StatusBar;
use crate::components::video_panel::VideoPanel;
use crate::components::{spinner_frame, Component};
use crate::state::ViewState;
use crate::theme::Theme;

pub struct DrawState<'a> {
    pub view: &'a ViewState,
    pub search_bar: &'a SearchBar,
    pub search_results: &'a SearchResults,
    pub recommendation_list: &'a RecommendationList,
    pub video_panel: &'a VideoPanel,
    pub status_bar: &'a StatusBar,
    pub error_message: &'a Option<String>,
    pub show_help: bool,
    pub theme: &'a Theme,
    pub frame_count: u64,
}

/// Text of the error bar, if any: transient errors win over a failed navigation.
pub fn error_text(state: &DrawState) -> Option<String> {
    state
        .error_message
        .clone()
        .or_else(|| state.view.nav_error.as_ref().map(|e| e.to_string()))
}

pub fn draw(frame: &mut Frame, state: &DrawState) {
    let theme = state.theme;

    if state.view.current_video.is_none() {
        draw_splash(frame, state);
        if state.show_help {
            draw_help_overlay(frame, theme);
        }
        return;
    }

    let error = error_text(state);
    let error_height = if error.is_some() { 1 } else { 0 };
    let [header_area, content_area, error_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(error_height),
        Constraint::Length(4),
    ])
    .areas(frame.area());

    draw_header(frame, header_area, state);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = outer_block.inner(content_area);
    frame.render_widget(outer_block, content_area);

    let [video_area, divider_area, recs_area] = Layout::horizontal([
        Constraint::Percentage(60),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    state.video_panel.draw(frame, video_area, state.view, theme);
    draw_divider(frame, divider_area, theme);
    state
        .recommendation_list
        .draw(frame, recs_area, state.view, theme);

    if let Some(msg) = error {
        let error_line = Line::from(vec![
            Span::styled(" ⚠ ", Style::default().fg(theme.error)),
            Span::styled(msg, Style::default().fg(theme.warning)),
            Span::styled("  Press r to retry.", Style::default().fg(theme.text_dim)),
        ]);
        frame.render_widget(Paragraph::new(error_line), error_area);
    }

    state.status_bar.draw(frame, status_area, state.view, theme);

    // Search overlay hangs under the header, over the content.
    let overlay = Rect {
        x: header_area.x + 2,
        y: content_area.y,
        width: header_area.width.saturating_sub(4),
        height: content_area.height,
    };
    state.search_results.draw(frame, overlay, state.view, theme);

    if state.show_help {
        draw_help_overlay(frame, theme);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DrawState) {
    let theme = state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [brand_area, search_area] =
        Layout::horizontal([Constraint::Length(30), Constraint::Min(0)]).areas(inner);
    let brand = Line::from(vec![
        Span::styled(
            " ◆ Catalyx ",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Learning Hub", Style::default().fg(theme.text_dim)),
    ]);
    frame.render_widget(Paragraph::new(brand), brand_area);
    state.search_bar.draw(frame, search_area, state.view, theme);
}

fn draw_divider(frame: &mut Frame, area: Rect, theme: &Theme) {
    let buf = frame.buffer_mut();
    for y in area.y..area.y + area.height {
        if let Some(cell) = buf.cell_mut((area.x, y)) {
            cell.set_char('│');
            cell.set_fg(theme.border);
        }
    }
}

/// Full-screen state before any video is on screen: loading, empty library,
/// or a failed first load.
fn draw_splash(frame: &mut Frame, state: &DrawState) {
    let theme = state.theme;
    let view = state.view;
    let area = frame.area();

    let mut lines = Vec::new();
    if view.library_empty {
        lines.push(Line::from(Span::styled(
            "No videos available yet.",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(Span::styled(
            "Press r to check again, q to quit.",
            Style::default().fg(theme.text_dim),
        )));
    } else if let Some(msg) = error_text(state) {
        lines.push(Line::from(Span::styled(msg, Style::default().fg(theme.error))));
        lines.push(Line::from(Span::styled(
            "Press r to retry, q to quit.",
            Style::default().fg(theme.text_dim),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(state.frame_count)),
                Style::default().fg(theme.primary),
            ),
            Span::styled(
                "Loading your personalized experience...",
                Style::default().fg(theme.text_dim),
            ),
        ]));
    }

    let height = lines.len() as u16;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, y, area.width, height.min(area.height));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

fn draw_help_overlay(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let overlay_width = 52u16;
    let overlay_height = 20u16;
    let x = area.width.saturating_sub(overlay_width) / 2;
    let y = area.height.saturating_sub(overlay_height) / 2;
    let overlay_area = Rect::new(
        x,
        y,
        overlay_width.min(area.width),
        overlay_height.min(area.height),
    );

    frame.render_widget(Clear, overlay_area);

    let keybindings = [
        ("q", "Quit"),
        ("j / Down", "Next card / result"),
        ("k / Up", "Previous card / result"),
        ("Enter", "Watch selected video"),
        ("l / Right", "Next page"),
        ("h / Left", "Previous page"),
        ("1–9", "Go to page"),
        ("Space", "Pause / resume"),
        ("/", "Focus search"),
        ("Escape", "Close search"),
        ("r", "Retry failed load"),
        ("?", "Toggle this help overlay"),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " Keybindings ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, desc) in &keybindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", key), Style::default().fg(theme.accent)),
            Span::raw(*desc),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(theme.text_dim),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .title_alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
