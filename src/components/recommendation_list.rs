// "Up next" panel: one page of recommendation cards plus the pager strip.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::api::models::{format_views_compact, Recommendation};
use crate::components::Component;
use crate::state::pagination::PageButton;
use crate::state::ViewState;
use crate::theme::Theme;

/// Card for the recommendation in page slot `slot` (0-based).
pub fn recommendation_card(
    rec: &Recommendation,
    slot: usize,
    selected: bool,
    theme: &Theme,
) -> ListItem<'static> {
    let video = &rec.video;
    let title_style = if selected {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let badge_style = Style::default()
        .fg(theme.relevance(rec.tier()))
        .add_modifier(Modifier::BOLD);

    let header = Line::from(vec![
        Span::styled(format!("{:>2} ", slot + 1), Style::default().fg(theme.text_dim)),
        Span::styled(video.title.clone(), title_style),
    ]);
    let meta = Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{}%", rec.relevance_percent()), badge_style),
        Span::styled(
            format!("  ◷ {}  👁 {}  ", video.duration_label(), format_views_compact(video.views)),
            Style::default().fg(theme.text_dim),
        ),
        Span::styled(video.category.clone(), Style::default().fg(theme.secondary)),
    ]);
    let reason = Line::from(vec![
        Span::styled("   ✦ ", Style::default().fg(theme.accent)),
        Span::styled(rec.reason.clone(), Style::default().fg(theme.accent)),
    ]);

    let mut item = ListItem::new(vec![header, meta, reason, Line::from("")]);
    if selected {
        item = item.style(Style::default().bg(theme.selection_bg));
    }
    item
}

/// The pager strip: `‹ Prev  1 [2] 3 4 5 … 8  Next ›`.
pub fn pager_line(view: &ViewState, theme: &Theme) -> Line<'static> {
    let total = view.total_pages();
    let enabled = Style::default().fg(theme.text);
    let disabled = Style::default().fg(theme.text_dim);

    let mut spans = vec![Span::styled(
        "‹ Prev ",
        if view.page > 1 { enabled } else { disabled },
    )];
    for button in view.page_buttons() {
        match button {
            PageButton::Page(n) if n == view.page => spans.push(Span::styled(
                format!("[{}]", n),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
            PageButton::Page(n) => spans.push(Span::styled(format!(" {} ", n), enabled)),
            PageButton::Ellipsis => spans.push(Span::styled(" … ", disabled)),
        }
    }
    spans.push(Span::styled(
        " Next ›",
        if view.page < total { enabled } else { disabled },
    ));
    Line::from(spans)
}

#[derive(Default)]
pub struct RecommendationList {
    action_tx: Option<UnboundedSender<Action>>,
    selected: usize,
    len: usize,
}

impl RecommendationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of the highlighted card on the current page.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Keep the cursor inside a page of `len` cards.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Component for RecommendationList {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                Ok(true)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.prev();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::NextPage
            | Action::PrevPage
            | Action::GoToPage(_)
            | Action::VideoLoaded { .. } => {
                self.selected = 0;
            }
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, view: &ViewState, theme: &Theme) {
        let [header_area, list_area, pager_area, range_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let total = view.total_pages();
        let header = Line::from(vec![
            Span::styled(
                " Up Next ",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("· Page {} of {}", view.page, total.max(1)),
                Style::default().fg(theme.text_dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        let page = view.visible_recommendations();
        if page.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No recommendations for this video.",
                    Style::default().fg(theme.text_dim),
                )),
                list_area,
            );
            return;
        }

        let items: Vec<ListItem> = page
            .iter()
            .enumerate()
            .map(|(slot, rec)| recommendation_card(rec, slot, slot == self.selected, theme))
            .collect();
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(
            List::new(items).highlight_symbol("▌"),
            list_area,
            &mut state,
        );

        if total > 1 {
            frame.render_widget(Paragraph::new(pager_line(view, theme)), pager_area);
            let (first, last, count) = view.showing_range();
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Showing {}-{} of {} videos", first, last, count),
                    Style::default().fg(theme.text_dim),
                )),
                range_area,
            );
        }
    }
}
