// Bottom status bar: player state, keybinding hints, and pagination position.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{spinner_frame, Component};
use crate::state::ViewState;
use crate::theme::Theme;

#[derive(Default)]
pub struct StatusBar {
    action_tx: Option<UnboundedSender<Action>>,
    playing: bool,
    paused: bool,
    frame_count: u64,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Component for StatusBar {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::Tick => {
                self.frame_count = self.frame_count.wrapping_add(1);
            }
            Action::PlaybackStarted { .. } => {
                self.playing = true;
                self.paused = false;
            }
            Action::PlaybackEnded { .. } | Action::PlayerClosed { .. } => {
                self.playing = false;
                self.paused = false;
            }
            Action::TogglePause if self.playing => {
                self.paused = !self.paused;
            }
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, view: &ViewState, theme: &Theme) {
        let status = if view.transitioning || view.pending_video.is_some() {
            spinner_frame(self.frame_count)
        } else if self.paused {
            "⏸"
        } else if self.playing {
            "▶"
        } else {
            "■"
        };

        let status_color = if view.transitioning {
            theme.warning
        } else if self.playing && !self.paused {
            theme.success
        } else {
            theme.text_dim
        };

        let border_color = if self.playing && !self.paused {
            theme.primary
        } else {
            theme.border
        };

        let div = Span::styled(" │ ", Style::default().fg(theme.border));
        let key_style = Style::default().fg(theme.text);
        let desc_style = Style::default().fg(theme.text_dim);

        let line1 = Line::from(vec![
            Span::styled(
                format!(" {} ", status),
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            div.clone(),
            Span::styled("Enter", key_style),
            Span::styled(" Watch", desc_style),
            div.clone(),
            Span::styled("Space", key_style),
            Span::styled(" Pause", desc_style),
            div.clone(),
            Span::styled("←→", key_style),
            Span::styled(" Page", desc_style),
            div.clone(),
            Span::styled("1-9", key_style),
            Span::styled(" Go to page", desc_style),
        ]);

        let page_info = if view.recommendations.is_empty() {
            String::new()
        } else {
            format!("Page {}/{}", view.page, view.total_pages())
        };

        let line2 = Line::from(vec![
            Span::raw("   "),
            Span::styled("/", key_style),
            Span::styled(" Search", desc_style),
            div.clone(),
            Span::styled("Esc", key_style),
            Span::styled(" Close search", desc_style),
            div.clone(),
            Span::styled("?", key_style),
            Span::styled(" Help", desc_style),
            div.clone(),
            Span::styled("q", key_style),
            Span::styled(" Quit", desc_style),
            Span::raw("   "),
            Span::styled(page_info, Style::default().fg(theme.primary)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        frame.render_widget(Paragraph::new(vec![line1, line2]).block(block), area);
    }
}
