// Text input for the video search. Activated with `/`; every edit re-runs
// the lookup.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{spinner_frame, Component};
use crate::state::ViewState;
use crate::theme::Theme;

#[derive(Default)]
pub struct SearchBar {
    action_tx: Option<UnboundedSender<Action>>,
    input: String,
    focused: bool,
    frame_count: u64,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn emit_query(&self) -> anyhow::Result<()> {
        if let Some(tx) = &self.action_tx {
            tx.send(Action::SearchQueryChanged(self.input.clone()))?;
        }
        Ok(())
    }
}

impl Component for SearchBar {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if !self.focused {
            return Ok(false);
        }
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                self.emit_query()?;
                Ok(true)
            }
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.emit_query()?;
                }
                Ok(true)
            }
            KeyCode::Enter => {
                // Keep the query and its results; hand the keys back to the lists.
                self.focused = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::Tick => {
                self.frame_count = self.frame_count.wrapping_add(1);
            }
            Action::FocusSearch => {
                self.focused = true;
            }
            Action::Back => {
                self.focused = false;
                self.input.clear();
            }
            Action::SelectVideo(_) => {
                self.focused = false;
            }
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, view: &ViewState, theme: &Theme) {
        let style = if self.focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text_dim)
        };

        let icon = if view.search_loading {
            spinner_frame(self.frame_count)
        } else {
            "/"
        };

        let display = if self.input.is_empty() && !self.focused {
            format!("{} Ask me anything...", icon)
        } else if self.focused {
            format!("{} {}_", icon, self.input)
        } else {
            format!("{} {}", icon, self.input)
        };

        let [input_area, hint_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).areas(area);
        frame.render_widget(Paragraph::new(display).style(style), input_area);

        if !self.input.is_empty() {
            let hint = Line::from(Span::styled("✦ AI Powered", Style::default().fg(theme.text_dim)));
            frame.render_widget(Paragraph::new(hint), hint_area);
        }
    }
}
