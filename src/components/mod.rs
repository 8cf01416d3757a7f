// src/components/mod.rs

pub mod recommendation_list;
pub mod search_bar;
pub mod search_results;
pub mod status_bar;
pub mod video_panel;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::state::ViewState;
use crate::theme::Theme;

/// Braille spinner frames, advanced every third tick.
pub const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(frame_count: u64) -> &'static str {
    BRAILLE_SPINNER[(frame_count / 3) as usize % BRAILLE_SPINNER.len()]
}

pub trait Component {
    /// Register the action sender for this component.
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>);

    /// Handle a key event. Return Ok(true) if the event was consumed.
    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        let _ = key;
        Ok(false)
    }

    /// Handle an action dispatched by App. Return optional follow-up actions.
    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        let _ = action;
        Ok(vec![])
    }

    /// Render this component into the given area. View data is read from
    /// `view`; components only own cursor and animation state.
    fn draw(&self, frame: &mut Frame, area: Rect, view: &ViewState, theme: &Theme);
}
