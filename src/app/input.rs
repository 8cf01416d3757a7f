// Key event handling: maps key presses to actions.

use crate::action::Action;
use crate::app::App;
use crate::components::Component;
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        use KeyCode::{Char, Enter, Esc, Left, Right};

        // The help overlay consumes all keys
        if self.show_help {
            self.action_tx.send(Action::HideHelp)?;
            return Ok(());
        }

        if key.code == Esc {
            return self.action_tx.send(Action::Back).map_err(Into::into);
        }

        // In search mode, forward to the search bar; if it didn't consume the
        // key (e.g. arrow keys), fall through to normal-mode bindings.
        if self.search_bar.is_focused() && self.search_bar.handle_key_event(key)? {
            return Ok(());
        }

        match key.code {
            Char('q') => self.action_tx.send(Action::Quit)?,
            Char('?') => self.action_tx.send(Action::ShowHelp)?,
            Char('/') => self.action_tx.send(Action::FocusSearch)?,
            Char(' ') => self.action_tx.send(Action::TogglePause)?,
            Char('r') => self.action_tx.send(Action::Retry)?,
            Right | Char('l') => self.action_tx.send(Action::NextPage)?,
            Left | Char('h') => self.action_tx.send(Action::PrevPage)?,
            Char(c) if c.is_ascii_digit() && c != '0' => {
                let page = c.to_digit(10).unwrap_or(1) as usize;
                self.action_tx.send(Action::GoToPage(page))?;
            }
            Enter => {
                if let Some(id) = self.highlighted_video_id() {
                    self.action_tx.send(Action::SelectVideo(id))?;
                }
            }
            _ => {
                if self.view.search_visible {
                    self.search_results.handle_key_event(key)?;
                } else {
                    self.recommendation_list.handle_key_event(key)?;
                }
            }
        }
        Ok(())
    }

    /// Video under the cursor: in the search overlay while it is open,
    /// otherwise on the current recommendation page.
    pub fn highlighted_video_id(&self) -> Option<String> {
        if self.view.search_visible {
            self.view
                .search_results
                .get(self.search_results.selected())
                .map(|v| v.id.clone())
        } else {
            self.view
                .visible_recommendations()
                .get(self.recommendation_list.selected())
                .map(|r| r.video.id.clone())
        }
    }
}
