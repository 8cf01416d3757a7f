// Search overlay: drops down under the search bar while results are shown.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::api::models::{format_views, Video};
use crate::components::Component;
use crate::state::ViewState;
use crate::theme::Theme;

#[derive(Default)]
pub struct SearchResults {
    action_tx: Option<UnboundedSender<Action>>,
    selected: usize,
    len: usize,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Keep the cursor inside a result list of `len` entries.
    pub fn sync_len(&mut self, len: usize) {
        if len != self.len {
            self.selected = 0;
        }
        self.len = len;
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

fn result_item<'a>(video: &'a Video, selected: bool, theme: &Theme) -> ListItem<'a> {
    let title_style = if selected {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let marker = if selected { "▶ " } else { "  " };

    let lines = vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.primary)),
            Span::styled(video.title.as_str(), title_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(video.description.as_str(), Style::default().fg(theme.text_dim)),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("◷ {}  👁 {}  ", video.duration_label(), format_views(video.views)),
                Style::default().fg(theme.text_dim),
            ),
            Span::styled(video.category.as_str(), Style::default().fg(theme.secondary)),
        ]),
    ];

    let mut item = ListItem::new(lines);
    if selected {
        item = item.style(Style::default().bg(theme.selection_bg));
    }
    item
}

impl Component for SearchResults {
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
        if let Action::SearchResultsReady { .. } = action {
            self.selected = 0;
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, view: &ViewState, theme: &Theme) {
        if !view.search_visible {
            return;
        }
        let height = (view.search_results.len() as u16 * 3 + 2).min(area.height);
        let overlay = Rect { height, ..area };
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .title(format!(
                " ✦ AI found {} relevant videos ",
                view.search_results.len()
            ));

        let items: Vec<ListItem> = view
            .search_results
            .iter()
            .enumerate()
            .map(|(i, video)| result_item(video, i == self.selected, theme))
            .collect();

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(List::new(items).block(block), overlay, &mut state);
    }
}
