// src/components/video_panel.rs

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::api::models::{format_duration, format_views, Video};
use crate::components::{spinner_frame, Component};
use crate::state::ViewState;
use crate::theme::Theme;

/// Details of the current video and the state of its player window.
#[derive(Default)]
pub struct VideoPanel {
    action_tx: Option<UnboundedSender<Action>>,
    pub position_secs: f64,
    pub playing: bool,
    pub paused: bool,
    frame_count: u64,
}

impl VideoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn playback_label(&self, view: &ViewState) -> String {
        if view.transitioning {
            format!("{} Switching video...", spinner_frame(self.frame_count))
        } else if self.paused {
            "⏸ Paused".to_string()
        } else if self.playing {
            "▶ Playing in player window".to_string()
        } else {
            "■ Stopped".to_string()
        }
    }

    fn progress(&self, video: &Video) -> f64 {
        if video.duration == 0 {
            return 0.0;
        }
        (self.position_secs / video.duration as f64).clamp(0.0, 1.0)
    }
}

impl Component for VideoPanel {
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
                self.position_secs = 0.0;
            }
            Action::PlaybackPosition { secs, .. } => {
                self.position_secs = *secs;
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
        let Some(video) = &view.current_video else {
            return;
        };

        let [title_area, status_area, gauge_area, body_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                video.title.as_str(),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: true }),
            title_area,
        );

        let status_color = if view.transitioning {
            theme.warning
        } else if self.playing && !self.paused {
            theme.success
        } else {
            theme.text_dim
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.playback_label(view),
                Style::default().fg(status_color),
            )),
            status_area,
        );

        let label = format!(
            "{} / {}",
            format_duration(self.position_secs as u64),
            video.duration_label()
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(theme.primary).bg(theme.selection_bg))
                .ratio(self.progress(video))
                .label(label),
            gauge_area,
        );

        let tags: Vec<Span> = video
            .tags
            .iter()
            .flat_map(|tag| {
                [
                    Span::styled(format!("#{}", tag), Style::default().fg(theme.secondary)),
                    Span::raw(" "),
                ]
            })
            .collect();

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                video.description.as_str(),
                Style::default().fg(theme.text),
            )),
            Line::from(""),
            Line::from(tags),
            Line::from(""),
            Line::from(vec![
                Span::styled("◷ ", Style::default().fg(theme.text_dim)),
                Span::styled(video.duration_label(), Style::default().fg(theme.text)),
                Span::styled("   👁 ", Style::default().fg(theme.text_dim)),
                Span::styled(
                    format!("{} views", format_views(video.views)),
                    Style::default().fg(theme.text),
                ),
                Span::styled("   ", Style::default()),
                Span::styled(
                    video.category.as_str(),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(pending) = &view.pending_video {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} Loading {}...", spinner_frame(self.frame_count), pending),
                Style::default().fg(theme.warning),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body_area);
    }
}
