// Central coordinator: owns the view state, the components, the backend
// sources, and the playback surface. Runs the event loop
// (key → Action → handle_action → state/player/component updates → draw).

mod fetch;
mod input;
mod playback;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::action::Action;
use crate::api::client::BackendClient;
use crate::api::mock::{MockSearch, PaddedRecommendations};
use crate::api::{SearchProvider, VideoSource};
use crate::components::recommendation_list::RecommendationList;
use crate::components::search_bar::SearchBar;
use crate::components::search_results::SearchResults;
use crate::components::status_bar::StatusBar;
use crate::components::video_panel::VideoPanel;
use crate::components::Component;
use crate::config::Config;
use crate::player::{MediaPlayer, MpvPlayer, PlaybackSurface};
use crate::state::ViewState;
use crate::theme::Theme;
use crate::tui::{Tui, TuiEvent};
use crate::ui;

/// How long a transient error stays in the error bar.
const ERROR_DISPLAY_SECS: u64 = 5;

/// Top-level coordinator. All view state lives here and is only touched from
/// the event loop; background tasks report back through the action channel.
pub struct App {
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    // Components
    pub search_bar: SearchBar,
    pub search_results: SearchResults,
    pub recommendation_list: RecommendationList,
    pub video_panel: VideoPanel,
    pub status_bar: StatusBar,

    // State
    pub view: ViewState,
    pub(crate) source: Arc<dyn VideoSource>,
    pub(crate) search: Arc<dyn SearchProvider>,
    pub player: PlaybackSurface,
    pub(crate) config: Config,
    theme: Theme,
    pub(crate) nav_task: Option<JoinHandle<()>>,
    pub(crate) search_task: Option<JoinHandle<()>>,
    pub show_help: bool,
    pub error_message: Option<String>,
    frame_count: u64,
}

impl App {
    /// Wire the app to the configured backend, the mock search, and mpv.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = BackendClient::new(&config.backend)?;
        let base_url = client.base_url().to_string();
        let extra = config.mock.extra_recommendations;
        let source: Arc<dyn VideoSource> = if extra > 0 {
            Arc::new(PaddedRecommendations::new(client, extra))
        } else {
            Arc::new(client)
        };
        let search: Arc<dyn SearchProvider> = Arc::new(MockSearch::new(Duration::from_millis(
            config.search.delay_ms,
        )));

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut mpv = MpvPlayer::new(&config.player);
        mpv.set_action_tx(action_tx.clone());
        let player = PlaybackSurface::new(Box::new(mpv), base_url);

        Ok(Self::assemble(
            config, source, search, player, action_tx, action_rx,
        ))
    }

    /// Build an app around caller-supplied sources and player.
    pub fn with_parts(
        config: Config,
        source: Arc<dyn VideoSource>,
        search: Arc<dyn SearchProvider>,
        player: Box<dyn MediaPlayer>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let player = PlaybackSurface::new(player, config.backend.base_url.clone());
        Self::assemble(config, source, search, player, action_tx, action_rx)
    }

    fn assemble(
        config: Config,
        source: Arc<dyn VideoSource>,
        search: Arc<dyn SearchProvider>,
        player: PlaybackSurface,
        action_tx: mpsc::UnboundedSender<Action>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        let mut search_bar = SearchBar::new();
        let mut search_results = SearchResults::new();
        let mut recommendation_list = RecommendationList::new();
        let mut video_panel = VideoPanel::new();
        let mut status_bar = StatusBar::new();

        for component in [
            &mut search_bar as &mut dyn Component,
            &mut search_results,
            &mut recommendation_list,
            &mut video_panel,
            &mut status_bar,
        ] {
            component.register_action_handler(action_tx.clone());
        }

        let theme = Theme::from_name(&config.general.theme);

        Self {
            running: true,
            action_tx,
            action_rx,
            search_bar,
            search_results,
            recommendation_list,
            video_panel,
            status_bar,
            view: ViewState::new(),
            source,
            search,
            player,
            config,
            theme,
            nav_task: None,
            search_task: None,
            show_help: false,
            error_message: None,
            frame_count: 0,
        }
    }

    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut tui = Tui::new(self.config.general.frame_rate)?;
        tui.enter()?;

        self.action_tx.send(Action::LoadInitial)?;

        while self.running {
            let state = ui::DrawState {
                view: &self.view,
                search_bar: &self.search_bar,
                search_results: &self.search_results,
                recommendation_list: &self.recommendation_list,
                video_panel: &self.video_panel,
                status_bar: &self.status_bar,
                error_message: &self.error_message,
                show_help: self.show_help,
                theme: &self.theme,
                frame_count: self.frame_count,
            };
            tui.draw(|frame| ui::draw(frame, &state))?;

            tokio::select! {
                Some(event) = tui.event_rx.recv() => {
                    match event {
                        TuiEvent::Key(key) => self.handle_key(key)?,
                        TuiEvent::Resize => {} // ratatui redraws at correct size automatically
                        TuiEvent::Tick => { self.action_tx.send(Action::Tick)?; }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
            }
        }

        self.player.release().await?;
        tui.exit()?;
        Ok(())
    }

    pub async fn handle_action(&mut self, action: Action) -> anyhow::Result<()> {
        match action {
            // Lifecycle
            Action::Quit => {
                if let Err(e) = self.player.release().await {
                    tracing::warn!("releasing player on quit: {e:#}");
                }
                self.running = false;
            }

            // Library and navigation
            Action::LoadInitial => self.spawn_load_initial(),
            Action::LibraryLoaded(videos) => match videos.first() {
                Some(first) => self.load_video(first.id.clone()),
                None => {
                    tracing::warn!("backend listed no videos");
                    self.view.mark_library_empty();
                }
            },
            Action::SelectVideo(ref id) => {
                self.search_bar.update(&action)?;
                self.load_video(id.clone());
            }
            Action::VideoLoaded {
                nav_id,
                ref video,
                ref recommendations,
            } => {
                if self
                    .view
                    .apply_navigation(nav_id, video.clone(), recommendations.clone())
                {
                    tracing::info!(nav_id, video_id = %video.id, recs = recommendations.len(), "video loaded");
                    self.recommendation_list.update(&action)?;
                    self.schedule_transition_settle(nav_id);
                    self.bind_current_video().await?;
                } else {
                    tracing::debug!(nav_id, video_id = %video.id, "discarding superseded navigation");
                }
            }
            Action::VideoLoadFailed {
                nav_id,
                video_id,
                message,
            } => {
                if self.view.fail_navigation(nav_id, &video_id, &message) {
                    tracing::warn!(nav_id, %video_id, "navigation failed: {message}");
                }
            }
            Action::TransitionSettled { nav_id } => {
                self.view.settle_transition(nav_id);
            }
            Action::Retry => self.retry()?,

            // Search
            Action::FocusSearch => {
                self.search_bar.update(&action)?;
            }
            Action::SearchQueryChanged(query) => self.run_search(query),
            Action::SearchResultsReady {
                search_id,
                ref results,
            } => {
                if self.view.apply_search(search_id, results.clone()) {
                    self.search_results.update(&action)?;
                } else {
                    tracing::debug!(search_id, "discarding superseded search results");
                }
            }
            Action::SearchFailed { search_id, message } => {
                if self.view.fail_search(search_id) {
                    self.action_tx
                        .send(Action::ShowError(format!("Search failed: {}", message)))?;
                }
            }

            // Pagination
            Action::NextPage => {
                if self.view.next_page() {
                    self.recommendation_list.update(&action)?;
                }
            }
            Action::PrevPage => {
                if self.view.prev_page() {
                    self.recommendation_list.update(&action)?;
                }
            }
            Action::GoToPage(page) => {
                if self.view.go_to_page(page) {
                    self.recommendation_list.update(&action)?;
                }
            }

            // Playback
            Action::TogglePause => {
                if let Err(e) = self.player.toggle_pause().await {
                    tracing::warn!("toggle pause: {e:#}");
                }
                self.video_panel.update(&action)?;
                self.status_bar.update(&action)?;
            }
            Action::PlaybackStarted { .. } => {
                self.video_panel.update(&action)?;
                self.status_bar.update(&action)?;
            }
            Action::PlaybackPosition { session, .. } => {
                if self.player.is_live(session) {
                    self.video_panel.update(&action)?;
                }
            }
            Action::PlaybackEnded { session } => {
                if self.player.mark_finished(session) {
                    self.video_panel.update(&action)?;
                    self.status_bar.update(&action)?;
                    self.on_playback_ended();
                }
            }
            Action::PlayerClosed { session } => {
                if self.player.mark_closed(session) {
                    self.video_panel.update(&action)?;
                    self.status_bar.update(&action)?;
                }
            }

            // Errors & help
            Action::ShowError(msg) => {
                tracing::warn!("{msg}");
                self.error_message = Some(msg);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(ERROR_DISPLAY_SECS)).await;
                    tx.send(Action::ClearError).ok();
                });
            }
            Action::ClearError => self.error_message = None,
            Action::ShowHelp => self.show_help = true,
            Action::HideHelp => self.show_help = false,

            // Navigation
            Action::Back => {
                self.cancel_search();
                self.view.hide_search();
                self.search_bar.update(&action)?;
            }

            Action::Tick => {
                self.frame_count = self.frame_count.wrapping_add(1);
                self.search_bar.update(&action)?;
                self.video_panel.update(&action)?;
                self.status_bar.update(&action)?;
            }
        }
        self.sync_components();
        Ok(())
    }

    fn sync_components(&mut self) {
        self.recommendation_list
            .sync_len(self.view.visible_recommendations().len());
        self.search_results.sync_len(self.view.search_results.len());
    }

    fn retry(&mut self) -> anyhow::Result<()> {
        self.error_message = None;
        if let Some(err) = self.view.nav_error.clone() {
            self.load_video(err.video_id);
        } else if self.view.current_video.is_none() && self.view.pending_video.is_none() {
            self.action_tx.send(Action::LoadInitial)?;
        }
        Ok(())
    }

    /// Handle everything already queued, without waiting for more.
    pub async fn flush_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            if let Err(e) = self.handle_action(action).await {
                tracing::warn!("handling queued action: {e:#}");
            }
        }
    }

    /// Wait for the next action and handle it. Returns false once every
    /// sender is gone.
    pub async fn process_next(&mut self) -> anyhow::Result<bool> {
        match self.action_rx.recv().await {
            Some(action) => {
                self.handle_action(action).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
