// End-to-end flows through the App event loop with in-memory sources and a
// recording player: initial load, navigation races, auto-advance, search
// supersession, failures and retry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::time::Instant;

use catalyx::action::Action;
use catalyx::api::mock::{mock_search_results, PaddedRecommendations};
use catalyx::api::models::{Recommendation, Video};
use catalyx::api::{ApiError, SearchProvider, VideoSource};
use catalyx::app::App;
use catalyx::config::Config;
use catalyx::player::{LaunchRequest, MediaPlayer};

// ── Fakes ────────────────────────────────────────────────────────────────────

fn make_video(id: &str) -> Video {
    Video {
        id: id.to_string(),
        title: format!("Video {}", id),
        description: String::new(),
        duration: 60,
        views: 0,
        category: "Test".to_string(),
        tags: vec![],
        thumbnail: None,
        created_at: None,
    }
}

fn rec(id: &str) -> Recommendation {
    Recommendation {
        video: make_video(id),
        relevance_score: 0.9,
        reason: format!("Follows on to {}", id),
    }
}

/// Library of known videos. Unknown ids fail with NotFound; ids listed in
/// `slow` answer their recommendations late.
#[derive(Default)]
struct FakeSource {
    library: Vec<String>,
    recs: HashMap<String, Vec<Recommendation>>,
    slow: HashMap<String, Duration>,
    completed: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    fn with_library(ids: &[&str]) -> Self {
        Self {
            library: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn recs(mut self, id: &str, next: &[&str]) -> Self {
        self.recs
            .insert(id.to_string(), next.iter().map(|n| rec(n)).collect());
        self
    }

    fn slow(mut self, id: &str, delay: Duration) -> Self {
        self.slow.insert(id.to_string(), delay);
        self
    }
}

#[async_trait]
impl VideoSource for FakeSource {
    async fn list_videos(&self) -> Result<Vec<Video>, ApiError> {
        Ok(self.library.iter().map(|id| make_video(id)).collect())
    }

    async fn video(&self, id: &str) -> Result<Video, ApiError> {
        if self.library.iter().any(|v| v == id) {
            Ok(make_video(id))
        } else {
            Err(ApiError::NotFound {
                path: format!("/api/videos/{}", id),
            })
        }
    }

    async fn recommendations(&self, id: &str) -> Result<Vec<Recommendation>, ApiError> {
        if let Some(delay) = self.slow.get(id) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.recs.get(id).cloned().unwrap_or_default())
    }

    async fn mark_complete(&self, id: &str) -> Result<(), ApiError> {
        self.completed.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// Search whose latency depends on the query.
struct FakeSearch {
    delays: HashMap<String, Duration>,
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<Video>, ApiError> {
        let delay = self.delays.get(query).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(mock_search_results(query))
    }
}

#[derive(Clone, Default)]
struct RecordingPlayer {
    launches: Arc<Mutex<Vec<LaunchRequest>>>,
}

#[async_trait]
impl MediaPlayer for RecordingPlayer {
    async fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()> {
        self.launches.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn toggle_pause(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn shutdown(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.backend.base_url = "http://test".to_string();
    config.ui.transition_ms = 10;
    config
}

fn build_app(source: impl VideoSource + 'static) -> (App, RecordingPlayer) {
    let player = RecordingPlayer::default();
    let search = FakeSearch {
        delays: HashMap::new(),
    };
    let app = App::with_parts(
        test_config(),
        Arc::new(source),
        Arc::new(search),
        Box::new(player.clone()),
    );
    (app, player)
}

/// Drive the event loop until `done` holds, failing after two seconds.
async fn pump_until<F: Fn(&App) -> bool>(app: &mut App, done: F) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !done(&*app) {
        match tokio::time::timeout_at(deadline, app.process_next()).await {
            Ok(result) => {
                result.unwrap();
            }
            Err(_) => panic!("app did not reach the expected state in time"),
        }
    }
}

/// Drive the event loop for `span`, handling whatever arrives.
async fn pump_for(app: &mut App, span: Duration) {
    let deadline = Instant::now() + span;
    while let Ok(result) = tokio::time::timeout_at(deadline, app.process_next()).await {
        result.unwrap();
    }
}

fn current_id(app: &App) -> Option<&str> {
    app.view.current_video.as_ref().map(|v| v.id.as_str())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn start(app: &mut App) {
    app.action_sender().send(Action::LoadInitial).unwrap();
    pump_until(app, |a| a.view.current_video.is_some()).await;
}

// ── Initial load ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initial_load_shows_first_video_and_plays_it() {
    let source = FakeSource::with_library(&["a", "b"]).recs("a", &["b"]);
    let (mut app, player) = build_app(source);

    assert!(app.view.loading);
    start(&mut app).await;

    assert_eq!(current_id(&app), Some("a"));
    assert!(!app.view.loading);
    assert_eq!(app.view.recommendations.len(), 1);
    assert_eq!(app.view.page, 1);

    let launches = player.launches.lock().unwrap().clone();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].url, "http://test/api/videos/a/stream");
    assert!(launches[0].autoplay);

    pump_until(&mut app, |a| !a.view.transitioning).await;
}

#[tokio::test]
async fn test_empty_library_shows_notice() {
    let (mut app, player) = build_app(FakeSource::default());
    app.action_sender().send(Action::LoadInitial).unwrap();
    pump_until(&mut app, |a| a.view.library_empty).await;

    assert!(app.view.current_video.is_none());
    assert!(player.launches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_padding_decorator_feeds_pagination() {
    let source = FakeSource::with_library(&["a"]).recs("a", &["b", "c"]);
    let (mut app, _player) = build_app(PaddedRecommendations::new(source, 9));
    start(&mut app).await;

    assert_eq!(app.view.recommendations.len(), 11);
    assert_eq!(app.view.total_pages(), 4);

    app.action_sender().send(Action::GoToPage(4)).unwrap();
    app.action_sender().send(Action::NextPage).unwrap();
    app.action_sender().send(Action::GoToPage(9)).unwrap();
    app.flush_actions().await;

    assert_eq!(app.view.page, 4);
    assert_eq!(app.view.visible_recommendations().len(), 2);
}

// ── Navigation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_newer_navigation_wins_over_slow_one() {
    let source = FakeSource::with_library(&["start", "slow", "fast"])
        .recs("start", &["slow", "fast"])
        .recs("slow", &["x", "y", "z"])
        .recs("fast", &["start"])
        .slow("slow", Duration::from_millis(200));
    let (mut app, player) = build_app(source);
    start(&mut app).await;

    let tx = app.action_sender();
    tx.send(Action::SelectVideo("slow".to_string())).unwrap();
    tx.send(Action::SelectVideo("fast".to_string())).unwrap();

    pump_until(&mut app, |a| current_id(a) == Some("fast")).await;
    // Give the slow request time to land if it were still alive.
    pump_for(&mut app, Duration::from_millis(300)).await;

    assert_eq!(current_id(&app), Some("fast"));
    assert_eq!(app.view.recommendations.len(), 1);
    assert_eq!(app.view.recommendations[0].video.id, "start");
    let urls: Vec<String> = player
        .launches
        .lock()
        .unwrap()
        .iter()
        .map(|l| l.url.clone())
        .collect();
    assert!(!urls.iter().any(|u| u.contains("/slow/")));
}

#[tokio::test]
async fn test_navigation_resets_page_and_closes_search() {
    let source = FakeSource::with_library(&["a", "b"]).recs("a", &["b"]);
    let (mut app, _player) = build_app(PaddedRecommendations::new(source, 8));
    start(&mut app).await;

    let tx = app.action_sender();
    tx.send(Action::GoToPage(3)).unwrap();
    tx.send(Action::SearchQueryChanged("loops".to_string())).unwrap();
    pump_until(&mut app, |a| a.view.search_visible).await;
    assert_eq!(app.view.page, 3);

    tx.send(Action::SelectVideo("b".to_string())).unwrap();
    pump_until(&mut app, |a| a.view.pending_video.as_deref() == Some("b")).await;
    assert_eq!(app.view.page, 1);
    assert!(!app.view.search_visible);
    assert_eq!(app.view.pending_video.as_deref(), Some("b"));

    pump_until(&mut app, |a| current_id(a) == Some("b")).await;
}

#[tokio::test]
async fn test_failed_navigation_keeps_video_and_retry_repeats_it() {
    let source = FakeSource::with_library(&["a"]).recs("a", &["ghost"]);
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    app.action_sender()
        .send(Action::SelectVideo("ghost".to_string()))
        .unwrap();
    pump_until(&mut app, |a| a.view.nav_error.is_some()).await;

    assert_eq!(current_id(&app), Some("a"));
    assert!(!app.view.transitioning);
    assert_eq!(app.view.nav_error.as_ref().unwrap().video_id, "ghost");

    app.action_sender().send(Action::Retry).unwrap();
    pump_until(&mut app, |a| a.view.pending_video.as_deref() == Some("ghost")).await;
    assert!(app.view.nav_error.is_none());
    assert_eq!(app.view.pending_video.as_deref(), Some("ghost"));

    pump_until(&mut app, |a| a.view.nav_error.is_some()).await;
    assert_eq!(current_id(&app), Some("a"));
}

#[tokio::test]
async fn test_enter_selects_highlighted_recommendation() {
    let source = FakeSource::with_library(&["a", "b", "c"]).recs("a", &["b", "c"]);
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    app.handle_key(key(KeyCode::Char('j'))).unwrap();
    assert_eq!(app.highlighted_video_id().as_deref(), Some("c"));
    app.handle_key(key(KeyCode::Enter)).unwrap();

    pump_until(&mut app, |a| current_id(a) == Some("c")).await;
}

// ── Playback ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_playback_end_marks_complete_and_advances() {
    let source = FakeSource::with_library(&["a", "b"]).recs("a", &["b"]);
    let completed = source.completed.clone();
    let (mut app, player) = build_app(source);
    start(&mut app).await;

    let session = app.player.binding().unwrap().session;
    app.action_sender()
        .send(Action::PlaybackEnded { session })
        .unwrap();
    pump_until(&mut app, |a| current_id(a) == Some("b")).await;

    // The completion report is fire-and-forget.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(completed.lock().unwrap().clone(), vec!["a"]);

    let launches = player.launches.lock().unwrap().clone();
    assert_eq!(launches.len(), 2);
    assert_eq!(launches[1].url, "http://test/api/videos/b/stream");
    assert!(launches[1].session > launches[0].session);
}

#[tokio::test]
async fn test_playback_end_after_player_exit_still_advances() {
    let source = FakeSource::with_library(&["a", "b"]).recs("a", &["b"]);
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    let session = app.player.binding().unwrap().session;
    let tx = app.action_sender();
    tx.send(Action::PlayerClosed { session }).unwrap();
    tx.send(Action::PlaybackEnded { session }).unwrap();

    pump_until(&mut app, |a| current_id(a) == Some("b")).await;
}

#[tokio::test]
async fn test_playback_end_does_not_override_pending_selection() {
    let source = FakeSource::with_library(&["a", "b", "c"])
        .recs("a", &["b"])
        .slow("c", Duration::from_millis(100));
    let completed = source.completed.clone();
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    let session = app.player.binding().unwrap().session;
    let tx = app.action_sender();
    tx.send(Action::SelectVideo("c".to_string())).unwrap();
    tx.send(Action::PlaybackEnded { session }).unwrap();

    pump_until(&mut app, |a| current_id(a) == Some("c")).await;
    pump_for(&mut app, Duration::from_millis(150)).await;

    assert_eq!(current_id(&app), Some("c"));
    assert!(app.view.pending_video.is_none());
    assert_eq!(completed.lock().unwrap().clone(), vec!["a"]);
}

#[tokio::test]
async fn test_flush_handles_every_queued_action() {
    let source = FakeSource::with_library(&["a"]).recs("a", &["b", "c", "d", "e"]);
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    let tx = app.action_sender();
    tx.send(Action::NextPage).unwrap();
    tx.send(Action::ShowHelp).unwrap();
    app.flush_actions().await;

    assert_eq!(app.view.page, 2);
    assert!(app.show_help);
}

#[tokio::test]
async fn test_stale_playback_end_is_ignored() {
    let source = FakeSource::with_library(&["a", "b"]).recs("a", &["b"]);
    let completed = source.completed.clone();
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    let session = app.player.binding().unwrap().session;
    app.action_sender()
        .send(Action::PlaybackEnded {
            session: session + 100,
        })
        .unwrap();
    pump_for(&mut app, Duration::from_millis(50)).await;

    assert_eq!(current_id(&app), Some("a"));
    assert!(app.view.pending_video.is_none());
    assert!(completed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_playback_end_without_recommendations_stays_put() {
    let source = FakeSource::with_library(&["a"]);
    let completed = source.completed.clone();
    let (mut app, _player) = build_app(source);
    start(&mut app).await;

    let session = app.player.binding().unwrap().session;
    app.action_sender()
        .send(Action::PlaybackEnded { session })
        .unwrap();
    pump_for(&mut app, Duration::from_millis(50)).await;

    assert_eq!(current_id(&app), Some("a"));
    assert!(app.view.pending_video.is_none());
    assert_eq!(completed.lock().unwrap().clone(), vec!["a"]);
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_later_search_wins_over_slower_earlier_one() {
    let source = FakeSource::with_library(&["a"]);
    let player = RecordingPlayer::default();
    let search = FakeSearch {
        delays: HashMap::from([
            ("loops".to_string(), Duration::from_millis(200)),
            ("arrays".to_string(), Duration::from_millis(10)),
        ]),
    };
    let mut app = App::with_parts(
        test_config(),
        Arc::new(source),
        Arc::new(search),
        Box::new(player),
    );
    start(&mut app).await;

    let tx = app.action_sender();
    tx.send(Action::SearchQueryChanged("loops".to_string())).unwrap();
    tx.send(Action::SearchQueryChanged("arrays".to_string())).unwrap();

    pump_until(&mut app, |a| a.view.search_visible).await;
    pump_for(&mut app, Duration::from_millis(300)).await;

    assert_eq!(app.view.search_query, "arrays");
    assert_eq!(app.view.search_results.len(), 3);
    assert_eq!(app.view.search_results[0].title, "How to arrays?");
}

#[tokio::test]
async fn test_clearing_query_hides_results() {
    let (mut app, _player) = build_app(FakeSource::with_library(&["a"]));
    start(&mut app).await;

    let tx = app.action_sender();
    tx.send(Action::SearchQueryChanged("loops".to_string())).unwrap();
    pump_until(&mut app, |a| a.view.search_visible).await;

    tx.send(Action::SearchQueryChanged("   ".to_string())).unwrap();
    pump_until(&mut app, |a| !a.view.search_visible).await;
    assert!(!app.view.search_visible);
    assert!(app.view.search_results.is_empty());
}

#[tokio::test]
async fn test_escape_closes_search() {
    let (mut app, _player) = build_app(FakeSource::with_library(&["a"]));
    start(&mut app).await;

    app.handle_key(key(KeyCode::Char('/'))).unwrap();
    pump_until(&mut app, |a| a.search_bar.is_focused()).await;
    assert!(app.search_bar.is_focused());

    app.handle_key(key(KeyCode::Char('x'))).unwrap();
    pump_until(&mut app, |a| a.view.search_visible).await;

    app.handle_key(key(KeyCode::Esc)).unwrap();
    pump_until(&mut app, |a| !a.search_bar.is_focused()).await;
    assert!(!app.view.search_visible);
    assert!(!app.search_bar.is_focused());
    assert!(app.search_bar.input().is_empty());
}

#[tokio::test]
async fn test_quit_stops_the_loop() {
    let (mut app, _player) = build_app(FakeSource::with_library(&["a"]));
    start(&mut app).await;
    app.action_sender().send(Action::Quit).unwrap();
    pump_until(&mut app, |a| !a.is_running()).await;
    assert!(app.player.binding().is_none());
}
