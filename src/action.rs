// Every user interaction, async result, and internal event is represented as an
// Action variant. The App event loop dispatches these to the view state,
// the player, and the components.

use crate::api::models::{Recommendation, Video};

/// Events flowing through the app. The [`App`](crate::app::App) event loop
/// dispatches each variant to its handler.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,

    // Library and navigation
    LoadInitial,
    LibraryLoaded(Vec<Video>),
    SelectVideo(String),
    VideoLoaded {
        nav_id: u64,
        video: Video,
        recommendations: Vec<Recommendation>,
    },
    VideoLoadFailed {
        nav_id: u64,
        video_id: String,
        message: String,
    },
    TransitionSettled {
        nav_id: u64,
    },
    Retry,

    // Search
    FocusSearch,
    SearchQueryChanged(String),
    SearchResultsReady {
        search_id: u64,
        results: Vec<Video>,
    },
    SearchFailed {
        search_id: u64,
        message: String,
    },

    // Pagination
    NextPage,
    PrevPage,
    GoToPage(usize),

    // Playback
    TogglePause,
    PlaybackStarted {
        session: u64,
    },
    PlaybackPosition {
        session: u64,
        secs: f64,
    },
    PlaybackEnded {
        session: u64,
    },
    PlayerClosed {
        session: u64,
    },

    ShowError(String),
    ClearError,
    ShowHelp,
    HideHelp,
    Tick,
}
