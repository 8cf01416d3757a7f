// Data fetching: spawns the library load, the joined video + recommendations
// request for each navigation, and search lookups. Every result is tagged with
// the ticket the view state handed out, so superseded ones are dropped.

use std::time::Duration;

use crate::action::Action;
use crate::app::App;

impl App {
    pub(super) fn spawn_load_initial(&self) {
        let tx = self.action_tx.clone();
        let source = self.source.clone();
        tokio::spawn(async move {
            let action = match source.list_videos().await {
                Ok(videos) => Action::LibraryLoaded(videos),
                Err(e) => Action::ShowError(format!("Could not load the video library: {}", e)),
            };
            tx.send(action).ok();
        });
    }

    /// Navigate to `video_id`: both requests run concurrently and land
    /// together, or the navigation fails as a whole.
    pub(crate) fn load_video(&mut self, video_id: String) {
        let nav_id = self.view.begin_navigation(&video_id);
        if let Some(task) = self.nav_task.take() {
            task.abort();
        }
        self.cancel_search();
        tracing::info!(nav_id, %video_id, "navigating");

        let tx = self.action_tx.clone();
        let source = self.source.clone();
        self.nav_task = Some(tokio::spawn(async move {
            let joined = tokio::try_join!(
                source.video(&video_id),
                source.recommendations(&video_id)
            );
            let action = match joined {
                Ok((video, recommendations)) => Action::VideoLoaded {
                    nav_id,
                    video,
                    recommendations,
                },
                Err(e) => Action::VideoLoadFailed {
                    nav_id,
                    video_id,
                    message: e.to_string(),
                },
            };
            tx.send(action).ok();
        }));
    }

    /// Lower the transition flag once the cross-fade has had time to finish.
    pub(super) fn schedule_transition_settle(&self, nav_id: u64) {
        let tx = self.action_tx.clone();
        let delay = Duration::from_millis(self.config.ui.transition_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(Action::TransitionSettled { nav_id }).ok();
        });
    }

    pub(super) fn run_search(&mut self, query: String) {
        self.cancel_search();
        let Some(search_id) = self.view.begin_search(&query) else {
            return;
        };

        let tx = self.action_tx.clone();
        let provider = self.search.clone();
        self.search_task = Some(tokio::spawn(async move {
            let action = match provider.search(&query).await {
                Ok(results) => Action::SearchResultsReady { search_id, results },
                Err(e) => Action::SearchFailed {
                    search_id,
                    message: e.to_string(),
                },
            };
            tx.send(action).ok();
        }));
    }

    pub(super) fn cancel_search(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
    }
}
