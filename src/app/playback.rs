// Playback: binding the player to the current video and auto-advancing when
// it finishes.

use crate::action::Action;
use crate::app::App;

impl App {
    /// Point the player at the video now on screen. Navigations autoplay
    /// because the transition flag is still up when they land.
    pub(super) async fn bind_current_video(&mut self) -> anyhow::Result<()> {
        let Some(video) = self.view.current_video.clone() else {
            return Ok(());
        };
        match self.player.bind(&video, self.view.transitioning).await {
            Ok(Some(session)) => {
                self.action_tx.send(Action::PlaybackStarted { session })?;
            }
            Ok(None) => {}
            Err(e) => {
                self.action_tx.send(Action::ShowError(format!(
                    "Could not start the player for {}: {}",
                    video.id, e
                )))?;
            }
        }
        Ok(())
    }

    /// The current video played to the end: report it, then move on to the
    /// top recommendation if there is one. A navigation already in flight
    /// takes precedence over auto-advance.
    pub(super) fn on_playback_ended(&mut self) {
        let Some(video) = &self.view.current_video else {
            return;
        };

        let source = self.source.clone();
        let video_id = video.id.clone();
        tokio::spawn(async move {
            if let Err(e) = source.mark_complete(&video_id).await {
                tracing::warn!(%video_id, "marking video complete: {e}");
            }
        });

        if let Some(pending) = &self.view.pending_video {
            tracing::info!(%pending, "navigation in flight, not auto-advancing");
            return;
        }
        if let Some(next) = self.view.auto_advance_target().map(str::to_string) {
            tracing::info!(%next, "auto-advancing");
            self.load_video(next);
        }
    }
}
