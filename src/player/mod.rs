// Playback surface: binds exactly one external player instance to exactly one
// video id, and tags every player event with a session so stale ones can be
// told apart.

pub mod ipc;

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::api::client::stream_url;
use crate::api::models::Video;
use crate::config::PlayerConfig;
use ipc::MpvProcess;

/// Everything a player needs to start one session.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    pub session: u64,
    pub url: String,
    pub title: String,
    pub autoplay: bool,
}

/// An external media player. Implementations report progress by sending
/// session-tagged actions on their own.
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Start a new instance, replacing any running one.
    async fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()>;

    async fn toggle_pause(&self) -> anyhow::Result<()>;

    /// Tear down the running instance, if any.
    async fn shutdown(&mut self) -> anyhow::Result<()>;
}

/// The player's current video.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub video_id: String,
    pub session: u64,
    /// The video played to the end; the instance may still be exiting.
    pub finished: bool,
}

pub struct PlaybackSurface {
    player: Box<dyn MediaPlayer>,
    base_url: String,
    binding: Option<Binding>,
    /// The binding whose window closed on its own. mpv exits at end of file,
    /// so its `end-file` event can arrive after the exit is noticed.
    closed: Option<Binding>,
    last_session: u64,
}

impl PlaybackSurface {
    pub fn new(player: Box<dyn MediaPlayer>, base_url: impl Into<String>) -> Self {
        Self {
            player,
            base_url: base_url.into(),
            binding: None,
            closed: None,
            last_session: 0,
        }
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    /// Point the player at `video`. A no-op while the same video is still
    /// playing; otherwise the previous instance is released first. Returns the
    /// new session, or `None` when nothing changed.
    pub async fn bind(&mut self, video: &Video, autoplay: bool) -> anyhow::Result<Option<u64>> {
        if let Some(b) = &self.binding {
            if b.video_id == video.id && !b.finished {
                return Ok(None);
            }
        }
        self.release().await?;

        self.last_session += 1;
        let session = self.last_session;
        let request = LaunchRequest {
            session,
            url: stream_url(&self.base_url, &video.id),
            title: video.title.clone(),
            autoplay,
        };
        self.player.launch(&request).await?;
        self.binding = Some(Binding {
            video_id: video.id.clone(),
            session,
            finished: false,
        });
        Ok(Some(session))
    }

    pub async fn release(&mut self) -> anyhow::Result<()> {
        self.closed = None;
        if self.binding.take().is_some() {
            self.player.shutdown().await?;
        }
        Ok(())
    }

    /// Whether an event from `session` concerns the live instance.
    pub fn is_live(&self, session: u64) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|b| b.session == session && !b.finished)
    }

    /// Record that `session` reached the end. Returns false for stale or
    /// repeated notifications, so each session ends at most once. Still
    /// accepted for a session whose window has already closed, as long as
    /// nothing was bound since.
    pub fn mark_finished(&mut self, session: u64) -> bool {
        let target = self
            .binding
            .iter_mut()
            .chain(self.closed.iter_mut())
            .find(|b| b.session == session);
        match target {
            Some(b) if !b.finished => {
                b.finished = true;
                true
            }
            _ => false,
        }
    }

    /// The instance for `session` went away by itself (window closed).
    pub fn mark_closed(&mut self, session: u64) -> bool {
        if self.binding.as_ref().is_some_and(|b| b.session == session) {
            self.closed = self.binding.take();
            true
        } else {
            false
        }
    }

    pub async fn toggle_pause(&self) -> anyhow::Result<()> {
        if self.binding.is_some() {
            self.player.toggle_pause().await?;
        }
        Ok(())
    }
}

/// mpv in its own window, controlled over a per-session JSON IPC socket.
pub struct MpvPlayer {
    command: String,
    extra_args: Vec<String>,
    socket_path: Option<PathBuf>,
    action_tx: Option<mpsc::UnboundedSender<Action>>,
    child: Option<MpvProcess>,
}

impl MpvPlayer {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            command: config.command.clone(),
            extra_args: config.extra_args.clone(),
            socket_path: None,
            action_tx: None,
            child: None,
        }
    }

    pub fn set_action_tx(&mut self, tx: mpsc::UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    pub fn socket_path_for(session: u64) -> PathBuf {
        std::env::temp_dir().join(format!(
            "catalyx-mpv-{}-{}.sock",
            std::process::id(),
            session
        ))
    }

    /// Arguments passed to mpv for `request`, media URL last.
    pub fn args_for(&self, request: &LaunchRequest, socket_path: &std::path::Path) -> Vec<String> {
        let mut args = vec![
            "--force-window=yes".to_string(),
            "--no-terminal".to_string(),
            format!("--input-ipc-server={}", socket_path.display()),
            format!("--title={}", request.title),
        ];
        if !request.autoplay {
            args.push("--pause".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl MediaPlayer for MpvPlayer {
    async fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()> {
        self.shutdown().await?;

        let socket_path = Self::socket_path_for(request.session);
        let _ = std::fs::remove_file(&socket_path);

        let child = Command::new(&self.command)
            .args(self.args_for(request, &socket_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        tracing::debug!(session = request.session, url = %request.url, "mpv launched");

        let process: MpvProcess = std::sync::Arc::new(tokio::sync::Mutex::new(Some(child)));
        self.child = Some(process.clone());
        self.socket_path = Some(socket_path.clone());

        ipc::spawn_exit_monitor(process, request.session, self.action_tx.clone());
        ipc::spawn_end_file_observer(socket_path.clone(), request.session, self.action_tx.clone());
        ipc::spawn_position_poller(socket_path, request.session, self.action_tx.clone());
        Ok(())
    }

    async fn toggle_pause(&self) -> anyhow::Result<()> {
        let Some(socket_path) = &self.socket_path else {
            return Ok(());
        };
        ipc::send_command(socket_path, r#"{"command":["cycle","pause"]}"#).await?;
        Ok(())
    }

    async fn shutdown(&mut self) -> anyhow::Result<()> {
        if let Some(socket_path) = self.socket_path.take() {
            let _ = ipc::send_command(&socket_path, r#"{"command":["quit"]}"#).await;
            let _ = std::fs::remove_file(&socket_path);
        }
        if let Some(process) = self.child.take() {
            let mut guard = process.lock().await;
            if let Some(ref mut child) = *guard {
                let _ = child.kill().await;
            }
            *guard = None;
        }
        Ok(())
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        if let Some(process) = &self.child {
            if let Ok(mut guard) = process.try_lock() {
                if let Some(ref mut child) = *guard {
                    let _ = child.start_kill();
                }
                *guard = None;
            }
        }
        if let Some(socket_path) = &self.socket_path {
            let _ = std::fs::remove_file(socket_path);
        }
    }
}
