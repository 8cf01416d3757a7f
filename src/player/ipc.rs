// Low-level mpv IPC: socket communication, and background tasks for monitoring
// one player session (process exit, end of file, position).

use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::process::Child;
use tokio::sync::mpsc;

use crate::action::Action;

pub type MpvProcess = std::sync::Arc<tokio::sync::Mutex<Option<Child>>>;

// How long to wait for mpv's IPC socket to appear (30 * 100ms = 3s).
// Opening a video window takes longer than audio-only playback.
const SOCKET_POLL_ATTEMPTS: u32 = 30;
const SOCKET_POLL_INTERVAL_MS: u64 = 100;

/// Wait for the IPC socket to appear on disk. Returns false on timeout.
pub async fn wait_for_socket(path: &Path) -> bool {
    for _ in 0..SOCKET_POLL_ATTEMPTS {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(SOCKET_POLL_INTERVAL_MS)).await;
    }
    false
}

/// Send a single JSON command over a fresh IPC connection, return the response line.
pub async fn send_command(socket_path: &Path, cmd: &str) -> anyhow::Result<String> {
    let mut stream = UnixStream::connect(socket_path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to connect to mpv IPC socket: {}", e))?;
    stream.write_all(format!("{}\n", cmd).as_bytes()).await?;
    let mut reader = BufReader::new(stream);
    let mut response = String::new();
    reader.read_line(&mut response).await?;
    Ok(response)
}

/// Poll the child process and send PlayerClosed when it exits on its own.
/// Stops quietly once the child has been taken away by a shutdown.
pub fn spawn_exit_monitor(
    child: MpvProcess,
    session: u64,
    tx: Option<mpsc::UnboundedSender<Action>>,
) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            let mut guard = child.lock().await;
            match guard.as_mut().and_then(|c| c.try_wait().ok()) {
                Some(Some(_)) => {
                    *guard = None;
                    if let Some(tx) = &tx {
                        tx.send(Action::PlayerClosed { session }).ok();
                    }
                    break;
                }
                Some(None) => {} // still running
                None => break,   // shut down, or wait error
            }
        }
    });
}

/// True for an mpv `end-file` event that means the media played to the end,
/// as opposed to being stopped, replaced, or failing.
pub fn is_end_of_file(event: &serde_json::Value) -> bool {
    event.get("event").and_then(|e| e.as_str()) == Some("end-file")
        && event.get("reason").and_then(|r| r.as_str()) == Some("eof")
}

/// Listen for mpv events and send PlaybackEnded when the video finishes.
pub fn spawn_end_file_observer(
    socket_path: PathBuf,
    session: u64,
    tx: Option<mpsc::UnboundedSender<Action>>,
) {
    tokio::spawn(async move {
        if !wait_for_socket(&socket_path).await {
            return;
        }
        let Ok(stream) = UnixStream::connect(&socket_path).await else {
            return;
        };
        let (reader, _writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let Ok(val) = serde_json::from_str::<serde_json::Value>(&line) else {
                continue;
            };
            if is_end_of_file(&val) {
                if let Some(tx) = &tx {
                    tx.send(Action::PlaybackEnded { session }).ok();
                }
                break;
            }
        }
    });
}

/// Poll playback-time once per second and forward it as PlaybackPosition.
pub fn spawn_position_poller(
    socket_path: PathBuf,
    session: u64,
    tx: Option<mpsc::UnboundedSender<Action>>,
) {
    tokio::spawn(async move {
        if !wait_for_socket(&socket_path).await {
            return;
        }
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
            let Ok(response) = send_command(
                &socket_path,
                r#"{"command":["get_property","playback-time"]}"#,
            )
            .await
            else {
                break;
            };

            if let Ok(val) = serde_json::from_str::<serde_json::Value>(&response) {
                if let Some(secs) = val.get("data").and_then(|d| d.as_f64()) {
                    if let Some(tx) = &tx {
                        tx.send(Action::PlaybackPosition { session, secs }).ok();
                    }
                }
            }
        }
    });
}
