// File-based logging via tracing. Writes to ~/.local/share/catalyx/catalyx.log
// so log lines never land on the TUI.

use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn log_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("catalyx")
}

/// Install the global subscriber. `RUST_LOG` overrides the default
/// `catalyx=debug` filter.
pub fn init() -> anyhow::Result<()> {
    let data_dir = log_dir();
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = rolling::never(&data_dir, "catalyx.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalyx=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter)
        .init();

    // The guard must outlive the program; leak it so the file writer stays open.
    std::mem::forget(guard);
    Ok(())
}
