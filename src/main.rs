// Entry point: checks the player binary, loads config, and runs the TUI.

use std::path::PathBuf;

use clap::Parser;

use catalyx::app::App;
use catalyx::config::Config;
use catalyx::logging;

#[derive(Parser)]
#[command(name = "catalyx", about = "Video learning hub in the terminal")]
struct Cli {
    /// Backend base address, e.g. http://localhost:8000
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn check_dependencies(config: &Config) {
    if which::which(&config.player.command).is_err() {
        eprintln!(
            "Error: {} is required but not found. Install with: brew install mpv",
            config.player.command
        );
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    if let Some(base) = cli.api_base {
        config.backend.base_url = base;
    }

    check_dependencies(&config);
    logging::init()?;
    tracing::info!(backend = %config.backend.base_url, "starting");

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
