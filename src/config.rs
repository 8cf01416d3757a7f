// User configuration loaded from ~/.config/catalyx/config.toml.
// Falls back to sensible defaults when the file is missing.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration, deserialized from `~/.config/catalyx/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Target TUI refresh rate in frames per second (default: 30).
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// `"dark"` or `"light"`.
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Forwarded as `?limit=` on recommendation requests; the backend's own
    /// default applies when unset.
    #[serde(default)]
    pub recommendation_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_command")]
    pub command: String,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Artificial latency of the mock search, in milliseconds.
    #[serde(default = "default_search_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    /// Synthesized recommendations appended after the backend's list. 0 disables.
    #[serde(default = "default_extra_recommendations")]
    pub extra_recommendations: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// How long the transition flag stays up after a video lands.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_frame_rate() -> f64 {
    30.0
}

fn default_theme() -> String {
    crate::theme::THEME_DARK.to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_player_command() -> String {
    "mpv".to_string()
}

fn default_search_delay_ms() -> u64 {
    800
}

fn default_extra_recommendations() -> usize {
    8
}

fn default_transition_ms() -> u64 {
    300
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            theme: default_theme(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            recommendation_limit: None,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player_command(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_search_delay_ms(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            extra_recommendations: default_extra_recommendations(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
        }
    }
}

impl Config {
    /// Read config from the default location, or return defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("catalyx")
            .join("config.toml")
    }
}
