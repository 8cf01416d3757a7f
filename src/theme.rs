// Color theme definitions for the TUI. Selected with `general.theme`.

use ratatui::style::Color;

use crate::api::models::RelevanceTier;

pub const THEME_DARK: &str = "dark";
pub const THEME_LIGHT: &str = "light";

/// Named color slots used by every component.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (titles, active page, highlights).
    pub primary: Color,
    /// Secondary accent, used for tags and categories.
    pub secondary: Color,
    /// Normal text color.
    pub text: Color,
    /// Dimmed / inactive text color.
    pub text_dim: Color,
    /// Key hints and the AI reason line.
    pub accent: Color,
    /// Background color for selected items.
    pub selection_bg: Color,
    /// Border and divider color.
    pub border: Color,
    pub error: Color,
    /// Loading and transition indicators.
    pub warning: Color,
    /// Playing indicator.
    pub success: Color,
    pub relevance_high: Color,
    pub relevance_good: Color,
    pub relevance_fair: Color,
    pub relevance_low: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Magenta,
            text: Color::White,
            text_dim: Color::DarkGray,
            accent: Color::Yellow,
            selection_bg: Color::Rgb(30, 30, 40),
            border: Color::DarkGray,
            error: Color::Red,
            warning: Color::Yellow,
            success: Color::Green,
            relevance_high: Color::Rgb(16, 185, 129),
            relevance_good: Color::Rgb(59, 130, 246),
            relevance_fair: Color::Rgb(249, 115, 22),
            relevance_low: Color::Gray,
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            text: Color::Black,
            text_dim: Color::DarkGray,
            accent: Color::Rgb(180, 120, 0),
            selection_bg: Color::Rgb(220, 225, 235),
            border: Color::Rgb(180, 180, 180),
            error: Color::Red,
            warning: Color::Rgb(180, 120, 0),
            success: Color::Rgb(0, 140, 60),
            relevance_high: Color::Rgb(4, 120, 87),
            relevance_good: Color::Rgb(29, 78, 216),
            relevance_fair: Color::Rgb(194, 65, 12),
            relevance_low: Color::DarkGray,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            THEME_LIGHT => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn relevance(&self, tier: RelevanceTier) -> Color {
        match tier {
            RelevanceTier::High => self.relevance_high,
            RelevanceTier::Good => self.relevance_good,
            RelevanceTier::Fair => self.relevance_fair,
            RelevanceTier::Low => self.relevance_low,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
