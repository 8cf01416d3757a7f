// src/api/models.rs

use serde::{Deserialize, Serialize};

/// A lesson video as served by `GET /api/videos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Length in seconds.
    pub duration: u64,
    #[serde(default)]
    pub views: u64,
    pub category: String,
    /// Display order matters.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A suggested next video with the backend's score and justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub video: Video,
    pub relevance_score: f64,
    pub reason: String,
}

/// Coarse relevance bands, used to colour the score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceTier {
    High,
    Good,
    Fair,
    Low,
}

impl Recommendation {
    /// Score as a whole percentage, e.g. `0.834` → `83`.
    pub fn relevance_percent(&self) -> i64 {
        (self.relevance_score * 100.0).round() as i64
    }

    pub fn tier(&self) -> RelevanceTier {
        match self.relevance_score {
            s if s >= 0.8 => RelevanceTier::High,
            s if s >= 0.6 => RelevanceTier::Good,
            s if s >= 0.4 => RelevanceTier::Fair,
            _ => RelevanceTier::Low,
        }
    }
}

impl Video {
    /// `m:ss`, minutes are not wrapped into hours.
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }
}

pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Compact view count for cards: `1.2k` above a thousand, plain below.
pub fn format_views_compact(views: u64) -> String {
    if views > 1000 {
        format!("{:.1}k", views as f64 / 1000.0)
    } else {
        views.to_string()
    }
}

/// Full view count with thousands separators: `12,345`.
pub fn format_views(views: u64) -> String {
    let digits = views.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
