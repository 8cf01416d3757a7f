// Backend boundary: the data model, the REST client, and the traits the app
// talks to so mock and real sources are interchangeable.

pub mod client;
pub mod mock;
pub mod models;

use async_trait::async_trait;

use crate::api::models::{Recommendation, Video};

/// Failures from the backend, kept distinct so the UI can word them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("not found: {path}")]
    NotFound { path: String },
    #[error("backend returned {status} for {path}")]
    Status { status: u16, path: String },
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Read access to videos and their recommendations.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn list_videos(&self) -> Result<Vec<Video>, ApiError>;

    async fn video(&self, id: &str) -> Result<Video, ApiError>;

    /// Ranked next videos for `id`; index 0 is what auto-advance plays.
    async fn recommendations(&self, id: &str) -> Result<Vec<Recommendation>, ApiError>;

    /// Report that `id` was watched to the end.
    async fn mark_complete(&self, id: &str) -> Result<(), ApiError>;
}

/// Free-text video lookup. Only a mock exists today; a real search backend
/// plugs in here without touching callers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Video>, ApiError>;
}
