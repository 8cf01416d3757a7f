// src/api/client.rs

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::models::{Recommendation, Video};
use crate::api::{ApiError, VideoSource};
use crate::config::BackendConfig;

/// Path of a video resource, with the id encoded as a single path segment.
/// `tail` is appended as-is, e.g. `"/stream"` or `""`.
pub fn video_path(video_id: &str, tail: &str) -> String {
    format!("/api/videos/{}{}", urlencoding::encode(video_id), tail)
}

/// URL mpv is pointed at for a given video. The backend honours range requests.
pub fn stream_url(base_url: &str, video_id: &str) -> String {
    format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        video_path(video_id, "/stream")
    )
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    recommendation_limit: Option<u32>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recommendation_limit: config.recommendation_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(&resp, path)?;
        resp.json().await.map_err(ApiError::Decode)
    }
}

fn check_status(resp: &reqwest::Response, path: &str) -> Result<(), ApiError> {
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound {
            path: path.to_string(),
        });
    }
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            path: path.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl VideoSource for BackendClient {
    async fn list_videos(&self) -> Result<Vec<Video>, ApiError> {
        self.get_json("/api/videos", &[]).await
    }

    async fn video(&self, id: &str) -> Result<Video, ApiError> {
        self.get_json(&video_path(id, ""), &[]).await
    }

    async fn recommendations(&self, id: &str) -> Result<Vec<Recommendation>, ApiError> {
        let query: Vec<(&str, String)> = self
            .recommendation_limit
            .map(|limit| vec![("limit", limit.to_string())])
            .unwrap_or_default();
        self.get_json(&video_path(id, "/recommendations"), &query)
            .await
    }

    async fn mark_complete(&self, id: &str) -> Result<(), ApiError> {
        let path = video_path(id, "/complete");
        let resp = self
            .http
            .post(self.url(&path))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(&resp, &path)
    }
}
