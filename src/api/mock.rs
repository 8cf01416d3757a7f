// Client-side stand-ins: a canned search provider and a decorator that pads
// the backend's recommendation list with synthesized items.

use std::time::Duration;

use async_trait::async_trait;

use crate::api::models::{Recommendation, Video};
use crate::api::{ApiError, SearchProvider, VideoSource};

const MOCK_CATEGORIES: [&str; 3] = ["Tutorial", "Advanced", "Quick Tips"];
const MOCK_FOCUS: [&str; 4] = [
    "fundamental concepts",
    "advanced techniques",
    "practical examples",
    "troubleshooting",
];

/// Answers every query with the same three shapes of result after a fixed
/// delay. Nothing is actually matched.
#[derive(Debug, Clone)]
pub struct MockSearch {
    delay: Duration,
}

impl MockSearch {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// The canned results for `query`. Deterministic: same query, same videos.
pub fn mock_search_results(query: &str) -> Vec<Video> {
    let q = query.trim();
    let tag = q.to_lowercase();
    let make = |id: &str,
                title: String,
                description: String,
                duration: u64,
                views: u64,
                category: &str,
                extra: [&str; 2]| Video {
        id: id.to_string(),
        title,
        description,
        duration,
        views,
        category: category.to_string(),
        tags: vec![tag.clone(), extra[0].to_string(), extra[1].to_string()],
        thumbnail: None,
        created_at: None,
    };
    vec![
        make(
            "search-1",
            format!("How to {}?", q),
            format!("This video explains everything about {} in detail.", q),
            180,
            1234,
            "Tutorial",
            ["tutorial", "guide"],
        ),
        make(
            "search-2",
            format!("Advanced {} Techniques", q),
            format!("Learn advanced techniques and best practices for {}.", q),
            240,
            892,
            "Advanced",
            ["advanced", "tips"],
        ),
        make(
            "search-3",
            format!("Common {} Problems", q),
            format!("Troubleshooting guide for common issues with {}.", q),
            160,
            567,
            "Troubleshooting",
            ["problems", "solutions"],
        ),
    ]
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<Video>, ApiError> {
        tokio::time::sleep(self.delay).await;
        Ok(mock_search_results(query))
    }
}

/// Synthesized "related content" recommendation number `i` (0-based).
pub fn mock_recommendation(i: usize) -> Recommendation {
    let n = i as u64;
    Recommendation {
        video: Video {
            id: format!("mock-{}", i),
            title: format!("Additional Video {}: Related Content", i + 1),
            description: "This is another relevant video that provides additional insights related to your current topic.".to_string(),
            duration: 120 + n * 30,
            // Spread across 500..5500 without pulling in an RNG.
            views: 500 + (n * 2_713 + 1_171) % 5_000,
            category: MOCK_CATEGORIES[i % MOCK_CATEGORIES.len()].to_string(),
            tags: vec!["related".into(), "tutorial".into(), "guide".into()],
            thumbnail: None,
            created_at: None,
        },
        relevance_score: 0.7 - n as f64 * 0.05,
        reason: format!(
            "This video complements the current content by covering {}.",
            MOCK_FOCUS[i % MOCK_FOCUS.len()]
        ),
    }
}

/// Wraps a real source and appends `extra` mock recommendations to every
/// list it returns. All other calls pass straight through.
pub struct PaddedRecommendations<S> {
    inner: S,
    extra: usize,
}

impl<S: VideoSource> PaddedRecommendations<S> {
    pub fn new(inner: S, extra: usize) -> Self {
        Self { inner, extra }
    }
}

#[async_trait]
impl<S: VideoSource> VideoSource for PaddedRecommendations<S> {
    async fn list_videos(&self) -> Result<Vec<Video>, ApiError> {
        self.inner.list_videos().await
    }

    async fn video(&self, id: &str) -> Result<Video, ApiError> {
        self.inner.video(id).await
    }

    async fn recommendations(&self, id: &str) -> Result<Vec<Recommendation>, ApiError> {
        let mut recs = self.inner.recommendations(id).await?;
        recs.extend((0..self.extra).map(mock_recommendation));
        Ok(recs)
    }

    async fn mark_complete(&self, id: &str) -> Result<(), ApiError> {
        self.inner.mark_complete(id).await
    }
}
