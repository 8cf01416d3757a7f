// Backend data model, display formatting, and the client-side mock sources.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use catalyx::api::client::{stream_url, video_path};
use catalyx::api::mock::{mock_recommendation, mock_search_results, MockSearch, PaddedRecommendations};
use catalyx::api::models::{
    format_duration, format_views, format_views_compact, Recommendation, RelevanceTier, Video,
};
use catalyx::api::{ApiError, SearchProvider, VideoSource};

fn make_video(id: &str) -> Video {
    Video {
        id: id.to_string(),
        title: format!("Video {}", id),
        description: String::new(),
        duration: 90,
        views: 10,
        category: "Test".to_string(),
        tags: vec![],
        thumbnail: None,
        created_at: None,
    }
}

fn rec_with_score(score: f64) -> Recommendation {
    Recommendation {
        video: make_video("r"),
        relevance_score: score,
        reason: "because".to_string(),
    }
}

// ── Deserialization ──────────────────────────────────────────────────────────

#[test]
fn test_video_deserializes_backend_shape() {
    let json = r#"{
        "id": "v1",
        "title": "Intro to Loops",
        "description": "for and while",
        "duration": 245,
        "views": 1523,
        "category": "Programming",
        "tags": ["loops", "basics"],
        "thumbnail": null,
        "created_at": "2024-01-15T10:30:00"
    }"#;
    let video: Video = serde_json::from_str(json).unwrap();
    assert_eq!(video.id, "v1");
    assert_eq!(video.duration, 245);
    assert_eq!(video.tags, vec!["loops", "basics"]);
    assert!(video.thumbnail.is_none());
    assert_eq!(video.created_at.as_deref(), Some("2024-01-15T10:30:00"));
}

#[test]
fn test_video_optional_fields_default() {
    let json = r#"{"id":"v2","title":"T","description":"D","duration":10,"category":"C"}"#;
    let video: Video = serde_json::from_str(json).unwrap();
    assert_eq!(video.views, 0);
    assert!(video.tags.is_empty());
    assert!(video.created_at.is_none());
}

#[test]
fn test_recommendation_list_deserializes() {
    let json = r#"[{
        "video": {"id":"v3","title":"T","description":"D","duration":60,"views":5,"category":"C","tags":[]},
        "relevance_score": 0.85,
        "reason": "Builds on loops"
    }]"#;
    let recs: Vec<Recommendation> = serde_json::from_str(json).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].video.id, "v3");
    assert_eq!(recs[0].reason, "Builds on loops");
    assert_eq!(recs[0].relevance_percent(), 85);
}

// ── Formatting ───────────────────────────────────────────────────────────────

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(65), "1:05");
    assert_eq!(format_duration(245), "4:05");
    assert_eq!(format_duration(3600), "60:00");
    assert_eq!(make_video("a").duration_label(), "1:30");
}

#[test]
fn test_format_views() {
    assert_eq!(format_views(0), "0");
    assert_eq!(format_views(999), "999");
    assert_eq!(format_views(1523), "1,523");
    assert_eq!(format_views(1_234_567), "1,234,567");
}

#[test]
fn test_format_views_compact() {
    assert_eq!(format_views_compact(892), "892");
    assert_eq!(format_views_compact(1000), "1000");
    assert_eq!(format_views_compact(1234), "1.2k");
    assert_eq!(format_views_compact(15_500), "15.5k");
}

#[test]
fn test_relevance_tiers() {
    assert_eq!(rec_with_score(0.95).tier(), RelevanceTier::High);
    assert_eq!(rec_with_score(0.8).tier(), RelevanceTier::High);
    assert_eq!(rec_with_score(0.7).tier(), RelevanceTier::Good);
    assert_eq!(rec_with_score(0.45).tier(), RelevanceTier::Fair);
    assert_eq!(rec_with_score(0.1).tier(), RelevanceTier::Low);
    assert_eq!(rec_with_score(0.834).relevance_percent(), 83);
}

#[test]
fn test_stream_url() {
    assert_eq!(
        stream_url("http://localhost:8000", "v1"),
        "http://localhost:8000/api/videos/v1/stream"
    );
}

#[test]
fn test_video_id_is_a_single_path_segment() {
    let url = reqwest::Url::parse(&stream_url("http://localhost:8000", "what-is-a-loop?v2")).unwrap();
    assert_eq!(url.path(), "/api/videos/what-is-a-loop%3Fv2/stream");
    assert!(url.query().is_none());

    let url = reqwest::Url::parse(&stream_url("http://localhost:8000/", "a/b#c d%")).unwrap();
    assert_eq!(url.path_segments().unwrap().count(), 4);
    assert!(url.path().ends_with("/stream"));
    assert!(url.fragment().is_none());
}

#[test]
fn test_video_paths_share_encoding() {
    let id = "what-is-a-loop?v2";
    assert_eq!(video_path(id, ""), "/api/videos/what-is-a-loop%3Fv2");
    assert_eq!(
        video_path(id, "/recommendations"),
        "/api/videos/what-is-a-loop%3Fv2/recommendations"
    );
    assert_eq!(
        video_path(id, "/complete"),
        "/api/videos/what-is-a-loop%3Fv2/complete"
    );
    assert_eq!(video_path("plain-id", "/stream"), "/api/videos/plain-id/stream");
}

#[test]
fn test_api_error_messages() {
    let err = ApiError::NotFound {
        path: "/api/videos/x".to_string(),
    };
    assert_eq!(err.to_string(), "not found: /api/videos/x");
    let err = ApiError::Status {
        status: 500,
        path: "/api/videos".to_string(),
    };
    assert!(err.to_string().contains("500"));
}

// ── Mock search ──────────────────────────────────────────────────────────────

#[test]
fn test_mock_search_returns_three_templated_results() {
    let results = mock_search_results("Loops");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].title, "How to Loops?");
    assert_eq!(results[1].title, "Advanced Loops Techniques");
    assert_eq!(results[2].title, "Common Loops Problems");
    assert_eq!(results[0].tags[0], "loops");
    assert_eq!(results[1].duration, 240);
    assert_eq!(results[2].category, "Troubleshooting");
}

#[test]
fn test_mock_search_is_deterministic_and_trims() {
    assert_eq!(mock_search_results("arrays"), mock_search_results("  arrays "));
}

#[tokio::test]
async fn test_mock_search_waits_then_answers() {
    let search = MockSearch::new(Duration::from_millis(20));
    let started = std::time::Instant::now();
    let results = search.search("recursion").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert_eq!(results, mock_search_results("recursion"));
}

// ── Mock recommendations ─────────────────────────────────────────────────────

#[test]
fn test_mock_recommendation_shape() {
    let first = mock_recommendation(0);
    assert_eq!(first.video.id, "mock-0");
    assert_eq!(first.video.title, "Additional Video 1: Related Content");
    assert_eq!(first.video.duration, 120);
    assert!((first.relevance_score - 0.7).abs() < 1e-9);

    let third = mock_recommendation(2);
    assert_eq!(third.video.duration, 180);
    assert_eq!(third.video.category, "Quick Tips");
    assert!((third.relevance_score - 0.6).abs() < 1e-9);

    for i in 0..8 {
        let views = mock_recommendation(i).video.views;
        assert!((500..5500).contains(&views));
    }
}

/// In-memory source that records completion reports.
struct FixedSource {
    recs: Vec<Recommendation>,
    completed: Mutex<Vec<String>>,
}

#[async_trait]
impl VideoSource for FixedSource {
    async fn list_videos(&self) -> Result<Vec<Video>, ApiError> {
        Ok(vec![make_video("a")])
    }

    async fn video(&self, id: &str) -> Result<Video, ApiError> {
        Ok(make_video(id))
    }

    async fn recommendations(&self, _id: &str) -> Result<Vec<Recommendation>, ApiError> {
        Ok(self.recs.clone())
    }

    async fn mark_complete(&self, id: &str) -> Result<(), ApiError> {
        self.completed.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_padding_appends_after_backend_recommendations() {
    let inner = FixedSource {
        recs: vec![rec_with_score(0.9), rec_with_score(0.8)],
        completed: Mutex::new(vec![]),
    };
    let padded = PaddedRecommendations::new(inner, 8);

    let recs = padded.recommendations("a").await.unwrap();
    assert_eq!(recs.len(), 10);
    assert_eq!(recs[0].video.id, "r");
    assert_eq!(recs[2].video.id, "mock-0");
    assert_eq!(recs[9].video.id, "mock-7");
}

#[tokio::test]
async fn test_padding_passes_other_calls_through() {
    let inner = FixedSource {
        recs: vec![],
        completed: Mutex::new(vec![]),
    };
    let padded = PaddedRecommendations::new(inner, 0);

    assert!(padded.recommendations("a").await.unwrap().is_empty());
    assert_eq!(padded.video("x").await.unwrap().id, "x");
    padded.mark_complete("x").await.unwrap();
}
