use std::sync::Arc;

use creatorpulse_core::CategoryTable;
use creatorpulse_generate::{
    ConsistencyLevel, GenerateError, GeneratorClient, MetricStatus, Orchestrator,
    OrchestratorSettings, StyleRequest, TrendRequest,
};
use creatorpulse_store::{RawCreatorRecord, SnapshotStore};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "sk-test";

fn settings() -> OrchestratorSettings {
    OrchestratorSettings {
        target_followers: 10_000,
        min_evidence_posts: 3,
        sample_posts_limit: 5,
    }
}

fn fitness_creator() -> RawCreatorRecord {
    serde_json::from_value(json!({
        "user_id": "coach_sam",
        "nickname": "Coach Sam",
        "user_info": {
            "data": { "data": { "user": { "edge_followed_by": { "count": 50_000 } } } }
        },
        "posts": [
            {
                "id": "p1",
                "caption": { "text": "Five rounds before sunrise 💪 #fitness #training" },
                "like_count": 4_000,
                "comment_count": 200,
                "taken_at": 1_700_000_300
            },
            {
                "id": "p2",
                "caption": { "text": "Rest days build muscle too #recovery" },
                "like_count": 2_500,
                "comment_count": 110,
                "taken_at": 1_700_000_200
            },
            {
                "id": "p3",
                "caption": { "text": "Form first, weight second #gym #training" },
                "like_count": 3_100,
                "comment_count": 140,
                "taken_at": 1_700_000_100
            }
        ],
        "profile_data": {
            "persona": "no-nonsense strength coach",
            "tone": "direct, motivating",
            "interests": ["workout programming"],
            "content_topics": ["training"],
            "primary_category": "fitness"
        }
    }))
    .expect("valid snapshot")
}

// Two posts, one short of the evidence floor in `settings()`.
fn thin_creator() -> RawCreatorRecord {
    serde_json::from_value(json!({
        "user_id": "new_nadia",
        "nickname": "New Nadia",
        "user_info": {
            "data": { "data": { "user": { "edge_followed_by": { "count": 1_200 } } } }
        },
        "posts": [
            {
                "id": "p1",
                "caption": { "text": "First attempt at sourdough #baking" },
                "like_count": 90,
                "comment_count": 4,
                "taken_at": 1_700_000_200
            },
            {
                "id": "p2",
                "caption": { "text": "Round two came out better #sourdough" },
                "like_count": 120,
                "comment_count": 7,
                "taken_at": 1_700_000_100
            }
        ],
        "profile_data": {
            "interests": ["baking"],
            "content_topics": ["sourdough"],
            "primary_category": "food"
        }
    }))
    .expect("valid snapshot")
}

fn empty_creator() -> RawCreatorRecord {
    serde_json::from_value(json!({
        "user_id": "ghost",
        "profile_data": { "primary_category": "finance" }
    }))
    .expect("valid snapshot")
}

fn orchestrator(records: Vec<RawCreatorRecord>, base_url: Option<String>) -> Orchestrator {
    let client = base_url.map(|url| {
        GeneratorClient::with_base_url(API_KEY.to_string(), "gpt-4o-mini".to_string(), 5, url)
            .expect("client builds")
    });
    Orchestrator::new(
        Arc::new(SnapshotStore::from_records(records)),
        Arc::new(CategoryTable::builtin()),
        client,
        settings(),
    )
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn style_generation_scores_the_returned_draft() {
    let server = MockServer::start().await;
    let draft = "Caption: Form first, always. Five rounds tomorrow 💪 #fitness #training\nHashtags: #fitness #training";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(bearer_token(API_KEY))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(draft)))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![fitness_creator()], Some(server.uri()));
    let request = StyleRequest::new("coach_sam", "deadlift form", None, None, None).unwrap();
    let result = orch.generate_style(&request).await.expect("generation succeeds");

    assert_eq!(result.content, draft);
    assert_eq!(result.creator_name.as_deref(), Some("Coach Sam"));
    assert_eq!(result.creators_analyzed, 1);
    assert_eq!(result.posts_analyzed, 3);
    let consistency = result.consistency.expect("style results carry a score");
    assert!(consistency.overall_score > 0);
    assert_eq!(consistency.evidence.len(), 4);
}

#[tokio::test]
async fn thin_history_still_generates_with_estimated_score() {
    let server = MockServer::start().await;
    let draft = "Caption: Third loaf, best crumb yet.\nHashtags: #sourdough #baking";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(bearer_token(API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(draft)))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![thin_creator()], Some(server.uri()));
    let request = StyleRequest::new("new_nadia", "crumb structure", None, None, None).unwrap();
    let result = orch.generate_style(&request).await.expect("generation succeeds");

    assert_eq!(result.content, draft);
    assert_eq!(result.posts_analyzed, 2);
    let consistency = result.consistency.expect("style results carry a score");
    assert_eq!(consistency.overall_score, 49);
    assert_eq!(consistency.level, ConsistencyLevel::Low);
    assert!(consistency
        .evidence
        .iter()
        .all(|e| e.status == MetricStatus::Estimated));
}

#[tokio::test]
async fn unknown_creator_fails_before_any_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("x")))
        .expect(0)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![fitness_creator()], Some(server.uri()));
    let request = StyleRequest::new("nobody", "topic", None, None, None).unwrap();
    let err = orch.generate_style(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::NotFound(_)));
}

#[tokio::test]
async fn creator_without_posts_is_insufficient_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("x")))
        .expect(0)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![empty_creator()], Some(server.uri()));
    let request = StyleRequest::new("ghost", "budgeting", None, None, None).unwrap();
    let err = orch.generate_style(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::InsufficientData(_)));
}

#[tokio::test]
async fn missing_api_key_surfaces_not_configured() {
    let orch = orchestrator(vec![fitness_creator()], None);
    let request = StyleRequest::new("coach_sam", "deadlift form", None, None, None).unwrap();
    let err = orch.generate_style(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::NotConfigured(_)));
}

#[tokio::test]
async fn rate_limited_upstream_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![fitness_creator()], Some(server.uri()));
    let request = StyleRequest::new("coach_sam", "deadlift form", None, None, None).unwrap();
    let err = orch.generate_style(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::UpstreamRateLimited));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn response_without_choices_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![fitness_creator()], Some(server.uri()));
    let request = StyleRequest::new("coach_sam", "deadlift form", None, None, None).unwrap();
    let err = orch.generate_style(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::UpstreamMalformed(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn trend_generation_carries_the_category_insight() {
    let server = MockServer::start().await;
    let draft = "Caption: Morning lifters win.\nHashtags: #fitness\nKey Strategy: rates back it up.";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(draft)))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(vec![fitness_creator()], Some(server.uri()));
    let request = TrendRequest::new("fitness", Some("morning workouts"), None, None, None, None).unwrap();
    let result = orch.generate_trend(&request).await.expect("generation succeeds");

    assert_eq!(result.content, draft);
    assert!(result.consistency.is_none());
    assert_eq!(result.creators_analyzed, 1);
    assert_eq!(result.posts_analyzed, 3);
    let insight = result.insight.expect("trend results carry the insight");
    assert_eq!(insight.posts_analyzed, 3);
    assert!(insight.engagement_rate > 0.0);
}

#[tokio::test]
async fn trend_with_no_creators_in_category_is_not_found() {
    let orch = orchestrator(vec![fitness_creator()], None);
    let request = TrendRequest::new("food", None, None, None, None, None).unwrap();
    let err = orch.generate_trend(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::NotFound(_)));
}

#[tokio::test]
async fn trend_without_qualifying_posts_fails_before_any_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("x")))
        .expect(0)
        .mount(&server)
        .await;

    // Classified under finance but has no posts at all.
    let orch = orchestrator(vec![empty_creator()], Some(server.uri()));
    let request = TrendRequest::new("finance", None, None, None, None, None).unwrap();
    let err = orch.generate_trend(&request).await.unwrap_err();
    assert!(matches!(err, GenerateError::InsufficientData(_)));
}

#[test]
fn category_insight_returns_flagged_empty_state() {
    let orch = orchestrator(vec![empty_creator()], None);
    let insight = orch.category_insight("finance".parse().unwrap(), None);
    assert!(!insight.has_data());
    assert_eq!(insight.target_followers, 10_000);
}

#[test]
fn creators_listing_includes_classification() {
    let orch = orchestrator(vec![fitness_creator(), empty_creator()], None);
    let creators = orch.creators();
    assert_eq!(creators.len(), 2);
    let sam = creators
        .iter()
        .find(|c| c.creator_id == "coach_sam")
        .expect("coach_sam listed");
    assert_eq!(sam.name, "Coach Sam");
    assert_eq!(sam.follower_count, Some(50_000));
    assert_eq!(sam.post_count, 3);
    assert_eq!(sam.categories.len(), 1);
}
