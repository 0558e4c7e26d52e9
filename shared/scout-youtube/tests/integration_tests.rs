use scout_youtube::{
    create_provider, FixtureProvider, ProviderConfig, ProviderError, ProviderType,
    VideoSearchProvider, YouTubeProvider,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn video_item(id: &str, duration: &str, views: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#video",
        "id": id,
        "snippet": {
            "publishedAt": "2025-01-10T10:00:00Z",
            "title": format!("Video {}", id),
            "channelTitle": "Test Channel"
        },
        "contentDetails": { "duration": duration },
        "statistics": { "viewCount": views, "likeCount": "10" }
    })
}

fn provider_for(server: &MockServer) -> YouTubeProvider {
    let config = ProviderConfig::new()
        .with_base_url(server.uri())
        .with_api_key(Some("test-key".to_string()))
        .with_timeout(5);
    YouTubeProvider::new(config).unwrap()
}

#[tokio::test]
async fn test_provider_config_builder() {
    let config = ProviderConfig::new()
        .with_api_key(Some("abc".to_string()))
        .with_timeout(12);

    assert_eq!(config.provider(), ProviderType::YouTube);
    assert_eq!(config.api_key(), Some("abc"));
    assert_eq!(config.timeout_seconds(), 12);
    assert_eq!(config.base_url(), "https://www.googleapis.com/youtube/v3");
}

#[tokio::test]
async fn test_search_returns_video_ids_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust lifetimes"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "10"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#searchListResponse",
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "first" } },
                { "id": { "kind": "youtube#channel", "channelId": "skip-me" } },
                { "id": { "kind": "youtube#video", "videoId": "second" } }
            ]
        })))
        .mount(&server)
        .await;

    let ids = provider_for(&server).search("rust lifetimes", 10).await.unwrap();
    assert_eq!(ids, vec!["first".to_string(), "second".to_string()]);
}

#[tokio::test]
async fn test_fetch_details_requests_all_parts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "snippet,contentDetails,statistics"))
        .and(query_param("id", "a,b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [video_item("a", "PT4M", "100"), video_item("b", "PT1H", "2500")]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let records = provider
        .fetch_details(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "a");
    assert_eq!(
        records[1].statistics.as_ref().unwrap().view_count.as_deref(),
        Some("2500")
    );
}

#[tokio::test]
async fn test_fetch_details_with_no_ids_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let records = provider_for(&server).fetch_details(&[]).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_quota_exceeded_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "quota exhausted",
                "errors": [{ "reason": "quotaExceeded", "domain": "youtube.quota" }]
            }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).search("anything", 5).await.unwrap_err();
    assert!(matches!(err, ProviderError::QuotaExceeded(ref message) if message == "quota exhausted"));
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .fetch_details(&["a".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Api { status: 503, .. }));
}

#[tokio::test]
async fn test_fixture_provider_serves_saved_response() {
    let temp_dir = TempDir::new().unwrap();
    let fixture = temp_dir.path().join("videos.json");
    let body = json!({
        "items": [
            video_item("one", "PT3M", "10"),
            video_item("two", "PT8M", "20"),
            video_item("three", "PT30S", "30")
        ]
    });
    tokio::fs::write(&fixture, body.to_string()).await.unwrap();

    let provider = FixtureProvider::new(fixture.clone());
    let ids = provider.search("ignored", 2).await.unwrap();
    assert_eq!(ids, vec!["one".to_string(), "two".to_string()]);

    let records = provider
        .fetch_details(&["three".to_string(), "missing".to_string(), "one".to_string()])
        .await
        .unwrap();
    let fetched: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(fetched, vec!["three", "one"]);

    let boxed = create_provider(&ProviderConfig::new().with_fixture_path(fixture)).unwrap();
    assert_eq!(boxed.search("x", 10).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_fixture_provider_missing_file() {
    let provider = FixtureProvider::new("does/not/exist.json".into());
    assert!(matches!(provider.search("x", 1).await, Err(ProviderError::Io(_))));
}
