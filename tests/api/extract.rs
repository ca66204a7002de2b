use serde_json::{json, Value};

use crate::helpers::{spawn_app, spawn_fake_google, unreachable_google};

const PROFILE_URL: &str = "https://www.linkedin.com/in/john-doe/";

fn john_doe_results() -> String {
    json!({
        "searchInformation": {"totalResults": "1"},
        "items": [{
            "title": "John Doe - Software Engineer | LinkedIn",
            "snippet": "Hi, I'm John, a software engineer based in Bangalore with experience in backend development... · Experience: ABC Technologies · Education: XYZ University",
            "link": "https://in.linkedin.com/in/john-doe"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn extract_returns_structured_profile() {
    let google = spawn_fake_google(200, &john_doe_results()).await;
    let app = spawn_app(&google.address).await;

    let response = app.post_extract(&json!({"linkedin_url": PROFILE_URL})).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "public_structured");
    assert_eq!(body["confidence"], 0.9);
    assert_eq!(
        body["raw_google_data"]["title"],
        "John Doe - Software Engineer | LinkedIn"
    );
    assert_eq!(
        body["raw_google_data"]["url"],
        "https://in.linkedin.com/in/john-doe"
    );
    assert_eq!(
        body["structured_data"],
        json!({
            "name": "John Doe",
            "headline": "software engineer",
            "about": "Hi, I'm John, a software engineer based in Bangalore with experience in backend development...",
            "location": "Bangalore",
            "experience": "ABC Technologies",
            "education": "XYZ University",
        })
    );
}

#[tokio::test]
async fn extract_sends_one_site_restricted_query() {
    let google = spawn_fake_google(200, &john_doe_results()).await;
    let app = spawn_app(&google.address).await;

    app.post_extract(&json!({"linkedin_url": PROFILE_URL})).await;

    let received = google.received();
    assert_eq!(received.len(), 1);
    let query = &received[0];
    assert_eq!(query["q"], "site:linkedin.com/in john-doe");
    assert_eq!(query["num"], "1");
    assert_eq!(query["key"], "test-api-key");
    assert_eq!(query["cx"], "test-cx");
}

#[tokio::test]
async fn extract_returns_not_found_without_results() {
    let bodies = [
        json!({"searchInformation": {"totalResults": "0"}}),
        json!({"items": []}),
    ];

    for google_body in bodies {
        let google = spawn_fake_google(200, &google_body.to_string()).await;
        let app = spawn_app(&google.address).await;

        let response = app.post_extract(&json!({"linkedin_url": PROFILE_URL})).await;

        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({
                "status": "not_found",
                "confidence": 0.0,
                "raw_google_data": null,
                "structured_data": null,
            })
        );
    }
}

#[tokio::test]
async fn extract_returns_400_for_invalid_urls() {
    let google = spawn_fake_google(200, &john_doe_results()).await;
    let app = spawn_app(&google.address).await;
    let invalid_urls = [
        ("not a url", "garbage"),
        ("https://www.google.com/in/john-doe", "foreign host"),
        ("https://www.linkedin.com/company/acme", "company page"),
        ("https://www.linkedin.com/in/", "empty profile"),
    ];

    for (url, description) in invalid_urls {
        let response = app.post_extract(&json!({"linkedin_url": url})).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the url was {}.",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("Invalid LinkedIn URL"));
    }

    assert!(google.received().is_empty());
}

#[tokio::test]
async fn extract_returns_400_for_invalid_body() {
    let google = spawn_fake_google(200, &john_doe_results()).await;
    let app = spawn_app(&google.address).await;
    let invalid_bodies = [
        (json!({}), "missing linkedin_url"),
        (json!({"linkedin_url": 42}), "non-string linkedin_url"),
        (json!("https://www.linkedin.com/in/john-doe"), "bare string body"),
    ];

    for (body, description) in invalid_bodies {
        let response = app.post_extract(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].is_string());
    }

    assert!(google.received().is_empty());
}

#[tokio::test]
async fn extract_maps_upstream_failures() {
    let cases = [
        (429, r#"{"error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}}"#, 429),
        (403, r#"{"error": {"code": 403, "errors": [{"reason": "dailyLimitExceeded"}]}}"#, 429),
        (403, r#"{"error": {"code": 403, "errors": [{"reason": "forbidden"}]}}"#, 502),
        (400, r#"{"error": {"code": 400, "details": [{"reason": "API_KEY_INVALID"}]}}"#, 502),
        (500, r#"{"error": {"code": 500}}"#, 503),
        (200, "<html>not json</html>", 502),
    ];

    for (google_status, google_body, expected_status) in cases {
        let google = spawn_fake_google(google_status, google_body).await;
        let app = spawn_app(&google.address).await;

        let response = app.post_extract(&json!({"linkedin_url": PROFILE_URL})).await;

        assert_eq!(
            expected_status,
            response.status().as_u16(),
            "google answered {} with {}",
            google_status,
            google_body
        );
        let body: Value = response.json().await.unwrap();
        assert!(!body["detail"].as_str().unwrap().contains("test-api-key"));
        // no retries
        assert_eq!(google.received().len(), 1);
    }
}

#[tokio::test]
async fn extract_returns_503_when_search_api_is_down() {
    let app = spawn_app(&unreachable_google()).await;

    let response = app.post_extract(&json!({"linkedin_url": PROFILE_URL})).await;

    assert_eq!(503, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Search provider unavailable");
}
