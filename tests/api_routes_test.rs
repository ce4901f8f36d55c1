use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use streamvibe::auth::{InMemoryAuthClient, Role};
use streamvibe::backend::{InMemoryBackend, Operation};
use streamvibe::config::Config;
use streamvibe::models::tables;
use streamvibe::utils::sample_data;
use streamvibe::web::{middleware::Operator, AppState, WebServer};

const LIVE_TV: &str = "8d3c1a52-0f0e-4b4e-9a51-3c7f0b1e2a01";

struct TestApp {
    router: Router,
    backend: InMemoryBackend,
    auth: Arc<InMemoryAuthClient>,
    admin_token: String,
    viewer_token: String,
}

fn test_app_with(config: Config) -> TestApp {
    let backend = InMemoryBackend::new();
    sample_data::seed(&backend);

    let auth = Arc::new(InMemoryAuthClient::new());
    let admin_token = auth.register("admin@example.com", "secret", Role::Admin);
    let viewer_token = auth.register("viewer@example.com", "secret", Role::User);

    let router = WebServer::router(AppState {
        config,
        backend: Arc::new(backend.clone()),
        auth: auth.clone(),
    });

    TestApp {
        router,
        backend,
        auth,
        admin_token,
        viewer_token,
    }
}

fn test_app() -> TestApp {
    test_app_with(Config::default())
}

// Helper function to send requests to the app
async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request_builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request_builder = request_builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = if let Some(body) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

async fn get_page(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, Option<String>) {
    let mut request_builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        request_builder = request_builder.header(header::COOKIE, cookie);
    }
    let response = app
        .clone()
        .oneshot(request_builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    (response.status(), location)
}

async fn get_page_body(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn notification_titles(body: &Value) -> Vec<String> {
    body["data"]["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let (status, body) = send_request(&app.router, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["backend"], "memory");
}

#[tokio::test]
async fn test_sign_in() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/auth/sign-in",
        None,
        Some(json!({"email": "admin@example.com", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let (status, _) = send_request(
        &app.router,
        Method::GET,
        "/api/admin/dashboard",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/auth/sign-in",
        None,
        Some(json!({"email": "admin@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_admin_api_requires_admin_session() {
    let app = test_app();

    let (status, body) =
        send_request(&app.router, Method::GET, "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing access token");

    let (status, _) = send_request(
        &app.router,
        Method::GET,
        "/api/admin/dashboard",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send_request(
        &app.router,
        Method::GET,
        "/api/admin/dashboard",
        Some(&app.viewer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Permission denied: access on admin panel");

    // Nothing reaches the backend for refused requests
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_dashboard() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::GET,
        "/api/admin/dashboard",
        Some(&app.admin_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["data"]["dashboard"];
    assert_eq!(dashboard["user_email"], "admin@example.com");
    assert_eq!(dashboard["sections"].as_array().unwrap().len(), 3);
    assert_eq!(dashboard["sections"][0]["channel_count"], 2);
    assert_eq!(dashboard["section_choices"].as_array().unwrap().len(), 3);
    assert_eq!(dashboard["channels"].as_array().unwrap().len(), 4);
    assert_eq!(dashboard["playlists"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["settings"]["title"], "StreamVibe");
    assert!(body["data"]["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_channel_with_missing_fields() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/channels",
        Some(&app.admin_token),
        Some(json!({"name": "Half Done"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["outcome"], "invalid");
    assert_eq!(
        body["data"]["invalid_fields"],
        json!(["section_id", "stream_url"])
    );
    assert_eq!(body["data"]["draft"]["name"], "Half Done");
    assert_eq!(notification_titles(&body), vec!["Missing fields"]);
    assert!(app.backend.calls_for(Operation::Insert).is_empty());
}

#[tokio::test]
async fn test_create_channel() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/channels",
        Some(&app.admin_token),
        Some(json!({
            "name": "Aurora Live",
            "section_id": LIVE_TV,
            "stream_url": "https://streams.example.com/aurora/index.m3u8"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["outcome"], "applied");
    assert_eq!(body["data"]["draft"]["name"], "");
    assert_eq!(notification_titles(&body), vec!["Channel added"]);
    assert_eq!(body["data"]["dashboard"]["channels"].as_array().unwrap().len(), 5);
    assert_eq!(app.backend.rows(tables::CHANNELS).len(), 5);
}

#[tokio::test]
async fn test_create_channel_backend_failure() {
    let app = test_app();
    app.backend
        .fail_on(Operation::Insert, tables::CHANNELS, "permission denied");

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/channels",
        Some(&app.admin_token),
        Some(json!({
            "name": "Aurora Live",
            "section_id": LIVE_TV,
            "stream_url": "https://streams.example.com/aurora/index.m3u8"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to add channel");
    assert_eq!(body["data"]["draft"]["name"], "Aurora Live");
}

#[tokio::test]
async fn test_delete_channel() {
    let app = test_app();
    let ids: Vec<String> = app
        .backend
        .rows(tables::CHANNELS)
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect();
    let id = ids[0].clone();

    let (status, body) = send_request(
        &app.router,
        Method::DELETE,
        &format!("/api/admin/channels/{id}"),
        Some(&app.admin_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(notification_titles(&body), vec!["Channel deleted"]);

    let remaining: Vec<String> = app
        .backend
        .rows(tables::CHANNELS)
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(remaining, ids[1..].to_vec());

    let listed: Vec<&str> = body["data"]["dashboard"]["channels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed.len(), 3);
    assert!(!listed.contains(&id.as_str()));
}

#[tokio::test]
async fn test_create_playlist() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/playlists",
        Some(&app.admin_token),
        Some(json!({"name": "Weekend Picks", "url": "https://lists.example.com/weekend.m3u"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(notification_titles(&body), vec!["Playlist added"]);
    assert_eq!(
        body["data"]["dashboard"]["playlists"][0]["name"],
        "Weekend Picks"
    );
}

#[tokio::test]
async fn test_update_settings() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::PUT,
        "/api/admin/settings",
        Some(&app.admin_token),
        Some(json!({
            "title": "StreamVibe Plus",
            "description": "Everything, live",
            "logo_url": null
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(notification_titles(&body), vec!["Settings saved"]);
    assert_eq!(body["data"]["draft"]["title"], "StreamVibe Plus");
    assert_eq!(
        app.backend.rows(tables::SITE_SETTINGS)[0]["title"],
        "StreamVibe Plus"
    );
}

#[tokio::test]
async fn test_logout() {
    let app = test_app();

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/logout",
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["redirect"], "/");

    // The revoked token no longer opens the panel
    let (status, _) = send_request(
        &app.router,
        Method::GET,
        "/api/admin/dashboard",
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_logout_stays() {
    let app = test_app();
    app.auth.fail_sign_out(true);

    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/logout",
        Some(&app.admin_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["redirect"], Value::Null);
    assert!(body["data"]["notifications"].as_array().unwrap().is_empty());
    assert_eq!(app.auth.sign_out_attempts(), 1);
}

#[tokio::test]
async fn test_rejected_logout_toast_when_enabled() {
    let mut config = Config::default();
    config.admin.notify_on_logout_failure = true;
    let app = test_app_with(config);
    app.auth.fail_sign_out(true);

    let (_, body) = send_request(
        &app.router,
        Method::POST,
        "/api/admin/logout",
        Some(&app.admin_token),
        None,
    )
    .await;

    assert_eq!(body["data"]["redirect"], Value::Null);
    assert_eq!(notification_titles(&body), vec!["Error"]);
}

#[tokio::test]
async fn test_pages_are_guarded() {
    let app = test_app();

    let (status, _) = get_page(&app.router, "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_page(&app.router, "/live/", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_page(&app.router, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, location) = get_page(&app.router, "/admin", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/auth?redirect=%2Fadmin"));

    let viewer_cookie = format!("sv-access-token={}", app.viewer_token);
    let (status, location) = get_page(&app.router, "/admin", Some(&viewer_cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let admin_cookie = format!("sv-access-token={}", app.admin_token);
    let (status, location) = get_page(&app.router, "/admin", Some(&admin_cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
}

#[tokio::test]
async fn test_page_title_follows_site_settings() {
    let app = test_app();

    let (_, body) = get_page_body(&app.router, "/live").await;
    assert!(body.contains("<title>Live TV | StreamVibe</title>"));

    send_request(
        &app.router,
        Method::PUT,
        "/api/admin/settings",
        Some(&app.admin_token),
        Some(json!({"title": "Vibe & Co", "description": null, "logo_url": null})),
    )
    .await;

    let (status, body) = get_page_body(&app.router, "/live").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Live TV | Vibe &amp; Co</title>"));
}

#[tokio::test]
async fn test_page_title_falls_back_without_settings() {
    let app = test_app();
    app.backend
        .fail_on(Operation::Select, tables::SITE_SETTINGS, "offline");

    let (status, body) = get_page_body(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Home | StreamVibe</title>"));
}

#[tokio::test]
async fn test_admin_responses_name_the_operator() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/dashboard")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.admin_token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    let operator = response.extensions().get::<Operator>().unwrap();
    assert_eq!(operator.0, "admin@example.com");
}
