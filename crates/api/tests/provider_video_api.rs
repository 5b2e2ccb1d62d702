//! Integration tests for the provider profile video endpoints.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get, post, stream_json, test_config, TestApp, TEMPLATE_ID};
use musicspace_core::video::{VideoFormat, VideoStream};

// ---------------------------------------------------------------------------
// POST /api/v1/providers/{id}/video
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_video_provisions_everything_and_sends_invitation() {
    let app = TestApp::new();
    let provider = app.store.insert_provider("Nina Simone", "nina@example.com");

    let uri = format!("/api/v1/providers/{}/video", provider.id);
    let response = post(app.router(), &uri).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], "vc-new");
    assert_eq!(json["data"]["template_id"], TEMPLATE_ID);
    assert_eq!(json["data"]["should_render_video"], false);
    assert!(json["data"]["video_stream"].is_null());

    assert_eq!(
        app.takeone.calls(),
        vec![
            "create_user",
            "create_video_container",
            "create_project",
            "authorize"
        ]
    );
    let requests = app.takeone.container_requests();
    assert_eq!(requests[0].name, "Nina Simone's profile video");
    assert_eq!(requests[0].template, TEMPLATE_ID);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_email, "nina@example.com");
    assert_eq!(
        sent[0].authorization_code,
        format!("code-for-usr-{}", provider.id)
    );
}

#[tokio::test]
async fn add_video_may_outlast_the_plain_request_timeout() {
    let mut config = test_config();
    config.request_timeout_secs = 1;
    config.takeone.timeout = Duration::from_secs(1);
    let app = TestApp::with_config(config);
    // Four sequential calls: 1.2 s in total.
    app.takeone.set_latency(Duration::from_millis(300));
    let provider = app.store.insert_provider("Nina Simone", "nina@example.com");

    let uri = format!("/api/v1/providers/{}/video", provider.id);
    let response = post(app.router(), &uri).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.takeone.calls().len(), 4);
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn add_video_twice_is_conflict() {
    let app = TestApp::new();
    let (provider, _) = app.seed_container("vc-1");

    let uri = format!("/api/v1/providers/{}/video", provider.id);
    let response = post(app.router(), &uri).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(app.takeone.calls().is_empty());
}

#[tokio::test]
async fn add_video_upstream_failure_is_bad_gateway() {
    let app = TestApp::new();
    let provider = app.store.insert_provider("Nina Simone", "nina@example.com");
    app.takeone.fail_on("create_video_container");

    let uri = format!("/api/v1/providers/{}/video", provider.id);
    let response = post(app.router(), &uri).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn add_video_for_unknown_provider_is_404() {
    let app = TestApp::new();

    let response = post(app.router(), "/api/v1/providers/999/video").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.takeone.calls().is_empty());
}

// ---------------------------------------------------------------------------
// POST /api/v1/providers/{id}/takeone-user
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_takeone_user_then_conflict() {
    let app = TestApp::new();
    let provider = app.store.insert_provider("Nina Simone", "nina@example.com");
    let uri = format!("/api/v1/providers/{}/takeone-user", provider.id);

    let response = post(app.router(), &uri).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["takeone_id"], format!("usr-{}", provider.id));

    let response = post(app.router(), &uri).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.takeone.calls(), vec!["create_user"]);
    assert_eq!(app.store.user_count(), 1);
}

// ---------------------------------------------------------------------------
// GET /api/v1/providers/{id}/video and refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_video_without_container_is_404() {
    let app = TestApp::new();
    let provider = app.store.insert_provider("Nina Simone", "nina@example.com");

    let uri = format!("/api/v1/providers/{}/video", provider.id);
    let response = get(app.router(), &uri).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn refresh_pulls_stream_from_takeone() {
    let app = TestApp::new();
    let (provider, _) = app.seed_container("vc-1");
    app.takeone.set_remote_stream(Some(VideoStream {
        src: "https://cdn.example.com/vc-1.m3u8".to_string(),
        content_type: "application/x-mpegURL".to_string(),
        video_format: VideoFormat::Landscape,
    }));

    let uri = format!("/api/v1/providers/{}/video/refresh", provider.id);
    let response = post(app.router(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["should_render_video"], true);
    assert_eq!(
        json["data"]["video_stream"],
        stream_json("https://cdn.example.com/vc-1.m3u8", "landscape")
    );

    let uri = format!("/api/v1/providers/{}/video", provider.id);
    let json = body_json(get(app.router(), &uri).await).await;
    assert_eq!(json["data"]["video_stream"]["video_format"], "landscape");
    assert_eq!(app.takeone.calls(), vec!["get_video_container"]);
}
