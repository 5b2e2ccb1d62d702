#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use musicspace_takeone::sdk::models::TokenResponse;
use musicspace_takeone::sdk::{SdkClient, TokenAuth};
use musicspace_uploader::config::WorkflowConfig;
use musicspace_uploader::poll::PollConfig;
use musicspace_uploader::probe::{ProbeError, VideoProber, VideoStats};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::{MockServer, Request};

pub const SOURCE_BYTES: &[u8] = b"0123456789";
/// Base64 MD5 of [`SOURCE_BYTES`].
pub const SOURCE_MD5: &str = "eB5eJF1ptWaXm4bijSPyxw==";

/// Answers every probe with the same 1080p landscape stats.
pub struct StaticProber;

#[async_trait]
impl VideoProber for StaticProber {
    async fn probe(&self, _path: &Path) -> Result<VideoStats, ProbeError> {
        Ok(VideoStats {
            width: 1920,
            height: 1080,
            frame_rate: "30/1".to_string(),
            frame_count: 369,
            duration_secs: 12.31,
        })
    }
}

pub fn source_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SOURCE_BYTES).unwrap();
    file.flush().unwrap();
    file
}

pub fn workflow(server: &MockServer, video: &Path) -> WorkflowConfig {
    let raw = json!({
        "base_url": server.uri(),
        "project": {
            "user_provided_title": "Recital",
            "script": null,
            "video_segments": [
                { "script": "Intro", "take": { "metadata": { "cam": "a" }, "video_filename": video } }
            ]
        },
        "production_request": {
            "music": "calm",
            "add_subtitles": false,
            "name": "recital",
            "title": "Recital"
        }
    });
    WorkflowConfig::parse(&raw.to_string()).unwrap()
}

pub fn sdk_for(server: &MockServer) -> SdkClient {
    let http = reqwest::Client::new();
    let tokens = TokenResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
    };
    let auth = TokenAuth::new(http.clone(), server.uri(), tokens);
    SdkClient::new(http, server.uri(), auth)
}

pub fn fast_polling() -> PollConfig {
    PollConfig {
        initial_interval: Duration::from_millis(5),
        max_interval: Duration::from_millis(20),
        multiplier: 2.0,
        max_duration: Duration::from_secs(5),
    }
}

pub fn part(server: &MockServer, part_offset: u64, content_offset: u64, len: u64) -> Value {
    json!({
        "state": "pending",
        "part_offset": part_offset,
        "content_offset": content_offset,
        "content_length": len,
        "presigned_post_request": {
            "url": format!("{}/storage", server.uri()),
            "fields": { "key": format!("takes/take-1/{part_offset}") }
        }
    })
}

pub fn stored_part(part_offset: u64, content_offset: u64, len: u64) -> Value {
    json!({
        "state": "complete",
        "part_offset": part_offset,
        "content_offset": content_offset,
        "content_length": len,
        "presigned_post_request": null
    })
}

pub fn take(parts: Vec<Value>) -> Value {
    json!({
        "id": "take-1",
        "video_upload_request": { "state": "pending", "parts": parts },
        "metadata": { "cam": "a" }
    })
}

pub fn production_request(state: &str) -> Value {
    json!({
        "id": "pr-1",
        "state": state,
        "coloring_progress": 1.0,
        "editing_progress": if state == "completed" { 1.0 } else { 0.4 },
        "post_processing_progress": 0.0,
        "project": "prj-1",
        "video_runs": []
    })
}

/// Value of form field `name` in a multipart request body.
pub fn form_field(request: &Request, name: &str) -> String {
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    let boundary = content_type.split("boundary=").nth(1).unwrap();
    let body = String::from_utf8(request.body.clone()).unwrap();
    let marker = format!("name=\"{name}\"");
    body.split(&format!("--{boundary}"))
        .find(|section| section.contains(&marker))
        .and_then(|section| section.split_once("\r\n\r\n"))
        .map(|(_, value)| value.trim_end_matches("\r\n").to_string())
        .unwrap()
}
