//! Part uploads against a mocked presigned storage target.

mod common;

use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use common::{form_field, part, source_file, stored_part};
use musicspace_takeone::sdk::models::VideoUploadRequestPart;
use musicspace_uploader::parts::upload_parts;
use musicspace_uploader::UploadError;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parts(values: Vec<Value>) -> Vec<VideoUploadRequestPart> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}

#[tokio::test]
async fn each_part_carries_its_byte_range_in_offset_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage"))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&server)
        .await;
    let video = source_file();
    // Listed out of order, with one range TakeOne already holds.
    let parts = parts(vec![
        part(&server, 3, 7, 3),
        stored_part(0, 0, 0),
        part(&server, 1, 0, 4),
        part(&server, 2, 4, 3),
    ]);

    let uploaded = upload_parts(
        &reqwest::Client::new(),
        video.path(),
        &parts,
        10,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(uploaded, 10);
    let requests = server.received_requests().await.unwrap();
    let sent: Vec<(String, String)> = requests
        .iter()
        .map(|r| (form_field(r, "key"), form_field(r, "file")))
        .collect();
    assert_eq!(
        sent,
        vec![
            ("takes/take-1/1".to_string(), "0123".to_string()),
            ("takes/take-1/2".to_string(), "456".to_string()),
            ("takes/take-1/3".to_string(), "789".to_string()),
        ]
    );
}

#[tokio::test]
async fn cancelling_mid_part_stops_the_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;
    let video = source_file();
    let parts = parts(vec![part(&server, 1, 0, 5), part(&server, 2, 5, 5)]);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = upload_parts(&reqwest::Client::new(), video.path(), &parts, 10, &cancel)
        .await
        .unwrap_err();

    assert_matches!(err, UploadError::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(10));
}
