//! Multipart POST to a presigned storage target.

use std::collections::BTreeMap;
use std::io::Write;

use musicspace_takeone::sdk::models::PresignedPostRequest;
use musicspace_takeone::upload::upload_presigned;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn uploads_fields_then_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bucket"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"PART-BYTES").unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("key".to_string(), "takes/tk_1/0".to_string());
    fields.insert("policy".to_string(), "signed-policy".to_string());
    let target = PresignedPostRequest {
        url: format!("{}/bucket", server.uri()),
        fields,
    };

    upload_presigned(&reqwest::Client::new(), file.path(), &target)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    let key_at = body.find("takes/tk_1/0").unwrap();
    let file_at = body.find("PART-BYTES").unwrap();
    assert!(body.contains("signed-policy"));
    assert!(key_at < file_at);
}

#[tokio::test]
async fn file_larger_than_one_read_arrives_intact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bucket"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let data: Vec<u8> = (0..20_000u32).map(|i| b'a' + (i % 26) as u8).collect();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    let target = PresignedPostRequest {
        url: format!("{}/bucket", server.uri()),
        fields: BTreeMap::new(),
    };

    upload_presigned(&reqwest::Client::new(), file.path(), &target)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains(std::str::from_utf8(&data).unwrap()));
}

#[tokio::test]
async fn storage_rejection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bucket"))
        .respond_with(ResponseTemplate::new(403).set_body_string("<Error>expired</Error>"))
        .mount(&server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    let target = PresignedPostRequest {
        url: format!("{}/bucket", server.uri()),
        fields: BTreeMap::new(),
    };

    let err = upload_presigned(&reqwest::Client::new(), file.path(), &target)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
}
