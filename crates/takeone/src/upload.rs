//! Direct-to-storage uploads through presigned POST targets.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio_util::io::ReaderStream;

use crate::error::{ensure_success, TakeOneApiError};
use crate::sdk::models::PresignedPostRequest;

/// Upload a file as the `file` field of a multipart form, after the
/// server-supplied fields. The file is streamed from disk. Returns the
/// storage response body.
pub async fn upload_presigned(
    client: &reqwest::Client,
    path: &Path,
    target: &PresignedPostRequest,
) -> Result<String, TakeOneApiError> {
    let file = tokio::fs::File::open(path).await?;
    let size = file.metadata().await?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "part".to_string());

    let mut form = Form::new();
    for (name, value) in &target.fields {
        form = form.text(name.clone(), value.clone());
    }
    let body = Body::wrap_stream(ReaderStream::new(file));
    // Storage services ignore any field after the file, so it goes last.
    form = form.part(
        "file",
        Part::stream_with_length(body, size).file_name(file_name),
    );

    let response = client.post(&target.url).multipart(form).send().await?;
    let response = ensure_success(response).await?;
    let body = response.text().await?;

    tracing::debug!(url = %target.url, size, "Presigned upload completed");
    Ok(body)
}
