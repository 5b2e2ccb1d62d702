//! Byte-range part extraction and upload.
//!
//! TakeOne splits a take's source file into parts and hands back a
//! presigned storage target for each part it still needs. Each range is
//! copied into its own temporary file, posted, then removed.

use std::io::SeekFrom;
use std::path::Path;

use musicspace_core::hashing::READ_CHUNK_SIZE;
use musicspace_takeone::sdk::models::VideoUploadRequestPart;
use musicspace_takeone::upload::upload_presigned;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::error::UploadError;

/// Copy `[offset, offset + length)` of `source` into a fresh temporary file.
///
/// The file is deleted when the returned handle drops. Fails with
/// [`UploadError::PartSizeMismatch`] if the source ends early.
pub async fn extract_part(
    source: &Path,
    part_offset: u64,
    offset: u64,
    length: u64,
) -> Result<NamedTempFile, UploadError> {
    let temp = tempfile::Builder::new()
        .prefix(&format!("take-part-{part_offset}-"))
        .tempfile()?;

    let mut input = tokio::fs::File::open(source).await?;
    input.seek(SeekFrom::Start(offset)).await?;
    let mut output = tokio::fs::File::create(temp.path()).await?;

    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let mut remaining = length;
    while remaining > 0 {
        let want = remaining.min(READ_CHUNK_SIZE as u64) as usize;
        let n = input.read(&mut buf[..want]).await?;
        if n == 0 {
            break;
        }
        output.write_all(&buf[..n]).await?;
        remaining -= n as u64;
    }
    output.flush().await?;
    drop(output);

    let actual = tokio::fs::metadata(temp.path()).await?.len();
    if actual != length {
        return Err(UploadError::PartSizeMismatch {
            part_offset,
            expected: length,
            actual,
        });
    }
    Ok(temp)
}

/// Upload every part that has a presigned target, in `part_offset` order.
///
/// Parts without a target are already stored and are skipped. The bytes
/// actually sent must add up to `content_length`, otherwise the take is
/// incomplete and [`UploadError::ByteCountMismatch`] is returned.
///
/// Cancellation aborts the part in flight; its temporary file is removed.
pub async fn upload_parts(
    http: &reqwest::Client,
    source: &Path,
    parts: &[VideoUploadRequestPart],
    content_length: u64,
    cancel: &CancellationToken,
) -> Result<u64, UploadError> {
    let mut ordered: Vec<&VideoUploadRequestPart> = parts.iter().collect();
    ordered.sort_by_key(|p| p.part_offset);

    let mut uploaded = 0u64;
    for part in ordered {
        if cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }
        let Some(target) = &part.presigned_post_request else {
            tracing::debug!(part_offset = part.part_offset, "Part already stored, skipping");
            continue;
        };

        let temp = extract_part(
            source,
            part.part_offset,
            part.content_offset,
            part.content_length,
        )
        .await?;
        tokio::select! {
            result = upload_presigned(http, temp.path(), target) => {
                result?;
            }
            () = cancel.cancelled() => {
                tracing::warn!(part_offset = part.part_offset, "Part upload cancelled");
                return Err(UploadError::Cancelled);
            }
        }
        temp.close()?;

        uploaded += part.content_length;
        tracing::info!(
            part_offset = part.part_offset,
            content_length = part.content_length,
            uploaded,
            "Part uploaded",
        );
    }

    if uploaded != content_length {
        return Err(UploadError::ByteCountMismatch {
            expected: content_length,
            uploaded,
        });
    }
    Ok(uploaded)
}
