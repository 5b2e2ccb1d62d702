//! Content digests for uploaded video files.
//!
//! TakeOne expects `file_object_content_md5` as the base64 of the raw MD5
//! digest (the same encoding as an HTTP `Content-MD5` header). Files are
//! read in fixed-size chunks so large takes never sit in memory.

use std::path::Path;

use base64::Engine;
use tokio::io::AsyncReadExt;

/// Read buffer size used when streaming files.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Base64-encoded MD5 digest of an in-memory buffer.
pub fn md5_base64(data: &[u8]) -> String {
    let digest = md5::compute(data);
    base64::engine::general_purpose::STANDARD.encode(digest.0)
}

/// Stream a file through MD5 and return the base64-encoded digest.
pub async fn file_md5_base64(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut context = md5::Context::new();
    let mut buf = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        context.consume(&buf[..n]);
    }

    let digest = context.compute();
    Ok(base64::engine::general_purpose::STANDARD.encode(digest.0))
}

/// Size of a file in bytes.
pub async fn file_size(path: &Path) -> std::io::Result<u64> {
    Ok(tokio::fs::metadata(path).await?.len())
}
