/// Errors from the TakeOne REST layers.
#[derive(Debug, thiserror::Error)]
pub enum TakeOneApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, or a
    /// response body that did not match the expected shape).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TakeOne returned a status code of 400 or above.
    #[error("TakeOne API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The SDK API still answered 401 after a token refresh and one retry.
    #[error("TakeOne rejected the refreshed access token")]
    Unauthorized,

    /// A local file backing an upload could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TakeOneApiError {
    /// HTTP status of a remote error, if the failure came from TakeOne.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Io(_) => None,
        }
    }
}

/// Turn a non-success response into [`TakeOneApiError::ApiError`].
///
/// The raw body is logged before the error is returned so failed calls
/// can be diagnosed from the logs alone.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, TakeOneApiError> {
    let status = response.status();
    if status.as_u16() >= 400 {
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::error!(status = status.as_u16(), %url, body = %body, "TakeOne call failed");
        return Err(TakeOneApiError::ApiError {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TakeOneApiError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}
