use std::time::Duration;

use axum::http::HeaderValue;
use musicspace_takeone::api::DEFAULT_TIMEOUT;
use musicspace_takeone::TakeOneConfig;

use crate::takeone::onboarding::MAX_TAKEONE_CALLS;

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything is read and validated once at startup; handlers only ever see
/// the typed values.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// Timeout in seconds for requests that stay local (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres connection string.
    pub database_url: String,
    /// Partner API endpoint and credentials.
    pub takeone: TakeOneConfig,
    /// Template every new profile video container is created from.
    pub video_container_template_id: String,
    /// Sender address for invitation emails.
    pub from_email: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                               | Default                 |
    /// |---------------------------------------|-------------------------|
    /// | `HOST`                                | `0.0.0.0`               |
    /// | `PORT`                                | `3000`                  |
    /// | `CORS_ORIGINS`                        | `http://localhost:8000` |
    /// | `REQUEST_TIMEOUT_SECS`                | `30`                    |
    /// | `DATABASE_URL`                        | required                |
    /// | `TAKEONE_BASE_URL`                    | required                |
    /// | `TAKEONE_CLIENT_ID`                   | required                |
    /// | `TAKEONE_CLIENT_SECRET`               | required                |
    /// | `TAKEONE_VIDEO_CONTAINER_TEMPLATE_ID` | required                |
    /// | `TAKEONE_TIMEOUT_SECS`                | `30`                    |
    /// | `FROM_EMAIL`                          | required                |
    ///
    /// SMTP settings are read separately by
    /// [`musicspace_events::EmailConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = optional("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parsed("PORT", 3000u16)?;

        let cors_origins = parse_origins(
            &optional("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:8000".into()),
        )?;

        let request_timeout_secs = parsed("REQUEST_TIMEOUT_SECS", 30u64)?;
        let takeone_timeout_secs = parsed("TAKEONE_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;

        let takeone = TakeOneConfig {
            base_url: required("TAKEONE_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            client_id: required("TAKEONE_CLIENT_ID")?,
            client_secret: required("TAKEONE_CLIENT_SECRET")?,
            timeout: Duration::from_secs(takeone_timeout_secs),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: required("DATABASE_URL")?,
            takeone,
            video_container_template_id: required("TAKEONE_VIDEO_CONTAINER_TEMPLATE_ID")?,
            from_email: required("FROM_EMAIL")?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Deadline for routes that talk to TakeOne on the request path.
    ///
    /// `add_video` makes up to [`MAX_TAKEONE_CALLS`] sequential partner API
    /// calls, each bounded by the client timeout, plus its own local work.
    pub fn onboarding_timeout(&self) -> Duration {
        self.request_timeout() + self.takeone.timeout * MAX_TAKEONE_CALLS
    }
}

/// Split a comma-separated origin list, rejecting values that cannot be
/// sent back in `Access-Control-Allow-Origin`.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}

/// A set, non-blank variable.
fn optional(var: &'static str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::Missing(var))
}

fn parsed<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(var) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
