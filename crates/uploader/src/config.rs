//! The JSON workflow file the uploader is driven by.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::UploadError;
use crate::poll::PollConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// TakeOne root, e.g. `https://api.takeone.example`.
    pub base_url: String,
    pub project: ProjectConfig,
    pub production_request: ProductionRequestParams,
    #[serde(default)]
    pub polling: PollingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub user_provided_title: Option<String>,
    pub script: Option<String>,
    pub video_segments: Vec<VideoSegmentConfig>,
}

/// One segment, uploaded in file order.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoSegmentConfig {
    pub script: Option<String>,
    pub take: TakeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TakeConfig {
    /// Passed through to TakeOne untouched.
    pub metadata: Option<serde_json::Value>,
    pub video_filename: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionRequestParams {
    pub music: Option<String>,
    pub add_subtitles: bool,
    pub name: Option<String>,
    pub title: Option<String>,
}

/// Optional overrides for [`PollConfig`], in seconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollingSection {
    pub initial_interval_secs: Option<u64>,
    pub max_interval_secs: Option<u64>,
    pub max_duration_secs: Option<u64>,
}

impl PollingSection {
    pub fn to_poll_config(&self) -> PollConfig {
        let defaults = PollConfig::default();
        PollConfig {
            initial_interval: self
                .initial_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.initial_interval),
            max_interval: self
                .max_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_interval),
            max_duration: self
                .max_duration_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_duration),
            ..defaults
        }
    }
}

impl WorkflowConfig {
    /// Read and validate a workflow file.
    pub async fn load(path: &Path) -> Result<Self, UploadError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            UploadError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, UploadError> {
        let mut config: Self =
            serde_json::from_str(raw).map_err(|e| UploadError::Config(e.to_string()))?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), UploadError> {
        if self.base_url.is_empty() {
            return Err(UploadError::Config("base_url is empty".into()));
        }
        if self.project.video_segments.is_empty() {
            return Err(UploadError::Config(
                "project.video_segments must list at least one segment".into(),
            ));
        }
        let poll = self.polling.to_poll_config();
        if poll.initial_interval.is_zero() || poll.max_interval < poll.initial_interval {
            return Err(UploadError::Config(
                "polling intervals must be positive and max >= initial".into(),
            ));
        }
        Ok(())
    }
}
