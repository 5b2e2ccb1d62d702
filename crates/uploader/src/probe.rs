//! Video stats via `ffprobe`.

use std::path::Path;

use async_trait::async_trait;
use musicspace_core::video::VideoFormat;
use serde::Deserialize;

/// Error type for probing a take's source file.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("ffprobe binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("video file not found: {0}")]
    VideoNotFound(String),
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    pub streams: Vec<FfprobeStream>,
    pub format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// e.g. "30/1" or "24000/1001"
    pub r_frame_rate: Option<String>,
    pub nb_frames: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// What a take needs to know about its video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStats {
    pub width: u32,
    pub height: u32,
    /// Rational frame rate as ffprobe reports it.
    pub frame_rate: String,
    pub frame_count: u64,
    pub duration_secs: f64,
}

impl VideoStats {
    pub fn format(&self) -> VideoFormat {
        VideoFormat::from_dimensions(self.width, self.height)
    }

    /// Duration rounded up to the next tenth of a second.
    pub fn rounded_length(&self) -> f64 {
        round_up_tenth(self.duration_secs)
    }
}

/// Round up to one decimal place. Values already on a tenth stay put even
/// when their binary representation sits a hair above it.
pub fn round_up_tenth(secs: f64) -> f64 {
    let tenths = (secs * 10.0 - 1e-9).ceil().max(0.0);
    tenths / 10.0
}

/// Parse `"num/den"` into frames per second.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    (den > 0.0).then(|| num / den)
}

/// Pull [`VideoStats`] out of the first video stream.
pub fn stats_from_output(output: &FfprobeOutput) -> Result<VideoStats, ProbeError> {
    let stream = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ProbeError::ParseError("no video stream".into()))?;

    let missing = |field: &str| ProbeError::ParseError(format!("video stream has no {field}"));

    let width = stream.width.ok_or_else(|| missing("width"))?;
    let height = stream.height.ok_or_else(|| missing("height"))?;
    let frame_rate = stream
        .r_frame_rate
        .clone()
        .ok_or_else(|| missing("r_frame_rate"))?;

    let duration_secs = stream
        .duration
        .as_deref()
        .or_else(|| output.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| missing("duration"))?;

    // Some containers omit nb_frames; estimate from rate and duration.
    let frame_count = match stream.nb_frames.as_deref().and_then(|n| n.parse().ok()) {
        Some(count) => count,
        None => parse_frame_rate(&frame_rate)
            .map(|fps| (fps * duration_secs).round() as u64)
            .ok_or_else(|| missing("nb_frames"))?,
    };

    Ok(VideoStats {
        width,
        height,
        frame_rate,
        frame_count,
        duration_secs,
    })
}

// ---------------------------------------------------------------------------
// Probers
// ---------------------------------------------------------------------------

/// Source of [`VideoStats`] for a file.
#[async_trait]
pub trait VideoProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<VideoStats, ProbeError>;
}

/// Runs the `ffprobe` binary from `PATH`.
pub struct FfprobeProber;

#[async_trait]
impl VideoProber for FfprobeProber {
    async fn probe(&self, path: &Path) -> Result<VideoStats, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::VideoNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let output = tokio::process::Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .await
            .map_err(ProbeError::NotFound)?;

        if !output.status.success() {
            return Err(ProbeError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed = serde_json::from_str::<FfprobeOutput>(&stdout)
            .map_err(|e| ProbeError::ParseError(format!("{e}: {stdout}")))?;
        stats_from_output(&parsed)
    }
}
