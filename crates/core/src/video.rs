//! Video orientation and the hosted video-stream triple.
//!
//! A profile video container either has a playable stream (source URL,
//! MIME type and orientation all set) or none at all. [`StreamTriple`] is
//! the flattened, persisted form and is the only way stream columns are
//! written, which keeps the three columns all-or-nothing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// VideoFormat
// ---------------------------------------------------------------------------

/// Orientation of a video, as understood by TakeOne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Landscape,
    Portrait,
    Square,
}

impl VideoFormat {
    /// Derive the orientation from frame dimensions. Equal sides are square.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        match width.cmp(&height) {
            std::cmp::Ordering::Greater => Self::Landscape,
            std::cmp::Ordering::Less => Self::Portrait,
            std::cmp::Ordering::Equal => Self::Square,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            "square" => Ok(Self::Square),
            other => Err(CoreError::Validation(format!(
                "unknown video format '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// VideoStream
// ---------------------------------------------------------------------------

/// A playable stream as reported by TakeOne for a video container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStream {
    /// Streaming URL, usually an HLS playlist.
    pub src: String,
    /// MIME / container type, e.g. `application/x-mpegURL`.
    #[serde(rename = "type")]
    pub content_type: String,
    pub video_format: VideoFormat,
}

impl VideoStream {
    /// True when every member carries a value.
    pub fn is_complete(&self) -> bool {
        !self.src.is_empty() && !self.content_type.is_empty()
    }
}

// ---------------------------------------------------------------------------
// StreamTriple
// ---------------------------------------------------------------------------

/// The persisted `(src, type, format)` columns of a video container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamTriple {
    pub src: String,
    pub content_type: String,
    pub format: String,
}

impl StreamTriple {
    /// Build the columns to persist from an upstream snapshot.
    ///
    /// An absent stream, or one with any empty member, clears all three.
    pub fn from_snapshot(stream: Option<&VideoStream>) -> Self {
        match stream {
            Some(s) if s.is_complete() => Self {
                src: s.src.clone(),
                content_type: s.content_type.clone(),
                format: s.video_format.as_str().to_string(),
            },
            _ => Self::default(),
        }
    }

    /// All three columns are set.
    pub fn is_populated(&self) -> bool {
        !self.src.is_empty() && !self.content_type.is_empty() && !self.format.is_empty()
    }

    /// All three columns are empty.
    pub fn is_cleared(&self) -> bool {
        self.src.is_empty() && self.content_type.is_empty() && self.format.is_empty()
    }

    /// Rebuild the typed stream, if the columns hold one.
    pub fn to_stream(&self) -> Option<VideoStream> {
        if !self.is_populated() {
            return None;
        }
        let video_format = self.format.parse().ok()?;
        Some(VideoStream {
            src: self.src.clone(),
            content_type: self.content_type.clone(),
            video_format,
        })
    }
}
