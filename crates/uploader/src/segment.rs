//! Per-segment upload progress.
//!
//! ```text
//! Created -> TakeSubmitted -> PartsUploading -> PartsComplete
//! ```
//!
//! Only single forward steps are allowed.

use crate::error::UploadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// The segment exists on TakeOne.
    Created,
    /// A take describing the source file has been accepted.
    TakeSubmitted,
    /// Parts are being copied and posted.
    PartsUploading,
    /// Every part was uploaded and the byte count checked.
    PartsComplete,
}

impl SegmentState {
    /// The only state reachable from this one.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::TakeSubmitted),
            Self::TakeSubmitted => Some(Self::PartsUploading),
            Self::PartsUploading => Some(Self::PartsComplete),
            Self::PartsComplete => None,
        }
    }
}

/// Tracks one segment through [`SegmentState`].
#[derive(Debug)]
pub struct SegmentProgress {
    segment_id: String,
    state: SegmentState,
}

impl SegmentProgress {
    pub fn new(segment_id: impl Into<String>) -> Self {
        let segment_id = segment_id.into();
        tracing::info!(segment_id = %segment_id, state = ?SegmentState::Created, "Segment created");
        Self {
            segment_id,
            state: SegmentState::Created,
        }
    }

    pub fn segment_id(&self) -> &str {
        &self.segment_id
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    pub fn advance(&mut self, to: SegmentState) -> Result<(), UploadError> {
        if self.state.next() != Some(to) {
            return Err(UploadError::InvalidTransition {
                segment_id: self.segment_id.clone(),
                from: self.state,
                to,
            });
        }
        tracing::info!(
            segment_id = %self.segment_id,
            from = ?self.state,
            to = ?to,
            "Segment state changed",
        );
        self.state = to;
        Ok(())
    }
}
