use std::time::Duration;

use musicspace_takeone::TakeOneApiError;

use crate::probe::ProbeError;
use crate::segment::SegmentState;

/// Everything that can stop an upload run. All variants are fatal.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid workflow config: {0}")]
    Config(String),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TakeOne(#[from] TakeOneApiError),

    #[error("The app user has no TakeOne project")]
    NoProject,

    /// A temporary part file does not hold the requested byte range.
    #[error("Part at offset {part_offset} holds {actual} bytes, expected {expected}")]
    PartSizeMismatch {
        part_offset: u64,
        expected: u64,
        actual: u64,
    },

    /// The uploaded parts do not add up to the source file.
    #[error("Uploaded {uploaded} bytes of a {expected} byte file")]
    ByteCountMismatch { expected: u64, uploaded: u64 },

    #[error("Segment {segment_id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        segment_id: String,
        from: SegmentState,
        to: SegmentState,
    },

    #[error("Production request {production_request_id} not finished after {waited:?}")]
    PollTimeout {
        production_request_id: String,
        waited: Duration,
    },

    #[error("Production request {0} ended in the error state")]
    ProductionFailed(String),

    #[error("Upload cancelled")]
    Cancelled,
}
