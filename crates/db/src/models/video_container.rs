//! Profile video container entity.

use musicspace_core::types::{DbId, Timestamp};
use musicspace_core::video::{StreamTriple, VideoStream};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profile_video_containers` table.
///
/// The primary key is the container id assigned by TakeOne. The three
/// `video_stream_*` columns are either all set or all empty strings; a
/// table CHECK constraint backs this up.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ProfileVideoContainer {
    pub id: String,
    pub template_id: String,
    pub takeone_user_id: DbId,
    pub video_stream_src: String,
    pub video_stream_type: String,
    pub video_stream_format: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProfileVideoContainer {
    /// The persisted stream columns.
    pub fn stream_triple(&self) -> StreamTriple {
        StreamTriple {
            src: self.video_stream_src.clone(),
            content_type: self.video_stream_type.clone(),
            format: self.video_stream_format.clone(),
        }
    }

    /// Overwrite the stream columns. Returns `true` if anything changed.
    pub fn set_stream_triple(&mut self, triple: StreamTriple) -> bool {
        if self.stream_triple() == triple {
            return false;
        }
        self.video_stream_src = triple.src;
        self.video_stream_type = triple.content_type;
        self.video_stream_format = triple.format;
        true
    }

    pub fn video_stream(&self) -> Option<VideoStream> {
        self.stream_triple().to_stream()
    }

    /// A provider page should embed the player only once a stream exists.
    pub fn should_render_video(&self) -> bool {
        self.stream_triple().is_populated()
    }
}

/// DTO for recording a newly created container.
#[derive(Debug, Clone)]
pub struct CreateVideoContainer {
    pub id: String,
    pub template_id: String,
    pub takeone_user_id: DbId,
}
