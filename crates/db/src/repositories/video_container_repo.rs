//! Repository for the `profile_video_containers` table.

use musicspace_core::types::DbId;
use musicspace_core::video::StreamTriple;
use sqlx::PgPool;

use crate::models::video_container::{CreateVideoContainer, ProfileVideoContainer};

const COLUMNS: &str = "id, template_id, takeone_user_id, video_stream_src, video_stream_type, \
                       video_stream_format, created_at, updated_at";

/// Provides persistence for profile video containers.
pub struct VideoContainerRepo;

impl VideoContainerRepo {
    /// Insert a freshly created container with an empty stream.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVideoContainer,
    ) -> Result<ProfileVideoContainer, sqlx::Error> {
        let query = format!(
            "INSERT INTO profile_video_containers (id, template_id, takeone_user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileVideoContainer>(&query)
            .bind(&input.id)
            .bind(&input.template_id)
            .bind(input.takeone_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a container by its TakeOne id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<ProfileVideoContainer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profile_video_containers WHERE id = $1");
        sqlx::query_as::<_, ProfileVideoContainer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the container owned by a TakeOne user, if any.
    pub async fn find_by_takeone_user(
        pool: &PgPool,
        takeone_user_id: DbId,
    ) -> Result<Option<ProfileVideoContainer>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM profile_video_containers WHERE takeone_user_id = $1");
        sqlx::query_as::<_, ProfileVideoContainer>(&query)
            .bind(takeone_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the stream columns.
    ///
    /// The row is only written (and `updated_at` only bumped) when the
    /// triple differs from what is stored, so replaying a snapshot leaves
    /// the row untouched. Returns `None` if no container has this id.
    pub async fn update_stream(
        pool: &PgPool,
        id: &str,
        triple: &StreamTriple,
    ) -> Result<Option<ProfileVideoContainer>, sqlx::Error> {
        let query = format!(
            "UPDATE profile_video_containers SET
                video_stream_src = $2,
                video_stream_type = $3,
                video_stream_format = $4,
                updated_at = NOW()
             WHERE id = $1
               AND (video_stream_src, video_stream_type, video_stream_format)
                   IS DISTINCT FROM ($2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ProfileVideoContainer>(&query)
            .bind(id)
            .bind(&triple.src)
            .bind(&triple.content_type)
            .bind(&triple.format)
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(row) => Ok(Some(row)),
            // Either unchanged or missing; a plain read tells them apart.
            None => Self::find_by_id(pool, id).await,
        }
    }
}
