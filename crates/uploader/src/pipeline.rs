//! The end-to-end upload workflow for one app user.
//!
//! 1. Pick the user's most recent project.
//! 2. For each configured segment: probe and hash the source file, create
//!    the segment and its take, upload the parts TakeOne asks for.
//! 3. Request a production over all new segments and wait for it.
//! 4. Review the outcome: accept a completed production, reject a failed
//!    one.

use std::path::Path;
use std::sync::Arc;

use musicspace_core::hashing::{file_md5_base64, file_size};
use musicspace_takeone::sdk::models::{
    CreateProductionRequest, CreateTakeRequest, FileFormat, ProductionRequest, ReviewResult,
    TakeVideoFileItemProps, UserReview,
};
use musicspace_takeone::sdk::SdkClient;
use tokio_util::sync::CancellationToken;

use crate::config::{VideoSegmentConfig, WorkflowConfig};
use crate::error::UploadError;
use crate::parts::upload_parts;
use crate::poll::{poll_until_terminal, PollConfig};
use crate::probe::VideoProber;
use crate::segment::{SegmentProgress, SegmentState};

/// Result of a successful run.
#[derive(Debug)]
pub struct UploadSummary {
    pub project_id: String,
    pub segment_ids: Vec<String>,
    pub production_request: ProductionRequest,
    pub review: UserReview,
}

pub struct Uploader {
    sdk: SdkClient,
    prober: Arc<dyn VideoProber>,
    config: WorkflowConfig,
    poll: PollConfig,
}

impl Uploader {
    pub fn new(sdk: SdkClient, prober: Arc<dyn VideoProber>, config: WorkflowConfig) -> Self {
        let poll = config.polling.to_poll_config();
        Self {
            sdk,
            prober,
            config,
            poll,
        }
    }

    /// Override the polling schedule taken from the workflow file.
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Exchange the one-time code for tokens and build the uploader.
    pub async fn connect(
        config: WorkflowConfig,
        code: &str,
        prober: Arc<dyn VideoProber>,
    ) -> Result<Self, UploadError> {
        tracing::info!(base_url = %config.base_url, "Completing app user authorization");
        let sdk =
            SdkClient::authorize_with_code(reqwest::Client::new(), config.base_url.clone(), code)
                .await?;
        Ok(Self::new(sdk, prober, config))
    }

    pub async fn run(&self, cancel: &CancellationToken) -> Result<UploadSummary, UploadError> {
        let projects = self.sdk.fetch_projects().await?;
        // Newest first.
        let project_id = projects
            .results
            .first()
            .map(|p| p.id.clone())
            .ok_or(UploadError::NoProject)?;
        tracing::info!(project_id = %project_id, "Uploading to project");

        let mut segment_ids = Vec::with_capacity(self.config.project.video_segments.len());
        for segment in &self.config.project.video_segments {
            if cancel.is_cancelled() {
                return Err(UploadError::Cancelled);
            }
            segment_ids.push(self.upload_segment(&project_id, segment, cancel).await?);
        }
        if cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let params = &self.config.production_request;
        let created = self
            .sdk
            .create_production_request(
                &project_id,
                &CreateProductionRequest {
                    video_segments: segment_ids.clone(),
                    music: params.music.clone(),
                    add_subtitles: params.add_subtitles,
                    name: params.name.clone(),
                    title: params.title.clone(),
                },
            )
            .await?;
        tracing::info!(
            production_request_id = %created.id,
            segments = segment_ids.len(),
            "Production requested",
        );

        let production_request = if created.is_terminal() {
            created
        } else {
            let sdk = &self.sdk;
            let project = project_id.as_str();
            let id = created.id.as_str();
            poll_until_terminal(id, &self.poll, cancel, move || {
                sdk.fetch_production_request(project, id)
            })
            .await?
        };

        if !production_request.is_completed() {
            let review = self
                .sdk
                .submit_review(&project_id, &production_request.id, ReviewResult::Rejected)
                .await?;
            tracing::warn!(
                production_request_id = %production_request.id,
                review_id = %review.id,
                "Production ended in error, rejected",
            );
            return Err(UploadError::ProductionFailed(production_request.id));
        }

        let review = self
            .sdk
            .submit_review(&project_id, &production_request.id, ReviewResult::Accepted)
            .await?;
        tracing::info!(
            production_request_id = %production_request.id,
            review_id = %review.id,
            "Production accepted",
        );

        Ok(UploadSummary {
            project_id,
            segment_ids,
            production_request,
            review,
        })
    }

    /// Create one segment with its take and upload the take's parts.
    async fn upload_segment(
        &self,
        project_id: &str,
        segment: &VideoSegmentConfig,
        cancel: &CancellationToken,
    ) -> Result<String, UploadError> {
        let source = segment.take.video_filename.as_path();
        // Describe the file before creating anything remotely.
        let file_item = self.describe_file(source).await?;
        let content_length = file_item.file_object_content_length;

        let created = self
            .sdk
            .create_video_segment(project_id, segment.script.clone())
            .await?;
        let mut progress = SegmentProgress::new(created.id);

        let take = self
            .sdk
            .create_take(
                project_id,
                progress.segment_id(),
                &CreateTakeRequest {
                    metadata: segment.take.metadata.clone(),
                    video_file_item: file_item,
                },
            )
            .await?;
        tracing::info!(
            segment_id = %progress.segment_id(),
            take_id = %take.id,
            parts = take.video_upload_request.parts.len(),
            "Take submitted",
        );
        progress.advance(SegmentState::TakeSubmitted)?;

        progress.advance(SegmentState::PartsUploading)?;
        upload_parts(
            self.sdk.http(),
            source,
            &take.video_upload_request.parts,
            content_length,
            cancel,
        )
        .await?;
        progress.advance(SegmentState::PartsComplete)?;

        Ok(progress.segment_id().to_string())
    }

    async fn describe_file(&self, path: &Path) -> Result<TakeVideoFileItemProps, UploadError> {
        let stats = self.prober.probe(path).await?;
        let content_length = file_size(path).await?;
        let content_md5 = file_md5_base64(path).await?;

        tracing::debug!(
            path = %path.display(),
            width = stats.width,
            height = stats.height,
            frame_rate = %stats.frame_rate,
            content_length,
            "Probed take source",
        );

        Ok(TakeVideoFileItemProps {
            video_format: stats.format(),
            video_length: stats.rounded_length(),
            video_width: stats.width,
            video_height: stats.height,
            video_crf: 0,
            video_frame_count: stats.frame_count,
            video_frame_rate: stats.frame_rate,
            file_format: FileFormat::Mov,
            file_object_content_length: content_length,
            file_object_content_md5: content_md5,
        })
    }
}
