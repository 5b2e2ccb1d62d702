//! Typed wrappers for the SDK API endpoints used by the batch uploader.

use crate::error::{parse_response, TakeOneApiError};
use crate::sdk::auth::TokenAuth;
use crate::sdk::models::{
    CreateProductionRequest, CreateTakeRequest, CreateUserReview, CreateVideoSegmentRequest,
    ProductionRequest, ProjectsPage, ReviewResult, Take, UserReview, VideoSegment,
};

/// Client for one authorized app user.
pub struct SdkClient {
    client: reqwest::Client,
    base_url: String,
    auth: TokenAuth,
}

impl SdkClient {
    pub fn new(client: reqwest::Client, base_url: String, auth: TokenAuth) -> Self {
        Self {
            client,
            base_url,
            auth,
        }
    }

    /// Complete app-user authorization and return a ready client.
    pub async fn authorize_with_code(
        client: reqwest::Client,
        base_url: String,
        code: &str,
    ) -> Result<Self, TakeOneApiError> {
        let tokens = TokenAuth::exchange_code(&client, &base_url, code).await?;
        tracing::info!(expires_in = tokens.expires_in, "App user authorization completed");
        let auth = TokenAuth::new(client.clone(), base_url.clone(), tokens);
        Ok(Self::new(client, base_url, auth))
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}/sdkapi/v1{path}", self.base_url)
    }

    /// `GET /projects` -- newest first.
    pub async fn fetch_projects(&self) -> Result<ProjectsPage, TakeOneApiError> {
        let url = self.url("/projects");
        let response = self.auth.send(|| self.client.get(&url)).await?;
        parse_response(response).await
    }

    /// `POST /projects/{project_id}/segments`
    pub async fn create_video_segment(
        &self,
        project_id: &str,
        script: Option<String>,
    ) -> Result<VideoSegment, TakeOneApiError> {
        let url = self.url(&format!("/projects/{project_id}/segments"));
        let body = CreateVideoSegmentRequest { script };
        let response = self
            .auth
            .send(|| self.client.post(&url).json(&body))
            .await?;
        parse_response(response).await
    }

    /// `POST /projects/{project_id}/segments/{segment_id}/takes`
    pub async fn create_take(
        &self,
        project_id: &str,
        segment_id: &str,
        request: &CreateTakeRequest,
    ) -> Result<Take, TakeOneApiError> {
        let url = self.url(&format!(
            "/projects/{project_id}/segments/{segment_id}/takes"
        ));
        let response = self
            .auth
            .send(|| self.client.post(&url).json(request))
            .await?;
        parse_response(response).await
    }

    /// `POST /projects/{project_id}/productionrequests`
    pub async fn create_production_request(
        &self,
        project_id: &str,
        request: &CreateProductionRequest,
    ) -> Result<ProductionRequest, TakeOneApiError> {
        let url = self.url(&format!("/projects/{project_id}/productionrequests"));
        let response = self
            .auth
            .send(|| self.client.post(&url).json(request))
            .await?;
        parse_response(response).await
    }

    /// `GET /projects/{project_id}/productionrequests/{id}`
    pub async fn fetch_production_request(
        &self,
        project_id: &str,
        production_request_id: &str,
    ) -> Result<ProductionRequest, TakeOneApiError> {
        let url = self.url(&format!(
            "/projects/{project_id}/productionrequests/{production_request_id}"
        ));
        let response = self.auth.send(|| self.client.get(&url)).await?;
        parse_response(response).await
    }

    /// `POST /projects/{project_id}/user_reviews`
    pub async fn submit_review(
        &self,
        project_id: &str,
        production_request_id: &str,
        result: ReviewResult,
    ) -> Result<UserReview, TakeOneApiError> {
        let url = self.url(&format!("/projects/{project_id}/user_reviews"));
        let body = CreateUserReview {
            result,
            production_request: production_request_id.to_string(),
        };
        let response = self
            .auth
            .send(|| self.client.post(&url).json(&body))
            .await?;
        parse_response(response).await
    }
}
