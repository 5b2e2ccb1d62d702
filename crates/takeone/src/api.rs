//! REST client for the TakeOne partner API.
//!
//! One method per remote action. Every call carries the static client
//! credentials as HTTP basic auth and is bounded by the configured timeout.
//! There is no retry here: a failed call aborts whatever workflow made it.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{parse_response, TakeOneApiError};
use crate::models::{
    AppUser, AuthorizationCodeRequest, AuthorizationCodeResponse, CreateProjectRequest,
    CreateUserRequest, CreateVideoContainerRequest, Project, VideoContainer,
};

/// Default timeout for a single partner API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the partner API.
#[derive(Debug, Clone)]
pub struct TakeOneConfig {
    /// Scheme and host, e.g. `https://api.takeone.example`. No trailing slash.
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout: Duration,
}

/// The partner API operations the rest of the system depends on.
///
/// Handlers and services hold an `Arc<dyn TakeOneService>` so tests can
/// swap in a double.
#[async_trait]
pub trait TakeOneService: Send + Sync {
    async fn create_user(&self, request: &CreateUserRequest) -> Result<AppUser, TakeOneApiError>;

    async fn create_video_container(
        &self,
        request: &CreateVideoContainerRequest,
    ) -> Result<VideoContainer, TakeOneApiError>;

    async fn get_video_container(&self, id: &str) -> Result<VideoContainer, TakeOneApiError>;

    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<Project, TakeOneApiError>;

    /// Issue a one-time authorization code for an app user.
    async fn authorize(&self, user_id: &str) -> Result<String, TakeOneApiError>;
}

/// HTTP client for the TakeOne partner API.
pub struct TakeOneApi {
    client: reqwest::Client,
    config: TakeOneConfig,
}

impl TakeOneApi {
    /// Build a client with its own connection pool and timeout.
    pub fn new(config: TakeOneConfig) -> Result<Self, TakeOneApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TakeOneConfig) -> Self {
        Self { client, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .timeout(self.config.timeout)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .timeout(self.config.timeout)
    }
}

#[async_trait]
impl TakeOneService for TakeOneApi {
    /// `POST /api/v1/app_users`
    async fn create_user(&self, request: &CreateUserRequest) -> Result<AppUser, TakeOneApiError> {
        let response = self.post("/api/v1/app_users").json(request).send().await?;
        let user: AppUser = parse_response(response).await?;
        tracing::info!(takeone_user_id = %user.id, "TakeOne app user created");
        Ok(user)
    }

    /// `POST /api/v1/video_containers`
    async fn create_video_container(
        &self,
        request: &CreateVideoContainerRequest,
    ) -> Result<VideoContainer, TakeOneApiError> {
        let response = self
            .post("/api/v1/video_containers")
            .json(request)
            .send()
            .await?;
        let container: VideoContainer = parse_response(response).await?;
        tracing::info!(container_id = %container.id, "TakeOne video container created");
        Ok(container)
    }

    /// `GET /api/v1/video_containers/{id}`
    async fn get_video_container(&self, id: &str) -> Result<VideoContainer, TakeOneApiError> {
        let response = self
            .get(&format!("/api/v1/video_containers/{id}"))
            .send()
            .await?;
        parse_response(response).await
    }

    /// `POST /api/v1/projects`
    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<Project, TakeOneApiError> {
        let response = self.post("/api/v1/projects").json(request).send().await?;
        let project: Project = parse_response(response).await?;
        tracing::info!(
            project_id = %project.id,
            state = %project.state,
            publishing_status = %project.publishing_status,
            "TakeOne project created",
        );
        Ok(project)
    }

    /// `POST /api/v1/app_users/authorize`
    async fn authorize(&self, user_id: &str) -> Result<String, TakeOneApiError> {
        let request = AuthorizationCodeRequest {
            user: user_id.to_string(),
        };
        let response = self
            .post("/api/v1/app_users/authorize")
            .json(&request)
            .send()
            .await?;
        let body: AuthorizationCodeResponse = parse_response(response).await?;
        Ok(body.code)
    }
}
