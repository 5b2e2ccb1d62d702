#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use musicspace_api::config::ServerConfig;
use musicspace_api::error::AppResult;
use musicspace_api::router::build_app_router;
use musicspace_api::state::AppState;
use musicspace_api::takeone::VideoStore;
use musicspace_core::types::DbId;
use musicspace_core::video::{StreamTriple, VideoStream};
use musicspace_db::models::provider::Provider;
use musicspace_db::models::takeone_user::{CreateTakeOneUser, TakeOneUser};
use musicspace_db::models::video_container::{CreateVideoContainer, ProfileVideoContainer};
use musicspace_events::{EmailError, Invitation, InvitationMailer};
use musicspace_takeone::models::{
    AppUser, CreateProjectRequest, CreateUserRequest, CreateVideoContainerRequest, Project,
    VideoContainer,
};
use musicspace_takeone::{TakeOneApiError, TakeOneConfig, TakeOneService};

pub const TEMPLATE_ID: &str = "tpl-profile";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:8000")],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        takeone: TakeOneConfig {
            base_url: "http://takeone.invalid".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            timeout: Duration::from_secs(5),
        },
        video_container_template_id: TEMPLATE_ID.to_string(),
        from_email: "noreply@musicspace.test".to_string(),
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    providers: Vec<Provider>,
    users: Vec<TakeOneUser>,
    containers: Vec<ProfileVideoContainer>,
    next_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// [`VideoStore`] over plain vectors. Counts stream writes.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    stream_writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn insert_provider(&self, full_name: &str, email: &str) -> Provider {
        let mut tables = self.tables.lock().unwrap();
        let provider = Provider {
            id: tables.next_id(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.providers.push(provider.clone());
        provider
    }

    pub fn insert_user(&self, provider_id: DbId, takeone_id: &str) -> TakeOneUser {
        let mut tables = self.tables.lock().unwrap();
        let user = TakeOneUser {
            id: tables.next_id(),
            provider_id,
            takeone_id: takeone_id.to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.users.push(user.clone());
        user
    }

    pub fn insert_container(&self, id: &str, takeone_user_id: DbId) -> ProfileVideoContainer {
        let container = ProfileVideoContainer {
            id: id.to_string(),
            template_id: TEMPLATE_ID.to_string(),
            takeone_user_id,
            video_stream_src: String::new(),
            video_stream_type: String::new(),
            video_stream_format: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables.lock().unwrap().containers.push(container.clone());
        container
    }

    pub fn container(&self, id: &str) -> Option<ProfileVideoContainer> {
        let tables = self.tables.lock().unwrap();
        tables.containers.iter().find(|c| c.id == id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn container_count(&self) -> usize {
        self.tables.lock().unwrap().containers.len()
    }

    pub fn stream_writes(&self) -> usize {
        self.stream_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoStore for InMemoryStore {
    async fn find_provider(&self, id: DbId) -> AppResult<Option<Provider>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.providers.iter().find(|p| p.id == id).cloned())
    }

    async fn find_takeone_user(&self, provider_id: DbId) -> AppResult<Option<TakeOneUser>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.provider_id == provider_id)
            .cloned())
    }

    async fn create_takeone_user(&self, input: &CreateTakeOneUser) -> AppResult<TakeOneUser> {
        Ok(self.insert_user(input.provider_id, &input.takeone_id))
    }

    async fn find_container(&self, id: &str) -> AppResult<Option<ProfileVideoContainer>> {
        Ok(self.container(id))
    }

    async fn find_container_for_user(
        &self,
        takeone_user_id: DbId,
    ) -> AppResult<Option<ProfileVideoContainer>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .containers
            .iter()
            .find(|c| c.takeone_user_id == takeone_user_id)
            .cloned())
    }

    async fn create_container(
        &self,
        input: &CreateVideoContainer,
    ) -> AppResult<ProfileVideoContainer> {
        Ok(self.insert_container(&input.id, input.takeone_user_id))
    }

    async fn update_container_stream(
        &self,
        id: &str,
        triple: &StreamTriple,
    ) -> AppResult<Option<ProfileVideoContainer>> {
        let mut tables = self.tables.lock().unwrap();
        let Some(container) = tables.containers.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if container.set_stream_triple(triple.clone()) {
            container.updated_at = Utc::now();
            self.stream_writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(Some(container.clone()))
    }
}

// ---------------------------------------------------------------------------
// TakeOne double
// ---------------------------------------------------------------------------

/// Records every partner API call and answers with canned records.
#[derive(Default)]
pub struct FakeTakeOne {
    calls: Mutex<Vec<&'static str>>,
    fail_on: Mutex<Option<&'static str>>,
    remote_stream: Mutex<Option<VideoStream>>,
    container_requests: Mutex<Vec<CreateVideoContainerRequest>>,
    latency: Mutex<Duration>,
}

impl FakeTakeOne {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Make `operation` fail with a 500 from TakeOne.
    pub fn fail_on(&self, operation: &'static str) {
        *self.fail_on.lock().unwrap() = Some(operation);
    }

    /// Stream reported by `get_video_container`.
    pub fn set_remote_stream(&self, stream: Option<VideoStream>) {
        *self.remote_stream.lock().unwrap() = stream;
    }

    pub fn container_requests(&self) -> Vec<CreateVideoContainerRequest> {
        self.container_requests.lock().unwrap().clone()
    }

    /// Delay every call by `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    async fn record(&self, operation: &'static str) -> Result<(), TakeOneApiError> {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.calls.lock().unwrap().push(operation);
        if *self.fail_on.lock().unwrap() == Some(operation) {
            return Err(TakeOneApiError::ApiError {
                status: 500,
                body: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    fn container(&self, id: &str) -> VideoContainer {
        VideoContainer {
            id: id.to_string(),
            hotlinking_protection_enabled: false,
            allowed_origins: vec![],
            video_stream: self.remote_stream.lock().unwrap().clone(),
            created_date_time: Utc::now(),
            modified_date_time: Utc::now(),
        }
    }
}

#[async_trait]
impl TakeOneService for FakeTakeOne {
    async fn create_user(&self, request: &CreateUserRequest) -> Result<AppUser, TakeOneApiError> {
        self.record("create_user").await?;
        Ok(AppUser {
            id: format!("usr-{}", request.external_id.clone().unwrap_or_default()),
            external_id: request.external_id.clone(),
            display_name: request.display_name.clone(),
            email_address: request.email_address.clone(),
        })
    }

    async fn create_video_container(
        &self,
        request: &CreateVideoContainerRequest,
    ) -> Result<VideoContainer, TakeOneApiError> {
        self.record("create_video_container").await?;
        self.container_requests.lock().unwrap().push(request.clone());
        Ok(self.container("vc-new"))
    }

    async fn get_video_container(&self, id: &str) -> Result<VideoContainer, TakeOneApiError> {
        self.record("get_video_container").await?;
        Ok(self.container(id))
    }

    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<Project, TakeOneApiError> {
        self.record("create_project").await?;
        Ok(Project {
            id: "prj-new".to_string(),
            user: request.user.clone(),
            video_container: request.video_container.clone(),
            display_name: None,
            state: "created".to_string(),
            publishing_status: "unpublished".to_string(),
            created_date_time: Utc::now(),
            modified_date_time: Utc::now(),
        })
    }

    async fn authorize(&self, user_id: &str) -> Result<String, TakeOneApiError> {
        self.record("authorize").await?;
        Ok(format!("code-for-{user_id}"))
    }
}

// ---------------------------------------------------------------------------
// Mailer double
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Invitation>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Invitation> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvitationMailer for RecordingMailer {
    async fn send_invitation(&self, invitation: &Invitation) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(invitation.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App harness
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub takeone: Arc<FakeTakeOne>,
    pub mailer: Arc<RecordingMailer>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let takeone = Arc::new(FakeTakeOne::default());
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState {
            config: Arc::new(config),
            store: store.clone(),
            takeone: takeone.clone(),
            mailer: mailer.clone(),
        };
        Self {
            store,
            takeone,
            mailer,
            state,
        }
    }

    /// The full router with the production middleware stack.
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &self.state.config)
    }

    /// A provider with a TakeOne user and an empty container `container_id`.
    pub fn seed_container(&self, container_id: &str) -> (Provider, ProfileVideoContainer) {
        let provider = self.store.insert_provider("Nina Simone", "nina@example.com");
        let user = self.store.insert_user(provider.id, "usr-nina");
        let container = self.store.insert_container(container_id, user.id);
        (provider, container)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body)).await
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn stream_json(src: &str, format: &str) -> Value {
    json!({
        "src": src,
        "type": "application/x-mpegURL",
        "video_format": format
    })
}

/// A webhook for `container_id`, with `video_stream` omitted when `None`.
pub fn webhook_payload(event_type: &str, container_id: &str, stream: Option<Value>) -> Value {
    let mut container = json!({
        "id": container_id,
        "hotlinking_protection_enabled": false,
        "allowed_origins": ["https://musicspace.test"],
        "created_date_time": "2024-06-01T10:00:00Z",
        "modified_date_time": "2024-06-01T12:00:00Z"
    });
    if let Some(stream) = stream {
        container["video_stream"] = stream;
    }
    json!({
        "type": event_type,
        "timestamp": "2024-06-01T12:00:00Z",
        "project": {
            "id": "prj-1",
            "user": "usr-nina",
            "video_container": container_id,
            "state": "completed",
            "publishing_status": "published",
            "created_date_time": "2024-06-01T10:00:00Z",
            "modified_date_time": "2024-06-01T12:00:00Z"
        },
        "video_container": container
    })
}
