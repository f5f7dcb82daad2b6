//! # API Client
//!
//! HTTP client for communicating with the Lexora backend.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::store::SessionStore;

use super::error::{ApiError, ApiResult};
use super::types::{
    GenerateVideoRequest, GenerateVideoResponse, LearningPath, LearningPathCreate,
    LearningPathUpdate, Lesson, LessonCreate, LessonUpdate, LoginRequest, PreferencesUpdate,
    ProfileUpdate, RegisterRequest, TokenResponse, Topic, TopicCreate, TopicUpdate, UserProfile,
    Video,
};

/// Versioned base path of the REST surface.
const API_V1: &str = "/api/v1";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Callback fired when the backend rejects the credential.
type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// HTTP client for the Lexora backend API.
///
/// Every request attaches the current bearer credential (if one is set).
/// Every response is inspected: a 401 from any endpoint clears the durable
/// session store and fires the unauthorized hook before the error reaches
/// the caller. All other error statuses pass through as [`ApiError`] for
/// local handling.
///
/// The client is cheaply cloneable; clones share the connection pool, the
/// credential slot, and the hook.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Arc<RwLock<Option<String>>>,
    store: SessionStore,
    on_unauthorized: Arc<RwLock<Option<UnauthorizedHook>>>,
}

impl ApiClient {
    /// Creates a new client for the given backend base URL.
    ///
    /// The store handle is used only for the 401 side effect; the session
    /// manager owns all other store writes.
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("failed to create HTTP client"),
            token: Arc::new(RwLock::new(None)),
            store,
            on_unauthorized: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Installs the hook fired on unauthorized detection.
    ///
    /// The composition root wires this to its routing collaborator; the
    /// client itself never navigates.
    pub fn on_unauthorized(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_unauthorized.write() = Some(Arc::new(hook));
    }

    /// Sets the bearer credential attached to subsequent requests.
    pub fn set_token(&self, token: String) {
        *self.token.write() = Some(token);
    }

    /// Clears the bearer credential.
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Returns the current bearer credential, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_V1, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = self.token.read().as_deref() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Inspects a response, applying the global 401 side effect.
    async fn check(&self, response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Credential rejected by backend, clearing session");
            self.clear_token();
            self.store.clear();
            // Clone the hook out so the lock is released before it runs;
            // a hook may itself install a replacement hook.
            let hook = self.on_unauthorized.read().clone();
            if let Some(hook) = hook {
                hook();
            }
        }

        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "PUT");
        let response = self.request(Method::PUT, path).json(body).send().await?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        debug!(path, "DELETE");
        let response = self.request(Method::DELETE, path).send().await?;
        self.check(response).await?;
        Ok(())
    }

    // ==================== Authentication ====================

    /// Registers a new user account. Does not establish a session.
    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<UserProfile> {
        self.post_json("/auth/register", req).await
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// The returned token is not installed automatically; the session
    /// manager decides when to adopt it.
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<TokenResponse> {
        self.post_json("/auth/login", req).await
    }

    /// Fetches the profile of the currently authenticated user.
    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        self.get_json("/users/me").await
    }

    /// Updates the current user's profile, returning the fresh record.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        self.put_json("/users/me", update).await
    }

    /// Updates the current user's preferences, returning the fresh record.
    pub async fn update_preferences(&self, prefs: &PreferencesUpdate) -> ApiResult<UserProfile> {
        self.put_json("/users/me/preferences", prefs).await
    }

    // ==================== Topics ====================

    /// Lists the current user's topics.
    pub async fn list_topics(&self) -> ApiResult<Vec<Topic>> {
        self.get_json("/topics").await
    }

    /// Fetches a single topic.
    pub async fn get_topic(&self, id: i64) -> ApiResult<Topic> {
        self.get_json(&format!("/topics/{id}")).await
    }

    /// Creates a topic.
    pub async fn create_topic(&self, topic: &TopicCreate) -> ApiResult<Topic> {
        self.post_json("/topics", topic).await
    }

    /// Updates a topic.
    pub async fn update_topic(&self, id: i64, update: &TopicUpdate) -> ApiResult<Topic> {
        self.put_json(&format!("/topics/{id}"), update).await
    }

    /// Deletes a topic.
    pub async fn delete_topic(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/topics/{id}")).await
    }

    // ==================== Learning Paths ====================

    /// Lists the learning paths under a topic.
    pub async fn list_learning_paths(&self, topic_id: i64) -> ApiResult<Vec<LearningPath>> {
        self.get_json(&format!("/learning-paths/topic/{topic_id}"))
            .await
    }

    /// Fetches a single learning path.
    pub async fn get_learning_path(&self, id: i64) -> ApiResult<LearningPath> {
        self.get_json(&format!("/learning-paths/{id}")).await
    }

    /// Creates a learning path.
    pub async fn create_learning_path(&self, path: &LearningPathCreate) -> ApiResult<LearningPath> {
        self.post_json("/learning-paths", path).await
    }

    /// Updates a learning path.
    pub async fn update_learning_path(
        &self,
        id: i64,
        update: &LearningPathUpdate,
    ) -> ApiResult<LearningPath> {
        self.put_json(&format!("/learning-paths/{id}"), update).await
    }

    /// Deletes a learning path.
    pub async fn delete_learning_path(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/learning-paths/{id}")).await
    }

    // ==================== Lessons ====================

    /// Lists the lessons in a learning path.
    pub async fn list_lessons(&self, learning_path_id: i64) -> ApiResult<Vec<Lesson>> {
        self.get_json(&format!("/lessons/learning-path/{learning_path_id}"))
            .await
    }

    /// Fetches a single lesson.
    pub async fn get_lesson(&self, id: i64) -> ApiResult<Lesson> {
        self.get_json(&format!("/lessons/{id}")).await
    }

    /// Creates a lesson.
    pub async fn create_lesson(&self, lesson: &LessonCreate) -> ApiResult<Lesson> {
        self.post_json("/lessons", lesson).await
    }

    /// Updates a lesson.
    pub async fn update_lesson(&self, id: i64, update: &LessonUpdate) -> ApiResult<Lesson> {
        self.put_json(&format!("/lessons/{id}"), update).await
    }

    /// Deletes a lesson.
    pub async fn delete_lesson(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/lessons/{id}")).await
    }

    // ==================== Videos ====================

    /// Lists the generated videos for a lesson.
    pub async fn list_videos(&self, lesson_id: i64) -> ApiResult<Vec<Video>> {
        self.get_json(&format!("/videos/lesson/{lesson_id}")).await
    }

    /// Fetches a single video.
    pub async fn get_video(&self, id: i64) -> ApiResult<Video> {
        self.get_json(&format!("/videos/{id}")).await
    }

    /// Starts video generation for a lesson.
    pub async fn generate_video(
        &self,
        req: &GenerateVideoRequest,
    ) -> ApiResult<GenerateVideoResponse> {
        self.post_json("/videos/generate", req).await
    }

    /// Deletes a video.
    pub async fn delete_video(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/videos/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer) -> (ApiClient, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        (ApiClient::new(server.uri(), store), dir)
    }

    #[tokio::test]
    async fn test_bearer_credential_attached_when_set() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .and(header("authorization", "Bearer tok123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 1, "email": "a@b.com"})),
            )
            .mount(&server)
            .await;

        let (client, _dir) = test_client(&server);
        client.set_token("tok123".to_string());

        let user = client.current_user().await.unwrap();
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_non_auth_errors_pass_through() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/topics"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"detail": "title required"})),
            )
            .mount(&server)
            .await;

        let (client, _dir) = test_client(&server);
        let err = client
            .create_topic(&TopicCreate {
                title: String::new(),
                description: None,
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "title required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_401_clears_store_and_fires_hook() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/topics"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, _dir) = test_client(&server);
        client.set_token("stale".to_string());
        client.store.set_token("stale").unwrap();
        client.store.set_user_json(r#"{"id":1,"email":"a@b.com"}"#).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = fired.clone();
            client.on_unauthorized(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        let err = client.list_topics().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert!(client.store.is_empty());
        assert!(client.token().is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hook_may_reinstall_a_hook() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/topics"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (client, _dir) = test_client(&server);

        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = fired.clone();
            let handle = client.clone();
            client.on_unauthorized(move || {
                fired.fetch_add(1, Ordering::SeqCst);
                // Installing a new hook from inside the hook must not
                // deadlock on the hook slot
                handle.on_unauthorized(|| {});
            });
        }

        let _ = client.list_topics().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_returns_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .and(body_json(
                serde_json::json!({"email": "a@b.com", "password": "x"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"access_token": "tok123", "token_type": "bearer"}),
            ))
            .mount(&server)
            .await;

        let (client, _dir) = test_client(&server);
        let token = client
            .login(&LoginRequest {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(token.access_token, "tok123");
        // Login returns the token but does not adopt it
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_resource_crud_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/learning-paths/topic/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 10,
                "title": "Rust in Six Weeks",
                "duration_weeks": 6,
                "topic_id": 4
            }])))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/topics/4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Topic deleted successfully"})),
            )
            .mount(&server)
            .await;

        let (client, _dir) = test_client(&server);
        let paths = client.list_learning_paths(4).await.unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].title, "Rust in Six Weeks");
        assert_eq!(paths[0].duration_weeks, 6);

        client.delete_topic(4).await.unwrap();
    }
}
