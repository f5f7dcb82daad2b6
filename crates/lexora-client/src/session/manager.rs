//! # Session Manager
//!
//! The state machine owning the credential and user profile pair.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{
    ApiClient, LoginRequest, PreferencesUpdate, ProfileUpdate, RegisterRequest, UserProfile,
};
use crate::store::SessionStore;

use super::error::SessionError;

/// The routing collaborator seam.
///
/// The manager signals navigation on logout; the composition root wires
/// the client's unauthorized hook to the same implementation so forced
/// logout and explicit logout land on the same entry point.
pub trait Navigator: Send + Sync {
    /// Navigate to the login entry point.
    fn to_login(&self);
}

/// Machine state, derived from the loading flag and the credential/profile
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Startup revalidation has not finished; consumers must not read
    /// `authenticated` yet.
    Initializing,
    /// No session.
    Unauthenticated,
    /// Credential and profile are both present and confirmed.
    Authenticated,
}

/// The auth session state machine.
///
/// A single instance is owned by the composition root, which calls
/// [`SessionManager::init`] once at startup and hands read access to the
/// presentation layer. All session writes flow through this type, so the
/// credential and profile are always set and cleared as a pair.
pub struct SessionManager {
    client: ApiClient,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    user: Option<UserProfile>,
    loading: bool,
}

impl SessionManager {
    /// Creates the manager in the `Initializing` state.
    ///
    /// No stored state is read until [`SessionManager::init`] runs.
    pub fn new(client: ApiClient, store: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            store,
            navigator,
            user: None,
            loading: true,
        }
    }

    // ==================== Consumer Contract ====================

    /// The current user profile, if a credential is present.
    ///
    /// The credential and the profile live and die as a pair: when the
    /// client evicts the credential out-of-band (a 401 on any in-flight
    /// call), the profile is hidden here even though the manager was not
    /// in that call path, so consumers never render a profile for a
    /// force-terminated session.
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        if self.client.token().is_some() {
            self.user.as_ref()
        } else {
            None
        }
    }

    /// True iff the credential and the profile are both present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.token().is_some() && self.user.is_some()
    }

    /// True only while startup revalidation is in flight. Consumers must
    /// treat the session as undetermined until this turns false.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The derived machine state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Initializing
        } else if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// A handle to the API client, for resource calls issued by consumers.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client.clone()
    }

    // ==================== Lifecycle ====================

    /// Startup revalidation.
    ///
    /// Restores the session from the store if both entries are present,
    /// then confirms the credential against the backend. The stored
    /// profile is adopted optimistically so consumers see no flicker; the
    /// fresh copy replaces it once revalidation succeeds. A half-present
    /// store (credential without profile or vice versa) is cleared rather
    /// than revalidated.
    ///
    /// The loading flag turns false exactly once, at the end, on every
    /// path.
    pub async fn init(&mut self) {
        let stored_token = self.store.token();
        let stored_user = self
            .store
            .user_json()
            .and_then(|json| serde_json::from_str::<UserProfile>(&json).ok());

        match (stored_token, stored_user) {
            (Some(token), Some(user)) => {
                self.client.set_token(token);
                self.user = Some(user);

                match self.client.current_user().await {
                    Ok(fresh) => {
                        debug!(user_id = fresh.id, "Revalidated stored session");
                        self.persist_user(&fresh);
                        self.user = Some(fresh);
                    }
                    Err(e) => {
                        info!(error = %e, "Stored credential no longer valid");
                        self.clear_session();
                    }
                }
            }
            (token, user) => {
                if token.is_some() || user.is_some() {
                    // Half a session in the store; drop it so the pair
                    // stays consistent across runs.
                    warn!("Clearing partial session state from store");
                    self.store.clear();
                }
                debug!("No stored session");
            }
        }

        self.loading = false;
    }

    /// Logs in with email and password.
    ///
    /// On success the credential and the freshly fetched profile are both
    /// in memory and in the store. If the profile fetch fails after the
    /// credential exchange succeeded, the credential is rolled back so no
    /// half-session survives.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let token = match self.client.login(&request).await {
            Ok(response) => response.access_token,
            Err(e) => return Err(SessionError::from_api(e, "Login failed")),
        };

        self.client.set_token(token.clone());
        if let Err(e) = self.store.set_token(&token) {
            warn!(error = %e, "Failed to persist credential");
        }

        match self.client.current_user().await {
            Ok(user) => {
                info!(user_id = user.id, "Logged in");
                self.persist_user(&user);
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                // Credential exchanged but no confirmed profile; roll the
                // credential back out of memory and the store.
                self.clear_session();
                Err(SessionError::from_api(e, "Login failed"))
            }
        }
    }

    /// Registers a new account and immediately logs in with the supplied
    /// credentials.
    ///
    /// The result is the login result; registration success alone never
    /// authenticates the session.
    pub async fn register(&mut self, input: RegisterRequest) -> Result<(), SessionError> {
        let email = input.email.clone();
        let password = input.password.clone();

        if let Err(e) = self.client.register(&input).await {
            return Err(SessionError::from_api(e, "Registration failed"));
        }

        self.login(&email, &password).await
    }

    /// Logs out unconditionally and signals navigation to the login entry
    /// point. Cannot fail.
    pub fn logout(&mut self) {
        info!("Logged out");
        self.clear_session();
        self.navigator.to_login();
    }

    /// Updates the current user's profile.
    ///
    /// Valid only when authenticated; otherwise returns
    /// [`SessionError::NotAuthenticated`] without touching any state.
    pub async fn update_user(&mut self, update: ProfileUpdate) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }

        match self.client.update_profile(&update).await {
            Ok(user) => {
                self.persist_user(&user);
                self.user = Some(user);
                Ok(())
            }
            Err(e) => Err(SessionError::from_api(e, "Update failed")),
        }
    }

    /// Updates the current user's preferences (avatar and voice).
    ///
    /// Same contract as [`SessionManager::update_user`].
    pub async fn update_preferences(
        &mut self,
        prefs: PreferencesUpdate,
    ) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }

        match self.client.update_preferences(&prefs).await {
            Ok(user) => {
                self.persist_user(&user);
                self.user = Some(user);
                Ok(())
            }
            Err(e) => Err(SessionError::from_api(e, "Update failed")),
        }
    }

    // ==================== Internals ====================

    /// Replaces the stored profile wholesale with a fresh copy.
    fn persist_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(e) = self.store.set_user_json(&json) {
                    warn!(error = %e, "Failed to persist profile");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize profile"),
        }
    }

    /// Clears credential and profile together, in memory and in the store.
    fn clear_session(&mut self) {
        self.user = None;
        self.client.clear_token();
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn to_login(&self) {}
    }

    fn manager_without_backend() -> (SessionManager, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let client = ApiClient::new("http://127.0.0.1:1", store.clone());
        (
            SessionManager::new(client, store, Arc::new(NoopNavigator)),
            dir,
        )
    }

    #[test]
    fn test_starts_initializing() {
        let (manager, _dir) = manager_without_backend();
        assert!(manager.is_loading());
        assert_eq!(manager.state(), SessionState::Initializing);
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_update_guard_makes_no_request() {
        // The guard returns before any network call, so the unreachable
        // backend address is never contacted.
        let (mut manager, _dir) = manager_without_backend();
        manager.init().await;

        let err = manager
            .update_preferences(PreferencesUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::NotAuthenticated);

        let err = manager.update_user(ProfileUpdate::default()).await.unwrap_err();
        assert_eq!(err, SessionError::NotAuthenticated);
    }
}
