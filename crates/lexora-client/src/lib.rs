//! # Lexora Client
//!
//! Client-side session core for the Lexora learning platform.
//!
//! This crate manages the authenticated session of a Lexora client: it
//! acquires and persists the bearer credential, revalidates it on startup,
//! and issues REST calls to the backend for topics, learning paths,
//! lessons, and generated videos.
//!
//! Rendering and routing are external collaborators. The presentation
//! layer reads session state through [`SessionManager`]'s accessors, and
//! the routing layer is driven through the [`Navigator`] seam together
//! with the client's unauthorized hook.
//!
//! ## Modules
//!
//! - [`api`] - HTTP client for the Lexora backend
//! - [`config`] - Client configuration persistence
//! - [`session`] - Auth session state machine
//! - [`store`] - Durable session store (credential + profile)
//!
//! ## Wiring
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lexora_client::{ApiClient, Config, Navigator, SessionManager, SessionStore};
//!
//! let config = Config::load();
//! let store = SessionStore::new(config.session_dir());
//! let client = ApiClient::new(&config.api_url, store.clone());
//!
//! let navigator: Arc<dyn Navigator> = Arc::new(MyRouter::new());
//! {
//!     let navigator = navigator.clone();
//!     client.on_unauthorized(move || navigator.to_login());
//! }
//!
//! let mut session = SessionManager::new(client, store, navigator);
//! session.init().await;
//! ```

pub mod api;
pub mod config;
pub mod session;
pub mod store;

pub use api::{ApiClient, ApiError, ApiResult};
pub use config::Config;
pub use session::{Navigator, SessionError, SessionManager, SessionState};
pub use store::SessionStore;
