//! # Auth Session
//!
//! The session state machine coordinating login, registration, logout,
//! profile updates, and startup revalidation.
//!
//! ## Components
//!
//! - [`SessionManager`] - the state machine, owned by one composition root
//! - [`SessionState`] - derived machine state
//! - [`Navigator`] - the seam to the routing collaborator
//! - [`SessionError`] - tagged failure returned by mutating operations

mod error;
mod manager;

pub use error::SessionError;
pub use manager::{Navigator, SessionManager, SessionState};
