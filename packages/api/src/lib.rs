//! # API crate: session and backend access for the Classavo LMS client
//!
//! Every front-end talks to the backend through this crate. It owns the
//! session (who is signed in and with which credentials), keeps that session
//! alive across access-token expiry, and decides whether a page may open.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`SessionContext`]: the in-memory [`Session`] and its durable copy in a [`store::KeyValueStore`] |
//! | [`transport`] | [`Transport`] trait, request/response types, reqwest-backed [`HttpTransport`] |
//! | [`client`] | [`ApiClient`]: credential attachment and one-shot refresh-on-401 around a transport |
//! | [`auth`] | [`SessionStore`]: login, logout, profile update and startup restore |
//! | [`guard`] | [`decide`]: allow / redirect decision for role-gated pages |
//! | [`navigate`] | [`Navigator`] hook for forced redirects |
//! | [`models`] | Wire types (`UserProfile`, `TokenPair`, courses, chapters) |
//!
//! ## Wiring
//!
//! ```ignore
//! let config = store::LmsConfig::from_build_env();
//! let context = Arc::new(SessionContext::new(storage));
//! let client = ApiClient::from_config(&config, context, navigator);
//! let sessions = SessionStore::new(client);
//! sessions.initialize().await;
//! ```

pub mod auth;
pub mod client;
mod endpoints;
pub mod error;
pub mod guard;
pub mod models;
pub mod navigate;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use auth::{home_route_for, SessionStore};
pub use client::ApiClient;
pub use error::{login_failure_message, ApiError, Result};
pub use guard::{decide, GuardConfig, GuardDecision};
pub use models::{Role, TokenPair, UserProfile};
pub use navigate::{LogNavigator, Navigator};
pub use session::{SavedSession, Session, SessionContext};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
