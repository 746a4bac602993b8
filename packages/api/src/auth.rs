//! # Session lifecycle
//!
//! [`SessionStore`] owns the four operations that change who is signed in:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`login`](SessionStore::login) | Store a just-issued user + credential pair. |
//! | [`logout`](SessionStore::logout) | Best-effort server notification, then unconditional local clear and redirect to login. |
//! | [`update_user`](SessionStore::update_user) | Replace the user snapshot only. |
//! | [`initialize`](SessionStore::initialize) | Startup restore: verify a saved session with a live `/profile/` fetch. |
//!
//! The store wraps the [`ApiClient`] so every lifecycle call shares the same
//! [`SessionContext`] the pipeline reads credentials from.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{ProfileUpdate, RegisterRequest, Role, TokenPair, UserProfile};
use crate::session::{Session, SessionContext};
use crate::transport::Transport;

/// Landing route after sign-in for each role.
pub fn home_route_for(role: Role) -> &'static str {
    match role {
        Role::Instructor => "/dashboard",
        Role::Student => "/my-courses",
    }
}

/// Lifecycle operations over the shared session.
pub struct SessionStore<T, S> {
    client: ApiClient<T, S>,
    started: AtomicBool,
}

impl<T: Transport, S: KeyValueStore> SessionStore<T, S> {
    pub fn new(client: ApiClient<T, S>) -> Self {
        Self {
            client,
            started: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &ApiClient<T, S> {
        &self.client
    }

    pub fn context(&self) -> &Arc<SessionContext<S>> {
        self.client.context()
    }

    pub fn session(&self) -> Session {
        self.context().snapshot()
    }

    /// Adopt a user and credential pair issued by sign-in or registration.
    pub fn login(&self, user: UserProfile, tokens: TokenPair) {
        tracing::info!(user_id = user.id, role = %user.role(), "signed in");
        self.context().establish(user, tokens);
    }

    /// End the session. The server is told to invalidate the refresh token
    /// if one is stored; whatever happens there, local state is cleared and
    /// the client is sent to the login route.
    pub async fn logout(&self) {
        if let Some(refresh) = self.context().refresh_token() {
            if let Err(e) = self.client.logout_remote(&refresh).await {
                tracing::warn!("logout notification failed: {e}");
                let context = self.context();
                if context.access_token().is_none() && context.refresh_token().is_none() {
                    // The pipeline already cleared the session and redirected.
                    tracing::info!("signed out");
                    return;
                }
            }
        }

        self.context().clear();
        self.client.navigator().redirect(self.client.login_route());
        tracing::info!("signed out");
    }

    /// Replace the cached user after a profile edit.
    pub fn update_user(&self, user: UserProfile) {
        self.context().replace_user(user);
    }

    /// Restore the saved session, if any, by asking the server who the stored
    /// access token belongs to. The cached user snapshot is never trusted.
    ///
    /// Marks the session initialized when done, in every branch. Calls after
    /// the first are no-ops.
    pub async fn initialize(&self) {
        let context = self.context();
        if context.has_initialized() || self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        match context.saved() {
            None => {
                // Partial leftovers would otherwise be attached to anonymous calls.
                context.clear();
                tracing::debug!("no saved session");
            }
            Some(saved) => match self.client.profile().await {
                Ok(user) => {
                    // The profile fetch may itself have refreshed the access token.
                    let tokens = TokenPair {
                        access: context.access_token().unwrap_or(saved.tokens.access),
                        refresh: context.refresh_token().unwrap_or(saved.tokens.refresh),
                    };
                    tracing::info!(user_id = user.id, "session restored");
                    context.adopt(user, tokens);
                }
                Err(e) => {
                    tracing::warn!("saved session rejected: {e}");
                    context.clear();
                }
            },
        }

        context.mark_initialized();
    }

    /// Sign in with a username and password and adopt the result.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserProfile> {
        let auth = self.client.login(username, password).await?;
        let tokens = auth.tokens();
        self.login(auth.user.clone(), tokens);
        Ok(auth.user)
    }

    /// Register a new account and adopt the issued session.
    pub async fn sign_up(&self, request: &RegisterRequest) -> Result<UserProfile> {
        let auth = self.client.register(request).await?;
        let tokens = auth.tokens();
        self.login(auth.user.clone(), tokens);
        Ok(auth.user)
    }

    /// Save profile edits and replace the cached user with the server's copy.
    pub async fn save_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let user = self.client.update_profile(update).await?;
        self.update_user(user.clone());
        Ok(user)
    }
}
