//! # Authenticated request pipeline
//!
//! [`ApiClient`] is the single egress point for backend calls. It decorates a
//! base [`Transport`] with two behaviours:
//!
//! 1. **Attach credential**: the current access token from durable storage is
//!    sent as a bearer header; without one the call goes out anonymously.
//! 2. **Recover on 401**: a rejected credential is exchanged once for a new
//!    one through `POST /auth/token/refresh/`, and the original request is
//!    re-sent a single time with it.
//!
//! ## Per-request states
//!
//! ```text
//! SENT ──non-401──────────────────────────────▶ DONE (response / error as-is)
//!   │
//!   └─401─▶ REFRESHING ──no refresh token──────▶ FAILED (clear, redirect, original 401)
//!                │
//!                ├─refresh rejected / offline──▶ FAILED (clear, redirect, refresh error)
//!                │
//!                └─new access token──▶ RETRY ──▶ DONE (whatever the retry returns)
//! ```
//!
//! The retry is a direct transport call, not a second trip through the
//! pipeline, so a request can refresh at most once and a failing refresh can
//! never recurse. The refresh call itself also goes straight to the transport.
//!
//! ## Concurrent expiry
//!
//! Recoveries are serialised by an async gate. A request that reaches the gate
//! after another one has already swapped in a new access token reuses that
//! token instead of spending the refresh credential again, so a burst of
//! simultaneous 401s costs one refresh call.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::KeyValueStore;

use crate::error::{ApiError, Result};
use crate::models::RefreshResponse;
use crate::navigate::Navigator;
use crate::session::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Token refresh endpoint. Always called through the bare transport.
pub const REFRESH_PATH: &str = "/auth/token/refresh/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Recovery {
    /// A 401 may be recovered by one refresh and one retry.
    RefreshOnce,
    /// A 401 is returned to the caller untouched.
    Never,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh: &'a str,
}

/// Backend client that keeps the session's credentials fresh.
pub struct ApiClient<T, S> {
    transport: T,
    context: Arc<SessionContext<S>>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl<S: KeyValueStore> ApiClient<HttpTransport, S> {
    /// HTTP client for the configured backend.
    pub fn from_config(
        config: &store::LmsConfig,
        context: Arc<SessionContext<S>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(HttpTransport::from_config(config), context, navigator)
            .with_login_route(config.routes.login.clone())
    }
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(
        transport: T,
        context: Arc<SessionContext<S>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            context,
            navigator,
            login_route: store::config::RoutesConfig::default().login,
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Route the client is sent to when the session cannot be recovered.
    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn context(&self) -> &Arc<SessionContext<S>> {
        &self.context
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Send a request, recovering once from an expired access token.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.dispatch(request, Recovery::RefreshOnce).await
    }

    /// Send a request without expiry recovery. Used where a 401 means bad
    /// credentials rather than an expired session (sign-in, registration).
    pub async fn send_without_recovery(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.dispatch(request, Recovery::Never).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        self.send(request).await?.json()
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        self.send(ApiRequest::post(path).with_json(body)?)
            .await?
            .json()
    }

    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        self.send(ApiRequest::put(path).with_json(body)?)
            .await?
            .json()
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }

    async fn dispatch(&self, request: ApiRequest, recovery: Recovery) -> Result<ApiResponse> {
        let sent_with = self.context.access_token();
        let response = self
            .transport
            .send(request.clone().with_bearer(sent_with.clone()))
            .await?;

        if !response.is_unauthorized() || recovery == Recovery::Never {
            return response.into_result();
        }

        tracing::debug!(path = %request.path, "access token rejected, refreshing");
        let rejected = ApiError::Status {
            status: response.status,
            body: response.body,
        };
        let access = self.recover(sent_with.as_deref(), rejected).await?;

        let retried = self
            .transport
            .send(request.with_bearer(Some(access)))
            .await?;
        if retried.is_unauthorized() {
            tracing::warn!("request rejected again after token refresh");
        }
        retried.into_result()
    }

    /// Obtain a usable access token after `stale` was rejected, or end the
    /// session and return the error the caller should see.
    async fn recover(&self, stale: Option<&str>, rejected: ApiError) -> Result<String> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.context.access_token();
        let refresh = self.context.refresh_token();
        match (&current, &refresh) {
            (Some(current), _) if stale != Some(current.as_str()) => {
                tracing::debug!("using access token refreshed by a concurrent request");
                return Ok(current.clone());
            }
            // A concurrent recovery already ended the session and redirected.
            (None, None) if stale.is_some() => {
                tracing::debug!("session ended by a concurrent request");
                return Err(rejected);
            }
            _ => {}
        }

        let Some(refresh) = refresh else {
            tracing::info!("no refresh token stored, ending session");
            self.expire();
            return Err(rejected);
        };

        match self.refresh(&refresh).await {
            Ok(refreshed) => {
                self.context
                    .replace_access_token(&refreshed.access, refreshed.refresh.as_deref());
                tracing::debug!("access token refreshed");
                Ok(refreshed.access)
            }
            Err(e) => {
                tracing::warn!("token refresh failed, ending session: {e}");
                self.expire();
                Err(e)
            }
        }
    }

    /// Exchange the refresh credential directly on the bare transport.
    async fn refresh(&self, refresh: &str) -> Result<RefreshResponse> {
        let request = ApiRequest::post(REFRESH_PATH).with_json(&RefreshBody { refresh })?;
        self.transport.send(request).await?.into_result()?.json()
    }

    fn expire(&self) {
        self.context.clear();
        self.navigator.redirect(&self.login_route);
    }
}
