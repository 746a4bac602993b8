//! In-memory backend used by the unit tests.
//!
//! [`MockBackend`] answers like the LMS server for the handful of endpoints
//! the session layer touches. Access token `"fresh"` is accepted, refresh token
//! `"valid"` is exchanged for it, everything else is rejected with 401.

use std::sync::Arc;

use parking_lot::Mutex;
use store::MemoryStore;

use crate::client::{ApiClient, REFRESH_PATH};
use crate::error::{ApiError, Result};
use crate::models::{ProfileUpdate, Role, UserProfile};
use crate::navigate::Navigator;
use crate::session::tests::user;
use crate::session::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub(crate) const VALID_ACCESS: &str = "fresh";
pub(crate) const VALID_REFRESH: &str = "valid";

const TOKEN_NOT_VALID: &str =
    r#"{"detail":"Given token not valid for any token type","code":"token_not_valid"}"#;

/// Records every redirect instead of navigating.
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        self.routes.lock().push(route.to_string());
    }
}

struct MockState {
    requests: Vec<ApiRequest>,
    live_user: UserProfile,
    offline: bool,
    reject_all_access: bool,
    rotated_refresh: Option<String>,
    logout_status: Option<u16>,
    logout_offline: bool,
}

#[derive(Clone)]
pub(crate) struct MockBackend {
    pub(crate) storage: MemoryStore,
    pub(crate) navigator: Arc<RecordingNavigator>,
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        let mut live_user = user(1, Role::Student);
        live_user.first_name = "Live".to_string();
        Self {
            storage: MemoryStore::new(),
            navigator: Arc::new(RecordingNavigator::default()),
            state: Arc::new(Mutex::new(MockState {
                requests: Vec::new(),
                live_user,
                offline: false,
                reject_all_access: false,
                rotated_refresh: None,
                logout_status: None,
                logout_offline: false,
            })),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of requests sent to `path`.
    pub(crate) fn count(&self, path: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub(crate) fn set_live_user(&self, user: UserProfile) {
        self.state.lock().live_user = user;
    }

    pub(crate) fn go_offline(&self) {
        self.state.lock().offline = true;
    }

    pub(crate) fn reject_all_access(&self) {
        self.state.lock().reject_all_access = true;
    }

    pub(crate) fn rotate_refresh(&self, token: &str) {
        self.state.lock().rotated_refresh = Some(token.to_string());
    }

    pub(crate) fn fail_logout_with(&self, status: u16) {
        self.state.lock().logout_status = Some(status);
    }

    pub(crate) fn drop_logout(&self) {
        self.state.lock().logout_offline = true;
    }

    fn respond(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());

        if state.offline {
            return Err(ApiError::Network("connection refused".to_string()));
        }

        let body = request.body.clone().unwrap_or(serde_json::Value::Null);
        match request.path.as_str() {
            REFRESH_PATH => {
                if body["refresh"] == VALID_REFRESH {
                    let payload = match &state.rotated_refresh {
                        Some(rotated) => {
                            serde_json::json!({ "access": VALID_ACCESS, "refresh": rotated })
                        }
                        None => serde_json::json!({ "access": VALID_ACCESS }),
                    };
                    Ok(ApiResponse::new(200, payload.to_string()))
                } else {
                    Ok(ApiResponse::new(401, TOKEN_NOT_VALID))
                }
            }
            "/auth/login/" => {
                if body["username"] == "ada" && body["password"] == "secret" {
                    Ok(ApiResponse::new(200, auth_payload(&state.live_user)))
                } else {
                    Ok(ApiResponse::new(
                        401,
                        r#"{"detail":"No active account found with the given credentials"}"#,
                    ))
                }
            }
            "/auth/register/" => {
                let mut registered = state.live_user.clone();
                registered.username = body["username"].as_str().unwrap_or_default().to_string();
                if body["role"] == "instructor" {
                    registered.profile.role = Role::Instructor;
                }
                Ok(ApiResponse::new(201, auth_payload(&registered)))
            }
            "/auth/logout/" if state.logout_offline => {
                Err(ApiError::Network("connection reset".to_string()))
            }
            "/auth/logout/" if state.logout_status.is_some() => Ok(ApiResponse::new(
                state.logout_status.unwrap_or(500),
                r#"{"error":"Token is blacklisted"}"#,
            )),
            path => {
                let authorized = match request.bearer.as_deref() {
                    Some(token) => token == VALID_ACCESS && !state.reject_all_access,
                    None => path == "/courses/",
                };
                if !authorized {
                    return Ok(ApiResponse::new(401, TOKEN_NOT_VALID));
                }
                Ok(match (request.method.as_str(), path) {
                    ("GET", "/profile/") => ApiResponse::new(
                        200,
                        serde_json::to_string(&state.live_user).unwrap_or_default(),
                    ),
                    ("PUT", "/profile/") => {
                        let update: ProfileUpdate =
                            serde_json::from_value(body).map_err(ApiError::Decode)?;
                        let user = &mut state.live_user;
                        user.email = update.email;
                        user.first_name = update.first_name;
                        user.last_name = update.last_name;
                        user.profile.bio = update.profile.bio;
                        ApiResponse::new(200, serde_json::to_string(user).unwrap_or_default())
                    }
                    ("GET", "/users/2/") => ApiResponse::new(
                        200,
                        r#"{"id":2,"username":"grace","first_name":"Grace","last_name":"Hopper","role":"instructor"}"#,
                    ),
                    ("PUT", p) if p.starts_with("/courses/") => {
                        let course = serde_json::json!({
                            "id": trailing_id(p),
                            "title": body["title"],
                            "description": body["description"],
                            "created_by": state.live_user,
                            "created_at": "2024-01-01T00:00:00Z",
                            "updated_at": "2024-01-02T00:00:00Z",
                        });
                        ApiResponse::new(200, course.to_string())
                    }
                    (method @ ("POST" | "PUT"), p) if p.starts_with("/chapters/") => {
                        // Echo the draft back the way the server stores it.
                        let mut chapter = body;
                        let created = method == "POST";
                        chapter["id"] = serde_json::json!(if created { 7 } else { trailing_id(p) });
                        chapter["created_at"] = serde_json::json!("2024-01-01T00:00:00Z");
                        chapter["updated_at"] = serde_json::json!("2024-01-02T00:00:00Z");
                        chapter["course_title"] = serde_json::json!("Intro to Rust");
                        ApiResponse::new(if created { 201 } else { 200 }, chapter.to_string())
                    }
                    (_, "/auth/logout/") => ApiResponse::new(200, r#"{"message":"Logout successful"}"#),
                    (_, "/courses/") => ApiResponse::new(
                        200,
                        r#"{"count":0,"next":null,"previous":null,"results":[]}"#,
                    ),
                    (_, "/my-courses/") => ApiResponse::new(200, "[]"),
                    (_, "/courses/404/") => ApiResponse::new(404, r#"{"detail":"Not found."}"#),
                    _ => ApiResponse::new(200, "{}"),
                })
            }
        }
    }
}

/// The numeric id at the end of a detail path such as `/chapters/5/`.
fn trailing_id(path: &str) -> u64 {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .unwrap_or_default()
}

fn auth_payload(user: &UserProfile) -> String {
    serde_json::json!({
        "user": user,
        "access": VALID_ACCESS,
        "refresh": VALID_REFRESH,
    })
    .to_string()
}

/// Transport handle onto a [`MockBackend`].
pub(crate) struct MockTransport {
    backend: MockBackend,
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        // Let concurrently issued requests interleave like real network calls.
        tokio::task::yield_now().await;
        let response = self.backend.respond(&request);
        tokio::task::yield_now().await;
        response
    }
}

pub(crate) fn backend_client(backend: &MockBackend) -> ApiClient<MockTransport, MemoryStore> {
    let context = Arc::new(SessionContext::new(backend.storage.clone()));
    ApiClient::new(
        MockTransport {
            backend: backend.clone(),
        },
        context,
        backend.navigator.clone(),
    )
}
