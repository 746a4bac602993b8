//! Error taxonomy for backend calls.

/// Failure of a backend call, after any transparent recovery has run.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("server responded with HTTP {status}")]
    Status { status: u16, body: String },

    /// The request never produced a response (DNS, connection, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// HTTP status, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// User-visible message for a failed sign-in.
pub fn login_failure_message(error: &ApiError) -> &'static str {
    if error.is_unauthorized() {
        "Invalid username or password"
    } else {
        "Login failed. Please try again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failure_message() {
        let bad_credentials = ApiError::Status {
            status: 401,
            body: String::new(),
        };
        let server_down = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        let offline = ApiError::Network("connection refused".to_string());

        assert_eq!(
            login_failure_message(&bad_credentials),
            "Invalid username or password"
        );
        assert_eq!(
            login_failure_message(&server_down),
            "Login failed. Please try again."
        );
        assert_eq!(
            login_failure_message(&offline),
            "Login failed. Please try again."
        );
    }
}
