//! # User and credential models
//!
//! [`UserProfile`] is the identity the backend returns from `/auth/login/`,
//! `/auth/register/` and `/profile/`. Its wire layout nests the role and bio
//! under `profile`, mirroring the server's user/profile split:
//!
//! ```json
//! { "id": 7, "username": "ada", "email": "ada@example.com",
//!   "first_name": "Ada", "last_name": "Lovelace",
//!   "profile": { "role": "instructor", "bio": "..." } }
//! ```
//!
//! The struct is replaced wholesale on login, session restore and profile
//! update; nothing mutates it in place.

use serde::{Deserialize, Serialize};

/// Account role. Determines which guarded pages a user may open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role and free-form biography attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDetails {
    pub role: Role,
    #[serde(default)]
    pub bio: String,
}

/// The signed-in user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub profile: ProfileDetails,
}

impl UserProfile {
    pub fn role(&self) -> Role {
        self.profile.role
    }

    pub fn bio(&self) -> &str {
        &self.profile.bio
    }

    /// Full name, falling back to the username when both name parts are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Another user's public card (`GET /users/:id/`). The role is flattened here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Option<Role>,
}

/// A freshly issued access/refresh credential pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub access: String,
    pub refresh: String,
}

impl AuthResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(self.access.clone(), self.refresh.clone())
    }
}

/// Payload of `POST /auth/token/refresh/`. `refresh` is present when the
/// server rotates refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Editable fields of the signed-in user's profile (`PUT /profile/`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: BioUpdate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BioUpdate {
    pub bio: String,
}

impl ProfileUpdate {
    /// Start an update from the user's current values.
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile: BioUpdate {
                bio: user.profile.bio.clone(),
            },
        }
    }
}
