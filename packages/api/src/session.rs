//! # Session context: in-memory session plus its durable copy
//!
//! [`SessionContext`] is the single owner of session state. It is created
//! empty at startup and shared (behind an `Rc`/`Arc`) by the request pipeline,
//! the lifecycle [`SessionStore`](crate::auth::SessionStore) and the access
//! guard.
//!
//! Credentials are read from durable storage on every request so that a token
//! written by one call path (a refresh) is immediately seen by all others.
//! The in-memory [`Session`] mirrors storage for the UI and is updated by the
//! same methods that write storage.

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use store::{keys, KeyValueStore};

use crate::models::{TokenPair, UserProfile};

/// Snapshot of the current identity and credentials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Set once the saved session has been checked at startup. Never reset.
    pub has_initialized: bool,
}

impl Session {
    /// Authenticated iff a user and both credentials are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some() && self.refresh_token.is_some()
    }

    pub fn role(&self) -> Option<crate::models::Role> {
        self.user.as_ref().map(UserProfile::role)
    }
}

/// A complete session found in durable storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSession {
    pub tokens: TokenPair,
    pub user: UserProfile,
}

/// Owned session state shared by the pipeline, the lifecycle store and the guard.
pub struct SessionContext<S> {
    storage: S,
    state: Mutex<Session>,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// An empty, uninitialized session backed by `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: Mutex::new(Session::default()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn snapshot(&self) -> Session {
        self.state.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().is_authenticated()
    }

    pub fn has_initialized(&self) -> bool {
        self.state.lock().has_initialized
    }

    /// Current access credential from durable storage.
    pub fn access_token(&self) -> Option<String> {
        non_empty(self.storage.get(keys::ACCESS_TOKEN))
    }

    /// Current refresh credential from durable storage.
    pub fn refresh_token(&self) -> Option<String> {
        non_empty(self.storage.get(keys::REFRESH_TOKEN))
    }

    /// The stored triple, if all three entries exist and the user decodes.
    pub fn saved(&self) -> Option<SavedSession> {
        let access = self.access_token()?;
        let refresh = self.refresh_token()?;
        let user = read_json(&self.storage, keys::USER)?;
        Some(SavedSession {
            tokens: TokenPair { access, refresh },
            user,
        })
    }

    /// Store a new user and credential pair, in storage and in memory.
    pub fn establish(&self, user: UserProfile, tokens: TokenPair) {
        self.storage.set(keys::ACCESS_TOKEN, &tokens.access);
        self.storage.set(keys::REFRESH_TOKEN, &tokens.refresh);
        write_json(&self.storage, keys::USER, &user);

        let mut state = self.state.lock();
        state.user = Some(user);
        state.access_token = Some(tokens.access);
        state.refresh_token = Some(tokens.refresh);
    }

    /// Replace the access credential after a successful refresh. A rotated
    /// refresh credential replaces the stored one too.
    pub fn replace_access_token(&self, access: &str, rotated_refresh: Option<&str>) {
        self.storage.set(keys::ACCESS_TOKEN, access);
        if let Some(refresh) = rotated_refresh {
            self.storage.set(keys::REFRESH_TOKEN, refresh);
        }

        let mut state = self.state.lock();
        if state.access_token.is_some() {
            state.access_token = Some(access.to_string());
        }
        if let Some(refresh) = rotated_refresh {
            if state.refresh_token.is_some() {
                state.refresh_token = Some(refresh.to_string());
            }
        }
    }

    /// Replace the user snapshot only; credentials are untouched.
    pub fn replace_user(&self, user: UserProfile) {
        write_json(&self.storage, keys::USER, &user);
        self.state.lock().user = Some(user);
    }

    /// Adopt a restored session in memory. Storage already holds it.
    pub(crate) fn adopt(&self, user: UserProfile, tokens: TokenPair) {
        write_json(&self.storage, keys::USER, &user);
        let mut state = self.state.lock();
        state.user = Some(user);
        state.access_token = Some(tokens.access);
        state.refresh_token = Some(tokens.refresh);
    }

    /// Drop every credential and the user, in storage and in memory.
    /// `has_initialized` is left as it is.
    pub fn clear(&self) {
        self.storage.clear_session();

        let mut state = self.state.lock();
        state.user = None;
        state.access_token = None;
        state.refresh_token = None;
    }

    /// Record that startup restoration has finished. One-way.
    pub fn mark_initialized(&self) {
        self.state.lock().has_initialized = true;
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn read_json<T: DeserializeOwned>(storage: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "ignoring unreadable stored value: {e}");
            None
        }
    }
}

fn write_json<T: Serialize>(storage: &impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => tracing::warn!(key, "could not serialise value for storage: {e}"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ProfileDetails, Role};
    use store::MemoryStore;

    pub(crate) fn user(id: u64, role: Role) -> UserProfile {
        UserProfile {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            profile: ProfileDetails {
                role,
                bio: String::new(),
            },
        }
    }

    #[test]
    fn test_new_context_is_empty() {
        let context = SessionContext::new(MemoryStore::new());
        let session = context.snapshot();

        assert_eq!(session, Session::default());
        assert!(!session.is_authenticated());
        assert!(!session.has_initialized);
        assert!(context.saved().is_none());
    }

    #[test]
    fn test_establish_writes_all_three_entries() {
        let storage = MemoryStore::new();
        let context = SessionContext::new(storage.clone());

        context.establish(user(1, Role::Student), TokenPair::new("a", "r"));

        assert!(context.is_authenticated());
        assert_eq!(storage.get(keys::ACCESS_TOKEN).as_deref(), Some("a"));
        assert_eq!(storage.get(keys::REFRESH_TOKEN).as_deref(), Some("r"));
        let saved = context.saved().unwrap();
        assert_eq!(saved.user.id, 1);
        assert_eq!(saved.tokens, TokenPair::new("a", "r"));
    }

    #[test]
    fn test_clear_keeps_initialized_flag() {
        let storage = MemoryStore::new();
        let context = SessionContext::new(storage.clone());
        context.establish(user(1, Role::Student), TokenPair::new("a", "r"));
        context.mark_initialized();

        context.clear();

        let session = context.snapshot();
        assert!(!session.is_authenticated());
        assert!(session.access_token.is_none());
        assert!(session.refresh_token.is_none());
        assert!(session.has_initialized);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_replace_user_leaves_credentials() {
        let storage = MemoryStore::new();
        let context = SessionContext::new(storage.clone());
        context.establish(user(1, Role::Student), TokenPair::new("a", "r"));

        let mut edited = user(1, Role::Student);
        edited.first_name = "Edited".to_string();
        context.replace_user(edited);

        let session = context.snapshot();
        assert_eq!(session.user.unwrap().first_name, "Edited");
        assert_eq!(session.access_token.as_deref(), Some("a"));
        assert_eq!(context.saved().unwrap().user.first_name, "Edited");
    }

    #[test]
    fn test_corrupt_user_snapshot_is_no_session() {
        let storage = MemoryStore::new();
        storage.set(keys::ACCESS_TOKEN, "a");
        storage.set(keys::REFRESH_TOKEN, "r");
        storage.set(keys::USER, "{not json");

        let context = SessionContext::new(storage);
        assert!(context.saved().is_none());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let storage = MemoryStore::new();
        storage.set(keys::ACCESS_TOKEN, "");
        let context = SessionContext::new(storage);
        assert!(context.access_token().is_none());
    }
}
