//! # Durable key-value storage for the client session
//!
//! The session is persisted as three independent string entries (see [`keys`]).
//! All reads and writes go through [`KeyValueStore`], so the same session logic
//! runs against an in-memory map (tests), a directory of files (desktop) or the
//! browser's `localStorage` (web).
//!
//! Backends never surface errors. A read that fails is indistinguishable from a
//! missing entry and a write that fails is logged and dropped, which makes an
//! unavailable storage degrade to "no saved session".

/// Well-known storage keys for the three session entries.
pub mod keys {
    /// Short-lived bearer credential attached to every request.
    pub const ACCESS_TOKEN: &str = "accessToken";
    /// Long-lived credential exchanged for a new access token.
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// JSON snapshot of the signed-in user.
    pub const USER: &str = "user";

    /// Every key owned by the session, in write order.
    pub const ALL: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER];
}

/// String-keyed storage with infallible, last-write-wins semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Remove every session entry.
    fn clear_session(&self) {
        for key in keys::ALL {
            self.remove(key);
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
