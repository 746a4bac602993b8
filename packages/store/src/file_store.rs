//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each session entry as its own file under a base
//! directory. It is used on desktop and mobile platforms so a session survives
//! app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── accessToken
//! ├── refreshToken
//! └── user            # JSON snapshot
//! ```
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/classavo/` |
//! | Linux | `~/.local/share/classavo/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\classavo\` |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        // Keys are flat names; anything that could escape the base is rejected.
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            tracing::warn!(key, "rejecting storage key");
            return None;
        }
        Some(self.base.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "storage read failed: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Some(path) = self.entry_path(key) else {
            return;
        };
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!(path = %self.base.display(), "storage unavailable: {e}");
            return;
        }
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!(path = %path.display(), "storage write failed: {e}");
        }
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.entry_path(key) else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), "storage remove failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::keys;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "classavo_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = temp_dir("persist");

        let store = FileStore::new(dir.clone());
        store.set(keys::ACCESS_TOKEN, "access-1");
        store.set(keys::USER, r#"{"id":1}"#);

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get(keys::ACCESS_TOKEN).as_deref(), Some("access-1"));
        assert_eq!(reopened.get(keys::USER).as_deref(), Some(r#"{"id":1}"#));

        reopened.clear_session();
        assert!(store.get(keys::ACCESS_TOKEN).is_none());
        assert!(store.get(keys::USER).is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_reads_as_empty() {
        let dir = temp_dir("missing");
        let store = FileStore::new(dir);

        assert!(store.get(keys::REFRESH_TOKEN).is_none());
        // Removing an absent entry is not an error
        store.remove(keys::REFRESH_TOKEN);
    }

    #[test]
    fn test_path_like_keys_are_ignored() {
        let dir = temp_dir("escape");
        let store = FileStore::new(dir.clone());

        store.set("../outside", "x");
        assert!(store.get("../outside").is_none());
        assert!(!dir.join("..").join("outside").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
