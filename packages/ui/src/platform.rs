//! Shared session wiring for all platforms.
//!
//! Picks the durable store for the session entries and where the config
//! comes from:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Desktop / Mobile** (native): files under `<data_dir>/classavo/` via [`store::FileStore`]

use std::sync::Arc;

use api::{ApiClient, HttpTransport, Navigator, SessionContext, SessionStore};
use store::LmsConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

/// The session store type every front-end uses.
pub type AppSessionStore = SessionStore<HttpTransport, PlatformStore>;

/// Create the platform-appropriate durable store for session entries.
pub fn make_storage() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::FileStore::new(app_dir())
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn app_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("classavo")
}

/// Client configuration: `lms.toml` next to the session files on native,
/// the compile-time defaults on web.
pub fn load_config() -> LmsConfig {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        LmsConfig::from_build_env()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        LmsConfig::load_or_default(&app_dir())
    }
}

/// Build an empty, uninitialized session store talking to the configured backend.
pub fn make_session_store(config: &LmsConfig, navigator: Arc<dyn Navigator>) -> AppSessionStore {
    let context = Arc::new(SessionContext::new(make_storage()));
    SessionStore::new(ApiClient::from_config(config, context, navigator))
}
