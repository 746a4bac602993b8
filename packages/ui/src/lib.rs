//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{
    sign_out, store_user, sync_auth, use_auth, use_config, use_session_store, AuthProvider,
    LogoutButton,
};

mod guard;
pub use guard::AccessGuard;

mod navbar;
pub use navbar::Navbar;

mod platform;
pub use platform::{
    load_config, make_session_store, make_storage, AppSessionStore, PlatformStore,
};

mod redirect;
pub use redirect::{AppNavigator, PendingRedirect, RedirectOutlet};
