//! Forced navigation from outside the component tree.
//!
//! The request pipeline can end a session in the middle of any backend call,
//! long after the component that started it has rendered. [`AppNavigator`]
//! is the [`api::Navigator`] handed to the pipeline:
//!
//! - **Web**: a full page load via `window.location`, which also drops any
//!   in-memory state belonging to the old session.
//! - **Native**: the route is parked in a signal and [`RedirectOutlet`],
//!   mounted inside the router, replaces the current route with it.

use dioxus::prelude::*;

use crate::auth::{use_auth, use_session_store};

/// Route waiting to be applied by [`RedirectOutlet`].
#[derive(Clone, Copy)]
pub struct PendingRedirect(pub Signal<Option<String>>);

pub struct AppNavigator {
    pending: PendingRedirect,
}

impl AppNavigator {
    pub fn new(pending: PendingRedirect) -> Self {
        Self { pending }
    }
}

impl api::Navigator for AppNavigator {
    fn redirect(&self, route: &str) {
        tracing::info!(route, "forced redirect");
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(route);
                return;
            }
        }
        let mut pending = self.pending.0;
        pending.set(Some(route.to_string()));
    }
}

/// Applies routes parked by [`AppNavigator`]. Mount once inside the router.
#[component]
pub fn RedirectOutlet() -> Element {
    let PendingRedirect(mut pending) = use_context::<PendingRedirect>();
    let mut auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();

    use_effect(move || {
        if let Some(route) = pending() {
            pending.set(None);
            // The session was changed underneath the UI; resync before leaving.
            auth.set(store.session());
            nav.replace(route);
        }
    });

    rsx! {}
}
