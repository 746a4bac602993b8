//! Authentication context and hooks for the UI.

use std::rc::Rc;
use std::sync::Arc;

use api::{Session, UserProfile};
use dioxus::prelude::*;
use store::LmsConfig;

use crate::platform::{load_config, make_session_store, AppSessionStore};
use crate::redirect::{AppNavigator, PendingRedirect};

/// Get the current session snapshot.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// The shared session store; use it for sign-in, logout and API calls.
pub fn use_session_store() -> Rc<AppSessionStore> {
    use_context::<Rc<AppSessionStore>>()
}

pub fn use_config() -> LmsConfig {
    use_context::<LmsConfig>()
}

/// Copy the store's session into the UI signal after a lifecycle call.
pub fn sync_auth(store: &AppSessionStore, auth: &mut Signal<Session>) {
    let session = store.session();
    if *auth.peek() != session {
        auth.set(session);
    }
}

/// Provider component that owns the session for the whole app.
/// Wrap your app with this component to enable authentication.
///
/// The saved session is restored once, on mount. Until that finishes the
/// session reports `has_initialized == false` and guarded pages wait.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let config = use_context_provider(load_config);
    let pending = use_context_provider(|| PendingRedirect(Signal::new(None)));
    let store = use_context_provider(|| {
        let navigator = Arc::new(AppNavigator::new(pending));
        Rc::new(make_session_store(&config, navigator))
    });
    let mut auth = use_context_provider(|| Signal::new(Session::default()));

    // Restore the saved session on mount
    let _ = use_future(move || {
        let store = store.clone();
        async move {
            store.initialize().await;
            sync_auth(&store, &mut auth);
        }
    });

    rsx! {
        {children}
    }
}

/// Sign out through the session store, then resync the UI.
pub async fn sign_out(store: Rc<AppSessionStore>, mut auth: Signal<Session>) {
    store.logout().await;
    sync_auth(&store, &mut auth);
}

/// Replace the cached user (after a profile edit) in the store and the UI.
pub fn store_user(store: &AppSessionStore, auth: &mut Signal<Session>, user: UserProfile) {
    store.update_user(user);
    sync_auth(store, auth);
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let store = store.clone();
        async move {
            busy.set(true);
            sign_out(store, auth).await;
            busy.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
