//! Login page view with username/password form.

use api::{home_route_for, login_failure_message};
use dioxus::prelude::*;
use ui::{sync_auth, use_auth, use_session_store};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the role's landing page
    let session = auth();
    if session.has_initialized && session.is_authenticated() {
        if let Some(role) = session.role() {
            nav.replace(home_route_for(role));
        }
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);

            let name = username().trim().to_string();
            match store.sign_in(&name, &password()).await {
                Ok(_) => sync_auth(&store, &mut auth),
                Err(e) => {
                    tracing::error!("Sign-in failed: {e}");
                    error.set(Some(login_failure_message(&e).to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",
            h1 { "Login to Classavo LMS" }

            if let Some(message) = error() {
                div { class: "form-error", "{message}" }
            }

            form {
                class: "form",
                onsubmit: handle_login,
                label { "Username" }
                input {
                    r#type: "text",
                    name: "username",
                    required: true,
                    value: "{username}",
                    oninput: move |e| {
                        username.set(e.value());
                        error.set(None);
                    },
                }
                label { "Password" }
                input {
                    r#type: "password",
                    name: "password",
                    required: true,
                    value: "{password}",
                    oninput: move |e| {
                        password.set(e.value());
                        error.set(None);
                    },
                }
                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Login" }
                }
            }

            p {
                "Don't have an account? "
                Link { to: Route::Register {}, "Register here" }
            }
        }
    }
}
