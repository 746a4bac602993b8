use dioxus::prelude::*;
use ui::{use_session_store, AccessGuard};

/// Another user's public card. Open to visitors as well.
#[component]
pub fn UserDetail(id: u64) -> Element {
    rsx! {
        AccessGuard {
            require_auth: false,
            PublicProfile { id }
        }
    }
}

#[component]
fn PublicProfile(id: u64) -> Element {
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let store = use_session_store();
    let user = use_resource(move || {
        let store = store.clone();
        let id = id_signal();
        async move { store.client().public_user(id).await }
    });

    let body = match &*user.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load user: {e}" } },
        Some(Ok(user)) => {
            let name = format!("{} {}", user.first_name, user.last_name);
            let name = name.trim();
            let role = user
                .role
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            rsx! {
                div {
                    class: "user-card",
                    h1 { if name.is_empty() { "{user.username}" } else { "{name}" } }
                    p { class: "course-meta", "@{user.username}" }
                    p { "Role: {role}" }
                }
            }
        }
    };

    rsx! {
        {body}
    }
}
