//! Profile page: view and edit the signed-in user's details.

use api::models::ProfileUpdate;
use dioxus::prelude::*;
use ui::{sync_auth, use_auth, use_session_store, AccessGuard};

#[component]
pub fn Profile() -> Element {
    rsx! {
        AccessGuard {
            ProfileForm {}
        }
    }
}

#[component]
fn ProfileForm() -> Element {
    let mut auth = use_auth();
    let store = use_session_store();

    // The guard only renders this once a user is present
    let initial = auth
        .peek()
        .user
        .as_ref()
        .map(ProfileUpdate::from_user)
        .unwrap_or_default();

    let mut email = use_signal(|| initial.email.clone());
    let mut first_name = use_signal(|| initial.first_name.clone());
    let mut last_name = use_signal(|| initial.last_name.clone());
    let mut bio = use_signal(|| initial.profile.bio.clone());
    let mut status = use_signal(|| Option::<Result<(), String>>::None);
    let mut saving = use_signal(|| false);

    let session = auth();
    let username = session.user.as_ref().map(|u| u.username.clone()).unwrap_or_default();
    let role = session.role().map(|r| r.to_string()).unwrap_or_default();

    let notice = match status() {
        Some(Ok(())) => rsx! { div { class: "form-success", "Profile saved." } },
        Some(Err(message)) => rsx! { div { class: "form-error", "{message}" } },
        None => rsx! {},
    };

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            status.set(None);
            saving.set(true);
            let mut update = ProfileUpdate {
                email: email().trim().to_string(),
                first_name: first_name().trim().to_string(),
                last_name: last_name().trim().to_string(),
                ..Default::default()
            };
            update.profile.bio = bio();

            match store.save_profile(&update).await {
                Ok(_) => {
                    sync_auth(&store, &mut auth);
                    status.set(Some(Ok(())));
                }
                Err(e) => {
                    tracing::error!("Profile update failed: {e}");
                    status.set(Some(Err(format!("Could not save profile: {e}"))));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "profile",
            h1 { "Profile" }
            p { class: "course-meta", "{username} ({role})" }

            {notice}

            form {
                class: "form",
                onsubmit: handle_save,
                label { "Email" }
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                label { "First name" }
                input {
                    value: "{first_name}",
                    oninput: move |e| first_name.set(e.value()),
                }
                label { "Last name" }
                input {
                    value: "{last_name}",
                    oninput: move |e| last_name.set(e.value()),
                }
                label { "Bio" }
                textarea {
                    value: "{bio}",
                    oninput: move |e| bio.set(e.value()),
                }
                button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
            }
        }
    }
}
