//! Registration page view.

use api::models::RegisterRequest;
use api::{home_route_for, ApiError, Role};
use dioxus::prelude::*;
use ui::{sync_auth, use_auth, use_session_store};

use crate::Route;

fn register_failure_message(error: &ApiError) -> String {
    match error {
        // Field validation errors come back as a JSON object of messages.
        ApiError::Status { status: 400, body } => format!("Registration failed: {body}"),
        _ => "Registration failed. Please try again.".to_string(),
    }
}

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the role's landing page
    let session = auth();
    if session.has_initialized && session.is_authenticated() {
        if let Some(role) = session.role() {
            nav.replace(home_route_for(role));
        }
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);

            if password() != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            let request = RegisterRequest {
                username: username().trim().to_string(),
                email: email().trim().to_string(),
                password: password(),
                first_name: first_name().trim().to_string(),
                last_name: last_name().trim().to_string(),
                role: role(),
            };

            loading.set(true);
            match store.sign_up(&request).await {
                Ok(_) => sync_auth(&store, &mut auth),
                Err(e) => {
                    tracing::error!("Registration failed: {e}");
                    error.set(Some(register_failure_message(&e)));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "register-container",
            h1 { "Create an account" }

            if let Some(message) = error() {
                div { class: "form-error", "{message}" }
            }

            form {
                class: "form",
                onsubmit: handle_register,
                input {
                    placeholder: "Username",
                    required: true,
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                input {
                    placeholder: "First name",
                    value: "{first_name}",
                    oninput: move |e| first_name.set(e.value()),
                }
                input {
                    placeholder: "Last name",
                    value: "{last_name}",
                    oninput: move |e| last_name.set(e.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    required: true,
                    value: "{confirm_password}",
                    oninput: move |e| confirm_password.set(e.value()),
                }
                select {
                    value: role().as_str(),
                    onchange: move |e| {
                        role.set(if e.value() == "instructor" { Role::Instructor } else { Role::Student });
                    },
                    option { value: "student", "Student" }
                    option { value: "instructor", "Instructor" }
                }
                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Register" }
                }
            }

            p {
                "Already have an account? "
                Link { to: Route::Login {}, "Login here" }
            }
        }
    }
}
