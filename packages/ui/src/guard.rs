//! Page-level access gate.

use api::{decide, GuardConfig, GuardDecision, Role};
use dioxus::prelude::*;

use crate::auth::{use_auth, use_config};

/// Renders `children` only when the session satisfies the requirements.
///
/// While the saved session is still being restored a spinner is shown and no
/// redirect happens. Afterwards a signed-out visitor is sent to the login
/// route and a signed-in user with the wrong role to the home route.
#[component]
pub fn AccessGuard(
    #[props(default = true)] require_auth: bool,
    required_role: Option<Role>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let config = use_config();
    let nav = use_navigator();

    let guard = GuardConfig {
        require_auth,
        required_role,
    };
    let decision = decide(&guard, &auth.read());

    match decision {
        GuardDecision::Pending => rsx! {
            div {
                class: "guard-pending",
                div { class: "spinner" }
            }
        },
        GuardDecision::RedirectToLogin => {
            nav.replace(config.routes.login.clone());
            rsx! {}
        }
        GuardDecision::RedirectToHome => {
            nav.replace(config.routes.home.clone());
            rsx! {}
        }
        GuardDecision::Render => rsx! {
            {children}
        },
    }
}
