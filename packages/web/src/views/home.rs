use api::home_route_for;
use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

/// Landing page.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let session = auth();
    let name = session.user.as_ref().map(|u| u.display_name()).unwrap_or_default();

    rsx! {
        div {
            class: "home",
            h1 { "Classavo LMS" }
            p { "Courses, chapters and enrollments in one place." }

            if let Some(user) = session.user.as_ref().filter(|_| session.is_authenticated()) {
                p { "Welcome back, {name}." }
                Link { to: home_route_for(user.role()), "Continue" }
            } else if session.has_initialized {
                div {
                    class: "home-actions",
                    Link { to: Route::Login {}, "Login" }
                    Link { to: Route::Register {}, "Create an account" }
                }
            }

            Link { to: Route::Courses {}, "Browse courses" }
        }
    }
}
