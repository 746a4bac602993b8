use api::Role;
use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};

/// Top bar with the links the current user may follow.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let session = auth();
    let role_link = match session.role() {
        Some(Role::Student) => rsx! {
            Link { to: "/my-courses", "My Courses" }
        },
        Some(Role::Instructor) => rsx! {
            Link { to: "/dashboard", "Dashboard" }
        },
        None => rsx! {},
    };

    rsx! {
        nav {
            class: "navbar",
            Link { class: "navbar-brand", to: "/", "Classavo LMS" }
            Link { to: "/courses", "Courses" }
            if session.is_authenticated() {
                {role_link}
                Link { to: "/profile", "Profile" }
                LogoutButton { class: "navbar-logout" }
            } else if session.has_initialized {
                Link { to: "/auth/login", "Login" }
                Link { to: "/auth/register", "Register" }
            }
            {children}
        }
    }
}
