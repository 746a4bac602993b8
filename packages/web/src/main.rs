use dioxus::prelude::*;

use ui::{AuthProvider, Navbar, RedirectOutlet};
use views::{
    ChapterDetail, ChapterEdit, CourseDetail, Courses, Dashboard, Home, Login, ManageCourse,
    MyCourses, NewChapter, Profile, Register, UserDetail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/auth/login")]
        Login {},
        #[route("/auth/register")]
        Register {},
        #[route("/courses")]
        Courses {},
        #[route("/courses/:id")]
        CourseDetail { id: u64 },
        #[route("/courses/:id/manage")]
        ManageCourse { id: u64 },
        #[route("/courses/:course_id/chapters/new/edit")]
        NewChapter { course_id: u64 },
        #[route("/courses/:course_id/chapters/:id/edit")]
        ChapterEdit { course_id: u64, id: u64 },
        #[route("/courses/:course_id/chapters/:id")]
        ChapterDetail { course_id: u64, id: u64 },
        #[route("/my-courses")]
        MyCourses {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/profile")]
        Profile {},
        #[route("/users/:id")]
        UserDetail { id: u64 },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Header, forced-redirect handling and the routed page.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {}
        RedirectOutlet {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
