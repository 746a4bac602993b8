use api::Role;
use dioxus::prelude::*;
use ui::{use_session_store, AccessGuard};

use crate::Route;

/// Courses the signed-in student is enrolled in.
#[component]
pub fn MyCourses() -> Element {
    rsx! {
        AccessGuard {
            required_role: Role::Student,
            EnrolledCourses {}
        }
    }
}

#[component]
fn EnrolledCourses() -> Element {
    let store = use_session_store();
    let courses = use_resource(move || {
        let store = store.clone();
        async move { store.client().my_courses().await }
    });

    let body = match &*courses.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load your courses: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p {
                "You are not enrolled in any course yet. "
                Link { to: Route::Courses {}, "Browse courses" }
            }
        },
        Some(Ok(list)) => rsx! {
            ul {
                class: "course-list",
                for course in list.iter() {
                    li {
                        key: "{course.id}",
                        Link { to: Route::CourseDetail { id: course.id }, "{course.title}" }
                        span { class: "course-meta", " {course.chapter_count} chapters" }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "my-courses",
            h1 { "My Courses" }
            {body}
        }
    }
}
