//! Instructor dashboard: the instructor's own courses.

use api::models::CourseDraft;
use api::Role;
use dioxus::prelude::*;
use ui::{use_auth, use_session_store, AccessGuard};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        AccessGuard {
            required_role: Role::Instructor,
            InstructorCourses {}
        }
    }
}

#[component]
fn InstructorCourses() -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let list_store = store.clone();
    let mut courses = use_resource(move || {
        let store = list_store.clone();
        let instructor_id = auth().user.as_ref().map(|u| u.id);
        async move {
            match instructor_id {
                Some(id) => store.client().instructor_courses(id).await.map(|page| page.results),
                None => Ok(Vec::new()),
            }
        }
    });

    let create_store = store.clone();
    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let store = create_store.clone();
        spawn(async move {
            error.set(None);
            saving.set(true);
            let draft = CourseDraft {
                title: title().trim().to_string(),
                description: description().trim().to_string(),
            };
            match store.client().create_course(&draft).await {
                Ok(course) => {
                    tracing::info!("Created course {} ({})", course.title, course.id);
                    title.set(String::new());
                    description.set(String::new());
                    courses.restart();
                }
                Err(e) => {
                    tracing::error!("Course creation failed: {e}");
                    error.set(Some(format!("Could not create course: {e}")));
                }
            }
            saving.set(false);
        });
    };

    let delete_course = move |id: u64| {
        let store = store.clone();
        spawn(async move {
            match store.client().delete_course(id).await {
                Ok(()) => courses.restart(),
                Err(e) => {
                    tracing::error!("Deleting course {id} failed: {e}");
                    error.set(Some(format!("Could not delete course: {e}")));
                }
            }
        });
    };

    let body = match &*courses.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load courses: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { p { "You have not created any course yet." } },
        Some(Ok(list)) => rsx! {
            ul {
                class: "course-list",
                for course in list.iter() {
                    li {
                        key: "{course.id}",
                        Link { to: Route::CourseDetail { id: course.id }, "{course.title}" }
                        span {
                            class: "course-meta",
                            " {course.student_count} students, {course.chapter_count} chapters "
                        }
                        Link { to: Route::ManageCourse { id: course.id }, "Manage" }
                        button {
                            class: "danger",
                            onclick: {
                                let delete_course = delete_course.clone();
                                let id = course.id;
                                move |_| delete_course(id)
                            },
                            "Delete"
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "dashboard",
            h1 { "Dashboard" }

            if let Some(message) = error() {
                div { class: "form-error", "{message}" }
            }

            form {
                class: "form",
                onsubmit: handle_create,
                h2 { "New course" }
                input {
                    placeholder: "Title",
                    required: true,
                    value: "{title}",
                    oninput: move |e| title.set(e.value()),
                }
                textarea {
                    placeholder: "Description",
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
                button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Creating..." } else { "Create course" }
                }
            }

            h2 { "Your courses" }
            {body}
        }
    }
}
