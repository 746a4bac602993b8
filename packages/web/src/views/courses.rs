//! Public course catalogue, course detail and chapter reader.

use api::Role;
use dioxus::prelude::*;
use ui::{use_auth, use_session_store};

use crate::Route;

/// Paged list of all courses. Readable without signing in.
#[component]
pub fn Courses() -> Element {
    let store = use_session_store();
    let mut page = use_signal(|| 1u32);

    let courses = use_resource(move || {
        let store = store.clone();
        let page = page();
        async move { store.client().courses(page).await }
    });

    let body = match &*courses.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load courses: {e}" } },
        Some(Ok(listing)) => {
            let has_previous = listing.previous.is_some();
            let has_next = listing.next.is_some();
            rsx! {
                if listing.results.is_empty() {
                    p { "No courses yet." }
                }
                ul {
                    class: "course-list",
                    for course in listing.results.iter() {
                        li {
                            key: "{course.id}",
                            Link { to: Route::CourseDetail { id: course.id }, "{course.title}" }
                            span {
                                class: "course-meta",
                                " by {course.created_by.username}, {course.student_count} students"
                            }
                        }
                    }
                }
                div {
                    class: "pager",
                    button {
                        disabled: !has_previous,
                        onclick: move |_| page.set(page().saturating_sub(1).max(1)),
                        "Previous"
                    }
                    span { "Page {page}" }
                    button {
                        disabled: !has_next,
                        onclick: move |_| page.set(page() + 1),
                        "Next"
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "courses",
            h1 { "Courses" }
            {body}
        }
    }
}

/// One course with its chapters. Students can enroll or leave from here.
#[component]
pub fn CourseDetail(id: u64) -> Element {
    // Track the route id in a signal so the loaders re-run when it changes
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let auth = use_auth();
    let store = use_session_store();
    let mut error = use_signal(|| Option::<String>::None);

    let course_store = store.clone();
    let mut course = use_resource(move || {
        let store = course_store.clone();
        let id = id_signal();
        async move { store.client().course(id).await }
    });

    let chapter_store = store.clone();
    let chapters = use_resource(move || {
        let store = chapter_store.clone();
        let id = id_signal();
        async move { store.client().chapters(id).await }
    });

    let session = auth();
    let is_student = session.is_authenticated() && session.role() == Some(Role::Student);
    let user_id = session.user.as_ref().map(|u| u.id);

    let toggle_enrollment = move |enrolled: bool| {
        let store = store.clone();
        spawn(async move {
            error.set(None);
            let id = id_signal();
            let result = if enrolled {
                store.client().unenroll(id).await
            } else {
                store.client().enroll(id).await.map(|_| ())
            };
            match result {
                Ok(()) => course.restart(),
                Err(e) => {
                    tracing::error!("Enrollment change failed: {e}");
                    error.set(Some(format!("Could not update enrollment: {e}")));
                }
            }
        });
    };

    let header = match &*course.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load course: {e}" } },
        Some(Ok(course)) => {
            let enrolled = course.is_enrolled;
            let is_owner = session.is_authenticated() && user_id == Some(course.created_by.id);
            let author = course.created_by.display_name();
            rsx! {
                div {
                    class: "course-detail",
                    h1 { "{course.title}" }
                    p {
                        class: "course-meta",
                        "by "
                        Link {
                            to: Route::UserDetail { id: course.created_by.id },
                            "{author}"
                        }
                        ", {course.student_count} students"
                    }

                    if is_owner {
                        Link { to: Route::ManageCourse { id: course.id }, "Manage course" }
                    }
                    p { "{course.description}" }

                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }

                    if is_student {
                        button {
                            onclick: move |_| toggle_enrollment(enrolled),
                            if enrolled { "Leave course" } else { "Enroll" }
                        }
                    }
                }
            }
        }
    };

    let chapter_list = match &*chapters.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load chapters: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { p { "No chapters yet." } },
        Some(Ok(list)) => rsx! {
            ol {
                class: "chapter-list",
                for chapter in list.iter() {
                    li {
                        key: "{chapter.id}",
                        Link {
                            to: Route::ChapterDetail { course_id: id, id: chapter.id },
                            "{chapter.title}"
                        }
                    }
                }
            }
        },
    };

    rsx! {
        {header}
        h2 { "Chapters" }
        {chapter_list}
    }
}

/// Chapter reader. The content document is shown as the backend stores it.
#[component]
pub fn ChapterDetail(course_id: u64, id: u64) -> Element {
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let store = use_session_store();
    let chapter = use_resource(move || {
        let store = store.clone();
        let id = id_signal();
        async move { store.client().chapter(id).await }
    });

    let body = match &*chapter.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load chapter: {e}" } },
        Some(Ok(chapter)) => {
            let content = serde_json::to_string_pretty(&chapter.content).unwrap_or_default();
            rsx! {
                article {
                    class: "chapter",
                    h1 { "{chapter.title}" }
                    p { class: "course-meta", "{chapter.course_title}" }
                    pre { class: "chapter-content", "{content}" }
                }
            }
        }
    };

    rsx! {
        Link { to: Route::CourseDetail { id: course_id }, "Back to course" }
        {body}
    }
}
