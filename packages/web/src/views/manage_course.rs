//! Instructor course management: edit details, delete the course, manage chapters.

use api::models::{ChapterSummary, CourseDraft};
use api::Role;
use dioxus::prelude::*;
use ui::{use_session_store, AccessGuard};

use crate::Route;

#[component]
pub fn ManageCourse(id: u64) -> Element {
    rsx! {
        AccessGuard {
            required_role: Role::Instructor,
            CourseManager { id }
        }
    }
}

#[component]
fn CourseManager(id: u64) -> Element {
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let store = use_session_store();
    let nav = use_navigator();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut loaded = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Result<String, String>>::None);
    let mut confirm_course_delete = use_signal(|| false);
    let mut chapter_to_delete = use_signal(|| Option::<ChapterSummary>::None);

    // Load the course into the form fields
    let course_store = store.clone();
    let _loader = use_resource(move || {
        let store = course_store.clone();
        let id = id_signal();
        async move {
            match store.client().course(id).await {
                Ok(course) => {
                    title.set(course.title);
                    description.set(course.description);
                    loaded.set(true);
                }
                Err(e) => {
                    tracing::error!("Loading course {id} failed: {e}");
                    notice.set(Some(Err(format!("Failed to load course: {e}"))));
                }
            }
        }
    });

    let chapter_store = store.clone();
    let mut chapters = use_resource(move || {
        let store = chapter_store.clone();
        let id = id_signal();
        async move { store.client().chapters(id).await }
    });

    let save_store = store.clone();
    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let store = save_store.clone();
        spawn(async move {
            notice.set(None);
            saving.set(true);
            let draft = CourseDraft {
                title: title().trim().to_string(),
                description: description().trim().to_string(),
            };
            match store.client().update_course(id_signal(), &draft).await {
                Ok(course) => {
                    tracing::info!("Updated course {}", course.id);
                    notice.set(Some(Ok("Course updated successfully!".to_string())));
                }
                Err(e) => {
                    tracing::error!("Course update failed: {e}");
                    notice.set(Some(Err(format!("Could not save course: {e}"))));
                }
            }
            saving.set(false);
        });
    };

    let delete_store = store.clone();
    let delete_course = move |_: MouseEvent| {
        let store = delete_store.clone();
        spawn(async move {
            confirm_course_delete.set(false);
            match store.client().delete_course(id_signal()).await {
                Ok(()) => {
                    nav.push(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::error!("Course deletion failed: {e}");
                    notice.set(Some(Err(format!("Could not delete course: {e}"))));
                }
            }
        });
    };

    let delete_chapter = move |_: MouseEvent| {
        let store = store.clone();
        spawn(async move {
            let Some(chapter) = chapter_to_delete() else {
                return;
            };
            chapter_to_delete.set(None);
            match store.client().delete_chapter(chapter.id).await {
                Ok(()) => chapters.restart(),
                Err(e) => {
                    tracing::error!("Deleting chapter {} failed: {e}", chapter.id);
                    notice.set(Some(Err(format!("Could not delete chapter: {e}"))));
                }
            }
        });
    };

    let banner = match notice() {
        Some(Ok(message)) => rsx! { div { class: "form-success", "{message}" } },
        Some(Err(message)) => rsx! { div { class: "form-error", "{message}" } },
        None => rsx! {},
    };

    let chapter_list = match &*chapters.read_unchecked() {
        None => rsx! { div { class: "spinner" } },
        Some(Err(e)) => rsx! { div { class: "form-error", "Failed to load chapters: {e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { "No chapters yet. Add your first chapter to get started!" }
        },
        Some(Ok(list)) => rsx! {
            ul {
                class: "chapter-list",
                for chapter in list.iter() {
                    li {
                        key: "{chapter.id}",
                        span { "{chapter.order}. {chapter.title} " }
                        span {
                            class: "course-meta",
                            if chapter.is_public { "Public" } else { "Private" }
                        }
                        Link {
                            to: Route::ChapterEdit { course_id: id, id: chapter.id },
                            " Edit"
                        }
                        button {
                            class: "danger",
                            onclick: {
                                let chapter = chapter.clone();
                                move |_| chapter_to_delete.set(Some(chapter.clone()))
                            },
                            "Delete"
                        }
                    }
                }
            }
        },
    };

    if !loaded() && notice().is_none() {
        return rsx! {
            div { class: "guard-pending", div { class: "spinner" } }
        };
    }

    rsx! {
        div {
            class: "manage-course",
            Link { to: Route::CourseDetail { id }, "Back to course" }
            h1 { "Manage Course" }
            {banner}

            form {
                class: "form",
                onsubmit: handle_save,
                h2 { "Course details" }
                label { "Course title" }
                input {
                    required: true,
                    value: "{title}",
                    oninput: move |e| title.set(e.value()),
                }
                label { "Course description" }
                textarea {
                    rows: 6,
                    required: true,
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
                button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save changes" }
                }
                if confirm_course_delete() {
                    div {
                        class: "confirm",
                        p { "Delete this course? This cannot be undone." }
                        button { r#type: "button", class: "danger", onclick: delete_course, "Delete" }
                        button {
                            r#type: "button",
                            onclick: move |_| confirm_course_delete.set(false),
                            "Cancel"
                        }
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "danger",
                        onclick: move |_| confirm_course_delete.set(true),
                        "Delete course"
                    }
                }
            }

            h2 { "Chapters" }
            Link { to: Route::NewChapter { course_id: id }, "Add new chapter" }
            {chapter_list}

            if let Some(chapter) = chapter_to_delete() {
                div {
                    class: "confirm",
                    p { "Delete the chapter \"{chapter.title}\"? This cannot be undone." }
                    button { class: "danger", onclick: delete_chapter, "Delete" }
                    button { onclick: move |_| chapter_to_delete.set(None), "Cancel" }
                }
            }
        }
    }
}
