//! Chapter create/edit page for instructors.
//!
//! The chapter body is the rich-text editor's document. This page does not
//! interpret it: a loaded document is sent back exactly as fetched unless the
//! author edits its JSON source, in which case the edited JSON is sent.

use api::models::ChapterDraft;
use api::Role;
use dioxus::prelude::*;
use ui::{use_session_store, AccessGuard};

use crate::Route;

#[component]
pub fn NewChapter(course_id: u64) -> Element {
    rsx! {
        AccessGuard {
            required_role: Role::Instructor,
            ChapterEditor { course_id, chapter_id: None }
        }
    }
}

#[component]
pub fn ChapterEdit(course_id: u64, id: u64) -> Element {
    rsx! {
        AccessGuard {
            required_role: Role::Instructor,
            ChapterEditor { course_id, chapter_id: Some(id) }
        }
    }
}

fn document_source(document: &serde_json::Value) -> String {
    serde_json::to_string_pretty(document).unwrap_or_default()
}

#[component]
fn ChapterEditor(course_id: u64, #[props(!optional)] chapter_id: Option<u64>) -> Element {
    let mut chapter_signal = use_signal(|| chapter_id);
    if *chapter_signal.peek() != chapter_id {
        chapter_signal.set(chapter_id);
    }

    let store = use_session_store();
    let nav = use_navigator();
    let mut title = use_signal(String::new);
    let mut order = use_signal(|| "1".to_string());
    let mut is_public = use_signal(|| false);
    // New chapters start with an empty document
    let mut document = use_signal(|| serde_json::json!([]));
    let mut source = use_signal(|| document_source(&serde_json::json!([])));
    let mut source_edited = use_signal(|| false);
    let mut loading = use_signal(|| chapter_id.is_some());
    let mut saving = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let load_store = store.clone();
    let _loader = use_resource(move || {
        let store = load_store.clone();
        let chapter_id = chapter_signal();
        async move {
            let Some(id) = chapter_id else {
                return;
            };
            match store.client().chapter(id).await {
                Ok(chapter) => {
                    title.set(chapter.title);
                    order.set(chapter.order.to_string());
                    is_public.set(chapter.is_public);
                    source.set(document_source(&chapter.content));
                    document.set(chapter.content);
                    source_edited.set(false);
                }
                Err(e) => {
                    tracing::error!("Loading chapter {id} failed: {e}");
                    error.set(Some(format!("Failed to load chapter: {e}")));
                }
            }
            loading.set(false);
        }
    });

    let save_store = store.clone();
    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let store = save_store.clone();
        spawn(async move {
            error.set(None);

            let Ok(order_value) = order().trim().parse::<u32>() else {
                error.set(Some("Order must be a positive number".to_string()));
                return;
            };
            let content = if source_edited() {
                match serde_json::from_str(&source()) {
                    Ok(content) => content,
                    Err(e) => {
                        error.set(Some(format!("Chapter content is not valid JSON: {e}")));
                        return;
                    }
                }
            } else {
                document()
            };
            let draft = ChapterDraft {
                course: course_id,
                title: title().trim().to_string(),
                content,
                order: order_value.max(1),
                is_public: is_public(),
            };

            saving.set(true);
            let result = match chapter_signal() {
                Some(id) => store.client().update_chapter(id, &draft).await,
                None => store.client().create_chapter(&draft).await,
            };
            saving.set(false);

            match result {
                Ok(chapter) => {
                    tracing::info!("Saved chapter {} of course {course_id}", chapter.id);
                    nav.push(Route::ManageCourse { id: course_id });
                }
                Err(e) => {
                    tracing::error!("Saving chapter failed: {e}");
                    error.set(Some(format!("Error saving chapter: {e}")));
                }
            }
        });
    };

    let handle_delete = move |_: MouseEvent| {
        let store = store.clone();
        spawn(async move {
            confirm_delete.set(false);
            let Some(id) = chapter_signal() else {
                return;
            };
            match store.client().delete_chapter(id).await {
                Ok(()) => {
                    nav.push(Route::ManageCourse { id: course_id });
                }
                Err(e) => {
                    tracing::error!("Deleting chapter {id} failed: {e}");
                    error.set(Some(format!("Could not delete chapter: {e}")));
                }
            }
        });
    };

    if loading() {
        return rsx! {
            div { class: "guard-pending", div { class: "spinner" } }
        };
    }

    let is_new = chapter_id.is_none();

    rsx! {
        div {
            class: "chapter-edit",
            Link { to: Route::ManageCourse { id: course_id }, "Back to course management" }
            h1 { if is_new { "Create New Chapter" } else { "Edit Chapter" } }

            if let Some(message) = error() {
                div { class: "form-error", "{message}" }
            }

            form {
                class: "form",
                onsubmit: handle_save,
                label { "Chapter title" }
                input {
                    required: true,
                    value: "{title}",
                    oninput: move |e| title.set(e.value()),
                }
                label { "Order" }
                input {
                    r#type: "number",
                    min: "1",
                    required: true,
                    value: "{order}",
                    oninput: move |e| order.set(e.value()),
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: is_public(),
                        onchange: move |e| is_public.set(e.checked()),
                    }
                    " Make this chapter public (visible to non-enrolled users)"
                }
                label { "Chapter content (editor document, JSON)" }
                textarea {
                    class: "chapter-content",
                    rows: 16,
                    value: "{source}",
                    oninput: move |e| {
                        source.set(e.value());
                        source_edited.set(true);
                    },
                }
                button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save chapter" }
                }
                if !is_new && confirm_delete() {
                    div {
                        class: "confirm",
                        p { "Delete this chapter? This cannot be undone." }
                        button { r#type: "button", class: "danger", onclick: handle_delete, "Delete" }
                        button {
                            r#type: "button",
                            onclick: move |_| confirm_delete.set(false),
                            "Cancel"
                        }
                    }
                } else if !is_new {
                    button {
                        r#type: "button",
                        class: "danger",
                        onclick: move |_| confirm_delete.set(true),
                        "Delete chapter"
                    }
                }
            }
        }
    }
}
