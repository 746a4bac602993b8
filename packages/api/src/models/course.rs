//! Course, chapter and enrollment resources.
//!
//! These types only carry what the client displays or sends back. Chapter
//! `content` is the rich-text editor's document value and is treated as an
//! opaque JSON value: it is stored, fetched and saved without inspection.

use serde::{Deserialize, Serialize};

/// Minimal user reference embedded in course listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: u64,
    pub username: String,
}

/// A course as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_by: Author,
    pub created_at: String,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub chapter_count: u32,
}

/// Full course detail (`GET /courses/:id/`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_by: super::UserProfile,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub is_enrolled: bool,
}

/// Title and description sent when creating or editing a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
}

/// A chapter as it appears in a course's table of contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterSummary {
    pub id: u64,
    pub title: String,
    pub order: u32,
    #[serde(default)]
    pub is_public: bool,
}

/// Full chapter with its editor document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    pub id: u64,
    pub course: u64,
    pub title: String,
    #[serde(default)]
    pub content: serde_json::Value,
    pub order: u32,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub course_title: String,
}

/// Chapter fields sent on create/update. `content` passes through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterDraft {
    pub course: u64,
    pub title: String,
    pub content: serde_json::Value,
    pub order: u32,
    pub is_public: bool,
}

/// Enrollment record returned by `POST /courses/:id/enroll/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: u64,
    pub course: CourseSummary,
    pub enrolled_at: String,
}

/// A page of results from a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Listings that may or may not be paginated depending on server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paged(page) => page.results,
            Listing::Plain(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_both_shapes() {
        let paged: Listing<ChapterSummary> = serde_json::from_str(
            r#"{"count":1,"next":null,"previous":null,
                "results":[{"id":1,"title":"Intro","order":1,"is_public":true}]}"#,
        )
        .unwrap();
        let plain: Listing<ChapterSummary> =
            serde_json::from_str(r#"[{"id":1,"title":"Intro","order":1}]"#).unwrap();

        assert_eq!(paged.into_items()[0].title, "Intro");
        let plain = plain.into_items();
        assert_eq!(plain.len(), 1);
        assert!(!plain[0].is_public);
    }

    #[test]
    fn test_chapter_content_is_preserved_verbatim() {
        let raw = r#"{"id":2,"course":9,"title":"Loops",
            "content":[{"type":"p","children":[{"text":"for x in xs","bold":true}]}],
            "order":2,"is_public":false,
            "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-02T00:00:00Z",
            "course_title":"Rust"}"#;
        let chapter: Chapter = serde_json::from_str(raw).unwrap();

        let draft = ChapterDraft {
            course: chapter.course,
            title: chapter.title.clone(),
            content: chapter.content.clone(),
            order: chapter.order,
            is_public: chapter.is_public,
        };
        let sent = serde_json::to_value(&draft).unwrap();
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(sent["content"], original["content"]);
    }
}
