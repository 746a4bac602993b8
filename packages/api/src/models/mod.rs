//! Wire models exchanged with the backend.

mod course;
mod user;

pub use course::{
    Author, Chapter, ChapterDraft, ChapterSummary, Course, CourseDraft, CourseSummary,
    Enrollment, Listing, Page,
};
pub use user::{
    AuthResponse, BioUpdate, LoginRequest, ProfileDetails, ProfileUpdate, PublicUser,
    RefreshResponse, RegisterRequest, Role, TokenPair, UserProfile,
};
