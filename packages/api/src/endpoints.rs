//! Typed wrappers for the backend's REST endpoints.
//!
//! | Endpoint | Method |
//! |----------|--------|
//! | `POST /auth/login/` | [`login`](ApiClient::login) (no expiry recovery) |
//! | `POST /auth/register/` | [`register`](ApiClient::register) (no expiry recovery) |
//! | `POST /auth/logout/` | [`logout_remote`](ApiClient::logout_remote) |
//! | `GET/PUT /profile/` | [`profile`](ApiClient::profile), [`update_profile`](ApiClient::update_profile) |
//! | `GET /users/:id/` | [`public_user`](ApiClient::public_user) |
//! | `/courses/...` | course listing, detail, CRUD, enroll/unenroll |
//! | `GET /my-courses/` | [`my_courses`](ApiClient::my_courses) |
//! | `/chapters/...` | chapter listing, detail, CRUD |
//!
//! Everything except sign-in and registration goes through the recovering
//! pipeline.

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{
    AuthResponse, Chapter, ChapterDraft, ChapterSummary, Course, CourseDraft, CourseSummary,
    Enrollment, LoginRequest, Page, ProfileUpdate, PublicUser, RegisterRequest, UserProfile,
};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Exchange a username and password for a user and credential pair.
    /// A 401 here means bad credentials, so it is returned as-is.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = ApiRequest::post("/auth/login/").with_json(&body)?;
        self.send_without_recovery(request).await?.json()
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let request = ApiRequest::post("/auth/register/").with_json(request)?;
        self.send_without_recovery(request).await?.json()
    }

    /// Ask the server to invalidate a refresh credential.
    pub async fn logout_remote(&self, refresh: &str) -> Result<()> {
        let request = ApiRequest::post("/auth/logout/")
            .with_json(&serde_json::json!({ "refresh": refresh }))?;
        self.send(request).await.map(|_| ())
    }

    /// The live identity behind the current access credential.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.get_json(ApiRequest::get("/profile/")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.put_json("/profile/", update).await
    }

    pub async fn public_user(&self, id: u64) -> Result<PublicUser> {
        self.get_json(ApiRequest::get(format!("/users/{id}/"))).await
    }

    pub async fn courses(&self, page: u32) -> Result<Page<CourseSummary>> {
        self.get_json(ApiRequest::get("/courses/").with_query("page", page.max(1)))
            .await
    }

    /// Courses created by one instructor.
    pub async fn instructor_courses(&self, instructor_id: u64) -> Result<Page<CourseSummary>> {
        self.get_json(ApiRequest::get("/courses/").with_query("instructor", instructor_id))
            .await
    }

    pub async fn course(&self, id: u64) -> Result<Course> {
        self.get_json(ApiRequest::get(format!("/courses/{id}/"))).await
    }

    pub async fn create_course(&self, draft: &CourseDraft) -> Result<Course> {
        self.post_json("/courses/", draft).await
    }

    pub async fn update_course(&self, id: u64, draft: &CourseDraft) -> Result<Course> {
        self.put_json(&format!("/courses/{id}/"), draft).await
    }

    pub async fn delete_course(&self, id: u64) -> Result<()> {
        self.delete(&format!("/courses/{id}/")).await
    }

    /// Courses the signed-in student is enrolled in.
    pub async fn my_courses(&self) -> Result<Vec<CourseSummary>> {
        self.get_json::<crate::models::Listing<CourseSummary>>(ApiRequest::get("/my-courses/"))
            .await
            .map(crate::models::Listing::into_items)
    }

    pub async fn enroll(&self, course_id: u64) -> Result<Enrollment> {
        self.send(ApiRequest::post(format!("/courses/{course_id}/enroll/")))
            .await?
            .json()
    }

    pub async fn unenroll(&self, course_id: u64) -> Result<()> {
        self.delete(&format!("/courses/{course_id}/unenroll/")).await
    }

    pub async fn chapters(&self, course_id: u64) -> Result<Vec<ChapterSummary>> {
        self.get_json::<crate::models::Listing<ChapterSummary>>(
            ApiRequest::get("/chapters/").with_query("course_id", course_id),
        )
        .await
        .map(crate::models::Listing::into_items)
    }

    pub async fn chapter(&self, id: u64) -> Result<Chapter> {
        self.get_json(ApiRequest::get(format!("/chapters/{id}/"))).await
    }

    pub async fn create_chapter(&self, draft: &ChapterDraft) -> Result<Chapter> {
        self.post_json("/chapters/", draft).await
    }

    pub async fn update_chapter(&self, id: u64, draft: &ChapterDraft) -> Result<Chapter> {
        self.put_json(&format!("/chapters/{id}/"), draft).await
    }

    pub async fn delete_chapter(&self, id: u64) -> Result<()> {
        self.delete(&format!("/chapters/{id}/")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ChapterDraft, CourseDraft, Role};
    use crate::testing::{backend_client, MockBackend};
    use store::KeyValueStore;

    // Editor document in the form serde_json writes it back out.
    const DOCUMENT: &str = r#"[{"children":[{"bold":true,"text":"Hello"},{"text":" world"}],"type":"h1"},{"children":[{"text":""}],"type":"p"}]"#;

    fn draft() -> ChapterDraft {
        ChapterDraft {
            course: 3,
            title: "Ownership".to_string(),
            content: serde_json::from_str(DOCUMENT).unwrap(),
            order: 2,
            is_public: true,
        }
    }

    fn signed_in(backend: &MockBackend) {
        backend.storage.set(store::keys::ACCESS_TOKEN, "fresh");
        backend.storage.set(store::keys::REFRESH_TOKEN, "valid");
    }

    #[tokio::test]
    async fn test_login_bad_credentials_skips_refresh() {
        let backend = MockBackend::new();
        let client = backend_client(&backend);
        backend.storage.set(store::keys::REFRESH_TOKEN, "valid");

        let err = client.login("ada", "wrong").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(backend.requests().len(), 1);
        assert!(backend.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_login_returns_user_and_tokens() {
        let backend = MockBackend::new();
        let client = backend_client(&backend);

        let auth = client.login("ada", "secret").await.unwrap();

        assert_eq!(auth.user.first_name, "Live");
        assert_eq!(auth.user.role(), Role::Student);
        assert_eq!(auth.tokens().access, "fresh");
        assert_eq!(auth.tokens().refresh, "valid");
    }

    #[tokio::test]
    async fn test_course_listing_sends_page_query() {
        let backend = MockBackend::new();
        let client = backend_client(&backend);

        let page = client.courses(0).await.unwrap();

        assert!(page.results.is_empty());
        let requests = backend.requests();
        assert_eq!(requests[0].path, "/courses/");
        assert_eq!(requests[0].query, vec![("page".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn test_create_chapter_sends_document_unchanged() {
        let backend = MockBackend::new();
        signed_in(&backend);
        let client = backend_client(&backend);

        let chapter = client.create_chapter(&draft()).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, reqwest::Method::POST);
        assert_eq!(requests[0].path, "/chapters/");
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(serde_json::to_string(&body["content"]).unwrap(), DOCUMENT);
        assert_eq!(body["course"], 3);
        assert_eq!(chapter.id, 7);
        assert_eq!(serde_json::to_string(&chapter.content).unwrap(), DOCUMENT);
    }

    #[tokio::test]
    async fn test_update_chapter_sends_document_unchanged() {
        let backend = MockBackend::new();
        signed_in(&backend);
        let client = backend_client(&backend);

        let chapter = client.update_chapter(5, &draft()).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, reqwest::Method::PUT);
        assert_eq!(requests[0].path, "/chapters/5/");
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(serde_json::to_string(&body["content"]).unwrap(), DOCUMENT);
        assert_eq!(chapter.id, 5);
        assert_eq!(chapter.order, 2);
        assert!(chapter.is_public);
    }

    #[tokio::test]
    async fn test_update_course_puts_draft() {
        let backend = MockBackend::new();
        signed_in(&backend);
        let client = backend_client(&backend);
        let draft = CourseDraft {
            title: "Advanced Rust".to_string(),
            description: "Lifetimes and traits".to_string(),
        };

        let course = client.update_course(3, &draft).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, reqwest::Method::PUT);
        assert_eq!(requests[0].path, "/courses/3/");
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({ "title": "Advanced Rust", "description": "Lifetimes and traits" }))
        );
        assert_eq!(course.id, 3);
        assert_eq!(course.title, "Advanced Rust");
    }

    #[tokio::test]
    async fn test_delete_chapter_targets_detail_path() {
        let backend = MockBackend::new();
        signed_in(&backend);
        let client = backend_client(&backend);

        client.delete_chapter(5).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, reqwest::Method::DELETE);
        assert_eq!(requests[0].path, "/chapters/5/");
        assert_eq!(requests[0].bearer.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_public_user_has_flat_role() {
        let backend = MockBackend::new();
        signed_in(&backend);
        let client = backend_client(&backend);

        let user = client.public_user(2).await.unwrap();

        assert_eq!(user.username, "grace");
        assert_eq!(user.role, Some(Role::Instructor));
        assert_eq!(backend.requests()[0].path, "/users/2/");
    }
}
