mod chapter_edit;
pub use chapter_edit::{ChapterEdit, NewChapter};

mod courses;
pub use courses::{ChapterDetail, CourseDetail, Courses};

mod dashboard;
pub use dashboard::Dashboard;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod manage_course;
pub use manage_course::ManageCourse;

mod my_courses;
pub use my_courses::MyCourses;

mod profile;
pub use profile::Profile;

mod register;
pub use register::Register;

mod user_detail;
pub use user_detail::UserDetail;
