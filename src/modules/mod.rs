pub mod attendance;
pub mod auth;
pub mod courses;
pub mod directions;
pub mod events;
pub mod grades;
pub mod schedules;
pub mod semesters;
pub mod students;
pub mod users;
