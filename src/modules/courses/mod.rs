pub mod controller;
pub mod router;
pub mod service;

pub use router::init_courses_router;
pub use service::CourseService;
