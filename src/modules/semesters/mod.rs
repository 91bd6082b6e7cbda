pub mod controller;
pub mod router;
pub mod service;

pub use router::init_semesters_router;
pub use service::SemesterService;
