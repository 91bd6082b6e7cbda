pub mod controller;
pub mod router;
pub mod service;

pub use router::init_directions_router;
pub use service::DirectionService;
