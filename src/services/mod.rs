pub mod auth_service;
pub mod probe_service;
pub mod question_service;

pub use probe_service::{CompanionProbe, HttpProbe};
