pub mod dashboard;
pub mod shared;
pub mod student;

pub use shared::{ApiResponse, ErrorBody};
