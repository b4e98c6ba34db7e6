pub mod dashboard;
pub mod student;
pub mod uploads;
