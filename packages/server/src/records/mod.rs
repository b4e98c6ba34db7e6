//! Student record lifecycle: create, read, update and delete, keeping the
//! upload store in step with the attachment paths held by each row.

mod error;
mod service;

pub use error::RecordError;
pub use service::{StudentService, parse_removal_list};
