pub mod multipart;
pub mod path;
pub mod query;

pub use multipart::AppMultipart;
pub use path::AppPath;
pub use query::AppQuery;
