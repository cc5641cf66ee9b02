pub mod error;
pub mod string_ext;

pub use error::{ApiError, ApiResult};
pub use string_ext::{StringExt, truncate_chars};
