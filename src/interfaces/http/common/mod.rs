//! Shared HTTP plumbing: error bodies and the validating extractors

pub mod error;
pub mod path;
pub mod validated_json;

pub use error::{error_response, ApiError, ErrorBody};
pub use path::PathParam;
pub use validated_json::ValidatedJson;
