//! API wire types

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType, Fault};
pub use json::Json;
