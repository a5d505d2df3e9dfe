//! API middleware components

pub mod error_handling;
pub mod logging;
pub mod security;

pub use error_handling::{error_handling_middleware, handle_panic};
pub use logging::logging_middleware;
pub use security::security_headers_middleware;
