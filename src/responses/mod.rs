pub mod cors;
pub mod errors;
pub mod json;

pub use cors::{preflight_response, with_cors};
pub use errors::error_response;
pub use json::json_response;

pub use crate::errors::ResultResp;
