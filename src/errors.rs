use astra::Response;
use thiserror::Error;

use crate::domain::filters::FilterError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Property {0} not found")]
    PropertyNotFound(i64),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid property id: {0:?}")]
    InvalidId(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl From<FilterError> for ServerError {
    fn from(e: FilterError) -> Self {
        ServerError::BadRequest(e.to_string())
    }
}
