use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::{error, warn};

/// Convert a ServerError into a JSON response.
///
/// Only two fault classes are visible to clients besides the opt-in 400:
/// not found, with a plain message, and a fixed 500.
pub fn error_response(err: ServerError) -> Response {
    let (status, body) = match &err {
        ServerError::NotFound => (404, json!({ "error": "Not Found" })),
        ServerError::PropertyNotFound(_) => (404, json!("Property not found")),
        ServerError::BadRequest(msg) => (400, json!({ "error": msg })),
        ServerError::InvalidId(_) => {
            warn!("{err}");
            internal_error()
        }
        ServerError::DbError(_)
        | ServerError::Json(_)
        | ServerError::Io(_)
        | ServerError::InternalError => {
            error!("{err}");
            internal_error()
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

fn internal_error() -> (u16, serde_json::Value) {
    (500, json!({ "error": "Internal Server Error" }))
}
