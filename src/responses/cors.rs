use astra::{Body, Response, ResponseBuilder};
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_LENGTH, VARY,
};
use http::HeaderValue;

const ALLOWED_METHODS: &str = "GET,HEAD";

/// Any origin may read any response.
pub fn with_cors(mut resp: Response) -> Response {
    resp.headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    resp
}

/// Answer to an `OPTIONS` preflight. Echoes the requested headers back.
pub fn preflight_response(requested_headers: Option<&HeaderValue>) -> Response {
    let mut builder = ResponseBuilder::new()
        .status(204)
        .header(ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(VARY, "Access-Control-Request-Headers")
        .header(CONTENT_LENGTH, "0");

    if let Some(headers) = requested_headers {
        builder = builder.header(ACCESS_CONTROL_ALLOW_HEADERS, headers.clone());
    }

    builder
        .body(Body::empty())
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
