use crate::tests::utils::{read_json, TestApp};
use http::Method;
use serde_json::json;
use std::io::Read;

#[test]
fn root_lists_the_exposed_routes() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/");

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([
            { "path": "/", "methods": ["GET"] },
            { "path": "/properties", "methods": ["GET"] },
            { "path": "/properties/search", "methods": ["GET"] },
            { "path": "/properties/:id", "methods": ["GET"] }
        ])
    );
}

#[test]
fn unknown_route_is_a_404() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/housing");

    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[test]
fn write_methods_are_not_routed() {
    let app = TestApp::new();

    let resp = app.request(Method::POST, "/properties");

    assert_eq!(resp.status(), 404);
}

#[test]
fn every_response_allows_any_origin() {
    let app = TestApp::new();

    for uri in ["/properties", "/properties/999", "/nowhere"] {
        let resp = app.request(Method::GET, uri);
        assert_eq!(
            resp.headers()
                .get("Access-Control-Allow-Origin")
                .and_then(|v| v.to_str().ok()),
            Some("*"),
            "missing CORS header on {uri}"
        );
    }
}

#[test]
fn json_responses_declare_their_content_type() {
    let app = TestApp::new();

    let resp = app.request(Method::GET, "/properties/1");

    assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");
    assert_eq!(read_json(resp)["_id"], 1);
}

#[test]
fn preflight_is_answered_without_routing() {
    let app = TestApp::new();

    let req = http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/properties")
        .header("Access-Control-Request-Headers", "content-type")
        .body(astra::Body::empty())
        .unwrap();
    let resp = crate::router::serve(req, &app.state);

    assert_eq!(resp.status(), 204);
    let header = |name: &str| resp.headers().get(name).and_then(|v| v.to_str().ok());
    assert_eq!(header("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(header("Access-Control-Allow-Headers"), Some("content-type"));
    assert_eq!(header("Access-Control-Allow-Methods"), Some("GET,HEAD"));
}

#[test]
fn head_is_answered_on_read_routes_without_a_body() {
    let app = TestApp::new();

    let resp = app.request(Method::HEAD, "/properties");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");
    let mut body = Vec::new();
    resp.into_body().reader().read_to_end(&mut body).unwrap();
    assert!(body.is_empty());

    assert_eq!(app.request(Method::HEAD, "/nowhere").status(), 404);
}
