use crate::tests::utils::{ids, TestApp};
use serde_json::json;

#[test]
fn existing_id_returns_the_full_listing() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties/2");

    assert_eq!(status, 200);
    assert_eq!(body["_id"], 2);
    assert_eq!(body["category"], "House");
    assert_eq!(body["squareMeters"], 165.0);
    assert_eq!(body["price"], 7_950_000);
    assert_eq!(body["currency"], "SEK");
    assert_eq!(body["address"]["city"], "Göteborg");
    assert_eq!(body["address"]["streetNumber"], "4");
    assert_eq!(body["realtor"]["name"], "Johan Ek");
    assert_eq!(body["coordinates"]["lat"], 57.6345);
    assert_eq!(body["images"], json!([]));
}

#[test]
fn images_are_returned_in_seed_order() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties/1");

    assert_eq!(
        body["images"],
        json!(["https://img.example.com/1/a.jpg", "https://img.example.com/1/b.jpg"])
    );
}

#[test]
fn unknown_id_is_a_404_with_a_plain_message() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties/999");

    assert_eq!(status, 404);
    assert_eq!(body, json!("Property not found"));
}

#[test]
fn percent_encoded_id_is_decoded_before_lookup() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties/%31");

    assert_eq!(status, 200);
    assert_eq!(body["_id"], 1);
}

#[test]
fn malformed_id_is_a_generic_server_error() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties/not-a-number");

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[test]
fn address_search_matches_the_full_address() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties/search?address=drottninggatan");
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = app.get_json("/properties/search?address=111+36");
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = app.get_json("/properties/search?address=Sysslomansgatan%2020");
    assert_eq!(ids(&body), vec![3]);
}

#[test]
fn address_search_without_a_needle_returns_everything() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties/search");

    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
}
