use crate::config::ApiOptions;
use crate::domain::filters::MalformedNumberPolicy;
use crate::tests::utils::{ids, TestApp};
use serde_json::Value;

fn prices(listings: &Value) -> Vec<i64> {
    listings
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_i64().unwrap())
        .collect()
}

#[test]
fn no_filters_returns_every_listing() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties");

    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
}

#[test]
fn price_bounds_are_inclusive() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties?minPrice=5200000&maxPrice=10000000");

    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1, 2, 4]);
    assert!(prices(&body)
        .iter()
        .all(|p| (5_200_000..=10_000_000).contains(p)));
}

#[test]
fn a_single_bound_only_constrains_its_side() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties?minPrice=7950000");
    assert_eq!(ids(&body), vec![1, 2, 5]);

    let (_, body) = app.get_json("/properties?maxPrice=5200000");
    assert_eq!(ids(&body), vec![3, 4]);
}

#[test]
fn square_meter_bounds_filter_by_area() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties?minSquareMeters=100&maxSquareMeters=165");

    assert_eq!(ids(&body), vec![2, 4]);
}

#[test]
fn type_matches_category_substring_case_insensitively() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties?type=APARTMENT");

    assert_eq!(ids(&body), vec![1, 3, 5]);
    for listing in body.as_array().unwrap() {
        let category = listing["category"].as_str().unwrap().to_lowercase();
        assert!(category.contains("apartment"), "unexpected category {category}");
    }
}

#[test]
fn location_matches_city_with_non_ascii_case_folding() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties?location=G%C3%96TEBORG");
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = app.get_json("/properties?location=stock");
    assert_eq!(ids(&body), vec![1, 5]);
}

#[test]
fn combined_filters_select_the_seeded_stockholm_apartment() {
    let app = TestApp::new();

    let (_, body) = app.get_json(
        "/properties?minPrice=5000000&maxPrice=20000000&type=Apartment&location=Stockholm",
    );
    assert_eq!(ids(&body), vec![1]);
    assert_eq!(body[0]["squareMeters"], 90.0);

    let (_, body) = app.get_json("/properties?minPrice=20000001&type=Apartment&location=Stockholm");
    assert!(!ids(&body).contains(&1));
    assert_eq!(ids(&body), vec![5]);
}

#[test]
fn no_match_is_an_empty_array_not_an_error() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties?minPrice=100000000");

    assert_eq!(status, 200);
    assert_eq!(body, Value::Array(vec![]));
}

#[test]
fn pattern_characters_in_text_filters_match_literally() {
    let app = TestApp::new();

    let (_, body) = app.get_json("/properties?type=%25");
    assert!(ids(&body).is_empty());

    let (_, body) = app.get_json("/properties?type=_ouse");
    assert!(ids(&body).is_empty());
}

#[test]
fn malformed_numbers_are_ignored_by_default() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/properties?minPrice=abc&maxPrice=5200000");

    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![3, 4]);
}

#[test]
fn malformed_numbers_are_rejected_when_configured() {
    let app = TestApp::with_options(ApiOptions {
        malformed_numbers: MalformedNumberPolicy::Reject,
        ..Default::default()
    });

    let (status, body) = app.get_json("/properties?minPrice=abc");

    assert_eq!(status, 400);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("minPrice"), "unexpected message {message}");

    let (status, _) = app.get_json("/properties?minPrice=1");
    assert_eq!(status, 200);
}

#[test]
fn envelope_wraps_the_listing_array_when_enabled() {
    let app = TestApp::with_options(ApiOptions {
        list_envelope: true,
        ..Default::default()
    });

    let (status, body) = app.get_json("/properties?type=house");

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Properties retrieved successfully");
    assert_eq!(ids(&body["body"]["housingData"]), vec![2, 4, 5]);
}
