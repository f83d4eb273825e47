//! Gun Inventory API Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use crate::common::TestApp;

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect()
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect()
}

async fn seed_armory(app: &TestApp) {
    app.seed_gun("AK-47", "Kalashnikov", 2700.0, 36).await;
    app.seed_gun("AKM", "Kalashnikov", 2900.0, 38).await;
    app.seed_gun("Glock 17", "Glock", 500.0, 20).await;
    app.seed_gun("M4A1", "Colt", 3100.0, 33).await;
    app.seed_gun("Desert Eagle", "Magnum Research", 700.0, 54).await;
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_empty_inventory() {
    let app = TestApp::new();

    let response = app.get("/api/v1/guns").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "totalRecords": 0,
            "totalPages": 0,
            "pageSize": 10,
            "currentPage": 1,
            "data": []
        })
    );
}

#[tokio::test]
async fn test_list_second_page() {
    let app = TestApp::new();
    app.seed_random_guns(25).await;

    let response = app.get("/api/v1/guns?page=2&pageSize=10").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalRecords"], 25);
    assert_eq!(response.body["totalPages"], 3);
    assert_eq!(response.body["currentPage"], 2);
    assert_eq!(ids(&response.body), (11..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_list_last_partial_page_and_beyond() {
    let app = TestApp::new();
    app.seed_random_guns(25).await;

    let last = app.get("/api/v1/guns?page=3&pageSize=10").await;
    let beyond = app.get("/api/v1/guns?page=9&pageSize=10").await;

    assert_eq!(ids(&last.body), (21..=25).collect::<Vec<i64>>());
    assert_eq!(beyond.status, StatusCode::OK);
    assert!(ids(&beyond.body).is_empty());
    assert_eq!(beyond.body["totalRecords"], 25);
}

#[test_case("pageSize=1000", 100 ; "clamped to maximum")]
#[test_case("pageSize=0", 10 ; "zero falls back to default")]
#[test_case("pageSize=lots", 10 ; "garbage falls back to default")]
#[test_case("limit=3", 3 ; "limit alias")]
#[tokio::test]
async fn test_page_size_handling(query: &str, expected: u64) {
    let app = TestApp::new();

    let response = app.get(&format!("/api/v1/guns?{}", query)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pageSize"], expected);
}

#[tokio::test]
async fn test_invalid_page_falls_back_to_first() {
    let app = TestApp::new();

    let response = app.get("/api/v1/guns?page=-4").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["currentPage"], 1);
}

#[tokio::test]
async fn test_filter_by_name_is_case_insensitive_substring() {
    let app = TestApp::new();
    seed_armory(&app).await;

    let response = app.get("/api/v1/guns?name=ak").await;

    assert_eq!(names(&response.body), vec!["AK-47", "AKM"]);
    assert_eq!(response.body["totalRecords"], 2);
}

#[tokio::test]
async fn test_combined_filters() {
    let app = TestApp::new();
    seed_armory(&app).await;

    let response = app
        .get("/api/v1/guns?manufacturer=kalash&minPrice=2800&maxDamage=40")
        .await;

    assert_eq!(names(&response.body), vec!["AKM"]);
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() {
    let app = TestApp::new();
    seed_armory(&app).await;

    let response = app
        .get("/api/v1/guns?minPrice=500&maxPrice=700&sort=price")
        .await;

    assert_eq!(names(&response.body), vec!["Glock 17", "Desert Eagle"]);
}

#[tokio::test]
async fn test_sort_by_price_descending() {
    let app = TestApp::new();
    seed_armory(&app).await;

    let response = app.get("/api/v1/guns?sort=price&order=desc").await;

    assert_eq!(
        names(&response.body),
        vec!["M4A1", "AKM", "AK-47", "Desert Eagle", "Glock 17"]
    );
}

#[tokio::test]
async fn test_unknown_order_sorts_ascending() {
    let app = TestApp::new();
    seed_armory(&app).await;

    let response = app.get("/api/v1/guns?sort=damage&order=sideways").await;

    assert_eq!(
        names(&response.body),
        vec!["Glock 17", "M4A1", "AK-47", "AKM", "Desert Eagle"]
    );
}

#[test_case("sort=password" ; "unknown sort field")]
#[test_case("sort=price%3BDROP%20TABLE%20guns" ; "injection in sort")]
#[test_case("minPrice=cheap" ; "non numeric price")]
#[test_case("maxDamage=1.5" ; "fractional damage")]
#[test_case("minPrice=900&maxPrice=100" ; "inverted price range")]
#[test_case("minPrice=NaN" ; "nan price")]
#[test_case("maxPrice=inf" ; "infinite price")]
#[tokio::test]
async fn test_bad_list_parameters_are_rejected(query: &str) {
    let app = TestApp::new();

    let response = app.get(&format!("/api/v1/guns?{}", query)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10002);
}

// ---------------------------------------------------------------------------
// Single gun
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_gun_by_id() {
    let app = TestApp::new();
    let gun = app.seed_gun("M1911", "Colt", 900.0, 30).await;

    let response = app.get(&format!("/api/v1/guns/{}", gun.id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "M1911");
    assert_eq!(response.body["manufacturer"], "Colt");
    assert_eq!(response.body["price"], 900.0);
    assert_eq!(response.body["damage"], 30);
}

#[tokio::test]
async fn test_get_missing_gun() {
    let app = TestApp::new();

    let response = app.get("/api/v1/guns/404").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Gun not found");
}

#[test_case("abc" ; "not a number")]
#[test_case("0" ; "zero")]
#[test_case("-3" ; "negative")]
#[test_case("99999999999999999999" ; "overflow")]
#[tokio::test]
async fn test_invalid_gun_id(raw: &str) {
    let app = TestApp::new();

    let response = app.get(&format!("/api/v1/guns/{}", raw)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid gun ID");
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

fn m4() -> Value {
    json!({ "name": "M4A1", "manufacturer": "Colt", "price": 3100.0, "damage": 33 })
}

#[tokio::test]
async fn test_create_requires_auth() {
    let app = TestApp::new();

    let response = app.post_json("/api/v1/guns", m4()).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_gun() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(Method::POST, "/api/v1/guns", Some(m4()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "M4A1");
    let id = response.body["id"].as_i64().unwrap();

    let fetched = app.get(&format!("/api/v1/guns/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_gun_validation_errors() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/guns",
            Some(json!({ "name": "", "manufacturer": "Colt", "price": -5.0, "damage": 10 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = response.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price"]);
}

#[test_case(Method::POST, json!({ "name": "   ", "manufacturer": "\t", "price": 1.0, "damage": 1 }) ; "create")]
#[test_case(Method::PUT, json!({ "name": " ", "manufacturer": "\n", "price": 1.0, "damage": 1 }) ; "replace")]
#[test_case(Method::PATCH, json!({ "name": "    " }) ; "update")]
#[tokio::test]
async fn test_blank_names_are_rejected(method: Method, body: Value) {
    let app = TestApp::new();
    let token = app.access_token().await;
    let gun = app.seed_gun("Glock 17", "Glock", 500.0, 20).await;
    let uri = if method == Method::POST {
        "/api/v1/guns".to_string()
    } else {
        format!("/api/v1/guns/{}", gun.id)
    };

    let response = app.request(method, &uri, Some(body), Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = response.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    let stored = app.get(&format!("/api/v1/guns/{}", gun.id)).await;
    assert_eq!(stored.body["name"], "Glock 17");
    assert_eq!(app.get("/api/v1/guns").await.body["totalRecords"], 1);
}

#[tokio::test]
async fn test_create_gun_trims_names() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/guns",
            Some(json!({ "name": "  M4A1 ", "manufacturer": "\tColt", "price": 1.0, "damage": 1 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], "M4A1");
    assert_eq!(response.body["manufacturer"], "Colt");
}

#[tokio::test]
async fn test_create_gun_with_wrong_type_is_bad_request() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/guns",
            Some(json!({ "name": "M4A1", "manufacturer": "Colt", "price": "cheap", "damage": 10 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::new();
    let token = app.access_token().await;
    let huge = "x".repeat(1_100_000);

    let response = app
        .request(
            Method::POST,
            "/api/v1/guns",
            Some(json!({ "name": huge, "manufacturer": "Colt", "price": 1.0, "damage": 1 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["code"], 10008);
}

#[tokio::test]
async fn test_replace_gun() {
    let app = TestApp::new();
    let token = app.access_token().await;
    let gun = app.seed_gun("Old", "Nobody", 1.0, 1).await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/guns/{}", gun.id),
            Some(m4()),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], gun.id);
    assert_eq!(response.body["name"], "M4A1");
    assert_eq!(response.body["damage"], 33);
}

#[tokio::test]
async fn test_replace_requires_every_field() {
    let app = TestApp::new();
    let token = app.access_token().await;
    let gun = app.seed_gun("Old", "Nobody", 1.0, 1).await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/guns/{}", gun.id),
            Some(json!({ "name": "Only a name" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace_missing_gun() {
    let app = TestApp::new();
    let token = app.access_token().await;

    let response = app
        .request(Method::PUT, "/api/v1/guns/77", Some(m4()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = TestApp::new();
    let token = app.access_token().await;
    let gun = app.seed_gun("Glock 17", "Glock", 500.0, 20).await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/guns/{}", gun.id),
            Some(json!({ "price": 450.0 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["price"], 450.0);
    assert_eq!(response.body["name"], "Glock 17");
    assert_eq!(response.body["damage"], 20);
}

#[tokio::test]
async fn test_empty_patch_is_rejected() {
    let app = TestApp::new();
    let token = app.access_token().await;
    let gun = app.seed_gun("Glock 17", "Glock", 500.0, 20).await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/guns/{}", gun.id),
            Some(json!({})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No fields to update");
}

#[tokio::test]
async fn test_patch_requires_auth() {
    let app = TestApp::new();
    let gun = app.seed_gun("Glock 17", "Glock", 500.0, 20).await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/guns/{}", gun.id),
            Some(json!({ "price": 1.0 })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_gun() {
    let app = TestApp::new();
    let token = app.access_token().await;
    let gun = app.seed_gun("Glock 17", "Glock", 500.0, 20).await;
    let uri = format!("/api/v1/guns/{}", gun.id);

    let response = app.request(Method::DELETE, &uri, None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);

    let again = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_auth() {
    let app = TestApp::new();
    let gun = app.seed_gun("Glock 17", "Glock", 500.0, 20).await;

    let response = app
        .request(Method::DELETE, &format!("/api/v1/guns/{}", gun.id), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get(&format!("/api/v1/guns/{}", gun.id)).await.status, StatusCode::OK);
}
