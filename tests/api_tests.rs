//! API integration tests
//!
//! These run against a live server (with a reachable database) and are
//! ignored by default. Run with: cargo test -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api";

/// Unique suffix so tests can run repeatedly against the same database
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn register_and_login(client: &Client) -> (String, String) {
    let email = format!("{}@example.com", unique("buyer"));

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "email": email, "password": "secret-password" }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "secret-password" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string();
    (token, email)
}

async fn create_book(client: &Client, title: &str, price: f64, genre_id: Option<&str>) -> Value {
    let mut payload = json!({
        "title": title,
        "writer": "Test Writer",
        "publisher": "Test Publisher",
        "publication_year": 2020,
        "price": price,
        "stock_quantity": 10
    });
    if let Some(id) = genre_id {
        payload["genreId"] = json!(id);
    }

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"].clone()
}

async fn create_genre(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send create genre request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"].clone()
}

#[tokio::test]
#[ignore]
async fn test_register_then_login() {
    let client = Client::new();
    let (token, email) = register_and_login(&client).await;
    assert!(!token.is_empty());

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], email.as_str());
    assert!(body["data"]["password"].is_null(), "password must not leak");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_registration_conflicts() {
    let client = Client::new();
    let email = format!("{}@example.com", unique("dup"));

    for expected in [201, 409] {
        let response = client
            .post(format!("{}/auth/register", BASE_URL))
            .json(&json!({ "email": email, "password": "secret-password" }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[ignore]
async fn test_register_missing_fields_is_bad_request() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "email": format!("{}@example.com", unique("nopw")) }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_wrong_password_is_unauthorized_not_404() {
    let client = Client::new();
    let (_, email) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to send request");

    // Existing email with a wrong password must not leak existence
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_me_without_token_is_unauthorized() {
    let client = Client::new();

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_create_book_without_genre() {
    let client = Client::new();
    let book = create_book(&client, &unique("Loose Leaves"), 9.5, None).await;

    assert!(book["id"].is_string());
    assert!(book["genre"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_unknown_genre_is_not_found() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": unique("Ghost Genre"),
            "publisher": "Test Publisher",
            "publication_year": 2020,
            "price": 5,
            "genreId": "00000000-0000-0000-0000-000000000000"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_title_conflicts() {
    let client = Client::new();
    let title = unique("Twice Told");
    create_book(&client, &title, 7.0, None).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "publisher": "Test Publisher",
            "publication_year": 2020,
            "price": 7
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_create_book_missing_required_fields() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": unique("No Price") }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_pagination_math_and_out_of_range_page() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?limit=3", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let pagination = &body["data"]["pagination"];
    let total = pagination["total"].as_i64().unwrap();
    let total_pages = pagination["totalPages"].as_i64().unwrap();
    assert_eq!(total_pages, (total + 2) / 3);
    assert_eq!(pagination["limit"], 3);

    // A page far past the end returns an empty slice with the same total
    let response = client
        .get(format!("{}/books?limit=3&page={}", BASE_URL, total_pages + 50))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["pagination"]["total"], total);
}

#[tokio::test]
#[ignore]
async fn test_genre_delete_nulls_dependent_books() {
    let client = Client::new();
    let genre = create_genre(&client, &unique("Ephemeral")).await;
    let genre_id = genre["id"].as_str().unwrap();
    let book = create_book(&client, &unique("Orphaned"), 4.0, Some(genre_id)).await;
    let book_id = book["id"].as_str().unwrap();

    let response = client
        .delete(format!("{}/genres/{}", BASE_URL, genre_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["genre_id"].is_null());
    assert!(body["data"]["genre"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_transaction_total_amount() {
    let client = Client::new();
    let (token, _) = register_and_login(&client).await;
    let book_a = create_book(&client, &unique("Total A"), 10.0, None).await;
    let book_b = create_book(&client, &unique("Total B"), 5.0, None).await;

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "items": [
                { "bookId": book_a["id"], "quantity": 2 },
                { "bookId": book_b["id"], "quantity": 1 }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["totalAmount"].as_f64(), Some(25.0));
    assert_eq!(body["data"]["order_items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_transaction_with_unknown_book_persists_nothing() {
    let client = Client::new();
    let (token, _) = register_and_login(&client).await;
    let book = create_book(&client, &unique("Half Order"), 8.0, None).await;

    let before: Value = client
        .get(format!("{}/transactions", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let count_before = before["data"].as_array().unwrap().len();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "items": [
                { "bookId": book["id"], "quantity": 1 },
                { "bookId": "00000000-0000-0000-0000-000000000000", "quantity": 1 }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let after: Value = client
        .get(format!("{}/transactions", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(after["data"].as_array().unwrap().len(), count_before);
}

#[tokio::test]
#[ignore]
async fn test_transaction_empty_items_is_bad_request() {
    let client = Client::new();
    let (token, _) = register_and_login(&client).await;

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "items": [] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_transaction_requires_token() {
    let client = Client::new();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "items": [{ "bookId": "00000000-0000-0000-0000-000000000000", "quantity": 1 }] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_ordered_book_cannot_be_deleted() {
    let client = Client::new();
    let (token, _) = register_and_login(&client).await;
    let book = create_book(&client, &unique("Keeper"), 3.0, None).await;
    let book_id = book["id"].as_str().unwrap();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "items": [{ "bookId": book_id, "quantity": 1 }] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_server_error());

    // The book must still exist
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_statistics_reports_most_and_least_sold() {
    let client = Client::new();
    let (token, _) = register_and_login(&client).await;

    let genre_x = create_genre(&client, &unique("GenreX")).await;
    let genre_y = create_genre(&client, &unique("GenreY")).await;
    let book_x =
        create_book(&client, &unique("X Seller"), 1.0, genre_x["id"].as_str()).await;
    let book_y =
        create_book(&client, &unique("Y Seller"), 1.0, genre_y["id"].as_str()).await;

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "items": [
                { "bookId": book_x["id"], "quantity": 5 },
                { "bookId": book_y["id"], "quantity": 2 }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/transactions/statistics", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body["data"]["totalOrders"].as_i64().unwrap() >= 1);
    assert!(body["data"]["mostSoldGenre"].is_string());
    assert!(body["data"]["leastSoldGenre"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_error_responses_use_the_envelope() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/books/00000000-0000-0000-0000-000000000000",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_genre_names_differing_only_in_case_are_distinct() {
    let client = Client::new();
    let name = unique("CaseGenre");
    create_genre(&client, &name).await;

    // The unique constraint on names is case-sensitive, so the advisory
    // check must not reject a differently-cased name
    let response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({ "name": name.to_lowercase() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_malformed_json_body_uses_the_envelope() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_non_numeric_page_limit_uses_the_envelope() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?limit=lots", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_genres_listed_sorted_by_name() {
    let client = Client::new();

    let response = client
        .get(format!("{}/genres", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let names: Vec<String> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_by_key(|name| name.to_lowercase());
    assert_eq!(names, sorted);
}
