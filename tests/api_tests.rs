//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";
const USER_HEADER: &str = "X-Sharer-User-Id";

/// Helper to create a user and return its id. Emails are salted with a
/// counter so reruns against the same database don't collide.
async fn create_user(client: &Client, name: &str) -> i64 {
    let salt = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "name": name,
            "email": format!("{}-{}@example.com", name, salt)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

/// Helper to create an item owned by `owner_id` and return its id
async fn create_item(client: &Client, owner_id: i64, name: &str, available: bool) -> i64 {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(USER_HEADER, owner_id)
        .json(&json!({
            "name": name,
            "description": format!("{} for sharing", name),
            "available": available
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_user_crud() {
    let client = Client::new();
    let id = create_user(&client, "crud-user").await;

    let response = client
        .get(format!("{}/users/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .patch(format!("{}/users/{}", BASE_URL, id))
        .json(&json!({"name": "renamed"}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "renamed");

    let response = client
        .delete(format!("{}/users/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/users/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_conflict() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({"name": "first", "email": "duplicate@example.com"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({"name": "second", "email": "duplicate@example.com"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_update_item_owner_only() {
    let client = Client::new();
    let owner = create_user(&client, "item-owner").await;
    let other = create_user(&client, "not-the-owner").await;
    let item = create_item(&client, owner, "ladder", true).await;

    // A non-owner is denied
    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item))
        .header(USER_HEADER, other)
        .json(&json!({"name": "x"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Denied even when the patch carries an unusable value; ownership is
    // checked before field contents
    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item))
        .header(USER_HEADER, other)
        .json(&json!({"name": "  "}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // The owner succeeds and the description is untouched
    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item))
        .header(USER_HEADER, owner)
        .json(&json!({"name": "x"}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "x");
    assert_eq!(body["description"], "ladder for sharing");
}

#[tokio::test]
#[ignore]
async fn test_empty_item_patch_rejected() {
    let client = Client::new();
    let owner = create_user(&client, "patcher").await;
    let item = create_item(&client, owner, "tent", true).await;

    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item))
        .header(USER_HEADER, owner)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_on_unavailable_item() {
    let client = Client::new();
    let owner = create_user(&client, "owner-unavail").await;
    let booker = create_user(&client, "booker-unavail").await;
    let item = create_item(&client, owner, "broken drill", false).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker)
        .json(&json!({
            "itemId": item,
            "start": chrono_days_from_now(1),
            "end": chrono_days_from_now(2)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_owner_cannot_book_own_item() {
    let client = Client::new();
    let owner = create_user(&client, "self-booker").await;
    let item = create_item(&client, owner, "bike", true).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, owner)
        .json(&json!({
            "itemId": item,
            "start": chrono_days_from_now(1),
            "end": chrono_days_from_now(2)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_booking_window_validation() {
    let client = Client::new();
    let owner = create_user(&client, "window-owner").await;
    let booker = create_user(&client, "window-booker").await;
    let item = create_item(&client, owner, "kayak", true).await;

    // end before start
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker)
        .json(&json!({
            "itemId": item,
            "start": chrono_days_from_now(2),
            "end": chrono_days_from_now(1)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle_and_comment_gate() {
    let client = Client::new();
    let owner = create_user(&client, "lifecycle-owner").await;
    let booker = create_user(&client, "lifecycle-booker").await;
    let stranger = create_user(&client, "lifecycle-stranger").await;
    let item = create_item(&client, owner, "projector", true).await;

    // Booker books the item for a future window
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header(USER_HEADER, booker)
        .json(&json!({
            "itemId": item,
            "start": chrono_days_from_now(1),
            "end": chrono_days_from_now(2)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "WAITING");
    let booking = body["id"].as_i64().unwrap();

    // A third party can't see the booking
    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking))
        .header(USER_HEADER, stranger)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Owner approves
    let response = client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking))
        .header(USER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "APPROVED");

    // Approving twice fails
    let response = client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking))
        .header(USER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // The booking hasn't ended, so the booker can't comment yet
    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item))
        .header(USER_HEADER, booker)
        .json(&json!({"text": "great projector"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_comment_after_completed_booking() {
    let client = Client::new();
    let owner = create_user(&client, "done-owner").await;
    let booker = create_user(&client, "done-booker").await;
    let item = create_item(&client, owner, "sewing machine", true).await;

    // A booking in the past can't be created over the API, so seed the
    // completed APPROVED booking directly. Needs DATABASE_URL, same as the
    // server under test.
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    let now = chrono::Utc::now();
    sqlx::query(
        "INSERT INTO bookings (start_date, end_date, item_id, booker_id, status) \
         VALUES ($1, $2, $3, $4, 'APPROVED')",
    )
    .bind(now - chrono::Duration::days(3))
    .bind(now - chrono::Duration::days(1))
    .bind(item)
    .bind(booker)
    .execute(&pool)
    .await
    .expect("Failed to seed booking");

    // With the booking over, the booker's comment goes through
    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item))
        .header(USER_HEADER, booker)
        .json(&json!({"text": "worked perfectly"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["text"], "worked perfectly");
    assert_eq!(body["authorName"], "done-booker");

    // And it shows up in the item view
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let comments = body["comments"].as_array().expect("Expected comments array");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "worked perfectly");
}

#[tokio::test]
#[ignore]
async fn test_booking_list_pagination_and_order() {
    let client = Client::new();
    let owner = create_user(&client, "page-owner").await;
    let booker = create_user(&client, "page-booker").await;
    let item = create_item(&client, owner, "camera", true).await;

    for offset in 1..=3 {
        let response = client
            .post(format!("{}/bookings", BASE_URL))
            .header(USER_HEADER, booker)
            .json(&json!({
                "itemId": item,
                "start": chrono_days_from_now(offset * 2),
                "end": chrono_days_from_now(offset * 2 + 1)
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/bookings?state=ALL&from=0&size=2", BASE_URL))
        .header(USER_HEADER, booker)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let bookings = body.as_array().expect("Expected array");
    assert_eq!(bookings.len(), 2);
    // Ordered by start descending
    assert!(bookings[0]["start"].as_str().unwrap() > bookings[1]["start"].as_str().unwrap());
}

#[tokio::test]
#[ignore]
async fn test_unknown_state_filter() {
    let client = Client::new();
    let user = create_user(&client, "state-user").await;

    let response = client
        .get(format!("{}/bookings?state=SOMEDAY", BASE_URL))
        .header(USER_HEADER, user)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Unknown state: SOMEDAY");
}

#[tokio::test]
#[ignore]
async fn test_search_blank_text_returns_empty() {
    let client = Client::new();

    let response = client
        .get(format!("{}/items/search?text=", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("Expected array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_search_is_case_insensitive() {
    let client = Client::new();
    let owner = create_user(&client, "search-owner").await;
    create_item(&client, owner, "Telescope", true).await;

    let response = client
        .get(format!("{}/items/search?text=telesc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body.as_array().expect("Expected array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_request_flow() {
    let client = Client::new();
    let requestor = create_user(&client, "requestor").await;
    let supplier = create_user(&client, "supplier").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header(USER_HEADER, requestor)
        .json(&json!({"description": "looking for a snowboard"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().unwrap();

    // Supplier answers the request with an item
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(USER_HEADER, supplier)
        .json(&json!({
            "name": "snowboard",
            "description": "barely used snowboard",
            "available": true,
            "requestId": request_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // The item shows up on the request
    let response = client
        .get(format!("{}/requests/{}", BASE_URL, request_id))
        .header(USER_HEADER, requestor)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "snowboard");
}

#[tokio::test]
#[ignore]
async fn test_missing_sharer_header() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

/// RFC 3339 timestamp `days` days from now
fn chrono_days_from_now(days: i64) -> String {
    (chrono::Utc::now() + chrono::Duration::days(days)).to_rfc3339()
}
