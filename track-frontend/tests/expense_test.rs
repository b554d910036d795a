mod common;

use common::{expense, into_parts, TestApp, EMPLOYEE, HR, OTHER_EMPLOYEE};
use reqwest::{multipart, Method, StatusCode};
use serde_json::{json, Value};
use track_core::error::GENERIC_ERROR_MESSAGE;
use track_frontend::services::backend_client::MALFORMED_RESPONSE_MESSAGE;

fn new_expense() -> Value {
    json!({
        "name": "Taxi to client",
        "amount": 450.5,
        "building": "building a",
        "date": "2024-05-02",
        "category": "Travel"
    })
}

fn seed_expenses(app: &TestApp) {
    app.seed(|s| &mut s.expenses, expense(1, "Asha", "Cab to airport", 800.0, "Pending", "Building A", "2024-07-01"));
    app.seed(|s| &mut s.expenses, expense(2, "Ravi", "Team lunch", 1500.0, "Pending", "Building B", "2024-07-02"));
    app.seed(|s| &mut s.expenses, expense(3, "Asha", "Cab home", 300.0, "Approved", "Building A", "2024-07-02"));
}

#[tokio::test]
async fn create_expense_returns_server_record() {
    let app = TestApp::spawn().await;

    let response = app
        .request(Method::POST, "/api/expenses", &EMPLOYEE)
        .json(&new_expense())
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "1");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["building"], "Building A");
    assert_eq!(body["data"]["user"], "Asha");
    assert_eq!(body["notification"]["message"], "Expense added successfully");

    let backend = app.backend.lock().unwrap();
    assert_eq!(backend.expenses.len(), 1);
    assert!(backend.expenses[0].get("chargedTo").is_none());
}

#[tokio::test]
async fn created_expense_appears_without_draft() {
    let app = TestApp::spawn().await;

    app.request(Method::POST, "/api/expenses", &EMPLOYEE)
        .json(&new_expense())
        .send()
        .await
        .unwrap();

    let (status, body) = app.get_json("/api/expenses", &EMPLOYEE).await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "1");
}

#[tokio::test]
async fn employees_only_see_their_own_expenses() {
    let app = TestApp::spawn().await;
    seed_expenses(&app);

    let (_, own) = app.get_json("/api/expenses", &EMPLOYEE).await;
    assert_eq!(own.as_array().unwrap().len(), 2);

    let (_, ravi) = app.get_json("/api/expenses", &OTHER_EMPLOYEE).await;
    assert_eq!(ravi.as_array().unwrap().len(), 1);

    let (_, all) = app.get_json("/api/expenses", &HR).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn list_applies_status_and_search_filters() {
    let app = TestApp::spawn().await;
    seed_expenses(&app);

    let (status, body) = app
        .get_json("/api/expenses?status=pending&search=cab&building=all", &HR)
        .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Cab to airport");
}

#[tokio::test]
async fn invalid_filter_value_is_bad_request() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/api/expenses?status=archived", &HR).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("archived"));
}

#[tokio::test]
async fn unknown_building_is_rejected_before_backend() {
    let app = TestApp::spawn().await;
    let mut body = new_expense();
    body["building"] = json!("Building Z");

    let response = app
        .request(Method::POST, "/api/expenses", &EMPLOYEE)
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.backend.lock().unwrap().expenses.is_empty());
}

#[tokio::test]
async fn zero_amount_fails_validation() {
    let app = TestApp::spawn().await;
    let mut body = new_expense();
    body["amount"] = json!(0);

    let response = app
        .request(Method::POST, "/api/expenses", &EMPLOYEE)
        .json(&body)
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please fill in all required fields");
}

#[tokio::test]
async fn whitespace_name_and_category_fail_validation() {
    let app = TestApp::spawn().await;
    let mut body = new_expense();
    body["name"] = json!("   ");
    body["category"] = json!("  ");

    let response = app
        .request(Method::POST, "/api/expenses", &EMPLOYEE)
        .json(&body)
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please fill in all required fields");
    assert!(app.backend.lock().unwrap().expenses.is_empty());

    let (_, listed) = app.get_json("/api/expenses", &EMPLOYEE).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn upload_forwards_attachments() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new()
        .text("name", "Printer toner")
        .text("amount", "1200")
        .text("building", "Building B")
        .text("date", "2024-04-11")
        .text("category", "Supplies")
        .part(
            "attachments",
            multipart::Part::bytes(b"receipt".to_vec())
                .file_name("receipt.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    let response = app
        .request(Method::POST, "/api/expenses/upload", &EMPLOYEE)
        .multipart(form)
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["attachments"][0]["fileName"], "receipt.pdf");

    let backend = app.backend.lock().unwrap();
    assert_eq!(backend.expenses[0]["category"], "Supplies");
    assert_eq!(backend.expenses[0]["status"], "pending");
}

#[tokio::test]
async fn reviewer_approves_expense_with_charged_to() {
    let app = TestApp::spawn().await;
    seed_expenses(&app);

    let response = app
        .request(Method::PUT, "/api/expenses/1/status", &HR)
        .json(&json!({ "status": "approved", "charged_to": "Operations" }))
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["chargedTo"], "Operations");
    assert_eq!(body["notification"]["message"], "Expense marked as approved");

    let backend = app.backend.lock().unwrap();
    assert_eq!(backend.expenses[0]["status"], "approved");
    assert_eq!(backend.expenses[0]["chargedTo"], "Operations");
}

#[tokio::test]
async fn employee_cannot_change_status() {
    let app = TestApp::spawn().await;
    seed_expenses(&app);

    let response = app
        .request(Method::PUT, "/api/expenses/1/status", &EMPLOYEE)
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.backend.lock().unwrap().expenses[0]["status"], "Pending");
}

#[tokio::test]
async fn status_change_for_unknown_expense_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .request(Method::PUT, "/api/expenses/99/status", &HR)
        .json(&json!({ "status": "rejected" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn backend_json_error_message_is_passed_through() {
    let app = TestApp::spawn().await;
    app.fail_next(
        StatusCode::BAD_REQUEST,
        r#"{"message":"Amount exceeds policy limit"}"#,
    );

    let response = app
        .request(Method::POST, "/api/expenses", &EMPLOYEE)
        .json(&new_expense())
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Amount exceeds policy limit");

    // The draft is dropped with the failed submission
    let (_, listed) = app.get_json("/api/expenses", &EMPLOYEE).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn non_json_backend_error_shows_generic_message() {
    let app = TestApp::spawn().await;
    app.fail_next(StatusCode::INTERNAL_SERVER_ERROR, "<html>Internal Server Error</html>");

    let (status, body) = app.get_json("/api/expenses", &HR).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn malformed_backend_response_is_reported() {
    let app = TestApp::spawn().await;
    app.backend.lock().unwrap().malformed_lists = true;

    let (status, body) = app.get_json("/api/expenses", &HR).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], MALFORMED_RESPONSE_MESSAGE);
}
