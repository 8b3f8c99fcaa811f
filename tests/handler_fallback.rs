mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

use common::InMemoryUserRepository;

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::make_server(Arc::new(InMemoryUserRepository::default()));

    let response = server.get("/nowhere").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>(),
        json!({"data": null, "meta": {"status": 404, "message": {"errors": "Page Not Found"}}})
    );
}

#[tokio::test]
async fn test_unknown_api_path_is_not_found_without_token() {
    let server = common::make_server(Arc::new(InMemoryUserRepository::default()));

    let response = server.get("/api/v1/accounts").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["meta"]["status"], 404);
}

#[tokio::test]
async fn test_wrong_method_is_method_not_allowed() {
    let server = common::make_server(Arc::new(InMemoryUserRepository::default()));

    let response = server.post("/health").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.json::<Value>(),
        json!({"data": null, "meta": {"status": 405, "message": {"errors": "Method Not Allowed"}}})
    );
}

#[tokio::test]
async fn test_wrong_method_on_user_route() {
    let server = common::make_server(Arc::new(InMemoryUserRepository::default()));

    let response = server
        .patch("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
