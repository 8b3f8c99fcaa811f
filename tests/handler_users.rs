mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

use common::InMemoryUserRepository;

fn seeded(count: i64) -> Arc<InMemoryUserRepository> {
    let repo = Arc::new(InMemoryUserRepository::default());
    repo.seed(count);
    repo
}

// ─── INDEX ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_index_plain_list() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"][0]["id"], 1);
    assert_eq!(json["data"][0]["full_name"], "User 1");
    assert_eq!(json["meta"], json!({"status": 201, "message": "Success"}));
    assert!(json.get("current_page").is_none());
}

#[tokio::test]
async fn test_index_plain_list_empty() {
    let server = common::make_server(seeded(0));

    let response = server
        .get("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["data"], json!([]));
}

#[tokio::test]
async fn test_index_plain_list_respects_page_window() {
    let server = common::make_server(seeded(25));

    let response = server
        .get("/api/v1/users?page=3&per_page=10")
        .add_header("Authorization", common::bearer())
        .await;

    let json = response.json::<Value>();
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["id"], 21);
}

#[tokio::test]
async fn test_index_standard_middle_page() {
    let server = common::make_server(seeded(25));

    let response = server
        .get("/api/v1/users?page=2&per_page=10&paginate=1")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["data"][0]["id"], 11);
    assert_eq!(json["meta"]["status"], 201);
    assert_eq!(json["meta"]["message"], "Success");
    assert_eq!(
        json["meta"]["pagination"],
        json!({
            "current_page": 2,
            "total_pages": 3,
            "per_page": 10,
            "total": 25,
            "count": 10,
            "links": {
                "next": "http://localhost:3000/api/v1/users?page=3&per_page=10&paginate=1",
                "prev": "http://localhost:3000/api/v1/users?page=1&per_page=10&paginate=1"
            }
        })
    );
}

#[tokio::test]
async fn test_index_standard_last_page_has_no_next() {
    let server = common::make_server(seeded(25));

    let response = server
        .get("/api/v1/users?page=3&per_page=10&paginate=1")
        .add_header("Authorization", common::bearer())
        .await;

    let json = response.json::<Value>();
    let pagination = &json["meta"]["pagination"];
    assert_eq!(pagination["count"], 5);
    assert!(pagination["links"].get("next").is_none());
    assert_eq!(
        pagination["links"]["prev"],
        "http://localhost:3000/api/v1/users?page=2&per_page=10&paginate=1"
    );
}

#[tokio::test]
async fn test_index_standard_page_out_of_range_has_no_links() {
    let server = common::make_server(seeded(25));

    let response = server
        .get("/api/v1/users?page=9&paginate=1")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["meta"]["pagination"]["links"], json!({}));
}

#[tokio::test]
async fn test_index_vue_envelope() {
    let server = common::make_server(seeded(25));

    let response = server
        .get("/api/v1/users?paginate=1&vue=1&page=2&sort=asc")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["meta"], json!({"status": 201, "message": "Success"}));
    assert_eq!(json["current_page"], 2);
    assert_eq!(json["from"], 11);
    assert_eq!(json["to"], 20);
    assert_eq!(json["last_page"], 3);
    assert_eq!(json["per_page"], 10);
    assert_eq!(json["total"], 25);
    assert_eq!(json["path"], "http://localhost:3000/api/v1/users");
    assert_eq!(
        json["next_page_url"],
        "http://localhost:3000/api/v1/users?page=3&paginate=1&vue=1&sort=asc"
    );
    assert_eq!(
        json["prev_page_url"],
        "http://localhost:3000/api/v1/users?page=1&paginate=1&vue=1&sort=asc"
    );
}

#[tokio::test]
async fn test_index_vue_first_page_prev_is_null() {
    let server = common::make_server(seeded(5));

    let response = server
        .get("/api/v1/users?paginate=1&vue=1")
        .add_header("Authorization", common::bearer())
        .await;

    let json = response.json::<Value>();
    assert_eq!(json["from"], 1);
    assert_eq!(json["to"], 10);
    assert_eq!(json["last_page"], 1);
    assert!(json["prev_page_url"].is_null());
    assert!(json["next_page_url"].is_null());
}

#[tokio::test]
async fn test_index_vue_without_paginate_is_plain() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users?vue=1")
        .add_header("Authorization", common::bearer())
        .await;

    let json = response.json::<Value>();
    assert!(json.get("current_page").is_none());
    assert!(json["meta"].get("pagination").is_none());
}

#[tokio::test]
async fn test_index_invalid_page() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users?page=0")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert!(json["data"].is_null());
    assert_eq!(json["meta"]["status"], 400);
    assert!(json["meta"]["message"]["errors"].is_string());
}

#[tokio::test]
async fn test_index_huge_page_values_rejected() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users?page=4294967295&per_page=4294967295&paginate=1")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert!(json["data"].is_null());
    assert_eq!(json["meta"]["status"], 400);
}

#[tokio::test]
async fn test_index_huge_page_with_max_per_page() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users?page=4294967295&per_page=1000&paginate=1")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["meta"]["pagination"]["links"], json!({}));
}

#[tokio::test]
async fn test_index_per_page_above_max_rejected() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users?per_page=1001")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_bad_request();
    assert!(
        response.json::<Value>()["meta"]["message"]["errors"]
            .as_str()
            .unwrap()
            .contains("per_page")
    );
}

#[tokio::test]
async fn test_index_repository_failure_is_500() {
    let server = common::make_server(Arc::new(InMemoryUserRepository::unavailable()));

    let response = server
        .get("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<Value>();
    assert_eq!(json["meta"]["status"], 500);
    assert_eq!(json["meta"]["message"]["errors"], "connection refused");
}

// ─── SHOW ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_show_user() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users/2")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], 2);
    assert_eq!(json["data"]["email"], "user2@example.com");
    assert!(json["data"]["created_at"].is_string());
    assert_eq!(json["meta"], json!({"status": 201, "message": "Success"}));
}

#[tokio::test]
async fn test_show_user_not_found() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users/99")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_not_found();

    let json = response.json::<Value>();
    assert_eq!(
        json,
        json!({
            "data": null,
            "meta": {"status": 404, "message": {"errors": "Page Not Found"}}
        })
    );
}

#[tokio::test]
async fn test_show_user_non_numeric_id() {
    let server = common::make_server(seeded(3));

    let response = server
        .get("/api/v1/users/abc")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["meta"]["status"], 400);
}

#[tokio::test]
async fn test_response_is_json() {
    let server = common::make_server(seeded(1));

    let response = server
        .get("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .await;

    let content_type = response.header("content-type");
    assert_eq!(content_type.to_str().unwrap(), "application/json");
}

// ─── STORE ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_store_user() {
    let repo = seeded(2);
    let server = common::make_server(repo.clone());

    let response = server
        .post("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .json(&json!({"full_name": "Grace Hopper", "email": "grace@example.com"}))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], 3);
    assert_eq!(json["data"]["full_name"], "Grace Hopper");
    assert_eq!(json["data"]["email"], "grace@example.com");
    assert_eq!(json["meta"]["message"], "Success");
    assert_eq!(repo.len(), 3);
}

#[tokio::test]
async fn test_store_user_invalid_email() {
    let repo = seeded(0);
    let server = common::make_server(repo.clone());

    let response = server
        .post("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .json(&json!({"full_name": "Grace", "email": "not-an-email"}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_store_user_missing_field() {
    let server = common::make_server(seeded(0));

    let response = server
        .post("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .json(&json!({"full_name": "Grace"}))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert!(json["data"].is_null());
    assert!(
        json["meta"]["message"]["errors"]
            .as_str()
            .unwrap()
            .contains("email")
    );
}

#[tokio::test]
async fn test_store_user_malformed_body() {
    let server = common::make_server(seeded(0));

    let response = server
        .post("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .text("{not json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["meta"]["status"], 400);
}

#[tokio::test]
async fn test_store_user_duplicate_email() {
    let server = common::make_server(seeded(1));

    let response = server
        .post("/api/v1/users")
        .add_header("Authorization", common::bearer())
        .json(&json!({"full_name": "Copy", "email": "user1@example.com"}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["meta"]["message"]["errors"],
        "Unique constraint violation: users_email_key"
    );
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_changes_only_full_name() {
    let repo = seeded(3);
    let before = repo.get(2).unwrap();
    let server = common::make_server(repo.clone());

    let response = server
        .put("/api/v1/users/2")
        .add_header("Authorization", common::bearer())
        .json(&json!({"full_name": "X", "id": "ignored", "email": "other@example.com"}))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], 2);
    assert_eq!(json["data"]["full_name"], "X");
    assert_eq!(json["data"]["email"], before.email);

    let after = repo.get(2).unwrap();
    assert_eq!(after.full_name, "X");
    assert_eq!(after.email, before.email);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_update_unknown_user_reports_not_found_before_body() {
    let server = common::make_server(seeded(1));

    let response = server
        .put("/api/v1/users/50")
        .add_header("Authorization", common::bearer())
        .text("{broken")
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_malformed_body() {
    let repo = seeded(1);
    let server = common::make_server(repo.clone());

    let response = server
        .put("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .text("{broken")
        .await;

    response.assert_status_bad_request();
    assert_eq!(repo.get(1).unwrap().full_name, "User 1");
}

#[tokio::test]
async fn test_update_empty_full_name_rejected() {
    let server = common::make_server(seeded(1));

    let response = server
        .put("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .json(&json!({"full_name": ""}))
        .await;

    response.assert_status_bad_request();
}

// ─── DESTROY ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_destroy_user() {
    let repo = seeded(2);
    let server = common::make_server(repo.clone());

    let response = server
        .delete("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert!(json["data"].is_null());
    assert_eq!(json["meta"], json!({"status": 201, "message": "Success"}));
    assert!(repo.get(1).is_none());
    assert_eq!(repo.len(), 1);

    server
        .get("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_destroy_user_with_json_body() {
    let repo = seeded(1);
    let server = common::make_server(repo.clone());

    let response = server
        .delete("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .json(&json!({"reason": "cleanup"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_destroy_user_empty_body_keeps_user() {
    let repo = seeded(1);
    let server = common::make_server(repo.clone());

    let response = server
        .delete("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["meta"]["status"], 400);
    assert_eq!(repo.len(), 1);
    assert!(repo.get(1).is_some());
}

#[tokio::test]
async fn test_destroy_user_malformed_body_keeps_user() {
    let repo = seeded(1);
    let server = common::make_server(repo.clone());

    let response = server
        .delete("/api/v1/users/1")
        .add_header("Authorization", common::bearer())
        .text("{broken")
        .await;

    response.assert_status_bad_request();
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_destroy_unknown_user() {
    let server = common::make_server(seeded(1));

    let response = server
        .delete("/api/v1/users/7")
        .add_header("Authorization", common::bearer())
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>()["meta"]["message"]["errors"],
        "Page Not Found"
    );
}
