//! Handlers for user management endpoints.
//!
//! Every successful response is `201 Created` with `meta.message = "Success"`,
//! including reads and deletes.

use axum::{
    Json,
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
};
use serde::de::IgnoredAny;
use validator::Validate;

use crate::api::dto::page_request::PageRequest;
use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::extract::{AppJson, AppPath, decode_json};
use crate::api::response::{Envelope, Meta, SUCCESS_STATUS, SingleResponse};
use crate::error::AppError;
use crate::state::AppState;

type Created<T> = (StatusCode, Json<T>);

/// Lists users, optionally wrapped in a pagination envelope.
///
/// # Endpoint
///
/// `GET /api/v1/users?page=&per_page=&paginate=&vue=`
///
/// # Response
///
/// - `paginate=0`: `{data: [...], meta}`
/// - `paginate=1`: `{data, meta: {status, message, pagination}}`
/// - `paginate=1&vue=1`: flat Vue-table envelope
///
/// # Errors
///
/// Returns 400 if the query parameters are invalid or `per_page` exceeds 1000.
pub async fn user_index_handler(
    State(state): State<AppState>,
    page: PageRequest,
    RawQuery(query): RawQuery,
) -> Result<Created<Envelope<UserResponse>>, AppError> {
    let (users, total) = state
        .user_service
        .fetch_index(page.offset()?, page.limit())
        .await?;

    let items: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    let envelope = state.shaper.shape(&page, items, total, query.as_deref());

    Ok((SUCCESS_STATUS, Json(envelope)))
}

/// Returns a single user.
///
/// # Endpoint
///
/// `GET /api/v1/users/{user_id}`
///
/// # Errors
///
/// Returns 400 if `user_id` is not an integer.
/// Returns 404 if the user does not exist.
pub async fn user_show_handler(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Created<SingleResponse<UserResponse>>, AppError> {
    let user = state.user_service.fetch_show(user_id).await?;

    Ok((SUCCESS_STATUS, Json(SingleResponse::new(UserResponse::from(user)))))
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /api/v1/users`
///
/// # Errors
///
/// Returns 400 if the body is malformed, fails validation, or the email is
/// already taken.
pub async fn user_store_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<Created<SingleResponse<UserResponse>>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .fetch_store(payload.into_new_user())
        .await?;

    Ok((SUCCESS_STATUS, Json(SingleResponse::new(UserResponse::from(user)))))
}

/// Renames a user.
///
/// # Endpoint
///
/// `PUT /api/v1/users/{user_id}`
///
/// The stored user is loaded first, so an unknown id is reported as 404 even
/// when the body is malformed. Only `full_name` is taken from the body.
///
/// # Errors
///
/// Returns 404 if the user does not exist.
/// Returns 400 if the body is malformed or fails validation.
pub async fn user_update_handler(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    body: Bytes,
) -> Result<Created<SingleResponse<UserResponse>>, AppError> {
    let mut user = state.user_service.fetch_show(user_id).await?;

    let payload: UpdateUserRequest = decode_json(&body)?;
    payload.validate()?;
    payload.apply_to(&mut user);

    let user = state.user_service.fetch_update(user_id, user).await?;

    Ok((SUCCESS_STATUS, Json(SingleResponse::new(UserResponse::from(user)))))
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /api/v1/users/{user_id}`
///
/// The body must be valid JSON; its content is ignored. An empty body is
/// rejected like any other malformed one.
///
/// # Errors
///
/// Returns 404 if the user does not exist.
/// Returns 400 if the body is missing or is not valid JSON.
pub async fn user_destroy_handler(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    body: Bytes,
) -> Result<Created<SingleResponse<()>>, AppError> {
    state.user_service.fetch_show(user_id).await?;

    decode_json::<IgnoredAny>(&body)?;

    state.user_service.fetch_destroy(user_id).await?;

    Ok((SUCCESS_STATUS, Json(SingleResponse::empty(Meta::success()))))
}
