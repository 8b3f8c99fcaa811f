//! API route configuration.
//!
//! All API endpoints require a Bearer JWT via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    user_destroy_handler, user_index_handler, user_show_handler, user_store_handler,
    user_update_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Mount point of the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// Collection path of the user resource, relative to the host.
pub const USERS_RESOURCE: &str = "/api/v1/users";

/// All API routes, relative to [`API_PREFIX`].
///
/// # Endpoints
///
/// - `GET    /users`            - List users (optionally paginated)
/// - `POST   /users`            - Create a user
/// - `GET    /users/{user_id}`  - Show a user
/// - `PUT    /users/{user_id}`  - Rename a user
/// - `DELETE /users/{user_id}`  - Delete a user
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(user_index_handler).post(user_store_handler))
        .route(
            "/users/{user_id}",
            get(user_show_handler)
                .put(user_update_handler)
                .delete(user_destroy_handler),
        )
}
