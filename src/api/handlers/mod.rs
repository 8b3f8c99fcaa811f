//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod users;

pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
pub use users::{
    user_destroy_handler, user_index_handler, user_show_handler, user_store_handler,
    user_update_handler,
};
