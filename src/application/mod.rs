//! Application layer services.
//!
//! Services consume repository traits and give HTTP handlers a small API
//! that speaks in domain entities and [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - User listing, lookup, creation, update and deletion

pub mod services;
