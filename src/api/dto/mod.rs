//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs are deserialized with Serde and checked with `validator`.

pub mod health;
pub mod page_request;
pub mod user;
