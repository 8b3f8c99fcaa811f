//! Helpers shared across layers.
//!
//! - [`jwt`] - HS256 token issuing and verification
//! - [`query_string`] - Query string rebuilding for pagination links

pub mod jwt;
pub mod query_string;
