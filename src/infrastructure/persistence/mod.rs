//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User storage and retrieval

pub mod pg_user_repository;

pub use pg_user_repository::PgUserRepository;
