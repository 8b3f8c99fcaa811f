//! Domain layer: business entities and repository interfaces.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; services in [`crate::application::services`] consume the traits.

pub mod entities;
pub mod repositories;
