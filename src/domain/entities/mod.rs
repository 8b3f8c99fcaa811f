//! Core domain entities.
//!
//! Entities are plain data structures. Creation input has its own struct
//! (`NewUser`) separate from the stored record (`User`).

pub mod user;

pub use user::{NewUser, User};
