//! `outliner-core` — shared building blocks for outline records.
//!
//! This crate contains **pure** primitives (no IO, no logging setup).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, Violation};
pub use id::generate_uid;
