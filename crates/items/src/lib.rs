//! Outline item records.
//!
//! This crate defines the `Item` data contract and the ways to move it in and out of
//! plain key/value form (JSON objects, flat string maps, `key: value` lines). It
//! holds no tree logic: parents are plain references, resolved by whoever owns
//! the collection.

pub mod conformance;
pub mod field;
pub mod fields;
pub mod item;

pub use conformance::{ConformanceReport, check};
pub use field::ItemField;
pub use item::Item;
