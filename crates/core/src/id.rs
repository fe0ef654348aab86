//! Identifier helpers.

use uuid::Uuid;

/// Generate a fresh global identifier suitable for an item's `uid`.
///
/// Uses UUIDv7 (time-ordered), rendered in its hyphenated lowercase form. Prefer
/// passing uids explicitly in tests for determinism.
pub fn generate_uid() -> String {
    Uuid::now_v7().to_string()
}
