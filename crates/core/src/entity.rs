//! Entity trait: records that carry their own identity.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Identifier type as stored on the record.
    type Id: ?Sized + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
