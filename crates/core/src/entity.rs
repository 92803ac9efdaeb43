//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Producers, farms and crop entries are entities: two records with the same
/// id are the same record, even after a field has been updated.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
