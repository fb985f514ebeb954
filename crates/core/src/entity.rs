//! Records with a stable identity (events, user profiles).

/// A record whose identity outlives changes to its fields.
///
/// Two values with the same id describe the same thing, even when a tier or
/// title differs between reads.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// True when both values refer to the same record.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
