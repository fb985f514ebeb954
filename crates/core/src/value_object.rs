//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A
/// membership tier is the canonical example here: two `Gold` values are the
/// same thing, no matter where they were read from.
///
/// - **Entity**: has identity (two events with the same id are the same event)
/// - **Value object**: no identity (two tier sets with the same members are equal)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
