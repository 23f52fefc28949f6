//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two of them with the same attribute values
/// are the same value. A document lookup key `(CPF, "02886612901")` is a value
/// object; a `Customer` with its `CustomerId` is an entity.
///
/// Value objects are immutable; to "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
