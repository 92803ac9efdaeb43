//! Value object trait: equality by value, not identity.
//!
//! Tax identifiers, area measurements and land-use totals have **no identity**;
//! they are defined entirely by their values.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. A `TaxId` parsed from
/// `111.444.777-35` equals one parsed from `11144477735`, because both hold
/// the same normalized digits.
///
/// To "modify" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
