//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Filter criteria and summaries are recomputed on demand and compared by
/// their attribute values; they never carry an identity of their own.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct AmountRange { min: Decimal, max: Decimal }
///
/// impl ValueObject for AmountRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
