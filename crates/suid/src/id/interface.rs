use core::fmt;
use core::hash::Hash;

/// A trait for identifier types that wrap a fixed-width raw value.
///
/// Types implementing `Id` are immutable, `Copy`, and compare by their raw
/// bits: ordering of identifiers is ordering of the raw values.
pub trait Id:
    Copy + Clone + fmt::Display + PartialOrd + Ord + PartialEq + Eq + Hash + fmt::Debug
{
    /// Raw representation (`u64` for SUID, `[u8; 10]` for GUID).
    type Ty: Copy + Clone + Default + fmt::Debug + Ord + PartialOrd + Eq + PartialEq + Hash;

    /// Version of the bit layout this type packs with.
    const LAYOUT_VERSION: u8;

    /// Converts this type into its raw representation.
    fn to_raw(&self) -> Self::Ty;

    /// Converts a raw value into this type without validation.
    fn from_raw(raw: Self::Ty) -> Self;

    /// Returns `true` if the raw value is validly packed (no reserved bits
    /// set).
    fn is_valid(&self) -> bool;

    /// Sanity check: the value is validly packed and its time field lies past
    /// the identifier kind's introduction date.
    ///
    /// This rejects zero and garbage values. It is not a collision or
    /// authenticity check.
    fn verify(&self) -> bool;
}
