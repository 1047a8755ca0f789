use crate::{Base32Error, LayoutError};

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `suid` can produce.
///
/// Generation itself is infallible once a generator exists; errors only
/// surface from caller-supplied input (text to decode, group tags, host ids,
/// raw values) and are always returned, never turned into a panic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input text was not a valid encoded identifier.
    #[error(transparent)]
    Base32(#[from] Base32Error),

    /// A field value did not fit its bit width.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A group tag exceeded the 3-bit group field.
    #[error("invalid group {group}: must be at most {max}")]
    InvalidGroup { group: u64, max: u64 },

    /// A host id exceeded the host field of the identifier kind.
    #[error("invalid host id {host}: must be at most {max}")]
    InvalidHost { host: u64, max: u64 },

    /// A sequence allocator yields more values than the sequence field holds.
    #[error("sequence allocator modulus {modulus} exceeds the sequence field capacity {capacity}")]
    InvalidSequence { modulus: u64, capacity: u64 },

    /// A signed storage value had its sign bit set.
    #[error("negative raw value {raw} cannot be a SUID")]
    NegativeRaw { raw: i64 },
}
