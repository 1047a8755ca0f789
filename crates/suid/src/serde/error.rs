use crate::Base32Error;

/// Errors surfaced through a serde [`Deserializer`](::serde::Deserializer)
/// when an identifier field does not hold a valid identifier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SerdeError {
    /// The native value sets bits the layout reserves.
    #[error("raw value {raw} is not a valid identifier")]
    DecodeOverflow { raw: String },

    /// The text form failed to decode.
    #[error(transparent)]
    Base32(#[from] Base32Error),
}
