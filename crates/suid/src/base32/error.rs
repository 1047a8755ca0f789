/// Errors produced while decoding the text form of an identifier.
///
/// Decoding validates the length and every character before reconstructing
/// the value, so an error never comes with a partial result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base32Error {
    /// The input was not exactly the fixed length of the identifier kind.
    #[error("invalid length: {len} (expected {expected})")]
    DecodeInvalidLen { len: usize, expected: usize },

    /// A byte outside the alphabet was found.
    #[error("invalid character byte {byte:#04x} at index {index}")]
    DecodeInvalidAscii { byte: u8, index: usize },

    /// The decoded bits do not form a validly packed identifier (padding or
    /// reserved bits are set).
    #[error("decoded value overflows the identifier layout")]
    DecodeOverflow,
}
