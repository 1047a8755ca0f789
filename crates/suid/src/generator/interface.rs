use crate::Id;

/// A source of identifiers of one kind.
///
/// Implemented by [`SuidGenerator`] and [`GuidGenerator`] so callers can be
/// generic over the identifier kind.
///
/// [`SuidGenerator`]: crate::SuidGenerator
/// [`GuidGenerator`]: crate::GuidGenerator
pub trait IdGenerator {
    type Id: Id;

    /// Returns a new identifier. Never blocks and never fails.
    fn next_id(&self) -> Self::Id;
}
