use crate::{Error, FieldKind, Guid};
use core::fmt;

/// A validated GUID group tag (0..=7).
///
/// Groups let callers label identifiers (e.g. by entity type). They do not
/// partition the sequence space: every group of a kind shares one allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(u8);

impl Group {
    /// The group used when none is given.
    pub const DEFAULT: Self = Self(0);

    /// Largest group tag the 3-bit field can hold.
    pub const MAX: u8 = Guid::LAYOUT.max(FieldKind::Group) as u8;

    /// Validates a raw group tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroup`] if `group` exceeds [`Group::MAX`].
    pub const fn new(group: u8) -> Result<Self, Error> {
        if group > Self::MAX {
            return Err(Error::InvalidGroup {
                group: group as u64,
                max: Self::MAX as u64,
            });
        }
        Ok(Self(group))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Group {
    type Error = Error;

    fn try_from(group: u8) -> Result<Self, Self::Error> {
        Self::new(group)
    }
}

impl From<Group> for u8 {
    fn from(group: Group) -> Self {
        group.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
