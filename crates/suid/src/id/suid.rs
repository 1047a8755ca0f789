use super::debug::write_bit_layout_debug;
use crate::{Base32Error, Base32Ext, Error, Field, FieldKind, Id, Layout, LayoutError};
use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

/// A 64-bit Snowflake-style unique identifier with one second resolution.
///
/// - 1 bit reserved (always zero)
/// - 33 bits time (seconds since the Unix epoch, good until year 2242)
/// - 22 bits sequence (4,194,304 identifiers per second per host)
/// - 8 bits host id
///
/// ```text
///  Bit Index:  63           63 62           30 29             8 7           0
///              +--------------+---------------+----------------+-------------+
///  Field:      | reserved (1) |   time (33)   | sequence (22)  |  host (8)   |
///              +--------------+---------------+----------------+-------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB -------->|
/// ```
///
/// The text form is 13 characters; the storage form is the raw integer,
/// which is always non-negative as an `i64`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Suid {
    id: u64,
}

impl Suid {
    pub const LAYOUT: Layout<u64, 4> = Layout::new(
        1,
        [
            Field::new(FieldKind::Reserved, 1),
            Field::new(FieldKind::Time, 33),
            Field::new(FieldKind::Sequence, 22),
            Field::new(FieldKind::Host, 8),
        ],
    );

    pub const MAX_TIME: u64 = Self::LAYOUT.max(FieldKind::Time);
    pub const MAX_SEQUENCE: u64 = Self::LAYOUT.max(FieldKind::Sequence);
    pub const MAX_HOST: u64 = Self::LAYOUT.max(FieldKind::Host);

    /// Bit offset of the time field.
    pub const TIME_SHIFT: u32 = Self::LAYOUT.shift(FieldKind::Time);

    /// Bit offset of the sequence field.
    pub const SEQUENCE_SHIFT: u32 = Self::LAYOUT.shift(FieldKind::Sequence);

    /// Time floor used by [`Id::verify`]: 2025-04-23 09:20:00 UTC.
    pub const TIME_FLOOR: u64 = 1_745_400_000;

    /// Packs a SUID from its fields.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::FieldOverflow`] if any value exceeds its field.
    ///
    /// # Example
    /// ```
    /// use suid::Suid;
    ///
    /// let id = Suid::from_components(1_745_400_001, 5, 3).unwrap();
    /// assert_eq!(id.to_raw(), (1_745_400_001 << 30) | (5 << 8) | 3);
    /// assert_eq!(id.sequence(), 5);
    /// ```
    pub fn from_components(time: u64, sequence: u64, host: u64) -> Result<Self, LayoutError> {
        Self::LAYOUT
            .pack([0, time, sequence, host])
            .map(|id| Self { id })
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn time(&self) -> u64 {
        Self::LAYOUT.unpack(&self.id, FieldKind::Time)
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        Self::LAYOUT.unpack(&self.id, FieldKind::Sequence)
    }

    #[must_use]
    pub fn host(&self) -> u64 {
        Self::LAYOUT.unpack(&self.id, FieldKind::Host)
    }

    /// The reserved top bit; non-zero only for values that were not packed
    /// by this crate.
    #[must_use]
    pub fn reserved(&self) -> u64 {
        Self::LAYOUT.unpack(&self.id, FieldKind::Reserved)
    }

    /// The time field as a wall-clock instant.
    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.time())
    }

    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }
}

impl Id for Suid {
    type Ty = u64;

    const LAYOUT_VERSION: u8 = Self::LAYOUT.version();

    fn to_raw(&self) -> Self::Ty {
        self.id
    }

    fn from_raw(raw: Self::Ty) -> Self {
        Self { id: raw }
    }

    fn is_valid(&self) -> bool {
        self.reserved() == 0
    }

    fn verify(&self) -> bool {
        self.is_valid() && self.time() > Self::TIME_FLOOR
    }
}

/// SQL-storage form: the identifier as a signed 64-bit integer.
impl From<Suid> for i64 {
    fn from(id: Suid) -> Self {
        // The reserved top bit keeps packed values non-negative.
        id.id as i64
    }
}

impl TryFrom<i64> for Suid {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        u64::try_from(raw)
            .map(Self::from_raw)
            .map_err(|_| Error::NegativeRaw { raw })
    }
}

impl From<Suid> for u64 {
    fn from(id: Suid) -> Self {
        id.id
    }
}

impl FromStr for Suid {
    type Err = Base32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Suid {
    type Error = Base32Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::decode(s)
    }
}

/// The 13-character text form.
impl fmt::Display for Suid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl fmt::Debug for Suid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write_bit_layout_debug(
                f,
                "Suid",
                &format!("{:#018x} ({})", self.id, self.id),
                self.encode().as_str(),
                &Self::LAYOUT.unpack_all(&self.id),
            );
        }
        f.debug_struct("Suid")
            .field("time", &self.time())
            .field("sequence", &self.sequence())
            .field("host", &self.host())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl ::serde::Serialize for Suid {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        crate::serde::as_native::serialize(self, s)
    }
}

#[cfg(feature = "serde")]
impl<'de> ::serde::Deserialize<'de> for Suid {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        crate::serde::as_native::deserialize(d)
    }
}
