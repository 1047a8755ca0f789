use super::debug::write_bit_layout_debug;
use crate::{Base32Error, Base32Ext, Field, FieldKind, Group, Id, Layout, LayoutError};
use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

/// An 80-bit identifier with microsecond resolution, stored as 10 big-endian
/// bytes.
///
/// - 3 bits group (caller-supplied tag, default 0)
/// - 53 bits time (microseconds since the Unix epoch, good until year 2255)
/// - 17 bits sequence (131,072 identifiers per microsecond per host)
/// - 7 bits host id
///
/// ```text
///  Byte:       0        1 .. 6     7        8        9
///              +---+-----+--------+--------+--------+-+-------+
///  Field:      |grp| time (53)    |    sequence (17)  | host  |
///              | 3 | 5 + 48       |  8   +   8   + 1  |  (7)  |
///              +---+-----+--------+--------+--------+-+-------+
///              |<------- MSB ---- 80 bits ---- LSB ---------->|
/// ```
///
/// The group and the top of the timestamp share byte 0, and the lowest
/// sequence bit shares byte 9 with the host id. The text form is exactly 16
/// characters.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Guid {
    bytes: [u8; 10],
}

impl Guid {
    pub const LAYOUT: Layout<[u8; 10], 4> = Layout::new(
        1,
        [
            Field::new(FieldKind::Group, 3),
            Field::new(FieldKind::Time, 53),
            Field::new(FieldKind::Sequence, 17),
            Field::new(FieldKind::Host, 7),
        ],
    );

    pub const MAX_TIME: u64 = Self::LAYOUT.max(FieldKind::Time);
    pub const MAX_SEQUENCE: u64 = Self::LAYOUT.max(FieldKind::Sequence);
    pub const MAX_HOST: u64 = Self::LAYOUT.max(FieldKind::Host);

    /// Time floor used by [`Id::verify`], in microseconds (2026-02-12).
    pub const TIME_FLOOR: u64 = 1_770_904_743_122_773;

    /// Packs a GUID from its fields.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::FieldOverflow`] if `time`, `sequence` or `host`
    /// exceeds its field.
    ///
    /// # Example
    /// ```
    /// use suid::{Group, Guid};
    ///
    /// let group = Group::new(5).unwrap();
    /// let id = Guid::from_components(group, 1_770_904_743_122_774, 9, 1).unwrap();
    /// assert_eq!(id.group(), 5);
    /// assert_eq!(id.to_bytes()[0] >> 5, 5);
    /// ```
    pub fn from_components(
        group: Group,
        time: u64,
        sequence: u64,
        host: u64,
    ) -> Result<Self, LayoutError> {
        Self::LAYOUT
            .pack([u64::from(group.get()), time, sequence, host])
            .map(|bytes| Self { bytes })
    }

    #[must_use]
    pub fn group(&self) -> u8 {
        // 3-bit field
        Self::LAYOUT.unpack(&self.bytes, FieldKind::Group) as u8
    }

    /// Microseconds since the Unix epoch.
    #[must_use]
    pub fn time(&self) -> u64 {
        Self::LAYOUT.unpack(&self.bytes, FieldKind::Time)
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        Self::LAYOUT.unpack(&self.bytes, FieldKind::Sequence)
    }

    #[must_use]
    pub fn host(&self) -> u64 {
        Self::LAYOUT.unpack(&self.bytes, FieldKind::Host)
    }

    /// The time field as a wall-clock instant.
    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_micros(self.time())
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 10] {
        self.bytes
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 10]) -> Self {
        Self { bytes }
    }
}

impl Id for Guid {
    type Ty = [u8; 10];

    const LAYOUT_VERSION: u8 = Self::LAYOUT.version();

    fn to_raw(&self) -> Self::Ty {
        self.bytes
    }

    fn from_raw(raw: Self::Ty) -> Self {
        Self { bytes: raw }
    }

    /// Every 80-bit pattern is a valid packing.
    fn is_valid(&self) -> bool {
        true
    }

    fn verify(&self) -> bool {
        self.time() > Self::TIME_FLOOR
    }
}

impl From<Guid> for [u8; 10] {
    fn from(id: Guid) -> Self {
        id.bytes
    }
}

impl From<[u8; 10]> for Guid {
    fn from(bytes: [u8; 10]) -> Self {
        Self { bytes }
    }
}

impl FromStr for Guid {
    type Err = Base32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Guid {
    type Error = Base32Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::decode(s)
    }
}

/// The 16-character text form.
impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let hex: String = self.bytes.iter().map(|b| format!("{b:02x}")).collect();
            return write_bit_layout_debug(
                f,
                "Guid",
                &format!("0x{hex}"),
                self.encode().as_str(),
                &Self::LAYOUT.unpack_all(&self.bytes),
            );
        }
        f.debug_struct("Guid")
            .field("group", &self.group())
            .field("time", &self.time())
            .field("sequence", &self.sequence())
            .field("host", &self.host())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl ::serde::Serialize for Guid {
    fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        crate::serde::as_base32::serialize(self, s)
    }
}

#[cfg(feature = "serde")]
impl<'de> ::serde::Deserialize<'de> for Guid {
    fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        crate::serde::as_base32::deserialize(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(g: u8) -> Group {
        Group::new(g).unwrap()
    }

    #[test]
    fn fields_and_bounds() {
        let id = Guid::from_components(
            group(Group::MAX),
            Guid::MAX_TIME,
            Guid::MAX_SEQUENCE,
            Guid::MAX_HOST,
        )
        .unwrap();
        assert_eq!(id.group(), 7);
        assert_eq!(id.time(), Guid::MAX_TIME);
        assert_eq!(id.sequence(), Guid::MAX_SEQUENCE);
        assert_eq!(id.host(), Guid::MAX_HOST);
        assert_eq!(id.to_bytes(), [0xFF; 10]);
        assert_eq!(id.encode(), "ZZZZZZZZZZZZZZZZ");

        let zero = Guid::from_components(Group::DEFAULT, 0, 0, 0).unwrap();
        assert_eq!(zero.to_bytes(), [0; 10]);
        assert_eq!(zero.encode(), "0000000000000000");
    }

    #[test]
    fn known_byte_layout() {
        let time = 0x1A_BCDE_F012_3456_u64;
        let id = Guid::from_components(group(3), time, 0x1_8001, 0x55).unwrap();
        assert_eq!(
            id.to_bytes(),
            [
                (3 << 5) | 0x1A,
                0xBC,
                0xDE,
                0xF0,
                0x12,
                0x34,
                0x56,
                0xC0,
                0x00,
                0x80 | 0x55,
            ]
        );
        assert_eq!(id.group(), 3);
        assert_eq!(id.time(), time);
        assert_eq!(id.sequence(), 0x1_8001);
        assert_eq!(id.host(), 0x55);
    }

    #[test]
    fn overflowing_fields_are_rejected() {
        assert!(Guid::from_components(Group::DEFAULT, Guid::MAX_TIME + 1, 0, 0).is_err());
        assert!(Guid::from_components(Group::DEFAULT, 0, Guid::MAX_SEQUENCE + 1, 0).is_err());
        assert_eq!(
            Guid::from_components(Group::DEFAULT, 0, 0, 128),
            Err(LayoutError::FieldOverflow {
                field: FieldKind::Host,
                value: 128,
                max: 127
            })
        );
    }

    #[test]
    fn text_roundtrip_at_boundaries() {
        for id in [
            Guid::from_bytes([0; 10]),
            Guid::from_bytes([0xFF; 10]),
            Guid::from_components(group(1), Guid::TIME_FLOOR, 1, 1).unwrap(),
            Guid::from_components(group(6), Guid::MAX_TIME, 0, Guid::MAX_HOST).unwrap(),
        ] {
            let text = id.to_string();
            assert_eq!(text.len(), 16);
            assert_eq!(text.parse::<Guid>().unwrap(), id);
        }
    }

    #[test]
    fn wrong_length_text_is_rejected() {
        let valid = Guid::from_components(group(2), Guid::TIME_FLOOR, 3, 4)
            .unwrap()
            .to_string();
        for bad in [&valid[..15], &format!("{valid}0")[..]] {
            assert_eq!(
                Guid::decode(bad),
                Err(Base32Error::DecodeInvalidLen {
                    len: bad.len(),
                    expected: 16
                })
            );
        }
    }

    #[test]
    fn non_alphabet_text_is_rejected() {
        assert_eq!(
            Guid::decode("000000000000000o"),
            Err(Base32Error::DecodeInvalidAscii {
                byte: b'o',
                index: 15
            })
        );
        // Multi-byte UTF-8 of the right byte length still fails cleanly.
        assert!(Guid::decode("00000000000000é").is_err());
    }

    #[test]
    fn verify_uses_microsecond_floor() {
        assert!(!Guid::from_bytes([0; 10]).verify());
        assert!(!Guid::from_components(Group::DEFAULT, Guid::TIME_FLOOR, 0, 0)
            .unwrap()
            .verify());
        assert!(Guid::from_components(Group::DEFAULT, Guid::TIME_FLOOR + 1, 0, 0)
            .unwrap()
            .verify());
    }

    #[test]
    fn byte_order_matches_text_order() {
        let a = Guid::from_components(Group::DEFAULT, Guid::TIME_FLOOR, 5, 1).unwrap();
        let b = Guid::from_components(Group::DEFAULT, Guid::TIME_FLOOR + 1, 0, 0).unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn debug_forms() {
        let id = Guid::from_components(group(1), 2, 3, 4).unwrap();
        assert_eq!(
            format!("{id:?}"),
            "Guid { group: 1, time: 2, sequence: 3, host: 4 }"
        );
        let pretty = format!("{id:#?}");
        assert!(pretty.contains("group (3)"));
        assert!(pretty.contains("time (53)"));
    }
}
