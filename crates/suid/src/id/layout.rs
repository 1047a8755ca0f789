use core::marker::PhantomData;

/// Errors produced while packing field values into a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutError {
    /// A value did not fit the bit width of its field. Values are never
    /// truncated to fit.
    #[error("{field} value {value} overflows its field (max {max})")]
    FieldOverflow {
        field: FieldKind,
        value: u64,
        max: u64,
    },
}

/// The role of a bit field inside an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Unused high bits; always zero in a validly packed identifier.
    Reserved,
    /// A caller-supplied tag. Not a partition key.
    Group,
    /// Clock reading in the identifier kind's tick unit.
    Time,
    /// Value taken from the sequence allocator.
    Sequence,
    /// The generating host's id.
    Host,
}

impl FieldKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Group => "group",
            Self::Time => "time",
            Self::Sequence => "sequence",
            Self::Host => "host",
        }
    }
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One `(kind, width)` entry of a [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub kind: FieldKind,
    pub bits: u32,
}

impl Field {
    #[must_use]
    pub const fn new(kind: FieldKind, bits: u32) -> Self {
        Self { kind, bits }
    }
}

/// A field together with the value it holds in a particular identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldValue {
    pub field: Field,
    pub value: u64,
}

/// Returns a mask covering the low `bits` bits.
#[must_use]
pub const fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Fixed-width storage that bit fields are packed into.
///
/// Offsets count from the least significant bit of the whole container.
pub trait BitContainer: Copy + Default {
    /// Total number of bits in the container.
    const BITS: u32;

    /// Reads `width` (at most 64) bits starting at `offset`.
    fn read_bits(&self, offset: u32, width: u32) -> u64;

    /// Overwrites `width` (at most 64) bits starting at `offset` with the low
    /// bits of `value`.
    fn write_bits(&mut self, offset: u32, width: u32, value: u64);
}

impl BitContainer for u64 {
    const BITS: u32 = u64::BITS;

    #[inline]
    fn read_bits(&self, offset: u32, width: u32) -> u64 {
        if width == 0 {
            return 0;
        }
        (*self >> offset) & mask(width)
    }

    #[inline]
    fn write_bits(&mut self, offset: u32, width: u32, value: u64) {
        if width == 0 {
            return;
        }
        let m = mask(width) << offset;
        *self = (*self & !m) | ((value << offset) & m);
    }
}

/// Big-endian byte storage: byte 0 holds the most significant bits.
///
/// Fields are not byte aligned, so both directions walk the field one byte
/// slice at a time, from its least significant bit upwards.
impl<const N: usize> BitContainer for [u8; N]
where
    [u8; N]: Default,
{
    const BITS: u32 = (N * 8) as u32;

    fn read_bits(&self, offset: u32, width: u32) -> u64 {
        debug_assert!(offset + width <= Self::BITS);
        let mut out = 0_u64;
        let mut done = 0;
        while done < width {
            let pos = offset + done;
            let byte = N - 1 - (pos / 8) as usize;
            let shift = pos % 8;
            let take = (8 - shift).min(width - done);
            let chunk = (self[byte] >> shift) & low_mask8(take);
            out |= u64::from(chunk) << done;
            done += take;
        }
        out
    }

    fn write_bits(&mut self, offset: u32, width: u32, value: u64) {
        debug_assert!(offset + width <= Self::BITS);
        let mut done = 0;
        while done < width {
            let pos = offset + done;
            let byte = N - 1 - (pos / 8) as usize;
            let shift = pos % 8;
            let take = (8 - shift).min(width - done);
            let m = low_mask8(take);
            let chunk = (value >> done) as u8 & m;
            self[byte] = (self[byte] & !(m << shift)) | (chunk << shift);
            done += take;
        }
    }
}

#[inline]
const fn low_mask8(bits: u32) -> u8 {
    ((1_u16 << bits) - 1) as u8
}

/// An ordered list of bit fields, most significant first, that exactly fills
/// a container `C`.
///
/// Each layout carries a version. A layout is never changed in place; a new
/// arrangement of fields gets a new version.
///
/// ```
/// use suid::{Field, FieldKind, Layout};
///
/// const LAYOUT: Layout<u64, 3> = Layout::new(
///     1,
///     [
///         Field::new(FieldKind::Time, 40),
///         Field::new(FieldKind::Sequence, 16),
///         Field::new(FieldKind::Host, 8),
///     ],
/// );
///
/// let raw = LAYOUT.pack([7, 2, 1]).unwrap();
/// assert_eq!(raw, (7 << 24) | (2 << 8) | 1);
/// assert_eq!(LAYOUT.unpack(&raw, FieldKind::Sequence), 2);
/// assert!(LAYOUT.pack([0, 1 << 16, 0]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout<C, const N: usize> {
    version: u8,
    fields: [Field; N],
    _container: PhantomData<C>,
}

impl<C: BitContainer, const N: usize> Layout<C, N> {
    /// Builds a layout.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if a field is wider
    /// than 64 bits, a kind appears twice, or the widths do not sum to
    /// `C::BITS`.
    #[must_use]
    pub const fn new(version: u8, fields: [Field; N]) -> Self {
        let mut total = 0;
        let mut i = 0;
        while i < N {
            assert!(
                fields[i].bits > 0 && fields[i].bits <= u64::BITS,
                "field width must be within 1..=64"
            );
            let mut j = i + 1;
            while j < N {
                assert!(
                    fields[i].kind as u8 != fields[j].kind as u8,
                    "field kinds must be unique"
                );
                j += 1;
            }
            total += fields[i].bits;
            i += 1;
        }
        assert!(total == C::BITS, "field widths must fill the container");
        Self {
            version,
            fields,
            _container: PhantomData,
        }
    }

    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[must_use]
    pub const fn fields(&self) -> &[Field; N] {
        &self.fields
    }

    const fn position(&self, kind: FieldKind) -> Option<(u32, u32)> {
        let mut shift = C::BITS;
        let mut i = 0;
        while i < N {
            shift -= self.fields[i].bits;
            if self.fields[i].kind as u8 == kind as u8 {
                return Some((shift, self.fields[i].bits));
            }
            i += 1;
        }
        None
    }

    /// Width of `kind` in bits; zero if the layout has no such field.
    #[must_use]
    pub const fn bits(&self, kind: FieldKind) -> u32 {
        match self.position(kind) {
            Some((_, bits)) => bits,
            None => 0,
        }
    }

    /// Offset of the least significant bit of `kind`; zero if absent.
    #[must_use]
    pub const fn shift(&self, kind: FieldKind) -> u32 {
        match self.position(kind) {
            Some((shift, _)) => shift,
            None => 0,
        }
    }

    /// Largest value `kind` can hold; zero if absent.
    #[must_use]
    pub const fn max(&self, kind: FieldKind) -> u64 {
        match self.position(kind) {
            Some((_, bits)) => mask(bits),
            None => 0,
        }
    }

    /// Packs `values` (one per field, in layout order) into a container.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::FieldOverflow`] for the first value that does
    /// not fit its field. Nothing is truncated.
    pub fn pack(&self, values: [u64; N]) -> Result<C, LayoutError> {
        let mut container = C::default();
        let mut shift = C::BITS;
        for (field, value) in self.fields.iter().zip(values) {
            shift -= field.bits;
            let max = mask(field.bits);
            if value > max {
                return Err(LayoutError::FieldOverflow {
                    field: field.kind,
                    value,
                    max,
                });
            }
            container.write_bits(shift, field.bits, value);
        }
        Ok(container)
    }

    /// Packs `values`, keeping only the low bits of each that fit its field.
    ///
    /// Generators use this for the time field, which wraps modulo its
    /// capacity instead of failing.
    pub fn pack_wrapping(&self, values: [u64; N]) -> C {
        let mut container = C::default();
        let mut shift = C::BITS;
        for (field, value) in self.fields.iter().zip(values) {
            shift -= field.bits;
            container.write_bits(shift, field.bits, value & mask(field.bits));
        }
        container
    }

    /// Reads the value of `kind` out of `container`. Fields absent from the
    /// layout read as zero.
    #[must_use]
    pub fn unpack(&self, container: &C, kind: FieldKind) -> u64 {
        match self.position(kind) {
            Some((shift, bits)) => container.read_bits(shift, bits),
            None => 0,
        }
    }

    /// Reads every field out of `container`, in layout order.
    #[must_use]
    pub fn unpack_all(&self, container: &C) -> [FieldValue; N] {
        let mut shift = C::BITS;
        self.fields.map(|field| {
            shift -= field.bits;
            FieldValue {
                field,
                value: container.read_bits(shift, field.bits),
            }
        })
    }
}
