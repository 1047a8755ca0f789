use super::crockford::base32_size;
use core::hash::Hash;

/// A trait for raw identifier representations that have a fixed big-endian
/// byte form.
///
/// The byte form is what the text codec slices into 5-bit groups, so the
/// order of `ByteArray` values is the order of the encoded strings.
pub trait BeBytes: Sized {
    const SIZE: usize;
    const BASE32_SIZE: usize;
    type ByteArray: AsRef<[u8]>
        + AsMut<[u8]>
        + core::fmt::Debug
        + Default
        + Copy
        + PartialEq
        + Eq
        + PartialOrd
        + Ord
        + Hash;
    type Base32Array: AsRef<[u8]>
        + AsMut<[u8]>
        + core::fmt::Debug
        + Default
        + Copy
        + PartialEq
        + Eq
        + PartialOrd
        + Ord
        + Hash;

    fn to_be_bytes(self) -> Self::ByteArray;
    fn from_be_bytes(bytes: Self::ByteArray) -> Self;
}

impl BeBytes for u64 {
    const SIZE: usize = core::mem::size_of::<u64>();
    const BASE32_SIZE: usize = base32_size(Self::SIZE);

    type ByteArray = [u8; Self::SIZE];
    type Base32Array = [u8; Self::BASE32_SIZE];

    fn to_be_bytes(self) -> Self::ByteArray {
        self.to_be_bytes()
    }

    fn from_be_bytes(bytes: Self::ByteArray) -> Self {
        Self::from_be_bytes(bytes)
    }
}

/// The 80-bit GUID container is already big-endian bytes.
impl BeBytes for [u8; 10] {
    const SIZE: usize = 10;
    const BASE32_SIZE: usize = base32_size(Self::SIZE);

    type ByteArray = [u8; 10];
    type Base32Array = [u8; 16];

    fn to_be_bytes(self) -> Self::ByteArray {
        self
    }

    fn from_be_bytes(bytes: Self::ByteArray) -> Self {
        bytes
    }
}
