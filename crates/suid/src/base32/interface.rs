use super::{decode_base32, encode_base32};
use crate::{Base32Error, BeBytes, Id};
use core::fmt;
use core::marker::PhantomData;

/// Extension trait for the fixed-length text form of an identifier.
///
/// The text form slices the identifier's big-endian bytes into 5-bit groups,
/// most significant first, and maps each group through [`ALPHABET`]. The
/// output is 13 characters for a [`Suid`] and 16 for a [`Guid`], and sorts
/// the same way the identifiers do.
///
/// [`ALPHABET`]: crate::ALPHABET
/// [`Suid`]: crate::Suid
/// [`Guid`]: crate::Guid
pub trait Base32Ext: Id
where
    Self::Ty: BeBytes,
{
    /// Returns a zeroed stack buffer of exactly the encoded length.
    #[must_use]
    fn buf() -> <Self::Ty as BeBytes>::Base32Array {
        <Self::Ty as BeBytes>::Base32Array::default()
    }

    /// Returns a formatter holding the text form of the identifier.
    ///
    /// # Example
    /// ```
    /// use suid::{Base32Ext, Id, Suid};
    ///
    /// let id = Suid::from_raw(42);
    /// assert_eq!(id.encode(), "000000000001A");
    /// ```
    fn encode(&self) -> Base32Formatter<Self> {
        let mut buf = Self::buf();
        encode_base32(self.to_raw().to_be_bytes().as_ref(), buf.as_mut());
        Base32Formatter {
            _id: PhantomData,
            buf,
        }
    }

    /// Encodes into a caller-supplied buffer and returns a `&str` view of it.
    ///
    /// ```
    /// use suid::{Base32Ext, Guid, Id};
    ///
    /// let id = Guid::from_raw([0xFF; 10]);
    /// let mut buf = Guid::buf();
    /// assert_eq!(id.encode_to_buf(&mut buf), "ZZZZZZZZZZZZZZZZ");
    /// ```
    fn encode_to_buf<'buf>(&self, buf: &'buf mut <Self::Ty as BeBytes>::Base32Array) -> &'buf str {
        encode_base32(self.to_raw().to_be_bytes().as_ref(), buf.as_mut());
        ascii_str((*buf).as_ref())
    }

    /// Decodes the text form back into an identifier.
    ///
    /// # Errors
    ///
    /// - [`Base32Error::DecodeInvalidLen`] if the input is not exactly the
    ///   encoded length of this identifier kind.
    /// - [`Base32Error::DecodeInvalidAscii`] if any byte is outside the
    ///   alphabet (the first offending byte is reported).
    /// - [`Base32Error::DecodeOverflow`] if padding or reserved bits are set.
    fn decode(s: impl AsRef<str>) -> Result<Self, Base32Error> {
        let mut bytes = <Self::Ty as BeBytes>::ByteArray::default();
        decode_base32(s.as_ref().as_bytes(), bytes.as_mut())?;
        let id = Self::from_raw(<Self::Ty as BeBytes>::from_be_bytes(bytes));
        if !id.is_valid() {
            return Err(Base32Error::DecodeOverflow);
        }
        Ok(id)
    }
}

impl<ID> Base32Ext for ID
where
    ID: Id,
    ID::Ty: BeBytes,
{
}

fn ascii_str(bytes: &[u8]) -> &str {
    // The encoder only ever writes bytes taken from `ALPHABET`.
    core::str::from_utf8(bytes).unwrap_or_default()
}

/// An owned, stack-allocated text form of an identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    _id: PhantomData<T>,
    buf: <T::Ty as BeBytes>::Base32Array,
}

impl<T> Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        ascii_str(self.buf.as_ref())
    }

    /// Consumes the formatter and returns the raw buffer.
    pub const fn into_inner(self) -> <T::Ty as BeBytes>::Base32Array {
        self.buf
    }
}

impl<T> fmt::Display for Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> fmt::Debug for Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Base32Formatter").field(&self.as_str()).finish()
    }
}

impl<T> AsRef<str> for Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> PartialEq<&str> for Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T> PartialEq<str> for Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T> PartialEq<String> for Base32Formatter<T>
where
    T: Id,
    T::Ty: BeBytes,
{
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}
