//! `#[serde(with = "...")]` adapters for identifier fields.
//!
//! [`Suid`](crate::Suid) serializes as its native integer and
//! [`Guid`](crate::Guid) as its text form by default. Either form can be
//! chosen per field:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use suid::{Guid, Suid};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Row {
//!     #[serde(with = "suid::serde::as_base32")]
//!     id: Suid,
//!     #[serde(with = "suid::serde::as_native")]
//!     trace: Guid,
//! }
//! ```

mod error;

pub use error::*;

pub mod as_native {
    use super::SerdeError;
    use crate::Id;
    use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    /// Serializes an identifier as its raw value (`u64` or a 10-byte array).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Id,
        ID::Ty: Serialize,
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserializes an identifier from its raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value
    /// sets reserved bits.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Id,
        ID::Ty: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let raw = <ID::Ty>::deserialize(d)?;
        let id = ID::from_raw(raw);
        if !id.is_valid() {
            return Err(D::Error::custom(SerdeError::DecodeOverflow {
                raw: format!("{raw:?}"),
            }));
        }
        Ok(id)
    }
}

pub mod as_base32 {
    use super::SerdeError;
    use crate::{Base32Ext, BeBytes};
    use ::serde::{Deserializer, Serializer, de};
    use core::{fmt, marker::PhantomData};

    /// Serializes an identifier as its fixed-length base32 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Base32Ext,
        ID::Ty: BeBytes,
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    /// Deserializes an identifier from its base32 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the text is
    /// not a valid encoded identifier.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: Base32Ext,
        ID::Ty: BeBytes,
        D: Deserializer<'de>,
    {
        struct Base32Visitor<ID>(PhantomData<ID>);

        impl<ID> de::Visitor<'_> for Base32Visitor<ID>
        where
            ID: Base32Ext,
            ID::Ty: BeBytes,
        {
            type Value = ID;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a base32 encoded identifier")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                ID::decode(v).map_err(|e| E::custom(SerdeError::from(e)))
            }
        }

        d.deserialize_str(Base32Visitor(PhantomData))
    }
}
