//! Compact, k-sortable, coordination-free identifiers.
//!
//! Two identifier kinds are provided:
//!
//! - [`Suid`]: a 64-bit integer (`time(33) | sequence(22) | host(8)`) with one
//!   second resolution, suited to database primary keys.
//! - [`Guid`]: an 80-bit, 10-byte identifier (`group(3) | time(53) |
//!   sequence(17) | host(7)`) with microsecond resolution.
//!
//! Both are produced by a generator that reads the wall clock, takes the next
//! value of a lock-free [`SequenceAllocator`], and packs the fields with a
//! fixed [`Layout`]. Both encode to a fixed-length base32 string whose
//! lexicographic order matches the identifier's binary order.
//!
//! ```
//! use suid::{Base32Ext, GuidGenerator, Group, SuidGenerator, SystemClock};
//!
//! let suids = SuidGenerator::new(3, SystemClock).unwrap();
//! let id = suids.next_id();
//! assert_eq!(id.host(), 3);
//!
//! let text = id.encode();
//! assert_eq!(text.as_str().len(), 13);
//! assert_eq!(suid::Suid::decode(&text).unwrap(), id);
//!
//! let guids = GuidGenerator::new(7, SystemClock).unwrap();
//! let id = guids.next_id_in(Group::new(2).unwrap());
//! assert_eq!(id.group(), 2);
//! assert_eq!(id.to_string().len(), 16);
//! ```
//!
//! The sequence counter is free-running: it is never reset when the clock
//! ticks, so generation never blocks. Requesting more than
//! `max_sequence + 1` identifiers within one tick on one host repeats a
//! sequence value and produces duplicates.

mod base32;
mod error;
mod generator;
#[cfg(feature = "host")]
mod host;
mod id;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
#[cfg(feature = "host")]
pub use crate::host::*;
pub use crate::id::*;
pub use crate::time::*;
