use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, Group, Guid, IdGenerator, Result, SequenceAllocator, SystemClock, TimeSource};

/// A lock-free generator of [`Guid`]s for one host.
///
/// Works like [`SuidGenerator`](crate::SuidGenerator) at microsecond
/// resolution, and stamps a caller-chosen [`Group`] into the top three bits.
/// All groups draw from the same allocator, so a group never widens the
/// sequence space.
///
/// ## Caveats
/// - More than 131,072 identifiers per microsecond on one host repeat a
///   sequence value and may collide.
/// - A clock that steps backwards is not detected.
///
/// # Example
/// ```
/// use suid::{Group, GuidGenerator, SystemClock};
///
/// let generator = GuidGenerator::new(9, SystemClock).unwrap();
/// let id = generator.next_id_in(Group::new(4).unwrap());
/// assert_eq!((id.group(), id.host()), (4, 9));
/// assert!(generator.try_next_id_in(8).is_err());
/// ```
#[derive(Debug)]
pub struct GuidGenerator<T = SystemClock>
where
    T: TimeSource,
{
    host: u64,
    clock: T,
    sequence: Arc<SequenceAllocator>,
}

impl<T> GuidGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator with its own sequence allocator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `host` exceeds [`Guid::MAX_HOST`].
    pub fn new(host: u64, clock: T) -> Result<Self> {
        Self::with_allocator(
            host,
            clock,
            Arc::new(SequenceAllocator::new(Guid::MAX_SEQUENCE)),
        )
    }

    /// Creates a generator drawing sequence values from `sequence`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHost`] if `host` exceeds [`Guid::MAX_HOST`].
    /// - [`Error::InvalidSequence`] if `sequence` yields values above
    ///   [`Guid::MAX_SEQUENCE`].
    pub fn with_allocator(host: u64, clock: T, sequence: Arc<SequenceAllocator>) -> Result<Self> {
        if host > Guid::MAX_HOST {
            return Err(Error::InvalidHost {
                host,
                max: Guid::MAX_HOST,
            });
        }
        if sequence.modulus() > Guid::MAX_SEQUENCE + 1 {
            return Err(Error::InvalidSequence {
                modulus: sequence.modulus(),
                capacity: Guid::MAX_SEQUENCE + 1,
            });
        }
        Ok(Self {
            host,
            clock,
            sequence,
        })
    }

    /// Returns a new identifier in [`Group::DEFAULT`].
    pub fn next_id(&self) -> Guid {
        self.next_id_in(Group::DEFAULT)
    }

    /// Returns a new identifier tagged with `group`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_in(&self, group: Group) -> Guid {
        // Host and sequence are bounded at construction; only time wraps.
        let time = self.clock.current_micros() & Guid::MAX_TIME;
        let sequence = self.sequence.next();
        Guid::from_bytes(Guid::LAYOUT.pack_wrapping([
            u64::from(group.get()),
            time,
            sequence,
            self.host,
        ]))
    }

    /// Like [`next_id_in`](Self::next_id_in) with an unvalidated group tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroup`] if `group` exceeds [`Group::MAX`]; no
    /// sequence value is consumed in that case.
    pub fn try_next_id_in(&self, group: u8) -> Result<Guid> {
        Ok(self.next_id_in(Group::new(group)?))
    }

    #[must_use]
    pub const fn host(&self) -> u64 {
        self.host
    }

    #[must_use]
    pub fn allocator(&self) -> &Arc<SequenceAllocator> {
        &self.sequence
    }
}

#[cfg(feature = "host")]
impl GuidGenerator<SystemClock> {
    /// Creates a generator on the system clock using the process-wide host
    /// id, reduced to the 7-bit host field.
    #[must_use]
    pub fn from_env() -> Self {
        let host = crate::process_host_id() & Guid::MAX_HOST;
        Self {
            host,
            clock: SystemClock,
            sequence: Arc::new(SequenceAllocator::new(Guid::MAX_SEQUENCE)),
        }
    }
}

impl<T> IdGenerator for GuidGenerator<T>
where
    T: TimeSource,
{
    type Id = Guid;

    fn next_id(&self) -> Guid {
        self.next_id()
    }
}
