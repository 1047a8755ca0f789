use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, IdGenerator, Result, SequenceAllocator, Suid, SystemClock, TimeSource};

/// A lock-free generator of [`Suid`]s for one host.
///
/// Each call reads the clock in whole seconds, takes the next value of the
/// shared [`SequenceAllocator`] and packs `time | sequence | host`. The
/// allocator's `fetch_add` is the only synchronization, so the generator can
/// be shared freely across threads.
///
/// ## Caveats
/// - More than 4,194,304 identifiers per second on one host repeat a
///   sequence value and may collide.
/// - A clock that steps backwards yields identifiers that sort before earlier
///   ones. Nothing detects this.
/// - Past year 2242 the time field wraps to zero.
///
/// # Example
/// ```
/// use suid::{Id, SuidGenerator, SystemClock};
///
/// let generator = SuidGenerator::new(1, SystemClock).unwrap();
/// let a = generator.next_id();
/// let b = generator.next_id();
/// assert_ne!(a, b);
/// assert!(a.verify());
/// ```
#[derive(Debug)]
pub struct SuidGenerator<T = SystemClock>
where
    T: TimeSource,
{
    host: u64,
    clock: T,
    sequence: Arc<SequenceAllocator>,
}

impl<T> SuidGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator with its own sequence allocator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `host` exceeds [`Suid::MAX_HOST`].
    pub fn new(host: u64, clock: T) -> Result<Self> {
        Self::with_allocator(
            host,
            clock,
            Arc::new(SequenceAllocator::new(Suid::MAX_SEQUENCE)),
        )
    }

    /// Creates a generator drawing sequence values from `sequence`, which
    /// may be shared with other generators.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHost`] if `host` exceeds [`Suid::MAX_HOST`].
    /// - [`Error::InvalidSequence`] if `sequence` yields values above
    ///   [`Suid::MAX_SEQUENCE`].
    pub fn with_allocator(host: u64, clock: T, sequence: Arc<SequenceAllocator>) -> Result<Self> {
        if host > Suid::MAX_HOST {
            return Err(Error::InvalidHost {
                host,
                max: Suid::MAX_HOST,
            });
        }
        if sequence.modulus() > Suid::MAX_SEQUENCE + 1 {
            return Err(Error::InvalidSequence {
                modulus: sequence.modulus(),
                capacity: Suid::MAX_SEQUENCE + 1,
            });
        }
        Ok(Self {
            host,
            clock,
            sequence,
        })
    }

    /// Returns a new identifier.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Suid {
        // Host and sequence are bounded at construction; only time wraps.
        let time = self.clock.current_secs() & Suid::MAX_TIME;
        let sequence = self.sequence.next();
        Suid::from_raw(Suid::LAYOUT.pack_wrapping([0, time, sequence, self.host]))
    }

    /// The host id stamped into every identifier.
    #[must_use]
    pub const fn host(&self) -> u64 {
        self.host
    }

    /// The allocator this generator draws from.
    #[must_use]
    pub fn allocator(&self) -> &Arc<SequenceAllocator> {
        &self.sequence
    }
}

#[cfg(feature = "host")]
impl SuidGenerator<SystemClock> {
    /// Creates a generator on the system clock using the process-wide host
    /// id, reduced to the 8-bit host field.
    #[must_use]
    pub fn from_env() -> Self {
        let host = crate::process_host_id() & Suid::MAX_HOST;
        Self {
            host,
            clock: SystemClock,
            sequence: Arc::new(SequenceAllocator::new(Suid::MAX_SEQUENCE)),
        }
    }
}

impl<T> IdGenerator for SuidGenerator<T>
where
    T: TimeSource,
{
    type Id = Suid;

    fn next_id(&self) -> Suid {
        self.next_id()
    }
}
