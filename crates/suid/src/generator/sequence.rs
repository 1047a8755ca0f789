use portable_atomic::{AtomicU64, Ordering};

/// A lock-free, free-running sequence counter.
///
/// Every call to [`next`](Self::next) is one relaxed `fetch_add`, reduced
/// modulo `max_sequence + 1`. The counter is never reset when the clock
/// ticks, so it never waits for the next tick either. The cost is that
/// requesting more than `max_sequence + 1` values within one tick repeats a
/// sequence value, and two identifiers from the same host and tick become
/// bit-identical.
///
/// One allocator is shared by every generator of a kind that should not
/// collide, typically through an [`Arc`](std::sync::Arc).
///
/// # Example
/// ```
/// use suid::SequenceAllocator;
///
/// let seq = SequenceAllocator::new(3);
/// let values: Vec<u64> = (0..6).map(|_| seq.next()).collect();
/// assert_eq!(values, [0, 1, 2, 3, 0, 1]);
/// ```
#[derive(Debug)]
pub struct SequenceAllocator {
    #[cfg(feature = "cache-padded")]
    counter: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    counter: AtomicU64,
    modulus: u64,
}

impl SequenceAllocator {
    /// Creates an allocator yielding `0..=max_sequence`, starting at zero.
    #[must_use]
    pub fn new(max_sequence: u64) -> Self {
        Self::starting_at(max_sequence, 0)
    }

    /// Creates an allocator whose first value is `start % (max_sequence + 1)`.
    #[must_use]
    pub fn starting_at(max_sequence: u64, start: u64) -> Self {
        let modulus = max_sequence.saturating_add(1);
        let start = start % modulus;
        Self {
            #[cfg(feature = "cache-padded")]
            counter: crossbeam_utils::CachePadded::new(AtomicU64::new(start)),
            #[cfg(not(feature = "cache-padded"))]
            counter: AtomicU64::new(start),
            modulus,
        }
    }

    /// Returns the next sequence value.
    #[inline]
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) % self.modulus
    }

    /// Number of distinct values before the sequence repeats.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }
}
