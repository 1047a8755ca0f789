#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

/// A trait for wall-clock time sources.
///
/// Generators read the clock once per identifier and truncate to their
/// kind's unit: seconds for [`Suid`], microseconds for [`Guid`]. Plug in a
/// fixed or stepping source in tests.
///
/// # Example
///
/// ```
/// use suid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_micros(&self) -> u64 {
///         1_745_400_001_250_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_secs(), 1_745_400_001);
/// ```
///
/// [`Suid`]: crate::Suid
/// [`Guid`]: crate::Guid
pub trait TimeSource {
    /// Microseconds since the Unix epoch.
    fn current_micros(&self) -> u64;

    /// Whole seconds since the Unix epoch.
    fn current_secs(&self) -> u64 {
        self.current_micros() / 1_000_000
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_micros(&self) -> u64 {
        (**self).current_micros()
    }

    fn current_secs(&self) -> u64 {
        (**self).current_secs()
    }
}

/// The system wall clock.
///
/// A clock set before the Unix epoch reads as zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    fn since_epoch() -> core::time::Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

impl TimeSource for SystemClock {
    fn current_micros(&self) -> u64 {
        // u64 microseconds last until the year 586,912.
        Self::since_epoch().as_micros() as u64
    }

    fn current_secs(&self) -> u64 {
        Self::since_epoch().as_secs()
    }
}
