// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::{Duration, SystemTime};

use jiff::Timestamp;
use jiff::tz::TimeZone;
use tokio::time::{Instant, Sleep};

/// Provides an abstraction for the time-related operations of the clock.
///
/// Every component that needs "now" receives a `Clock` instead of reading the system clock
/// directly. In production the clock is created with [`Clock::new_system`]. In tests it is
/// created from a [`ClockControl`][crate::ClockControl] (available with the `test-util`
/// feature), which pins wall time and the local timezone to values chosen by the test.
///
/// The clock provides:
///
/// - Absolute wall time via [`system_time`][Self::system_time] and [`timestamp`][Self::timestamp].
/// - Monotonic time via [`instant`][Self::instant], driven by the Tokio clock.
/// - Delays via [`delay`][Self::delay], used to align and pace ticks.
/// - The host's local timezone via [`local_zone`][Self::local_zone].
///
/// # Cloning and shared state
///
/// Cloning a clock is inexpensive and every clone observes the same time. Adjustments made
/// through a `ClockControl` are visible to all clocks created from it.
///
/// # Examples
///
/// ```
/// use multiclock::Clock;
///
/// let clock = Clock::new_system();
///
/// let time1 = clock.timestamp();
/// let time2 = clock.timestamp();
///
/// assert!(time2 >= time1);
/// ```
#[derive(Debug, Clone)]
pub struct Clock(ClockState);

#[derive(Debug, Clone)]
enum ClockState {
    System,
    #[cfg(any(feature = "test-util", test))]
    ClockControl(crate::ClockControl),
}

impl Clock {
    /// Creates a clock that reads the operating system's wall clock and timezone.
    #[must_use]
    pub const fn new_system() -> Self {
        Self(ClockState::System)
    }

    /// Creates a frozen clock at the specified time.
    ///
    /// This is a convenience method equivalent to calling `ClockControl::new_at(time).to_clock()`.
    #[cfg(any(feature = "test-util", test))]
    #[must_use]
    pub fn new_frozen_at(time: impl Into<SystemTime>) -> Self {
        crate::ClockControl::new_at(time).to_clock()
    }

    #[cfg(any(feature = "test-util", test))]
    pub(crate) const fn with_control(control: crate::ClockControl) -> Self {
        Self(ClockState::ClockControl(control))
    }

    /// Retrieves the current wall-clock time.
    ///
    /// > **Note**: Wall time is not monotonic and can jump when the operating system adjusts
    /// > its clock. Use [`instant`][Self::instant] to measure intervals.
    #[must_use]
    pub fn system_time(&self) -> SystemTime {
        match &self.0 {
            ClockState::System => SystemTime::now(),
            #[cfg(any(feature = "test-util", test))]
            ClockState::ClockControl(control) => control.system_time(),
        }
    }

    /// Retrieves the current wall-clock time as a [`Timestamp`].
    ///
    /// Times outside of the range supported by `jiff` saturate to the nearest boundary.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        to_timestamp_saturating(self.system_time())
    }

    /// Retrieves the current monotonic instant from the Tokio clock.
    ///
    /// The instant honors paused Tokio time, which keeps scheduler tests deterministic.
    #[must_use]
    pub fn instant(&self) -> Instant {
        Instant::now()
    }

    /// Returns the timezone of the host.
    ///
    /// The zone is looked up on every call because it is derived from the environment
    /// and may change while the process runs.
    #[must_use]
    pub fn local_zone(&self) -> TimeZone {
        match &self.0 {
            ClockState::System => TimeZone::system(),
            #[cfg(any(feature = "test-util", test))]
            ClockState::ClockControl(control) => control.local_zone(),
        }
    }

    /// Creates a future that completes after the specified duration.
    #[must_use]
    pub fn delay(&self, duration: Duration) -> Sleep {
        match self.instant().checked_add(duration) {
            Some(deadline) => tokio::time::sleep_until(deadline),
            // Far enough in the future that it never completes in practice.
            None => tokio::time::sleep(Duration::from_secs(u64::from(u32::MAX))),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new_system()
    }
}

impl AsRef<Self> for Clock {
    fn as_ref(&self) -> &Self {
        self
    }
}

pub(crate) fn to_timestamp_saturating(system_time: SystemTime) -> Timestamp {
    match Timestamp::try_from(system_time) {
        Ok(timestamp) => timestamp,
        Err(_) => match system_time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(_) => Timestamp::MAX,
            Err(_) => Timestamp::MIN,
        },
    }
}
