// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use jiff::tz::TimeZone;
use tokio::time::Instant;

use crate::Clock;

/// Controls wall time and the local timezone in tests.
///
/// `ClockControl` is available when the `test-util` feature is enabled. It starts frozen at the
/// UNIX epoch (or at the time passed to [`ClockControl::new_at`]) with UTC as the local zone.
///
/// Wall time moves in two ways:
///
/// - [`advance`][Self::advance] moves it forward immediately, without touching the Tokio clock.
///   This also models a suspended machine or a stepped system clock, where ticks are missed.
/// - With [`follow_tokio_time`][Self::follow_tokio_time] enabled, wall time also moves with the
///   Tokio clock. Combined with `#[tokio::test(start_paused = true)]`, delays and periodic
///   timers complete instantly while wall time stays consistent with them.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use std::time::{Duration, SystemTime};
///
/// use multiclock::ClockControl;
///
/// let start = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
/// let control = ClockControl::new_at(start);
/// let clock = control.to_clock();
///
/// control.advance(Duration::from_secs(1));
///
/// assert_eq!(clock.system_time(), start + Duration::from_secs(1));
/// # }
/// ```
///
/// # Production code and `ClockControl`
///
/// Never enable the `test-util` feature outside of `dev-dependencies`.
#[derive(Debug, Clone)]
pub struct ClockControl {
    state: Arc<Mutex<State>>,
}

impl ClockControl {
    /// Creates a frozen control at the UNIX epoch with UTC as the local zone.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                system_time: SystemTime::UNIX_EPOCH,
                anchor: None,
                local_zone: TimeZone::UTC,
            })),
        }
    }

    /// Creates a frozen control at the specified wall-clock time.
    #[must_use]
    pub fn new_at(time: impl Into<SystemTime>) -> Self {
        let this = Self::new();
        this.with_state(|s| s.system_time = time.into());
        this
    }

    /// Sets the timezone reported as the host's local zone.
    #[must_use]
    pub fn with_local_zone(self, zone: TimeZone) -> Self {
        self.with_state(|s| s.local_zone = zone);
        self
    }

    /// Determines whether wall time moves together with the Tokio clock.
    ///
    /// The current Tokio instant becomes the anchor. When called inside a runtime with paused
    /// time, wall time only moves when the runtime advances its clock.
    #[must_use]
    pub fn follow_tokio_time(self, enabled: bool) -> Self {
        self.with_state(|s| {
            s.system_time = s.now();
            s.anchor = enabled.then(Instant::now);
        });
        self
    }

    /// Converts the control to a [`Clock`].
    #[must_use]
    pub fn to_clock(&self) -> Clock {
        Clock::with_control(self.clone())
    }

    /// Moves wall time forward by the specified duration.
    ///
    /// Tokio timers are not affected, so a tick that was due within the skipped span simply
    /// observes the later wall time.
    pub fn advance(&self, duration: Duration) {
        self.with_state(|s| {
            s.system_time = s.system_time.checked_add(duration).expect(OUTSIDE_RANGE_MESSAGE);
        });
    }

    /// Moves wall time to the specified point, forward or backward.
    pub fn advance_to(&self, time: impl Into<SystemTime>) {
        let target = time.into();
        self.with_state(|s| {
            let elapsed = s.anchor.map_or(Duration::ZERO, |anchor| Instant::now().duration_since(anchor));
            // Keep the anchor so that following Tokio time still works after the jump.
            s.system_time = target.checked_sub(elapsed).expect(OUTSIDE_RANGE_MESSAGE);
        });
    }

    pub(super) fn system_time(&self) -> SystemTime {
        self.with_state(|s| s.now())
    }

    pub(super) fn local_zone(&self) -> TimeZone {
        self.with_state(|s| s.local_zone.clone())
    }

    fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut State) -> R,
    {
        f(&mut self.state.lock().expect("acquiring lock must always succeed"))
    }
}

impl Default for ClockControl {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ClockControl> for Clock {
    fn from(control: ClockControl) -> Self {
        control.to_clock()
    }
}

impl From<&ClockControl> for Clock {
    fn from(control: &ClockControl) -> Self {
        control.to_clock()
    }
}

#[derive(Debug)]
struct State {
    system_time: SystemTime,
    anchor: Option<Instant>,
    local_zone: TimeZone,
}

impl State {
    fn now(&self) -> SystemTime {
        match self.anchor {
            Some(anchor) => self
                .system_time
                .checked_add(Instant::now().duration_since(anchor))
                .expect(OUTSIDE_RANGE_MESSAGE),
            None => self.system_time,
        }
    }
}

static OUTSIDE_RANGE_MESSAGE: &str = "moving the clock outside of the range supported by SystemTime is not possible";
