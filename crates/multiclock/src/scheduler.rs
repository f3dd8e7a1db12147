// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::{Clock, PeriodicTimer, Result};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Returns how long to wait from `now` until the next whole wall-clock second.
///
/// A time exactly on a second boundary waits a full second.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use multiclock::alignment_delay;
///
/// let now = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_734);
///
/// assert_eq!(alignment_delay(now), Duration::from_millis(266));
/// ```
#[must_use]
pub fn alignment_delay(now: SystemTime) -> Duration {
    let remaining = match now.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(since_epoch) => NANOS_PER_SECOND - since_epoch.subsec_nanos(),
        Err(e) => match e.duration().subsec_nanos() {
            0 => NANOS_PER_SECOND,
            before_boundary => before_boundary,
        },
    };

    Duration::from_nanos(u64::from(remaining))
}

/// The lifecycle of a [`TickScheduler`].
///
/// The scheduler moves from `Aligning` to `Running` and finally to `Stopped`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SchedulerState {
    /// Waiting for the first wall-clock second boundary.
    Aligning = 0,
    /// Firing ticks at the configured interval.
    Running = 1,
    /// No further ticks fire.
    Stopped = 2,
}

impl SchedulerState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Aligning,
            1 => Self::Running,
            _ => Self::Stopped,
        }
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aligning => "aligning",
            Self::Running => "running",
            Self::Stopped => "stopped",
        })
    }
}

/// A single firing of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    sequence: u64,
    scheduled_at: Instant,
}

impl Tick {
    /// Zero-based number of the tick.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The deadline the tick was scheduled for.
    #[must_use]
    pub const fn scheduled_at(&self) -> Instant {
        self.scheduled_at
    }
}

#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    ticks: AtomicU64,
}

impl Shared {
    fn state(&self) -> SchedulerState {
        SchedulerState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn transition(&self, from: SchedulerState, to: SchedulerState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Drives a callback once per interval, starting on a wall-clock second boundary.
///
/// After [`start`][Self::start] the scheduler waits for [`alignment_delay`] so that the first
/// tick lands on a whole second, fires the callback immediately and then fires it on the fixed
/// deadlines of a [`PeriodicTimer`]. Aligning keeps the displayed seconds changing in step with
/// the wall clock instead of up to a second late.
///
/// A callback that returns an error or panics is logged and the schedule continues. Ticks that cannot be
/// delivered in time are skipped, not replayed.
///
/// Dropping the scheduler stops it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use multiclock::{Clock, SchedulerState, TickScheduler};
///
/// # async fn example() {
/// let scheduler = TickScheduler::start(&Clock::new_system(), Duration::from_secs(1), |tick| {
///     println!("tick {}", tick.sequence());
///     Ok(())
/// });
///
/// tokio::time::sleep(Duration::from_secs(3)).await;
/// scheduler.stop();
///
/// assert_eq!(scheduler.state(), SchedulerState::Stopped);
/// # }
/// ```
#[derive(Debug)]
pub struct TickScheduler {
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

impl TickScheduler {
    /// Starts the scheduler on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime with the time driver enabled.
    pub fn start<F>(clock: &Clock, interval: Duration, callback: F) -> Self
    where
        F: FnMut(Tick) -> Result<()> + Send + 'static,
    {
        let shared = Arc::new(Shared {
            state: AtomicU8::new(SchedulerState::Aligning as u8),
            ticks: AtomicU64::new(0),
        });

        let task = tokio::spawn(drive(clock.clone(), interval, Arc::clone(&shared), callback));

        Self { shared, task }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.shared.state()
    }

    /// Returns the number of ticks fired so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }

    /// Stops the scheduler. No tick fires after this returns.
    ///
    /// A tick that is running on another thread completes.
    pub fn stop(&self) {
        let previous = self.shared.state.swap(SchedulerState::Stopped as u8, Ordering::AcqRel);
        if SchedulerState::from_u8(previous) != SchedulerState::Stopped {
            tracing::debug!(ticks = self.ticks(), "tick scheduler stopped");
        }

        self.task.abort();
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive<F>(clock: Clock, interval: Duration, shared: Arc<Shared>, mut callback: F)
where
    F: FnMut(Tick) -> Result<()>,
{
    let delay = alignment_delay(clock.system_time());
    tracing::debug!(delay.ms = delay.as_millis(), interval.ms = interval.as_millis(), "aligning first tick");
    clock.delay(delay).await;

    if !shared.transition(SchedulerState::Aligning, SchedulerState::Running) {
        return;
    }

    let mut scheduled_at = clock.instant();
    let mut timer = PeriodicTimer::new(&clock, interval);

    loop {
        if shared.state() == SchedulerState::Stopped {
            return;
        }

        let sequence = shared.ticks.fetch_add(1, Ordering::AcqRel);
        match catch_unwind(AssertUnwindSafe(|| callback(Tick { sequence, scheduled_at }))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                tracing::warn!(tick.sequence = sequence, error = %error, "tick callback failed, continuing");
            }
            Err(payload) => {
                tracing::warn!(tick.sequence = sequence, panic = panic_message(&*payload), "tick callback panicked, continuing");
            }
        }

        scheduled_at = timer.tick().await;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
