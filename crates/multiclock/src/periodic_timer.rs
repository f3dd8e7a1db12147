// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::future::poll_fn;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use futures_core::Stream;
use tokio::time::{Instant, Sleep};

use crate::Clock;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A timer that ticks on fixed deadlines.
///
/// The first tick is due one period after creation; tick `n` is due at `start + n * period`.
/// Deadlines are fixed, so the time spent handling a tick does not push later ticks back.
///
/// # Missed ticks
///
/// When the thread is busy past one or more deadlines, the missed ticks are dropped and the
/// timer resumes at the next deadline still in the future. There is no burst of catch-up ticks.
///
/// # Stream Behavior
///
/// `PeriodicTimer` implements [`Stream`] and never completes. Each item is the deadline that
/// fired.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use multiclock::{Clock, PeriodicTimer};
///
/// # async fn periodic_timer_example(clock: &Clock) {
/// let mut timer = PeriodicTimer::new(clock, Duration::from_secs(1));
///
/// for _ in 0..3 {
///     timer.tick().await;
///     // Do something every second
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct PeriodicTimer {
    period: Duration,
    clock: Clock,
    deadline: Option<Instant>,
    sleep: Pin<Box<Sleep>>,
}

impl PeriodicTimer {
    /// Creates a timer that fires every `period`.
    ///
    /// > **Note**: The minimum period is 1ms. A smaller period is adjusted to 1ms.
    #[must_use]
    pub fn new(clock: &Clock, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let deadline = clock.instant().checked_add(period);

        Self {
            period,
            clock: clock.clone(),
            sleep: Box::pin(sleep_until(clock, deadline)),
            deadline,
        }
    }

    /// The effective period of the timer.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next deadline and returns it.
    pub async fn tick(&mut self) -> Instant {
        poll_fn(|cx| self.poll_tick(cx)).await
    }

    fn poll_tick(&mut self, cx: &mut Context<'_>) -> Poll<Instant> {
        // A deadline past the representable range never fires.
        let Some(fired) = self.deadline else {
            return Poll::Pending;
        };

        ready!(self.sleep.as_mut().poll(cx));

        let now = self.clock.instant();
        let next = next_deadline(fired, now, self.period);

        if let Some(next) = next {
            let skipped = missed_ticks(fired, next, self.period);
            if skipped > 0 {
                tracing::debug!(skipped, period.ms = self.period.as_millis(), "periodic timer skipped missed ticks");
            }
            self.sleep.as_mut().reset(next);
        }

        self.deadline = next;
        Poll::Ready(fired)
    }
}

impl Stream for PeriodicTimer {
    type Item = Instant;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_tick(cx).map(Some)
    }
}

fn sleep_until(clock: &Clock, deadline: Option<Instant>) -> Sleep {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline),
        None => clock.delay(Duration::MAX),
    }
}

/// Returns the first deadline after `now` on the grid `fired + k * period`, `k >= 1`.
fn next_deadline(fired: Instant, now: Instant, period: Duration) -> Option<Instant> {
    let next = fired.checked_add(period)?;
    if next > now {
        return Some(next);
    }

    let behind = now.duration_since(fired).as_nanos();
    let steps = behind / period.as_nanos() + 1;
    let steps = u32::try_from(steps).ok()?;

    fired.checked_add(period.checked_mul(steps)?)
}

fn missed_ticks(fired: Instant, next: Instant, period: Duration) -> u128 {
    (next.duration_since(fired).as_nanos() / period.as_nanos()).saturating_sub(1)
}
