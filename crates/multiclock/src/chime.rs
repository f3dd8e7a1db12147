// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::WallTime;

const LAST_MINUTE: u8 = 59;
const LAST_SECOND: i32 = 59;

/// When the top-of-hour chime fires and when it is silenced.
///
/// The chime fires at second `59 + offset_seconds` of minute 59, so a negative offset starts
/// the cue early enough for it to end on the hour. Quiet hours are the *exclusive* hour range
/// `(quiet_start_hour, quiet_end_hour)`; when the start is later than the end the range wraps
/// past midnight, and when both are equal nothing is quiet.
///
/// # Examples
///
/// ```
/// use multiclock::{ChimeWindow, WallTime};
///
/// let window = ChimeWindow::new(-4, 22, 7);
///
/// assert!(window.should_chime(WallTime::new(10, 59, 55).unwrap()));
/// assert!(!window.should_chime(WallTime::new(23, 59, 55).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChimeWindow {
    offset_seconds: i32,
    quiet_start_hour: u8,
    quiet_end_hour: u8,
}

impl ChimeWindow {
    /// Creates a chime window.
    #[must_use]
    pub const fn new(offset_seconds: i32, quiet_start_hour: u8, quiet_end_hour: u8) -> Self {
        Self {
            offset_seconds,
            quiet_start_hour,
            quiet_end_hour,
        }
    }

    /// Offset from second 59 at which the chime fires.
    #[must_use]
    pub const fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// The second of minute 59 at which the chime fires, or `None` if the offset moves it
    /// outside of the minute, in which case it never fires.
    #[must_use]
    pub fn target_second(&self) -> Option<u8> {
        LAST_SECOND
            .checked_add(self.offset_seconds)
            .and_then(|second| u8::try_from(second).ok())
            .filter(|second| *second <= 59)
    }

    /// Returns `true` if the chime is silenced during `hour`.
    #[must_use]
    pub const fn is_quiet(&self, hour: u8) -> bool {
        let (start, end) = (self.quiet_start_hour, self.quiet_end_hour);

        if start < end {
            start < hour && hour < end
        } else if start > end {
            hour > start || hour < end
        } else {
            false
        }
    }

    /// Decides whether the chime fires at `now`.
    ///
    /// The test is an exact match on the second. A tick that is skipped or delayed past the
    /// target second (suspend, a slow render) skips the chime for that hour; there is no
    /// catch-up.
    #[must_use]
    pub fn should_chime(&self, now: WallTime) -> bool {
        now.minute() == LAST_MINUTE && self.target_second() == Some(now.second()) && !self.is_quiet(now.hour())
    }
}

/// Decides whether the chime fires at `now` for the given window.
///
/// Evaluated once per tick against the host's local time, independent of the displayed zones.
#[must_use]
pub fn should_chime(now: WallTime, window: &ChimeWindow) -> bool {
    window.should_chime(now)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn at(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime::new(hour, minute, second).unwrap()
    }

    #[test]
    fn fires_outside_quiet_hours() {
        let window = ChimeWindow::new(-4, 22, 7);

        assert!(should_chime(at(10, 59, 55), &window));
    }

    #[test]
    fn suppressed_inside_wrapping_quiet_hours() {
        let window = ChimeWindow::new(-4, 22, 7);

        assert!(!should_chime(at(23, 59, 55), &window));
        assert!(!should_chime(at(3, 59, 55), &window));
    }

    #[rstest]
    #[case(21, false)]
    #[case(22, false)]
    #[case(23, true)]
    #[case(0, true)]
    #[case(6, true)]
    #[case(7, false)]
    #[case(8, false)]
    fn wrapping_quiet_range_is_exclusive(#[case] hour: u8, #[case] quiet: bool) {
        assert_eq!(ChimeWindow::new(0, 22, 7).is_quiet(hour), quiet);
    }

    #[rstest]
    #[case(7, false)]
    #[case(8, true)]
    #[case(21, true)]
    #[case(22, false)]
    fn non_wrapping_quiet_range_is_exclusive(#[case] hour: u8, #[case] quiet: bool) {
        assert_eq!(ChimeWindow::new(0, 7, 22).is_quiet(hour), quiet);
    }

    #[test]
    fn equal_bounds_are_never_quiet() {
        let window = ChimeWindow::new(0, 5, 5);

        assert!((0..24).all(|hour| !window.is_quiet(hour)));
    }

    #[test]
    fn only_exact_second_of_last_minute() {
        let window = ChimeWindow::new(-4, 22, 7);

        assert!(!should_chime(at(10, 59, 54), &window));
        assert!(!should_chime(at(10, 59, 56), &window));
        assert!(!should_chime(at(10, 58, 55), &window));
        assert!(!should_chime(at(11, 0, 0), &window));
    }

    #[rstest]
    #[case(0, Some(59))]
    #[case(-4, Some(55))]
    #[case(-59, Some(0))]
    #[case(-60, None)]
    #[case(1, None)]
    #[case(i32::MAX, None)]
    fn target_second(#[case] offset: i32, #[case] expected: Option<u8>) {
        assert_eq!(ChimeWindow::new(offset, 22, 7).target_second(), expected);
    }

    #[test]
    fn out_of_minute_offset_never_fires() {
        let window = ChimeWindow::new(1, 22, 7);

        assert!((0..60).all(|second| !should_chime(at(12, 59, second), &window)));
    }
}
