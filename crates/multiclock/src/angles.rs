// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use jiff::Zoned;

const DEGREES_PER_MINUTE_MARK: f64 = 360.0 / 60.0;
const DEGREES_PER_HOUR_MARK: f64 = 360.0 / 12.0;

/// The civil hour, minute and second of an instant in its own timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    /// Creates a wall time, or `None` if a component is out of range.
    ///
    /// Leap seconds are not represented; `second` must be below 60.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self { hour, minute, second })
        } else {
            None
        }
    }

    /// The hour of the day, `0..24`.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// The minute of the hour, `0..60`.
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// The second of the minute, `0..60`.
    #[must_use]
    pub const fn second(self) -> u8 {
        self.second
    }
}

impl From<&Zoned> for WallTime {
    fn from(zoned: &Zoned) -> Self {
        // jiff guarantees the civil fields are in range and never reports a leap second.
        Self {
            hour: zoned.hour().unsigned_abs(),
            minute: zoned.minute().unsigned_abs(),
            second: zoned.second().unsigned_abs(),
        }
    }
}

/// Angles of the three hands of an analog clock.
///
/// Angles are in degrees, measured clockwise from 12 o'clock, and lie in `[0, 360)`.
/// Renderers convert to their own convention, see [`Dial`][crate::Dial].
///
/// # Examples
///
/// ```
/// use multiclock::{HandAngles, WallTime};
///
/// let angles = HandAngles::from_wall_time(WallTime::new(15, 30, 15).unwrap());
///
/// assert_eq!(angles.hour_degrees(), 105.0);
/// assert_eq!(angles.minute_degrees(), 180.0);
/// assert_eq!(angles.second_degrees(), 90.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    hour_degrees: f64,
    minute_degrees: f64,
    second_degrees: f64,
}

impl HandAngles {
    /// Computes the hand angles for a wall time.
    ///
    /// The hour hand advances continuously with the minutes; the minute and second hands
    /// jump from mark to mark.
    #[must_use]
    pub fn from_wall_time(time: WallTime) -> Self {
        let hour = f64::from(time.hour % 12) + f64::from(time.minute) / 60.0;

        Self {
            hour_degrees: DEGREES_PER_HOUR_MARK * hour,
            minute_degrees: DEGREES_PER_MINUTE_MARK * f64::from(time.minute),
            second_degrees: DEGREES_PER_MINUTE_MARK * f64::from(time.second),
        }
    }

    /// Angle of the hour hand.
    #[must_use]
    pub const fn hour_degrees(&self) -> f64 {
        self.hour_degrees
    }

    /// Angle of the minute hand.
    #[must_use]
    pub const fn minute_degrees(&self) -> f64 {
        self.minute_degrees
    }

    /// Angle of the second hand.
    #[must_use]
    pub const fn second_degrees(&self) -> f64 {
        self.second_degrees
    }
}

impl From<&Zoned> for HandAngles {
    fn from(zoned: &Zoned) -> Self {
        Self::from_wall_time(WallTime::from(zoned))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    #![expect(clippy::float_cmp, reason = "angles are exact multiples in these tests")]

    use super::*;

    fn angles(hour: u8, minute: u8, second: u8) -> HandAngles {
        HandAngles::from_wall_time(WallTime::new(hour, minute, second).unwrap())
    }

    #[test]
    fn all_angles_in_range() {
        for hour in 0..24 {
            for minute in 0..60 {
                for second in [0, 1, 29, 59] {
                    let a = angles(hour, minute, second);
                    for degrees in [a.hour_degrees(), a.minute_degrees(), a.second_degrees()] {
                        assert!((0.0..360.0).contains(&degrees), "{hour}:{minute}:{second} -> {degrees}");
                    }
                }
            }
        }
    }

    #[test]
    fn second_hand_is_six_degrees_per_second() {
        for second in 0..60 {
            assert_eq!(angles(0, 0, second).second_degrees(), 6.0 * f64::from(second));
        }

        assert_eq!(angles(0, 0, 15).second_degrees(), 90.0);
    }

    #[test]
    fn hour_hand_at_half_past_three_pm() {
        assert_eq!(angles(15, 30, 0).hour_degrees(), 105.0);
    }

    #[test]
    fn hour_hand_wraps_at_noon_and_midnight() {
        assert_eq!(angles(0, 0, 0).hour_degrees(), 0.0);
        assert_eq!(angles(12, 0, 0).hour_degrees(), 0.0);
        assert_eq!(angles(23, 59, 0).hour_degrees(), 30.0 * (11.0 + 59.0 / 60.0));
    }

    #[test]
    fn minute_hand_ignores_seconds() {
        assert_eq!(angles(9, 45, 0).minute_degrees(), 270.0);
        assert_eq!(angles(9, 45, 59).minute_degrees(), 270.0);
    }

    #[test]
    fn wall_time_rejects_out_of_range() {
        assert!(WallTime::new(24, 0, 0).is_none());
        assert!(WallTime::new(0, 60, 0).is_none());
        assert!(WallTime::new(0, 0, 60).is_none());
        assert!(WallTime::new(23, 59, 59).is_some());
    }

    #[test]
    fn from_zoned() {
        let zoned: Zoned = "2024-07-01T15:30:15+09:00[Asia/Tokyo]".parse().unwrap();

        assert_eq!(WallTime::from(&zoned), WallTime::new(15, 30, 15).unwrap());
        assert_eq!(HandAngles::from(&zoned), angles(15, 30, 15));
    }
}
