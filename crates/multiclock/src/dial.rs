// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::HandAngles;

const HOUR_HAND_RATIO: f64 = 0.6;
const SECOND_HAND_RATIO: f64 = 0.95;
const TICK_INNER_RATIO: f64 = 0.9;

/// A point in screen coordinates: origin at the top-left corner, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start of the line.
    pub from: Point,
    /// End of the line.
    pub to: Point,
}

/// Line geometry of the three hands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hands {
    /// From the center toward the hour.
    pub hour: Segment,
    /// From the center toward the minute.
    pub minute: Segment,
    /// From the center toward the second.
    pub second: Segment,
}

/// Geometry of a square analog clock face.
///
/// The face is a circle inset by `padding` from a `size`×`size` square. The minute hand reaches
/// `(size - 4 * padding) / 2` from the center, the hour hand 60% of that and the second hand 95%.
/// The twelve hour ticks run from 90% to 100% of the minute-hand length.
///
/// [`HandAngles`] are measured clockwise from 12 o'clock; screen angles are measured clockwise
/// from 3 o'clock, so 90° is subtracted before projecting.
///
/// # Examples
///
/// ```
/// use multiclock::{Dial, HandAngles, WallTime};
///
/// let dial = Dial::default();
/// let hands = dial.hands(&HandAngles::from_wall_time(WallTime::new(3, 0, 0).unwrap()));
///
/// // At 3 o'clock the hour hand points straight right.
/// assert!((hands.hour.to.y - dial.center().y).abs() < 1e-9);
/// assert!(hands.hour.to.x > dial.center().x);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    size: f64,
    padding: f64,
}

impl Dial {
    /// Creates a dial for a square of `size` with the face inset by `padding`.
    #[must_use]
    pub const fn new(size: f64, padding: f64) -> Self {
        Self { size, padding }
    }

    /// The center of the face.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.size / 2.0,
            y: self.size / 2.0,
        }
    }

    /// Length of the minute hand.
    #[must_use]
    pub fn minute_hand_length(&self) -> f64 {
        (self.size - self.padding * 4.0) / 2.0
    }

    /// The bounding square of the face circle as `(left, top, width)`.
    #[must_use]
    pub fn bezel(&self) -> (f64, f64, f64) {
        (self.padding, self.padding, self.size - self.padding * 2.0)
    }

    /// Computes the hand segments for the given angles.
    #[must_use]
    pub fn hands(&self, angles: &HandAngles) -> Hands {
        let length = self.minute_hand_length();

        Hands {
            hour: self.spoke(angles.hour_degrees(), 0.0, length * HOUR_HAND_RATIO),
            minute: self.spoke(angles.minute_degrees(), 0.0, length),
            second: self.spoke(angles.second_degrees(), 0.0, length * SECOND_HAND_RATIO),
        }
    }

    /// Computes the twelve hour ticks, starting at 12 o'clock and going clockwise.
    #[must_use]
    pub fn hour_ticks(&self) -> [Segment; 12] {
        let length = self.minute_hand_length();

        std::array::from_fn(|mark| {
            let degrees = 30.0 * f64::from(u8::try_from(mark).unwrap_or_default());
            self.spoke(degrees, length * TICK_INNER_RATIO, length)
        })
    }

    fn spoke(&self, clock_degrees: f64, inner: f64, outer: f64) -> Segment {
        let center = self.center();
        let radians = (clock_degrees - 90.0).to_radians();
        let (sin, cos) = radians.sin_cos();

        Segment {
            from: Point {
                x: inner.mul_add(cos, center.x),
                y: inner.mul_add(sin, center.y),
            },
            to: Point {
                x: outer.mul_add(cos, center.x),
                y: outer.mul_add(sin, center.y),
            },
        }
    }
}

impl Default for Dial {
    fn default() -> Self {
        Self::new(125.0, 5.0)
    }
}
