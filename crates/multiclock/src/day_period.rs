// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// A coarse classification of the hour of day, used to pick a background image.
///
/// The periods partition the day with half-open ranges:
///
/// | Period  | Hours           |
/// |---------|-----------------|
/// | `Dawn`  | `[5, 8)`        |
/// | `Day`   | `[8, 17)`       |
/// | `Dusk`  | `[17, 19)`      |
/// | `Night` | `[19, 24) ∪ [0, 5)` |
///
/// # Examples
///
/// ```
/// use multiclock::DayPeriod;
///
/// assert_eq!(DayPeriod::classify(7), DayPeriod::Dawn);
/// assert_eq!(DayPeriod::classify(8), DayPeriod::Day);
/// assert_eq!(DayPeriod::classify(19).asset_name(), "night.png");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    /// From 05:00 until 08:00.
    Dawn,
    /// From 08:00 until 17:00.
    Day,
    /// From 17:00 until 19:00.
    Dusk,
    /// From 19:00 until 05:00 the next day.
    Night,
}

impl DayPeriod {
    /// All periods in the order they occur after midnight's night.
    pub const ALL: [Self; 4] = [Self::Dawn, Self::Day, Self::Dusk, Self::Night];

    /// Classifies an hour of the day. Hours outside `0..24` are treated as night.
    #[must_use]
    pub const fn classify(hour: u8) -> Self {
        match hour {
            5..8 => Self::Dawn,
            8..17 => Self::Day,
            17..19 => Self::Dusk,
            _ => Self::Night,
        }
    }

    /// The lowercase tag of the period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }

    /// File name of the background image for the period.
    #[must_use]
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Dawn => "dawn.png",
            Self::Day => "day.png",
            Self::Dusk => "dusk.png",
            Self::Night => "night.png",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
