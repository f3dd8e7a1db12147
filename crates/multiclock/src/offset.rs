// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use jiff::Timestamp;
use jiff::tz::{Offset, TimeZone};

const SECONDS_PER_HOUR: i32 = 3600;

/// The offset of a timezone from UTC in whole hours.
///
/// Fractional offsets are truncated toward zero: `+05:30` becomes `5` and `-03:30` becomes `-3`.
/// The truncation is lossy on purpose; the label only shows whole hours.
///
/// # Examples
///
/// ```
/// use jiff::Timestamp;
/// use multiclock::OffsetHours;
///
/// let now = Timestamp::from_second(1_719_815_415)?;
///
/// assert_eq!(OffsetHours::at("UTC", now), OffsetHours::Known(0));
/// assert_eq!(OffsetHours::at("not-a-zone", now).to_string(), "?");
/// # Ok::<(), jiff::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetHours {
    /// The zone resolved and has this offset.
    Known(i32),
    /// The zone does not resolve. Rendered as `?`.
    Unknown,
}

impl OffsetHours {
    /// Computes the offset of the zone named by `identifier` at `timestamp`.
    ///
    /// Never fails; an unknown identifier yields [`OffsetHours::Unknown`]. The offset must be
    /// recomputed for every tick because daylight-saving transitions change it.
    #[must_use]
    pub fn at(identifier: &str, timestamp: Timestamp) -> Self {
        match TimeZone::get(identifier) {
            Ok(zone) => Self::from(zone.to_offset(timestamp)),
            Err(e) => {
                tracing::debug!(zone.identifier = identifier, error = %e, "offset of unknown timezone");
                Self::Unknown
            }
        }
    }

    /// Returns the whole-hour offset, if known.
    #[must_use]
    pub const fn hours(self) -> Option<i32> {
        match self {
            Self::Known(hours) => Some(hours),
            Self::Unknown => None,
        }
    }
}

impl From<Offset> for OffsetHours {
    fn from(offset: Offset) -> Self {
        // Integer division truncates toward zero.
        Self::Known(offset.seconds() / SECONDS_PER_HOUR)
    }
}

impl fmt::Display for OffsetHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(hours) => write!(f, "{hours}"),
            Self::Unknown => f.write_str("?"),
        }
    }
}
