// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use jiff::{Timestamp, Zoned};

use crate::{DayPeriod, Error, HandAngles, OffsetHours, Result, TimeSource, TimezoneSpec, WallTime};

const SECONDS_PATTERN: &str = ":%S";

/// The strftime-style patterns used for the date and time text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormats {
    date_format: String,
    time_format: String,
}

impl DisplayFormats {
    /// Creates display formats from a date pattern and a time pattern.
    #[must_use]
    pub fn new(date_format: impl Into<String>, time_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            time_format: time_format.into(),
        }
    }

    /// Pattern of the date text, for example `%a, %d %B %Y`.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Pattern of the time text, for example `%H:%M`.
    #[must_use]
    pub fn time_format(&self) -> &str {
        &self.time_format
    }
}

impl Default for DisplayFormats {
    fn default() -> Self {
        Self::new("%a, %d %B %Y", "%H:%M")
    }
}

/// Everything a presenter needs to draw one zone for one tick.
///
/// View models are rebuilt on every tick and carry no identity across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockViewModel {
    zone_label: String,
    timezone: String,
    offset: OffsetHours,
    date_text: String,
    time_text: String,
    seconds_text: Option<String>,
    is_local: bool,
    wall_time: WallTime,
    hand_angles: HandAngles,
    day_period: DayPeriod,
}

impl ClockViewModel {
    /// Builds the view model of `zone` at `timestamp`.
    ///
    /// `local_zone` is the IANA name of the host's timezone. The zone whose identifier equals it
    /// is the local zone and additionally gets the seconds text.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone does not resolve or a pattern cannot be applied.
    pub fn at(zone: &TimezoneSpec, timestamp: Timestamp, local_zone: Option<&str>, formats: &DisplayFormats) -> Result<Self> {
        let zoned = TimeSource::at(&zone.timezone, timestamp)?;
        let is_local = local_zone == Some(zone.timezone.as_str());

        let seconds_text = if is_local {
            Some(format(SECONDS_PATTERN, &zoned)?)
        } else {
            None
        };

        Ok(Self {
            zone_label: zone.label.clone(),
            timezone: zone.timezone.clone(),
            offset: OffsetHours::from(zoned.offset()),
            date_text: format(formats.date_format(), &zoned)?,
            time_text: format(formats.time_format(), &zoned)?,
            seconds_text,
            is_local,
            wall_time: WallTime::from(&zoned),
            hand_angles: HandAngles::from(&zoned),
            day_period: DayPeriod::classify(zoned.hour().unsigned_abs()),
        })
    }

    /// The configured display name.
    #[must_use]
    pub fn zone_label(&self) -> &str {
        &self.zone_label
    }

    /// The configured timezone identifier.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The whole-hour offset from UTC.
    #[must_use]
    pub const fn offset(&self) -> OffsetHours {
        self.offset
    }

    /// The offset label, for example `UTC 9` or `UTC -4`.
    #[must_use]
    pub fn offset_label(&self) -> String {
        format!("UTC {}", self.offset)
    }

    /// The formatted date.
    #[must_use]
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// The formatted time.
    #[must_use]
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// The seconds, as `:SS`, for the local zone only.
    #[must_use]
    pub fn seconds_text(&self) -> Option<&str> {
        self.seconds_text.as_deref()
    }

    /// Whether this zone is the host's timezone.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.is_local
    }

    /// The civil time in the zone.
    #[must_use]
    pub const fn wall_time(&self) -> WallTime {
        self.wall_time
    }

    /// The analog hand angles.
    #[must_use]
    pub const fn hand_angles(&self) -> HandAngles {
        self.hand_angles
    }

    /// The background classification of the zone's hour.
    #[must_use]
    pub const fn day_period(&self) -> DayPeriod {
        self.day_period
    }
}

/// Builds one view model per zone, in the configured order.
///
/// All zones share the same instant so that a frame is consistent. The host's zone is looked up
/// once per call, which picks up a zone change between ticks. A zone that fails leaves an error
/// in its own slot and does not affect the others.
///
/// # Examples
///
/// ```
/// use multiclock::{Clock, DisplayFormats, TimeSource, TimezoneSpec, build};
///
/// let zones = [TimezoneSpec::new("Tokyo", "Asia/Tokyo"), TimezoneSpec::new("Nowhere", "Not/AZone")];
/// let models = build(&zones, &TimeSource::new(Clock::new_system()), &DisplayFormats::default());
///
/// assert_eq!(models[0].as_ref().unwrap().zone_label(), "Tokyo");
/// assert!(models[1].is_err());
/// ```
#[must_use]
pub fn build(zones: &[TimezoneSpec], time_source: &TimeSource, formats: &DisplayFormats) -> Vec<Result<ClockViewModel>> {
    let now = time_source.now();
    let local_zone = time_source.local_zone_name();

    zones
        .iter()
        .map(|zone| ClockViewModel::at(zone, now, local_zone.as_deref(), formats))
        .collect()
}

fn format(pattern: &str, zoned: &Zoned) -> Result<String> {
    jiff::fmt::strtime::format(pattern, zoned).map_err(|e| Error::format(pattern, e))
}
