// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::offset::OffsetHours;
use crate::{Clock, Error, Result};

/// Produces the current wall-clock instant in a named timezone.
///
/// Identifiers are IANA names such as `Asia/Tokyo`. An identifier that does not resolve is
/// reported as an error rather than silently replaced by UTC, so the caller can mark that
/// zone as invalid instead of showing wrong data.
///
/// # Examples
///
/// ```
/// use multiclock::{Clock, TimeSource};
///
/// let source = TimeSource::new(Clock::new_system());
/// let tokyo = source.now_in("Asia/Tokyo")?;
///
/// assert_eq!(tokyo.time_zone().iana_name(), Some("Asia/Tokyo"));
/// # Ok::<(), multiclock::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimeSource {
    clock: Clock,
}

impl TimeSource {
    /// Creates a time source reading from the given clock.
    #[must_use]
    pub const fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Returns the clock backing this source.
    #[must_use]
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the current instant.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.timestamp()
    }

    /// Returns the current instant in the zone named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier does not name a known timezone.
    pub fn now_in(&self, identifier: &str) -> Result<Zoned> {
        Self::at(identifier, self.now())
    }

    /// Projects `timestamp` into the zone named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier does not name a known timezone.
    pub fn at(identifier: &str, timestamp: Timestamp) -> Result<Zoned> {
        let zone = resolve(identifier)?;
        Ok(timestamp.to_zoned(zone))
    }

    /// Returns the current instant in the host's local timezone.
    #[must_use]
    pub fn local_now(&self) -> Zoned {
        self.now().to_zoned(self.clock.local_zone())
    }

    /// Returns the IANA name of the host's local timezone, if it has one.
    #[must_use]
    pub fn local_zone_name(&self) -> Option<String> {
        self.clock.local_zone().iana_name().map(ToOwned::to_owned)
    }

    /// Returns the current UTC offset of the zone in whole hours.
    ///
    /// Never fails. See [`OffsetHours::at`] for details.
    #[must_use]
    pub fn utc_offset_hours(&self, identifier: &str) -> OffsetHours {
        OffsetHours::at(identifier, self.now())
    }
}

pub(crate) fn resolve(identifier: &str) -> Result<TimeZone> {
    TimeZone::get(identifier).map_err(|e| Error::unknown_timezone(identifier, e))
}
