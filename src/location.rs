//! Timezone binding for calendar values.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::CalDateError;

/// Where a [`Date`](crate::Date) lives: a named IANA zone or a fixed UTC offset.
///
/// Two locations are equal when they name the same zone, or carry the same
/// offset. A named zone and a fixed offset are never equal, even when the
/// offsets coincide at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Zone(Tz),
    Fixed(FixedOffset),
}

impl Location {
    pub const UTC: Location = Location::Zone(Tz::UTC);

    /// UTC offset in effect at the given wall-clock time.
    ///
    /// Ambiguous wall-clock times resolve to the earlier offset; times that
    /// fall into a gap use the offset in effect at the same UTC reading.
    pub fn offset_at_local(&self, local: &NaiveDateTime) -> FixedOffset {
        match self {
            Location::Fixed(offset) => *offset,
            Location::Zone(tz) => tz
                .offset_from_local_datetime(local)
                .earliest()
                .unwrap_or_else(|| tz.offset_from_utc_datetime(local))
                .fix(),
        }
    }

    /// UTC offset in effect at the given UTC instant.
    pub fn offset_at_utc(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Location::Fixed(offset) => *offset,
            Location::Zone(tz) => tz.offset_from_utc_datetime(utc).fix(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::UTC
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Location::Zone(tz) => write!(f, "{}", tz.name()),
            Location::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for Location {
    type Err = CalDateError;

    /// Accepts an IANA zone name (`Europe/Oslo`) or a fixed offset (`+09:00`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(tz) = s.parse::<Tz>() {
            return Ok(Location::Zone(tz));
        }

        s.parse::<FixedOffset>()
            .map(Location::Fixed)
            .map_err(|_| CalDateError::parse(s, "IANA zone name or +HH:MM", "unknown location"))
    }
}

impl From<Tz> for Location {
    fn from(tz: Tz) -> Self {
        Location::Zone(tz)
    }
}

impl From<FixedOffset> for Location {
    fn from(offset: FixedOffset) -> Self {
        Location::Fixed(offset)
    }
}

impl From<Utc> for Location {
    fn from(_: Utc) -> Self {
        Location::UTC
    }
}
