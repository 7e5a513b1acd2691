//! Calendar dates without times of day.
//!
//! This crate provides day-precision value types and the algorithms around them:
//! - `Date`, a calendar day bound to a timezone, with month-end aware arithmetic
//! - `Month`, a year and month with proleptic rollover
//! - `DateRange`, an inclusive span of dates, and its overlap/containment queries
//! - `Dates` and `DateRanges` collections with stable sorting and min/max
//! - `NullDate`, a date with an explicit null state
//!
//! "Today" and the default timezone come from the `clock` module, which can be
//! swapped for a fixed clock in tests.

pub mod clock;
pub mod config;
pub mod date;
pub mod date_range;
pub mod date_ranges;
pub mod dates;
pub mod error;
pub mod location;
pub mod month;
pub mod null_date;
#[cfg(feature = "sqlite")]
mod sqlite;

// Re-export the main types at crate root for convenience
pub use crate::clock::{Clock, ClockGuard, FixedClock, SystemClock, set_clock};
pub use crate::config::CaldateConfig;
pub use crate::date::{DATE_LAYOUT, Date};
pub use crate::date_range::{DateRange, DateRangeIter};
pub use crate::date_ranges::DateRanges;
pub use crate::dates::Dates;
pub use crate::error::{CalDateError, CalDateResult};
pub use crate::location::Location;
pub use crate::month::{MONTH_LAYOUT, Month};
pub use crate::null_date::NullDate;
