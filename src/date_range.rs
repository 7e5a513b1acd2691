//! Inclusive ranges of dates.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::{DATE_LAYOUT, Date};
use crate::dates::Dates;
use crate::error::{CalDateError, CalDateResult};
use crate::location::Location;

/// An inclusive range `start..=end` of dates in a single location.
///
/// Construction rejects, in this order: bounds in different locations,
/// exactly one zero bound, an end before the start. The zero range has two
/// zero bounds and stands for "unset". Note that two zero ranges overlap
/// each other like any other pair of identical ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange", into = "RawDateRange")]
pub struct DateRange {
    start: Date,
    end: Date,
}

/// Unvalidated wire form, `{"start": "...", "end": "..."}`.
#[derive(Serialize, Deserialize)]
struct RawDateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    // Factory functions

    pub fn new(start: Date, end: Date) -> CalDateResult<DateRange> {
        if start.location() != end.location() {
            return Err(CalDateError::DifferentTimeZone);
        }

        if start.is_zero() != end.is_zero() {
            return Err(CalDateError::OnlyOneSideIsZero);
        }

        if end.before(&start) {
            return Err(CalDateError::EndBeforeStart);
        }

        Ok(DateRange { start, end })
    }

    pub fn must_new(start: Date, end: Date) -> DateRange {
        DateRange::new(start, end).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn zero() -> DateRange {
        DateRange::default()
    }

    /// Parse two canonical `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> CalDateResult<DateRange> {
        DateRange::new(Date::parse(start)?, Date::parse(end)?)
    }

    pub fn must_parse(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn parse_with(layout: &str, start: &str, end: &str) -> CalDateResult<DateRange> {
        DateRange::new(
            Date::parse_with(layout, start)?,
            Date::parse_with(layout, end)?,
        )
    }

    pub fn must_parse_with(layout: &str, start: &str, end: &str) -> DateRange {
        DateRange::parse_with(layout, start, end).unwrap_or_else(|e| panic!("{e}"))
    }

    // Determination methods

    pub fn is_zero(&self) -> bool {
        self.start.is_zero() && self.end.is_zero()
    }

    pub fn only_one_day(&self) -> bool {
        self.start.equal(&self.end)
    }

    // Comparison methods

    pub fn equal(&self, target: &DateRange) -> bool {
        self.start.equal(&target.start) && self.end.equal(&target.end)
    }

    pub fn not_equal(&self, target: &DateRange) -> bool {
        !self.equal(target)
    }

    pub fn starts_on(&self, date: Date) -> bool {
        self.start.equal(&date)
    }

    pub fn ends_on(&self, date: Date) -> bool {
        self.end.equal(&date)
    }

    pub fn starts_on_same_date(&self, target: &DateRange) -> bool {
        self.start.equal(&target.start)
    }

    pub fn starts_before(&self, target: &DateRange) -> bool {
        self.start.before(&target.start)
    }

    pub fn starts_before_or_equal(&self, target: &DateRange) -> bool {
        self.start.before_or_equal(&target.start)
    }

    pub fn starts_after(&self, target: &DateRange) -> bool {
        self.start.after(&target.start)
    }

    pub fn starts_after_or_equal(&self, target: &DateRange) -> bool {
        self.start.after_or_equal(&target.start)
    }

    pub fn ends_on_same_date(&self, target: &DateRange) -> bool {
        self.end.equal(&target.end)
    }

    pub fn ends_before(&self, target: &DateRange) -> bool {
        self.end.before(&target.end)
    }

    pub fn ends_before_or_equal(&self, target: &DateRange) -> bool {
        self.end.before_or_equal(&target.end)
    }

    pub fn ends_after(&self, target: &DateRange) -> bool {
        self.end.after(&target.end)
    }

    pub fn ends_after_or_equal(&self, target: &DateRange) -> bool {
        self.end.after_or_equal(&target.end)
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: Date) -> bool {
        self.start.before_or_equal(&date) && self.end.after_or_equal(&date)
    }

    pub fn overlaps_with(&self, target: &DateRange) -> bool {
        self.end.after_or_equal(&target.start) && target.end.after_or_equal(&self.start)
    }

    /// Ordered by start, then by end.
    pub fn less_than(&self, target: &DateRange) -> bool {
        if self.starts_on_same_date(target) {
            return self.ends_before(target);
        }

        self.starts_before(target)
    }

    pub fn less_than_or_equal(&self, target: &DateRange) -> bool {
        self.equal(target) || self.less_than(target)
    }

    pub fn greater_than(&self, target: &DateRange) -> bool {
        !self.less_than_or_equal(target)
    }

    pub fn greater_than_or_equal(&self, target: &DateRange) -> bool {
        !self.less_than(target)
    }

    // Conversion methods

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn location(&self) -> Location {
        self.start.location()
    }

    /// Number of calendar days, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end.naive() - self.start.naive()).num_days() + 1
    }

    /// The days both ranges share.
    pub fn get_overlapping(&self, target: &DateRange) -> CalDateResult<DateRange> {
        if !self.overlaps_with(target) {
            return Err(CalDateError::RangesDontOverlap);
        }

        let start = Dates::from(vec![self.start, target.start]).max()?;
        let end = Dates::from(vec![self.end, target.end]).min()?;

        DateRange::new(start, end)
    }

    /// Every day of the range, ascending. A fresh collection on each call.
    pub fn dates(&self) -> Dates {
        self.iter().collect()
    }

    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: self.start,
            remaining: self.days().max(0) as u64,
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.less_than(other) {
            Ordering::Less
        } else if self.equal(other) {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

impl FromStr for DateRange {
    type Err = CalDateError;

    /// Parse `"<start>/<end>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('/').ok_or_else(|| {
            CalDateError::parse(
                s,
                &format!("{DATE_LAYOUT}/{DATE_LAYOUT}"),
                "missing '/' separator",
            )
        })?;

        DateRange::parse(start, end)
    }
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CalDateError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl From<DateRange> for RawDateRange {
    fn from(range: DateRange) -> Self {
        RawDateRange {
            start: range.start,
            end: range.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = Date;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = Date;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks a [`DateRange`] one day at a time, start to end.
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Date,
    remaining: u64,
}

impl Iterator for DateRangeIter {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.remaining == 0 {
            return None;
        }

        let current = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = current.add_day();
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRangeIter {}

impl FusedIterator for DateRangeIter {}
