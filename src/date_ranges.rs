//! Collections of date ranges.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::date_range::DateRange;
use crate::dates::Dates;
use crate::error::CalDateResult;

/// An owned, ordered sequence of date ranges.
///
/// Sorting follows [`DateRange::less_than`]: by start, then by end. As with
/// [`Dates`], the `*_mutable` sorts work in place and the others on a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateRanges(Vec<DateRange>);

impl DateRanges {
    pub fn new() -> DateRanges {
        DateRanges(Vec::new())
    }

    pub fn sort_mutable(&mut self) -> &mut DateRanges {
        self.0.sort_by(|a, b| a.cmp(b));
        self
    }

    pub fn sort_reverse_mutable(&mut self) -> &mut DateRanges {
        self.0.sort_by(|a, b| b.cmp(a));
        self
    }

    pub fn sort(&self) -> DateRanges {
        let mut ranges = self.clone();
        ranges.sort_mutable();
        ranges
    }

    pub fn sort_reverse(&self) -> DateRanges {
        let mut ranges = self.clone();
        ranges.sort_reverse_mutable();
        ranges
    }

    /// False as soon as two elements are equal.
    pub fn are_unique(&self) -> bool {
        for (i, a) in self.iter().enumerate() {
            if self[i + 1..].iter().any(|b| a.equal(b)) {
                return false;
            }
        }

        true
    }

    /// True as soon as any two elements overlap.
    pub fn are_overlapping(&self) -> bool {
        for (i, a) in self.iter().enumerate() {
            if self[i + 1..].iter().any(|b| a.overlaps_with(b)) {
                return true;
            }
        }

        false
    }

    /// Start bounds, in sequence order.
    pub fn start_dates(&self) -> Dates {
        self.iter().map(DateRange::start).collect()
    }

    /// End bounds, in sequence order.
    pub fn end_dates(&self) -> Dates {
        self.iter().map(DateRange::end).collect()
    }

    /// Earliest start bound.
    pub fn first_start(&self) -> CalDateResult<Date> {
        self.start_dates().min()
    }

    /// Latest end bound.
    pub fn last_end(&self) -> CalDateResult<Date> {
        self.end_dates().max()
    }

    pub fn strings(&self) -> Vec<String> {
        self.iter().map(DateRange::to_string).collect()
    }

    pub fn into_inner(self) -> Vec<DateRange> {
        self.0
    }
}

impl Deref for DateRanges {
    type Target = Vec<DateRange>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DateRanges {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<DateRange>> for DateRanges {
    fn from(ranges: Vec<DateRange>) -> Self {
        DateRanges(ranges)
    }
}

impl<const N: usize> From<[DateRange; N]> for DateRanges {
    fn from(ranges: [DateRange; N]) -> Self {
        DateRanges(ranges.into())
    }
}

impl From<DateRanges> for Vec<DateRange> {
    fn from(ranges: DateRanges) -> Self {
        ranges.0
    }
}

impl FromIterator<DateRange> for DateRanges {
    fn from_iter<I: IntoIterator<Item = DateRange>>(iter: I) -> Self {
        DateRanges(iter.into_iter().collect())
    }
}

impl IntoIterator for DateRanges {
    type Item = DateRange;
    type IntoIter = std::vec::IntoIter<DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DateRanges {
    type Item = &'a DateRange;
    type IntoIter = std::slice::Iter<'a, DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
