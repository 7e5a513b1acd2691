//! Collections of dates.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{CalDateError, CalDateResult};

/// An owned, ordered sequence of dates.
///
/// The `*_mutable` sorts reorder this collection in place and hand back the
/// same storage. [`Dates::sort`] and [`Dates::sort_reverse`] sort a copy and
/// leave this collection untouched. All sorts are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dates(Vec<Date>);

impl Dates {
    pub fn new() -> Dates {
        Dates(Vec::new())
    }

    pub fn sort_mutable(&mut self) -> &mut Dates {
        self.0.sort_by(|a, b| a.compare(b));
        self
    }

    pub fn sort_reverse_mutable(&mut self) -> &mut Dates {
        self.0.sort_by(|a, b| b.compare(a));
        self
    }

    pub fn sort(&self) -> Dates {
        let mut dates = self.clone();
        dates.sort_mutable();
        dates
    }

    pub fn sort_reverse(&self) -> Dates {
        let mut dates = self.clone();
        dates.sort_reverse_mutable();
        dates
    }

    /// Earliest date. Among equal dates the first in sequence order wins.
    pub fn min(&self) -> CalDateResult<Date> {
        self.sort()
            .first()
            .copied()
            .ok_or(CalDateError::EmptyCollection)
    }

    /// Latest date. Among equal dates the first in sequence order wins.
    pub fn max(&self) -> CalDateResult<Date> {
        self.sort_reverse()
            .first()
            .copied()
            .ok_or(CalDateError::EmptyCollection)
    }

    /// Like [`Dates::min`], panicking on an empty collection.
    pub fn must_min(&self) -> Date {
        self.min().unwrap_or_else(|e| panic!("{e}"))
    }

    /// Like [`Dates::max`], panicking on an empty collection.
    pub fn must_max(&self) -> Date {
        self.max().unwrap_or_else(|e| panic!("{e}"))
    }

    /// Same dates with the same multiplicities, in any order.
    pub fn equal(&self, targets: &Dates) -> bool {
        if self.len() != targets.len() {
            return false;
        }

        self.sort()
            .iter()
            .zip(targets.sort().iter())
            .all(|(a, b)| a.equal(b))
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

    /// Canonical text of every date, in sequence order.
    pub fn strings(&self) -> Vec<String> {
        self.iter().map(Date::to_string).collect()
    }

    pub fn into_inner(self) -> Vec<Date> {
        self.0
    }
}

impl Deref for Dates {
    type Target = Vec<Date>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Dates {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Date>> for Dates {
    fn from(dates: Vec<Date>) -> Self {
        Dates(dates)
    }
}

impl<const N: usize> From<[Date; N]> for Dates {
    fn from(dates: [Date; N]) -> Self {
        Dates(dates.into())
    }
}

impl From<Dates> for Vec<Date> {
    fn from(dates: Dates) -> Self {
        dates.0
    }
}

impl FromIterator<Date> for Dates {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Dates(iter.into_iter().collect())
    }
}

impl IntoIterator for Dates {
    type Item = Date;
    type IntoIter = std::vec::IntoIter<Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dates {
    type Item = &'a Date;
    type IntoIter = std::slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
