//! Dates that may be explicitly absent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{CalDateError, CalDateResult};

const NULL_TEXT: &str = "null";

/// A [`Date`] or an explicit null.
///
/// Unlike the zero date, absence here is a tag: a present `NullDate` may wrap
/// `Date::zero()` and still not be null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Date>", into = "Option<Date>")]
pub struct NullDate {
    value: Option<Date>,
}

impl NullDate {
    pub fn from_date(date: Date) -> NullDate {
        NullDate { value: Some(date) }
    }

    pub fn from_option(date: Option<Date>) -> NullDate {
        NullDate { value: date }
    }

    pub fn null() -> NullDate {
        NullDate { value: None }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_not_null(&self) -> bool {
        self.value.is_some()
    }

    /// Two nulls are equal, a null never equals a present value, and two
    /// present values compare as dates.
    pub fn equal(&self, target: &NullDate) -> bool {
        match (self.value, target.value) {
            (None, None) => true,
            (Some(a), Some(b)) => a.equal(&b),
            _ => false,
        }
    }

    pub fn not_equal(&self, target: &NullDate) -> bool {
        !self.equal(target)
    }

    pub fn take(&self) -> CalDateResult<Date> {
        self.value.ok_or(CalDateError::NullValue)
    }

    /// Like [`NullDate::take`], panicking when null.
    pub fn must_take(&self) -> Date {
        self.take().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn take_or(&self, fallback: Date) -> Date {
        self.value.unwrap_or(fallback)
    }

    pub fn if_some<F>(&self, f: F)
    where
        F: FnOnce(Date),
    {
        if let Some(date) = self.value {
            f(date);
        }
    }

    pub fn if_none<F>(&self, f: F)
    where
        F: FnOnce(),
    {
        if self.value.is_none() {
            f();
        }
    }

    pub fn try_if_some<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(Date) -> Result<(), E>,
    {
        match self.value {
            Some(date) => f(date),
            None => Ok(()),
        }
    }

    pub fn try_if_none<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        match self.value {
            Some(_) => Ok(()),
            None => f(),
        }
    }

    /// Transform the wrapped date. A null stays null.
    pub fn map<F>(&self, f: F) -> NullDate
    where
        F: FnOnce(Date) -> Date,
    {
        NullDate {
            value: self.value.map(f),
        }
    }

    pub fn as_option(&self) -> Option<Date> {
        self.value
    }

    /// Canonical text of the wrapped date, `None` when null.
    pub fn to_string_opt(&self) -> Option<String> {
        self.value.map(|date| date.to_string())
    }
}

impl fmt::Display for NullDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(date) => fmt::Display::fmt(date, f),
            None => f.write_str(NULL_TEXT),
        }
    }
}

impl FromStr for NullDate {
    type Err = CalDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NULL_TEXT {
            return Ok(NullDate::null());
        }

        Date::parse(s).map(NullDate::from_date)
    }
}

impl From<Date> for NullDate {
    fn from(date: Date) -> Self {
        NullDate::from_date(date)
    }
}

impl From<Option<Date>> for NullDate {
    fn from(date: Option<Date>) -> Self {
        NullDate::from_option(date)
    }
}

impl From<NullDate> for Option<Date> {
    fn from(date: NullDate) -> Self {
        date.value
    }
}
