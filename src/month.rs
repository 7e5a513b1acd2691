//! Calendar months.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::format::{DelayedFormat, ParseErrorKind, StrftimeItems};
use chrono::{DateTime, Datelike, Month as MonthOfYear, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::date::Date;
use crate::date_range::DateRange;
use crate::dates::Dates;
use crate::error::{CalDateError, CalDateResult};
use crate::location::Location;

/// Layout of the canonical text form, `2024-06`.
pub const MONTH_LAYOUT: &str = "%Y-%m";

const MONTHS_OF_YEAR: [MonthOfYear; 12] = [
    MonthOfYear::January,
    MonthOfYear::February,
    MonthOfYear::March,
    MonthOfYear::April,
    MonthOfYear::May,
    MonthOfYear::June,
    MonthOfYear::July,
    MonthOfYear::August,
    MonthOfYear::September,
    MonthOfYear::October,
    MonthOfYear::November,
    MonthOfYear::December,
];

/// Floored division and modulo: the quotient rounds toward negative
/// infinity and the remainder takes the sign of the divisor.
pub(crate) fn floor_div_mod(dividend: i64, divisor: i64) -> (i64, i64) {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;

    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        (quotient - 1, remainder + divisor)
    } else {
        (quotient, remainder)
    }
}

fn clamp_year(year: i64) -> i32 {
    year.clamp(i32::MIN.into(), i32::MAX.into()) as i32
}

/// A year and month with no day and no location.
///
/// Stored zero-based so that `Month::default()` is January of year 1, the
/// zero month.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    y: i32, // year - 1
    m: i32, // month - 1
}

impl Month {
    // Factory functions

    /// Out-of-range month numbers roll into neighbouring years.
    pub fn new(year: i32, month: u32) -> Month {
        Month::from_index(i64::from(year) - 1, i64::from(month) - 1)
    }

    fn from_index(year_index: i64, month_index: i64) -> Month {
        let (year_delta, month_index) = floor_div_mod(month_index, 12);

        Month {
            y: clamp_year(year_index + year_delta),
            m: month_index as i32,
        }
    }

    pub fn zero() -> Month {
        Month::default()
    }

    pub fn from_date(date: Date) -> Month {
        Month::from_naive(date.naive())
    }

    pub fn from_naive(day: NaiveDate) -> Month {
        Month::new(day.year(), day.month())
    }

    /// The month of `moment` in its own timezone.
    pub fn from_datetime<Z: TimeZone>(moment: &DateTime<Z>) -> Month {
        Month::from_naive(moment.date_naive())
    }

    /// Parse the canonical `YYYY-MM` form.
    ///
    /// The year takes at least four digits and an optional leading minus,
    /// matching what `to_string` produces.
    pub fn parse(value: &str) -> CalDateResult<Month> {
        let invalid = |reason: &str| CalDateError::parse(value, MONTH_LAYOUT, reason);

        let (year, month) = value
            .rsplit_once('-')
            .ok_or_else(|| invalid("missing '-' separator"))?;

        let digits = year.strip_prefix('-').unwrap_or(year);
        if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("year must have at least four digits"));
        }
        if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("month must have two digits"));
        }

        let year: i32 = year.parse().map_err(|_| invalid("year out of range"))?;
        let month: u32 = month.parse().map_err(|_| invalid("month out of range"))?;
        if !(1..=12).contains(&month) {
            return Err(invalid("month out of range"));
        }

        let parsed = Month::new(year, month);
        if parsed.to_string() != value {
            return Err(invalid("not in canonical form"));
        }

        Ok(parsed)
    }

    pub fn must_parse(value: &str) -> Month {
        Month::parse(value).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Parse with a strftime layout. The layout may leave out the day.
    pub fn parse_with(layout: &str, value: &str) -> CalDateResult<Month> {
        let parsed = match NaiveDate::parse_from_str(value, layout) {
            Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                NaiveDate::parse_from_str(&format!("{value} 1"), &format!("{layout} %d"))
            }
            other => other,
        };

        parsed
            .map(Month::from_naive)
            .map_err(|e| CalDateError::parse(value, layout, e))
    }

    pub fn current() -> Month {
        Month::from_date(Date::today())
    }

    pub fn next() -> Month {
        Month::current().add_month()
    }

    pub fn previous() -> Month {
        Month::current().sub_month()
    }

    // Determination methods

    pub fn is_zero(&self) -> bool {
        *self == Month::zero()
    }

    pub fn month_of_year(&self) -> MonthOfYear {
        MONTHS_OF_YEAR[self.m as usize]
    }

    pub fn is_month_of_year(&self, month: MonthOfYear) -> bool {
        self.month_of_year() == month
    }

    pub fn is_past(&self) -> bool {
        self.before(&Month::current())
    }

    pub fn is_future(&self) -> bool {
        self.after(&Month::current())
    }

    pub fn is_current_month(&self) -> bool {
        self.equal(&Month::current())
    }

    pub fn is_next_month(&self) -> bool {
        self.equal(&Month::next())
    }

    pub fn is_previous_month(&self) -> bool {
        self.equal(&Month::previous())
    }

    // Comparison methods

    pub fn compare(&self, other: &Month) -> Ordering {
        self.cmp(other)
    }

    pub fn equal(&self, other: &Month) -> bool {
        self.y == other.y && self.m == other.m
    }

    pub fn not_equal(&self, other: &Month) -> bool {
        !self.equal(other)
    }

    pub fn after(&self, other: &Month) -> bool {
        self.y > other.y || (self.y == other.y && self.m > other.m)
    }

    pub fn after_or_equal(&self, other: &Month) -> bool {
        self.equal(other) || self.after(other)
    }

    pub fn before(&self, other: &Month) -> bool {
        self.y < other.y || (self.y == other.y && self.m < other.m)
    }

    pub fn before_or_equal(&self, other: &Month) -> bool {
        self.equal(other) || self.before(other)
    }

    /// Whether this month lies in `start..=end`.
    pub fn between(&self, start: Month, end: Month) -> CalDateResult<bool> {
        if start.after(&end) {
            return Err(CalDateError::EndMonthBeforeStartMonth);
        }

        Ok(start.before_or_equal(self) && end.after_or_equal(self))
    }

    // Addition and subtraction methods

    pub fn add_month(&self) -> Month {
        self.add_months(1)
    }

    pub fn add_months(&self, months: i32) -> Month {
        Month::from_index(self.y.into(), i64::from(self.m) + i64::from(months))
    }

    pub fn sub_month(&self) -> Month {
        self.sub_months(1)
    }

    pub fn sub_months(&self, months: i32) -> Month {
        Month::from_index(self.y.into(), i64::from(self.m) - i64::from(months))
    }

    pub fn add_year(&self) -> Month {
        self.add_years(1)
    }

    pub fn add_years(&self, years: i32) -> Month {
        Month {
            y: self.y.saturating_add(years),
            m: self.m,
        }
    }

    pub fn sub_year(&self) -> Month {
        self.sub_years(1)
    }

    pub fn sub_years(&self, years: i32) -> Month {
        Month {
            y: self.y.saturating_sub(years),
            m: self.m,
        }
    }

    // Conversion methods

    pub fn year(&self) -> i32 {
        self.y.saturating_add(1)
    }

    /// Month number, 1..=12.
    pub fn month(&self) -> u32 {
        self.m as u32 + 1
    }

    /// (year, month)
    pub fn split(&self) -> (i32, u32) {
        (self.year(), self.month())
    }

    /// First day of the month in the default location.
    pub fn first_date(&self) -> Date {
        self.first_date_in(clock::location())
    }

    pub fn first_date_in(&self, location: Location) -> Date {
        Date::new_in(self.year(), self.month(), 1, location)
    }

    /// Last day of the month in the default location.
    pub fn last_date(&self) -> Date {
        self.last_date_in(clock::location())
    }

    pub fn last_date_in(&self, location: Location) -> Date {
        self.add_month().first_date_in(location).sub_day()
    }

    /// The whole month as an inclusive range in the default location.
    pub fn to_date_range(&self) -> DateRange {
        self.to_date_range_in(clock::location())
    }

    /// The zero month starts on the zero date and so cannot form a valid
    /// range; it yields the zero range.
    pub fn to_date_range_in(&self, location: Location) -> DateRange {
        DateRange::new(self.first_date_in(location), self.last_date_in(location))
            .unwrap_or_default()
    }

    /// Length of [`Month::to_date_range`]. One for the zero month.
    pub fn days(&self) -> i64 {
        self.to_date_range().days()
    }

    /// Every day of the month in the default location, ascending.
    pub fn dates(&self) -> Dates {
        self.to_date_range().dates()
    }

    /// Render the month's first day with a strftime layout.
    pub fn format<'a>(&self, layout: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.first_date().format(layout)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.year() < 0 {
            write!(f, "{:05}-{:02}", self.year(), self.month())
        } else {
            write!(f, "{:04}-{:02}", self.year(), self.month())
        }
    }
}

impl fmt::Debug for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Month({})", self)
    }
}

impl FromStr for Month {
    type Err = CalDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = CalDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

impl From<Date> for Month {
    fn from(date: Date) -> Self {
        Month::from_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_mod() {
        assert_eq!(floor_div_mod(7, 12), (0, 7));
        assert_eq!(floor_div_mod(12, 12), (1, 0));
        assert_eq!(floor_div_mod(-1, 12), (-1, 11));
        assert_eq!(floor_div_mod(-12, 12), (-1, 0));
        assert_eq!(floor_div_mod(-13, 12), (-2, 11));
        assert_eq!(floor_div_mod(25, 12), (2, 1));
    }

    #[test]
    fn test_zero_month_is_january_year_one() {
        let zero = Month::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.split(), (1, 1));
        assert_eq!(zero.to_string(), "0001-01");
        assert!(!Month::new(2024, 1).is_zero());
    }

    #[test]
    fn test_new_normalizes_month_overflow() {
        assert_eq!(Month::new(2024, 13), Month::new(2025, 1));
        assert_eq!(Month::new(2024, 0), Month::new(2023, 12));
        assert_eq!(Month::new(2024, 25), Month::new(2026, 1));
    }

    #[test]
    fn test_add_months_uses_floor_semantics() {
        assert_eq!(Month::new(2024, 1).add_months(-2), Month::new(2023, 11));
        assert_eq!(Month::new(2024, 11).add_months(2), Month::new(2025, 1));
        assert_eq!(Month::new(2024, 1).add_months(-12), Month::new(2023, 1));
        assert_eq!(Month::new(2024, 1).add_months(-13), Month::new(2022, 12));
        assert_eq!(Month::new(2024, 6).add_months(0), Month::new(2024, 6));
        assert_eq!(Month::new(1, 1).sub_month(), Month::new(0, 12));
        assert_eq!(Month::new(2024, 3).sub_months(3), Month::new(2023, 12));
        assert_eq!(Month::new(2024, 12).add_month(), Month::new(2025, 1));
    }

    #[test]
    fn test_add_and_sub_years() {
        assert_eq!(Month::new(2024, 2).add_year(), Month::new(2025, 2));
        assert_eq!(Month::new(2024, 2).add_years(10), Month::new(2034, 2));
        assert_eq!(Month::new(2024, 2).sub_year(), Month::new(2023, 2));
        assert_eq!(Month::new(2024, 2).sub_years(2025), Month::new(-1, 2));
    }

    #[test]
    fn test_comparison_suite() {
        let a = Month::new(2023, 12);
        let b = Month::new(2024, 1);

        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(a.before_or_equal(&a));
        assert!(b.after_or_equal(&b));
        assert!(a.not_equal(&b));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a), Ordering::Equal);
    }

    #[test]
    fn test_between() {
        let june = Month::new(2024, 6);
        assert!(june.between(Month::new(2024, 1), Month::new(2024, 12)).unwrap());
        assert!(june.between(june, june).unwrap());
        assert!(!june.between(Month::new(2024, 7), Month::new(2024, 8)).unwrap());

        let err = june
            .between(Month::new(2024, 8), Month::new(2024, 7))
            .unwrap_err();
        assert!(matches!(err, CalDateError::EndMonthBeforeStartMonth));
    }

    #[test]
    fn test_month_of_year() {
        assert_eq!(Month::new(2024, 1).month_of_year(), MonthOfYear::January);
        assert!(Month::new(2024, 12).is_month_of_year(MonthOfYear::December));
        assert!(!Month::new(2024, 11).is_month_of_year(MonthOfYear::December));
    }

    #[test]
    fn test_first_and_last_dates() {
        let feb = Month::new(2024, 2);
        assert_eq!(
            feb.first_date_in(Location::UTC),
            Date::new_in(2024, 2, 1, Location::UTC)
        );
        assert_eq!(
            feb.last_date_in(Location::UTC),
            Date::new_in(2024, 2, 29, Location::UTC)
        );
        assert_eq!(
            Month::new(2023, 12).last_date_in(Location::UTC),
            Date::new_in(2023, 12, 31, Location::UTC)
        );
    }

    #[test]
    fn test_days_and_dates() {
        assert_eq!(Month::new(2024, 2).days(), 29);
        assert_eq!(Month::new(2023, 2).days(), 28);
        assert_eq!(Month::new(2024, 4).days(), 30);
        assert_eq!(Month::new(2024, 1).days(), 31);

        let dates = Month::new(2024, 2).dates();
        assert_eq!(dates.len(), 29);
        assert!(dates[0].is_first_of_month());
        assert!(dates[28].is_last_of_month());
    }

    #[test]
    fn test_to_date_range() {
        let range = Month::new(2024, 6).to_date_range_in(Location::UTC);
        assert_eq!(range.to_string(), "2024-06-01/2024-06-30");
        assert_eq!(range.days(), 30);

        let tokyo = Location::Zone(chrono_tz::Tz::Asia__Tokyo);
        let zero_in_tokyo = Month::zero().to_date_range_in(tokyo);
        assert!(Month::zero().to_date_range_in(Location::UTC).is_zero());
        assert!(zero_in_tokyo.is_zero());

        let zero = Month::zero();
        assert_eq!(zero.days(), zero.dates().len() as i64);
        assert_eq!(zero.days(), zero.to_date_range().days());
        assert_eq!(zero.days(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Month::new(2024, 6).to_string(), "2024-06");
        assert_eq!(Month::new(0, 1).to_string(), "0000-01");
        assert_eq!(Month::new(10000, 1).to_string(), "10000-01");
        assert_eq!(Month::new(-1, 1).to_string(), "-0001-01");
        assert_eq!(Month::new(-10000, 1).to_string(), "-10000-01");
    }

    #[test]
    fn test_parse_round_trips_display() {
        for month in [
            Month::new(2024, 6),
            Month::new(0, 1),
            Month::new(10000, 1),
            Month::new(-1, 12),
            Month::zero(),
        ] {
            assert_eq!(Month::parse(&month.to_string()).unwrap(), month);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Month::parse("2024-13").is_err());
        assert!(Month::parse("2024-00").is_err());
        assert!(Month::parse("2024-6").is_err());
        assert!(Month::parse("24-06").is_err());
        assert!(Month::parse("2024-06-01").is_err());
        assert!(Month::parse("202406").is_err());
        assert!(Month::parse("").is_err());
        assert!(Month::parse("02024-06").is_err());
        assert!(Month::parse("-00001-06").is_err());
        assert!(Month::parse("+2024-06").is_err());
    }

    #[test]
    fn test_parse_with_layout_without_day() {
        assert_eq!(
            Month::parse_with("%m/%Y", "06/2024").unwrap(),
            Month::new(2024, 6)
        );
        assert_eq!(
            Month::parse_with("%Y-%m-%d", "2024-06-15").unwrap(),
            Month::new(2024, 6)
        );
        assert!(Month::parse_with("%m/%Y", "13/2024").is_err());
    }

    #[test]
    fn test_from_date() {
        let date = Date::new_in(2024, 2, 29, Location::UTC);
        assert_eq!(Month::from_date(date), Month::new(2024, 2));
        assert_eq!(date.to_month(), Month::new(2024, 2));
    }
}
