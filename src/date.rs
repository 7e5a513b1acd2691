//! Day-precision dates bound to a location.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::date_range::DateRange;
use crate::error::{CalDateError, CalDateResult};
use crate::location::Location;
use crate::month::{Month, floor_div_mod};
use crate::null_date::NullDate;

/// Layout of the canonical text form, `2024-06-15`.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

const ZERO_DAY: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(day) => day,
    None => panic!("0001-01-01 is a valid date"),
};

/// UTC midnight of the zero day, shared by every zero date.
fn zero_instant() -> NaiveDateTime {
    ZERO_DAY.and_time(NaiveTime::MIN)
}

/// A calendar day in a [`Location`], held as that day's local midnight.
///
/// Equality, ordering and hashing compare the absolute instant of those
/// midnights, so the same calendar day in two locations is generally not
/// equal, and a day in Tokyo sorts before the same day in UTC.
///
/// The zero date (`Date::zero()`, `Date::default()`) is 0001-01-01 and
/// stands for "unset". That day is zero in every location: its instant is
/// pinned to UTC midnight, so all zero dates are equal to each other, and
/// `0001-01-01` parsed in any default location is the zero date.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date {
    day: NaiveDate,
    location: Location,
    instant: NaiveDateTime,
}

/// Attach `location` to a wall-clock reading.
pub(crate) fn localize(local: NaiveDateTime, location: &Location) -> DateTime<FixedOffset> {
    let offset = location.offset_at_local(&local);
    let utc = local
        .checked_sub_signed(Duration::seconds(offset.local_minus_utc().into()))
        .unwrap_or(local);

    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Move `day` by `days`, saturating at the ends of chrono's range.
fn shift_days(day: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        day.checked_add_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        day.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Resolve possibly out-of-range fields the way calendar addition does:
/// month 13 is January of the next year, day 32 of January is February 1,
/// day 0 is the last day of the previous month.
fn normalize(year: i64, month: i64, day: i64) -> NaiveDate {
    let (year_delta, month_index) = floor_div_mod(month - 1, 12);
    let year = year + year_delta;

    let first = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month_index as u32 + 1, 1));

    match first {
        Some(first) => shift_days(first, day - 1),
        None if year > 0 => NaiveDate::MAX,
        None => NaiveDate::MIN,
    }
}

impl Date {
    // Factory functions

    /// Date in the default location. Out-of-range fields roll over.
    pub fn new(year: i32, month: u32, day: u32) -> Date {
        Date::new_in(year, month, day, clock::location())
    }

    pub fn new_in(year: i32, month: u32, day: u32, location: Location) -> Date {
        Date::from_naive(
            normalize(year.into(), month.into(), day.into()),
            location,
        )
    }

    pub fn from_naive(day: NaiveDate, location: Location) -> Date {
        let instant = if day == ZERO_DAY {
            zero_instant()
        } else {
            localize(day.and_time(NaiveTime::MIN), &location).naive_utc()
        };

        Date {
            day,
            location,
            instant,
        }
    }

    /// The calendar day of `moment` in its own timezone.
    pub fn from_datetime<Z>(moment: &DateTime<Z>) -> Date
    where
        Z: TimeZone + Into<Location>,
    {
        Date::from_naive(moment.date_naive(), moment.timezone().into())
    }

    pub fn zero() -> Date {
        Date::from_naive(ZERO_DAY, Location::UTC)
    }

    /// Parse the canonical `YYYY-MM-DD` form in the default location.
    ///
    /// The text must be exactly what `to_string` would produce.
    pub fn parse(value: &str) -> CalDateResult<Date> {
        let date = Date::parse_with(DATE_LAYOUT, value)?;

        if date.to_string() != value {
            return Err(CalDateError::parse(value, DATE_LAYOUT, "not in canonical form"));
        }

        Ok(date)
    }

    /// Like [`Date::parse`], panicking on malformed input.
    pub fn must_parse(value: &str) -> Date {
        Date::parse(value).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Parse with a strftime layout in the default location.
    pub fn parse_with(layout: &str, value: &str) -> CalDateResult<Date> {
        Date::parse_in(layout, value, clock::location())
    }

    pub fn must_parse_with(layout: &str, value: &str) -> Date {
        Date::parse_with(layout, value).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn parse_in(layout: &str, value: &str, location: Location) -> CalDateResult<Date> {
        let day = NaiveDate::parse_from_str(value, layout)
            .map_err(|e| CalDateError::parse(value, layout, e))?;

        Ok(Date::from_naive(day, location))
    }

    pub fn today() -> Date {
        let (local, location) = clock::local_now();
        Date::from_naive(local.date(), location)
    }

    pub fn yesterday() -> Date {
        Date::today().sub_day()
    }

    pub fn tomorrow() -> Date {
        Date::today().add_day()
    }

    // Determination methods

    pub fn is_zero(&self) -> bool {
        self.day == ZERO_DAY
    }

    pub fn is_first_of_month(&self) -> bool {
        self.day.day() == 1
    }

    pub fn is_last_of_month(&self) -> bool {
        shift_days(self.day, 1).day() == 1
    }

    pub fn is_monday(&self) -> bool {
        self.weekday() == Weekday::Mon
    }

    pub fn is_tuesday(&self) -> bool {
        self.weekday() == Weekday::Tue
    }

    pub fn is_wednesday(&self) -> bool {
        self.weekday() == Weekday::Wed
    }

    pub fn is_thursday(&self) -> bool {
        self.weekday() == Weekday::Thu
    }

    pub fn is_friday(&self) -> bool {
        self.weekday() == Weekday::Fri
    }

    pub fn is_saturday(&self) -> bool {
        self.weekday() == Weekday::Sat
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }

    /// Monday through Friday.
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    pub fn is_weekend(&self) -> bool {
        self.is_saturday() || self.is_sunday()
    }

    pub fn is_past(&self) -> bool {
        self.before(&Date::today())
    }

    pub fn is_past_or_today(&self) -> bool {
        self.before_or_equal(&Date::today())
    }

    pub fn is_future(&self) -> bool {
        self.after(&Date::today())
    }

    pub fn is_future_or_today(&self) -> bool {
        self.after_or_equal(&Date::today())
    }

    pub fn is_today(&self) -> bool {
        self.equal(&Date::today())
    }

    pub fn is_yesterday(&self) -> bool {
        self.equal(&Date::yesterday())
    }

    pub fn is_tomorrow(&self) -> bool {
        self.equal(&Date::tomorrow())
    }

    // Comparison methods

    /// Ordering of the two midnights as instants.
    pub fn compare(&self, other: &Date) -> Ordering {
        self.instant.cmp(&other.instant)
    }

    pub fn equal(&self, other: &Date) -> bool {
        self.instant == other.instant
    }

    pub fn not_equal(&self, other: &Date) -> bool {
        !self.equal(other)
    }

    pub fn after(&self, other: &Date) -> bool {
        self.instant > other.instant
    }

    pub fn after_or_equal(&self, other: &Date) -> bool {
        self.equal(other) || self.after(other)
    }

    pub fn before(&self, other: &Date) -> bool {
        self.instant < other.instant
    }

    pub fn before_or_equal(&self, other: &Date) -> bool {
        self.equal(other) || self.before(other)
    }

    /// Whether this date lies in the inclusive range `start..=end`.
    ///
    /// Fails with the same errors as [`DateRange::new`].
    pub fn between(&self, start: Date, end: Date) -> CalDateResult<bool> {
        let range = DateRange::new(start, end)?;
        Ok(range.contains(*self))
    }

    // Addition and subtraction methods

    fn add_fields(&self, years: i64, months: i64, days: i64) -> Date {
        let day = normalize(
            i64::from(self.year()) + years,
            i64::from(self.month()) + months,
            i64::from(self.day()) + days,
        );

        Date::from_naive(day, self.location)
    }

    /// Add years, months and days field by field, then normalize.
    /// Unlike [`Date::add_months`] this rolls over: Jan 31 + 1 month is
    /// March 2 or 3.
    pub fn add_date(&self, years: i32, months: i32, days: i32) -> Date {
        self.add_fields(years.into(), months.into(), days.into())
    }

    pub fn add_day(&self) -> Date {
        self.add_days(1)
    }

    pub fn add_days(&self, days: i32) -> Date {
        self.add_fields(0, 0, days.into())
    }

    pub fn sub_day(&self) -> Date {
        self.sub_days(1)
    }

    pub fn sub_days(&self, days: i32) -> Date {
        self.add_fields(0, 0, -i64::from(days))
    }

    pub fn add_week(&self) -> Date {
        self.add_weeks(1)
    }

    pub fn add_weeks(&self, weeks: i32) -> Date {
        self.add_fields(0, 0, i64::from(weeks) * 7)
    }

    pub fn sub_week(&self) -> Date {
        self.sub_weeks(1)
    }

    pub fn sub_weeks(&self, weeks: i32) -> Date {
        self.add_fields(0, 0, -i64::from(weeks) * 7)
    }

    pub fn add_month(&self) -> Date {
        self.add_months(1)
    }

    /// Add months, clamping to the last day of the target month when the
    /// day-of-month does not exist there: 2024-01-31 + 1 month is 2024-02-29.
    pub fn add_months(&self, months: i32) -> Date {
        let target = self.to_month().add_months(months);
        let date = Date::new_in(target.year(), target.month(), self.day(), self.location);

        if date.to_month() == target {
            date
        } else {
            target.last_date_in(self.location)
        }
    }

    pub fn sub_month(&self) -> Date {
        self.sub_months(1)
    }

    pub fn sub_months(&self, months: i32) -> Date {
        self.add_months(months.saturating_neg())
    }

    pub fn add_year(&self) -> Date {
        self.add_years(1)
    }

    /// Feb 29 plus one year rolls over to March 1.
    pub fn add_years(&self, years: i32) -> Date {
        self.add_fields(years.into(), 0, 0)
    }

    pub fn sub_year(&self) -> Date {
        self.sub_years(1)
    }

    pub fn sub_years(&self, years: i32) -> Date {
        self.add_fields(-i64::from(years), 0, 0)
    }

    pub fn start_of_month(&self) -> Date {
        Date::new_in(self.year(), self.month(), 1, self.location)
    }

    pub fn end_of_month(&self) -> Date {
        self.start_of_month().add_month().sub_day()
    }

    pub fn start_of_year(&self) -> Date {
        Date::new_in(self.year(), 1, 1, self.location)
    }

    pub fn end_of_year(&self) -> Date {
        self.start_of_year().add_year().sub_day()
    }

    // Conversion methods

    pub fn to_month(&self) -> Month {
        Month::from_date(*self)
    }

    pub fn nullable(&self) -> NullDate {
        NullDate::from_date(*self)
    }

    /// Local midnight as a timestamp.
    pub fn to_datetime(&self) -> DateTime<FixedOffset> {
        self.at(NaiveTime::MIN)
    }

    /// This calendar day at `time`, in the date's location.
    pub fn at(&self, time: NaiveTime) -> DateTime<FixedOffset> {
        localize(self.day.and_time(time), &self.location)
    }

    pub fn naive(&self) -> NaiveDate {
        self.day
    }

    pub fn year(&self) -> i32 {
        self.day.year()
    }

    /// Month number, 1..=12.
    pub fn month(&self) -> u32 {
        self.day.month()
    }

    pub fn day(&self) -> u32 {
        self.day.day()
    }

    /// Day of the year, 1..=366.
    pub fn year_day(&self) -> u32 {
        self.day.ordinal()
    }

    /// ISO 8601 (year, week number).
    pub fn iso_week(&self) -> (i32, u32) {
        let week = self.day.iso_week();
        (week.year(), week.week())
    }

    pub fn weekday(&self) -> Weekday {
        self.day.weekday()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// (year, month, day)
    pub fn split(&self) -> (i32, u32, u32) {
        (self.year(), self.month(), self.day())
    }

    /// Render with a strftime layout. Time fields render as midnight.
    pub fn format<'a>(&self, layout: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.to_datetime().format(layout)
    }
}

impl Default for Date {
    fn default() -> Self {
        Date::zero()
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Date {}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.day.format(DATE_LAYOUT))
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Date({} {})", self, self.location)
    }
}

impl FromStr for Date {
    type Err = CalDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl TryFrom<String> for Date {
    type Error = CalDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Date::parse(&value)
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}
