//! Tests that swap the process-wide clock. Each one holds a `ClockGuard` for
//! its whole body, which serializes them against each other.

use caldate::{Date, DateRange, FixedClock, Location, Month, NullDate, clock, set_clock};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn utc(year: i32, month: u32, day: u32) -> Date {
    Date::new_in(year, month, day, Location::UTC)
}

#[test]
fn today_follows_the_installed_clock() {
    let _guard = set_clock(FixedClock::new(at(2024, 6, 15, 12), Location::UTC));

    assert_eq!(Date::today(), utc(2024, 6, 15));
    assert_eq!(Date::yesterday(), utc(2024, 6, 14));
    assert_eq!(Date::tomorrow(), utc(2024, 6, 16));
    assert_eq!(clock::now(), at(2024, 6, 15, 12));
}

#[test]
fn today_is_taken_in_the_clock_location() {
    // 20:00 UTC is already the next morning in Tokyo
    let tokyo = Location::Zone(Tz::Asia__Tokyo);
    let _guard = set_clock(FixedClock::new(at(2024, 6, 15, 20), tokyo));

    let today = Date::today();
    assert_eq!(today.to_string(), "2024-06-16");
    assert_eq!(today.location(), tokyo);
    assert_eq!(today, Date::new_in(2024, 6, 16, tokyo));
}

#[test]
fn relative_predicates() {
    let _guard = set_clock(FixedClock::new(at(2024, 6, 15, 0), Location::UTC));

    let yesterday = utc(2024, 6, 14);
    let today = utc(2024, 6, 15);
    let tomorrow = utc(2024, 6, 16);

    assert!(yesterday.is_past());
    assert!(yesterday.is_past_or_today());
    assert!(yesterday.is_yesterday());
    assert!(!yesterday.is_future_or_today());

    assert!(today.is_today());
    assert!(!today.is_past());
    assert!(!today.is_future());
    assert!(today.is_past_or_today());
    assert!(today.is_future_or_today());

    assert!(tomorrow.is_future());
    assert!(tomorrow.is_tomorrow());
    assert!(!tomorrow.is_past_or_today());
}

#[test]
fn months_relative_to_now() {
    let _guard = set_clock(FixedClock::new(at(2024, 1, 10, 9), Location::UTC));

    assert_eq!(Month::current(), Month::new(2024, 1));
    assert_eq!(Month::next(), Month::new(2024, 2));
    assert_eq!(Month::previous(), Month::new(2023, 12));

    assert!(Month::new(2023, 12).is_past());
    assert!(Month::new(2023, 12).is_previous_month());
    assert!(Month::new(2024, 1).is_current_month());
    assert!(Month::new(2024, 2).is_future());
    assert!(Month::new(2024, 2).is_next_month());
}

#[test]
fn default_location_applies_to_new_and_parse() {
    let oslo = Location::Zone(Tz::Europe__Oslo);
    let _guard = set_clock(FixedClock::new(at(2024, 6, 15, 12), oslo));

    assert_eq!(clock::location(), oslo);
    assert_eq!(Date::new(2024, 6, 1).location(), oslo);
    assert_eq!(Date::must_parse("2024-06-01").location(), oslo);
    assert_eq!(Month::new(2024, 6).first_date().location(), oslo);

    // The zero date's text still means the zero date
    let zero = Date::must_parse("0001-01-01");
    assert!(zero.is_zero());
    assert_eq!(zero, Date::zero());
    assert_eq!(zero.location(), oslo);
}

#[test]
fn text_round_trips_in_a_non_utc_default() {
    let tokyo = Location::Zone(Tz::Asia__Tokyo);
    let _guard = set_clock(FixedClock::new(at(2024, 6, 15, 12), tokyo));

    for date in [
        Date::new(1, 1, 1),
        Date::new(1, 1, 2),
        Date::new(2024, 2, 29),
        Date::zero(),
    ] {
        let text = date.to_string();
        assert_eq!(text.parse::<Date>().unwrap(), date, "text of {date:?}");

        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date, "json of {date:?}");
    }

    let ranges = [
        Month::zero().to_date_range(),
        Month::new(1, 2).to_date_range(),
        Month::new(2024, 2).to_date_range(),
        DateRange::new(Date::new(1, 1, 1), Date::new(1, 1, 1)).unwrap(),
        DateRange::zero(),
    ];
    for range in ranges {
        let text = range.to_string();
        assert_eq!(text.parse::<DateRange>().unwrap(), range, "text of {text}");

        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(serde_json::from_str::<DateRange>(&json).unwrap(), range, "json of {text}");
    }

    for month in [Month::zero(), Month::new(-1, 12), Month::new(2024, 6)] {
        let text = month.to_string();
        assert_eq!(text.parse::<Month>().unwrap(), month, "text of {text}");
        assert_eq!(month.days(), month.dates().len() as i64);
    }

    for nd in [Date::new(1, 1, 1).nullable(), NullDate::null()] {
        assert_eq!(nd.to_string().parse::<NullDate>().unwrap(), nd);
    }
}

#[test]
fn zero_month_is_one_day_in_utc() {
    let _guard = set_clock(FixedClock::new(at(2024, 6, 15, 12), Location::UTC));

    let zero = Month::zero();
    assert!(zero.to_date_range().is_zero());
    assert_eq!(zero.days(), 1);
    assert_eq!(zero.dates().len(), 1);
}

#[test]
#[should_panic(expected = "already holds a ClockGuard")]
fn nested_set_clock_panics() {
    let _outer = set_clock(FixedClock::new(at(2024, 6, 15, 12), Location::UTC));
    let _inner = set_clock(FixedClock::new(at(2025, 6, 15, 12), Location::UTC));
}

#[test]
fn guard_restores_previous_clock() {
    let outer = {
        let _guard = set_clock(FixedClock::new(at(2030, 3, 1, 0), Location::UTC));
        assert_eq!(Date::today(), utc(2030, 3, 1));
        clock::now()
    };

    // Dropped: whatever ran before is back in place
    assert_ne!(clock::now(), outer);

    let _guard = set_clock(FixedClock::new(at(2031, 3, 1, 0), Location::UTC));
    assert_eq!(Date::today(), utc(2031, 3, 1));
}
