//! Process-wide source of "now" and of the default location.
//!
//! Everything in this crate that needs the current day (`Date::today`,
//! `Month::current`, the `is_past`/`is_future` family) or a default location
//! (`Date::new`, `Date::parse`, `Month::first_date`) asks the installed
//! [`Clock`]. Without one, a [`SystemClock`] is built on first use from
//! [`CaldateConfig`] and the operating system's timezone.
//!
//! Substitution is scoped: [`set_clock`] returns a [`ClockGuard`] that puts
//! the previous clock back when dropped. Guards from different threads are
//! serialized on a process-wide lock, so tests that swap the clock never
//! interleave. Computations that run on other threads during a swap may
//! observe either clock. Calling `set_clock` again on a thread that already
//! holds a guard panics.

use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::CaldateConfig;
use crate::location::Location;

/// Supplies the current instant and the default location.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn location(&self) -> Location;
}

/// The real wall clock, bound to a default location.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    location: Location,
}

impl SystemClock {
    pub fn new(location: Location) -> Self {
        SystemClock { location }
    }

    /// Location resolution order: configured timezone, system timezone, UTC.
    pub fn from_config(config: &CaldateConfig) -> Self {
        let location = match config.location() {
            Ok(Some(location)) => location,
            Ok(None) => system_location(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring configured timezone");
                system_location()
            }
        };

        SystemClock { location }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn location(&self) -> Location {
        self.location
    }
}

/// A clock frozen at one instant, for tests and reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    location: Location,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, location: Location) -> Self {
        FixedClock { now, location }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn location(&self) -> Location {
        self.location
    }
}

static CLOCK: RwLock<Option<Arc<dyn Clock>>> = RwLock::new(None);
static SWAP_LOCK: Mutex<()> = Mutex::new(());
static DEFAULT_CLOCK: OnceLock<SystemClock> = OnceLock::new();

thread_local! {
    // Set while this thread holds a ClockGuard.
    static HOLDS_GUARD: Cell<bool> = const { Cell::new(false) };
}

fn system_location() -> Location {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            tracing::warn!(zone = %name, "unknown system timezone, using UTC");
            Location::UTC
        }),
        Err(e) => {
            tracing::debug!(error = %e, "system timezone unavailable, using UTC");
            Location::UTC
        }
    }
}

fn default_clock() -> SystemClock {
    *DEFAULT_CLOCK.get_or_init(|| {
        let config = CaldateConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load caldate config");
            CaldateConfig::default()
        });
        let clock = SystemClock::from_config(&config);
        tracing::debug!(location = %clock.location, "resolved default location");
        clock
    })
}

fn with_clock<T>(f: impl FnOnce(&dyn Clock) -> T) -> T {
    let slot = CLOCK.read().unwrap_or_else(PoisonError::into_inner);
    match slot.as_deref() {
        Some(clock) => f(clock),
        None => f(&default_clock()),
    }
}

fn replace_clock(clock: Option<Arc<dyn Clock>>) -> Option<Arc<dyn Clock>> {
    let mut slot = CLOCK.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, clock)
}

/// The current instant according to the installed clock.
pub fn now() -> DateTime<Utc> {
    with_clock(|clock| clock.now())
}

/// The default location according to the installed clock.
pub fn location() -> Location {
    with_clock(|clock| clock.location())
}

/// Wall-clock reading of "now" in the default location, read from a
/// single clock so both halves agree.
pub fn local_now() -> (NaiveDateTime, Location) {
    with_clock(|clock| {
        let now = clock.now().naive_utc();
        let location = clock.location();
        let local = now + location.offset_at_utc(&now);
        (local, location)
    })
}

/// Install `clock` until the returned guard is dropped.
///
/// # Panics
///
/// If the calling thread already holds a [`ClockGuard`].
pub fn set_clock<C: Clock + 'static>(clock: C) -> ClockGuard {
    if HOLDS_GUARD.with(Cell::get) {
        panic!("set_clock called while this thread already holds a ClockGuard");
    }

    let lock = SWAP_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    HOLDS_GUARD.with(|held| held.set(true));
    let location = clock.location();
    let previous = replace_clock(Some(Arc::new(clock)));
    tracing::debug!(%location, "clock swapped");

    ClockGuard {
        previous,
        _lock: lock,
    }
}

/// Restores the previously installed clock on drop.
#[must_use = "the clock is restored as soon as the guard is dropped"]
pub struct ClockGuard {
    previous: Option<Arc<dyn Clock>>,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        replace_clock(self.previous.take());
        HOLDS_GUARD.with(|held| held.set(false));
        tracing::debug!("clock restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_fixed_clock_reports_its_instant() {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let clock = FixedClock::new(at, Location::UTC);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.location(), Location::UTC);
    }

    #[test]
    fn test_system_clock_from_config_prefers_configured_zone() {
        let config = CaldateConfig {
            timezone: Some("+05:30".to_string()),
        };
        let clock = SystemClock::from_config(&config);
        assert_eq!(
            clock.location(),
            Location::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).unwrap())
        );
    }
}
