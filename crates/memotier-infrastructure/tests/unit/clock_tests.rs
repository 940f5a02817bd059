//! Clock Tests

use chrono::{TimeZone, Utc};
use memotier_domain::ports::Clock;
use memotier_infrastructure::clock::{ManualClock, SystemClock};
use std::time::Duration;

#[test]
fn test_manual_clock_advances_on_request() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let clock = ManualClock::new(start);
    assert_eq!(clock.now(), start);

    clock.advance(Duration::from_secs(61));
    assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 3, 1, 12, 1, 1).unwrap());
}

#[test]
fn test_manual_clock_clones_share_time() {
    let clock = ManualClock::starting_now();
    let other = clock.clone();
    let start = clock.now();

    other.advance(Duration::from_secs(5));
    assert_eq!((clock.now() - start).num_seconds(), 5);

    clock.set(start);
    assert_eq!(other.now(), start);
}

#[test]
fn test_manual_clock_saturates() {
    let clock = ManualClock::starting_now();
    clock.advance(Duration::MAX);
    assert_eq!(clock.now(), chrono::DateTime::<Utc>::MAX_UTC);
}

#[test]
fn test_system_clock_moves() {
    let before = Utc::now();
    let now = SystemClock.now();
    assert!(now >= before);
}
