use chrono_tz::US::Eastern;
use chrono_tz::UTC;
use rangecond::cond::{ActiveRanges, Cond};
use rangecond::config::Config;
use rangecond::describe::describe;
use rangecond::error::Error;
use rangecond::parse::parse;
use rangecond::range::DateRange;
use rangecond::time::{Time, ymdhms};

fn eval(input: &str, at: Time) -> Cond {
    parse(input, at, &Config::default()).unwrap()
}

#[test]
fn parsed_weekday_and_hours_compose() {
    // Wednesday 2025-06-18, mid-morning.
    let t = ymdhms(2025, 6, 18, 10, 0, 0, UTC);
    let c = eval("both monday and daily from 9 to 17 exclusive", t);
    assert_eq!(
        c.last_active_range(t),
        Some(DateRange::bounded(
            ymdhms(2025, 6, 16, 9, 0, 0, UTC),
            ymdhms(2025, 6, 16, 17, 0, 0, UTC),
        ))
    );
    assert_eq!(c.next_start(t), Some(ymdhms(2025, 6, 23, 9, 0, 0, UTC)));
}

#[test]
fn first_morning_after_next_monday_starts() {
    // "What is the first morning after the start of Monday?" asked on a
    // Wednesday: last cycle's answer is this week's Monday morning.
    let t = ymdhms(2025, 6, 18, 15, 0, 0, UTC);
    let c = eval("first morning after start of monday exclusive", t);
    assert_eq!(
        c.last_active_range(t),
        Some(DateRange::bounded(
            ymdhms(2025, 6, 16, 6, 0, 0, UTC),
            ymdhms(2025, 6, 16, 12, 0, 0, UTC),
        ))
    );
    assert_eq!(c.next_start(t), Some(ymdhms(2025, 6, 23, 6, 0, 0, UTC)));
}

#[test]
fn nth_anchors_to_the_parse_reference() {
    let reference = ymdhms(2024, 3, 1, 0, 0, 0, UTC);
    let c = eval("nth 3 monday", reference);
    assert_eq!(
        c.next_ranges(reference).as_slice(),
        &[DateRange::bounded(
            ymdhms(2024, 3, 18, 0, 0, 0, UTC),
            ymdhms(2024, 3, 19, 0, 0, 0, UTC),
        )]
    );
}

#[test]
fn after_counts_from_the_parse_reference() {
    let reference = ymdhms(2024, 3, 1, 12, 0, 0, UTC);
    let c = eval("after 2 hours, 30 minutes", reference);
    assert!(!c.contains(reference.add_hours(2)));
    assert!(c.contains(reference.add_hours(3)));
    assert_eq!(c.next_start(reference), Some(reference.add_mins(150)));
}

#[test]
fn seasons_respect_the_hemisphere_flag() {
    let t = ymdhms(2024, 1, 10, 12, 0, 0, UTC);
    let mut cfg = Config::default();
    let northern = parse("summer", t, &cfg).unwrap();
    assert!(!northern.contains(t));

    cfg.southern_hemisphere = true;
    let southern = parse("summer", t, &cfg).unwrap();
    assert!(southern.contains(t));
}

#[test]
fn evaluation_follows_the_ambient_timezone() {
    // The same wall-clock band, evaluated against instants in another
    // zone, anchors to that zone's days.
    let c = eval("daily from 9 to 17 exclusive", ymdhms(2024, 3, 15, 0, 0, 0, Eastern));
    let t = ymdhms(2024, 3, 15, 10, 0, 0, Eastern);
    assert_eq!(
        c.last_active_range(t),
        Some(DateRange::bounded(
            ymdhms(2024, 3, 15, 9, 0, 0, Eastern),
            ymdhms(2024, 3, 15, 17, 0, 0, Eastern),
        ))
    );
}

#[test]
fn descriptions_round_trip_through_the_parser() {
    let cfg = Config::default();
    let reference = ymdhms(2024, 3, 1, 0, 0, 0, UTC);
    for input in [
        "either weekend or daily from 18:00 to 23:00 exclusive",
        "both workday and morning",
        "first afternoon after start of monthly on day 1 inclusive",
        "nth 2 yearly from date december 10 to date february 5",
        "span of 1 months, 10 days",
    ] {
        let cond = parse(input, reference, &cfg).unwrap();
        let text = describe(&cond, &cfg);
        let back = parse(&text, reference, &cfg).unwrap();
        assert_eq!(back, cond, "'{input}' → '{text}' did not survive the round trip");
    }
}

#[test]
fn error_kinds_surface() {
    let t = ymdhms(2024, 3, 1, 0, 0, 0, UTC);
    let cfg = Config::default();
    assert!(matches!(parse("brunch", t, &cfg), Err(Error::UnknownName(_))));
    assert!(matches!(parse("monthly on day 40", t, &cfg), Err(Error::InvalidRange(_))));
    assert!(matches!(parse("span of 0 hours", t, &cfg), Err(Error::InvalidDuration(_))));
    assert!(matches!(parse("daily from 9 to", t, &cfg), Err(Error::Parse(_))));
}
