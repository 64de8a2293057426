use chrono::TimeZone;

use super::*;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn cron(expr: &str) -> CronSchedule {
    expr.parse().unwrap()
}

#[test]
fn weekly_default_fires_next_sunday_midnight() {
    // 2024-03-06 is a Wednesday.
    let next = cron("0 0 * * 0").next_after(at(2024, 3, 6, 15, 42));
    assert_eq!(next, Some(at(2024, 3, 10, 0, 0)));
}

#[test]
fn next_is_strictly_after() {
    let schedule = cron("0 0 * * 0");
    let sunday_midnight = at(2024, 3, 10, 0, 0);
    assert_eq!(
        schedule.next_after(sunday_midnight),
        Some(at(2024, 3, 17, 0, 0))
    );
}

#[test]
fn seconds_are_truncated() {
    let after = Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 30).unwrap();
    assert_eq!(cron("* * * * *").next_after(after), Some(at(2024, 3, 6, 10, 1)));
}

#[test]
fn steps_and_ranges() {
    let schedule = cron("*/15 9-17 * * 1-5");
    // Friday 17:50 → Monday 09:00.
    assert_eq!(
        schedule.next_after(at(2024, 3, 8, 17, 50)),
        Some(at(2024, 3, 11, 9, 0))
    );
    assert_eq!(
        schedule.next_after(at(2024, 3, 11, 9, 0)),
        Some(at(2024, 3, 11, 9, 15))
    );
}

#[test]
fn restricted_day_fields_match_either() {
    // 1st of the month or any Monday.
    let schedule = cron("0 12 1 * 1");
    assert_eq!(
        schedule.next_after(at(2024, 3, 2, 0, 0)),
        Some(at(2024, 3, 4, 12, 0))
    );
    assert_eq!(
        schedule.next_after(at(2024, 5, 28, 0, 0)),
        Some(at(2024, 6, 1, 12, 0))
    );
}

#[test]
fn seven_is_sunday() {
    let after = at(2024, 3, 6, 15, 42);
    assert_eq!(
        cron("0 0 * * 7").next_after(after),
        cron("0 0 * * 0").next_after(after)
    );
}

#[test]
fn weekday_and_month_names() {
    assert_eq!(
        cron("0 0 * * sun").next_after(at(2024, 3, 6, 15, 42)),
        Some(at(2024, 3, 10, 0, 0))
    );
    assert_eq!(
        cron("0 0 1 jan *").next_after(at(2024, 3, 6, 15, 42)),
        Some(at(2025, 1, 1, 0, 0))
    );
    // Friday evening → Monday morning.
    assert_eq!(
        cron("0 9 * * mon-fri").next_after(at(2024, 3, 8, 17, 50)),
        Some(at(2024, 3, 11, 9, 0))
    );
}

#[test]
fn leap_day_schedule() {
    assert_eq!(
        cron("0 0 29 2 *").next_after(at(2024, 3, 1, 0, 0)),
        Some(at(2028, 2, 29, 0, 0))
    );
}

#[test]
fn impossible_date_never_fires() {
    assert_eq!(cron("0 0 31 2 *").next_after(at(2024, 1, 1, 0, 0)), None);
}

#[test]
fn lists_fire_on_each_value() {
    let schedule = cron("0,30 6,18 * * *");
    assert_eq!(
        schedule.next_after(at(2024, 3, 6, 6, 10)),
        Some(at(2024, 3, 6, 6, 30))
    );
    assert_eq!(
        schedule.next_after(at(2024, 3, 6, 6, 30)),
        Some(at(2024, 3, 6, 18, 0))
    );
}

#[test]
fn display_keeps_the_expression() {
    let schedule = cron("0  0 * *\t0");
    assert_eq!(schedule.to_string(), "0 0 * * 0");
    assert_eq!(schedule.expression(), "0 0 * * 0");
    assert_eq!(cron(&schedule.to_string()).to_string(), "0 0 * * 0");
}

#[test]
fn wrong_field_count_is_rejected() {
    assert!(matches!(
        "0 0 * *".parse::<CronSchedule>(),
        Err(CronError::FieldCount(4))
    ));
    assert!(matches!(
        "0 0 * * * *".parse::<CronSchedule>(),
        Err(CronError::FieldCount(6))
    ));
    assert!(matches!(
        "".parse::<CronSchedule>(),
        Err(CronError::FieldCount(0))
    ));
}

#[test]
fn invalid_fields_are_rejected() {
    for expr in ["60 0 * * *", "0 24 * * *", "0 0 * 13 *", "0 0 * * 8", "x 0 * * *"] {
        let err = expr.parse::<CronSchedule>().unwrap_err();
        assert!(
            matches!(&err, CronError::Invalid { expression, .. } if expression == expr),
            "{expr}: {err:?}"
        );
    }
}
