use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::{America::New_York, UTC};
use learntrack_backend::services::activity::{
    clamp_days, clamp_limit, clamp_page, daily_series, window_start, window_start_utc,
};

#[test]
fn seven_day_series_spans_seven_consecutive_dates_ending_today() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let series = daily_series(&[], 7, UTC, today);

    assert_eq!(series.len(), 7);
    assert_eq!(series.last().unwrap().date, today);
    for (i, entry) in series.iter().enumerate() {
        assert_eq!(entry.date, today - Duration::days(6 - i as i64));
        assert!(entry.total_events >= 0);
    }
}

#[test]
fn counts_land_in_their_calendar_day() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let events = vec![
        Utc.with_ymd_and_hms(2025, 3, 8, 0, 0, 1).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 8, 23, 59, 59).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
    ];
    let series = daily_series(&events, 7, UTC, today);

    let on = |d: u32| {
        series
            .iter()
            .find(|e| e.date == NaiveDate::from_ymd_opt(2025, 3, d).unwrap())
            .unwrap()
            .total_events
    };
    assert_eq!(on(8), 2);
    assert_eq!(on(9), 0);
    assert_eq!(on(10), 1);
}

#[test]
fn timezone_shifts_events_across_midnight() {
    // 2025-03-10 02:00 UTC is still 2025-03-09 in New York.
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let event = Utc.with_ymd_and_hms(2025, 3, 10, 2, 0, 0).unwrap();

    let series = daily_series(&[event], 2, New_York, today);
    assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    assert_eq!(series[0].total_events, 1);
    assert_eq!(series[1].total_events, 0);
}

#[test]
fn single_day_window_is_just_today() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert_eq!(window_start(today, 1), today);
    let series = daily_series(&[], 1, UTC, today);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, today);
}

#[test]
fn window_start_utc_is_local_midnight() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let start = window_start_utc(today, 7, New_York);
    // midnight June 4 in New York is 04:00 UTC (EDT)
    assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 4, 4, 0, 0).unwrap());
}

#[test]
fn paging_and_day_bounds_are_clamped() {
    assert_eq!(clamp_page(Some(-1)), 1);
    assert_eq!(clamp_limit(Some(1000)), 200);
    assert_eq!(clamp_limit(Some(0)), 1);
    assert_eq!(clamp_days(Some(91)), 90);
    assert_eq!(clamp_days(Some(0)), 1);
    assert_eq!(clamp_days(None), 7);
}
