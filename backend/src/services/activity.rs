//! Activity query normalization and daily bucketing.
//!
//! Bucketing happens in the configured server timezone: events are fetched
//! as UTC instants and folded into local calendar days here, so the series
//! shape is independent of the database's timezone handling.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::activity::DailyActivityEntry;

pub const DEFAULT_PAGE_LIMIT: i64 = 50;
pub const MAX_PAGE_LIMIT: i64 = 200;
pub const DEFAULT_DAILY_DAYS: i64 = 7;
pub const MAX_DAILY_DAYS: i64 = 90;

pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

pub fn clamp_days(days: Option<i64>) -> i64 {
    days.unwrap_or(DEFAULT_DAILY_DAYS).clamp(1, MAX_DAILY_DAYS)
}

/// First calendar day of a trailing window of `days` ending on `today`.
pub fn window_start(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days - 1)
}

/// UTC instant of local midnight on the window's first day, for the SQL
/// `occurred_at >=` filter. Falls back to treating the naive midnight as UTC
/// when the local time is skipped by a DST transition.
pub fn window_start_utc(today: NaiveDate, days: i64, tz: Tz) -> DateTime<Utc> {
    let midnight = window_start(today, days).and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Buckets UTC event instants into local calendar days over a trailing
/// window ending on `today`. Days without events are emitted with count 0;
/// the series is contiguous, oldest-first, and always `days` long.
pub fn daily_series(
    timestamps: &[DateTime<Utc>],
    days: i64,
    tz: Tz,
    today: NaiveDate,
) -> Vec<DailyActivityEntry> {
    let start = window_start(today, days);

    let mut series: Vec<DailyActivityEntry> = (0..days)
        .map(|offset| DailyActivityEntry {
            date: start + Duration::days(offset),
            total_events: 0,
        })
        .collect();

    for ts in timestamps {
        let local_day = ts.with_timezone(&tz).date_naive();
        let offset = (local_day - start).num_days();
        if (0..days).contains(&offset) {
            series[offset as usize].total_events += 1;
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{Asia::Tokyo, UTC};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn clamps_follow_bounds() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(4)), 4);

        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), 200);

        assert_eq!(clamp_days(None), 7);
        assert_eq!(clamp_days(Some(0)), 1);
        assert_eq!(clamp_days(Some(365)), 90);
    }

    #[test]
    fn seven_day_series_is_contiguous_and_zero_filled() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let events = vec![utc(2025, 8, 5, 10), utc(2025, 8, 5, 11), utc(2025, 8, 7, 1)];

        let series = daily_series(&events, 7, UTC, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(series[6].date, today);
        for window in series.windows(2) {
            assert_eq!(window[1].date - window[0].date, Duration::days(1));
        }
        assert_eq!(series[4].total_events, 2);
        assert_eq!(series[6].total_events, 1);
        assert_eq!(series.iter().map(|e| e.total_events).sum::<i64>(), 3);
    }

    #[test]
    fn empty_history_still_yields_full_series() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let series = daily_series(&[], 7, UTC, today);
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|e| e.total_events == 0));
    }

    #[test]
    fn events_bucket_into_local_days() {
        // 2025-08-04 23:00 UTC is already 2025-08-05 in Tokyo.
        let today = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        let series = daily_series(&[utc(2025, 8, 4, 23)], 2, Tokyo, today);
        assert_eq!(series[0].total_events, 0);
        assert_eq!(series[1].total_events, 1);
    }

    #[test]
    fn events_outside_window_are_ignored() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let series = daily_series(&[utc(2025, 7, 1, 0), utc(2025, 9, 1, 0)], 7, UTC, today);
        assert!(series.iter().all(|e| e.total_events == 0));
    }

    #[test]
    fn window_start_is_inclusive_of_today() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        assert_eq!(
            window_start(today, 7),
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
        );
        assert_eq!(window_start(today, 1), today);
    }
}
