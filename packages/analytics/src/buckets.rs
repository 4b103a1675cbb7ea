//! Interval bucketizer.
//!
//! Maps a query window into an ordered, contiguous, non-overlapping
//! sequence of [`TimeBucket`]s. Hour, day, and week buckets are
//! range-driven: every bucket in the window appears, even when it will
//! count zero incidents. Month buckets are data-driven: only `YYYY-MM`
//! keys actually present in the record set produce a bucket.

use chrono::{DateTime, Datelike as _, Duration, NaiveDate, Timelike as _, Utc};
use satark_analytics_models::{Interval, QueryWindow, TimeBucket};
use satark_incident_models::IncidentRecord;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Hourly views always cover the last 24 clock hours before the window
/// end, regardless of the requested span.
const HOURLY_BUCKETS: i64 = 24;

/// Builds the bucket sequence for a window and interval.
///
/// `records` only matters for [`Interval::Month`], whose bucket set is
/// derived from the months present in the data. An inverted window
/// (`end < start`) yields an empty sequence for every interval.
#[must_use]
pub fn build_buckets(
    interval: Interval,
    window: QueryWindow,
    records: &[IncidentRecord],
) -> Vec<TimeBucket> {
    if window.end < window.start {
        log::debug!(
            "inverted window {} .. {}, returning no buckets",
            window.start,
            window.end
        );
        return Vec::new();
    }

    match interval {
        Interval::Hour => hourly_buckets(window.end),
        Interval::Day => daily_buckets(window),
        Interval::Week => weekly_buckets(window),
        Interval::Month => monthly_buckets(records),
    }
}

/// The last 24 clock hours ending at `end`'s hour boundary.
fn hourly_buckets(end: DateTime<Utc>) -> Vec<TimeBucket> {
    let end_hour = truncate_to_hour(end);

    (0..HOURLY_BUCKETS)
        .map(|h| {
            let start = end_hour - Duration::hours(HOURLY_BUCKETS - h);
            TimeBucket {
                label: format!("{:02}:00", start.hour()),
                start,
                end: start + Duration::hours(1),
            }
        })
        .collect()
}

/// One bucket per calendar day from the window start's midnight.
fn daily_buckets(window: QueryWindow) -> Vec<TimeBucket> {
    let days = ceil_div(span_seconds(window), SECONDS_PER_DAY) + 1;
    let first = midnight(window.start);

    (0..days)
        .map(|d| {
            let start = first + Duration::days(d);
            TimeBucket {
                label: start.format("%Y-%m-%d").to_string(),
                start,
                end: start + Duration::days(1),
            }
        })
        .collect()
}

/// One bucket per seven-day span from the window start's midnight.
///
/// Labels are 1-indexed positions within the window, not calendar weeks.
fn weekly_buckets(window: QueryWindow) -> Vec<TimeBucket> {
    let weeks = ceil_div(span_seconds(window), 7 * SECONDS_PER_DAY) + 1;
    let first = midnight(window.start);

    (0..weeks)
        .map(|w| {
            let start = first + Duration::weeks(w);
            TimeBucket {
                label: format!("Week {}", w + 1),
                start,
                end: start + Duration::weeks(1),
            }
        })
        .collect()
}

/// One bucket per distinct `YYYY-MM` key present in `records`, ascending.
fn monthly_buckets(records: &[IncidentRecord]) -> Vec<TimeBucket> {
    let mut keys: Vec<(i32, u32)> = records
        .iter()
        .map(|r| (r.timestamp.year(), r.timestamp.month()))
        .collect();
    keys.sort_unstable();
    keys.dedup();

    keys.into_iter()
        .filter_map(|(year, month)| {
            let start = first_of_month(year, month)?;
            let end = if month == 12 {
                first_of_month(year + 1, 1)?
            } else {
                first_of_month(year, month + 1)?
            };
            Some(TimeBucket {
                label: format!("{year:04}-{month:02}"),
                start,
                end,
            })
        })
        .collect()
}

fn span_seconds(window: QueryWindow) -> i64 {
    (window.end - window.start).num_seconds()
}

const fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

fn truncate_to_hour(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(dt)
}

fn midnight(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(dt, |naive| naive.and_utc())
}

fn first_of_month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use satark_incident_models::Location;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn record(ts: DateTime<Utc>) -> IncidentRecord {
        IncidentRecord {
            id: "t".to_string(),
            crime_type: "Theft".to_string(),
            location: Location::new(19.07, 72.88),
            timestamp: ts,
            severity: 3.0,
            description: None,
        }
    }

    #[test]
    fn daily_bucket_count_matches_ceiling_formula() {
        let window = QueryWindow {
            start: utc(2024, 1, 1, 0, 0, 0),
            end: utc(2024, 1, 10, 0, 0, 0),
        };
        let buckets = build_buckets(Interval::Day, window, &[]);
        // ceil(9 days / 1 day) + 1
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0].label, "2024-01-01");
        assert_eq!(buckets[9].label, "2024-01-10");
    }

    #[test]
    fn daily_buckets_are_contiguous() {
        let window = QueryWindow {
            start: utc(2024, 2, 27, 8, 30, 0),
            end: utc(2024, 3, 2, 17, 0, 0),
        };
        let buckets = build_buckets(Interval::Day, window, &[]);
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        // Leap day appears
        assert!(buckets.iter().any(|b| b.label == "2024-02-29"));
    }

    #[test]
    fn hourly_always_24_buckets_ending_at_window_end() {
        let window = QueryWindow {
            start: utc(2024, 1, 1, 0, 0, 0),
            end: utc(2024, 6, 15, 14, 45, 12),
        };
        let buckets = build_buckets(Interval::Hour, window, &[]);
        assert_eq!(buckets.len(), 24);
        assert_eq!(buckets[23].end, utc(2024, 6, 15, 14, 0, 0));
        assert_eq!(buckets[23].label, "13:00");
        assert_eq!(buckets[0].start, utc(2024, 6, 14, 14, 0, 0));
    }

    #[test]
    fn weekly_labels_are_positional() {
        let window = QueryWindow {
            start: utc(2024, 1, 1, 0, 0, 0),
            end: utc(2024, 1, 20, 0, 0, 0),
        };
        let buckets = build_buckets(Interval::Week, window, &[]);
        // ceil(19 days / 7 days) + 1 = 4
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "Week 1");
        assert_eq!(buckets[3].label, "Week 4");
        assert_eq!(buckets[1].start, utc(2024, 1, 8, 0, 0, 0));
    }

    #[test]
    fn monthly_buckets_are_data_driven() {
        let records = vec![
            record(utc(2024, 3, 5, 10, 0, 0)),
            record(utc(2024, 1, 20, 3, 0, 0)),
            record(utc(2024, 3, 28, 23, 0, 0)),
            record(utc(2023, 12, 31, 12, 0, 0)),
        ];
        let window = QueryWindow {
            start: utc(2023, 1, 1, 0, 0, 0),
            end: utc(2024, 12, 31, 0, 0, 0),
        };
        let buckets = build_buckets(Interval::Month, window, &records);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        // Only months with records, sorted; February absent
        assert_eq!(labels, ["2023-12", "2024-01", "2024-03"]);
        assert_eq!(buckets[0].end, utc(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn inverted_window_yields_no_buckets() {
        let window = QueryWindow {
            start: utc(2024, 5, 1, 0, 0, 0),
            end: utc(2024, 4, 1, 0, 0, 0),
        };
        for interval in [Interval::Hour, Interval::Day, Interval::Week, Interval::Month] {
            assert!(build_buckets(interval, window, &[]).is_empty());
        }
    }

    #[test]
    fn same_instant_window_yields_single_day_bucket() {
        let at = utc(2024, 7, 4, 9, 0, 0);
        let window = QueryWindow { start: at, end: at };
        let buckets = build_buckets(Interval::Day, window, &[]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "2024-07-04");
    }
}
