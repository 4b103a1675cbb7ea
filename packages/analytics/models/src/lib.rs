#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Time-series interval, bucket, and statistics types.
//!
//! Everything here is ephemeral — buckets and series points are recomputed
//! per query and never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Bucketing interval for time-series queries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Interval {
    /// Clock-hour buckets over the last 24 hours.
    Hour,
    /// Calendar-day buckets across the query window.
    Day,
    /// Seven-day buckets from the window start (no calendar alignment).
    Week,
    /// One bucket per `YYYY-MM` key actually present in the data.
    Month,
}

impl Interval {
    /// Parses an interval string, falling back to [`Self::Day`] for
    /// anything unrecognized. Strict parsing is available via [`FromStr`].
    ///
    /// [`FromStr`]: std::str::FromStr
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Day)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::Day
    }
}

/// A half-open time sub-interval `[start, end)` used to group incident
/// counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    /// Display label (e.g. "2025-01-15", "14:00", "Week 3", "2025-01").
    pub label: String,
    /// Inclusive bucket start.
    pub start: DateTime<Utc>,
    /// Exclusive bucket end.
    pub end: DateTime<Utc>,
}

/// One point in an aggregated time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Bucket label, copied from the bucket that produced the count.
    pub label: String,
    /// Incident count in the bucket.
    pub count: u64,
}

/// A concrete query window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryWindow {
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// Number of days the default window reaches back when no start is
    /// given.
    pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

    /// Resolves optional query bounds against a reference instant.
    ///
    /// Missing start defaults to `now - 30 days`, missing end to `now`.
    #[must_use]
    pub fn resolve(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            start: start.unwrap_or_else(|| now - Duration::days(Self::DEFAULT_LOOKBACK_DAYS)),
            end: end.unwrap_or(now),
        }
    }
}

/// Incident counts grouped into four six-hour day parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayCounts {
    /// 06:00-12:00.
    pub morning: u64,
    /// 12:00-18:00.
    pub afternoon: u64,
    /// 18:00-24:00.
    pub evening: u64,
    /// 00:00-06:00.
    pub night: u64,
}

/// Incident counts per weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekCounts {
    /// Monday count.
    pub monday: u64,
    /// Tuesday count.
    pub tuesday: u64,
    /// Wednesday count.
    pub wednesday: u64,
    /// Thursday count.
    pub thursday: u64,
    /// Friday count.
    pub friday: u64,
    /// Saturday count.
    pub saturday: u64,
    /// Sunday count.
    pub sunday: u64,
}

/// Aggregated statistics over a filtered incident set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeStatistics {
    /// Number of incidents after filtering.
    pub total_incidents: u64,
    /// Counts per crime type, sorted by type label.
    pub by_type: BTreeMap<String, u64>,
    /// Counts per six-hour day part.
    pub by_time_of_day: TimeOfDayCounts,
    /// Counts per weekday.
    pub by_day_of_week: DayOfWeekCounts,
}
