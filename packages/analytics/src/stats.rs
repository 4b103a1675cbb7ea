//! Statistics rollups.
//!
//! Crime-type, time-of-day, and day-of-week breakdowns over a filtered
//! incident set, for the dashboard statistics cards.

use std::collections::BTreeMap;

use chrono::{Datelike as _, Timelike as _, Weekday};
use satark_analytics_models::{CrimeStatistics, DayOfWeekCounts, TimeOfDayCounts};
use satark_incident_models::IncidentRecord;

/// Computes the statistics rollup for an already-filtered record set.
///
/// By-type counts use a sorted map so serialized output is deterministic.
/// Day parts are six-hour blocks: night 00-06, morning 06-12, afternoon
/// 12-18, evening 18-24.
#[must_use]
pub fn statistics(records: &[IncidentRecord]) -> CrimeStatistics {
    let mut stats = CrimeStatistics {
        total_incidents: records.len() as u64,
        by_type: BTreeMap::new(),
        by_time_of_day: TimeOfDayCounts::default(),
        by_day_of_week: DayOfWeekCounts::default(),
    };

    for record in records {
        *stats.by_type.entry(record.crime_type.clone()).or_insert(0) += 1;

        match record.timestamp.hour() {
            6..=11 => stats.by_time_of_day.morning += 1,
            12..=17 => stats.by_time_of_day.afternoon += 1,
            18..=23 => stats.by_time_of_day.evening += 1,
            _ => stats.by_time_of_day.night += 1,
        }

        match record.timestamp.weekday() {
            Weekday::Mon => stats.by_day_of_week.monday += 1,
            Weekday::Tue => stats.by_day_of_week.tuesday += 1,
            Weekday::Wed => stats.by_day_of_week.wednesday += 1,
            Weekday::Thu => stats.by_day_of_week.thursday += 1,
            Weekday::Fri => stats.by_day_of_week.friday += 1,
            Weekday::Sat => stats.by_day_of_week.saturday += 1,
            Weekday::Sun => stats.by_day_of_week.sunday += 1,
        }
    }

    stats
}
