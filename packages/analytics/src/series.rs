//! Series aggregator.
//!
//! Counts incidents per bucket with half-open membership: a record whose
//! timestamp equals a bucket's end belongs to the next bucket. No bucket
//! is ever omitted from the output, even at count zero.

use satark_analytics_models::{TimeBucket, TimeSeriesPoint};
use satark_incident_models::IncidentRecord;

/// Counts records per bucket, optionally filtered to one crime type first.
///
/// The filter is an exact, case-sensitive match. Output order mirrors
/// bucket order. Runs in `O(records × buckets)`.
#[must_use]
pub fn aggregate(
    records: &[IncidentRecord],
    buckets: &[TimeBucket],
    crime_type_filter: Option<&str>,
) -> Vec<TimeSeriesPoint> {
    let filtered: Vec<&IncidentRecord> = records
        .iter()
        .filter(|r| crime_type_filter.is_none_or(|ct| r.crime_type == ct))
        .collect();

    buckets
        .iter()
        .map(|bucket| TimeSeriesPoint {
            label: bucket.label.clone(),
            count: filtered
                .iter()
                .filter(|r| bucket.start <= r.timestamp && r.timestamp < bucket.end)
                .count() as u64,
        })
        .collect()
}
