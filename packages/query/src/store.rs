//! Incident store boundary.
//!
//! The pipeline never runs its own queries; it fetches once through this
//! trait and aggregates in memory. Store failures are the
//! "upstream unavailable" taxon and are absorbed by the pipeline, never
//! re-raised to callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use satark_incident_models::{IncidentRecord, PredictionPoint};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the external store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("incident store unavailable: {0}")]
    Unavailable(String),

    /// The store returned a payload that could not be decoded.
    #[error("malformed store payload: {0}")]
    MalformedPayload(String),
}

/// Optional filters applied by the store before the records reach the
/// aggregation core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentFilter {
    /// Keep records with `timestamp >= start_date`.
    pub start_date: Option<DateTime<Utc>>,
    /// Keep records with `timestamp <= end_date`.
    pub end_date: Option<DateTime<Utc>>,
    /// Keep records with exactly this crime type.
    pub crime_type: Option<String>,
}

impl IncidentFilter {
    /// Evaluates the filter against one record.
    ///
    /// In-memory stores apply this predicate post-fetch; database-backed
    /// stores may push the same semantics down as query clauses instead.
    #[must_use]
    pub fn matches(&self, record: &IncidentRecord) -> bool {
        if let Some(start) = self.start_date
            && record.timestamp < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && record.timestamp > end
        {
            return false;
        }
        if let Some(crime_type) = &self.crime_type
            && record.crime_type != *crime_type
        {
            return false;
        }
        true
    }
}

/// External incident store.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Fetches incidents matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unreachable or returns a
    /// malformed payload.
    async fn fetch_incidents(
        &self,
        filter: &IncidentFilter,
    ) -> Result<Vec<IncidentRecord>, StoreError>;

    /// Fetches prediction points with `for_timestamp >= after`, optionally
    /// restricted to one crime type.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unreachable or returns a
    /// malformed payload.
    async fn fetch_predictions(
        &self,
        after: DateTime<Utc>,
        crime_type: Option<&str>,
    ) -> Result<Vec<PredictionPoint>, StoreError>;
}

/// A store over already-loaded record sets.
///
/// Backs the CLI's JSON file store and the pipeline tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    incidents: Vec<IncidentRecord>,
    predictions: Vec<PredictionPoint>,
}

impl InMemoryStore {
    /// Wraps in-memory record sets.
    #[must_use]
    pub const fn new(
        incidents: Vec<IncidentRecord>,
        predictions: Vec<PredictionPoint>,
    ) -> Self {
        Self {
            incidents,
            predictions,
        }
    }
}

#[async_trait]
impl IncidentStore for InMemoryStore {
    async fn fetch_incidents(
        &self,
        filter: &IncidentFilter,
    ) -> Result<Vec<IncidentRecord>, StoreError> {
        Ok(self
            .incidents
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn fetch_predictions(
        &self,
        after: DateTime<Utc>,
        crime_type: Option<&str>,
    ) -> Result<Vec<PredictionPoint>, StoreError> {
        Ok(self
            .predictions
            .iter()
            .filter(|p| {
                p.for_timestamp >= after
                    && crime_type.is_none_or(|ct| p.crime_type == ct)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use satark_incident_models::Location;

    use super::*;

    fn record(crime_type: &str, ts: DateTime<Utc>) -> IncidentRecord {
        IncidentRecord {
            id: ts.to_rfc3339(),
            crime_type: crime_type.to_string(),
            location: Location::new(19.07, 72.88),
            timestamp: ts,
            severity: 3.0,
            description: None,
        }
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let filter = IncidentFilter {
            start_date: Some(at),
            end_date: Some(at),
            crime_type: None,
        };
        assert!(filter.matches(&record("Theft", at)));
        assert!(!filter.matches(&record("Theft", at - chrono::Duration::seconds(1))));
        assert!(!filter.matches(&record("Theft", at + chrono::Duration::seconds(1))));
    }

    #[test]
    fn filter_crime_type_is_exact() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let filter = IncidentFilter {
            crime_type: Some("Theft".to_string()),
            ..IncidentFilter::default()
        };
        assert!(filter.matches(&record("Theft", at)));
        assert!(!filter.matches(&record("theft", at)));
        assert!(!filter.matches(&record("Assault", at)));
    }
}
