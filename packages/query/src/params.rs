//! Query parameters as translated from the HTTP surface.
//!
//! Field names match the wire parameters (`start_date`, `end_date`,
//! `crime_type`, `interval`, `limit`, `offset`, `include_predictions`)
//! so an HTTP layer can deserialize straight into these structs.

use chrono::{DateTime, Utc};
use satark_incident_models::Location;
use serde::{Deserialize, Serialize};

/// Default page size for incident listings.
pub const DEFAULT_LIMIT: usize = 100;

/// Parameters for a time-series query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesParams {
    /// Window start (ISO-8601); defaults to 30 days before now.
    pub start_date: Option<DateTime<Utc>>,
    /// Window end (ISO-8601); defaults to now.
    pub end_date: Option<DateTime<Utc>>,
    /// Exact crime-type filter.
    pub crime_type: Option<String>,
    /// Raw interval string (`hour|day|week|month`); missing means `day`.
    pub interval: Option<String>,
}

/// Parameters for a heatmap query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapParams {
    /// Window start.
    pub start_date: Option<DateTime<Utc>>,
    /// Window end.
    pub end_date: Option<DateTime<Utc>>,
    /// Exact crime-type filter.
    pub crime_type: Option<String>,
    /// Merge prediction points into the output.
    #[serde(default)]
    pub include_predictions: bool,
}

/// Parameters for a statistics query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsParams {
    /// Window start.
    pub start_date: Option<DateTime<Utc>>,
    /// Window end.
    pub end_date: Option<DateTime<Utc>>,
    /// Exact crime-type filter.
    pub crime_type: Option<String>,
}

/// Parameters for a paginated incident listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentsParams {
    /// Window start.
    pub start_date: Option<DateTime<Utc>>,
    /// Window end.
    pub end_date: Option<DateTime<Utc>>,
    /// Exact crime-type filter.
    pub crime_type: Option<String>,
    /// Page size; defaults to [`DEFAULT_LIMIT`].
    pub limit: Option<usize>,
    /// Records to skip.
    pub offset: Option<usize>,
}

/// Parameters for a density grid query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Window start.
    pub start_date: Option<DateTime<Utc>>,
    /// Window end.
    pub end_date: Option<DateTime<Utc>>,
    /// Exact crime-type filter.
    pub crime_type: Option<String>,
    /// Grid rows; missing means the default 32x32 demo grid.
    pub rows: Option<usize>,
    /// Grid columns.
    pub cols: Option<usize>,
    /// Latitude range `(min, max)`.
    pub lat_range: Option<(f64, f64)>,
    /// Longitude range `(min, max)`.
    pub lon_range: Option<(f64, f64)>,
}

/// Parameters for generating hotspot points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotsParams {
    /// Forecast horizon in hours.
    pub hours_ahead: u64,
    /// Fixed crime type; `None` draws from the default label set.
    pub crime_type: Option<String>,
}

impl Default for HotspotsParams {
    fn default() -> Self {
        Self {
            hours_ahead: 24,
            crime_type: None,
        }
    }
}

/// Parameters for generating random scatter predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictParams {
    /// Center of the scatter.
    pub location: Location,
    /// Prediction window start.
    pub start_time: DateTime<Utc>,
    /// Prediction window end.
    pub end_time: DateTime<Utc>,
    /// Candidate crime types; empty means the default label set.
    #[serde(default)]
    pub crime_types: Vec<String>,
}
