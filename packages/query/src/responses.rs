//! Serialization-ready response envelopes.
//!
//! Every envelope carries a `usingFallback` flag; `errorMessage` appears
//! only alongside fallback output. Fallback and genuine payloads share
//! the same field names and types, so consumers can only tell them apart
//! via the flag.

use chrono::{DateTime, Utc};
use satark_analytics_models::{CrimeStatistics, Interval, TimeSeriesPoint};
use satark_incident_models::{HeatmapPoint, HighRiskArea, Hotspot, IncidentRecord, PredictionPoint};
use satark_spatial::SpatialGrid;
use serde::{Deserialize, Serialize};

/// An aggregated time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesResponse {
    /// Ordered series points.
    pub data: Vec<TimeSeriesPoint>,
    /// Interval the series was bucketed by.
    pub interval: Interval,
    /// Whether the payload is synthetic.
    pub using_fallback: bool,
    /// Human-readable reason, present only with fallback payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Weighted heatmap points with their weight envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapResponse {
    /// Weighted points.
    pub points: Vec<HeatmapPoint>,
    /// Largest weight present.
    pub max_weight: f64,
    /// Smallest weight present.
    pub min_weight: f64,
    /// Whether the payload is synthetic.
    pub using_fallback: bool,
    /// Human-readable reason, present only with fallback payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A spatial density grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    /// Per-cell counts.
    pub grid: SpatialGrid,
    /// Whether the payload is synthetic.
    pub using_fallback: bool,
    /// Human-readable reason, present only with fallback payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Statistics rollup plus high-risk area summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Aggregated statistics.
    pub statistics: CrimeStatistics,
    /// Named high-risk areas.
    pub high_risk_areas: Vec<HighRiskArea>,
    /// Whether the payload is synthetic.
    pub using_fallback: bool,
    /// Human-readable reason, present only with fallback payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A newest-first page of incidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentsResponse {
    /// The requested page.
    pub incidents: Vec<IncidentRecord>,
    /// Matching records before pagination.
    pub total: u64,
    /// Whether the payload is synthetic.
    pub using_fallback: bool,
    /// Human-readable reason, present only with fallback payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Generated hotspot points, sorted by probability descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotsResponse {
    /// Generated hotspots.
    pub hotspots: Vec<Hotspot>,
    /// When the hotspots were generated.
    pub generated_at: DateTime<Utc>,
    /// Sampling scheme identifier (always `"random-scatter"`).
    pub generator: String,
}

/// Generated prediction points.
///
/// `generator` names the sampling scheme so no consumer mistakes this
/// for model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    /// Generated points.
    pub predictions: Vec<PredictionPoint>,
    /// When the points were generated.
    pub generated_at: DateTime<Utc>,
    /// Sampling scheme identifier (always `"random-scatter"`).
    pub generator: String,
}
