#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime incident, prediction, and heatmap record types.
//!
//! These are the canonical domain types shared across the satark workspace.
//! Incident records are immutable once created; there is no update path
//! anywhere in the system, only create and read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Crime type labels used by the generators and demo data.
///
/// Crime types are an open string set — records may carry labels outside
/// this list. This slice only seeds synthetic data.
pub const CRIME_TYPES: &[&str] = &[
    "Theft",
    "Assault",
    "Burglary",
    "Robbery",
    "Vandalism",
    "Fraud",
    "Drug Offense",
    "Vehicle Theft",
    "Harassment",
];

/// Crime type label assigned to synthetic prediction points.
pub const PREDICTION_CRIME_TYPE: &str = "Prediction";

/// A geographic point in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude: f64,
}

impl Location {
    /// Creates a location without validating coordinates.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are within WGS-84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A single reported crime incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Category label (open set, e.g. "Theft", "Assault").
    pub crime_type: String,
    /// Where the incident occurred.
    pub location: Location,
    /// When the incident occurred (UTC).
    pub timestamp: DateTime<Utc>,
    /// Severity on a 1-5 scale.
    pub severity: f64,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// A synthetic forecast point, structurally parallel to [`IncidentRecord`]
/// but carrying a probability instead of a severity and a future timestamp
/// instead of an occurrence time.
///
/// Prediction points come from uniform random sampling around a query
/// location, never from a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    /// Opaque identifier.
    pub id: String,
    /// Predicted crime type label.
    pub crime_type: String,
    /// Predicted location.
    pub location: Location,
    /// Probability in `[0, 1]`.
    pub probability: f64,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Future instant the prediction is for.
    pub for_timestamp: DateTime<Utc>,
}

/// A geolocated, weighted point for density rendering on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    /// Point location.
    pub location: Location,
    /// Display weight in `[0, 1]`.
    pub weight: f64,
    /// Crime type label for the point.
    pub crime_type: String,
}

/// A heatmap point set with its weight envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapData {
    /// Weighted points.
    pub points: Vec<HeatmapPoint>,
    /// Largest weight present, `1.0` when empty.
    pub max_weight: f64,
    /// Smallest weight present, `0.0` when empty.
    pub min_weight: f64,
}

/// Qualitative risk level for a named area.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    /// Minimal elevated risk.
    Low,
    /// Noticeably elevated risk.
    Medium,
    /// Substantially elevated risk.
    High,
}

/// A named location summary with an aggregate risk label, independent of
/// the per-incident grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskArea {
    /// Area name (e.g. a neighborhood).
    pub name: String,
    /// Area center point.
    pub location: Location,
    /// Qualitative risk level.
    pub risk_level: RiskLevel,
    /// Numeric risk score in `[0, 1]`.
    pub risk_score: f64,
    /// Crime types expected in the area.
    pub predicted_crimes: Vec<String>,
}

/// A predicted concentration of activity, rendered as a weighted circle.
///
/// Hotspots come from the random scatter generator, not from any model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Hotspot center.
    pub location: Location,
    /// Probability in `[0, 1]`.
    pub probability: f64,
    /// Display radius in kilometers.
    pub radius_km: f64,
    /// Predicted crime type label.
    pub predicted_type: String,
    /// Predicted instant.
    pub predicted_time: DateTime<Utc>,
}

/// Normalizes a 1-5 severity to a `[0, 1]` heatmap weight.
///
/// Kept as a named transform, separate from the grid builder's raw counts,
/// so both layers can be tested independently.
#[must_use]
pub fn severity_weight(severity: f64) -> f64 {
    (severity / 5.0).clamp(0.0, 1.0)
}
