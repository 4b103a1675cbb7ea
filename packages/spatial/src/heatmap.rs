//! Heatmap point shaping.
//!
//! Turns incident and prediction records into weighted map points. Weights
//! are a presentation concern layered on top of the raw grid counts:
//! incidents use the normalized severity, predictions use their
//! probability directly.

use satark_incident_models::{
    HeatmapData, HeatmapPoint, IncidentRecord, PREDICTION_CRIME_TYPE, PredictionPoint,
    severity_weight,
};

/// Shapes incidents into heatmap points weighted by normalized severity.
#[must_use]
pub fn incident_points(records: &[IncidentRecord]) -> Vec<HeatmapPoint> {
    records
        .iter()
        .map(|record| HeatmapPoint {
            location: record.location,
            weight: severity_weight(record.severity),
            crime_type: record.crime_type.clone(),
        })
        .collect()
}

/// Shapes prediction points into heatmap points weighted by probability.
///
/// All prediction-derived points carry the `"Prediction"` crime type so
/// the map layer can style them apart from real incidents.
#[must_use]
pub fn prediction_points(predictions: &[PredictionPoint]) -> Vec<HeatmapPoint> {
    predictions
        .iter()
        .map(|pred| HeatmapPoint {
            location: pred.location,
            weight: pred.probability,
            crime_type: PREDICTION_CRIME_TYPE.to_string(),
        })
        .collect()
}

/// Wraps a point set with its weight envelope.
///
/// An empty set reports `min = 0.0`, `max = 1.0` so renderers always
/// see a non-degenerate weight range.
#[must_use]
pub fn heatmap_data(points: Vec<HeatmapPoint>) -> HeatmapData {
    let max_weight = points
        .iter()
        .map(|p| p.weight)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_weight = points
        .iter()
        .map(|p| p.weight)
        .fold(f64::INFINITY, f64::min);

    if points.is_empty() {
        HeatmapData {
            points,
            max_weight: 1.0,
            min_weight: 0.0,
        }
    } else {
        HeatmapData {
            points,
            max_weight,
            min_weight,
        }
    }
}
