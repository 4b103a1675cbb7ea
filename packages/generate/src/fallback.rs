//! Configuration-driven fallback synthesis.
//!
//! When the store is unreachable or a query pipeline fails, callers
//! substitute output from here instead of surfacing an error. Synthetic
//! series reuse the real bucketizer's labels so a consumer cannot tell
//! real and fallback apart structurally; only the caller's
//! `using_fallback` flag distinguishes them.

use satark_analytics::build_buckets;
use satark_analytics_models::{Interval, QueryWindow, TimeSeriesPoint};
use satark_incident_models::{
    CRIME_TYPES, HeatmapPoint, Location, severity_weight,
};
use satark_spatial::{GridSpec, SpatialGrid};
use serde::{Deserialize, Serialize};

use crate::rng::DeterministicRng;

/// Inclusive count range for one interval's synthetic series.
pub type CountRange = (u64, u64);

/// Ranges and map geometry for fallback synthesis.
///
/// Every synthesizer reads from one shared configuration, so callers
/// tune the demo data in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackConfig {
    /// Per-bucket count range for hourly series.
    pub hourly_counts: CountRange,
    /// Per-bucket count range for daily series.
    pub daily_counts: CountRange,
    /// Per-bucket count range for weekly series.
    pub weekly_counts: CountRange,
    /// Per-bucket count range for monthly series.
    pub monthly_counts: CountRange,
    /// Per-cell count cap for synthetic grids.
    pub grid_cell_max: u32,
    /// Center of the demo map.
    pub center: Location,
    /// Scatter radius around the center, in degrees (~0.1 deg is 10 km).
    pub radius_degrees: f64,
    /// Incident-shaped points per synthetic heatmap.
    pub heatmap_incidents: u64,
    /// Prediction-shaped points appended when predictions are requested.
    pub heatmap_predictions: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            hourly_counts: (5, 25),
            daily_counts: (10, 60),
            weekly_counts: (50, 150),
            monthly_counts: (100, 300),
            grid_cell_max: 8,
            center: Location::new(19.076, 72.8777),
            radius_degrees: 0.1,
            heatmap_incidents: 5,
            heatmap_predictions: 3,
        }
    }
}

impl FallbackConfig {
    const fn counts_for(&self, interval: Interval) -> CountRange {
        match interval {
            Interval::Hour => self.hourly_counts,
            Interval::Day => self.daily_counts,
            Interval::Week => self.weekly_counts,
            Interval::Month => self.monthly_counts,
        }
    }
}

/// Calendar month labels used when a monthly fallback has no record set
/// to derive keys from.
const MONTH_LABELS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fabricates a series with the same labels a real aggregation would
/// produce for this interval and window.
///
/// Monthly output is the one exception: real monthly buckets are derived
/// from the data, so the fallback emits the twelve calendar months
/// instead.
#[must_use]
pub fn synthesize_series(
    interval: Interval,
    window: QueryWindow,
    config: &FallbackConfig,
    rng: &mut DeterministicRng,
) -> Vec<TimeSeriesPoint> {
    let (lo, hi) = config.counts_for(interval);
    log::debug!("synthesizing {interval} series with counts in {lo}..={hi}");

    if interval == Interval::Month {
        return MONTH_LABELS
            .iter()
            .map(|label| TimeSeriesPoint {
                label: (*label).to_string(),
                count: rng.range_u64(lo, hi),
            })
            .collect();
    }

    build_buckets(interval, window, &[])
        .into_iter()
        .map(|bucket| TimeSeriesPoint {
            label: bucket.label,
            count: rng.range_u64(lo, hi),
        })
        .collect()
}

/// Fabricates a grid of plausible per-cell counts for a spec.
///
/// # Panics
///
/// Never panics; the cell buffer is sized from the spec.
#[must_use]
pub fn synthesize_grid(
    spec: &GridSpec,
    config: &FallbackConfig,
    rng: &mut DeterministicRng,
) -> SpatialGrid {
    log::debug!("synthesizing {}x{} grid", spec.rows(), spec.cols());
    let cells: Vec<u32> = (0..spec.rows() * spec.cols())
        .map(|_| {
            #[allow(clippy::cast_possible_truncation)]
            let count = rng.range_u64(0, u64::from(config.grid_cell_max)) as u32;
            count
        })
        .collect();

    // Length is rows * cols by construction.
    SpatialGrid::from_counts(spec.rows(), spec.cols(), cells)
        .expect("cell buffer sized from the spec")
}

/// Fabricates demo heatmap points scattered around the configured center.
///
/// Incident-shaped points carry severity-derived weights; when
/// `include_predictions` is set, prediction-shaped points with probability
/// weights are appended, mirroring the merged real output.
#[must_use]
pub fn synthesize_heat_points(
    include_predictions: bool,
    config: &FallbackConfig,
    rng: &mut DeterministicRng,
) -> Vec<HeatmapPoint> {
    let mut points: Vec<HeatmapPoint> = (0..config.heatmap_incidents)
        .map(|_| HeatmapPoint {
            location: scatter_around(config.center, config.radius_degrees, rng),
            weight: severity_weight(rng.range_f64(1.0, 5.0)),
            crime_type: (*rng.choose(CRIME_TYPES)).to_string(),
        })
        .collect();

    if include_predictions {
        points.extend((0..config.heatmap_predictions).map(|_| HeatmapPoint {
            location: scatter_around(config.center, config.radius_degrees, rng),
            weight: rng.range_f64(0.5, 0.95),
            crime_type: satark_incident_models::PREDICTION_CRIME_TYPE.to_string(),
        }));
    }

    points
}

/// Uniform random point within `radius` degrees of `center`.
pub(crate) fn scatter_around(
    center: Location,
    radius: f64,
    rng: &mut DeterministicRng,
) -> Location {
    let angle = rng.range_f64(0.0, 2.0 * std::f64::consts::PI);
    let distance = rng.range_f64(0.0, radius);
    Location::new(
        center.latitude + distance * angle.cos(),
        center.longitude + distance * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use satark_analytics::aggregate;

    use super::*;

    fn window() -> QueryWindow {
        QueryWindow {
            start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn series_counts_stay_in_configured_range() {
        let config = FallbackConfig::default();
        let mut rng = DeterministicRng::seeded(11);
        for (interval, (lo, hi)) in [
            (Interval::Hour, config.hourly_counts),
            (Interval::Day, config.daily_counts),
            (Interval::Week, config.weekly_counts),
            (Interval::Month, config.monthly_counts),
        ] {
            let series = synthesize_series(interval, window(), &config, &mut rng);
            assert!(!series.is_empty());
            assert!(series.iter().all(|p| (lo..=hi).contains(&p.count)));
        }
    }

    #[test]
    fn fallback_labels_match_real_aggregation() {
        let config = FallbackConfig::default();
        let mut rng = DeterministicRng::seeded(5);
        let synthetic = synthesize_series(Interval::Day, window(), &config, &mut rng);

        let buckets = build_buckets(Interval::Day, window(), &[]);
        let real = aggregate(&[], &buckets, None);

        let synthetic_labels: Vec<&str> = synthetic.iter().map(|p| p.label.as_str()).collect();
        let real_labels: Vec<&str> = real.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(synthetic_labels, real_labels);
    }

    #[test]
    fn monthly_fallback_uses_calendar_months() {
        let config = FallbackConfig::default();
        let mut rng = DeterministicRng::seeded(2);
        let series = synthesize_series(Interval::Month, window(), &config, &mut rng);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].label, "Jan");
        assert_eq!(series[11].label, "Dec");
    }

    #[test]
    fn synthetic_grid_matches_spec_shape() {
        let spec = GridSpec::new(3, 5, (0.0, 1.0), (0.0, 1.0)).unwrap();
        let config = FallbackConfig::default();
        let mut rng = DeterministicRng::seeded(9);
        let grid = synthesize_grid(&spec, &config, &mut rng);
        assert_eq!(grid.row_slices().len(), 3);
        assert_eq!(grid.row_slices()[0].len(), 5);
    }

    #[test]
    fn heat_points_are_weighted_and_flagged_by_type() {
        let config = FallbackConfig::default();
        let mut rng = DeterministicRng::seeded(4);

        let without = synthesize_heat_points(false, &config, &mut rng);
        assert_eq!(without.len() as u64, config.heatmap_incidents);

        let with = synthesize_heat_points(true, &config, &mut rng);
        assert_eq!(
            with.len() as u64,
            config.heatmap_incidents + config.heatmap_predictions
        );
        assert!(with.iter().all(|p| (0.0..=1.0).contains(&p.weight)));
        assert_eq!(
            with.iter().filter(|p| p.crime_type == "Prediction").count() as u64,
            config.heatmap_predictions
        );
    }

    #[test]
    fn same_seed_reproduces_output() {
        let config = FallbackConfig::default();
        let a = synthesize_series(
            Interval::Day,
            window(),
            &config,
            &mut DeterministicRng::seeded(77),
        );
        let b = synthesize_series(
            Interval::Day,
            window(),
            &config,
            &mut DeterministicRng::seeded(77),
        );
        assert_eq!(a, b);
    }
}
