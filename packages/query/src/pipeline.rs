//! Query pipeline: fetch once, aggregate, fall back when the store fails.
//!
//! Whether synthetic data may stand in for real records is a single
//! explicit [`FallbackPolicy`] applied uniformly across every
//! operation, never a per-operation choice.

use chrono::Utc;
use satark_analytics::{aggregate, build_buckets, statistics};
use satark_analytics_models::{Interval, QueryWindow};
use satark_generate::{
    DeterministicRng, FallbackConfig, RandomScatterGenerator, synthesize_grid,
    synthesize_heat_points, synthesize_series,
};
use satark_incident_models::HeatmapPoint;
use satark_spatial::{GridSpec, build_grid, heatmap_data, incident_points, prediction_points};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::params::{
    DEFAULT_LIMIT, GridParams, HeatmapParams, HotspotsParams, IncidentsParams, PredictParams,
    StatisticsParams, TimeSeriesParams,
};
use crate::responses::{
    GridResponse, HeatmapResponse, HotspotsResponse, IncidentsResponse, PredictionResponse,
    StatisticsResponse, TimeSeriesResponse,
};
use crate::store::{IncidentFilter, IncidentStore};
use crate::QueryError;

/// Mock incident count behind synthetic statistics and listings.
const FALLBACK_INCIDENT_COUNT: u64 = 100;

/// When the pipeline substitutes synthetic output.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FallbackPolicy {
    /// Substitute only when the store fetch fails.
    #[default]
    OnError,
    /// Substitute on store failure or when the fetch returns no records.
    OnEmpty,
    /// Bypass the store entirely and always serve synthetic output.
    Always,
}

/// The caller-facing query surface.
///
/// Holds no mutable state; every operation fetches once, runs the pure
/// aggregation core, and resolves availability failures per the policy.
/// Synthetic output is seeded, so a pipeline with a fixed seed is fully
/// reproducible.
#[derive(Debug, Clone)]
pub struct Pipeline<S> {
    store: S,
    policy: FallbackPolicy,
    fallback: FallbackConfig,
    seed: u64,
    strict_intervals: bool,
}

impl<S: IncidentStore> Pipeline<S> {
    /// Creates a pipeline with the default policy ([`FallbackPolicy::OnError`]),
    /// default fallback configuration, and a fixed seed.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: FallbackPolicy::default(),
            fallback: FallbackConfig::default(),
            seed: 0,
            strict_intervals: false,
        }
    }

    /// Sets the fallback policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the fallback configuration.
    #[must_use]
    pub const fn with_fallback_config(mut self, config: FallbackConfig) -> Self {
        self.fallback = config;
        self
    }

    /// Sets the seed behind synthetic output.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Makes unknown interval strings a [`QueryError`] instead of
    /// defaulting to daily buckets.
    #[must_use]
    pub const fn with_strict_intervals(mut self, strict: bool) -> Self {
        self.strict_intervals = strict;
        self
    }

    /// Aggregated time series for the window and interval.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownInterval`] for an unrecognized
    /// interval string under strict parsing. Store failures never error;
    /// they produce a flagged fallback series.
    pub async fn time_series(
        &self,
        params: &TimeSeriesParams,
    ) -> Result<TimeSeriesResponse, QueryError> {
        let interval = self.parse_interval(params.interval.as_deref())?;
        let window = QueryWindow::resolve(params.start_date, params.end_date, Utc::now());

        if self.policy == FallbackPolicy::Always {
            return Ok(self.fallback_series(interval, window, BYPASSED_MESSAGE));
        }

        match self.store.fetch_incidents(&self.filter(
            params.start_date,
            params.end_date,
            params.crime_type.clone(),
        )).await
        {
            Ok(records) if records.is_empty() && self.policy == FallbackPolicy::OnEmpty => {
                Ok(self.fallback_series(interval, window, EMPTY_MESSAGE))
            }
            Ok(records) => {
                let buckets = build_buckets(interval, window, &records);
                Ok(TimeSeriesResponse {
                    data: aggregate(&records, &buckets, params.crime_type.as_deref()),
                    interval,
                    using_fallback: false,
                    error_message: None,
                })
            }
            Err(err) => {
                log::error!("time series fetch failed: {err}");
                Ok(self.fallback_series(interval, window, UNAVAILABLE_MESSAGE))
            }
        }
    }

    /// Weighted heatmap points, optionally merged with stored predictions.
    pub async fn heatmap(&self, params: &HeatmapParams) -> HeatmapResponse {
        let mut rng = self.rng();

        if self.policy == FallbackPolicy::Always {
            let points =
                synthesize_heat_points(params.include_predictions, &self.fallback, &mut rng);
            return heatmap_envelope(points, true, Some(BYPASSED_MESSAGE));
        }

        let fetched = self
            .store
            .fetch_incidents(&self.filter(
                params.start_date,
                params.end_date,
                params.crime_type.clone(),
            ))
            .await;

        let records = match fetched {
            Ok(records) => records,
            Err(err) => {
                log::error!("heatmap fetch failed: {err}");
                let points =
                    synthesize_heat_points(params.include_predictions, &self.fallback, &mut rng);
                return heatmap_envelope(points, true, Some(UNAVAILABLE_MESSAGE));
            }
        };

        let mut points = incident_points(&records);
        let mut using_fallback = false;
        let mut message = None;

        if params.include_predictions {
            match self
                .store
                .fetch_predictions(Utc::now(), params.crime_type.as_deref())
                .await
            {
                Ok(predictions) => points.extend(prediction_points(&predictions)),
                Err(err) => {
                    // Keep the real incidents, substitute only the
                    // prediction layer.
                    log::error!("prediction fetch failed: {err}");
                    let predictions_only = FallbackConfig {
                        heatmap_incidents: 0,
                        ..self.fallback
                    };
                    points.extend(synthesize_heat_points(true, &predictions_only, &mut rng));
                    using_fallback = true;
                    message = Some(PREDICTIONS_UNAVAILABLE_MESSAGE);
                }
            }
        }

        if points.is_empty() && self.policy == FallbackPolicy::OnEmpty {
            let points =
                synthesize_heat_points(params.include_predictions, &self.fallback, &mut rng);
            return heatmap_envelope(points, true, Some(EMPTY_MESSAGE));
        }

        heatmap_envelope(points, using_fallback, message)
    }

    /// Spatial density grid over the requested bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Grid`] for non-positive dimensions or an
    /// inverted coordinate range.
    pub async fn density_grid(&self, params: &GridParams) -> Result<GridResponse, QueryError> {
        let default_spec = GridSpec::mumbai_default();
        let spec = GridSpec::new(
            params.rows.unwrap_or(default_spec.rows()),
            params.cols.unwrap_or(default_spec.cols()),
            params.lat_range.unwrap_or((19.0, 19.3)),
            params.lon_range.unwrap_or((72.8, 73.1)),
        )?;
        let mut rng = self.rng();

        if self.policy == FallbackPolicy::Always {
            return Ok(GridResponse {
                grid: synthesize_grid(&spec, &self.fallback, &mut rng),
                using_fallback: true,
                error_message: Some(BYPASSED_MESSAGE.to_string()),
            });
        }

        match self.store.fetch_incidents(&self.filter(
            params.start_date,
            params.end_date,
            params.crime_type.clone(),
        )).await
        {
            Ok(records) if records.is_empty() && self.policy == FallbackPolicy::OnEmpty => {
                Ok(GridResponse {
                    grid: synthesize_grid(&spec, &self.fallback, &mut rng),
                    using_fallback: true,
                    error_message: Some(EMPTY_MESSAGE.to_string()),
                })
            }
            Ok(records) => Ok(GridResponse {
                grid: build_grid(&records, &spec),
                using_fallback: false,
                error_message: None,
            }),
            Err(err) => {
                log::error!("grid fetch failed: {err}");
                Ok(GridResponse {
                    grid: synthesize_grid(&spec, &self.fallback, &mut rng),
                    using_fallback: true,
                    error_message: Some(UNAVAILABLE_MESSAGE.to_string()),
                })
            }
        }
    }

    /// Statistics rollup plus the demo high-risk area summaries.
    pub async fn statistics(&self, params: &StatisticsParams) -> StatisticsResponse {
        if self.policy == FallbackPolicy::Always {
            return self.fallback_statistics(BYPASSED_MESSAGE);
        }

        match self.store.fetch_incidents(&self.filter(
            params.start_date,
            params.end_date,
            params.crime_type.clone(),
        )).await
        {
            Ok(records) if records.is_empty() && self.policy == FallbackPolicy::OnEmpty => {
                self.fallback_statistics(EMPTY_MESSAGE)
            }
            Ok(records) => StatisticsResponse {
                statistics: statistics(&records),
                high_risk_areas: self.scatter().high_risk_areas(),
                using_fallback: false,
                error_message: None,
            },
            Err(err) => {
                log::error!("statistics fetch failed: {err}");
                self.fallback_statistics(UNAVAILABLE_MESSAGE)
            }
        }
    }

    /// Newest-first page of incidents.
    pub async fn incidents(&self, params: &IncidentsParams) -> IncidentsResponse {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let (mut records, using_fallback, message) = if self.policy == FallbackPolicy::Always {
            (
                self.scatter().mock_incidents(FALLBACK_INCIDENT_COUNT),
                true,
                Some(BYPASSED_MESSAGE),
            )
        } else {
            match self.store.fetch_incidents(&self.filter(
                params.start_date,
                params.end_date,
                params.crime_type.clone(),
            )).await
            {
                Ok(records) if records.is_empty() && self.policy == FallbackPolicy::OnEmpty => (
                    self.scatter().mock_incidents(FALLBACK_INCIDENT_COUNT),
                    true,
                    Some(EMPTY_MESSAGE),
                ),
                Ok(records) => (records, false, None),
                Err(err) => {
                    log::error!("incident listing fetch failed: {err}");
                    (
                        self.scatter().mock_incidents(FALLBACK_INCIDENT_COUNT),
                        true,
                        Some(UNAVAILABLE_MESSAGE),
                    )
                }
            }
        };

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let total = records.len() as u64;
        let incidents: Vec<_> = records.into_iter().skip(offset).take(limit).collect();

        IncidentsResponse {
            incidents,
            total,
            using_fallback,
            error_message: message.map(ToString::to_string),
        }
    }

    /// Random scatter predictions around a location.
    ///
    /// Pure generation; the store is not consulted.
    #[must_use]
    pub fn predict(&self, params: &PredictParams) -> PredictionResponse {
        let window = QueryWindow {
            start: params.start_time,
            end: params.end_time,
        };
        PredictionResponse {
            predictions: self
                .scatter()
                .predictions(params.location, window, &params.crime_types),
            generated_at: Utc::now(),
            generator: "random-scatter".to_string(),
        }
    }

    /// Random scatter hotspots around the configured center.
    ///
    /// Pure generation; the store is not consulted.
    #[must_use]
    pub fn hotspots(&self, params: &HotspotsParams) -> HotspotsResponse {
        HotspotsResponse {
            hotspots: self
                .scatter()
                .hotspots(params.hours_ahead, params.crime_type.as_deref()),
            generated_at: Utc::now(),
            generator: "random-scatter".to_string(),
        }
    }

    fn parse_interval(&self, raw: Option<&str>) -> Result<Interval, QueryError> {
        match raw {
            None => Ok(Interval::default()),
            Some(s) if self.strict_intervals => s
                .parse()
                .map_err(|_| QueryError::UnknownInterval(s.to_string())),
            Some(s) => Ok(Interval::parse_lenient(s)),
        }
    }

    fn fallback_series(
        &self,
        interval: Interval,
        window: QueryWindow,
        message: &str,
    ) -> TimeSeriesResponse {
        let mut rng = self.rng();
        TimeSeriesResponse {
            data: synthesize_series(interval, window, &self.fallback, &mut rng),
            interval,
            using_fallback: true,
            error_message: Some(message.to_string()),
        }
    }

    fn fallback_statistics(&self, message: &str) -> StatisticsResponse {
        let mut scatter = self.scatter();
        let mock = scatter.mock_incidents(FALLBACK_INCIDENT_COUNT);
        StatisticsResponse {
            statistics: statistics(&mock),
            high_risk_areas: scatter.high_risk_areas(),
            using_fallback: true,
            error_message: Some(message.to_string()),
        }
    }

    #[allow(clippy::unused_self)]
    fn filter(
        &self,
        start_date: Option<chrono::DateTime<Utc>>,
        end_date: Option<chrono::DateTime<Utc>>,
        crime_type: Option<String>,
    ) -> IncidentFilter {
        IncidentFilter {
            start_date,
            end_date,
            crime_type,
        }
    }

    const fn rng(&self) -> DeterministicRng {
        DeterministicRng::seeded(self.seed)
    }

    fn scatter(&self) -> RandomScatterGenerator {
        RandomScatterGenerator::new(
            self.fallback.center,
            self.fallback.radius_degrees,
            self.seed,
        )
    }
}

const BYPASSED_MESSAGE: &str = "Using demo data (store bypassed)";
const EMPTY_MESSAGE: &str = "No records matched; using demo data";
const UNAVAILABLE_MESSAGE: &str = "Incident store unavailable; using demo data";
const PREDICTIONS_UNAVAILABLE_MESSAGE: &str =
    "Prediction store unavailable; using demo predictions";

fn heatmap_envelope(
    points: Vec<HeatmapPoint>,
    using_fallback: bool,
    message: Option<&str>,
) -> HeatmapResponse {
    let data = heatmap_data(points);
    HeatmapResponse {
        points: data.points,
        max_weight: data.max_weight,
        min_weight: data.min_weight,
        using_fallback,
        error_message: message.map(ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone as _};
    use satark_incident_models::{IncidentRecord, Location, PredictionPoint};

    use super::*;
    use crate::store::{InMemoryStore, StoreError};

    struct FailingStore;

    #[async_trait]
    impl IncidentStore for FailingStore {
        async fn fetch_incidents(
            &self,
            _filter: &IncidentFilter,
        ) -> Result<Vec<IncidentRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn fetch_predictions(
            &self,
            _after: DateTime<Utc>,
            _crime_type: Option<&str>,
        ) -> Result<Vec<PredictionPoint>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    /// Incidents succeed, predictions fail.
    struct HalfStore(InMemoryStore);

    #[async_trait]
    impl IncidentStore for HalfStore {
        async fn fetch_incidents(
            &self,
            filter: &IncidentFilter,
        ) -> Result<Vec<IncidentRecord>, StoreError> {
            self.0.fetch_incidents(filter).await
        }

        async fn fetch_predictions(
            &self,
            _after: DateTime<Utc>,
            _crime_type: Option<&str>,
        ) -> Result<Vec<PredictionPoint>, StoreError> {
            Err(StoreError::Unavailable("prediction table missing".to_string()))
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn record(crime_type: &str, ts: DateTime<Utc>, severity: f64) -> IncidentRecord {
        IncidentRecord {
            id: format!("{crime_type}-{ts}"),
            crime_type: crime_type.to_string(),
            location: Location::new(19.08, 72.89),
            timestamp: ts,
            severity,
            description: None,
        }
    }

    fn seeded_store() -> InMemoryStore {
        let incidents = vec![
            record("Theft", utc(2024, 1, 1, 5), 4.0),
            record("Theft", utc(2024, 1, 1, 23), 2.0),
            record("Assault", utc(2024, 1, 2, 0), 5.0),
        ];
        let predictions = vec![PredictionPoint {
            id: "p1".to_string(),
            crime_type: "Theft".to_string(),
            location: Location::new(19.09, 72.9),
            probability: 0.7,
            confidence: 0.8,
            for_timestamp: Utc::now() + Duration::days(1),
        }];
        InMemoryStore::new(incidents, predictions)
    }

    fn series_params() -> TimeSeriesParams {
        TimeSeriesParams {
            start_date: Some(utc(2024, 1, 1, 0)),
            end_date: Some(utc(2024, 1, 2, 0)),
            crime_type: None,
            interval: Some("day".to_string()),
        }
    }

    #[tokio::test]
    async fn time_series_aggregates_real_records() {
        let pipeline = Pipeline::new(seeded_store());
        let response = pipeline.time_series(&series_params()).await.unwrap();
        assert!(!response.using_fallback);
        assert!(response.error_message.is_none());
        let counts: Vec<u64> = response.data.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[tokio::test]
    async fn time_series_store_failure_yields_flagged_fallback() {
        let pipeline = Pipeline::new(FailingStore).with_seed(9);
        let response = pipeline.time_series(&series_params()).await.unwrap();
        assert!(response.using_fallback);
        assert!(response.error_message.is_some());
        // Same labels a real aggregation would produce.
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].label, "2024-01-01");
        let (lo, hi) = FallbackConfig::default().daily_counts;
        assert!(response.data.iter().all(|p| (lo..=hi).contains(&p.count)));
    }

    #[tokio::test]
    async fn strict_interval_rejects_unknown_strings() {
        let pipeline = Pipeline::new(seeded_store()).with_strict_intervals(true);
        let params = TimeSeriesParams {
            interval: Some("fortnight".to_string()),
            ..series_params()
        };
        assert_eq!(
            pipeline.time_series(&params).await.unwrap_err(),
            QueryError::UnknownInterval("fortnight".to_string())
        );
    }

    #[tokio::test]
    async fn lenient_interval_defaults_to_day() {
        let pipeline = Pipeline::new(seeded_store());
        let params = TimeSeriesParams {
            interval: Some("fortnight".to_string()),
            ..series_params()
        };
        let response = pipeline.time_series(&params).await.unwrap();
        assert_eq!(response.interval, Interval::Day);
    }

    #[tokio::test]
    async fn always_policy_bypasses_the_store() {
        // The store would fail if consulted.
        let pipeline = Pipeline::new(FailingStore).with_policy(FallbackPolicy::Always);
        let response = pipeline.time_series(&series_params()).await.unwrap();
        assert!(response.using_fallback);
        assert_eq!(
            response.error_message.as_deref(),
            Some("Using demo data (store bypassed)")
        );
    }

    #[tokio::test]
    async fn on_empty_policy_substitutes_for_no_rows() {
        let pipeline = Pipeline::new(InMemoryStore::default())
            .with_policy(FallbackPolicy::OnEmpty);
        let response = pipeline.time_series(&series_params()).await.unwrap();
        assert!(response.using_fallback);
        assert!(response.data.iter().all(|p| p.count > 0));
    }

    #[tokio::test]
    async fn empty_without_on_empty_is_a_zero_series() {
        let pipeline = Pipeline::new(InMemoryStore::default());
        let response = pipeline.time_series(&series_params()).await.unwrap();
        assert!(!response.using_fallback);
        assert!(response.data.iter().all(|p| p.count == 0));
    }

    #[tokio::test]
    async fn heatmap_merges_stored_predictions() {
        let pipeline = Pipeline::new(seeded_store());
        let response = pipeline
            .heatmap(&HeatmapParams {
                include_predictions: true,
                ..HeatmapParams::default()
            })
            .await;
        assert!(!response.using_fallback);
        assert_eq!(response.points.len(), 4);
        let prediction_weights: Vec<f64> = response
            .points
            .iter()
            .filter(|p| p.crime_type == "Prediction")
            .map(|p| p.weight)
            .collect();
        assert_eq!(prediction_weights, vec![0.7]);
        // Severity 5 incident normalizes to weight 1.0.
        assert!((response.max_weight - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn heatmap_substitutes_only_the_failing_prediction_layer() {
        let pipeline = Pipeline::new(HalfStore(seeded_store()));
        let response = pipeline
            .heatmap(&HeatmapParams {
                include_predictions: true,
                ..HeatmapParams::default()
            })
            .await;
        assert!(response.using_fallback);
        // The three real incidents survive.
        assert!(
            response
                .points
                .iter()
                .filter(|p| p.crime_type != "Prediction")
                .count()
                == 3
        );
        assert!(response.points.iter().any(|p| p.crime_type == "Prediction"));
    }

    #[tokio::test]
    async fn grid_rejects_invalid_dimensions() {
        let pipeline = Pipeline::new(seeded_store());
        let params = GridParams {
            rows: Some(0),
            ..GridParams::default()
        };
        assert!(matches!(
            pipeline.density_grid(&params).await,
            Err(QueryError::Grid(_))
        ));
    }

    #[tokio::test]
    async fn grid_counts_in_range_records() {
        let pipeline = Pipeline::new(seeded_store());
        let response = pipeline.density_grid(&GridParams::default()).await.unwrap();
        assert!(!response.using_fallback);
        // All three seeded incidents sit inside the default bounding box.
        assert_eq!(response.grid.total(), 3);
    }

    #[tokio::test]
    async fn grid_failure_keeps_requested_shape() {
        let pipeline = Pipeline::new(FailingStore);
        let params = GridParams {
            rows: Some(4),
            cols: Some(6),
            ..GridParams::default()
        };
        let response = pipeline.density_grid(&params).await.unwrap();
        assert!(response.using_fallback);
        assert_eq!(response.grid.row_slices().len(), 4);
        assert_eq!(response.grid.row_slices()[0].len(), 6);
    }

    #[tokio::test]
    async fn statistics_rolls_up_and_names_demo_areas() {
        let pipeline = Pipeline::new(seeded_store());
        let response = pipeline.statistics(&StatisticsParams::default()).await;
        assert!(!response.using_fallback);
        assert_eq!(response.statistics.total_incidents, 3);
        assert_eq!(response.high_risk_areas.len(), 5);
    }

    #[tokio::test]
    async fn statistics_failure_is_flagged_but_shaped() {
        let pipeline = Pipeline::new(FailingStore);
        let response = pipeline.statistics(&StatisticsParams::default()).await;
        assert!(response.using_fallback);
        assert_eq!(response.statistics.total_incidents, 100);
        assert_eq!(response.high_risk_areas.len(), 5);
    }

    #[tokio::test]
    async fn incidents_paginate_newest_first() {
        let pipeline = Pipeline::new(seeded_store());
        let response = pipeline
            .incidents(&IncidentsParams {
                limit: Some(2),
                offset: Some(1),
                ..IncidentsParams::default()
            })
            .await;
        assert_eq!(response.total, 3);
        assert_eq!(response.incidents.len(), 2);
        assert_eq!(response.incidents[0].timestamp, utc(2024, 1, 1, 23));
        assert_eq!(response.incidents[1].timestamp, utc(2024, 1, 1, 5));
    }

    #[tokio::test]
    async fn predict_is_labeled_random_scatter() {
        let pipeline = Pipeline::new(seeded_store()).with_seed(21);
        let response = pipeline.predict(&PredictParams {
            location: Location::new(19.076, 72.8777),
            start_time: utc(2024, 6, 1, 0),
            end_time: utc(2024, 6, 2, 0),
            crime_types: Vec::new(),
        });
        assert_eq!(response.generator, "random-scatter");
        assert!((5..=10).contains(&response.predictions.len()));
    }

    #[tokio::test]
    async fn hotspots_are_sorted_and_honor_the_type_filter() {
        let pipeline = Pipeline::new(seeded_store()).with_seed(13);
        let response = pipeline.hotspots(&HotspotsParams {
            hours_ahead: 48,
            crime_type: Some("Burglary".to_string()),
        });
        assert_eq!(response.generator, "random-scatter");
        assert!((10..=20).contains(&response.hotspots.len()));
        assert!(
            response
                .hotspots
                .iter()
                .all(|h| h.predicted_type == "Burglary")
        );
        assert!(
            response
                .hotspots
                .windows(2)
                .all(|pair| pair[0].probability >= pair[1].probability)
        );
    }

    #[tokio::test]
    async fn fallback_response_is_structurally_identical() {
        let real = Pipeline::new(seeded_store())
            .time_series(&series_params())
            .await
            .unwrap();
        let synthetic = Pipeline::new(FailingStore)
            .time_series(&series_params())
            .await
            .unwrap();

        let real_point = serde_json::to_value(&real.data[0]).unwrap();
        let synthetic_point = serde_json::to_value(&synthetic.data[0]).unwrap();
        let keys = |v: &serde_json::Value| {
            v.as_object()
                .unwrap()
                .keys()
                .cloned()
                .collect::<Vec<String>>()
        };
        assert_eq!(keys(&real_point), keys(&synthetic_point));
    }
}
