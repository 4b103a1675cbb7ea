//! Random scatter standing in for the prediction surface.
//!
//! Not a model: every output below is uniform random scatter around a
//! point, named accordingly so nobody mistakes it for a trained one.

use chrono::{Duration, Utc};
use satark_analytics_models::QueryWindow;
use satark_incident_models::{
    CRIME_TYPES, HighRiskArea, Hotspot, IncidentRecord, Location, PredictionPoint, RiskLevel,
};

use crate::fallback::scatter_around;
use crate::rng::DeterministicRng;

/// Scatter radius for predictions around a query location, in degrees
/// (~2 km).
const PREDICTION_RADIUS_DEGREES: f64 = 0.02;

/// Named demo areas for high-risk summaries.
const DEMO_AREAS: &[(&str, f64, f64)] = &[
    ("Andheri East", 19.1136, 72.8697),
    ("Dadar West", 19.0178, 72.8478),
    ("Bandra Station", 19.0596, 72.8295),
    ("Kurla Market", 19.0726, 72.8845),
    ("Juhu Beach", 19.0883, 72.8262),
];

/// Uniform random scatter generation around a center point.
#[derive(Debug, Clone)]
pub struct RandomScatterGenerator {
    rng: DeterministicRng,
    center: Location,
    radius_degrees: f64,
}

impl RandomScatterGenerator {
    /// Creates a generator scattering around `center` within
    /// `radius_degrees`.
    #[must_use]
    pub const fn new(center: Location, radius_degrees: f64, seed: u64) -> Self {
        Self {
            rng: DeterministicRng::seeded(seed),
            center,
            radius_degrees,
        }
    }

    /// Generates 5-10 prediction points within ~2 km of `location`, with
    /// timestamps uniform in `window`.
    ///
    /// Crime types come from `crime_types` when non-empty, otherwise from
    /// the default label set. Probabilities land in `[0.5, 0.95)` and
    /// confidences in `[0.6, 0.9)`.
    pub fn predictions(
        &mut self,
        location: Location,
        window: QueryWindow,
        crime_types: &[String],
    ) -> Vec<PredictionPoint> {
        let count = self.rng.range_u64(5, 10);
        let span_seconds = (window.end - window.start).num_seconds().max(0);

        (0..count)
            .map(|_| {
                let offset = if span_seconds == 0 {
                    0
                } else {
                    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
                    let offset = (self.rng.next_u64() % (span_seconds as u64 + 1)) as i64;
                    offset
                };
                PredictionPoint {
                    id: uuid::Uuid::new_v4().to_string(),
                    crime_type: self.pick_crime_type(crime_types),
                    location: scatter_around(location, PREDICTION_RADIUS_DEGREES, &mut self.rng),
                    probability: self.rng.range_f64(0.5, 0.95),
                    confidence: self.rng.range_f64(0.6, 0.9),
                    for_timestamp: window.start + Duration::seconds(offset),
                }
            })
            .collect()
    }

    /// Generates 10-20 hotspots around the center for the next
    /// `hours_ahead` hours, sorted by probability descending.
    pub fn hotspots(&mut self, hours_ahead: u64, crime_type: Option<&str>) -> Vec<Hotspot> {
        let count = self.rng.range_u64(10, 20);
        let now = Utc::now();

        let mut hotspots: Vec<Hotspot> = (0..count)
            .map(|_| {
                #[allow(clippy::cast_precision_loss)]
                let horizon = hours_ahead.max(1) as f64;
                let hours_from_now = self.rng.range_f64(1.0, horizon);
                #[allow(clippy::cast_possible_truncation)]
                let offset = Duration::seconds((hours_from_now * 3600.0) as i64);
                Hotspot {
                    location: scatter_around(self.center, self.radius_degrees, &mut self.rng),
                    probability: self.rng.range_f64(0.5, 0.95),
                    radius_km: self.rng.range_f64(0.2, 1.0),
                    predicted_type: crime_type.map_or_else(
                        || (*self.rng.choose(CRIME_TYPES)).to_string(),
                        ToString::to_string,
                    ),
                    predicted_time: now + offset,
                }
            })
            .collect();

        hotspots.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hotspots
    }

    /// Generates the five demo high-risk area summaries with randomized
    /// risk levels and 1-3 predicted crime types each.
    pub fn high_risk_areas(&mut self) -> Vec<HighRiskArea> {
        // Biased toward medium.
        const LEVELS: &[RiskLevel] = &[
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Medium,
        ];

        DEMO_AREAS
            .iter()
            .map(|&(name, lat, lon)| {
                let risk_level = *self.rng.choose(LEVELS);
                let risk_score = match risk_level {
                    RiskLevel::Low => self.rng.range_f64(0.1, 0.3),
                    RiskLevel::Medium => self.rng.range_f64(0.4, 0.7),
                    RiskLevel::High => self.rng.range_f64(0.7, 0.9),
                };
                HighRiskArea {
                    name: name.to_string(),
                    location: Location::new(lat, lon),
                    risk_level,
                    risk_score,
                    predicted_crimes: self.sample_crime_types(1, 3),
                }
            })
            .collect()
    }

    /// Generates `count` mock incidents over the 30 days before `now`,
    /// scattered around the center. Used to seed demo stores.
    pub fn mock_incidents(&mut self, count: u64) -> Vec<IncidentRecord> {
        let now = Utc::now();

        (0..count)
            .map(|_| {
                let crime_type = (*self.rng.choose(CRIME_TYPES)).to_string();
                let days_ago = self.rng.range_f64(0.0, 30.0);
                #[allow(clippy::cast_possible_truncation)]
                let offset = Duration::seconds((days_ago * 86_400.0) as i64);
                let description = format!("Mock {} incident", crime_type.to_lowercase());
                IncidentRecord {
                    id: uuid::Uuid::new_v4().to_string(),
                    crime_type,
                    location: scatter_around(self.center, self.radius_degrees, &mut self.rng),
                    timestamp: now - offset,
                    severity: self.rng.range_f64(1.0, 5.0),
                    description: Some(description),
                }
            })
            .collect()
    }

    fn pick_crime_type(&mut self, crime_types: &[String]) -> String {
        if crime_types.is_empty() {
            (*self.rng.choose(CRIME_TYPES)).to_string()
        } else {
            self.rng.choose(crime_types).clone()
        }
    }

    /// Draws between `lo` and `hi` distinct crime types via a partial
    /// shuffle.
    fn sample_crime_types(&mut self, lo: u64, hi: u64) -> Vec<String> {
        #[allow(clippy::cast_possible_truncation)]
        let k = self.rng.range_u64(lo, hi) as usize;
        let mut pool: Vec<&str> = CRIME_TYPES.to_vec();

        for i in 0..k.min(pool.len()) {
            #[allow(clippy::cast_possible_truncation)]
            let j = i + (self.rng.next_u64() % (pool.len() - i) as u64) as usize;
            pool.swap(i, j);
        }

        pool.into_iter()
            .take(k)
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn generator(seed: u64) -> RandomScatterGenerator {
        RandomScatterGenerator::new(Location::new(19.076, 72.8777), 0.1, seed)
    }

    fn window() -> QueryWindow {
        QueryWindow {
            start: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn predictions_respect_ranges_and_window() {
        let mut generator = generator(1);
        let preds = generator.predictions(Location::new(19.0, 72.9), window(), &[]);
        assert!((5..=10).contains(&preds.len()));
        for p in &preds {
            assert!((0.5..0.95).contains(&p.probability));
            assert!((0.6..0.9).contains(&p.confidence));
            assert!(p.for_timestamp >= window().start && p.for_timestamp <= window().end);
            assert!(p.location.is_valid());
        }
    }

    #[test]
    fn predictions_use_caller_crime_types() {
        let mut generator = generator(2);
        let types = vec!["Theft".to_string(), "Fraud".to_string()];
        let preds = generator.predictions(Location::new(19.0, 72.9), window(), &types);
        assert!(
            preds
                .iter()
                .all(|p| types.contains(&p.crime_type))
        );
    }

    #[test]
    fn hotspots_sorted_by_probability() {
        let mut generator = generator(3);
        let hotspots = generator.hotspots(24, None);
        assert!((10..=20).contains(&hotspots.len()));
        for pair in hotspots.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn hotspots_honor_fixed_crime_type() {
        let mut generator = generator(4);
        let hotspots = generator.hotspots(24, Some("Robbery"));
        assert!(hotspots.iter().all(|h| h.predicted_type == "Robbery"));
    }

    #[test]
    fn high_risk_areas_cover_demo_neighborhoods() {
        let mut generator = generator(5);
        let areas = generator.high_risk_areas();
        assert_eq!(areas.len(), 5);
        for area in &areas {
            assert!((0.1..0.9).contains(&area.risk_score));
            let len = area.predicted_crimes.len();
            assert!((1..=3).contains(&len));
            // Sampled without replacement
            let mut dedup = area.predicted_crimes.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), len);
        }
    }

    #[test]
    fn mock_incidents_are_recent_and_described() {
        let mut generator = generator(6);
        let incidents = generator.mock_incidents(50);
        assert_eq!(incidents.len(), 50);
        let now = Utc::now();
        for incident in &incidents {
            assert!(incident.timestamp <= now);
            assert!(now - incident.timestamp <= Duration::days(31));
            assert!((1.0..5.0).contains(&incident.severity));
            assert!(incident.description.as_deref().unwrap().starts_with("Mock "));
        }
    }
}
