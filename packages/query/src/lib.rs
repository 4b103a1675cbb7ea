#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query boundary between callers and the aggregation core.
//!
//! The pipeline fetches once from an [`IncidentStore`], runs the pure
//! aggregation functions over the in-memory result, and resolves every
//! data-availability failure into flagged fallback output. Callers only
//! ever see an error for structurally invalid parameters; "no data" is
//! never an error.

pub mod params;
pub mod pipeline;
pub mod responses;
pub mod store;

use satark_spatial::GridError;
use thiserror::Error;

pub use params::{
    GridParams, HeatmapParams, HotspotsParams, IncidentsParams, PredictParams, StatisticsParams,
    TimeSeriesParams,
};
pub use pipeline::{FallbackPolicy, Pipeline};
pub use responses::{
    GridResponse, HeatmapResponse, HotspotsResponse, IncidentsResponse, PredictionResponse,
    StatisticsResponse, TimeSeriesResponse,
};
pub use store::{IncidentFilter, IncidentStore, InMemoryStore, StoreError};

/// Errors for structurally invalid query parameters.
///
/// Data-availability problems never surface here; they are converted into
/// fallback responses inside the pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// The interval string was not recognized and strict parsing was
    /// requested.
    #[error("unknown interval '{0}': expected hour, day, week, or month")]
    UnknownInterval(String),

    /// Invalid grid dimensions or coordinate ranges.
    #[error(transparent)]
    Grid(#[from] GridError),
}
