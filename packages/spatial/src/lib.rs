#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial density grid builder and heatmap point transforms.
//!
//! Bins incident locations into a fixed-resolution partition of a
//! geographic bounding box and shapes incident/prediction sets into
//! weighted heatmap points. Both layers are pure; weight normalization is
//! kept out of the grid builder so raw counts and display weights can be
//! tested independently.

pub mod grid;
pub mod heatmap;

pub use grid::{GridError, GridSpec, SpatialGrid, build_grid};
pub use heatmap::{heatmap_data, incident_points, prediction_points};
