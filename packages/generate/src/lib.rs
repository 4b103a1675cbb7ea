#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fallback synthesizer and random scatter generation.
//!
//! Everything in this crate fabricates data: shape-compatible fallback
//! series and grids for when real records are unavailable, and uniform
//! random scatter standing in for the prediction surface. None of it
//! carries statistical meaning and callers must flag its output as
//! synthetic.

pub mod fallback;
pub mod rng;
pub mod scatter;

pub use fallback::{
    FallbackConfig, synthesize_grid, synthesize_heat_points, synthesize_series,
};
pub use rng::DeterministicRng;
pub use scatter::RandomScatterGenerator;
