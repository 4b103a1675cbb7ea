#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Time-bucketed aggregation of spatio-temporal incident records.
//!
//! Every function in this crate is pure: it takes an in-memory record
//! slice fetched by the caller, holds no state between calls, and is safe
//! to invoke concurrently from any number of request-handling tasks.

pub mod buckets;
pub mod series;
pub mod stats;

pub use buckets::build_buckets;
pub use series::aggregate;
pub use stats::statistics;
