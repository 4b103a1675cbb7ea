//! Fixed-resolution density grid over a geographic bounding box.

use satark_incident_models::IncidentRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from structurally invalid grid parameters.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    /// Grid dimensions must be at least 1x1.
    #[error("invalid grid size {rows}x{cols}: both dimensions must be >= 1")]
    InvalidSize {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// A coordinate range must have min strictly below max.
    #[error("invalid {axis} range [{min}, {max}]: min must be < max")]
    InvalidRange {
        /// Axis name ("latitude" or "longitude").
        axis: &'static str,
        /// Range minimum.
        min: f64,
        /// Range maximum.
        max: f64,
    },

    /// A cell buffer did not match the declared dimensions.
    #[error("cell count mismatch: expected {expected}, got {actual}")]
    CellCountMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Length of the provided buffer.
        actual: usize,
    },
}

/// A validated grid partition of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    rows: usize,
    cols: usize,
    lat_range: (f64, f64),
    lon_range: (f64, f64),
}

impl GridSpec {
    /// Builds a grid spec, validating dimensions and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] when a dimension is zero or a range has
    /// `min >= max`.
    pub fn new(
        rows: usize,
        cols: usize,
        lat_range: (f64, f64),
        lon_range: (f64, f64),
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidSize { rows, cols });
        }
        if lat_range.0 >= lat_range.1 {
            return Err(GridError::InvalidRange {
                axis: "latitude",
                min: lat_range.0,
                max: lat_range.1,
            });
        }
        if lon_range.0 >= lon_range.1 {
            return Err(GridError::InvalidRange {
                axis: "longitude",
                min: lon_range.0,
                max: lon_range.1,
            });
        }
        Ok(Self {
            rows,
            cols,
            lat_range,
            lon_range,
        })
    }

    /// The 32x32 Mumbai-area grid the prediction surface was built for.
    ///
    /// # Panics
    ///
    /// Never panics; the constants are valid.
    #[must_use]
    pub fn mumbai_default() -> Self {
        Self::new(32, 32, (19.0, 19.3), (72.8, 73.1)).expect("default grid constants are valid")
    }

    /// Row count.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Maps a coordinate pair to a `(row, col)` cell index, or `None` when
    /// the point lies strictly outside the bounding box.
    ///
    /// The index is `floor((v - min) / (max - min) * dim)` clamped to
    /// `dim - 1`, so a value exactly at the upper bound lands in the last
    /// valid index.
    #[must_use]
    pub fn cell_index(&self, latitude: f64, longitude: f64) -> Option<(usize, usize)> {
        if latitude < self.lat_range.0
            || latitude > self.lat_range.1
            || longitude < self.lon_range.0
            || longitude > self.lon_range.1
        {
            return None;
        }

        let row = scaled_index(latitude, self.lat_range, self.rows);
        let col = scaled_index(longitude, self.lon_range, self.cols);
        Some((row, col))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_index(value: f64, range: (f64, f64), dim: usize) -> usize {
    let fraction = (value - range.0) / (range.1 - range.0);
    #[allow(clippy::cast_precision_loss)]
    let scaled = fraction * dim as f64;
    (scaled.floor() as usize).min(dim - 1)
}

/// Per-cell incident counts over a [`GridSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl SpatialGrid {
    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Builds a grid from a row-major cell buffer.
    ///
    /// Used by the fallback synthesizer, which fabricates counts instead
    /// of binning records.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellCountMismatch`] when `cells.len()` is not
    /// `rows * cols`.
    pub fn from_counts(rows: usize, cols: usize, cells: Vec<u32>) -> Result<Self, GridError> {
        if cells.len() != rows * cols {
            return Err(GridError::CellCountMismatch {
                expected: rows * cols,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Count in one cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.rows && col < self.cols, "cell index out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Sum of all cell counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Row-major view of the grid, one slice per row.
    #[must_use]
    pub fn row_slices(&self) -> Vec<&[u32]> {
        self.cells.chunks(self.cols).collect()
    }

    fn increment(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] += 1;
    }
}

/// Bins records into per-cell counts.
///
/// Records outside the bounding box are silently dropped; they contribute
/// to no cell. Cell values are cardinalities, not record lists.
#[must_use]
pub fn build_grid(records: &[IncidentRecord], spec: &GridSpec) -> SpatialGrid {
    let mut grid = SpatialGrid::zeroed(spec.rows(), spec.cols());
    let mut dropped = 0usize;

    for record in records {
        match spec.cell_index(record.location.latitude, record.location.longitude) {
            Some((row, col)) => grid.increment(row, col),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} records outside the grid bounding box");
    }

    grid
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use satark_incident_models::Location;

    use super::*;

    fn record(lat: f64, lon: f64) -> IncidentRecord {
        IncidentRecord {
            id: format!("{lat},{lon}"),
            crime_type: "Theft".to_string(),
            location: Location::new(lat, lon),
            timestamp: Utc::now(),
            severity: 3.0,
            description: None,
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            GridSpec::new(0, 4, (0.0, 1.0), (0.0, 1.0)),
            Err(GridError::InvalidSize { rows: 0, cols: 4 })
        );
        assert!(GridSpec::new(4, 0, (0.0, 1.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn rejects_inverted_ranges() {
        assert!(matches!(
            GridSpec::new(2, 2, (1.0, 1.0), (0.0, 1.0)),
            Err(GridError::InvalidRange {
                axis: "latitude",
                ..
            })
        ));
        assert!(matches!(
            GridSpec::new(2, 2, (0.0, 1.0), (5.0, 4.0)),
            Err(GridError::InvalidRange {
                axis: "longitude",
                ..
            })
        ));
    }

    #[test]
    fn concrete_two_by_two_scenario() {
        let spec = GridSpec::new(2, 2, (0.0, 2.0), (0.0, 2.0)).unwrap();
        let records = vec![
            record(0.5, 0.5),
            record(1.5, 1.5),
            record(1.9, 1.9),
        ];
        let grid = build_grid(&records, &spec);
        assert_eq!(grid.cell(0, 0), 1);
        assert_eq!(grid.cell(0, 1), 0);
        assert_eq!(grid.cell(1, 0), 0);
        assert_eq!(grid.cell(1, 1), 2);
    }

    #[test]
    fn upper_bound_maps_to_last_index() {
        let spec = GridSpec::new(4, 4, (0.0, 2.0), (0.0, 2.0)).unwrap();
        let grid = build_grid(&[record(2.0, 2.0)], &spec);
        assert_eq!(grid.cell(3, 3), 1);
        assert_eq!(grid.total(), 1);
    }

    #[test]
    fn out_of_range_records_are_dropped() {
        let spec = GridSpec::new(2, 2, (0.0, 2.0), (0.0, 2.0)).unwrap();
        let records = vec![
            record(1.0, 1.0),
            record(-0.1, 1.0),
            record(1.0, 2.1),
            record(3.0, 3.0),
        ];
        let grid = build_grid(&records, &spec);
        assert_eq!(grid.total(), 1);
    }

    #[test]
    fn single_cell_grid_collects_everything_in_range() {
        let spec = GridSpec::new(1, 1, (0.0, 1.0), (0.0, 1.0)).unwrap();
        let grid = build_grid(&[record(0.0, 0.0), record(1.0, 1.0), record(0.5, 0.5)], &spec);
        assert_eq!(grid.cell(0, 0), 3);
    }

    #[test]
    fn row_slices_match_cells() {
        let spec = GridSpec::new(2, 3, (0.0, 2.0), (0.0, 3.0)).unwrap();
        let grid = build_grid(&[record(0.0, 0.0), record(2.0, 3.0)], &spec);
        let rows = grid.row_slices();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &[1, 0, 0]);
        assert_eq!(rows[1], &[0, 0, 1]);
    }
}
