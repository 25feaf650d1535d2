// Dweve Tabmat - Tabular Matrix Loader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Load entry points and configuration.

use crate::column_major::parse_column_major;
use crate::element::Element;
use crate::error::{LoadError, Result};
use crate::grammar::is_terminator;
use crate::mapping::CategoryTable;
use crate::matrix::Matrix;
use crate::probe::{check_widths, probe};
use crate::row_major::parse_row_major;
use crate::source::{Source, DEFAULT_DELIMITER};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Default maximum number of records.
///
/// The matrix is allocated up front from the probed shape, so an unbounded
/// record count would translate directly into an unbounded allocation.
///
/// # Examples
///
/// ```
/// use tabmat::LoadConfig;
///
/// let config = LoadConfig::default();
/// assert_eq!(config.max_rows, 1_000_000);
///
/// let config = LoadConfig {
///     max_rows: 10_000_000,
///     ..Default::default()
/// };
/// ```
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Default maximum number of fields per record.
pub const DEFAULT_MAX_COLUMNS: usize = 100_000;

/// Default maximum number of matrix cells (800 MB of `f64`).
///
/// The row and column limits alone still admit a matrix far larger than
/// memory, so the product is bounded separately.
pub const DEFAULT_MAX_CELLS: usize = 100_000_000;

/// Orientation of the output matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layout {
    /// One output row per record; dimensions are records.
    RowMajor,
    /// One output row per field position; dimensions are columns.
    #[default]
    ColumnMajor,
}

/// Configuration for loading.
///
/// # Examples
///
/// ```
/// use tabmat::{Layout, LoadConfig};
///
/// let config = LoadConfig {
///     layout: Layout::RowMajor,
///     delimiter: b';',
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let bad = LoadConfig {
///     delimiter: b' ',
///     ..Default::default()
/// };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Output orientation (default: column-major).
    pub layout: Layout,

    /// Field delimiter (default: `,`).
    ///
    /// Must be an ASCII byte that is neither a blank nor a line terminator.
    pub delimiter: u8,

    /// Maximum number of records (default: 1,000,000).
    pub max_rows: usize,

    /// Maximum number of fields per record (default: 100,000).
    pub max_columns: usize,

    /// Maximum number of matrix cells, records × fields (default: 100,000,000).
    pub max_cells: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            delimiter: DEFAULT_DELIMITER,
            max_rows: DEFAULT_MAX_ROWS,
            max_columns: DEFAULT_MAX_COLUMNS,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl LoadConfig {
    /// Configuration with the given layout and defaults otherwise.
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    /// Check that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidConfig` for a delimiter that is a blank, a
    /// line terminator or not ASCII.
    pub fn validate(&self) -> Result<()> {
        let d = self.delimiter;
        let reason = if d == b' ' || d == b'\t' {
            Some("delimiter cannot be a blank")
        } else if is_terminator(d) {
            Some("delimiter cannot be a line terminator")
        } else if !d.is_ascii() {
            Some("delimiter must be ASCII")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(LoadError::InvalidConfig(reason.to_string())
                .with_context(format!("delimiter {:?}", d as char))),
            None => Ok(()),
        }
    }
}

/// Counters reported by a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadStats {
    /// Records in the source.
    pub rows: usize,
    /// Fields per record.
    pub columns: usize,
    /// Full scans over the source made by the parser.
    pub scans: usize,
    /// Column-major restarts.
    pub restarts: usize,
}

/// A loaded matrix together with its category table.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// The filled matrix.
    pub matrix: Matrix<T>,
    /// Category mappings, one dimension per output row.
    pub categories: CategoryTable,
    /// Layout the matrix was built in.
    pub layout: Layout,
    /// Scan counters.
    pub stats: LoadStats,
}

impl<T> Loaded<T> {
    /// Split into matrix and category table.
    pub fn into_parts(self) -> (Matrix<T>, CategoryTable) {
        (self.matrix, self.categories)
    }
}

/// Load comma-delimited text with default limits.
///
/// # Examples
///
/// ```
/// use tabmat::{load, Layout};
///
/// let loaded = load::<f64>("red,1\nblue,2\nred,3\n", Layout::ColumnMajor).unwrap();
/// assert_eq!(loaded.matrix.row(0), &[0.0, 1.0, 0.0]);
/// assert_eq!(loaded.matrix.row(1), &[1.0, 2.0, 3.0]);
/// assert_eq!(loaded.categories.unmap_string(1, 0), Some("blue"));
/// ```
pub fn load<T: Element>(text: &str, layout: Layout) -> Result<Loaded<T>> {
    load_with_config(text, &LoadConfig::with_layout(layout))
}

/// Load text with an explicit configuration.
pub fn load_with_config<T: Element>(text: &str, config: &LoadConfig) -> Result<Loaded<T>> {
    config.validate()?;
    let source = Source::from_text(text).with_delimiter(config.delimiter);
    load_from_source(&source, config)
}

/// Buffer a reader and load it.
///
/// # Errors
///
/// Returns `LoadError::SourceUnavailable` if reading fails, plus every error
/// [`load_with_config`] can return.
pub fn load_reader<T: Element, R: Read>(reader: R, config: &LoadConfig) -> Result<Loaded<T>> {
    config.validate()?;
    let source = Source::from_reader(reader)?.with_delimiter(config.delimiter);
    load_from_source(&source, config)
}

/// Open a file and load it.
///
/// # Errors
///
/// Returns `LoadError::SourceUnavailable` if the file cannot be opened or
/// read, plus every error [`load_with_config`] can return.
pub fn load_file<T: Element>(path: impl AsRef<Path>, config: &LoadConfig) -> Result<Loaded<T>> {
    config.validate()?;
    let path = path.as_ref();
    debug!(target: "tabmat::load", path = %path.display(), "opening source");
    let source = Source::open(path)?.with_delimiter(config.delimiter);
    load_from_source(&source, config)
}

fn load_from_source<T: Element>(source: &Source, config: &LoadConfig) -> Result<Loaded<T>> {
    let started = Instant::now();
    let dims = probe(source);

    if dims.rows > config.max_rows {
        return Err(LoadError::SecurityLimit {
            what: "row count",
            limit: config.max_rows,
            actual: dims.rows,
        });
    }
    if dims.columns > config.max_columns {
        return Err(LoadError::SecurityLimit {
            what: "column count",
            limit: config.max_columns,
            actual: dims.columns,
        });
    }

    // Ragged input is rejected before the matrix is sized from the first record.
    check_widths(source, dims.columns)?;

    let cells = dims.rows.checked_mul(dims.columns).unwrap_or(usize::MAX);
    if cells > config.max_cells {
        return Err(LoadError::SecurityLimit {
            what: "cell count",
            limit: config.max_cells,
            actual: cells,
        });
    }

    debug!(
        target: "tabmat::load",
        rows = dims.rows,
        columns = dims.columns,
        layout = ?config.layout,
        kind = T::NAME,
        "probed source"
    );

    let mut stats = LoadStats {
        rows: dims.rows,
        columns: dims.columns,
        ..Default::default()
    };

    let (matrix, categories) = match config.layout {
        Layout::RowMajor => {
            let mut matrix = Matrix::new(dims.rows, dims.columns);
            let mut table = CategoryTable::new(dims.rows);
            parse_row_major(source, &mut matrix, &mut table, &mut stats)?;
            (matrix, table)
        }
        Layout::ColumnMajor => {
            let mut matrix = Matrix::new(dims.columns, dims.rows);
            let mut table = CategoryTable::new(dims.columns);
            parse_column_major(source, &mut matrix, &mut table, &mut stats)?;
            (matrix, table)
        }
    };

    info!(
        target: "tabmat::load",
        rows = matrix.n_rows(),
        cols = matrix.n_cols(),
        categorical = categories.categorical_dimensions(),
        scans = stats.scans,
        restarts = stats.restarts,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded matrix"
    );

    Ok(Loaded {
        matrix,
        categories,
        layout: config.layout,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Configuration ====================

    #[test]
    fn test_default_config() {
        let config = LoadConfig::default();
        assert_eq!(config.layout, Layout::ColumnMajor);
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(config.max_columns, DEFAULT_MAX_COLUMNS);
        assert_eq!(config.max_cells, DEFAULT_MAX_CELLS);
    }

    #[test]
    fn test_invalid_delimiters() {
        for d in [b' ', b'\t', b'\n', b'\r', 0xC3] {
            let config = LoadConfig {
                delimiter: d,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(LoadError::InvalidConfig(_))),
                "delimiter {:#x} accepted",
                d
            );
        }
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let config = LoadConfig {
            delimiter: b'\n',
            ..Default::default()
        };
        assert!(load_with_config::<f64>("1\n", &config).is_err());
    }

    // ==================== Limits ====================

    #[test]
    fn test_row_limit() {
        let config = LoadConfig {
            max_rows: 2,
            ..Default::default()
        };
        let err = load_with_config::<f64>("1\n2\n3\n", &config).unwrap_err();
        assert!(matches!(
            err,
            LoadError::SecurityLimit {
                what: "row count",
                limit: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_column_limit() {
        let config = LoadConfig {
            max_columns: 2,
            ..Default::default()
        };
        let err = load_with_config::<f64>("1,2,3\n", &config).unwrap_err();
        assert!(matches!(err, LoadError::SecurityLimit { what: "column count", .. }));
    }

    #[test]
    fn test_cell_limit() {
        let config = LoadConfig {
            max_cells: 5,
            ..Default::default()
        };
        let err = load_with_config::<f64>("1,2,3\n4,5,6\n", &config).unwrap_err();
        assert!(matches!(
            err,
            LoadError::SecurityLimit {
                what: "cell count",
                limit: 5,
                actual: 6
            }
        ));
    }

    #[test]
    fn test_ragged_wide_input_fails_before_allocation() {
        let mut text = vec!["1"; 100_000].join(",");
        text.push('\n');
        text.push_str(&"1\n".repeat(999_999));

        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            let config = LoadConfig::with_layout(layout);
            match load_with_config::<f64>(&text, &config).unwrap_err() {
                LoadError::MalformedRecord { line, message } => {
                    assert_eq!(line, 2);
                    assert_eq!(message, "expected 100000 fields, found 1");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_width_checked_before_cell_limit() {
        let config = LoadConfig {
            max_cells: 1,
            ..Default::default()
        };
        let err = load_with_config::<f64>("1,2\n3\n", &config).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_limits_are_inclusive() {
        let config = LoadConfig {
            max_rows: 2,
            max_columns: 2,
            max_cells: 4,
            ..Default::default()
        };
        assert!(load_with_config::<f64>("1,2\n3,4\n", &config).is_ok());
    }

    // ==================== Layouts ====================

    #[test]
    fn test_layout_shapes() {
        let row = load::<f64>("1,2,3\n4,5,6\n", Layout::RowMajor).unwrap();
        let col = load::<f64>("1,2,3\n4,5,6\n", Layout::ColumnMajor).unwrap();
        assert_eq!(row.matrix.shape(), (2, 3));
        assert_eq!(col.matrix.shape(), (3, 2));
        assert_eq!(row.categories.dimensionality(), 2);
        assert_eq!(col.categories.dimensionality(), 3);
        assert_eq!(row.layout, Layout::RowMajor);
    }

    #[test]
    fn test_empty_source() {
        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            let loaded = load::<f64>("", layout).unwrap();
            assert_eq!(loaded.matrix.shape(), (0, 0));
            assert_eq!(loaded.categories.dimensionality(), 0);
            assert_eq!(loaded.stats.restarts, 0);
        }
    }

    #[test]
    fn test_stats() {
        let loaded = load::<f64>("1,a\n2,b\nx,c\n", Layout::ColumnMajor).unwrap();
        assert_eq!(loaded.stats.rows, 3);
        assert_eq!(loaded.stats.columns, 2);
        assert_eq!(loaded.stats.restarts, 1);
        assert_eq!(loaded.stats.scans, 3);
    }

    #[test]
    fn test_load_reader_custom_delimiter() {
        let config = LoadConfig {
            delimiter: b'|',
            ..Default::default()
        };
        let loaded = load_reader::<f64, _>(&b"1|2\n3|4\n"[..], &config).unwrap();
        assert_eq!(loaded.matrix, Matrix::from_rows(&[[1.0, 3.0], [2.0, 4.0]]));
    }

    #[test]
    fn test_into_parts() {
        let (matrix, table) = load::<i64>("a\n", Layout::RowMajor).unwrap().into_parts();
        assert_eq!(matrix.as_slice(), &[0]);
        assert_eq!(table.unmap_string(0, 0), Some("a"));
    }
}
