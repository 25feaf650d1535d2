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

//! Delimited text → dense numeric matrix loading with categorical encoding.
//!
//! This crate reads delimiter-separated text into a dense matrix of a chosen
//! numeric element type. Fields that are not numbers are not errors: their
//! dimension becomes categorical and every value in it is replaced by a small
//! integer code, recorded in a per-dimension [`CategoryTable`].
//!
//! # Features
//!
//! - **Two layouts**: row-major (one output row per record) and column-major
//!   (one output row per field position, the default)
//! - **Type-driven grammar**: integer element types accept integer literals,
//!   floating point types accept real literals including `inf` and `nan`
//! - **Categorical encoding**: codes are dense, start at 0 and follow
//!   first-seen order within each dimension
//! - **Bounded**: record and field counts are limited by [`LoadConfig`]
//! - **Error handling**: no partial matrix or table survives a failed load
//!
//! # Examples
//!
//! ## Numeric input
//!
//! ```
//! use tabmat::{load, Layout};
//!
//! let loaded = load::<f64>("1,2,3\n4,5,6\n", Layout::RowMajor).unwrap();
//! assert_eq!(loaded.matrix.row(0), &[1.0, 2.0, 3.0]);
//! assert_eq!(loaded.matrix.row(1), &[4.0, 5.0, 6.0]);
//! assert_eq!(loaded.categories.total_mappings(), 0);
//! ```
//!
//! ## Categorical columns
//!
//! A column whose first field is not numeric is categorical from the start.
//! A column that turns non-numeric later is rescanned so that all of its
//! fields, numeric-looking ones included, are mapped:
//!
//! ```
//! use tabmat::{load, Layout};
//!
//! let loaded = load::<f64>("1\n2\ncat\n", Layout::ColumnMajor).unwrap();
//! assert_eq!(loaded.matrix.row(0), &[0.0, 1.0, 2.0]);
//!
//! let pairs: Vec<_> = loaded.categories.mappings(0).collect();
//! assert_eq!(pairs, vec![("1", 0), ("2", 1), ("cat", 2)]);
//! assert_eq!(loaded.stats.restarts, 1);
//! ```
//!
//! ## Custom configuration
//!
//! ```no_run
//! use tabmat::{load_file, Layout, LoadConfig};
//!
//! let config = LoadConfig {
//!     layout: Layout::RowMajor,
//!     delimiter: b';',
//!     max_rows: 10_000,
//!     max_cells: 1_000_000,
//!     ..Default::default()
//! };
//! let loaded = load_file::<f32>("data.csv", &config).unwrap();
//! println!("{:?}", loaded.matrix.shape());
//! ```
//!
//! # Input format
//!
//! - Records end at `\n`, `\r\n` or a lone `\r`; an empty line is a record
//!   with one empty field
//! - Blanks (space, tab) around a field are ignored
//! - Every record must have as many fields as the first one
//! - There is no quoting; a delimiter always separates fields

mod column_major;
mod element;
mod error;
pub mod grammar;
mod load;
mod mapping;
mod matrix;
mod probe;
mod row_major;
mod source;

// Re-export public API
pub use element::{Element, NumericKind};
pub use error::{LoadError, Result};
pub use load::{
    load, load_file, load_reader, load_with_config, Layout, LoadConfig, LoadStats, Loaded,
    DEFAULT_MAX_CELLS, DEFAULT_MAX_COLUMNS, DEFAULT_MAX_ROWS,
};
pub use mapping::{CategoryTable, DimensionMapping, DimensionType, MappingEntry};
pub use matrix::Matrix;
pub use probe::{check_widths, column_count, probe, row_count, Dimensions};
pub use source::{Record, Records, Source, DEFAULT_DELIMITER};
