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

//! Column-major parsing: one dimension per field position.
//!
//! Each column is filled by its own scan over the source. A column starts
//! undetermined and stays numeric while every field parses as a number. The
//! first non-numeric field decides:
//!
//! - on the first record, the column becomes categorical right away;
//! - on a later record, earlier cells of the column were already written as
//!   numbers, so the column is committed categorical and scanned again from
//!   the first record, overwriting those cells with codes.
//!
//! A committed column maps every field, so no column restarts twice and the
//! total number of restarts never exceeds the column count.

use crate::element::Element;
use crate::error::{LoadError, Result};
use crate::grammar::{parse_number, parse_token, split_fields};
use crate::load::LoadStats;
use crate::mapping::CategoryTable;
use crate::matrix::Matrix;
use crate::source::Source;
use tracing::debug;

/// Result of resolving one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseOutcome {
    /// The cell was written.
    Written,
    /// The column turned out categorical after numeric writes.
    NeedsRestart,
    /// The record cannot supply a field for this column.
    Malformed { message: String },
}

/// Result of one scan over a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassResult {
    Stable,
    Unstable { line: usize },
}

/// Fill `matrix` (fields × records) from `source`.
///
/// `matrix` and `table` must already be sized by the probes.
pub(crate) fn parse_column_major<T: Element>(
    source: &Source,
    matrix: &mut Matrix<T>,
    table: &mut CategoryTable,
    stats: &mut LoadStats,
) -> Result<()> {
    let columns = matrix.n_rows();
    let bound = columns;
    let mut raw = Vec::with_capacity(columns);

    for column in 0..columns {
        loop {
            stats.scans += 1;
            match scan_column(source, column, matrix, table, &mut raw)? {
                PassResult::Stable => break,
                PassResult::Unstable { line } => {
                    if stats.restarts >= bound {
                        return Err(LoadError::NoConvergence {
                            restarts: stats.restarts,
                            bound,
                        });
                    }
                    table.commit_categorical(column)?;
                    stats.restarts += 1;
                    debug!(
                        target: "tabmat::load",
                        column,
                        line,
                        restarts = stats.restarts,
                        "column is categorical, rescanning"
                    );
                }
            }
        }
    }
    Ok(())
}

fn scan_column<'a, T: Element>(
    source: &'a Source,
    column: usize,
    matrix: &mut Matrix<T>,
    table: &mut CategoryTable,
    raw: &mut Vec<&'a str>,
) -> Result<PassResult> {
    let columns = matrix.n_rows();
    let delimiter = source.delimiter();

    for (index, record) in source.records().enumerate() {
        split_fields(record.text, delimiter, raw);
        let outcome = if raw.len() != columns {
            ParseOutcome::Malformed {
                message: format!("expected {} fields, found {}", columns, raw.len()),
            }
        } else {
            resolve_cell(raw[column], index, column, delimiter, table, &mut matrix[(column, index)])?
        };

        match outcome {
            ParseOutcome::Written => {}
            ParseOutcome::NeedsRestart => return Ok(PassResult::Unstable { line: record.line }),
            ParseOutcome::Malformed { message } => {
                return Err(LoadError::malformed(record.line, message)
                    .with_context(format!("in column {}", column)));
            }
        }
    }
    Ok(PassResult::Stable)
}

/// Resolve the field of record `index` for `column` into `cell`.
pub(crate) fn resolve_cell<T: Element>(
    field: &str,
    index: usize,
    column: usize,
    delimiter: u8,
    table: &mut CategoryTable,
    cell: &mut T,
) -> Result<ParseOutcome> {
    if !table.is_categorical(column) {
        if let Some((value, _)) = parse_number::<T>(field, delimiter) {
            *cell = value;
            return Ok(ParseOutcome::Written);
        }
        if index > 0 {
            return Ok(ParseOutcome::NeedsRestart);
        }
    }

    let Some((token, _)) = parse_token(field, delimiter) else {
        return Ok(ParseOutcome::Malformed {
            message: "field could not be tokenized".to_string(),
        });
    };
    let code = table.map_string(token, column)?;
    *cell = T::from_code(code).ok_or(LoadError::CategoryOverflow {
        dimension: column,
        code,
        kind: T::NAME,
    })?;
    Ok(ParseOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::DimensionType;
    use crate::probe::probe;

    fn run_into<T: Element>(
        text: &str,
        matrix: &mut Matrix<T>,
    ) -> Result<(CategoryTable, LoadStats)> {
        let source = Source::from_text(text);
        let dims = probe(&source);
        assert_eq!(matrix.shape(), (dims.columns, dims.rows));
        let mut table = CategoryTable::new(dims.columns);
        let mut stats = LoadStats::default();
        parse_column_major(&source, matrix, &mut table, &mut stats)?;
        Ok((table, stats))
    }

    // ==================== Classification ====================

    #[test]
    fn test_numeric_columns() {
        let mut m = Matrix::<f64>::new(3, 2);
        let (table, stats) = run_into("1,2,3\n4,5,6\n", &mut m).unwrap();
        assert_eq!(m, Matrix::from_rows(&[[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
        assert_eq!(table.total_mappings(), 0);
        assert_eq!(stats.scans, 3);
        assert_eq!(stats.restarts, 0);
    }

    #[test]
    fn test_categorical_on_first_record() {
        let mut m = Matrix::<f64>::new(2, 3);
        let (table, stats) = run_into("red,1\nblue,2\nred,3\n", &mut m).unwrap();
        assert_eq!(m.row(0), &[0.0, 1.0, 0.0]);
        assert_eq!(m.row(1), &[1.0, 2.0, 3.0]);
        assert_eq!(table.code_of("red", 0), Some(0));
        assert_eq!(table.code_of("blue", 0), Some(1));
        assert_eq!(table.dimension_type(1), DimensionType::Numeric);
        assert_eq!(stats.restarts, 0);
    }

    #[test]
    fn test_late_categorical_restarts_once() {
        let mut m = Matrix::<f64>::new(1, 3);
        let (table, stats) = run_into("1\n2\ncat\n", &mut m).unwrap();
        assert_eq!(m.row(0), &[0.0, 1.0, 2.0]);
        let pairs: Vec<_> = table.mappings(0).collect();
        assert_eq!(pairs, vec![("1", 0), ("2", 1), ("cat", 2)]);
        assert_eq!(stats.restarts, 1);
        assert_eq!(stats.scans, 2);
    }

    #[test]
    fn test_restarts_bounded_by_columns() {
        let mut m = Matrix::<f64>::new(3, 3);
        let (table, stats) = run_into("1,2,3\n4,5,6\nx,y,z\n", &mut m).unwrap();
        assert_eq!(stats.restarts, 3);
        assert_eq!(table.categorical_dimensions(), 3);
        assert_eq!(m.row(2), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_every_cell_written() {
        let text = "1,a,2.5\n3,b,x\n5,a,7\n";
        let mut m = Matrix::filled(3, 3, f64::NAN);
        run_into(text, &mut m).unwrap();
        assert!(m.as_slice().iter().all(|v| !v.is_nan()));
        assert_eq!(m.row(2), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_integer_kind() {
        let mut m = Matrix::<i32>::new(1, 2);
        let (table, _) = run_into("1\n2.5\n", &mut m).unwrap();
        assert_eq!(m.row(0), &[0, 1]);
        assert_eq!(table.unmap_string(1, 0), Some("2.5"));
    }

    // ==================== Errors ====================

    #[test]
    fn test_width_mismatch() {
        let mut m = Matrix::<f64>::new(2, 2);
        let err = run_into("1,2\n3\n", &mut m).unwrap_err();
        match err {
            LoadError::MalformedRecord { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 2 fields, found 1"));
                assert!(message.contains("in column 0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_code_overflow() {
        let text: String = (0..300).map(|i| format!("t{}\n", i)).collect();
        let mut m = Matrix::<u8>::new(1, 300);
        let err = run_into(&text, &mut m).unwrap_err();
        assert!(matches!(
            err,
            LoadError::CategoryOverflow {
                dimension: 0,
                code: 256,
                kind: "u8"
            }
        ));
    }

    // ==================== resolve_cell ====================

    #[test]
    fn test_resolve_cell_outcomes() {
        let mut table = CategoryTable::new(1);
        let mut cell = 0.0f64;

        assert_eq!(
            resolve_cell(" 4 ", 1, 0, b',', &mut table, &mut cell).unwrap(),
            ParseOutcome::Written
        );
        assert_eq!(cell, 4.0);

        assert_eq!(
            resolve_cell("dog", 1, 0, b',', &mut table, &mut cell).unwrap(),
            ParseOutcome::NeedsRestart
        );
        assert_eq!(table.num_mappings(0), 0);

        assert_eq!(
            resolve_cell("dog", 0, 0, b',', &mut table, &mut cell).unwrap(),
            ParseOutcome::Written
        );
        assert_eq!(cell, 0.0);

        assert_eq!(
            resolve_cell("4", 2, 0, b',', &mut table, &mut cell).unwrap(),
            ParseOutcome::Written
        );
        assert_eq!(cell, 1.0);
    }
}
