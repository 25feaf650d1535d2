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

//! Row-major parsing: one dimension per record.
//!
//! A record is either entirely numeric, in which case its values are copied
//! into the matrix row, or it is tokenized and every field (numeric-looking
//! ones included) goes through the row's category mapping.

use crate::element::Element;
use crate::error::{LoadError, Result};
use crate::grammar::{parse_generic_record, parse_numeric_record, split_fields};
use crate::load::LoadStats;
use crate::mapping::CategoryTable;
use crate::matrix::Matrix;
use crate::source::Source;
use tracing::debug;

/// Fill `matrix` (records × fields) from `source`.
///
/// `matrix` and `table` must already be sized by the probes.
pub(crate) fn parse_row_major<T: Element>(
    source: &Source,
    matrix: &mut Matrix<T>,
    table: &mut CategoryTable,
    stats: &mut LoadStats,
) -> Result<()> {
    let delimiter = source.delimiter();
    let columns = matrix.n_cols();

    let mut raw = Vec::with_capacity(columns);
    let mut numbers = Vec::with_capacity(columns);
    let mut tokens = Vec::with_capacity(columns);

    stats.scans += 1;
    for (row, record) in source.records().enumerate() {
        split_fields(record.text, delimiter, &mut raw);
        if raw.len() != columns {
            return Err(LoadError::malformed(
                record.line,
                format!("expected {} fields, found {}", columns, raw.len()),
            ));
        }

        if parse_numeric_record::<T>(record.text, delimiter, &mut numbers) {
            matrix.row_mut(row).copy_from_slice(&numbers);
            continue;
        }

        if !parse_generic_record(record.text, delimiter, &mut tokens) {
            return Err(LoadError::malformed(record.line, "record could not be tokenized"));
        }

        debug!(target: "tabmat::load", row, line = record.line, "row is categorical");
        let cells = matrix.row_mut(row);
        for (cell, token) in cells.iter_mut().zip(&tokens) {
            let code = table.map_string(token, row)?;
            *cell = T::from_code(code).ok_or(LoadError::CategoryOverflow {
                dimension: row,
                code,
                kind: T::NAME,
            })?;
        }
    }
    Ok(())
}
