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

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabmat::{load_with_config, Layout, LoadConfig};

/// Fuzz target for whole loads.
///
/// Runs both layouts with a few element types and checks the invariants a
/// successful load must hold:
///
/// - the matrix shape matches the layout and the probed dimensions
/// - column-major restarts never exceed the column count
/// - numeric-only loads agree across layouts
///
/// # Running the Fuzzer
///
/// ```bash
/// # Run the fuzzer (from tabmat directory)
/// cargo fuzz run fuzz_load
///
/// # Run with specific options
/// cargo fuzz run fuzz_load -- -max_len=10000 -max_total_time=300
/// ```
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let row_config = LoadConfig {
        layout: Layout::RowMajor,
        max_rows: 1000,
        max_columns: 1000,
        ..Default::default()
    };
    let col_config = LoadConfig {
        layout: Layout::ColumnMajor,
        ..row_config.clone()
    };

    let row = load_with_config::<f64>(text, &row_config);
    let col = load_with_config::<f64>(text, &col_config);

    if let Ok(ref loaded) = row {
        assert_eq!(
            loaded.matrix.shape(),
            (loaded.stats.rows, loaded.stats.columns)
        );
        assert_eq!(loaded.categories.dimensionality(), loaded.stats.rows);
    }

    if let Ok(ref loaded) = col {
        assert_eq!(
            loaded.matrix.shape(),
            (loaded.stats.columns, loaded.stats.rows)
        );
        assert!(loaded.stats.restarts <= loaded.stats.columns);
    }

    // Width errors are found by both parsers.
    assert_eq!(row.is_ok(), col.is_ok());

    if let (Ok(row), Ok(col)) = (&row, &col) {
        if row.categories.total_mappings() == 0 && col.categories.total_mappings() == 0 {
            let same = row
                .matrix
                .transpose()
                .as_slice()
                .iter()
                .zip(col.matrix.as_slice())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()));
            assert!(same);
        }
    }

    let _ = load_with_config::<i8>(text, &col_config);
    let _ = load_with_config::<u16>(text, &row_config);
});
