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

//! Inspect command - per-dimension classification

use super::{load_config, read_file};
use colored::Colorize;
use tabmat::{load_with_config, CategoryTable, DimensionType, Layout, Loaded};

/// Maximum categories listed per dimension without `--verbose`.
const PREVIEW_CATEGORIES: usize = 5;

/// Load a file and describe the result.
///
/// Shows the layout, shape and scan counters, then one line per dimension
/// with its classification. Categorical dimensions list their first few
/// categories, or all of them in verbose mode.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or loaded.
///
/// # Examples
///
/// ```no_run
/// use tabmat_cli::commands::inspect;
///
/// # fn main() -> Result<(), String> {
/// inspect("data.csv", false, b',', true)?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &str, row_major: bool, delimiter: u8, verbose: bool) -> Result<(), String> {
    let content = read_file(file)?;
    let config = load_config(row_major, delimiter);
    let loaded: Loaded<f64> =
        load_with_config(&content, &config).map_err(|e| format!("Load error: {}", e))?;

    let (rows, cols) = loaded.matrix.shape();
    let layout = match loaded.layout {
        Layout::RowMajor => "row-major",
        Layout::ColumnMajor => "column-major",
    };
    let unit = match loaded.layout {
        Layout::RowMajor => "Row",
        Layout::ColumnMajor => "Column",
    };

    println!("{}", "Tabmat Matrix".bold().underline());
    println!();
    println!("{}  {}", "Layout:".cyan(), layout);
    println!("{}   {} x {}", "Shape:".cyan(), rows, cols);
    println!(
        "{}   {} scans, {} restarts",
        "Scans:".cyan(),
        loaded.stats.scans,
        loaded.stats.restarts
    );

    let table = &loaded.categories;
    if table.dimensionality() > 0 {
        println!();
        println!(
            "{} ({} categorical)",
            "Dimensions:".cyan(),
            table.categorical_dimensions()
        );
        for dimension in 0..table.dimensionality() {
            print_dimension(table, dimension, unit, verbose);
        }
    }

    Ok(())
}

fn print_dimension(table: &CategoryTable, dimension: usize, unit: &str, verbose: bool) {
    let label = format!("{} {}", unit, dimension);
    match table.dimension_type(dimension) {
        DimensionType::Numeric => {
            println!("  {}: {}", label.yellow(), "numeric".dimmed());
        }
        DimensionType::Categorical => {
            let count = table.num_mappings(dimension);
            println!(
                "  {}: {} ({} categories)",
                label.yellow(),
                "categorical".green(),
                count
            );

            let limit = if verbose { count } else { PREVIEW_CATEGORIES };
            for (token, code) in table.mappings(dimension).take(limit) {
                println!("    {} → \"{}\"", code.to_string().cyan(), token);
            }
            if count > limit {
                println!("    {}", format!("... {} more", count - limit).dimmed());
            }
        }
    }
}
