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

//! Validate command - check that a file loads

use super::{load_config, read_file};
use colored::Colorize;
use tabmat::{load_with_config, Loaded};

/// Validate that a file loads with the given layout.
///
/// Prints ✓ with the resulting shape on success and ✗ on failure.
///
/// # Errors
///
/// Returns `Err` with the load error if the file cannot be read or loaded.
///
/// # Examples
///
/// ```no_run
/// use tabmat_cli::commands::validate;
///
/// # fn main() -> Result<(), String> {
/// validate("data.csv", false, b',')?;
///
/// let result = validate("ragged.csv", false, b',');
/// assert!(result.is_err());
/// # Ok(())
/// # }
/// ```
pub fn validate(file: &str, row_major: bool, delimiter: u8) -> Result<(), String> {
    let content = read_file(file)?;
    let config = load_config(row_major, delimiter);

    match load_with_config::<f64>(&content, &config) {
        Ok(Loaded {
            matrix,
            categories,
            ..
        }) => {
            let (rows, cols) = matrix.shape();
            println!("{} {}", "✓".green().bold(), file);
            println!("  Shape: {} x {}", rows, cols);
            println!(
                "  Categorical dimensions: {} of {}",
                categories.categorical_dimensions(),
                categories.dimensionality()
            );
            println!("  Categories: {}", categories.total_mappings());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            Err(e.to_string())
        }
    }
}
