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

//! Batch command implementations

use super::load_config;
use crate::batch::{BatchConfig, BatchProcessor, ValidationOperation};
use crate::error::CliError;
use colored::Colorize;
use std::path::PathBuf;

/// Validate multiple files.
///
/// Each file is loaded on its own; with `parallel` the files are spread over
/// a thread pool.
///
/// # Errors
///
/// Returns `Err` with a failure count if any file fails to load.
///
/// # Examples
///
/// ```no_run
/// use tabmat_cli::commands::batch_validate;
///
/// # fn main() -> Result<(), String> {
/// let files = vec!["a.csv".to_string(), "b.csv".to_string()];
/// batch_validate(files, false, b',', true, false)?;
/// # Ok(())
/// # }
/// ```
pub fn batch_validate(
    files: Vec<String>,
    row_major: bool,
    delimiter: u8,
    parallel: bool,
    verbose: bool,
) -> Result<(), String> {
    let config = load_config(row_major, delimiter);
    config.validate().map_err(|e| e.to_string())?;

    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    let processor = BatchProcessor::new(BatchConfig {
        parallel_threshold: if parallel { 1 } else { usize::MAX },
        verbose,
        ..Default::default()
    });
    let operation = ValidationOperation {
        layout: config.layout,
        delimiter: config.delimiter,
    };

    let results = processor
        .process(&paths, operation, true)
        .map_err(|e: CliError| e.to_string())?;

    if verbose {
        for success in results.successes() {
            if let Ok(summary) = &success.result {
                println!(
                    "  {} {} ({} x {}, {} categorical)",
                    "✓".green(),
                    success.path.display(),
                    summary.rows,
                    summary.cols,
                    summary.categorical
                );
            }
        }
    }

    if results.has_failures() {
        eprintln!();
        eprintln!("{}", "Validation failures:".red().bold());
        for failure in results.failures() {
            eprintln!("  {} {}", "✗".red(), failure.path.display());
            if let Err(e) = &failure.result {
                eprintln!("    {}", e.to_string().dimmed());
            }
        }
        return Err(format!(
            "{} of {} files failed validation",
            results.failure_count(),
            results.total_files()
        ));
    }

    Ok(())
}
