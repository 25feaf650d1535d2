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

//! Batch processing for multiple input files with optional parallel execution.
//!
//! Each file is loaded independently; a load itself stays single-threaded.
//! Work is spread over Rayon's pool once the batch reaches
//! [`BatchConfig::parallel_threshold`] files. Failures never stop the batch:
//! every file gets a [`FileResult`] and the caller decides what to report.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tabmat::Layout;
//! use tabmat_cli::batch::{BatchConfig, BatchProcessor, ValidationOperation};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = BatchProcessor::new(BatchConfig::default());
//! let files = vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")];
//!
//! let operation = ValidationOperation {
//!     layout: Layout::ColumnMajor,
//!     delimiter: b',',
//! };
//! let results = processor.process(&files, operation, true)?;
//!
//! println!(
//!     "{} of {} files loaded",
//!     results.success_count(),
//!     results.total_files()
//! );
//! # Ok(())
//! # }
//! ```

use crate::commands::read_source;
use crate::error::CliError;
use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tabmat::{load_with_config, Layout, LoadConfig};
use tracing::debug;

/// Configuration for batch processing.
///
/// # Examples
///
/// ```rust
/// use tabmat_cli::batch::BatchConfig;
///
/// let config = BatchConfig {
///     parallel_threshold: 5,
///     max_threads: Some(4),
///     progress_interval: 10,
///     verbose: true,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files that triggers parallel processing (default: 10).
    pub parallel_threshold: usize,

    /// Maximum number of worker threads; `None` uses Rayon's default.
    pub max_threads: Option<usize>,

    /// Files between progress lines; 0 disables progress lines (default: 1).
    pub progress_interval: usize,

    /// Print one line per file instead of running totals.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    /// Create a successful file result.
    pub fn success(path: PathBuf, value: T) -> Self {
        Self {
            path,
            result: Ok(value),
        }
    }

    /// Create a failed file result.
    pub fn failure(path: PathBuf, error: CliError) -> Self {
        Self {
            path,
            result: Err(error),
        }
    }

    /// Check if the result is successful.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if the result is a failure.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Results of a whole batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file
    pub results: Vec<FileResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    /// Create batch results.
    pub fn new(results: Vec<FileResult<T>>, elapsed_ms: u128) -> Self {
        Self {
            results,
            elapsed_ms,
        }
    }

    /// Number of files processed.
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Number of files that succeeded.
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Number of files that failed.
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Whether every file succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(FileResult::is_success)
    }

    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(FileResult::is_failure)
    }

    /// Successful results.
    pub fn successes(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Failed results.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Files per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            (self.total_files() as f64) / (self.elapsed_ms as f64 / 1000.0)
        }
    }
}

/// An operation applied to every file of a batch.
///
/// Must be `Send + Sync` so that files can be processed in parallel.
///
/// # Examples
///
/// ```rust
/// use tabmat_cli::batch::BatchOperation;
/// use tabmat_cli::error::CliError;
/// use std::path::Path;
///
/// struct CountRecords;
///
/// impl BatchOperation for CountRecords {
///     type Output = usize;
///
///     fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
///         let source = tabmat::Source::open(path)?;
///         Ok(tabmat::row_count(&source))
///     }
///
///     fn name(&self) -> &str {
///         "count-records"
///     }
/// }
/// ```
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file.
    ///
    /// # Errors
    ///
    /// Returns the `CliError` describing why this file failed.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Name used in the summary.
    fn name(&self) -> &str;
}

/// Lock-free progress counters shared by the workers.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record<T>(&self, path: &Path, result: &Result<T, CliError>) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        match result {
            Ok(_) => {
                self.succeeded.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                if self.verbose {
                    eprintln!("{} {} - {}", "✗".red().bold(), path.display(), e);
                }
            }
        }

        if self.should_report(processed) {
            self.report_progress(path, result.is_ok());
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, current_file: &Path, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!(
                "{} [{}/{}] {}",
                status,
                processed,
                self.total,
                current_file.display()
            );
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed",
                processed, self.total, succeeded, failed
            );
        }
    }

    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed().as_secs_f64();

        println!();
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "{} {}",
            "Batch Operation:".bright_blue().bold(),
            operation_name.bright_white()
        );
        println!("{}", "═".repeat(60).bright_blue());
        println!("  {} {}", "Total files:".bright_cyan(), processed);
        println!("  {} {}", "Succeeded:".green().bold(), succeeded);
        println!("  {} {}", "Failed:".red().bold(), failed);
        println!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed);
        println!("{}", "═".repeat(60).bright_blue());
    }
}

/// Runs a [`BatchOperation`] over a list of files.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Create a processor with the default configuration.
    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Process every file and collect the results in input order.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidInput` if a dedicated thread pool cannot be
    /// built. Per-file failures are reported inside [`BatchResults`].
    pub fn process<O>(
        &self,
        files: &[PathBuf],
        operation: O,
        show_progress: bool,
    ) -> Result<BatchResults<O::Output>, CliError>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();
        if files.is_empty() {
            return Ok(BatchResults::new(Vec::new(), 0));
        }

        let tracker = show_progress.then(|| {
            ProgressTracker::new(files.len(), self.config.progress_interval, self.config.verbose)
        });
        let run_one = |path: &PathBuf| {
            let result = operation.process_file(path);
            debug!(
                target: "tabmat::batch",
                path = %path.display(),
                ok = result.is_ok(),
                "processed file"
            );
            if let Some(t) = &tracker {
                t.record(path, &result);
            }
            FileResult {
                path: path.clone(),
                result,
            }
        };

        let results: Vec<FileResult<O::Output>> = if files.len() < self.config.parallel_threshold
        {
            files.iter().map(run_one).collect()
        } else if let Some(threads) = self.config.max_threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| CliError::invalid_input(format!("thread pool: {}", e)))?;
            pool.install(|| files.par_iter().map(run_one).collect())
        } else {
            files.par_iter().map(run_one).collect()
        };

        if let Some(tracker) = tracker {
            tracker.print_summary(operation.name());
        }

        Ok(BatchResults::new(results, start_time.elapsed().as_millis()))
    }
}

// ============================================================================
// Standard Operations
// ============================================================================

/// Shape and classification of a successfully loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Output matrix rows
    pub rows: usize,
    /// Output matrix columns
    pub cols: usize,
    /// Dimensions encoded as categories
    pub categorical: usize,
}

/// Batch validation: every file must load with the given layout.
#[derive(Debug, Clone)]
pub struct ValidationOperation {
    /// Output layout to load with
    pub layout: Layout,
    /// Field delimiter
    pub delimiter: u8,
}

impl BatchOperation for ValidationOperation {
    type Output = LoadSummary;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let content = read_source(path)?;
        let config = LoadConfig {
            layout: self.layout,
            delimiter: self.delimiter,
            ..Default::default()
        };
        let loaded = load_with_config::<f64>(&content, &config)?;
        let (rows, cols) = loaded.matrix.shape();
        Ok(LoadSummary {
            rows,
            cols,
            categorical: loaded.categories.categorical_dimensions(),
        })
    }

    fn name(&self) -> &str {
        "validate"
    }
}
