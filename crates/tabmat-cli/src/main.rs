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

//! Tabmat Command Line Interface

use clap::Parser;
use std::process::ExitCode;
use tabmat_cli::cli::Commands;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Tabmat - delimited text to numeric matrix loader
///
/// Loads delimiter-separated text into dense numeric matrices, encoding
/// non-numeric columns (or rows) as categorical codes.
///
/// # Examples
///
/// ```bash
/// # Show the shape of a file
/// tabmat probe data.csv
///
/// # Load as JSON, one output row per input record
/// tabmat load data.csv --row-major --pretty
///
/// # Show which dimensions are categorical
/// tabmat inspect data.csv --verbose
///
/// # Check many files in parallel
/// tabmat batch-validate data/*.csv --parallel
/// ```
#[derive(Parser)]
#[command(name = "tabmat")]
#[command(author, version, about = "Tabmat - delimited text to numeric matrix loader", long_about = None)]
struct Cli {
    /// Library log level (error, warn, info, debug, trace)
    #[arg(long = "log", global = true, value_name = "LEVEL")]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(level: Option<&str>) {
    let default: Directive = "tabmat=warn".parse().expect("valid log directive");
    let directive = level
        .and_then(|level| format!("tabmat={}", level).parse().ok())
        .unwrap_or(default);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
