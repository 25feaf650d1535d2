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

//! Batch processing commands.

use crate::commands::{self, parse_delimiter};
use clap::Subcommand;

/// Commands that operate on many input files.
#[derive(Subcommand)]
pub enum BatchCommands {
    /// Validate multiple files
    ///
    /// Loads every file and reports aggregated results. Files are processed
    /// in parallel with `--parallel`.
    BatchValidate {
        /// Input file paths
        #[arg(value_name = "FILES", num_args = 1..)]
        files: Vec<String>,

        /// One output row per input record
        #[arg(short, long)]
        row_major: bool,

        /// Field delimiter (single ASCII character)
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Force parallel processing
        #[arg(short, long)]
        parallel: bool,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },
}

impl BatchCommands {
    /// Execute the batch command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any file fails validation.
    pub fn execute(self) -> Result<(), String> {
        match self {
            BatchCommands::BatchValidate {
                files,
                row_major,
                delimiter,
                parallel,
                verbose,
            } => commands::batch_validate(files, row_major, delimiter, parallel, verbose),
        }
    }
}
