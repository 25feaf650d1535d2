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

//! Single-file commands.

use crate::commands::{self, parse_delimiter, ElementKind};
use clap::Subcommand;

/// Commands that operate on one input file.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Count records and fields
    ///
    /// Reports the number of records and the number of fields in the first
    /// record without parsing any values.
    Probe {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Field delimiter (single ASCII character)
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,
    },

    /// Load a file and print it as JSON
    ///
    /// Emits the matrix, the per-dimension category mappings and the load
    /// counters. Column-major output has one row per field position.
    Load {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// One output row per input record
        #[arg(short, long)]
        row_major: bool,

        /// Matrix element type
        #[arg(short, long, value_enum, default_value = "f64")]
        kind: ElementKind,

        /// Field delimiter (single ASCII character)
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show which dimensions are categorical
    ///
    /// Loads the file and lists every dimension with its classification and
    /// categories.
    Inspect {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// One output row per input record
        #[arg(short, long)]
        row_major: bool,

        /// Field delimiter (single ASCII character)
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// List every category
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check that a file loads
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// One output row per input record
        #[arg(short, long)]
        row_major: bool,

        /// Field delimiter (single ASCII character)
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,
    },
}

impl CoreCommands {
    /// Execute the core command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), String> {
        match self {
            CoreCommands::Probe { file, delimiter } => commands::probe(&file, delimiter),
            CoreCommands::Load {
                file,
                row_major,
                kind,
                delimiter,
                output,
                pretty,
            } => commands::load(&file, row_major, kind, delimiter, output.as_deref(), pretty),
            CoreCommands::Inspect {
                file,
                row_major,
                delimiter,
                verbose,
            } => commands::inspect(&file, row_major, delimiter, verbose),
            CoreCommands::Validate {
                file,
                row_major,
                delimiter,
            } => commands::validate(&file, row_major, delimiter),
        }
    }
}
