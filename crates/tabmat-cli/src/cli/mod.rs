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

//! CLI command definitions and argument parsing.
//!
//! - [`core`]: single-file commands (probe, load, inspect, validate)
//! - [`batch`]: multi-file commands (batch-validate)

mod batch;
mod core;

use clap::Subcommand;

pub use batch::BatchCommands;
pub use core::CoreCommands;

/// Top-level CLI commands enum.
///
/// Both categories are flattened so that every command appears at the top
/// level:
///
/// ```text
/// Commands
/// ├── Core (probe, load, inspect, validate)
/// └── Batch (batch-validate)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use tabmat_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Core commands - flattened to appear at top level
    #[command(flatten)]
    Core(CoreCommands),

    // Batch commands - flattened to appear at top level
    #[command(flatten)]
    Batch(BatchCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a message if reading, loading or writing fails.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Batch(cmd) => cmd.execute(),
        }
    }
}
