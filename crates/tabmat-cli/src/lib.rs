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

//! Tabmat CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Loading
//!
//! - **probe**: Count records and fields without parsing values
//! - **load**: Load a file and print the matrix and category mappings as JSON
//!
//! ## Validation & Inspection
//!
//! - **validate**: Check that a file loads
//! - **inspect**: Show per-dimension classification and categories
//!
//! ## Batch Processing
//!
//! - **batch-validate**: Validate multiple files, optionally in parallel
//!
//! # Examples
//!
//! ```no_run
//! use tabmat_cli::commands::{load, validate, ElementKind};
//!
//! # fn main() -> Result<(), String> {
//! validate("data.csv", false, b',')?;
//! load("data.csv", false, ElementKind::F64, b',', Some("out.json"), true)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Input files are size-checked before reading (configurable via
//! `TABMAT_MAX_FILE_SIZE`), and the loader's record and field limits apply.
//!
//! # Error Handling
//!
//! Commands return `Result<(), String>`; batch operations collect
//! [`error::CliError`] values per file.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
