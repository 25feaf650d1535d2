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

//! CLI command implementations

mod batch_commands;
mod inspect;
mod load;
mod probe;
mod validate;

pub use batch_commands::batch_validate;
pub use inspect::inspect;
pub use load::{load, ElementKind};
pub use probe::probe;
pub use validate::validate;

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tabmat::{Layout, LoadConfig};

/// Default maximum input file size (1 GB).
/// Can be overridden via the `TABMAT_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("TABMAT_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read an input file after checking its size.
///
/// # Errors
///
/// Returns `CliError::FileTooLarge` if the file exceeds the limit
/// (`TABMAT_MAX_FILE_SIZE`, default 1 GB) and `CliError::Io` if it cannot be
/// read or is not UTF-8.
pub fn read_source(path: &Path) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Read an input file with size validation.
///
/// # Examples
///
/// ```no_run
/// use tabmat_cli::commands::read_file;
///
/// # fn main() -> Result<(), String> {
/// let content = read_file("data.csv")?;
///
/// std::env::set_var("TABMAT_MAX_FILE_SIZE", "1000");
/// assert!(read_file("large.csv").is_err());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &str) -> Result<String, String> {
    read_source(Path::new(path)).map_err(|e| e.to_string())
}

/// Write content to a file, or to stdout when `path` is `None`.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| format!("Failed to write '{}': {}", p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("Failed to write to stdout: {}", e)),
    }
}

/// Parse a delimiter argument: exactly one ASCII character that the loader
/// accepts, so neither a blank nor a line terminator.
///
/// # Examples
///
/// ```
/// use tabmat_cli::commands::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";"), Ok(b';'));
/// assert!(parse_delimiter("ab").is_err());
/// assert!(parse_delimiter(" ").is_err());
/// ```
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    let delimiter = match value.as_bytes() {
        [byte] if byte.is_ascii() => *byte,
        _ => {
            return Err(format!(
                "delimiter must be a single ASCII character, got '{}'",
                value
            ))
        }
    };
    LoadConfig {
        delimiter,
        ..Default::default()
    }
    .validate()
    .map_err(|e| e.to_string())?;
    Ok(delimiter)
}

/// Build the load configuration shared by the commands.
pub(crate) fn load_config(row_major: bool, delimiter: u8) -> LoadConfig {
    LoadConfig {
        layout: if row_major {
            Layout::RowMajor
        } else {
            Layout::ColumnMajor
        },
        delimiter,
        ..Default::default()
    }
}
