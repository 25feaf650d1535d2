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

//! Probe command - record and field counts

use super::{load_config, read_file};
use colored::Colorize;
use tabmat::Source;

/// Print the record count and the field count of the first record.
///
/// Field values are not parsed, so a file that fails to load can still be
/// probed.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or the delimiter is invalid.
pub fn probe(file: &str, delimiter: u8) -> Result<(), String> {
    load_config(false, delimiter)
        .validate()
        .map_err(|e| e.to_string())?;
    let content = read_file(file)?;

    let source = Source::from_text(content).with_delimiter(delimiter);
    let dims = tabmat::probe(&source);

    println!("{} {}", "File:".cyan(), file);
    println!("  Rows: {}", dims.rows);
    println!("  Columns: {}", dims.columns);
    Ok(())
}
