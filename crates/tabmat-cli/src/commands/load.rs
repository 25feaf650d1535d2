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

//! Load command - matrix and category mappings as JSON

use super::{load_config, read_file, write_output};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;
use tabmat::{load_with_config, Element, LoadConfig, Loaded};

/// Element type of the output matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElementKind {
    /// 64-bit float
    F64,
    /// 32-bit float
    F32,
    /// 64-bit signed integer
    I64,
    /// 32-bit signed integer
    I32,
}

/// Load a file and write `{layout, shape, matrix, mappings, stats}` as JSON.
///
/// `matrix` is an array of output rows. `mappings` lists every dimension
/// with its type and `(token, code)` entries in first-seen order.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or loaded, or if the output
/// cannot be written.
///
/// # Examples
///
/// ```no_run
/// use tabmat_cli::commands::{load, ElementKind};
///
/// # fn main() -> Result<(), String> {
/// // Column-major f64 matrix to stdout
/// load("data.csv", false, ElementKind::F64, b',', None, false)?;
///
/// // Row-major integer matrix to a file
/// load("data.csv", true, ElementKind::I64, b';', Some("out.json"), true)?;
/// # Ok(())
/// # }
/// ```
pub fn load(
    file: &str,
    row_major: bool,
    kind: ElementKind,
    delimiter: u8,
    output: Option<&str>,
    pretty: bool,
) -> Result<(), String> {
    let content = read_file(file)?;
    let config = load_config(row_major, delimiter);

    let mut json = match kind {
        ElementKind::F64 => render::<f64>(&content, &config, pretty)?,
        ElementKind::F32 => render::<f32>(&content, &config, pretty)?,
        ElementKind::I64 => render::<i64>(&content, &config, pretty)?,
        ElementKind::I32 => render::<i32>(&content, &config, pretty)?,
    };
    json.push('\n');

    write_output(&json, output)
}

fn render<T: Element + Serialize>(
    content: &str,
    config: &LoadConfig,
    pretty: bool,
) -> Result<String, String> {
    let loaded: Loaded<T> =
        load_with_config(content, config).map_err(|e| format!("Load error: {}", e))?;

    let matrix: Vec<&[T]> = loaded.matrix.rows().collect();
    let value = json!({
        "layout": loaded.layout,
        "shape": loaded.matrix.shape(),
        "matrix": matrix,
        "mappings": loaded.categories.export(),
        "stats": loaded.stats,
    });

    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|e| format!("JSON format error: {}", e))
}
