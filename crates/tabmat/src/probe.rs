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

//! Dimension probing.
//!
//! Two independent scans size the output: one counts records, the other
//! counts the fields of the first record. A third scan checks every record
//! against that width before anything is allocated. None of them touches
//! field content beyond locating delimiters and terminators.

use crate::error::{LoadError, Result};
use crate::source::Source;

#[inline]
fn field_count(text: &str, delimiter: u8) -> usize {
    memchr::memchr_iter(delimiter, text.as_bytes()).count() + 1
}

/// Record and field counts of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Number of records.
    pub rows: usize,
    /// Number of fields in the first record.
    pub columns: usize,
}

/// Count the records of a source.
///
/// Every line terminator ends a record, including the terminator of a
/// zero-length line. A final line without terminator counts as well.
///
/// # Examples
///
/// ```
/// use tabmat::{row_count, Source};
///
/// let source = Source::from_text("1,2\n3,4\n5,6");
/// assert_eq!(row_count(&source), 3);
/// ```
pub fn row_count(source: &Source) -> usize {
    source.records().count()
}

/// Count the fields of the first record.
///
/// Later records are not checked against this width; the parsers report a
/// mismatch as a malformed record. An empty source has zero columns.
///
/// # Examples
///
/// ```
/// use tabmat::{column_count, Source};
///
/// let source = Source::from_text("red, 1, 2.5\nblue\n");
/// assert_eq!(column_count(&source), 3);
/// ```
pub fn column_count(source: &Source) -> usize {
    source
        .records()
        .next()
        .map_or(0, |record| field_count(record.text, source.delimiter()))
}

/// Check that every record has exactly `columns` fields.
///
/// # Errors
///
/// Returns `LoadError::MalformedRecord` for the first record of a different
/// width.
///
/// # Examples
///
/// ```
/// use tabmat::{check_widths, LoadError, Source};
///
/// assert!(check_widths(&Source::from_text("1,2\n3,4\n"), 2).is_ok());
///
/// let err = check_widths(&Source::from_text("1,2\n3\n"), 2).unwrap_err();
/// assert!(matches!(err, LoadError::MalformedRecord { line: 2, .. }));
/// ```
pub fn check_widths(source: &Source, columns: usize) -> Result<()> {
    let delimiter = source.delimiter();
    for record in source.records() {
        let found = field_count(record.text, delimiter);
        if found != columns {
            return Err(LoadError::malformed(
                record.line,
                format!("expected {} fields, found {}", columns, found),
            ));
        }
    }
    Ok(())
}

/// Run both probes.
pub fn probe(source: &Source) -> Dimensions {
    Dimensions {
        rows: row_count(source),
        columns: column_count(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count_trailing_newline() {
        let source = Source::from_text("1,2,3\n4,5,6\n");
        assert_eq!(row_count(&source), 2);
    }

    #[test]
    fn test_row_count_ignores_field_content() {
        let source = Source::from_text("a\nb,c,d\n,\n");
        assert_eq!(row_count(&source), 3);
    }

    #[test]
    fn test_row_count_counts_zero_length_lines() {
        let source = Source::from_text("1,2\n\n3,4\n");
        assert_eq!(row_count(&source), 3);
    }

    #[test]
    fn test_column_count_first_record_only() {
        let source = Source::from_text("1,2\n3\n4,5,6\n");
        assert_eq!(column_count(&source), 2);
    }

    #[test]
    fn test_column_count_empty_fields() {
        let source = Source::from_text(",,\n");
        assert_eq!(column_count(&source), 3);
    }

    #[test]
    fn test_column_count_custom_delimiter() {
        let source = Source::from_text("1;2;3,4\n").with_delimiter(b';');
        assert_eq!(column_count(&source), 3);
    }

    #[test]
    fn test_check_widths_rectangular() {
        let source = Source::from_text("a,b\n1,2\n,\n");
        assert!(check_widths(&source, 2).is_ok());
    }

    #[test]
    fn test_check_widths_reports_first_mismatch() {
        let source = Source::from_text("1,2\n3,4\n5\n6,7,8\n");
        match check_widths(&source, 2).unwrap_err() {
            LoadError::MalformedRecord { line, message } => {
                assert_eq!(line, 3);
                assert_eq!(message, "expected 2 fields, found 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_widths_zero_length_line() {
        let source = Source::from_text("1,2\n\n3,4\n");
        let err = check_widths(&source, 2).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_empty_source() {
        let source = Source::from_text("");
        assert_eq!(probe(&source), Dimensions::default());
        assert!(check_widths(&source, 0).is_ok());
    }

    #[test]
    fn test_probes_are_idempotent() {
        let source = Source::from_text("x,y\n1,2\n3,4\n");
        let first = probe(&source);
        for _ in 0..5 {
            assert_eq!(probe(&source), first);
        }
        assert_eq!(first, Dimensions { rows: 3, columns: 2 });
    }
}
