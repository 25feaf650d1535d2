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

//! Field grammar.
//!
//! Two recognizers operate on the text of a single record:
//!
//! - [`parse_number`] reads one literal of the element type's numeric kind,
//!   surrounded by optional blanks, and requires the field to end right after.
//! - [`parse_token`] captures everything up to the next delimiter or line
//!   terminator, trimmed of surrounding blanks. It is the fallback and
//!   accepts empty fields.
//!
//! Blanks are spaces and tabs. Both recognizers return the number of bytes
//! consumed so that record-level parsers can continue at the delimiter.

use crate::element::Element;

#[inline]
fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Whether `byte` ends a line.
#[inline]
pub fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Byte offset where the current field ends.
#[inline]
fn field_end(text: &str, delimiter: u8) -> usize {
    memchr::memchr3(delimiter, b'\r', b'\n', text.as_bytes()).unwrap_or(text.len())
}

/// Recognize one numeric field at the start of `text`.
///
/// Returns the value and the bytes consumed, up to but excluding the
/// delimiter. Returns `None` when the field is not exactly one well-formed
/// literal of `T`'s kind.
///
/// # Examples
///
/// ```
/// use tabmat::grammar::parse_number;
///
/// assert_eq!(parse_number::<f64>("  2.5 ,7", b','), Some((2.5, 6)));
/// assert_eq!(parse_number::<i32>("2.5,7", b','), None);
/// assert_eq!(parse_number::<i32>("1 2,7", b','), None);
/// ```
pub fn parse_number<T: Element>(text: &str, delimiter: u8) -> Option<(T, usize)> {
    let end = field_end(text, delimiter);
    let literal = text[..end].trim_matches(is_blank);
    if literal.is_empty() {
        return None;
    }
    T::parse_literal(literal).map(|value| (value, end))
}

/// Recognize one generic token at the start of `text`.
///
/// Returns the trimmed token and the bytes consumed, up to but excluding the
/// delimiter. Returns `None` only when `text` starts with a line terminator.
///
/// # Examples
///
/// ```
/// use tabmat::grammar::parse_token;
///
/// assert_eq!(parse_token(" new york ,1", b','), Some(("new york", 10)));
/// assert_eq!(parse_token(",1", b','), Some(("", 0)));
/// assert_eq!(parse_token("\n", b','), None);
/// ```
pub fn parse_token(text: &str, delimiter: u8) -> Option<(&str, usize)> {
    if text.as_bytes().first().copied().is_some_and(is_terminator) {
        return None;
    }
    let end = field_end(text, delimiter);
    Some((text[..end].trim_matches(is_blank), end))
}

/// Split a record into raw, untrimmed fields.
///
/// `out` is cleared first. A record always has at least one field.
pub fn split_fields<'a>(record: &'a str, delimiter: u8, out: &mut Vec<&'a str>) {
    out.clear();
    let mut start = 0;
    for pos in memchr::memchr_iter(delimiter, record.as_bytes()) {
        out.push(&record[start..pos]);
        start = pos + 1;
    }
    out.push(&record[start..]);
}

/// Parse a whole record as numeric fields.
///
/// Succeeds only if every field is numeric and the record is consumed to its
/// end. On failure `out` is left empty, so no partial assignment survives.
///
/// # Examples
///
/// ```
/// use tabmat::grammar::parse_numeric_record;
///
/// let mut out = Vec::new();
/// assert!(parse_numeric_record::<f64>("1, 2 ,3", b',', &mut out));
/// assert_eq!(out, vec![1.0, 2.0, 3.0]);
///
/// assert!(!parse_numeric_record::<f64>("1,red,3", b',', &mut out));
/// assert!(out.is_empty());
/// ```
pub fn parse_numeric_record<T: Element>(record: &str, delimiter: u8, out: &mut Vec<T>) -> bool {
    out.clear();
    let mut rest = record;
    loop {
        let Some((value, used)) = parse_number::<T>(rest, delimiter) else {
            out.clear();
            return false;
        };
        out.push(value);
        rest = &rest[used..];

        match rest.as_bytes().first() {
            None => return true,
            Some(&byte) if byte == delimiter => rest = &rest[1..],
            Some(_) => {
                out.clear();
                return false;
            }
        }
    }
}

/// Parse a whole record as generic tokens.
///
/// Returns `false` if the record cannot be consumed to its end, which only
/// happens when it contains a line terminator.
pub fn parse_generic_record<'a>(record: &'a str, delimiter: u8, out: &mut Vec<&'a str>) -> bool {
    out.clear();
    let mut rest = record;
    loop {
        let Some((token, used)) = parse_token(rest, delimiter) else {
            out.clear();
            return false;
        };
        out.push(token);
        rest = &rest[used..];

        match rest.as_bytes().first() {
            None => return true,
            Some(&byte) if byte == delimiter => rest = &rest[1..],
            Some(_) => {
                out.clear();
                return false;
            }
        }
    }
}
