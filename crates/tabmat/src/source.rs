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

//! Rewindable in-memory text source.
//!
//! Every scan over a [`Source`] starts at byte 0, so the probes and each
//! classification pass see the same records in the same order without any
//! explicit seek.

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Buffered delimiter-separated text.
///
/// # Examples
///
/// ```
/// use tabmat::Source;
///
/// let source = Source::from_text("a,b\r\n\n1,2");
/// let lines: Vec<_> = source.records().map(|r| (r.line, r.text)).collect();
/// assert_eq!(lines, vec![(1, "a,b"), (2, ""), (3, "1,2")]);
/// ```
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
    delimiter: u8,
}

impl Source {
    /// Wrap already-buffered text using the default `,` delimiter.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Read a whole reader into memory.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::SourceUnavailable` if reading fails or the input is
    /// not valid UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(text))
    }

    /// Open and buffer a file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::SourceUnavailable` if the file cannot be opened or read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Field delimiter of this source.
    #[inline]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// The buffered text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Scan the records from the start of the text.
    pub fn records(&self) -> Records<'_> {
        Records {
            text: &self.text,
            pos: 0,
            line: 0,
        }
    }
}

/// One line of input without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Physical line number (1-based). `\r\n` counts as one terminator.
    pub line: usize,
    /// Record text.
    pub text: &'a str,
}

/// Iterator over the lines of a [`Source`].
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. A zero-length line is a record
/// with one empty field. The terminator of the last line is optional, so a
/// final terminator does not open another record.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let end = memchr::memchr2(b'\r', b'\n', &bytes[start..])
            .map_or(bytes.len(), |offset| start + offset);

        self.pos = match bytes.get(end) {
            Some(b'\r') if bytes.get(end + 1) == Some(&b'\n') => end + 2,
            Some(_) => end + 1,
            None => end,
        };
        self.line += 1;

        Some(Record {
            line: self.line,
            text: &self.text[start..end],
        })
    }
}
