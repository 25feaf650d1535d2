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

//! Error types for loading operations.

use thiserror::Error;

/// Loader error types.
///
/// Every variant is fatal for the load that produced it: the caller receives
/// neither a matrix nor a category table.
///
/// # Examples
///
/// ```
/// use tabmat::LoadError;
///
/// let err = LoadError::MalformedRecord {
///     line: 2,
///     message: "expected 2 fields, found 1".to_string(),
/// };
///
/// assert_eq!(
///     err.to_string(),
///     "Malformed record at line 2: expected 2 fields, found 1"
/// );
/// ```
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    ///
    /// Invalid UTF-8 input is reported here as well, with
    /// `std::io::ErrorKind::InvalidData`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabmat::LoadError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    /// let err = LoadError::from(io_err);
    /// assert!(err.to_string().starts_with("Source unavailable"));
    /// ```
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),

    /// A record could be consumed by neither the numeric nor the generic grammar.
    ///
    /// Records whose field count differs from the first record's are reported
    /// with this variant too.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// Physical line number of the record (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// A category code does not fit the requested element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabmat::LoadError;
    ///
    /// let err = LoadError::CategoryOverflow {
    ///     dimension: 0,
    ///     code: 256,
    ///     kind: "u8",
    /// };
    /// assert!(err.to_string().contains("does not fit u8"));
    /// ```
    #[error("Category code {code} in dimension {dimension} does not fit {kind}")]
    CategoryOverflow {
        /// Dimension the token belongs to.
        dimension: usize,
        /// Code assigned to the token.
        code: usize,
        /// Name of the element type.
        kind: &'static str,
    },

    /// Row or column count exceeded a configured limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabmat::LoadError;
    ///
    /// let err = LoadError::SecurityLimit {
    ///     what: "row count",
    ///     limit: 1_000_000,
    ///     actual: 1_000_001,
    /// };
    /// assert!(err.to_string().contains("Security limit"));
    /// ```
    #[error("Security limit exceeded: {what} {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Which quantity hit the limit.
        what: &'static str,
        /// Maximum allowed value.
        limit: usize,
        /// Actual value encountered.
        actual: usize,
    },

    /// The load configuration cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An exported category mapping cannot be turned back into a table.
    #[error("Invalid category mapping: {0}")]
    InvalidMapping(String),

    /// A dimension index is outside the table.
    #[error("Dimension {dimension} out of range (dimensionality {dimensionality})")]
    DimensionOutOfRange {
        /// Requested dimension.
        dimension: usize,
        /// Number of dimensions in the table.
        dimensionality: usize,
    },

    /// Column-major classification exceeded its restart bound.
    #[error("Classification did not converge after {restarts} restarts (bound {bound})")]
    NoConvergence {
        /// Restarts performed.
        restarts: usize,
        /// Maximum restarts allowed (the column count).
        bound: usize,
    },
}

/// Convenience type alias for `Result` with `LoadError`.
pub type Result<T> = std::result::Result<T, LoadError>;

impl LoadError {
    /// Create a malformed-record error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        LoadError::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Add context to an error message.
    ///
    /// Only variants that carry a free-form message are extended; the others
    /// are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabmat::LoadError;
    ///
    /// let err = LoadError::malformed(5, "expected 3 fields, found 2");
    /// let err = err.with_context("in column 1".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Malformed record at line 5: expected 3 fields, found 2 (in column 1)"
    /// );
    /// ```
    pub fn with_context(self, context: String) -> Self {
        match self {
            LoadError::MalformedRecord { line, message } => LoadError::MalformedRecord {
                line,
                message: format!("{} ({})", message, context),
            },
            LoadError::InvalidConfig(msg) => LoadError::InvalidConfig(format!("{} ({})", msg, context)),
            LoadError::InvalidMapping(msg) => {
                LoadError::InvalidMapping(format!("{} ({})", msg, context))
            }
            other => other,
        }
    }
}
