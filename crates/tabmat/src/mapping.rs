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

//! Per-dimension category mapping table.
//!
//! Each dimension owns an ordered string → code map. Codes are assigned
//! densely from 0 in first-seen order, so a code is also the index of its
//! token in the dimension's token list.
//!
//! A dimension is categorical once it holds at least one token or was
//! explicitly committed; from then on every value written to it goes
//! through the mapping. The table never shrinks.

use crate::error::{LoadError, Result};
use std::collections::HashMap;

/// Classification of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DimensionType {
    /// Values are stored as parsed. While a load is running this also covers
    /// dimensions that are still undetermined.
    Numeric,
    /// Values are stored as category codes.
    Categorical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Categories {
    tokens: Vec<String>,
    codes: HashMap<String, usize>,
    committed: bool,
}

impl Categories {
    fn is_categorical(&self) -> bool {
        self.committed || !self.tokens.is_empty()
    }
}

/// One `(token, code)` pair of an exported dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MappingEntry {
    /// Original text of the field.
    pub token: String,
    /// Code stored in the matrix.
    pub code: usize,
}

/// Exported mapping of one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionMapping {
    /// Dimension index.
    pub dimension: usize,
    /// Classification of the dimension.
    pub dimension_type: DimensionType,
    /// Entries in first-seen order.
    pub entries: Vec<MappingEntry>,
}

impl DimensionMapping {
    /// Number of entries (0 for a numeric dimension).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dimension has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category mapping table built while loading.
///
/// # Examples
///
/// ```
/// use tabmat::{CategoryTable, DimensionType};
///
/// let mut table = CategoryTable::new(2);
/// assert_eq!(table.map_string("red", 0).unwrap(), 0);
/// assert_eq!(table.map_string("blue", 0).unwrap(), 1);
/// assert_eq!(table.map_string("red", 0).unwrap(), 0);
///
/// assert_eq!(table.num_mappings(0), 2);
/// assert_eq!(table.unmap_string(1, 0), Some("blue"));
/// assert_eq!(table.dimension_type(1), DimensionType::Numeric);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    dimensions: Vec<Categories>,
}

impl CategoryTable {
    /// Create a table with `dimensionality` empty dimensions.
    pub fn new(dimensionality: usize) -> Self {
        Self {
            dimensions: vec![Categories::default(); dimensionality],
        }
    }

    /// Number of dimensions.
    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.dimensions.len()
    }

    fn dimension(&self, dimension: usize) -> Result<&Categories> {
        self.dimensions
            .get(dimension)
            .ok_or(LoadError::DimensionOutOfRange {
                dimension,
                dimensionality: self.dimensions.len(),
            })
    }

    fn dimension_mut(&mut self, dimension: usize) -> Result<&mut Categories> {
        let dimensionality = self.dimensions.len();
        self.dimensions
            .get_mut(dimension)
            .ok_or(LoadError::DimensionOutOfRange {
                dimension,
                dimensionality,
            })
    }

    /// Number of tokens mapped in `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dimensionality()`.
    #[inline]
    pub fn num_mappings(&self, dimension: usize) -> usize {
        self.dimensions[dimension].tokens.len()
    }

    /// Number of tokens mapped across all dimensions.
    pub fn total_mappings(&self) -> usize {
        self.dimensions.iter().map(|d| d.tokens.len()).sum()
    }

    /// Whether values of `dimension` go through the mapping.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dimensionality()`.
    #[inline]
    pub fn is_categorical(&self, dimension: usize) -> bool {
        self.dimensions[dimension].is_categorical()
    }

    /// Classification of `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dimensionality()`.
    pub fn dimension_type(&self, dimension: usize) -> DimensionType {
        if self.is_categorical(dimension) {
            DimensionType::Categorical
        } else {
            DimensionType::Numeric
        }
    }

    /// Number of categorical dimensions.
    pub fn categorical_dimensions(&self) -> usize {
        self.dimensions.iter().filter(|d| d.is_categorical()).count()
    }

    /// Mark `dimension` categorical without adding a token.
    ///
    /// Idempotent; a categorical dimension never becomes numeric again.
    pub fn commit_categorical(&mut self, dimension: usize) -> Result<()> {
        self.dimension_mut(dimension)?.committed = true;
        Ok(())
    }

    /// Return the code of `token` in `dimension`, assigning the next free code
    /// if it has not been seen yet. Mapping a token commits the dimension.
    pub fn map_string(&mut self, token: &str, dimension: usize) -> Result<usize> {
        let categories = self.dimension_mut(dimension)?;
        if let Some(&code) = categories.codes.get(token) {
            return Ok(code);
        }
        let code = categories.tokens.len();
        categories.tokens.push(token.to_string());
        categories.codes.insert(token.to_string(), code);
        categories.committed = true;
        Ok(code)
    }

    /// Code of an already mapped token.
    pub fn code_of(&self, token: &str, dimension: usize) -> Option<usize> {
        self.dimensions
            .get(dimension)
            .and_then(|d| d.codes.get(token).copied())
    }

    /// Token behind `code` in `dimension`.
    pub fn unmap_string(&self, code: usize, dimension: usize) -> Option<&str> {
        self.dimensions
            .get(dimension)
            .and_then(|d| d.tokens.get(code))
            .map(String::as_str)
    }

    /// Ordered `(token, code)` pairs of `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dimensionality()`.
    pub fn mappings(&self, dimension: usize) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.dimensions[dimension]
            .tokens
            .iter()
            .enumerate()
            .map(|(code, token)| (token.as_str(), code))
    }

    /// Export every dimension in order.
    pub fn export(&self) -> Vec<DimensionMapping> {
        (0..self.dimensionality())
            .map(|dimension| DimensionMapping {
                dimension,
                dimension_type: self.dimension_type(dimension),
                entries: self
                    .mappings(dimension)
                    .map(|(token, code)| MappingEntry {
                        token: token.to_string(),
                        code,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Rebuild a table from [`CategoryTable::export`] output.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidMapping` if dimensions are not listed as
    /// `0..n` in order, codes are not dense in first-seen order, a token
    /// repeats, or a numeric dimension carries entries.
    pub fn from_export(mappings: Vec<DimensionMapping>) -> Result<Self> {
        let mut table = CategoryTable::new(mappings.len());
        for (index, mapping) in mappings.into_iter().enumerate() {
            if mapping.dimension != index {
                return Err(LoadError::InvalidMapping(format!(
                    "expected dimension {}, found {}",
                    index, mapping.dimension
                )));
            }
            if mapping.dimension_type == DimensionType::Numeric && !mapping.entries.is_empty() {
                return Err(LoadError::InvalidMapping(format!(
                    "numeric dimension {} has {} entries",
                    index,
                    mapping.entries.len()
                )));
            }
            if mapping.dimension_type == DimensionType::Categorical {
                table.commit_categorical(index)?;
            }
            for (expected, entry) in mapping.entries.iter().enumerate() {
                let code = table.map_string(&entry.token, index)?;
                if code != entry.code || code != expected {
                    return Err(LoadError::InvalidMapping(format!(
                        "token '{}' has code {}, expected {}",
                        entry.token, entry.code, expected
                    ))
                    .with_context(format!("in dimension {}", index)));
                }
            }
        }
        Ok(table)
    }

    /// Fallible variant of [`CategoryTable::num_mappings`].
    pub fn try_num_mappings(&self, dimension: usize) -> Result<usize> {
        Ok(self.dimension(dimension)?.tokens.len())
    }
}
