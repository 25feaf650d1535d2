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

//! Dense output matrix.

use std::ops::{Index, IndexMut};

/// Dense 2-D matrix stored row by row.
///
/// The shape is fixed once the loader has sized it; cells are addressed as
/// `(row, col)`.
///
/// # Examples
///
/// ```
/// use tabmat::Matrix;
///
/// let mut m = Matrix::<f64>::new(2, 3);
/// m[(1, 2)] = 6.0;
/// assert_eq!(m.row(1), &[0.0, 0.0, 6.0]);
///
/// let t = m.transpose();
/// assert_eq!(t.shape(), (3, 2));
/// assert_eq!(t[(2, 1)], 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T> {
    data: Vec<T>,
    n_rows: usize,
    n_cols: usize,
}

impl<T: Copy + Default> Matrix<T> {
    /// Create a default-filled matrix.
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self::filled(n_rows, n_cols, T::default())
    }
}

impl<T: Copy> Matrix<T> {
    /// Create a matrix with every cell set to `value`.
    pub fn filled(n_rows: usize, n_cols: usize, value: T) -> Self {
        Self {
            data: vec![value; n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }

    /// Create a matrix from row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n_rows * n_cols`.
    pub fn from_vec(data: Vec<T>, n_rows: usize, n_cols: usize) -> Self {
        assert_eq!(
            data.len(),
            n_rows * n_cols,
            "Data length {} does not match dimensions {}x{}",
            data.len(),
            n_rows,
            n_cols
        );
        Self {
            data,
            n_rows,
            n_cols,
        }
    }

    /// Build a matrix from equally long rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            assert_eq!(row.as_ref().len(), n_cols, "Ragged rows");
            data.extend_from_slice(row.as_ref());
        }
        Self::from_vec(data, rows.len(), n_cols)
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// One row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.n_rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.n_rows, "Row {} out of range ({} rows)", row, self.n_rows);
        &self.data[row * self.n_cols..(row + 1) * self.n_cols]
    }

    /// One row as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.n_rows()`.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.n_rows, "Row {} out of range ({} rows)", row, self.n_rows);
        &mut self.data[row * self.n_cols..(row + 1) * self.n_cols]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.n_rows).map(move |r| self.row(r))
    }

    /// Underlying row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.n_cols {
            for r in 0..self.n_rows {
                data.push(self.data[r * self.n_cols + c]);
            }
        }
        Self {
            data,
            n_rows: self.n_cols,
            n_cols: self.n_rows,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.n_rows && col < self.n_cols,
            "Cell ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.n_rows,
            self.n_cols
        );
        &self.data[row * self.n_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.n_rows && col < self.n_cols,
            "Cell ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.n_rows,
            self.n_cols
        );
        &mut self.data[row * self.n_cols + col]
    }
}
