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

//! Numeric element kinds.
//!
//! The element type of the output matrix selects which literal grammar the
//! numeric recognizer accepts: integral types read integer literals, floating
//! point types read real literals.

use std::fmt;

/// Literal grammar selected by an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NumericKind {
    /// Optional sign followed by decimal digits.
    Integer,
    /// Optional sign, digits, fraction and exponent, plus `inf` and `nan`.
    Real,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Integer => write!(f, "integer"),
            NumericKind::Real => write!(f, "real"),
        }
    }
}

/// A cell type of the output matrix.
///
/// # Examples
///
/// ```
/// use tabmat::{Element, NumericKind};
///
/// assert_eq!(<i32 as Element>::KIND, NumericKind::Integer);
/// assert_eq!(i32::parse_literal("-42"), Some(-42));
/// assert_eq!(i32::parse_literal("4.2"), None);
///
/// assert_eq!(f64::parse_literal("1.5e3"), Some(1500.0));
/// assert_eq!(u8::from_code(300), None);
/// ```
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Literal grammar accepted for this type.
    const KIND: NumericKind;

    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Parse a complete literal. `literal` carries no surrounding blanks.
    fn parse_literal(literal: &str) -> Option<Self>;

    /// Convert a category code into a cell value, if it fits.
    fn from_code(code: usize) -> Option<Self>;
}

macro_rules! impl_integer_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: NumericKind = NumericKind::Integer;
                const NAME: &'static str = stringify!($t);

                #[inline]
                fn parse_literal(literal: &str) -> Option<Self> {
                    literal.parse().ok()
                }

                #[inline]
                fn from_code(code: usize) -> Option<Self> {
                    <$t>::try_from(code).ok()
                }
            }
        )*
    };
}

macro_rules! impl_real_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: NumericKind = NumericKind::Real;
                const NAME: &'static str = stringify!($t);

                #[inline]
                fn parse_literal(literal: &str) -> Option<Self> {
                    literal.parse().ok()
                }

                #[inline]
                fn from_code(code: usize) -> Option<Self> {
                    Some(code as $t)
                }
            }
        )*
    };
}

impl_integer_element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_real_element!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Integer literals ====================

    #[test]
    fn test_integer_signs() {
        assert_eq!(i64::parse_literal("17"), Some(17));
        assert_eq!(i64::parse_literal("+17"), Some(17));
        assert_eq!(i64::parse_literal("-17"), Some(-17));
    }

    #[test]
    fn test_integer_rejects_real_literals() {
        assert_eq!(i64::parse_literal("1.0"), None);
        assert_eq!(i64::parse_literal("1e3"), None);
        assert_eq!(i64::parse_literal("nan"), None);
    }

    #[test]
    fn test_integer_rejects_garbage() {
        assert_eq!(i32::parse_literal(""), None);
        assert_eq!(i32::parse_literal("-"), None);
        assert_eq!(i32::parse_literal("12a"), None);
        assert_eq!(i32::parse_literal("1 2"), None);
    }

    #[test]
    fn test_integer_overflow_is_not_numeric() {
        assert_eq!(i8::parse_literal("127"), Some(127));
        assert_eq!(i8::parse_literal("128"), None);
        assert_eq!(u8::parse_literal("-1"), None);
    }

    // ==================== Real literals ====================

    #[test]
    fn test_real_forms() {
        assert_eq!(f64::parse_literal("3"), Some(3.0));
        assert_eq!(f64::parse_literal("-2.5"), Some(-2.5));
        assert_eq!(f64::parse_literal(".5"), Some(0.5));
        assert_eq!(f64::parse_literal("5."), Some(5.0));
        assert_eq!(f64::parse_literal("1E-2"), Some(0.01));
        assert_eq!(f32::parse_literal("+4.25"), Some(4.25));
    }

    #[test]
    fn test_real_special_values() {
        assert_eq!(f64::parse_literal("inf"), Some(f64::INFINITY));
        assert_eq!(f64::parse_literal("-infinity"), Some(f64::NEG_INFINITY));
        assert!(f64::parse_literal("NaN").is_some_and(f64::is_nan));
    }

    #[test]
    fn test_real_rejects_garbage() {
        assert_eq!(f64::parse_literal("."), None);
        assert_eq!(f64::parse_literal("e5"), None);
        assert_eq!(f64::parse_literal("1.2.3"), None);
        assert_eq!(f64::parse_literal("red"), None);
    }

    // ==================== Category codes ====================

    #[test]
    fn test_from_code_fits() {
        assert_eq!(u8::from_code(255), Some(255));
        assert_eq!(i16::from_code(7), Some(7));
        assert_eq!(f64::from_code(3), Some(3.0));
    }

    #[test]
    fn test_from_code_overflow() {
        assert_eq!(u8::from_code(256), None);
        assert_eq!(i8::from_code(128), None);
    }

    #[test]
    fn test_kind_and_name() {
        assert_eq!(<u16 as Element>::KIND, NumericKind::Integer);
        assert_eq!(<f32 as Element>::KIND, NumericKind::Real);
        assert_eq!(<u16 as Element>::NAME, "u16");
        assert_eq!(NumericKind::Real.to_string(), "real");
    }
}
