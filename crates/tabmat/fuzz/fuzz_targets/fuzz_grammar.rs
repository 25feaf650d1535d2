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

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabmat::grammar::{parse_generic_record, parse_number, parse_numeric_record, parse_token, split_fields};

/// Fuzz target for the field grammar.
///
/// The recognizers must never panic on arbitrary text (including multi-byte
/// characters next to delimiters), must never consume past the field, and the
/// record parsers must agree on the field count whenever they succeed.
fuzz_target!(|data: &[u8]| {
    let Some((&delimiter, rest)) = data.split_first() else {
        return;
    };
    if !delimiter.is_ascii() {
        return;
    }
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    if let Some((_, used)) = parse_number::<f64>(text, delimiter) {
        assert!(used <= text.len());
    }
    if let Some((token, used)) = parse_token(text, delimiter) {
        assert!(used <= text.len());
        assert!(token.len() <= used);
    }

    let mut raw = Vec::new();
    let mut numbers = Vec::new();
    let mut tokens = Vec::new();
    split_fields(text, delimiter, &mut raw);
    if parse_numeric_record::<i64>(text, delimiter, &mut numbers) {
        assert_eq!(numbers.len(), raw.len());
    }
    if parse_generic_record(text, delimiter, &mut tokens) {
        assert_eq!(tokens.len(), raw.len());
    }
});
