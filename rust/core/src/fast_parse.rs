// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric field parsing
//!
//! Field values are already trimmed by the tokenizer, so a value is numeric
//! only when the whole token is a number.

/// Parse a complete field as `f64`.
///
/// Returns `None` for empty text, trailing garbage (`3m`), keywords such as
/// `autocalculate`, and non-finite values.
#[inline]
pub fn parse_number(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    match fast_float::parse::<f64, _>(field) {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parse three consecutive fields as a coordinate triple
#[inline]
pub fn parse_triple(fields: &[String]) -> Option<[f64; 3]> {
    match fields {
        [x, y, z, ..] => Some([parse_number(x)?, parse_number(y)?, parse_number(z)?]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number("-2.5"), Some(-2.5));
        assert_eq!(parse_number("1e-3"), Some(0.001));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("3m"), None);
        assert_eq!(parse_number("autocalculate"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_triple() {
        let fields: Vec<String> = ["1", "2", "3", "x"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_triple(&fields), Some([1.0, 2.0, 3.0]));
        assert_eq!(parse_triple(&fields[1..]), None);
        assert_eq!(parse_triple(&fields[2..]), None);
    }
}
