//! Permissive number parsing for field values and declared bounds.
//!
//! Mirrors what a browser's `parseFloat` accepts: leading whitespace is
//! skipped and the longest numeric prefix wins, so `"12px"` reads as 12.
//! Anything without a numeric prefix reads as absent.

use serde::{Deserialize, Serialize};

use pageguard_model::PageHost;

/// Declared bounds of a numeric field. Either end may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Read `min`/`max` from the field's attributes.
    pub fn from_field<H: PageHost>(host: &H, field: &H::Element) -> Self {
        let read = |name: &str| {
            host.attribute(field, name)
                .as_deref()
                .and_then(parse_number)
        };
        Self {
            min: read("min"),
            max: read("max"),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Which end `value` falls outside of, if any.
    pub fn check(&self, value: f64) -> Option<RangeViolation> {
        if self.min.is_some_and(|min| value < min) {
            Some(RangeViolation::BelowMinimum)
        } else if self.max.is_some_and(|max| value > max) {
            Some(RangeViolation::AboveMaximum)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeViolation {
    BelowMinimum,
    AboveMaximum,
}

/// Parse the longest numeric prefix of `input`.
pub fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace('+', "").parse::<f64>().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_number("10"), Some(10.0));
        assert_eq!(parse_number("-2.5"), Some(-2.5));
        assert_eq!(parse_number("+3"), Some(3.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn prefixes_and_whitespace() {
        assert_eq!(parse_number("  7 "), Some(7.0));
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("1e+"), Some(1.0));
        assert_eq!(parse_number("3.14.15"), Some(3.14));
    }

    #[test]
    fn infinity_is_accepted() {
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("+Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn no_numeric_prefix() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn bounds_check_each_end_independently() {
        let both = Bounds::new(Some(1.0), Some(10.0));
        assert_eq!(both.check(0.0), Some(RangeViolation::BelowMinimum));
        assert_eq!(both.check(11.0), Some(RangeViolation::AboveMaximum));
        assert_eq!(both.check(1.0), None);
        assert_eq!(both.check(10.0), None);

        let max_only = Bounds::new(None, Some(0.0));
        assert_eq!(max_only.check(1.0), Some(RangeViolation::AboveMaximum));
        assert_eq!(max_only.check(-100.0), None);

        assert!(Bounds::default().is_unbounded());
        assert_eq!(Bounds::default().check(f64::MAX), None);
    }
}
