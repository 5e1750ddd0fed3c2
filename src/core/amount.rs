use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// A decimal amount carried verbatim as the caller supplied it.
///
/// AEAT's fingerprint and XML payloads are byte-sensitive, so amounts are
/// never reformatted once accepted: this type stores the original string and
/// only ever parses into [`rust_decimal::Decimal`] for tolerance comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    /// Parse a monetary amount: optional leading `-`, up to 12 integer
    /// digits, exactly two fractional digits.
    pub fn parse(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if validate_decimal_string(&s, 12) {
            Ok(Self(s))
        } else {
            Err(format!(
                "'{s}' is not a valid amount (expected optional '-', up to 12 integer digits, exactly 2 fractional digits)"
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_str(&self.0).expect("Amount invariant: stores only validated decimal strings")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Amount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A tax rate carried verbatim: optional leading `-`, up to 3 integer
/// digits, exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rate(String);

impl Rate {
    pub fn parse(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if validate_decimal_string(&s, 3) {
            Ok(Self(s))
        } else {
            Err(format!(
                "'{s}' is not a valid rate (expected optional '-', up to 3 integer digits, exactly 2 fractional digits)"
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_str(&self.0).expect("Rate invariant: stores only validated decimal strings")
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate `-?\d{1,max_int}\.\d{2}` without pulling in a regex dependency.
fn validate_decimal_string(s: &str, max_integer_digits: usize) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    let Some((int_part, frac_part)) = rest.split_once('.') else {
        return false;
    };
    if int_part.is_empty() || int_part.len() > max_integer_digits {
        return false;
    }
    if frac_part.len() != 2 {
        return false;
    }
    int_part.bytes().all(|b| b.is_ascii_digit()) && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// `|actual - expected| <= tolerance`, compared as exact decimals.
pub fn within_tolerance(actual: Decimal, expected: Decimal, tolerance: Decimal) -> bool {
    (actual - expected).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_amounts() {
        assert!(Amount::parse("10.00").is_ok());
        assert!(Amount::parse("-0.01").is_ok());
        assert!(Amount::parse("999999999999.99").is_ok());
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(Amount::parse("10").is_err());
        assert!(Amount::parse("10.0").is_err());
        assert!(Amount::parse("10.000").is_err());
        assert!(Amount::parse("1234567890123.00").is_err());
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("-.00").is_err());
    }

    #[test]
    fn rate_caps_integer_digits_at_three() {
        assert!(Rate::parse("100.00").is_ok());
        assert!(Rate::parse("1000.00").is_err());
    }

    #[test]
    fn tolerance_is_inclusive() {
        let d = |s: &str| Decimal::from_str(s).unwrap();
        assert!(within_tolerance(d("2.10"), d("2.10"), d("0.02")));
        assert!(within_tolerance(d("56.90"), d("56.91"), d("0.02")));
        assert!(!within_tolerance(d("56.90"), d("56.93"), d("0.02")));
    }
}
