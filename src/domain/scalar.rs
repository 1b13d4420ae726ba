// Cell values and records produced by ingestion
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric literals must stay strictly below 2^53 in magnitude to be read as
/// numbers; anything larger stays text.
const EXACT_FLOAT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// One row: column name to cell value. Missing cells are absent keys.
pub type Record = BTreeMap<String, Scalar>;

/// Equality filters: column name to required value.
pub type Filters = BTreeMap<String, Scalar>;

impl Scalar {
    /// Dynamic typing for delimited-text cells.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return Scalar::Null;
        }

        match raw {
            "true" | "TRUE" => return Scalar::Bool(true),
            "false" | "FALSE" => return Scalar::Bool(false),
            _ => {}
        }

        if is_numeric_literal(raw) {
            if let Ok(value) = raw.trim().parse::<f64>() {
                if value.is_finite() && value.abs() < EXACT_FLOAT_LIMIT {
                    return Scalar::Number(value);
                }
            }
        }

        Scalar::Text(raw.to_string())
    }

    /// Null and the empty string both mean "no value selected".
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// `-?(digits[.] | .digits | digits.digits)([eE][-+]?digits)?`, surrounding whitespace allowed
fn is_numeric_literal(raw: &str) -> bool {
    let bytes = raw.trim().as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
