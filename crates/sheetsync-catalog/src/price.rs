use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("valid regex"));

static LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)").expect("valid regex"));

/// A price cell as it arrives from a spreadsheet: text or a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceInput<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for PriceInput<'a> {
    fn from(value: &'a str) -> Self {
        PriceInput::Text(value)
    }
}

impl From<f64> for PriceInput<'_> {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

/// Formats a price cell as a two-decimal string.
///
/// Empty text, zero and NaN yield `""`. Text is stripped of everything but
/// digits, `.` and `-`, then the longest leading number is parsed, so
/// `"$1,234.5"` becomes `"1234.50"` and `"1.234.56"` becomes `"1.23"`.
/// Text with no leading number yields `""`. Halves round away from zero.
///
/// The sign follows the parsed value, not the rounded one: `"-0"` gives
/// `"0.00"` and `"-0.001"` gives `"-0.00"`.
#[must_use]
pub fn format_price<'a>(value: impl Into<PriceInput<'a>>) -> String {
    let number = match value.into() {
        PriceInput::Number(n) if n == 0.0 || n.is_nan() => return String::new(),
        PriceInput::Number(n) => n,
        PriceInput::Text("") => return String::new(),
        PriceInput::Text(text) => match parse_leading_number(text) {
            Some(n) => n,
            None => return String::new(),
        },
    };

    if !number.is_finite() {
        return String::new();
    }

    let magnitude = number.abs();
    let digits = match Decimal::from_f64_retain(magnitude) {
        Some(decimal) => {
            let rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        }
        None => format!("{magnitude:.2}"),
    };
    if number < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

fn parse_leading_number(text: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(text, "");
    let matched = LEADING_FLOAT.find(&cleaned)?;
    matched.as_str().parse::<f64>().ok()
}
