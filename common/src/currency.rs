//! Currency field rules: sanitizing keystrokes, parsing the way browsers'
//! `parseFloat` does, and rendering amounts in the fixed store currency.
//!
//! A currency input carries two representations. The visible text is the
//! formatted amount (`$1,234.50`) while the field is unfocused and the raw
//! number (`1234.5`) while it is being edited. The raw number is mirrored in
//! the element's `data-value` attribute. [`CurrencyField`] models the three
//! transitions (input, focus, blur) so the DOM layer only copies strings.

use std::sync::LazyLock;

use num_format::Locale;
use regex::Regex;

/// Locale used for digit grouping and the decimal mark (`es-MX`).
pub const CURRENCY_LOCALE: Locale = Locale::es_MX;

/// Symbol for Mexican pesos as rendered by `es-MX`.
pub const CURRENCY_SYMBOL: &str = "$";

/// Attribute that shadows the unformatted amount on the input element.
pub const RAW_VALUE_ATTRIBUTE: &str = "data-value";

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|\d+\.?\d*(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Keeps only ASCII digits and dots. Signs, letters, currency symbols and
/// grouping commas are dropped silently.
pub fn strip_non_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect()
}

/// Parses the longest numeric prefix of `raw` after leading whitespace.
///
/// Returns `None` where a browser would yield `NaN`: `"12.3.4"` parses as
/// `12.3`, `"7kg"` as `7`, `"$5"` as `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let prefix = NUMERIC_PREFIX.find(trimmed)?.as_str();
    match prefix.trim_start_matches(['+', '-']) {
        "Infinity" if prefix.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => prefix.parse::<f64>().ok(),
    }
}

/// `parseFloat(raw) || 0`: NaN, zero and negative zero all collapse to `0`.
pub fn parse_or_zero(raw: &str) -> f64 {
    parse_float(raw)
        .filter(|value| *value != 0.0 && !value.is_nan())
        .unwrap_or(0.0)
}

/// Renders `value` as store currency with exactly two fraction digits.
///
/// Rounding works on the shortest decimal form of `value`, half away from
/// zero, so `1.005` renders as `$1.01` even though the nearest `f64` is
/// slightly below it.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_nan() {
        return format!("{CURRENCY_SYMBOL}NaN");
    }
    if value.is_infinite() {
        return format!("{sign}{CURRENCY_SYMBOL}∞");
    }

    let (units, cents) = round_to_cents(&value.abs().to_string());
    format!(
        "{sign}{CURRENCY_SYMBOL}{}{}{cents}",
        group_thousands(&units),
        CURRENCY_LOCALE.decimal()
    )
}

/// Splits a plain decimal string (no sign, no exponent) into integer digits
/// and two fraction digits, rounding on the third fraction digit.
fn round_to_cents(magnitude: &str) -> (String, String) {
    let (units, fraction) = magnitude.split_once('.').unwrap_or((magnitude, ""));
    let fraction: Vec<u8> = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .collect();

    let mut digits: Vec<u8> = units.bytes().chain(fraction[..2].iter().copied()).collect();
    if fraction[2] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let digits: String = digits.into_iter().map(char::from).collect();
    let (units, cents) = digits.split_at(digits.len() - 2);
    (units.to_string(), cents.to_string())
}

fn group_thousands(units: &str) -> String {
    let separator = CURRENCY_LOCALE.separator();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Number-to-string conversion used for the `data-value` attribute.
///
/// Integral values drop the fraction (`5`, not `5.0`); everything else uses
/// the shortest representation that round-trips.
pub fn raw_value_string(value: f64) -> String {
    value.to_string()
}

/// Result of a transition that rewrites both representations of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyField {
    /// Parsed amount.
    pub value: f64,
    /// What goes into `data-value`.
    pub raw: String,
    /// What goes into the visible `value`.
    pub display: String,
}

impl CurrencyField {
    fn from_value(value: f64) -> Self {
        Self {
            value,
            raw: raw_value_string(value),
            display: format_currency(value),
        }
    }

    /// Handles an `input` event: the current text may already contain the
    /// previous rendering (`$1,23` after a deletion), so everything that is not
    /// a digit or a dot is stripped before parsing.
    pub fn on_input(text: &str) -> Self {
        Self::from_value(parse_or_zero(&strip_non_numeric(text)))
    }

    /// Handles a `blur` event. The text is parsed as typed, so a leading
    /// minus entered while focused survives.
    pub fn on_blur(text: &str) -> Self {
        Self::from_value(parse_or_zero(text))
    }

    /// Text shown while the field has focus: the stored raw value or nothing.
    pub fn on_focus(stored: Option<&str>) -> String {
        stored.unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_strips_stray_characters() {
        let field = CurrencyField::on_input("12a.3b4");
        assert_eq!(field.value, 12.34);
        assert_eq!(field.raw, "12.34");
        assert_eq!(field.display, "$12.34");
    }

    #[test]
    fn empty_or_garbage_input_is_zero() {
        for text in ["", "abc", "$", "..", "-"] {
            let field = CurrencyField::on_input(text);
            assert_eq!(field.value, 0.0, "input {text:?}");
            assert_eq!(field.raw, "0");
            assert_eq!(field.display, "$0.00");
        }
    }

    #[test]
    fn input_keeps_first_decimal_point_only() {
        let field = CurrencyField::on_input("1.2.3");
        assert_eq!(field.value, 1.2);
        assert_eq!(field.display, "$1.20");
    }

    #[test]
    fn input_drops_minus_sign() {
        assert_eq!(CurrencyField::on_input("-45").display, "$45.00");
    }

    #[test]
    fn retyping_over_formatted_text_reparses() {
        // "$1,234.50" plus a typed "7" at the end.
        let field = CurrencyField::on_input("$1,234.507");
        assert_eq!(field.raw, "1234.507");
        assert_eq!(field.display, "$1,234.51");
    }

    #[test]
    fn focus_then_blur_round_trip() {
        let typed = CurrencyField::on_input("12.34");
        let focused = CurrencyField::on_focus(Some(&typed.raw));
        assert_eq!(focused, "12.34");
        let blurred = CurrencyField::on_blur(&focused);
        assert_eq!(blurred.display, "$12.34");
        assert_eq!(blurred.raw, "12.34");
    }

    #[test]
    fn focus_without_stored_value_is_empty() {
        assert_eq!(CurrencyField::on_focus(None), "");
    }

    #[test]
    fn blur_keeps_leading_minus() {
        let field = CurrencyField::on_blur("-5");
        assert_eq!(field.raw, "-5");
        assert_eq!(field.display, "-$5.00");
    }

    #[test]
    fn blur_of_formatted_text_is_zero() {
        // Text starting with the symbol does not parse.
        assert_eq!(CurrencyField::on_blur("$12.34").display, "$0.00");
    }

    #[test]
    fn parse_float_takes_longest_prefix() {
        assert_eq!(parse_float("  42kg"), Some(42.0));
        assert_eq!(parse_float("3."), Some(3.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("1e3x"), Some(1000.0));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float("x1"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn negative_zero_collapses() {
        assert_eq!(parse_or_zero("-0").to_string(), "0");
    }

    #[test]
    fn formats_with_grouping_and_two_decimals() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn half_cents_round_up_on_the_decimal_form() {
        assert_eq!(CurrencyField::on_input("1.005").display, "$1.01");
        assert_eq!(CurrencyField::on_input("2.675").display, "$2.68");
        assert_eq!(CurrencyField::on_input("1.015").display, "$1.02");
        assert_eq!(CurrencyField::on_input("1.004").display, "$1.00");
        assert_eq!(CurrencyField::on_input("0.995").display, "$1.00");
        assert_eq!(CurrencyField::on_input("99999.995").display, "$100,000.00");
        assert_eq!(CurrencyField::on_blur("-2.675").display, "-$2.68");
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        assert_eq!(
            CurrencyField::on_input("100000000000000000000").display,
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(format_currency(123456789012345680000.0), "$123,456,789,012,345,680,000.00");
    }

    #[test]
    fn tiny_amounts_round_to_zero_cents() {
        assert_eq!(format_currency(0.0000001), "$0.00");
        assert_eq!(format_currency(0.005), "$0.01");
    }

    #[test]
    fn formats_non_finite_values() {
        assert_eq!(format_currency(f64::INFINITY), "$∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn raw_value_has_no_trailing_fraction() {
        assert_eq!(raw_value_string(5.0), "5");
        assert_eq!(raw_value_string(0.1 + 0.2), "0.30000000000000004");
    }
}
