//! Display formatting for calculator values
//!
//! Integers render in any [`Base`]; non-decimal bases show the 64-bit two's
//! complement pattern, the way programmer calculators do. Doubles render in
//! decimal, rounded to [`SIGNIFICANT_DIGITS`] unless a fixed number of
//! decimal places is requested.

use crate::mode::Base;
use crate::value::Value;

/// Significant digits shown for doubles when no precision is requested
pub const SIGNIFICANT_DIGITS: i32 = 15;

/// Magnitudes at or above this switch to scientific notation
const SCIENTIFIC_UPPER: f64 = 1e16;
/// Non-zero magnitudes below this switch to scientific notation
const SCIENTIFIC_LOWER: f64 = 1e-9;

/// Render raw bits in positional notation
pub fn format_unsigned(bits: u64, base: Base, separators: bool) -> String {
    let radix = base.radix() as u64;
    let mut remaining = bits;
    let mut digits = Vec::new();
    loop {
        digits.push(base.digit_char((remaining % radix) as u32));
        remaining /= radix;
        if remaining == 0 {
            break;
        }
    }
    digits.reverse();
    let text: String = digits.into_iter().collect();

    if separators {
        group_digits(&text, base)
    } else {
        text
    }
}

/// Render a programmer-mode integer
pub fn format_integer(value: i64, base: Base, separators: bool) -> String {
    match base {
        Base::Dec if value < 0 => {
            format!("-{}", format_unsigned(value.unsigned_abs(), base, separators))
        }
        // two's complement bits for the other bases
        _ => format_unsigned(value as u64, base, separators),
    }
}

/// Render a double in decimal
pub fn format_double(value: f64, separators: bool, decimal_places: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(SCIENTIFIC_LOWER..SCIENTIFIC_UPPER).contains(&magnitude) {
        let precision = decimal_places.unwrap_or((SIGNIFICANT_DIGITS - 1) as usize);
        let text = format!("{:.*e}", precision, value);
        return trim_scientific(&text);
    }

    let decimals = decimal_places.unwrap_or_else(|| {
        let exponent = magnitude.log10().floor() as i32;
        (SIGNIFICANT_DIGITS - 1 - exponent).clamp(0, 20) as usize
    });
    let mut text = trim_fraction(&format!("{:.*}", decimals, value));
    if text == "-0" {
        text = "0".to_string();
    }

    if separators {
        group_decimal(&text)
    } else {
        text
    }
}

/// Render any value for the display
pub fn format_value(
    value: &Value,
    base: Base,
    separators: bool,
    decimal_places: Option<usize>,
) -> String {
    match value {
        Value::Double(d) if base == Base::Dec => format_double(*d, separators, decimal_places),
        Value::Double(_) => format_integer(value.as_int(), base, separators),
        Value::Integer(i) => format_integer(*i, base, separators),
        Value::Error(kind) => kind.message().to_string(),
    }
}

/// Insert the base's separator every `group_size` digits, counting from the right
pub fn group_digits(digits: &str, base: Base) -> String {
    let size = base.group_size();
    let separator = base.separator();
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            out.push(separator);
        }
        out.push(*c);
    }
    out
}

/// Group only the integer part of a decimal string like "-1234.5"
fn group_decimal(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, fraction) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };
    format!("{}{}{}", sign, group_digits(int_part, Base::Dec), fraction)
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

fn trim_scientific(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ErrorKind;

    #[test]
    fn test_integer_in_every_base() {
        assert_eq!(format_integer(255, Base::Bin, false), "11111111");
        assert_eq!(format_integer(255, Base::Oct, false), "377");
        assert_eq!(format_integer(255, Base::Dec, false), "255");
        assert_eq!(format_integer(255, Base::Hex, false), "FF");
        assert_eq!(format_integer(0, Base::Hex, false), "0");
    }

    #[test]
    fn test_negative_integers() {
        assert_eq!(format_integer(-1, Base::Dec, false), "-1");
        assert_eq!(format_integer(-1, Base::Hex, false), "FFFFFFFFFFFFFFFF");
        assert_eq!(format_integer(i64::MIN, Base::Dec, false), "-9223372036854775808");
    }

    #[test]
    fn test_separators() {
        assert_eq!(format_integer(1234567, Base::Dec, true), "1,234,567");
        assert_eq!(format_integer(-1234, Base::Dec, true), "-1,234");
        assert_eq!(format_integer(0xABCDE, Base::Hex, true), "A BCDE");
        assert_eq!(format_integer(0b101010101, Base::Bin, true), "1 0101 0101");
        assert_eq!(format_double(1234567.25, true, None), "1,234,567.25");
    }

    #[test]
    fn test_double_rounding() {
        assert_eq!(format_double(0.1 + 0.2, false, None), "0.3");
        assert_eq!(format_double(14.0, false, None), "14");
        assert_eq!(format_double(-2.5, false, None), "-2.5");
        assert_eq!(format_double(1.0 / 3.0, false, Some(4)), "0.3333");
        assert_eq!(format_double(-0.0001, false, Some(2)), "0");
    }

    #[test]
    fn test_double_scientific() {
        assert_eq!(format_double(1e20, false, None), "1e20");
        assert_eq!(format_double(-2.5e-12, false, None), "-2.5e-12");
    }

    #[test]
    fn test_special_doubles() {
        assert_eq!(format_double(f64::NAN, false, None), "NaN");
        assert_eq!(format_double(f64::NEG_INFINITY, false, None), "-Infinity");
    }

    #[test]
    fn test_format_value_dispatch() {
        assert_eq!(format_value(&Value::Integer(255), Base::Hex, false, None), "FF");
        assert_eq!(format_value(&Value::Double(3.0), Base::Dec, false, None), "3");
        assert_eq!(
            format_value(&Value::Error(ErrorKind::DivideByZero), Base::Dec, false, None),
            "Cannot divide by zero"
        );
    }
}
