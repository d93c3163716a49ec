//! Digit entry state machine
//!
//! Accumulates the digits of a single number as the user types them. The
//! mantissa and exponent are kept as unsigned integers and only combined into
//! a [`Value`] when the number is finalized, so typing never loses precision
//! to intermediate floating point conversions.

use udcalc_types::{format_unsigned, group_digits, Base, ErrorKind, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    mantissa: u64,
    exponent: u64,
    /// Digits typed after the decimal point
    decimal_shift: u32,
    in_exponent_mode: bool,
    mantissa_negative: bool,
    exponent_negative: bool,
    has_hit_decimal: bool,
    base: Base,
    integer_mode: bool,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(Base::Dec, false)
    }
}

impl InputBuffer {
    pub fn new(base: Base, integer_mode: bool) -> Self {
        Self {
            mantissa: 0,
            exponent: 0,
            decimal_shift: 0,
            in_exponent_mode: false,
            mantissa_negative: false,
            exponent_negative: false,
            has_hit_decimal: false,
            base,
            integer_mode,
        }
    }

    /// Change the entry base and domain. Clears anything typed.
    pub fn configure(&mut self, base: Base, integer_mode: bool) {
        *self = Self::new(base, integer_mode);
    }

    /// Append a digit. Returns `false` if the digit was not accepted, either
    /// because it is invalid in the current base or because the active
    /// sub-buffer is full.
    pub fn handle_digit(&mut self, digit: u8) -> bool {
        let radix = self.base.radix() as u64;
        if u64::from(digit) >= radix {
            return false;
        }

        let target = if self.in_exponent_mode {
            &mut self.exponent
        } else {
            &mut self.mantissa
        };
        match target
            .checked_mul(radix)
            .and_then(|v| v.checked_add(u64::from(digit)))
        {
            Some(next) => *target = next,
            None => return false,
        }

        if !self.in_exponent_mode && self.has_hit_decimal {
            self.decimal_shift += 1;
        }
        true
    }

    pub fn handle_decimal_point(&mut self) {
        if self.integer_mode || self.has_hit_decimal || self.in_exponent_mode {
            return;
        }
        self.has_hit_decimal = true;
    }

    /// Switch to exponent entry
    pub fn handle_ee(&mut self) {
        if self.integer_mode {
            return;
        }
        self.in_exponent_mode = true;
    }

    pub fn handle_backspace(&mut self) {
        let radix = self.base.radix() as u64;

        if self.in_exponent_mode {
            if self.exponent == 0 {
                self.in_exponent_mode = false;
                self.exponent_negative = false;
            } else {
                self.exponent /= radix;
            }
        } else if self.has_hit_decimal && self.decimal_shift == 0 {
            self.has_hit_decimal = false;
        } else if self.decimal_shift > 0 {
            self.mantissa /= radix;
            self.decimal_shift -= 1;
        } else {
            self.mantissa /= radix;
        }
    }

    /// Flip the sign of whichever part is being typed
    pub fn toggle_sign(&mut self) {
        if self.in_exponent_mode {
            self.exponent_negative = !self.exponent_negative;
        } else {
            self.mantissa_negative = !self.mantissa_negative;
        }
    }

    pub fn perform_clear_entry(&mut self) {
        self.configure(self.base, self.integer_mode);
    }

    /// True when nothing has been typed since the last reset
    pub fn is_empty(&self) -> bool {
        self.mantissa == 0
            && self.decimal_shift == 0
            && !self.has_hit_decimal
            && !self.in_exponent_mode
    }

    /// Consume the typed number and reset for the next one
    pub fn finalize_value(&mut self) -> Value {
        let value = self.peek_value();
        self.perform_clear_entry();
        value
    }

    /// The value typed so far, without consuming it
    pub fn peek_value(&self) -> Value {
        if self.integer_mode {
            let bits = if self.mantissa_negative {
                self.mantissa.wrapping_neg()
            } else {
                self.mantissa
            };
            return Value::Integer(bits as i64);
        }

        let exponent = self.exponent.min(i32::MAX as u64) as i64;
        let exponent = if self.exponent_negative {
            -exponent
        } else {
            exponent
        };
        let net = exponent - i64::from(self.decimal_shift);

        let mut result = match scale(self.mantissa, self.base.radix(), net) {
            Some(result) => result,
            None => return Value::Error(ErrorKind::Unknown),
        };

        if result.is_infinite() {
            return Value::Error(ErrorKind::Overflow);
        }
        if self.mantissa != 0 && result == 0.0 {
            return Value::Error(ErrorKind::Underflow);
        }
        if self.mantissa_negative && result != 0.0 {
            result = -result;
        }
        Value::Double(result)
    }

    /// Text shown on the display while typing
    pub fn display_string(&self, show_thousands_separators: bool) -> String {
        let mut out = String::new();
        if self.mantissa_negative {
            out.push('-');
        }

        let mut digits = format_unsigned(self.mantissa, self.base, false);
        let shift = self.decimal_shift as usize;
        if self.has_hit_decimal && digits.len() < shift + 1 {
            digits = format!("{}{}", "0".repeat(shift + 1 - digits.len()), digits);
        }
        let (int_part, fraction) = digits.split_at(digits.len() - shift);

        if show_thousands_separators {
            out.push_str(&group_digits(int_part, self.base));
        } else {
            out.push_str(int_part);
        }
        if self.has_hit_decimal {
            out.push('.');
            out.push_str(fraction);
        }

        if self.in_exponent_mode {
            out.push('e');
            if self.exponent_negative {
                out.push('-');
            }
            out.push_str(&format_unsigned(self.exponent, self.base, false));
        }
        out
    }

    // Accessors

    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    pub fn decimal_shift(&self) -> u32 {
        self.decimal_shift
    }

    pub fn in_exponent_mode(&self) -> bool {
        self.in_exponent_mode
    }

    pub fn mantissa_negative(&self) -> bool {
        self.mantissa_negative
    }

    pub fn exponent_negative(&self) -> bool {
        self.exponent_negative
    }

    pub fn has_hit_decimal(&self) -> bool {
        self.has_hit_decimal
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn integer_mode(&self) -> bool {
        self.integer_mode
    }
}

/// `mantissa * radix^net`, rounded once. Decimal input goes through the
/// float parser; other radices scale in steps that keep each factor finite.
fn scale(mantissa: u64, radix: u32, net: i64) -> Option<f64> {
    if radix == 10 {
        return format!("{}e{}", mantissa, net).parse::<f64>().ok();
    }

    let radix = f64::from(radix);
    let mut result = mantissa as f64;
    let mut remaining = net;
    while remaining != 0 && result != 0.0 && result.is_finite() {
        let step = remaining.clamp(-64, 64);
        result *= radix.powi(step as i32);
        remaining -= step;
    }
    Some(result)
}
