//! Number entry keys

use super::{CalcState, Calculator};
use udcalc_parser::OpTag;
use udcalc_types::Domain;

impl Calculator {
    /// Type a digit. Digits outside the current base, or that would overflow
    /// the buffer, are ignored.
    pub fn digit(&mut self, digit: u8) -> bool {
        if u32::from(digit) >= self.buffer.base().radix() {
            log::debug!("digit {} ignored in base {}", digit, self.buffer.base());
            return false;
        }

        self.begin_typing();
        let accepted = self.buffer.handle_digit(digit);
        if !accepted {
            log::debug!("digit {} ignored: entry is full", digit);
        }
        accepted
    }

    pub fn decimal_point(&mut self) {
        if self.integer_entry() {
            log::debug!("decimal point ignored in {} mode", self.settings.mode);
            return;
        }
        self.begin_typing();
        self.buffer.handle_decimal_point();
    }

    /// EE: continue typing into the exponent
    pub fn exponent(&mut self) {
        if self.integer_entry() {
            log::debug!("EE ignored in {} mode", self.settings.mode);
            return;
        }
        self.begin_typing();
        self.buffer.handle_ee();
    }

    pub fn backspace(&mut self) {
        if self.state == CalcState::Typing {
            self.buffer.handle_backspace();
        } else {
            log::debug!("backspace ignored: nothing is being typed");
        }
    }

    /// +/-: flips the typed number, or negates X once it is complete
    pub fn toggle_sign(&mut self) {
        if self.state == CalcState::Typing {
            self.buffer.toggle_sign();
        } else if !self.context.awaiting_operand() {
            self.operator(OpTag::Negate);
        } else {
            // start a negative number
            self.begin_typing();
            self.buffer.toggle_sign();
        }
    }

    /// C: forget the typed number only
    pub fn clear_entry(&mut self) {
        self.buffer.perform_clear_entry();
        if self.state != CalcState::Typing {
            log::debug!("clear entry: nothing is being typed");
        }
    }

    fn begin_typing(&mut self) {
        if self.state != CalcState::Typing {
            self.buffer.perform_clear_entry();
            self.state = CalcState::Typing;
        }
    }

    fn integer_entry(&self) -> bool {
        self.settings.mode.domain() == Domain::Integer
    }
}
