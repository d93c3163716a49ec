//! Mode, base and entry style changes
//!
//! Every change here abandons the expression in progress: a tree built for
//! one domain or angle unit cannot be reused under another.

use super::{CalcState, Calculator};
use udcalc_parser::{FrontendContext, Node};
use udcalc_types::{AngleUnit, Base, CalcMode, Domain, EntryStyle, Value};

impl Calculator {
    pub fn set_mode(&mut self, mode: CalcMode) {
        log::debug!("mode {} -> {}", self.settings.mode, mode);
        self.settings.mode = mode;
        self.reset_expression();
    }

    /// Change the programmer-mode base. The value on the display is kept
    /// and shown in the new base. Outside programmer mode the base is only
    /// remembered.
    pub fn set_base(&mut self, base: Base) {
        if self.settings.mode != CalcMode::Programmer {
            log::debug!("base {} stored for programmer mode", base);
            self.settings.base = base;
            return;
        }

        let current = self.display_value().coerce(Domain::Integer);
        log::debug!("base {} -> {}", self.settings.base, base);
        self.settings.base = base;
        self.reset_expression();

        self.context.reset_to(Node::number(current));
        self.display = current;
        self.state = CalcState::ResultDisplayed;
    }

    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        log::debug!("angle unit {} -> {}", self.settings.angle_unit, unit);
        self.settings.angle_unit = unit;
        self.reset_expression();
    }

    pub fn set_entry_style(&mut self, style: EntryStyle) {
        log::debug!("entry style {} -> {}", self.settings.entry_style, style);
        self.settings.entry_style = style;
        self.reset_expression();
    }

    /// Display-only setting; the expression is kept
    pub fn set_thousands_separators(&mut self, enabled: bool) {
        self.settings.thousands_separators = enabled;
    }

    /// Drop the tree stack and typed number, rebuilt for the current settings
    fn reset_expression(&mut self) {
        let settings = self.settings;
        let domain = settings.mode.domain();

        self.context =
            FrontendContext::new(settings.mode, settings.angle_unit, settings.entry_style);
        self.buffer
            .configure(settings.effective_base(), domain == Domain::Integer);
        self.state = CalcState::Idle;
        self.replace_x = false;
        self.display = Value::zero(domain);
    }
}
