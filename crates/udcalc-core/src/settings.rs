//! Persistable calculator settings

use serde::{Deserialize, Serialize};
use udcalc_types::{AngleUnit, Base, CalcMode, EntryStyle};

/// Everything a user can configure on the calculator. Memory and the
/// expression in progress are not settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    pub mode: CalcMode,
    /// Entry and display base; only honored in programmer mode
    pub base: Base,
    pub angle_unit: AngleUnit,
    pub entry_style: EntryStyle,
    pub thousands_separators: bool,
}

impl CalculatorSettings {
    pub fn with_mode(mut self, mode: CalcMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_base(mut self, base: Base) -> Self {
        self.base = base;
        self
    }

    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    pub fn with_entry_style(mut self, entry_style: EntryStyle) -> Self {
        self.entry_style = entry_style;
        self
    }

    pub fn with_thousands_separators(mut self, enabled: bool) -> Self {
        self.thousands_separators = enabled;
        self
    }

    /// Base actually used for entry and display
    pub fn effective_base(&self) -> Base {
        match self.mode {
            CalcMode::Programmer => self.base,
            CalcMode::Basic | CalcMode::Scientific => Base::Dec,
        }
    }
}
