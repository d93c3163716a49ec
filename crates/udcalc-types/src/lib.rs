pub mod format;
pub mod mode;
pub mod value;

// Re-exports
pub use format::{format_double, format_integer, format_unsigned, format_value, group_digits};
pub use mode::{AngleUnit, Base, CalcMode, Domain, EntryStyle, ParseModeError};
pub use value::{ErrorKind, Value};
