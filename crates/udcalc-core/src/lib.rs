//! UDCalc calculator core
//!
//! Ties the expression layer and the VM together behind a key-press driven
//! [`Calculator`].
//!
//! - `calculator`: state machine, display and stack queries
//! - `event`: input events for [`Calculator::handle`]
//! - `listener`: result notification and transcript lines
//! - `settings`: persistable mode settings
//! - `error`: error type for tree evaluation

pub mod calculator;
pub mod error;
pub mod event;
pub mod listener;
pub mod settings;

// Re-exports
pub use calculator::{CalcState, Calculator};
pub use error::CalcError;
pub use event::{Event, MemoryOp};
pub use listener::{Evaluation, ResultListener, Transcript, TranscriptLine};
pub use settings::CalculatorSettings;
