pub mod helpers;

pub mod basic_operations;
pub mod compiler;
pub mod errors;
pub mod programmer;
pub mod scientific;
