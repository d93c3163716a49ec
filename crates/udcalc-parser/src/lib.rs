//! UDCalc expression layer
//!
//! Everything between a key press and a finished expression tree:
//!
//! - `ops`: static operator metadata and the shared registry
//! - `ast`: immutable expression tree and its pretty printer
//! - `input_buffer`: digit entry for a single number
//! - `frontend`: incremental algebraic / RPN tree builder
//! - `pest_parser`: reads printed expressions back into trees

pub mod ast;
pub mod error;
pub mod frontend;
pub mod input_buffer;
pub mod ops;
pub mod pest_parser;

// Re-export commonly used items
pub use ast::Node;
pub use error::{FrontendError, ParseError};
pub use frontend::{build_node, Frontend, FrontendContext, Pending};
pub use input_buffer::InputBuffer;
pub use ops::{Associativity, Availability, BuildRule, OpInfo, OpRegistry, OpTag, Placement, Precedence};
pub use pest_parser::{parse_expression, ParseOptions};
