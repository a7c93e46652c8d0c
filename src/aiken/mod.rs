//! Aiken-format question bank parsing.
//!
//! # Architecture
//!
//! 1. **Normalizer** - rewrites CRLF / CR line endings to LF
//! 2. **Parser** - single-question state machine producing tagged blocks
//! 3. **Results** - blocks folded into [`ParsedResults`] (valid questions,
//!    offending lines, failure count)
//!
//! # Example
//!
//! ```
//! use qbank::aiken::parse_aiken;
//!
//! let results = parse_aiken("What is 2+2?\nA. 3\nB. 4\nANSWER: B\n");
//! assert_eq!(results.questions.len(), 1);
//! assert_eq!(results.questions[0].answer, 'B');
//! assert_eq!(results.failed_count, 0);
//! ```

mod normalize;
mod parser;
pub mod template;
mod types;

pub use normalize::normalize_line_endings;
pub use parser::{classify_line, parse_aiken, AikenParser, LineKind};
pub use types::*;
