//! Generic utility primitives with zero domain knowledge.
//!
//! - `arrays` - Sequence helpers (set operations, batching, ranges)
//! - `command` - Command execution with error handling
//! - `dates` - UTC date arithmetic and snapping
//! - `io` - File I/O with consistent error handling
//! - `parser` - Path resolution and literal heading matching
//! - `strings` - Case conversion and string inspection
//! - `validation` - Input validation helpers

pub mod arrays;
pub mod command;
pub mod dates;
pub mod io;
pub mod parser;
pub mod strings;
pub mod validation;
