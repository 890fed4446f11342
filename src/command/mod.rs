//! Command surface
//!
//! Tokenizes and parses one command line at a time, runs it against the
//! player and keeps a single-level undo record.

mod dispatcher;
mod help;
mod parser;
mod undo;

pub use dispatcher::{CommandDispatcher, Response};
pub use help::help_lines;
pub use parser::{Command, ParseError};
pub use undo::{Inverse, UndoLedger, UndoRecord};
