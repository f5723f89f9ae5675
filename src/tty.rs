//! Terminal status output for the CLI.

use std::io::{self, IsTerminal};

/// Print a status line to stderr when stderr is a terminal.
pub fn status(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}", message);
    }
}
