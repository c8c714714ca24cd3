//! Terminal feedback sink.

use std::io::{self, Write};

use capchord_engine::Display;
use tracing::warn;

/// Prints each feedback line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDisplay;

impl Display for StdoutDisplay {
    fn display(&self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            warn!(error = %e, "failed to write feedback");
        }
    }
}
