//! Text console sink
//!
//! Writes one line per sample step: the step index, a tab, then the
//! channel amplitudes as a bracketed list.
//!
//! ```text
//! 0	[5, 0]
//! 1	[5, 0]
//! 2	[5, 7]
//! ```

use core::fmt::{self, Write};

use pneuma_core::AmplitudeSink;

/// Sink that formats snapshots into any `fmt::Write`
pub struct ConsoleSink<W> {
    writer: W,
}

impl<W: Write> ConsoleSink<W> {
    /// Create a console sink
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the underlying writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Release the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AmplitudeSink for ConsoleSink<W> {
    type Error = fmt::Error;

    fn emit(&mut self, step: u32, amplitudes: &[u16]) -> Result<(), fmt::Error> {
        write!(self.writer, "{}\t[", step)?;
        for (i, amplitude) in amplitudes.iter().enumerate() {
            if i > 0 {
                self.writer.write_str(", ")?;
            }
            write!(self.writer, "{}", amplitude)?;
        }
        self.writer.write_str("]\n")
    }
}
