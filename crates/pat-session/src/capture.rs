//! Output capture for the interpret phase.
//!
//! The script's `plot` output never goes to a process-wide channel: the
//! interpreter writes through an explicit sink, and this type is that sink
//! for the duration of one run. Create it before interpretation, hand it to
//! the interpreter as `&mut dyn fmt::Write`, and call [`finish`] on every
//! exit path - success or failure - to close the capture scope. Because the
//! sink is per-run state rather than a swapped global, a failed run cannot
//! leave anything redirected.
//!
//! [`finish`]: OutputCapture::finish

use std::fmt;

/// In-memory collector for everything a script writes during one run.
#[derive(Debug, Default)]
pub struct OutputCapture {
    buf: String,
}

impl OutputCapture {
    /// Open a capture scope for one run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of captured bytes so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Close the scope and yield the captured text verbatim, embedded line
    /// breaks included.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl fmt::Write for OutputCapture {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}
