//! Pipeline orchestration for PatternScript.
//!
//! [`Session`] is the studio's high-level entry point: it owns the console
//! transcript and drives the four pipeline phases against `pat-lang`:
//!
//! 1. Parse
//! 2. GenerateTAC
//! 3. Optimize
//! 4. Interpret
//!
//! Any phase failure is caught at a single boundary, formatted as
//! `Error: <message>`, and appended to the transcript; remaining phases are
//! skipped. The interpret phase runs under an [`OutputCapture`] that is
//! finalized on every exit path.
//!
//! Runs are serialized by construction: [`Session::run`] takes `&mut self`
//! and blocks until the run - including every input prompt it raises - has
//! completed, so a second run can never observe another run's capture.

mod capture;

use log::{debug, error};

use pat_lang::{Interpreter, LangError, TacGenerator, optimize, parse};

pub use capture::OutputCapture;
pub use pat_lang::InputProvider;

/// Visual classification of one console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    Info,
    Tac,
    Success,
    Error,
    Plain,
}

/// One line-or-block of console output: text plus its style tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub text: String,
    pub style: EntryStyle,
}

impl ConsoleEntry {
    fn new(text: impl Into<String>, style: EntryStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Session limits.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Interpreter step fuse: a run exceeding this many statement
    /// executions fails with a runtime error.
    pub max_steps: u64,
    /// Cap on generated TAC instructions.
    pub max_tac_instructions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_steps: 1_000_000,
            max_tac_instructions: 10_000,
        }
    }
}

/// Pipeline runner plus the transcript it maintains.
pub struct Session {
    config: SessionConfig,
    transcript: Vec<ConsoleEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            transcript: Vec::new(),
        }
    }

    /// The transcript of the most recent run (empty before the first run or
    /// after [`clear_transcript`]).
    ///
    /// [`clear_transcript`]: Session::clear_transcript
    pub fn transcript(&self) -> &[ConsoleEntry] {
        &self.transcript
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Run the full pipeline over `source`, rebuilding the transcript.
    ///
    /// The transcript is cleared before anything else, so no entry from a
    /// previous run is ever visible alongside this run's entries. `input`
    /// resolves the script's `ask` statements; the call blocks until the
    /// run and every prompt it raises have completed.
    pub fn run(&mut self, source: &str, input: &mut dyn InputProvider) {
        self.transcript.clear();
        self.push("[Compiling...]", EntryStyle::Info);

        match self.run_phases(source, input) {
            Ok(output) => {
                if !output.is_empty() {
                    self.push(output, EntryStyle::Plain);
                }
                self.push("[Finished]", EntryStyle::Success);
            }
            Err(e) => {
                error!("run failed: {}", e);
                self.push(format!("Error: {}", e), EntryStyle::Error);
            }
        }
    }

    /// The four phases, any failure propagating to the single boundary in
    /// [`run`]. Returns the captured script output.
    ///
    /// [`run`]: Session::run
    fn run_phases(
        &mut self,
        source: &str,
        input: &mut dyn InputProvider,
    ) -> Result<String, LangError> {
        debug!("phase 1: parse ({} bytes)", source.len());
        let program = parse(source)?;

        debug!("phase 2: generate TAC");
        let tac = TacGenerator::new(self.config.max_tac_instructions).generate(&program)?;
        self.push("[Intermediate Code]", EntryStyle::Tac);
        for line in &tac {
            self.push(format!("  {}", line), EntryStyle::Tac);
        }
        self.push("-".repeat(30), EntryStyle::Info);

        debug!("phase 3: optimize");
        let program = optimize(program)?;

        debug!("phase 4: interpret ({} statements)", program.len());
        let mut capture = OutputCapture::new();
        let result = Interpreter::new(&mut capture, input, self.config.max_steps).run(&program);
        // The capture is finalized on both paths; on failure the partial
        // output is discarded with it.
        let output = capture.finish();
        result?;
        Ok(output)
    }

    fn push(&mut self, text: impl Into<String>, style: EntryStyle) {
        self.transcript.push(ConsoleEntry::new(text, style));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
