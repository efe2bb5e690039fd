//! Output formatting for CLI commands.
//!
//! Progress and summaries go to stdout as text, or as a single JSON document
//! with `--json`. Errors always go to stderr.

use anyhow::Result;
use chrono::{DateTime, Utc};
use mcassets_core::{ObjectHash, Progress};
use serde::Serialize;
use std::io::{self, Write};

/// Exit status for any failed run.
pub const RESULT_FAILURE: u8 = 1;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writer for command output with format abstraction.
pub struct OutputWriter<O: Write = io::StdoutLock<'static>, E: Write = io::Stderr> {
    format: OutputFormat,
    stdout: O,
    stderr: E,
}

impl OutputWriter {
    /// Create a new OutputWriter on the process's stdout and stderr.
    pub fn new(json: bool) -> Self {
        Self::with_streams(json, io::stdout().lock(), io::stderr())
    }
}

impl<O: Write, E: Write> OutputWriter<O, E> {
    /// Create an OutputWriter on arbitrary streams.
    pub fn with_streams(json: bool, stdout: O, stderr: E) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            stdout,
            stderr,
        }
    }

    /// Give back the underlying streams.
    #[cfg(test)]
    pub fn into_streams(self) -> (O, E) {
        (self.stdout, self.stderr)
    }

    /// Stream for the version list and prompt.
    ///
    /// Stderr in JSON mode, so stdout only carries the JSON document.
    pub fn prompt_stream(&mut self) -> &mut dyn Write {
        match self.format {
            OutputFormat::Json => &mut self.stderr,
            OutputFormat::Text => &mut self.stdout,
        }
    }

    /// Per-object progress printer on stdout; silent in JSON mode.
    pub fn progress(&mut self) -> ProgressPrinter<&mut O> {
        match self.format {
            OutputFormat::Json => ProgressPrinter::disabled(),
            OutputFormat::Text => ProgressPrinter::new(&mut self.stdout),
        }
    }

    /// Write output using the configured format.
    ///
    /// The `data` parameter must be a serializable struct that includes
    /// `success: bool` and `result_code: u8` fields.
    ///
    /// The `text_fn` closure is called only in text mode to generate the
    /// human-readable output.
    pub fn write<T: Serialize>(
        &mut self,
        data: &T,
        text_fn: impl FnOnce() -> String,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                writeln!(self.stdout, "{}", json)?;
            }
            OutputFormat::Text => {
                let text = text_fn();
                if !text.is_empty() {
                    write!(self.stdout, "{}", text)?;
                }
            }
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Write an error message to stderr.
    ///
    /// In JSON mode, writes a JSON error object with success=false.
    /// In text mode, writes the error message directly.
    pub fn write_error(&mut self, error: &anyhow::Error, result_code: u8) {
        match self.format {
            OutputFormat::Json => {
                let error_output = ErrorOutput {
                    success: false,
                    result_code,
                    error: format!("{:#}", error),
                };
                if let Ok(json) = serde_json::to_string_pretty(&error_output) {
                    let _ = writeln!(self.stderr, "{}", json);
                }
            }
            OutputFormat::Text => {
                let _ = writeln!(self.stderr, "Error: {:#}", error);
            }
        }
        let _ = self.stderr.flush();
    }
}

/// Prints `<hash>: <logical path>` for each object, flushing every line.
pub struct ProgressPrinter<W: Write> {
    out: Option<W>,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out: Some(out) }
    }

    pub fn disabled() -> Self {
        Self { out: None }
    }
}

impl<W: Write> Progress for ProgressPrinter<W> {
    fn on_object(&mut self, hash: &ObjectHash, logical_path: &str) -> io::Result<()> {
        if let Some(out) = self.out.as_mut() {
            writeln!(out, "{}: {}", hash, logical_path)?;
            out.flush()?;
        }
        Ok(())
    }
}

// ============================================================================
// Data Transfer Objects (DTOs) for JSON output
// ============================================================================

/// Error output structure.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub result_code: u8,
    pub error: String,
}

/// Output for `--list`.
#[derive(Debug, Serialize)]
pub struct VersionsOutput {
    pub success: bool,
    pub result_code: u8,
    pub versions: Vec<String>,
}

/// Output for a completed extraction.
#[derive(Debug, Serialize)]
pub struct ExtractOutput {
    pub success: bool,
    pub result_code: u8,
    pub version: String,
    pub files: usize,
    pub bytes: u64,
    pub destination: String,
    pub finished_at: DateTime<Utc>,
}

impl ExtractOutput {
    /// Text summary printed after the progress lines.
    pub fn summary(&self) -> String {
        format!("\n{} files extracted to {}\n", self.files, self.destination)
    }
}
