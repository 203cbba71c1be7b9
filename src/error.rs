//! Error types for the texpage library.
//!
//! Every failure is fatal for the run: there is no partial page to salvage,
//! so a single [`TexPageError`] is returned from the top-level `render*`
//! functions and the binary turns it into a non-zero exit.
//!
//! Malformed input is never an error. Any text, including nothing at all,
//! composes to a structurally valid document.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All errors returned by the texpage library.
#[derive(Debug, Error)]
pub enum TexPageError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Standard input (or the input file) could not be read, e.g. invalid UTF-8.
    #[error("Failed to read input: {source}")]
    InputReadFailed {
        #[source]
        source: std::io::Error,
    },

    // ── Converter errors ──────────────────────────────────────────────────
    /// The converter executable does not exist on `PATH`.
    #[error("Converter '{program}' not found\nInstall pandoc or point --converter at an existing executable.")]
    ConverterNotFound { program: String },

    /// The converter exists but could not be started.
    #[error("Failed to start converter '{program}': {source}")]
    ConverterSpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran and exited unsuccessfully.
    #[error("Conversion failed: '{program}' {status}\n{stderr}")]
    ConversionFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The converter succeeded but wrote bytes that are not UTF-8.
    #[error("Converter '{program}' produced non-UTF-8 output at byte {valid_up_to}")]
    InvalidConverterOutput { program: String, valid_up_to: usize },

    /// The scoped temp file holding the Markdown could not be prepared.
    #[error("Failed to prepare temporary Markdown file: {source}")]
    TempFile {
        #[source]
        source: std::io::Error,
    },

    // ── Stylesheet errors ─────────────────────────────────────────────────
    /// The stylesheet does not exist at the configured path.
    #[error("Stylesheet not found: '{path}'\nRun from the directory containing it or pass --stylesheet.")]
    StylesheetNotFound { path: PathBuf },

    /// The stylesheet exists but could not be read.
    #[error("Failed to read stylesheet '{path}': {source}")]
    StylesheetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TexPageError {
    /// Captured converter stderr, when the error came from a failed conversion.
    pub fn converter_stderr(&self) -> Option<&str> {
        match self {
            TexPageError::ConversionFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
