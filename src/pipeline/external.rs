//! External conversion: hand the composed Markdown to pandoc.
//!
//! pandoc reads its input from a path, so the Markdown is written to a
//! [`NamedTempFile`] first. The file is owned by the `convert` call and is
//! deleted when the guard drops, on success and on every error path alike.
//!
//! The call blocks until the converter exits. No timeout is applied: a
//! converter that hangs hangs the run.

use crate::config::RenderConfig;
use crate::error::TexPageError;
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::Command;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::{debug, error};

/// Turns Markdown into an HTML fragment.
///
/// The one seam between the pipeline and the outside world. Tests substitute
/// an in-process fake; production uses [`PandocConverter`].
pub trait MarkdownConverter {
    /// Convert `markdown` and return the HTML fragment unchanged.
    fn convert(&self, markdown: &str) -> Result<String, TexPageError>;
}

impl<C: MarkdownConverter + ?Sized> MarkdownConverter for &C {
    fn convert(&self, markdown: &str) -> Result<String, TexPageError> {
        (**self).convert(markdown)
    }
}

impl<C: MarkdownConverter + ?Sized> MarkdownConverter for Box<C> {
    fn convert(&self, markdown: &str) -> Result<String, TexPageError> {
        (**self).convert(markdown)
    }
}

/// Runs an external pandoc-compatible program as a subprocess.
///
/// Invocation: `<program> [extra args…] -i <file> -f <from> -t <to> <math flag>`.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: String,
    extra_args: Vec<String>,
    input_format: String,
    output_format: String,
    math_flag: &'static str,
}

impl PandocConverter {
    /// Build a converter from the relevant [`RenderConfig`] fields.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            program: config.converter_program.clone(),
            extra_args: config.converter_args.clone(),
            input_format: config.input_format.clone(),
            output_format: config.output_format.clone(),
            math_flag: config.math.flag(),
        }
    }

    /// The program this converter runs.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for converting the file at `input`.
    pub fn args(&self, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();
        args.push("-i".into());
        args.push(input.as_os_str().to_owned());
        args.push("-f".into());
        args.push(self.input_format.as_str().into());
        args.push("-t".into());
        args.push(self.output_format.as_str().into());
        args.push(self.math_flag.into());
        args
    }

    fn write_temp_markdown(markdown: &str) -> Result<NamedTempFile, TexPageError> {
        let mut file = tempfile::Builder::new()
            .prefix("texpage-")
            .suffix(".md")
            .tempfile()
            .map_err(|source| TexPageError::TempFile { source })?;
        file.write_all(markdown.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| TexPageError::TempFile { source })?;
        Ok(file)
    }
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl MarkdownConverter for PandocConverter {
    fn convert(&self, markdown: &str) -> Result<String, TexPageError> {
        // Dropping `input` removes the file, whichever way we leave this fn.
        let input = Self::write_temp_markdown(markdown)?;
        let args = self.args(input.path());
        debug!("Running {} {:?}", self.program, args);

        let start = Instant::now();
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    TexPageError::ConverterNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    TexPageError::ConverterSpawnFailed {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("Error during {} conversion: {}", self.program, output.status);
            error!("{} stderr: {}", self.program, stderr);
            return Err(TexPageError::ConversionFailed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        let fragment =
            String::from_utf8(output.stdout).map_err(|e| TexPageError::InvalidConverterOutput {
                program: self.program.clone(),
                valid_up_to: e.utf8_error().valid_up_to(),
            })?;

        debug!(
            "{} produced {} bytes of HTML in {}ms",
            self.program,
            fragment.len(),
            start.elapsed().as_millis()
        );
        Ok(fragment)
    }
}
