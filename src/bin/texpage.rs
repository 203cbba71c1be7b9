//! CLI binary for texpage.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `RenderConfig` and prints the page.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use texpage::pipeline::input::read_lines;
use texpage::{compose_document, render_lines, MathRenderer, RenderConfig};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render a formula (reads base.css from the current directory)
  echo 'x^2 + 1' | texpage > page.html

  # Multi-line environment from a file, custom stylesheet
  texpage -s themes/dark.css aligned.tex -o aligned.html

  # Show the Markdown that would be sent to pandoc
  printf '\n\na = b\n' | texpage --markdown-only

  # Pass extra flags through to pandoc
  texpage --converter-arg=--wrap=none < formula.tex

  # JSON output (markdown, fragment, page, timings)
  texpage --json < formula.tex

REQUIREMENTS:
  pandoc must be on PATH (or set --converter / TEXPAGE_CONVERTER).
  The stylesheet should define the `theme-default` and `adaptive` classes
  placed on <body>.

ENVIRONMENT VARIABLES:
  TEXPAGE_STYLESHEET   Stylesheet path (default: base.css)
  TEXPAGE_CONVERTER    Converter program (default: pandoc)
  RUST_LOG             Override the log filter, e.g. RUST_LOG=texpage=debug
"#;

/// Render LaTeX math lines into a self-contained MathML HTML page.
#[derive(Parser, Debug)]
#[command(
    name = "texpage",
    version,
    about = "Render LaTeX math lines into a self-contained MathML HTML page",
    long_about = "Reads LaTeX math lines from standard input (or a file), renders them \
through pandoc as MathML alongside a verbatim source block, and prints a standalone HTML \
page with the stylesheet inlined.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file with math lines. Reads standard input when absent or `-`.
    input: Option<PathBuf>,

    /// Write the page to this file instead of stdout.
    #[arg(short, long, env = "TEXPAGE_OUTPUT")]
    output: Option<PathBuf>,

    /// Stylesheet inlined into the page.
    #[arg(short, long, env = "TEXPAGE_STYLESHEET", default_value = "base.css")]
    stylesheet: PathBuf,

    /// Converter program.
    #[arg(long, env = "TEXPAGE_CONVERTER", default_value = "pandoc")]
    converter: String,

    /// Extra argument passed to the converter before the standard set (repeatable).
    #[arg(long = "converter-arg", value_name = "ARG", allow_hyphen_values = true)]
    converter_args: Vec<String>,

    /// Markdown dialect given to the converter.
    #[arg(long = "from", default_value = "gfm")]
    input_format: String,

    /// Output format requested from the converter.
    #[arg(long = "to", default_value = "html5")]
    output_format: String,

    /// Math rendering method.
    #[arg(long, value_enum, default_value = "mathml")]
    math: MathArg,

    /// Class on <body> (repeatable). Default: theme-default adaptive.
    #[arg(long = "body-class", value_name = "CLASS")]
    body_classes: Vec<String>,

    /// Print the composed Markdown and stop (no converter, no stylesheet).
    #[arg(long, conflicts_with = "json")]
    markdown_only: bool,

    /// Output structured JSON (RenderOutput) instead of the page.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TEXPAGE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TEXPAGE_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum MathArg {
    Mathml,
    Mathjax,
    Katex,
}

impl From<MathArg> for MathRenderer {
    fn from(v: MathArg) -> Self {
        match v {
            MathArg::Mathml => MathRenderer::MathMl,
            MathArg::Mathjax => MathRenderer::MathJax,
            MathArg::Katex => MathRenderer::Katex,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stderr stays silent on success unless -v is given.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let lines = read_input(cli.input.as_ref())?;

    // ── Markdown-only mode ───────────────────────────────────────────────
    if cli.markdown_only {
        return emit(cli.output.as_ref(), &compose_document(&lines));
    }

    let config = build_config(&cli)?;

    // ── Render ───────────────────────────────────────────────────────────
    let output = render_lines(&lines, &config).context("Rendering failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        emit(cli.output.as_ref(), &json)
    } else {
        emit(cli.output.as_ref(), &output.html)
    }
}

/// Read all input lines from the file argument or standard input.
fn read_input(input: Option<&PathBuf>) -> Result<Vec<String>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input {:?}", path))?;
            read_lines(BufReader::new(file))
                .with_context(|| format!("Failed to read input {:?}", path))
        }
        _ => read_lines(io::stdin().lock()).context("Failed to read standard input"),
    }
}

/// Write `text` plus a newline to the output file, or to stdout.
fn emit(output: Option<&PathBuf>, text: &str) -> Result<()> {
    if let Some(path) = output {
        texpage::convert::write_output(path, text)
            .with_context(|| format!("Failed to write {:?}", path))?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .and_then(|()| handle.write_all(b"\n"))
        .and_then(|()| handle.flush())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Map CLI args to `RenderConfig`.
fn build_config(cli: &Cli) -> Result<RenderConfig> {
    RenderConfig::builder()
        .stylesheet_path(&cli.stylesheet)
        .converter_program(&cli.converter)
        .converter_args(&cli.converter_args)
        .input_format(&cli.input_format)
        .output_format(&cli.output_format)
        .math(cli.math.into())
        .body_classes(&cli.body_classes)
        .build()
        .context("Invalid configuration")
}
