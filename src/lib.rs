//! # texpage
//!
//! Render LaTeX math lines into a self-contained HTML page.
//!
//! The input is shown twice on the page: typeset as MathML, and as the
//! literal source in a code block. The Markdown-to-HTML step is delegated to
//! pandoc; this crate does the text plumbing around it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! stdin
//!  │
//!  ├─ 1. Input     strip trailing whitespace, trim blank edge lines
//!  ├─ 2. Compose   `$$` math block + fenced code block of the same lines
//!  ├─ 3. Convert   pandoc -f gfm -t html5 --mathml on a scoped temp file
//!  ├─ 4. Assemble  inline base.css, wrap in <html><body class="theme-default adaptive">
//!  └─ 5. Output    page on stdout
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use texpage::{render_lines, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::default();
//!     let output = render_lines(&["e^{i\\pi} + 1 = 0"], &config)?;
//!     println!("{}", output.html);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `texpage` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{MathRenderer, RenderConfig, RenderConfigBuilder};
pub use convert::{compose_document, render_lines, render_reader, render_to_file, render_with};
pub use error::TexPageError;
pub use output::{RenderOutput, RenderStats};
pub use pipeline::compose::{split_blocks, MathBlocks};
pub use pipeline::external::{MarkdownConverter, PandocConverter};
