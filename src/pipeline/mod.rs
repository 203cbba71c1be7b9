//! Pipeline stages for turning math lines into an HTML page.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested on its own and the converter can be swapped without touching the
//! text stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ compose ──▶ external ──▶ assemble
//! (lines)   (markdown)  (pandoc)     (page)
//! ```
//!
//! 1. [`input`]    — read lines, strip trailing whitespace, trim blank edges
//! 2. [`compose`]  — wrap the lines in a `$$` block and a fenced code block
//! 3. [`external`] — run the converter on a scoped temp file; the only stage
//!    that spawns a process
//! 4. [`assemble`] — inline the stylesheet and wrap the fragment in `<html>`

pub mod assemble;
pub mod compose;
pub mod external;
pub mod input;
