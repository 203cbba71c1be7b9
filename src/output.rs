//! Result types returned by the render entry points.

use serde::{Deserialize, Serialize};

/// Everything one render produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    /// The composed Markdown handed to the converter.
    pub markdown: String,
    /// The converter's stdout, untouched.
    pub fragment: String,
    /// The final page.
    pub html: String,
    pub stats: RenderStats,
}

/// Counters and timings for one render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderStats {
    /// Lines received, before trimming.
    pub input_lines: usize,
    /// Lines left after trimming blank edges.
    pub math_lines: usize,
    pub stylesheet_bytes: usize,
    pub fragment_bytes: usize,
    pub html_bytes: usize,
    /// Wall-clock time spent in the converter.
    pub convert_duration_ms: u64,
    pub total_duration_ms: u64,
}
