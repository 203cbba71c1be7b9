//! Page assembly: inline the stylesheet and wrap the fragment.
//!
//! The stylesheet is read from disk on every render, never cached, so edits
//! to it show up on the next run. Both the stylesheet and the fragment are
//! inserted verbatim.

use crate::error::TexPageError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read the stylesheet at `path`.
pub fn load_stylesheet(path: &Path) -> Result<String, TexPageError> {
    match std::fs::read_to_string(path) {
        Ok(css) => {
            debug!("Loaded stylesheet {} ({} bytes)", path.display(), css.len());
            Ok(css)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(TexPageError::StylesheetNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(TexPageError::StylesheetUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Wrap `fragment` in the fixed HTML shell with `css` inlined.
pub fn assemble_page<S: AsRef<str>>(css: &str, fragment: &str, body_classes: &[S]) -> String {
    let classes = body_classes
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "<html><head><style>{css}</style></head><body class=\"{classes}\">{fragment}</body>"
    )
}
