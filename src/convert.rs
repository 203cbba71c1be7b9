//! Render entry points.
//!
//! All of them run the same linear pipeline on the calling thread:
//! trim → compose → convert → load stylesheet → assemble. The first failure
//! ends the run; nothing partial is returned or written.

use crate::config::RenderConfig;
use crate::error::TexPageError;
use crate::output::{RenderOutput, RenderStats};
use crate::pipeline::external::{MarkdownConverter, PandocConverter};
use crate::pipeline::{assemble, compose, input};
use std::ffi::OsString;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Render math lines into a full HTML page using the configured converter.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// - the converter is missing, fails to start, or exits non-zero
/// - the stylesheet is missing or unreadable
pub fn render_lines<S: AsRef<str>>(
    lines: &[S],
    config: &RenderConfig,
) -> Result<RenderOutput, TexPageError> {
    render_with(lines, &PandocConverter::from_config(config), config)
}

/// Render with a caller-supplied converter instead of the external process.
///
/// # Example
/// ```rust
/// use texpage::{render_with, MarkdownConverter, RenderConfig, TexPageError};
///
/// struct Echo;
/// impl MarkdownConverter for Echo {
///     fn convert(&self, markdown: &str) -> Result<String, TexPageError> {
///         Ok(format!("<pre>{markdown}</pre>"))
///     }
/// }
///
/// # let dir = tempfile::tempdir().unwrap();
/// # let css = dir.path().join("base.css");
/// # std::fs::write(&css, "").unwrap();
/// let config = RenderConfig::builder().stylesheet_path(&css).build().unwrap();
/// let output = render_with(&["x^2"], &Echo, &config).unwrap();
/// assert!(output.html.contains("<pre>$$\nx^2\n$$"));
/// ```
pub fn render_with<S, C>(
    lines: &[S],
    converter: &C,
    config: &RenderConfig,
) -> Result<RenderOutput, TexPageError>
where
    S: AsRef<str>,
    C: MarkdownConverter + ?Sized,
{
    let total_start = Instant::now();

    // ── Step 1: Normalise ────────────────────────────────────────────────
    let math_lines = input::trim_blank_lines(lines);
    debug!(
        "Kept {} of {} input lines",
        math_lines.len(),
        lines.len()
    );

    // ── Step 2: Compose ──────────────────────────────────────────────────
    let markdown = compose::compose_markdown(math_lines);

    // ── Step 3: Convert ──────────────────────────────────────────────────
    let convert_start = Instant::now();
    let fragment = converter.convert(&markdown)?;
    let convert_duration_ms = convert_start.elapsed().as_millis() as u64;

    // ── Step 4: Assemble ─────────────────────────────────────────────────
    let css = assemble::load_stylesheet(&config.stylesheet_path)?;
    let html = assemble::assemble_page(&css, &fragment, &config.body_classes);

    let stats = RenderStats {
        input_lines: lines.len(),
        math_lines: math_lines.len(),
        stylesheet_bytes: css.len(),
        fragment_bytes: fragment.len(),
        html_bytes: html.len(),
        convert_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Rendered {} math lines into {} bytes in {}ms",
        stats.math_lines, stats.html_bytes, stats.total_duration_ms
    );

    Ok(RenderOutput {
        markdown,
        fragment,
        html,
        stats,
    })
}

/// Read lines from `reader` to end-of-stream, then [`render_lines`].
pub fn render_reader<R: BufRead>(
    reader: R,
    config: &RenderConfig,
) -> Result<RenderOutput, TexPageError> {
    let lines = input::read_lines(reader)?;
    render_lines(&lines, config)
}

/// Render and write the page to `output_path`.
///
/// Uses atomic write (temp file in the target directory + rename) so a failed
/// run never leaves a half-written page behind.
pub fn render_to_file<S: AsRef<str>>(
    lines: &[S],
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<RenderStats, TexPageError> {
    let output = render_lines(lines, config)?;
    write_output(output_path.as_ref(), &output.html)?;
    Ok(output.stats)
}

/// Trim and compose only. No converter, no stylesheet.
pub fn compose_document<S: AsRef<str>>(lines: &[S]) -> String {
    compose::compose_markdown(input::trim_blank_lines(lines))
}

/// Atomically write `text` plus a trailing newline to `path`.
///
/// Missing parent directories are created. The content lands in a sibling
/// `<name>.tmp` file, created with the process's normal permissions, and is
/// renamed over `path` once fully written.
pub fn write_output(path: &Path, text: &str) -> Result<(), TexPageError> {
    let write_failed = |source| TexPageError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let tmp_path = sibling_tmp_path(path);
    let mut contents = String::with_capacity(text.len() + 1);
    contents.push_str(text);
    contents.push('\n');

    let written = std::fs::write(&tmp_path, contents)
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(source) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_failed(source));
    }

    debug!("Wrote {}", path.display());
    Ok(())
}

/// `page.html` → `page.html.tmp`, in the same directory so `rename` stays atomic.
fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records what it was asked to convert and wraps it in `<p>`.
    struct Recording {
        seen: RefCell<Vec<String>>,
    }

    impl Recording {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl MarkdownConverter for Recording {
        fn convert(&self, markdown: &str) -> Result<String, TexPageError> {
            self.seen.borrow_mut().push(markdown.to_string());
            Ok(format!("<p>{}</p>", markdown.len()))
        }
    }

    struct Failing;

    impl MarkdownConverter for Failing {
        fn convert(&self, _markdown: &str) -> Result<String, TexPageError> {
            Err(TexPageError::ConverterNotFound {
                program: "fake".into(),
            })
        }
    }

    fn config_with_css(dir: &tempfile::TempDir, css: &str) -> RenderConfig {
        let path = dir.path().join("base.css");
        std::fs::write(&path, css).unwrap();
        RenderConfig::builder().stylesheet_path(path).build().unwrap()
    }

    #[test]
    fn render_with_trims_composes_and_assembles() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_css(&dir, ".adaptive{}");
        let converter = Recording::new();

        let out = render_with(&["", "", "a = b", ""], &converter, &config).unwrap();

        assert_eq!(out.markdown, "$$\na = b\n$$\n```\na = b\n```");
        assert_eq!(converter.seen.borrow().as_slice(), [out.markdown.clone()]);
        assert_eq!(out.fragment, format!("<p>{}</p>", out.markdown.len()));
        assert_eq!(
            out.html,
            format!(
                "<html><head><style>.adaptive{{}}</style></head>\
                 <body class=\"theme-default adaptive\">{}</body>",
                out.fragment
            )
        );
        assert_eq!(out.stats.input_lines, 4);
        assert_eq!(out.stats.math_lines, 1);
        assert_eq!(out.stats.stylesheet_bytes, 11);
        assert_eq!(out.stats.html_bytes, out.html.len());
    }

    #[test]
    fn blank_input_renders_empty_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_css(&dir, "");
        let converter = Recording::new();

        let out = render_with(&["  ", ""], &converter, &config).unwrap();
        assert_eq!(out.markdown, "$$\n$$\n```\n```");
        assert_eq!(out.stats.math_lines, 0);
    }

    #[test]
    fn converter_failure_skips_stylesheet() {
        // No stylesheet on disk: the converter error must win.
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::builder()
            .stylesheet_path(dir.path().join("missing.css"))
            .build()
            .unwrap();
        let err = render_with(&["x"], &Failing, &config).unwrap_err();
        assert!(matches!(err, TexPageError::ConverterNotFound { .. }));
    }

    #[test]
    fn missing_stylesheet_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::builder()
            .stylesheet_path(dir.path().join("base.css"))
            .build()
            .unwrap();
        let err = render_with(&["x"], &Recording::new(), &config).unwrap_err();
        assert!(matches!(err, TexPageError::StylesheetNotFound { .. }));
    }

    #[test]
    fn compose_document_trims_first() {
        assert_eq!(
            compose_document(&["", "x^2 + 1", " "]),
            "$$\nx^2 + 1\n$$\n```\nx^2 + 1\n```"
        );
        let none: [&str; 0] = [];
        assert_eq!(compose_document(&none), "$$\n$$\n```\n```");
    }

    #[test]
    fn write_output_creates_parents_and_appends_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/page.html");
        write_output(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>\n");
        // Only the final file remains; the temp sibling was renamed.
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_output_uses_normal_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        let plain = dir.path().join("plain.html");
        write_output(&page, "<html>").unwrap();
        std::fs::write(&plain, "<html>").unwrap();

        fn mode(p: &Path) -> u32 {
            std::fs::metadata(p).unwrap().permissions().mode() & 0o777
        }
        assert_eq!(mode(&page), mode(&plain), "page mode {:o}", mode(&page));
    }

    #[test]
    fn write_output_failure_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        let target = dir.path().join("page.html");
        std::fs::create_dir(&target).unwrap();

        let err = write_output(&target, "<html>").unwrap_err();
        assert!(matches!(err, TexPageError::OutputWriteFailed { .. }), "got: {err:?}");
        assert!(!dir.path().join("page.html.tmp").exists());
    }

    #[test]
    fn sibling_tmp_path_keeps_directory() {
        assert_eq!(
            sibling_tmp_path(Path::new("site/page.html")),
            PathBuf::from("site/page.html.tmp")
        );
        assert_eq!(sibling_tmp_path(Path::new("out")), PathBuf::from("out.tmp"));
    }
}
