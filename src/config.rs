//! Configuration types for rendering a math page.
//!
//! All rendering behaviour is controlled through [`RenderConfig`], built via
//! its [`RenderConfigBuilder`]. The defaults reproduce the canonical
//! invocation: `pandoc -f gfm -t html5 --mathml`, stylesheet `base.css`,
//! body classes `theme-default adaptive`.

use crate::error::TexPageError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default stylesheet path, relative to the working directory.
pub const DEFAULT_STYLESHEET: &str = "base.css";

/// Default external converter.
pub const DEFAULT_CONVERTER: &str = "pandoc";

/// Body classes the stylesheet's theme selectors hook onto.
pub const DEFAULT_BODY_CLASSES: [&str; 2] = ["theme-default", "adaptive"];

/// Configuration for a single render.
///
/// # Example
/// ```rust
/// use texpage::{MathRenderer, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .stylesheet_path("themes/dark.css")
///     .math(MathRenderer::MathMl)
///     .build()
///     .unwrap();
/// assert_eq!(config.converter_program, "pandoc");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Stylesheet inlined into `<head>`. Read fresh on every render. Default: `base.css`.
    pub stylesheet_path: PathBuf,

    /// Converter executable, resolved through `PATH`. Default: `pandoc`.
    pub converter_program: String,

    /// Extra arguments placed before the standard argument set. Default: none.
    pub converter_args: Vec<String>,

    /// Markdown dialect passed as `-f`. Default: `gfm`.
    pub input_format: String,

    /// Output format passed as `-t`. Default: `html5`.
    pub output_format: String,

    /// How the converter renders math. Default: [`MathRenderer::MathMl`].
    pub math: MathRenderer,

    /// Classes on the `<body>` element. Default: `theme-default adaptive`.
    pub body_classes: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stylesheet_path: PathBuf::from(DEFAULT_STYLESHEET),
            converter_program: DEFAULT_CONVERTER.to_string(),
            converter_args: Vec::new(),
            input_format: "gfm".to_string(),
            output_format: "html5".to_string(),
            math: MathRenderer::default(),
            body_classes: DEFAULT_BODY_CLASSES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn stylesheet_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.stylesheet_path = path.into();
        self
    }

    pub fn converter_program(mut self, program: impl Into<String>) -> Self {
        self.config.converter_program = program.into();
        self
    }

    pub fn converter_arg(mut self, arg: impl Into<String>) -> Self {
        self.config.converter_args.push(arg.into());
        self
    }

    pub fn converter_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.converter_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn input_format(mut self, format: impl Into<String>) -> Self {
        self.config.input_format = format.into();
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.config.output_format = format.into();
        self
    }

    pub fn math(mut self, math: MathRenderer) -> Self {
        self.config.math = math;
        self
    }

    /// Replace the body classes. An empty list keeps the defaults.
    pub fn body_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        if !classes.is_empty() {
            self.config.body_classes = classes;
        }
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, TexPageError> {
        let c = &self.config;
        if c.converter_program.trim().is_empty() {
            return Err(TexPageError::InvalidConfig(
                "Converter program must not be empty".into(),
            ));
        }
        if c.input_format.trim().is_empty() || c.output_format.trim().is_empty() {
            return Err(TexPageError::InvalidConfig(
                "Input and output formats must not be empty".into(),
            ));
        }
        if c.stylesheet_path.as_os_str().is_empty() {
            return Err(TexPageError::InvalidConfig(
                "Stylesheet path must not be empty".into(),
            ));
        }
        if let Some(bad) = c.body_classes.iter().find(|c| !is_css_class(c)) {
            return Err(TexPageError::InvalidConfig(format!(
                "Body class {bad:?} is not a valid CSS class name"
            )));
        }
        Ok(self.config)
    }
}

static RE_CSS_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").unwrap());

fn is_css_class(name: &str) -> bool {
    RE_CSS_CLASS.is_match(name)
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Math output method requested from the converter.
///
/// MathML is self-contained: the page renders without scripts. The script
/// based methods only emit markup that a MathJax or KaTeX bundle must pick up,
/// so the resulting page is no longer standalone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MathRenderer {
    /// Native MathML (`--mathml`). (default)
    #[default]
    MathMl,
    /// MathJax markup (`--mathjax`).
    MathJax,
    /// KaTeX markup (`--katex`).
    Katex,
}

impl MathRenderer {
    /// The converter flag selecting this method.
    pub fn flag(self) -> &'static str {
        match self {
            MathRenderer::MathMl => "--mathml",
            MathRenderer::MathJax => "--mathjax",
            MathRenderer::Katex => "--katex",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_invocation() {
        let c = RenderConfig::default();
        assert_eq!(c.stylesheet_path, PathBuf::from("base.css"));
        assert_eq!(c.converter_program, "pandoc");
        assert_eq!(c.input_format, "gfm");
        assert_eq!(c.output_format, "html5");
        assert_eq!(c.math.flag(), "--mathml");
        assert_eq!(c.body_classes, vec!["theme-default", "adaptive"]);
        assert!(c.converter_args.is_empty());
    }

    #[test]
    fn builder_sets_fields() {
        let c = RenderConfig::builder()
            .stylesheet_path("x.css")
            .converter_program("sh")
            .converter_arg("-c")
            .converter_arg("cat")
            .math(MathRenderer::Katex)
            .body_classes(["dark"])
            .build()
            .unwrap();
        assert_eq!(c.stylesheet_path, PathBuf::from("x.css"));
        assert_eq!(c.converter_program, "sh");
        assert_eq!(c.converter_args, vec!["-c", "cat"]);
        assert_eq!(c.math, MathRenderer::Katex);
        assert_eq!(c.body_classes, vec!["dark"]);
    }

    #[test]
    fn empty_body_classes_keep_defaults() {
        let c = RenderConfig::builder()
            .body_classes(Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(c.body_classes, vec!["theme-default", "adaptive"]);
    }

    #[test]
    fn rejects_empty_program() {
        let err = RenderConfig::builder()
            .converter_program("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, TexPageError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_format() {
        assert!(RenderConfig::builder().input_format("").build().is_err());
        assert!(RenderConfig::builder().output_format("").build().is_err());
    }

    #[test]
    fn rejects_class_that_would_break_attribute() {
        let err = RenderConfig::builder()
            .body_classes(["ok", "a\" onload=\"x"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("not a valid CSS class"), "got: {err}");
    }

    #[test]
    fn css_class_names() {
        assert!(is_css_class("theme-default"));
        assert!(is_css_class("_private"));
        assert!(is_css_class("-webkit-thing"));
        assert!(!is_css_class("2col"));
        assert!(!is_css_class(""));
        assert!(!is_css_class("has space"));
    }
}
