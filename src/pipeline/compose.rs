//! Markdown composition: one input, two representations.
//!
//! The composed document carries the same lines twice: once inside a `$$`
//! display-math block that the converter typesets, once inside a fenced code
//! block that shows the source verbatim.
//!
//! ~~~text
//! $$
//! <lines>
//! $$
//! ```
//! <lines>
//! ```
//! ~~~

/// Display-math delimiter line.
pub const MATH_DELIMITER: &str = "$$";

/// Code fence delimiter line.
pub const CODE_FENCE: &str = "```";

/// Wrap `lines` in a display-math block followed by a fenced code block.
///
/// Lines are joined with `\n`; there is no trailing newline. Empty input
/// yields the four delimiter lines and nothing else.
pub fn compose_markdown<S: AsRef<str>>(lines: &[S]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(lines.len() * 2 + 4);
    parts.push(MATH_DELIMITER);
    parts.extend(lines.iter().map(|l| l.as_ref()));
    parts.push(MATH_DELIMITER);
    parts.push(CODE_FENCE);
    parts.extend(lines.iter().map(|l| l.as_ref()));
    parts.push(CODE_FENCE);
    parts.join("\n")
}

/// The two content blocks of a composed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathBlocks<'a> {
    /// Lines between the `$$` delimiters.
    pub math: Vec<&'a str>,
    /// Lines between the code fences.
    pub code: Vec<&'a str>,
}

/// Split a document produced by [`compose_markdown`] back into its blocks.
///
/// Both blocks always hold the same number of lines `n`, so the delimiters
/// sit at lines `0`, `n+1`, `n+2` and `2n+3`. Locating them by position
/// keeps the split exact even when a content line is itself `$$` or a fence.
/// Returns `None` for text that does not have that shape.
pub fn split_blocks(markdown: &str) -> Option<MathBlocks<'_>> {
    let lines: Vec<&str> = markdown.split('\n').collect();
    if lines.len() < 4 || lines.len() % 2 != 0 {
        return None;
    }
    let n = (lines.len() - 4) / 2;

    let delimiters_ok = lines[0] == MATH_DELIMITER
        && lines[n + 1] == MATH_DELIMITER
        && lines[n + 2] == CODE_FENCE
        && lines[2 * n + 3] == CODE_FENCE;
    if !delimiters_ok {
        return None;
    }

    Some(MathBlocks {
        math: lines[1..=n].to_vec(),
        code: lines[n + 3..2 * n + 3].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        assert_eq!(
            compose_markdown(&["x^2 + 1"]),
            "$$\nx^2 + 1\n$$\n```\nx^2 + 1\n```"
        );
    }

    #[test]
    fn empty_input_collapses_delimiters() {
        let none: [&str; 0] = [];
        assert_eq!(compose_markdown(&none), "$$\n$$\n```\n```");
    }

    #[test]
    fn multi_line_keeps_internal_blank() {
        let md = compose_markdown(&["a", "", "b"]);
        assert_eq!(md, "$$\na\n\nb\n$$\n```\na\n\nb\n```");
    }

    #[test]
    fn blocks_are_identical() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec!["x"],
            vec!["\\begin{aligned}", "a &= b \\\\", "", "c &= d", "\\end{aligned}"],
            vec!["$$"],
            vec!["```", "$$", "```"],
        ];
        for lines in inputs {
            let md = compose_markdown(&lines);
            let blocks = split_blocks(&md).expect("composed output must split");
            assert_eq!(blocks.math, blocks.code, "{lines:?}");
            assert_eq!(blocks.math, lines, "{lines:?}");
        }
    }

    #[test]
    fn split_rejects_other_shapes() {
        assert_eq!(split_blocks(""), None);
        assert_eq!(split_blocks("$$\n$$\n```"), None);
        assert_eq!(split_blocks("$$\nx\n$$\n```\ny\n"), None);
        assert_eq!(split_blocks("# heading\n\ntext\n"), None);
        assert_eq!(split_blocks("$$\na\n$$\n~~~\na\n~~~"), None);
    }

    #[test]
    fn split_empty_document() {
        let blocks = split_blocks("$$\n$$\n```\n```").unwrap();
        assert!(blocks.math.is_empty());
        assert!(blocks.code.is_empty());
    }
}
