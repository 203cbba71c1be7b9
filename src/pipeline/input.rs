//! Input normalisation: read raw lines and trim blank edges.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`. Trailing whitespace is stripped
//! as each line is read; after that lines are only ever dropped from the two
//! ends, never edited or reordered. Blank lines inside the block are kept
//! because they can be meaningful to the math environment (e.g. an `aligned`
//! body spaced for readability).
//!
//! Whitespace is Unicode `White_Space` plus the ASCII separators
//! `\x1c`..=`\x1f`, which terminals and editors also treat as blank.

use crate::error::TexPageError;
use std::io::{BufRead, Read};
use tracing::debug;

/// Unicode whitespace or one of the ASCII file/group/record/unit separators.
pub fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Read every line from `reader`, stripping terminators and trailing whitespace.
///
/// Reads until end-of-stream. A final line without a terminator still counts;
/// a terminator at the very end does not open another line. Invalid UTF-8
/// aborts with [`TexPageError::InputReadFailed`].
pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>, TexPageError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| TexPageError::InputReadFailed { source })?;

    let lines: Vec<String> = split_lines(&text)
        .map(|l| l.trim_end_matches(is_blank_char).to_string())
        .collect();

    debug!("Read {} input lines", lines.len());
    Ok(lines)
}

/// Split on `\n`, `\r\n` and lone `\r`, dropping the terminators.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, tail) = match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(i) if rest[i..].starts_with("\r\n") => (&rest[..i], &rest[i + 2..]),
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        rest = tail;
        Some(line)
    })
}

/// Return the maximal sub-slice without leading or trailing blank lines.
///
/// A line is blank when it holds nothing but [`is_blank_char`] characters.
/// All-blank and empty input both yield an empty slice.
pub fn trim_blank_lines<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let is_content = |l: &S| !l.as_ref().chars().all(is_blank_char);

    match lines.iter().position(is_content) {
        Some(start) => {
            // A content line exists, so rposition always finds one.
            let end = lines.iter().rposition(is_content).unwrap_or(start);
            &lines[start..=end]
        }
        None => &lines[..0],
    }
}
