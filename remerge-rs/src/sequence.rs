//! Line sequence model.
//!
//! All three inputs to the merge are [`LineSequence`] values produced by the
//! same normalization: strip one trailing newline, trim surrounding
//! whitespace from the text as a whole, then split on `'\n'`. Reading past
//! the end of a sequence yields `None`, which is distinct from an empty
//! line - the merge rules depend on that distinction.

use crate::error::{Error, Result};

/// An ordered sequence of text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        LineSequence { lines: Vec::new() }
    }

    /// Normalizes raw text into a sequence.
    ///
    /// One trailing newline is stripped, the remaining text is trimmed as a
    /// whole, and the result is split on `'\n'`. Empty or whitespace-only
    /// text normalizes to the empty sequence. Interior blank lines survive.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.strip_suffix('\n').unwrap_or(text).trim();
        if trimmed.is_empty() {
            return LineSequence::new();
        }
        LineSequence {
            lines: trimmed.split('\n').map(str::to_string).collect(),
        }
    }

    /// Resolves raw file bytes into a sequence.
    ///
    /// Fails with [`Error::MalformedInput`] if the bytes are not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::MalformedInput(format!("invalid UTF-8: {}", e)))?;
        Ok(Self::parse(text))
    }

    /// Builds a sequence from already-split lines, without normalization.
    pub fn from_lines(lines: Vec<String>) -> Self {
        LineSequence { lines }
    }

    /// Returns the line at `ix`, or `None` past the end.
    pub fn get(&self, ix: usize) -> Option<&str> {
        self.lines.get(ix).map(String::as_str)
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns all lines as a slice.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the lines from `ix` to the end (empty slice past the end).
    pub fn slice_from(&self, ix: usize) -> &[String] {
        if ix >= self.lines.len() {
            &[]
        } else {
            &self.lines[ix..]
        }
    }

    /// Appends a single line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends a run of lines.
    pub fn extend_from_slice(&mut self, lines: &[String]) {
        self.lines.extend_from_slice(lines);
    }

    /// Drops one trailing blank line, if present.
    ///
    /// Emission boundaries can leave a doubled blank at the end of merged
    /// output; the merge collapses it down to the single newline that
    /// [`LineSequence::to_text`] appends.
    pub fn pop_trailing_blank(&mut self) -> bool {
        if self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
            true
        } else {
            false
        }
    }

    /// Serializes the sequence with exactly one trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LineSequence {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        LineSequence { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_trailing_newline_and_trims() {
        let seq = LineSequence::parse("a\nb\nc\n");
        assert_eq!(seq.lines(), &["a", "b", "c"]);

        let seq = LineSequence::parse("\n  \na\nb\n\n");
        assert_eq!(seq.lines(), &["a", "b"]);
    }

    #[test]
    fn test_parse_keeps_interior_blanks() {
        let seq = LineSequence::parse("a\n\nb");
        assert_eq!(seq.lines(), &["a", "", "b"]);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(LineSequence::parse("").is_empty());
        assert!(LineSequence::parse("\n").is_empty());
        assert!(LineSequence::parse("   \n").is_empty());
    }

    #[test]
    fn test_get_past_end_is_absent() {
        let seq = LineSequence::parse("a");
        assert_eq!(seq.get(0), Some("a"));
        assert_eq!(seq.get(1), None);
    }

    #[test]
    fn test_absent_is_distinct_from_empty_line() {
        let seq = LineSequence::from_lines(vec!["a".to_string(), String::new()]);
        assert_eq!(seq.get(1), Some(""));
        assert_eq!(seq.get(2), None);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = LineSequence::from_bytes(&[0x66, 0xff, 0x6f]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_to_text_single_trailing_newline() {
        let seq = LineSequence::parse("a\nb");
        assert_eq!(seq.to_text(), "a\nb\n");
    }

    #[test]
    fn test_slice_from_past_end() {
        let seq = LineSequence::parse("a\nb");
        assert_eq!(seq.slice_from(1), &["b".to_string()]);
        assert!(seq.slice_from(5).is_empty());
    }

    #[test]
    fn test_pop_trailing_blank() {
        let mut seq = LineSequence::from_lines(vec!["a".to_string(), String::new()]);
        assert!(seq.pop_trailing_blank());
        assert_eq!(seq.lines(), &["a"]);
        assert!(!seq.pop_trailing_blank());
    }
}
