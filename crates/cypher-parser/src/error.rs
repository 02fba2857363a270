//! Fatal parse failures and recoverable syntax diagnostics.
//!
//! The two are deliberately distinct: a syntax problem in the input is
//! *data* — it is collected into the segment being parsed and parsing
//! continues — while a failing source read or an invalid node construction
//! aborts the parse and surfaces as [`Error`].

use std::fmt;
use std::io;

use crate::ast::AstKind;
use crate::config::Colorization;
use crate::source::InputPosition;

/// A failure that aborts a parse.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input source failed to produce bytes.
    #[error("input error: {0}")]
    Io(#[from] io::Error),
    /// A grammar action tried to assemble an ill-formed AST node. This is a
    /// bug in the grammar glue, not in the input.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A node was constructed with a child whose kind is not an instance of the
/// kind the payload slot requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a {expected} node, got {actual}")]
pub struct TreeError {
    pub(crate) expected: AstKind,
    pub(crate) actual: AstKind,
}

impl TreeError {
    /// The kind the payload slot required.
    pub fn expected(&self) -> AstKind {
        self.expected
    }

    /// The kind that was actually supplied.
    pub fn actual(&self) -> AstKind {
        self.actual
    }
}

/// A recoverable syntax diagnostic.
///
/// Errors do not abort the parse; they accumulate on the segment covering
/// the offending input. `context` is a short slice of the source line
/// containing the fault, and `context_offset` indexes the fault within that
/// slice.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) position: InputPosition,
    pub(crate) message: String,
    pub(crate) context: Option<String>,
    pub(crate) context_offset: usize,
}

impl ParseError {
    /// The position of the offending input.
    pub fn position(&self) -> InputPosition {
        self.position
    }

    /// The rendered diagnostic, e.g.
    /// `Invalid input 'R': expected a statement`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// A slice of the line containing the fault, truncated with `...` at
    /// either end when it exceeds the context width.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The byte offset of the fault within [`ParseError::context`].
    pub fn context_offset(&self) -> usize {
        self.context_offset
    }

    /// Write the diagnostic in the conventional
    /// `<file>:<line>:<col>: <message>` layout, followed by the context line
    /// and a caret marking the fault.
    pub fn fprint<W: io::Write>(
        &self,
        out: &mut W,
        source_name: &str,
        colorization: &Colorization,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{}:{}:{}: {}{}{}",
            source_name,
            self.position.line,
            self.position.column,
            colorization.error[0],
            self.message,
            colorization.error[1],
        )?;
        if let Some(context) = &self.context {
            writeln!(out, "{context}")?;
            writeln!(out, "{:>width$}", "^", width = self.context_offset + 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR@{}:{} {:?}",
            self.position.line, self.position.column, self.message
        )
    }
}

/// Cut a context slice out of `buf` around `offset`, bounded by the
/// enclosing line and capped at `max_length` bytes, marking truncated ends
/// with `...`. Returns the slice and the fault's offset within it.
pub(crate) fn line_context(buf: &[u8], offset: usize, max_length: usize) -> (String, usize) {
    debug_assert!(max_length >= 7);
    if buf.is_empty() {
        return (String::new(), 0);
    }

    let mut err = offset.min(buf.len() - 1);
    while err > 0 && matches!(buf[err], b'\n' | b'\r' | b'\0') {
        err -= 1;
    }

    // Expand alternately towards the start and end of the line until both
    // bounds are found or the width budget runs out.
    let mut n = 0;
    let mut start = err;
    let mut end = err;
    let mut found_start = false;
    let mut found_end = false;
    while !(found_start && found_end) && n < max_length {
        if !found_start {
            if start == 0 || matches!(buf[start - 1], b'\n' | b'\r') {
                found_start = true;
            } else {
                start -= 1;
                n += 1;
                if n == max_length {
                    break;
                }
            }
        }
        if !found_end {
            if end == buf.len() || matches!(buf.get(end), Some(b'\n') | Some(b'\r')) {
                found_end = true;
            } else {
                end += 1;
                n += 1;
            }
        }
    }

    let mut context: Vec<u8> = buf[start..end].to_vec();
    if !found_start && context.len() > 3 {
        context[..3].copy_from_slice(b"...");
    }
    if !found_end && context.len() > 3 {
        let len = context.len();
        context[len - 3..].copy_from_slice(b"...");
    }

    let context = String::from_utf8_lossy(&context).into_owned();
    (context, offset.saturating_sub(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_covers_short_lines_untruncated() {
        let (context, offset) = line_context(b"RETURN 1;", 7, 80);
        assert_eq!(context, "RETURN 1;");
        assert_eq!(offset, 7);
    }

    #[test]
    fn context_is_bounded_by_the_enclosing_line() {
        let (context, offset) = line_context(b"RETURN 1;\nRETRN 2;\n", 10, 80);
        assert_eq!(context, "RETRN 2;");
        assert_eq!(offset, 0);
    }

    #[test]
    fn long_lines_are_truncated_with_ellipses() {
        let line = "x".repeat(200);
        let (context, _) = line_context(line.as_bytes(), 100, 80);
        assert!(context.starts_with("..."));
        assert!(context.ends_with("..."));
        assert!(context.len() <= 80);
    }
}

#[cfg(test)]
mod fprint_tests {
    use super::ParseError;
    use crate::config::NO_COLORIZATION;
    use crate::source::InputPosition;

    #[test]
    fn fprint_renders_position_context_and_caret() {
        let error = ParseError {
            position: InputPosition {
                line: 2,
                column: 7,
                offset: 16,
            },
            message: "Invalid input 'x': expected ')'".to_string(),
            context: Some("MATCH (n x".to_string()),
            context_offset: 9,
        };

        let mut out = Vec::new();
        error.fprint(&mut out, "query.cypher", &NO_COLORIZATION).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "query.cypher:2:7: Invalid input 'x': expected ')'\nMATCH (n x\n         ^\n"
        );
    }
}
