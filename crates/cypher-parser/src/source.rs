//! Input positions, ranges, and the byte source abstraction the parser
//! consumes.

use std::fmt;
use std::io;

/// A position in the parse input.
///
/// `line` and `column` are 1-based; `offset` is a 0-based byte count from the
/// start of the input (adjusted by the configured initial position when
/// parsing resumes mid-stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputPosition {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl InputPosition {
    /// The position every parse starts at unless configured otherwise.
    pub const START: InputPosition = InputPosition {
        line: 1,
        column: 1,
        offset: 0,
    };
}

impl fmt::Display for InputPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[start, end)` span of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputRange {
    pub start: InputPosition,
    pub end: InputPosition,
}

impl fmt::Display for InputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

/// A forward byte stream feeding a parse.
///
/// `read` fills as much of `buf` as it can and returns the number of bytes
/// written; returning `0` signals end of stream. The parser buffers
/// internally, so implementations are free to return a single byte at a
/// time.
pub trait Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// In-memory source over a text span.
pub(crate) struct TextSource<'a> {
    remaining: &'a [u8],
}

impl<'a> TextSource<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        TextSource {
            remaining: text.as_bytes(),
        }
    }
}

impl Source for TextSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&self.remaining[..n]);
        self.remaining = &self.remaining[n..];
        Ok(n)
    }
}

/// Source over any [`std::io::Read`] stream.
pub(crate) struct ReaderSource<R> {
    reader: R,
}

impl<R: io::Read> ReaderSource<R> {
    pub(crate) fn new(reader: R) -> Self {
        ReaderSource { reader }
    }
}

impl<R: io::Read> Source for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

/// The line-start offset index for the current parse window.
///
/// Offsets are window-relative and strictly increasing, so position lookup is
/// a binary search. The recognizer backtracks freely; `rewind` truncates any
/// recorded starts past the rewound offset and MUST be called whenever the
/// cursor rolls backwards.
#[derive(Debug)]
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new() -> Self {
        LineIndex { starts: vec![0] }
    }

    /// Forget everything; the window begins a new segment.
    pub(crate) fn reset(&mut self) {
        self.starts.clear();
        self.starts.push(0);
    }

    /// Record `pos` as the start of a line (the offset just past a newline).
    pub(crate) fn record(&mut self, pos: usize) {
        self.rewind(pos);
        if *self.starts.last().expect("line index is never empty") != pos {
            self.starts.push(pos);
        }
    }

    /// Drop all recorded line starts beyond `pos`.
    pub(crate) fn rewind(&mut self, pos: usize) {
        while *self.starts.last().expect("line index is never empty") > pos {
            self.starts.pop();
        }
    }

    /// Map a window-relative offset to a position, shifted by `origin`.
    pub(crate) fn position(&self, pos: usize, origin: InputPosition) -> InputPosition {
        let idx = self.starts.partition_point(|&start| start <= pos) - 1;
        let start = self.starts[idx];
        InputPosition {
            line: origin.line + idx as u32,
            column: (pos - start) as u32 + if idx == 0 { origin.column } else { 1 },
            offset: pos + origin.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_lookup_counts_lines() {
        let mut index = LineIndex::new();
        // "ab\ncd\ne"
        index.record(3);
        index.record(6);

        let origin = InputPosition::START;
        assert_eq!(index.position(0, origin), InputPosition { line: 1, column: 1, offset: 0 });
        assert_eq!(index.position(2, origin), InputPosition { line: 1, column: 3, offset: 2 });
        assert_eq!(index.position(3, origin), InputPosition { line: 2, column: 1, offset: 3 });
        assert_eq!(index.position(5, origin), InputPosition { line: 2, column: 3, offset: 5 });
        assert_eq!(index.position(6, origin), InputPosition { line: 3, column: 1, offset: 6 });
    }

    #[test]
    fn origin_shifts_first_line_column_only() {
        let mut index = LineIndex::new();
        index.record(4);

        let origin = InputPosition { line: 7, column: 5, offset: 100 };
        assert_eq!(index.position(2, origin), InputPosition { line: 7, column: 7, offset: 102 });
        // Past the first newline the column restarts from 1.
        assert_eq!(index.position(6, origin), InputPosition { line: 8, column: 3, offset: 106 });
    }

    #[test]
    fn rewind_truncates_past_starts() {
        let mut index = LineIndex::new();
        index.record(3);
        index.record(6);
        index.rewind(4);
        assert_eq!(
            index.position(5, InputPosition::START),
            InputPosition { line: 2, column: 3, offset: 5 }
        );
        // Re-recording after a rewind does not duplicate the entry.
        index.record(3);
        index.record(6);
        assert_eq!(
            index.position(6, InputPosition::START),
            InputPosition { line: 3, column: 1, offset: 6 }
        );
    }
}
