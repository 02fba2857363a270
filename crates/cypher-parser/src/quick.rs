//! Quick, AST-less segmentation.
//!
//! Splits input into raw top-level statements and client commands without
//! building a tree, respecting quoted strings, backquoted names and
//! comments while scanning for terminators. Useful for shells that need to
//! know where a statement ends before deciding what to do with it.

use std::borrow::Cow;
use std::io;
use std::ops::ControlFlow;

use crate::error::Error;
use crate::source::{InputPosition, InputRange, LineIndex, ReaderSource, Source, TextSource};

/// One raw segment reported by the quick parser.
#[derive(Debug)]
pub struct QuickSegment<'a> {
    is_statement: bool,
    text: Cow<'a, str>,
    range: InputRange,
    next: InputPosition,
    eof: bool,
}

impl QuickSegment<'_> {
    /// True for a statement, false for a client command.
    pub fn is_statement(&self) -> bool {
        self.is_statement
    }

    pub fn is_command(&self) -> bool {
        !self.is_statement
    }

    /// The raw segment text, without the terminator.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The input range of the text.
    pub fn range(&self) -> InputRange {
        self.range
    }

    /// The position parsing will resume at after this segment.
    pub fn next(&self) -> InputPosition {
        self.next
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }
}

/// Builder-style quick parser, mirroring [`Parser`](crate::Parser).
pub struct QuickParser<'s> {
    source: Box<dyn Source + 's>,
    single: bool,
    only_statements: bool,
}

impl<'s> QuickParser<'s> {
    pub fn new(input: &'s str) -> Self {
        QuickParser {
            source: Box::new(TextSource::new(input)),
            single: false,
            only_statements: false,
        }
    }

    pub fn from_reader(reader: impl io::Read + 's) -> Self {
        QuickParser {
            source: Box::new(ReaderSource::new(reader)),
            single: false,
            only_statements: false,
        }
    }

    /// Stop after the first segment.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Treat a leading `:` as statement text rather than a command.
    pub fn only_statements(mut self) -> Self {
        self.only_statements = true;
        self
    }

    /// Scan the input, handing each raw segment to `callback`. Returns the
    /// position following the last consumed segment.
    pub fn parse_each<F>(self, mut callback: F) -> Result<InputPosition, Error>
    where
        F: FnMut(&QuickSegment<'_>) -> ControlFlow<()>,
    {
        let mut scanner = Scanner {
            source: self.source,
            source_done: false,
            window: Vec::new(),
            pos: 0,
            origin: InputPosition::START,
            lines: LineIndex::new(),
        };

        loop {
            scanner.skip_trivia()?;
            if scanner.at_end()? {
                return Ok(scanner.position_at(scanner.pos));
            }

            let is_statement = scanner.statement_ahead(self.only_statements)?;
            let begin = scanner.pos;
            let text_end = if is_statement {
                scanner.scan_statement()?
            } else {
                scanner.scan_command()?
            };

            let consumed = scanner.pos;
            let eof = scanner.at_end()?;
            let next = scanner.position_at(consumed);
            let stop = {
                let segment = QuickSegment {
                    is_statement,
                    text: String::from_utf8_lossy(&scanner.window[begin..text_end]),
                    range: InputRange {
                        start: scanner.position_at(begin),
                        end: scanner.position_at(text_end),
                    },
                    next,
                    eof,
                };
                callback(&segment).is_break()
            };

            if stop || eof || self.single {
                return Ok(next);
            }

            scanner.origin = next;
            scanner.window.drain(..consumed);
            scanner.pos = 0;
            scanner.lines.reset();
        }
    }
}

struct Scanner<'s> {
    source: Box<dyn Source + 's>,
    source_done: bool,
    window: Vec<u8>,
    pos: usize,
    origin: InputPosition,
    lines: LineIndex,
}

impl Scanner<'_> {
    fn fill(&mut self, upto: usize) -> Result<(), Error> {
        while !self.source_done && self.window.len() < upto {
            let mut buf = [0u8; 4096];
            let n = self.source.read(&mut buf)?;
            if n == 0 {
                self.source_done = true;
            } else {
                self.window.extend_from_slice(&buf[..n]);
            }
        }
        Ok(())
    }

    fn peek(&mut self) -> Result<Option<u8>, Error> {
        self.peek_at(0)
    }

    fn peek_at(&mut self, lookahead: usize) -> Result<Option<u8>, Error> {
        self.fill(self.pos + lookahead + 1)?;
        Ok(self.window.get(self.pos + lookahead).copied())
    }

    fn bump(&mut self) -> Result<Option<u8>, Error> {
        match self.peek()? {
            Some(byte) => {
                self.pos += 1;
                if byte == b'\n' {
                    self.lines.record(self.pos);
                }
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    fn at_end(&mut self) -> Result<bool, Error> {
        Ok(self.peek()?.is_none())
    }

    fn position_at(&self, pos: usize) -> InputPosition {
        self.lines.position(pos, self.origin)
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            match self.peek()? {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') | Some(b'\x0b')
                | Some(b'\x0c') => {
                    self.bump()?;
                }
                Some(b'/') if self.peek_at(1)? == Some(b'/') => {
                    while !matches!(self.peek()?, None | Some(b'\n') | Some(b'\r')) {
                        self.bump()?;
                    }
                }
                Some(b'/') if self.peek_at(1)? == Some(b'*') => {
                    self.bump()?;
                    self.bump()?;
                    loop {
                        match self.peek()? {
                            None => break,
                            Some(b'*') if self.peek_at(1)? == Some(b'/') => {
                                self.bump()?;
                                self.bump()?;
                                break;
                            }
                            _ => {
                                self.bump()?;
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn statement_ahead(&mut self, only_statements: bool) -> Result<bool, Error> {
        Ok(only_statements || self.peek()? != Some(b':'))
    }

    /// Scan statement text up to (not including) the terminating `;`,
    /// which is then consumed. Returns the end of the trimmed text.
    fn scan_statement(&mut self) -> Result<usize, Error> {
        let begin = self.pos;
        loop {
            match self.peek()? {
                None => break,
                Some(b';') => break,
                Some(q @ (b'"' | b'\'')) => self.skip_string(q)?,
                Some(b'`') => self.skip_backquoted()?,
                Some(b'/') if self.peek_at(1)? == Some(b'/') => {
                    while !matches!(self.peek()?, None | Some(b'\n') | Some(b'\r')) {
                        self.bump()?;
                    }
                }
                Some(b'/') if self.peek_at(1)? == Some(b'*') => {
                    self.bump()?;
                    self.bump()?;
                    loop {
                        match self.peek()? {
                            None => break,
                            Some(b'*') if self.peek_at(1)? == Some(b'/') => {
                                self.bump()?;
                                self.bump()?;
                                break;
                            }
                            _ => {
                                self.bump()?;
                            }
                        }
                    }
                }
                Some(_) => {
                    self.bump()?;
                }
            }
        }

        let mut text_end = self.pos;
        while text_end > begin && self.window[text_end - 1].is_ascii_whitespace() {
            text_end -= 1;
        }

        if self.peek()? == Some(b';') {
            self.bump()?;
        }
        Ok(text_end)
    }

    /// Scan command text up to (not including) the end of the line, which
    /// is then consumed.
    fn scan_command(&mut self) -> Result<usize, Error> {
        loop {
            match self.peek()? {
                None | Some(b'\n') | Some(b'\r') => break,
                Some(q @ (b'"' | b'\'')) => self.skip_string(q)?,
                Some(_) => {
                    self.bump()?;
                }
            }
        }
        let text_end = self.pos;
        if self.peek()? == Some(b'\r') {
            self.bump()?;
        }
        if self.peek()? == Some(b'\n') {
            self.bump()?;
        }
        Ok(text_end)
    }

    fn skip_string(&mut self, quote: u8) -> Result<(), Error> {
        self.bump()?;
        loop {
            match self.peek()? {
                None => return Ok(()),
                Some(b'\\') => {
                    self.bump()?;
                    self.bump()?;
                }
                Some(byte) => {
                    self.bump()?;
                    if byte == quote {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn skip_backquoted(&mut self) -> Result<(), Error> {
        self.bump()?;
        while let Some(byte) = self.bump()? {
            if byte == b'`' {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::QuickParser;

    fn segments(input: &str) -> Vec<(bool, String, bool)> {
        let mut out = Vec::new();
        QuickParser::new(input)
            .parse_each(|segment| {
                out.push((
                    segment.is_statement(),
                    segment.text().to_string(),
                    segment.is_eof(),
                ));
                ControlFlow::Continue(())
            })
            .unwrap();
        out
    }

    #[test]
    fn splits_statements_and_commands() {
        let all = segments("RETURN 1;\n:exit now\nRETURN 2;");
        assert_eq!(
            all,
            vec![
                (true, "RETURN 1".to_string(), false),
                (false, ":exit now".to_string(), false),
                (true, "RETURN 2".to_string(), true),
            ]
        );
    }

    #[test]
    fn semicolons_inside_strings_do_not_split() {
        let all = segments("RETURN 'a;b';");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].1, "RETURN 'a;b'");
    }

    #[test]
    fn comments_are_skipped_between_segments() {
        let all = segments("// leading\nRETURN 1; /* mid; comment */ RETURN 2;");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].1, "RETURN 1");
        assert_eq!(all[1].1, "RETURN 2");
    }

    #[test]
    fn only_statements_treats_sigils_as_text() {
        let mut texts = Vec::new();
        QuickParser::new(":not a command;")
            .only_statements()
            .parse_each(|segment| {
                texts.push((segment.is_statement(), segment.text().to_string()));
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(texts, vec![(true, ":not a command".to_string())]);
    }

    #[test]
    fn positions_track_lines() {
        let mut ranges = Vec::new();
        QuickParser::new("RETURN 1;\nRETURN 2;")
            .parse_each(|segment| {
                ranges.push((segment.range(), segment.next()));
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].0.start.line, 1);
        assert_eq!(ranges[1].0.start.line, 2);
        assert_eq!(ranges[1].0.start.column, 1);
        assert_eq!(ranges[1].1.offset, 19);
    }

    #[test]
    fn single_stops_after_one_segment() {
        let mut count = 0;
        QuickParser::new("RETURN 1; RETURN 2;")
            .single()
            .parse_each(|_| {
                count += 1;
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn an_unterminated_statement_ends_at_eof() {
        let all = segments("RETURN 1");
        assert_eq!(all, vec![(true, "RETURN 1".to_string(), true)]);
    }
}
