//! Error tracking: candidate expectation labels accumulate at the furthest
//! reached input position and are reified into a diagnostic when the parser
//! commits to failure.

use crate::config::Colorization;
use crate::error::ParseError;
use crate::source::InputPosition;

#[derive(Debug)]
pub(crate) struct ErrorTracking {
    colorization: &'static Colorization,
    last_position: Option<InputPosition>,
    last_char: Option<u8>,
    labels: Vec<&'static str>,
    errors: Vec<ParseError>,
    last_error_offset: Option<usize>,
}

impl ErrorTracking {
    pub(crate) fn new(colorization: &'static Colorization) -> Self {
        ErrorTracking {
            colorization,
            last_position: None,
            last_char: None,
            labels: Vec::new(),
            errors: Vec::new(),
            last_error_offset: None,
        }
    }

    /// Note that `label` was expected at `position`, where `c` is the byte
    /// found instead (`None` at end of input). Notes before the furthest
    /// position reached so far are discarded; a new furthest position
    /// resets the label list; duplicate labels are dropped.
    pub(crate) fn note(&mut self, position: InputPosition, c: Option<u8>, label: &'static str) {
        if let Some(last) = self.last_position {
            if position.offset < last.offset {
                return;
            }
        }
        if let Some(last_error) = self.last_error_offset {
            if !self.errors.is_empty() && position.offset <= last_error {
                return;
            }
        }

        if self.labels.is_empty() || Some(position.offset) > self.last_position.map(|p| p.offset) {
            self.last_position = Some(position);
            self.last_char = c;
            self.labels.clear();
        }

        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Mint a diagnostic from the pending notes. Emits at most one
    /// diagnostic per input offset; without pending notes this is a no-op.
    pub(crate) fn reify(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        let position = self.last_position.expect("labels imply a noted position");

        let c = self.colorization;
        let mut message = format!(
            "{}Invalid input{} {}{}{}: {}expected",
            c.error[0],
            c.error[1],
            c.error_token[0],
            chardesc(self.last_char),
            c.error_token[1],
            c.error_message[0],
        );
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                if i + 1 == self.labels.len() {
                    message.push_str(if self.labels.len() > 2 { ", or" } else { " or" });
                } else {
                    message.push(',');
                }
            }
            message.push(' ');
            message.push_str(label);
        }
        message.push_str(c.error_message[1]);

        self.errors.push(ParseError {
            position,
            message,
            context: None,
            context_offset: 0,
        });
        self.last_error_offset = Some(position.offset);

        self.last_position = None;
        self.last_char = None;
        self.labels.clear();
    }

    /// Discard pending notes; called when a segment parses successfully.
    pub(crate) fn clear_potentials(&mut self) {
        self.last_position = None;
        self.last_char = None;
        self.labels.clear();
    }

    pub(crate) fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn errors_mut(&mut self) -> &mut [ParseError] {
        &mut self.errors
    }

    /// Hand the accumulated diagnostics to the current segment.
    pub(crate) fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }
}

fn chardesc(c: Option<u8>) -> String {
    match c {
        None => "at end of input".to_string(),
        Some(b'\x07') => "'\\a'".to_string(),
        Some(b'\x08') => "'\\b'".to_string(),
        Some(b'\x0c') => "'\\f'".to_string(),
        Some(b'\n') => "'\\n'".to_string(),
        Some(b'\r') => "'\\r'".to_string(),
        Some(b'\t') => "'\\t'".to_string(),
        Some(b'\x0b') => "'\\v'".to_string(),
        Some(b'\'') => "'\\''".to_string(),
        Some(c) => format!("'{}'", c as char),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NO_COLORIZATION;

    fn at(offset: usize) -> InputPosition {
        InputPosition {
            line: 1,
            column: offset as u32 + 1,
            offset,
        }
    }

    #[test]
    fn furthest_position_wins() {
        let mut et = ErrorTracking::new(&NO_COLORIZATION);
        et.note(at(3), Some(b'x'), "a name");
        et.note(at(1), Some(b'y'), "discarded");
        et.note(at(3), Some(b'x'), "a name");
        et.note(at(3), Some(b'x'), "an expression");
        et.reify();

        let errors = et.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].position().offset, 3);
        assert_eq!(
            errors[0].message(),
            "Invalid input 'x': expected a name or an expression"
        );
    }

    #[test]
    fn advancing_resets_labels() {
        let mut et = ErrorTracking::new(&NO_COLORIZATION);
        et.note(at(1), Some(b'a'), "stale");
        et.note(at(5), Some(b'b'), "fresh");
        et.reify();
        let errors = et.take_errors();
        assert_eq!(errors[0].message(), "Invalid input 'b': expected fresh");
    }

    #[test]
    fn three_labels_use_an_oxford_or() {
        let mut et = ErrorTracking::new(&NO_COLORIZATION);
        et.note(at(0), Some(b'!'), "one");
        et.note(at(0), Some(b'!'), "two");
        et.note(at(0), Some(b'!'), "three");
        et.reify();
        let errors = et.take_errors();
        assert_eq!(
            errors[0].message(),
            "Invalid input '!': expected one, two, or three"
        );
    }

    #[test]
    fn at_most_one_error_per_offset() {
        let mut et = ErrorTracking::new(&NO_COLORIZATION);
        et.note(at(2), Some(b'x'), "first");
        et.reify();
        // A later note at the same offset is discarded while its error is
        // still pending.
        et.note(at(2), Some(b'x'), "again");
        et.reify();
        assert_eq!(et.take_errors().len(), 1);
    }

    #[test]
    fn end_of_input_renders_specially() {
        let mut et = ErrorTracking::new(&NO_COLORIZATION);
        et.note(at(9), None, "an expression");
        et.reify();
        let errors = et.take_errors();
        assert_eq!(
            errors[0].message(),
            "Invalid input at end of input: expected an expression"
        );
    }

    #[test]
    fn reify_without_notes_is_a_no_op() {
        let mut et = ErrorTracking::new(&NO_COLORIZATION);
        et.reify();
        assert!(!et.has_errors());
    }
}
