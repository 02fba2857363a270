//! Lexical ground rules: trivia, keywords, punctuation, symbolic names,
//! string and numeric literals.
//!
//! Token helpers record the token's end offset before consuming trailing
//! trivia, so enclosing blocks close at the last meaningful byte.

use crate::ast::nodes;
use crate::error::Error;
use crate::parser::Driver;
use crate::source::InputRange;

/// Words that cannot be used as plain identifiers; backquoting lifts the
/// restriction.
const RESERVED: &[&str] = &[
    "ALL",
    "AND",
    "AS",
    "ASC",
    "ASCENDING",
    "BY",
    "CASE",
    "CONTAINS",
    "CREATE",
    "DELETE",
    "DESC",
    "DESCENDING",
    "DETACH",
    "DISTINCT",
    "DROP",
    "ELSE",
    "END",
    "ENDS",
    "FALSE",
    "FOREACH",
    "IN",
    "IS",
    "LIMIT",
    "MATCH",
    "MERGE",
    "NOT",
    "NULL",
    "ON",
    "OPTIONAL",
    "OR",
    "ORDER",
    "REMOVE",
    "RETURN",
    "SET",
    "SKIP",
    "STARTS",
    "THEN",
    "TRUE",
    "UNION",
    "UNWIND",
    "WHEN",
    "WHERE",
    "WITH",
    "XOR",
];

pub(super) fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte >= 0x80
}

pub(super) fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

/// Consume whitespace and comments. Comments become AST nodes in the
/// current block when `emit` is set; at directive level they are plain
/// trivia.
pub(crate) fn trivia(p: &mut Driver, emit: bool) -> Result<(), Error> {
    loop {
        match p.peek()? {
            Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') | Some(b'\x0b')
            | Some(b'\x0c') => {
                p.bump()?;
            }
            Some(b'/') => match p.peek_at(1)? {
                Some(b'/') => line_comment(p, emit)?,
                Some(b'*') => block_comment(p, emit)?,
                _ => return Ok(()),
            },
            _ => return Ok(()),
        }
    }
}

/// Whitespace following a token; comments here belong to the statement
/// being parsed.
pub(super) fn ws(p: &mut Driver) -> Result<(), Error> {
    trivia(p, true)
}

fn line_comment(p: &mut Driver, emit: bool) -> Result<(), Error> {
    let start = p.offset();
    p.bump()?;
    p.bump()?;
    let text_start = p.offset();
    while let Some(byte) = p.peek()? {
        if byte == b'\n' || byte == b'\r' {
            break;
        }
        p.bump()?;
    }
    if emit {
        let range = range_of(p, start, p.offset());
        let value = text(p, text_start, p.offset());
        let node = nodes::line_comment(value, range);
        p.add_child(node);
    }
    Ok(())
}

fn block_comment(p: &mut Driver, emit: bool) -> Result<(), Error> {
    let start = p.offset();
    p.bump()?;
    p.bump()?;
    let text_start = p.offset();
    let mut text_end = text_start;
    loop {
        match p.peek()? {
            None => {
                // Unterminated; runs to end of input.
                p.expected("\"*/\"")?;
                text_end = p.offset();
                break;
            }
            Some(b'*') if p.peek_at(1)? == Some(b'/') => {
                text_end = p.offset();
                p.bump()?;
                p.bump()?;
                break;
            }
            _ => {
                p.bump()?;
            }
        }
    }
    if emit {
        let range = range_of(p, start, p.offset());
        let value = text(p, text_start, text_end);
        let node = nodes::block_comment(value, range);
        p.add_child(node);
    }
    Ok(())
}

pub(super) fn range_of(p: &Driver, start: usize, end: usize) -> InputRange {
    InputRange {
        start: p.position_at(start),
        end: p.position_at(end),
    }
}

pub(super) fn text(p: &Driver, start: usize, end: usize) -> String {
    String::from_utf8_lossy(p.window_slice(start, end)).into_owned()
}

/// Match a keyword, ASCII case insensitively and on a word boundary, then
/// consume trailing trivia.
pub(super) fn keyword(p: &mut Driver, kw: &str) -> Result<bool, Error> {
    debug_assert!(kw.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    for (i, k) in kw.bytes().enumerate() {
        match p.peek_at(i)? {
            Some(byte) if byte.to_ascii_uppercase() == k => {}
            _ => return Ok(false),
        }
    }
    if let Some(byte) = p.peek_at(kw.len())? {
        if is_ident_byte(byte) {
            return Ok(false);
        }
    }
    for _ in 0..kw.len() {
        p.bump()?;
    }
    p.set_token_end();
    ws(p)?;
    Ok(true)
}

/// Match a sequence of keywords, all or nothing.
pub(super) fn keywords(p: &mut Driver, kws: &[&str]) -> Result<bool, Error> {
    let m = p.mark();
    for kw in kws {
        if !keyword(p, kw)? {
            p.rewind(m);
            return Ok(false);
        }
    }
    Ok(true)
}

/// Match a single punctuation byte and consume trailing trivia.
pub(super) fn sym(p: &mut Driver, byte: u8) -> Result<bool, Error> {
    if p.peek()? == Some(byte) {
        p.bump()?;
        p.set_token_end();
        ws(p)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Match a multi-byte punctuation sequence.
pub(super) fn sym_seq(p: &mut Driver, bytes: &[u8]) -> Result<bool, Error> {
    for (i, &b) in bytes.iter().enumerate() {
        if p.peek_at(i)? != Some(b) {
            return Ok(false);
        }
    }
    for _ in 0..bytes.len() {
        p.bump()?;
    }
    p.set_token_end();
    ws(p)?;
    Ok(true)
}

/// Match a byte without consuming trailing trivia; used for terminators
/// whose following trivia belongs to the next segment.
pub(super) fn sym_raw(p: &mut Driver, byte: u8) -> Result<bool, Error> {
    if p.peek()? == Some(byte) {
        p.bump()?;
        p.set_token_end();
        Ok(true)
    } else {
        Ok(false)
    }
}

/// `=` that is not the start of `=~`.
pub(super) fn sym_eq(p: &mut Driver) -> Result<bool, Error> {
    if p.peek()? == Some(b'=') && p.peek_at(1)? != Some(b'~') {
        p.bump()?;
        p.set_token_end();
        ws(p)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// A symbolic name: a plain identifier word or a backquoted name with
/// doubled-backquote escapes. Reserved words are only rejected when
/// `check_reserved` is set.
pub(super) fn symbolic_name(
    p: &mut Driver,
    check_reserved: bool,
) -> Result<Option<(String, InputRange)>, Error> {
    match p.peek()? {
        Some(b'`') => quoted_name(p),
        Some(byte) if is_ident_start(byte) => {
            let m = p.mark();
            let start = p.offset();
            p.bump()?;
            while let Some(byte) = p.peek()? {
                if !is_ident_byte(byte) {
                    break;
                }
                p.bump()?;
            }
            let end = p.offset();
            let name = text(p, start, end);
            if check_reserved && RESERVED.iter().any(|kw| name.eq_ignore_ascii_case(kw)) {
                p.rewind(m);
                return Ok(None);
            }
            let range = range_of(p, start, end);
            p.set_token_end();
            ws(p)?;
            Ok(Some((name, range)))
        }
        _ => Ok(None),
    }
}

fn quoted_name(p: &mut Driver) -> Result<Option<(String, InputRange)>, Error> {
    let m = p.mark();
    let start = p.offset();
    p.bump()?;
    p.strbuf.reset();
    loop {
        match p.peek()? {
            None => {
                p.expected("'`'")?;
                p.rewind(m);
                return Ok(None);
            }
            Some(b'`') if p.peek_at(1)? == Some(b'`') => {
                p.bump()?;
                p.bump()?;
                p.strbuf.append(b"`");
            }
            Some(b'`') => {
                p.bump()?;
                break;
            }
            Some(byte) => {
                p.bump()?;
                p.strbuf.append(&[byte]);
            }
        }
    }
    let range = range_of(p, start, p.offset());
    let name = p.strbuf.take_string();
    p.set_token_end();
    ws(p)?;
    Ok(Some((name, range)))
}

/// A quoted string literal with backslash escapes, accumulated through the
/// scratch buffer. Both `'` and `"` quotes are accepted.
pub(super) fn quoted_string(p: &mut Driver) -> Result<Option<(String, InputRange)>, Error> {
    let quote = match p.peek()? {
        Some(q @ (b'\'' | b'"')) => q,
        _ => return Ok(None),
    };
    let m = p.mark();
    let start = p.offset();
    p.bump()?;
    p.strbuf.reset();
    loop {
        match p.peek()? {
            None => {
                p.expected("a string")?;
                p.rewind(m);
                return Ok(None);
            }
            Some(q) if q == quote => {
                p.bump()?;
                break;
            }
            Some(b'\\') => {
                p.bump()?;
                escape_sequence(p)?;
            }
            Some(byte) => {
                p.bump()?;
                p.strbuf.append(&[byte]);
            }
        }
    }
    let range = range_of(p, start, p.offset());
    let value = p.strbuf.take_string();
    p.set_token_end();
    ws(p)?;
    Ok(Some((value, range)))
}

fn escape_sequence(p: &mut Driver) -> Result<(), Error> {
    match p.bump()? {
        None => {}
        Some(b'b') => p.strbuf.append(b"\x08"),
        Some(b'f') => p.strbuf.append(b"\x0c"),
        Some(b'n') => p.strbuf.append(b"\n"),
        Some(b'r') => p.strbuf.append(b"\r"),
        Some(b't') => p.strbuf.append(b"\t"),
        Some(b'u') => unicode_escape(p, 4)?,
        Some(b'U') => unicode_escape(p, 8)?,
        // Includes `\\`, `\'`, `\"` and anything unrecognized, which passes
        // through unchanged.
        Some(byte) => p.strbuf.append(&[byte]),
    }
    Ok(())
}

fn unicode_escape(p: &mut Driver, digits: u32) -> Result<(), Error> {
    let mut value: u32 = 0;
    for i in 0..digits {
        match p.peek_at(i as usize)? {
            Some(byte) if byte.is_ascii_hexdigit() => {
                value = value * 16 + (byte as char).to_digit(16).expect("hex digit");
            }
            _ => {
                // Not a full escape; keep the introducer literally.
                p.strbuf.append(if digits == 4 { b"u" } else { b"U" });
                return Ok(());
            }
        }
    }
    for _ in 0..digits {
        p.bump()?;
    }
    match char::from_u32(value) {
        Some(c) => p.strbuf.append_char(c),
        None => p.strbuf.append_char(char::REPLACEMENT_CHARACTER),
    }
    Ok(())
}

/// A numeric literal: hex and octal integers, decimal integers, and
/// floats with fraction and/or exponent. The node keeps the literal text
/// as written.
pub(super) fn number(p: &mut Driver) -> Result<Option<usize>, Error> {
    let start = p.offset();
    match p.peek()? {
        Some(b'0') if matches!(p.peek_at(1)?, Some(b'x') | Some(b'X')) => {
            if !matches!(p.peek_at(2)?, Some(b) if b.is_ascii_hexdigit()) {
                return Ok(None);
            }
            p.bump()?;
            p.bump()?;
            while matches!(p.peek()?, Some(b) if b.is_ascii_hexdigit()) {
                p.bump()?;
            }
            return Ok(Some(finish_number(p, start, false)?));
        }
        Some(b) if b.is_ascii_digit() => {}
        _ => return Ok(None),
    }

    while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
        p.bump()?;
    }

    let mut float = false;
    if p.peek()? == Some(b'.') && matches!(p.peek_at(1)?, Some(b) if b.is_ascii_digit()) {
        float = true;
        p.bump()?;
        while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
            p.bump()?;
        }
    }
    if matches!(p.peek()?, Some(b'e') | Some(b'E')) {
        let mut i = 1;
        if matches!(p.peek_at(1)?, Some(b'+') | Some(b'-')) {
            i = 2;
        }
        if matches!(p.peek_at(i)?, Some(b) if b.is_ascii_digit()) {
            float = true;
            for _ in 0..i {
                p.bump()?;
            }
            while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
                p.bump()?;
            }
        }
    }

    Ok(Some(finish_number(p, start, float)?))
}

fn finish_number(p: &mut Driver, start: usize, float: bool) -> Result<usize, Error> {
    let end = p.offset();
    let range = range_of(p, start, end);
    let value = text(p, start, end);
    p.set_token_end();
    ws(p)?;
    let node = if float {
        nodes::float(value, range)
    } else {
        nodes::integer(value, range)
    };
    Ok(p.add_child(node))
}

/// A decimal integer literal only, used by ranges and `USING PERIODIC
/// COMMIT`.
pub(super) fn integer_literal(p: &mut Driver) -> Result<Option<usize>, Error> {
    if !matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
        return Ok(None);
    }
    let start = p.offset();
    while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
        p.bump()?;
    }
    Ok(Some(finish_number(p, start, false)?))
}
