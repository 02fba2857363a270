//! Top-level rules: the directive entry point, statements and their
//! options, client commands, and error recovery.

use crate::ast::nodes;
use crate::error::Error;
use crate::parser::grammar::{lexical, query, schema};
use crate::parser::Driver;

/// The start rule. Parses one directive (a statement, or a client command
/// when commands are enabled), or recovers past unparseable input,
/// accumulating diagnostics.
pub(crate) fn directive(p: &mut Driver) -> Result<(), Error> {
    lexical::trivia(p, false)?;
    if p.at_end()? {
        return Ok(());
    }

    if !p.config.only_statements && p.peek()? == Some(b':') {
        if let Some(index) = command(p)? {
            p.set_directive(index);
            return Ok(());
        }
    }

    if let Some(index) = statement(p)? {
        p.set_directive(index);
        return Ok(());
    }

    recover(p)
}

/// *Statement*: StatementOption* (SchemaCommand | Query) (`;` | EOF)
pub(super) fn statement(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();

    loop {
        if let Some(index) = cypher_option(p)? {
            p.sequence_add(index);
        } else if let Some(index) = explain_option(p)? {
            p.sequence_add(index);
        } else if let Some(index) = profile_option(p)? {
            p.sequence_add(index);
        } else {
            break;
        }
    }

    let body = if let Some(index) = schema::schema_command(p)? {
        index
    } else if let Some(index) = query::query(p)? {
        index
    } else {
        p.expected("a statement")?;
        p.block_discard();
        p.rewind(m);
        return Ok(None);
    };

    if !lexical::sym_raw(p, b';')? && !p.at_end()? {
        p.expected("a clause")?;
        p.expected("';'")?;
        p.block_discard();
        p.rewind(m);
        return Ok(None);
    }

    let block = p.block_end();
    let node = nodes::statement(body, block);
    Ok(Some(p.emit(node)?))
}

/// `CYPHER [version] [name=value ...]`
fn cypher_option(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !lexical::keyword(p, "CYPHER")? {
        p.block_discard();
        p.rewind(m);
        return Ok(None);
    }

    let version = version_number(p)?;
    loop {
        let pm = p.mark();
        p.block_start();
        let name = match option_param_name(p)? {
            Some(index) => index,
            None => {
                p.block_discard();
                p.rewind(pm);
                break;
            }
        };
        if !lexical::sym_eq(p)? {
            p.block_discard();
            p.rewind(pm);
            break;
        }
        let value = match option_param_value(p)? {
            Some(index) => index,
            None => {
                p.expected("an option value")?;
                p.block_discard();
                p.rewind(pm);
                break;
            }
        };
        let block = p.block_end();
        let param = p.emit(nodes::cypher_option_param(name, value, block))?;
        p.sequence_add(param);
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::cypher_option(version, block))?))
}

/// A dotted version number such as `2.3`, captured as a string node.
fn version_number(p: &mut Driver) -> Result<Option<usize>, Error> {
    if !matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
        return Ok(None);
    }
    let start = p.offset();
    while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
        p.bump()?;
    }
    while p.peek()? == Some(b'.') && matches!(p.peek_at(1)?, Some(b) if b.is_ascii_digit()) {
        p.bump()?;
        while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
            p.bump()?;
        }
    }
    let end = p.offset();
    let range = lexical::range_of(p, start, end);
    let value = lexical::text(p, start, end);
    p.set_token_end();
    lexical::trivia(p, true)?;
    Ok(Some(p.add_child(nodes::string(value, range))))
}

fn option_param_name(p: &mut Driver) -> Result<Option<usize>, Error> {
    match lexical::symbolic_name(p, true)? {
        Some((name, range)) => Ok(Some(p.add_child(nodes::string(name, range)))),
        None => Ok(None),
    }
}

fn option_param_value(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some((value, range)) = lexical::quoted_string(p)? {
        return Ok(Some(p.add_child(nodes::string(value, range))));
    }
    match lexical::symbolic_name(p, false)? {
        Some((value, range)) => Ok(Some(p.add_child(nodes::string(value, range)))),
        None => Ok(None),
    }
}

fn explain_option(p: &mut Driver) -> Result<Option<usize>, Error> {
    p.block_start();
    if !lexical::keyword(p, "EXPLAIN")? {
        p.block_discard();
        return Ok(None);
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::explain_option(block))?))
}

fn profile_option(p: &mut Driver) -> Result<Option<usize>, Error> {
    p.block_start();
    if !lexical::keyword(p, "PROFILE")? {
        p.block_discard();
        return Ok(None);
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::profile_option(block))?))
}

/// A client command: `:name arg ...`, terminated by the end of the line.
/// The name and arguments are all string nodes.
fn command(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    p.bump()?; // the ':' sigil, checked by the caller

    let name = match command_word(p)? {
        Some(index) => index,
        None => {
            p.expected("a command name")?;
            p.block_discard();
            p.rewind(m);
            return Ok(None);
        }
    };

    loop {
        command_spaces(p)?;
        match p.peek()? {
            None | Some(b'\n') | Some(b'\r') => break,
            Some(b'"') | Some(b'\'') => {
                let (value, range) = match lexical::quoted_string(p)? {
                    Some(parsed) => parsed,
                    None => break,
                };
                let arg = p.add_child(nodes::string(value, range));
                p.sequence_add(arg);
                // The string's trailing trivia may have crossed the end of
                // the line; the command ends there.
                let crossed_eol = p
                    .window_slice(p.token_end(), p.offset())
                    .iter()
                    .any(|&b| b == b'\n' || b == b'\r');
                if crossed_eol {
                    return finish_command(p, name);
                }
            }
            _ => {
                if let Some(arg) = command_word(p)? {
                    p.sequence_add(arg);
                } else {
                    break;
                }
            }
        }
    }

    // Consume the line terminator; it is not part of the command's range.
    if matches!(p.peek()?, Some(b'\r')) {
        p.bump()?;
    }
    if matches!(p.peek()?, Some(b'\n')) {
        p.bump()?;
    }

    finish_command(p, name)
}

fn finish_command(p: &mut Driver, name: usize) -> Result<Option<usize>, Error> {
    let block = p.block_end();
    Ok(Some(p.emit(nodes::command(name, block))?))
}

/// A bare command word: anything up to whitespace.
fn command_word(p: &mut Driver) -> Result<Option<usize>, Error> {
    let start = p.offset();
    while let Some(byte) = p.peek()? {
        if byte.is_ascii_whitespace() {
            break;
        }
        p.bump()?;
    }
    if p.offset() == start {
        return Ok(None);
    }
    let end = p.offset();
    let range = lexical::range_of(p, start, end);
    let value = lexical::text(p, start, end);
    p.set_token_end();
    Ok(Some(p.add_child(nodes::string(value, range))))
}

/// Horizontal whitespace only; commands are line oriented.
fn command_spaces(p: &mut Driver) -> Result<(), Error> {
    while matches!(p.peek()?, Some(b' ') | Some(b'\t')) {
        p.bump()?;
    }
    Ok(())
}

/// Commit pending expectation notes to a diagnostic, then skip up to and
/// including the next `;` so parsing can resume at the top. The skipped
/// span is preserved as an error node.
fn recover(p: &mut Driver) -> Result<(), Error> {
    p.reify_errors();

    p.block_start();
    loop {
        match p.peek()? {
            None => break,
            Some(b';') => {
                p.bump()?;
                break;
            }
            Some(_) => {
                p.bump()?;
            }
        }
    }
    p.set_token_end();

    let block = p.block_end();
    let value = lexical::text(p, block.buffer_start, block.buffer_end);
    let node = nodes::error(value, block.range);
    p.add_terminal(block, node);
    Ok(())
}
