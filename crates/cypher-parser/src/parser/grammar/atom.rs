//! Expression atoms: literals, identifiers, parameters, maps, collections,
//! comprehensions, `CASE`, function application, and parenthesized or
//! pattern expressions. Also the shared name-node builders other rules
//! use for labels, property names and the like.

use crate::ast::nodes;
use crate::error::Error;
use crate::parser::grammar::{bail, expression, lexical, pattern};
use crate::parser::Driver;
use crate::source::InputRange;

use expression::expression;
use lexical::{keyword, sym, sym_eq, symbolic_name};

pub(super) fn atom(p: &mut Driver) -> Result<Option<usize>, Error> {
    match p.peek()? {
        Some(b'\'') | Some(b'"') => {
            let Some((value, range)) = lexical::quoted_string(p)? else { return Ok(None) };
            Ok(Some(p.add_child(nodes::string(value, range))))
        }
        Some(b'$') => parameter(p),
        Some(b'[') => bracket(p),
        Some(b'{') => map_literal(p),
        Some(b'(') => paren_or_path(p),
        Some(byte) if byte.is_ascii_digit() => lexical::number(p),
        _ => {
            if let Some(index) = boolean_or_null(p)? {
                return Ok(Some(index));
            }
            if let Some(index) = case_expression(p)? {
                return Ok(Some(index));
            }
            if let Some(index) = pattern::shortest_path(p)? {
                return Ok(Some(index));
            }
            if let Some(index) = filter_like(p)? {
                return Ok(Some(index));
            }
            if let Some(index) = extract_expression(p)? {
                return Ok(Some(index));
            }
            if let Some(index) = reduce_expression(p)? {
                return Ok(Some(index));
            }
            if let Some(index) = apply(p)? {
                return Ok(Some(index));
            }
            identifier(p)
        }
    }
}

// ---- shared name-node builders ----

/// A reserved-word-checked symbolic name as an identifier node.
pub(super) fn identifier(p: &mut Driver) -> Result<Option<usize>, Error> {
    match symbolic_name(p, true)? {
        Some((name, range)) => Ok(Some(p.add_child(nodes::identifier(name, range)))),
        None => Ok(None),
    }
}

pub(super) fn prop_name_node(p: &mut Driver) -> Result<Option<usize>, Error> {
    match symbolic_name(p, false)? {
        Some((value, range)) => Ok(Some(p.add_child(nodes::prop_name(value, range)))),
        None => Ok(None),
    }
}

pub(super) fn label_node(p: &mut Driver) -> Result<Option<usize>, Error> {
    match symbolic_name(p, false)? {
        Some((name, range)) => Ok(Some(p.add_child(nodes::label(name, range)))),
        None => Ok(None),
    }
}

pub(super) fn reltype_node(p: &mut Driver) -> Result<Option<usize>, Error> {
    match symbolic_name(p, false)? {
        Some((name, range)) => Ok(Some(p.add_child(nodes::reltype(name, range)))),
        None => Ok(None),
    }
}

pub(super) fn index_name_node(p: &mut Driver) -> Result<Option<usize>, Error> {
    match symbolic_name(p, false)? {
        Some((value, range)) => Ok(Some(p.add_child(nodes::index_name(value, range)))),
        None => Ok(None),
    }
}

/// A possibly dotted procedure name, e.g. `db.labels`.
pub(super) fn proc_name_node(p: &mut Driver) -> Result<Option<usize>, Error> {
    match dotted_name(p)? {
        Some((value, range)) => Ok(Some(p.add_child(nodes::proc_name(value, range)))),
        None => Ok(None),
    }
}

/// `part (. part)*` composed into one name.
fn dotted_name(p: &mut Driver) -> Result<Option<(String, InputRange)>, Error> {
    let Some((mut name, mut range)) = symbolic_name(p, true)? else { return Ok(None) };
    while p.peek()? == Some(b'.') && p.peek_at(1)? != Some(b'.') {
        let m = p.mark();
        sym(p, b'.')?;
        match symbolic_name(p, false)? {
            Some((part, part_range)) => {
                name.push('.');
                name.push_str(&part);
                range.end = part_range.end;
            }
            None => {
                p.rewind(m);
                break;
            }
        }
    }
    Ok(Some((name, range)))
}

// ---- literals ----

fn boolean_or_null(p: &mut Driver) -> Result<Option<usize>, Error> {
    let start = p.offset();
    let node = if keyword(p, "TRUE")? {
        nodes::true_literal(lexical::range_of(p, start, p.token_end()))
    } else if keyword(p, "FALSE")? {
        nodes::false_literal(lexical::range_of(p, start, p.token_end()))
    } else if keyword(p, "NULL")? {
        nodes::null_literal(lexical::range_of(p, start, p.token_end()))
    } else {
        return Ok(None);
    };
    Ok(Some(p.add_child(node)))
}

/// `$name` or `$0`
pub(super) fn parameter(p: &mut Driver) -> Result<Option<usize>, Error> {
    if p.peek()? != Some(b'$') {
        return Ok(None);
    }
    let m = p.mark();
    let start = p.offset();
    p.bump()?;

    if let Some((name, _)) = symbolic_name(p, false)? {
        let range = lexical::range_of(p, start, p.token_end());
        return Ok(Some(p.add_child(nodes::parameter(name, range))));
    }

    if matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
        let digits_start = p.offset();
        while matches!(p.peek()?, Some(b) if b.is_ascii_digit()) {
            p.bump()?;
        }
        let name = lexical::text(p, digits_start, p.offset());
        let range = lexical::range_of(p, start, p.offset());
        p.set_token_end();
        lexical::trivia(p, true)?;
        return Ok(Some(p.add_child(nodes::parameter(name, range))));
    }

    p.expected("a parameter name")?;
    p.rewind(m);
    Ok(None)
}

/// `{ key: value, .. }`
pub(super) fn map_literal(p: &mut Driver) -> Result<Option<usize>, Error> {
    if p.peek()? != Some(b'{') {
        return Ok(None);
    }
    let m = p.mark();
    p.block_start();
    sym(p, b'{')?;

    if !sym(p, b'}')? {
        loop {
            let Some(key) = prop_name_node(p)? else { bail!(p, m, "a property name") };
            p.sequence_add(key);
            if !sym(p, b':')? {
                bail!(p, m, "':'");
            }
            let Some(value) = expression(p)? else { bail!(p, m, "an expression") };
            p.sequence_add(value);
            if !sym(p, b',')? {
                break;
            }
        }
        if !sym(p, b'}')? {
            bail!(p, m, "'}'");
        }
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::map(block))?))
}

// ---- bracketed atoms ----

fn bracket(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some(index) = list_comprehension(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = pattern_comprehension(p)? {
        return Ok(Some(index));
    }
    collection(p)
}

/// `[ id IN expr [WHERE pred] [| eval] ]`
fn list_comprehension(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    sym(p, b'[')?;
    let Some(id) = identifier(p)? else { bail!(p, m) };
    if !keyword(p, "IN")? {
        bail!(p, m);
    }
    let Some(expr) = expression(p)? else { bail!(p, m, "an expression") };

    let predicate = if keyword(p, "WHERE")? {
        match expression(p)? {
            Some(index) => Some(index),
            None => bail!(p, m, "an expression"),
        }
    } else {
        None
    };
    let eval = if sym(p, b'|')? {
        match expression(p)? {
            Some(index) => Some(index),
            None => bail!(p, m, "an expression"),
        }
    } else {
        None
    };
    if !sym(p, b']')? {
        bail!(p, m, "']'");
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::list_comprehension(
        id, expr, predicate, eval, block,
    ))?))
}

/// `[ [id =] path [WHERE pred] | eval ]`
fn pattern_comprehension(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    sym(p, b'[')?;

    let identifier_index = {
        let im = p.mark();
        match identifier(p)? {
            Some(index) => {
                if sym_eq(p)? {
                    Some(index)
                } else {
                    p.rewind(im);
                    None
                }
            }
            None => None,
        }
    };

    let Some(path) = pattern::pattern_path(p, true)? else { bail!(p, m) };

    let predicate = if keyword(p, "WHERE")? {
        match expression(p)? {
            Some(index) => Some(index),
            None => bail!(p, m, "an expression"),
        }
    } else {
        None
    };
    if !sym(p, b'|')? {
        bail!(p, m, "'|'");
    }
    let Some(eval) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b']')? {
        bail!(p, m, "']'");
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::pattern_comprehension(
        identifier_index,
        path,
        predicate,
        eval,
        block,
    ))?))
}

/// `[ expr, .. ]`
fn collection(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !sym(p, b'[')? {
        bail!(p, m);
    }
    if !sym(p, b']')? {
        loop {
            let Some(element) = expression(p)? else { bail!(p, m, "an expression") };
            p.sequence_add(element);
            if !sym(p, b',')? {
                break;
            }
        }
        if !sym(p, b']')? {
            bail!(p, m, "']'");
        }
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::collection(block))?))
}

// ---- structured atoms ----

/// `CASE [expr] (WHEN expr THEN expr)+ [ELSE expr] END`
fn case_expression(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "CASE")? {
        bail!(p, m);
    }

    let subject = expression(p)?;

    let mut alternatives = 0;
    while keyword(p, "WHEN")? {
        let Some(when) = expression(p)? else { bail!(p, m, "an expression") };
        if !keyword(p, "THEN")? {
            bail!(p, m, "THEN");
        }
        let Some(then) = expression(p)? else { bail!(p, m, "an expression") };
        p.sequence_add(when);
        p.sequence_add(then);
        alternatives += 1;
    }
    if alternatives == 0 {
        bail!(p, m, "WHEN");
    }

    let default = if keyword(p, "ELSE")? {
        match expression(p)? {
            Some(index) => Some(index),
            None => bail!(p, m, "an expression"),
        }
    } else {
        None
    };

    if !keyword(p, "END")? {
        bail!(p, m, "END");
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::case(subject, default, block))?))
}

/// `filter/all/any/none/single ( id IN expr WHERE pred )`
fn filter_like(p: &mut Driver) -> Result<Option<usize>, Error> {
    #[derive(Clone, Copy)]
    enum Kind {
        Filter,
        All,
        Any,
        Single,
        NoneOf,
    }
    let m = p.mark();
    p.block_start();

    let kind = if keyword(p, "FILTER")? {
        Kind::Filter
    } else if keyword(p, "ALL")? {
        Kind::All
    } else if keyword(p, "ANY")? {
        Kind::Any
    } else if keyword(p, "SINGLE")? {
        Kind::Single
    } else if keyword(p, "NONE")? {
        Kind::NoneOf
    } else {
        bail!(p, m);
    };

    if !sym(p, b'(')? {
        bail!(p, m);
    }
    let Some(id) = identifier(p)? else { bail!(p, m, "an identifier") };
    if !keyword(p, "IN")? {
        bail!(p, m, "IN");
    }
    let Some(expr) = expression(p)? else { bail!(p, m, "an expression") };
    if !keyword(p, "WHERE")? {
        bail!(p, m, "WHERE");
    }
    let Some(predicate) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }

    let block = p.block_end();
    let node = match kind {
        Kind::Filter => nodes::filter(id, expr, predicate, block),
        Kind::All => nodes::all(id, expr, predicate, block),
        Kind::Any => nodes::any(id, expr, predicate, block),
        Kind::Single => nodes::single(id, expr, predicate, block),
        Kind::NoneOf => nodes::none(id, expr, predicate, block),
    };
    Ok(Some(p.emit(node)?))
}

/// `extract ( id IN expr | eval )`
fn extract_expression(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "EXTRACT")? {
        bail!(p, m);
    }
    if !sym(p, b'(')? {
        bail!(p, m);
    }
    let Some(id) = identifier(p)? else { bail!(p, m, "an identifier") };
    if !keyword(p, "IN")? {
        bail!(p, m, "IN");
    }
    let Some(expr) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b'|')? {
        bail!(p, m, "'|'");
    }
    let Some(eval) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::extract(id, expr, eval, block))?))
}

/// `reduce ( acc = init, id IN expr | eval )`
fn reduce_expression(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "REDUCE")? {
        bail!(p, m);
    }
    if !sym(p, b'(')? {
        bail!(p, m);
    }
    let Some(accumulator) = identifier(p)? else { bail!(p, m, "an identifier") };
    if !sym_eq(p)? {
        bail!(p, m, "'='");
    }
    let Some(init) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b',')? {
        bail!(p, m, "','");
    }
    let Some(id) = identifier(p)? else { bail!(p, m, "an identifier") };
    if !keyword(p, "IN")? {
        bail!(p, m, "IN");
    }
    let Some(expr) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b'|')? {
        bail!(p, m, "'|'");
    }
    let Some(eval) = expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::reduce(accumulator, init, id, expr, eval, block))?))
}

/// Function application: `name ( [DISTINCT] args )` or `name ( [DISTINCT]
/// * )`.
fn apply(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let Some((name, range)) = dotted_name(p)? else { bail!(p, m) };
    if p.peek()? != Some(b'(') {
        bail!(p, m);
    }
    let func = p.add_child(nodes::function_name(name, range));
    sym(p, b'(')?;

    let distinct = keyword(p, "DISTINCT")?;

    if sym(p, b'*')? {
        if !sym(p, b')')? {
            bail!(p, m, "')'");
        }
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::apply_all_operator(func, distinct, block))?));
    }

    if !sym(p, b')')? {
        loop {
            let Some(arg) = expression(p)? else { bail!(p, m, "an expression") };
            p.sequence_add(arg);
            if !sym(p, b',')? {
                break;
            }
        }
        if !sym(p, b')')? {
            bail!(p, m, "')'");
        }
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::apply_operator(func, distinct, block))?))
}

/// A parenthesized expression, or a pattern path in expression position
/// (which must contain at least one relationship).
fn paren_or_path(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some(index) = pattern::pattern_path(p, true)? {
        return Ok(Some(index));
    }

    let m = p.mark();
    if !sym(p, b'(')? {
        return Ok(None);
    }
    let Some(inner) = expression(p)? else {
        p.expected("an expression")?;
        p.rewind(m);
        return Ok(None);
    };
    if !sym(p, b')')? {
        p.expected("')'")?;
        p.rewind(m);
        return Ok(None);
    }
    Ok(Some(inner))
}
