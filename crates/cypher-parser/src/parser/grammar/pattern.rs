//! Graph patterns: paths, node patterns, relationship patterns and
//! variable-length ranges.

use crate::ast::{nodes, Direction};
use crate::error::Error;
use crate::parser::grammar::{atom, bail, lexical};
use crate::parser::Driver;

use lexical::{keyword, sym, sym_eq, sym_seq};

/// *Pattern*: PatternPart (`,` PatternPart)*
pub(super) fn pattern(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let Some(first) = pattern_part(p)? else { bail!(p, m) };
    p.sequence_add(first);
    loop {
        let cm = p.mark();
        if !sym(p, b',')? {
            break;
        }
        match pattern_part(p)? {
            Some(index) => p.sequence_add(index),
            None => {
                p.expected("a pattern")?;
                p.rewind(cm);
                break;
            }
        }
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::pattern(block))?))
}

/// One path of a pattern: a named path, a shortest-path application, or a
/// plain path.
pub(super) fn pattern_part(p: &mut Driver) -> Result<Option<usize>, Error> {
    // `identifier = path`
    let m = p.mark();
    p.block_start();
    'named: {
        let Some(identifier) = atom::identifier(p)? else { break 'named };
        if !sym_eq(p)? {
            break 'named;
        }
        let path = if let Some(index) = shortest_path(p)? {
            index
        } else if let Some(index) = pattern_path(p, false)? {
            index
        } else {
            bail!(p, m, "a pattern path");
        };
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::named_path(identifier, path, block))?));
    }
    p.block_discard();
    p.rewind(m);

    if let Some(index) = shortest_path(p)? {
        return Ok(Some(index));
    }
    pattern_path(p, false)
}

/// `shortestPath( path )` or `allShortestPaths( path )`
pub(super) fn shortest_path(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let single = if keyword(p, "SHORTESTPATH")? {
        true
    } else if keyword(p, "ALLSHORTESTPATHS")? {
        false
    } else {
        bail!(p, m);
    };
    if !sym(p, b'(')? {
        bail!(p, m, "'('");
    }
    let Some(path) = pattern_path(p, false)? else { bail!(p, m, "a pattern path") };
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::shortest_path(single, path, block))?))
}

/// *PatternPath*: NodePattern (RelPattern NodePattern)*
///
/// In expression position a path must contain at least one relationship,
/// so a parenthesized expression is not swallowed as a node pattern.
pub(super) fn pattern_path(p: &mut Driver, require_rel: bool) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let Some(first) = node_pattern(p)? else { bail!(p, m) };
    p.sequence_add(first);

    let mut rels = 0;
    loop {
        let em = p.mark();
        let Some(rel) = rel_pattern(p)? else { break };
        match node_pattern(p)? {
            Some(node) => {
                p.sequence_add(rel);
                p.sequence_add(node);
                rels += 1;
            }
            None => {
                p.expected("a node pattern")?;
                p.rewind(em);
                break;
            }
        }
    }

    if require_rel && rels == 0 {
        bail!(p, m);
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::pattern_path(block))?))
}

/// *NodePattern*: `(` Identifier? (`:` Label)* Properties? `)`
fn node_pattern(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !sym(p, b'(')? {
        bail!(p, m);
    }
    let identifier = atom::identifier(p)?;
    loop {
        if p.peek()? != Some(b':') {
            break;
        }
        sym(p, b':')?;
        let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
        p.sequence_add(label);
    }
    let properties = properties(p)?;
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::node_pattern(identifier, properties, block))?))
}

/// *RelPattern*: `<`? `-` (`[` detail `]`)? `-` `>`?
fn rel_pattern(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();

    let inbound = sym_seq(p, b"<-")? || {
        if !sym(p, b'-')? {
            bail!(p, m);
        }
        false
    };

    let mut identifier = None;
    let mut varlength = None;
    let mut props = None;
    if sym(p, b'[')? {
        identifier = atom::identifier(p)?;
        if sym(p, b':')? {
            loop {
                let Some(reltype) = atom::reltype_node(p)? else { bail!(p, m, "a relationship type") };
                p.sequence_add(reltype);
                if sym_seq(p, b"|:")? {
                    continue;
                }
                if sym(p, b'|')? {
                    continue;
                }
                break;
            }
        }
        if sym(p, b'*')? {
            varlength = Some(varlength_range(p)?);
        }
        props = properties(p)?;
        if !sym(p, b']')? {
            bail!(p, m, "']'");
        }
    }

    let outbound = if sym_seq(p, b"->")? {
        true
    } else if sym(p, b'-')? {
        false
    } else {
        bail!(p, m, "'-'");
    };

    let direction = match (inbound, outbound) {
        (true, false) => Direction::Inbound,
        (false, true) => Direction::Outbound,
        _ => Direction::Bidirectional,
    };

    let block = p.block_end();
    Ok(Some(p.emit(nodes::rel_pattern(
        direction, identifier, varlength, props, block,
    ))?))
}

/// The range following `*`: `n`, `n..`, `..m`, `n..m`, or nothing. A bare
/// bound (`*n`) starts and ends the range at the same node.
fn varlength_range(p: &mut Driver) -> Result<usize, Error> {
    p.block_start();
    let start = lexical::integer_literal(p)?;
    let (start, end) = if sym_seq(p, b"..")? {
        (start, lexical::integer_literal(p)?)
    } else {
        (start, start)
    };
    let block = p.block_end();
    p.emit(nodes::range(start, end, block))
}

/// Node or relationship properties: a map literal or a parameter.
fn properties(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some(index) = atom::map_literal(p)? {
        return Ok(Some(index));
    }
    atom::parameter(p)
}
