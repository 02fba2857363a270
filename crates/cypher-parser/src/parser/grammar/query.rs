//! Query structure: the clause sequence and every query clause.

use crate::ast::nodes;
use crate::ast::AstKind;
use crate::error::Error;
use crate::parser::grammar::{atom, bail, expression, lexical, pattern};
use crate::parser::Driver;

use lexical::{keyword, keywords, sym, sym_eq, sym_seq};

/// *Query*: QueryOption* Clause+
pub(super) fn query(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();

    loop {
        match query_option(p)? {
            Some(index) => p.sequence_add(index),
            None => break,
        }
    }

    let mut clauses = 0;
    loop {
        match clause(p)? {
            Some(index) => {
                p.sequence_add(index);
                clauses += 1;
            }
            None => break,
        }
    }

    if clauses == 0 {
        bail!(p, m);
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::query(block))?))
}

/// `USING PERIODIC COMMIT [n]`
fn query_option(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keywords(p, &["USING", "PERIODIC", "COMMIT"])? {
        bail!(p, m);
    }
    let limit = lexical::integer_literal(p)?;
    let block = p.block_end();
    Ok(Some(p.emit(nodes::using_periodic_commit(limit, block))?))
}

pub(super) fn clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some(index) = match_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = unwind_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = merge_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = create_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = set_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = delete_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = remove_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = foreach_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = with_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = return_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = call_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = start_clause(p)? {
        return Ok(Some(index));
    }
    if let Some(index) = load_csv_clause(p)? {
        return Ok(Some(index));
    }
    union_clause(p)
}

/// *Match*: `[OPTIONAL] MATCH` Pattern MatchHint* [`WHERE` Expression]
fn match_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let optional = keyword(p, "OPTIONAL")?;
    if !keyword(p, "MATCH")? {
        bail!(p, m);
    }

    let pat = match pattern::pattern(p)? {
        Some(index) => index,
        None => bail!(p, m, "a pattern"),
    };

    loop {
        match match_hint(p)? {
            Some(index) => p.sequence_add(index),
            None => break,
        }
    }

    let predicate = match opt_where(p)? {
        Where::Found(index) => Some(index),
        Where::Absent => None,
        Where::Malformed => bail!(p, m),
    };

    let block = p.block_end();
    Ok(Some(p.emit(nodes::match_clause(
        optional, pat, predicate, block,
    ))?))
}

enum Where {
    Found(usize),
    Absent,
    Malformed,
}

fn opt_where(p: &mut Driver) -> Result<Where, Error> {
    if !keyword(p, "WHERE")? {
        return Ok(Where::Absent);
    }
    match expression::expression(p)? {
        Some(index) => Ok(Where::Found(index)),
        None => {
            p.expected("an expression")?;
            Ok(Where::Malformed)
        }
    }
}

/// `USING INDEX id:Label(prop)`, `USING JOIN ON id, ..`, or
/// `USING SCAN id:Label`
fn match_hint(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "USING")? {
        bail!(p, m);
    }

    if keyword(p, "INDEX")? {
        let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
        if !sym(p, b':')? {
            bail!(p, m, "':'");
        }
        let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
        if !sym(p, b'(')? {
            bail!(p, m, "'('");
        }
        let Some(prop) = atom::prop_name_node(p)? else { bail!(p, m, "a property name") };
        if !sym(p, b')')? {
            bail!(p, m, "')'");
        }
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::using_index(identifier, label, prop, block))?));
    }

    if keywords(p, &["JOIN", "ON"])? {
        loop {
            let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
            p.sequence_add(identifier);
            if !sym(p, b',')? {
                break;
            }
        }
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::using_join(block))?));
    }

    if keyword(p, "SCAN")? {
        let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
        if !sym(p, b':')? {
            bail!(p, m, "':'");
        }
        let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::using_scan(identifier, label, block))?));
    }

    // `USING PERIODIC COMMIT` and anything else is not a hint.
    bail!(p, m);
}

/// *Unwind*: `UNWIND` Expression `AS` Identifier
fn unwind_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "UNWIND")? {
        bail!(p, m);
    }
    let Some(expr) = expression::expression(p)? else { bail!(p, m, "an expression") };
    if !keyword(p, "AS")? {
        bail!(p, m, "AS");
    }
    let Some(alias) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::unwind(expr, alias, block))?))
}

/// *Merge*: `MERGE` PatternPart MergeAction*
fn merge_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "MERGE")? {
        bail!(p, m);
    }
    let Some(path) = pattern::pattern_part(p)? else { bail!(p, m, "a pattern") };

    loop {
        match merge_action(p)? {
            Some(index) => p.sequence_add(index),
            None => break,
        }
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::merge(path, block))?))
}

/// `ON MATCH SET ..` or `ON CREATE SET ..`
fn merge_action(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let on_match = keywords(p, &["ON", "MATCH"])?;
    let on_create = !on_match && keywords(p, &["ON", "CREATE"])?;
    if !on_match && !on_create {
        bail!(p, m);
    }
    if !keyword(p, "SET")? {
        bail!(p, m, "SET");
    }
    if !set_items(p)? {
        bail!(p, m, "a set item");
    }
    let block = p.block_end();
    let node = if on_match {
        nodes::on_match(block)
    } else {
        nodes::on_create(block)
    };
    Ok(Some(p.emit(node)?))
}

/// *Create*: `CREATE [UNIQUE]` Pattern
fn create_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "CREATE")? {
        bail!(p, m);
    }
    let unique = keyword(p, "UNIQUE")?;
    let Some(pat) = pattern::pattern(p)? else { bail!(p, m, "a pattern") };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::create(unique, pat, block))?))
}

/// *Set*: `SET` SetItem (`,` SetItem)*
fn set_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "SET")? {
        bail!(p, m);
    }
    if !set_items(p)? {
        bail!(p, m, "a set item");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::set(block))?))
}

/// Parse a comma-separated set item list into the current block's
/// sequence; false when no item could be parsed.
fn set_items(p: &mut Driver) -> Result<bool, Error> {
    let Some(first) = set_item(p)? else { return Ok(false) };
    p.sequence_add(first);
    loop {
        let m = p.mark();
        if !sym(p, b',')? {
            break;
        }
        match set_item(p)? {
            Some(index) => p.sequence_add(index),
            None => {
                p.expected("a set item")?;
                p.rewind(m);
                break;
            }
        }
    }
    Ok(true)
}

/// One of: `id += expr`, `id :Label..`, `prop.expr = expr`, `id = expr`.
fn set_item(p: &mut Driver) -> Result<Option<usize>, Error> {
    // `identifier += expression`
    let m = p.mark();
    p.block_start();
    'merge_props: {
        let Some(identifier) = atom::identifier(p)? else { break 'merge_props };
        if !sym_seq(p, b"+=")? {
            break 'merge_props;
        }
        let Some(expr) = expression::expression(p)? else { bail!(p, m, "an expression") };
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::merge_properties(identifier, expr, block))?));
    }
    p.block_discard();
    p.rewind(m);

    // `identifier :Label ..`
    p.block_start();
    'labels: {
        let Some(identifier) = atom::identifier(p)? else { break 'labels };
        if p.peek()? != Some(b':') {
            break 'labels;
        }
        while sym(p, b':')? {
            let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
            p.sequence_add(label);
        }
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::set_labels(identifier, block))?));
    }
    p.block_discard();
    p.rewind(m);

    // `property.expression = expression`
    p.block_start();
    'property: {
        let Some(lhs) = expression::postfix(p)? else { break 'property };
        if p.peek_child(lhs).kind() != AstKind::PropertyOperator {
            break 'property;
        }
        if !sym_eq(p)? {
            break 'property;
        }
        let Some(expr) = expression::expression(p)? else { bail!(p, m, "an expression") };
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::set_property(lhs, expr, block))?));
    }
    p.block_discard();
    p.rewind(m);

    // `identifier = expression`
    p.block_start();
    let Some(identifier) = atom::identifier(p)? else { bail!(p, m) };
    if !sym_eq(p)? {
        bail!(p, m, "'='");
    }
    let Some(expr) = expression::expression(p)? else { bail!(p, m, "an expression") };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::set_all_properties(identifier, expr, block))?))
}

/// *Delete*: `[DETACH] DELETE` Expression (`,` Expression)*
fn delete_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let detach = keyword(p, "DETACH")?;
    if !keyword(p, "DELETE")? {
        bail!(p, m);
    }
    loop {
        let Some(expr) = expression::expression(p)? else { bail!(p, m, "an expression") };
        p.sequence_add(expr);
        if !sym(p, b',')? {
            break;
        }
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::delete(detach, block))?))
}

/// *Remove*: `REMOVE` RemoveItem (`,` RemoveItem)*
fn remove_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "REMOVE")? {
        bail!(p, m);
    }
    loop {
        let Some(item) = remove_item(p)? else { bail!(p, m, "a remove item") };
        p.sequence_add(item);
        if !sym(p, b',')? {
            break;
        }
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::remove(block))?))
}

/// `id :Label ..` or `expr.prop`
fn remove_item(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    'labels: {
        let Some(identifier) = atom::identifier(p)? else { break 'labels };
        if p.peek()? != Some(b':') {
            break 'labels;
        }
        while sym(p, b':')? {
            let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
            p.sequence_add(label);
        }
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::remove_labels(identifier, block))?));
    }
    p.block_discard();
    p.rewind(m);

    p.block_start();
    let Some(lhs) = expression::postfix(p)? else { bail!(p, m) };
    if p.peek_child(lhs).kind() != AstKind::PropertyOperator {
        bail!(p, m, "a property");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::remove_property(lhs, block))?))
}

/// *Foreach*: `FOREACH ( id IN expr | Clause+ )`
fn foreach_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "FOREACH")? {
        bail!(p, m);
    }
    if !sym(p, b'(')? {
        bail!(p, m, "'('");
    }
    let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
    if !keyword(p, "IN")? {
        bail!(p, m, "IN");
    }
    let Some(expr) = expression::expression(p)? else { bail!(p, m, "an expression") };
    if !sym(p, b'|')? {
        bail!(p, m, "'|'");
    }
    let mut clauses = 0;
    loop {
        match clause(p)? {
            Some(index) => {
                p.sequence_add(index);
                clauses += 1;
            }
            None => break,
        }
    }
    if clauses == 0 {
        bail!(p, m, "a clause");
    }
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::foreach(identifier, expr, block))?))
}

/// *With*: `WITH [DISTINCT] (* | projections)` OrderBy? Skip? Limit?
/// Where?
fn with_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "WITH")? {
        bail!(p, m);
    }
    let distinct = keyword(p, "DISTINCT")?;

    let mut include_existing = false;
    if sym(p, b'*')? {
        include_existing = true;
        if sym(p, b',')? && !projections(p, true)? {
            bail!(p, m, "a projection");
        }
    } else if !projections(p, true)? {
        bail!(p, m, "a projection");
    }

    let order_by = order_by(p)?;
    let skip = skip_modifier(p)?;
    let limit = limit_modifier(p)?;
    let predicate = match opt_where(p)? {
        Where::Found(index) => Some(index),
        Where::Absent => None,
        Where::Malformed => bail!(p, m),
    };

    let block = p.block_end();
    Ok(Some(p.emit(nodes::with_clause(
        distinct,
        include_existing,
        order_by,
        skip,
        limit,
        predicate,
        block,
    ))?))
}

/// *Return*: `RETURN [DISTINCT] (* | projections)` OrderBy? Skip? Limit?
fn return_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "RETURN")? {
        bail!(p, m);
    }
    let distinct = keyword(p, "DISTINCT")?;

    let mut include_existing = false;
    if sym(p, b'*')? {
        include_existing = true;
        if sym(p, b',')? && !projections(p, false)? {
            bail!(p, m, "a projection");
        }
    } else if !projections(p, false)? {
        bail!(p, m, "a projection");
    }

    let order_by = order_by(p)?;
    let skip = skip_modifier(p)?;
    let limit = limit_modifier(p)?;

    let block = p.block_end();
    Ok(Some(p.emit(nodes::return_clause(
        distinct,
        include_existing,
        order_by,
        skip,
        limit,
        block,
    ))?))
}

/// Parse a comma-separated projection list into the current block's
/// sequence.
fn projections(p: &mut Driver, aliases_required: bool) -> Result<bool, Error> {
    let Some(first) = projection(p, aliases_required)? else { return Ok(false) };
    p.sequence_add(first);
    loop {
        let m = p.mark();
        if !sym(p, b',')? {
            break;
        }
        match projection(p, aliases_required)? {
            Some(index) => p.sequence_add(index),
            None => {
                p.expected("a projection")?;
                p.rewind(m);
                break;
            }
        }
    }
    Ok(true)
}

/// *Projection*: Expression [`AS` Identifier]
///
/// When aliases are required (`WITH`), a bare identifier expression is
/// its own alias; anything else must be aliased explicitly.
pub(super) fn projection(p: &mut Driver, alias_required: bool) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let Some(expr) = expression::expression(p)? else { bail!(p, m) };

    let alias = if keyword(p, "AS")? {
        match atom::identifier(p)? {
            Some(index) => Some(index),
            None => bail!(p, m, "an identifier"),
        }
    } else if alias_required {
        let child = p.peek_child(expr);
        if child.kind() != AstKind::Identifier {
            bail!(p, m, "AS");
        }
        // A bare identifier carries itself forward under its own name.
        let name = child
            .as_identifier()
            .expect("kind was just checked")
            .name()
            .to_string();
        let range = child.range();
        Some(p.add_child(nodes::identifier(name, range)))
    } else {
        None
    };

    let block = p.block_end();
    Ok(Some(p.emit(nodes::projection(expr, alias, block))?))
}

/// `ORDER BY` SortItem (`,` SortItem)*
fn order_by(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keywords(p, &["ORDER", "BY"])? {
        bail!(p, m);
    }
    loop {
        let Some(item) = sort_item(p)? else { bail!(p, m, "a sort item") };
        p.sequence_add(item);
        if !sym(p, b',')? {
            break;
        }
    }
    let block = p.block_end();
    Ok(Some(p.emit(nodes::order_by(block))?))
}

fn sort_item(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let Some(expr) = expression::expression(p)? else { bail!(p, m) };
    let ascending = if keyword(p, "DESCENDING")? || keyword(p, "DESC")? {
        false
    } else {
        let _ = keyword(p, "ASCENDING")? || keyword(p, "ASC")?;
        true
    };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::sort_item(expr, ascending, block))?))
}

fn skip_modifier(p: &mut Driver) -> Result<Option<usize>, Error> {
    if !keyword(p, "SKIP")? {
        return Ok(None);
    }
    match expression::expression(p)? {
        Some(index) => Ok(Some(index)),
        None => {
            p.expected("an expression")?;
            Ok(None)
        }
    }
}

fn limit_modifier(p: &mut Driver) -> Result<Option<usize>, Error> {
    if !keyword(p, "LIMIT")? {
        return Ok(None);
    }
    match expression::expression(p)? {
        Some(index) => Ok(Some(index)),
        None => {
            p.expected("an expression")?;
            Ok(None)
        }
    }
}

/// *Call*: `CALL` ProcName `( args )` [`YIELD` projections]
fn call_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "CALL")? {
        bail!(p, m);
    }
    let Some(proc) = atom::proc_name_node(p)? else { bail!(p, m, "a procedure name") };
    if !sym(p, b'(')? {
        bail!(p, m, "'('");
    }
    let mut args = Vec::new();
    if !sym(p, b')')? {
        loop {
            let Some(arg) = expression::expression(p)? else { bail!(p, m, "an expression") };
            args.push(arg);
            if !sym(p, b',')? {
                break;
            }
        }
        if !sym(p, b')')? {
            bail!(p, m, "')'");
        }
    }

    let mut yields = Vec::new();
    if keyword(p, "YIELD")? {
        loop {
            let Some(index) = projection(p, false)? else { bail!(p, m, "a projection") };
            yields.push(index);
            if !sym(p, b',')? {
                break;
            }
        }
    }

    let block = p.block_end();
    Ok(Some(p.emit(nodes::call(proc, args, yields, block))?))
}

/// *Union*: `UNION [ALL]`
fn union_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "UNION")? {
        bail!(p, m);
    }
    let all = keyword(p, "ALL")?;
    let block = p.block_end();
    Ok(Some(p.emit(nodes::union_clause(all, block))?))
}

/// *Start*: `START` StartPoint (`,` StartPoint)* [`WHERE` Expression]
fn start_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keyword(p, "START")? {
        bail!(p, m);
    }
    loop {
        let Some(point) = start_point(p)? else { bail!(p, m, "a start point") };
        p.sequence_add(point);
        if !sym(p, b',')? {
            break;
        }
    }
    let predicate = match opt_where(p)? {
        Where::Found(index) => Some(index),
        Where::Absent => None,
        Where::Malformed => bail!(p, m),
    };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::start(predicate, block))?))
}

/// `id = node(..)`, `id = node:index(..)`, and the `rel` equivalents.
fn start_point(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let Some(identifier) = atom::identifier(p)? else { bail!(p, m) };
    if !sym_eq(p)? {
        bail!(p, m, "'='");
    }

    let node_point = if keyword(p, "NODE")? {
        true
    } else if keyword(p, "REL")? || keyword(p, "RELATIONSHIP")? {
        false
    } else {
        bail!(p, m, "node or rel");
    };

    if sym(p, b':')? {
        // Index lookup or index query.
        let Some(index_name) = atom::index_name_node(p)? else { bail!(p, m, "an index name") };
        if !sym(p, b'(')? {
            bail!(p, m, "'('");
        }

        'lookup: {
            let lm = p.mark();
            let Some(prop) = atom::prop_name_node(p)? else { break 'lookup };
            if !sym_eq(p)? {
                p.rewind(lm);
                break 'lookup;
            }
            let Some(value) = string_or_parameter(p)? else { bail!(p, m, "a string") };
            if !sym(p, b')')? {
                bail!(p, m, "')'");
            }
            let block = p.block_end();
            let node = if node_point {
                nodes::node_index_lookup(identifier, index_name, prop, value, block)
            } else {
                nodes::rel_index_lookup(identifier, index_name, prop, value, block)
            };
            return Ok(Some(p.emit(node)?));
        }

        let Some(query) = string_or_parameter(p)? else { bail!(p, m, "a string") };
        if !sym(p, b')')? {
            bail!(p, m, "')'");
        }
        let block = p.block_end();
        let node = if node_point {
            nodes::node_index_query(identifier, index_name, query, block)
        } else {
            nodes::rel_index_query(identifier, index_name, query, block)
        };
        return Ok(Some(p.emit(node)?));
    }

    if !sym(p, b'(')? {
        bail!(p, m, "'('");
    }

    if sym(p, b'*')? {
        if !sym(p, b')')? {
            bail!(p, m, "')'");
        }
        let block = p.block_end();
        let node = if node_point {
            nodes::all_nodes_scan(identifier, block)
        } else {
            nodes::all_rels_scan(identifier, block)
        };
        return Ok(Some(p.emit(node)?));
    }

    loop {
        let Some(id) = lexical::integer_literal(p)? else { bail!(p, m, "an integer") };
        p.sequence_add(id);
        if !sym(p, b',')? {
            break;
        }
    }
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }
    let block = p.block_end();
    let node = if node_point {
        nodes::node_id_lookup(identifier, block)
    } else {
        nodes::rel_id_lookup(identifier, block)
    };
    Ok(Some(p.emit(node)?))
}

fn string_or_parameter(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some((value, range)) = lexical::quoted_string(p)? {
        return Ok(Some(p.add_child(nodes::string(value, range))));
    }
    atom::parameter(p)
}

/// *LoadCsv*: `LOAD CSV [WITH HEADERS] FROM expr AS id [FIELDTERMINATOR
/// string]`
fn load_csv_clause(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    if !keywords(p, &["LOAD", "CSV"])? {
        bail!(p, m);
    }
    let with_headers = keywords(p, &["WITH", "HEADERS"])?;
    if !keyword(p, "FROM")? {
        bail!(p, m, "FROM");
    }
    let Some(url) = expression::expression(p)? else { bail!(p, m, "an expression") };
    if !keyword(p, "AS")? {
        bail!(p, m, "AS");
    }
    let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };

    let field_terminator = if keyword(p, "FIELDTERMINATOR")? {
        match lexical::quoted_string(p)? {
            Some((value, range)) => Some(p.add_child(nodes::string(value, range))),
            None => bail!(p, m, "a string"),
        }
    } else {
        None
    };

    let block = p.block_end();
    Ok(Some(p.emit(nodes::load_csv(
        with_headers,
        url,
        identifier,
        field_terminator,
        block,
    ))?))
}

#[cfg(test)]
mod tests {
    use crate::ast::{AstKind, Direction};
    use crate::{ParseResult, Parser};

    fn parse(input: &str) -> ParseResult {
        let result = Parser::new(input).parse().unwrap();
        assert_eq!(result.nerrors(), 0, "unexpected errors in {input:?}");
        result
    }

    fn clause(result: &ParseResult, index: usize) -> &crate::AstNode {
        let statement = result.root(0).unwrap().as_statement().unwrap();
        statement
            .body()
            .as_query()
            .unwrap()
            .clause(index)
            .unwrap()
    }

    #[test]
    fn set_items_take_all_four_forms() {
        let result = parse("MATCH (n) SET n.a = 1, n = {x: 1}, n += $props, n:Label");
        let set = clause(&result, 1).as_set().unwrap();
        assert_eq!(set.nitems(), 4);
        assert_eq!(set.item(0).unwrap().kind(), AstKind::SetProperty);
        assert_eq!(set.item(1).unwrap().kind(), AstKind::SetAllProperties);
        assert_eq!(set.item(2).unwrap().kind(), AstKind::MergeProperties);
        assert_eq!(set.item(3).unwrap().kind(), AstKind::SetLabels);

        let prop = set.item(0).unwrap().as_set_property().unwrap();
        assert_eq!(prop.property().kind(), AstKind::PropertyOperator);
        assert_eq!(prop.expression().as_integer().unwrap().value(), "1");

        // Every item is also a SetItem through the lattice.
        for i in 0..set.nitems() {
            assert!(set.item(i).unwrap().instance_of(AstKind::SetItem));
        }
    }

    #[test]
    fn remove_items_split_by_shape() {
        let result = parse("MATCH (n) REMOVE n.a, n:Label");
        let remove = clause(&result, 1).as_remove().unwrap();
        assert_eq!(remove.nitems(), 2);
        assert_eq!(remove.item(0).unwrap().kind(), AstKind::RemoveProperty);
        let labels = remove.item(1).unwrap().as_remove_labels().unwrap();
        assert_eq!(labels.nlabels(), 1);
    }

    #[test]
    fn detach_delete_sets_the_flag() {
        let result = parse("MATCH (n) DETACH DELETE n");
        let delete = clause(&result, 1).as_delete().unwrap();
        assert!(delete.is_detach());
        assert_eq!(delete.nexpressions(), 1);
    }

    #[test]
    fn merge_actions_attach_in_order() {
        let result = parse("MERGE (n) ON CREATE SET n.a = 1 ON MATCH SET n.b = 2");
        let merge = clause(&result, 0).as_merge().unwrap();
        assert_eq!(merge.pattern_path().kind(), AstKind::PatternPath);
        assert_eq!(merge.nactions(), 2);
        assert_eq!(merge.action(0).unwrap().kind(), AstKind::OnCreate);
        assert_eq!(merge.action(1).unwrap().kind(), AstKind::OnMatch);
        let on_create = merge.action(0).unwrap().as_on_create().unwrap();
        assert_eq!(on_create.nitems(), 1);
    }

    #[test]
    fn with_modifiers_parse_in_order() {
        let result = parse("MATCH (n) WITH n ORDER BY n.a DESC SKIP 1 LIMIT 2 WHERE n.b RETURN n");
        let with = clause(&result, 1).as_with().unwrap();
        assert!(!with.is_distinct());
        assert_eq!(with.nprojections(), 1);

        // The bare identifier carries itself forward under its own name.
        let projection = with.projection(0).unwrap().as_projection().unwrap();
        assert_eq!(
            projection.alias().unwrap().as_identifier().unwrap().name(),
            "n"
        );

        let order_by = with.order_by().unwrap().as_order_by().unwrap();
        assert_eq!(order_by.nitems(), 1);
        let item = order_by.item(0).unwrap().as_sort_item().unwrap();
        assert!(!item.is_ascending());

        assert_eq!(with.skip().unwrap().as_integer().unwrap().value(), "1");
        assert_eq!(with.limit().unwrap().as_integer().unwrap().value(), "2");
        assert!(with.predicate().is_some());
    }

    #[test]
    fn return_star_includes_existing() {
        let result = parse("MATCH (n) RETURN *");
        let ret = clause(&result, 1).as_return().unwrap();
        assert!(ret.includes_existing());
        assert_eq!(ret.nprojections(), 0);

        let result = parse("MATCH (n) RETURN DISTINCT n");
        let ret = clause(&result, 1).as_return().unwrap();
        assert!(ret.is_distinct());
    }

    #[test]
    fn union_joins_queries_in_the_clause_sequence() {
        let result = parse("RETURN 1 UNION ALL RETURN 2");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        assert_eq!(query.nclauses(), 3);
        assert!(query.clause(1).unwrap().as_union().unwrap().is_all());

        let result = parse("RETURN 1 UNION RETURN 2");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        assert!(!query.clause(1).unwrap().as_union().unwrap().is_all());
    }

    #[test]
    fn call_records_arguments_and_yields() {
        let result = parse("CALL db.labels() YIELD label RETURN label");
        let call = clause(&result, 0).as_call().unwrap();
        assert_eq!(call.proc_name().as_proc_name().unwrap().value(), "db.labels");
        assert_eq!(call.nargs(), 0);
        assert_eq!(call.nprojections(), 1);

        let result = parse("CALL my.proc(1, 'x')");
        let call = clause(&result, 0).as_call().unwrap();
        assert_eq!(call.nargs(), 2);
        assert_eq!(call.nprojections(), 0);
    }

    #[test]
    fn start_points_cover_every_lookup_form() {
        let result = parse(
            "START n=node(1, 2), m=node(*), o=node:idx(key = 'v'), q=rel:idx('q?') WHERE n.a RETURN n",
        );
        let start = clause(&result, 0).as_start().unwrap();
        assert_eq!(start.npoints(), 4);

        let ids = start.point(0).unwrap().as_node_id_lookup().unwrap();
        assert_eq!(ids.nids(), 2);
        assert_eq!(ids.id(1).unwrap().as_integer().unwrap().value(), "2");

        assert_eq!(start.point(1).unwrap().kind(), AstKind::AllNodesScan);

        let lookup = start.point(2).unwrap().as_node_index_lookup().unwrap();
        assert_eq!(lookup.index_name().as_index_name().unwrap().value(), "idx");
        assert_eq!(lookup.lookup().as_string().unwrap().value(), "v");

        let query = start.point(3).unwrap().as_rel_index_query().unwrap();
        assert_eq!(query.query().as_string().unwrap().value(), "q?");

        assert!(start.predicate().is_some());
        for i in 0..start.npoints() {
            assert!(start.point(i).unwrap().instance_of(AstKind::StartPoint));
        }
    }

    #[test]
    fn load_csv_carries_its_options() {
        let result =
            parse("LOAD CSV WITH HEADERS FROM 'file:///x.csv' AS line FIELDTERMINATOR ';' RETURN line");
        let load = clause(&result, 0).as_load_csv().unwrap();
        assert!(load.has_headers());
        assert_eq!(load.url().as_string().unwrap().value(), "file:///x.csv");
        assert_eq!(load.identifier().as_identifier().unwrap().name(), "line");
        assert_eq!(
            load.field_terminator().unwrap().as_string().unwrap().value(),
            ";"
        );
    }

    #[test]
    fn foreach_nests_update_clauses() {
        let result = parse("MATCH (n) FOREACH (x IN [1, 2] | SET n.a = x)");
        let foreach = clause(&result, 1).as_foreach().unwrap();
        assert_eq!(foreach.identifier().as_identifier().unwrap().name(), "x");
        assert_eq!(foreach.expression().kind(), AstKind::Collection);
        assert_eq!(foreach.nclauses(), 1);
        assert_eq!(foreach.clause(0).unwrap().kind(), AstKind::Set);
    }

    #[test]
    fn using_periodic_commit_is_a_query_option() {
        let result = parse("USING PERIODIC COMMIT 500 LOAD CSV FROM 'f' AS l RETURN l");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        assert_eq!(query.noptions(), 1);
        let option = query.option(0).unwrap();
        assert!(option.instance_of(AstKind::QueryOption));
        let commit = option.as_using_periodic_commit().unwrap();
        assert_eq!(commit.limit().unwrap().as_integer().unwrap().value(), "500");
    }

    #[test]
    fn match_hints_parse_after_the_pattern() {
        let result = parse(
            "MATCH (n:Person) USING INDEX n:Person(name) USING SCAN m:Label USING JOIN ON n, m RETURN n",
        );
        let m = clause(&result, 0).as_match().unwrap();
        assert_eq!(m.nhints(), 3);

        let index = m.hint(0).unwrap().as_using_index().unwrap();
        assert_eq!(index.prop_name().as_prop_name().unwrap().value(), "name");

        let scan = m.hint(1).unwrap().as_using_scan().unwrap();
        assert_eq!(scan.label().as_label().unwrap().name(), "Label");

        let join = m.hint(2).unwrap().as_using_join().unwrap();
        assert_eq!(join.nidentifiers(), 2);
    }

    #[test]
    fn rel_patterns_record_direction_types_and_ranges() {
        let result = parse("MATCH (a)-->(b), (c)<--(d), (e)-[r:X|:Y*2..3]->(f) RETURN a");
        let m = clause(&result, 0).as_match().unwrap();
        let pattern = m.pattern().as_pattern().unwrap();
        assert_eq!(pattern.npaths(), 3);

        fn rel(path: &crate::AstNode) -> crate::ast::RelPattern<'_> {
            path.as_pattern_path()
                .unwrap()
                .element(1)
                .unwrap()
                .as_rel_pattern()
                .unwrap()
        }
        assert_eq!(rel(pattern.path(0).unwrap()).direction(), Direction::Outbound);
        assert_eq!(rel(pattern.path(1).unwrap()).direction(), Direction::Inbound);

        let typed = rel(pattern.path(2).unwrap());
        assert_eq!(typed.direction(), Direction::Outbound);
        assert_eq!(typed.nreltypes(), 2);
        assert_eq!(typed.identifier().unwrap().as_identifier().unwrap().name(), "r");
        let range = typed.varlength().unwrap().as_range().unwrap();
        assert_eq!(range.start().unwrap().as_integer().unwrap().value(), "2");
        assert_eq!(range.end().unwrap().as_integer().unwrap().value(), "3");
    }

    #[test]
    fn a_bare_varlength_star_has_open_bounds() {
        let result = parse("MATCH (a)-[*]->(b) RETURN a");
        let m = clause(&result, 0).as_match().unwrap();
        let path = m.pattern().as_pattern().unwrap().path(0).unwrap();
        let rel = path
            .as_pattern_path()
            .unwrap()
            .element(1)
            .unwrap()
            .as_rel_pattern()
            .unwrap();
        let range = rel.varlength().unwrap().as_range().unwrap();
        assert!(range.start().is_none());
        assert!(range.end().is_none());
    }

    #[test]
    fn named_and_shortest_paths_expose_elements() {
        let result = parse("MATCH p = shortestPath((a)-[*]->(b)) RETURN p");
        let m = clause(&result, 0).as_match().unwrap();
        let named = m
            .pattern()
            .as_pattern()
            .unwrap()
            .path(0)
            .unwrap()
            .as_named_path()
            .unwrap();
        assert_eq!(named.identifier().as_identifier().unwrap().name(), "p");

        let shortest = named.path().as_shortest_path().unwrap();
        assert!(shortest.is_single());

        // The path-elements capability tunnels through the wrappers.
        let elements = named.path().path_elements().unwrap();
        assert_eq!(elements.nelements(), 3);
        assert_eq!(elements.element(0).unwrap().kind(), AstKind::NodePattern);
        assert_eq!(elements.element(1).unwrap().kind(), AstKind::RelPattern);
    }

    #[test]
    fn node_properties_are_a_map_or_a_parameter() {
        let result = parse("MATCH (a {x: 1}), (b $props) RETURN a");
        let m = clause(&result, 0).as_match().unwrap();
        let pattern = m.pattern().as_pattern().unwrap();

        let node = |i: usize| {
            pattern
                .path(i)
                .unwrap()
                .as_pattern_path()
                .unwrap()
                .element(0)
                .unwrap()
                .as_node_pattern()
                .unwrap()
        };
        assert_eq!(node(0).properties().unwrap().kind(), AstKind::Map);
        assert_eq!(node(1).properties().unwrap().kind(), AstKind::Parameter);
    }
}
