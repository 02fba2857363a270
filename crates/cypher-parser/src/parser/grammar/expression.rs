//! Expression parsing.
//!
//! A single recursive rule handles every binary tier, gated by the driver's
//! precedence stack instead of one grammar rule per tier: entering an
//! operator's right operand pushes the minimum precedence that operand may
//! bind (`p+1` for left-associative operators, `p` otherwise), and an
//! operator is only consumed when it binds at least as tightly as the
//! ambient minimum. Chained relational operators collect on the operator
//! stack and fold into a single comparison node.

use crate::ast::nodes;
use crate::error::Error;
use crate::operators::{
    Operator, OP_AND, OP_CONTAINS, OP_DIV, OP_ENDS_WITH, OP_EQUAL, OP_GT, OP_GTE, OP_IN,
    OP_IS_NOT_NULL, OP_IS_NULL, OP_LT, OP_LTE, OP_MINUS, OP_MOD, OP_MULT, OP_NEQUAL, OP_NOT,
    OP_OR, OP_PLUS, OP_POW, OP_REGEX, OP_STARTS_WITH, OP_UNARY_MINUS, OP_UNARY_PLUS, OP_XOR,
};
use crate::parser::grammar::{atom, bail, lexical};
use crate::parser::Driver;

use lexical::{keyword, keywords, sym, sym_seq};

/// Parse a full expression with the precedence gate reset.
pub(super) fn expression(p: &mut Driver) -> Result<Option<usize>, Error> {
    p.prec_push_top();
    let result = exp(p);
    p.prec_pop();
    result
}

/// The recursive expression rule at the ambient minimum precedence.
fn exp(p: &mut Driver) -> Result<Option<usize>, Error> {
    p.block_start();
    let Some(mut lhs) = prefix(p)? else {
        let _ = p.block_merge();
        return Ok(None);
    };

    loop {
        let m = p.mark();
        let Some(op) = infix(p)? else { break };
        match op {
            Infix::Binary(op) if !p.prec_check(op) => {
                p.rewind(m);
                break;
            }
            Infix::Binary(op) if is_relational(op) => {
                match comparison_chain(p, lhs, op, m)? {
                    Some(chained) => lhs = chained,
                    None => break,
                }
            }
            Infix::Binary(op) => {
                p.set_op(op);
                p.prec_push();
                let rhs = exp(p)?;
                p.prec_pop();
                let Some(rhs) = rhs else {
                    p.expected("an expression")?;
                    p.rewind(m);
                    break;
                };
                let block = p.block_replace();
                lhs = p.emit(nodes::binary_operator(op, lhs, rhs, block))?;
            }
            Infix::Postfix(op) => {
                if !p.prec_check(op) {
                    p.rewind(m);
                    break;
                }
                let block = p.block_replace();
                lhs = p.emit(nodes::unary_operator(op, lhs, block))?;
            }
        }
    }

    let base = p.block_merge();
    Ok(Some(base + lhs))
}

enum Infix {
    Binary(&'static Operator),
    /// `IS NULL` / `IS NOT NULL`.
    Postfix(&'static Operator),
}

fn is_relational(op: &'static Operator) -> bool {
    op == &OP_LT || op == &OP_GT || op == &OP_LTE || op == &OP_GTE
}

/// Probe (and consume) one infix operator. The caller rewinds when the
/// precedence gate rejects it.
fn infix(p: &mut Driver) -> Result<Option<Infix>, Error> {
    if sym_seq(p, b"<=")? {
        return Ok(Some(Infix::Binary(&OP_LTE)));
    }
    if sym_seq(p, b">=")? {
        return Ok(Some(Infix::Binary(&OP_GTE)));
    }
    if sym_seq(p, b"<>")? {
        return Ok(Some(Infix::Binary(&OP_NEQUAL)));
    }
    if sym_seq(p, b"=~")? {
        return Ok(Some(Infix::Binary(&OP_REGEX)));
    }
    if sym(p, b'<')? {
        return Ok(Some(Infix::Binary(&OP_LT)));
    }
    if sym(p, b'>')? {
        return Ok(Some(Infix::Binary(&OP_GT)));
    }
    if sym(p, b'=')? {
        return Ok(Some(Infix::Binary(&OP_EQUAL)));
    }
    if sym(p, b'+')? {
        return Ok(Some(Infix::Binary(&OP_PLUS)));
    }
    if sym(p, b'-')? {
        return Ok(Some(Infix::Binary(&OP_MINUS)));
    }
    if sym(p, b'*')? {
        return Ok(Some(Infix::Binary(&OP_MULT)));
    }
    if sym(p, b'/')? {
        return Ok(Some(Infix::Binary(&OP_DIV)));
    }
    if sym(p, b'%')? {
        return Ok(Some(Infix::Binary(&OP_MOD)));
    }
    if sym(p, b'^')? {
        return Ok(Some(Infix::Binary(&OP_POW)));
    }
    if keyword(p, "AND")? {
        return Ok(Some(Infix::Binary(&OP_AND)));
    }
    if keyword(p, "OR")? {
        return Ok(Some(Infix::Binary(&OP_OR)));
    }
    if keyword(p, "XOR")? {
        return Ok(Some(Infix::Binary(&OP_XOR)));
    }
    if keyword(p, "IN")? {
        return Ok(Some(Infix::Binary(&OP_IN)));
    }
    if keywords(p, &["STARTS", "WITH"])? {
        return Ok(Some(Infix::Binary(&OP_STARTS_WITH)));
    }
    if keywords(p, &["ENDS", "WITH"])? {
        return Ok(Some(Infix::Binary(&OP_ENDS_WITH)));
    }
    if keyword(p, "CONTAINS")? {
        return Ok(Some(Infix::Binary(&OP_CONTAINS)));
    }
    if keywords(p, &["IS", "NOT", "NULL"])? {
        return Ok(Some(Infix::Postfix(&OP_IS_NOT_NULL)));
    }
    if keywords(p, &["IS", "NULL"])? {
        return Ok(Some(Infix::Postfix(&OP_IS_NULL)));
    }
    Ok(None)
}

/// Fold `a < b <= c ..` into one comparison node; a lone relational
/// operator stays a binary operator. `first_op` has already been consumed;
/// `m` marks the input before it.
fn comparison_chain(
    p: &mut Driver,
    lhs: usize,
    first_op: &'static Operator,
    m: crate::parser::Mark,
) -> Result<Option<usize>, Error> {
    let base = p.op_depth();
    let mut args = vec![lhs];
    let mut op = first_op;
    let mut resume = m;

    loop {
        p.op_push(op);
        p.set_op(op);
        p.prec_push();
        let rhs = exp(p)?;
        p.prec_pop();
        match rhs {
            Some(rhs) => args.push(rhs),
            None => {
                // The operand after `op` is missing; drop that operator and
                // keep whatever chain was already complete.
                p.expected("an expression")?;
                p.rewind(resume);
                let mut ops = p.op_drain(base);
                ops.pop();
                return finish_chain(p, ops, args);
            }
        }

        resume = p.mark();
        match infix(p)? {
            Some(Infix::Binary(next)) if is_relational(next) && p.prec_check(next) => {
                op = next;
            }
            Some(_) | None => {
                p.rewind(resume);
                break;
            }
        }
    }

    let ops = p.op_drain(base);
    finish_chain(p, ops, args)
}

fn finish_chain(
    p: &mut Driver,
    ops: Vec<&'static Operator>,
    args: Vec<usize>,
) -> Result<Option<usize>, Error> {
    match ops.len() {
        0 => Ok(None),
        1 => {
            let block = p.block_replace();
            Ok(Some(p.emit(nodes::binary_operator(
                ops[0], args[0], args[1], block,
            ))?))
        }
        _ => {
            let block = p.block_replace();
            Ok(Some(p.emit(nodes::comparison(ops, args, block))?))
        }
    }
}

/// Prefix operators (`NOT`, unary `+`/`-`) and the postfix-operator chain
/// over an atom.
fn prefix(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    // The node's block spans from the operator, not from the operand.
    p.block_start();
    let op = if keyword(p, "NOT")? {
        Some(&OP_NOT)
    } else if sym(p, b'+')? {
        Some(&OP_UNARY_PLUS)
    } else if sym(p, b'-')? {
        Some(&OP_UNARY_MINUS)
    } else {
        None
    };

    let Some(op) = op else {
        p.block_discard();
        return postfix(p);
    };

    p.set_op(op);
    p.prec_push();
    let arg = exp(p)?;
    p.prec_pop();
    let Some(arg) = arg else { bail!(p, m, "an expression") };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::unary_operator(op, arg, block))?))
}

/// An atom followed by any chain of tight postfix operators: property
/// access, the labels operator, subscripts and slices, and map
/// projections. These bind tighter than every binary tier, so they are
/// not precedence gated.
pub(super) fn postfix(p: &mut Driver) -> Result<Option<usize>, Error> {
    p.block_start();
    let Some(mut lhs) = atom::atom(p)? else {
        let _ = p.block_merge();
        return Ok(None);
    };

    loop {
        // `.prop`
        if p.peek()? == Some(b'.') && p.peek_at(1)? != Some(b'.') {
            let m = p.mark();
            sym(p, b'.')?;
            let Some(prop) = atom::prop_name_node(p)? else {
                p.expected("a property name")?;
                p.rewind(m);
                break;
            };
            let block = p.block_replace();
            lhs = p.emit(nodes::property_operator(lhs, prop, block))?;
            continue;
        }

        // `:Label ..`
        if p.peek()? == Some(b':') {
            let m = p.mark();
            let mut any = false;
            while sym(p, b':')? {
                match atom::label_node(p)? {
                    Some(label) => {
                        p.sequence_add(label);
                        any = true;
                    }
                    None => {
                        any = false;
                        break;
                    }
                }
            }
            if !any {
                p.expected("a label")?;
                p.rewind(m);
                break;
            }
            let block = p.block_replace();
            lhs = p.emit(nodes::labels_operator(lhs, block))?;
            continue;
        }

        // `[subscript]` or `[start..end]`
        if p.peek()? == Some(b'[') {
            let m = p.mark();
            match subscript_or_slice(p, lhs)? {
                Some(index) => {
                    lhs = index;
                    continue;
                }
                None => {
                    p.rewind(m);
                    break;
                }
            }
        }

        // `{ map projection }`
        if p.peek()? == Some(b'{') {
            let m = p.mark();
            match map_projection(p, lhs)? {
                Some(index) => {
                    lhs = index;
                    continue;
                }
                None => {
                    p.rewind(m);
                    break;
                }
            }
        }

        break;
    }

    let base = p.block_merge();
    Ok(Some(base + lhs))
}

fn subscript_or_slice(p: &mut Driver, lhs: usize) -> Result<Option<usize>, Error> {
    sym(p, b'[')?;

    // `[..end]`
    if sym_seq(p, b"..")? {
        let end = expression(p)?;
        if !sym(p, b']')? {
            p.expected("']'")?;
            return Ok(None);
        }
        let block = p.block_replace();
        return Ok(Some(p.emit(nodes::slice_operator(lhs, None, end, block))?));
    }

    let Some(first) = expression(p)? else {
        p.expected("an expression")?;
        return Ok(None);
    };

    if sym_seq(p, b"..")? {
        let end = expression(p)?;
        if !sym(p, b']')? {
            p.expected("']'")?;
            return Ok(None);
        }
        let block = p.block_replace();
        return Ok(Some(p.emit(nodes::slice_operator(
            lhs,
            Some(first),
            end,
            block,
        ))?));
    }

    if !sym(p, b']')? {
        p.expected("']'")?;
        return Ok(None);
    }
    let block = p.block_replace();
    Ok(Some(p.emit(nodes::subscript_operator(lhs, first, block))?))
}

/// `expr { .prop, .*, key: value, identifier }`
fn map_projection(p: &mut Driver, lhs: usize) -> Result<Option<usize>, Error> {
    sym(p, b'{')?;

    if !sym(p, b'}')? {
        loop {
            let Some(selector) = map_projection_selector(p)? else { return Ok(None) };
            p.sequence_add(selector);
            if !sym(p, b',')? {
                break;
            }
        }
        if !sym(p, b'}')? {
            p.expected("'}'")?;
            return Ok(None);
        }
    }

    let block = p.block_replace();
    Ok(Some(p.emit(nodes::map_projection(lhs, block))?))
}

fn map_projection_selector(p: &mut Driver) -> Result<Option<usize>, Error> {
    // `.*`
    if p.peek()? == Some(b'.') && p.peek_at(1)? == Some(b'*') {
        p.block_start();
        sym_seq(p, b".*")?;
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::map_projection_all_properties(block))?));
    }

    // `.prop`
    if p.peek()? == Some(b'.') {
        let m = p.mark();
        p.block_start();
        sym(p, b'.')?;
        let Some(prop) = atom::prop_name_node(p)? else { bail!(p, m, "a property name") };
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::map_projection_property(prop, block))?));
    }

    // `key: value`
    let m = p.mark();
    p.block_start();
    'literal: {
        let Some(prop) = atom::prop_name_node(p)? else { break 'literal };
        if !sym(p, b':')? {
            break 'literal;
        }
        let Some(value) = expression(p)? else { bail!(p, m, "an expression") };
        let block = p.block_end();
        return Ok(Some(p.emit(nodes::map_projection_literal(prop, value, block))?));
    }
    p.block_discard();
    p.rewind(m);

    // A bare identifier.
    p.block_start();
    let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "a projection selector") };
    let block = p.block_end();
    Ok(Some(p.emit(nodes::map_projection_identifier(identifier, block))?))
}

#[cfg(test)]
mod tests {
    use crate::ast::{AstKind, AstNode};
    use crate::Parser;

    /// The expression of the first projection of the last clause.
    fn first_expression(input: &str) -> crate::ParseResult {
        let result = Parser::new(input).parse().unwrap();
        assert_eq!(result.nerrors(), 0, "unexpected errors in {input:?}");
        result
    }

    fn projected<'a>(result: &'a crate::ParseResult) -> &'a AstNode {
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        let clause = query.clause(query.nclauses() - 1).unwrap();
        let ret = clause.as_return().unwrap();
        ret.projection(0)
            .unwrap()
            .as_projection()
            .unwrap()
            .expression()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let result = first_expression("RETURN 2 + 3 * 4");
        let sum = projected(&result).as_binary_operator().unwrap();
        assert_eq!(sum.operator().symbol(), "+");
        assert_eq!(sum.argument1().as_integer().unwrap().value(), "2");
        let product = sum.argument2().as_binary_operator().unwrap();
        assert_eq!(product.operator().symbol(), "*");
    }

    #[test]
    fn exponentiation_is_right_associative() {
        let result = first_expression("RETURN 2 ^ 3 ^ 4");
        let outer = projected(&result).as_binary_operator().unwrap();
        assert_eq!(outer.operator().symbol(), "^");
        assert_eq!(outer.argument1().as_integer().unwrap().value(), "2");
        let inner = outer.argument2().as_binary_operator().unwrap();
        assert_eq!(inner.argument1().as_integer().unwrap().value(), "3");
        assert_eq!(inner.argument2().as_integer().unwrap().value(), "4");
    }

    #[test]
    fn not_binds_looser_than_comparison() {
        let result = first_expression("RETURN NOT a = b AND c");
        // NOT captures the equality; AND captures the NOT.
        let and = projected(&result).as_binary_operator().unwrap();
        assert_eq!(and.operator().symbol(), "AND");
        let not = and.argument1().as_unary_operator().unwrap();
        assert_eq!(not.operator().symbol(), "NOT");
        assert_eq!(not.argument().kind(), AstKind::BinaryOperator);
    }

    #[test]
    fn a_single_relational_operator_stays_binary() {
        let result = first_expression("RETURN a > b");
        let cmp = projected(&result).as_binary_operator().unwrap();
        assert_eq!(cmp.operator().symbol(), ">");
    }

    #[test]
    fn relational_chains_fold_into_a_comparison() {
        let result = first_expression("RETURN 1 < 2 <= 3");
        let chain = projected(&result).as_comparison().unwrap();
        assert_eq!(chain.length(), 2);
        assert_eq!(chain.operator(0).unwrap().symbol(), "<");
        assert_eq!(chain.operator(1).unwrap().symbol(), "<=");
        assert_eq!(chain.argument(0).unwrap().as_integer().unwrap().value(), "1");
        assert_eq!(chain.argument(1).unwrap().as_integer().unwrap().value(), "2");
        assert_eq!(chain.argument(2).unwrap().as_integer().unwrap().value(), "3");
        assert!(chain.argument(3).is_none());
    }

    #[test]
    fn postfix_operators_chain_left_to_right() {
        let result = first_expression("RETURN a.b[0].c IS NOT NULL");
        let is_not_null = projected(&result).as_unary_operator().unwrap();
        assert_eq!(is_not_null.operator().symbol(), "IS NOT NULL");
        let outer_prop = is_not_null.argument().as_property_operator().unwrap();
        assert_eq!(
            outer_prop.prop_name().as_prop_name().unwrap().value(),
            "c"
        );
        let subscript = outer_prop.expression().as_subscript_operator().unwrap();
        assert_eq!(subscript.subscript().as_integer().unwrap().value(), "0");
        let inner_prop = subscript.expression().as_property_operator().unwrap();
        assert_eq!(inner_prop.expression().kind(), AstKind::Identifier);
    }

    #[test]
    fn the_labels_operator_collects_every_label() {
        let result = first_expression("RETURN n:Person:Human");
        let labels = projected(&result).as_labels_operator().unwrap();
        assert_eq!(labels.nlabels(), 2);
        assert_eq!(labels.label(0).unwrap().as_label().unwrap().name(), "Person");
        assert_eq!(labels.label(1).unwrap().as_label().unwrap().name(), "Human");
    }

    #[test]
    fn slices_keep_their_open_ends() {
        let result = first_expression("RETURN list[1..2]");
        let slice = projected(&result).as_slice_operator().unwrap();
        assert!(slice.start().is_some() && slice.end().is_some());

        let result = first_expression("RETURN list[..2]");
        let slice = projected(&result).as_slice_operator().unwrap();
        assert!(slice.start().is_none());
        assert_eq!(slice.end().unwrap().as_integer().unwrap().value(), "2");

        let result = first_expression("RETURN list[1..]");
        let slice = projected(&result).as_slice_operator().unwrap();
        assert!(slice.start().is_some() && slice.end().is_none());
    }

    #[test]
    fn map_projections_accept_all_selector_forms() {
        let result = first_expression("MATCH (m) RETURN m{.a, .*, key: 1, other}");
        let projection = projected(&result).as_map_projection().unwrap();
        assert_eq!(projection.nselectors(), 4);
        assert_eq!(
            projection.selector(0).unwrap().kind(),
            AstKind::MapProjectionProperty
        );
        assert_eq!(
            projection.selector(1).unwrap().kind(),
            AstKind::MapProjectionAllProperties
        );
        assert_eq!(
            projection.selector(2).unwrap().kind(),
            AstKind::MapProjectionLiteral
        );
        assert_eq!(
            projection.selector(3).unwrap().kind(),
            AstKind::MapProjectionIdentifier
        );
    }

    #[test]
    fn comprehensions_expose_the_uniform_interface() {
        let result = first_expression("RETURN [x IN xs WHERE x > 0 | x * 2]");
        let node = projected(&result);
        assert_eq!(node.kind(), AstKind::ListComprehension);

        let comprehension = node.comprehension().unwrap();
        assert_eq!(
            comprehension
                .identifier()
                .unwrap()
                .as_identifier()
                .unwrap()
                .name(),
            "x"
        );
        assert!(comprehension.expression().is_some());
        assert!(comprehension.predicate().is_some());
        assert!(comprehension.eval().is_some());

        let result = first_expression("RETURN all(x IN xs WHERE x > 0)");
        let node = projected(&result);
        assert_eq!(node.kind(), AstKind::All);
        let comprehension = node.comprehension().unwrap();
        assert!(comprehension.predicate().is_some());
        assert!(comprehension.eval().is_none());
    }

    #[test]
    fn reduce_carries_its_accumulator() {
        let result = first_expression("RETURN reduce(acc = 0, x IN xs | acc + x)");
        let reduce = projected(&result).as_reduce().unwrap();
        assert_eq!(
            reduce.accumulator().as_identifier().unwrap().name(),
            "acc"
        );
        assert_eq!(reduce.init().as_integer().unwrap().value(), "0");
        assert_eq!(reduce.eval().kind(), AstKind::BinaryOperator);
    }

    #[test]
    fn case_expressions_pair_alternatives() {
        let result = first_expression("RETURN CASE x WHEN 1 THEN 'a' ELSE 'b' END");
        let case = projected(&result).as_case().unwrap();
        assert!(case.expression().is_some());
        assert_eq!(case.nalternatives(), 1);
        let (when, then) = case.alternative(0).unwrap();
        assert_eq!(when.as_integer().unwrap().value(), "1");
        assert_eq!(then.as_string().unwrap().value(), "a");
        assert_eq!(case.default().unwrap().as_string().unwrap().value(), "b");
    }

    #[test]
    fn function_application_forms() {
        let result = first_expression("RETURN count(*)");
        let all = projected(&result).as_apply_all_operator().unwrap();
        assert_eq!(
            all.func_name().as_function_name().unwrap().value(),
            "count"
        );
        assert!(!all.is_distinct());

        let result = first_expression("RETURN count(DISTINCT x)");
        let apply = projected(&result).as_apply_operator().unwrap();
        assert!(apply.is_distinct());
        assert_eq!(apply.nargs(), 1);

        let result = first_expression("RETURN apoc.coll.max(1, 2)");
        let apply = projected(&result).as_apply_operator().unwrap();
        assert_eq!(
            apply.func_name().as_function_name().unwrap().value(),
            "apoc.coll.max"
        );
        assert_eq!(apply.nargs(), 2);
    }

    #[test]
    fn string_escapes_are_processed() {
        let result = first_expression(r#"RETURN 'a\nbA'"#);
        let string = projected(&result).as_string().unwrap();
        assert_eq!(string.value(), "a\nbA");
    }

    #[test]
    fn numeric_literal_forms() {
        let result = first_expression("RETURN 0x1F");
        assert_eq!(projected(&result).as_integer().unwrap().value(), "0x1F");

        let result = first_expression("RETURN 3.14");
        let float = projected(&result).as_float().unwrap();
        assert_eq!(float.value(), "3.14");
        assert_eq!(float.numeric_value().unwrap().into_inner(), 3.14);

        let result = first_expression("RETURN 1e3");
        assert_eq!(projected(&result).kind(), AstKind::Float);

        let result = first_expression("RETURN -1");
        let neg = projected(&result).as_unary_operator().unwrap();
        assert_eq!(neg.operator().symbol(), "-");
        assert_eq!(neg.argument().as_integer().unwrap().value(), "1");
    }

    #[test]
    fn pattern_expressions_require_a_relationship() {
        let result = first_expression("MATCH (a), (b) WHERE (a)-[:KNOWS]->(b) RETURN a");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        let m = query.clause(0).unwrap().as_match().unwrap();
        assert_eq!(m.predicate().unwrap().kind(), AstKind::PatternPath);

        // A parenthesized identifier is grouping, not a node pattern.
        let result = first_expression("RETURN (a)");
        assert_eq!(projected(&result).kind(), AstKind::Identifier);
    }

    #[test]
    fn parameters_parse_in_expression_position() {
        let result = first_expression("RETURN $param");
        assert_eq!(projected(&result).as_parameter().unwrap().name(), "param");

        let result = first_expression("RETURN $0");
        assert_eq!(projected(&result).as_parameter().unwrap().name(), "0");
    }

    #[test]
    fn backquoted_identifiers_unescape() {
        let result = first_expression("RETURN `odd `` name`");
        assert_eq!(
            projected(&result).as_identifier().unwrap().name(),
            "odd ` name"
        );
    }
}
