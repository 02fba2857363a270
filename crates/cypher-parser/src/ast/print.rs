//! The AST pretty-printer.
//!
//! Renders one line per node in the form
//! `@<ordinal>  <start>..<end>  <indent>> <kind>  <detail>` with column
//! widths precomputed over the whole forest, and wraps long detail text at
//! the caller-provided render width.

use std::io;

use crate::ast::{AstNode, Direction, NodeData};
use crate::config::Colorization;

const MIN_DETAIL_WIDTH: usize = 10;

struct Widths {
    ordinal: usize,
    start: usize,
    end: usize,
    name: usize,
}

fn digits(mut n: usize) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

fn field_widths(node: &AstNode, widths: &mut Widths, depth: usize) {
    widths.ordinal = widths.ordinal.max(digits(node.ordinal as usize) + 1);
    widths.start = widths.start.max(digits(node.range.start.offset));
    widths.end = widths.end.max(digits(node.range.end.offset));
    widths.name = widths.name.max(node.kind().name().len() + depth * 2);
    for child in &node.children {
        field_widths(child, widths, depth + 1);
    }
}

/// Write an indented dump of `roots` to `out`. `width` is the render width
/// detail text wraps at; `0` disables wrapping.
pub fn fprint_ast<W: io::Write>(
    roots: &[&AstNode],
    out: &mut W,
    width: usize,
    colorization: &Colorization,
) -> io::Result<()> {
    let mut widths = Widths {
        ordinal: 0,
        start: 0,
        end: 0,
        name: 0,
    };
    for root in roots {
        field_widths(root, &mut widths, 0);
    }
    for root in roots {
        fprint_node(root, out, width, colorization, &widths, 0)?;
    }
    Ok(())
}

fn fprint_node<W: io::Write>(
    node: &AstNode,
    out: &mut W,
    width: usize,
    colorization: &Colorization,
    widths: &Widths,
    depth: usize,
) -> io::Result<()> {
    write!(
        out,
        "{}{:>ow$}{}  ",
        colorization.ast_ordinal[0],
        format!("@{}", node.ordinal),
        colorization.ast_ordinal[1],
        ow = widths.ordinal,
    )?;
    write!(
        out,
        "{}{:>sw$}..{:<ew$}{}  {}",
        colorization.ast_range[0],
        node.range.start.offset,
        node.range.end.offset,
        colorization.ast_range[1],
        colorization.ast_indent[0],
        sw = widths.start,
        ew = widths.end,
    )?;
    for _ in 0..depth {
        out.write_all(b"> ")?;
    }
    let name = node.kind().name();
    write!(
        out,
        "{}{}{}{}",
        colorization.ast_indent[1], colorization.ast_type[0], name, colorization.ast_type[1],
    )?;

    let detail = detail(node);
    if detail.is_empty() {
        out.write_all(b"\n")?;
    } else {
        let consumed = depth * 2 + name.len();
        debug_assert!(consumed <= widths.name);
        let pad = widths.name - consumed + 2;
        write!(out, "{:pad$}", "")?;
        let offset = widths.name + widths.start + widths.end + widths.ordinal + 8;
        fprint_detail(out, &detail, width, offset, colorization)?;
    }

    for child in &node.children {
        fprint_node(child, out, width, colorization, widths, depth + 1)?;
    }
    Ok(())
}

/// Emit detail text with control characters escaped, wrapping at the render
/// width and left-padding continuation lines to the detail column.
fn fprint_detail<W: io::Write>(
    out: &mut W,
    detail: &str,
    render_width: usize,
    offset: usize,
    colorization: &Colorization,
) -> io::Result<()> {
    out.write_all(colorization.ast_desc[0].as_bytes())?;

    let width = if render_width == 0 {
        0
    } else if offset < render_width {
        (render_width - offset).max(MIN_DETAIL_WIDTH)
    } else {
        MIN_DETAIL_WIDTH
    };

    let mut escaped = String::new();
    for c in detail.chars() {
        match c {
            '\x07' => escaped.push_str("\\a"),
            '\x08' => escaped.push_str("\\b"),
            '\x0c' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x0b' => escaped.push_str("\\v"),
            _ => escaped.push(c),
        }
    }

    if render_width == 0 {
        out.write_all(escaped.as_bytes())?;
    } else {
        let chars: Vec<char> = escaped.chars().collect();
        let mut remaining = width;
        let mut buf = [0u8; 4];
        for (i, &c) in chars.iter().enumerate() {
            out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
            remaining -= 1;
            if remaining == 0 && i + 1 < chars.len() {
                out.write_all(b"\n")?;
                for _ in 0..offset {
                    out.write_all(b" ")?;
                }
                remaining = width;
            }
        }
    }

    out.write_all(b"\n")?;
    out.write_all(colorization.ast_desc[1].as_bytes())?;
    Ok(())
}

fn seq(node: &AstNode, indices: &[usize], out: &mut String) {
    out.push('[');
    for (i, &index) in indices.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("@{}", node.at(index).ordinal));
    }
    out.push(']');
}

fn ord(node: &AstNode, index: usize) -> u32 {
    node.at(index).ordinal
}

/// The per-kind short-form detail text.
pub(crate) fn detail(node: &AstNode) -> String {
    use NodeData as D;
    let mut s = String::new();
    match &node.data {
        D::Statement { options, body } => {
            if !options.is_empty() {
                s.push_str("options=");
                seq(node, options, &mut s);
                s.push_str(", ");
            }
            s.push_str(&format!("body=@{}", ord(node, *body)));
        }
        D::CypherOption { version, params } => {
            if let Some(version) = version {
                s.push_str(&format!("version=@{}", ord(node, *version)));
            }
            if !params.is_empty() {
                if version.is_some() {
                    s.push_str(", ");
                }
                s.push_str("params=");
                seq(node, params, &mut s);
            }
        }
        D::CypherOptionParam { name, value } => {
            s.push_str(&format!("@{} = @{}", ord(node, *name), ord(node, *value)));
        }
        D::ExplainOption | D::ProfileOption | D::MapProjectionAllProperties => {}
        D::CreateNodePropIndex { label, prop_name } | D::DropNodePropIndex { label, prop_name } => {
            s.push_str(&format!(
                "ON=:@{}(@{})",
                ord(node, *label),
                ord(node, *prop_name)
            ));
        }
        D::CreateNodePropConstraint {
            identifier,
            label,
            expression,
            unique,
        }
        | D::DropNodePropConstraint {
            identifier,
            label,
            expression,
            unique,
        } => {
            s.push_str(&format!(
                "ON=(@{}:@{}), expression=@{}{}",
                ord(node, *identifier),
                ord(node, *label),
                ord(node, *expression),
                if *unique { ", IS UNIQUE" } else { "" }
            ));
        }
        D::CreateRelPropConstraint {
            identifier,
            reltype,
            expression,
            unique,
        }
        | D::DropRelPropConstraint {
            identifier,
            reltype,
            expression,
            unique,
        } => {
            s.push_str(&format!(
                "ON=(@{}:@{}), expression=@{}{}",
                ord(node, *identifier),
                ord(node, *reltype),
                ord(node, *expression),
                if *unique { ", IS UNIQUE" } else { "" }
            ));
        }
        D::Query { clauses, .. } => {
            s.push_str("clauses=");
            seq(node, clauses, &mut s);
        }
        D::UsingPeriodicCommit { limit } => {
            if let Some(limit) = limit {
                s.push_str(&format!("limit=@{}", ord(node, *limit)));
            }
        }
        D::LoadCsv {
            with_headers,
            url,
            identifier,
            field_terminator,
        } => {
            s.push_str(&format!(
                "{}url=@{}, identifier=@{}",
                if *with_headers { "WITH HEADERS, " } else { "" },
                ord(node, *url),
                ord(node, *identifier)
            ));
            if let Some(ft) = field_terminator {
                s.push_str(&format!(", field_terminator=@{}", ord(node, *ft)));
            }
        }
        D::Start { points, predicate } => {
            s.push_str("points=");
            seq(node, points, &mut s);
            if let Some(predicate) = predicate {
                s.push_str(&format!(", WHERE=@{}", ord(node, *predicate)));
            }
        }
        D::NodeIndexLookup {
            identifier,
            index_name,
            prop_name,
            lookup,
        } => {
            s.push_str(&format!(
                "@{} = node:@{}(@{} = @{})",
                ord(node, *identifier),
                ord(node, *index_name),
                ord(node, *prop_name),
                ord(node, *lookup)
            ));
        }
        D::NodeIndexQuery {
            identifier,
            index_name,
            query,
        } => {
            s.push_str(&format!(
                "@{} = node:@{}(@{})",
                ord(node, *identifier),
                ord(node, *index_name),
                ord(node, *query)
            ));
        }
        D::NodeIdLookup { identifier, ids } => {
            s.push_str(&format!("@{} = node(", ord(node, *identifier)));
            for (i, &id) in ids.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!("@{}", ord(node, id)));
            }
            s.push(')');
        }
        D::AllNodesScan { identifier } | D::AllRelsScan { identifier } => {
            s.push_str(&format!("identifier=@{}", ord(node, *identifier)));
        }
        D::RelIndexLookup {
            identifier,
            index_name,
            prop_name,
            lookup,
        } => {
            s.push_str(&format!(
                "@{} = rel:@{}(@{} = @{})",
                ord(node, *identifier),
                ord(node, *index_name),
                ord(node, *prop_name),
                ord(node, *lookup)
            ));
        }
        D::RelIndexQuery {
            identifier,
            index_name,
            query,
        } => {
            s.push_str(&format!(
                "@{} = rel:@{}(@{})",
                ord(node, *identifier),
                ord(node, *index_name),
                ord(node, *query)
            ));
        }
        D::RelIdLookup { identifier, ids } => {
            s.push_str(&format!("@{} = rel(", ord(node, *identifier)));
            for (i, &id) in ids.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!("@{}", ord(node, id)));
            }
            s.push(')');
        }
        D::Match {
            optional,
            pattern,
            hints,
            predicate,
        } => {
            s.push_str(&format!(
                "{}pattern=@{}",
                if *optional { "OPTIONAL, " } else { "" },
                ord(node, *pattern)
            ));
            if !hints.is_empty() {
                s.push_str(", hints=");
                seq(node, hints, &mut s);
            }
            if let Some(predicate) = predicate {
                s.push_str(&format!(", where=@{}", ord(node, *predicate)));
            }
        }
        D::UsingIndex {
            identifier,
            label,
            prop_name,
        } => {
            s.push_str(&format!(
                "@{}:@{}(@{})",
                ord(node, *identifier),
                ord(node, *label),
                ord(node, *prop_name)
            ));
        }
        D::UsingJoin { identifiers } => {
            s.push_str("on=");
            seq(node, identifiers, &mut s);
        }
        D::UsingScan { identifier, label } => {
            s.push_str(&format!(
                "@{}:@{}",
                ord(node, *identifier),
                ord(node, *label)
            ));
        }
        D::Merge { path, actions } => {
            s.push_str(&format!("path=@{}", ord(node, *path)));
            if !actions.is_empty() {
                s.push_str(", actions=");
                seq(node, actions, &mut s);
            }
        }
        D::OnMatch { items } | D::OnCreate { items } => {
            s.push_str("items=");
            seq(node, items, &mut s);
        }
        D::Create { unique, pattern } => {
            s.push_str(&format!(
                "{}pattern=@{}",
                if *unique { "UNIQUE, " } else { "" },
                ord(node, *pattern)
            ));
        }
        D::Set { items } | D::Remove { items } => {
            s.push_str("items=");
            seq(node, items, &mut s);
        }
        D::SetProperty {
            property,
            expression,
        } => {
            s.push_str(&format!(
                "@{} = @{}",
                ord(node, *property),
                ord(node, *expression)
            ));
        }
        D::SetAllProperties {
            identifier,
            expression,
        } => {
            s.push_str(&format!(
                "@{} = @{}",
                ord(node, *identifier),
                ord(node, *expression)
            ));
        }
        D::MergeProperties {
            identifier,
            expression,
        } => {
            s.push_str(&format!(
                "@{} += @{}",
                ord(node, *identifier),
                ord(node, *expression)
            ));
        }
        D::SetLabels { identifier, labels } | D::RemoveLabels { identifier, labels } => {
            s.push_str(&format!("@{}", ord(node, *identifier)));
            for &label in labels {
                s.push_str(&format!(":@{}", ord(node, label)));
            }
        }
        D::Delete {
            detach,
            expressions,
        } => {
            s.push_str(if *detach { "DETACH, " } else { "" });
            s.push_str("expressions=");
            seq(node, expressions, &mut s);
        }
        D::RemoveProperty { property } => {
            s.push_str(&format!("prop=@{}", ord(node, *property)));
        }
        D::Foreach {
            identifier,
            expression,
            clauses,
        } => {
            s.push_str(&format!(
                "[@{} IN @{} | ",
                ord(node, *identifier),
                ord(node, *expression)
            ));
            for (i, &clause) in clauses.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!("@{}", ord(node, clause)));
            }
            s.push(']');
        }
        D::With {
            distinct,
            include_existing,
            projections,
            order_by,
            skip,
            limit,
            predicate,
        } => {
            if *distinct {
                s.push_str("DISTINCT, ");
            }
            if *include_existing {
                s.push_str("*, ");
            }
            s.push_str("projections=");
            seq(node, projections, &mut s);
            if let Some(order_by) = order_by {
                s.push_str(&format!(", ORDER BY=@{}", ord(node, *order_by)));
            }
            if let Some(skip) = skip {
                s.push_str(&format!(", SKIP=@{}", ord(node, *skip)));
            }
            if let Some(limit) = limit {
                s.push_str(&format!(", LIMIT=@{}", ord(node, *limit)));
            }
            if let Some(predicate) = predicate {
                s.push_str(&format!(", WHERE=@{}", ord(node, *predicate)));
            }
        }
        D::Unwind { expression, alias } => {
            s.push_str(&format!(
                "expression=@{}, alias=@{}",
                ord(node, *expression),
                ord(node, *alias)
            ));
        }
        D::Call {
            proc_name,
            args,
            projections,
        } => {
            s.push_str(&format!("name=@{}", ord(node, *proc_name)));
            s.push_str(", args=");
            seq(node, args, &mut s);
            if !projections.is_empty() {
                s.push_str(", YIELD=");
                seq(node, projections, &mut s);
            }
        }
        D::Return {
            distinct,
            include_existing,
            projections,
            order_by,
            skip,
            limit,
        } => {
            if *distinct {
                s.push_str("DISTINCT, ");
            }
            if *include_existing {
                s.push_str("*, ");
            }
            s.push_str("projections=");
            seq(node, projections, &mut s);
            if let Some(order_by) = order_by {
                s.push_str(&format!(", ORDER BY=@{}", ord(node, *order_by)));
            }
            if let Some(skip) = skip {
                s.push_str(&format!(", SKIP=@{}", ord(node, *skip)));
            }
            if let Some(limit) = limit {
                s.push_str(&format!(", LIMIT=@{}", ord(node, *limit)));
            }
        }
        D::Projection { expression, alias } => {
            s.push_str(&format!("expression=@{}", ord(node, *expression)));
            if let Some(alias) = alias {
                s.push_str(&format!(", alias=@{}", ord(node, *alias)));
            }
        }
        D::OrderBy { items } => {
            s.push_str("items=");
            seq(node, items, &mut s);
        }
        D::SortItem {
            expression,
            ascending,
        } => {
            s.push_str(&format!(
                "expression=@{}, {}",
                ord(node, *expression),
                if *ascending { "ASCENDING" } else { "DESCENDING" }
            ));
        }
        D::Union { all } => {
            if *all {
                s.push_str("ALL");
            }
        }
        D::UnaryOperator { op, arg } => {
            s.push_str(&format!("{} @{}", op.symbol(), ord(node, *arg)));
        }
        D::BinaryOperator { op, arg1, arg2 } => {
            s.push_str(&format!(
                "@{} {} @{}",
                ord(node, *arg1),
                op.symbol(),
                ord(node, *arg2)
            ));
        }
        D::Comparison { ops, args } => {
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    s.push(' ');
                }
                s.push_str(&format!("@{}", ord(node, arg)));
                if let Some(op) = ops.get(i) {
                    s.push_str(&format!(" {}", op.symbol()));
                }
            }
        }
        D::ApplyOperator {
            func_name,
            distinct,
            args,
        } => {
            s.push_str(&format!(
                "@{}({}",
                ord(node, *func_name),
                if *distinct { "DISTINCT " } else { "" }
            ));
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!("@{}", ord(node, arg)));
            }
            s.push(')');
        }
        D::ApplyAllOperator {
            func_name,
            distinct,
        } => {
            s.push_str(&format!(
                "@{}({}*)",
                ord(node, *func_name),
                if *distinct { "DISTINCT " } else { "" }
            ));
        }
        D::PropertyOperator {
            expression,
            prop_name,
        } => {
            s.push_str(&format!(
                "@{}.@{}",
                ord(node, *expression),
                ord(node, *prop_name)
            ));
        }
        D::SubscriptOperator {
            expression,
            subscript,
        } => {
            s.push_str(&format!(
                "@{}[@{}]",
                ord(node, *expression),
                ord(node, *subscript)
            ));
        }
        D::SliceOperator {
            expression,
            start,
            end,
        } => {
            s.push_str(&format!("@{}[", ord(node, *expression)));
            if let Some(start) = start {
                s.push_str(&format!("@{}", ord(node, *start)));
            }
            s.push_str("..");
            if let Some(end) = end {
                s.push_str(&format!("@{}", ord(node, *end)));
            }
            s.push(']');
        }
        D::LabelsOperator { expression, labels } => {
            s.push_str(&format!("@{}", ord(node, *expression)));
            for &label in labels {
                s.push_str(&format!(":@{}", ord(node, label)));
            }
        }
        D::ListComprehension {
            identifier,
            expression,
            predicate,
            eval,
        } => {
            s.push_str(&format!(
                "[@{} IN @{}",
                ord(node, *identifier),
                ord(node, *expression)
            ));
            if let Some(predicate) = predicate {
                s.push_str(&format!(" WHERE @{}", ord(node, *predicate)));
            }
            if let Some(eval) = eval {
                s.push_str(&format!(" | @{}", ord(node, *eval)));
            }
            s.push(']');
        }
        D::PatternComprehension {
            identifier,
            pattern,
            predicate,
            eval,
        } => {
            s.push('[');
            if let Some(identifier) = identifier {
                s.push_str(&format!("@{} = ", ord(node, *identifier)));
            }
            s.push_str(&format!("@{} ", ord(node, *pattern)));
            if let Some(predicate) = predicate {
                s.push_str(&format!("WHERE @{} ", ord(node, *predicate)));
            }
            s.push_str(&format!("| @{}]", ord(node, *eval)));
        }
        D::Case {
            expression,
            alternatives,
            default,
        } => {
            if let Some(expression) = expression {
                s.push_str(&format!("expression=@{}, ", ord(node, *expression)));
            }
            s.push_str("alternatives=");
            for (i, pair) in alternatives.chunks(2).enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!(
                    "(@{}:@{})",
                    ord(node, pair[0]),
                    ord(node, pair[1])
                ));
            }
            if let Some(default) = default {
                s.push_str(&format!(", default=@{}", ord(node, *default)));
            }
        }
        D::Filter {
            identifier,
            expression,
            predicate,
        }
        | D::All {
            identifier,
            expression,
            predicate,
        }
        | D::Any {
            identifier,
            expression,
            predicate,
        }
        | D::Single {
            identifier,
            expression,
            predicate,
        }
        | D::None {
            identifier,
            expression,
            predicate,
        } => {
            s.push_str(&format!(
                "[@{} IN @{} WHERE @{}]",
                ord(node, *identifier),
                ord(node, *expression),
                ord(node, *predicate)
            ));
        }
        D::Extract {
            identifier,
            expression,
            eval,
        } => {
            s.push_str(&format!(
                "[@{} IN @{} | @{}]",
                ord(node, *identifier),
                ord(node, *expression),
                ord(node, *eval)
            ));
        }
        D::Reduce {
            accumulator,
            init,
            identifier,
            expression,
            eval,
        } => {
            s.push_str(&format!(
                "[@{}=@{}, @{} IN @{} | @{}]",
                ord(node, *accumulator),
                ord(node, *init),
                ord(node, *identifier),
                ord(node, *expression),
                ord(node, *eval)
            ));
        }
        D::Collection { elements } => {
            seq(node, elements, &mut s);
        }
        D::Map { pairs } => {
            s.push('{');
            for (i, pair) in pairs.chunks(2).enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!("@{}:@{}", ord(node, pair[0]), ord(node, pair[1])));
            }
            s.push('}');
        }
        D::Identifier { name } => {
            s.push_str(&format!("`{name}`"));
        }
        D::Parameter { name } => {
            s.push_str(&format!("${name}"));
        }
        D::String { value } => {
            s.push_str(&format!("\"{value}\""));
        }
        D::Integer { value } | D::Float { value } => {
            s.push_str(value);
        }
        D::True | D::False | D::Null => {}
        D::Label { name } | D::Reltype { name } => {
            s.push_str(&format!(":`{name}`"));
        }
        D::PropName { value }
        | D::FunctionName { value }
        | D::IndexName { value }
        | D::ProcName { value } => {
            s.push_str(&format!("`{value}`"));
        }
        D::Pattern { paths } => {
            s.push_str("paths=");
            seq(node, paths, &mut s);
        }
        D::NamedPath { identifier, path } => {
            s.push_str(&format!(
                "@{} = @{}",
                ord(node, *identifier),
                ord(node, *path)
            ));
        }
        D::ShortestPath { single, path } => {
            s.push_str(&format!(
                "single={}, path=@{}",
                if *single { "true" } else { "false" },
                ord(node, *path)
            ));
        }
        D::PatternPath { elements } => {
            for (i, &element) in elements.iter().enumerate() {
                if i % 2 == 0 {
                    s.push_str(&format!("(@{})", ord(node, element)));
                } else {
                    s.push_str(&format!("-[@{}]-", ord(node, element)));
                }
            }
        }
        D::NodePattern {
            identifier,
            labels,
            properties,
        } => {
            s.push('(');
            if let Some(identifier) = identifier {
                s.push_str(&format!("@{}", ord(node, *identifier)));
            }
            for &label in labels {
                s.push_str(&format!(":@{}", ord(node, label)));
            }
            if let Some(properties) = properties {
                s.push_str(&format!(" {{@{}}}", ord(node, *properties)));
            }
            s.push(')');
        }
        D::RelPattern {
            direction,
            identifier,
            reltypes,
            varlength,
            properties,
        } => {
            s.push_str(if *direction == Direction::Inbound {
                "<-["
            } else {
                "-["
            });
            if let Some(identifier) = identifier {
                s.push_str(&format!("@{}", ord(node, *identifier)));
            }
            for (i, &reltype) in reltypes.iter().enumerate() {
                s.push_str(if i == 0 { ":" } else { "|:" });
                s.push_str(&format!("@{}", ord(node, reltype)));
            }
            if let Some(varlength) = varlength {
                s.push_str(&format!("*@{}", ord(node, *varlength)));
            }
            if let Some(properties) = properties {
                s.push_str(&format!(" {{@{}}}", ord(node, *properties)));
            }
            s.push_str(if *direction == Direction::Outbound {
                "]->"
            } else {
                "]-"
            });
        }
        D::Range { start, end } => {
            if let Some(start) = start {
                s.push_str(&format!("@{}", ord(node, *start)));
            }
            s.push_str("..");
            if let Some(end) = end {
                s.push_str(&format!("@{}", ord(node, *end)));
            }
        }
        D::Command { name, args } => {
            s.push_str(&format!("name=@{}, args=", ord(node, *name)));
            seq(node, args, &mut s);
        }
        D::LineComment { value } => {
            s.push_str(&format!("//{value}"));
        }
        D::BlockComment { value } => {
            s.push_str(&format!("/*{value}*/"));
        }
        D::Error { value } => {
            s.push_str(value);
        }
        D::MapProjection {
            expression,
            selectors,
        } => {
            s.push_str(&format!("@{}{{", ord(node, *expression)));
            for (i, &selector) in selectors.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                s.push_str(&format!("@{}", ord(node, selector)));
            }
            s.push('}');
        }
        D::MapProjectionLiteral {
            prop_name,
            expression,
        } => {
            s.push_str(&format!(
                "@{}: @{}",
                ord(node, *prop_name),
                ord(node, *expression)
            ));
        }
        D::MapProjectionProperty { prop_name } => {
            s.push_str(&format!(".@{}", ord(node, *prop_name)));
        }
        D::MapProjectionIdentifier { identifier } => {
            s.push_str(&format!("@{}", ord(node, *identifier)));
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use crate::config::NO_COLORIZATION;
    use crate::Parser;

    fn render(input: &str, width: usize) -> String {
        let result = Parser::new(input).parse().unwrap();
        let mut out = Vec::new();
        result.fprint_ast(&mut out, width, &NO_COLORIZATION).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn columns_align_across_the_forest() {
        let dump = render("RETURN 1;", 0);
        expect![[r#"
            @0  0..9  statement         body=@1
            @1  0..8  > query           clauses=[@2]
            @2  0..8  > > RETURN        projections=[@3]
            @3  7..8  > > > projection  expression=@4
            @4  7..8  > > > > integer   1
        "#]]
        .assert_eq(&dump);
    }

    #[test]
    fn control_characters_in_details_are_escaped() {
        let dump = render("RETURN 'a\nb';", 0);
        assert!(dump.contains("\"a\\nb\""), "{dump}");
    }

    #[test]
    fn long_details_wrap_at_the_render_width() {
        let input = "RETURN 'aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa';";
        let unwrapped = render(input, 0);
        assert!(unwrapped.lines().all(|line| !line.trim_start().is_empty()));

        let wrapped = render(input, 40);
        assert!(wrapped.lines().count() > unwrapped.lines().count());
        // Continuation lines align under the detail column.
        let continuation = wrapped
            .lines()
            .find(|line| line.starts_with("    ") && !line.trim_start().starts_with('@'))
            .unwrap();
        assert!(continuation.trim_start().len() <= 40);
    }
}
