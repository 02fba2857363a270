//! Node constructors.
//!
//! Each constructor consumes one closed [`Block`] and validates every named
//! payload child against the kind its slot requires before assembling the
//! node. Validation failures are programming errors in the grammar glue and
//! surface as [`TreeError`].

use crate::ast::{AstKind, AstNode, Direction, NodeData};
use crate::error::TreeError;
use crate::operators::Operator;
use crate::parser::Block;
use crate::source::InputRange;

type Built = Result<AstNode, TreeError>;

fn require(children: &[AstNode], index: usize, kind: AstKind) -> Result<(), TreeError> {
    let actual = children[index].kind();
    if actual.instance_of(kind) {
        Ok(())
    } else {
        Err(TreeError {
            expected: kind,
            actual,
        })
    }
}

fn require_opt(children: &[AstNode], index: Option<usize>, kind: AstKind) -> Result<(), TreeError> {
    match index {
        Some(index) => require(children, index, kind),
        None => Ok(()),
    }
}

fn require_all(children: &[AstNode], indices: &[usize], kind: AstKind) -> Result<(), TreeError> {
    for &index in indices {
        require(children, index, kind)?;
    }
    Ok(())
}

/// Accept either of two kinds; used where the grammar admits a union, e.g.
/// node properties being a map or a parameter.
fn require_either(
    children: &[AstNode],
    index: usize,
    first: AstKind,
    second: AstKind,
) -> Result<(), TreeError> {
    require(children, index, first).or_else(|_| require(children, index, second))
}

fn require_either_opt(
    children: &[AstNode],
    index: Option<usize>,
    first: AstKind,
    second: AstKind,
) -> Result<(), TreeError> {
    match index {
        Some(index) => require_either(children, index, first, second),
        None => Ok(()),
    }
}

fn node(data: NodeData, block: Block) -> AstNode {
    AstNode::new(data, block.children, block.range)
}

pub(crate) fn statement(body: usize, block: Block) -> Built {
    require(&block.children, body, AstKind::Query)
        .or_else(|_| require(&block.children, body, AstKind::SchemaCommand))?;
    require_all(&block.children, &block.sequence, AstKind::StatementOption)?;
    let options = block.sequence.clone();
    Ok(node(NodeData::Statement { options, body }, block))
}

pub(crate) fn cypher_option(version: Option<usize>, block: Block) -> Built {
    require_opt(&block.children, version, AstKind::String)?;
    require_all(&block.children, &block.sequence, AstKind::CypherOptionParam)?;
    let params = block.sequence.clone();
    Ok(node(NodeData::CypherOption { version, params }, block))
}

pub(crate) fn cypher_option_param(name: usize, value: usize, block: Block) -> Built {
    require(&block.children, name, AstKind::String)?;
    require(&block.children, value, AstKind::String)?;
    Ok(node(NodeData::CypherOptionParam { name, value }, block))
}

pub(crate) fn explain_option(block: Block) -> Built {
    Ok(node(NodeData::ExplainOption, block))
}

pub(crate) fn profile_option(block: Block) -> Built {
    Ok(node(NodeData::ProfileOption, block))
}

pub(crate) fn create_node_prop_index(label: usize, prop_name: usize, block: Block) -> Built {
    require(&block.children, label, AstKind::Label)?;
    require(&block.children, prop_name, AstKind::PropName)?;
    Ok(node(NodeData::CreateNodePropIndex { label, prop_name }, block))
}

pub(crate) fn drop_node_prop_index(label: usize, prop_name: usize, block: Block) -> Built {
    require(&block.children, label, AstKind::Label)?;
    require(&block.children, prop_name, AstKind::PropName)?;
    Ok(node(NodeData::DropNodePropIndex { label, prop_name }, block))
}

fn node_constraint_args(
    identifier: usize,
    label: usize,
    expression: usize,
    block: &Block,
) -> Result<(), TreeError> {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, label, AstKind::Label)?;
    require(&block.children, expression, AstKind::Expression)
}

pub(crate) fn create_node_prop_constraint(
    identifier: usize,
    label: usize,
    expression: usize,
    unique: bool,
    block: Block,
) -> Built {
    node_constraint_args(identifier, label, expression, &block)?;
    Ok(node(
        NodeData::CreateNodePropConstraint {
            identifier,
            label,
            expression,
            unique,
        },
        block,
    ))
}

pub(crate) fn drop_node_prop_constraint(
    identifier: usize,
    label: usize,
    expression: usize,
    unique: bool,
    block: Block,
) -> Built {
    node_constraint_args(identifier, label, expression, &block)?;
    Ok(node(
        NodeData::DropNodePropConstraint {
            identifier,
            label,
            expression,
            unique,
        },
        block,
    ))
}

fn rel_constraint_args(
    identifier: usize,
    reltype: usize,
    expression: usize,
    block: &Block,
) -> Result<(), TreeError> {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, reltype, AstKind::Reltype)?;
    require(&block.children, expression, AstKind::Expression)
}

pub(crate) fn create_rel_prop_constraint(
    identifier: usize,
    reltype: usize,
    expression: usize,
    unique: bool,
    block: Block,
) -> Built {
    rel_constraint_args(identifier, reltype, expression, &block)?;
    Ok(node(
        NodeData::CreateRelPropConstraint {
            identifier,
            reltype,
            expression,
            unique,
        },
        block,
    ))
}

pub(crate) fn drop_rel_prop_constraint(
    identifier: usize,
    reltype: usize,
    expression: usize,
    unique: bool,
    block: Block,
) -> Built {
    rel_constraint_args(identifier, reltype, expression, &block)?;
    Ok(node(
        NodeData::DropRelPropConstraint {
            identifier,
            reltype,
            expression,
            unique,
        },
        block,
    ))
}

/// A query's sequence holds leading `QueryOption`s followed by clauses; the
/// constructor splits them.
pub(crate) fn query(block: Block) -> Built {
    let split = block
        .sequence
        .iter()
        .position(|&index| !block.children[index].instance_of(AstKind::QueryOption))
        .unwrap_or(block.sequence.len());
    let (options, clauses) = block.sequence.split_at(split);
    require_all(&block.children, clauses, AstKind::QueryClause)?;
    let options = options.to_vec();
    let clauses = clauses.to_vec();
    Ok(node(NodeData::Query { options, clauses }, block))
}

pub(crate) fn using_periodic_commit(limit: Option<usize>, block: Block) -> Built {
    require_opt(&block.children, limit, AstKind::Integer)?;
    Ok(node(NodeData::UsingPeriodicCommit { limit }, block))
}

pub(crate) fn load_csv(
    with_headers: bool,
    url: usize,
    identifier: usize,
    field_terminator: Option<usize>,
    block: Block,
) -> Built {
    require(&block.children, url, AstKind::Expression)?;
    require(&block.children, identifier, AstKind::Identifier)?;
    require_opt(&block.children, field_terminator, AstKind::String)?;
    Ok(node(
        NodeData::LoadCsv {
            with_headers,
            url,
            identifier,
            field_terminator,
        },
        block,
    ))
}

pub(crate) fn start(predicate: Option<usize>, block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::StartPoint)?;
    require_opt(&block.children, predicate, AstKind::Expression)?;
    let points = block.sequence.clone();
    Ok(node(NodeData::Start { points, predicate }, block))
}

pub(crate) fn node_index_lookup(
    identifier: usize,
    index_name: usize,
    prop_name: usize,
    lookup: usize,
    block: Block,
) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, index_name, AstKind::IndexName)?;
    require(&block.children, prop_name, AstKind::PropName)?;
    require_either(&block.children, lookup, AstKind::String, AstKind::Parameter)?;
    Ok(node(
        NodeData::NodeIndexLookup {
            identifier,
            index_name,
            prop_name,
            lookup,
        },
        block,
    ))
}

pub(crate) fn node_index_query(
    identifier: usize,
    index_name: usize,
    query: usize,
    block: Block,
) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, index_name, AstKind::IndexName)?;
    require_either(&block.children, query, AstKind::String, AstKind::Parameter)?;
    Ok(node(
        NodeData::NodeIndexQuery {
            identifier,
            index_name,
            query,
        },
        block,
    ))
}

pub(crate) fn node_id_lookup(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require_all(&block.children, &block.sequence, AstKind::Integer)?;
    let ids = block.sequence.clone();
    Ok(node(NodeData::NodeIdLookup { identifier, ids }, block))
}

pub(crate) fn all_nodes_scan(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    Ok(node(NodeData::AllNodesScan { identifier }, block))
}

pub(crate) fn rel_index_lookup(
    identifier: usize,
    index_name: usize,
    prop_name: usize,
    lookup: usize,
    block: Block,
) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, index_name, AstKind::IndexName)?;
    require(&block.children, prop_name, AstKind::PropName)?;
    require_either(&block.children, lookup, AstKind::String, AstKind::Parameter)?;
    Ok(node(
        NodeData::RelIndexLookup {
            identifier,
            index_name,
            prop_name,
            lookup,
        },
        block,
    ))
}

pub(crate) fn rel_index_query(
    identifier: usize,
    index_name: usize,
    query: usize,
    block: Block,
) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, index_name, AstKind::IndexName)?;
    require_either(&block.children, query, AstKind::String, AstKind::Parameter)?;
    Ok(node(
        NodeData::RelIndexQuery {
            identifier,
            index_name,
            query,
        },
        block,
    ))
}

pub(crate) fn rel_id_lookup(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require_all(&block.children, &block.sequence, AstKind::Integer)?;
    let ids = block.sequence.clone();
    Ok(node(NodeData::RelIdLookup { identifier, ids }, block))
}

pub(crate) fn all_rels_scan(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    Ok(node(NodeData::AllRelsScan { identifier }, block))
}

pub(crate) fn match_clause(
    optional: bool,
    pattern: usize,
    predicate: Option<usize>,
    block: Block,
) -> Built {
    require(&block.children, pattern, AstKind::Pattern)?;
    require_all(&block.children, &block.sequence, AstKind::MatchHint)?;
    require_opt(&block.children, predicate, AstKind::Expression)?;
    let hints = block.sequence.clone();
    Ok(node(
        NodeData::Match {
            optional,
            pattern,
            hints,
            predicate,
        },
        block,
    ))
}

pub(crate) fn using_index(
    identifier: usize,
    label: usize,
    prop_name: usize,
    block: Block,
) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, label, AstKind::Label)?;
    require(&block.children, prop_name, AstKind::PropName)?;
    Ok(node(
        NodeData::UsingIndex {
            identifier,
            label,
            prop_name,
        },
        block,
    ))
}

pub(crate) fn using_join(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::Identifier)?;
    let identifiers = block.sequence.clone();
    Ok(node(NodeData::UsingJoin { identifiers }, block))
}

pub(crate) fn using_scan(identifier: usize, label: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, label, AstKind::Label)?;
    Ok(node(NodeData::UsingScan { identifier, label }, block))
}

pub(crate) fn merge(path: usize, block: Block) -> Built {
    require(&block.children, path, AstKind::PatternPath)?;
    require_all(&block.children, &block.sequence, AstKind::MergeAction)?;
    let actions = block.sequence.clone();
    Ok(node(NodeData::Merge { path, actions }, block))
}

pub(crate) fn on_match(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::SetItem)?;
    let items = block.sequence.clone();
    Ok(node(NodeData::OnMatch { items }, block))
}

pub(crate) fn on_create(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::SetItem)?;
    let items = block.sequence.clone();
    Ok(node(NodeData::OnCreate { items }, block))
}

pub(crate) fn create(unique: bool, pattern: usize, block: Block) -> Built {
    require(&block.children, pattern, AstKind::Pattern)?;
    Ok(node(NodeData::Create { unique, pattern }, block))
}

pub(crate) fn set(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::SetItem)?;
    let items = block.sequence.clone();
    Ok(node(NodeData::Set { items }, block))
}

pub(crate) fn set_property(property: usize, expression: usize, block: Block) -> Built {
    require(&block.children, property, AstKind::PropertyOperator)?;
    require(&block.children, expression, AstKind::Expression)?;
    Ok(node(
        NodeData::SetProperty {
            property,
            expression,
        },
        block,
    ))
}

pub(crate) fn set_all_properties(identifier: usize, expression: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    Ok(node(
        NodeData::SetAllProperties {
            identifier,
            expression,
        },
        block,
    ))
}

pub(crate) fn merge_properties(identifier: usize, expression: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    Ok(node(
        NodeData::MergeProperties {
            identifier,
            expression,
        },
        block,
    ))
}

pub(crate) fn set_labels(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require_all(&block.children, &block.sequence, AstKind::Label)?;
    let labels = block.sequence.clone();
    Ok(node(NodeData::SetLabels { identifier, labels }, block))
}

pub(crate) fn delete(detach: bool, block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::Expression)?;
    let expressions = block.sequence.clone();
    Ok(node(
        NodeData::Delete {
            detach,
            expressions,
        },
        block,
    ))
}

pub(crate) fn remove(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::RemoveItem)?;
    let items = block.sequence.clone();
    Ok(node(NodeData::Remove { items }, block))
}

pub(crate) fn remove_labels(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require_all(&block.children, &block.sequence, AstKind::Label)?;
    let labels = block.sequence.clone();
    Ok(node(NodeData::RemoveLabels { identifier, labels }, block))
}

pub(crate) fn remove_property(property: usize, block: Block) -> Built {
    require(&block.children, property, AstKind::PropertyOperator)?;
    Ok(node(NodeData::RemoveProperty { property }, block))
}

pub(crate) fn foreach(identifier: usize, expression: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    require_all(&block.children, &block.sequence, AstKind::QueryClause)?;
    let clauses = block.sequence.clone();
    Ok(node(
        NodeData::Foreach {
            identifier,
            expression,
            clauses,
        },
        block,
    ))
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn with_clause(
    distinct: bool,
    include_existing: bool,
    order_by: Option<usize>,
    skip: Option<usize>,
    limit: Option<usize>,
    predicate: Option<usize>,
    block: Block,
) -> Built {
    require_all(&block.children, &block.sequence, AstKind::Projection)?;
    require_opt(&block.children, order_by, AstKind::OrderBy)?;
    require_opt(&block.children, skip, AstKind::Expression)?;
    require_opt(&block.children, limit, AstKind::Expression)?;
    require_opt(&block.children, predicate, AstKind::Expression)?;
    let projections = block.sequence.clone();
    Ok(node(
        NodeData::With {
            distinct,
            include_existing,
            projections,
            order_by,
            skip,
            limit,
            predicate,
        },
        block,
    ))
}

pub(crate) fn unwind(expression: usize, alias: usize, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require(&block.children, alias, AstKind::Identifier)?;
    Ok(node(NodeData::Unwind { expression, alias }, block))
}

pub(crate) fn call(
    proc_name: usize,
    args: Vec<usize>,
    projections: Vec<usize>,
    block: Block,
) -> Built {
    require(&block.children, proc_name, AstKind::ProcName)?;
    require_all(&block.children, &args, AstKind::Expression)?;
    require_all(&block.children, &projections, AstKind::Projection)?;
    Ok(node(
        NodeData::Call {
            proc_name,
            args,
            projections,
        },
        block,
    ))
}

pub(crate) fn return_clause(
    distinct: bool,
    include_existing: bool,
    order_by: Option<usize>,
    skip: Option<usize>,
    limit: Option<usize>,
    block: Block,
) -> Built {
    require_all(&block.children, &block.sequence, AstKind::Projection)?;
    require_opt(&block.children, order_by, AstKind::OrderBy)?;
    require_opt(&block.children, skip, AstKind::Expression)?;
    require_opt(&block.children, limit, AstKind::Expression)?;
    let projections = block.sequence.clone();
    Ok(node(
        NodeData::Return {
            distinct,
            include_existing,
            projections,
            order_by,
            skip,
            limit,
        },
        block,
    ))
}

pub(crate) fn projection(expression: usize, alias: Option<usize>, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require_opt(&block.children, alias, AstKind::Identifier)?;
    Ok(node(NodeData::Projection { expression, alias }, block))
}

pub(crate) fn order_by(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::SortItem)?;
    let items = block.sequence.clone();
    Ok(node(NodeData::OrderBy { items }, block))
}

pub(crate) fn sort_item(expression: usize, ascending: bool, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    Ok(node(
        NodeData::SortItem {
            expression,
            ascending,
        },
        block,
    ))
}

pub(crate) fn union_clause(all: bool, block: Block) -> Built {
    Ok(node(NodeData::Union { all }, block))
}

pub(crate) fn unary_operator(op: &'static Operator, arg: usize, block: Block) -> Built {
    require(&block.children, arg, AstKind::Expression)?;
    Ok(node(NodeData::UnaryOperator { op, arg }, block))
}

pub(crate) fn binary_operator(
    op: &'static Operator,
    arg1: usize,
    arg2: usize,
    block: Block,
) -> Built {
    require(&block.children, arg1, AstKind::Expression)?;
    require(&block.children, arg2, AstKind::Expression)?;
    Ok(node(NodeData::BinaryOperator { op, arg1, arg2 }, block))
}

pub(crate) fn comparison(
    ops: Vec<&'static Operator>,
    args: Vec<usize>,
    block: Block,
) -> Built {
    debug_assert_eq!(args.len(), ops.len() + 1);
    require_all(&block.children, &args, AstKind::Expression)?;
    Ok(node(NodeData::Comparison { ops, args }, block))
}

pub(crate) fn apply_operator(func_name: usize, distinct: bool, block: Block) -> Built {
    require(&block.children, func_name, AstKind::FunctionName)?;
    require_all(&block.children, &block.sequence, AstKind::Expression)?;
    let args = block.sequence.clone();
    Ok(node(
        NodeData::ApplyOperator {
            func_name,
            distinct,
            args,
        },
        block,
    ))
}

pub(crate) fn apply_all_operator(func_name: usize, distinct: bool, block: Block) -> Built {
    require(&block.children, func_name, AstKind::FunctionName)?;
    Ok(node(
        NodeData::ApplyAllOperator {
            func_name,
            distinct,
        },
        block,
    ))
}

pub(crate) fn property_operator(expression: usize, prop_name: usize, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require(&block.children, prop_name, AstKind::PropName)?;
    Ok(node(
        NodeData::PropertyOperator {
            expression,
            prop_name,
        },
        block,
    ))
}

pub(crate) fn subscript_operator(expression: usize, subscript: usize, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require(&block.children, subscript, AstKind::Expression)?;
    Ok(node(
        NodeData::SubscriptOperator {
            expression,
            subscript,
        },
        block,
    ))
}

pub(crate) fn slice_operator(
    expression: usize,
    start: Option<usize>,
    end: Option<usize>,
    block: Block,
) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require_opt(&block.children, start, AstKind::Expression)?;
    require_opt(&block.children, end, AstKind::Expression)?;
    Ok(node(
        NodeData::SliceOperator {
            expression,
            start,
            end,
        },
        block,
    ))
}

pub(crate) fn labels_operator(expression: usize, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require_all(&block.children, &block.sequence, AstKind::Label)?;
    let labels = block.sequence.clone();
    Ok(node(
        NodeData::LabelsOperator {
            expression,
            labels,
        },
        block,
    ))
}

pub(crate) fn list_comprehension(
    identifier: usize,
    expression: usize,
    predicate: Option<usize>,
    eval: Option<usize>,
    block: Block,
) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    require_opt(&block.children, predicate, AstKind::Expression)?;
    require_opt(&block.children, eval, AstKind::Expression)?;
    Ok(node(
        NodeData::ListComprehension {
            identifier,
            expression,
            predicate,
            eval,
        },
        block,
    ))
}

pub(crate) fn pattern_comprehension(
    identifier: Option<usize>,
    pattern: usize,
    predicate: Option<usize>,
    eval: usize,
    block: Block,
) -> Built {
    require_opt(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, pattern, AstKind::PatternPath)?;
    require_opt(&block.children, predicate, AstKind::Expression)?;
    require(&block.children, eval, AstKind::Expression)?;
    Ok(node(
        NodeData::PatternComprehension {
            identifier,
            pattern,
            predicate,
            eval,
        },
        block,
    ))
}

pub(crate) fn case(expression: Option<usize>, default: Option<usize>, block: Block) -> Built {
    require_opt(&block.children, expression, AstKind::Expression)?;
    require_all(&block.children, &block.sequence, AstKind::Expression)?;
    require_opt(&block.children, default, AstKind::Expression)?;
    debug_assert!(block.sequence.len() % 2 == 0);
    let alternatives = block.sequence.clone();
    Ok(node(
        NodeData::Case {
            expression,
            alternatives,
            default,
        },
        block,
    ))
}

fn comprehension_args(
    identifier: usize,
    expression: usize,
    predicate: usize,
    block: &Block,
) -> Result<(), TreeError> {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    require(&block.children, predicate, AstKind::Expression)
}

pub(crate) fn filter(
    identifier: usize,
    expression: usize,
    predicate: usize,
    block: Block,
) -> Built {
    comprehension_args(identifier, expression, predicate, &block)?;
    Ok(node(
        NodeData::Filter {
            identifier,
            expression,
            predicate,
        },
        block,
    ))
}

pub(crate) fn extract(identifier: usize, expression: usize, eval: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    require(&block.children, eval, AstKind::Expression)?;
    Ok(node(
        NodeData::Extract {
            identifier,
            expression,
            eval,
        },
        block,
    ))
}

pub(crate) fn reduce(
    accumulator: usize,
    init: usize,
    identifier: usize,
    expression: usize,
    eval: usize,
    block: Block,
) -> Built {
    require(&block.children, accumulator, AstKind::Identifier)?;
    require(&block.children, init, AstKind::Expression)?;
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, expression, AstKind::Expression)?;
    require(&block.children, eval, AstKind::Expression)?;
    Ok(node(
        NodeData::Reduce {
            accumulator,
            init,
            identifier,
            expression,
            eval,
        },
        block,
    ))
}

pub(crate) fn all(identifier: usize, expression: usize, predicate: usize, block: Block) -> Built {
    comprehension_args(identifier, expression, predicate, &block)?;
    Ok(node(
        NodeData::All {
            identifier,
            expression,
            predicate,
        },
        block,
    ))
}

pub(crate) fn any(identifier: usize, expression: usize, predicate: usize, block: Block) -> Built {
    comprehension_args(identifier, expression, predicate, &block)?;
    Ok(node(
        NodeData::Any {
            identifier,
            expression,
            predicate,
        },
        block,
    ))
}

pub(crate) fn single(
    identifier: usize,
    expression: usize,
    predicate: usize,
    block: Block,
) -> Built {
    comprehension_args(identifier, expression, predicate, &block)?;
    Ok(node(
        NodeData::Single {
            identifier,
            expression,
            predicate,
        },
        block,
    ))
}

pub(crate) fn none(identifier: usize, expression: usize, predicate: usize, block: Block) -> Built {
    comprehension_args(identifier, expression, predicate, &block)?;
    Ok(node(
        NodeData::None {
            identifier,
            expression,
            predicate,
        },
        block,
    ))
}

pub(crate) fn collection(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::Expression)?;
    let elements = block.sequence.clone();
    Ok(node(NodeData::Collection { elements }, block))
}

/// The sequence holds alternating key/value indices.
pub(crate) fn map(block: Block) -> Built {
    debug_assert!(block.sequence.len() % 2 == 0);
    for (i, &index) in block.sequence.iter().enumerate() {
        if i % 2 == 0 {
            require(&block.children, index, AstKind::PropName)?;
        } else {
            require(&block.children, index, AstKind::Expression)?;
        }
    }
    let pairs = block.sequence.clone();
    Ok(node(NodeData::Map { pairs }, block))
}

pub(crate) fn pattern(block: Block) -> Built {
    require_all(&block.children, &block.sequence, AstKind::PatternPath)?;
    let paths = block.sequence.clone();
    Ok(node(NodeData::Pattern { paths }, block))
}

pub(crate) fn named_path(identifier: usize, path: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    require(&block.children, path, AstKind::PatternPath)?;
    Ok(node(NodeData::NamedPath { identifier, path }, block))
}

pub(crate) fn shortest_path(single: bool, path: usize, block: Block) -> Built {
    require(&block.children, path, AstKind::PatternPath)?;
    Ok(node(NodeData::ShortestPath { single, path }, block))
}

/// Path elements alternate node and relationship patterns and the total
/// count is odd.
pub(crate) fn pattern_path(block: Block) -> Built {
    for (i, &index) in block.sequence.iter().enumerate() {
        if i % 2 == 0 {
            require(&block.children, index, AstKind::NodePattern)?;
        } else {
            require(&block.children, index, AstKind::RelPattern)?;
        }
    }
    debug_assert!(block.sequence.len() % 2 == 1);
    let elements = block.sequence.clone();
    Ok(node(NodeData::PatternPath { elements }, block))
}

pub(crate) fn node_pattern(
    identifier: Option<usize>,
    properties: Option<usize>,
    block: Block,
) -> Built {
    require_opt(&block.children, identifier, AstKind::Identifier)?;
    require_all(&block.children, &block.sequence, AstKind::Label)?;
    require_either_opt(&block.children, properties, AstKind::Map, AstKind::Parameter)?;
    let labels = block.sequence.clone();
    Ok(node(
        NodeData::NodePattern {
            identifier,
            labels,
            properties,
        },
        block,
    ))
}

pub(crate) fn rel_pattern(
    direction: Direction,
    identifier: Option<usize>,
    varlength: Option<usize>,
    properties: Option<usize>,
    block: Block,
) -> Built {
    require_opt(&block.children, identifier, AstKind::Identifier)?;
    require_all(&block.children, &block.sequence, AstKind::Reltype)?;
    require_opt(&block.children, varlength, AstKind::Range)?;
    require_either_opt(&block.children, properties, AstKind::Map, AstKind::Parameter)?;
    let reltypes = block.sequence.clone();
    Ok(node(
        NodeData::RelPattern {
            direction,
            identifier,
            reltypes,
            varlength,
            properties,
        },
        block,
    ))
}

pub(crate) fn range(start: Option<usize>, end: Option<usize>, block: Block) -> Built {
    require_opt(&block.children, start, AstKind::Integer)?;
    require_opt(&block.children, end, AstKind::Integer)?;
    Ok(node(NodeData::Range { start, end }, block))
}

pub(crate) fn command(name: usize, block: Block) -> Built {
    require(&block.children, name, AstKind::String)?;
    require_all(&block.children, &block.sequence, AstKind::String)?;
    let args = block.sequence.clone();
    Ok(node(NodeData::Command { name, args }, block))
}

pub(crate) fn map_projection(expression: usize, block: Block) -> Built {
    require(&block.children, expression, AstKind::Expression)?;
    require_all(
        &block.children,
        &block.sequence,
        AstKind::MapProjectionSelector,
    )?;
    let selectors = block.sequence.clone();
    Ok(node(
        NodeData::MapProjection {
            expression,
            selectors,
        },
        block,
    ))
}

pub(crate) fn map_projection_literal(prop_name: usize, expression: usize, block: Block) -> Built {
    require(&block.children, prop_name, AstKind::PropName)?;
    require(&block.children, expression, AstKind::Expression)?;
    Ok(node(
        NodeData::MapProjectionLiteral {
            prop_name,
            expression,
        },
        block,
    ))
}

pub(crate) fn map_projection_property(prop_name: usize, block: Block) -> Built {
    require(&block.children, prop_name, AstKind::PropName)?;
    Ok(node(NodeData::MapProjectionProperty { prop_name }, block))
}

pub(crate) fn map_projection_identifier(identifier: usize, block: Block) -> Built {
    require(&block.children, identifier, AstKind::Identifier)?;
    Ok(node(NodeData::MapProjectionIdentifier { identifier }, block))
}

pub(crate) fn map_projection_all_properties(block: Block) -> Built {
    Ok(node(NodeData::MapProjectionAllProperties, block))
}

// Terminal constructors carry their text and range directly and never have
// children.

fn terminal(data: NodeData, range: InputRange) -> AstNode {
    AstNode::new(data, Vec::new(), range)
}

pub(crate) fn identifier(name: String, range: InputRange) -> AstNode {
    terminal(NodeData::Identifier { name }, range)
}

pub(crate) fn parameter(name: String, range: InputRange) -> AstNode {
    terminal(NodeData::Parameter { name }, range)
}

pub(crate) fn string(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::String { value }, range)
}

pub(crate) fn integer(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::Integer { value }, range)
}

pub(crate) fn float(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::Float { value }, range)
}

pub(crate) fn true_literal(range: InputRange) -> AstNode {
    terminal(NodeData::True, range)
}

pub(crate) fn false_literal(range: InputRange) -> AstNode {
    terminal(NodeData::False, range)
}

pub(crate) fn null_literal(range: InputRange) -> AstNode {
    terminal(NodeData::Null, range)
}

pub(crate) fn label(name: String, range: InputRange) -> AstNode {
    terminal(NodeData::Label { name }, range)
}

pub(crate) fn reltype(name: String, range: InputRange) -> AstNode {
    terminal(NodeData::Reltype { name }, range)
}

pub(crate) fn prop_name(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::PropName { value }, range)
}

pub(crate) fn function_name(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::FunctionName { value }, range)
}

pub(crate) fn index_name(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::IndexName { value }, range)
}

pub(crate) fn proc_name(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::ProcName { value }, range)
}

pub(crate) fn line_comment(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::LineComment { value }, range)
}

pub(crate) fn block_comment(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::BlockComment { value }, range)
}

pub(crate) fn error(value: String, range: InputRange) -> AstNode {
    terminal(NodeData::Error { value }, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstKind;
    use crate::source::InputPosition;

    fn block_with(children: Vec<AstNode>) -> Block {
        let mut block = Block::open(0, InputPosition::START);
        block.children = children;
        block
    }

    fn range() -> InputRange {
        InputRange {
            start: InputPosition::START,
            end: InputPosition::START,
        }
    }

    #[test]
    fn constructors_validate_payload_kinds() {
        // A match clause requires a pattern, not an integer.
        let block = block_with(vec![integer("1".into(), range())]);
        let err = match_clause(false, 0, None, block).unwrap_err();
        assert_eq!(err.expected(), AstKind::Pattern);
        assert_eq!(err.actual(), AstKind::Integer);
    }

    #[test]
    fn validation_accepts_subkinds() {
        // A sort item accepts any expression subkind.
        let block = block_with(vec![true_literal(range())]);
        let item = sort_item(0, true, block).unwrap();
        assert_eq!(item.kind(), AstKind::SortItem);
    }

    #[test]
    fn union_typed_slots_accept_either_kind() {
        let map_props = block_with(vec![map(block_with(Vec::new())).unwrap()]);
        assert!(node_pattern(None, Some(0), map_props).is_ok());

        let param_props = block_with(vec![parameter("p".into(), range())]);
        assert!(node_pattern(None, Some(0), param_props).is_ok());

        let bad_props = block_with(vec![integer("1".into(), range())]);
        let err = node_pattern(None, Some(0), bad_props).unwrap_err();
        assert_eq!(err.expected(), AstKind::Parameter);
    }
}
