//! Typed, per-kind accessors over [`AstNode`].
//!
//! `AstNode::as_<kind>()` returns a lightweight view when the node has that
//! kind, and the view exposes the kind's payload with the right types. Every
//! payload accessor resolves through the node's child array, so anything a
//! view hands back is also reachable through the generic walk API.

use ordered_float::OrderedFloat;

use crate::ast::{AstNode, Direction, NodeData};
use crate::operators::Operator;

macro_rules! payload {
    ($view:expr, $variant:ident { $($field:ident),+ $(,)? }) => {
        match &$view.node.data {
            NodeData::$variant { $($field,)* .. } => ($($field,)+),
            _ => unreachable!("view kind is checked at construction"),
        }
    };
}

macro_rules! views {
    ($($(#[$doc:meta])* $name:ident / $as_name:ident : $variant:ident;)+) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy)]
            pub struct $name<'a> {
                pub(crate) node: &'a AstNode,
            }

            impl<'a> $name<'a> {
                /// The underlying AST node.
                pub fn node(&self) -> &'a AstNode {
                    self.node
                }
            }
        )+

        impl AstNode {
            $(
                pub fn $as_name(&self) -> Option<$name<'_>> {
                    match &self.data {
                        NodeData::$variant { .. } => Some($name { node: self }),
                        _ => None,
                    }
                }
            )+
        }
    };
}

views! {
    /// A top-level statement: options plus a query or schema command body.
    Statement / as_statement: Statement;
    /// A `CYPHER` statement option.
    CypherOption / as_cypher_option: CypherOption;
    /// A `name=value` parameter of a `CYPHER` option.
    CypherOptionParam / as_cypher_option_param: CypherOptionParam;
    /// `CREATE INDEX ON :Label(prop)`.
    CreateNodePropIndex / as_create_node_prop_index: CreateNodePropIndex;
    /// `DROP INDEX ON :Label(prop)`.
    DropNodePropIndex / as_drop_node_prop_index: DropNodePropIndex;
    CreateNodePropConstraint / as_create_node_prop_constraint: CreateNodePropConstraint;
    DropNodePropConstraint / as_drop_node_prop_constraint: DropNodePropConstraint;
    CreateRelPropConstraint / as_create_rel_prop_constraint: CreateRelPropConstraint;
    DropRelPropConstraint / as_drop_rel_prop_constraint: DropRelPropConstraint;
    /// A regular query: options plus a clause sequence.
    Query / as_query: Query;
    /// `USING PERIODIC COMMIT [n]`.
    UsingPeriodicCommit / as_using_periodic_commit: UsingPeriodicCommit;
    LoadCsv / as_load_csv: LoadCsv;
    Start / as_start: Start;
    NodeIndexLookup / as_node_index_lookup: NodeIndexLookup;
    NodeIndexQuery / as_node_index_query: NodeIndexQuery;
    NodeIdLookup / as_node_id_lookup: NodeIdLookup;
    AllNodesScan / as_all_nodes_scan: AllNodesScan;
    RelIndexLookup / as_rel_index_lookup: RelIndexLookup;
    RelIndexQuery / as_rel_index_query: RelIndexQuery;
    RelIdLookup / as_rel_id_lookup: RelIdLookup;
    AllRelsScan / as_all_rels_scan: AllRelsScan;
    /// A `MATCH` clause.
    Match / as_match: Match;
    UsingIndex / as_using_index: UsingIndex;
    UsingJoin / as_using_join: UsingJoin;
    UsingScan / as_using_scan: UsingScan;
    Merge / as_merge: Merge;
    OnMatch / as_on_match: OnMatch;
    OnCreate / as_on_create: OnCreate;
    Create / as_create: Create;
    Set / as_set: Set;
    SetProperty / as_set_property: SetProperty;
    SetAllProperties / as_set_all_properties: SetAllProperties;
    MergeProperties / as_merge_properties: MergeProperties;
    SetLabels / as_set_labels: SetLabels;
    Delete / as_delete: Delete;
    Remove / as_remove: Remove;
    RemoveLabels / as_remove_labels: RemoveLabels;
    RemoveProperty / as_remove_property: RemoveProperty;
    Foreach / as_foreach: Foreach;
    With / as_with: With;
    Unwind / as_unwind: Unwind;
    Call / as_call: Call;
    /// A `RETURN` clause.
    Return / as_return: Return;
    Projection / as_projection: Projection;
    OrderBy / as_order_by: OrderBy;
    SortItem / as_sort_item: SortItem;
    Union / as_union: Union;
    UnaryOperator / as_unary_operator: UnaryOperator;
    BinaryOperator / as_binary_operator: BinaryOperator;
    /// A chained comparison, e.g. `a < b <= c`.
    Comparison / as_comparison: Comparison;
    ApplyOperator / as_apply_operator: ApplyOperator;
    ApplyAllOperator / as_apply_all_operator: ApplyAllOperator;
    PropertyOperator / as_property_operator: PropertyOperator;
    SubscriptOperator / as_subscript_operator: SubscriptOperator;
    SliceOperator / as_slice_operator: SliceOperator;
    LabelsOperator / as_labels_operator: LabelsOperator;
    ListComprehension / as_list_comprehension: ListComprehension;
    PatternComprehension / as_pattern_comprehension: PatternComprehension;
    Case / as_case: Case;
    Filter / as_filter: Filter;
    Extract / as_extract: Extract;
    Reduce / as_reduce: Reduce;
    AllPredicate / as_all: All;
    AnyPredicate / as_any: Any;
    SinglePredicate / as_single: Single;
    NonePredicate / as_none: None;
    Collection / as_collection: Collection;
    Map / as_map: Map;
    Identifier / as_identifier: Identifier;
    Parameter / as_parameter: Parameter;
    StringLiteral / as_string: String;
    IntegerLiteral / as_integer: Integer;
    FloatLiteral / as_float: Float;
    Label / as_label: Label;
    Reltype / as_reltype: Reltype;
    PropName / as_prop_name: PropName;
    FunctionName / as_function_name: FunctionName;
    IndexName / as_index_name: IndexName;
    ProcName / as_proc_name: ProcName;
    Pattern / as_pattern: Pattern;
    NamedPath / as_named_path: NamedPath;
    ShortestPath / as_shortest_path: ShortestPath;
    PatternPath / as_pattern_path: PatternPath;
    NodePattern / as_node_pattern: NodePattern;
    RelPattern / as_rel_pattern: RelPattern;
    Range / as_range: Range;
    Command / as_command: Command;
    LineComment / as_line_comment: LineComment;
    BlockComment / as_block_comment: BlockComment;
    ErrorNode / as_error: Error;
    MapProjection / as_map_projection: MapProjection;
    MapProjectionLiteral / as_map_projection_literal: MapProjectionLiteral;
    MapProjectionProperty / as_map_projection_property: MapProjectionProperty;
    MapProjectionIdentifier / as_map_projection_identifier: MapProjectionIdentifier;
}

fn nth<'a>(node: &'a AstNode, indices: &[usize], i: usize) -> Option<&'a AstNode> {
    indices.get(i).map(|&index| node.at(index))
}

impl<'a> Statement<'a> {
    pub fn noptions(&self) -> usize {
        let (options,) = payload!(self, Statement { options });
        options.len()
    }

    pub fn option(&self, i: usize) -> Option<&'a AstNode> {
        let (options,) = payload!(self, Statement { options });
        nth(self.node, options, i)
    }

    /// The statement body: a query or a schema command.
    pub fn body(&self) -> &'a AstNode {
        let (body,) = payload!(self, Statement { body });
        self.node.at(*body)
    }
}

impl<'a> CypherOption<'a> {
    pub fn version(&self) -> Option<&'a AstNode> {
        let (version,) = payload!(self, CypherOption { version });
        self.node.at_opt(*version)
    }

    pub fn nparams(&self) -> usize {
        let (params,) = payload!(self, CypherOption { params });
        params.len()
    }

    pub fn param(&self, i: usize) -> Option<&'a AstNode> {
        let (params,) = payload!(self, CypherOption { params });
        nth(self.node, params, i)
    }
}

impl<'a> CypherOptionParam<'a> {
    pub fn name(&self) -> &'a AstNode {
        let (name,) = payload!(self, CypherOptionParam { name });
        self.node.at(*name)
    }

    pub fn value(&self) -> &'a AstNode {
        let (value,) = payload!(self, CypherOptionParam { value });
        self.node.at(*value)
    }
}

impl<'a> CreateNodePropIndex<'a> {
    pub fn label(&self) -> &'a AstNode {
        let (label,) = payload!(self, CreateNodePropIndex { label });
        self.node.at(*label)
    }

    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, CreateNodePropIndex { prop_name });
        self.node.at(*prop_name)
    }
}

impl<'a> DropNodePropIndex<'a> {
    pub fn label(&self) -> &'a AstNode {
        let (label,) = payload!(self, DropNodePropIndex { label });
        self.node.at(*label)
    }

    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, DropNodePropIndex { prop_name });
        self.node.at(*prop_name)
    }
}

impl<'a> CreateNodePropConstraint<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, CreateNodePropConstraint { identifier });
        self.node.at(*identifier)
    }

    pub fn label(&self) -> &'a AstNode {
        let (label,) = payload!(self, CreateNodePropConstraint { label });
        self.node.at(*label)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, CreateNodePropConstraint { expression });
        self.node.at(*expression)
    }

    pub fn is_unique(&self) -> bool {
        let (unique,) = payload!(self, CreateNodePropConstraint { unique });
        *unique
    }
}

impl<'a> DropNodePropConstraint<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, DropNodePropConstraint { identifier });
        self.node.at(*identifier)
    }

    pub fn label(&self) -> &'a AstNode {
        let (label,) = payload!(self, DropNodePropConstraint { label });
        self.node.at(*label)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, DropNodePropConstraint { expression });
        self.node.at(*expression)
    }

    pub fn is_unique(&self) -> bool {
        let (unique,) = payload!(self, DropNodePropConstraint { unique });
        *unique
    }
}

impl<'a> CreateRelPropConstraint<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, CreateRelPropConstraint { identifier });
        self.node.at(*identifier)
    }

    pub fn reltype(&self) -> &'a AstNode {
        let (reltype,) = payload!(self, CreateRelPropConstraint { reltype });
        self.node.at(*reltype)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, CreateRelPropConstraint { expression });
        self.node.at(*expression)
    }

    pub fn is_unique(&self) -> bool {
        let (unique,) = payload!(self, CreateRelPropConstraint { unique });
        *unique
    }
}

impl<'a> DropRelPropConstraint<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, DropRelPropConstraint { identifier });
        self.node.at(*identifier)
    }

    pub fn reltype(&self) -> &'a AstNode {
        let (reltype,) = payload!(self, DropRelPropConstraint { reltype });
        self.node.at(*reltype)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, DropRelPropConstraint { expression });
        self.node.at(*expression)
    }

    pub fn is_unique(&self) -> bool {
        let (unique,) = payload!(self, DropRelPropConstraint { unique });
        *unique
    }
}

impl<'a> Query<'a> {
    pub fn noptions(&self) -> usize {
        let (options,) = payload!(self, Query { options });
        options.len()
    }

    pub fn option(&self, i: usize) -> Option<&'a AstNode> {
        let (options,) = payload!(self, Query { options });
        nth(self.node, options, i)
    }

    pub fn nclauses(&self) -> usize {
        let (clauses,) = payload!(self, Query { clauses });
        clauses.len()
    }

    pub fn clause(&self, i: usize) -> Option<&'a AstNode> {
        let (clauses,) = payload!(self, Query { clauses });
        nth(self.node, clauses, i)
    }
}

impl<'a> UsingPeriodicCommit<'a> {
    pub fn limit(&self) -> Option<&'a AstNode> {
        let (limit,) = payload!(self, UsingPeriodicCommit { limit });
        self.node.at_opt(*limit)
    }
}

impl<'a> LoadCsv<'a> {
    pub fn has_headers(&self) -> bool {
        let (with_headers,) = payload!(self, LoadCsv { with_headers });
        *with_headers
    }

    pub fn url(&self) -> &'a AstNode {
        let (url,) = payload!(self, LoadCsv { url });
        self.node.at(*url)
    }

    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, LoadCsv { identifier });
        self.node.at(*identifier)
    }

    pub fn field_terminator(&self) -> Option<&'a AstNode> {
        let (field_terminator,) = payload!(self, LoadCsv { field_terminator });
        self.node.at_opt(*field_terminator)
    }
}

impl<'a> Start<'a> {
    pub fn npoints(&self) -> usize {
        let (points,) = payload!(self, Start { points });
        points.len()
    }

    pub fn point(&self, i: usize) -> Option<&'a AstNode> {
        let (points,) = payload!(self, Start { points });
        nth(self.node, points, i)
    }

    pub fn predicate(&self) -> Option<&'a AstNode> {
        let (predicate,) = payload!(self, Start { predicate });
        self.node.at_opt(*predicate)
    }
}

impl<'a> NodeIndexLookup<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, NodeIndexLookup { identifier });
        self.node.at(*identifier)
    }

    pub fn index_name(&self) -> &'a AstNode {
        let (index_name,) = payload!(self, NodeIndexLookup { index_name });
        self.node.at(*index_name)
    }

    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, NodeIndexLookup { prop_name });
        self.node.at(*prop_name)
    }

    /// The looked-up value: a string or a parameter.
    pub fn lookup(&self) -> &'a AstNode {
        let (lookup,) = payload!(self, NodeIndexLookup { lookup });
        self.node.at(*lookup)
    }
}

impl<'a> NodeIndexQuery<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, NodeIndexQuery { identifier });
        self.node.at(*identifier)
    }

    pub fn index_name(&self) -> &'a AstNode {
        let (index_name,) = payload!(self, NodeIndexQuery { index_name });
        self.node.at(*index_name)
    }

    /// The query text: a string or a parameter.
    pub fn query(&self) -> &'a AstNode {
        let (query,) = payload!(self, NodeIndexQuery { query });
        self.node.at(*query)
    }
}

impl<'a> NodeIdLookup<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, NodeIdLookup { identifier });
        self.node.at(*identifier)
    }

    pub fn nids(&self) -> usize {
        let (ids,) = payload!(self, NodeIdLookup { ids });
        ids.len()
    }

    pub fn id(&self, i: usize) -> Option<&'a AstNode> {
        let (ids,) = payload!(self, NodeIdLookup { ids });
        nth(self.node, ids, i)
    }
}

impl<'a> AllNodesScan<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, AllNodesScan { identifier });
        self.node.at(*identifier)
    }
}

impl<'a> RelIndexLookup<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, RelIndexLookup { identifier });
        self.node.at(*identifier)
    }

    pub fn index_name(&self) -> &'a AstNode {
        let (index_name,) = payload!(self, RelIndexLookup { index_name });
        self.node.at(*index_name)
    }

    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, RelIndexLookup { prop_name });
        self.node.at(*prop_name)
    }

    pub fn lookup(&self) -> &'a AstNode {
        let (lookup,) = payload!(self, RelIndexLookup { lookup });
        self.node.at(*lookup)
    }
}

impl<'a> RelIndexQuery<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, RelIndexQuery { identifier });
        self.node.at(*identifier)
    }

    pub fn index_name(&self) -> &'a AstNode {
        let (index_name,) = payload!(self, RelIndexQuery { index_name });
        self.node.at(*index_name)
    }

    pub fn query(&self) -> &'a AstNode {
        let (query,) = payload!(self, RelIndexQuery { query });
        self.node.at(*query)
    }
}

impl<'a> RelIdLookup<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, RelIdLookup { identifier });
        self.node.at(*identifier)
    }

    pub fn nids(&self) -> usize {
        let (ids,) = payload!(self, RelIdLookup { ids });
        ids.len()
    }

    pub fn id(&self, i: usize) -> Option<&'a AstNode> {
        let (ids,) = payload!(self, RelIdLookup { ids });
        nth(self.node, ids, i)
    }
}

impl<'a> AllRelsScan<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, AllRelsScan { identifier });
        self.node.at(*identifier)
    }
}

impl<'a> Match<'a> {
    pub fn is_optional(&self) -> bool {
        let (optional,) = payload!(self, Match { optional });
        *optional
    }

    pub fn pattern(&self) -> &'a AstNode {
        let (pattern,) = payload!(self, Match { pattern });
        self.node.at(*pattern)
    }

    pub fn nhints(&self) -> usize {
        let (hints,) = payload!(self, Match { hints });
        hints.len()
    }

    pub fn hint(&self, i: usize) -> Option<&'a AstNode> {
        let (hints,) = payload!(self, Match { hints });
        nth(self.node, hints, i)
    }

    pub fn predicate(&self) -> Option<&'a AstNode> {
        let (predicate,) = payload!(self, Match { predicate });
        self.node.at_opt(*predicate)
    }
}

impl<'a> UsingIndex<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, UsingIndex { identifier });
        self.node.at(*identifier)
    }

    pub fn label(&self) -> &'a AstNode {
        let (label,) = payload!(self, UsingIndex { label });
        self.node.at(*label)
    }

    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, UsingIndex { prop_name });
        self.node.at(*prop_name)
    }
}

impl<'a> UsingJoin<'a> {
    pub fn nidentifiers(&self) -> usize {
        let (identifiers,) = payload!(self, UsingJoin { identifiers });
        identifiers.len()
    }

    pub fn identifier(&self, i: usize) -> Option<&'a AstNode> {
        let (identifiers,) = payload!(self, UsingJoin { identifiers });
        nth(self.node, identifiers, i)
    }
}

impl<'a> UsingScan<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, UsingScan { identifier });
        self.node.at(*identifier)
    }

    pub fn label(&self) -> &'a AstNode {
        let (label,) = payload!(self, UsingScan { label });
        self.node.at(*label)
    }
}

impl<'a> Merge<'a> {
    pub fn pattern_path(&self) -> &'a AstNode {
        let (path,) = payload!(self, Merge { path });
        self.node.at(*path)
    }

    pub fn nactions(&self) -> usize {
        let (actions,) = payload!(self, Merge { actions });
        actions.len()
    }

    pub fn action(&self, i: usize) -> Option<&'a AstNode> {
        let (actions,) = payload!(self, Merge { actions });
        nth(self.node, actions, i)
    }
}

impl<'a> OnMatch<'a> {
    pub fn nitems(&self) -> usize {
        let (items,) = payload!(self, OnMatch { items });
        items.len()
    }

    pub fn item(&self, i: usize) -> Option<&'a AstNode> {
        let (items,) = payload!(self, OnMatch { items });
        nth(self.node, items, i)
    }
}

impl<'a> OnCreate<'a> {
    pub fn nitems(&self) -> usize {
        let (items,) = payload!(self, OnCreate { items });
        items.len()
    }

    pub fn item(&self, i: usize) -> Option<&'a AstNode> {
        let (items,) = payload!(self, OnCreate { items });
        nth(self.node, items, i)
    }
}

impl<'a> Create<'a> {
    pub fn is_unique(&self) -> bool {
        let (unique,) = payload!(self, Create { unique });
        *unique
    }

    pub fn pattern(&self) -> &'a AstNode {
        let (pattern,) = payload!(self, Create { pattern });
        self.node.at(*pattern)
    }
}

impl<'a> Set<'a> {
    pub fn nitems(&self) -> usize {
        let (items,) = payload!(self, Set { items });
        items.len()
    }

    pub fn item(&self, i: usize) -> Option<&'a AstNode> {
        let (items,) = payload!(self, Set { items });
        nth(self.node, items, i)
    }
}

impl<'a> SetProperty<'a> {
    pub fn property(&self) -> &'a AstNode {
        let (property,) = payload!(self, SetProperty { property });
        self.node.at(*property)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, SetProperty { expression });
        self.node.at(*expression)
    }
}

impl<'a> SetAllProperties<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, SetAllProperties { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, SetAllProperties { expression });
        self.node.at(*expression)
    }
}

impl<'a> MergeProperties<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, MergeProperties { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, MergeProperties { expression });
        self.node.at(*expression)
    }
}

impl<'a> SetLabels<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, SetLabels { identifier });
        self.node.at(*identifier)
    }

    pub fn nlabels(&self) -> usize {
        let (labels,) = payload!(self, SetLabels { labels });
        labels.len()
    }

    pub fn label(&self, i: usize) -> Option<&'a AstNode> {
        let (labels,) = payload!(self, SetLabels { labels });
        nth(self.node, labels, i)
    }
}

impl<'a> Delete<'a> {
    pub fn is_detach(&self) -> bool {
        let (detach,) = payload!(self, Delete { detach });
        *detach
    }

    pub fn nexpressions(&self) -> usize {
        let (expressions,) = payload!(self, Delete { expressions });
        expressions.len()
    }

    pub fn expression(&self, i: usize) -> Option<&'a AstNode> {
        let (expressions,) = payload!(self, Delete { expressions });
        nth(self.node, expressions, i)
    }
}

impl<'a> Remove<'a> {
    pub fn nitems(&self) -> usize {
        let (items,) = payload!(self, Remove { items });
        items.len()
    }

    pub fn item(&self, i: usize) -> Option<&'a AstNode> {
        let (items,) = payload!(self, Remove { items });
        nth(self.node, items, i)
    }
}

impl<'a> RemoveLabels<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, RemoveLabels { identifier });
        self.node.at(*identifier)
    }

    pub fn nlabels(&self) -> usize {
        let (labels,) = payload!(self, RemoveLabels { labels });
        labels.len()
    }

    pub fn label(&self, i: usize) -> Option<&'a AstNode> {
        let (labels,) = payload!(self, RemoveLabels { labels });
        nth(self.node, labels, i)
    }
}

impl<'a> RemoveProperty<'a> {
    pub fn property(&self) -> &'a AstNode {
        let (property,) = payload!(self, RemoveProperty { property });
        self.node.at(*property)
    }
}

impl<'a> Foreach<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, Foreach { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Foreach { expression });
        self.node.at(*expression)
    }

    pub fn nclauses(&self) -> usize {
        let (clauses,) = payload!(self, Foreach { clauses });
        clauses.len()
    }

    pub fn clause(&self, i: usize) -> Option<&'a AstNode> {
        let (clauses,) = payload!(self, Foreach { clauses });
        nth(self.node, clauses, i)
    }
}

impl<'a> With<'a> {
    pub fn is_distinct(&self) -> bool {
        let (distinct,) = payload!(self, With { distinct });
        *distinct
    }

    /// True for `WITH *`, which carries all existing identifiers forward.
    pub fn includes_existing(&self) -> bool {
        let (include_existing,) = payload!(self, With { include_existing });
        *include_existing
    }

    pub fn nprojections(&self) -> usize {
        let (projections,) = payload!(self, With { projections });
        projections.len()
    }

    pub fn projection(&self, i: usize) -> Option<&'a AstNode> {
        let (projections,) = payload!(self, With { projections });
        nth(self.node, projections, i)
    }

    pub fn order_by(&self) -> Option<&'a AstNode> {
        let (order_by,) = payload!(self, With { order_by });
        self.node.at_opt(*order_by)
    }

    pub fn skip(&self) -> Option<&'a AstNode> {
        let (skip,) = payload!(self, With { skip });
        self.node.at_opt(*skip)
    }

    pub fn limit(&self) -> Option<&'a AstNode> {
        let (limit,) = payload!(self, With { limit });
        self.node.at_opt(*limit)
    }

    pub fn predicate(&self) -> Option<&'a AstNode> {
        let (predicate,) = payload!(self, With { predicate });
        self.node.at_opt(*predicate)
    }
}

impl<'a> Unwind<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Unwind { expression });
        self.node.at(*expression)
    }

    pub fn alias(&self) -> &'a AstNode {
        let (alias,) = payload!(self, Unwind { alias });
        self.node.at(*alias)
    }
}

impl<'a> Call<'a> {
    pub fn proc_name(&self) -> &'a AstNode {
        let (proc_name,) = payload!(self, Call { proc_name });
        self.node.at(*proc_name)
    }

    pub fn nargs(&self) -> usize {
        let (args,) = payload!(self, Call { args });
        args.len()
    }

    pub fn arg(&self, i: usize) -> Option<&'a AstNode> {
        let (args,) = payload!(self, Call { args });
        nth(self.node, args, i)
    }

    pub fn nprojections(&self) -> usize {
        let (projections,) = payload!(self, Call { projections });
        projections.len()
    }

    pub fn projection(&self, i: usize) -> Option<&'a AstNode> {
        let (projections,) = payload!(self, Call { projections });
        nth(self.node, projections, i)
    }
}

impl<'a> Return<'a> {
    pub fn is_distinct(&self) -> bool {
        let (distinct,) = payload!(self, Return { distinct });
        *distinct
    }

    /// True for `RETURN *`.
    pub fn includes_existing(&self) -> bool {
        let (include_existing,) = payload!(self, Return { include_existing });
        *include_existing
    }

    pub fn nprojections(&self) -> usize {
        let (projections,) = payload!(self, Return { projections });
        projections.len()
    }

    pub fn projection(&self, i: usize) -> Option<&'a AstNode> {
        let (projections,) = payload!(self, Return { projections });
        nth(self.node, projections, i)
    }

    pub fn order_by(&self) -> Option<&'a AstNode> {
        let (order_by,) = payload!(self, Return { order_by });
        self.node.at_opt(*order_by)
    }

    pub fn skip(&self) -> Option<&'a AstNode> {
        let (skip,) = payload!(self, Return { skip });
        self.node.at_opt(*skip)
    }

    pub fn limit(&self) -> Option<&'a AstNode> {
        let (limit,) = payload!(self, Return { limit });
        self.node.at_opt(*limit)
    }
}

impl<'a> Projection<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Projection { expression });
        self.node.at(*expression)
    }

    pub fn alias(&self) -> Option<&'a AstNode> {
        let (alias,) = payload!(self, Projection { alias });
        self.node.at_opt(*alias)
    }
}

impl<'a> OrderBy<'a> {
    pub fn nitems(&self) -> usize {
        let (items,) = payload!(self, OrderBy { items });
        items.len()
    }

    pub fn item(&self, i: usize) -> Option<&'a AstNode> {
        let (items,) = payload!(self, OrderBy { items });
        nth(self.node, items, i)
    }
}

impl<'a> SortItem<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, SortItem { expression });
        self.node.at(*expression)
    }

    pub fn is_ascending(&self) -> bool {
        let (ascending,) = payload!(self, SortItem { ascending });
        *ascending
    }
}

impl Union<'_> {
    pub fn is_all(&self) -> bool {
        let (all,) = payload!(self, Union { all });
        *all
    }
}

impl<'a> UnaryOperator<'a> {
    pub fn operator(&self) -> &'static Operator {
        let (op,) = payload!(self, UnaryOperator { op });
        *op
    }

    pub fn argument(&self) -> &'a AstNode {
        let (arg,) = payload!(self, UnaryOperator { arg });
        self.node.at(*arg)
    }
}

impl<'a> BinaryOperator<'a> {
    pub fn operator(&self) -> &'static Operator {
        let (op,) = payload!(self, BinaryOperator { op });
        *op
    }

    pub fn argument1(&self) -> &'a AstNode {
        let (arg1,) = payload!(self, BinaryOperator { arg1 });
        self.node.at(*arg1)
    }

    pub fn argument2(&self) -> &'a AstNode {
        let (arg2,) = payload!(self, BinaryOperator { arg2 });
        self.node.at(*arg2)
    }
}

impl<'a> Comparison<'a> {
    /// The number of chained operators; there is one more argument than
    /// operators.
    pub fn length(&self) -> usize {
        let (ops,) = payload!(self, Comparison { ops });
        ops.len()
    }

    pub fn operator(&self, i: usize) -> Option<&'static Operator> {
        let (ops,) = payload!(self, Comparison { ops });
        ops.get(i).copied()
    }

    pub fn argument(&self, i: usize) -> Option<&'a AstNode> {
        let (args,) = payload!(self, Comparison { args });
        nth(self.node, args, i)
    }
}

impl<'a> ApplyOperator<'a> {
    pub fn func_name(&self) -> &'a AstNode {
        let (func_name,) = payload!(self, ApplyOperator { func_name });
        self.node.at(*func_name)
    }

    pub fn is_distinct(&self) -> bool {
        let (distinct,) = payload!(self, ApplyOperator { distinct });
        *distinct
    }

    pub fn nargs(&self) -> usize {
        let (args,) = payload!(self, ApplyOperator { args });
        args.len()
    }

    pub fn arg(&self, i: usize) -> Option<&'a AstNode> {
        let (args,) = payload!(self, ApplyOperator { args });
        nth(self.node, args, i)
    }
}

impl<'a> ApplyAllOperator<'a> {
    pub fn func_name(&self) -> &'a AstNode {
        let (func_name,) = payload!(self, ApplyAllOperator { func_name });
        self.node.at(*func_name)
    }

    pub fn is_distinct(&self) -> bool {
        let (distinct,) = payload!(self, ApplyAllOperator { distinct });
        *distinct
    }
}

impl<'a> PropertyOperator<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, PropertyOperator { expression });
        self.node.at(*expression)
    }

    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, PropertyOperator { prop_name });
        self.node.at(*prop_name)
    }
}

impl<'a> SubscriptOperator<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, SubscriptOperator { expression });
        self.node.at(*expression)
    }

    pub fn subscript(&self) -> &'a AstNode {
        let (subscript,) = payload!(self, SubscriptOperator { subscript });
        self.node.at(*subscript)
    }
}

impl<'a> SliceOperator<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, SliceOperator { expression });
        self.node.at(*expression)
    }

    pub fn start(&self) -> Option<&'a AstNode> {
        let (start,) = payload!(self, SliceOperator { start });
        self.node.at_opt(*start)
    }

    pub fn end(&self) -> Option<&'a AstNode> {
        let (end,) = payload!(self, SliceOperator { end });
        self.node.at_opt(*end)
    }
}

impl<'a> LabelsOperator<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, LabelsOperator { expression });
        self.node.at(*expression)
    }

    pub fn nlabels(&self) -> usize {
        let (labels,) = payload!(self, LabelsOperator { labels });
        labels.len()
    }

    pub fn label(&self, i: usize) -> Option<&'a AstNode> {
        let (labels,) = payload!(self, LabelsOperator { labels });
        nth(self.node, labels, i)
    }
}

impl<'a> ListComprehension<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, ListComprehension { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, ListComprehension { expression });
        self.node.at(*expression)
    }

    pub fn predicate(&self) -> Option<&'a AstNode> {
        let (predicate,) = payload!(self, ListComprehension { predicate });
        self.node.at_opt(*predicate)
    }

    pub fn eval(&self) -> Option<&'a AstNode> {
        let (eval,) = payload!(self, ListComprehension { eval });
        self.node.at_opt(*eval)
    }
}

impl<'a> PatternComprehension<'a> {
    pub fn identifier(&self) -> Option<&'a AstNode> {
        let (identifier,) = payload!(self, PatternComprehension { identifier });
        self.node.at_opt(*identifier)
    }

    pub fn pattern(&self) -> &'a AstNode {
        let (pattern,) = payload!(self, PatternComprehension { pattern });
        self.node.at(*pattern)
    }

    pub fn predicate(&self) -> Option<&'a AstNode> {
        let (predicate,) = payload!(self, PatternComprehension { predicate });
        self.node.at_opt(*predicate)
    }

    pub fn eval(&self) -> &'a AstNode {
        let (eval,) = payload!(self, PatternComprehension { eval });
        self.node.at(*eval)
    }
}

impl<'a> Case<'a> {
    pub fn expression(&self) -> Option<&'a AstNode> {
        let (expression,) = payload!(self, Case { expression });
        self.node.at_opt(*expression)
    }

    pub fn nalternatives(&self) -> usize {
        let (alternatives,) = payload!(self, Case { alternatives });
        alternatives.len() / 2
    }

    /// The `i`th `WHEN`/`THEN` pair.
    pub fn alternative(&self, i: usize) -> Option<(&'a AstNode, &'a AstNode)> {
        let (alternatives,) = payload!(self, Case { alternatives });
        match (nth(self.node, alternatives, i * 2), nth(self.node, alternatives, i * 2 + 1)) {
            (Some(when), Some(then)) => Some((when, then)),
            _ => Option::None,
        }
    }

    pub fn default(&self) -> Option<&'a AstNode> {
        let (default,) = payload!(self, Case { default });
        self.node.at_opt(*default)
    }
}

impl<'a> Filter<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, Filter { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Filter { expression });
        self.node.at(*expression)
    }

    pub fn predicate(&self) -> &'a AstNode {
        let (predicate,) = payload!(self, Filter { predicate });
        self.node.at(*predicate)
    }
}

impl<'a> Extract<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, Extract { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Extract { expression });
        self.node.at(*expression)
    }

    pub fn eval(&self) -> &'a AstNode {
        let (eval,) = payload!(self, Extract { eval });
        self.node.at(*eval)
    }
}

impl<'a> Reduce<'a> {
    pub fn accumulator(&self) -> &'a AstNode {
        let (accumulator,) = payload!(self, Reduce { accumulator });
        self.node.at(*accumulator)
    }

    pub fn init(&self) -> &'a AstNode {
        let (init,) = payload!(self, Reduce { init });
        self.node.at(*init)
    }

    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, Reduce { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Reduce { expression });
        self.node.at(*expression)
    }

    pub fn eval(&self) -> &'a AstNode {
        let (eval,) = payload!(self, Reduce { eval });
        self.node.at(*eval)
    }
}

impl<'a> AllPredicate<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, All { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, All { expression });
        self.node.at(*expression)
    }

    pub fn predicate(&self) -> &'a AstNode {
        let (predicate,) = payload!(self, All { predicate });
        self.node.at(*predicate)
    }
}

impl<'a> AnyPredicate<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, Any { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Any { expression });
        self.node.at(*expression)
    }

    pub fn predicate(&self) -> &'a AstNode {
        let (predicate,) = payload!(self, Any { predicate });
        self.node.at(*predicate)
    }
}

impl<'a> SinglePredicate<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, Single { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, Single { expression });
        self.node.at(*expression)
    }

    pub fn predicate(&self) -> &'a AstNode {
        let (predicate,) = payload!(self, Single { predicate });
        self.node.at(*predicate)
    }
}

impl<'a> NonePredicate<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, None { identifier });
        self.node.at(*identifier)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, None { expression });
        self.node.at(*expression)
    }

    pub fn predicate(&self) -> &'a AstNode {
        let (predicate,) = payload!(self, None { predicate });
        self.node.at(*predicate)
    }
}

impl<'a> Collection<'a> {
    pub fn length(&self) -> usize {
        let (elements,) = payload!(self, Collection { elements });
        elements.len()
    }

    pub fn element(&self, i: usize) -> Option<&'a AstNode> {
        let (elements,) = payload!(self, Collection { elements });
        nth(self.node, elements, i)
    }
}

impl<'a> Map<'a> {
    pub fn nentries(&self) -> usize {
        let (pairs,) = payload!(self, Map { pairs });
        pairs.len() / 2
    }

    pub fn key(&self, i: usize) -> Option<&'a AstNode> {
        let (pairs,) = payload!(self, Map { pairs });
        nth(self.node, pairs, i * 2)
    }

    pub fn value(&self, i: usize) -> Option<&'a AstNode> {
        let (pairs,) = payload!(self, Map { pairs });
        nth(self.node, pairs, i * 2 + 1)
    }
}

impl Identifier<'_> {
    pub fn name(&self) -> &str {
        let (name,) = payload!(self, Identifier { name });
        name
    }
}

impl Parameter<'_> {
    pub fn name(&self) -> &str {
        let (name,) = payload!(self, Parameter { name });
        name
    }
}

impl StringLiteral<'_> {
    /// The string's value with escape sequences already processed.
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, String { value });
        value
    }
}

impl IntegerLiteral<'_> {
    /// The literal text as written.
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, Integer { value });
        value
    }
}

impl FloatLiteral<'_> {
    /// The literal text as written.
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, Float { value });
        value
    }

    /// The parsed numeric value.
    pub fn numeric_value(&self) -> Option<OrderedFloat<f64>> {
        self.value().parse::<f64>().ok().map(OrderedFloat)
    }
}

impl Label<'_> {
    pub fn name(&self) -> &str {
        let (name,) = payload!(self, Label { name });
        name
    }
}

impl Reltype<'_> {
    pub fn name(&self) -> &str {
        let (name,) = payload!(self, Reltype { name });
        name
    }
}

impl PropName<'_> {
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, PropName { value });
        value
    }
}

impl FunctionName<'_> {
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, FunctionName { value });
        value
    }
}

impl IndexName<'_> {
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, IndexName { value });
        value
    }
}

impl ProcName<'_> {
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, ProcName { value });
        value
    }
}

impl<'a> Pattern<'a> {
    pub fn npaths(&self) -> usize {
        let (paths,) = payload!(self, Pattern { paths });
        paths.len()
    }

    pub fn path(&self, i: usize) -> Option<&'a AstNode> {
        let (paths,) = payload!(self, Pattern { paths });
        nth(self.node, paths, i)
    }
}

impl<'a> NamedPath<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, NamedPath { identifier });
        self.node.at(*identifier)
    }

    pub fn path(&self) -> &'a AstNode {
        let (path,) = payload!(self, NamedPath { path });
        self.node.at(*path)
    }
}

impl<'a> ShortestPath<'a> {
    /// True for `shortestPath(..)`, false for `allShortestPaths(..)`.
    pub fn is_single(&self) -> bool {
        let (single,) = payload!(self, ShortestPath { single });
        *single
    }

    pub fn path(&self) -> &'a AstNode {
        let (path,) = payload!(self, ShortestPath { path });
        self.node.at(*path)
    }
}

impl<'a> PatternPath<'a> {
    pub fn nelements(&self) -> usize {
        let (elements,) = payload!(self, PatternPath { elements });
        elements.len()
    }

    pub fn element(&self, i: usize) -> Option<&'a AstNode> {
        let (elements,) = payload!(self, PatternPath { elements });
        nth(self.node, elements, i)
    }
}

impl<'a> NodePattern<'a> {
    pub fn identifier(&self) -> Option<&'a AstNode> {
        let (identifier,) = payload!(self, NodePattern { identifier });
        self.node.at_opt(*identifier)
    }

    pub fn nlabels(&self) -> usize {
        let (labels,) = payload!(self, NodePattern { labels });
        labels.len()
    }

    pub fn label(&self, i: usize) -> Option<&'a AstNode> {
        let (labels,) = payload!(self, NodePattern { labels });
        nth(self.node, labels, i)
    }

    /// The node's properties: a map or a parameter.
    pub fn properties(&self) -> Option<&'a AstNode> {
        let (properties,) = payload!(self, NodePattern { properties });
        self.node.at_opt(*properties)
    }
}

impl<'a> RelPattern<'a> {
    pub fn direction(&self) -> Direction {
        let (direction,) = payload!(self, RelPattern { direction });
        *direction
    }

    pub fn identifier(&self) -> Option<&'a AstNode> {
        let (identifier,) = payload!(self, RelPattern { identifier });
        self.node.at_opt(*identifier)
    }

    pub fn nreltypes(&self) -> usize {
        let (reltypes,) = payload!(self, RelPattern { reltypes });
        reltypes.len()
    }

    pub fn reltype(&self, i: usize) -> Option<&'a AstNode> {
        let (reltypes,) = payload!(self, RelPattern { reltypes });
        nth(self.node, reltypes, i)
    }

    pub fn varlength(&self) -> Option<&'a AstNode> {
        let (varlength,) = payload!(self, RelPattern { varlength });
        self.node.at_opt(*varlength)
    }

    /// The relationship's properties: a map or a parameter.
    pub fn properties(&self) -> Option<&'a AstNode> {
        let (properties,) = payload!(self, RelPattern { properties });
        self.node.at_opt(*properties)
    }
}

impl<'a> Range<'a> {
    pub fn start(&self) -> Option<&'a AstNode> {
        let (start,) = payload!(self, Range { start });
        self.node.at_opt(*start)
    }

    pub fn end(&self) -> Option<&'a AstNode> {
        let (end,) = payload!(self, Range { end });
        self.node.at_opt(*end)
    }
}

impl<'a> Command<'a> {
    pub fn name(&self) -> &'a AstNode {
        let (name,) = payload!(self, Command { name });
        self.node.at(*name)
    }

    pub fn nargs(&self) -> usize {
        let (args,) = payload!(self, Command { args });
        args.len()
    }

    pub fn arg(&self, i: usize) -> Option<&'a AstNode> {
        let (args,) = payload!(self, Command { args });
        nth(self.node, args, i)
    }
}

impl LineComment<'_> {
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, LineComment { value });
        value
    }
}

impl BlockComment<'_> {
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, BlockComment { value });
        value
    }
}

impl ErrorNode<'_> {
    /// The raw input that was skipped while recovering.
    pub fn value(&self) -> &str {
        let (value,) = payload!(self, Error { value });
        value
    }
}

impl<'a> MapProjection<'a> {
    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, MapProjection { expression });
        self.node.at(*expression)
    }

    pub fn nselectors(&self) -> usize {
        let (selectors,) = payload!(self, MapProjection { selectors });
        selectors.len()
    }

    pub fn selector(&self, i: usize) -> Option<&'a AstNode> {
        let (selectors,) = payload!(self, MapProjection { selectors });
        nth(self.node, selectors, i)
    }
}

impl<'a> MapProjectionLiteral<'a> {
    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, MapProjectionLiteral { prop_name });
        self.node.at(*prop_name)
    }

    pub fn expression(&self) -> &'a AstNode {
        let (expression,) = payload!(self, MapProjectionLiteral { expression });
        self.node.at(*expression)
    }
}

impl<'a> MapProjectionProperty<'a> {
    pub fn prop_name(&self) -> &'a AstNode {
        let (prop_name,) = payload!(self, MapProjectionProperty { prop_name });
        self.node.at(*prop_name)
    }
}

impl<'a> MapProjectionIdentifier<'a> {
    pub fn identifier(&self) -> &'a AstNode {
        let (identifier,) = payload!(self, MapProjectionIdentifier { identifier });
        self.node.at(*identifier)
    }
}
