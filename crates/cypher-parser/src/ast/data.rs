//! Per-kind node payloads.
//!
//! Named payload fields hold *indices into the owning node's child array*,
//! so every payload reference is also a child by construction and the tree
//! remains singly owned.

use crate::operators::Operator;

/// The direction of a relationship pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `<-[]-`
    Inbound,
    /// `-[]->`
    Outbound,
    /// `-[]-` or `<-[]->`
    Bidirectional,
}

/// The payload of a concrete AST node. Variant names mirror
/// [`AstKind`](super::AstKind); abstract kinds have no payload variant.
#[derive(Debug, PartialEq)]
pub(crate) enum NodeData {
    Statement {
        options: Vec<usize>,
        body: usize,
    },
    CypherOption {
        version: Option<usize>,
        params: Vec<usize>,
    },
    CypherOptionParam {
        name: usize,
        value: usize,
    },
    ExplainOption,
    ProfileOption,
    CreateNodePropIndex {
        label: usize,
        prop_name: usize,
    },
    DropNodePropIndex {
        label: usize,
        prop_name: usize,
    },
    CreateNodePropConstraint {
        identifier: usize,
        label: usize,
        expression: usize,
        unique: bool,
    },
    DropNodePropConstraint {
        identifier: usize,
        label: usize,
        expression: usize,
        unique: bool,
    },
    CreateRelPropConstraint {
        identifier: usize,
        reltype: usize,
        expression: usize,
        unique: bool,
    },
    DropRelPropConstraint {
        identifier: usize,
        reltype: usize,
        expression: usize,
        unique: bool,
    },
    Query {
        options: Vec<usize>,
        clauses: Vec<usize>,
    },
    UsingPeriodicCommit {
        limit: Option<usize>,
    },
    LoadCsv {
        with_headers: bool,
        url: usize,
        identifier: usize,
        field_terminator: Option<usize>,
    },
    Start {
        points: Vec<usize>,
        predicate: Option<usize>,
    },
    NodeIndexLookup {
        identifier: usize,
        index_name: usize,
        prop_name: usize,
        lookup: usize,
    },
    NodeIndexQuery {
        identifier: usize,
        index_name: usize,
        query: usize,
    },
    NodeIdLookup {
        identifier: usize,
        ids: Vec<usize>,
    },
    AllNodesScan {
        identifier: usize,
    },
    RelIndexLookup {
        identifier: usize,
        index_name: usize,
        prop_name: usize,
        lookup: usize,
    },
    RelIndexQuery {
        identifier: usize,
        index_name: usize,
        query: usize,
    },
    RelIdLookup {
        identifier: usize,
        ids: Vec<usize>,
    },
    AllRelsScan {
        identifier: usize,
    },
    Match {
        optional: bool,
        pattern: usize,
        hints: Vec<usize>,
        predicate: Option<usize>,
    },
    UsingIndex {
        identifier: usize,
        label: usize,
        prop_name: usize,
    },
    UsingJoin {
        identifiers: Vec<usize>,
    },
    UsingScan {
        identifier: usize,
        label: usize,
    },
    Merge {
        path: usize,
        actions: Vec<usize>,
    },
    OnMatch {
        items: Vec<usize>,
    },
    OnCreate {
        items: Vec<usize>,
    },
    Create {
        unique: bool,
        pattern: usize,
    },
    Set {
        items: Vec<usize>,
    },
    SetProperty {
        property: usize,
        expression: usize,
    },
    SetAllProperties {
        identifier: usize,
        expression: usize,
    },
    MergeProperties {
        identifier: usize,
        expression: usize,
    },
    SetLabels {
        identifier: usize,
        labels: Vec<usize>,
    },
    Delete {
        detach: bool,
        expressions: Vec<usize>,
    },
    Remove {
        items: Vec<usize>,
    },
    RemoveLabels {
        identifier: usize,
        labels: Vec<usize>,
    },
    RemoveProperty {
        property: usize,
    },
    Foreach {
        identifier: usize,
        expression: usize,
        clauses: Vec<usize>,
    },
    With {
        distinct: bool,
        include_existing: bool,
        projections: Vec<usize>,
        order_by: Option<usize>,
        skip: Option<usize>,
        limit: Option<usize>,
        predicate: Option<usize>,
    },
    Unwind {
        expression: usize,
        alias: usize,
    },
    Call {
        proc_name: usize,
        args: Vec<usize>,
        projections: Vec<usize>,
    },
    Return {
        distinct: bool,
        include_existing: bool,
        projections: Vec<usize>,
        order_by: Option<usize>,
        skip: Option<usize>,
        limit: Option<usize>,
    },
    Projection {
        expression: usize,
        alias: Option<usize>,
    },
    OrderBy {
        items: Vec<usize>,
    },
    SortItem {
        expression: usize,
        ascending: bool,
    },
    Union {
        all: bool,
    },
    UnaryOperator {
        op: &'static Operator,
        arg: usize,
    },
    BinaryOperator {
        op: &'static Operator,
        arg1: usize,
        arg2: usize,
    },
    Comparison {
        ops: Vec<&'static Operator>,
        args: Vec<usize>,
    },
    ApplyOperator {
        func_name: usize,
        distinct: bool,
        args: Vec<usize>,
    },
    ApplyAllOperator {
        func_name: usize,
        distinct: bool,
    },
    PropertyOperator {
        expression: usize,
        prop_name: usize,
    },
    SubscriptOperator {
        expression: usize,
        subscript: usize,
    },
    SliceOperator {
        expression: usize,
        start: Option<usize>,
        end: Option<usize>,
    },
    LabelsOperator {
        expression: usize,
        labels: Vec<usize>,
    },
    ListComprehension {
        identifier: usize,
        expression: usize,
        predicate: Option<usize>,
        eval: Option<usize>,
    },
    PatternComprehension {
        identifier: Option<usize>,
        pattern: usize,
        predicate: Option<usize>,
        eval: usize,
    },
    Case {
        expression: Option<usize>,
        /// Alternating `WHEN`/`THEN` child indices; always even length.
        alternatives: Vec<usize>,
        default: Option<usize>,
    },
    Filter {
        identifier: usize,
        expression: usize,
        predicate: usize,
    },
    Extract {
        identifier: usize,
        expression: usize,
        eval: usize,
    },
    Reduce {
        accumulator: usize,
        init: usize,
        identifier: usize,
        expression: usize,
        eval: usize,
    },
    All {
        identifier: usize,
        expression: usize,
        predicate: usize,
    },
    Any {
        identifier: usize,
        expression: usize,
        predicate: usize,
    },
    Single {
        identifier: usize,
        expression: usize,
        predicate: usize,
    },
    None {
        identifier: usize,
        expression: usize,
        predicate: usize,
    },
    Collection {
        elements: Vec<usize>,
    },
    Map {
        /// Alternating key/value child indices; always even length.
        pairs: Vec<usize>,
    },
    Identifier {
        name: String,
    },
    Parameter {
        name: String,
    },
    String {
        value: String,
    },
    Integer {
        value: String,
    },
    Float {
        value: String,
    },
    True,
    False,
    Null,
    Label {
        name: String,
    },
    Reltype {
        name: String,
    },
    PropName {
        value: String,
    },
    FunctionName {
        value: String,
    },
    IndexName {
        value: String,
    },
    ProcName {
        value: String,
    },
    Pattern {
        paths: Vec<usize>,
    },
    NamedPath {
        identifier: usize,
        path: usize,
    },
    ShortestPath {
        single: bool,
        path: usize,
    },
    PatternPath {
        elements: Vec<usize>,
    },
    NodePattern {
        identifier: Option<usize>,
        labels: Vec<usize>,
        properties: Option<usize>,
    },
    RelPattern {
        direction: Direction,
        identifier: Option<usize>,
        reltypes: Vec<usize>,
        varlength: Option<usize>,
        properties: Option<usize>,
    },
    Range {
        start: Option<usize>,
        end: Option<usize>,
    },
    Command {
        name: usize,
        args: Vec<usize>,
    },
    LineComment {
        value: String,
    },
    BlockComment {
        value: String,
    },
    Error {
        value: String,
    },
    MapProjection {
        expression: usize,
        selectors: Vec<usize>,
    },
    MapProjectionLiteral {
        prop_name: usize,
        expression: usize,
    },
    MapProjectionProperty {
        prop_name: usize,
    },
    MapProjectionIdentifier {
        identifier: usize,
    },
    MapProjectionAllProperties,
}
