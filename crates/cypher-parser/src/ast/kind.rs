//! The closed universe of AST node kinds and their subtype lattice.
//!
//! Kinds form a forest: each kind names zero or more parent kinds, and
//! [`AstKind::instance_of`] is the reflexive transitive closure of that
//! relation. Abstract kinds (`Expression`, `QueryClause`, ...) never appear
//! as the kind of a constructed node; they exist so payload slots can be
//! validated against a family of kinds.

use std::fmt;

/// The kind tag of an AST node. The universe of kinds is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstKind {
    Statement,
    StatementOption,
    CypherOption,
    CypherOptionParam,
    ExplainOption,
    ProfileOption,
    SchemaCommand,
    CreateNodePropIndex,
    DropNodePropIndex,
    CreateNodePropConstraint,
    DropNodePropConstraint,
    CreateRelPropConstraint,
    DropRelPropConstraint,
    Query,
    QueryOption,
    UsingPeriodicCommit,
    QueryClause,
    LoadCsv,
    Start,
    StartPoint,
    NodeIndexLookup,
    NodeIndexQuery,
    NodeIdLookup,
    AllNodesScan,
    RelIndexLookup,
    RelIndexQuery,
    RelIdLookup,
    AllRelsScan,
    Match,
    MatchHint,
    UsingIndex,
    UsingJoin,
    UsingScan,
    Merge,
    MergeAction,
    OnMatch,
    OnCreate,
    Create,
    Set,
    SetItem,
    SetProperty,
    SetAllProperties,
    MergeProperties,
    SetLabels,
    Delete,
    Remove,
    RemoveItem,
    RemoveLabels,
    RemoveProperty,
    Foreach,
    With,
    Unwind,
    Call,
    Return,
    Projection,
    OrderBy,
    SortItem,
    Union,
    Expression,
    UnaryOperator,
    BinaryOperator,
    Comparison,
    ApplyOperator,
    ApplyAllOperator,
    PropertyOperator,
    SubscriptOperator,
    SliceOperator,
    LabelsOperator,
    ListComprehension,
    PatternComprehension,
    Case,
    Filter,
    Extract,
    Reduce,
    All,
    Any,
    Single,
    None,
    Collection,
    Map,
    Identifier,
    Parameter,
    String,
    Integer,
    Float,
    Boolean,
    True,
    False,
    Null,
    Label,
    Reltype,
    PropName,
    FunctionName,
    IndexName,
    ProcName,
    Pattern,
    NamedPath,
    ShortestPath,
    PatternPath,
    NodePattern,
    RelPattern,
    Range,
    Command,
    Comment,
    LineComment,
    BlockComment,
    Error,
    MapProjection,
    MapProjectionSelector,
    MapProjectionLiteral,
    MapProjectionProperty,
    MapProjectionIdentifier,
    MapProjectionAllProperties,
}

impl AstKind {
    /// The human-readable name used in AST dumps.
    pub fn name(self) -> &'static str {
        use AstKind::*;
        match self {
            Statement => "statement",
            StatementOption => "statement option",
            CypherOption => "CYPHER",
            CypherOptionParam => "cypher parameter",
            ExplainOption => "EXPLAIN",
            ProfileOption => "PROFILE",
            SchemaCommand => "schema command",
            CreateNodePropIndex => "CREATE INDEX",
            DropNodePropIndex => "DROP INDEX",
            CreateNodePropConstraint => "create node prop constraint",
            DropNodePropConstraint => "drop node prop constraint",
            CreateRelPropConstraint => "create rel prop constraint",
            DropRelPropConstraint => "drop rel prop constraint",
            Query => "query",
            QueryOption => "query option",
            UsingPeriodicCommit => "USING PERIODIC_COMMIT",
            QueryClause => "query clause",
            LoadCsv => "LOAD CSV",
            Start => "START",
            StartPoint => "start point",
            NodeIndexLookup => "node index lookup",
            NodeIndexQuery => "node index query",
            NodeIdLookup => "node id lookup",
            AllNodesScan => "all nodes scan",
            RelIndexLookup => "rel index lookup",
            RelIndexQuery => "rel index query",
            RelIdLookup => "rel id lookup",
            AllRelsScan => "all rels scan",
            Match => "MATCH",
            MatchHint => "match hint",
            UsingIndex => "USING INDEX",
            UsingJoin => "USING JOIN",
            UsingScan => "USING SCAN",
            Merge => "MERGE",
            MergeAction => "merge action",
            OnMatch => "ON MATCH",
            OnCreate => "ON CREATE",
            Create => "CREATE",
            Set => "SET",
            SetItem => "set item",
            SetProperty => "set property",
            SetAllProperties => "set all properties",
            MergeProperties => "merge properties",
            SetLabels => "set labels",
            Delete => "DELETE",
            Remove => "REMOVE",
            RemoveItem => "remove item",
            RemoveLabels => "remove labels",
            RemoveProperty => "remove property",
            Foreach => "FOREACH",
            With => "WITH",
            Unwind => "UNWIND",
            Call => "CALL",
            Return => "RETURN",
            Projection => "projection",
            OrderBy => "ORDER BY",
            SortItem => "sort item",
            Union => "UNION",
            Expression => "expression",
            UnaryOperator => "unary operator",
            BinaryOperator => "binary operator",
            Comparison => "comparison",
            ApplyOperator => "apply",
            ApplyAllOperator => "apply all",
            PropertyOperator => "property",
            SubscriptOperator => "subscript",
            SliceOperator => "slice",
            LabelsOperator => "has labels",
            ListComprehension => "list comprehension",
            PatternComprehension => "pattern comprehension",
            Case => "case",
            Filter => "filter",
            Extract => "extract",
            Reduce => "reduce",
            All => "all",
            Any => "any",
            Single => "single",
            None => "none",
            Collection => "collection",
            Map => "map",
            Identifier => "identifier",
            Parameter => "parameter",
            String => "string",
            Integer => "integer",
            Float => "float",
            Boolean => "boolean",
            True => "TRUE",
            False => "FALSE",
            Null => "NULL",
            Label => "label",
            Reltype => "rel type",
            PropName => "prop name",
            FunctionName => "function name",
            IndexName => "index name",
            ProcName => "proc name",
            Pattern => "pattern",
            NamedPath => "named path",
            ShortestPath => "shortestPath",
            PatternPath => "pattern path",
            NodePattern => "node pattern",
            RelPattern => "rel pattern",
            Range => "range",
            Command => "command",
            Comment => "comment",
            LineComment => "line_comment",
            BlockComment => "block_comment",
            Error => "error",
            MapProjection => "map projection",
            MapProjectionSelector => "map projection selector",
            MapProjectionLiteral => "literal projection",
            MapProjectionProperty => "property projection",
            MapProjectionIdentifier => "identifier projection",
            MapProjectionAllProperties => "all properties projection",
        }
    }

    /// The declared parent kinds.
    pub(crate) fn parents(self) -> &'static [AstKind] {
        use AstKind::*;
        match self {
            CypherOption | ExplainOption | ProfileOption => &[StatementOption],
            CreateNodePropIndex
            | DropNodePropIndex
            | CreateNodePropConstraint
            | DropNodePropConstraint
            | CreateRelPropConstraint
            | DropRelPropConstraint => &[SchemaCommand],
            UsingPeriodicCommit => &[QueryOption],
            LoadCsv | Start | Match | Merge | Create | Set | Delete | Remove | Foreach | With
            | Unwind | Call | Return | Union => &[QueryClause],
            NodeIndexLookup | NodeIndexQuery | NodeIdLookup | AllNodesScan | RelIndexLookup
            | RelIndexQuery | RelIdLookup | AllRelsScan => &[StartPoint],
            UsingIndex | UsingJoin | UsingScan => &[MatchHint],
            OnMatch | OnCreate => &[MergeAction],
            SetProperty | SetAllProperties | MergeProperties | SetLabels => &[SetItem],
            RemoveLabels | RemoveProperty => &[RemoveItem],
            UnaryOperator | BinaryOperator | Comparison | ApplyOperator | ApplyAllOperator
            | PropertyOperator | SubscriptOperator | SliceOperator | LabelsOperator
            | ListComprehension | PatternComprehension | Case | Reduce | Collection | Map
            | Identifier | Parameter | String | Integer | Float | Boolean | Null
            | PatternPath | MapProjection => &[Expression],
            Filter | Extract | All | Any | Single | None => &[ListComprehension],
            True | False => &[Boolean],
            NamedPath => &[PatternPath],
            ShortestPath => &[Expression, PatternPath],
            LineComment | BlockComment => &[Comment],
            MapProjectionLiteral | MapProjectionProperty | MapProjectionIdentifier
            | MapProjectionAllProperties => &[MapProjectionSelector],
            _ => &[],
        }
    }

    /// The reflexive transitive "instance of" test over the parent
    /// relation.
    pub fn instance_of(self, target: AstKind) -> bool {
        self == target
            || self
                .parents()
                .iter()
                .any(|parent| parent.instance_of(target))
    }
}

impl fmt::Display for AstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::AstKind;

    #[test]
    fn instance_of_is_reflexive() {
        assert!(AstKind::Match.instance_of(AstKind::Match));
        assert!(AstKind::Expression.instance_of(AstKind::Expression));
    }

    #[test]
    fn instance_of_follows_parents_transitively() {
        assert!(AstKind::True.instance_of(AstKind::Boolean));
        assert!(AstKind::True.instance_of(AstKind::Expression));
        assert!(AstKind::Match.instance_of(AstKind::QueryClause));
        assert!(AstKind::UsingIndex.instance_of(AstKind::MatchHint));
        assert!(AstKind::All.instance_of(AstKind::ListComprehension));
        assert!(AstKind::All.instance_of(AstKind::Expression));
    }

    #[test]
    fn shortest_path_has_two_parents() {
        assert!(AstKind::ShortestPath.instance_of(AstKind::Expression));
        assert!(AstKind::ShortestPath.instance_of(AstKind::PatternPath));
        assert!(AstKind::NamedPath.instance_of(AstKind::PatternPath));
        // NamedPath reaches Expression through PatternPath.
        assert!(AstKind::NamedPath.instance_of(AstKind::Expression));
    }

    #[test]
    fn unrelated_kinds_are_not_instances() {
        assert!(!AstKind::Match.instance_of(AstKind::Expression));
        assert!(!AstKind::Expression.instance_of(AstKind::Match));
        assert!(!AstKind::Label.instance_of(AstKind::Expression));
        assert!(!AstKind::PatternComprehension.instance_of(AstKind::ListComprehension));
    }
}
