//! The abstract syntax tree.
//!
//! Nodes are a tagged sum: every [`AstNode`] carries a kind-specific payload
//! ([`NodeData`]), an owned child array in source order, the source range it
//! covers, and a pre-order ordinal assigned after parsing. Named payload
//! references are indices into the child array, so a node exclusively owns
//! its subtree and dropping it frees everything exactly once.

pub(crate) mod build;
mod comprehension;
mod data;
mod kind;
mod print;
mod views;

pub use comprehension::{Comprehension, PathElements};
pub use data::Direction;
pub use kind::AstKind;
pub use print::fprint_ast;
pub use views::*;

pub(crate) use build as nodes;
pub(crate) use data::NodeData;

use crate::source::InputRange;

/// A node of the AST.
#[derive(Debug, PartialEq)]
pub struct AstNode {
    pub(crate) data: NodeData,
    pub(crate) children: Vec<AstNode>,
    pub(crate) range: InputRange,
    pub(crate) ordinal: u32,
}

impl AstNode {
    pub(crate) fn new(data: NodeData, children: Vec<AstNode>, range: InputRange) -> AstNode {
        AstNode {
            data,
            children,
            range,
            ordinal: 0,
        }
    }

    /// The node's kind tag.
    pub fn kind(&self) -> AstKind {
        use NodeData as D;
        match &self.data {
            D::Statement { .. } => AstKind::Statement,
            D::CypherOption { .. } => AstKind::CypherOption,
            D::CypherOptionParam { .. } => AstKind::CypherOptionParam,
            D::ExplainOption => AstKind::ExplainOption,
            D::ProfileOption => AstKind::ProfileOption,
            D::CreateNodePropIndex { .. } => AstKind::CreateNodePropIndex,
            D::DropNodePropIndex { .. } => AstKind::DropNodePropIndex,
            D::CreateNodePropConstraint { .. } => AstKind::CreateNodePropConstraint,
            D::DropNodePropConstraint { .. } => AstKind::DropNodePropConstraint,
            D::CreateRelPropConstraint { .. } => AstKind::CreateRelPropConstraint,
            D::DropRelPropConstraint { .. } => AstKind::DropRelPropConstraint,
            D::Query { .. } => AstKind::Query,
            D::UsingPeriodicCommit { .. } => AstKind::UsingPeriodicCommit,
            D::LoadCsv { .. } => AstKind::LoadCsv,
            D::Start { .. } => AstKind::Start,
            D::NodeIndexLookup { .. } => AstKind::NodeIndexLookup,
            D::NodeIndexQuery { .. } => AstKind::NodeIndexQuery,
            D::NodeIdLookup { .. } => AstKind::NodeIdLookup,
            D::AllNodesScan { .. } => AstKind::AllNodesScan,
            D::RelIndexLookup { .. } => AstKind::RelIndexLookup,
            D::RelIndexQuery { .. } => AstKind::RelIndexQuery,
            D::RelIdLookup { .. } => AstKind::RelIdLookup,
            D::AllRelsScan { .. } => AstKind::AllRelsScan,
            D::Match { .. } => AstKind::Match,
            D::UsingIndex { .. } => AstKind::UsingIndex,
            D::UsingJoin { .. } => AstKind::UsingJoin,
            D::UsingScan { .. } => AstKind::UsingScan,
            D::Merge { .. } => AstKind::Merge,
            D::OnMatch { .. } => AstKind::OnMatch,
            D::OnCreate { .. } => AstKind::OnCreate,
            D::Create { .. } => AstKind::Create,
            D::Set { .. } => AstKind::Set,
            D::SetProperty { .. } => AstKind::SetProperty,
            D::SetAllProperties { .. } => AstKind::SetAllProperties,
            D::MergeProperties { .. } => AstKind::MergeProperties,
            D::SetLabels { .. } => AstKind::SetLabels,
            D::Delete { .. } => AstKind::Delete,
            D::Remove { .. } => AstKind::Remove,
            D::RemoveLabels { .. } => AstKind::RemoveLabels,
            D::RemoveProperty { .. } => AstKind::RemoveProperty,
            D::Foreach { .. } => AstKind::Foreach,
            D::With { .. } => AstKind::With,
            D::Unwind { .. } => AstKind::Unwind,
            D::Call { .. } => AstKind::Call,
            D::Return { .. } => AstKind::Return,
            D::Projection { .. } => AstKind::Projection,
            D::OrderBy { .. } => AstKind::OrderBy,
            D::SortItem { .. } => AstKind::SortItem,
            D::Union { .. } => AstKind::Union,
            D::UnaryOperator { .. } => AstKind::UnaryOperator,
            D::BinaryOperator { .. } => AstKind::BinaryOperator,
            D::Comparison { .. } => AstKind::Comparison,
            D::ApplyOperator { .. } => AstKind::ApplyOperator,
            D::ApplyAllOperator { .. } => AstKind::ApplyAllOperator,
            D::PropertyOperator { .. } => AstKind::PropertyOperator,
            D::SubscriptOperator { .. } => AstKind::SubscriptOperator,
            D::SliceOperator { .. } => AstKind::SliceOperator,
            D::LabelsOperator { .. } => AstKind::LabelsOperator,
            D::ListComprehension { .. } => AstKind::ListComprehension,
            D::PatternComprehension { .. } => AstKind::PatternComprehension,
            D::Case { .. } => AstKind::Case,
            D::Filter { .. } => AstKind::Filter,
            D::Extract { .. } => AstKind::Extract,
            D::Reduce { .. } => AstKind::Reduce,
            D::All { .. } => AstKind::All,
            D::Any { .. } => AstKind::Any,
            D::Single { .. } => AstKind::Single,
            D::None { .. } => AstKind::None,
            D::Collection { .. } => AstKind::Collection,
            D::Map { .. } => AstKind::Map,
            D::Identifier { .. } => AstKind::Identifier,
            D::Parameter { .. } => AstKind::Parameter,
            D::String { .. } => AstKind::String,
            D::Integer { .. } => AstKind::Integer,
            D::Float { .. } => AstKind::Float,
            D::True => AstKind::True,
            D::False => AstKind::False,
            D::Null => AstKind::Null,
            D::Label { .. } => AstKind::Label,
            D::Reltype { .. } => AstKind::Reltype,
            D::PropName { .. } => AstKind::PropName,
            D::FunctionName { .. } => AstKind::FunctionName,
            D::IndexName { .. } => AstKind::IndexName,
            D::ProcName { .. } => AstKind::ProcName,
            D::Pattern { .. } => AstKind::Pattern,
            D::NamedPath { .. } => AstKind::NamedPath,
            D::ShortestPath { .. } => AstKind::ShortestPath,
            D::PatternPath { .. } => AstKind::PatternPath,
            D::NodePattern { .. } => AstKind::NodePattern,
            D::RelPattern { .. } => AstKind::RelPattern,
            D::Range { .. } => AstKind::Range,
            D::Command { .. } => AstKind::Command,
            D::LineComment { .. } => AstKind::LineComment,
            D::BlockComment { .. } => AstKind::BlockComment,
            D::Error { .. } => AstKind::Error,
            D::MapProjection { .. } => AstKind::MapProjection,
            D::MapProjectionLiteral { .. } => AstKind::MapProjectionLiteral,
            D::MapProjectionProperty { .. } => AstKind::MapProjectionProperty,
            D::MapProjectionIdentifier { .. } => AstKind::MapProjectionIdentifier,
            D::MapProjectionAllProperties => AstKind::MapProjectionAllProperties,
        }
    }

    /// True when the node's kind is an instance of `kind` per the subtype
    /// lattice.
    pub fn instance_of(&self, kind: AstKind) -> bool {
        self.kind().instance_of(kind)
    }

    /// The source range the node covers.
    pub fn range(&self) -> InputRange {
        self.range
    }

    /// The node's pre-order ordinal. Ordinals are assigned when a segment is
    /// completed and are stable for a given tree snapshot.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn nchildren(&self) -> usize {
        self.children.len()
    }

    /// The `index`th child in source order, or `None` when out of range.
    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children.get(index)
    }

    /// All children in source order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &AstNode> {
        self.children.iter()
    }

    /// The height of the subtree rooted at this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(AstNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Assign pre-order ordinals starting from `next`; returns the ordinal
    /// following the subtree.
    pub(crate) fn assign_ordinals(&mut self, next: u32) -> u32 {
        self.ordinal = next;
        let mut next = next + 1;
        for child in &mut self.children {
            next = child.assign_ordinals(next);
        }
        next
    }

    /// Payload child by index; payload indices are validated at
    /// construction, so this cannot fail for a well-formed node.
    pub(crate) fn at(&self, index: usize) -> &AstNode {
        &self.children[index]
    }

    pub(crate) fn at_opt(&self, index: Option<usize>) -> Option<&AstNode> {
        index.map(|index| self.at(index))
    }
}
