//! Capability interfaces shared across kind families.
//!
//! Several concrete kinds are "comprehension shaped" (`[x IN list WHERE p |
//! e]` and friends) or "path shaped" (an alternating node/relationship
//! element list). These views dispatch on the concrete kind so consumers can
//! treat the family uniformly without matching every member.

use crate::ast::{AstNode, NodeData};

/// Uniform access to comprehension-shaped nodes: `ListComprehension`,
/// `PatternComprehension`, `Filter`, `Extract`, `Reduce`, `All`, `Any`,
/// `Single` and `None`. Accessors return `None` where the concrete kind has
/// no such part.
#[derive(Clone, Copy)]
pub struct Comprehension<'a> {
    node: &'a AstNode,
}

impl AstNode {
    /// A comprehension view of this node, when its kind is comprehension
    /// shaped.
    pub fn comprehension(&self) -> Option<Comprehension<'_>> {
        match &self.data {
            NodeData::ListComprehension { .. }
            | NodeData::PatternComprehension { .. }
            | NodeData::Filter { .. }
            | NodeData::Extract { .. }
            | NodeData::Reduce { .. }
            | NodeData::All { .. }
            | NodeData::Any { .. }
            | NodeData::Single { .. }
            | NodeData::None { .. } => Some(Comprehension { node: self }),
            _ => None,
        }
    }

    /// A path-elements view of this node, when its kind is path shaped
    /// (`PatternPath`, `NamedPath`, `ShortestPath`).
    pub fn path_elements(&self) -> Option<PathElements<'_>> {
        match &self.data {
            NodeData::PatternPath { .. }
            | NodeData::NamedPath { .. }
            | NodeData::ShortestPath { .. } => Some(PathElements { node: self }),
            _ => None,
        }
    }
}

impl<'a> Comprehension<'a> {
    pub fn node(&self) -> &'a AstNode {
        self.node
    }

    pub fn identifier(&self) -> Option<&'a AstNode> {
        match &self.node.data {
            NodeData::ListComprehension { identifier, .. }
            | NodeData::Filter { identifier, .. }
            | NodeData::Extract { identifier, .. }
            | NodeData::Reduce { identifier, .. }
            | NodeData::All { identifier, .. }
            | NodeData::Any { identifier, .. }
            | NodeData::Single { identifier, .. }
            | NodeData::None { identifier, .. } => Some(self.node.at(*identifier)),
            NodeData::PatternComprehension { identifier, .. } => self.node.at_opt(*identifier),
            _ => unreachable!("view kind is checked at construction"),
        }
    }

    pub fn expression(&self) -> Option<&'a AstNode> {
        match &self.node.data {
            NodeData::ListComprehension { expression, .. }
            | NodeData::Filter { expression, .. }
            | NodeData::Extract { expression, .. }
            | NodeData::Reduce { expression, .. }
            | NodeData::All { expression, .. }
            | NodeData::Any { expression, .. }
            | NodeData::Single { expression, .. }
            | NodeData::None { expression, .. } => Some(self.node.at(*expression)),
            NodeData::PatternComprehension { pattern, .. } => Some(self.node.at(*pattern)),
            _ => unreachable!("view kind is checked at construction"),
        }
    }

    pub fn predicate(&self) -> Option<&'a AstNode> {
        match &self.node.data {
            NodeData::ListComprehension { predicate, .. }
            | NodeData::PatternComprehension { predicate, .. } => self.node.at_opt(*predicate),
            NodeData::Filter { predicate, .. }
            | NodeData::All { predicate, .. }
            | NodeData::Any { predicate, .. }
            | NodeData::Single { predicate, .. }
            | NodeData::None { predicate, .. } => Some(self.node.at(*predicate)),
            NodeData::Extract { .. } | NodeData::Reduce { .. } => None,
            _ => unreachable!("view kind is checked at construction"),
        }
    }

    pub fn eval(&self) -> Option<&'a AstNode> {
        match &self.node.data {
            NodeData::ListComprehension { eval, .. } => self.node.at_opt(*eval),
            NodeData::PatternComprehension { eval, .. }
            | NodeData::Extract { eval, .. }
            | NodeData::Reduce { eval, .. } => Some(self.node.at(*eval)),
            NodeData::Filter { .. }
            | NodeData::All { .. }
            | NodeData::Any { .. }
            | NodeData::Single { .. }
            | NodeData::None { .. } => None,
            _ => unreachable!("view kind is checked at construction"),
        }
    }
}

/// Uniform access to the alternating node/relationship element list of a
/// path-shaped node. Named and shortest paths delegate to their inner path.
#[derive(Clone, Copy)]
pub struct PathElements<'a> {
    node: &'a AstNode,
}

impl<'a> PathElements<'a> {
    pub fn node(&self) -> &'a AstNode {
        self.node
    }

    fn elements(&self) -> (&'a AstNode, &'a [usize]) {
        match &self.node.data {
            NodeData::PatternPath { elements } => (self.node, elements),
            NodeData::NamedPath { path, .. } | NodeData::ShortestPath { path, .. } => {
                let inner = self.node.at(*path);
                inner
                    .path_elements()
                    .expect("named/shortest path wraps a pattern path")
                    .elements()
            }
            _ => unreachable!("view kind is checked at construction"),
        }
    }

    /// The number of elements; always odd, alternating node and
    /// relationship patterns.
    pub fn nelements(&self) -> usize {
        self.elements().1.len()
    }

    pub fn element(&self, i: usize) -> Option<&'a AstNode> {
        let (owner, elements) = self.elements();
        elements.get(i).map(|&index| owner.at(index))
    }
}
