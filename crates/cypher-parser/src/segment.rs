//! One parse segment per top-level directive.

use std::io;

use crate::ast::{fprint_ast, AstNode};
use crate::config::Colorization;
use crate::error::ParseError;
use crate::source::InputRange;

/// The output of parsing one top-level parse unit: the root nodes produced
/// over a byte range, any diagnostics attached to that range, and the
/// principal directive node, if one was recognized.
///
/// Streaming callbacks receive segments as [`triomphe::Arc`], so retaining
/// one beyond the callback is a `clone()` and releasing it is a drop.
#[derive(Debug)]
pub struct ParseSegment {
    pub(crate) range: InputRange,
    pub(crate) roots: Vec<AstNode>,
    pub(crate) directive: Option<usize>,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) nnodes: u32,
    pub(crate) eof: bool,
}

impl ParseSegment {
    /// Build a segment, assigning pre-order ordinals to every node starting
    /// from `initial_ordinal`.
    pub(crate) fn new(
        initial_ordinal: u32,
        range: InputRange,
        mut roots: Vec<AstNode>,
        directive: Option<usize>,
        errors: Vec<ParseError>,
        eof: bool,
    ) -> ParseSegment {
        let mut next = initial_ordinal;
        for root in &mut roots {
            next = root.assign_ordinals(next);
        }
        ParseSegment {
            range,
            roots,
            directive,
            errors,
            nnodes: next - initial_ordinal,
            eof,
        }
    }

    /// The input range the segment covers.
    pub fn range(&self) -> InputRange {
        self.range
    }

    pub fn nroots(&self) -> usize {
        self.roots.len()
    }

    pub fn root(&self, index: usize) -> Option<&AstNode> {
        self.roots.get(index)
    }

    pub fn roots(&self) -> impl ExactSizeIterator<Item = &AstNode> {
        self.roots.iter()
    }

    /// The number of AST nodes in the segment, over all roots.
    pub fn nnodes(&self) -> u32 {
        self.nnodes
    }

    /// The segment's principal statement or command node.
    pub fn directive(&self) -> Option<&AstNode> {
        self.directive.map(|index| &self.roots[index])
    }

    pub fn nerrors(&self) -> usize {
        self.errors.len()
    }

    pub fn error(&self, index: usize) -> Option<&ParseError> {
        self.errors.get(index)
    }

    pub fn errors(&self) -> impl ExactSizeIterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// True when this segment consumed the input up to end of stream.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Pretty-print the segment's AST.
    pub fn fprint_ast<W: io::Write>(
        &self,
        out: &mut W,
        width: usize,
        colorization: &Colorization,
    ) -> io::Result<()> {
        let roots: Vec<&AstNode> = self.roots.iter().collect();
        fprint_ast(&roots, out, width, colorization)
    }
}
