//! The coalesced product of all segments of a parse.

use std::io;

use crate::ast::{fprint_ast, AstNode};
use crate::config::Colorization;
use crate::error::ParseError;
use crate::segment::ParseSegment;

/// Everything a whole-input parse produced: the roots of every segment,
/// the directives among them, and all accumulated diagnostics.
#[derive(Debug, Default)]
pub struct ParseResult {
    roots: Vec<AstNode>,
    nnodes: u32,
    directives: Vec<usize>,
    errors: Vec<ParseError>,
    eof: bool,
}

impl ParseResult {
    pub fn nroots(&self) -> usize {
        self.roots.len()
    }

    pub fn root(&self, index: usize) -> Option<&AstNode> {
        self.roots.get(index)
    }

    pub fn roots(&self) -> impl ExactSizeIterator<Item = &AstNode> {
        self.roots.iter()
    }

    /// The number of AST nodes over all roots.
    pub fn nnodes(&self) -> u32 {
        self.nnodes
    }

    pub fn ndirectives(&self) -> usize {
        self.directives.len()
    }

    /// The `index`th parsed statement or command node.
    pub fn directive(&self, index: usize) -> Option<&AstNode> {
        self.directives.get(index).map(|&root| &self.roots[root])
    }

    pub fn directives(&self) -> impl ExactSizeIterator<Item = &AstNode> + '_ {
        self.directives.iter().map(|&root| &self.roots[root])
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

    /// True when the parse reached the end of the input.
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Fold a segment's output into this result, taking ownership of its
    /// roots and errors.
    pub(crate) fn merge_segment(&mut self, segment: ParseSegment) {
        if !self.eof && segment.eof && (segment.directive.is_some() || !segment.errors.is_empty())
        {
            self.eof = true;
        }

        self.errors.extend(segment.errors);

        let base = self.roots.len();
        self.roots.extend(segment.roots);
        self.nnodes += segment.nnodes;

        if let Some(directive) = segment.directive {
            self.directives.push(base + directive);
        }
    }

    /// Mark the result complete; set when the driver consumed the input to
    /// the end, even if the trailing bytes held no directive.
    pub(crate) fn set_eof(&mut self) {
        self.eof = true;
    }

    /// Pretty-print the whole AST.
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
