//! The per-rule scratchpad blocks that semantic actions build nodes from.
//!
//! Every grammar rule that constructs a node opens a block, parses its
//! children into it, closes it, and hands the closed block to exactly one
//! node constructor. Closing transfers ownership of the block by value, so
//! the "one node per closed block" discipline is enforced by the compiler
//! rather than by a previous-block cache.

use crate::ast::AstNode;
use crate::source::{InputPosition, InputRange};

#[derive(Debug)]
pub(crate) struct Block {
    /// Window-relative byte offsets of the span the block covers.
    pub(crate) buffer_start: usize,
    pub(crate) buffer_end: usize,
    /// The input range of the span.
    pub(crate) range: InputRange,
    /// Ordered auxiliary node references: indices into `children` recorded
    /// by `sequence_add`, e.g. the labels of a node pattern or the items of
    /// a `SET` clause.
    pub(crate) sequence: Vec<usize>,
    /// Nodes produced by directly nested rules, in source order.
    pub(crate) children: Vec<AstNode>,
}

impl Block {
    pub(crate) fn open(offset: usize, position: InputPosition) -> Block {
        Block {
            buffer_start: offset,
            buffer_end: offset,
            range: InputRange {
                start: position,
                end: position,
            },
            sequence: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Close the block at `offset`/`position`.
    pub(crate) fn close(&mut self, offset: usize, position: InputPosition) {
        debug_assert!(self.buffer_start <= offset);
        debug_assert!(self.range.start.offset <= position.offset);
        self.buffer_end = offset;
        self.range.end = position;
    }
}
