//! The Cypher grammar, written as recursive PEG-style rule functions over
//! the driver: ordered choice, unbounded lookahead, and mark/rewind
//! backtracking. Rules that build a node follow the block discipline: open
//! a block, parse children into it, close it and hand it to exactly one
//! constructor.

/// Abandon the rule's block, rewind to `$m`, and return no match, noting an
/// expectation label first when one is given.
macro_rules! bail {
    ($p:expr, $m:expr) => {{
        $p.block_discard();
        $p.rewind($m);
        return Ok(None);
    }};
    ($p:expr, $m:expr, $label:expr) => {{
        $p.expected($label)?;
        $p.block_discard();
        $p.rewind($m);
        return Ok(None);
    }};
}

pub(crate) use bail;

pub(crate) mod atom;
pub(crate) mod expression;
pub(crate) mod lexical;
pub(crate) mod pattern;
pub(crate) mod query;
pub(crate) mod schema;
pub(crate) mod statement;
