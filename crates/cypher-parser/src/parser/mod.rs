//! The parse driver.
//!
//! [`Parser`] is the public entry point: configure it builder-style, then
//! run a whole-input parse or a streaming per-segment parse. The internal
//! [`Driver`] hosts the recognizer: a buffered window over the byte source,
//! mark/rewind backtracking with unbounded lookahead, the block stack the
//! semantic actions build nodes through, the operator and precedence stacks
//! expression rules gate recursion with, and the error tracker.

mod block;
mod buffer;
pub(crate) mod grammar;
mod tracking;

pub(crate) use block::Block;

use std::io;
use std::ops::ControlFlow;

use triomphe::Arc;

use crate::ast::{AstKind, AstNode};
use crate::config::{Colorization, ParserConfig};
use crate::error::{line_context, Error, TreeError};
use crate::operators::{Associativity, Operator};
use crate::result::ParseResult;
use crate::segment::ParseSegment;
use crate::source::{InputPosition, InputRange, LineIndex, ReaderSource, Source, TextSource};

use buffer::StringBuffer;
use tracking::ErrorTracking;

/// Parse Cypher into a typed AST.
///
/// ## Example
///
/// ```rust
/// use cypher_parser::Parser;
///
/// let result = Parser::new("MATCH (n:Person) RETURN n.name;").parse().unwrap();
/// assert_eq!(result.nerrors(), 0);
/// assert_eq!(result.nroots(), 1);
///
/// let statement = result.root(0).unwrap();
/// let query = statement.as_statement().unwrap().body();
/// assert_eq!(query.as_query().unwrap().nclauses(), 2);
/// ```
///
/// Streaming delivery hands each top-level statement to a callback as soon
/// as it has been parsed:
///
/// ```rust
/// use std::ops::ControlFlow;
/// use cypher_parser::Parser;
///
/// let mut statements = 0;
/// Parser::new("RETURN 1; RETURN 2;")
///     .parse_each(|segment| {
///         statements += segment.nroots();
///         ControlFlow::Continue(())
///     })
///     .unwrap();
/// assert_eq!(statements, 2);
/// ```
pub struct Parser<'s> {
    source: Box<dyn Source + 's>,
    config: ParserConfig,
}

impl<'s> Parser<'s> {
    /// Parse from an in-memory string.
    pub fn new(input: &'s str) -> Self {
        Parser {
            source: Box::new(TextSource::new(input)),
            config: ParserConfig::default(),
        }
    }

    /// Parse from a byte stream. The stream is read forward only and
    /// buffered internally.
    pub fn from_reader(reader: impl io::Read + 's) -> Self {
        Parser {
            source: Box::new(ReaderSource::new(reader)),
            config: ParserConfig::default(),
        }
    }

    /// Set the position the first byte of input is reported at. Defaults
    /// to line 1, column 1, offset 0.
    pub fn initial_position(mut self, position: InputPosition) -> Self {
        self.config.initial_position = position;
        self
    }

    /// Set the ordinal the first parsed node is numbered with.
    pub fn initial_ordinal(mut self, ordinal: u32) -> Self {
        self.config.initial_ordinal = ordinal;
        self
    }

    /// Colorize diagnostic messages with the given escape sequences.
    pub fn colorization(mut self, colorization: &'static Colorization) -> Self {
        self.config.colorization = colorization;
        self
    }

    /// Stop after the first segment.
    pub fn single(mut self) -> Self {
        self.config.single = true;
        self
    }

    /// Parse statements only; client commands are not recognized.
    pub fn only_statements(mut self) -> Self {
        self.config.only_statements = true;
        self
    }

    /// Parse the whole input into one coalesced result.
    pub fn parse(self) -> Result<ParseResult, Error> {
        let config = self.config;
        let mut result = ParseResult::default();
        let finish = run(self.source, config, |segment| {
            result.merge_segment(segment);
            ControlFlow::Continue(())
        })?;
        if finish.clean_eof {
            result.set_eof();
        }
        Ok(result)
    }

    /// Parse segment by segment, handing each segment to `callback` as it
    /// completes. The callback can return `ControlFlow::Break` to stop
    /// between segments. Returns the position following the last consumed
    /// segment.
    pub fn parse_each<F>(self, mut callback: F) -> Result<InputPosition, Error>
    where
        F: FnMut(Arc<ParseSegment>) -> ControlFlow<()>,
    {
        let config = self.config;
        let finish = run(self.source, config, |segment| callback(Arc::new(segment)))?;
        Ok(finish.last)
    }
}

struct Finish {
    last: InputPosition,
    clean_eof: bool,
}

/// The segment loop: repeatedly re-enter the recognizer at the start rule,
/// then assemble and deliver one segment per top-level directive.
fn run<'s, F>(source: Box<dyn Source + 's>, config: ParserConfig, mut sink: F) -> Result<Finish, Error>
where
    F: FnMut(ParseSegment) -> ControlFlow<()>,
{
    let mut drv = Driver::new(source, config);
    let mut ordinal = config.initial_ordinal;

    loop {
        drv.directive = None;
        grammar::statement::directive(&mut drv)?;

        // Grammar-bug tripwires: a successful top-level parse leaves one
        // residual block, an empty sequence, and empty operator stacks.
        debug_assert_eq!(drv.blocks.len(), 1, "unbalanced block stack");
        debug_assert!(drv.blocks[0].sequence.is_empty(), "nodes left in root sequence");
        debug_assert!(drv.operators.is_empty(), "operator stack not emptied");
        debug_assert!(drv.precedences.is_empty(), "precedence stack not emptied");

        let consumed = drv.pos;
        let at_eof = drv.at_end()?;
        drv.tracking.clear_potentials();

        let end = drv.position_at(consumed);
        if drv.directive.is_none()
            && drv.blocks[0].children.is_empty()
            && !drv.tracking.has_errors()
        {
            // Nothing but trivia remained; end cleanly.
            debug_assert!(at_eof, "no directive parsed before end of input");
            return Ok(Finish {
                last: end,
                clean_eof: true,
            });
        }

        drv.fill_error_contexts();
        let range = InputRange {
            start: drv.origin,
            end,
        };
        let roots = std::mem::take(&mut drv.blocks[0].children);
        let segment = ParseSegment::new(
            ordinal,
            range,
            roots,
            drv.directive.take(),
            drv.tracking.take_errors(),
            at_eof,
        );
        ordinal += segment.nnodes();

        let stop = sink(segment).is_break();
        if stop || at_eof || config.single {
            return Ok(Finish {
                last: end,
                clean_eof: false,
            });
        }

        // Advance the origin past the consumed span and restart the window.
        drv.origin = end;
        drv.window.drain(..consumed);
        drv.pos = 0;
        drv.last_end = 0;
        drv.lines.reset();
    }
}

/// A snapshot the recognizer can rewind to. Rewinding restores the cursor
/// and truncates anything the abandoned attempt added to the current
/// block.
#[derive(Clone, Copy)]
pub(crate) struct Mark {
    pos: usize,
    last_end: usize,
    children: usize,
    sequence: usize,
    #[cfg(debug_assertions)]
    depth: usize,
}

pub(crate) struct Driver<'s> {
    source: Box<dyn Source + 's>,
    source_done: bool,
    /// Buffered input for the current segment; grows on demand, discarded
    /// up to the consumed prefix when a segment completes.
    window: Vec<u8>,
    /// Cursor into `window`.
    pos: usize,
    /// Offset just past the last matched token, before trailing trivia;
    /// blocks close here so node ranges exclude trailing whitespace.
    last_end: usize,
    /// Position of `window[0]` in the overall input.
    origin: InputPosition,
    lines: LineIndex,
    blocks: Vec<Block>,
    pub(crate) strbuf: StringBuffer,
    op: Option<&'static Operator>,
    operators: Vec<&'static Operator>,
    precedences: Vec<u8>,
    tracking: ErrorTracking,
    /// Root-child index of the segment's principal statement or command.
    directive: Option<usize>,
    pub(crate) config: ParserConfig,
}

impl<'s> Driver<'s> {
    fn new(source: Box<dyn Source + 's>, config: ParserConfig) -> Self {
        let mut blocks = Vec::new();
        blocks.push(Block::open(0, config.initial_position));
        Driver {
            source,
            source_done: false,
            window: Vec::new(),
            pos: 0,
            last_end: 0,
            origin: config.initial_position,
            lines: LineIndex::new(),
            blocks,
            strbuf: StringBuffer::default(),
            op: None,
            operators: Vec::new(),
            precedences: Vec::new(),
            tracking: ErrorTracking::new(config.colorization),
            directive: None,
            config,
        }
    }

    // ---- window and cursor ----

    fn fill(&mut self, upto: usize) -> Result<(), Error> {
        while !self.source_done && self.window.len() < upto {
            let mut buf = [0u8; 4096];
            let n = self.source.read(&mut buf)?;
            if n == 0 {
                self.source_done = true;
            } else {
                self.window.extend_from_slice(&buf[..n]);
            }
        }
        Ok(())
    }

    pub(crate) fn peek(&mut self) -> Result<Option<u8>, Error> {
        self.peek_at(0)
    }

    pub(crate) fn peek_at(&mut self, lookahead: usize) -> Result<Option<u8>, Error> {
        self.fill(self.pos + lookahead + 1)?;
        Ok(self.window.get(self.pos + lookahead).copied())
    }

    pub(crate) fn bump(&mut self) -> Result<Option<u8>, Error> {
        match self.peek()? {
            Some(byte) => {
                self.pos += 1;
                if byte == b'\n' {
                    self.lines.record(self.pos);
                }
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn at_end(&mut self) -> Result<bool, Error> {
        Ok(self.peek()?.is_none())
    }

    pub(crate) fn mark(&self) -> Mark {
        let top = self.blocks.last().expect("block stack is never empty");
        Mark {
            pos: self.pos,
            last_end: self.last_end,
            children: top.children.len(),
            sequence: top.sequence.len(),
            #[cfg(debug_assertions)]
            depth: self.blocks.len(),
        }
    }

    pub(crate) fn rewind(&mut self, mark: Mark) {
        #[cfg(debug_assertions)]
        debug_assert_eq!(self.blocks.len(), mark.depth, "rewind across block boundary");
        self.pos = mark.pos;
        self.last_end = mark.last_end;
        self.lines.rewind(mark.pos);
        let top = self.blocks.last_mut().expect("block stack is never empty");
        top.children.truncate(mark.children);
        top.sequence.truncate(mark.sequence);
    }

    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn token_end(&self) -> usize {
        self.last_end
    }

    /// Record the end of a just-matched token; trailing trivia consumed
    /// afterwards is excluded from enclosing node ranges.
    pub(crate) fn set_token_end(&mut self) {
        self.last_end = self.pos;
    }

    pub(crate) fn position_at(&self, pos: usize) -> InputPosition {
        self.lines.position(pos, self.origin)
    }

    pub(crate) fn window_slice(&self, start: usize, end: usize) -> &[u8] {
        &self.window[start..end]
    }

    // ---- blocks ----

    pub(crate) fn block_start(&mut self) {
        let position = self.position_at(self.pos);
        self.blocks.push(Block::open(self.pos, position));
    }

    fn close_block(&mut self) -> Block {
        let mut block = self.blocks.pop().expect("unbalanced block stack");
        debug_assert!(!self.blocks.is_empty(), "root block closed");
        let end = self.last_end.max(block.buffer_start);
        block.close(end, self.position_at(end));
        block
    }

    /// Comments picked up by the last token's trailing trivia start past
    /// the closed span; split them off so they can be re-homed in a block
    /// that covers them.
    fn split_trailing_comments(block: &mut Block) -> Vec<AstNode> {
        let mut keep = block.children.len();
        while keep > 0
            && block.children[keep - 1].kind().instance_of(AstKind::Comment)
            && block.children[keep - 1].range.start.offset >= block.range.end.offset
        {
            keep -= 1;
        }
        block.children.split_off(keep)
    }

    pub(crate) fn block_end(&mut self) -> Block {
        let mut block = self.close_block();
        let trailing = Self::split_trailing_comments(&mut block);
        if !trailing.is_empty() {
            let parent = self.blocks.last_mut().expect("block stack is never empty");
            parent.children.extend(trailing);
        }
        block
    }

    /// Close the current block and reopen a fresh one covering the same
    /// start position; used by postfix and binary chains that emit several
    /// nodes spanning from one origin.
    pub(crate) fn block_replace(&mut self) -> Block {
        let mut block = self.close_block();
        let mut fresh = Block::open(self.pos, block.range.start);
        // Trailing comments still fall inside the reopened span.
        fresh.children = Self::split_trailing_comments(&mut block);
        self.blocks.push(fresh);
        block
    }

    /// Close the current block, hoisting its children into the parent
    /// without producing a node. Returns the parent index of the first
    /// hoisted child.
    pub(crate) fn block_merge(&mut self) -> usize {
        let block = self.close_block();
        debug_assert!(block.sequence.is_empty(), "sequence entries lost in merge");
        let top = self.blocks.last_mut().expect("block stack is never empty");
        let base = top.children.len();
        top.children.extend(block.children);
        base
    }

    /// Abandon the current block after a failed attempt; its children are
    /// dropped.
    pub(crate) fn block_discard(&mut self) {
        let block = self.blocks.pop().expect("unbalanced block stack");
        debug_assert!(!self.blocks.is_empty(), "root block discarded");
        drop(block);
    }

    /// A child of the current block by index; used by rules that dispatch
    /// on the kind of something already parsed.
    pub(crate) fn peek_child(&self, index: usize) -> &AstNode {
        &self.blocks.last().expect("block stack is never empty").children[index]
    }

    /// Add a node to the current block, keeping children in source order:
    /// comments consumed as trailing trivia may already sit in the block
    /// even though the node's span starts before them.
    pub(crate) fn add_child(&mut self, node: AstNode) -> usize {
        let top = self.blocks.last_mut().expect("block stack is never empty");
        let start = node.range.start.offset;
        let mut at = top.children.len();
        while at > 0
            && top.children[at - 1].kind().instance_of(AstKind::Comment)
            && top.children[at - 1].range.start.offset > start
        {
            at -= 1;
        }
        top.children.insert(at, node);
        at
    }

    /// Install a terminal node built from `block`'s span; terminals must
    /// not have accumulated children.
    pub(crate) fn add_terminal(&mut self, block: Block, node: AstNode) -> usize {
        debug_assert!(
            block.children.is_empty(),
            "terminal built from a block with children"
        );
        drop(block);
        self.add_child(node)
    }

    /// Record `index` in the current block's auxiliary sequence.
    pub(crate) fn sequence_add(&mut self, index: usize) {
        let top = self.blocks.last_mut().expect("block stack is never empty");
        top.sequence.push(index);
    }

    pub(crate) fn emit(&mut self, built: Result<AstNode, TreeError>) -> Result<usize, Error> {
        let node = built?;
        Ok(self.add_child(node))
    }

    pub(crate) fn set_directive(&mut self, index: usize) {
        self.directive = Some(index);
    }

    // ---- operator and precedence stacks ----

    pub(crate) fn set_op(&mut self, op: &'static Operator) {
        self.op = Some(op);
    }

    pub(crate) fn op_push(&mut self, op: &'static Operator) {
        self.operators.push(op);
    }

    pub(crate) fn op_drain(&mut self, from: usize) -> Vec<&'static Operator> {
        self.operators.split_off(from)
    }

    pub(crate) fn op_depth(&self) -> usize {
        self.operators.len()
    }

    /// Push the minimum precedence the pending operator's operand parse
    /// must honor: one tier above for left-associative operators, the
    /// operator's own tier otherwise.
    pub(crate) fn prec_push(&mut self) {
        let op = self.op.expect("prec_push without a pending operator");
        let next = match op.associativity() {
            Associativity::Left => op.precedence() + 1,
            Associativity::Right | Associativity::Unary => op.precedence(),
        };
        self.precedences.push(next);
    }

    pub(crate) fn prec_push_top(&mut self) {
        self.precedences.push(0);
    }

    /// Does `op` bind at least as tightly as the ambient minimum?
    pub(crate) fn prec_check(&self, op: &Operator) -> bool {
        op.precedence() >= self.precedences.last().copied().unwrap_or(0)
    }

    pub(crate) fn prec_pop(&mut self) {
        self.precedences.pop();
    }

    // ---- error tracking ----

    /// Note that `label` was expected at the current position.
    pub(crate) fn expected(&mut self, label: &'static str) -> Result<(), Error> {
        let c = self.peek()?;
        self.lines.rewind(self.pos);
        let position = self.position_at(self.pos);
        self.tracking.note(position, c, label);
        Ok(())
    }

    /// Commit the pending expectation notes to a diagnostic.
    pub(crate) fn reify_errors(&mut self) {
        self.tracking.reify();
    }

    fn fill_error_contexts(&mut self) {
        let origin_offset = self.origin.offset;
        let window = &self.window;
        for err in self.tracking.errors_mut().iter_mut().rev() {
            if err.context.is_some() {
                break;
            }
            let rel = err.position.offset - origin_offset;
            let (context, context_offset) = line_context(window, rel, 80);
            err.context = Some(context);
            err.context_offset = context_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use pretty_assertions::assert_eq;

    use crate::ast::{AstKind, AstNode};
    use crate::config::NO_COLORIZATION;
    use crate::result::ParseResult;
    use crate::source::InputPosition;
    use crate::Parser;

    fn parse(input: &str) -> ParseResult {
        Parser::new(input).parse().expect("parse must not fail")
    }

    fn dump(result: &ParseResult) -> String {
        let mut out = Vec::new();
        result
            .fprint_ast(&mut out, 0, &NO_COLORIZATION)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("dump output is UTF-8")
    }

    /// The dump with column padding collapsed, for readable structural
    /// snapshots.
    fn flat(result: &ParseResult) -> String {
        dump(result)
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_ordinals(node: &AstNode, out: &mut Vec<u32>) {
        out.push(node.ordinal());
        for child in node.children() {
            collect_ordinals(child, out);
        }
    }

    fn check_ranges(node: &AstNode) {
        for child in node.children() {
            assert!(
                node.range().start.offset <= child.range().start.offset
                    && child.range().end.offset <= node.range().end.offset,
                "{} range {} does not cover child {} range {}",
                node.kind(),
                node.range(),
                child.kind(),
                child.range(),
            );
            check_ranges(child);
        }
    }

    #[test]
    fn parses_a_single_return_statement() {
        let result = parse("RETURN 1;");
        assert_eq!(result.nerrors(), 0);
        assert_eq!(result.nroots(), 1);
        assert_eq!(result.ndirectives(), 1);
        assert!(result.eof());

        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        assert_eq!(query.nclauses(), 1);
        let ret = query.clause(0).unwrap().as_return().unwrap();
        assert_eq!(ret.nprojections(), 1);
        let projection = ret.projection(0).unwrap().as_projection().unwrap();
        let integer = projection.expression().as_integer().unwrap();
        assert_eq!(integer.value(), "1");
        assert!(projection.alias().is_none());

        assert_eq!(
            flat(&result),
            "@0 0..9 statement body=@1\n\
             @1 0..8 > query clauses=[@2]\n\
             @2 0..8 > > RETURN projections=[@3]\n\
             @3 7..8 > > > projection expression=@4\n\
             @4 7..8 > > > > integer 1"
        );
    }

    #[test]
    fn parses_match_and_return() {
        let result = parse("MATCH (n) RETURN n");
        assert_eq!(result.nerrors(), 0);
        assert!(result.eof());

        assert_eq!(
            flat(&result),
            "@0 0..18 statement body=@1\n\
             @1 0..18 > query clauses=[@2, @7]\n\
             @2 0..9 > > MATCH pattern=@3\n\
             @3 6..9 > > > pattern paths=[@4]\n\
             @4 6..9 > > > > pattern path (@5)\n\
             @5 6..9 > > > > > node pattern (@6)\n\
             @6 7..8 > > > > > > identifier `n`\n\
             @7 10..18 > > RETURN projections=[@8]\n\
             @8 17..18 > > > projection expression=@9\n\
             @9 17..18 > > > > identifier `n`"
        );
    }

    #[test]
    fn with_where_builds_a_binary_predicate() {
        let result = parse("WITH 1 AS x WHERE x > 0 RETURN x");
        assert_eq!(result.nerrors(), 0);

        let statement = result.root(0).unwrap().as_statement().unwrap();
        let query = statement.body().as_query().unwrap();
        assert_eq!(query.nclauses(), 2);

        let with = query.clause(0).unwrap().as_with().unwrap();
        assert_eq!(with.nprojections(), 1);
        let projection = with.projection(0).unwrap().as_projection().unwrap();
        assert_eq!(projection.expression().as_integer().unwrap().value(), "1");
        assert_eq!(
            projection.alias().unwrap().as_identifier().unwrap().name(),
            "x"
        );

        let predicate = with.predicate().unwrap().as_binary_operator().unwrap();
        assert_eq!(predicate.operator().symbol(), ">");
        assert_eq!(predicate.argument1().as_identifier().unwrap().name(), "x");
        assert_eq!(predicate.argument2().as_integer().unwrap().value(), "0");

        assert!(query.clause(1).unwrap().as_return().is_some());
    }

    #[test]
    fn invalid_statement_start_is_reported_at_the_first_column() {
        let result = parse("RETRN 1;");
        assert_eq!(result.ndirectives(), 0);
        assert_eq!(result.nerrors(), 1);
        assert!(result.eof());

        let error = result.error(0).unwrap();
        assert_eq!(
            error.message(),
            "Invalid input 'R': expected a statement"
        );
        assert_eq!(error.position().line, 1);
        assert_eq!(error.position().column, 1);
        assert_eq!(error.position().offset, 0);
        assert_eq!(error.context(), Some("RETRN 1;"));
        assert_eq!(error.context_offset(), 0);

        // The skipped span is preserved in the tree.
        assert_eq!(result.nroots(), 1);
        let skipped = result.root(0).unwrap().as_error().unwrap();
        assert_eq!(skipped.value(), "RETRN 1;");
    }

    #[test]
    fn streaming_delivers_one_segment_per_statement() {
        let mut segments = Vec::new();
        let last = Parser::new("RETURN 1;\nRETURN 2;")
            .parse_each(|segment| {
                segments.push(segment);
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].nnodes(), 5);
        assert_eq!(segments[0].root(0).unwrap().ordinal(), 0);
        assert!(!segments[0].is_eof());
        // Ordinals continue where the first segment ended.
        assert_eq!(segments[1].root(0).unwrap().ordinal(), 5);
        assert!(segments[1].is_eof());

        let second = segments[1].range();
        assert_eq!(second.start.line, 1);
        assert_eq!(second.end.line, 2);
        assert_eq!(last.line, 2);
        assert_eq!(last.offset, 19);
    }

    #[test]
    fn single_mode_stops_after_the_first_segment() {
        let mut segments = 0;
        Parser::new("RETURN 1;\nRETURN 2;")
            .single()
            .parse_each(|_| {
                segments += 1;
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(segments, 1);
    }

    #[test]
    fn callbacks_can_stop_the_parse() {
        let mut segments = 0;
        Parser::new("RETURN 1; RETURN 2; RETURN 3;")
            .parse_each(|_| {
                segments += 1;
                ControlFlow::Break(())
            })
            .unwrap();
        assert_eq!(segments, 1);
    }

    #[test]
    fn parses_a_schema_command() {
        let result = parse("CREATE INDEX ON :Person(name)");
        assert_eq!(result.nerrors(), 0);

        let statement = result.root(0).unwrap().as_statement().unwrap();
        let index = statement.body().as_create_node_prop_index().unwrap();
        assert_eq!(index.label().as_label().unwrap().name(), "Person");
        assert_eq!(index.prop_name().as_prop_name().unwrap().value(), "name");

        assert_eq!(
            flat(&result),
            "@0 0..29 statement body=@1\n\
             @1 0..29 > CREATE INDEX ON=:@2(@3)\n\
             @2 17..23 > > label :`Person`\n\
             @3 24..28 > > prop name `name`"
        );
    }

    #[test]
    fn empty_input_is_a_clean_eof() {
        let result = parse("");
        assert_eq!(result.nroots(), 0);
        assert_eq!(result.nerrors(), 0);
        assert!(result.eof());
    }

    #[test]
    fn trivia_only_input_produces_no_roots() {
        let result = parse("  // a comment\n  /* block */  \n");
        assert_eq!(result.nroots(), 0);
        assert_eq!(result.nerrors(), 0);
        assert!(result.eof());
    }

    #[test]
    fn an_unterminated_statement_reports_an_error() {
        let result = parse("RETURN 'abc");
        assert!(result.nerrors() >= 1);
        let error = result.error(0).unwrap();
        assert!(error.position().offset <= 11);
        assert_eq!(
            error.message(),
            "Invalid input at end of input: expected a string"
        );
    }

    #[test]
    fn errors_in_consecutive_segments_have_increasing_offsets() {
        let result = parse("RETRN 1; RETRN 2;");
        assert_eq!(result.nerrors(), 2);
        let first = result.error(0).unwrap().position().offset;
        let second = result.error(1).unwrap().position().offset;
        assert!(first < second);
    }

    #[test]
    fn a_missing_close_paren_is_pinpointed() {
        let result = parse("MATCH (n RETURN n;");
        assert_eq!(result.nerrors(), 1);
        let error = result.error(0).unwrap();
        assert_eq!(error.message(), "Invalid input 'R': expected ')'");
        assert_eq!(error.position().offset, 9);
        assert_eq!(error.context(), Some("MATCH (n RETURN n;"));
        assert_eq!(error.context_offset(), 9);
    }

    #[test]
    fn errors_do_not_abort_the_surrounding_parse() {
        let result = parse("RETURN 1; RETRN 2; RETURN 3;");
        assert_eq!(result.nerrors(), 1);
        // The statements around the failure parse normally.
        assert_eq!(result.ndirectives(), 2);
        assert!(result.eof());
    }

    #[test]
    fn ordinals_are_a_pre_order_walk() {
        let input = unindent::unindent(
            "
            MATCH (n)-[r:X]->(m)
            WHERE n.a = 1
            RETURN n, m
            ORDER BY n.a;
            ",
        );
        let result = parse(&input);
        assert_eq!(result.nerrors(), 0);

        let mut ordinals = Vec::new();
        for root in result.roots() {
            collect_ordinals(root, &mut ordinals);
        }
        let expected: Vec<u32> = (0..result.nnodes()).collect();
        assert_eq!(ordinals, expected);
    }

    #[test]
    fn initial_ordinal_offsets_the_numbering() {
        let result = Parser::new("RETURN 1;").initial_ordinal(40).parse().unwrap();
        assert_eq!(result.root(0).unwrap().ordinal(), 40);
    }

    #[test]
    fn node_ranges_cover_their_children() {
        let inputs = [
            "MATCH (n:Person {name: 'x'})-[r:KNOWS*1..2]->(m) RETURN n.name AS name, count(*);",
            "WITH 1 AS x WHERE x > 0 RETURN x UNION ALL RETURN 2;",
            "MERGE (n) ON CREATE SET n.a = 1 ON MATCH SET n.b = 2;",
            "CREATE CONSTRAINT ON (p:Person) ASSERT p.name IS UNIQUE",
        ];
        for input in inputs {
            let result = parse(input);
            assert_eq!(result.nerrors(), 0, "{input}");
            for root in result.roots() {
                check_ranges(root);
            }
        }
    }

    #[test]
    fn streaming_and_whole_input_parses_agree() {
        let input = "MATCH (n) RETURN n;\nRETRN oops;\nRETURN 2;";
        let whole = parse(input);

        let mut streamed = ParseResult::default();
        let mut reached_eof = false;
        Parser::new(input)
            .parse_each(|segment| {
                reached_eof = segment.is_eof();
                let segment = crate::Arc::try_unwrap(segment)
                    .expect("the callback holds the only reference");
                streamed.merge_segment(segment);
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(dump(&whole), dump(&streamed));
        assert_eq!(whole.nnodes(), streamed.nnodes());
        assert_eq!(whole.nerrors(), streamed.nerrors());
        assert_eq!(
            whole.error(0).unwrap().message(),
            streamed.error(0).unwrap().message()
        );
        assert!(reached_eof);
    }

    #[test]
    fn initial_position_shifts_every_position() {
        let base = parse("RETURN x");
        let shifted = Parser::new("RETURN x")
            .initial_position(InputPosition {
                line: 3,
                column: 5,
                offset: 100,
            })
            .parse()
            .unwrap();

        let base_range = base.root(0).unwrap().range();
        let shifted_range = shifted.root(0).unwrap().range();
        assert_eq!(shifted_range.start.line, base_range.start.line + 2);
        assert_eq!(shifted_range.start.column, base_range.start.column + 4);
        assert_eq!(shifted_range.start.offset, base_range.start.offset + 100);
        assert_eq!(shifted_range.end.offset, base_range.end.offset + 100);

        // Columns reset past the first line.
        let multiline = Parser::new("RETURN\nx")
            .initial_position(InputPosition {
                line: 3,
                column: 5,
                offset: 100,
            })
            .parse()
            .unwrap();
        let range = multiline.root(0).unwrap().range();
        assert_eq!(range.end.line, 4);
        assert_eq!(range.end.column, 2);
    }

    #[test]
    fn reader_input_parses_like_a_buffer() {
        let input = "MATCH (n) RETURN n; RETURN 2;";
        let buffered = parse(input);
        let from_reader = Parser::from_reader(input.as_bytes()).parse().unwrap();
        assert_eq!(dump(&buffered), dump(&from_reader));
    }

    #[test]
    fn pretty_printing_is_deterministic() {
        let result = parse("MATCH (n:A {x: 1}) RETURN n.x, count(*) ORDER BY n.x DESC;");
        assert_eq!(dump(&result), dump(&result));
    }

    #[test]
    fn client_commands_parse_in_directive_mode() {
        let result = parse(":help commands \"quoted arg\"\nRETURN 1;");
        assert_eq!(result.nerrors(), 0);
        assert_eq!(result.ndirectives(), 2);

        let command = result.directive(0).unwrap().as_command().unwrap();
        assert_eq!(command.name().as_string().unwrap().value(), "help");
        assert_eq!(command.nargs(), 2);
        assert_eq!(command.arg(0).unwrap().as_string().unwrap().value(), "commands");
        assert_eq!(
            command.arg(1).unwrap().as_string().unwrap().value(),
            "quoted arg"
        );

        assert!(result.directive(1).unwrap().as_statement().is_some());
    }

    #[test]
    fn only_statements_rejects_commands() {
        let result = Parser::new(":quit").only_statements().parse().unwrap();
        assert_eq!(result.ndirectives(), 0);
        assert_eq!(result.nerrors(), 1);
    }

    #[test]
    fn statement_options_are_recorded() {
        let result = parse("EXPLAIN RETURN 1;");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        assert_eq!(statement.noptions(), 1);
        assert_eq!(statement.option(0).unwrap().kind(), AstKind::ExplainOption);

        let result = parse("CYPHER 2.3 planner=cost PROFILE RETURN 1;");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        assert_eq!(statement.noptions(), 2);
        let cypher = statement.option(0).unwrap().as_cypher_option().unwrap();
        assert_eq!(cypher.version().unwrap().as_string().unwrap().value(), "2.3");
        assert_eq!(cypher.nparams(), 1);
        let param = cypher.param(0).unwrap().as_cypher_option_param().unwrap();
        assert_eq!(param.name().as_string().unwrap().value(), "planner");
        assert_eq!(param.value().as_string().unwrap().value(), "cost");
        assert_eq!(statement.option(1).unwrap().kind(), AstKind::ProfileOption);
    }

    #[test]
    fn payload_accessors_resolve_to_children() {
        let result = parse("MATCH (n) WHERE n.a RETURN n;");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        assert!(statement
            .node()
            .children()
            .any(|child| std::ptr::eq(child, statement.body())));

        let query = statement.body().as_query().unwrap();
        let m = query.clause(0).unwrap().as_match().unwrap();
        assert!(m
            .node()
            .children()
            .any(|child| std::ptr::eq(child, m.pattern())));
        assert!(m
            .node()
            .children()
            .any(|child| std::ptr::eq(child, m.predicate().unwrap())));
    }

    #[test]
    fn instance_of_spans_the_lattice_at_runtime() {
        let result = parse("MATCH (n) RETURN n;");
        let statement = result.root(0).unwrap();
        assert!(statement.instance_of(AstKind::Statement));

        let query = statement.as_statement().unwrap().body();
        let clause = query.as_query().unwrap().clause(0).unwrap();
        assert!(clause.instance_of(AstKind::QueryClause));
        assert!(!clause.instance_of(AstKind::Expression));
    }

    #[test]
    fn comments_inside_statements_are_preserved() {
        fn find_comment(node: &AstNode) -> bool {
            node.instance_of(AstKind::Comment) || node.children().any(find_comment)
        }

        let result = parse("RETURN /* answer */ 1;");
        assert_eq!(result.nerrors(), 0);
        assert!(find_comment(result.root(0).unwrap()));

        // A trailing comment re-homes to a block that covers its span, so
        // range containment and source order both survive.
        let result = parse("MATCH (n) // trailing\nRETURN n;");
        assert_eq!(result.nerrors(), 0);
        let statement = result.root(0).unwrap();
        assert!(find_comment(statement));
        for root in result.roots() {
            check_ranges(root);
        }
        fn in_source_order(node: &AstNode) -> bool {
            node.children()
                .zip(node.children().skip(1))
                .all(|(a, b)| a.range().start.offset <= b.range().start.offset)
                && node.children().all(in_source_order)
        }
        assert!(in_source_order(statement));
    }
}
