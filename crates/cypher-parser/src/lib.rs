#![doc = include_str!("../README.md")]

pub mod ast;
mod config;
mod error;
pub mod operators;
mod parser;
mod quick;
mod result;
mod segment;
mod source;

pub use crate::ast::{AstKind, AstNode};
pub use crate::config::{Colorization, ANSI_COLORIZATION, NO_COLORIZATION};
pub use crate::error::{Error, ParseError, TreeError};
pub use crate::operators::{Associativity, Operator};
pub use crate::parser::Parser;
pub use crate::quick::{QuickParser, QuickSegment};
pub use crate::result::ParseResult;
pub use crate::segment::ParseSegment;
pub use crate::source::{InputPosition, InputRange, Source};

/// The reference-counted pointer streaming callbacks receive segments
/// through; re-exported so callers can name it without depending on
/// `triomphe` themselves.
pub use triomphe::Arc;
