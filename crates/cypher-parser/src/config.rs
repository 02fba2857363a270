//! Parse configuration and output colorization.

use crate::source::InputPosition;

/// Escape sequence pairs wrapped around the various output fields of
/// diagnostics and AST dumps. Each pair is `[start, end]`; the defaults are
/// all empty.
#[derive(Debug)]
pub struct Colorization {
    pub normal: [&'static str; 2],
    pub error: [&'static str; 2],
    pub error_token: [&'static str; 2],
    pub error_message: [&'static str; 2],
    pub ast_ordinal: [&'static str; 2],
    pub ast_range: [&'static str; 2],
    pub ast_indent: [&'static str; 2],
    pub ast_type: [&'static str; 2],
    pub ast_desc: [&'static str; 2],
}

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_BOLD_RED: &str = "\x1b[1m\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_CYAN: &str = "\x1b[36m";

/// No escape sequences at all; the default.
pub static NO_COLORIZATION: Colorization = Colorization {
    normal: ["", ""],
    error: ["", ""],
    error_token: ["", ""],
    error_message: ["", ""],
    ast_ordinal: ["", ""],
    ast_range: ["", ""],
    ast_indent: ["", ""],
    ast_type: ["", ""],
    ast_desc: ["", ""],
};

/// ANSI terminal colors.
pub static ANSI_COLORIZATION: Colorization = Colorization {
    normal: [ANSI_RESET, ""],
    error: [ANSI_BOLD_RED, ANSI_RESET],
    error_token: [ANSI_BOLD, ANSI_RESET],
    error_message: [ANSI_BOLD, ANSI_RESET],
    ast_ordinal: ["", ""],
    ast_range: [ANSI_CYAN, ANSI_RESET],
    ast_indent: [ANSI_YELLOW, ANSI_RESET],
    ast_type: [ANSI_BOLD, ANSI_RESET],
    ast_desc: ["", ""],
};

/// Everything a parse can be configured with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParserConfig {
    pub(crate) initial_position: InputPosition,
    pub(crate) initial_ordinal: u32,
    pub(crate) colorization: &'static Colorization,
    pub(crate) single: bool,
    pub(crate) only_statements: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            initial_position: InputPosition::START,
            initial_ordinal: 0,
            colorization: &NO_COLORIZATION,
            single: false,
            only_statements: false,
        }
    }
}
