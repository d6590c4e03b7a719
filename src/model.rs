use crate::error::Line;
use serde::Serialize;

/// Words that can never be used as variable names.
pub const KEYWORDS: [&str; 6] = ["number", "write", "repeat", "times", "newline", "and"];

/// File interpreted when no path is given on the command line.
pub const DEFAULT_SOURCE: &str = "test.ppp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    IntegerLiteral,
    StringLiteral,
    BlockOpen,
    BlockClose,
    StatementEnd,
    Unknown,
}

/// One classified lexeme with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The lexeme itself; structural markers carry a fixed label.
    pub text: String,
    pub line: Line,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: Line) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }
}

/// The whole token stream of one source file.
///
/// Never rewritten once lexing finishes; the interpreter only walks it
/// with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub tokens: Vec<Token>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Knobs handed from the command line to the interpreter.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Upper bound on distinct variables; `None` means unbounded.
    pub max_vars: Option<usize>,
}

/// What a finished run leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Statements executed, counting every loop-body pass.
    pub statements: u64,
    /// Final variable values, sorted by name.
    pub variables: Vec<(String, i64)>,
}
