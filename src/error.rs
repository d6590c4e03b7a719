//! Faults raised while lexing or running a script.
//!
//! Every fault is fatal: the interpreter stops at the first one and the
//! caller reports it.

use thiserror::Error;

/// 1-based line in the source file.
pub type Line = usize;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("lex error: {kind} (line {line})")]
    Lex { kind: LexErrorKind, line: Line },

    #[error("syntax error: {kind} (line {line})")]
    Syntax { kind: SyntaxErrorKind, line: Line },

    #[error("runtime error: {kind} (line {line})")]
    Runtime { kind: RuntimeErrorKind, line: Line },

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unknown character '{0}'")]
    UnknownCharacter(char),
    #[error("integer literal {0} out of range")]
    IntegerOutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("variable name expected after number")]
    ExpectedVariableName,
    #[error("missing ';' at the end of {0}")]
    MissingTerminator(&'static str),
    #[error("invalid write argument '{0}'")]
    InvalidWriteArgument(String),
    #[error("missing expression after repeat")]
    MissingRepeatCount,
    #[error("number or variable expected after repeat, found '{0}'")]
    InvalidRepeatCount(String),
    #[error("'times' expected after repeat count")]
    ExpectedTimes,
    #[error("missing block after repeat")]
    MissingRepeatBlock,
    #[error("repeat block not opened")]
    BlockNotOpened,
    #[error("repeat block not closed")]
    UnclosedBlock,
    #[error("assignment operator expected after '{0}'")]
    ExpectedOperator(String),
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("missing value after assignment")]
    MissingValue,
    #[error("number or variable expected after operator, found '{0}'")]
    InvalidValue(String),
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    #[error("undefined variable {0}")]
    UndefinedVariable(String),
    #[error("too many variables defined (limit {0})")]
    TooManyVariables(usize),
}

impl ScriptError {
    pub fn lex(kind: LexErrorKind, line: Line) -> Self {
        ScriptError::Lex { kind, line }
    }

    pub fn syntax(kind: SyntaxErrorKind, line: Line) -> Self {
        ScriptError::Syntax { kind, line }
    }

    pub fn runtime(kind: RuntimeErrorKind, line: Line) -> Self {
        ScriptError::Runtime { kind, line }
    }

    /// Source line the fault points at, if any.
    pub fn line(&self) -> Option<Line> {
        match self {
            ScriptError::Lex { line, .. }
            | ScriptError::Syntax { line, .. }
            | ScriptError::Runtime { line, .. } => Some(*line),
            ScriptError::Io(_) => None,
        }
    }
}
