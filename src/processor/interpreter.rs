//! Cursor-driven statement executor.
//!
//! There is no syntax tree: each statement is read straight off the token
//! stream and run as soon as its shape is known. Loop bodies are found by
//! scanning for the matching `}` each time a `repeat` starts, then run again
//! as a sub-range of the same stream.

use std::io::Write;

use tracing::{debug, trace};

use crate::error::{LexErrorKind, Line, ScriptError, SyntaxErrorKind};
use crate::model::{Program, RunConfig, RunSummary, Token, TokenKind};

use super::block::find_block_end;
use super::vars::Variables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssignOp {
    Set,
    Add,
    Sub,
}

impl AssignOp {
    fn parse(token: &Token) -> Result<Self, ScriptError> {
        match token.text.as_str() {
            ":=" => Ok(AssignOp::Set),
            "+=" => Ok(AssignOp::Add),
            "-=" => Ok(AssignOp::Sub),
            other => Err(ScriptError::syntax(
                SyntaxErrorKind::UnknownOperator(other.to_string()),
                token.line,
            )),
        }
    }
}

#[derive(Debug)]
pub struct Interpreter<'p, W: Write> {
    tokens: &'p [Token],
    vars: Variables,
    out: W,
    statements: u64,
}

impl<'p, W: Write> Interpreter<'p, W> {
    pub fn new(program: &'p Program, out: W, config: &RunConfig) -> Self {
        Self {
            tokens: &program.tokens,
            vars: Variables::with_limit(config.max_vars),
            out,
            statements: 0,
        }
    }

    /// Execute the whole program from the first token to the last.
    pub fn run(&mut self) -> Result<(), ScriptError> {
        let end = self.tokens.len();
        let mut pos = 0;
        while pos < end {
            pos = self.execute(pos, end)?;
        }
        self.out.flush()?;
        debug!(statements = self.statements, "program finished");
        Ok(())
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            statements: self.statements,
            variables: self.vars.snapshot(),
        }
    }

    fn peek(&self, pos: usize, end: usize) -> Option<&'p Token> {
        if pos < end {
            self.tokens.get(pos)
        } else {
            None
        }
    }

    /// Run one statement starting at `pos`, never reading at or past `end`.
    /// Returns the position of the next statement.
    pub fn execute(&mut self, pos: usize, end: usize) -> Result<usize, ScriptError> {
        let Some(token) = self.peek(pos, end) else {
            return Ok(pos);
        };
        self.statements += 1;
        trace!(pos, line = token.line, text = %token.text, "statement");
        let pos = pos + 1;

        match token.kind {
            TokenKind::StatementEnd => Ok(pos),
            TokenKind::Keyword => match token.text.as_str() {
                "number" => self.declare(pos, end, token.line),
                "write" => self.write(pos, end, token.line),
                "repeat" => self.repeat(pos, end, token.line),
                _ => Err(unexpected(token)),
            },
            TokenKind::Identifier => self.assign(token, pos, end),
            _ => Err(unexpected(token)),
        }
    }

    fn declare(&mut self, pos: usize, end: usize, line: Line) -> Result<usize, ScriptError> {
        let name = match self.peek(pos, end) {
            Some(t) if t.kind == TokenKind::Identifier => t,
            _ => {
                return Err(ScriptError::syntax(
                    SyntaxErrorKind::ExpectedVariableName,
                    line,
                ));
            }
        };
        self.vars.set(&name.text, 0, name.line)?;
        self.expect_end(pos + 1, end, "number declaration", line)
    }

    fn write(&mut self, mut pos: usize, end: usize, line: Line) -> Result<usize, ScriptError> {
        let mut newline = false;
        while let Some(arg) = self.peek(pos, end) {
            match arg.kind {
                TokenKind::StatementEnd => break,
                TokenKind::Keyword if arg.text == "newline" => newline = true,
                TokenKind::Keyword if arg.text == "and" => {}
                TokenKind::IntegerLiteral | TokenKind::StringLiteral => {
                    self.out.write_all(arg.text.as_bytes())?;
                }
                TokenKind::Identifier => {
                    let value = self.vars.get(&arg.text, arg.line)?;
                    write!(self.out, "{value}")?;
                }
                _ => {
                    return Err(ScriptError::syntax(
                        SyntaxErrorKind::InvalidWriteArgument(arg.text.clone()),
                        arg.line,
                    ));
                }
            }
            pos += 1;
        }
        if newline {
            writeln!(self.out)?;
        }
        self.expect_end(pos, end, "write command", line)
    }

    fn repeat(&mut self, pos: usize, end: usize, line: Line) -> Result<usize, ScriptError> {
        let count_tok = self
            .peek(pos, end)
            .ok_or_else(|| ScriptError::syntax(SyntaxErrorKind::MissingRepeatCount, line))?;
        let (count, counter) = match count_tok.kind {
            TokenKind::IntegerLiteral => (literal_value(count_tok)?, None),
            TokenKind::Identifier => (
                self.vars.get(&count_tok.text, count_tok.line)?,
                Some(count_tok.text.as_str()),
            ),
            _ => {
                return Err(ScriptError::syntax(
                    SyntaxErrorKind::InvalidRepeatCount(count_tok.text.clone()),
                    count_tok.line,
                ));
            }
        };

        let pos = pos + 1;
        match self.peek(pos, end) {
            Some(t) if t.is_keyword("times") => {}
            _ => return Err(ScriptError::syntax(SyntaxErrorKind::ExpectedTimes, line)),
        }

        let pos = pos + 1;
        match self.peek(pos, end) {
            Some(t) if t.kind == TokenKind::BlockOpen => {}
            Some(t) => {
                return Err(ScriptError::syntax(
                    SyntaxErrorKind::BlockNotOpened,
                    t.line,
                ));
            }
            None => {
                return Err(ScriptError::syntax(
                    SyntaxErrorKind::MissingRepeatBlock,
                    line,
                ));
            }
        }

        let body_start = pos + 1;
        let block_end = find_block_end(self.tokens, body_start, end)?;
        debug!(line, count, counter, "entering repeat block");
        self.repeat_block(body_start, block_end - 1, count, counter)?;
        Ok(block_end)
    }

    /// Run `start..end` `count` times. A named counter loses one after
    /// every pass; the pass count itself is fixed on entry.
    fn repeat_block(
        &mut self,
        start: usize,
        end: usize,
        count: i64,
        counter: Option<&str>,
    ) -> Result<(), ScriptError> {
        for _ in 0..count.max(0) {
            let mut pos = start;
            while pos < end {
                pos = self.execute(pos, end)?;
            }
            if let Some(name) = counter {
                self.vars.decrement(name);
            }
        }
        Ok(())
    }

    fn assign(&mut self, target: &'p Token, pos: usize, end: usize) -> Result<usize, ScriptError> {
        let line = target.line;
        let op = match self.peek(pos, end) {
            Some(t) if t.kind == TokenKind::Operator => AssignOp::parse(t)?,
            _ => {
                return Err(ScriptError::syntax(
                    SyntaxErrorKind::ExpectedOperator(target.text.clone()),
                    line,
                ));
            }
        };

        let pos = pos + 1;
        let value = match self.peek(pos, end) {
            Some(t) if t.kind == TokenKind::IntegerLiteral => literal_value(t)?,
            Some(t) if t.kind == TokenKind::Identifier => self.vars.get(&t.text, t.line)?,
            Some(t) => {
                return Err(ScriptError::syntax(
                    SyntaxErrorKind::InvalidValue(t.text.clone()),
                    t.line,
                ));
            }
            None => return Err(ScriptError::syntax(SyntaxErrorKind::MissingValue, line)),
        };

        // `:=` creates the target; the compound forms read it first and so
        // require it to exist.
        let value = match op {
            AssignOp::Set => value,
            AssignOp::Add => self.vars.get(&target.text, line)?.wrapping_add(value),
            AssignOp::Sub => self.vars.get(&target.text, line)?.wrapping_sub(value),
        };
        self.vars.set(&target.text, value, line)?;
        self.expect_end(pos + 1, end, "assignment", line)
    }

    fn expect_end(
        &self,
        pos: usize,
        end: usize,
        context: &'static str,
        line: Line,
    ) -> Result<usize, ScriptError> {
        match self.peek(pos, end) {
            Some(t) if t.kind == TokenKind::StatementEnd => Ok(pos + 1),
            _ => Err(ScriptError::syntax(
                SyntaxErrorKind::MissingTerminator(context),
                line,
            )),
        }
    }
}

fn literal_value(token: &Token) -> Result<i64, ScriptError> {
    token.text.parse().map_err(|_| {
        ScriptError::lex(
            LexErrorKind::IntegerOutOfRange(token.text.clone()),
            token.line,
        )
    })
}

fn unexpected(token: &Token) -> ScriptError {
    ScriptError::syntax(
        SyntaxErrorKind::UnexpectedToken(token.text.clone()),
        token.line,
    )
}
