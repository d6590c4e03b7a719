//! Hand-written lexer for `.ppp` scripts.
//!
//! Source is fed in one physical line at a time and every token keeps the
//! line it came from. The first bad character aborts the whole program;
//! there is no per-line recovery.
//
//  Lexical items:
//
//      Keyword    ::= number | write | repeat | times | newline | and
//      Ident      ::= [A-Za-z][A-Za-z0-9_]*
//      Integer    ::= '-'? [0-9]+
//      String     ::= '"' [^"]* '"'      (must close on the same line)
//      Operator   ::= ':=' | '+=' | '-='
//      Structural ::= ';' | '{' | '}'

use std::iter::Peekable;
use std::str::Chars;

use tracing::debug;

use crate::error::{LexErrorKind, Line, ScriptError};
use crate::model::{KEYWORDS, Program, Token, TokenKind};

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: Line,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str, line: Line) -> Self {
        Self {
            chars: src.chars().peekable(),
            line,
            failed: false,
        }
    }

    /// Whether the lexer stopped on an error.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        Token::new(kind, text, self.line)
    }

    fn fail(&mut self, kind: LexErrorKind) -> ScriptError {
        self.failed = true;
        ScriptError::lex(kind, self.line)
    }

    fn read_word(&mut self, first: char) -> Token {
        let mut word = String::new();
        word.push(first);
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_', &mut word);
        if KEYWORDS.contains(&word.as_str()) {
            self.token(TokenKind::Keyword, word)
        } else {
            self.token(TokenKind::Identifier, word)
        }
    }

    /// `first` is either a digit or a `-` already known to precede one.
    fn read_number(&mut self, first: char) -> Result<Token, ScriptError> {
        let mut num = String::new();
        num.push(first);
        self.consume_while(|c| c.is_ascii_digit(), &mut num);
        if num.parse::<i64>().is_err() {
            return Err(self.fail(LexErrorKind::IntegerOutOfRange(num)));
        }
        Ok(self.token(TokenKind::IntegerLiteral, num))
    }

    fn read_string(&mut self) -> Result<Token, ScriptError> {
        let mut txt = String::new();
        while let Some(c) = self.next_char() {
            if c == '"' {
                return Ok(self.token(TokenKind::StringLiteral, txt));
            }
            txt.push(c);
        }
        Err(self.fail(LexErrorKind::UnterminatedString))
    }

    fn read_operator(&mut self, first: char) -> Token {
        // second char is the '=' already checked by the caller
        self.next_char();
        self.token(TokenKind::Operator, format!("{first}="))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.skip_whitespace();
        let ch = self.next_char()?;

        let tok_res = match ch {
            ';' => Ok(self.token(TokenKind::StatementEnd, "EndOfLine")),
            '{' => Ok(self.token(TokenKind::BlockOpen, "OpenBlock")),
            '}' => Ok(self.token(TokenKind::BlockClose, "CloseBlock")),
            '"' => self.read_string(),
            ':' | '+' | '-' if self.peek_char() == Some('=') => Ok(self.read_operator(ch)),
            '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => self.read_number(ch),
            c if c.is_ascii_digit() => self.read_number(c),
            c if c.is_ascii_alphabetic() => Ok(self.read_word(c)),
            e => Err(self.fail(LexErrorKind::UnknownCharacter(e))),
        };

        Some(tok_res)
    }
}

/// Lex one physical line and append its tokens to `tokens`.
pub fn tokenize(line: &str, line_number: Line, tokens: &mut Vec<Token>) -> Result<(), ScriptError> {
    for token in Lexer::new(line, line_number) {
        tokens.push(token?);
    }
    Ok(())
}

/// Lex a whole source text, numbering lines from 1.
pub fn tokenize_source(src: &str) -> Result<Program, ScriptError> {
    let mut tokens = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        tokenize(line, idx + 1, &mut tokens)?;
    }
    debug!(tokens = tokens.len(), "lexing finished");
    Ok(Program { tokens })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, String)> {
        let program = tokenize_source(src).unwrap();
        program
            .tokens
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_tokenisation() {
        use TokenKind::*;
        let test_cases = vec![
            (
                "number x;",
                vec![
                    tok(Keyword, "number"),
                    tok(Identifier, "x"),
                    tok(StatementEnd, "EndOfLine"),
                ],
            ),
            (
                "write \"hi there\" and 5 newline;",
                vec![
                    tok(Keyword, "write"),
                    tok(StringLiteral, "hi there"),
                    tok(Keyword, "and"),
                    tok(IntegerLiteral, "5"),
                    tok(Keyword, "newline"),
                    tok(StatementEnd, "EndOfLine"),
                ],
            ),
            (
                "repeat n times { x += -3; }",
                vec![
                    tok(Keyword, "repeat"),
                    tok(Identifier, "n"),
                    tok(Keyword, "times"),
                    tok(BlockOpen, "OpenBlock"),
                    tok(Identifier, "x"),
                    tok(Operator, "+="),
                    tok(IntegerLiteral, "-3"),
                    tok(StatementEnd, "EndOfLine"),
                    tok(BlockClose, "CloseBlock"),
                ],
            ),
            (
                "a:=b;c-=12",
                vec![
                    tok(Identifier, "a"),
                    tok(Operator, ":="),
                    tok(Identifier, "b"),
                    tok(StatementEnd, "EndOfLine"),
                    tok(Identifier, "c"),
                    tok(Operator, "-="),
                    tok(IntegerLiteral, "12"),
                ],
            ),
            (
                "numbers write_2 Times",
                vec![
                    tok(Identifier, "numbers"),
                    tok(Identifier, "write_2"),
                    tok(Identifier, "Times"),
                ],
            ),
        ];

        for (src, expected) in test_cases {
            assert_eq!(kinds(src), expected, "lexing {src:?}");
        }
    }

    #[test]
    fn test_string_kept_verbatim() {
        let program = tokenize_source("write \"  a;{b} 1 \";").unwrap();
        assert_eq!(program.tokens[1].kind, TokenKind::StringLiteral);
        assert_eq!(program.tokens[1].text, "  a;{b} 1 ");
    }

    #[test]
    fn test_line_numbers() {
        let program = tokenize_source("number x;\n\n  write x;\n").unwrap();
        let lines: Vec<_> = program.tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 3, 3, 3]);
    }

    #[test]
    fn test_lex_errors() {
        let test_cases = vec![
            ("write \"oops;", LexErrorKind::UnterminatedString, 1),
            ("number x;\nx := 1 * 2;", LexErrorKind::UnknownCharacter('*'), 2),
            ("x : = 1;", LexErrorKind::UnknownCharacter(':'), 1),
            ("x = 1;", LexErrorKind::UnknownCharacter('='), 1),
            ("_x := 1;", LexErrorKind::UnknownCharacter('_'), 1),
            ("write - 1;", LexErrorKind::UnknownCharacter('-'), 1),
            (
                "x := 99999999999999999999;",
                LexErrorKind::IntegerOutOfRange("99999999999999999999".into()),
                1,
            ),
        ];

        for (src, expected_kind, expected_line) in test_cases {
            match tokenize_source(src) {
                Err(ScriptError::Lex { kind, line }) => {
                    assert_eq!(kind, expected_kind, "lexing {src:?}");
                    assert_eq!(line, expected_line, "lexing {src:?}");
                }
                other => panic!("expected lex error for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_lexer_stops_after_error() {
        let mut lexer = Lexer::new("@ x", 1);
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.has_failed());
        assert!(lexer.next().is_none());
    }
}
