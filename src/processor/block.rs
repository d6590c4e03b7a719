//! Locating the `}` that closes a block.

use crate::error::{ScriptError, SyntaxErrorKind};
use crate::model::{Token, TokenKind};

/// Find the end of the block whose `{` sits just before `start`.
///
/// Only `tokens[..end]` is scanned. Returns the index just past the
/// matching `}`, so the body is `start..returned - 1`.
pub fn find_block_end(tokens: &[Token], start: usize, end: usize) -> Result<usize, ScriptError> {
    let end = end.min(tokens.len());
    let mut depth = 1usize;
    let mut pos = start;
    while pos < end {
        match tokens[pos].kind {
            TokenKind::BlockOpen => depth += 1,
            TokenKind::BlockClose => depth -= 1,
            _ => {}
        }
        pos += 1;
        if depth == 0 {
            return Ok(pos);
        }
    }

    let line = tokens[..end]
        .last()
        .or_else(|| start.checked_sub(1).and_then(|i| tokens.get(i)))
        .map_or(0, |t| t.line);
    Err(ScriptError::syntax(SyntaxErrorKind::UnclosedBlock, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::lexer::tokenize_source;

    #[test]
    fn test_find_block_end() {
        // (source, start, expected end)
        let test_cases = vec![
            ("{ }", 1, 2),
            ("{ write 1; } write 2;", 1, 5),
            ("{ repeat 2 times { write 1; } write 2; } ;", 1, 13),
            ("{ { { } } }", 1, 6),
        ];

        for (src, start, expected) in test_cases {
            let program = tokenize_source(src).unwrap();
            let res = find_block_end(&program.tokens, start, program.len());
            assert_eq!(res.unwrap(), expected, "block in {src:?}");
        }
    }

    #[test]
    fn test_unclosed_block() {
        let program = tokenize_source("{\n write 1;\n { write 2; }\n").unwrap();
        match find_block_end(&program.tokens, 1, program.len()) {
            Err(ScriptError::Syntax { kind, line }) => {
                assert_eq!(kind, SyntaxErrorKind::UnclosedBlock);
                assert_eq!(line, 3);
            }
            other => panic!("expected unclosed block, got {other:?}"),
        }
    }

    #[test]
    fn test_search_bounded_by_end() {
        let program = tokenize_source("{ write 1; } }").unwrap();
        // the closing brace lies outside the scanned range
        assert!(find_block_end(&program.tokens, 1, 3).is_err());
    }
}
