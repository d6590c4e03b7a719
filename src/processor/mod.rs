//! The functional core: source text in, side effects on a variable store
//! and an output stream out.
pub mod block;
pub mod interpreter;
pub mod lexer;
pub mod vars;

pub use interpreter::Interpreter;
pub use lexer::tokenize_source;

use std::io::Write;

use crate::error::ScriptError;
use crate::model::{Program, RunConfig, RunSummary};

/// Lex `source` completely, then execute it against `out`.
pub fn interpret<W: Write>(
    source: &str,
    out: W,
    config: &RunConfig,
) -> Result<RunSummary, ScriptError> {
    let program = tokenize_source(source)?;
    execute(&program, out, config)
}

/// Execute an already lexed program.
pub fn execute<W: Write>(
    program: &Program,
    out: W,
    config: &RunConfig,
) -> Result<RunSummary, ScriptError> {
    let mut interp = Interpreter::new(program, out, config);
    interp.run()?;
    Ok(interp.summary())
}
