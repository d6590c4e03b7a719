//! Dump the lexed token stream as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Program;

/// Write `program` to `path`, or to stderr when `path` is `-`.
pub fn emit(program: &Program, path: &Path) -> Result<()> {
    if path == Path::new("-") {
        let stderr = io::stderr();
        return write_json(program, stderr.lock());
    }
    let file = File::create(path).with_context(|| format!("Creating {}", path.display()))?;
    write_json(program, BufWriter::new(file))
        .with_context(|| format!("Writing tokens to {}", path.display()))
}

pub fn write_json<W: Write>(program: &Program, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, &program.tokens)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
