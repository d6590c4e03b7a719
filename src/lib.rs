pub mod cli;
pub mod error;
pub mod model;
pub mod processor;
pub mod source;
pub mod writer;

pub use error::ScriptError;
pub use model::{RunConfig, RunSummary};
pub use processor::interpret;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::model::DEFAULT_SOURCE;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    if args.input.is_none() {
        warn!("no file specified, defaulting to '{DEFAULT_SOURCE}'");
    }
    let path = args.source_path();

    // 1. ── Load ───────────────────────────────────────────────────────
    let src = source::load(&path)?;

    // 2. ── Lex ────────────────────────────────────────────────────────
    let program = processor::tokenize_source(&src)
        .with_context(|| format!("Lexing {}", path.display()))?;

    if let Some(dump) = &args.dump_tokens {
        writer::tokens::emit(&program, dump).with_context(|| "Dumping tokens")?;
    }

    // 3. ── Execute ────────────────────────────────────────────────────
    let stdout = std::io::stdout();
    let summary = processor::execute(&program, stdout.lock(), &args.run_config())
        .with_context(|| format!("Running {}", path.display()))?;

    info!(
        statements = summary.statements,
        variables = summary.variables.len(),
        "run complete"
    );
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` filter.
pub fn init_tracing() {
    use std::io::IsTerminal;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second call finds a subscriber already set; that is fine
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();
}
