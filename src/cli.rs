use clap::Parser;
use std::path::PathBuf;

use crate::model::{DEFAULT_SOURCE, RunConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Script to run (defaults to test.ppp)
    pub input: Option<PathBuf>,
    /// Write the token stream as JSON to this path (`-` for stderr)
    #[arg(long, value_name = "PATH")]
    pub dump_tokens: Option<PathBuf>,
    /// Fail once more than this many variables exist
    #[arg(long, value_name = "N")]
    pub max_vars: Option<usize>,
}

impl Cli {
    /// The script path, falling back to the default file.
    pub fn source_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE))
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            max_vars: self.max_vars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pppscript"]).unwrap();
        assert_eq!(cli.source_path(), PathBuf::from("test.ppp"));
        assert!(cli.dump_tokens.is_none());
        assert_eq!(cli.run_config().max_vars, None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "pppscript",
            "prog.ppp",
            "--dump-tokens",
            "-",
            "--max-vars",
            "100",
        ])
        .unwrap();
        assert_eq!(cli.source_path(), PathBuf::from("prog.ppp"));
        assert_eq!(cli.dump_tokens, Some(PathBuf::from("-")));
        assert_eq!(cli.run_config().max_vars, Some(100));
    }
}
