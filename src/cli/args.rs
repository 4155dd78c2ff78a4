//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert HTTP requests to and from curl commands
#[derive(Parser, Debug, Clone)]
#[command(name = "curlbridge", version, about, long_about = None)]
pub struct Args {
    /// Log filter (overrides RUST_LOG and the config file), e.g. "debug"
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// Directory holding config.toml
    #[arg(long, global = true, env = "CURLBRIDGE_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a curl command for structural problems
    Validate {
        /// curl command text ("-" reads stdin)
        command: String,
    },

    /// Parse a curl command and print the request as JSON
    Parse {
        /// curl command text ("-" reads stdin)
        command: String,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Generate a curl command from a request JSON file
    Generate {
        /// Request JSON file ("-" reads stdin)
        #[arg(short, long, default_value = "-", value_name = "FILE")]
        input: String,

        /// One option per line, joined with backslash continuations
        #[arg(short, long)]
        multiline: bool,

        /// Collection JSON used to resolve {{variables}} first
        #[arg(short, long, value_name = "FILE")]
        collection: Option<PathBuf>,

        /// Root of the secret store (defaults to the config's secrets dir)
        #[arg(long, value_name = "DIR")]
        secrets_dir: Option<PathBuf>,
    },

    /// Substitute {{variables}} in text using a collection's scope
    Resolve {
        /// Text to resolve ("-" reads stdin)
        text: String,

        /// Collection JSON file
        #[arg(short, long, value_name = "FILE")]
        collection: PathBuf,

        /// Root of the secret store (defaults to the config's secrets dir)
        #[arg(long, value_name = "DIR")]
        secrets_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let args = Args::try_parse_from(["curlbridge", "generate", "--multiline", "-c", "col.json"]).unwrap();
        match args.command {
            Command::Generate { input, multiline, collection, .. } => {
                assert_eq!(input, "-");
                assert!(multiline);
                assert_eq!(collection, Some(PathBuf::from("col.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
