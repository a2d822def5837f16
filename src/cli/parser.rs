//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::web::{DEFAULT_BASE_URL, DEFAULT_DAG_VIEW};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flow-helpers: validation, chunking and merge helpers for workflow tooling.
#[derive(Parser, Debug)]
#[command(name = "flow-helpers")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Webserver base URL used to build links.
    #[arg(long, env = "FLOW_HELPERS_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// DAG view links point at (tree, graph, duration, gantt, landing_times).
    #[arg(long, env = "FLOW_HELPERS_DAG_DEFAULT_VIEW", default_value = DEFAULT_DAG_VIEW, global = true)]
    pub default_view: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a key or group key.
    ValidateKey {
        /// The key to validate.
        key: String,

        /// Validate as a group key (no dots, max 200 characters).
        #[arg(short, long)]
        group: bool,

        /// Maximum length in characters (defaults to 250, or 200 for groups).
        #[arg(long)]
        max_length: Option<usize>,

        /// Parse the key as a JSON value and type-check it first.
        #[arg(long)]
        json: bool,
    },

    /// Split items into fixed-size chunks.
    Chunk {
        /// Number of items per chunk.
        #[arg(short, long, allow_negative_numbers = true)]
        size: i64,

        /// Items to chunk.
        items: Vec<String>,
    },

    /// Recursively merge an override JSON object onto a base JSON object.
    Merge {
        /// Base JSON file.
        base: PathBuf,

        /// Override JSON file.
        overrides: PathBuf,
    },

    /// Convert a CamelCase name to snake_case.
    CamelToSnake {
        /// Name to convert.
        name: String,
    },

    /// Render the log filename of a task try.
    LogFilename {
        /// DAG identifier.
        #[arg(long)]
        dag_id: String,

        /// Task identifier.
        #[arg(long)]
        task_id: String,

        /// Execution date (RFC 3339).
        #[arg(long)]
        execution_date: String,

        /// Try number.
        #[arg(long, default_value = "1")]
        try_number: u32,

        /// Filename template (engine syntax if it contains `{{`).
        #[arg(long, default_value = crate::template::DEFAULT_LOG_FILENAME_TEMPLATE)]
        template: String,
    },

    /// Build a link to the default DAG view.
    Url {
        /// Query parameters as key=value pairs.
        params: Vec<String>,
    },

    /// Ask a yes/no question on the terminal.
    Ask {
        /// The question to ask.
        question: String,

        /// Give up after this many seconds.
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Answer used for an empty reply (yes or no).
        #[arg(short, long)]
        default: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chunk_accepts_negative_size() {
        let cli = Cli::try_parse_from(["flow-helpers", "chunk", "--size", "-1", "a", "b"]).unwrap();
        assert!(matches!(cli.command, Commands::Chunk { size: -1, .. }));
    }

    #[test]
    fn test_global_defaults() {
        let cli = Cli::try_parse_from(["flow-helpers", "camel-to-snake", "FooBar"]).unwrap();
        assert_eq!(cli.format, "text");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_validate_key_flags() {
        let cli = Cli::try_parse_from([
            "flow-helpers",
            "validate-key",
            "--group",
            "--max-length",
            "10",
            "grp",
        ])
        .unwrap();
        match cli.command {
            Commands::ValidateKey {
                key,
                group,
                max_length,
                json,
            } => {
                assert_eq!(key, "grp");
                assert!(group);
                assert_eq!(max_length, Some(10));
                assert!(!json);
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }
}
