//! # flow-helpers
//!
//! Small, stateless helpers shared across a workflow orchestration codebase.
//!
//! ## Features
//!
//! - **Keys**: length and character-set validation for keys and group keys
//! - **Chunking**: lazy fixed-size chunks and reduction over whole chunks
//! - **Collections**: recursive non-destructive mapping merge, partitioning
//! - **Templates**: log filename rendering (template engine or plain format)
//! - **Web**: links to DAG views with urlencoded queries
//! - **Prompt**: yes/no questions with an optional deadline

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]

pub mod chunking;
pub mod cli;
pub mod collections;
pub mod error;
pub mod keys;
pub mod prompt;
pub mod template;
pub mod web;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

pub use chunking::{Chunks, checked_chunk_size, chunks, reduce_in_chunks, try_reduce_in_chunks};
pub use collections::{as_flattened_list, merge_dicts, merge_values, partition};
pub use keys::{
    DEFAULT_GROUP_KEY_MAX_LENGTH, DEFAULT_KEY_MAX_LENGTH, KeyKind, KeyValidator,
    convert_camel_to_snake, validate_group_key, validate_key,
};
pub use prompt::{ask_yesno, ask_yesno_with_timeout, prompt_with_timeout};
pub use template::{FilenameTemplate, TaskInstanceInfo, parse_template_string, render_log_filename};
pub use web::{WebConfig, build_url_with_query};

pub use cli::{Cli, Commands, OutputFormat};
