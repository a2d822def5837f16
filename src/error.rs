//! Error types for flow-helpers.
//!
//! Every helper fails fast on its first failing check. Each concern has its
//! own `thiserror` enum, and all of them fold into the crate-level [`Error`].

use thiserror::Error;

/// Result type alias for flow-helpers operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Key validation errors.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Chunking errors.
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Interactive prompt errors.
    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// Log filename template errors.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Key validation failures, in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The value handed in is not a string.
    #[error("the key has to be a string and is {found}: {value}")]
    NotAString {
        /// Type name of the value found.
        found: &'static str,
        /// Rendering of the offending value.
        value: String,
    },

    /// The key is longer than allowed.
    #[error("the key has to be less than {max_length} characters, got {length}")]
    TooLong {
        /// Length of the key in characters.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
    },

    /// The key contains characters outside its allowed set.
    #[error("the key ({key:?}) has to be made of {allowed} exclusively")]
    InvalidFormat {
        /// The rejected key.
        key: String,
        /// Human description of the allowed characters.
        allowed: &'static str,
    },
}

/// Chunking errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkingError {
    /// Chunk size is zero or negative.
    #[error("chunk size must be a positive integer, got {size}")]
    InvalidChunkSize {
        /// The rejected size.
        size: i64,
    },
}

/// Interactive prompt errors.
#[derive(Error, Debug)]
pub enum PromptError {
    /// No answer arrived before the deadline.
    #[error("timeout {seconds}s reached")]
    Timeout {
        /// The deadline in seconds.
        seconds: u64,
    },

    /// Input reached end of file before a valid answer.
    #[error("input closed before an answer was given")]
    InputClosed,

    /// Reading or writing the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(String),
}

/// Log filename template errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template engine failed to parse or render.
    #[error("render failed: {0}")]
    Render(String),

    /// A format placeholder has no value.
    #[error("unknown placeholder: {{{name}}}")]
    UnknownPlaceholder {
        /// Name inside the braces.
        name: String,
    },

    /// A placeholder's conversion or format spec cannot be applied.
    #[error("invalid format spec '{spec}' for placeholder {{{name}}}")]
    InvalidFormatSpec {
        /// Placeholder name.
        name: String,
        /// Text after the name, including the leading `!` or `:`.
        spec: String,
    },

    /// A `{` was never closed, or a lone `}` appeared.
    #[error("unbalanced brace at byte offset {offset}")]
    UnbalancedBrace {
        /// Byte offset of the brace.
        offset: usize,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input could not be decoded.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<tera::Error> for TemplateError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful detail in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::Render(message)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Command(err.into())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config {
            message: format!("invalid URL: {err}"),
        }
    }
}
