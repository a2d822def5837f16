//! Identifier helpers.
//!
//! - **Validation**: length and character-set rules for keys and group keys
//! - **Case conversion**: `CamelCase` to `snake_case`

pub mod case;
pub mod validate;

pub use case::convert_camel_to_snake;
pub use validate::{KeyKind, KeyValidator, validate_group_key, validate_key};

/// Default maximum length of an ordinary key.
pub const DEFAULT_KEY_MAX_LENGTH: usize = 250;

/// Default maximum length of a group key.
pub const DEFAULT_GROUP_KEY_MAX_LENGTH: usize = 200;
