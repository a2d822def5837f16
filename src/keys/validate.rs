//! Key validation.
//!
//! Keys identify things that get persisted (task ids, variable names, group
//! ids) and must fit both a length limit and a character set. Checks run in a
//! fixed order (type, length, format) and stop at the first failure.

use crate::error::{KeyError, Result};
use crate::keys::{DEFAULT_GROUP_KEY_MAX_LENGTH, DEFAULT_KEY_MAX_LENGTH};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// Word characters are letters, numerics (including `No`, like `²`) and `_`.
// Not `\w`, which also matches combining marks and connector punctuation.
#[allow(clippy::expect_used)]
static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[\p{L}\p{N}_.-]+\z").expect("valid regex"));

#[allow(clippy::expect_used)]
static GROUP_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[\p{L}\p{N}_-]+\z").expect("valid regex"));

/// Which character set a key must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Word characters, dots and dashes.
    Key,
    /// Word characters and dashes. No dots.
    GroupKey,
}

impl KeyKind {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Key => LazyLock::force(&KEY_REGEX),
            Self::GroupKey => LazyLock::force(&GROUP_KEY_REGEX),
        }
    }

    const fn allowed(self) -> &'static str {
        match self {
            Self::Key => "alphanumeric characters, dashes, dots and underscores",
            Self::GroupKey => "alphanumeric characters, dashes and underscores",
        }
    }

    /// Default maximum length for this kind.
    #[must_use]
    pub const fn default_max_length(self) -> usize {
        match self {
            Self::Key => DEFAULT_KEY_MAX_LENGTH,
            Self::GroupKey => DEFAULT_GROUP_KEY_MAX_LENGTH,
        }
    }
}

/// Validates keys against a length limit and a character set.
///
/// # Examples
///
/// ```
/// use flow_helpers::keys::KeyValidator;
///
/// let validator = KeyValidator::group_key().max_length(20);
/// assert!(validator.validate("section_1").is_ok());
/// assert!(validator.validate("section.1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValidator {
    kind: KeyKind,
    max_length: usize,
}

impl KeyValidator {
    /// Validator for ordinary keys (max 250 characters).
    #[must_use]
    pub const fn key() -> Self {
        Self::for_kind(KeyKind::Key)
    }

    /// Validator for group keys (max 200 characters).
    #[must_use]
    pub const fn group_key() -> Self {
        Self::for_kind(KeyKind::GroupKey)
    }

    /// Validator for `kind` with its default length limit.
    #[must_use]
    pub const fn for_kind(kind: KeyKind) -> Self {
        Self {
            kind,
            max_length: kind.default_max_length(),
        }
    }

    /// Sets the maximum length, counted in characters.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Returns the kind of key this validator checks.
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Validates a key.
    ///
    /// # Errors
    ///
    /// [`KeyError::TooLong`] when the key has more than `max_length`
    /// characters, otherwise [`KeyError::InvalidFormat`] when any character is
    /// outside the allowed set (the empty key included).
    pub fn validate(&self, key: &str) -> Result<()> {
        let length = key.chars().count();
        if length > self.max_length {
            return Err(KeyError::TooLong {
                length,
                max_length: self.max_length,
            }
            .into());
        }
        if !self.kind.regex().is_match(key) {
            return Err(KeyError::InvalidFormat {
                key: key.to_string(),
                allowed: self.kind.allowed(),
            }
            .into());
        }
        Ok(())
    }

    /// Validates an untyped value, such as one read from a JSON document.
    ///
    /// # Errors
    ///
    /// [`KeyError::NotAString`] when `value` is not a string, then the same
    /// errors as [`KeyValidator::validate`].
    pub fn validate_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::String(key) => self.validate(key),
            other => Err(KeyError::NotAString {
                found: json_type_name(other),
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self::key()
    }
}

/// Validates a value used as a key.
///
/// # Examples
///
/// ```
/// use flow_helpers::keys::{DEFAULT_KEY_MAX_LENGTH, validate_key};
///
/// assert!(validate_key("my_dag.task-1", DEFAULT_KEY_MAX_LENGTH).is_ok());
/// assert!(validate_key("my dag", DEFAULT_KEY_MAX_LENGTH).is_err());
/// ```
pub fn validate_key(key: &str, max_length: usize) -> Result<()> {
    KeyValidator::key().max_length(max_length).validate(key)
}

/// Validates a value used as a group key.
pub fn validate_group_key(key: &str, max_length: usize) -> Result<()> {
    KeyValidator::group_key().max_length(max_length).validate(key)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("task_1" ; "underscore")]
    #[test_case("my-dag" ; "dash")]
    #[test_case("my.dag.task" ; "dots")]
    #[test_case("Über_tâche" ; "unicode word characters")]
    #[test_case("0" ; "single digit")]
    #[test_case("x²" ; "superscript numeric")]
    #[test_case("a½" ; "vulgar fraction")]
    fn test_valid_keys(key: &str) {
        assert!(validate_key(key, DEFAULT_KEY_MAX_LENGTH).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("with space" ; "space")]
    #[test_case("slash/key" ; "slash")]
    #[test_case("key\n" ; "trailing newline")]
    #[test_case("semi;colon" ; "semicolon")]
    #[test_case("e\u{301}" ; "combining mark")]
    #[test_case("a\u{203f}b" ; "connector punctuation")]
    fn test_invalid_key_format(key: &str) {
        let err = validate_key(key, DEFAULT_KEY_MAX_LENGTH).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::InvalidFormat { .. })));
    }

    #[test]
    fn test_key_at_max_length() {
        let key = "a".repeat(DEFAULT_KEY_MAX_LENGTH);
        assert!(validate_key(&key, DEFAULT_KEY_MAX_LENGTH).is_ok());
    }

    #[test]
    fn test_key_too_long() {
        let key = "a".repeat(DEFAULT_KEY_MAX_LENGTH + 1);
        let err = validate_key(&key, DEFAULT_KEY_MAX_LENGTH).unwrap_err();
        assert!(matches!(
            err,
            Error::Key(KeyError::TooLong {
                length: 251,
                max_length: 250
            })
        ));
    }

    #[test]
    fn test_length_checked_before_format() {
        // Both too long and malformed: length wins
        let key = " ".repeat(11);
        let err = validate_key(&key, 10).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::TooLong { .. })));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert!(validate_key("éééé", 4).is_ok());
    }

    #[test]
    fn test_group_key_rejects_dot() {
        assert!(validate_key("group.child", DEFAULT_KEY_MAX_LENGTH).is_ok());
        let err = validate_group_key("group.child", DEFAULT_GROUP_KEY_MAX_LENGTH).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::InvalidFormat { .. })));
    }

    #[test]
    fn test_group_key_default_max_length() {
        let validator = KeyValidator::group_key();
        assert!(validator.validate(&"g".repeat(200)).is_ok());
        assert!(validator.validate(&"g".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_value_type_check() {
        let validator = KeyValidator::key();
        let err = validator.validate_value(&json!(42)).unwrap_err();
        assert!(matches!(
            err,
            Error::Key(KeyError::NotAString {
                found: "number",
                ..
            })
        ));

        let err = validator.validate_value(&json!(["a"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Key(KeyError::NotAString { found: "array", .. })
        ));

        assert!(validator.validate_value(&json!("valid.key")).is_ok());
    }

    #[test]
    fn test_validate_value_type_checked_first() {
        // A null is a type error even with a zero length limit
        let validator = KeyValidator::key().max_length(0);
        let err = validator.validate_value(&Value::Null).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::NotAString { .. })));
    }

    #[test]
    fn test_default_validator() {
        let validator = KeyValidator::default();
        assert_eq!(validator.kind(), KeyKind::Key);
        assert_eq!(validator, KeyValidator::key());
    }

    #[test]
    fn test_format_error_mentions_allowed_set() {
        let err = validate_group_key("a.b", 10).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"a.b\""));
        assert!(!message.contains("dots"));
    }
}
