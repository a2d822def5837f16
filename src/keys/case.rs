//! Case conversion.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+").expect("valid regex"));

/// Converts `CamelCase` to `snake_case`.
///
/// Each run of ASCII capitals gets an underscore in front of it, except at
/// the very start of the string, and the result is lowercased. A leading run
/// keeps only its first letter unprefixed.
///
/// # Examples
///
/// ```
/// use flow_helpers::keys::convert_camel_to_snake;
///
/// assert_eq!(convert_camel_to_snake("LocalTaskJob"), "local_task_job");
/// assert_eq!(convert_camel_to_snake("HTTPServer"), "h_ttpserver");
/// ```
#[must_use]
pub fn convert_camel_to_snake(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    let mut last = 0;
    for run in UPPERCASE_RUN.find_iter(camel) {
        snake.push_str(&camel[last..run.start()]);
        let text = run.as_str();
        if run.start() == 0 {
            // ASCII capitals, so one byte each
            snake.push_str(&text[..1]);
            if text.len() > 1 {
                snake.push('_');
                snake.push_str(&text[1..]);
            }
        } else {
            snake.push('_');
            snake.push_str(text);
        }
        last = run.end();
    }
    snake.push_str(&camel[last..]);
    snake.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("CamelCase", "camel_case")]
    #[test_case("camelCase", "camel_case")]
    #[test_case("SequentialExecutor", "sequential_executor")]
    #[test_case("already_snake", "already_snake")]
    #[test_case("HTTPServer", "h_ttpserver")]
    #[test_case("getHTTPResponse", "get_httpresponse")]
    #[test_case("A", "a")]
    #[test_case("", "")]
    fn test_convert_camel_to_snake(input: &str, expected: &str) {
        assert_eq!(convert_camel_to_snake(input), expected);
    }

    #[test]
    fn test_non_ascii_capitals_not_split() {
        assert_eq!(convert_camel_to_snake("ÉtatMachine"), "état_machine");
    }
}
