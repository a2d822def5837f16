//! Interactive yes/no prompts.
//!
//! [`ask_yesno`] works on any reader/writer pair so it can be driven from
//! tests. The timeout variants move the blocking read onto a worker thread
//! and wait for its answer on a channel with a deadline.

use crate::error::{PromptError, Result};
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const YES: [&str; 2] = ["yes", "y"];
const NO: [&str; 2] = ["no", "n"];
const RETRY_MESSAGE: &str = "Please respond with y/yes or n/no.";

/// Asks `question` until a yes/no answer is read from `input`.
///
/// Answers are case-insensitive and trimmed. An empty answer returns
/// `default` when one is given.
///
/// # Errors
///
/// [`PromptError::InputClosed`] if `input` ends first, [`PromptError::Io`]
/// if reading or writing fails.
///
/// # Examples
///
/// ```
/// use flow_helpers::prompt::ask_yesno;
///
/// let mut output = Vec::new();
/// let answer = ask_yesno("Continue?", None, &b"maybe\nY\n"[..], &mut output).unwrap();
/// assert!(answer);
/// ```
pub fn ask_yesno<R, W>(question: &str, default: Option<bool>, mut input: R, mut output: W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{question}").map_err(PromptError::from)?;
    output.flush().map_err(PromptError::from)?;

    let mut line = String::new();
    loop {
        line.clear();
        let read = input.read_line(&mut line).map_err(PromptError::from)?;
        if read == 0 {
            return Err(PromptError::InputClosed.into());
        }
        let choice = line.trim().to_lowercase();
        if choice.is_empty()
            && let Some(default) = default
        {
            return Ok(default);
        }
        if YES.contains(&choice.as_str()) {
            return Ok(true);
        }
        if NO.contains(&choice.as_str()) {
            return Ok(false);
        }
        writeln!(output, "{RETRY_MESSAGE}").map_err(PromptError::from)?;
        output.flush().map_err(PromptError::from)?;
    }
}

/// Asks `question` on the terminal and fails if no answer arrives in time.
///
/// # Errors
///
/// [`PromptError::Timeout`] when `timeout` elapses first, otherwise the
/// errors of [`ask_yesno`].
pub fn prompt_with_timeout(question: &str, timeout: Duration, default: Option<bool>) -> Result<bool> {
    let input = io::BufReader::new(io::stdin());
    ask_yesno_with_timeout(question, timeout, default, input, io::stdout())
}

/// [`prompt_with_timeout`] over arbitrary streams.
///
/// A zero `timeout` means no deadline: the question is asked inline with
/// [`ask_yesno`]. On timeout the worker thread is left blocked on its read; it exits once
/// the read returns and its answer is discarded.
///
/// # Errors
///
/// [`PromptError::Timeout`] when `timeout` elapses first, otherwise the
/// errors of [`ask_yesno`].
pub fn ask_yesno_with_timeout<R, W>(
    question: &str,
    timeout: Duration,
    default: Option<bool>,
    input: R,
    output: W,
) -> Result<bool>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    if timeout.is_zero() {
        return ask_yesno(question, default, input, output);
    }

    let (tx, rx) = mpsc::channel();
    let question = question.to_string();
    thread::Builder::new()
        .name("yesno-prompt".to_string())
        .spawn(move || {
            // The receiver is gone after a timeout
            let _ = tx.send(ask_yesno(&question, default, input, output));
        })
        .map_err(PromptError::from)?;

    match rx.recv_timeout(timeout) {
        Ok(answer) => answer,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "prompt timed out");
            Err(PromptError::Timeout {
                seconds: timeout.as_secs(),
            }
            .into())
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(PromptError::Io(
            "prompt worker exited without an answer".to_string(),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::{Cursor, Read};

    fn ask(answers: &str, default: Option<bool>) -> (Result<bool>, String) {
        let mut output = Vec::new();
        let result = ask_yesno("Proceed?", default, answers.as_bytes(), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        for answer in ["y\n", "yes\n", "YES\n", "  Y  \n"] {
            assert!(ask(answer, None).0.unwrap(), "answer {answer:?}");
        }
    }

    #[test]
    fn test_no_answers() {
        for answer in ["n\n", "no\n", "No\n"] {
            assert!(!ask(answer, None).0.unwrap(), "answer {answer:?}");
        }
    }

    #[test]
    fn test_empty_uses_default() {
        assert!(ask("\n", Some(true)).0.unwrap());
        assert!(!ask("\n", Some(false)).0.unwrap());
    }

    #[test]
    fn test_empty_without_default_retries() {
        let (result, output) = ask("\nyes\n", None);
        assert!(result.unwrap());
        assert_eq!(output, format!("Proceed?\n{RETRY_MESSAGE}\n"));
    }

    #[test]
    fn test_invalid_then_valid() {
        let (result, output) = ask("maybe\nsure\nn\n", None);
        assert!(!result.unwrap());
        assert_eq!(output.matches(RETRY_MESSAGE).count(), 2);
    }

    #[test]
    fn test_answer_without_trailing_newline() {
        assert!(ask("y", None).0.unwrap());
    }

    #[test]
    fn test_input_closed() {
        let (result, _) = ask("what\n", None);
        assert!(matches!(
            result,
            Err(Error::Prompt(PromptError::InputClosed))
        ));
    }

    #[test]
    fn test_with_timeout_answers_in_time() {
        let input = Cursor::new(b"yes\n".to_vec());
        let answer =
            ask_yesno_with_timeout("Go?", Duration::from_secs(5), None, input, io::sink()).unwrap();
        assert!(answer);
    }

    #[test]
    fn test_with_zero_timeout_waits_for_answer() {
        let input = Cursor::new(b"maybe\nyes\n".to_vec());
        let answer = ask_yesno_with_timeout("Go?", Duration::ZERO, None, input, io::sink()).unwrap();
        assert!(answer);
    }

    /// Reader that never produces data within the test's lifetime.
    struct Stalled;

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            thread::sleep(Duration::from_secs(2));
            Ok(0)
        }
    }

    #[test]
    fn test_with_timeout_expires() {
        let input = io::BufReader::new(Stalled);
        let err = ask_yesno_with_timeout("Go?", Duration::from_millis(50), Some(true), input, io::sink())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Prompt(PromptError::Timeout { seconds: 0 })
        ));
    }

    #[test]
    fn test_with_timeout_propagates_prompt_error() {
        let input = Cursor::new(Vec::new());
        let err = ask_yesno_with_timeout("Go?", Duration::from_secs(5), None, input, io::sink())
            .unwrap_err();
        assert!(matches!(err, Error::Prompt(PromptError::InputClosed)));
    }
}
