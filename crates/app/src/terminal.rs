//! Operator terminal
//!
//! Menu flows talk to the operator only through [`Terminal`], so they can be
//! driven by scripted input in tests.

use std::{
    io::{self, Write},
    str::FromStr,
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input closed")]
    Closed,

    #[error("error reading input")]
    Io(#[from] io::Error),

    #[error("{value:?} is not a valid {expected}")]
    Invalid {
        value: String,
        expected: &'static str,
    },
}

#[async_trait]
pub trait Terminal: Send {
    /// Show `message` and read one line of input, without its line ending.
    async fn prompt_line(&mut self, message: &str) -> Result<String, InputError>;

    /// Print an informational line.
    fn say(&mut self, message: &str);

    /// Print a problem report.
    fn warn(&mut self, message: &str);
}

/// Prompt until a line is read, then parse it as `T`.
///
/// # Errors
///
/// Returns [`InputError::Invalid`] when the line does not parse.
pub async fn prompt_parsed<T: FromStr>(
    terminal: &mut (dyn Terminal + '_),
    message: &str,
    expected: &'static str,
) -> Result<T, InputError> {
    let line = terminal.prompt_line(message).await?;

    line.trim().parse().map_err(|_parse_error| InputError::Invalid {
        value: line,
        expected,
    })
}

/// Terminal bound to the process's standard streams.
#[derive(Debug)]
pub struct StdTerminal {
    lines: Lines<BufReader<Stdin>>,
}

impl StdTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Terminal for StdTerminal {
    async fn prompt_line(&mut self, message: &str) -> Result<String, InputError> {
        print!("{message}");
        io::stdout().flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim_end_matches('\r').to_string()),
            None => Err(InputError::Closed),
        }
    }

    fn say(&mut self, message: &str) {
        println!("{message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
