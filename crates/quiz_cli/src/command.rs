//! Parsing of one REPL input line into a command.

use once_cell::sync::Lazy;
use quiz_core::QuizId;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+)(?:\s+(\S+))?").expect("valid command regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show(QuizId),
    Add,
    Delete(QuizId),
    Edit(QuizId),
    Test(QuizId),
    Play,
    Credits,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Command needs an `<id>` argument that was not given.
    MissingArgument(&'static str),
    InvalidId(String),
    Unknown(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument(command) => write!(f, "missing <id> argument for `{command}`"),
            Self::InvalidId(value) => write!(f, "`{value}` is not a valid quiz id"),
            Self::Unknown(name) => write!(f, "unknown command `{name}`; type `help` for the list"),
        }
    }
}

impl Error for CommandError {}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let Some(caps) = COMMAND_RE.captures(line) else {
        return Ok(None);
    };
    let name = caps[1].to_ascii_lowercase();
    let arg = caps.get(2).map(|m| m.as_str());

    let command = match name.as_str() {
        "h" | "help" => Command::Help,
        "list" => Command::List,
        "show" => Command::Show(require_id("show", arg)?),
        "add" => Command::Add,
        "delete" => Command::Delete(require_id("delete", arg)?),
        "edit" => Command::Edit(require_id("edit", arg)?),
        "test" => Command::Test(require_id("test", arg)?),
        "p" | "play" => Command::Play,
        "credits" => Command::Credits,
        "q" | "quit" => Command::Quit,
        _ => return Err(CommandError::Unknown(caps[1].to_string())),
    };
    Ok(Some(command))
}

fn require_id(command: &'static str, arg: Option<&str>) -> Result<QuizId, CommandError> {
    let value = arg.ok_or(CommandError::MissingArgument(command))?;
    value
        .parse::<QuizId>()
        .map_err(|_| CommandError::InvalidId(value.to_string()))
}
