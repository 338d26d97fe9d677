use poker_table::entities::{Action, Usd};
use std::fmt;

/// What the player typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TakeAction(Action),
    /// Print the current hand and choices again.
    Show,
    Help,
    /// Fold this hand and leave after it.
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid raise amount (not a valid number).
    InvalidRaiseAmount(String),
    /// Raise without a target.
    MissingRaiseAmount,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRaiseAmount(value) => write!(
                f,
                "Invalid raise amount '{value}'. Must be a positive number (e.g., 'raise 100')"
            ),
            Self::MissingRaiseAmount => {
                write!(f, "Raise needs the new bet to raise to (e.g., 'raise 100')")
            }
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
Commands:
  check         Stay in without betting
  call          Match the current bet
  fold          Give up the hand
  raise N       Raise the bet to N
  show          Show your cards and choices again
  quit          Fold and leave after this hand";

/// Parse a command string into a [`Command`].
///
/// # Examples
///
/// ```
/// use pt_cli::commands::{Command, parse_command};
/// use poker_table::entities::Action;
///
/// assert_eq!(parse_command("call"), Ok(Command::TakeAction(Action::Call)));
/// assert_eq!(parse_command("raise 100"), Ok(Command::TakeAction(Action::Raise(100))));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let lowered = trimmed.to_ascii_lowercase();

    // Try single-word commands first
    match lowered.as_str() {
        "call" | "c" => return Ok(Command::TakeAction(Action::Call)),
        "check" | "k" => return Ok(Command::TakeAction(Action::Check)),
        "fold" | "f" => return Ok(Command::TakeAction(Action::Fold)),
        "show" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = lowered.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"raise") | Some(&"r") => parse_raise_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a raise command: "raise AMOUNT"
fn parse_raise_command(parts: &[&str]) -> Result<Command, ParseError> {
    let value = parts.get(1).ok_or(ParseError::MissingRaiseAmount)?;
    let amount = value
        .parse::<Usd>()
        .map_err(|_| ParseError::InvalidRaiseAmount(value.to_string()))?;
    Ok(Command::TakeAction(Action::Raise(amount)))
}
