//! Line command parsing for the interactive front end.

use std::fmt::{Display, Formatter};
use todolist_core::{Filter, ItemId, ParseFilterError};

pub const USAGE: &str = "commands:
  add <text>          append a new item
  edit <id> <text>    replace item text (empty text keeps the old one)
  toggle <id>         flip completed
  rm <id>             delete an item
  toggle-all          complete all, or reopen all when all are completed
  clear               delete completed items
  undo | redo         move the last item to/from the undo buffer
  filter <all|active|completed>
  list | help | quit";

/// One user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit { id: ItemId, text: String },
    Toggle(ItemId),
    Remove(ItemId),
    ToggleAll,
    ClearCompleted,
    Undo,
    Redo,
    Filter(Filter),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidId(String),
    InvalidFilter(ParseFilterError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::Unknown(word) => write!(f, "unknown command `{word}`; type `help`"),
            Self::MissingArgument(name) => write!(f, "missing argument <{name}>"),
            Self::InvalidId(value) => write!(f, "invalid item id `{value}`"),
            Self::InvalidFilter(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one input line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim_start()));

    match word.to_ascii_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "edit" | "e" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(id, text)| (id, text.trim_start()));
            Ok(Command::Edit {
                id: parse_id(id)?,
                text: text.to_string(),
            })
        }
        "toggle" | "t" => Ok(Command::Toggle(parse_id(rest)?)),
        "rm" | "remove" | "delete" => Ok(Command::Remove(parse_id(rest)?)),
        "toggle-all" => Ok(Command::ToggleAll),
        "clear" | "clear-completed" => Ok(Command::ClearCompleted),
        "undo" | "u" => Ok(Command::Undo),
        "redo" | "r" => Ok(Command::Redo),
        "filter" | "f" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("filter"));
            }
            rest.parse()
                .map(Command::Filter)
                .map_err(ParseError::InvalidFilter)
        }
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn parse_id(value: &str) -> Result<ItemId, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseError::MissingArgument("id"));
    }
    value
        .parse::<i64>()
        .map(ItemId::new)
        .map_err(|_| ParseError::InvalidId(value.to_string()))
}
