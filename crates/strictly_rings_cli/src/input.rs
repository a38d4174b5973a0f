//! Parsing of the line-based play protocol.

use derive_more::{Display, Error};
use std::str::FromStr;
use strictly_rings::{FieldId, PieceId};

/// One line typed by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// `piece <id>`: click on a piece.
    Piece(PieceId),
    /// `field <id>`: click on a field.
    Field(FieldId),
    /// `cancel`: drop the current selection.
    Cancel,
    /// `show`: print the board.
    Show,
    /// `highlight`: print the fields to highlight.
    Highlight,
    /// `quit`: leave the game.
    Quit,
}

/// A line that is not part of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct InputError {
    /// What was wrong with the line.
    pub message: String,
}

impl InputError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words
            .next()
            .ok_or_else(|| InputError::new("Empty input"))?
            .to_ascii_lowercase();

        let input = match keyword.as_str() {
            "piece" | "p" => Input::Piece(PieceId(number(words.next(), "piece")?)),
            "field" | "f" => Input::Field(FieldId(number(words.next(), "field")?)),
            "cancel" | "c" => Input::Cancel,
            "show" | "s" => Input::Show,
            "highlight" | "h" => Input::Highlight,
            "quit" | "q" | "exit" => Input::Quit,
            other => return Err(InputError::new(format!("Unknown command '{other}'"))),
        };

        match words.next() {
            Some(extra) => Err(InputError::new(format!("Unexpected argument '{extra}'"))),
            None => Ok(input),
        }
    }
}

fn number<T: FromStr>(word: Option<&str>, what: &str) -> Result<T, InputError> {
    let word = word.ok_or_else(|| InputError::new(format!("Missing {what} id")))?;
    word.parse()
        .map_err(|_| InputError::new(format!("Invalid {what} id '{word}'")))
}
