//! Error types for command application.
//!
//! Two kinds of failure exist. An [`IllegalCommand`] is a player mistake: the
//! guard of the current phase did not hold and nothing changed. An
//! [`InvalidState`] is an integration defect: an id that does not exist, or a
//! postcondition that failed after a transition.

use super::{Color, FieldId, Phase, PieceId, Player};
use derive_more::{Display, Error, From};
use tracing::instrument;

/// Guard failure of the phase automaton. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum IllegalCommand {
    /// The command is not accepted in the current phase.
    #[display("{command} is not accepted during {phase}")]
    WrongPhase {
        /// Phase the game was in.
        phase: Phase,
        /// Name of the rejected command.
        command: &'static str,
    },

    /// The piece belongs to the other player.
    #[display("Piece {_0} does not belong to player {_1}")]
    NotYourPiece(PieceId, Player),

    /// A neutral piece was offered where a player piece is required.
    #[display("Piece {_0} is neutral")]
    NeutralPiece(PieceId),

    /// Swapping requires an opponent piece.
    #[display("Piece {_0} is one of your own pieces")]
    OwnPiece(PieceId),

    /// The piece has the wrong color for this command.
    #[display("Piece {piece} is {actual}, expected {expected}")]
    WrongPieceClass {
        /// Offending piece.
        piece: PieceId,
        /// Its color.
        actual: Color,
        /// The color the command operates on.
        expected: Color,
    },

    /// The field cannot be reached from the selected piece.
    #[display("Field {_0} is not reachable")]
    Unreachable(FieldId),

    /// The field must be empty.
    #[display("Field {_0} is occupied")]
    FieldOccupied(FieldId),
}

impl std::error::Error for IllegalCommand {}

/// Violated core invariant or unknown reference, with caller location.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid state: {} at {}:{}", message, file, line)]
pub struct InvalidState {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidState {
    /// Creates a new invalid-state error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Unknown field id.
    #[track_caller]
    pub fn unknown_field(field: FieldId) -> Self {
        Self::new(format!("Unknown field {}", field))
    }

    /// Unknown piece id.
    #[track_caller]
    pub fn unknown_piece(piece: PieceId) -> Self {
        Self::new(format!("Unknown piece {}", piece))
    }
}

/// Error returned when a command cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum CommandError {
    /// The command was rejected; the game is unchanged.
    #[display("Illegal command: {_0}")]
    Illegal(IllegalCommand),

    /// The command referenced something that does not exist, or the
    /// transition broke an invariant. The game is unchanged.
    #[display("{_0}")]
    InvalidState(InvalidState),
}

impl CommandError {
    /// Returns true for recoverable player mistakes.
    pub fn is_illegal(&self) -> bool {
        matches!(self, CommandError::Illegal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_tracks_location() {
        let err = InvalidState::unknown_piece(PieceId(7));
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("Unknown piece 7"));
    }

    #[test]
    fn test_illegal_converts_into_command_error() {
        let err: CommandError = IllegalCommand::FieldOccupied(FieldId(3)).into();
        assert!(err.is_illegal());
        assert_eq!(err.to_string(), "Illegal command: Field 3 is occupied");
    }

    #[test]
    fn test_wrong_phase_message() {
        let err = IllegalCommand::WrongPhase {
            phase: Phase::SelectGrayTarget,
            command: "SelectPlayerPiece",
        };
        assert_eq!(
            err.to_string(),
            "SelectPlayerPiece is not accepted during SelectGrayTarget"
        );
    }
}
