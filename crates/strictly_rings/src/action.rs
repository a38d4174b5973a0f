//! First-class command and event types.
//!
//! Commands are what the presentation layer sends in; events are what an
//! accepted command did. Both are plain data and can be logged, recorded
//! and replayed.

use super::{Color, FieldId, InvalidState, PieceClass, PieceId, PieceRegistry, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player intent, one variant per kind of click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Command {
    /// Pick one of your own pieces, or an opponent piece as a swap target.
    #[display("select player piece {_0}")]
    SelectPlayerPiece(PieceId),
    /// Pick a field as destination.
    #[display("select field {_0}")]
    SelectField(FieldId),
    /// Pick a black piece to take over.
    #[display("select black piece {_0}")]
    SelectClassAPiece(PieceId),
    /// Pick a gray piece to capture.
    #[display("select gray piece {_0}")]
    SelectClassBPiece(PieceId),
    /// Drop the current selection and choose another piece.
    #[display("deselect")]
    Deselect,
}

impl Command {
    /// Builds the command for a click on `piece`, chosen by its color.
    #[instrument(skip(registry))]
    pub fn for_piece(registry: &PieceRegistry, piece: PieceId) -> Result<Self, InvalidState> {
        let color = registry.get(piece)?.color();
        Ok(match color.class() {
            PieceClass::Player => Command::SelectPlayerPiece(piece),
            PieceClass::Takeover => Command::SelectClassAPiece(piece),
            PieceClass::Capture => Command::SelectClassBPiece(piece),
        })
    }

    /// Short variant name used in rejections and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectPlayerPiece(_) => "SelectPlayerPiece",
            Command::SelectField(_) => "SelectField",
            Command::SelectClassAPiece(_) => "SelectClassAPiece",
            Command::SelectClassBPiece(_) => "SelectClassBPiece",
            Command::Deselect => "Deselect",
        }
    }
}

/// Something an accepted command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameEvent {
    /// A piece was selected for moving.
    #[display("piece {_0} selected")]
    Selected(PieceId),
    /// The selection was dropped.
    #[display("piece {_0} deselected")]
    Deselected(PieceId),
    /// A piece slid to an empty field.
    #[display("piece {piece} moved {from} -> {to}")]
    Moved {
        /// Moving piece.
        piece: PieceId,
        /// Field it left.
        from: FieldId,
        /// Field it reached.
        to: FieldId,
    },
    /// Two player pieces exchanged fields.
    #[display("piece {piece} swapped with {other}")]
    Swapped {
        /// Moving piece.
        piece: PieceId,
        /// Displaced opponent piece.
        other: PieceId,
    },
    /// A black piece was taken over.
    #[display("piece {piece} took over black {black} on {field}")]
    TakenOver {
        /// Moving piece.
        piece: PieceId,
        /// The black piece.
        black: PieceId,
        /// Field where it happened.
        field: FieldId,
    },
    /// A gray piece was captured.
    #[display("piece {piece} captured gray {gray} on {field}")]
    Captured {
        /// Moving piece.
        piece: PieceId,
        /// The captured gray piece.
        gray: PieceId,
        /// Field where it happened.
        field: FieldId,
    },
    /// A piece reached its home field and left the board.
    #[display("{color} piece {piece} of {player} scored on {field}")]
    Scored {
        /// Scoring piece.
        piece: PieceId,
        /// Its owner.
        player: Player,
        /// Its color.
        color: Color,
        /// Home field.
        field: FieldId,
    },
    /// A taken-over black piece was placed.
    #[display("black {piece} placed on {field}")]
    BlackPlaced {
        /// The black piece.
        piece: PieceId,
        /// Its new field.
        field: FieldId,
    },
    /// A gray marker was spawned.
    #[display("gray {piece} spawned on {field}")]
    Spawned {
        /// The new gray piece.
        piece: PieceId,
        /// Its field.
        field: FieldId,
    },
    /// The turn passed to the given player.
    #[display("turn passes to {_0}")]
    TurnPassed(Player),
}
