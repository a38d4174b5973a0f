//! Serializable view of a game for the presentation layer.

use super::{Color, FieldId, GameState, Obligations, Phase, Piece, PieceId, Player};
use serde::Serialize;

/// One field with its geometry tags and current occupants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    /// Field id.
    pub id: FieldId,
    /// Ring number (0 is the outer ring).
    pub ring: usize,
    /// Position within the ring.
    pub index: usize,
    /// Adjacent fields.
    pub neighbors: Vec<FieldId>,
    /// Home color, if any.
    pub home: Option<Color>,
    /// Pieces on the field.
    pub occupants: Vec<PieceId>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Player to move.
    pub active_player: Player,
    /// Current phase.
    pub phase: Phase,
    /// Selected piece, if any.
    pub selected: Option<PieceId>,
    /// Pending follow-ups.
    pub obligations: Obligations,
    /// Completed turns.
    pub turns: u32,
    /// All fields in id order.
    pub fields: Vec<FieldView>,
    /// All live pieces in id order.
    pub pieces: Vec<Piece>,
}

impl Snapshot {
    pub(crate) fn of(state: &GameState) -> Self {
        let fields = state
            .graph()
            .fields()
            .map(|field| FieldView {
                id: field.id(),
                ring: field.ring(),
                index: field.index(),
                neighbors: field.neighbors().to_vec(),
                home: field.home(),
                occupants: state.pieces().occupants(field.id()).map(Piece::id).collect(),
            })
            .collect();

        Self {
            active_player: state.active_player(),
            phase: state.phase(),
            selected: state.selected(),
            obligations: state.obligations(),
            turns: state.turns(),
            fields,
            pieces: state.pieces().iter().cloned().collect(),
        }
    }
}
