//! Complete mutable game state.

use super::{
    BoardGraph, FieldId, InvalidState, Obligations, Phase, Piece, PieceId, PieceRegistry, Player,
};
use std::sync::Arc;

/// Everything the automaton reads and writes.
///
/// The board graph is shared and never changes after construction; the
/// registry, phase, selection, obligations and turn fields are owned and
/// written only by accepted transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) graph: Arc<BoardGraph>,
    pub(crate) pieces: PieceRegistry,
    pub(crate) active: Player,
    pub(crate) phase: Phase,
    pub(crate) selected: Option<PieceId>,
    pub(crate) obligations: Obligations,
    pub(crate) turns: u32,
}

impl GameState {
    pub(crate) fn new(graph: Arc<BoardGraph>, pieces: PieceRegistry, active: Player) -> Self {
        Self {
            graph,
            pieces,
            active,
            phase: Phase::SelectPiece,
            selected: None,
            obligations: Obligations::default(),
            turns: 0,
        }
    }

    /// Returns the board graph.
    pub fn graph(&self) -> &BoardGraph {
        &self.graph
    }

    /// Returns the piece registry.
    pub fn pieces(&self) -> &PieceRegistry {
        &self.pieces
    }

    /// Returns the player whose turn it is.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the selected piece id, if any.
    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Returns the pending follow-ups.
    pub fn obligations(&self) -> Obligations {
        self.obligations
    }

    /// Number of completed turns.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Returns the selected piece, failing if the selection is missing or stale.
    pub(crate) fn selected_piece(&self) -> Result<&Piece, InvalidState> {
        let id = self
            .selected
            .ok_or_else(|| InvalidState::new(format!("No piece selected during {}", self.phase)))?;
        self.pieces.get(id)
    }

    /// Fails if `field` is not on the board.
    pub(crate) fn check_field(&self, field: FieldId) -> Result<(), InvalidState> {
        if self.graph.contains(field) {
            Ok(())
        } else {
            Err(InvalidState::unknown_field(field))
        }
    }
}
