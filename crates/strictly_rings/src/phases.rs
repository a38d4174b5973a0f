//! Phases of the turn automaton and the epsilon dispatch between them.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// Caller-visible phase of the automaton.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Phase {
    /// Waiting for the active player to pick one of their pieces.
    #[default]
    SelectPiece,
    /// A piece is selected; waiting for its destination.
    SelectPieceTarget,
    /// A black piece was taken over; waiting for the empty field it moves to.
    SelectBlackTarget,
    /// A piece scored; waiting for the empty field that gets a gray marker.
    SelectGrayTarget,
}

impl Phase {
    /// Returns true in phases that carry a selected piece.
    pub fn has_selection(self) -> bool {
        matches!(self, Phase::SelectPieceTarget | Phase::SelectBlackTarget)
    }
}

/// Forced follow-ups recorded by a move and still to be played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obligations {
    /// A black piece was taken over and must be moved on.
    pub takeover_pending: bool,
    /// A piece scored and a gray marker must be spawned.
    pub spawn_pending: bool,
}

impl Obligations {
    /// Returns true when no follow-up is pending.
    pub fn is_clear(&self) -> bool {
        !self.takeover_pending && !self.spawn_pending
    }
}

/// Outcome of the `nextAction` epsilon transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Dispatch {
    /// Continue with relocating the taken-over black piece.
    BlackTarget,
    /// Continue with spawning a gray marker.
    GrayTarget,
    /// No follow-up left; the turn passes.
    EndTurn,
}

impl Dispatch {
    /// Phase the dispatch leads to.
    pub fn phase(self) -> Phase {
        match self {
            Dispatch::BlackTarget => Phase::SelectBlackTarget,
            Dispatch::GrayTarget => Phase::SelectGrayTarget,
            Dispatch::EndTurn => Phase::SelectPiece,
        }
    }
}

/// Decides what follows a completed move. Takeovers come before spawns.
#[instrument]
pub fn next_action(obligations: Obligations) -> Dispatch {
    if obligations.takeover_pending {
        Dispatch::BlackTarget
    } else if obligations.spawn_pending {
        Dispatch::GrayTarget
    } else {
        Dispatch::EndTurn
    }
}
