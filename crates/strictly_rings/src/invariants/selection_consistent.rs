//! Selection invariant: the selection and obligations match the phase.

use super::super::{Color, GameState, Phase};
use super::Invariant;

/// Invariant: phase, selected piece and pending follow-ups agree.
///
/// - A piece is selected exactly in `SelectPieceTarget` and
///   `SelectBlackTarget`.
/// - In `SelectPieceTarget` it belongs to the active player and nothing is
///   pending.
/// - In `SelectBlackTarget` it is black and a takeover is pending.
/// - In `SelectGrayTarget` only a spawn is pending.
/// - In `SelectPiece` nothing is pending.
pub struct SelectionConsistentInvariant;

impl Invariant<GameState> for SelectionConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let phase = state.phase();
        if state.selected().is_some() != phase.has_selection() {
            return false;
        }

        let obligations = state.obligations();
        match phase {
            Phase::SelectPiece => obligations.is_clear(),
            Phase::SelectPieceTarget => {
                obligations.is_clear()
                    && state
                        .selected_piece()
                        .is_ok_and(|p| p.is_owned_by(state.active_player()))
            }
            Phase::SelectBlackTarget => {
                obligations.takeover_pending
                    && state
                        .selected_piece()
                        .is_ok_and(|p| p.color() == Color::Black)
            }
            Phase::SelectGrayTarget => obligations.spawn_pending && !obligations.takeover_pending,
        }
    }

    fn description() -> &'static str {
        "Selection and pending follow-ups match the phase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, GameSetup, PieceId};

    #[test]
    fn test_holds_through_selection() {
        let mut game = GameSetup::default().start().unwrap();
        assert!(SelectionConsistentInvariant::holds(game.state()));

        game.apply(Command::SelectPlayerPiece(PieceId(0))).unwrap();
        assert!(SelectionConsistentInvariant::holds(game.state()));
    }

    #[test]
    fn test_pending_spawn_outside_gray_phase_violates() {
        let mut game = GameSetup::default().start().unwrap();
        game.state_mut().obligations.spawn_pending = true;
        assert!(!SelectionConsistentInvariant::holds(game.state()));
    }
}
