//! Ownership invariant: player colors are owned, neutral colors are not.

use super::super::GameState;
use super::Invariant;

/// Invariant: a piece has an owner exactly when its color is a player color.
pub struct OwnershipInvariant;

impl Invariant<GameState> for OwnershipInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .pieces()
            .iter()
            .all(|piece| piece.owner().is_some() == piece.color().is_player_color())
    }

    fn description() -> &'static str {
        "Player colors are owned and neutral colors are not"
    }
}
