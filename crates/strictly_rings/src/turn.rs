//! Turn coordination.

use super::{GameEvent, GameState};
use tracing::{info, instrument};

/// Hands the turn to the other player.
///
/// Called only when `nextAction` finds no pending follow-up, so one call
/// closes exactly one turn however many phases it spanned.
#[instrument(skip(state), fields(from = %state.active))]
pub fn pass_turn(state: &mut GameState) -> GameEvent {
    state.active = state.active.opponent();
    state.turns += 1;
    info!(to = %state.active, turns = state.turns, "Turn passed");
    GameEvent::TurnPassed(state.active)
}
