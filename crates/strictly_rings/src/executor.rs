//! Primitive board mutations behind accepted transitions.
//!
//! Nothing here re-checks legality. The automaton classifies the move and
//! validates it first; these functions only relocate, remove and create
//! pieces and record follow-up obligations.

use super::{Color, FieldId, GameEvent, GameState, InvalidState, PieceId};
use tracing::{info, instrument};

/// How the acting piece interacts with its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Destination is empty.
    Advance,
    /// Destination holds an opponent piece; the two trade fields.
    Swap(PieceId),
    /// Destination holds a black piece, which is taken over.
    Takeover(PieceId),
    /// Destination holds a gray piece, which is captured.
    Capture(PieceId),
}

/// Moves `piece` to `target` according to `interaction`, then scores it
/// if it landed on its own home.
///
/// Takeover leaves the black piece on its field next to the acting piece
/// and moves the selection onto it.
#[instrument(skip(state))]
pub fn execute(
    state: &mut GameState,
    piece: PieceId,
    target: FieldId,
    interaction: Interaction,
) -> Result<Vec<GameEvent>, InvalidState> {
    let from = state.pieces.get(piece)?.field();
    let mut events = Vec::with_capacity(2);

    match interaction {
        Interaction::Advance => {
            state.pieces.relocate(piece, target)?;
            events.push(GameEvent::Moved {
                piece,
                from,
                to: target,
            });
        }
        Interaction::Swap(other) => {
            state.pieces.relocate(other, from)?;
            state.pieces.relocate(piece, target)?;
            events.push(GameEvent::Swapped { piece, other });
        }
        Interaction::Takeover(black) => {
            state.pieces.relocate(piece, target)?;
            state.selected = Some(black);
            state.obligations.takeover_pending = true;
            events.push(GameEvent::TakenOver {
                piece,
                black,
                field: target,
            });
        }
        Interaction::Capture(gray) => {
            state.pieces.remove(gray)?;
            state.pieces.relocate(piece, target)?;
            events.push(GameEvent::Captured {
                piece,
                gray,
                field: target,
            });
        }
    }

    if let Some(scored) = score(state, piece)? {
        events.push(scored);
    }
    Ok(events)
}

/// Removes `piece` if it is the active player's and stands on its home.
#[instrument(skip(state))]
fn score(state: &mut GameState, piece: PieceId) -> Result<Option<GameEvent>, InvalidState> {
    let current = state.pieces.get(piece)?;
    let field = current.field();
    let color = current.color();
    let home = state.graph.field(field)?.home();

    if !current.is_owned_by(state.active) || home != Some(color) {
        return Ok(None);
    }

    state.pieces.remove(piece)?;
    state.obligations.spawn_pending = true;
    info!(%piece, %color, %field, player = %state.active, "Piece scored");
    Ok(Some(GameEvent::Scored {
        piece,
        player: state.active,
        color,
        field,
    }))
}

/// Moves the taken-over black piece on and settles the takeover.
#[instrument(skip(state))]
pub fn place_black(
    state: &mut GameState,
    black: PieceId,
    target: FieldId,
) -> Result<GameEvent, InvalidState> {
    state.pieces.relocate(black, target)?;
    state.selected = None;
    state.obligations.takeover_pending = false;
    Ok(GameEvent::BlackPlaced {
        piece: black,
        field: target,
    })
}

/// Spawns the gray marker owed for a score.
#[instrument(skip(state))]
pub fn spawn_gray(state: &mut GameState, target: FieldId) -> Result<GameEvent, InvalidState> {
    let piece = state.pieces.create(Color::Gray, None, target)?;
    state.obligations.spawn_pending = false;
    Ok(GameEvent::Spawned {
        piece,
        field: target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardGraph, BoardLayout, PieceRegistry, Player};
    use std::sync::Arc;

    fn state() -> GameState {
        let graph = BoardGraph::new(BoardLayout::new(5, 5, 0).unwrap());
        let registry = PieceRegistry::new(graph.len());
        GameState::new(Arc::new(graph), registry, Player::A)
    }

    #[test]
    fn test_swap_trades_fields() {
        let mut state = state();
        let mine = state.pieces.create(Color::Red, Some(Player::A), FieldId(0)).unwrap();
        let theirs = state.pieces.create(Color::Red, Some(Player::B), FieldId(2)).unwrap();

        execute(&mut state, mine, FieldId(2), Interaction::Swap(theirs)).unwrap();

        assert_eq!(state.pieces.get(mine).unwrap().field(), FieldId(2));
        assert_eq!(state.pieces.get(theirs).unwrap().field(), FieldId(0));
    }

    #[test]
    fn test_takeover_coexists_and_retargets() {
        let mut state = state();
        let mine = state.pieces.create(Color::Red, Some(Player::A), FieldId(0)).unwrap();
        let black = state.pieces.create(Color::Black, None, FieldId(1)).unwrap();
        state.selected = Some(mine);

        execute(&mut state, mine, FieldId(1), Interaction::Takeover(black)).unwrap();

        assert_eq!(state.pieces.occupants(FieldId(1)).count(), 2);
        assert_eq!(state.selected, Some(black));
        assert!(state.obligations.takeover_pending);
    }

    #[test]
    fn test_capture_removes_gray() {
        let mut state = state();
        let mine = state.pieces.create(Color::Red, Some(Player::A), FieldId(0)).unwrap();
        let gray = state.pieces.create(Color::Gray, None, FieldId(4)).unwrap();

        let events = execute(&mut state, mine, FieldId(4), Interaction::Capture(gray)).unwrap();

        assert!(!state.pieces.contains(gray));
        assert_eq!(state.pieces.occupants(FieldId(4)).count(), 1);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_home_landing_scores() {
        let mut state = state();
        let home = state.graph.home_of(Color::Red).unwrap();
        let mine = state.pieces.create(Color::Red, Some(Player::A), FieldId(0)).unwrap();

        let events = execute(&mut state, mine, home, Interaction::Advance).unwrap();

        assert!(!state.pieces.contains(mine));
        assert!(state.obligations.spawn_pending);
        assert!(matches!(events.last(), Some(GameEvent::Scored { .. })));
    }

    #[test]
    fn test_foreign_home_does_not_score() {
        let mut state = state();
        let blue_home = state.graph.home_of(Color::Blue).unwrap();
        let mine = state.pieces.create(Color::Red, Some(Player::A), FieldId(0)).unwrap();

        execute(&mut state, mine, blue_home, Interaction::Advance).unwrap();

        assert!(state.pieces.contains(mine));
        assert!(state.obligations.is_clear());
    }

    #[test]
    fn test_spawn_gray_issues_fresh_id() {
        let mut state = state();
        let first = state.pieces.create(Color::Gray, None, FieldId(0)).unwrap();
        state.pieces.remove(first).unwrap();
        state.obligations.spawn_pending = true;

        let event = spawn_gray(&mut state, FieldId(3)).unwrap();

        assert_eq!(
            event,
            GameEvent::Spawned {
                piece: PieceId(1),
                field: FieldId(3)
            }
        );
        assert!(!state.obligations.spawn_pending);
    }
}
