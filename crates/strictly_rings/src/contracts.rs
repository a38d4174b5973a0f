//! Contract-based validation for commands.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, command)} transition {Q(before, after)}`. The precondition
//! also classifies the command into the [`Step`] the automaton will run.

use super::executor::Interaction;
use super::invariants::{InvariantSet, RingsInvariants};
use super::reachability::reachable;
use super::{
    Color, Command, CommandError, FieldId, GameState, IllegalCommand, InvalidState, Phase, Piece,
    PieceId, Player,
};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// What a satisfied precondition tells the caller to do.
    type Plan;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Plan, CommandError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), CommandError>;
}

/// A validated unit of work for the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Select a piece of the active player.
    Select(PieceId),
    /// Drop the current selection.
    Deselect(PieceId),
    /// Move the selected piece.
    Move {
        /// The selected piece.
        piece: PieceId,
        /// Destination field.
        target: FieldId,
        /// What happens to the destination's occupant.
        interaction: Interaction,
    },
    /// Relocate the taken-over black piece.
    PlaceBlack {
        /// The black piece.
        black: PieceId,
        /// Destination field.
        target: FieldId,
    },
    /// Spawn a gray marker.
    SpawnGray(FieldId),
}

// ─────────────────────────────────────────────────────────────
//  Command Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the piece belongs to the active player.
pub struct OwnedByActive;

impl OwnedByActive {
    /// Checks ownership against `player`.
    pub fn check(piece: &Piece, player: Player) -> Result<(), IllegalCommand> {
        match piece.owner() {
            None => Err(IllegalCommand::NeutralPiece(piece.id())),
            Some(owner) if owner != player => Err(IllegalCommand::NotYourPiece(piece.id(), player)),
            Some(_) => Ok(()),
        }
    }
}

/// Precondition: the piece belongs to the opponent of `player`.
pub struct OpponentPiece;

impl OpponentPiece {
    /// Checks ownership against the opponent of `player`.
    pub fn check(piece: &Piece, player: Player) -> Result<(), IllegalCommand> {
        match piece.owner() {
            None => Err(IllegalCommand::NeutralPiece(piece.id())),
            Some(owner) if owner == player => Err(IllegalCommand::OwnPiece(piece.id())),
            Some(_) => Ok(()),
        }
    }
}

/// Precondition: the piece has the given neutral color.
pub struct HasColor;

impl HasColor {
    /// Checks the piece color.
    pub fn check(piece: &Piece, expected: Color) -> Result<(), IllegalCommand> {
        if piece.color() == expected {
            Ok(())
        } else {
            Err(IllegalCommand::WrongPieceClass {
                piece: piece.id(),
                actual: piece.color(),
                expected,
            })
        }
    }
}

/// Precondition: the field is on the board and empty.
pub struct FieldIsEmpty;

impl FieldIsEmpty {
    /// Checks that nothing stands on `field`.
    pub fn check(state: &GameState, field: FieldId) -> Result<(), CommandError> {
        state.check_field(field)?;
        if state.pieces().is_occupied(field) {
            Err(IllegalCommand::FieldOccupied(field).into())
        } else {
            Ok(())
        }
    }
}

/// Precondition: the field is reachable from the selected piece.
pub struct WithinReach;

impl WithinReach {
    /// Checks `field` against the reachable set of the selected piece.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, field: FieldId) -> Result<(), CommandError> {
        let origin = state.selected_piece()?.field();
        if reachable(state.graph(), state.pieces(), origin)?.contains(&field) {
            Ok(())
        } else {
            Err(IllegalCommand::Unreachable(field).into())
        }
    }
}

/// Composite precondition: the command is legal in the current phase.
///
/// Every `(phase, command)` pair is listed; anything not listed is a
/// wrong-phase rejection.
pub struct LegalCommand;

impl LegalCommand {
    /// Validates the command and classifies it.
    #[instrument(skip(state), fields(phase = %state.phase()))]
    pub fn check(state: &GameState, command: &Command) -> Result<Step, CommandError> {
        let active = state.active_player();
        let step = match (state.phase(), *command) {
            (Phase::SelectPiece, Command::SelectPlayerPiece(id)) => {
                OwnedByActive::check(state.pieces().get(id)?, active)?;
                Step::Select(id)
            }
            (Phase::SelectPieceTarget, Command::SelectField(field)) => {
                FieldIsEmpty::check(state, field)?;
                WithinReach::check(state, field)?;
                moving(state, field, Interaction::Advance)?
            }
            (Phase::SelectPieceTarget, Command::SelectPlayerPiece(id)) => {
                let other = state.pieces().get(id)?;
                OpponentPiece::check(other, active)?;
                WithinReach::check(state, other.field())?;
                moving(state, other.field(), Interaction::Swap(id))?
            }
            (Phase::SelectPieceTarget, Command::SelectClassAPiece(id)) => {
                let black = state.pieces().get(id)?;
                HasColor::check(black, Color::Black)?;
                WithinReach::check(state, black.field())?;
                moving(state, black.field(), Interaction::Takeover(id))?
            }
            (Phase::SelectPieceTarget, Command::SelectClassBPiece(id)) => {
                let gray = state.pieces().get(id)?;
                HasColor::check(gray, Color::Gray)?;
                WithinReach::check(state, gray.field())?;
                moving(state, gray.field(), Interaction::Capture(id))?
            }
            (Phase::SelectPieceTarget, Command::Deselect) => {
                Step::Deselect(state.selected_piece()?.id())
            }
            (Phase::SelectBlackTarget, Command::SelectField(field)) => {
                FieldIsEmpty::check(state, field)?;
                Step::PlaceBlack {
                    black: state.selected_piece()?.id(),
                    target: field,
                }
            }
            (Phase::SelectGrayTarget, Command::SelectField(field)) => {
                FieldIsEmpty::check(state, field)?;
                Step::SpawnGray(field)
            }
            (phase, command) => {
                return Err(IllegalCommand::WrongPhase {
                    phase,
                    command: command.name(),
                }
                .into());
            }
        };
        Ok(step)
    }
}

fn moving(
    state: &GameState,
    target: FieldId,
    interaction: Interaction,
) -> Result<Step, InvalidState> {
    Ok(Step::Move {
        piece: state.selected_piece()?.id(),
        target,
        interaction,
    })
}

// ─────────────────────────────────────────────────────────────
//  Transition Postconditions
// ─────────────────────────────────────────────────────────────

/// Precondition/postcondition pair for every command.
///
/// Postconditions:
/// - All [`RingsInvariants`] hold
/// - The active player changes only together with a return to
///   `SelectPiece`, and exactly one turn is counted for it
/// - Piece ids never go backwards
pub struct CommandContract;

impl Contract<GameState, Command> for CommandContract {
    type Plan = Step;

    fn pre(state: &GameState, command: &Command) -> Result<Step, CommandError> {
        LegalCommand::check(state, command)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), CommandError> {
        let mut failures: Vec<String> = match RingsInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations.into_iter().map(|v| v.description).collect(),
        };

        let swapped = before.active_player() != after.active_player();
        let expected_turns = before.turns() + u32::from(swapped);
        if after.turns() != expected_turns {
            failures.push(format!(
                "Turn counter moved from {} to {}",
                before.turns(),
                after.turns()
            ));
        }
        if swapped && after.phase() != Phase::SelectPiece {
            failures.push(format!("Player swapped while entering {}", after.phase()));
        }
        if after.pieces().next_id() < before.pieces().next_id() {
            failures.push("Piece ids went backwards".to_string());
        }

        if failures.is_empty() {
            Ok(())
        } else {
            warn!(?failures, "Postcondition failed");
            Err(InvalidState::new(format!("Postcondition failed: {}", failures.join("; "))).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameSetup;

    #[test]
    fn test_precondition_selects_own_piece() {
        let game = GameSetup::default().start().unwrap();
        let step = CommandContract::pre(game.state(), &Command::SelectPlayerPiece(PieceId(0)));
        assert_eq!(step, Ok(Step::Select(PieceId(0))));
    }

    #[test]
    fn test_precondition_wrong_owner() {
        let game = GameSetup::default().start().unwrap();
        // Piece 1 is player B's white piece.
        let result = CommandContract::pre(game.state(), &Command::SelectPlayerPiece(PieceId(1)));
        assert!(matches!(
            result,
            Err(CommandError::Illegal(IllegalCommand::NotYourPiece(_, Player::A)))
        ));
    }

    #[test]
    fn test_precondition_neutral_piece() {
        let game = GameSetup::default().start().unwrap();
        let result = CommandContract::pre(game.state(), &Command::SelectPlayerPiece(PieceId(10)));
        assert!(matches!(
            result,
            Err(CommandError::Illegal(IllegalCommand::NeutralPiece(_)))
        ));
    }

    #[test]
    fn test_precondition_wrong_phase_before_lookup() {
        let game = GameSetup::default().start().unwrap();
        // Unknown ids still get a phase rejection first.
        let result = CommandContract::pre(game.state(), &Command::SelectField(FieldId(999)));
        assert!(matches!(
            result,
            Err(CommandError::Illegal(IllegalCommand::WrongPhase { .. }))
        ));
    }

    #[test]
    fn test_precondition_unknown_piece() {
        let game = GameSetup::default().start().unwrap();
        let result = CommandContract::pre(game.state(), &Command::SelectPlayerPiece(PieceId(999)));
        assert!(matches!(result, Err(CommandError::InvalidState(_))));
    }

    #[test]
    fn test_postcondition_holds_after_command() {
        let mut game = GameSetup::default().start().unwrap();
        let before = game.state().clone();
        game.apply(Command::SelectPlayerPiece(PieceId(0))).unwrap();
        assert!(CommandContract::post(&before, game.state()).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let mut game = GameSetup::default().start().unwrap();
        let before = game.state().clone();
        game.state_mut().pieces.occupancy_mut()[1].insert(PieceId(0));
        assert!(CommandContract::post(&before, game.state()).is_err());
    }

    #[test]
    fn test_postcondition_detects_silent_swap() {
        let mut game = GameSetup::default().start().unwrap();
        let before = game.state().clone();
        game.state_mut().active = Player::B;
        assert!(CommandContract::post(&before, game.state()).is_err());
    }
}
