//! The phase automaton driving a game session.

use super::contracts::{CommandContract, Contract, Step};
use super::executor::{self, Interaction};
use super::phases::next_action;
use super::reachability::reachable;
use super::turn::pass_turn;
use super::{
    Command, CommandError, Dispatch, FieldId, GameEvent, GameSetup, GameState, Phase, Player,
    Snapshot,
};
use std::collections::BTreeSet;
use tracing::{debug, error, info, instrument};

/// A running game: the state, the setup it started from and the accepted
/// commands so far.
///
/// `apply` takes `&mut self`, so commands are processed one at a time and
/// each runs to completion, including any follow-up dispatch.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    setup: GameSetup,
    history: Vec<Command>,
}

impl Game {
    pub(crate) fn new(state: GameState, setup: GameSetup) -> Self {
        Self {
            state,
            setup,
            history: Vec::new(),
        }
    }

    /// Applies a command.
    ///
    /// On success the returned events describe everything that changed. On
    /// failure nothing changed: the transition runs on a copy of the state
    /// that is only committed once its postconditions hold (postconditions
    /// are checked in debug builds).
    #[instrument(skip(self), fields(phase = %self.state.phase, player = %self.state.active))]
    pub fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>, CommandError> {
        let result = self.try_apply(command);
        match &result {
            Ok(events) => {
                self.history.push(command);
                debug!(?events, phase = %self.state.phase, "Command accepted");
            }
            Err(CommandError::Illegal(reason)) => {
                debug!(%reason, "Command rejected");
            }
            Err(CommandError::InvalidState(err)) => {
                error!(%err, "Command hit invalid state");
            }
        }
        result
    }

    fn try_apply(&mut self, command: Command) -> Result<Vec<GameEvent>, CommandError> {
        let step = CommandContract::pre(&self.state, &command)?;

        let mut next = self.state.clone();
        let events = run(&mut next, step)?;

        #[cfg(debug_assertions)]
        CommandContract::post(&self.state, &next)?;

        self.state = next;
        Ok(events)
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the player whose turn it is.
    pub fn active_player(&self) -> Player {
        self.state.active
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Number of completed turns.
    pub fn turns(&self) -> u32 {
        self.state.turns
    }

    /// Accepted commands in order.
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    /// The setup this game started from.
    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// How many of `player`'s pieces have reached home.
    ///
    /// Player pieces leave the board only by scoring, so this is the
    /// difference between the setup and the board.
    #[instrument(skip(self))]
    pub fn scored(&self, player: Player) -> usize {
        let placed = self
            .setup
            .placements()
            .iter()
            .filter(|p| p.owner == Some(player))
            .count();
        placed.saturating_sub(self.state.pieces.owned_by(player).count())
    }

    /// Fields the presentation layer should highlight in the current phase.
    #[instrument(skip(self), fields(phase = %self.state.phase))]
    pub fn highlighted_fields(&self) -> BTreeSet<FieldId> {
        let state = &self.state;
        match state.phase {
            Phase::SelectPiece => state
                .pieces
                .owned_by(state.active)
                .map(|piece| piece.field())
                .collect(),
            Phase::SelectPieceTarget => {
                match state
                    .selected_piece()
                    .and_then(|piece| reachable(&state.graph, &state.pieces, piece.field()))
                {
                    Ok(fields) => fields,
                    Err(err) => {
                        error!(%err, "Cannot highlight reachable fields");
                        BTreeSet::new()
                    }
                }
            }
            Phase::SelectBlackTarget | Phase::SelectGrayTarget => state
                .graph
                .field_ids()
                .filter(|&field| !state.pieces.is_occupied(field))
                .collect(),
        }
    }

    /// Serializable view of the whole game.
    #[instrument(skip(self), fields(turns = self.state.turns))]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Starts `setup` and applies `commands` in order.
    ///
    /// The same setup and commands always produce the same game.
    #[instrument(skip(setup, commands), fields(commands = commands.len()))]
    pub fn replay(setup: GameSetup, commands: &[Command]) -> Result<Self, CommandError> {
        let mut game = setup.start()?;
        for &command in commands {
            game.apply(command)?;
        }
        info!(turns = game.turns(), "Replay complete");
        Ok(game)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

/// Runs a validated step, then the `nextAction` dispatch if the step
/// completed a move.
fn run(state: &mut GameState, step: Step) -> Result<Vec<GameEvent>, CommandError> {
    let mut events = match step {
        Step::Select(piece) => {
            state.selected = Some(piece);
            state.phase = Phase::SelectPieceTarget;
            return Ok(vec![GameEvent::Selected(piece)]);
        }
        Step::Deselect(piece) => {
            state.selected = None;
            state.phase = Phase::SelectPiece;
            return Ok(vec![GameEvent::Deselected(piece)]);
        }
        Step::Move {
            piece,
            target,
            interaction,
        } => {
            let events = executor::execute(state, piece, target, interaction)?;
            if !matches!(interaction, Interaction::Takeover(_)) {
                state.selected = None;
            }
            events
        }
        Step::PlaceBlack { black, target } => vec![executor::place_black(state, black, target)?],
        Step::SpawnGray(target) => vec![executor::spawn_gray(state, target)?],
    };

    let dispatch = next_action(state.obligations);
    if dispatch == Dispatch::EndTurn {
        events.push(pass_turn(state));
    }
    state.phase = dispatch.phase();
    debug!(%dispatch, phase = %state.phase, "Dispatched");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, GameConfig, PieceId};

    #[test]
    fn test_select_then_move() {
        let mut game = GameSetup::default().start().unwrap();
        game.apply(Command::SelectPlayerPiece(PieceId(0))).unwrap();
        assert_eq!(game.phase(), Phase::SelectPieceTarget);

        let events = game.apply(Command::SelectField(FieldId(1))).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::Moved {
                    piece: PieceId(0),
                    from: FieldId(0),
                    to: FieldId(1)
                },
                GameEvent::TurnPassed(Player::B),
            ]
        );
        assert_eq!(game.phase(), Phase::SelectPiece);
        assert_eq!(game.turns(), 1);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_rejection_is_not_recorded() {
        let mut game = GameSetup::default().start().unwrap();
        let before = game.state().clone();
        assert!(game.apply(Command::SelectField(FieldId(1))).is_err());
        assert_eq!(game.state(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_deselect_keeps_turn() {
        let mut game = GameSetup::default().start().unwrap();
        game.apply(Command::SelectPlayerPiece(PieceId(0))).unwrap();
        game.apply(Command::Deselect).unwrap();

        assert_eq!(game.phase(), Phase::SelectPiece);
        assert_eq!(game.active_player(), Player::A);
        assert_eq!(game.state().selected(), None);
        assert_eq!(game.turns(), 0);
    }

    #[test]
    fn test_highlight_select_piece() {
        let game = GameSetup::default().start().unwrap();
        let expected: BTreeSet<FieldId> = [0, 4, 8, 12, 16].into_iter().map(FieldId).collect();
        assert_eq!(game.highlighted_fields(), expected);
    }

    #[test]
    fn test_highlight_gray_target_is_every_empty_field() {
        let mut game = GameSetup::new(GameConfig::default())
            .place(Color::Red, Some(Player::A), FieldId(0))
            .start()
            .unwrap();
        game.state_mut().phase = Phase::SelectGrayTarget;
        game.state_mut().obligations.spawn_pending = true;

        let highlighted = game.highlighted_fields();
        assert_eq!(highlighted.len(), 69);
        assert!(!highlighted.contains(&FieldId(0)));
    }

    #[test]
    fn test_highlight_with_stale_selection_is_empty() {
        let mut game = GameSetup::default().start().unwrap();
        game.apply(Command::SelectPlayerPiece(PieceId(0))).unwrap();
        game.state_mut().selected = Some(PieceId(99));

        assert!(game.highlighted_fields().is_empty());
    }

    #[test]
    fn test_scored_counts_missing_pieces() {
        let game = GameSetup::default().start().unwrap();
        assert_eq!(game.scored(Player::A), 0);
        assert_eq!(game.scored(Player::B), 0);
    }
}
