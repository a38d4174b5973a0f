//! Initial piece placement.

use super::invariants::{GraphSymmetricInvariant, Invariant};
use super::{
    BoardGraph, Color, FieldId, Game, GameConfig, GameState, InvalidState, PieceRegistry, Player,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// One piece to put on the board before play starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Piece color.
    pub color: Color,
    /// Owner, `None` for neutral pieces.
    pub owner: Option<Player>,
    /// Starting field.
    pub field: FieldId,
}

/// Game in setup: configuration plus the pieces to create, in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    config: GameConfig,
    placements: Vec<Placement>,
}

impl GameSetup {
    /// Creates an empty setup.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            placements: Vec::new(),
        }
    }

    /// The standard opening.
    ///
    /// For each player color, one piece of each player stands on the outer
    /// field where that color's spoke starts (player A's piece first). A
    /// black piece then stands on every home field.
    #[instrument]
    pub fn standard(config: GameConfig) -> Self {
        let graph = BoardGraph::new(*config.layout());
        let mut setup = Self::new(config);

        for color in Color::player_colors() {
            if let Some(field) = graph.spoke_start(color) {
                for player in Player::iter() {
                    setup = setup.place(color, Some(player), field);
                }
            }
        }
        for color in Color::player_colors() {
            if let Some(home) = graph.home_of(color) {
                setup = setup.place(Color::Black, None, home);
            }
        }
        setup
    }

    /// Adds a piece to the setup.
    pub fn place(mut self, color: Color, owner: Option<Player>, field: FieldId) -> Self {
        self.placements.push(Placement { color, owner, field });
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the placements in creation order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Builds the board, creates the pieces and starts play.
    ///
    /// Fails if a placement names an unknown field or pairs a color with
    /// the wrong kind of owner.
    #[instrument(skip(self), fields(pieces = self.placements.len()))]
    pub fn start(self) -> Result<Game, InvalidState> {
        self.config
            .layout()
            .validate()
            .map_err(|e| InvalidState::new(e.message))?;

        let graph = BoardGraph::new(*self.config.layout());
        if !GraphSymmetricInvariant::holds(&graph) {
            return Err(InvalidState::new(GraphSymmetricInvariant::description()));
        }

        let mut pieces = PieceRegistry::new(graph.len());
        for placement in &self.placements {
            pieces.create(placement.color, placement.owner, placement.field)?;
        }

        let first = *self.config.first_player();
        info!(fields = graph.len(), %first, "Game started");
        let state = GameState::new(Arc::new(graph), pieces, first);
        Ok(Game::new(state, self))
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::standard(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardLayout, PieceId};

    #[test]
    fn test_standard_opening() {
        let game = GameSetup::default().start().unwrap();
        let pieces = game.state().pieces();

        assert_eq!(pieces.len(), 15);
        assert_eq!(pieces.owned_by(Player::A).count(), 5);
        assert_eq!(pieces.owned_by(Player::B).count(), 5);

        let first = pieces.get(PieceId(0)).unwrap();
        assert_eq!(first.color(), Color::White);
        assert_eq!(first.owner(), Some(Player::A));
        assert_eq!(first.field(), FieldId(0));

        let blue_b = pieces.get(PieceId(3)).unwrap();
        assert_eq!(blue_b.owner(), Some(Player::B));
        assert_eq!(blue_b.field(), FieldId(4));

        let blacks: Vec<usize> = pieces
            .iter()
            .filter(|p| p.color() == Color::Black)
            .map(|p| p.field().index())
            .collect();
        assert_eq!(blacks, vec![50, 54, 58, 62, 66]);
    }

    #[test]
    fn test_first_player_from_config() {
        let config = GameConfig::new(BoardLayout::default(), Player::B);
        let game = GameSetup::standard(config).start().unwrap();
        assert_eq!(game.state().active_player(), Player::B);
    }

    #[test]
    fn test_deserialized_config_builds_standard_board() {
        let config: GameConfig =
            serde_json::from_str(r#"{"layout":{"outer_ring":10,"inner_ring":5,"spoke_length":0}}"#)
                .unwrap();
        let game = GameSetup::standard(config).start().unwrap();
        assert_eq!(game.state().graph().len(), 15);
        assert_eq!(game.state().pieces().len(), 15);

        let broken = serde_json::from_str::<GameConfig>(r#"{"layout":{"inner_ring":0}}"#);
        assert!(broken.is_err());
    }

    #[test]
    fn test_bad_placement_rejected() {
        let result = GameSetup::new(GameConfig::default())
            .place(Color::Gray, None, FieldId(70))
            .start();
        assert!(result.is_err());

        let result = GameSetup::new(GameConfig::default())
            .place(Color::Red, None, FieldId(1))
            .start();
        assert!(result.is_err());
    }
}
