//! Core domain types for the ring board game.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Player {
    /// Player A (moves first by default).
    #[default]
    A,
    /// Player B.
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

/// Piece color drawn from the fixed palette.
///
/// The first five values are player colors; each of them owns one home
/// field on the inner ring. `Black` pieces are taken over and moved on,
/// `Gray` pieces are captured and spawned as scoring markers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Player color 0.
    White,
    /// Player color 1.
    Blue,
    /// Player color 2.
    Red,
    /// Player color 3.
    Yellow,
    /// Player color 4.
    Green,
    /// Neutral takeover target (class A).
    Black,
    /// Neutral capture target and scoring marker (class B).
    Gray,
}

/// Number of player colors, which is also the number of spokes and homes.
pub const PLAYER_COLORS: usize = 5;

impl Color {
    /// Returns true for the five colors that players own.
    pub fn is_player_color(self) -> bool {
        self.home_slot().is_some()
    }

    /// Index of the spoke and home field belonging to this color.
    ///
    /// Neutral colors have no home.
    pub fn home_slot(self) -> Option<usize> {
        match self {
            Color::White => Some(0),
            Color::Blue => Some(1),
            Color::Red => Some(2),
            Color::Yellow => Some(3),
            Color::Green => Some(4),
            Color::Black | Color::Gray => None,
        }
    }

    /// Iterates the player colors in home-slot order.
    pub fn player_colors() -> impl Iterator<Item = Color> {
        Color::iter().filter(|c| c.is_player_color())
    }

    /// The interaction class of a piece of this color.
    pub fn class(self) -> PieceClass {
        match self {
            Color::Black => PieceClass::Takeover,
            Color::Gray => PieceClass::Capture,
            _ => PieceClass::Player,
        }
    }
}

/// How a piece reacts when another piece moves onto its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PieceClass {
    /// A player-owned piece; moving onto it swaps the two.
    Player,
    /// Class A (black): taken over and relocated in a follow-up phase.
    Takeover,
    /// Class B (gray): captured and removed.
    Capture,
}

/// Stable index of a field in the board graph.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
)]
#[serde(transparent)]
pub struct FieldId(pub usize);

impl FieldId {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifier of a piece, issued in creation order and never reused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
)]
#[serde(transparent)]
pub struct PieceId(pub u32);

/// A movable token on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    owner: Option<Player>,
    color: Color,
    field: FieldId,
}

impl Piece {
    pub(crate) fn new(id: PieceId, color: Color, owner: Option<Player>, field: FieldId) -> Self {
        Self {
            id,
            owner,
            color,
            field,
        }
    }

    /// Returns the piece identifier.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the owning player, `None` for neutral pieces.
    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    /// Returns the piece color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the field the piece currently occupies.
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Returns true if this piece belongs to the given player.
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }

    pub(crate) fn set_field(&mut self, field: FieldId) {
        self.field = field;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_toggles() {
        assert_eq!(Player::A.opponent(), Player::B);
        assert_eq!(Player::B.opponent().opponent(), Player::B);
    }

    #[test]
    fn test_player_colors_have_distinct_homes() {
        let slots: Vec<usize> = Color::player_colors()
            .filter_map(Color::home_slot)
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4]);
        assert_eq!(slots.len(), PLAYER_COLORS);
    }

    #[test]
    fn test_neutral_classes() {
        assert_eq!(Color::Black.class(), PieceClass::Takeover);
        assert_eq!(Color::Gray.class(), PieceClass::Capture);
        assert_eq!(Color::Red.class(), PieceClass::Player);
        assert!(!Color::Gray.is_player_color());
    }
}
