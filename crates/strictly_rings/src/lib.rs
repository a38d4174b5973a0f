//! Strictly Rings - type-safe game logic for a ring-and-spoke board game.
//!
//! Two players move colored pieces around a graph board: an outer ring, an
//! inner ring with one home field per color, and spokes between them.
//! Pieces slide through empty fields; landing on another piece swaps it,
//! takes it over (black) or captures it (gray). A piece that reaches the
//! home of its color scores and leaves a gray marker behind.
//!
//! # Architecture
//!
//! - **Board**: immutable [`BoardGraph`] built from a [`BoardLayout`]
//! - **Pieces**: [`PieceRegistry`] owning pieces and field occupancy
//! - **Reachability**: [`reachable`] flood fill over empty fields
//! - **Automaton**: [`Game::apply`] gates [`Command`]s by [`Phase`],
//!   chains forced follow-ups and passes the turn
//! - **Contracts**: preconditions classify commands, postconditions check
//!   the [`invariants`] in debug builds
//!
//! # Example
//!
//! ```
//! use strictly_rings::{Command, FieldId, GameSetup, Phase, PieceId, Player};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = GameSetup::default().start()?;
//! game.apply(Command::SelectPlayerPiece(PieceId(0)))?;
//! game.apply(Command::SelectField(FieldId(1)))?;
//!
//! assert_eq!(game.phase(), Phase::SelectPiece);
//! assert_eq!(game.active_player(), Player::B);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod contracts;
mod error;
mod executor;
mod game;
pub mod invariants;
mod phases;
mod reachability;
mod registry;
mod setup;
mod snapshot;
mod state;
mod turn;
mod types;

// Crate-level exports - Domain types
pub use types::{Color, FieldId, PLAYER_COLORS, Piece, PieceClass, PieceId, Player};

// Crate-level exports - Configuration
pub use config::{BoardLayout, ConfigError, GameConfig};

// Crate-level exports - Board and pieces
pub use board::{BoardGraph, Field};
pub use reachability::reachable;
pub use registry::PieceRegistry;

// Crate-level exports - Commands, events and errors
pub use action::{Command, GameEvent};
pub use error::{CommandError, IllegalCommand, InvalidState};

// Crate-level exports - Automaton
pub use contracts::{
    CommandContract, Contract, FieldIsEmpty, HasColor, LegalCommand, OpponentPiece, OwnedByActive,
    Step, WithinReach,
};
pub use executor::Interaction;
pub use game::Game;
pub use phases::{Dispatch, Obligations, Phase, next_action};
pub use setup::{GameSetup, Placement};
pub use snapshot::{FieldView, Snapshot};
pub use state::GameState;
