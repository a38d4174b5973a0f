//! Piece registry: every piece and the occupancy of every field.
//!
//! Pieces and per-field occupant sets are kept side by side and only ever
//! changed together, so a piece's recorded field and the occupant set of
//! that field always agree.

use super::{Color, FieldId, InvalidState, Piece, PieceId, Player};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, trace};

/// Mutable collection of pieces, indexed by id and by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRegistry {
    pieces: BTreeMap<PieceId, Piece>,
    occupancy: Vec<BTreeSet<PieceId>>,
    next_id: u32,
}

impl PieceRegistry {
    /// Creates an empty registry for a board with `field_count` fields.
    pub fn new(field_count: usize) -> Self {
        Self {
            pieces: BTreeMap::new(),
            occupancy: vec![BTreeSet::new(); field_count],
            next_id: 0,
        }
    }

    /// Adds a piece on `field` and returns its fresh id.
    #[instrument(skip(self))]
    pub fn create(
        &mut self,
        color: Color,
        owner: Option<Player>,
        field: FieldId,
    ) -> Result<PieceId, InvalidState> {
        if owner.is_some() != color.is_player_color() {
            return Err(InvalidState::new(format!(
                "{} pieces cannot have owner {:?}",
                color, owner
            )));
        }
        let occupants = self
            .occupancy
            .get_mut(field.index())
            .ok_or_else(|| InvalidState::unknown_field(field))?;

        let id = PieceId(self.next_id);
        self.next_id += 1;
        occupants.insert(id);
        self.pieces.insert(id, Piece::new(id, color, owner, field));
        debug!(piece = %id, %color, %field, "Piece created");
        Ok(id)
    }

    /// Moves a piece to `target`, keeping both occupant sets in step.
    #[instrument(skip(self))]
    pub fn relocate(&mut self, piece: PieceId, target: FieldId) -> Result<(), InvalidState> {
        if target.index() >= self.occupancy.len() {
            return Err(InvalidState::unknown_field(target));
        }
        let entry = self
            .pieces
            .get_mut(&piece)
            .ok_or_else(|| InvalidState::unknown_piece(piece))?;

        let origin = entry.field();
        self.occupancy[origin.index()].remove(&piece);
        self.occupancy[target.index()].insert(piece);
        entry.set_field(target);
        trace!(%piece, %origin, %target, "Piece relocated");
        Ok(())
    }

    /// Removes a piece from the board. Its id is never issued again.
    #[instrument(skip(self))]
    pub fn remove(&mut self, piece: PieceId) -> Result<Piece, InvalidState> {
        let removed = self
            .pieces
            .remove(&piece)
            .ok_or_else(|| InvalidState::unknown_piece(piece))?;
        self.occupancy[removed.field().index()].remove(&piece);
        debug!(%piece, field = %removed.field(), "Piece removed");
        Ok(removed)
    }

    /// Looks up a piece.
    pub fn get(&self, piece: PieceId) -> Result<&Piece, InvalidState> {
        self.pieces
            .get(&piece)
            .ok_or_else(|| InvalidState::unknown_piece(piece))
    }

    /// Returns true if the id names a live piece.
    pub fn contains(&self, piece: PieceId) -> bool {
        self.pieces.contains_key(&piece)
    }

    /// Pieces on `field`, empty for unknown fields.
    pub fn occupants(&self, field: FieldId) -> impl Iterator<Item = &Piece> + '_ {
        self.occupancy
            .get(field.index())
            .into_iter()
            .flatten()
            .filter_map(|id| self.pieces.get(id))
    }

    /// Ids of the pieces on `field`.
    pub fn occupant_ids(&self, field: FieldId) -> Option<&BTreeSet<PieceId>> {
        self.occupancy.get(field.index())
    }

    /// Returns true if at least one piece stands on `field`.
    pub fn is_occupied(&self, field: FieldId) -> bool {
        self.occupancy
            .get(field.index())
            .is_some_and(|occupants| !occupants.is_empty())
    }

    /// All live pieces in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Live pieces owned by `player`.
    pub fn owned_by(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |p| p.is_owned_by(player))
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if no piece is on the board.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Number of fields the registry tracks.
    pub fn field_count(&self) -> usize {
        self.occupancy.len()
    }

    /// The id the next created piece will receive.
    pub fn next_id(&self) -> PieceId {
        PieceId(self.next_id)
    }

    #[cfg(test)]
    pub(crate) fn occupancy_mut(&mut self) -> &mut Vec<BTreeSet<PieceId>> {
        &mut self.occupancy
    }
}
