//! Static board graph.
//!
//! The board is an outer ring and an inner ring joined by one spoke per
//! player color. Field ids are laid out ring by ring:
//!
//! ```text
//! 0 .. outer                       outer ring (ring 0)
//! outer + (r-1)*5 + k              spoke k, connector ring r (1..=spoke_length)
//! outer + 5*spoke_length + j       inner ring (ring spoke_length + 1)
//! ```
//!
//! Spoke `k` leaves outer field `k * outer / 5` and lands on inner field
//! `k * inner / 5`, which is the home of player color `k`. Ring and index
//! are opaque geometry for the presentation layer; core logic only uses
//! neighbors and home tags.

use super::{BoardLayout, Color, FieldId, InvalidState, PLAYER_COLORS};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A node of the board graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    id: FieldId,
    ring: usize,
    index: usize,
    neighbors: Vec<FieldId>,
    home: Option<Color>,
}

impl Field {
    /// Returns the field id.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Ring number, 0 being the outer ring.
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Position within the ring (spoke number on connector rings).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Adjacent fields in construction order.
    pub fn neighbors(&self) -> &[FieldId] {
        &self.neighbors
    }

    /// Color whose home this field is, if any.
    pub fn home(&self) -> Option<Color> {
        self.home
    }

    fn link(&mut self, other: FieldId) {
        if other != self.id && !self.neighbors.contains(&other) {
            self.neighbors.push(other);
        }
    }
}

/// Immutable adjacency structure over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGraph {
    layout: BoardLayout,
    fields: Vec<Field>,
    homes: [FieldId; PLAYER_COLORS],
}

impl BoardGraph {
    /// Builds the graph for a layout.
    ///
    /// Total for every `BoardLayout`: layouts are validated when they are
    /// constructed or deserialized.
    #[instrument]
    pub fn new(layout: BoardLayout) -> Self {
        let outer = *layout.outer_ring();
        let inner = *layout.inner_ring();
        let spoke_length = *layout.spoke_length();
        let connectors_start = outer;
        let inner_start = outer + PLAYER_COLORS * spoke_length;

        let mut fields = Vec::with_capacity(layout.field_count());
        for index in 0..outer {
            fields.push(blank_field(fields.len(), 0, index));
        }
        for ring in 1..=spoke_length {
            for spoke in 0..PLAYER_COLORS {
                fields.push(blank_field(fields.len(), ring, spoke));
            }
        }
        for index in 0..inner {
            fields.push(blank_field(fields.len(), spoke_length + 1, index));
        }

        let mut graph = Self {
            layout,
            fields,
            homes: [FieldId(inner_start); PLAYER_COLORS],
        };

        graph.link_ring(0, outer);
        graph.link_ring(inner_start, inner);

        for spoke in 0..PLAYER_COLORS {
            let mut previous = FieldId(spoke * outer / PLAYER_COLORS);
            for ring in 1..=spoke_length {
                let connector = FieldId(connectors_start + (ring - 1) * PLAYER_COLORS + spoke);
                graph.link(previous, connector);
                previous = connector;
            }
            let home = FieldId(inner_start + spoke * inner / PLAYER_COLORS);
            graph.link(previous, home);
            graph.homes[spoke] = home;
        }

        for color in Color::player_colors() {
            if let Some(slot) = color.home_slot() {
                let home = graph.homes[slot];
                graph.fields[home.index()].home = Some(color);
            }
        }

        debug!(fields = graph.fields.len(), "Board graph built");
        graph
    }

    fn link_ring(&mut self, start: usize, len: usize) {
        for offset in 0..len {
            let here = FieldId(start + offset);
            let next = FieldId(start + (offset + 1) % len);
            self.link(here, next);
        }
    }

    fn link(&mut self, a: FieldId, b: FieldId) {
        self.fields[a.index()].link(b);
        self.fields[b.index()].link(a);
    }

    /// Layout the graph was built from.
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the graph has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if the id names a field of this board.
    pub fn contains(&self, field: FieldId) -> bool {
        field.index() < self.fields.len()
    }

    /// Looks up a field.
    pub fn field(&self, field: FieldId) -> Result<&Field, InvalidState> {
        self.fields
            .get(field.index())
            .ok_or_else(|| InvalidState::unknown_field(field))
    }

    /// Adjacent fields of `field`.
    pub fn neighbors(&self, field: FieldId) -> Result<&[FieldId], InvalidState> {
        self.field(field).map(Field::neighbors)
    }

    /// Home field of a player color, `None` for neutral colors.
    pub fn home_of(&self, color: Color) -> Option<FieldId> {
        color.home_slot().map(|slot| self.homes[slot])
    }

    /// Outer-ring field where the spoke of a player color starts.
    pub fn spoke_start(&self, color: Color) -> Option<FieldId> {
        color
            .home_slot()
            .map(|slot| FieldId(slot * *self.layout.outer_ring() / PLAYER_COLORS))
    }

    /// All fields in id order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// All field ids in order.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.iter().map(Field::id)
    }
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new(BoardLayout::default())
    }
}

fn blank_field(id: usize, ring: usize, index: usize) -> Field {
    Field {
        id: FieldId(id),
        ring,
        index,
        neighbors: Vec::new(),
        home: None,
    }
}
