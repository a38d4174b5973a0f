//! Occupancy invariant: pieces and field occupant sets agree both ways.

use super::super::GameState;
use super::Invariant;
use tracing::warn;

/// Invariant: every piece is listed on exactly the field it records.
///
/// Each live piece appears in the occupant set of its own field and in no
/// other; every listed occupant is a live piece.
pub struct OccupancyConsistentInvariant;

impl Invariant<GameState> for OccupancyConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let registry = state.pieces();
        if registry.field_count() != state.graph().len() {
            warn!(
                registry = registry.field_count(),
                graph = state.graph().len(),
                "Registry and graph disagree on field count"
            );
            return false;
        }

        let mut listed = 0;
        for field in state.graph().field_ids() {
            let Some(occupants) = registry.occupant_ids(field) else {
                return false;
            };
            for &id in occupants {
                match registry.get(id) {
                    Ok(piece) if piece.field() == field => listed += 1,
                    _ => {
                        warn!(piece = %id, %field, "Stale occupant");
                        return false;
                    }
                }
            }
        }

        // Each piece is listed once in total, so none is orphaned or doubled.
        listed == registry.len()
    }

    fn description() -> &'static str {
        "Every piece occupies exactly the field it records"
    }
}
