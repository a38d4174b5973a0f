//! Legal destinations of a piece.
//!
//! A piece slides through empty fields. The first occupied field on a path
//! is itself a target (a swap, takeover or capture) but blocks everything
//! behind it.

use super::{BoardGraph, FieldId, InvalidState, PieceRegistry};
use std::collections::{BTreeSet, VecDeque};
use tracing::{instrument, trace};

/// Fields reachable from `from`, excluding `from` itself.
///
/// Breadth-first flood fill. The origin's neighbors are always explored,
/// whatever stands on the origin; every other field passes the fill on only
/// while it is empty. Each field is visited at most once.
#[instrument(skip(graph, registry))]
pub fn reachable(
    graph: &BoardGraph,
    registry: &PieceRegistry,
    from: FieldId,
) -> Result<BTreeSet<FieldId>, InvalidState> {
    let mut visited = BTreeSet::from([from]);
    let mut frontier: VecDeque<FieldId> = VecDeque::new();
    for &neighbor in graph.neighbors(from)? {
        if visited.insert(neighbor) {
            frontier.push_back(neighbor);
        }
    }

    let mut result = BTreeSet::new();
    while let Some(field) = frontier.pop_front() {
        result.insert(field);
        if registry.is_occupied(field) {
            continue;
        }
        for &neighbor in graph.neighbors(field)? {
            if visited.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    trace!(count = result.len(), "Reachable fields computed");
    Ok(result)
}
