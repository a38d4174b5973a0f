//! Graph symmetry invariant: every edge is listed at both ends.

use super::super::BoardGraph;
use super::Invariant;

/// Invariant: `b` neighbors `a` exactly when `a` neighbors `b`, and no
/// field is isolated.
pub struct GraphSymmetricInvariant;

impl Invariant<BoardGraph> for GraphSymmetricInvariant {
    fn holds(graph: &BoardGraph) -> bool {
        graph.fields().all(|field| {
            !field.neighbors().is_empty()
                && field.neighbors().iter().all(|&n| {
                    graph
                        .neighbors(n)
                        .is_ok_and(|back| back.contains(&field.id()))
                })
        })
    }

    fn description() -> &'static str {
        "Board edges are symmetric and every field has a neighbor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardLayout;

    #[test]
    fn test_layouts_hold() {
        for (outer, inner, spokes) in [(20, 20, 6), (5, 5, 0), (15, 10, 2), (40, 5, 9)] {
            let graph = BoardGraph::new(BoardLayout::new(outer, inner, spokes).unwrap());
            assert!(GraphSymmetricInvariant::holds(&graph));
        }
    }
}
