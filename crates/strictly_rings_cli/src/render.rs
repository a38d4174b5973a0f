//! Plain-text rendering of games and boards.

use std::collections::BTreeSet;
use std::fmt::Write;
use strictly_rings::{BoardGraph, FieldId, Game, Piece, Player};
use tracing::instrument;

/// One line per piece plus the turn header.
#[instrument(skip(game), fields(turns = game.turns()))]
pub fn board_text(game: &Game) -> String {
    let state = game.state();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Turn {} | player {} | {}",
        state.turns() + 1,
        state.active_player(),
        state.phase()
    );
    if let Some(selected) = state.selected() {
        let _ = writeln!(out, "Selected: piece {selected}");
    }
    for piece in state.pieces().iter() {
        let _ = writeln!(out, "  {}", piece_line(piece));
    }
    let _ = write!(
        out,
        "Scored: A {} / B {}",
        game.scored(Player::A),
        game.scored(Player::B)
    );
    out
}

#[instrument(skip(piece), fields(piece = %piece.id()))]
fn piece_line(piece: &Piece) -> String {
    let owner = piece
        .owner()
        .map(|player| format!("player {player}"))
        .unwrap_or_else(|| "neutral".to_string());
    format!(
        "piece {:>3} {:<6} {:<9} on field {}",
        piece.id().0,
        piece.color().to_string(),
        owner,
        piece.field()
    )
}

/// Highlighted fields as a single line.
#[instrument(skip(highlighted), fields(count = highlighted.len()))]
pub fn highlight_text(highlighted: &BTreeSet<FieldId>) -> String {
    if highlighted.is_empty() {
        return "No fields highlighted".to_string();
    }
    let ids: Vec<String> = highlighted.iter().map(ToString::to_string).collect();
    format!("Highlighted: {}", ids.join(" "))
}

/// Adjacency list with ring, index and home tags.
#[instrument(skip(graph), fields(fields = graph.len()))]
pub fn graph_text(graph: &BoardGraph) -> String {
    let mut out = String::new();
    for field in graph.fields() {
        let neighbors: Vec<String> =
            field.neighbors().iter().map(ToString::to_string).collect();
        let _ = write!(
            out,
            "{:>3} ring {} index {:>2} -> {}",
            field.id().index(),
            field.ring(),
            field.index(),
            neighbors.join(", ")
        );
        if let Some(color) = field.home() {
            let _ = write!(out, " [home {color}]");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_rings::{BoardLayout, GameSetup};

    #[test]
    fn test_graph_text_lists_every_field() {
        let graph = BoardGraph::new(BoardLayout::default());
        let text = graph_text(&graph);
        assert_eq!(text.lines().count(), 70);
        assert!(text.lines().next().unwrap().starts_with("  0 ring 0 index  0 -> 1, 19, 20"));
        assert!(text.contains("[home White]"));
    }

    #[test]
    fn test_board_text_header() {
        let game = GameSetup::default().start().unwrap();
        let text = board_text(&game);
        assert!(text.starts_with("Turn 1 | player A | SelectPiece"));
        assert_eq!(text.lines().count(), 17);
    }

    #[test]
    fn test_highlight_text() {
        let fields: BTreeSet<FieldId> = [FieldId(3), FieldId(1)].into_iter().collect();
        assert_eq!(highlight_text(&fields), "Highlighted: 1 3");
        assert_eq!(highlight_text(&BTreeSet::new()), "No fields highlighted");
    }
}
