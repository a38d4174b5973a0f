//! Line-driven game loop.

use crate::input::Input;
use crate::render;
use anyhow::Result;
use serde_json::json;
use std::io::{BufRead, Write};
use strictly_rings::{Command, CommandError, Game, GameEvent};
use tracing::{debug, info, instrument, warn};

/// Output style of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Human-readable lines.
    Text,
    /// One JSON document per line.
    Json,
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Rejected commands are reported and the loop carries on.
#[instrument(skip_all, fields(?output))]
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    out: &mut W,
    output: Output,
) -> Result<()> {
    show(game, out, output)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = match line.parse::<Input>() {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(%err, "Unparsable input");
                report(out, output, "input", &err.to_string())?;
                continue;
            }
        };

        let command = match parsed {
            Input::Quit => break,
            Input::Show => {
                show(game, out, output)?;
                continue;
            }
            Input::Highlight => {
                highlight(game, out, output)?;
                continue;
            }
            Input::Cancel => Command::Deselect,
            Input::Field(field) => Command::SelectField(field),
            Input::Piece(piece) => match Command::for_piece(game.state().pieces(), piece) {
                Ok(command) => command,
                Err(err) => {
                    report(out, output, "error", &err.to_string())?;
                    continue;
                }
            },
        };

        match game.apply(command) {
            Ok(events) => accepted(game, &events, out, output)?,
            Err(CommandError::Illegal(reason)) => {
                report(out, output, "rejected", &reason.to_string())?
            }
            Err(CommandError::InvalidState(err)) => {
                warn!(%err, "Invalid state reported to player");
                report(out, output, "error", &err.to_string())?;
            }
        }
    }

    info!(turns = game.turns(), commands = game.history().len(), "Game loop finished");
    Ok(())
}

fn accepted<W: Write>(
    game: &Game,
    events: &[GameEvent],
    out: &mut W,
    output: Output,
) -> Result<()> {
    match output {
        Output::Text => {
            for event in events {
                writeln!(out, "{event}")?;
            }
            writeln!(out, "-> player {} | {}", game.active_player(), game.phase())?;
        }
        Output::Json => {
            let line = json!({
                "events": events,
                "active_player": game.active_player(),
                "phase": game.phase(),
            });
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn show<W: Write>(game: &Game, out: &mut W, output: Output) -> Result<()> {
    match output {
        Output::Text => writeln!(out, "{}", render::board_text(game))?,
        Output::Json => writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?,
    }
    Ok(())
}

fn highlight<W: Write>(game: &Game, out: &mut W, output: Output) -> Result<()> {
    let fields = game.highlighted_fields();
    match output {
        Output::Text => writeln!(out, "{}", render::highlight_text(&fields))?,
        Output::Json => writeln!(out, "{}", json!({ "highlighted": fields }))?,
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, output: Output, kind: &str, message: &str) -> Result<()> {
    match output {
        Output::Text => writeln!(out, "{kind}: {message}")?,
        Output::Json => {
            let mut line = serde_json::Map::new();
            line.insert(kind.to_string(), message.into());
            writeln!(out, "{}", serde_json::Value::Object(line))?
        }
    }
    Ok(())
}
