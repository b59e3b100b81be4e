/// Interactive shell loop: reads commands, edits, prints the playlist.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::command::{parse_command, Command, HELP};
use crate::editor::PlaylistEditor;
use crate::render::{render_history_status, render_playlist};

/// Runs commands from `input` against `editor` until `quit` or EOF.
///
/// With `echo` set, the playlist is printed after every change.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_shell<R: BufRead, W: Write>(
    editor: &mut PlaylistEditor,
    input: R,
    mut out: W,
    echo: bool,
) -> Result<()> {
    writeln!(out, "{}", render_playlist(editor.songs())).context("Failed to write output")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}").context("Failed to write output")?;
                continue;
            }
        };

        let changed = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}").context("Failed to write output")?;
                false
            }
            Command::List => {
                writeln!(out, "{}", render_playlist(editor.songs()))
                    .context("Failed to write output")?;
                writeln!(
                    out,
                    "{}",
                    render_history_status(editor.can_undo(), editor.can_redo())
                )
                .context("Failed to write output")?;
                false
            }
            Command::Add(title) => match editor.add_song(&title) {
                Ok(_) => true,
                Err(e) => {
                    writeln!(out, "{e}").context("Failed to write output")?;
                    false
                }
            },
            Command::Remove(id) => {
                if !editor.remove_song(&id) {
                    writeln!(out, "no song with id `{id}`").context("Failed to write output")?;
                }
                true
            }
            Command::Clear => {
                editor.clear();
                true
            }
            Command::Undo => {
                let undone = editor.undo();
                if !undone {
                    writeln!(out, "nothing to undo").context("Failed to write output")?;
                }
                undone
            }
            Command::Redo => {
                let redone = editor.redo();
                if !redone {
                    writeln!(out, "nothing to redo").context("Failed to write output")?;
                }
                redone
            }
        };

        if changed && echo {
            writeln!(out, "{}", render_playlist(editor.songs()))
                .context("Failed to write output")?;
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}
