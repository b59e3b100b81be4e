/// Plain-text rendering of the playlist.
use std::fmt::Write as _;

use crate::history::Song;

/// Shown instead of the list when it has no songs.
pub const EMPTY_PLAYLIST: &str = "(playlist is empty)";

/// Numbered list of songs with their ids, one per line.
pub fn render_playlist(songs: &[Song]) -> String {
    if songs.is_empty() {
        return EMPTY_PLAYLIST.to_string();
    }

    let width = songs.len().to_string().len();
    let mut out = String::new();
    for (i, song) in songs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:>width$}. {}  [{}]", i + 1, song.title(), song.id());
    }
    out
}

/// One-line undo/redo availability, e.g. `undo: yes  redo: no`.
pub fn render_history_status(can_undo: bool, can_redo: bool) -> String {
    let flag = |b: bool| if b { "yes" } else { "no" };
    format!("undo: {}  redo: {}", flag(can_undo), flag(can_redo))
}
