//! Playlist editing on top of the undo/redo history store.
//!
//! `PlaylistEditor` is what a front end mounts: it hydrates the history
//! from storage, wires persistence as an observer, and validates user
//! input before dispatching. `command` parses shell input and `render`
//! turns the present list into text; `shell` ties them together.

pub mod command;
pub mod editor;
pub mod history;
pub mod render;
pub mod shell;

pub use command::{parse_command, Command, ParseError};
pub use editor::{EditorError, PlaylistEditor};
pub use render::{render_history_status, render_playlist};
pub use shell::run_shell;
