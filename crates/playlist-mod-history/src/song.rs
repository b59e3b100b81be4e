/// Core types for the playlist history: songs, history snapshots, and actions.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A single playlist entry.
///
/// Immutable once created; the id is assigned by the store's id generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    id: String,
    title: String,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Linear undo/redo history over the playlist.
///
/// Serialized field names (`past`, `present`, `future`) are the persisted
/// layout; do not rename them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    /// Prior `present` snapshots, oldest first.
    #[serde(default)]
    pub past: Vec<Vec<Song>>,
    /// The list the user currently sees.
    pub present: Vec<Song>,
    /// Snapshots available for redo, nearest first.
    #[serde(default)]
    pub future: VecDeque<Vec<Song>>,
}

impl HistoryState {
    /// Titles of the present list, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.present.iter().map(Song::title).collect()
    }
}

/// An edit dispatched to the history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a new song with a freshly generated id.
    Add { title: String },
    /// Drop the song with this id from the present list.
    Remove { id: String },
    Clear,
    Undo,
    Redo,
}

impl Action {
    pub fn add(title: impl Into<String>) -> Self {
        Self::Add {
            title: title.into(),
        }
    }

    pub fn remove(id: impl Into<String>) -> Self {
        Self::Remove { id: id.into() }
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Clear => "clear",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}
