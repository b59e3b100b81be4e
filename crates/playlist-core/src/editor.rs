/// The mounted playlist editor.
///
/// Lifecycle: `mount` creates an empty history, hydrates it from storage,
/// then attaches a persistence observer so every later transition is
/// saved. `unmount` detaches the observer and drops the history.
use std::sync::Arc;

use anyhow::{Context, Result};
use playlist_config::PlaylistConfig;
use thiserror::Error;

use crate::history::{
    generator_for, Action, HistoryState, HistoryStore, Hydration, IdGenerator, KeyValueStore,
    MemoryStore, PersistenceBridge, PersistenceError, RedbStore, Song, SubscriptionId,
};

/// Rejected editor input.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("song title must not be empty")]
    EmptyTitle,
    #[error("adding `{0}` left the playlist empty")]
    NotAdded(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A playlist editor bound to one storage key.
pub struct PlaylistEditor {
    store: HistoryStore,
    bridge: PersistenceBridge,
    key: String,
    persistence: Option<SubscriptionId>,
    hydration: Hydration,
}

impl std::fmt::Debug for PlaylistEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistEditor")
            .field("key", &self.key)
            .field("store", &self.store)
            .field("persisting", &self.persistence.is_some())
            .finish()
    }
}

impl PlaylistEditor {
    /// Opens the backend described by `config` and mounts an editor on it.
    ///
    /// `ephemeral` swaps the on-disk database for an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the on-disk database cannot be opened.
    pub fn open(config: &PlaylistConfig, ephemeral: bool) -> Result<Self> {
        let backend: Arc<dyn KeyValueStore> = if ephemeral {
            tracing::info!("Using in-memory playlist storage");
            Arc::new(MemoryStore::new())
        } else {
            let data_dir = config.resolved_data_dir();
            let db = RedbStore::open_in(&data_dir).with_context(|| {
                format!("Failed to open playlist storage in {}", data_dir.display())
            })?;
            Arc::new(db)
        };

        Ok(Self::mount(
            PersistenceBridge::new(backend),
            config.storage_key.clone(),
            generator_for(config.id_strategy),
        ))
    }

    /// Creates the history, hydrates it from `key`, and starts persisting.
    ///
    /// The hydrated list is written back once so storage reflects what was
    /// actually restored (a corrupt record is replaced by an empty state).
    pub fn mount(bridge: PersistenceBridge, key: String, ids: Box<dyn IdGenerator>) -> Self {
        let mut store = HistoryStore::new(ids);
        let hydration = bridge.hydrate(&key, &mut store);

        if let Err(e) = bridge.save(&key, store.state()) {
            tracing::warn!("Failed to persist hydrated playlist: {e}");
        }
        let persistence = Some(store.subscribe(bridge.observer(key.clone())));

        Self {
            store,
            bridge,
            key,
            persistence,
            hydration,
        }
    }

    /// Storage key this editor reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// What was found in storage when the editor was mounted.
    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    pub fn songs(&self) -> &[Song] {
        self.store.present()
    }

    pub fn state(&self) -> &HistoryState {
        self.store.state()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Appends a song titled `title`, kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::EmptyTitle` when `title` is blank after
    /// trimming; nothing is dispatched in that case.
    pub fn add_song(&mut self, title: &str) -> Result<&Song, EditorError> {
        if title.trim().is_empty() {
            return Err(EditorError::EmptyTitle);
        }
        self.store.dispatch(Action::add(title));
        match self.store.present().last() {
            Some(song) => Ok(song),
            None => Err(EditorError::NotAdded(title.to_string())),
        }
    }

    /// Removes the song with `id`. Returns whether a song was removed.
    ///
    /// An unknown id still records an (unchanged) history step.
    pub fn remove_song(&mut self, id: &str) -> bool {
        let existed = self.store.present().iter().any(|s| s.id() == id);
        self.store.dispatch(Action::remove(id));
        existed
    }

    /// Removes the song at 1-based `position`, as numbered by
    /// `render_playlist`. Returns the removed song.
    ///
    /// Out-of-range positions dispatch nothing.
    pub fn remove_at(&mut self, position: usize) -> Option<Song> {
        let song = self
            .store
            .present()
            .get(position.checked_sub(1)?)?
            .clone();
        self.store.dispatch(Action::remove(song.id()));
        Some(song)
    }

    pub fn clear(&mut self) {
        self.store.dispatch(Action::Clear);
    }

    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.store.dispatch(Action::Undo)
    }

    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.store.dispatch(Action::Redo)
    }

    /// Writes the current state immediately.
    ///
    /// # Errors
    ///
    /// Returns the persistence failure, if any.
    pub fn flush(&self) -> Result<(), EditorError> {
        self.bridge.save(&self.key, self.store.state())?;
        Ok(())
    }

    /// Stops persisting and discards the in-memory history.
    pub fn unmount(mut self) {
        if let Some(id) = self.persistence.take() {
            self.store.unsubscribe(id);
        }
        tracing::debug!(key = %self.key, "Unmounted playlist editor");
    }
}
