/// Persistence bridge between the history store and a key-value store.
///
/// The whole `HistoryState` is written as JSON on every change, but only
/// the present list is read back: hydration replays one `Add` per stored
/// title into an emptied store. Ids are regenerated and the previous
/// session's undo/redo stacks are dropped.
use std::sync::Arc;

use crate::error::{CorruptStateError, LoadError, PersistenceError};
use crate::song::{Action, HistoryState};
use crate::storage::KeyValueStore;
use crate::store::{HistoryStore, Observer};

/// What `hydrate` found in storage.
#[derive(Debug)]
pub enum Hydration {
    /// A stored record was replayed; `songs` titles were added.
    Restored { songs: usize },
    /// Nothing stored under the key.
    Missing,
    /// The record could not be read and the store was left empty.
    Discarded(LoadError),
}

/// Saves and loads `HistoryState` through a shared `KeyValueStore`.
#[derive(Clone)]
pub struct PersistenceBridge {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge").finish()
    }
}

impl PersistenceBridge {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Writes the full state under `key`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the backend write fails.
    pub fn save(&self, key: &str, state: &HistoryState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(state).map_err(PersistenceError::Encode)?;
        self.backend
            .set(key, &json)
            .map_err(|source| PersistenceError::Backend {
                key: key.to_string(),
                source,
            })?;
        tracing::trace!(key, bytes = json.len(), "Saved playlist state");
        Ok(())
    }

    /// Reads the state stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Persistence` if the backend read fails and
    /// `LoadError::Corrupt` if the stored text is not a valid state.
    pub fn load(&self, key: &str) -> Result<Option<HistoryState>, LoadError> {
        let raw = self
            .backend
            .get(key)
            .map_err(|source| PersistenceError::Backend {
                key: key.to_string(),
                source,
            })?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let state = serde_json::from_str::<HistoryState>(&raw).map_err(|source| {
            CorruptStateError {
                key: key.to_string(),
                source,
            }
        })?;
        Ok(Some(state))
    }

    /// Deletes whatever is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the backend delete fails.
    pub fn forget(&self, key: &str) -> Result<(), PersistenceError> {
        self.backend
            .remove(key)
            .map_err(|source| PersistenceError::Backend {
                key: key.to_string(),
                source,
            })
    }

    /// Resets `store` and replays the stored present list into it.
    ///
    /// Load failures are logged and leave the store empty; they never
    /// propagate.
    pub fn hydrate(&self, key: &str, store: &mut HistoryStore) -> Hydration {
        store.reset();
        match self.load(key) {
            Ok(Some(saved)) => {
                let songs = saved.present.len();
                for song in saved.present {
                    store.dispatch(Action::add(song.title()));
                }
                tracing::info!(key, songs, "Restored playlist");
                Hydration::Restored { songs }
            }
            Ok(None) => {
                tracing::debug!(key, "No saved playlist");
                Hydration::Missing
            }
            Err(e) => {
                tracing::warn!(key, "Discarding saved playlist: {e}");
                Hydration::Discarded(e)
            }
        }
    }

    /// Builds a store observer that saves every new state under `key`.
    ///
    /// Save failures are logged; the in-memory state is unaffected.
    pub fn observer(&self, key: impl Into<String>) -> Observer {
        let bridge = self.clone();
        let key = key.into();
        Box::new(move |state: &HistoryState| {
            if let Err(e) = bridge.save(&key, state) {
                tracing::warn!("Failed to persist playlist: {e}");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};

    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "playlistState";

    /// Backend that fails every call.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("backend offline"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("backend offline"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(anyhow!("backend offline"))
        }
    }

    fn memory_bridge() -> (PersistenceBridge, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (PersistenceBridge::new(backend.clone()), backend)
    }

    fn store_with(titles: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::default();
        for title in titles {
            store.dispatch(Action::add(*title));
        }
        store
    }

    #[test]
    fn test_save_then_load_returns_full_state() {
        let (bridge, _) = memory_bridge();
        let mut store = store_with(&["A", "B"]);
        store.dispatch(Action::Undo);

        bridge.save(KEY, store.state()).expect("save");
        let loaded = bridge.load(KEY).expect("load").expect("some");
        assert_eq!(&loaded, store.state());
    }

    #[test]
    fn test_load_missing_key() {
        let (bridge, _) = memory_bridge();
        assert!(bridge.load(KEY).expect("load").is_none());
    }

    #[test]
    fn test_load_malformed_json_is_corrupt() {
        let (bridge, backend) = memory_bridge();
        backend.set(KEY, "{\"present\": [oops").expect("set");

        match bridge.load(KEY) {
            Err(LoadError::Corrupt(e)) => assert_eq!(e.key, KEY),
            other => panic!("expected corrupt state, got {other:?}"),
        }
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let (bridge, backend) = memory_bridge();
        backend.set(KEY, r#"{"present": "not a list"}"#).expect("set");
        assert!(matches!(bridge.load(KEY), Err(LoadError::Corrupt(_))));
    }

    #[test]
    fn test_backend_failures_are_persistence_errors() {
        let bridge = PersistenceBridge::new(Arc::new(BrokenStore));
        assert!(matches!(
            bridge.save(KEY, &HistoryState::default()),
            Err(PersistenceError::Backend { .. })
        ));
        assert!(matches!(
            bridge.load(KEY),
            Err(LoadError::Persistence(PersistenceError::Backend { .. }))
        ));
        assert!(bridge.forget(KEY).is_err());
    }

    #[test]
    fn test_hydrate_replays_titles_only() {
        let (bridge, _) = memory_bridge();
        let mut original = store_with(&["A", "B", "C"]);
        original.dispatch(Action::Undo);
        bridge.save(KEY, original.state()).expect("save");

        let mut fresh = HistoryStore::default();
        let outcome = bridge.hydrate(KEY, &mut fresh);

        assert!(matches!(outcome, Hydration::Restored { songs: 2 }));
        assert_eq!(fresh.state().titles(), vec!["A", "B"]);
        // Previous session's redo branch is gone; replayed adds are undoable
        assert!(fresh.state().future.is_empty());
        assert_eq!(fresh.state().past.len(), 2);
    }

    #[test]
    fn test_hydrate_resets_existing_state() {
        let (bridge, _) = memory_bridge();
        let mut store = store_with(&["stale"]);

        let outcome = bridge.hydrate(KEY, &mut store);

        assert!(matches!(outcome, Hydration::Missing));
        assert_eq!(store.state(), &HistoryState::default());
    }

    #[test]
    fn test_hydrate_corrupt_falls_back_to_empty() {
        let (bridge, backend) = memory_bridge();
        backend.set(KEY, "not json at all").expect("set");
        let mut store = store_with(&["stale"]);

        let outcome = bridge.hydrate(KEY, &mut store);

        assert!(matches!(
            outcome,
            Hydration::Discarded(LoadError::Corrupt(_))
        ));
        assert!(store.present().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_observer_saves_each_transition() {
        let (bridge, _) = memory_bridge();
        let mut store = HistoryStore::default();
        store.subscribe(bridge.observer(KEY));

        store.dispatch(Action::add("A"));
        store.dispatch(Action::add("B"));
        let saved = bridge.load(KEY).expect("load").expect("some");
        assert_eq!(saved.titles(), vec!["A", "B"]);

        store.dispatch(Action::Undo);
        let saved = bridge.load(KEY).expect("load").expect("some");
        assert_eq!(saved.titles(), vec!["A"]);
        assert_eq!(saved.future.len(), 1);
    }

    #[test]
    fn test_observer_failure_keeps_memory_state() {
        let bridge = PersistenceBridge::new(Arc::new(BrokenStore));
        let mut store = HistoryStore::default();
        store.subscribe(bridge.observer(KEY));

        assert!(store.dispatch(Action::add("A")));
        assert_eq!(store.state().titles(), vec!["A"]);
    }

    #[test]
    fn test_forget_removes_record() {
        let (bridge, _) = memory_bridge();
        bridge.save(KEY, &HistoryState::default()).expect("save");
        bridge.forget(KEY).expect("forget");
        assert!(bridge.load(KEY).expect("load").is_none());
    }
}
