/// Undo/redo history for a playlist, with persisted state.
///
/// Provides a `HistoryStore` that applies playlist actions through a pure
/// reducer over past/present/future snapshots, and a `PersistenceBridge`
/// that writes the state to a string-keyed store (redb on disk) and
/// rehydrates the present list on startup.
pub mod error;
pub mod ids;
pub mod persistence;
pub mod reducer;
pub mod song;
pub mod storage;
pub mod store;

pub use error::{CorruptStateError, LoadError, PersistenceError};
pub use ids::{generator_for, IdGenerator, SequenceIds, TimestampIds, UuidIds};
pub use persistence::{Hydration, PersistenceBridge};
pub use reducer::reduce;
pub use song::{Action, HistoryState, Song};
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
pub use store::{HistoryStore, Observer, SubscriptionId};
