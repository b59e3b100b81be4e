// Re-exports from playlist-mod-history so front ends depend on one crate.
pub use playlist_mod_history::{
    generator_for, Action, CorruptStateError, HistoryState, HistoryStore, Hydration,
    IdGenerator, KeyValueStore, LoadError, MemoryStore, PersistenceBridge, PersistenceError,
    RedbStore, SequenceIds, Song, SubscriptionId, TimestampIds, UuidIds,
};
