pub mod config;

pub use config::{resolve_data_dir, IdStrategy, PlaylistConfig, DEFAULT_STORAGE_KEY};
