/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage key the playlist state is written under.
pub const DEFAULT_STORAGE_KEY: &str = "playlistState";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PLAYLIST_DATA_DIR";

/// How song identifiers are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Process-local counter (`song-0`, `song-1`, ...).
    #[default]
    Sequence,
    /// Wall-clock milliseconds, bumped on collision.
    Timestamp,
    /// Random v4 UUIDs.
    Uuid,
}

impl std::str::FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" => Ok(Self::Sequence),
            "timestamp" => Ok(Self::Timestamp),
            "uuid" => Ok(Self::Uuid),
            other => Err(format!("unknown id strategy: {other}")),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Key the serialized history state is stored under.
    pub storage_key: String,
    /// Directory holding the playlist database. Empty = resolved at runtime.
    pub data_dir: String,
    pub id_strategy: IdStrategy,
    /// Echo the playlist after every command in the interactive shell.
    pub echo_after_edit: bool,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: String::new(),
            id_strategy: IdStrategy::default(),
            echo_after_edit: true,
        }
    }
}

impl PlaylistConfig {
    /// Returns the config file path: exe directory + `playlist.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("playlist.json")))
            .unwrap_or_else(|| PathBuf::from("playlist.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<PlaylistConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Returns the directory the playlist database lives in.
    ///
    /// An explicit `data_dir` wins; otherwise see [`resolve_data_dir`].
    pub fn resolved_data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            resolve_data_dir()
        } else {
            PathBuf::from(&self.data_dir)
        }
    }

    /// Resets invalid fields to their defaults.
    pub fn sanitize(&mut self) {
        let trimmed = self.storage_key.trim();
        if trimmed.is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        } else if trimmed.len() != self.storage_key.len() {
            self.storage_key = trimmed.to_string();
        }
        self.data_dir = self.data_dir.trim().to_string();
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `PLAYLIST_DATA_DIR` environment variable
/// 2. `playlist/` under the platform data directory
/// 3. `.data/` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .map(|d| d.join("playlist"))
        .unwrap_or_else(|| PathBuf::from(".data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlaylistConfig::default();
        assert_eq!(config.storage_key, "playlistState");
        assert!(config.data_dir.is_empty());
        assert_eq!(config.id_strategy, IdStrategy::Sequence);
        assert!(config.echo_after_edit);
    }

    #[test]
    fn test_sanitize_resets_blank_key() {
        let mut config = PlaylistConfig {
            storage_key: "   ".to_string(),
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_sanitize_trims_key_and_dir() {
        let mut config = PlaylistConfig {
            storage_key: "  road-trip ".to_string(),
            data_dir: " /tmp/playlists ".to_string(),
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.storage_key, "road-trip");
        assert_eq!(config.data_dir, "/tmp/playlists");
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = PlaylistConfig {
            data_dir: "/srv/playlist".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/srv/playlist"));
    }

    #[test]
    fn test_id_strategy_from_str() {
        assert_eq!("sequence".parse::<IdStrategy>(), Ok(IdStrategy::Sequence));
        assert_eq!("Timestamp".parse::<IdStrategy>(), Ok(IdStrategy::Timestamp));
        assert_eq!(" uuid ".parse::<IdStrategy>(), Ok(IdStrategy::Uuid));
        assert!("random".parse::<IdStrategy>().is_err());
    }

    #[test]
    fn test_id_strategy_serializes_lowercase() {
        let json = serde_json::to_string(&IdStrategy::Timestamp).unwrap();
        assert_eq!(json, "\"timestamp\"");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"storage_key": "mix"}"#;
        let parsed: PlaylistConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.storage_key, "mix");
        assert_eq!(parsed.id_strategy, IdStrategy::Sequence);
        assert!(parsed.echo_after_edit);
    }

    #[test]
    fn test_resolve_data_dir_with_env_var() {
        let original = std::env::var(DATA_DIR_ENV).ok();
        std::env::set_var(DATA_DIR_ENV, "/custom/path");
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/custom/path"));
        match original {
            Some(val) => std::env::set_var(DATA_DIR_ENV, val),
            None => std::env::remove_var(DATA_DIR_ENV),
        }
    }
}
