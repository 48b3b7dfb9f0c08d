//! Persistence for [`GameState`].
//!
//! The store is the only state shared between invocations. Runs are
//! serialized by whatever triggers them, so no locking happens here.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::state::GameState;

/// Errors that can occur when reading or writing the game state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the state file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to serialize the state.
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reads and writes the persisted game record.
pub trait GameStore {
    /// Loads the current state, creating a fresh one if none exists yet.
    fn load(&self) -> Result<GameState, StoreError>;

    /// Persists the state, replacing the previous record.
    fn save(&self, state: &GameState) -> Result<(), StoreError>;
}

/// Serializes the state the way it is written to disk.
pub fn encode(state: &GameState) -> Result<String, StoreError> {
    let mut text = serde_json::to_string_pretty(state)?;
    text.push('\n');
    Ok(text)
}

/// Parses a stored record, falling back to a fresh state when unreadable.
#[must_use]
pub fn decode(text: &str) -> GameState {
    match serde_json::from_str(text) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Stored game state is unreadable, starting over: {}", e);
            GameState::default()
        }
    }
}

/// A [`GameStore`] backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given file. Nothing is read until [`GameStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl GameStore for JsonFileStore {
    fn load(&self) -> Result<GameState, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(decode(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No state at {}, starting a new game", self.path.display());
                Ok(GameState::default())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, state: &GameState) -> Result<(), StoreError> {
        let text = encode(state)?;

        // Write next to the target and rename so a failed write never truncates it
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!("Saved game state to {}", self.path.display());
        Ok(())
    }
}

/// An in-memory [`GameStore`] holding the encoded record.
///
/// Keeps the exact text so tests can assert that rejected moves leave the
/// stored bytes untouched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store; the first load yields a fresh game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding raw record text, which need not be valid.
    pub fn from_json(text: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(text.into())),
        }
    }

    /// Creates a store holding the given state.
    pub fn with_state(state: &GameState) -> Result<Self, StoreError> {
        Ok(Self::from_json(encode(state)?))
    }

    /// The stored text, if anything was stored.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<GameState, StoreError> {
        Ok(self
            .contents
            .borrow()
            .as_deref()
            .map(decode)
            .unwrap_or_default())
    }

    fn save(&self, state: &GameState) -> Result<(), StoreError> {
        *self.contents.borrow_mut() = Some(encode(state)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stats;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_fresh_state() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("chess_data.json"));

        let state = store.load().unwrap();

        assert_eq!(state, GameState::default());
        // Loading never creates the file
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("chess_data.json"));

        let state = GameState {
            fen: "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2".to_string(),
            last_move: "Bot played e7e5 (in response to e2e4)".to_string(),
            history: vec!["e2e4".to_string(), "e7e5".to_string()],
            start_fen: None,
            stats: Stats {
                community_wins: 1,
                bot_wins: 0,
                draws: 3,
            },
        };
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);
        assert!(!dir.path().join("chess_data.json.tmp").exists());
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chess_data.json");
        let store = JsonFileStore::new(&path);

        store.save(&GameState::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"fen\""));
        assert!(text.contains("\"community_wins\": 0"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_load_garbage_falls_back_to_fresh_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chess_data.json");
        std::fs::write(&path, "not json at all").unwrap();

        let state = JsonFileStore::new(&path).load().unwrap();

        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_load_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        let result = store.load();

        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_memory_store_keeps_exact_text() {
        let store = MemoryStore::from_json("{\"fen\": \"garbage\"}");

        let state = store.load().unwrap();

        // Corrupt FEN is left for the resolver to recover from
        assert_eq!(state.fen, "garbage");
        assert_eq!(store.contents().unwrap(), "{\"fen\": \"garbage\"}");
    }

    #[test]
    fn test_memory_store_empty_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), GameState::default());
        assert!(store.contents().is_none());
    }
}
