//! Saved play storage
//!
//! Plays are kept as one JSON array. A file that is missing, unreadable or
//! not shaped like a list of plays reads as an empty list.

use std::path::{Path, PathBuf};

use thiserror::Error;

use playboard_core::{SavedPlay, ValidationError};

/// Errors raised while writing plays
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Errors raised by saving the current diagram as a play
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence for saved plays
pub trait PlayStore {
    /// Store a play. A play with the same name is replaced in place.
    fn save(&mut self, play: SavedPlay) -> Result<(), StoreError>;

    /// All stored plays in save order
    fn load_all(&self) -> Vec<SavedPlay>;

    /// Look up a play by name
    fn find(&self, name: &str) -> Option<SavedPlay> {
        let name = name.trim();
        self.load_all().into_iter().find(|play| play.name == name)
    }
}

/// Insert `play`, replacing any play with the same name
fn upsert(plays: &mut Vec<SavedPlay>, play: SavedPlay) {
    match plays.iter_mut().find(|existing| existing.name == play.name) {
        Some(existing) => *existing = play,
        None => plays.push(play),
    }
}

/// Plays kept in memory, for tests and hosts without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    plays: Vec<SavedPlay>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayStore for MemoryStore {
    fn save(&mut self, play: SavedPlay) -> Result<(), StoreError> {
        upsert(&mut self.plays, play);
        Ok(())
    }

    fn load_all(&self) -> Vec<SavedPlay> {
        self.plays.clone()
    }
}

/// Plays kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the OS-standard data directory
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Get the default plays file path
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("playboard")
            .join("plays.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, plays: &[SavedPlay]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(plays).map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

impl PlayStore for JsonFileStore {
    fn save(&mut self, play: SavedPlay) -> Result<(), StoreError> {
        let mut plays = self.load_all();
        let name = play.name.clone();
        upsert(&mut plays, play);
        self.write_all(&plays)?;
        tracing::info!("Saved play \"{}\" to {:?}", name, self.path);
        Ok(())
    }

    fn load_all(&self) -> Vec<SavedPlay> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read plays file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SavedPlay>>(&content) {
            Ok(plays) => {
                tracing::debug!("Loaded {} plays from {:?}", plays.len(), self.path);
                plays
            }
            Err(e) => {
                tracing::warn!("Failed to parse plays file {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use playboard_core::{Diagram, Team, Vec2};

    use super::*;

    fn play(name: &str) -> SavedPlay {
        let (diagram, _) = Diagram::new().with_new_player(Team::Home, Vec2::new(10.0, 20.0));
        SavedPlay::new(name, diagram).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("plays.json"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plays.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileStore::new(&path).load_all().is_empty());

        std::fs::write(&path, r#"{"name": "not a list"}"#).unwrap();
        assert!(JsonFileStore::new(&path).load_all().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("plays.json");
        let mut store = JsonFileStore::new(&path);

        let first = play("Horns");
        store.save(first.clone()).unwrap();
        store.save(play("Flex")).unwrap();

        let reopened = JsonFileStore::new(&path);
        let plays = reopened.load_all();
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[0], first);
        assert_eq!(reopened.find("Flex").map(|p| p.name), Some("Flex".to_string()));
        assert!(reopened.find("Box").is_none());
    }

    #[test]
    fn test_same_name_replaces() {
        let mut store = MemoryStore::new();
        let first = play("Horns");
        store.save(first.clone()).unwrap();

        let replacement = first.clone().updated(Diagram::new());
        store.save(replacement.clone()).unwrap();

        let plays = store.load_all();
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].id, first.id);
        assert!(plays[0].diagram.is_empty());
    }
}
