//! Configuration manager for loading, saving, and managing editor configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::EditorConfig;

/// Shared configuration manager type
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Error during deserialization
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Configuration manager handles loading, saving, and accessing editor configuration
#[derive(Debug)]
pub struct ConfigManager {
    config: EditorConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Create a new configuration manager, loading from disk if available
    pub fn new() -> Self {
        Self::with_path(Self::config_path())
    }

    /// Create a manager backed by a specific file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let config = match Self::load_from_path(&config_path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::info!("No config file found, using defaults");
                EditorConfig::new()
            }
            Err(e) => {
                tracing::warn!("Failed to load config file: {}", e);
                EditorConfig::new()
            }
        };

        Self {
            config,
            config_path,
            dirty: false,
        }
    }

    /// Get the OS-standard configuration directory
    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("playboard")
    }

    /// Get the configuration file path
    fn config_path() -> PathBuf {
        Self::config_dir().join("config.ron")
    }

    /// Load configuration from a file path; a missing file is not an error
    fn load_from_path(path: &Path) -> Result<Option<EditorConfig>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        let config =
            ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(Some(config))
    }

    /// Get a reference to the current configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration (marks as dirty)
    pub fn config_mut(&mut self) -> &mut EditorConfig {
        self.dirty = true;
        &mut self.config
    }

    /// Check if the configuration has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the configuration to disk
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        // Ensure config directory exists
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(&self.config_path, &content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", self.config_path);
        self.dirty = false;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset_to_defaults(&mut self) {
        self.config = EditorConfig::new();
        self.dirty = true;
    }

    /// Get the config file path (for display purposes)
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new shared configuration manager
pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.ron"));
        assert_eq!(manager.config(), &EditorConfig::new());
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_unparsable_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "not ron at all (").unwrap();
        let manager = ConfigManager::with_path(&path);
        assert_eq!(manager.config(), &EditorConfig::new());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let mut manager = ConfigManager::with_path(&path);
        manager.config_mut().min_draw_distance = 25.0;
        manager.config_mut().max_history = 10;
        assert!(manager.is_dirty());
        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = ConfigManager::with_path(&path);
        assert_eq!(reloaded.config().min_draw_distance, 25.0);
        assert_eq!(reloaded.config().max_history, 10);
        assert_eq!(reloaded.config_file_path(), path.as_path());
    }

    #[test]
    fn test_reset_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ConfigManager::with_path(dir.path().join("config.ron"));
        manager.config_mut().handle_radius = 1.0;
        manager.save().unwrap();

        manager.reset_to_defaults();
        assert!(manager.is_dirty());
        assert_eq!(manager.config(), &EditorConfig::new());
    }

    #[test]
    fn test_shared_config() {
        let dir = tempfile::tempdir().unwrap();
        let shared: SharedConfig = Arc::new(RwLock::new(ConfigManager::with_path(
            dir.path().join("config.ron"),
        )));
        shared.write().config_mut().player_pick_radius = 20.0;
        assert_eq!(shared.read().config().player_pick_radius, 20.0);
    }
}
