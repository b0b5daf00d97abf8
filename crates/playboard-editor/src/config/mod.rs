//! Editor configuration module
//!
//! Tunable interaction thresholds, the default court size and where plays are
//! stored.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use std::path::PathBuf;

use playboard_core::Bounds;
use serde::{Deserialize, Serialize};

use crate::controller::MIN_DRAW_DISTANCE;
use crate::picking::PickRadii;
use crate::store::JsonFileStore;

/// Complete editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Configuration format version
    pub version: u32,
    /// Strokes not longer than this are discarded
    pub min_draw_distance: f32,
    /// Pick radius of the selected connector's endpoint handles
    pub handle_radius: f32,
    /// Pick radius of the selected connector's delete button
    pub delete_button_radius: f32,
    /// Pick radius of player markers
    pub player_pick_radius: f32,
    /// Distance from a connector's path that still picks it
    pub connector_pick_tolerance: f32,
    /// Maximum number of undo steps
    pub max_history: usize,
    /// Court size used before the host reports the rendered size
    pub default_court: Bounds,
    /// Plays file; the OS data directory is used when unset
    pub plays_file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let radii = PickRadii::default();
        Self {
            version: 0,
            min_draw_distance: MIN_DRAW_DISTANCE,
            handle_radius: radii.handle,
            delete_button_radius: radii.delete_button,
            player_pick_radius: radii.player,
            connector_pick_tolerance: radii.connector,
            max_history: 100,
            default_court: Bounds::default(),
            plays_file: None,
        }
    }
}

impl EditorConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }

    pub fn pick_radii(&self) -> PickRadii {
        PickRadii {
            handle: self.handle_radius,
            delete_button: self.delete_button_radius,
            player: self.player_pick_radius,
            connector: self.connector_pick_tolerance,
        }
    }

    /// Resolved location of the plays file
    pub fn plays_path(&self) -> PathBuf {
        self.plays_file
            .clone()
            .unwrap_or_else(JsonFileStore::default_path)
    }

    /// Store for the configured plays file
    pub fn play_store(&self) -> JsonFileStore {
        JsonFileStore::new(self.plays_path())
    }
}
