//! Playboard Core
//!
//! Model types for sketching basketball plays:
//! - Geometry: court bounds, clamping and connector curve math
//! - Entities: players and connectors
//! - Diagram: the immutable aggregate of placed entities
//! - History: linear undo/redo over diagram snapshots
//! - SavedPlay: named diagrams as they are persisted

pub mod diagram;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod history;
pub mod play;

pub use diagram::*;
pub use entity::*;
pub use error::*;
pub use geometry::Bounds;
pub use history::*;
pub use play::*;

/// Re-exported so downstream crates agree on the point type
pub use glam::Vec2;
