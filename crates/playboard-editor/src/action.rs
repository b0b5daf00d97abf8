//! Board actions
//!
//! Every change to the diagram goes through a `BoardAction`, whether it comes
//! from the toolbar or from a finished drag or draw gesture.

use glam::Vec2;
use uuid::Uuid;

use playboard_core::{ConnectorStyle, EntityGeometry, Team};

/// A request to change the board
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    /// Place a new player
    PlacePlayer { team: Team, position: Vec2 },
    /// Add a connector drawn by the user
    CreateConnector {
        start: Vec2,
        end: Vec2,
        style: ConnectorStyle,
    },
    /// Replace the geometry of a dragged entity
    MoveEntity { id: Uuid, geometry: EntityGeometry },
    /// Remove a connector
    DeleteConnector { id: Uuid },
    /// Remove a player
    DeletePlayer { id: Uuid },
    /// Change the selected connector
    SelectConnector(Option<Uuid>),
    /// Remove everything and forget history
    ClearAll,
    Undo,
    Redo,
}

impl BoardAction {
    /// Check if this action should be included in undo history
    pub fn is_undoable(&self) -> bool {
        match self {
            // Selection is UI state, not part of the diagram
            BoardAction::SelectConnector(_) => false,

            // Clearing resets the history itself
            BoardAction::ClearAll => false,

            // Undo/Redo themselves are not undoable
            BoardAction::Undo | BoardAction::Redo => false,

            _ => true,
        }
    }

    /// Get a description of the action for display
    pub fn description(&self) -> &'static str {
        match self {
            BoardAction::PlacePlayer { .. } => "Place Player",
            BoardAction::CreateConnector { .. } => "Draw Arrow",
            BoardAction::MoveEntity {
                geometry: EntityGeometry::Player(_),
                ..
            } => "Move Player",
            BoardAction::MoveEntity { .. } => "Move Arrow",
            BoardAction::DeleteConnector { .. } => "Delete Arrow",
            BoardAction::DeletePlayer { .. } => "Delete Player",
            BoardAction::SelectConnector(_) => "Select Arrow",
            BoardAction::ClearAll => "Clear Board",
            BoardAction::Undo => "Undo",
            BoardAction::Redo => "Redo",
        }
    }
}
