//! Diagram service
//!
//! Owns the current diagram, its undo history and the connector selection.
//! Every successful change commits exactly one history entry. The history is
//! seeded with the starting diagram so the first change can be undone.

use std::sync::Arc;

use glam::Vec2;
use uuid::Uuid;

use playboard_core::{
    Bounds, ConnectorStyle, Diagram, DiagramError, EntityGeometry, History, SavedPlay, Team,
    geometry, validate_name,
};

use crate::action::BoardAction;
use crate::store::{PlayStore, SaveError, StoreError};

const BASE_DESCRIPTION: &str = "Empty Board";
const LOAD_DESCRIPTION: &str = "Open Play";

/// Façade over the diagram model
#[derive(Debug, Clone)]
pub struct DiagramService {
    current: Arc<Diagram>,
    history: History,
    selected_connector: Option<Uuid>,
    bounds: Bounds,
}

impl Default for DiagramService {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl DiagramService {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_max_history(bounds, History::default().max_entries())
    }

    /// Create a service keeping at most `max_history` undo steps
    pub fn with_max_history(bounds: Bounds, max_history: usize) -> Self {
        let mut service = Self {
            current: Arc::new(Diagram::new()),
            history: History::new(max_history),
            selected_connector: None,
            bounds,
        };
        service.reset_history(BASE_DESCRIPTION);
        service
    }

    // ============== Queries ==============

    /// Immutable view of the current diagram
    pub fn snapshot(&self) -> Arc<Diagram> {
        Arc::clone(&self.current)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn selected_connector(&self) -> Option<Uuid> {
        self.selected_connector
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ============== Edits ==============

    /// Place a player of `team`, returning its id
    pub fn place_player(&mut self, team: Team, point: Vec2) -> Uuid {
        let position = geometry::clamp(point, self.bounds);
        let (next, id) = self.current.with_new_player(team, position);
        self.record(&BoardAction::PlacePlayer { team, position }, next);
        self.selected_connector = None;
        tracing::debug!(
            "Placed {} player at ({:.1}, {:.1})",
            team.name(),
            position.x,
            position.y
        );
        id
    }

    /// Add a connector, returning its id
    pub fn create_connector(&mut self, start: Vec2, end: Vec2, style: ConnectorStyle) -> Uuid {
        let start = geometry::clamp(start, self.bounds);
        let end = geometry::clamp(end, self.bounds);
        let (next, id) = self.current.with_new_connector(start, end, style);
        self.record(&BoardAction::CreateConnector { start, end, style }, next);
        tracing::debug!("Created {} connector {}", style, id);
        id
    }

    /// Replace an entity's geometry with the result of a drag
    pub fn move_entity(&mut self, id: Uuid, geometry: EntityGeometry) -> Result<(), DiagramError> {
        let geometry = geometry.clamped(self.bounds);
        let next = self.current.with_geometry(id, geometry)?;
        self.record(&BoardAction::MoveEntity { id, geometry }, next);
        Ok(())
    }

    pub fn delete_connector(&mut self, id: Uuid) -> Result<(), DiagramError> {
        let next = self.current.without_connector(id)?;
        self.record(&BoardAction::DeleteConnector { id }, next);
        if self.selected_connector == Some(id) {
            self.selected_connector = None;
        }
        tracing::debug!("Deleted connector {}", id);
        Ok(())
    }

    pub fn delete_player(&mut self, id: Uuid) -> Result<(), DiagramError> {
        let next = self.current.without_player(id)?;
        self.record(&BoardAction::DeletePlayer { id }, next);
        tracing::debug!("Deleted player {}", id);
        Ok(())
    }

    /// Empty the board and forget all history
    pub fn clear_all(&mut self) {
        self.record(&BoardAction::ClearAll, Diagram::new());
        self.selected_connector = None;
        self.reset_history(BASE_DESCRIPTION);
        tracing::info!("Board cleared");
    }

    /// Replace the diagram, starting a fresh history from it
    pub fn load(&mut self, diagram: Diagram) {
        self.current = Arc::new(diagram.clamped_to(self.bounds));
        self.selected_connector = None;
        self.reset_history(LOAD_DESCRIPTION);
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(diagram) => {
                self.restore(diagram);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(diagram) => {
                self.restore(diagram);
                true
            }
            None => false,
        }
    }

    /// Set the court size. Entities left outside a smaller court are pulled
    /// back in without adding a history entry.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.clamp_current();
    }

    /// Select a connector, or clear the selection with `None`
    pub fn select_connector(&mut self, id: Option<Uuid>) {
        self.selected_connector = id.filter(|id| self.current.connector(*id).is_some());
    }

    /// Dispatch a board action
    pub fn apply(&mut self, action: BoardAction) -> Result<(), DiagramError> {
        match action {
            BoardAction::PlacePlayer { team, position } => {
                self.place_player(team, position);
            }
            BoardAction::CreateConnector { start, end, style } => {
                self.create_connector(start, end, style);
            }
            BoardAction::MoveEntity { id, geometry } => self.move_entity(id, geometry)?,
            BoardAction::DeleteConnector { id } => self.delete_connector(id)?,
            BoardAction::DeletePlayer { id } => self.delete_player(id)?,
            BoardAction::SelectConnector(id) => self.select_connector(id),
            BoardAction::ClearAll => self.clear_all(),
            BoardAction::Undo => {
                self.undo();
            }
            BoardAction::Redo => {
                self.redo();
            }
        }
        Ok(())
    }

    // ============== Plays ==============

    /// Save the current diagram under `name`.
    ///
    /// Saving over an existing name keeps that play's id and creation time.
    pub fn save_play(&self, name: &str, store: &mut dyn PlayStore) -> Result<SavedPlay, SaveError> {
        let name = validate_name(name)?;
        let diagram = Diagram::clone(&self.current);
        let play = match store.find(&name) {
            Some(existing) => existing.updated(diagram),
            None => SavedPlay::new(&name, diagram)?,
        };
        store.save(play.clone())?;
        tracing::info!("Saved play \"{}\"", play.name);
        Ok(play)
    }

    /// Load a saved play onto the board
    pub fn open_play(&mut self, play: &SavedPlay) {
        self.load(play.diagram.clone());
        tracing::info!("Opened play \"{}\"", play.name);
    }

    /// Current diagram as pretty JSON
    pub fn export_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self.current.as_ref())
            .map_err(|e| StoreError::Serialize(e.to_string()))
    }

    // ============== Internals ==============

    /// Make `next` current, adding a history entry if `action` is undoable
    fn record(&mut self, action: &BoardAction, next: Diagram) {
        self.current = Arc::new(next);
        if action.is_undoable() {
            self.history.commit(Arc::clone(&self.current), action.description());
        }
    }

    fn reset_history(&mut self, description: &str) {
        self.history.clear();
        self.history.commit(Arc::clone(&self.current), description);
    }

    fn restore(&mut self, diagram: Arc<Diagram>) {
        self.current = diagram;
        // Snapshots may predate a court resize
        self.clamp_current();
        let current = &self.current;
        self.selected_connector = self
            .selected_connector
            .filter(|id| current.connector(*id).is_some());
    }

    fn clamp_current(&mut self) {
        let clamped = self.current.clamped_to(self.bounds);
        if clamped != *self.current {
            let Bounds { width, height } = self.bounds;
            tracing::debug!("Clamped diagram to {}x{}", width, height);
            self.current = Arc::new(clamped);
        }
    }
}
