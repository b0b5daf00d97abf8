//! The interactive board
//!
//! Routes pointer events through the active tool, picking and the gesture
//! machines into the diagram service, and produces a `Scene` for rendering.

use std::sync::Arc;

use uuid::Uuid;

use playboard_core::{
    Bounds, Connector, ConnectorPath, Diagram, DiagramError, EntityGeometry, Player, SavedPlay,
};

use crate::config::EditorConfig;
use crate::controller::{DrawMachine, MoveMachine};
use crate::input::{PointerEvent, PointerPhase, PointerSource};
use crate::picking::{self, DragMode, PickRadii, PickTarget};
use crate::service::DiagramService;
use crate::store::{PlayStore, SaveError, StoreError};
use crate::tool::Tool;

/// A connector as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorView {
    pub connector: Connector,
    pub path: ConnectorPath,
    /// Draw endpoint handles and the delete button
    pub selected: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub bounds: Bounds,
    pub players: Vec<Player>,
    pub connectors: Vec<ConnectorView>,
    /// Connector being drawn
    pub draft: Option<ConnectorPath>,
}

/// Board state: the diagram service plus the active tool and gestures
#[derive(Debug)]
pub struct Board {
    service: DiagramService,
    tool: Tool,
    move_machine: MoveMachine,
    draw_machine: DrawMachine,
    radii: PickRadii,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&EditorConfig::new())
    }
}

impl Board {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            service: DiagramService::with_max_history(config.default_court, config.max_history),
            tool: Tool::default(),
            move_machine: MoveMachine::new(),
            draw_machine: DrawMachine::new(config.min_draw_distance),
            radii: config.pick_radii(),
        }
    }

    /// Pick up changed thresholds. History and diagram are kept.
    pub fn apply_config(&mut self, config: &EditorConfig) {
        self.radii = config.pick_radii();
        self.draw_machine.set_min_distance(config.min_draw_distance);
    }

    pub fn service(&self) -> &DiagramService {
        &self.service
    }

    pub fn snapshot(&self) -> Arc<Diagram> {
        self.service.snapshot()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Clears the selection and drops any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.cancel_gestures();
        self.service.select_connector(None);
        if self.tool != tool {
            tracing::debug!("Tool: {} -> {}", self.tool, tool);
        }
        self.tool = tool;
    }

    /// Whether a drag or a draw is in progress
    pub fn is_busy(&self) -> bool {
        self.move_machine.is_dragging() || self.draw_machine.is_drawing()
    }

    /// Abandon any drag or draw without committing
    pub fn cancel_gestures(&mut self) {
        self.move_machine.cancel();
        self.draw_machine.cancel();
    }

    /// Report the rendered court size
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.service.set_bounds(bounds);
    }

    /// Feed one pointer event in court coordinates
    pub fn handle_pointer(&mut self, event: PointerEvent, source: &mut dyn PointerSource) {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event, source),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => self.pointer_up(event),
        }
    }

    fn pointer_down(&mut self, event: PointerEvent, source: &mut dyn PointerSource) {
        if self.is_busy() {
            return;
        }

        let point = event.position;
        match self.tool {
            Tool::Player(team) => {
                self.service.place_player(team, point);
            }
            Tool::Connector(_) => {
                let bounds = self.service.bounds();
                self.draw_machine
                    .press(point, self.tool, bounds, source, event.device);
            }
            Tool::Move => {
                let diagram = self.service.snapshot();
                let target = picking::pick(
                    &diagram,
                    point,
                    self.service.selected_connector(),
                    &self.radii,
                );
                match target {
                    Some(PickTarget::ConnectorDelete(id)) => {
                        log_stale(self.service.delete_connector(id));
                    }
                    Some(PickTarget::Player(id)) => {
                        self.service.select_connector(None);
                        self.move_machine.press(
                            id,
                            DragMode::Whole,
                            point,
                            &diagram,
                            source,
                            event.device,
                        );
                    }
                    Some(PickTarget::Connector { id, mode }) => {
                        self.service.select_connector(Some(id));
                        self.move_machine
                            .press(id, mode, point, &diagram, source, event.device);
                    }
                    None => self.service.select_connector(None),
                }
            }
        }
    }

    fn pointer_move(&mut self, event: PointerEvent) {
        let bounds = self.service.bounds();
        self.move_machine.drag(event.position, bounds);
        self.draw_machine.drag(event.position, bounds);
    }

    fn pointer_up(&mut self, event: PointerEvent) {
        // The release position counts as the last move
        self.pointer_move(event);

        let actions = [self.move_machine.release(), self.draw_machine.release()];
        for action in actions.into_iter().flatten() {
            log_stale(self.service.apply(action));
        }
    }

    // ============== Toolbar ==============

    pub fn undo(&mut self) -> bool {
        self.cancel_gestures();
        self.service.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gestures();
        self.service.redo()
    }

    pub fn clear(&mut self) {
        self.cancel_gestures();
        self.service.clear_all();
    }

    /// Delete the selected connector, if any
    pub fn delete_selected(&mut self) -> Option<Uuid> {
        let id = self.service.selected_connector()?;
        self.cancel_gestures();
        let result = self.service.delete_connector(id);
        let deleted = result.is_ok();
        log_stale(result);
        deleted.then_some(id)
    }

    pub fn save(&self, name: &str, store: &mut dyn PlayStore) -> Result<SavedPlay, SaveError> {
        self.service.save_play(name, store)
    }

    pub fn open(&mut self, play: &SavedPlay) {
        self.cancel_gestures();
        self.service.open_play(play);
    }

    pub fn export(&self) -> Result<String, StoreError> {
        self.service.export_json()
    }

    // ============== Rendering ==============

    /// Current diagram with any live drag applied, plus the draw preview
    pub fn scene(&self) -> Scene {
        let diagram = self.service.snapshot();
        let live = self.move_machine.preview();
        let selected = self.service.selected_connector();

        let players = diagram
            .players()
            .iter()
            .map(|player| match live {
                Some((id, EntityGeometry::Player(position))) if id == player.id => {
                    player.with_position(position)
                }
                _ => *player,
            })
            .collect();

        let connectors = diagram
            .connectors()
            .iter()
            .map(|connector| {
                let connector = match live {
                    Some((id, EntityGeometry::Connector { start, end })) if id == connector.id => {
                        connector.with_endpoints(start, end)
                    }
                    _ => *connector,
                };
                ConnectorView {
                    connector,
                    path: connector.path(),
                    selected: selected == Some(connector.id),
                }
            })
            .collect();

        Scene {
            bounds: self.service.bounds(),
            players,
            connectors,
            draft: self.draw_machine.preview(),
        }
    }
}

/// Updates can name entities that vanished in the meantime; those are dropped
fn log_stale(result: Result<(), DiagramError>) {
    if let Err(e) = result {
        tracing::warn!("Ignoring board update: {}", e);
    }
}
