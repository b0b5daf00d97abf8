//! Repositioning players and connectors

use glam::Vec2;
use uuid::Uuid;

use playboard_core::{Bounds, Diagram, EntityGeometry, geometry};

use crate::action::BoardAction;
use crate::input::{PointerDevice, PointerSource, Subscription};
use crate::picking::DragMode;

/// An in-progress drag
#[derive(Debug)]
pub struct DragSession {
    /// Entity being dragged
    pub id: Uuid,
    /// Part of the entity that follows the pointer
    pub mode: DragMode,
    /// Pointer position at the previous event
    pub anchor: Vec2,
    /// Geometry when the drag started
    pub original: EntityGeometry,
    /// Live geometry, not yet committed
    pub geometry: EntityGeometry,
    _subscription: Subscription,
}

impl DragSession {
    /// Apply an incremental pointer delta to the live geometry
    fn apply(&mut self, delta: Vec2, bounds: Bounds) {
        self.geometry = match (self.geometry, self.mode) {
            (EntityGeometry::Player(position), _) => {
                EntityGeometry::Player(geometry::clamp(position + delta, bounds))
            }
            (EntityGeometry::Connector { start, end }, DragMode::Whole) => {
                EntityGeometry::Connector {
                    start: geometry::clamp(start + delta, bounds),
                    end: geometry::clamp(end + delta, bounds),
                }
            }
            (EntityGeometry::Connector { start, end }, DragMode::StartPoint) => {
                EntityGeometry::Connector {
                    start: geometry::clamp(start + delta, bounds),
                    end,
                }
            }
            (EntityGeometry::Connector { start, end }, DragMode::EndPoint) => {
                EntityGeometry::Connector {
                    start,
                    end: geometry::clamp(end + delta, bounds),
                }
            }
        };
    }
}

/// Move machine state
#[derive(Debug, Default)]
pub enum MoveState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Turns a Down/Move*/Up sequence into one geometry update
#[derive(Debug, Default)]
pub struct MoveMachine {
    state: MoveState,
}

impl MoveMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MoveState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MoveState::Dragging(_))
    }

    /// Start dragging entity `id` from `pointer`.
    ///
    /// Players always move whole. Returns false when already dragging or when
    /// the entity does not exist.
    pub fn press(
        &mut self,
        id: Uuid,
        mode: DragMode,
        pointer: Vec2,
        diagram: &Diagram,
        source: &mut dyn PointerSource,
        device: PointerDevice,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(original) = diagram.geometry(id) else {
            tracing::warn!("Drag started on missing entity {}", id);
            return false;
        };
        let mode = match original {
            EntityGeometry::Player(_) => DragMode::Whole,
            EntityGeometry::Connector { .. } => mode,
        };

        tracing::debug!("Drag start {} ({:?})", id, mode);
        self.state = MoveState::Dragging(DragSession {
            id,
            mode,
            anchor: pointer,
            original,
            geometry: original,
            _subscription: source.subscribe(device),
        });
        true
    }

    /// Follow the pointer. Deltas are measured from the previous event so a
    /// point held at the boundary does not jump when the pointer comes back.
    pub fn drag(&mut self, pointer: Vec2, bounds: Bounds) {
        if let MoveState::Dragging(session) = &mut self.state {
            let delta = pointer - session.anchor;
            session.apply(delta, bounds);
            session.anchor = pointer;
        }
    }

    /// Finish the drag, returning the update to commit if anything moved
    pub fn release(&mut self) -> Option<BoardAction> {
        let MoveState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        tracing::debug!("Drag end {}", session.id);
        if session.geometry == session.original {
            return None;
        }
        Some(BoardAction::MoveEntity {
            id: session.id,
            geometry: session.geometry,
        })
    }

    /// Abandon the drag without committing anything
    pub fn cancel(&mut self) {
        if let MoveState::Dragging(session) = std::mem::take(&mut self.state) {
            tracing::debug!("Drag cancelled {}", session.id);
        }
    }

    /// Live geometry of the entity being dragged
    pub fn preview(&self) -> Option<(Uuid, EntityGeometry)> {
        match &self.state {
            MoveState::Dragging(session) => Some((session.id, session.geometry)),
            MoveState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use playboard_core::{ConnectorStyle, Team};

    use super::*;
    use crate::input::testing::CountingSource;

    const BOUNDS: Bounds = Bounds {
        width: 100.0,
        height: 100.0,
    };

    fn connector_diagram(start: Vec2, end: Vec2) -> (Diagram, Uuid) {
        Diagram::new().with_new_connector(start, end, ConnectorStyle::Straight)
    }

    #[test]
    fn test_whole_move_clamps_endpoints_independently() {
        let (diagram, id) = connector_diagram(Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0));
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();

        assert!(machine.press(
            id,
            DragMode::Whole,
            Vec2::new(10.0, 10.0),
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        ));
        machine.drag(Vec2::new(0.0, 0.0), BOUNDS);

        assert_eq!(
            machine.release(),
            Some(BoardAction::MoveEntity {
                id,
                geometry: EntityGeometry::Connector {
                    start: Vec2::new(0.0, 0.0),
                    end: Vec2::new(5.0, 5.0),
                },
            })
        );
    }

    #[test]
    fn test_endpoint_moves_alone() {
        let (diagram, id) = connector_diagram(Vec2::new(20.0, 20.0), Vec2::new(60.0, 20.0));
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();

        machine.press(
            id,
            DragMode::EndPoint,
            Vec2::new(60.0, 20.0),
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        );
        machine.drag(Vec2::new(70.0, 40.0), BOUNDS);

        assert_eq!(
            machine.preview(),
            Some((
                id,
                EntityGeometry::Connector {
                    start: Vec2::new(20.0, 20.0),
                    end: Vec2::new(70.0, 40.0),
                }
            ))
        );
    }

    #[test]
    fn test_incremental_deltas_do_not_jump_on_reentry() {
        let (diagram, id) = Diagram::new().with_new_player(Team::Home, Vec2::new(90.0, 50.0));
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();

        machine.press(
            id,
            DragMode::StartPoint,
            Vec2::new(90.0, 50.0),
            &diagram,
            &mut source,
            PointerDevice::Touch,
        );
        // Far past the right edge, then back by 10
        machine.drag(Vec2::new(150.0, 50.0), BOUNDS);
        assert_eq!(
            machine.preview().map(|(_, g)| g),
            Some(EntityGeometry::Player(Vec2::new(100.0, 50.0)))
        );
        machine.drag(Vec2::new(140.0, 50.0), BOUNDS);
        assert_eq!(
            machine.preview().map(|(_, g)| g),
            Some(EntityGeometry::Player(Vec2::new(90.0, 50.0)))
        );
    }

    #[test]
    fn test_subscription_released_on_every_exit() {
        let (diagram, id) = Diagram::new().with_new_player(Team::Away, Vec2::new(10.0, 10.0));
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();

        machine.press(
            id,
            DragMode::Whole,
            Vec2::ZERO,
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        );
        assert_eq!(source.active(), 1);
        machine.release();
        assert_eq!(source.active(), 0);

        machine.press(
            id,
            DragMode::Whole,
            Vec2::ZERO,
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        );
        machine.cancel();
        assert_eq!(source.active(), 0);

        machine.press(
            id,
            DragMode::Whole,
            Vec2::ZERO,
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        );
        drop(machine);
        assert_eq!(source.active(), 0);
        assert_eq!(source.total(), 3);
    }

    #[test]
    fn test_click_without_motion_commits_nothing() {
        let (diagram, id) = Diagram::new().with_new_player(Team::Home, Vec2::new(10.0, 10.0));
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();

        machine.press(
            id,
            DragMode::Whole,
            Vec2::new(10.0, 10.0),
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        );
        machine.drag(Vec2::new(10.0, 10.0), BOUNDS);
        assert_eq!(machine.release(), None);
        assert!(!machine.is_dragging());
    }

    #[test]
    fn test_second_press_is_ignored() {
        let (diagram, a) = Diagram::new().with_new_player(Team::Home, Vec2::ZERO);
        let (diagram, b) = diagram.with_new_player(Team::Home, Vec2::ONE);
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();

        assert!(machine.press(
            a,
            DragMode::Whole,
            Vec2::ZERO,
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        ));
        assert!(!machine.press(
            b,
            DragMode::Whole,
            Vec2::ONE,
            &diagram,
            &mut source,
            PointerDevice::Mouse,
        ));
        assert_eq!(machine.preview().map(|(id, _)| id), Some(a));
        assert_eq!(source.active(), 1);
    }

    #[test]
    fn test_missing_entity() {
        let mut source = CountingSource::default();
        let mut machine = MoveMachine::new();
        assert!(!machine.press(
            Uuid::new_v4(),
            DragMode::Whole,
            Vec2::ZERO,
            &Diagram::new(),
            &mut source,
            PointerDevice::Mouse,
        ));
        assert_eq!(source.total(), 0);
        assert_eq!(machine.release(), None);
    }
}
