//! Hit-testing on the court
//!
//! Resolves a pointer position to the thing under it. Handles of the selected
//! connector win over everything else, then players (which render above
//! connectors), then connector bodies.

use glam::Vec2;
use uuid::Uuid;

use playboard_core::{Diagram, geometry};

/// Which part of a connector was grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// The whole connector (or a player)
    Whole,
    StartPoint,
    EndPoint,
}

/// Something under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Player(Uuid),
    Connector { id: Uuid, mode: DragMode },
    /// Delete button shown at the midpoint of the selected connector
    ConnectorDelete(Uuid),
}

impl PickTarget {
    pub fn id(&self) -> Uuid {
        match self {
            PickTarget::Player(id)
            | PickTarget::Connector { id, .. }
            | PickTarget::ConnectorDelete(id) => *id,
        }
    }
}

/// Pick radii in court units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRadii {
    /// Endpoint handles of the selected connector
    pub handle: f32,
    /// Delete button of the selected connector
    pub delete_button: f32,
    /// Player markers
    pub player: f32,
    /// Distance from a connector's path that still counts as a hit
    pub connector: f32,
}

impl Default for PickRadii {
    fn default() -> Self {
        Self {
            handle: 5.0,
            delete_button: 8.0,
            player: 16.0,
            connector: 6.0,
        }
    }
}

/// Pick the entity under `point`
pub fn pick(
    diagram: &Diagram,
    point: Vec2,
    selected_connector: Option<Uuid>,
    radii: &PickRadii,
) -> Option<PickTarget> {
    if let Some(connector) = selected_connector.and_then(|id| diagram.connector(id)) {
        let id = connector.id;
        if geometry::distance(connector.start, point) <= radii.handle {
            return Some(PickTarget::Connector {
                id,
                mode: DragMode::StartPoint,
            });
        }
        if geometry::distance(connector.end, point) <= radii.handle {
            return Some(PickTarget::Connector {
                id,
                mode: DragMode::EndPoint,
            });
        }
        if geometry::distance(connector.midpoint(), point) <= radii.delete_button {
            return Some(PickTarget::ConnectorDelete(id));
        }
    }

    // Later players are drawn on top
    if let Some(player) = diagram
        .players()
        .iter()
        .rev()
        .find(|p| geometry::distance(p.position, point) <= radii.player)
    {
        return Some(PickTarget::Player(player.id));
    }

    let mut closest: Option<(Uuid, f32)> = None;
    for connector in diagram.connectors() {
        let dist = connector.path().distance_to(point);
        if dist <= radii.connector && closest.is_none_or(|(_, best)| dist < best) {
            closest = Some((connector.id, dist));
        }
    }

    closest.map(|(id, _)| PickTarget::Connector {
        id,
        mode: DragMode::Whole,
    })
}
