//! The diagram aggregate
//!
//! A `Diagram` is an immutable value: every update returns a new diagram and
//! leaves the receiver untouched, so snapshots held by the history stay valid.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Connector, ConnectorStyle, EntityGeometry, Player, Team};
use crate::error::DiagramError;
use crate::geometry::{self, Bounds};

/// Players and connectors placed on the court, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    players: Vec<Player>,
    connectors: Vec<Connector>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a diagram from existing entities, dropping any repeated ids
    pub fn from_parts(players: Vec<Player>, connectors: Vec<Connector>) -> Self {
        let mut diagram = Self::default();
        for player in players {
            if !diagram.contains(player.id) {
                diagram.players.push(player);
            }
        }
        for connector in connectors {
            if !diagram.contains(connector.id) {
                diagram.connectors.push(connector);
            }
        }
        diagram
    }

    // ============== Queries ==============

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn connector(&self, id: Uuid) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    /// Check whether any entity uses this id
    pub fn contains(&self, id: Uuid) -> bool {
        self.player(id).is_some() || self.connector(id).is_some()
    }

    /// Current geometry of an entity
    pub fn geometry(&self, id: Uuid) -> Option<EntityGeometry> {
        if let Some(player) = self.player(id) {
            return Some(EntityGeometry::Player(player.position));
        }
        self.connector(id).map(|c| EntityGeometry::Connector {
            start: c.start,
            end: c.end,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.connectors.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.players.len() + self.connectors.len()
    }

    pub fn team_count(&self, team: Team) -> usize {
        self.players.iter().filter(|p| p.team == team).count()
    }

    // ============== Updates ==============

    /// Append a new player of `team`, numbered per team
    pub fn with_new_player(&self, team: Team, position: Vec2) -> (Self, Uuid) {
        let player = Player::new(team, position, &self.players);
        let id = player.id;
        (self.with_player(player), id)
    }

    /// Append a new connector
    pub fn with_new_connector(
        &self,
        start: Vec2,
        end: Vec2,
        style: ConnectorStyle,
    ) -> (Self, Uuid) {
        let connector = Connector::new(start, end, style);
        let id = connector.id;
        (self.with_connector(connector), id)
    }

    pub fn with_player(&self, player: Player) -> Self {
        let mut next = self.clone();
        next.players.push(player);
        next
    }

    pub fn with_connector(&self, connector: Connector) -> Self {
        let mut next = self.clone();
        next.connectors.push(connector);
        next
    }

    /// Replace the geometry of one entity
    pub fn with_geometry(&self, id: Uuid, geometry: EntityGeometry) -> Result<Self, DiagramError> {
        let mut next = self.clone();
        match geometry {
            EntityGeometry::Player(position) => {
                let player = next
                    .players
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| self.missing_or_mismatched(id))?;
                *player = player.with_position(position);
            }
            EntityGeometry::Connector { start, end } => {
                let connector = next
                    .connectors
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| self.missing_or_mismatched(id))?;
                *connector = connector.with_endpoints(start, end);
            }
        }
        Ok(next)
    }

    pub fn without_connector(&self, id: Uuid) -> Result<Self, DiagramError> {
        if self.connector(id).is_none() {
            return Err(self.missing_or_mismatched(id));
        }
        let mut next = self.clone();
        next.connectors.retain(|c| c.id != id);
        Ok(next)
    }

    pub fn without_player(&self, id: Uuid) -> Result<Self, DiagramError> {
        if self.player(id).is_none() {
            return Err(self.missing_or_mismatched(id));
        }
        let mut next = self.clone();
        next.players.retain(|p| p.id != id);
        Ok(next)
    }

    /// Clamp every stored point into `bounds`
    pub fn clamped_to(&self, bounds: Bounds) -> Self {
        Self {
            players: self
                .players
                .iter()
                .map(|p| p.with_position(geometry::clamp(p.position, bounds)))
                .collect(),
            connectors: self
                .connectors
                .iter()
                .map(|c| {
                    c.with_endpoints(
                        geometry::clamp(c.start, bounds),
                        geometry::clamp(c.end, bounds),
                    )
                })
                .collect(),
        }
    }

    fn missing_or_mismatched(&self, id: Uuid) -> DiagramError {
        if self.contains(id) {
            DiagramError::GeometryMismatch(id)
        } else {
            DiagramError::EntityNotFound(id)
        }
    }
}
