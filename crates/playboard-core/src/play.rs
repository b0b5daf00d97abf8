//! Saved plays
//!
//! A `SavedPlay` is a named diagram snapshot with timestamps. Its serialized
//! form is a flat record with camelCase keys and connector styles stored as
//! toolbar ids, the layout plays have always been stored in.

use chrono::{DateTime, Utc};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::diagram::Diagram;
use crate::entity::{Connector, Player, Team};
use crate::error::ValidationError;

/// A named, persisted diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlayRecord", into = "PlayRecord")]
pub struct SavedPlay {
    pub id: Uuid,
    pub name: String,
    pub diagram: Diagram,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedPlay {
    /// Create a play from the current diagram; the name is trimmed and must
    /// not be empty.
    pub fn new(name: &str, diagram: Diagram) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            diagram,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the diagram of an existing play, keeping its identity
    pub fn updated(self, diagram: Diagram) -> Self {
        Self {
            diagram,
            updated_at: Utc::now(),
            ..self
        }
    }
}

/// Trim a play name and reject it if nothing is left
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayRecord {
    id: Uuid,
    name: String,
    #[serde(default)]
    players: Vec<PlayerRecord>,
    #[serde(default)]
    arrows: Vec<ArrowRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct PlayerRecord {
    id: Uuid,
    number: u32,
    team: Team,
    x: f32,
    y: f32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrowRecord {
    id: Uuid,
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    /// Missing or unknown styles load as a plain arrow
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl From<PlayRecord> for SavedPlay {
    fn from(record: PlayRecord) -> Self {
        let players = record
            .players
            .into_iter()
            .map(|p| Player {
                id: p.id,
                number: p.number,
                team: p.team,
                position: Vec2::new(p.x, p.y),
            })
            .collect();
        let connectors = record
            .arrows
            .into_iter()
            .map(|a| Connector {
                id: a.id,
                start: Vec2::new(a.start_x, a.start_y),
                end: Vec2::new(a.end_x, a.end_y),
                style: a
                    .kind
                    .as_deref()
                    .and_then(|k| k.parse().ok())
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            id: record.id,
            name: record.name,
            diagram: Diagram::from_parts(players, connectors),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<SavedPlay> for PlayRecord {
    fn from(play: SavedPlay) -> Self {
        let players = play
            .diagram
            .players()
            .iter()
            .map(|p| PlayerRecord {
                id: p.id,
                number: p.number,
                team: p.team,
                x: p.position.x,
                y: p.position.y,
            })
            .collect();
        let arrows = play
            .diagram
            .connectors()
            .iter()
            .map(|c| ArrowRecord {
                id: c.id,
                start_x: c.start.x,
                start_y: c.start.y,
                end_x: c.end.x,
                end_y: c.end.y,
                kind: Some(c.style.id().to_string()),
            })
            .collect();

        Self {
            id: play.id,
            name: play.name,
            players,
            arrows,
            created_at: play.created_at,
            updated_at: play.updated_at,
        }
    }
}
