//! Diagram entities
//!
//! Players and connectors are small `Copy` values. Updates return new values
//! so that history snapshots never observe later edits.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, Bounds};

/// Side a player belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn name(&self) -> &'static str {
        match self {
            Team::Home => "Home",
            Team::Away => "Away",
        }
    }
}

/// A numbered player marker on the court
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub number: u32,
    pub team: Team,
    pub position: Vec2,
}

impl Player {
    /// Create a player numbered after the existing players of the same team.
    ///
    /// Existing players are never renumbered, so deleting one leaves a gap.
    pub fn new(team: Team, position: Vec2, existing: &[Player]) -> Self {
        let teammates = existing.iter().filter(|p| p.team == team).count() as u32;
        Self {
            id: Uuid::new_v4(),
            number: teammates + 1,
            team,
            position,
        }
    }

    pub fn with_position(self, position: Vec2) -> Self {
        Self { position, ..self }
    }
}

/// Visual style of a connector, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectorStyle {
    /// Solid line with an arrowhead at the end
    #[default]
    #[serde(rename = "arrow")]
    Straight,
    /// Dashed line with an arrowhead at the end
    #[serde(rename = "dotted-arrow")]
    Dotted,
    /// Solid line with arrowheads at both ends
    #[serde(rename = "bidirectional-arrow")]
    Bidirectional,
    /// Quadratic curve bowing to the left of travel
    #[serde(rename = "curved-arrow")]
    Curved,
    /// Quadratic curve bowing to the right of travel
    #[serde(rename = "curved-arrow-reverse")]
    CurvedReverse,
}

impl ConnectorStyle {
    pub const ALL: [ConnectorStyle; 5] = [
        ConnectorStyle::Straight,
        ConnectorStyle::Dotted,
        ConnectorStyle::Bidirectional,
        ConnectorStyle::Curved,
        ConnectorStyle::CurvedReverse,
    ];

    /// Stable identifier shared with the toolbar and saved plays
    pub fn id(&self) -> &'static str {
        match self {
            ConnectorStyle::Straight => "arrow",
            ConnectorStyle::Dotted => "dotted-arrow",
            ConnectorStyle::Bidirectional => "bidirectional-arrow",
            ConnectorStyle::Curved => "curved-arrow",
            ConnectorStyle::CurvedReverse => "curved-arrow-reverse",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConnectorStyle::Straight => "Arrow",
            ConnectorStyle::Dotted => "Dotted Arrow",
            ConnectorStyle::Bidirectional => "Bidirectional Arrow",
            ConnectorStyle::Curved => "Curved Arrow",
            ConnectorStyle::CurvedReverse => "Curved Arrow (Reverse)",
        }
    }

    pub fn is_curved(&self) -> bool {
        matches!(self, ConnectorStyle::Curved | ConnectorStyle::CurvedReverse)
    }
}

impl fmt::Display for ConnectorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string is not a known connector style id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connector style: {0}")]
pub struct UnknownStyle(pub String);

impl FromStr for ConnectorStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectorStyle::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// A directed (or bidirectional) line or curve between two court points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: Uuid,
    pub start: Vec2,
    pub end: Vec2,
    pub style: ConnectorStyle,
}

impl Connector {
    pub fn new(start: Vec2, end: Vec2, style: ConnectorStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
        }
    }

    pub fn with_endpoints(self, start: Vec2, end: Vec2) -> Self {
        Self { start, end, ..self }
    }

    pub fn with_start(self, start: Vec2) -> Self {
        Self { start, ..self }
    }

    pub fn with_end(self, end: Vec2) -> Self {
        Self { end, ..self }
    }

    /// Shift both endpoints by `delta`, clamping each one on its own.
    ///
    /// An endpoint pinned at the boundary stays put while the other keeps
    /// moving, so the connector can get shorter.
    pub fn translated(self, delta: Vec2, bounds: Bounds) -> Self {
        self.with_endpoints(
            geometry::clamp(self.start + delta, bounds),
            geometry::clamp(self.end + delta, bounds),
        )
    }

    pub fn length(&self) -> f32 {
        geometry::distance(self.start, self.end)
    }

    pub fn midpoint(&self) -> Vec2 {
        geometry::midpoint(self.start, self.end)
    }

    /// Resolve the drawable path for this connector's style
    pub fn path(&self) -> ConnectorPath {
        ConnectorPath::for_style(self.style, self.start, self.end)
    }
}

/// Drawable geometry of a connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectorPath {
    /// Straight segment
    Line {
        start: Vec2,
        end: Vec2,
        dashed: bool,
        /// Arrowhead at `start`, pointing away from `end`
        head_at_start: bool,
        /// Arrowhead at `end`
        head_at_end: bool,
    },
    /// Quadratic Bézier with an arrowhead at `end`
    Quadratic { start: Vec2, control: Vec2, end: Vec2 },
}

impl ConnectorPath {
    pub fn for_style(style: ConnectorStyle, start: Vec2, end: Vec2) -> Self {
        let line = |dashed, head_at_start| ConnectorPath::Line {
            start,
            end,
            dashed,
            head_at_start,
            head_at_end: true,
        };
        match style {
            ConnectorStyle::Straight => line(false, false),
            ConnectorStyle::Dotted => line(true, false),
            ConnectorStyle::Bidirectional => line(false, true),
            ConnectorStyle::Curved | ConnectorStyle::CurvedReverse => {
                ConnectorPath::Quadratic {
                    start,
                    control: geometry::curve_control_point(
                        start,
                        end,
                        style == ConnectorStyle::CurvedReverse,
                    ),
                    end,
                }
            }
        }
    }

    pub fn start(&self) -> Vec2 {
        match self {
            ConnectorPath::Line { start, .. } | ConnectorPath::Quadratic { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Vec2 {
        match self {
            ConnectorPath::Line { end, .. } | ConnectorPath::Quadratic { end, .. } => *end,
        }
    }

    /// Heading of the arrowhead at the end of the path, in degrees
    pub fn end_angle(&self) -> f32 {
        match self {
            ConnectorPath::Line { start, end, .. } => geometry::angle(*start, *end),
            ConnectorPath::Quadratic { control, end, .. } => geometry::angle(*control, *end),
        }
    }

    /// Distance from a point to the drawn path
    pub fn distance_to(&self, point: Vec2) -> f32 {
        match *self {
            ConnectorPath::Line { start, end, .. } => {
                geometry::distance_to_segment(point, start, end)
            }
            ConnectorPath::Quadratic {
                start,
                control,
                end,
            } => geometry::distance_to_quadratic(point, start, control, end),
        }
    }
}

/// Replacement geometry for an entity, produced by a finished drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityGeometry {
    Player(Vec2),
    Connector { start: Vec2, end: Vec2 },
}

impl EntityGeometry {
    pub fn clamped(self, bounds: Bounds) -> Self {
        match self {
            EntityGeometry::Player(position) => {
                EntityGeometry::Player(geometry::clamp(position, bounds))
            }
            EntityGeometry::Connector { start, end } => EntityGeometry::Connector {
                start: geometry::clamp(start, bounds),
                end: geometry::clamp(end, bounds),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_numbering_per_team() {
        let mut players = Vec::new();
        for team in [Team::Home, Team::Away, Team::Home] {
            let player = Player::new(team, Vec2::ZERO, &players);
            players.push(player);
        }

        let numbers: Vec<(Team, u32)> = players.iter().map(|p| (p.team, p.number)).collect();
        assert_eq!(
            numbers,
            vec![(Team::Home, 1), (Team::Away, 1), (Team::Home, 2)]
        );
    }

    #[test]
    fn test_player_numbers_count_current_teammates() {
        let first = Player::new(Team::Home, Vec2::ZERO, &[]);
        let second = Player::new(Team::Home, Vec2::ZERO, &[first]);
        let third = Player::new(Team::Home, Vec2::ZERO, &[first, second]);
        // After #2 is deleted only two teammates remain, so #3 is handed out again
        let fourth = Player::new(Team::Home, Vec2::ZERO, &[first, third]);
        assert_eq!(third.number, 3);
        assert_eq!(fourth.number, 3);
    }

    #[test]
    fn test_with_position_keeps_identity() {
        let player = Player::new(Team::Away, Vec2::new(1.0, 2.0), &[]);
        let moved = player.with_position(Vec2::new(5.0, 6.0));
        assert_eq!(moved.id, player.id);
        assert_eq!(moved.number, player.number);
        assert_eq!(player.position, Vec2::new(1.0, 2.0));
        assert_eq!(moved.position, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_translate_clamps_each_endpoint() {
        let bounds = Bounds::new(100.0, 100.0);
        let connector = Connector::new(
            Vec2::new(5.0, 5.0),
            Vec2::new(15.0, 15.0),
            ConnectorStyle::Straight,
        );
        let moved = connector.translated(Vec2::new(-10.0, -10.0), bounds);
        assert_eq!(moved.start, Vec2::new(0.0, 0.0));
        assert_eq!(moved.end, Vec2::new(5.0, 5.0));
        assert!(moved.length() < connector.length());
    }

    #[test]
    fn test_style_ids_round_trip() {
        for style in ConnectorStyle::ALL {
            assert_eq!(style.id().parse::<ConnectorStyle>(), Ok(style));
        }
        assert!("zigzag".parse::<ConnectorStyle>().is_err());
    }

    #[test]
    fn test_style_serializes_as_toolbar_id() {
        let json = serde_json::to_string(&ConnectorStyle::CurvedReverse).unwrap();
        assert_eq!(json, "\"curved-arrow-reverse\"");
        let team = serde_json::to_string(&Team::Home).unwrap();
        assert_eq!(team, "\"home\"");
    }

    #[test]
    fn test_paths_per_style() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);

        match ConnectorPath::for_style(ConnectorStyle::Dotted, start, end) {
            ConnectorPath::Line {
                dashed,
                head_at_start,
                head_at_end,
                ..
            } => {
                assert!(dashed);
                assert!(!head_at_start);
                assert!(head_at_end);
            }
            other => panic!("unexpected path {other:?}"),
        }

        match ConnectorPath::for_style(ConnectorStyle::Bidirectional, start, end) {
            ConnectorPath::Line {
                dashed,
                head_at_start,
                ..
            } => {
                assert!(!dashed);
                assert!(head_at_start);
            }
            other => panic!("unexpected path {other:?}"),
        }

        let curved = ConnectorPath::for_style(ConnectorStyle::Curved, start, end);
        let reverse = ConnectorPath::for_style(ConnectorStyle::CurvedReverse, start, end);
        match (curved, reverse) {
            (
                ConnectorPath::Quadratic { control: a, .. },
                ConnectorPath::Quadratic { control: b, .. },
            ) => {
                assert_eq!(a, Vec2::new(5.0, 5.0));
                assert_eq!(b, Vec2::new(5.0, -5.0));
            }
            other => panic!("unexpected paths {other:?}"),
        }
    }

    #[test]
    fn test_path_distance() {
        let connector = Connector::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 0.0),
            ConnectorStyle::Straight,
        );
        assert!(connector.path().distance_to(Vec2::new(10.0, 2.0)) <= 2.0);

        let curved = Connector {
            style: ConnectorStyle::Curved,
            ..connector
        };
        // The bow sags away from the chord, so the chord midpoint is off the curve
        assert!(curved.path().distance_to(Vec2::new(10.0, 0.0)) > 4.0);
    }
}
