//! Board tool types

use std::fmt;
use std::str::FromStr;

use playboard_core::{ConnectorStyle, Team};

/// Tool selected in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Select and drag players and connectors
    #[default]
    Move,
    /// Draw a connector of the given style
    Connector(ConnectorStyle),
    /// Place a player of the given team
    Player(Team),
}

impl Tool {
    /// Every tool in toolbar order
    pub fn all() -> [Tool; 8] {
        [
            Tool::Move,
            Tool::Connector(ConnectorStyle::Straight),
            Tool::Connector(ConnectorStyle::Dotted),
            Tool::Connector(ConnectorStyle::Bidirectional),
            Tool::Connector(ConnectorStyle::Curved),
            Tool::Connector(ConnectorStyle::CurvedReverse),
            Tool::Player(Team::Home),
            Tool::Player(Team::Away),
        ]
    }

    /// Identifier used by the toolbar
    pub fn id(&self) -> &'static str {
        match self {
            Tool::Move => "move",
            Tool::Connector(style) => style.id(),
            Tool::Player(Team::Home) => "player-home",
            Tool::Player(Team::Away) => "player-away",
        }
    }

    /// Get the display name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Move => "Move",
            Tool::Connector(style) => style.name(),
            Tool::Player(Team::Home) => "Home Player",
            Tool::Player(Team::Away) => "Away Player",
        }
    }

    /// Get a short label for the tool (for toolbar buttons)
    pub fn short_label(&self) -> &'static str {
        match self {
            Tool::Move => "✥",
            Tool::Connector(ConnectorStyle::Straight) => "→",
            Tool::Connector(ConnectorStyle::Dotted) => "⇢",
            Tool::Connector(ConnectorStyle::Bidirectional) => "↔",
            Tool::Connector(ConnectorStyle::Curved) => "⤴",
            Tool::Connector(ConnectorStyle::CurvedReverse) => "⤵",
            Tool::Player(Team::Home) => "H",
            Tool::Player(Team::Away) => "A",
        }
    }

    /// Style drawn by this tool, if it is a connector tool
    pub fn connector_style(&self) -> Option<ConnectorStyle> {
        match self {
            Tool::Connector(style) => Some(*style),
            _ => None,
        }
    }

    /// Team placed by this tool, if it is a player tool
    pub fn team(&self) -> Option<Team> {
        match self {
            Tool::Player(team) => Some(*team),
            _ => None,
        }
    }

    /// Check if this is a connector drawing tool
    pub fn is_drawing(&self) -> bool {
        matches!(self, Tool::Connector(_))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a toolbar id does not name a tool
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::all()
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_ids() {
        let ids: Vec<&str> = Tool::all().iter().map(Tool::id).collect();
        assert_eq!(
            ids,
            vec![
                "move",
                "arrow",
                "dotted-arrow",
                "bidirectional-arrow",
                "curved-arrow",
                "curved-arrow-reverse",
                "player-home",
                "player-away",
            ]
        );
        for tool in Tool::all() {
            assert_eq!(tool.id().parse::<Tool>(), Ok(tool));
        }
        assert!("eraser".parse::<Tool>().is_err());
    }

    #[test]
    fn test_tool_kinds() {
        assert!(!Tool::Move.is_drawing());
        assert!(Tool::Connector(ConnectorStyle::Curved).is_drawing());
        assert_eq!(
            Tool::Connector(ConnectorStyle::Dotted).connector_style(),
            Some(ConnectorStyle::Dotted)
        );
        assert_eq!(Tool::Player(Team::Away).team(), Some(Team::Away));
        assert_eq!(Tool::Move.team(), None);
    }
}
