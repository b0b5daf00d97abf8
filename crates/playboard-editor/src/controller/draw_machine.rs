//! Drawing new connectors

use glam::Vec2;

use playboard_core::{Bounds, ConnectorPath, ConnectorStyle, geometry};

use crate::action::BoardAction;
use crate::input::{PointerDevice, PointerSource, Subscription};
use crate::tool::Tool;

/// Default minimum length for a drawn connector
pub const MIN_DRAW_DISTANCE: f32 = 10.0;

/// Draw machine state
#[derive(Debug, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing {
        origin: Vec2,
        current: Vec2,
        style: ConnectorStyle,
        _subscription: Subscription,
    },
}

/// Turns a Down/Move*/Up sequence with a connector tool into a new connector
#[derive(Debug)]
pub struct DrawMachine {
    state: DrawState,
    /// Strokes not longer than this are discarded
    min_distance: f32,
}

impl Default for DrawMachine {
    fn default() -> Self {
        Self::new(MIN_DRAW_DISTANCE)
    }
}

impl DrawMachine {
    pub fn new(min_distance: f32) -> Self {
        Self {
            state: DrawState::Idle,
            min_distance: min_distance.max(0.0),
        }
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn set_min_distance(&mut self, min_distance: f32) {
        self.min_distance = min_distance.max(0.0);
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Begin a stroke at `point`. Only connector tools draw.
    pub fn press(
        &mut self,
        point: Vec2,
        tool: Tool,
        bounds: Bounds,
        source: &mut dyn PointerSource,
        device: PointerDevice,
    ) -> bool {
        let Some(style) = tool.connector_style() else {
            return false;
        };
        if self.is_drawing() {
            return false;
        }

        let origin = geometry::clamp(point, bounds);
        tracing::debug!("Draw start {} at ({:.1}, {:.1})", style, origin.x, origin.y);
        self.state = DrawState::Drawing {
            origin,
            current: origin,
            style,
            _subscription: source.subscribe(device),
        };
        true
    }

    pub fn drag(&mut self, point: Vec2, bounds: Bounds) {
        if let DrawState::Drawing { current, .. } = &mut self.state {
            *current = geometry::clamp(point, bounds);
        }
    }

    /// Finish the stroke, returning the connector to create if it is long enough
    pub fn release(&mut self) -> Option<BoardAction> {
        let DrawState::Drawing {
            origin,
            current,
            style,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        let length = geometry::distance(origin, current);
        if length <= self.min_distance {
            tracing::debug!("Stroke too short ({:.1}), discarded", length);
            return None;
        }
        Some(BoardAction::CreateConnector {
            start: origin,
            end: current,
            style,
        })
    }

    pub fn cancel(&mut self) {
        if self.is_drawing() {
            tracing::debug!("Draw cancelled");
        }
        self.state = DrawState::Idle;
    }

    /// Path of the stroke in progress
    pub fn preview(&self) -> Option<ConnectorPath> {
        match &self.state {
            DrawState::Drawing {
                origin,
                current,
                style,
                ..
            } => Some(ConnectorPath::for_style(*style, *origin, *current)),
            DrawState::Idle => None,
        }
    }
}
