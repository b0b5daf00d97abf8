//! Error types for the diagram model

use thiserror::Error;
use uuid::Uuid;

/// Errors raised when an update addresses the diagram incorrectly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("Entity not found: {0}")]
    EntityNotFound(Uuid),

    #[error("Geometry does not match the kind of entity {0}")]
    GeometryMismatch(Uuid),
}

/// Errors raised when user-supplied values fail validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Play name must not be empty")]
    EmptyName,
}
