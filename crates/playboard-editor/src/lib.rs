//! Playboard Editor
//!
//! Interaction engine for the play board:
//! - Tools and pointer input with scoped listener subscriptions
//! - Picking and the drag/draw gesture machines
//! - `DiagramService`: diagram, undo history and selection behind one façade
//! - `Board`: routes pointer events and builds the render `Scene`
//! - Play storage and editor configuration

pub mod action;
pub mod board;
pub mod config;
pub mod controller;
pub mod input;
pub mod picking;
pub mod service;
pub mod store;
pub mod tool;

pub use action::BoardAction;
pub use board::{Board, ConnectorView, Scene};
pub use config::{ConfigError, ConfigManager, EditorConfig, SharedConfig, create_shared_config};
pub use controller::{DrawMachine, DrawState, MoveMachine, MoveState};
pub use input::{
    PointerDevice, PointerEvent, PointerPhase, PointerSource, PolledPointer, Subscription,
};
pub use picking::{DragMode, PickRadii, PickTarget, pick};
pub use service::DiagramService;
pub use store::{JsonFileStore, MemoryStore, PlayStore, SaveError, StoreError};
pub use tool::{Tool, UnknownTool};
