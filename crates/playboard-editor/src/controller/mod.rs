//! Gesture state machines
//!
//! Each machine owns the listener subscription of its gesture while it is
//! active, so leaving the active state in any way releases the listeners.

mod draw_machine;
mod move_machine;

pub use draw_machine::{DrawMachine, DrawState, MIN_DRAW_DISTANCE};
pub use move_machine::{DragSession, MoveMachine, MoveState};
