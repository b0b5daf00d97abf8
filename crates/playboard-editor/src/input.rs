//! Pointer input and listener subscriptions
//!
//! The host turns mouse and touch events into `PointerEvent`s with positions
//! relative to the court. While a drag or draw is in progress the engine holds
//! a `Subscription` obtained from the host's `PointerSource`; the host keeps
//! its move/up listeners registered until that subscription is dropped.

use std::fmt;

use glam::Vec2;

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Mouse down or touch start
    Down,
    /// Pointer moved (mouse move or touch move)
    Move,
    /// Mouse up or touch end
    Up,
}

/// Device that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerDevice {
    #[default]
    Mouse,
    Touch,
}

/// A pointer event in court coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Vec2,
    pub device: PointerDevice,
}

impl PointerEvent {
    pub fn down(position: Vec2) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
            device: PointerDevice::Mouse,
        }
    }

    pub fn moved(position: Vec2) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            device: PointerDevice::Mouse,
        }
    }

    pub fn up(position: Vec2) -> Self {
        Self {
            phase: PointerPhase::Up,
            position,
            device: PointerDevice::Mouse,
        }
    }

    /// Mark the event as coming from a touch screen
    pub fn touch(self) -> Self {
        Self {
            device: PointerDevice::Touch,
            ..self
        }
    }
}

/// Handle for listeners registered for the duration of one gesture.
///
/// The release callback runs exactly once, when the handle is dropped.
#[must_use = "dropping a subscription unregisters its listeners"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when dropped
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for hosts that poll input
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Host side of pointer tracking
pub trait PointerSource {
    /// Register move/up listeners for a gesture that just started
    fn subscribe(&mut self, device: PointerDevice) -> Subscription;
}

/// Source for hosts that deliver every event anyway
#[derive(Debug, Clone, Copy, Default)]
pub struct PolledPointer;

impl PointerSource for PolledPointer {
    fn subscribe(&mut self, _device: PointerDevice) -> Subscription {
        Subscription::detached()
    }
}
