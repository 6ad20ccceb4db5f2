// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input events delivered to the gesture controller, and the notification
//! it raises.

use portlink_graph::{EdgeId, NodeId, PortId, Pos2};

/// What the pointer was over when an event fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A port
    Port(PortId),
    /// A node body
    Node(NodeId),
    /// Empty canvas
    Canvas,
}

/// A pointer press, move or release in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in canvas space
    pub position: Pos2,
    /// Element under the pointer
    pub target: PointerTarget,
    handled: bool,
}

impl PointerEvent {
    /// Create an unhandled event
    pub fn new(position: Pos2, target: PointerTarget) -> Self {
        Self { position, target, handled: false }
    }

    /// Event over empty canvas
    pub fn at(position: Pos2) -> Self {
        Self::new(position, PointerTarget::Canvas)
    }

    /// Event over a port
    pub fn on_port(position: Pos2, port: PortId) -> Self {
        Self::new(position, PointerTarget::Port(port))
    }

    /// Stop the event from reaching other handlers
    pub fn stop_propagation(&mut self) {
        self.handled = true;
    }

    /// Whether a handler consumed the event
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// A key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed
    pub key: egui::Key,
    handled: bool,
}

impl KeyEvent {
    /// Create an unhandled key event
    pub fn new(key: egui::Key) -> Self {
        Self { key, handled: false }
    }

    /// Stop the event from reaching other handlers
    pub fn stop_propagation(&mut self) {
        self.handled = true;
    }

    /// Whether a handler consumed the event
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// Raised once per committed drag. The graph model persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionCreated {
    /// Edge added to the surface
    pub edge: EdgeId,
    /// Input-side port
    pub input: PortId,
    /// Output-side port
    pub output: PortId,
}
