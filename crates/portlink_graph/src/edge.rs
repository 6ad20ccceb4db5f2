// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual edges placed on a canvas.
//!
//! Edges are the drawable counterpart of connections. While a connection is
//! being dragged, the canvas holds a *candidate* edge with one free end that
//! follows the pointer, and possibly a *ghost* edge previewing where a drop
//! would land. Neither is ever persisted.

use crate::port::{PortDirection, PortId};
use egui::Pos2;
use uuid::Uuid;

/// Unique identifier for a visual edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A visual edge between up to two ports
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Input-side port, if bound
    pub input: Option<PortId>,
    /// Output-side port, if bound
    pub output: Option<PortId>,
    /// Position of the unbound end while it follows the pointer
    pub free_end: Option<Pos2>,
    /// Preview-only edge, never hit-tested or committed
    pub is_ghost: bool,
}

impl Edge {
    /// A candidate edge bound to `source` with its other end at `pointer`
    pub fn candidate(source: PortId, direction: PortDirection, pointer: Pos2) -> Self {
        let mut edge = Self::unbound(false);
        edge.bind(source, direction);
        edge.free_end = Some(pointer);
        edge
    }

    /// A complete edge from `anchor` to `target`
    pub fn connecting(anchor: PortId, anchor_direction: PortDirection, target: PortId) -> Self {
        let mut edge = Self::unbound(false);
        edge.bind(anchor, anchor_direction);
        edge.bind(target, anchor_direction.opposite());
        edge
    }

    /// A ghost edge from `anchor` to `target`
    pub fn ghost(anchor: PortId, anchor_direction: PortDirection, target: PortId) -> Self {
        Self {
            is_ghost: true,
            ..Self::connecting(anchor, anchor_direction, target)
        }
    }

    fn unbound(is_ghost: bool) -> Self {
        Self {
            id: EdgeId::new(),
            input: None,
            output: None,
            free_end: None,
            is_ghost,
        }
    }

    /// Bind the slot for `direction` to `port`
    pub fn bind(&mut self, port: PortId, direction: PortDirection) {
        match direction {
            PortDirection::Input => self.input = Some(port),
            PortDirection::Output => self.output = Some(port),
        }
    }

    /// The single bound endpoint of a half-bound edge, with its direction
    pub fn fixed_end(&self) -> Option<(PortId, PortDirection)> {
        match (self.output, self.input) {
            (Some(output), None) => Some((output, PortDirection::Output)),
            (None, Some(input)) => Some((input, PortDirection::Input)),
            _ => None,
        }
    }

    /// A new non-ghost edge joining this edge's fixed end to `target`
    pub fn completed_with(&self, target: PortId) -> Option<Self> {
        let (anchor, direction) = self.fixed_end()?;
        Some(Self::connecting(anchor, direction, target))
    }

    /// Move the free end
    pub fn set_free_end(&mut self, pointer: Pos2) {
        if self.fixed_end().is_some() {
            self.free_end = Some(pointer);
        }
    }

    /// Detach both endpoints
    pub fn clear_endpoints(&mut self) {
        self.input = None;
        self.output = None;
        self.free_end = None;
    }

    /// Both endpoints are bound to ports
    pub fn is_complete(&self) -> bool {
        self.input.is_some() && self.output.is_some()
    }
}
