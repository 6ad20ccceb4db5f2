// SPDX-License-Identifier: MIT OR Apache-2.0
//! The canvas-side interface consumed by connection dragging.

use crate::edge::{Edge, EdgeId};
use crate::node::NodeId;
use crate::port::{PortDirection, PortId, PortType};
use egui::{Pos2, Rect};

/// Geometry and typing of a single port, as seen by the interaction core
#[derive(Debug, Clone, PartialEq)]
pub struct PortInfo {
    /// Port ID
    pub id: PortId,
    /// Owning node
    pub node: NodeId,
    /// Port direction
    pub direction: PortDirection,
    /// Data type
    pub port_type: PortType,
    /// Visual center in canvas space
    pub center: Pos2,
}

/// A canvas that owns node/port geometry and hosts visual edges.
///
/// Compatibility, exact hit-testing and element storage all live behind this
/// trait so the interaction core never reaches into a concrete canvas.
pub trait GraphSurface {
    /// Look up a port. `None` means the port is unknown to this surface.
    fn port_info(&self, port: PortId) -> Option<PortInfo>;

    /// Canvas-space bounds of a node
    fn node_bounds(&self, node: NodeId) -> Option<Rect>;

    /// Whether `candidate` may be connected to `source`
    fn is_compatible(&self, source: PortId, candidate: PortId) -> bool;

    /// Every port compatible with `source`, in a fixed iteration order
    fn compatible_ports(&self, source: PortId) -> Vec<PortId>;

    /// The port whose interactive region contains `pos`, if any.
    /// Ghost edges and other elements never take part.
    fn port_at(&self, pos: Pos2) -> Option<PortId>;

    /// Place an edge on the surface
    fn add_element(&mut self, edge: Edge);

    /// Remove an edge from the surface
    fn remove_element(&mut self, id: EdgeId) -> Option<Edge>;

    /// Look up a placed edge
    fn element(&self, id: EdgeId) -> Option<&Edge>;

    /// Look up a placed edge mutably
    fn element_mut(&mut self, id: EdgeId) -> Option<&mut Edge>;

    /// Set or clear a port's preview highlight
    fn set_port_highlighted(&mut self, port: PortId, highlighted: bool);

    /// Route all pointer events to the gesture started on `owner`
    fn capture_pointer(&mut self, owner: PortId);

    /// Stop routing pointer events to `owner`
    fn release_pointer(&mut self, owner: PortId);

    /// The host took pointer capture away from whoever held it.
    /// Called before the gesture is told its capture was lost.
    fn lose_pointer_capture(&mut self);

    /// Ask the host to lay out and repaint
    fn request_layout(&mut self) {}
}
