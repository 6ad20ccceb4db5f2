// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions and port layout.

use crate::port::{Port, PortDirection, PortId};
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default node width in canvas units
pub const NODE_WIDTH: f32 = 180.0;
/// Height of the title bar above the first port row
pub const NODE_HEADER_HEIGHT: f32 = 24.0;
/// Height of a single port row
pub const PORT_HEIGHT: f32 = 22.0;
/// Padding below the last port row
const NODE_FOOTER_PADDING: f32 = 8.0;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Top-left corner in canvas space
    pub position: [f32; 2],
    /// Explicit size; `None` derives it from the port rows
    pub size: Option<[f32; 2]>,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

impl Node {
    /// Create an empty node at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            position: [0.0, 0.0],
            size: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Set an explicit size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some([width, height]);
        self
    }

    /// Add a port, routed to the input or output list by its direction
    pub fn with_port(mut self, port: Port) -> Self {
        match port.direction {
            PortDirection::Input => self.inputs.push(port),
            PortDirection::Output => self.outputs.push(port),
        }
        self
    }

    /// Get a port by ID
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.inputs.iter().find(|p| p.id == *port_id)
            .or_else(|| self.outputs.iter().find(|p| p.id == *port_id))
    }

    /// Get a mutable port by ID
    pub fn port_mut(&mut self, port_id: &PortId) -> Option<&mut Port> {
        let Self { inputs, outputs, .. } = self;
        inputs.iter_mut().find(|p| p.id == *port_id)
            .or_else(|| outputs.iter_mut().find(|p| p.id == *port_id))
    }

    /// Get all ports, inputs first
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Canvas-space bounds
    pub fn bounds(&self) -> Rect {
        let size = match self.size {
            Some([w, h]) => Vec2::new(w, h),
            None => {
                let rows = self.inputs.len().max(self.outputs.len());
                Vec2::new(
                    NODE_WIDTH,
                    NODE_HEADER_HEIGHT + rows as f32 * PORT_HEIGHT + NODE_FOOTER_PADDING,
                )
            }
        };
        Rect::from_min_size(Pos2::new(self.position[0], self.position[1]), size)
    }

    /// Canvas-space visual center of one of this node's ports
    pub fn port_center(&self, port_id: &PortId) -> Option<Pos2> {
        let origin = Pos2::new(self.position[0], self.position[1]);
        let width = self.bounds().width();

        let row_center = |row: usize| NODE_HEADER_HEIGHT + row as f32 * PORT_HEIGHT + PORT_HEIGHT / 2.0;

        if let Some((row, port)) = self.inputs.iter().enumerate().find(|(_, p)| p.id == *port_id) {
            let [x, y] = port.anchor.unwrap_or([0.0, row_center(row)]);
            return Some(origin + Vec2::new(x, y));
        }

        if let Some((row, port)) = self.outputs.iter().enumerate().find(|(_, p)| p.id == *port_id) {
            let [x, y] = port.anchor.unwrap_or([width, row_center(row)]);
            return Some(origin + Vec2::new(x, y));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortType;

    #[test]
    fn test_derived_bounds_follow_port_rows() {
        let node = Node::new("Mix")
            .with_position(10.0, 20.0)
            .with_port(Port::input("A", PortType::Float))
            .with_port(Port::input("B", PortType::Float))
            .with_port(Port::output("Out", PortType::Float));

        let bounds = node.bounds();
        assert_eq!(bounds.min, Pos2::new(10.0, 20.0));
        assert_eq!(bounds.width(), NODE_WIDTH);
        assert_eq!(bounds.height(), NODE_HEADER_HEIGHT + 2.0 * PORT_HEIGHT + 8.0);
    }

    #[test]
    fn test_default_port_layout() {
        let input = Port::input("A", PortType::Float);
        let second = Port::input("B", PortType::Float);
        let output = Port::output("Out", PortType::Float);
        let (a, b, out) = (input.id, second.id, output.id);
        let node = Node::new("Mix")
            .with_position(100.0, 0.0)
            .with_port(input)
            .with_port(second)
            .with_port(output);

        assert_eq!(node.port_center(&a), Some(Pos2::new(100.0, 35.0)));
        assert_eq!(node.port_center(&b), Some(Pos2::new(100.0, 57.0)));
        assert_eq!(node.port_center(&out), Some(Pos2::new(100.0 + NODE_WIDTH, 35.0)));
        assert_eq!(node.port_center(&PortId::new()), None);
    }

    #[test]
    fn test_anchor_overrides_layout() {
        let port = Port::input("In", PortType::Float).with_anchor(50.0, 20.0);
        let id = port.id;
        let node = Node::new("A")
            .with_position(50.0, -20.0)
            .with_size(100.0, 40.0)
            .with_port(port);

        assert_eq!(node.port_center(&id), Some(Pos2::new(100.0, 0.0)));
        assert!(node.bounds().contains(Pos2::new(150.0, 20.0)));
    }
}
