// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted connections between an output port and an input port.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A persisted connection. Data always flows from `output_port` to `input_port`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Node owning the output port
    pub output_node: NodeId,
    /// Output port
    pub output_port: PortId,
    /// Node owning the input port
    pub input_node: NodeId,
    /// Input port
    pub input_port: PortId,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        output_node: NodeId,
        output_port: PortId,
        input_node: NodeId,
        input_port: PortId,
    ) -> Self {
        Self {
            id: ConnectionId::new(),
            output_node,
            output_port,
            input_node,
            input_port,
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.output_node == node_id || self.input_node == node_id
    }

    /// Check if this connection joins exactly these two ports
    pub fn joins(&self, output_port: PortId, input_port: PortId) -> bool {
        self.output_port == output_port && self.input_port == input_port
    }
}
