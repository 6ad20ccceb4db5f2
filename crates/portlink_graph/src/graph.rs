// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::port::{Port, PortDirection, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph, in insertion order
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        // shift_remove keeps the port iteration order stable for the nodes left
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Find the node owning a port
    pub fn port_owner(&self, port_id: PortId) -> Option<&Node> {
        self.nodes.values().find(|n| n.port(&port_id).is_some())
    }

    /// Get a port by ID
    pub fn port(&self, port_id: PortId) -> Option<&Port> {
        self.nodes.values().find_map(|n| n.port(&port_id))
    }

    /// Get a mutable port by ID
    pub fn port_mut(&mut self, port_id: PortId) -> Option<&mut Port> {
        self.nodes.values_mut().find_map(|n| n.port_mut(&port_id))
    }

    /// Every port with its owning node, in node insertion order
    pub fn ports(&self) -> impl Iterator<Item = (&Node, &Port)> {
        self.nodes.values().flat_map(|n| n.ports().map(move |p| (n, p)))
    }

    /// Add a connection between two ports.
    ///
    /// The ports may be given in either order; the connection is stored
    /// output-to-input.
    pub fn connect(&mut self, a: PortId, b: PortId) -> Result<ConnectionId, ConnectionError> {
        let a_node = self.port_owner(a).ok_or(ConnectionError::PortNotFound(a))?;
        let b_node = self.port_owner(b).ok_or(ConnectionError::PortNotFound(b))?;
        let (a_node_id, b_node_id) = (a_node.id, b_node.id);

        let a_port = a_node.port(&a).ok_or(ConnectionError::PortNotFound(a))?;
        let b_port = b_node.port(&b).ok_or(ConnectionError::PortNotFound(b))?;

        if !a_port.can_connect(b_port) {
            return Err(ConnectionError::IncompatiblePorts);
        }

        let (output_node, output, input_node, input, input_multi) = match a_port.direction {
            PortDirection::Output => (a_node_id, a, b_node_id, b, b_port.multi_connect),
            PortDirection::Input => (b_node_id, b, a_node_id, a, a_port.multi_connect),
        };

        if output_node == input_node {
            return Err(ConnectionError::SelfLoop);
        }

        if self.connections.values().any(|c| c.joins(output, input)) {
            return Err(ConnectionError::AlreadyConnected);
        }

        if !input_multi && self.connections_to(input).next().is_some() {
            return Err(ConnectionError::PortAlreadyConnected(input));
        }

        let connection = Connection::new(output_node, output, input_node, input);
        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.shift_remove(&connection_id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections leaving an output port
    pub fn connections_from(&self, port_id: PortId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.output_port == port_id)
    }

    /// Get connections arriving at an input port
    pub fn connections_to(&self, port_id: PortId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.input_port == port_id)
    }

    /// Check whether two ports are already joined, in either order
    pub fn are_connected(&self, a: PortId, b: PortId) -> bool {
        self.connections.values().any(|c| c.joins(a, b) || c.joins(b, a))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Serialize the graph to a RON document
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
    }

    /// Load a graph from a RON document
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Port not found
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// Incompatible port directions or types
    #[error("Incompatible port types")]
    IncompatiblePorts,

    /// Single-connection input already has a connection
    #[error("Port already connected: {0:?}")]
    PortAlreadyConnected(PortId),

    /// The exact same pair is already connected
    #[error("Ports are already connected")]
    AlreadyConnected,

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}
