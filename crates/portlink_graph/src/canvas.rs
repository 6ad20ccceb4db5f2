// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory canvas implementing [`GraphSurface`] over a [`Graph`].

use crate::connection::ConnectionId;
use crate::edge::{Edge, EdgeId};
use crate::graph::{ConnectionError, Graph};
use crate::node::NodeId;
use crate::port::{PortDirection, PortId};
use crate::surface::{GraphSurface, PortInfo};
use egui::{Pos2, Rect};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rendered port radius in canvas units
pub const PORT_RADIUS: f32 = 6.0;

/// Rules deciding which ports a drag may connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityRules {
    /// Allow connecting two ports of the same node
    pub allow_same_node: bool,
    /// Skip single-connection inputs that are already connected
    pub enforce_single_input: bool,
}

impl Default for CompatibilityRules {
    fn default() -> Self {
        Self {
            allow_same_node: false,
            enforce_single_input: true,
        }
    }
}

/// Canvas tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Distance from a port center that still counts as over the port
    pub port_hit_radius: f32,
    /// Compatibility rules
    pub rules: CompatibilityRules,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            port_hit_radius: PORT_RADIUS * 1.5,
            rules: CompatibilityRules::default(),
        }
    }
}

/// A graph plus the transient state a canvas needs while editing it
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    graph: Graph,
    settings: CanvasSettings,
    /// Visual edges in insertion order
    elements: IndexMap<EdgeId, Edge>,
    captured_by: Option<PortId>,
    layout_requested: bool,
}

impl Canvas {
    /// Create a canvas over a graph with default settings
    pub fn new(graph: Graph) -> Self {
        Self::with_settings(graph, CanvasSettings::default())
    }

    /// Create a canvas with explicit settings
    pub fn with_settings(graph: Graph, settings: CanvasSettings) -> Self {
        Self {
            graph,
            settings,
            elements: IndexMap::new(),
            captured_by: None,
            layout_requested: false,
        }
    }

    /// The underlying graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The underlying graph, mutably
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Current settings
    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// All placed edges, including candidates and ghosts
    pub fn elements(&self) -> impl Iterator<Item = &Edge> {
        self.elements.values()
    }

    /// Placed edges that are complete and not ghosts
    pub fn committed_edges(&self) -> impl Iterator<Item = &Edge> {
        self.elements.values().filter(|e| !e.is_ghost && e.is_complete())
    }

    /// Placed ghost edges
    pub fn ghost_edges(&self) -> impl Iterator<Item = &Edge> {
        self.elements.values().filter(|e| e.is_ghost)
    }

    /// Placed edges with a free end (candidates)
    pub fn candidate_edges(&self) -> impl Iterator<Item = &Edge> {
        self.elements.values().filter(|e| !e.is_ghost && e.fixed_end().is_some())
    }

    /// Ports currently flagged as a preview target
    pub fn highlighted_ports(&self) -> Vec<PortId> {
        self.graph.ports().filter(|(_, p)| p.highlighted).map(|(_, p)| p.id).collect()
    }

    /// Port currently holding pointer capture
    pub fn captured_by(&self) -> Option<PortId> {
        self.captured_by
    }

    /// Returns and clears a pending layout request
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    /// Record a created connection in the graph
    pub fn persist(&mut self, input: PortId, output: PortId) -> Result<ConnectionId, ConnectionError> {
        let id = self.graph.connect(output, input)?;
        tracing::debug!("Persisted connection {:?}", id);
        Ok(id)
    }
}

impl GraphSurface for Canvas {
    fn port_info(&self, port: PortId) -> Option<PortInfo> {
        let node = self.graph.port_owner(port)?;
        let info = node.port(&port)?;
        Some(PortInfo {
            id: port,
            node: node.id,
            direction: info.direction,
            port_type: info.port_type.clone(),
            center: node.port_center(&port)?,
        })
    }

    fn node_bounds(&self, node: NodeId) -> Option<Rect> {
        self.graph.node(node).map(|n| n.bounds())
    }

    fn is_compatible(&self, source: PortId, candidate: PortId) -> bool {
        let (Some(source_node), Some(candidate_node)) =
            (self.graph.port_owner(source), self.graph.port_owner(candidate))
        else {
            return false;
        };
        let (Some(source_port), Some(candidate_port)) =
            (source_node.port(&source), candidate_node.port(&candidate))
        else {
            return false;
        };

        if !source_port.can_connect(candidate_port) {
            return false;
        }

        let rules = self.settings.rules;
        if !rules.allow_same_node && source_node.id == candidate_node.id {
            return false;
        }

        if self.graph.are_connected(source, candidate) {
            return false;
        }

        let input = match source_port.direction {
            PortDirection::Input => source_port,
            PortDirection::Output => candidate_port,
        };
        if rules.enforce_single_input
            && !input.multi_connect
            && self.graph.connections_to(input.id).next().is_some()
        {
            return false;
        }

        true
    }

    fn compatible_ports(&self, source: PortId) -> Vec<PortId> {
        self.graph
            .ports()
            .map(|(_, p)| p.id)
            .filter(|&p| self.is_compatible(source, p))
            .collect()
    }

    fn port_at(&self, pos: Pos2) -> Option<PortId> {
        let radius_sq = self.settings.port_hit_radius * self.settings.port_hit_radius;
        self.graph
            .ports()
            .filter_map(|(node, port)| {
                let dist_sq = node.port_center(&port.id)?.distance_sq(pos);
                (dist_sq <= radius_sq).then_some((port.id, dist_sq))
            })
            // Nearest center wins; min_by keeps the first of equal distances
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(port, _)| port)
    }

    fn add_element(&mut self, edge: Edge) {
        self.elements.insert(edge.id, edge);
    }

    fn remove_element(&mut self, id: EdgeId) -> Option<Edge> {
        self.elements.shift_remove(&id)
    }

    fn element(&self, id: EdgeId) -> Option<&Edge> {
        self.elements.get(&id)
    }

    fn element_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.elements.get_mut(&id)
    }

    fn set_port_highlighted(&mut self, port: PortId, highlighted: bool) {
        if let Some(port) = self.graph.port_mut(port) {
            port.highlighted = highlighted;
        }
    }

    fn capture_pointer(&mut self, owner: PortId) {
        self.captured_by = Some(owner);
    }

    fn release_pointer(&mut self, owner: PortId) {
        if self.captured_by == Some(owner) {
            self.captured_by = None;
        }
    }

    fn lose_pointer_capture(&mut self) {
        if let Some(owner) = self.captured_by.take() {
            tracing::debug!("Pointer capture taken from {:?}", owner);
        }
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
    }
}
