// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ghost edge previewing where a drop would connect.

use portlink_graph::{Edge, EdgeId, GraphSurface, PortDirection, PortId};

/// The ghost edge slot of a drag, and the port it highlights
#[derive(Debug, Default)]
pub struct GhostPreview {
    edge: Option<EdgeId>,
    target: Option<PortId>,
}

impl GhostPreview {
    /// Create an empty preview
    pub fn new() -> Self {
        Self::default()
    }

    /// Port the ghost currently points at
    pub fn target(&self) -> Option<PortId> {
        self.target
    }

    /// Ghost edge on the surface, if shown
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// Whether a ghost is shown
    pub fn is_active(&self) -> bool {
        self.edge.is_some()
    }

    /// Show a ghost from `anchor` to `target`, replacing any ghost to a
    /// different target. Showing the current target again does nothing.
    pub fn show<S: GraphSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        anchor: PortId,
        anchor_direction: PortDirection,
        target: PortId,
    ) {
        if self.target == Some(target) && self.edge.is_some() {
            return;
        }
        self.clear(surface);

        let ghost = Edge::ghost(anchor, anchor_direction, target);
        self.edge = Some(ghost.id);
        self.target = Some(target);
        surface.add_element(ghost);
        surface.set_port_highlighted(target, true);
        tracing::trace!("Ghost edge now targets {:?}", target);
    }

    /// Remove the ghost and its highlight. Safe to call when nothing is shown.
    pub fn clear<S: GraphSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(edge) = self.edge.take() {
            surface.remove_element(edge);
        }
        if let Some(target) = self.target.take() {
            surface.set_port_highlighted(target, false);
        }
    }
}
