// SPDX-License-Identifier: MIT OR Apache-2.0
//! State of one connection drag: the compatible port set, the candidate edge
//! and the ghost preview.

use crate::event::ConnectionCreated;
use crate::ghost::GhostPreview;
use crate::hit_test;
use portlink_graph::{Edge, EdgeId, GraphSurface, PortDirection, PortId, Pos2};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked for every committed connection
pub type ConnectionListener = Box<dyn FnMut(&ConnectionCreated)>;

/// Outcome of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResolution {
    /// An edge was added and listeners were notified
    Committed(ConnectionCreated),
    /// Nothing compatible under the pointer; nothing changed
    NoConnection,
}

/// Hit-testing and preview state for a drag started on one port.
///
/// The compatible port set is computed once in [`ConnectionSession::begin_drag`]
/// and stays fixed until [`ConnectionSession::reset`].
pub struct ConnectionSession<S: GraphSurface> {
    surface: Rc<RefCell<S>>,
    source: Option<PortId>,
    candidate: Option<EdgeId>,
    compatible: Vec<PortId>,
    ghost: GhostPreview,
    listeners: Vec<ConnectionListener>,
}

impl<S: GraphSurface> ConnectionSession<S> {
    /// Create an idle session on a surface
    pub fn new(surface: Rc<RefCell<S>>) -> Self {
        Self {
            surface,
            source: None,
            candidate: None,
            compatible: Vec::new(),
            ghost: GhostPreview::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for committed connections
    pub fn subscribe(&mut self, listener: impl FnMut(&ConnectionCreated) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Port the drag started on
    pub fn source(&self) -> Option<PortId> {
        self.source
    }

    /// Candidate edge following the pointer
    pub fn candidate(&self) -> Option<EdgeId> {
        self.candidate
    }

    /// Ports this drag may connect to, in surface order
    pub fn compatible_ports(&self) -> &[PortId] {
        &self.compatible
    }

    /// Current ghost preview
    pub fn ghost(&self) -> &GhostPreview {
        &self.ghost
    }

    /// Start a drag from `source` with `candidate` already on the surface.
    ///
    /// Fails only when the surface does not know `source`. A drag with no
    /// compatible ports still starts; it just can never commit.
    pub fn begin_drag(&mut self, source: PortId, candidate: EdgeId) -> bool {
        let surface = self.surface.borrow();
        if surface.port_info(source).is_none() {
            tracing::debug!("Cannot drag from unknown port {:?}", source);
            return false;
        }

        self.compatible = surface.compatible_ports(source);
        self.source = Some(source);
        self.candidate = Some(candidate);
        tracing::debug!(
            "Drag from {:?}: {} compatible ports",
            source,
            self.compatible.len()
        );
        true
    }

    /// Track the pointer: clear the ghost over an exact hit, otherwise
    /// preview the nearest compatible port of the node under the pointer.
    pub fn update_drag(&mut self, pos: Pos2) {
        let mut guard = self.surface.borrow_mut();
        let surface = &mut *guard;

        if let Some(port) = hit_test::exact_hit(&*surface, &self.compatible, pos) {
            tracing::trace!("Exact hit on {:?}", port);
            self.ghost.clear(surface);
            return;
        }

        let fallback = hit_test::nearest_in_containing_node(&*surface, &self.compatible, pos);
        match (fallback, self.anchor(&*surface)) {
            (Some(target), Some((anchor, direction))) => {
                self.ghost.show(surface, anchor, direction, target);
            }
            _ => self.ghost.clear(surface),
        }
    }

    /// Try to commit at `pos`: exact hit first, then the fallback target.
    /// Both bind to the port itself, so the edge is identical either way.
    pub fn resolve_drag(&mut self, pos: Pos2) -> DragResolution {
        let created = {
            let mut guard = self.surface.borrow_mut();
            let surface = &mut *guard;

            let target = hit_test::exact_hit(&*surface, &self.compatible, pos)
                .or_else(|| hit_test::nearest_in_containing_node(&*surface, &self.compatible, pos));
            let Some(target) = target else {
                tracing::debug!("No compatible port at {:?}", pos);
                return DragResolution::NoConnection;
            };
            // Complete the candidate; fall back to the source if it is gone
            let edge = self
                .candidate
                .and_then(|id| surface.element(id))
                .and_then(|candidate| candidate.completed_with(target))
                .or_else(|| {
                    let (anchor, direction) = self.anchor(&*surface)?;
                    Some(Edge::connecting(anchor, direction, target))
                });
            let Some(edge) = edge else {
                return DragResolution::NoConnection;
            };
            let (Some(input), Some(output)) = (edge.input, edge.output) else {
                return DragResolution::NoConnection;
            };
            let created = ConnectionCreated { edge: edge.id, input, output };
            surface.add_element(edge);
            created
        };

        tracing::debug!("Connection created: {:?} -> {:?}", created.output, created.input);
        for listener in &mut self.listeners {
            listener(&created);
        }
        DragResolution::Committed(created)
    }

    /// Drop the ghost, the candidate reference and the compatible set.
    /// Safe to call at any time.
    pub fn reset(&mut self) {
        {
            let mut surface = self.surface.borrow_mut();
            self.ghost.clear(&mut *surface);
        }
        self.source = None;
        self.candidate = None;
        self.compatible.clear();
    }

    /// The candidate's bound end, or the source port if the candidate is gone
    fn anchor(&self, surface: &S) -> Option<(PortId, PortDirection)> {
        self.candidate
            .and_then(|id| surface.element(id))
            .and_then(Edge::fixed_end)
            .or_else(|| {
                let source = self.source?;
                surface.port_info(source).map(|info| (source, info.direction))
            })
    }
}
