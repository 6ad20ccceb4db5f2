// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer gesture state machine for dragging connections out of ports.

use crate::capture::CaptureGuard;
use crate::config::InteractionConfig;
use crate::event::{ConnectionCreated, KeyEvent, PointerEvent, PointerTarget};
use crate::session::{ConnectionSession, DragResolution};
use portlink_graph::{Edge, EdgeId, GraphSurface, PortId, Pos2};
use std::cell::RefCell;
use std::rc::Rc;

/// Externally visible gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,
    /// A connection is being dragged
    Dragging,
}

struct ActiveDrag<S: GraphSurface> {
    source: PortId,
    start: Pos2,
    capture: CaptureGuard<S>,
}

enum Phase<S: GraphSurface> {
    Idle,
    Dragging(ActiveDrag<S>),
}

/// Turns press/move/release, cancel-key and capture-loss events into
/// connection edits on a surface.
///
/// One controller serves every port on its surface. Pointer capture is held
/// by the dragging state itself, so every way out of a drag releases it.
pub struct GestureController<S: GraphSurface> {
    surface: Rc<RefCell<S>>,
    session: ConnectionSession<S>,
    config: InteractionConfig,
    cancel_key: egui::Key,
    phase: Phase<S>,
    candidate: Option<EdgeId>,
}

impl<S: GraphSurface> GestureController<S> {
    /// Create an idle controller for a surface
    pub fn new(surface: Rc<RefCell<S>>, config: InteractionConfig) -> Self {
        let cancel_key = config.cancel_key().unwrap_or_else(|err| {
            tracing::warn!("{err}, falling back to Escape");
            egui::Key::Escape
        });

        Self {
            session: ConnectionSession::new(Rc::clone(&surface)),
            surface,
            config,
            cancel_key,
            phase: Phase::Idle,
            candidate: None,
        }
    }

    /// Register a listener for committed connections
    pub fn on_connection_created(&mut self, listener: impl FnMut(&ConnectionCreated) + 'static) {
        self.session.subscribe(listener);
    }

    /// Current state
    pub fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle => GestureState::Idle,
            Phase::Dragging(_) => GestureState::Dragging,
        }
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Port the current drag started on
    pub fn drag_source(&self) -> Option<PortId> {
        match &self.phase {
            Phase::Dragging(drag) => Some(drag.source),
            Phase::Idle => None,
        }
    }

    /// Candidate edge of the current drag
    pub fn candidate(&self) -> Option<EdgeId> {
        self.candidate
    }

    /// The drag session
    pub fn session(&self) -> &ConnectionSession<S> {
        &self.session
    }

    /// The surface this controller edits
    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    /// Active settings
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Pointer pressed. Starts a drag when pressed on a known port.
    pub fn start(&mut self, event: &mut PointerEvent) {
        if self.is_dragging() {
            tracing::trace!("Press swallowed, drag already active");
            event.stop_propagation();
            return;
        }
        let PointerTarget::Port(source) = event.target else {
            return;
        };
        let Some(direction) = self.surface.borrow().port_info(source).map(|info| info.direction) else {
            return;
        };

        let candidate = Edge::candidate(source, direction, event.position);
        let candidate_id = candidate.id;
        self.surface.borrow_mut().add_element(candidate);
        self.candidate = Some(candidate_id);

        if !self.session.begin_drag(source, candidate_id) {
            self.teardown();
            return;
        }

        let capture = CaptureGuard::acquire(Rc::clone(&self.surface), source);
        self.phase = Phase::Dragging(ActiveDrag {
            source,
            start: event.position,
            capture,
        });
        event.stop_propagation();
        tracing::debug!("Connection drag started from {:?}", source);
    }

    /// Pointer moved
    pub fn update(&mut self, event: &mut PointerEvent) {
        if !self.is_dragging() {
            return;
        }

        self.session.update_drag(event.position);

        {
            let mut surface = self.surface.borrow_mut();
            if let Some(id) = self.candidate {
                if let Some(edge) = surface.element_mut(id) {
                    edge.set_free_end(event.position);
                }
            }
            surface.request_layout();
        }
        event.stop_propagation();
    }

    /// Pointer released. Short releases count as clicks and never connect.
    pub fn stop(&mut self, event: &mut PointerEvent) -> Option<ConnectionCreated> {
        let Phase::Dragging(drag) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };

        let distance = drag.start.distance(event.position);
        let created = if distance < self.config.click_threshold {
            tracing::debug!("Release after {:.1} units treated as a click", distance);
            None
        } else {
            match self.session.resolve_drag(event.position) {
                DragResolution::Committed(created) => Some(created),
                DragResolution::NoConnection => None,
            }
        };

        self.teardown();
        drop(drag);
        event.stop_propagation();
        created
    }

    /// The host took pointer capture away
    pub fn on_capture_lost(&mut self) {
        if let Phase::Dragging(drag) = std::mem::replace(&mut self.phase, Phase::Idle) {
            tracing::debug!("Pointer capture lost while dragging from {:?}", drag.source);
            drag.capture.lost();
        }
        if self.candidate.is_some() {
            self.teardown();
        }
    }

    /// Key pressed. Only the configured cancel key during a drag is handled.
    pub fn on_key(&mut self, event: &mut KeyEvent) {
        if !self.is_dragging() || event.key != self.cancel_key {
            return;
        }
        self.abort();
        event.stop_propagation();
    }

    /// End any drag without connecting. Safe to call in any state.
    pub fn abort(&mut self) {
        if let Phase::Dragging(drag) = std::mem::replace(&mut self.phase, Phase::Idle) {
            tracing::debug!("Connection drag from {:?} aborted", drag.source);
        }
        self.teardown();
    }

    /// Remove the candidate and reset the session
    fn teardown(&mut self) {
        if let Some(id) = self.candidate.take() {
            let mut surface = self.surface.borrow_mut();
            if let Some(edge) = surface.element_mut(id) {
                edge.clear_endpoints();
            }
            surface.remove_element(id);
        }
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portlink_graph::{Canvas, Graph, Node, NodeId, Port, PortInfo, PortType, Rect};
    use std::cell::Cell;

    /// Canvas whose `port_info` stops answering after a number of lookups
    struct ForgetfulCanvas {
        inner: Canvas,
        lookups_left: Cell<usize>,
    }

    impl GraphSurface for ForgetfulCanvas {
        fn port_info(&self, port: PortId) -> Option<PortInfo> {
            let left = self.lookups_left.get();
            if left == 0 {
                return None;
            }
            self.lookups_left.set(left - 1);
            self.inner.port_info(port)
        }

        fn node_bounds(&self, node: NodeId) -> Option<Rect> {
            self.inner.node_bounds(node)
        }

        fn is_compatible(&self, source: PortId, candidate: PortId) -> bool {
            self.inner.is_compatible(source, candidate)
        }

        fn compatible_ports(&self, source: PortId) -> Vec<PortId> {
            self.inner.compatible_ports(source)
        }

        fn port_at(&self, pos: Pos2) -> Option<PortId> {
            self.inner.port_at(pos)
        }

        fn add_element(&mut self, edge: Edge) {
            self.inner.add_element(edge);
        }

        fn remove_element(&mut self, id: EdgeId) -> Option<Edge> {
            self.inner.remove_element(id)
        }

        fn element(&self, id: EdgeId) -> Option<&Edge> {
            self.inner.element(id)
        }

        fn element_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
            self.inner.element_mut(id)
        }

        fn set_port_highlighted(&mut self, port: PortId, highlighted: bool) {
            self.inner.set_port_highlighted(port, highlighted);
        }

        fn capture_pointer(&mut self, owner: PortId) {
            self.inner.capture_pointer(owner);
        }

        fn release_pointer(&mut self, owner: PortId) {
            self.inner.release_pointer(owner);
        }

        fn lose_pointer_capture(&mut self) {
            self.inner.lose_pointer_capture();
        }
    }

    fn setup() -> (Rc<RefCell<Canvas>>, GestureController<Canvas>, PortId, Pos2) {
        let out = Port::output("Out", PortType::Float);
        let input = Port::input("In", PortType::Float);
        let out_id = out.id;

        let mut graph = Graph::default();
        graph.add_node(Node::new("Source").with_port(out));
        graph.add_node(Node::new("Sink").with_position(300.0, 0.0).with_port(input));

        let canvas = Rc::new(RefCell::new(Canvas::new(graph)));
        let center = canvas.borrow().port_info(out_id).unwrap().center;
        let controller = GestureController::new(Rc::clone(&canvas), InteractionConfig::default());
        (canvas, controller, out_id, center)
    }

    #[test]
    fn test_press_on_canvas_is_ignored() {
        let (canvas, mut controller, _, _) = setup();
        let mut press = PointerEvent::at(Pos2::new(-100.0, -100.0));
        controller.start(&mut press);

        assert_eq!(controller.state(), GestureState::Idle);
        assert!(!press.is_handled());
        assert_eq!(canvas.borrow().elements().count(), 0);
    }

    #[test]
    fn test_press_on_unknown_port_is_ignored() {
        let (canvas, mut controller, _, _) = setup();
        let mut press = PointerEvent::on_port(Pos2::ZERO, PortId::new());
        controller.start(&mut press);

        assert_eq!(controller.state(), GestureState::Idle);
        assert_eq!(canvas.borrow().elements().count(), 0);
    }

    #[test]
    fn test_failed_begin_drag_discards_candidate() {
        let (canvas, _, out, center) = setup();
        let inner = canvas.borrow().clone();
        // The controller's own lookup succeeds, the session's fails
        let surface = Rc::new(RefCell::new(ForgetfulCanvas { inner, lookups_left: Cell::new(1) }));
        let mut controller = GestureController::new(Rc::clone(&surface), InteractionConfig::default());

        let mut press = PointerEvent::on_port(center, out);
        controller.start(&mut press);

        assert!(!press.is_handled());
        assert_eq!(controller.state(), GestureState::Idle);
        assert_eq!(controller.candidate(), None);
        assert!(controller.session().compatible_ports().is_empty());
        let surface = surface.borrow();
        assert_eq!(surface.inner.elements().count(), 0);
        assert_eq!(surface.inner.captured_by(), None);
    }

    #[test]
    fn test_press_starts_drag_and_captures() {
        let (canvas, mut controller, out, center) = setup();
        let mut press = PointerEvent::on_port(center, out);
        controller.start(&mut press);

        assert!(press.is_handled());
        assert_eq!(controller.state(), GestureState::Dragging);
        assert_eq!(controller.drag_source(), Some(out));
        assert_eq!(canvas.borrow().captured_by(), Some(out));
        assert_eq!(canvas.borrow().candidate_edges().count(), 1);
    }

    #[test]
    fn test_second_press_is_swallowed() {
        let (canvas, mut controller, out, center) = setup();
        controller.start(&mut PointerEvent::on_port(center, out));
        let candidate = controller.candidate();

        let mut again = PointerEvent::on_port(center, out);
        controller.start(&mut again);
        assert!(again.is_handled());
        assert_eq!(controller.candidate(), candidate);
        assert_eq!(canvas.borrow().candidate_edges().count(), 1);
    }

    #[test]
    fn test_move_drags_free_end_and_requests_layout() {
        let (canvas, mut controller, out, center) = setup();
        controller.start(&mut PointerEvent::on_port(center, out));
        canvas.borrow_mut().take_layout_request();

        let to = Pos2::new(90.0, 90.0);
        let mut moved = PointerEvent::at(to);
        controller.update(&mut moved);

        assert!(moved.is_handled());
        let candidate = controller.candidate().unwrap();
        assert_eq!(canvas.borrow().element(candidate).unwrap().free_end, Some(to));
        assert!(canvas.borrow_mut().take_layout_request());
    }

    #[test]
    fn test_events_ignored_while_idle() {
        let (canvas, mut controller, _, _) = setup();
        let mut moved = PointerEvent::at(Pos2::ZERO);
        controller.update(&mut moved);
        let mut released = PointerEvent::at(Pos2::ZERO);
        assert_eq!(controller.stop(&mut released), None);
        let mut key = KeyEvent::new(egui::Key::Escape);
        controller.on_key(&mut key);

        assert!(!moved.is_handled());
        assert!(!released.is_handled());
        assert!(!key.is_handled());
        assert!(!canvas.borrow_mut().take_layout_request());
    }

    #[test]
    fn test_other_keys_do_not_cancel() {
        let (_, mut controller, out, center) = setup();
        controller.start(&mut PointerEvent::on_port(center, out));

        let mut key = KeyEvent::new(egui::Key::Delete);
        controller.on_key(&mut key);
        assert!(!key.is_handled());
        assert!(controller.is_dragging());
    }

    #[test]
    fn test_configured_cancel_key() {
        let (canvas, _, out, center) = setup();
        let config = InteractionConfig { cancel_key: "Backspace".into(), ..InteractionConfig::default() };
        let mut controller = GestureController::new(Rc::clone(&canvas), config);
        controller.start(&mut PointerEvent::on_port(center, out));

        let mut key = KeyEvent::new(egui::Key::Backspace);
        controller.on_key(&mut key);
        assert!(key.is_handled());
        assert!(!controller.is_dragging());
        assert_eq!(canvas.borrow().elements().count(), 0);
    }

    #[test]
    fn test_abort_is_idempotent() {
        let (canvas, mut controller, out, center) = setup();
        controller.abort();
        controller.start(&mut PointerEvent::on_port(center, out));
        controller.abort();
        controller.abort();

        assert_eq!(controller.state(), GestureState::Idle);
        assert_eq!(controller.candidate(), None);
        assert_eq!(canvas.borrow().captured_by(), None);
        assert_eq!(canvas.borrow().elements().count(), 0);
    }
}
