// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared fixtures for gesture tests.

#![allow(dead_code)]

use portlink_graph::{Canvas, Graph, GraphSurface, Node, Port, PortId, PortType, Pos2};
use portlink_interaction::{GestureController, InteractionConfig, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Install a test-friendly subscriber once. `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Source output at (0,0), node A spanning (50,-20)-(150,20) with its input
/// at (100,0), node B spanning (200,-20)-(300,20) with its input at (250,0).
pub struct Scene {
    pub canvas: Rc<RefCell<Canvas>>,
    pub controller: GestureController<Canvas>,
    pub source: PortId,
    pub a: PortId,
    pub b: PortId,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_graph(scenario_graph())
    }

    pub fn with_graph((graph, source, a, b): (Graph, PortId, PortId, PortId)) -> Self {
        init_tracing();
        let canvas = Rc::new(RefCell::new(Canvas::new(graph)));
        let controller = GestureController::new(Rc::clone(&canvas), InteractionConfig::default());
        Self { canvas, controller, source, a, b }
    }

    /// Press on the source port
    pub fn press(&mut self) {
        let center = self.center(self.source);
        self.controller.start(&mut PointerEvent::on_port(center, self.source));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.controller.update(&mut PointerEvent::at(Pos2::new(x, y)));
    }

    pub fn release_at(&mut self, x: f32, y: f32) -> Option<portlink_interaction::ConnectionCreated> {
        self.controller.stop(&mut PointerEvent::at(Pos2::new(x, y)))
    }

    pub fn center(&self, port: PortId) -> Pos2 {
        self.canvas.borrow().port_info(port).map(|info| info.center).unwrap_or(Pos2::ZERO)
    }

    /// No candidate, ghost, highlight or capture left on the canvas
    pub fn assert_clean(&self) {
        let canvas = self.canvas.borrow();
        assert_eq!(canvas.candidate_edges().count(), 0, "candidate edge left behind");
        assert_eq!(canvas.ghost_edges().count(), 0, "ghost edge left behind");
        assert!(canvas.highlighted_ports().is_empty(), "port left highlighted");
        assert_eq!(canvas.captured_by(), None, "pointer capture not released");
        assert!(!self.controller.is_dragging());
    }

    pub fn committed(&self) -> Vec<(Option<PortId>, Option<PortId>)> {
        self.canvas.borrow().committed_edges().map(|e| (e.output, e.input)).collect()
    }
}

pub fn scenario_graph() -> (Graph, PortId, PortId, PortId) {
    let source = Port::output("Out", PortType::Float).with_anchor(20.0, 20.0);
    let a = Port::input("In", PortType::Float).with_anchor(50.0, 20.0);
    let b = Port::input("In", PortType::Float).with_anchor(50.0, 20.0);
    let ids = (source.id, a.id, b.id);

    let mut graph = Graph::new("Scenario");
    graph.add_node(Node::new("Source").with_position(-20.0, -20.0).with_size(20.0, 40.0).with_port(source));
    graph.add_node(Node::new("A").with_position(50.0, -20.0).with_size(100.0, 40.0).with_port(a));
    graph.add_node(Node::new("B").with_position(200.0, -20.0).with_size(100.0, 40.0).with_port(b));
    (graph, ids.0, ids.1, ids.2)
}

/// Two overlapping nodes A (0,0)-(150,40) and B (100,0)-(250,40) with inputs
/// at (20,20) and (180,20), plus a source far to the left.
pub fn overlapping_scene() -> Scene {
    let source = Port::output("Out", PortType::Float).with_anchor(10.0, 10.0);
    let a = Port::input("In", PortType::Float).with_anchor(20.0, 20.0);
    let b = Port::input("In", PortType::Float).with_anchor(80.0, 20.0);
    let ids = (source.id, a.id, b.id);

    let mut graph = Graph::new("Overlap");
    graph.add_node(Node::new("Source").with_position(-200.0, 0.0).with_size(20.0, 20.0).with_port(source));
    graph.add_node(Node::new("A").with_position(0.0, 0.0).with_size(150.0, 40.0).with_port(a));
    graph.add_node(Node::new("B").with_position(100.0, 0.0).with_size(150.0, 40.0).with_port(b));
    Scene::with_graph((graph, ids.0, ids.1, ids.2))
}
