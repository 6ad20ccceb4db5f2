// SPDX-License-Identifier: MIT OR Apache-2.0
//! Egui front end for connection dragging.
//!
//! [`ConnectionOverlay`] reads one frame of egui input, converts it into
//! controller events in canvas space, and paints the transient edges:
//! - the candidate edge as a solid bezier from its port to the pointer
//! - the ghost edge as a dashed bezier to the previewed port
//! - a ring around the highlighted port

use crate::controller::GestureController;
use crate::event::{KeyEvent, PointerEvent, PointerTarget};
use egui::{Color32, Pos2, Rect, Shape, Stroke, Vec2};
use portlink_graph::{GraphSurface, PortDirection, PortType};

/// Connection visual parameters
const BEZIER_CURVATURE: f32 = 50.0;
const BEZIER_SEGMENTS: usize = 32;
const CONNECTION_THICKNESS: f32 = 2.5;

/// Ghost edge visual parameters
const GHOST_ALPHA: u8 = 110;
const GHOST_DASH: f32 = 6.0;
const GHOST_GAP: f32 = 4.0;

/// Ring drawn around the previewed port
const HIGHLIGHT_RADIUS: f32 = 10.0;

/// Pan and zoom mapping between screen and canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current pan offset (canvas space)
    pub pan: Vec2,
    /// Current zoom level
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Convert screen position to canvas position
    pub fn screen_to_canvas(&self, screen_pos: Pos2, rect: Rect) -> Pos2 {
        let center = rect.center();
        Pos2::new(
            (screen_pos.x - center.x) / self.zoom - self.pan.x,
            (screen_pos.y - center.y) / self.zoom - self.pan.y,
        )
    }

    /// Convert canvas position to screen position
    pub fn canvas_to_screen(&self, canvas_pos: Pos2, rect: Rect) -> Pos2 {
        let center = rect.center();
        Pos2::new(
            (canvas_pos.x + self.pan.x) * self.zoom + center.x,
            (canvas_pos.y + self.pan.y) * self.zoom + center.y,
        )
    }
}

/// Drives a [`GestureController`] from egui and paints its transient edges
pub struct ConnectionOverlay<S: GraphSurface> {
    controller: GestureController<S>,
    /// Screen/canvas mapping
    pub viewport: Viewport,
    last_pointer: Option<Pos2>,
}

impl<S: GraphSurface> ConnectionOverlay<S> {
    /// Wrap a controller
    pub fn new(controller: GestureController<S>) -> Self {
        Self {
            controller,
            viewport: Viewport::default(),
            last_pointer: None,
        }
    }

    /// The wrapped controller
    pub fn controller(&self) -> &GestureController<S> {
        &self.controller
    }

    /// The wrapped controller, mutably
    pub fn controller_mut(&mut self) -> &mut GestureController<S> {
        &mut self.controller
    }

    /// Feed this frame's input to the controller.
    ///
    /// Returns `true` when the controller consumed any of it.
    pub fn handle_input(&mut self, ui: &egui::Ui, rect: Rect) -> bool {
        let (pressed, released, pointer, has_pointer, focused, keys) = ui.input(|i| {
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, .. } => Some(*key),
                    _ => None,
                })
                .collect();
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.pointer.has_pointer(),
                i.focused,
                keys,
            )
        });

        // Losing the window or the pointer means the drag lost its capture
        if self.controller.is_dragging() && (!focused || !has_pointer) {
            self.controller.surface().borrow_mut().lose_pointer_capture();
            self.controller.on_capture_lost();
            self.last_pointer = None;
            return true;
        }

        let mut consumed = false;
        for key in keys {
            let mut event = KeyEvent::new(key);
            self.controller.on_key(&mut event);
            consumed |= event.is_handled();
        }

        let Some(screen_pos) = pointer else {
            return consumed;
        };
        let pos = self.viewport.screen_to_canvas(screen_pos, rect);

        if pressed && rect.contains(screen_pos) {
            let mut event = PointerEvent::new(pos, self.target_at(pos));
            self.controller.start(&mut event);
            consumed |= event.is_handled();
        }

        if self.controller.is_dragging() && self.last_pointer != Some(pos) {
            let mut event = PointerEvent::new(pos, self.target_at(pos));
            self.controller.update(&mut event);
            consumed |= event.is_handled();
        }

        if released {
            let mut event = PointerEvent::new(pos, self.target_at(pos));
            self.controller.stop(&mut event);
            consumed |= event.is_handled();
        }

        self.last_pointer = Some(pos);
        if self.controller.is_dragging() {
            ui.ctx().request_repaint();
        }
        consumed
    }

    /// Paint the candidate edge, the ghost edge and the highlighted port
    pub fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let surface = self.controller.surface().borrow();
        let zoom = self.viewport.zoom;
        let to_screen = |pos: Pos2| self.viewport.canvas_to_screen(pos, rect);

        let candidate = self.controller.candidate().and_then(|id| surface.element(id));
        if let Some(edge) = candidate {
            if let (Some((port, direction)), Some(free_end)) = (edge.fixed_end(), edge.free_end) {
                if let Some(info) = surface.port_info(port) {
                    let (from, to) = match direction {
                        PortDirection::Output => (info.center, free_end),
                        PortDirection::Input => (free_end, info.center),
                    };
                    let points = connection_curve(to_screen(from), to_screen(to), zoom);
                    let stroke = Stroke::new(CONNECTION_THICKNESS * zoom, port_color(&info.port_type, 255));
                    painter.add(Shape::line(points, stroke));
                }
            }
        }

        let ghost = self.controller.session().ghost();
        let ghost_edge = ghost.edge().and_then(|id| surface.element(id));
        if let Some((Some(output), Some(input))) = ghost_edge.map(|edge| (edge.output, edge.input)) {
            if let (Some(from), Some(to)) = (surface.port_info(output), surface.port_info(input)) {
                let points = connection_curve(to_screen(from.center), to_screen(to.center), zoom);
                let stroke = Stroke::new(CONNECTION_THICKNESS * zoom, port_color(&from.port_type, GHOST_ALPHA));
                painter.extend(Shape::dashed_line(&points, stroke, GHOST_DASH * zoom, GHOST_GAP * zoom));
            }
        }

        if let Some(info) = ghost.target().and_then(|port| surface.port_info(port)) {
            painter.circle_stroke(
                to_screen(info.center),
                HIGHLIGHT_RADIUS * zoom,
                Stroke::new(2.0, port_color(&info.port_type, 255)),
            );
        }
    }

    fn target_at(&self, pos: Pos2) -> PointerTarget {
        self.controller
            .surface()
            .borrow()
            .port_at(pos)
            .map_or(PointerTarget::Canvas, PointerTarget::Port)
    }
}

fn port_color(port_type: &PortType, alpha: u8) -> Color32 {
    let [r, g, b] = port_type.color();
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// Screen-space bezier from an output position to an input position
pub fn connection_curve(from: Pos2, to: Pos2, zoom: f32) -> Vec<Pos2> {
    let distance = (to.x - from.x).abs();
    let curvature = (BEZIER_CURVATURE * zoom).min(distance * 0.5);

    let ctrl1 = Pos2::new(from.x + curvature, from.y);
    let ctrl2 = Pos2::new(to.x - curvature, to.y);
    bezier_points(from, ctrl1, ctrl2, to, BEZIER_SEGMENTS)
}

/// Generate points along a cubic bezier curve
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x;
        let y = mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y;

        points.push(Pos2::new(x, y));
    }
    points
}
