// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection dragging for `Portlink` node graphs.
//!
//! Turns pointer gestures that start on a port into new edges:
//! - Exact hit-testing against compatible ports
//! - Fallback to the nearest compatible port of the node under the pointer
//! - Ghost edge previews with port highlighting
//! - Click, cancel-key and capture-loss aborts with full cleanup
//!
//! ## Architecture
//!
//! [`GestureController`] is the state machine that receives pointer and key
//! events. It drives a [`ConnectionSession`], which owns the compatible port
//! set, the candidate edge reference and the [`GhostPreview`]. Both talk to
//! the canvas only through [`portlink_graph::GraphSurface`], injected at
//! construction. [`ui::ConnectionOverlay`] feeds egui input into the
//! controller and paints the transient edges.

pub mod capture;
pub mod config;
pub mod controller;
pub mod event;
pub mod ghost;
pub mod session;
pub mod ui;

pub use capture::CaptureGuard;
pub use config::{ConfigError, InteractionConfig};
pub use controller::{GestureController, GestureState};
pub use event::{ConnectionCreated, KeyEvent, PointerEvent, PointerTarget};
pub use ghost::GhostPreview;
pub use session::{ConnectionSession, DragResolution};
