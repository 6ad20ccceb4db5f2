// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph model and reference canvas for `Portlink`.
//!
//! This crate provides the collaborator side of connection dragging:
//! - Typed input/output ports with implicit conversions
//! - Nodes with port layout and canvas-space bounds
//! - Persisted connections with validation
//! - Transient visual edges (candidate, ghost, committed)
//! - The [`GraphSurface`] trait the interaction core talks to
//!
//! ## Architecture
//!
//! [`Graph`] is the persisted model. [`Canvas`] wraps a graph together with
//! the transient element layer, highlight flags and pointer capture, and
//! implements [`GraphSurface`] over it.

pub mod canvas;
pub mod connection;
pub mod edge;
pub mod graph;
pub mod node;
pub mod port;
pub mod surface;

pub use canvas::{Canvas, CanvasSettings, CompatibilityRules};
pub use connection::{Connection, ConnectionId};
pub use edge::{Edge, EdgeId};
pub use graph::{ConnectionError, Graph};
pub use node::{Node, NodeId};
pub use port::{Port, PortDirection, PortId, PortType};
pub use surface::{GraphSurface, PortInfo};

/// Re-exported geometry types shared by the model and the interaction core.
pub use egui::{Pos2, Rect, Vec2};
