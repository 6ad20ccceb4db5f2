// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scoped pointer capture.

use portlink_graph::{GraphSurface, PortId};
use std::cell::RefCell;
use std::rc::Rc;

/// Holds pointer capture on a surface for as long as it lives.
///
/// Dropping the guard releases capture. When the host has already taken
/// capture away, [`CaptureGuard::lost`] disarms the guard instead so nothing
/// is released twice.
pub struct CaptureGuard<S: GraphSurface> {
    surface: Rc<RefCell<S>>,
    owner: PortId,
    armed: bool,
}

impl<S: GraphSurface> CaptureGuard<S> {
    /// Capture the pointer for the gesture started on `owner`
    pub fn acquire(surface: Rc<RefCell<S>>, owner: PortId) -> Self {
        surface.borrow_mut().capture_pointer(owner);
        Self { surface, owner, armed: true }
    }

    /// Port the capture was taken for
    pub fn owner(&self) -> PortId {
        self.owner
    }

    /// Forget the capture without releasing it
    pub fn lost(mut self) {
        self.armed = false;
    }
}

impl<S: GraphSurface> Drop for CaptureGuard<S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.surface.try_borrow_mut() {
            Ok(mut surface) => surface.release_pointer(self.owner),
            Err(_) => tracing::warn!("Surface busy, pointer capture for {:?} not released", self.owner),
        }
    }
}

impl<S: GraphSurface> std::fmt::Debug for CaptureGuard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("owner", &self.owner)
            .field("armed", &self.armed)
            .finish()
    }
}
