//! Shared trait abstractions
//!
//! Every toggleable part of a map pane (positional layers and plain UI overlays alike)
//! implements [`LayerOperations`], so the pane can list and toggle them uniformly.

use crate::{
    core::geo::{Point, Position},
    layers::base::LayerKey,
};

/// Capability interface of a layer
pub trait LayerOperations {
    /// Stable key used by layer lists and settings
    fn key(&self) -> LayerKey;

    /// Human-readable name
    fn name(&self) -> &'static str {
        self.key().name()
    }

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set the visibility flag without drawing or clearing anything
    fn set_visible(&mut self, visible: bool);

    /// Drop whatever the layer has drawn
    fn clear(&mut self) {}

    /// Bring the layer up to date with `position` on a viewport of `size`.
    ///
    /// Hidden layers clear themselves instead.
    fn redraw(&mut self, _position: &Position, _size: Point) {}

    fn hide(&mut self) {
        self.set_visible(false);
        self.clear();
    }

    fn show(&mut self, position: &Position, size: Point) {
        self.set_visible(true);
        self.redraw(position, size);
    }
}
