#[macro_use]
pub mod macros;

pub mod base;
pub mod grid;
pub mod group;
pub mod overlay;
pub mod tile;

pub use base::{LayerInfo, LayerKey, LayerOperations};
pub use grid::GridLayer;
pub use group::PositionalLayerGroup;
pub use overlay::{AttributionLayer, CrosshairLayer, ZoomControls};
pub use tile::{TileImage, TileLayer, TileWindow};
