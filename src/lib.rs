//! # osmview
//!
//! A slippy-map viewport engine in the style of the OpenStreetMap viewer.
//!
//! The crate keeps a map position in Web-Mercator pixel space, turns pointer, wheel and
//! keyboard input into pans and zooms with kinetic animation, and computes what a host should
//! draw: the window of raster tiles around the view, a latitude/longitude grid as SVG, and a
//! few fixed overlays. Drawing itself is left to the host.

pub mod animation;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::ViewerConfig,
    geo::{Coordinates, Point, Position, TileCoord},
    hash::HashError,
    map::MapPane,
    viewport::Viewport,
};

pub use animation::{clock::Clock, pan::PanAnimation};

pub use input::{events::InputEvent, events::MapEvent, handler::InputHandler};

pub use layers::{
    base::{LayerInfo, LayerKey},
    grid::GridLayer,
    tile::TileLayer,
};

pub use tiles::source::{OpenStreetMapSource, TileSource};

pub use traits::LayerOperations;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid map hash: {0}")]
    Hash(#[from] HashError),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
