//! Prelude module for common osmview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use osmview::prelude::*;`

pub use crate::core::{
    config::{AttributionConfig, ViewerConfig},
    geo::{calculate_coords, calculate_position, Coordinates, Point, Position, TileCoord},
    hash::{format_map_hash, parse_map_hash},
    map::MapPane,
    viewport::Viewport,
};

pub use crate::animation::{
    clock::{Clock, ManualClock, SystemClock},
    pan::{Axis, PanAnimation},
};

pub use crate::input::{
    events::{EventHandled, InputEvent, KeyCode, KeyModifiers, MapEvent},
    handler::{Action, EventManager, InputHandler},
};

pub use crate::layers::{
    base::{LayerInfo, LayerKey},
    grid::GridLayer,
    tile::{TileImage, TileLayer, TileWindow},
};

pub use crate::tiles::source::{OpenStreetMapSource, TemplateSource, TileSource};

pub use crate::traits::LayerOperations;

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::drive_until_idle;

pub use crate::{Error as MapError, Result};

pub use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
