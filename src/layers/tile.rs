use crate::{
    core::{
        constants::TILE_SIZE,
        geo::{tile_range, Point, Position, TileCoord},
    },
    layers::base::{LayerKey, LayerOperations},
    tiles::source::TileSource,
};
use std::sync::Arc;

/// Range of tile indices needed to cover the viewport.
///
/// `x` bounds are unwrapped (they may leave `[0, 2^zoom)`); `y` bounds never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileWindow {
    pub zoom: u8,
    pub x_lo: i64,
    pub x_hi: i64,
    pub y_lo: i64,
    pub y_hi: i64,
}

impl TileWindow {
    pub fn is_empty(&self) -> bool {
        self.x_hi < self.x_lo || self.y_hi < self.y_lo
    }

    pub fn tile_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            ((self.x_hi - self.x_lo + 1) * (self.y_hi - self.y_lo + 1)) as usize
        }
    }
}

/// A tile image request placed on the layer
#[derive(Debug, Clone, PartialEq)]
pub struct TileImage {
    pub coord: TileCoord,
    pub url: String,
    /// Top-left corner relative to the viewport center [px]
    pub offset: Point,
}

/// Tile window at `position` with the sub-tile offset of the tile under the center
fn cover(position: &Position, size: Point) -> (TileWindow, i64, i64, Point) {
    let tile_size = TILE_SIZE as f64;
    let tile_x = position.x.div_euclid(TILE_SIZE);
    let tile_y = position.y.div_euclid(TILE_SIZE);
    let trans = Point::new(
        -position.x.rem_euclid(TILE_SIZE) as f64,
        -position.y.rem_euclid(TILE_SIZE) as f64,
    );
    let range = tile_range(position.zoom);
    let half = size.multiply(0.5);

    let extra_x_lo = ((half.x + trans.x) / tile_size).floor() as i64 + 1;
    let extra_x_hi = ((half.x - trans.x) / tile_size).floor() as i64;
    let extra_y_lo = tile_y.min(((half.y + trans.y) / tile_size).floor() as i64 + 1);
    let extra_y_hi = (range - tile_y - 1).min(((half.y - trans.y) / tile_size).floor() as i64);

    let window = TileWindow {
        zoom: position.zoom,
        x_lo: tile_x - extra_x_lo,
        x_hi: tile_x + extra_x_hi,
        y_lo: tile_y - extra_y_lo,
        y_hi: tile_y + extra_y_hi,
    };
    (window, tile_x, tile_y, trans)
}

/// Raster tiles around the current position.
///
/// Tiles are only re-requested when the window of needed tiles changes. Within the same
/// window the layer keeps its images and only moves them by [`TileLayer::translate`].
pub struct TileLayer {
    source: Arc<dyn TileSource>,
    visible: bool,
    opacity: f64,
    images: Vec<TileImage>,
    translate: Point,
    previous: Option<(Position, TileWindow)>,
    generation: u64,
}

impl TileLayer {
    pub fn new(source: Arc<dyn TileSource>) -> Self {
        Self {
            source,
            visible: true,
            opacity: 1.0,
            images: Vec::new(),
            translate: Point::default(),
            previous: None,
            generation: 0,
        }
    }

    pub fn source(&self) -> &Arc<dyn TileSource> {
        &self.source
    }

    pub fn images(&self) -> &[TileImage] {
        &self.images
    }

    /// Shift applied to all images since the last rebuild
    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn window(&self) -> Option<TileWindow> {
        self.previous.map(|(_, window)| window)
    }

    /// Number of times the image set was rebuilt
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn rebuild(&mut self, position: &Position, window: TileWindow, tile_x: i64, tile_y: i64, trans: Point) {
        let tile_size = TILE_SIZE as f64;
        let mask = tile_range(position.zoom) - 1;
        self.images.clear();
        self.translate = Point::default();
        for j in window.y_lo..=window.y_hi {
            for i in window.x_lo..=window.x_hi {
                let coord = TileCoord::new((i & mask) as u32, j as u32, position.zoom);
                self.images.push(TileImage {
                    url: self.source.url(coord),
                    coord,
                    offset: Point::new(
                        trans.x + (i - tile_x) as f64 * tile_size,
                        trans.y + (j - tile_y) as f64 * tile_size,
                    ),
                });
            }
        }
        self.generation += 1;
        self.previous = Some((*position, window));
        log::debug!(
            "tile layer rebuilt with {} tiles at zoom {}",
            self.images.len(),
            position.zoom
        );
    }
}

impl LayerOperations for TileLayer {
    crate::impl_layer_visibility!(visible);

    fn key(&self) -> LayerKey {
        LayerKey::Tiles
    }

    fn clear(&mut self) {
        self.images.clear();
        self.translate = Point::default();
        self.previous = None;
    }

    fn redraw(&mut self, position: &Position, size: Point) {
        if !self.visible {
            self.clear();
            return;
        }
        let (window, tile_x, tile_y, trans) = cover(position, size);
        match self.previous {
            Some((previous_position, previous_window)) if previous_window == window => {
                self.translate = Point::new(
                    (previous_position.x - position.x) as f64,
                    (previous_position.y - position.y) as f64,
                );
            }
            _ => self.rebuild(position, window, tile_x, tile_y, trans),
        }
    }
}
