use crate::{
    core::geo::{Point, Position},
    layers::{
        base::LayerOperations,
        grid::GridLayer,
        tile::TileLayer,
    },
    tiles::source::TileSource,
};
use std::sync::Arc;

/// Layers being faded out after a long jump, drawn `offset` away from the live position
pub struct CrossFade {
    pub tile_layer: TileLayer,
    pub grid_layer: GridLayer,
    pub offset: Point,
}

/// The layers that follow the map position: tiles below, grid on top.
pub struct PositionalLayerGroup {
    tile_layer: TileLayer,
    grid_layer: GridLayer,
    cross_fade: Option<CrossFade>,
}

impl PositionalLayerGroup {
    pub fn new(source: Arc<dyn TileSource>) -> Self {
        Self {
            tile_layer: TileLayer::new(source),
            grid_layer: GridLayer::new(),
            cross_fade: None,
        }
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    pub fn tile_layer_mut(&mut self) -> &mut TileLayer {
        &mut self.tile_layer
    }

    pub fn grid_layer(&self) -> &GridLayer {
        &self.grid_layer
    }

    pub fn grid_layer_mut(&mut self) -> &mut GridLayer {
        &mut self.grid_layer
    }

    pub fn cross_fade(&self) -> Option<&CrossFade> {
        self.cross_fade.as_ref()
    }

    pub fn redraw(&mut self, position: &Position, size: Point) {
        if let Some(cross_fade) = self.cross_fade.as_mut() {
            let out_position = position.offset(
                cross_fade.offset.x.round() as i64,
                cross_fade.offset.y.round() as i64,
            );
            cross_fade.tile_layer.redraw(&out_position, size);
            cross_fade.grid_layer.redraw(&out_position, size);
        }
        self.tile_layer.redraw(position, size);
        self.grid_layer.redraw(position, size);
    }

    /// Moves the current layers out and starts fresh ones at opacity 0.
    ///
    /// The fresh layers keep the visibility of the ones they replace. A cross-fade that is
    /// still running is finished first.
    pub fn start_cross_fade(&mut self, offset: Point) {
        self.set_cross_fade_progress(1.0);
        let mut tile_layer = TileLayer::new(self.tile_layer.source().clone());
        let mut grid_layer = GridLayer::new();
        tile_layer.set_visible(self.tile_layer.is_visible());
        grid_layer.set_visible(self.grid_layer.is_visible());
        self.cross_fade = Some(CrossFade {
            tile_layer: std::mem::replace(&mut self.tile_layer, tile_layer),
            grid_layer: std::mem::replace(&mut self.grid_layer, grid_layer),
            offset,
        });
        self.set_cross_fade_opacity(0.0);
        log::debug!("cross-fade started with offset {:?}", offset);
    }

    pub fn set_cross_fade_progress(&mut self, progress: f64) {
        if self.cross_fade.is_none() {
            return;
        }
        self.set_cross_fade_opacity(progress);
        if progress >= 1.0 {
            self.cross_fade = None;
            log::debug!("cross-fade finished");
        }
    }

    fn set_cross_fade_opacity(&mut self, progress: f64) {
        self.tile_layer.set_opacity(progress);
        self.grid_layer.set_opacity(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::source::OpenStreetMapSource;

    const VIEW: Point = Point { x: 512.0, y: 512.0 };

    fn group() -> PositionalLayerGroup {
        PositionalLayerGroup::new(Arc::new(OpenStreetMapSource::new()))
    }

    #[test]
    fn test_cross_fade_lifecycle() {
        let mut layers = group();
        let position = Position::new(40_000, 40_000, 10);
        layers.redraw(&position, VIEW);
        let first_generation = layers.tile_layer().generation();
        assert_eq!(first_generation, 1);

        layers.start_cross_fade(Point::new(-3000.0, 0.0));
        assert_eq!(layers.tile_layer().opacity(), 0.0);
        assert_eq!(layers.grid_layer().opacity(), 0.0);
        assert!(layers.tile_layer().images().is_empty());

        layers.redraw(&position, VIEW);
        let out = layers.cross_fade().unwrap();
        // the outgoing layers are drawn where the old view now is
        assert_ne!(out.tile_layer.window(), layers.tile_layer().window());
        assert_eq!(out.tile_layer.opacity(), 1.0);

        layers.set_cross_fade_progress(0.25);
        assert_eq!(layers.tile_layer().opacity(), 0.25);
        assert!(layers.cross_fade().is_some());

        layers.set_cross_fade_progress(1.0);
        assert!(layers.cross_fade().is_none());
        assert_eq!(layers.tile_layer().opacity(), 1.0);
        assert_eq!(layers.grid_layer().opacity(), 1.0);
    }

    #[test]
    fn test_fresh_layers_inherit_visibility() {
        let mut layers = group();
        layers.grid_layer_mut().hide();
        layers.start_cross_fade(Point::new(5000.0, 5000.0));
        assert!(!layers.grid_layer().is_visible());
        assert!(layers.tile_layer().is_visible());
        layers.redraw(&Position::new(40_000, 40_000, 10), VIEW);
        assert_eq!(layers.grid_layer().svg(), "");
    }

    #[test]
    fn test_progress_without_cross_fade_is_ignored() {
        let mut layers = group();
        layers.set_cross_fade_progress(0.5);
        assert_eq!(layers.tile_layer().opacity(), 1.0);
    }

    #[test]
    fn test_restart_finishes_previous_cross_fade() {
        let mut layers = group();
        layers.start_cross_fade(Point::new(3000.0, 0.0));
        layers.set_cross_fade_progress(0.5);
        layers.start_cross_fade(Point::new(-3000.0, 0.0));
        let out = layers.cross_fade().unwrap();
        assert_eq!(out.offset, Point::new(-3000.0, 0.0));
        assert_eq!(out.tile_layer.opacity(), 1.0);
        assert_eq!(layers.tile_layer().opacity(), 0.0);
    }
}
