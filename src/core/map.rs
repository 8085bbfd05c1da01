use crate::{
    animation::{
        clock::{Clock, SystemClock},
        pan::{Axis, PanAnimation},
    },
    core::{
        config::ViewerConfig,
        constants::OSM_TILE_URL_TEMPLATE,
        geo::{calculate_position, Coordinates, Point, Position},
        hash::{format_map_hash, parse_map_hash},
        viewport::Viewport,
    },
    input::{Action, EventHandled, EventManager, InputEvent, InputHandler, MapEvent},
    layers::{
        base::{LayerInfo, LayerKey, LayerOperations},
        grid::GridLayer,
        group::PositionalLayerGroup,
        overlay::{AttributionLayer, CrosshairLayer, ZoomControls},
        tile::TileLayer,
    },
    tiles::source::{OpenStreetMapSource, TemplateSource, TileSource},
    Result,
};
use std::sync::Arc;

/// A slippy map: owns the position, the layers and the pan animation.
///
/// The pane is driven entirely by its host: input goes in through [`MapPane::handle_input`],
/// display frames through [`MapPane::on_frame`] whenever [`MapPane::wants_frame`] is set, and
/// move-end notifications come out of [`MapPane::process_events`].
pub struct MapPane {
    viewport: Viewport,
    config: ViewerConfig,
    clock: Box<dyn Clock>,
    pan_animation: PanAnimation,
    input_handler: InputHandler,
    event_manager: EventManager,
    positional_layers: PositionalLayerGroup,
    crosshair: CrosshairLayer,
    zoom_controls: ZoomControls,
    attribution: AttributionLayer,
}

impl MapPane {
    pub fn new(config: ViewerConfig, clock: Box<dyn Clock>) -> Self {
        let source: Arc<dyn TileSource> = if config.tile_url_template == OSM_TILE_URL_TEMPLATE {
            Arc::new(OpenStreetMapSource::new())
        } else {
            Arc::new(TemplateSource::new(config.tile_url_template.clone()))
        };
        let view = config.initial_view;
        let zoom = view.zoom.min(config.max_zoom);
        let viewport = Viewport::with_max_zoom(
            calculate_position(zoom, view.lat, view.lon),
            Point::default(),
            config.max_zoom,
        );

        let mut pane = Self {
            viewport,
            input_handler: InputHandler::with_steps(config.pan_step, config.key_repeat_duration_ms),
            attribution: AttributionLayer::new(config.attribution.clone()),
            config,
            clock,
            pan_animation: PanAnimation::new(),
            event_manager: EventManager::new(),
            positional_layers: PositionalLayerGroup::new(source),
            crosshair: CrosshairLayer::new(),
            zoom_controls: ZoomControls::new(),
        };
        pane.redraw();
        pane
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.resize(width, height);
        self
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(Point::new(width, height));
        self.redraw();
    }

    /// Goes to `lat`/`lon` at `zoom`, clamped to the supported zoom levels.
    ///
    /// At the current zoom the pane animates there the short way around the antimeridian;
    /// otherwise it jumps. Either way exactly one move-end follows.
    pub fn move_to(&mut self, zoom: i32, lat: f64, lon: f64) {
        let target_zoom = zoom.clamp(0, self.viewport.max_zoom() as i32) as u8;
        let target = calculate_position(target_zoom, lat, lon);
        let current = self.viewport.position();
        if current.zoom != target_zoom {
            self.pan_animation.stop();
            self.viewport
                .set_position(target.x as f64, target.y as f64, target.zoom);
            self.redraw();
            self.report_move_end();
            return;
        }

        let target_point = Point::new(
            self.viewport.shortest_wrapped_x(target.x) as f64,
            target.y as f64,
        );
        let current_point = self.current_point();
        if target_point == current_point {
            self.pan_animation.stop();
            self.report_move_end();
            return;
        }
        let now = self.clock.now();
        if let Some(offset) = self.pan_animation.move_to(target_point, current_point, now) {
            self.positional_layers.start_cross_fade(offset);
        }
    }

    pub fn list_layers(&self) -> Vec<LayerInfo> {
        LayerKey::ALL
            .into_iter()
            .map(|key| LayerInfo::of(self.layer(key)))
            .collect()
    }

    pub fn toggle_layer(&mut self, key: LayerKey, visible: bool) {
        let position = self.viewport.position();
        let size = self.viewport.size;
        let layer = self.layer_mut(key);
        if visible {
            layer.show(&position, size);
        } else {
            layer.hide();
        }
        log::debug!("layer {} {}", key, if visible { "shown" } else { "hidden" });
        self.event_manager
            .emit(MapEvent::LayerToggled { key, visible });
    }

    pub fn layer(&self, key: LayerKey) -> &dyn LayerOperations {
        match key {
            LayerKey::Tiles => self.positional_layers.tile_layer(),
            LayerKey::Grid => self.positional_layers.grid_layer(),
            LayerKey::Crosshair => &self.crosshair,
            LayerKey::Zoom => &self.zoom_controls,
            LayerKey::Attribution => &self.attribution,
        }
    }

    fn layer_mut(&mut self, key: LayerKey) -> &mut dyn LayerOperations {
        match key {
            LayerKey::Tiles => self.positional_layers.tile_layer_mut(),
            LayerKey::Grid => self.positional_layers.grid_layer_mut(),
            LayerKey::Crosshair => &mut self.crosshair,
            LayerKey::Zoom => &mut self.zoom_controls,
            LayerKey::Attribution => &mut self.attribution,
        }
    }

    /// Zoom button. At the maximum zoom nothing happens and no move-end is reported.
    pub fn zoom_in(&mut self) {
        self.zoom_at_center(1);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_at_center(-1);
    }

    fn zoom_at_center(&mut self, dz: i32) {
        self.pan_animation.stop();
        self.zoom_step(dz, Point::default());
    }

    /// Zooms and settles at once. Returns whether the zoom changed.
    fn zoom_step(&mut self, dz: i32, anchor: Point) -> bool {
        if !self.viewport.zoom_by(dz, anchor) {
            return false;
        }
        self.redraw();
        self.report_move_end();
        true
    }

    pub fn handle_input(&mut self, event: InputEvent) -> EventHandled {
        let now = self.clock.now();
        let actions = self
            .input_handler
            .handle_event(event, now, self.viewport.half_size());
        if actions.is_empty() {
            return EventHandled::NotHandled;
        }

        for action in actions {
            match action {
                Action::StopAnimation => self.pan_animation.stop(),
                Action::PanBy(offset) => {
                    self.viewport.pan_by(offset.x, offset.y);
                    self.redraw();
                }
                Action::ZoomBy { dz, anchor } => {
                    if self.viewport.zoom_by(dz, anchor) {
                        self.redraw();
                    }
                }
                Action::ZoomStep { dz, anchor } => {
                    self.zoom_step(dz, anchor);
                }
                Action::Fling(speed) => {
                    let current = self.current_point();
                    if !self.pan_animation.fling(speed, current, now) {
                        self.report_move_end();
                    }
                }
                Action::Step { axis, offset } => {
                    let current = self.current_axis(axis);
                    self.pan_animation.step(axis, offset, current, now);
                }
                Action::LinearStep {
                    axis,
                    offset,
                    duration,
                } => {
                    let current = self.current_axis(axis);
                    self.pan_animation
                        .linear_step(axis, offset, duration, current, now);
                }
                Action::TransitionToDecay(axis) => {
                    self.pan_animation.transition_to_decay(axis, now)
                }
                Action::ReportMoveEnd => self.report_move_end(),
                Action::Resize(size) => self.resize(size.x, size.y),
            }
        }
        EventHandled::Handled
    }

    /// Whether the host should call [`MapPane::on_frame`] on its next display frame
    pub fn wants_frame(&self) -> bool {
        self.pan_animation.wants_frame()
    }

    /// Advances the animation to the current time. Returns whether another frame is wanted.
    pub fn on_frame(&mut self) -> bool {
        if !self.pan_animation.wants_frame() {
            return false;
        }
        let now = self.clock.now();
        let update = self.pan_animation.animate_frame(now, self.current_point());
        if let Some(point) = update.position {
            self.viewport
                .set_position(point.x, point.y, self.viewport.zoom());
            self.redraw();
        }
        if let Some(progress) = update.cross_fade_progress {
            self.positional_layers.set_cross_fade_progress(progress);
        }
        if update.ended {
            self.report_move_end();
        }
        self.pan_animation.wants_frame()
    }

    pub fn is_animating(&self) -> bool {
        self.pan_animation.is_animating()
    }

    /// Register an event listener for `"moveend"` or `"layertoggle"`
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    /// `#map=Z/LAT/LON` fragment of the current position
    pub fn hash(&self) -> String {
        format_map_hash(&self.coordinates())
    }

    /// Moves to the position in a `#map=` fragment. Malformed fragments leave the
    /// position untouched.
    pub fn restore_from_hash(&mut self, fragment: &str) -> Result<()> {
        match parse_map_hash(fragment) {
            Ok(coords) => {
                self.move_to(coords.zoom as i32, coords.lat, coords.lon);
                Ok(())
            }
            Err(err) => {
                log::debug!("ignoring map hash {:?}: {}", fragment, err);
                Err(err.into())
            }
        }
    }

    pub fn position(&self) -> Position {
        self.viewport.position()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.viewport.coordinates()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn layers(&self) -> &PositionalLayerGroup {
        &self.positional_layers
    }

    pub fn tile_layer(&self) -> &TileLayer {
        self.positional_layers.tile_layer()
    }

    pub fn grid_layer(&self) -> &GridLayer {
        self.positional_layers.grid_layer()
    }

    pub fn crosshair(&self) -> &CrosshairLayer {
        &self.crosshair
    }

    pub fn zoom_controls(&self) -> &ZoomControls {
        &self.zoom_controls
    }

    pub fn attribution(&self) -> &AttributionLayer {
        &self.attribution
    }

    fn current_point(&self) -> Point {
        let Position { x, y, .. } = self.viewport.position();
        Point::new(x as f64, y as f64)
    }

    fn current_axis(&self, axis: Axis) -> f64 {
        let point = self.current_point();
        match axis {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    fn redraw(&mut self) {
        let position = self.viewport.position();
        self.positional_layers.redraw(&position, self.viewport.size);
        self.zoom_controls
            .update_for_zoom(position.zoom, self.viewport.max_zoom());
    }

    fn report_move_end(&mut self) {
        let coords = self.viewport.coordinates();
        log::trace!("move end at {}", format_map_hash(&coords));
        self.event_manager.emit(MapEvent::MoveEnd(coords));
    }
}

impl Default for MapPane {
    fn default() -> Self {
        Self::new(ViewerConfig::default(), Box::new(SystemClock::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clock::ManualClock;

    fn pane() -> (MapPane, ManualClock) {
        let clock = ManualClock::new(0.0);
        let pane = MapPane::new(ViewerConfig::default(), Box::new(clock.clone()))
            .with_size(800.0, 600.0);
        (pane, clock)
    }

    fn run_frames(pane: &mut MapPane, clock: &ManualClock) -> usize {
        let mut frames = 0;
        while pane.wants_frame() {
            clock.advance(16.0);
            pane.on_frame();
            frames += 1;
            assert!(frames < 10_000);
        }
        frames
    }

    #[test]
    fn test_initial_view() {
        let (pane, _) = pane();
        assert_eq!(pane.position().zoom, 17);
        let coords = pane.coordinates();
        assert!((coords.lat - 59.93903).abs() < 1e-4);
        assert!((coords.lon - 30.31582).abs() < 1e-4);
        assert!(!pane.tile_layer().images().is_empty());
        assert!(!pane.wants_frame());
    }

    #[test]
    fn test_zoom_buttons() {
        let (mut pane, _) = pane();
        pane.move_to(19, 0.0, 0.0);
        pane.process_events();
        assert!(!pane.zoom_controls().zoom_in_enabled());
        let tiles = pane.tile_layer().generation();
        pane.zoom_in();
        assert_eq!(pane.position().zoom, 19);
        // clamped to nothing: no redraw, no event
        assert!(pane.process_events().is_empty());
        assert_eq!(pane.tile_layer().generation(), tiles);
        pane.zoom_out();
        assert_eq!(pane.position().zoom, 18);
        assert!(pane.zoom_controls().zoom_in_enabled());
        assert_eq!(pane.process_events().len(), 1);
    }

    #[test]
    fn test_short_move_animates_then_reports() {
        let (mut pane, clock) = pane();
        let start = pane.coordinates();
        pane.move_to(17, start.lat + 0.001, start.lon + 0.001);
        assert!(pane.wants_frame());
        assert!(pane.layers().cross_fade().is_none());
        assert!(pane.process_events().is_empty());
        let frames = run_frames(&mut pane, &clock);
        assert!(frames > 1);
        let events = pane.process_events();
        assert_eq!(events.len(), 1);
        let target = calculate_position(17, start.lat + 0.001, start.lon + 0.001);
        assert_eq!(pane.position(), target);
    }

    #[test]
    fn test_long_move_cross_fades() {
        let (mut pane, clock) = pane();
        pane.move_to(17, 0.0, 0.0);
        assert!(pane.layers().cross_fade().is_some());
        run_frames(&mut pane, &clock);
        assert!(pane.layers().cross_fade().is_none());
        assert_eq!(pane.position(), calculate_position(17, 0.0, 0.0));
        assert_eq!(pane.tile_layer().opacity(), 1.0);
        assert_eq!(pane.process_events().len(), 1);
    }

    #[test]
    fn test_move_to_current_position_reports_immediately() {
        let (mut pane, _) = pane();
        let coords = pane.coordinates();
        pane.move_to(17, coords.lat, coords.lon);
        assert!(!pane.wants_frame());
        assert_eq!(pane.process_events().len(), 1);
    }

    #[test]
    fn test_move_clamps_zoom() {
        let (mut pane, _) = pane();
        pane.move_to(40, 10.0, 10.0);
        assert_eq!(pane.position().zoom, 19);
        pane.move_to(-3, 10.0, 10.0);
        assert_eq!(pane.position().zoom, 0);
    }

    #[test]
    fn test_toggle_layers() {
        let (mut pane, _) = pane();
        let layers = pane.list_layers();
        let keys: Vec<_> = layers.iter().map(|l| l.key).collect();
        assert_eq!(keys, LayerKey::ALL.to_vec());
        assert!(layers.iter().all(|l| l.visible));

        pane.toggle_layer(LayerKey::Tiles, false);
        assert!(pane.tile_layer().images().is_empty());
        pane.toggle_layer(LayerKey::Grid, false);
        assert_eq!(pane.grid_layer().svg(), "");
        pane.toggle_layer(LayerKey::Crosshair, false);
        assert_eq!(pane.crosshair().markup(), "");

        let hidden: Vec<_> = pane
            .list_layers()
            .into_iter()
            .filter(|l| !l.visible)
            .map(|l| l.key)
            .collect();
        assert_eq!(hidden, vec![LayerKey::Tiles, LayerKey::Grid, LayerKey::Crosshair]);

        pane.toggle_layer(LayerKey::Tiles, true);
        assert!(!pane.tile_layer().images().is_empty());
        assert_eq!(pane.process_events().len(), 4);
    }

    #[test]
    fn test_hash_round_trip() {
        let (mut pane, _) = pane();
        let hash = pane.hash();
        assert!(hash.starts_with("#map=17/59.9390"), "{}", hash);
        assert!(hash.contains("/30.3158"), "{}", hash);
        pane.restore_from_hash("#map=3/10.5/20.25").unwrap();
        let coords = pane.coordinates();
        assert_eq!(coords.zoom, 3);
        // one pixel at zoom 3 is under 0.2°
        assert!((coords.lat - 10.5).abs() < 0.2);
        assert!((coords.lon - 20.25).abs() < 0.2);
        assert!(pane.hash().starts_with("#map=3/"));
    }

    #[test]
    fn test_bad_hash_is_ignored() {
        let (mut pane, _) = pane();
        let before = pane.position();
        assert!(pane.restore_from_hash("#map=banana").is_err());
        assert_eq!(pane.position(), before);
        assert!(pane.process_events().is_empty());
    }
}
