use crate::core::{
    constants::MAX_ZOOM,
    geo::{position_coords, space_mask, space_size, Coordinates, Point, Position},
};
use serde::{Deserialize, Serialize};

/// The camera of a map pane: a normalized pixel-space position plus the size of the view.
///
/// x wraps around the pixel space (longitude is cyclic), y saturates at the top and
/// bottom rows, and zoom stays within `[0, max_zoom]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    position: Position,
    /// The size of the viewport in pixels
    pub size: Point,
    max_zoom: u8,
}

impl Viewport {
    /// Creates a new viewport, normalizing the initial position
    pub fn new(position: Position, size: Point) -> Self {
        Self::with_max_zoom(position, size, MAX_ZOOM)
    }

    pub fn with_max_zoom(position: Position, size: Point, max_zoom: u8) -> Self {
        let mut viewport = Self {
            position,
            size,
            max_zoom: max_zoom.min(MAX_ZOOM),
        };
        let zoom = position.zoom.min(viewport.max_zoom);
        viewport.set_position(position.x as f64, position.y as f64, zoom);
        viewport
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn coordinates(&self) -> Coordinates {
        position_coords(&self.position)
    }

    pub fn zoom(&self) -> u8 {
        self.position.zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// The only way the position changes: wrap x, round and clamp y.
    pub fn set_position(&mut self, x: f64, y: f64, zoom: u8) {
        let zoom = zoom.min(self.max_zoom);
        let mask = space_mask(zoom);
        let x = if x.is_finite() { x.round() as i64 } else { self.position.x };
        let y = if y.is_finite() { y.round() as i64 } else { self.position.y };
        self.position = Position::new(x & mask, y.clamp(0, mask), zoom);
    }

    /// Moves the camera by a pixel offset at the current zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let Position { x, y, zoom } = self.position;
        self.set_position(x as f64 + dx, y as f64 + dy, zoom);
    }

    /// Zooms by `dz` levels keeping the pixel at `anchor` (relative to the view center) fixed.
    ///
    /// Returns `false` without touching the position when the clamped delta is zero.
    pub fn zoom_by(&mut self, dz: i32, anchor: Point) -> bool {
        let Position { x, y, zoom } = self.position;
        let dz = dz.clamp(-(zoom as i32), self.max_zoom as i32 - zoom as i32);
        if dz == 0 {
            return false;
        }
        let f = 2_f64.powi(dz);
        let new_x = (f * x as f64 + (f - 1.0) * anchor.x).floor();
        let new_y = (f * y as f64 + (f - 1.0) * anchor.y).floor();
        self.set_position(new_x, new_y, (zoom as i32 + dz) as u8);
        true
    }

    pub fn resize(&mut self, size: Point) {
        self.size = Point::new(size.x.max(0.0), size.y.max(0.0));
    }

    pub fn can_zoom_in(&self) -> bool {
        self.position.zoom < self.max_zoom
    }

    pub fn can_zoom_out(&self) -> bool {
        self.position.zoom > 0
    }

    /// Half of the view size, the offset from the top left corner to the view center.
    pub fn half_size(&self) -> Point {
        self.size.multiply(0.5)
    }

    /// Picks the copy of `target_x` (shifted by a whole space width) nearest to the current x,
    /// so that a move across the antimeridian takes the short way around.
    pub fn shortest_wrapped_x(&self, target_x: i64) -> i64 {
        let x = self.position.x;
        let space = space_size(self.position.zoom);
        if x < target_x {
            let wrapped = target_x - space;
            if x - wrapped < target_x - x {
                return wrapped;
            }
        } else if x > target_x {
            let wrapped = target_x + space;
            if wrapped - x < x - target_x {
                return wrapped;
            }
        }
        target_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_at(x: i64, y: i64, zoom: u8) -> Viewport {
        Viewport::new(Position::new(x, y, zoom), Point::new(800.0, 600.0))
    }

    #[test]
    fn test_x_wraps_around() {
        let mut viewport = viewport_at(0, 0, 0);
        viewport.set_position(-1.0, 10.0, 0);
        assert_eq!(viewport.position(), Position::new(255, 10, 0));
        viewport.set_position(256.0 + 20.0, 10.0, 0);
        assert_eq!(viewport.position().x, 20);
    }

    #[test]
    fn test_y_saturates() {
        let mut viewport = viewport_at(0, 0, 1);
        viewport.set_position(0.0, -40.0, 1);
        assert_eq!(viewport.position().y, 0);
        viewport.set_position(0.0, 10_000.0, 1);
        assert_eq!(viewport.position().y, 511);
        viewport.set_position(0.0, 99.6, 1);
        assert_eq!(viewport.position().y, 100);
    }

    #[test]
    fn test_zoom_by_keeps_center_anchor() {
        let mut viewport = viewport_at(100, 60, 1);
        assert!(viewport.zoom_by(1, Point::new(0.0, 0.0)));
        assert_eq!(viewport.position(), Position::new(200, 120, 2));
        assert!(viewport.zoom_by(-2, Point::new(0.0, 0.0)));
        assert_eq!(viewport.position(), Position::new(50, 30, 0));
    }

    #[test]
    fn test_zoom_by_keeps_point_under_anchor() {
        let mut viewport = viewport_at(1000, 1000, 4);
        let anchor = Point::new(100.0, -50.0);
        let before = crate::core::geo::calculate_coords(1100.0, 950.0, 4);
        viewport.zoom_by(1, anchor);
        let p = viewport.position();
        let after = crate::core::geo::calculate_coords(p.x as f64 + anchor.x, p.y as f64 + anchor.y, 5);
        assert!((before.lat - after.lat).abs() < 1e-9);
        assert!((before.lon - after.lon).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_by_is_clamped() {
        let mut viewport = viewport_at(10, 10, 18);
        assert!(viewport.zoom_by(5, Point::default()));
        assert_eq!(viewport.zoom(), MAX_ZOOM);
        assert!(!viewport.zoom_by(1, Point::default()));
        assert!(viewport.zoom_by(-100, Point::default()));
        assert_eq!(viewport.zoom(), 0);
        assert!(!viewport.zoom_by(-1, Point::default()));
    }

    #[test]
    fn test_zoom_buttons_state() {
        let viewport = viewport_at(0, 0, 0);
        assert!(!viewport.can_zoom_out());
        assert!(viewport.can_zoom_in());
        let viewport = viewport_at(0, 0, MAX_ZOOM);
        assert!(viewport.can_zoom_out());
        assert!(!viewport.can_zoom_in());
    }

    #[test]
    fn test_shortest_wrapped_x() {
        // space is 256 wide at zoom 0
        let viewport = viewport_at(250, 100, 0);
        assert_eq!(viewport.shortest_wrapped_x(10), 266);
        assert_eq!(viewport.shortest_wrapped_x(200), 200);
        let viewport = viewport_at(5, 100, 0);
        assert_eq!(viewport.shortest_wrapped_x(240), -16);
    }

    #[test]
    fn test_non_finite_input_keeps_position() {
        let mut viewport = viewport_at(42, 43, 3);
        viewport.set_position(f64::NAN, f64::INFINITY, 3);
        assert_eq!(viewport.position(), Position::new(42, 43, 3));
    }
}
