//! Web-Mercator projection between geographic coordinates and the integer pixel space.
//!
//! At zoom `z` the pixel space is `2^(z + 8)` pixels along each axis. The functions here are
//! pure; the mutable camera lives in [`crate::core::viewport`].

use crate::core::constants::{MAX_LATITUDE, TILE_SIZE_POW};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Geographic position of the view: zoom level plus latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub zoom: u8,
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(zoom: u8, lat: f64, lon: f64) -> Self {
        Self { zoom, lat, lon }
    }
}

/// Camera position in the pixel space of its zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub zoom: u8,
}

impl Position {
    pub fn new(x: i64, y: i64, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Same zoom, shifted by a pixel offset. The result is not normalized.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.zoom)
    }
}

/// Represents a point in screen or pixel-space coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn squared_distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Checks if the tile exists at its zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 1_u64 << self.z;
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }
}

/// Width (and height) of the pixel space at `zoom`.
pub fn space_size(zoom: u8) -> i64 {
    1_i64 << (zoom as u32 + TILE_SIZE_POW)
}

/// Bitmask used to wrap x into the pixel space at `zoom`.
pub fn space_mask(zoom: u8) -> i64 {
    space_size(zoom) - 1
}

/// Number of tiles along each axis at `zoom`.
pub fn tile_range(zoom: u8) -> i64 {
    1_i64 << zoom
}

pub fn calculate_x(zoom: u8, lon: f64) -> i64 {
    let s = space_size(zoom) as f64;
    (s * (lon + 180.0) / 360.0).floor() as i64
}

/// Latitude is clamped to the Mercator limit first, so the poles map to the
/// first and last pixel rows.
pub fn calculate_y(zoom: u8, lat: f64) -> i64 {
    let valid_lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let s = space_size(zoom) as f64;
    let lat_rad = valid_lat * PI / 180.0;
    let y = (s * (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0).floor() as i64;
    y.clamp(0, space_mask(zoom))
}

pub fn calculate_position(zoom: u8, lat: f64, lon: f64) -> Position {
    Position::new(calculate_x(zoom, lon), calculate_y(zoom, lat), zoom)
}

/// Inverse projection. Accepts positions outside the pixel space; longitudes
/// are then outside `[-180, 180)` as well.
pub fn calculate_coords(x: f64, y: f64, zoom: u8) -> Coordinates {
    let s = space_size(zoom) as f64;
    let n = PI - 2.0 * PI * y / s;
    Coordinates::new(zoom, n.sinh().atan().to_degrees(), x / s * 360.0 - 180.0)
}

pub fn position_coords(position: &Position) -> Coordinates {
    calculate_coords(position.x as f64, position.y as f64, position.zoom)
}

/// Picks the gridline step for a latitude or longitude span, aiming at about three lines.
///
/// Returns `(scale, step)` where `scale` is the decimal order of magnitude used to format
/// labels. Spans above 40° snap to 30/60/90/180/360 degree steps.
pub fn grid_scale_and_step(lat_or_lon_span: f64) -> (i32, f64) {
    let test_span = lat_or_lon_span / 2.0;
    if test_span > 20.0 {
        let mut scale = 20.0;
        for try_scale in [30.0, 60.0, 90.0, 180.0, 360.0] {
            if try_scale > test_span {
                break;
            }
            scale = try_scale;
        }
        (1, scale)
    } else {
        let log_span = test_span.log10();
        let scale = log_span.floor();
        let remainder = log_span - scale;
        let digit = if remainder > 5_f64.log10() {
            5.0
        } else if remainder > 2_f64.log10() {
            2.0
        } else {
            1.0
        };
        (scale as i32, digit * 10_f64.powf(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_and_prime_meridian_map_to_space_center() {
        let position = calculate_position(0, 0.0, 0.0);
        assert_eq!(position, Position::new(128, 128, 0));
    }

    #[test]
    fn test_latitude_clamping() {
        assert_eq!(calculate_y(0, 86.0), calculate_y(0, 85.0511287798));
        assert_eq!(calculate_y(0, 86.0), 0);
        assert_eq!(calculate_y(0, -86.0), 255);
    }

    #[test]
    fn test_coords_of_space_corners() {
        let top_left = calculate_coords(0.0, 0.0, 3);
        assert!((top_left.lat - MAX_LATITUDE).abs() < 1e-6);
        assert!((top_left.lon + 180.0).abs() < 1e-9);
        let center = calculate_coords(1024.0, 1024.0, 3);
        assert!(center.lat.abs() < 1e-9);
        assert!(center.lon.abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_at_initial_view() {
        let position = calculate_position(17, 59.93903, 30.31582);
        let coords = position_coords(&position);
        assert_eq!(coords.zoom, 17);
        // one pixel at zoom 17 is ~2.7e-6 degrees of longitude
        assert!((coords.lat - 59.93903).abs() < 1e-5);
        assert!((coords.lon - 30.31582).abs() < 1e-5);
    }

    #[test]
    fn test_grid_step_snaps_wide_spans() {
        assert_eq!(grid_scale_and_step(170.0), (1, 60.0));
        assert_eq!(grid_scale_and_step(360.0), (1, 180.0));
        assert_eq!(grid_scale_and_step(50.0), (1, 20.0));
    }

    #[test]
    fn test_grid_step_picks_one_two_five() {
        assert_eq!(grid_scale_and_step(2.0), (0, 1.0));
        let (scale, step) = grid_scale_and_step(6.0);
        assert_eq!(scale, 0);
        assert!((step - 2.0).abs() < 1e-12);
        let (scale, step) = grid_scale_and_step(0.3);
        assert_eq!(scale, -1);
        assert!((step - 0.1).abs() < 1e-12);
        let (scale, step) = grid_scale_and_step(14.0);
        assert_eq!(scale, 0);
        assert!((step - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_tile_coord_validity() {
        assert!(TileCoord::new(0, 0, 0).is_valid());
        assert!(!TileCoord::new(1, 0, 0).is_valid());
        assert!(TileCoord::new(3, 3, 2).is_valid());
    }
}
