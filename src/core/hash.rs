//! The `#map=Z/LAT/LON` URL fragment used by hosts to share and restore a view.

use crate::core::{constants::MAX_ZOOM, geo::Coordinates};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HashError {
    #[error("fragment has no map parameter")]
    MissingMapParameter,

    #[error("expected zoom/lat/lon, got {0:?}")]
    WrongComponentCount(String),

    #[error("invalid zoom {0:?}")]
    InvalidZoom(String),

    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

/// Number of decimals that keeps a lat/lon pair precise to about a pixel at `zoom`.
pub fn coordinate_precision(zoom: u8) -> usize {
    let precision = (zoom as f64).log2().ceil();
    if precision.is_finite() && precision > 0.0 {
        precision as usize
    } else {
        0
    }
}

pub fn format_map_hash(coords: &Coordinates) -> String {
    let precision = coordinate_precision(coords.zoom);
    format!(
        "#map={}/{:.*}/{:.*}",
        coords.zoom, precision, coords.lat, precision, coords.lon
    )
}

/// Parses a fragment such as `#map=17/59.93903/30.31582`. Other `&`-separated
/// parameters are ignored, the leading `#` is optional.
pub fn parse_map_hash(fragment: &str) -> Result<Coordinates, HashError> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let value = fragment
        .split('&')
        .find_map(|param| param.strip_prefix("map="))
        .ok_or(HashError::MissingMapParameter)?;

    let parts: Vec<&str> = value.split('/').collect();
    let [zoom, lat, lon] = parts.as_slice() else {
        return Err(HashError::WrongComponentCount(value.to_string()));
    };

    let zoom = zoom
        .parse::<u8>()
        .ok()
        .filter(|z| *z <= MAX_ZOOM)
        .ok_or_else(|| HashError::InvalidZoom(zoom.to_string()))?;
    let parse_coordinate = |text: &str| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| HashError::InvalidCoordinate(text.to_string()))
    };
    let lat = parse_coordinate(lat)?;
    let lon = parse_coordinate(lon)?;

    Ok(Coordinates::new(zoom, lat, lon))
}
