//! Configuration of a map pane
//!
//! Every field has a default matching the OpenStreetMap viewer, so a configuration file only
//! needs to list what it changes:
//!
//! ```json
//! { "initial_view": { "zoom": 3, "lat": 0.0, "lon": 0.0 }, "pan_step": 96.0 }
//! ```

use crate::{
    core::{
        constants::{
            INITIAL_LAT, INITIAL_LON, INITIAL_ZOOM, KEY_REPEAT_LINEAR_DURATION, MAX_ZOOM,
            OSM_TILE_URL_TEMPLATE, PAN_STEP_BASE,
        },
        geo::Coordinates,
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Tile URL with `{z}`, `{x}` and `{y}` placeholders
    pub tile_url_template: String,
    pub max_zoom: u8,
    pub initial_view: Coordinates,
    /// Arrow key pan distance without shift [px]
    pub pan_step: f64,
    /// Linear phase added by every repeated arrow keydown [ms]
    pub key_repeat_duration_ms: f64,
    pub attribution: AttributionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    pub prefix: String,
    pub text: String,
    pub link: String,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            prefix: "© ".to_string(),
            text: "OpenStreetMap contributors".to_string(),
            link: "https://www.openstreetmap.org/copyright".to_string(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tile_url_template: OSM_TILE_URL_TEMPLATE.to_string(),
            max_zoom: MAX_ZOOM,
            initial_view: Coordinates::new(INITIAL_ZOOM, INITIAL_LAT, INITIAL_LON),
            pan_step: PAN_STEP_BASE,
            key_repeat_duration_ms: KEY_REPEAT_LINEAR_DURATION,
            attribution: AttributionConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_zoom > MAX_ZOOM {
            return Err(MapError::Config(format!(
                "max_zoom {} exceeds {}",
                self.max_zoom, MAX_ZOOM
            )));
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url_template.contains(placeholder) {
                return Err(MapError::Config(format!(
                    "tile_url_template is missing {}",
                    placeholder
                )));
            }
        }
        if !(self.pan_step.is_finite() && self.pan_step > 0.0) {
            return Err(MapError::Config(format!("invalid pan_step {}", self.pan_step)));
        }
        if !(self.key_repeat_duration_ms.is_finite() && self.key_repeat_duration_ms >= 0.0) {
            return Err(MapError::Config(format!(
                "invalid key_repeat_duration_ms {}",
                self.key_repeat_duration_ms
            )));
        }
        let view = &self.initial_view;
        if !(view.lat.is_finite() && view.lon.is_finite()) {
            return Err(MapError::InvalidCoordinates(format!(
                "initial view {}/{}",
                view.lat, view.lon
            )));
        }
        Ok(())
    }
}
