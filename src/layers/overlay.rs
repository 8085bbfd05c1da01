//! Fixed overlays drawn above the positional layers. They do not depend on the position
//! except for the zoom buttons, which are disabled at the zoom bounds.

use crate::{
    core::{config::AttributionConfig, escape::escape_xml},
    layers::base::{LayerKey, LayerOperations},
};

/// Marker at the viewport center
#[derive(Debug, Clone)]
pub struct CrosshairLayer {
    visible: bool,
}

impl CrosshairLayer {
    pub const MARKUP: &'static str = r##"<svg><use href="#map-crosshair" /></svg>"##;

    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn markup(&self) -> &'static str {
        if self.visible {
            Self::MARKUP
        } else {
            ""
        }
    }
}

impl Default for CrosshairLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerOperations for CrosshairLayer {
    crate::impl_layer_visibility!(visible);

    fn key(&self) -> LayerKey {
        LayerKey::Crosshair
    }
}

/// Zoom in / zoom out buttons
#[derive(Debug, Clone)]
pub struct ZoomControls {
    visible: bool,
    zoom_in_enabled: bool,
    zoom_out_enabled: bool,
}

impl ZoomControls {
    pub fn new() -> Self {
        Self {
            visible: true,
            zoom_in_enabled: true,
            zoom_out_enabled: true,
        }
    }

    pub fn update_for_zoom(&mut self, zoom: u8, max_zoom: u8) {
        self.zoom_out_enabled = zoom > 0;
        self.zoom_in_enabled = zoom < max_zoom;
    }

    pub fn zoom_in_enabled(&self) -> bool {
        self.zoom_in_enabled
    }

    pub fn zoom_out_enabled(&self) -> bool {
        self.zoom_out_enabled
    }
}

impl Default for ZoomControls {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerOperations for ZoomControls {
    crate::impl_layer_visibility!(visible);

    fn key(&self) -> LayerKey {
        LayerKey::Zoom
    }
}

/// Tile data attribution line
#[derive(Debug, Clone)]
pub struct AttributionLayer {
    visible: bool,
    config: AttributionConfig,
}

impl AttributionLayer {
    pub fn new(config: AttributionConfig) -> Self {
        Self {
            visible: true,
            config,
        }
    }

    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    pub fn markup(&self) -> String {
        if !self.visible {
            return String::new();
        }
        escaped_format!(
            escape_xml,
            r#"{}<a href="{}">{}</a>"#,
            self.config.prefix,
            self.config.link,
            self.config.text
        )
    }
}

impl LayerOperations for AttributionLayer {
    crate::impl_layer_visibility!(visible);

    fn key(&self) -> LayerKey {
        LayerKey::Attribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{Point, Position};

    #[test]
    fn test_crosshair_markup() {
        let mut crosshair = CrosshairLayer::new();
        assert_eq!(crosshair.markup(), r##"<svg><use href="#map-crosshair" /></svg>"##);
        crosshair.hide();
        assert_eq!(crosshair.markup(), "");
        crosshair.show(&Position::new(0, 0, 0), Point::default());
        assert!(crosshair.is_visible());
        assert_eq!(crosshair.name(), "Crosshair");
    }

    #[test]
    fn test_zoom_buttons_follow_bounds() {
        let mut controls = ZoomControls::new();
        controls.update_for_zoom(0, 19);
        assert!(!controls.zoom_out_enabled());
        assert!(controls.zoom_in_enabled());
        controls.update_for_zoom(19, 19);
        assert!(controls.zoom_out_enabled());
        assert!(!controls.zoom_in_enabled());
        controls.update_for_zoom(10, 19);
        assert!(controls.zoom_out_enabled() && controls.zoom_in_enabled());
    }

    #[test]
    fn test_attribution_markup_is_escaped() {
        let attribution = AttributionLayer::new(AttributionConfig::default());
        assert_eq!(
            attribution.markup(),
            r#"© <a href="https://www.openstreetmap.org/copyright">OpenStreetMap contributors</a>"#
        );
        let attribution = AttributionLayer::new(AttributionConfig {
            prefix: String::new(),
            text: "Tiles & <data>".to_string(),
            link: "https://example.org/?a=\"1\"".to_string(),
        });
        assert_eq!(
            attribution.markup(),
            r#"<a href="https://example.org/?a=&quot;1&quot;">Tiles &amp; &lt;data></a>"#
        );
    }
}
