use crate::core::{constants::OSM_TILE_URL_TEMPLATE, escape::encode_uri_component, geo::TileCoord};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// The default OpenStreetMap tile server.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenStreetMapSource;

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, coord: TileCoord) -> String {
        crate::escaped_format!(
            encode_uri_component,
            "https://tile.openstreetmap.org/{}/{}/{}.png",
            coord.z,
            coord.x,
            coord.y
        )
    }
}

/// Tile server described by a URL template with `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSource {
    template: String,
}

impl TemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::new(OSM_TILE_URL_TEMPLATE)
    }
}

impl TileSource for TemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{z}", &encode_uri_component(&coord.z.to_string()))
            .replace("{x}", &encode_uri_component(&coord.x.to_string()))
            .replace("{y}", &encode_uri_component(&coord.y.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osm_url() {
        let url = OpenStreetMapSource::new().url(TileCoord::new(74_829, 37_400, 17));
        assert_eq!(url, "https://tile.openstreetmap.org/17/74829/37400.png");
    }

    #[test]
    fn test_template_url() {
        let source = TemplateSource::new("https://tiles.example.org/{z}/{x}/{y}@2x.png");
        assert_eq!(
            source.url(TileCoord::new(1, 2, 3)),
            "https://tiles.example.org/3/1/2@2x.png"
        );
        let default = TemplateSource::default();
        assert_eq!(
            default.url(TileCoord::new(0, 0, 0)),
            OpenStreetMapSource.url(TileCoord::new(0, 0, 0))
        );
    }
}
