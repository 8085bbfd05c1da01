use crate::MapError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use crate::traits::LayerOperations;

/// Keys of the toggleable parts of a map pane, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKey {
    Tiles,
    Grid,
    Crosshair,
    Zoom,
    Attribution,
}

impl LayerKey {
    pub const ALL: [LayerKey; 5] = [
        LayerKey::Tiles,
        LayerKey::Grid,
        LayerKey::Crosshair,
        LayerKey::Zoom,
        LayerKey::Attribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKey::Tiles => "tiles",
            LayerKey::Grid => "grid",
            LayerKey::Crosshair => "crosshair",
            LayerKey::Zoom => "zoom",
            LayerKey::Attribution => "attribution",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerKey::Tiles => "Map tiles",
            LayerKey::Grid => "Coordinate grid",
            LayerKey::Crosshair => "Crosshair",
            LayerKey::Zoom => "Zoom buttons",
            LayerKey::Attribution => "Attribution",
        }
    }
}

impl std::fmt::Display for LayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LayerKey {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| MapError::UnknownLayer(s.to_string()))
    }
}

/// One row of a layer list: key, display name and visibility
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerInfo {
    pub key: LayerKey,
    pub name: &'static str,
    pub visible: bool,
}

impl LayerInfo {
    pub fn of(layer: &dyn LayerOperations) -> Self {
        Self {
            key: layer.key(),
            name: layer.name(),
            visible: layer.is_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_key_display() {
        assert_eq!(LayerKey::Tiles.to_string(), "tiles");
        assert_eq!(LayerKey::Zoom.to_string(), "zoom");
        assert_eq!(LayerKey::Grid.name(), "Coordinate grid");
    }

    #[test]
    fn test_layer_key_parse() {
        for key in LayerKey::ALL {
            assert_eq!(key.as_str().parse::<LayerKey>().unwrap(), key);
        }
        assert!(matches!(
            "roads".parse::<LayerKey>(),
            Err(MapError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_layer_key_serde() {
        assert_eq!(
            serde_json::to_string(&LayerKey::Attribution).unwrap(),
            "\"attribution\""
        );
        let key: LayerKey = serde_json::from_str("\"crosshair\"").unwrap();
        assert_eq!(key, LayerKey::Crosshair);
    }
}
