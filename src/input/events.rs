use crate::{
    core::geo::{Coordinates, Point},
    layers::base::LayerKey,
};
use serde::{Deserialize, Serialize};

/// Raw input delivered to a map pane by its host.
///
/// Pointer positions and offsets are in pixels relative to the top-left corner of the
/// map pane. Timestamps are taken from the pane's clock, not from the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Mouse button, pen or finger pressed on the map surface
    PointerDown {
        pointer_id: u64,
        is_primary: bool,
        position: Point,
    },
    PointerMove {
        pointer_id: u64,
        position: Point,
    },
    PointerUp {
        pointer_id: u64,
    },
    /// Pointer lost without a release; handled like [`InputEvent::PointerUp`]
    PointerCancel {
        pointer_id: u64,
    },
    /// Scroll wheel; only the sign of `delta_y` matters
    Wheel { delta_y: f64, offset: Point },
    DoubleClick {
        offset: Point,
        modifiers: KeyModifiers,
    },
    KeyDown {
        key: KeyCode,
        modifiers: KeyModifiers,
        /// Auto-repeat of a held key
        repeat: bool,
    },
    KeyUp { key: KeyCode },
    /// Viewport/window resize
    Resize { size: Point },
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Other(u32),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Notifications emitted by a map pane
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The position settled after a user or programmatic move
    MoveEnd(Coordinates),
    /// A layer was shown or hidden through the layer list
    LayerToggled { key: LayerKey, visible: bool },
}

impl MapEvent {
    /// Name listeners register under
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::MoveEnd(_) => "moveend",
            MapEvent::LayerToggled { .. } => "layertoggle",
        }
    }
}
