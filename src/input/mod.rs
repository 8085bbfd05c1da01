pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, InputEvent, KeyCode, KeyModifiers, MapEvent};
pub use gestures::{Drag, PointerSet};
pub use handler::{Action, EventManager, InputHandler};
