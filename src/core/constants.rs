//! Core constants of the viewport engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Tiles are `2^TILE_SIZE_POW` pixels square.
pub const TILE_SIZE_POW: u32 = 8;

/// Default square tile size in pixels.
pub const TILE_SIZE: i64 = 1 << TILE_SIZE_POW;

/// Highest zoom level served by the default tile server.
pub const MAX_ZOOM: u8 = 19;

/// Latitude at which the Mercator y coordinate reaches the edge of the pixel space.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Initial view: Saint Petersburg, Palace Square.
pub const INITIAL_ZOOM: u8 = 17;
pub const INITIAL_LAT: f64 = 59.93903;
pub const INITIAL_LON: f64 = 30.31582;

/// Deceleration of the decay curve [px/ms²].
pub const CURVE_PARAMETER: f64 = 0.002;

/// Flings that would travel less than this are dropped [px].
pub const DRAG_STEP_THRESHOLD: f64 = 32.0;

/// Programmatic moves longer than this are shortened and cross-faded [px].
pub const MAX_MOVE_DISTANCE_WITHOUT_CROSS_FADE: f64 = 2048.0;

/// Visible part of a cross-faded move [px].
pub const CROSS_FADE_MOVE_DISTANCE: f64 = 1024.0;

/// Exponential decay rate of the drag velocity estimate [1/ms].
pub const DRAG_DECAY_RATE: f64 = 0.003;

/// Arrow key pan step before the shift multiplier [px].
pub const PAN_STEP_BASE: f64 = 64.0;

/// Multiplier applied to pan and zoom steps while shift is held.
pub const SHIFT_MULTIPLIER: i32 = 3;

/// Linear phase length added by each repeated arrow keydown [ms].
pub const KEY_REPEAT_LINEAR_DURATION: f64 = 1000.0;

/// Pinches with fingers closer than this do not zoom [px].
pub const PINCH_MIN_DISTANCE: f64 = 16.0;

/// Offset of grid labels from their gridline [px].
pub const GRID_TEXT_OFFSET: f64 = 4.0;

/// Default tile server.
pub const OSM_TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
