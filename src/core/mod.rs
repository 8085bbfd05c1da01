pub mod config;
pub mod constants;
pub mod escape;
pub mod geo;
pub mod hash;
pub mod map;
pub mod viewport;
