pub mod bounds;
pub mod config;
pub mod geo;
pub mod viewport;
