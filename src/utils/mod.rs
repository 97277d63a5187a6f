pub mod color;
pub mod config;
pub mod payload;
pub mod render;
