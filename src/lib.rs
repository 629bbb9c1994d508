//! Chunkgrid - spatial indexing and grid overlay for 2D strategy maps

pub mod core;
pub mod math;
pub mod world;
pub mod overlay;
pub mod debug;
