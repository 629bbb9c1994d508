//! Grid overlay drawn on top of the map

pub mod primitive;
pub mod renderer;

pub use primitive::{DrawableId, Primitive, PrimitiveDesc, RenderSink, ShaderTag, Shape};
pub use renderer::{GridOffsets, OverlayRenderer, OverlayState};
