//! Overlay primitives and the rendering collaborator they are drawn through.

use crate::core::types::Vec2;

/// Handle of a drawable registered with the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u64);

/// Shader a drawable is rendered with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderTag {
    /// Screen-space, unaffected by the camera transform
    Hud,
}

/// Geometry of a drawable
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Filled rectangle
    Rectangle,
    /// Rectangle outline with a transparent fill
    Outline { border_width: u32, border_color: [u8; 4] },
}

/// Everything the renderer needs to register a drawable once
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveDesc {
    pub shape: Shape,
    pub color: [u8; 4],
    pub z_index: i32,
    pub shader: ShaderTag,
    pub position: Vec2,
    pub size: Vec2,
    pub hidden: bool,
}

/// Rendering pipeline as seen by the overlay.
///
/// Drawables are registered once at startup; afterwards only their position
/// and visibility change.
pub trait RenderSink {
    /// Register a drawable and return its handle
    fn add_drawable(&mut self, desc: &PrimitiveDesc) -> DrawableId;

    /// Move a drawable
    fn set_position(&mut self, id: DrawableId, position: Vec2);

    /// Show or hide a drawable
    fn set_hidden(&mut self, id: DrawableId, hidden: bool);
}

/// Overlay-side copy of a registered drawable
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub id: DrawableId,
    pub position: Vec2,
    pub size: Vec2,
    pub hidden: bool,
}

impl Primitive {
    /// Register `desc` with the renderer and keep a local copy
    pub fn register(desc: PrimitiveDesc, sink: &mut dyn RenderSink) -> Self {
        let id = sink.add_drawable(&desc);
        Self {
            id,
            position: desc.position,
            size: desc.size,
            hidden: desc.hidden,
        }
    }
}

/// Shift every primitive by `delta`
pub fn translate_all(primitives: &mut [Primitive], delta: Vec2) {
    if delta == Vec2::ZERO {
        return;
    }
    for primitive in primitives {
        primitive.position += delta;
    }
}
