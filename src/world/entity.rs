//! Handles to placed map objects.
//!
//! The spatial index only ever sees entities through [`StaticEntity`]; the
//! concrete building/resource types live with whoever owns entity lifecycle.

use std::fmt;
use std::sync::Arc;

use crate::core::types::Vec2;
use crate::math::Rect;

/// Stable identifier of a placed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything placed on the map that the index can bucket.
pub trait StaticEntity: Send + Sync {
    /// Top-left corner in world units.
    fn position(&self) -> Vec2;

    /// Width and height in world units.
    fn size(&self) -> Vec2;

    /// Identifier, unique among placed entities.
    fn id(&self) -> EntityId;

    /// Human readable name.
    fn name(&self) -> &str;

    /// Bounding box.
    fn bounds(&self) -> Rect {
        Rect::new(self.position(), self.size())
    }
}

/// Shared reference held by chunk buckets.
pub type EntityRef = Arc<dyn StaticEntity>;

/// Plain entity with a fixed bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticObject {
    pub id: EntityId,
    pub name: String,
    pub bounds: Rect,
}

impl StaticObject {
    pub fn new(id: u64, name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: EntityId(id),
            name: name.into(),
            bounds,
        }
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> EntityRef {
        Arc::new(self)
    }
}

impl StaticEntity for StaticObject {
    fn position(&self) -> Vec2 {
        self.bounds.position
    }

    fn size(&self) -> Vec2 {
        self.bounds.size
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
