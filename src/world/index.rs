//! SpatialIndex - owns the occupancy grid and chunk buckets of one map.

use std::collections::HashMap;

use crate::core::types::Vec2;
use crate::core::{Error, Result};
use crate::math::Rect;
use crate::world::chunks::ChunkIndex;
use crate::world::config::WorldConfig;
use crate::world::entity::{EntityId, EntityRef};
use crate::world::grid::OccupancyGrid;
use crate::world::query::GridLayout;

struct Placement {
    entity: EntityRef,
    solid: bool,
}

/// Spatial state of the map, updated as entities are placed and removed.
///
/// Mutation needs `&mut self`; queries only `&self`. There is no internal
/// locking, so share it behind whatever synchronization the caller uses.
pub struct SpatialIndex {
    layout: GridLayout,
    grid: OccupancyGrid,
    chunks: ChunkIndex,
    placed: HashMap<EntityId, Placement>,
}

impl SpatialIndex {
    /// Size the grid and chunk buckets for a window of `window` pixels.
    pub fn new(config: &WorldConfig, window: Vec2) -> Result<Self> {
        let layout = GridLayout::from_config(config, window)?;
        Ok(Self::with_layout(layout))
    }

    /// Create from an explicit layout.
    pub fn with_layout(layout: GridLayout) -> Self {
        let dims = layout.grid_dims();
        log::info!(
            "Spatial index: {}x{} cells of {}px, {}x{} chunks of {}px",
            dims.x, dims.y, layout.cell_size(),
            layout.chunk_dims().x, layout.chunk_dims().y, layout.chunk_pixels()
        );

        Self {
            layout,
            grid: OccupancyGrid::new(dims, layout.cell_size()),
            chunks: ChunkIndex::new(layout),
            placed: HashMap::new(),
        }
    }

    /// Register a placed entity. Solid entities also block their cells.
    ///
    /// Panics if the entity's box is outside the world; check with
    /// [`can_place`](Self::can_place) first when the position is untrusted.
    pub fn place(&mut self, entity: EntityRef, solid: bool) -> Result<()> {
        let id = entity.id();
        if self.placed.contains_key(&id) {
            return Err(Error::AlreadyPlaced(id));
        }

        let bounds = entity.bounds();
        self.chunks.register(entity.clone());
        if solid {
            self.grid.mark(&bounds, true);
        }

        self.placed.insert(id, Placement { entity, solid });
        Ok(())
    }

    /// Unregister an entity, freeing its cells. Unknown ids return `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityRef> {
        let Some(placement) = self.placed.remove(&id) else {
            log::debug!("Remove of {} ignored: not placed", id);
            return None;
        };

        let bounds = placement.entity.bounds();
        self.chunks.deregister(&*placement.entity);

        if placement.solid {
            self.grid.mark(&bounds, false);

            // Cells shared with other solids must stay blocked
            for other in self.placed.values().filter(|p| p.solid) {
                let other_bounds = other.entity.bounds();
                if other_bounds.intersects(&bounds) {
                    self.grid.mark(&other_bounds, true);
                }
            }
        }

        Some(placement.entity)
    }

    /// Whether `rect` lies inside the world and covers only free cells.
    pub fn can_place(&self, rect: &Rect) -> bool {
        self.layout.contains_rect(rect) && self.grid.is_region_free(rect)
    }

    /// Occupancy of the cell containing `pos`.
    pub fn is_blocked(&self, pos: Vec2) -> bool {
        self.grid.query(pos.x, pos.y)
    }

    /// Entity whose box contains `point`, looked up through its chunk.
    pub fn entity_at(&self, point: Vec2) -> Option<&EntityRef> {
        self.chunks.entity_at(point)
    }

    /// Placed entity by id.
    pub fn get(&self, id: EntityId) -> Option<&EntityRef> {
        self.placed.get(&id).map(|p| &p.entity)
    }

    /// Iterate over all placed entities.
    pub fn entities(&self) -> impl Iterator<Item = &EntityRef> {
        self.placed.values().map(|p| &p.entity)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn chunks(&self) -> &ChunkIndex {
        &self.chunks
    }
}
