//! Coordinate mapping between world positions, fine cells and chunks.
//!
//! Every lookup and every mutation goes through the same [`GridLayout`], so
//! a position always resolves to the same cell and bucket.

use crate::core::types::{UVec2, Vec2};
use crate::core::{Error, Result};
use crate::math::Rect;
use crate::world::config::WorldConfig;

/// Fine cell coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Chunk coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ChunkCoord {
    pub x: u32,
    pub y: u32,
}

impl ChunkCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Fixed sizing of the fine grid and the chunk grid for one world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    cell_size: u32,
    chunk_size: u32,
    /// World size in whole world units
    world_size: UVec2,
    /// Fine cells per axis
    grid_dims: UVec2,
    /// Chunks per axis; `x` is the row count used to flatten bucket indices
    chunk_dims: UVec2,
}

impl GridLayout {
    /// Layout for a world of `world_size` units.
    pub fn new(cell_size: u32, chunk_size: u32, world_size: Vec2) -> Result<Self> {
        if cell_size == 0 || chunk_size == 0 {
            return Err(Error::Config("cell and chunk size must be positive".into()));
        }
        if !(world_size.x >= 0.0 && world_size.y >= 0.0) {
            return Err(Error::Config(format!("invalid world size {world_size}")));
        }

        let world_size = UVec2::new(world_size.x as u32, world_size.y as u32);
        let chunk_pixels = cell_size * chunk_size;
        if world_size.x < chunk_pixels || world_size.y < chunk_pixels {
            return Err(Error::Config(format!(
                "world of {}x{} is smaller than one {chunk_pixels}px chunk",
                world_size.x, world_size.y
            )));
        }

        let grid_dims = world_size / cell_size;
        // Rounded up so the trailing partial chunk still owns its cells
        let chunk_dims = UVec2::new(
            world_size.x.div_ceil(chunk_pixels),
            world_size.y.div_ceil(chunk_pixels),
        );

        Ok(Self {
            cell_size,
            chunk_size,
            world_size,
            grid_dims,
            chunk_dims,
        })
    }

    /// Layout for a window, scaled by the configured world scale factor.
    pub fn from_config(config: &WorldConfig, window: Vec2) -> Result<Self> {
        config.validate()?;
        Self::new(config.cell_size, config.chunk_size, window * config.scale_factor)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Chunk edge length in world units
    pub fn chunk_pixels(&self) -> u32 {
        self.cell_size * self.chunk_size
    }

    /// World size in world units
    pub fn world_size(&self) -> Vec2 {
        self.world_size.as_vec2()
    }

    /// Far edge of the fine grid in world units
    pub fn grid_extent(&self) -> Vec2 {
        (self.grid_dims * self.cell_size).as_vec2()
    }

    /// Fine cells per axis (`GridMaxX`, `GridMaxY`)
    pub fn grid_dims(&self) -> UVec2 {
        self.grid_dims
    }

    /// Chunks per axis
    pub fn chunk_dims(&self) -> UVec2 {
        self.chunk_dims
    }

    /// Chunk columns spanning the world width
    pub fn row_count(&self) -> u32 {
        self.chunk_dims.x
    }

    /// Total number of chunk buckets
    pub fn chunk_count(&self) -> usize {
        (self.chunk_dims.x * self.chunk_dims.y) as usize
    }

    /// Fine cell containing `pos`, if inside the grid
    pub fn cell_of(&self, pos: Vec2) -> Option<CellCoord> {
        let (x, y) = floor_div(pos, self.cell_size as f32)?;
        (x < self.grid_dims.x && y < self.grid_dims.y).then(|| CellCoord::new(x, y))
    }

    /// Chunk containing `pos`, if inside the chunk grid
    pub fn chunk_coord_of(&self, pos: Vec2) -> Option<ChunkCoord> {
        let (x, y) = floor_div(pos, self.chunk_pixels() as f32)?;
        (x < self.chunk_dims.x && y < self.chunk_dims.y).then(|| ChunkCoord::new(x, y))
    }

    /// Flattened bucket index of the chunk containing `pos`
    pub fn chunk_of(&self, pos: Vec2) -> Option<usize> {
        self.chunk_coord_of(pos).map(|c| self.flatten(c))
    }

    /// Flatten a chunk coordinate into its bucket index
    pub fn flatten(&self, chunk: ChunkCoord) -> usize {
        (chunk.y * self.row_count() + chunk.x) as usize
    }

    /// Bucket index for a mutation path.
    ///
    /// Panics when `pos` is outside the chunk grid: callers must only place
    /// entities inside the world.
    pub fn bucket_index(&self, pos: Vec2) -> usize {
        match self.chunk_of(pos) {
            Some(index) => index,
            None => panic!(
                "position {pos} is outside the {}x{} chunk grid",
                self.chunk_dims.x, self.chunk_dims.y
            ),
        }
    }

    /// Bucket index of a box corner for a mutation path.
    ///
    /// Boxes are half-open, so a far corner lying exactly on the grid's far
    /// edge resolves to the chunk of the last cell. Panics like
    /// [`bucket_index`](Self::bucket_index) otherwise.
    pub fn corner_bucket_index(&self, corner: Vec2) -> usize {
        let extent = self.grid_extent();
        let pos = Vec2::new(
            if corner.x == extent.x { extent.x - 1.0 } else { corner.x },
            if corner.y == extent.y { extent.y - 1.0 } else { corner.y },
        );
        self.bucket_index(pos)
    }

    /// Whether `rect` lies within the fine grid; the far edges are inclusive.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        let max = rect.max();
        let extent = self.grid_extent();
        rect.position.x >= 0.0 && rect.position.y >= 0.0 && max.x <= extent.x && max.y <= extent.y
    }
}

/// Floor division of both axes; `None` for negative or non-finite positions.
fn floor_div(pos: Vec2, size: f32) -> Option<(u32, u32)> {
    let scaled = (pos / size).floor();
    if !scaled.is_finite() || scaled.x < 0.0 || scaled.y < 0.0 {
        return None;
    }
    Some((scaled.x as u32, scaled.y as u32))
}
