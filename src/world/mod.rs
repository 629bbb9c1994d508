//! Map spatial structures: occupancy grid, chunk buckets and the index owning both.
//!
//! Placement and removal go through [`SpatialIndex`], which keeps the
//! occupancy grid and the chunk buckets consistent with each other.

pub mod config;
pub mod entity;
pub mod query;
pub mod grid;
pub mod chunks;
pub mod index;

pub use config::{OverlayConfig, WorldConfig};
pub use entity::{EntityId, EntityRef, StaticEntity, StaticObject};
pub use query::{CellCoord, ChunkCoord, GridLayout};
pub use grid::OccupancyGrid;
pub use chunks::ChunkIndex;
pub use index::SpatialIndex;
