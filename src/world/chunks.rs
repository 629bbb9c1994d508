//! Chunk buckets of placed entities for fast proximity lookups.

use crate::core::types::Vec2;
use crate::math::Rect;
use crate::world::entity::{EntityId, EntityRef, StaticEntity};
use crate::world::query::GridLayout;

/// One bucket per chunk, each holding the entities that touch it.
///
/// An entity is stored in the bucket of every chunk one of its four
/// bounding-box corners falls into, at most once per bucket. Buckets are
/// unordered; removal swaps with the last element.
pub struct ChunkIndex {
    layout: GridLayout,
    buckets: Vec<Vec<EntityRef>>,
}

impl ChunkIndex {
    /// Create empty buckets for every chunk of the layout.
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            buckets: vec![Vec::new(); layout.chunk_count()],
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Total number of buckets.
    pub fn chunk_count(&self) -> usize {
        self.buckets.len()
    }

    /// Chunk columns spanning the world width.
    pub fn row_count(&self) -> u32 {
        self.layout.row_count()
    }

    /// Bucket containing `pos` together with its index.
    pub fn chunk_of(&self, pos: Vec2) -> Option<(&[EntityRef], usize)> {
        let index = self.layout.chunk_of(pos)?;
        Some((self.buckets[index].as_slice(), index))
    }

    /// Bucket by index; empty for unknown indices.
    pub fn bucket(&self, index: usize) -> &[EntityRef] {
        self.buckets.get(index).map(|b| b.as_slice()).unwrap_or(&[])
    }

    /// Whether bucket `index` holds an entity with `id`.
    pub fn contains(&self, index: usize, id: EntityId) -> bool {
        self.bucket(index).iter().any(|e| e.id() == id)
    }

    /// Distinct buckets of the four corners of `rect`, in corner order.
    ///
    /// Far corners on the world edge count toward the last chunk. Panics if
    /// a corner lies outside the chunk grid.
    pub fn buckets_of(&self, rect: &Rect) -> Vec<usize> {
        let mut indices = Vec::with_capacity(4);
        for corner in rect.corners() {
            let index = self.layout.corner_bucket_index(corner);
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        indices
    }

    /// Add an entity to every distinct bucket its corners fall into.
    ///
    /// The entity must not already be registered; debug builds panic if it
    /// is found in one of its target buckets.
    pub fn register(&mut self, entity: EntityRef) {
        let id = entity.id();
        let indices = self.buckets_of(&entity.bounds());
        log::debug!("Registering {} '{}' in chunks {:?}", id, entity.name(), indices);

        for index in indices {
            debug_assert!(!self.contains(index, id), "{} is already registered in chunk {}", id, index);
            self.buckets[index].push(entity.clone());
        }
    }

    /// Remove an entity from the buckets its corners fall into.
    ///
    /// Buckets that do not hold the entity are left untouched, so calling
    /// this twice is harmless. Returns how many buckets it was removed from.
    pub fn deregister(&mut self, entity: &dyn StaticEntity) -> usize {
        let id = entity.id();
        let mut removed = 0;

        for index in self.buckets_of(&entity.bounds()) {
            let bucket = &mut self.buckets[index];
            match bucket.iter().position(|e| e.id() == id) {
                Some(slot) => {
                    bucket.swap_remove(slot);
                    removed += 1;
                }
                None => log::debug!("{} not present in chunk {}", id, index),
            }
        }

        removed
    }

    /// First entity in the bucket under `point` whose box contains it.
    pub fn entity_at(&self, point: Vec2) -> Option<&EntityRef> {
        let (bucket, _) = self.chunk_of(point)?;
        bucket.iter().find(|e| e.bounds().contains_point(point))
    }

    /// Indices of every bucket holding `id`.
    pub fn buckets_containing(&self, id: EntityId) -> Vec<usize> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| bucket.iter().any(|e| e.id() == id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Total entity references over all buckets.
    pub fn reference_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::config::WorldConfig;
    use crate::world::entity::StaticObject;

    fn index() -> ChunkIndex {
        // 2560x1440 world, 256px chunks, 10 chunks per row
        let layout = GridLayout::from_config(&WorldConfig::default(), Vec2::new(1280.0, 720.0))
            .expect("valid layout");
        ChunkIndex::new(layout)
    }

    fn object(id: u64, x: f32, y: f32, w: f32, h: f32) -> EntityRef {
        StaticObject::new(id, format!("object-{id}"), Rect::from_xywh(x, y, w, h)).into_ref()
    }

    fn bucket_ids(index: &ChunkIndex) -> Vec<Vec<u64>> {
        (0..index.chunk_count())
            .map(|i| {
                let mut ids: Vec<u64> = index.bucket(i).iter().map(|e| e.id().0).collect();
                ids.sort();
                ids
            })
            .collect()
    }

    #[test]
    fn test_register_inside_one_chunk() {
        let mut index = index();
        index.register(object(1, 10.0, 10.0, 20.0, 20.0));

        assert_eq!(index.buckets_containing(EntityId(1)), vec![0]);
        assert_eq!(index.reference_count(), 1);
    }

    #[test]
    fn test_register_across_vertical_boundary() {
        let mut index = index();
        // x spans 250..270, crossing the boundary at 256
        index.register(object(1, 250.0, 10.0, 20.0, 20.0));

        assert_eq!(index.buckets_containing(EntityId(1)), vec![0, 1]);
        assert_eq!(index.bucket(0).len(), 1);
        assert_eq!(index.bucket(1).len(), 1);
    }

    #[test]
    fn test_register_across_horizontal_boundary() {
        let mut index = index();
        index.register(object(1, 10.0, 250.0, 20.0, 20.0));

        assert_eq!(index.buckets_containing(EntityId(1)), vec![0, 10]);
        assert_eq!(index.reference_count(), 2);
    }

    #[test]
    fn test_register_across_both_boundaries() {
        let mut index = index();
        index.register(object(1, 250.0, 250.0, 20.0, 20.0));

        assert_eq!(index.buckets_containing(EntityId(1)), vec![0, 1, 10, 11]);
        assert_eq!(index.reference_count(), 4);
    }

    #[test]
    fn test_buckets_of_dedupes_all_corners() {
        let index = index();
        assert_eq!(index.buckets_of(&Rect::from_xywh(10.0, 10.0, 20.0, 20.0)), vec![0]);
        assert_eq!(index.buckets_of(&Rect::from_xywh(10.0, 250.0, 20.0, 20.0)), vec![0, 10]);
        assert_eq!(index.buckets_of(&Rect::from_xywh(250.0, 250.0, 20.0, 20.0)), vec![0, 1, 10, 11]);
    }

    #[test]
    fn test_deregister_restores_buckets() {
        let mut index = index();
        index.register(object(1, 10.0, 10.0, 20.0, 20.0));
        index.register(object(2, 300.0, 300.0, 30.0, 30.0));
        let before = bucket_ids(&index);

        let spanning = object(3, 250.0, 250.0, 20.0, 20.0);
        index.register(spanning.clone());
        assert!([0, 1, 10, 11].iter().all(|&i| index.contains(i, EntityId(3))));
        assert_eq!(index.deregister(&*spanning), 4);
        assert!(![0, 1, 10, 11].iter().any(|&i| index.contains(i, EntityId(3))));

        assert!(index.buckets_containing(EntityId(3)).is_empty());
        assert_eq!(bucket_ids(&index), before);
    }

    #[test]
    fn test_deregister_twice_is_noop() {
        let mut index = index();
        let entity = object(1, 250.0, 10.0, 20.0, 20.0);
        index.register(object(2, 20.0, 20.0, 10.0, 10.0));
        index.register(entity.clone());

        assert_eq!(index.deregister(&*entity), 2);
        let after_first = bucket_ids(&index);

        assert_eq!(index.deregister(&*entity), 0);
        assert_eq!(bucket_ids(&index), after_first);
    }

    #[test]
    fn test_deregister_swaps_with_last() {
        let mut index = index();
        let first = object(1, 10.0, 10.0, 5.0, 5.0);
        index.register(first.clone());
        index.register(object(2, 20.0, 20.0, 5.0, 5.0));
        index.register(object(3, 30.0, 30.0, 5.0, 5.0));

        index.deregister(&*first);
        let order: Vec<u64> = index.bucket(0).iter().map(|e| e.id().0).collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn test_chunk_of_and_entity_at() {
        let mut index = index();
        index.register(object(7, 300.0, 40.0, 64.0, 64.0));

        let (bucket, chunk) = index.chunk_of(Vec2::new(320.0, 50.0)).expect("inside world");
        assert_eq!(chunk, 1);
        assert_eq!(bucket.len(), 1);

        let hit = index.entity_at(Vec2::new(320.0, 50.0)).expect("entity under point");
        assert_eq!(hit.id(), EntityId(7));
        assert_eq!(hit.name(), "object-7");
        assert!(index.entity_at(Vec2::new(500.0, 50.0)).is_none());

        let (empty, chunk) = index.chunk_of(Vec2::new(600.0, 600.0)).expect("inside world");
        assert!(empty.is_empty());
        assert_eq!(chunk, 22);
    }

    #[test]
    fn test_chunk_of_outside_world() {
        let index = index();
        assert!(index.chunk_of(Vec2::new(-5.0, 0.0)).is_none());
        assert!(index.bucket(9999).is_empty());
    }

    #[test]
    fn test_register_flush_with_far_edges() {
        let mut index = index();
        // Last cell column and last cell row of the 2560x1440 world
        let right = object(1, 2528.0, 0.0, 32.0, 32.0);
        let corner = object(2, 2528.0, 1408.0, 32.0, 32.0);
        index.register(right.clone());
        index.register(corner.clone());

        assert_eq!(index.buckets_containing(EntityId(1)), vec![9]);
        assert_eq!(index.buckets_containing(EntityId(2)), vec![59]);
        assert_eq!(index.entity_at(Vec2::new(2540.0, 1420.0)).map(|e| e.id()), Some(EntityId(2)));

        assert_eq!(index.deregister(&*right), 1);
        assert_eq!(index.deregister(&*corner), 1);
        assert_eq!(index.reference_count(), 0);
    }

    #[test]
    fn test_register_in_partial_bottom_chunk_row() {
        let mut index = index();
        index.register(object(1, 64.0, 1300.0, 32.0, 32.0));
        assert_eq!(index.buckets_containing(EntityId(1)), vec![50]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already registered")]
    fn test_register_twice_panics_in_debug() {
        let mut index = index();
        let entity = object(1, 10.0, 10.0, 20.0, 20.0);
        index.register(entity.clone());
        index.register(entity);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_register_outside_world_panics() {
        let mut index = index();
        index.register(object(1, 2550.0, 0.0, 20.0, 20.0));
    }
}
