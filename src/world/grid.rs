//! Fine-grained occupancy grid marking solid cells.

use crate::core::types::{UVec2, Vec2};
use crate::math::Rect;

/// One boolean per fine cell, `true` where something solid stands.
///
/// Sized once for the world and never resized. Writes outside the grid are
/// caller bugs and panic; reads outside the grid report free.
pub struct OccupancyGrid {
    cell_size: u32,
    width: u32,
    height: u32,
    /// Column-major: `cells[x * height + y]`
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an all-free grid of `dims` cells.
    pub fn new(dims: UVec2, cell_size: u32) -> Self {
        Self {
            cell_size,
            width: dims.x,
            height: dims.y,
            cells: vec![false; (dims.x * dims.y) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Set every cell covered by `rect` to `value`.
    ///
    /// Covered cells are `floor(x / cell) <= cx < floor((x + w) / cell)` and
    /// likewise in y, so a box exactly one cell wide marks one column.
    pub fn mark(&mut self, rect: &Rect, value: bool) {
        let size = self.cell_size as f32;
        let min = (rect.position / size).floor();
        let max = (rect.max() / size).floor();

        if min.x < 0.0 || min.y < 0.0 || max.x > self.width as f32 || max.y > self.height as f32 {
            panic!(
                "rect {:?} covers cells {}..{} outside the {}x{} occupancy grid",
                rect, min, max, self.width, self.height
            );
        }

        for cx in min.x as u32..max.x as u32 {
            for cy in min.y as u32..max.y as u32 {
                let index = self.index(cx, cy);
                self.cells[index] = value;
            }
        }
    }

    /// Occupancy of the cell containing `(x, y)`.
    pub fn query(&self, x: f32, y: f32) -> bool {
        let cell = (Vec2::new(x, y) / self.cell_size as f32).floor();
        if !cell.is_finite() || cell.x < 0.0 || cell.y < 0.0 {
            return false;
        }
        self.is_cell_occupied(cell.x as u32, cell.y as u32)
    }

    /// Occupancy of a cell by coordinate; `false` outside the grid.
    pub fn is_cell_occupied(&self, cx: u32, cy: u32) -> bool {
        cx < self.width && cy < self.height && self.cells[self.index(cx, cy)]
    }

    /// Whether every cell `mark` would touch for `rect` is free.
    pub fn is_region_free(&self, rect: &Rect) -> bool {
        let size = self.cell_size as f32;
        let min = (rect.position / size).floor().max(Vec2::ZERO);
        let max = (rect.max() / size).floor();

        (min.x as u32..max.x.max(0.0) as u32)
            .all(|cx| (min.y as u32..max.y.max(0.0) as u32).all(|cy| !self.is_cell_occupied(cx, cy)))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, cx: u32, cy: u32) -> usize {
        (cx * self.height + cy) as usize
    }
}
