//! Camera-synchronized grid overlay.
//!
//! The overlay is a fixed pool of screen-space lines and chunk boxes standing
//! in for an endless tiled grid. Each frame only the camera's phase within a
//! cell (for lines) and within a chunk (for boxes) changes, so the pool is
//! shifted by the change in phase instead of being rebuilt.

use crate::core::camera::ViewState;
use crate::core::input::{Action, ActionInput};
use crate::core::types::Vec2;
use crate::overlay::primitive::{translate_all, Primitive, PrimitiveDesc, RenderSink, ShaderTag, Shape};
use crate::world::config::WorldConfig;

/// Overlay visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    /// Primitives exist but are not drawn or tracked
    #[default]
    Hidden,
    /// Primitives are drawn and follow the camera
    Visible,
}

/// Camera phase within the fine grid and the chunk grid.
///
/// Each value is in `[0, modulus)`: camera coordinates are floored to whole
/// units and reduced with `rem_euclid`, so negative positions wrap the same
/// way positive ones do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridOffsets {
    pub line_x: i32,
    pub line_y: i32,
    pub box_x: i32,
    pub box_y: i32,
}

impl GridOffsets {
    /// Phase of `view`'s camera for the given cell and chunk sizes
    pub fn from_view(view: &ViewState, cell_size: u32, chunk_pixels: u32) -> Self {
        let cell = cell_size as i32;
        let chunk = chunk_pixels as i32;
        // Boxes follow the top-left corner of the view, lines the camera itself
        let corner = view.camera - view.window * 0.5;

        Self {
            line_x: (view.camera.x.floor() as i32).rem_euclid(cell),
            line_y: (view.camera.y.floor() as i32).rem_euclid(cell),
            box_x: (corner.x.floor() as i32).rem_euclid(chunk),
            box_y: (corner.y.floor() as i32).rem_euclid(chunk),
        }
    }
}

/// Grid lines and chunk boxes drawn over the map.
pub struct OverlayRenderer {
    cell_size: u32,
    chunk_pixels: u32,
    state: OverlayState,
    vertical_lines: Vec<Primitive>,
    horizontal_lines: Vec<Primitive>,
    /// Column-major, `box_rows` boxes per column
    chunk_boxes: Vec<Primitive>,
    box_rows: usize,
    previous: GridOffsets,
}

impl OverlayRenderer {
    /// Build the primitive pool for a window and register it, hidden.
    pub fn new(config: &WorldConfig, window: Vec2, sink: &mut dyn RenderSink) -> Self {
        let cell_size = config.cell_size;
        let chunk_pixels = config.chunk_pixels();
        let style = &config.overlay;
        let cell = cell_size as f32;
        let chunk = chunk_pixels as f32;
        let thickness = style.line_thickness as f32;

        let vertical_count = window.x as u32 / cell_size;
        let horizontal_count = window.y as u32 / cell_size;

        let line = |position: Vec2, size: Vec2| PrimitiveDesc {
            shape: Shape::Rectangle,
            color: style.line_color,
            z_index: style.line_z_index,
            shader: ShaderTag::Hud,
            position,
            size,
            hidden: true,
        };

        let vertical_lines: Vec<Primitive> = (0..vertical_count)
            .map(|i| {
                let desc = line(Vec2::new(i as f32 * cell, 0.0), Vec2::new(thickness, window.y));
                Primitive::register(desc, sink)
            })
            .collect();

        let horizontal_lines: Vec<Primitive> = (0..horizontal_count)
            .map(|i| {
                let desc = line(Vec2::new(0.0, i as f32 * cell), Vec2::new(window.x, thickness));
                Primitive::register(desc, sink)
            })
            .collect();

        // One extra box per axis covers the partial chunk revealed while scrolling
        let box_columns = (window.x / chunk).ceil() as usize + 1;
        let box_rows = window.y as usize / chunk_pixels as usize + 1;

        let mut chunk_boxes = Vec::with_capacity(box_columns * box_rows);
        for i in 0..box_columns {
            for j in 0..box_rows {
                let desc = PrimitiveDesc {
                    shape: Shape::Outline {
                        border_width: style.box_border_width,
                        border_color: style.box_border_color,
                    },
                    color: [0, 0, 0, 0],
                    z_index: style.box_z_index,
                    shader: ShaderTag::Hud,
                    position: Vec2::new(i as f32 * chunk, j as f32 * chunk),
                    size: Vec2::splat(chunk),
                    hidden: true,
                };
                chunk_boxes.push(Primitive::register(desc, sink));
            }
        }

        log::info!(
            "Grid overlay: {} vertical lines, {} horizontal lines, {}x{} chunk boxes",
            vertical_lines.len(), horizontal_lines.len(), box_columns, box_rows
        );

        Self {
            cell_size,
            chunk_pixels,
            state: OverlayState::Hidden,
            vertical_lines,
            horizontal_lines,
            chunk_boxes,
            box_rows,
            previous: GridOffsets::default(),
        }
    }

    /// Per-frame entry point: handle the toggle edge, then follow the camera.
    pub fn update(&mut self, view: &ViewState, input: &dyn ActionInput, sink: &mut dyn RenderSink) {
        if input.just_pressed(Action::ToggleGrid) {
            self.toggle(sink);
        }

        if self.state == OverlayState::Visible {
            self.follow_camera(view);
            self.sync_positions(sink);
        }
    }

    /// Flip between hidden and visible, pushing visibility to the renderer.
    pub fn toggle(&mut self, sink: &mut dyn RenderSink) {
        self.state = match self.state {
            OverlayState::Hidden => OverlayState::Visible,
            OverlayState::Visible => OverlayState::Hidden,
        };
        let hidden = self.state == OverlayState::Hidden;
        log::debug!("Grid overlay {:?}", self.state);

        for primitive in self.primitives_mut() {
            primitive.hidden = hidden;
            sink.set_hidden(primitive.id, hidden);
        }
    }

    /// Shift the pool by the change in camera phase since the last frame.
    ///
    /// The three groups are translated on separate rayon tasks and joined
    /// before the new offsets are recorded. Returns the offsets now current.
    pub fn follow_camera(&mut self, view: &ViewState) -> GridOffsets {
        let current = GridOffsets::from_view(view, self.cell_size, self.chunk_pixels);
        let previous = self.previous;
        let scale = view.zoom * view.game_to_canvas();

        let line_delta = Vec2::new(
            (previous.line_x - current.line_x) as f32 * scale.x,
            (previous.line_y - current.line_y) as f32 * scale.y,
        );
        let box_delta = Vec2::new(
            (previous.box_x - current.box_x) as f32 * scale.x,
            (previous.box_y - current.box_y) as f32 * scale.y,
        );

        let vertical = &mut self.vertical_lines;
        let horizontal = &mut self.horizontal_lines;
        let boxes = &mut self.chunk_boxes;
        rayon::scope(|s| {
            s.spawn(move |_| translate_all(vertical, Vec2::new(line_delta.x, 0.0)));
            s.spawn(move |_| translate_all(horizontal, Vec2::new(0.0, line_delta.y)));
            s.spawn(move |_| translate_all(boxes, box_delta));
        });

        log::trace!("Grid offsets {:?} -> {:?}", previous, current);
        self.previous = current;
        current
    }

    fn sync_positions(&self, sink: &mut dyn RenderSink) {
        for primitive in self.primitives() {
            sink.set_position(primitive.id, primitive.position);
        }
    }

    fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.vertical_lines.iter()
            .chain(self.horizontal_lines.iter())
            .chain(self.chunk_boxes.iter())
    }

    fn primitives_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.vertical_lines.iter_mut()
            .chain(self.horizontal_lines.iter_mut())
            .chain(self.chunk_boxes.iter_mut())
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == OverlayState::Visible
    }

    pub fn vertical_lines(&self) -> &[Primitive] {
        &self.vertical_lines
    }

    pub fn horizontal_lines(&self) -> &[Primitive] {
        &self.horizontal_lines
    }

    pub fn chunk_boxes(&self) -> &[Primitive] {
        &self.chunk_boxes
    }

    /// Chunk box at column `i`, row `j`
    pub fn chunk_box(&self, i: usize, j: usize) -> Option<&Primitive> {
        if j >= self.box_rows {
            return None;
        }
        self.chunk_boxes.get(i * self.box_rows + j)
    }

    /// Offsets recorded by the last visible frame
    pub fn previous_offsets(&self) -> GridOffsets {
        self.previous
    }

    /// Total primitives in the pool
    pub fn primitive_count(&self) -> usize {
        self.vertical_lines.len() + self.horizontal_lines.len() + self.chunk_boxes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputState;
    use crate::overlay::primitive::DrawableId;
    use std::collections::HashMap;
    use winit::keyboard::KeyCode;

    /// Renderer double recording the last state of every drawable
    #[derive(Default)]
    struct RecordingSink {
        next_id: u64,
        descs: HashMap<DrawableId, PrimitiveDesc>,
        positions: HashMap<DrawableId, Vec2>,
        hidden: HashMap<DrawableId, bool>,
    }

    impl RenderSink for RecordingSink {
        fn add_drawable(&mut self, desc: &PrimitiveDesc) -> DrawableId {
            let id = DrawableId(self.next_id);
            self.next_id += 1;
            self.descs.insert(id, *desc);
            self.positions.insert(id, desc.position);
            self.hidden.insert(id, desc.hidden);
            id
        }

        fn set_position(&mut self, id: DrawableId, position: Vec2) {
            self.positions.insert(id, position);
        }

        fn set_hidden(&mut self, id: DrawableId, hidden: bool) {
            self.hidden.insert(id, hidden);
        }
    }

    const WINDOW: Vec2 = Vec2::new(1280.0, 720.0);

    fn overlay(sink: &mut RecordingSink) -> OverlayRenderer {
        OverlayRenderer::new(&WorldConfig::default(), WINDOW, sink)
    }

    fn view_at(x: f32, y: f32) -> ViewState {
        ViewState::uniform(Vec2::new(x, y), 1.0, WINDOW)
    }

    fn positions(primitives: &[Primitive]) -> Vec<Vec2> {
        primitives.iter().map(|p| p.position).collect()
    }

    #[test]
    fn test_pool_sizes() {
        let mut sink = RecordingSink::default();
        let overlay = overlay(&mut sink);

        assert_eq!(overlay.vertical_lines().len(), 40);
        assert_eq!(overlay.horizontal_lines().len(), 22);
        // ceil(1280/256)+1 = 6 columns, 720/256+1 = 3 rows
        assert_eq!(overlay.chunk_boxes().len(), 18);
        assert_eq!(sink.descs.len(), overlay.primitive_count());

        let b = overlay.chunk_box(2, 1).expect("box exists");
        assert_eq!(b.position, Vec2::new(512.0, 256.0));
        assert!(overlay.chunk_box(0, 3).is_none());
    }

    #[test]
    fn test_registration_style() {
        let mut sink = RecordingSink::default();
        let overlay = overlay(&mut sink);

        let line = sink.descs[&overlay.vertical_lines()[3].id];
        assert_eq!(line.z_index, 80);
        assert_eq!(line.shader, ShaderTag::Hud);
        assert_eq!(line.position, Vec2::new(96.0, 0.0));
        assert_eq!(line.size, Vec2::new(2.0, 720.0));

        let chunk_box = sink.descs[&overlay.chunk_boxes()[0].id];
        assert_eq!(chunk_box.z_index, 81);
        assert!(matches!(chunk_box.shape, Shape::Outline { border_width: 2, .. }));
    }

    #[test]
    fn test_starts_hidden() {
        let mut sink = RecordingSink::default();
        let overlay = overlay(&mut sink);

        assert_eq!(overlay.state(), OverlayState::Hidden);
        assert!(sink.hidden.values().all(|&h| h));
    }

    #[test]
    fn test_toggle_edge() {
        let mut sink = RecordingSink::default();
        let mut overlay = overlay(&mut sink);
        let mut input = InputState::new();
        let view = view_at(0.0, 0.0);

        input.press_key(KeyCode::Tab);
        overlay.update(&view, &input, &mut sink);
        assert!(overlay.is_visible());
        assert!(sink.hidden.values().all(|&h| !h));

        // Holding the key does not toggle again
        input.end_frame();
        overlay.update(&view, &input, &mut sink);
        assert!(overlay.is_visible());

        input.release_key(KeyCode::Tab);
        input.end_frame();
        input.press_key(KeyCode::Tab);
        overlay.update(&view, &input, &mut sink);
        assert_eq!(overlay.state(), OverlayState::Hidden);
        assert!(sink.hidden.values().all(|&h| h));
    }

    #[test]
    fn test_hidden_overlay_does_not_track() {
        let mut sink = RecordingSink::default();
        let mut overlay = overlay(&mut sink);
        let input = InputState::new();
        let before = positions(overlay.vertical_lines());

        overlay.update(&view_at(16.0, 0.0), &input, &mut sink);
        assert_eq!(positions(overlay.vertical_lines()), before);
        assert_eq!(overlay.previous_offsets(), GridOffsets::default());
    }

    #[test]
    fn test_offsets_use_non_negative_modulo() {
        let offsets = GridOffsets::from_view(&view_at(-10.0, 40.0), 32, 256);
        assert_eq!(offsets.line_x, 22);
        assert_eq!(offsets.line_y, 8);
        // (-10 - 640) mod 256 = 118, (40 - 360) mod 256 = 192
        assert_eq!(offsets.box_x, 118);
        assert_eq!(offsets.box_y, 192);
    }

    #[test]
    fn test_full_cell_move_is_no_net_shift() {
        let mut sink = RecordingSink::default();
        let mut overlay = overlay(&mut sink);
        overlay.toggle(&mut sink);
        overlay.follow_camera(&view_at(0.0, 0.0));
        let before = positions(overlay.vertical_lines());

        let offsets = overlay.follow_camera(&view_at(32.0, 0.0));
        assert_eq!(offsets.line_x, 0);
        assert_eq!(positions(overlay.vertical_lines()), before);
    }

    #[test]
    fn test_half_cell_move_shifts_lines_and_reverts() {
        let mut sink = RecordingSink::default();
        let mut overlay = overlay(&mut sink);
        let mut input = InputState::new();
        input.press_key(KeyCode::Tab);
        overlay.update(&view_at(0.0, 0.0), &input, &mut sink);
        input.end_frame();
        let before = positions(overlay.vertical_lines());
        let horizontal_before = positions(overlay.horizontal_lines());

        overlay.update(&view_at(16.0, 0.0), &input, &mut sink);
        assert_eq!(overlay.previous_offsets().line_x, 16);
        for (line, start) in overlay.vertical_lines().iter().zip(&before) {
            assert_eq!(line.position, *start + Vec2::new(-16.0, 0.0));
            assert_eq!(sink.positions[&line.id], line.position);
        }
        // Horizontal lines only move in y
        assert_eq!(positions(overlay.horizontal_lines()), horizontal_before);

        overlay.update(&view_at(32.0, 0.0), &input, &mut sink);
        assert_eq!(positions(overlay.vertical_lines()), before);
    }

    #[test]
    fn test_zoom_and_canvas_scale_delta() {
        let mut sink = RecordingSink::default();
        let mut overlay = overlay(&mut sink);
        overlay.toggle(&mut sink);

        let mut view = ViewState {
            camera: Vec2::ZERO,
            zoom: 2.0,
            window: WINDOW,
            canvas: WINDOW * 2.0,
            game: WINDOW,
        };
        overlay.follow_camera(&view);
        let before = positions(overlay.horizontal_lines());

        view.camera.y = 8.0;
        overlay.follow_camera(&view);
        // (0 - 8) * zoom 2 * (game/canvas 0.5) = -8
        for (line, start) in overlay.horizontal_lines().iter().zip(&before) {
            assert_eq!(line.position, *start + Vec2::new(0.0, -8.0));
        }
    }

    #[test]
    fn test_camera_round_trip_has_no_drift() {
        let mut sink = RecordingSink::default();
        let mut overlay = overlay(&mut sink);
        overlay.toggle(&mut sink);

        let start = view_at(500.0, 300.0);
        overlay.follow_camera(&start);
        let vertical = positions(overlay.vertical_lines());
        let horizontal = positions(overlay.horizontal_lines());
        let boxes = positions(overlay.chunk_boxes());

        let path = [(517.0, 301.0), (-90.5, 12.0), (1999.0, -250.0), (733.25, 1024.0), (31.0, 31.0)];
        for (x, y) in path {
            overlay.follow_camera(&view_at(x, y));
        }
        overlay.follow_camera(&start);

        assert_eq!(positions(overlay.vertical_lines()), vertical);
        assert_eq!(positions(overlay.horizontal_lines()), horizontal);
        assert_eq!(positions(overlay.chunk_boxes()), boxes);
    }
}
