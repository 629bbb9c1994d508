//! 2D camera and read-only viewport snapshot

use crate::core::types::Vec2;

/// Height of the HUD bar along the top of the window, in pixels
pub const HUD_TOP_MARGIN: f32 = 64.0;

/// Height of the HUD panel along the bottom of the window, in pixels
pub const HUD_BOTTOM_MARGIN: f32 = 160.0;

/// Orthographic top-down camera looking at a point of the map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2d {
    /// World position at the center of the view
    pub position: Vec2,
    /// Zoom factor (1.0 = one world unit per game pixel, larger = further away)
    pub zoom: f32,
    /// Closest allowed zoom
    pub min_zoom: f32,
    /// Furthest allowed zoom
    pub max_zoom: f32,
}

impl Camera2d {
    /// Create a new camera
    pub fn new(position: Vec2, zoom: f32) -> Self {
        Self {
            position,
            zoom,
            min_zoom: 0.25,
            max_zoom: 3.0,
        }
    }

    /// Multiply zoom by `factor`, clamped to the allowed range
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Keep the camera center inside `[0, world_size]`
    pub fn clamp_to_world(&mut self, world_size: Vec2) {
        self.position = self.position.clamp(Vec2::ZERO, world_size);
    }

    /// Snapshot the camera together with the window metrics
    pub fn view(&self, window: Vec2, canvas: Vec2, game: Vec2) -> ViewState {
        ViewState {
            camera: self.position,
            zoom: self.zoom,
            window,
            canvas,
            game,
        }
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

/// Camera and viewport metrics for one frame.
///
/// `window` is the OS window size, `canvas` the drawable surface in physical
/// pixels and `game` the logical game resolution. The ratio `game / canvas`
/// converts canvas pixels into game pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub camera: Vec2,
    pub zoom: f32,
    pub window: Vec2,
    pub canvas: Vec2,
    pub game: Vec2,
}

impl ViewState {
    /// View where window, canvas and game resolution all match
    pub fn uniform(camera: Vec2, zoom: f32, window: Vec2) -> Self {
        Self {
            camera,
            zoom,
            window,
            canvas: window,
            game: window,
        }
    }

    /// Game pixels per canvas pixel, per axis
    pub fn game_to_canvas(&self) -> Vec2 {
        self.game / self.canvas
    }

    /// Screen position scaled for zoom, relative to the window origin
    pub fn screen_to_window(&self, screen: Vec2) -> Vec2 {
        screen * self.zoom * self.game_to_canvas()
    }

    /// Screen position converted to a world position
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.screen_to_window(screen) + self.camera - (self.game * 0.5) * self.zoom
    }

    /// Whether a world position is inside the visible window and outside the HUD bars
    pub fn in_play_area(&self, world: Vec2) -> bool {
        let origin = self.camera - self.window * 0.5;
        let y_min = origin.y + HUD_TOP_MARGIN;
        let y_max = origin.y + self.window.y - HUD_BOTTOM_MARGIN;

        origin.x <= world.x && world.x <= origin.x + self.window.x &&
        y_min <= world.y && world.y <= y_max
    }
}
