//! Keyboard pan/zoom controller for the map camera

use crate::core::camera::Camera2d;
use crate::core::input::{Action, ActionInput};
use crate::core::types::Vec2;

/// Pans the camera with the pan actions and zooms with the zoom actions
pub struct PanCameraController {
    /// Pan speed in world units per second at zoom 1.0
    pub speed: f32,
    /// Zoom change per second (multiplicative)
    pub zoom_rate: f32,
    /// Camera center is kept inside this area, if set
    pub world_size: Option<Vec2>,
}

impl PanCameraController {
    /// Create new controller
    pub fn new(speed: f32, zoom_rate: f32) -> Self {
        Self {
            speed,
            zoom_rate,
            world_size: None,
        }
    }

    /// Restrict the camera center to `[0, world_size]`
    pub fn with_world_bounds(mut self, world_size: Vec2) -> Self {
        self.world_size = Some(world_size);
        self
    }

    /// Update camera based on input
    pub fn update(&self, camera: &mut Camera2d, input: &dyn ActionInput, dt: f32) {
        let mut direction = Vec2::ZERO;
        if input.pressed(Action::PanLeft) {
            direction.x -= 1.0;
        }
        if input.pressed(Action::PanRight) {
            direction.x += 1.0;
        }
        if input.pressed(Action::PanUp) {
            direction.y -= 1.0;
        }
        if input.pressed(Action::PanDown) {
            direction.y += 1.0;
        }

        if direction.length_squared() > 0.0 {
            // Zoomed out views pan faster so screen speed stays constant
            camera.position += direction.normalize() * self.speed * camera.zoom * dt;
        }

        if input.pressed(Action::ZoomIn) {
            camera.zoom_by(1.0 / (1.0 + self.zoom_rate * dt));
        }
        if input.pressed(Action::ZoomOut) {
            camera.zoom_by(1.0 + self.zoom_rate * dt);
        }

        if let Some(world_size) = self.world_size {
            camera.clamp_to_world(world_size);
        }
    }
}

impl Default for PanCameraController {
    fn default() -> Self {
        Self::new(400.0, 1.5)
    }
}
