//! Map configuration: grid resolution, chunking and overlay styling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Grid and chunk configuration for a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Fine cell edge length in world units.
    pub cell_size: u32,
    /// Chunk edge length in fine cells (a chunk is `chunk_size x chunk_size` cells).
    pub chunk_size: u32,
    /// World size relative to the window size.
    pub scale_factor: f32,
    /// Grid overlay styling.
    pub overlay: OverlayConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            chunk_size: 8,
            scale_factor: 2.0,
            overlay: OverlayConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse from a JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Chunk edge length in world units.
    pub fn chunk_pixels(&self) -> u32 {
        self.cell_size * self.chunk_size
    }

    /// Check the values that would make the grid degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(Error::Config("cell_size must be positive".into()));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be positive".into()));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(Error::Config(format!(
                "scale_factor must be a positive number, got {}",
                self.scale_factor
            )));
        }
        if self.overlay.line_thickness == 0 {
            return Err(Error::Config("overlay.line_thickness must be positive".into()));
        }
        Ok(())
    }
}

/// Styling of the grid overlay primitives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Grid line thickness in pixels.
    pub line_thickness: u32,
    /// Grid line fill color (RGBA).
    pub line_color: [u8; 4],
    /// Chunk box border width in pixels.
    pub box_border_width: u32,
    /// Chunk box border color (RGBA).
    pub box_border_color: [u8; 4],
    /// Draw order of the grid lines (between the map and the HUD).
    pub line_z_index: i32,
    /// Draw order of the chunk boxes, above the lines.
    pub box_z_index: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            line_thickness: 2,
            line_color: [0, 0, 0, 125],
            box_border_width: 2,
            box_border_color: [255, 255, 255, 255],
            line_z_index: 80,
            box_z_index: 81,
        }
    }
}
