//! Chunkgrid - headless map demo
//!
//! Builds a spatial index for a window, places a handful of buildings, then
//! drives the camera, grid overlay and debug probe for a scripted number of
//! frames with a renderer that only logs.

use std::path::PathBuf;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use chunkgrid::core::{
    camera::Camera2d,
    camera_controller::PanCameraController,
    input::InputState,
    logging,
    Vec2,
};
use chunkgrid::debug::DebugProbe;
use chunkgrid::math::Rect;
use chunkgrid::overlay::{DrawableId, OverlayRenderer, PrimitiveDesc, RenderSink};
use chunkgrid::world::{EntityId, SpatialIndex, StaticObject, WorldConfig};

const WINDOW: Vec2 = Vec2::new(1280.0, 720.0);
const FRAME_DT: f32 = 1.0 / 60.0;

/// Renderer stand-in counting what it is asked to do
#[derive(Default)]
struct LogSink {
    drawables: u64,
    moves: u64,
    visibility_changes: u64,
}

impl RenderSink for LogSink {
    fn add_drawable(&mut self, _desc: &PrimitiveDesc) -> DrawableId {
        self.drawables += 1;
        DrawableId(self.drawables)
    }

    fn set_position(&mut self, _id: DrawableId, _position: Vec2) {
        self.moves += 1;
    }

    fn set_hidden(&mut self, _id: DrawableId, _hidden: bool) {
        self.visibility_changes += 1;
    }
}

fn main() {
    logging::init();
    log::info!("Chunkgrid demo starting...");

    let args: Vec<String> = std::env::args().collect();
    let frames = parse_frames_arg(&args).unwrap_or(120);

    let config = match parse_config_arg(&args) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };

    let mut index = match SpatialIndex::new(&config, WINDOW) {
        Ok(index) => index,
        Err(e) => {
            log::error!("Failed to build spatial index: {}", e);
            std::process::exit(1);
        }
    };

    let cell = config.cell_size as f32;
    let buildings = [
        ("Town Center", Rect::from_xywh(cell * 4.0, cell * 4.0, cell * 4.0, cell * 4.0), true),
        ("House", Rect::from_xywh(cell * 7.0, cell * 10.0, cell * 2.0, cell * 2.0), true),
        ("Military Block", Rect::from_xywh(cell * 9.0, cell * 6.0, cell * 3.0, cell * 3.0), true),
        ("Bush", Rect::from_xywh(cell * 12.0, cell * 3.0, cell, cell), false),
    ];
    for (id, (name, bounds, solid)) in buildings.into_iter().enumerate() {
        if !index.can_place(&bounds) {
            log::warn!("Skipping {}: {:?} is blocked or outside the world", name, bounds);
            continue;
        }
        if let Err(e) = index.place(StaticObject::new(id as u64, name, bounds).into_ref(), solid) {
            log::warn!("Failed to place {}: {}", name, e);
        }
    }
    log::info!(
        "Placed {} entities, {} cells occupied",
        index.len(), index.grid().occupied_count()
    );

    let mut sink = LogSink::default();
    let mut overlay = OverlayRenderer::new(&config, WINDOW, &mut sink);
    let mut probe = DebugProbe::new();
    let mut input = InputState::new();
    let mut camera = Camera2d::new(WINDOW * 0.5, 1.0);
    let controller = PanCameraController::default().with_world_bounds(index.layout().world_size());

    for frame in 0..frames {
        script_input(&mut input, frame, frames);

        controller.update(&mut camera, &input, FRAME_DT);
        let view = camera.view(WINDOW, WINDOW, WINDOW);
        overlay.update(&view, &input, &mut sink);
        probe.update(&input, &index, &view);

        input.end_frame();
    }

    if let Some(removed) = index.remove(EntityId(0)) {
        log::info!("Removed {}, {} cells still occupied", removed.name(), index.grid().occupied_count());
    }

    log::info!(
        "Done: camera at {}, overlay {:?}, {} drawables, {} moves, {} visibility changes",
        camera.position, overlay.state(), sink.drawables, sink.moves, sink.visibility_changes
    );
}

/// Show the grid, pan right then down, and probe the cursor at the end
fn script_input(input: &mut InputState, frame: u32, frames: u32) {
    if frame == 0 {
        input.press_key(KeyCode::Tab);
    } else if frame == 1 {
        input.release_key(KeyCode::Tab);
        input.press_key(KeyCode::KeyD);
    } else if frame == frames / 2 {
        input.release_key(KeyCode::KeyD);
        input.press_key(KeyCode::KeyS);
    } else if frame + 1 == frames {
        input.release_key(KeyCode::KeyS);
        input.set_cursor(Vec2::new(200.0, 200.0));
        input.press_mouse(MouseButton::Middle);
    }
}

/// Parse --config argument from command line
fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// Parse --frames argument from command line
fn parse_frames_arg(args: &[String]) -> Option<u32> {
    for i in 0..args.len() {
        if args[i] == "--frames" || args[i] == "-f" {
            if let Some(frames_str) = args.get(i + 1) {
                return frames_str.parse().ok();
            }
        }
    }
    None
}
