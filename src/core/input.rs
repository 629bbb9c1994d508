//! Input state tracking and logical action bindings

use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::types::Vec2;

/// Logical actions the map layer reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Show or hide the grid overlay
    ToggleGrid,
    /// Print what lies under the cursor
    Probe,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
}

/// Physical input bound to an action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Action to physical input table
#[derive(Clone, Debug)]
pub struct ActionMap {
    bindings: HashMap<Action, Vec<Binding>>,
}

impl ActionMap {
    /// Empty map with nothing bound
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Add a binding for an action (an action may have several)
    pub fn bind(&mut self, action: Action, binding: Binding) -> &mut Self {
        let entry = self.bindings.entry(action).or_default();
        if !entry.contains(&binding) {
            entry.push(binding);
        }
        self
    }

    /// Remove every binding of an action
    pub fn unbind(&mut self, action: Action) {
        self.bindings.remove(&action);
    }

    /// Bindings for an action
    pub fn bindings(&self, action: Action) -> &[Binding] {
        self.bindings.get(&action).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

impl Default for ActionMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Action::ToggleGrid, Binding::Key(KeyCode::Tab))
            .bind(Action::Probe, Binding::Mouse(MouseButton::Middle))
            .bind(Action::PanLeft, Binding::Key(KeyCode::KeyA))
            .bind(Action::PanRight, Binding::Key(KeyCode::KeyD))
            .bind(Action::PanUp, Binding::Key(KeyCode::KeyW))
            .bind(Action::PanDown, Binding::Key(KeyCode::KeyS))
            .bind(Action::ZoomIn, Binding::Key(KeyCode::KeyE))
            .bind(Action::ZoomOut, Binding::Key(KeyCode::KeyQ));
        map
    }
}

/// Read-only view of logical input consumed by the map layer
pub trait ActionInput {
    /// Action became active this frame (fires once per press, not on hold)
    fn just_pressed(&self, action: Action) -> bool;

    /// Action is currently held
    fn pressed(&self, action: Action) -> bool;

    /// Cursor position in screen pixels
    fn cursor_position(&self) -> Vec2;
}

/// Tracks keyboard and mouse input state
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame
    mouse_just_pressed: HashSet<MouseButton>,
    /// Current cursor position
    cursor: Vec2,
    /// Action bindings
    actions: ActionMap,
}

impl InputState {
    /// Create new input state with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(ActionMap::default())
    }

    /// Create new input state with custom bindings
    pub fn with_bindings(actions: ActionMap) -> Self {
        Self {
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_buttons: HashSet::new(),
            mouse_just_pressed: HashSet::new(),
            cursor: Vec2::ZERO,
            actions,
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => match state {
                ElementState::Pressed => self.press_key(*key_code),
                ElementState::Released => self.release_key(*key_code),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_mouse(*button),
                ElementState::Released => self.release_mouse(*button),
            },
            _ => {}
        }
    }

    /// Record a key press (repeats while held do not re-trigger)
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_pressed.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    /// Record a key release
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    /// Record a mouse button press
    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_buttons.insert(button) {
            self.mouse_just_pressed.insert(button);
        }
    }

    /// Record a mouse button release
    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_buttons.remove(&button);
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_just_pressed.clear();
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Action bindings in use
    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Mutable action bindings, for rebinding at runtime
    pub fn actions_mut(&mut self) -> &mut ActionMap {
        &mut self.actions
    }

    fn binding_active(&self, binding: &Binding, just: bool) -> bool {
        match (binding, just) {
            (Binding::Key(key), false) => self.keys_pressed.contains(key),
            (Binding::Key(key), true) => self.keys_just_pressed.contains(key),
            (Binding::Mouse(button), false) => self.mouse_buttons.contains(button),
            (Binding::Mouse(button), true) => self.mouse_just_pressed.contains(button),
        }
    }
}

impl ActionInput for InputState {
    fn just_pressed(&self, action: Action) -> bool {
        self.actions.bindings(action).iter().any(|b| self.binding_active(b, true))
    }

    fn pressed(&self, action: Action) -> bool {
        self.actions.bindings(action).iter().any(|b| self.binding_active(b, false))
    }

    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
