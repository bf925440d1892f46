use std::collections::HashSet;

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::traits::controller::{Button, Controller};

/// Adapter that bridges Winit events to the Controller trait. Scenes react
/// to key *releases* and pointer presses, so both are queued here and
/// drained once per frame by the runner.
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Buttons released since the last drain, in release order
    released: Vec<Button>,
    /// Left-click positions since the last drain
    clicks: Vec<(f32, f32)>,
    /// Current mouse position (relative to window)
    mouse_position: Option<(f32, f32)>,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        match event.state {
                            ElementState::Pressed => self.press(button),
                            ElementState::Released => self.release(button),
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.press(Button::MouseLeft),
                        ElementState::Released => self.release(Button::MouseLeft),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x as f32, position.y as f32));
            }
            _ => {}
        }
    }

    /// Record a button press. A left press at a known cursor position
    /// also queues a click for the pick pass.
    pub fn press(&mut self, button: Button) {
        if self.pressed_keys.insert(button) {
            self.pressed_vec.push(button);
        }
        if button == Button::MouseLeft {
            if let Some(pos) = self.mouse_position {
                self.clicks.push(pos);
            }
        }
    }

    /// Record a button release. Keyboard releases are queued for the
    /// scene's `on_key_release` hook.
    pub fn release(&mut self, button: Button) {
        if self.pressed_keys.remove(&button) {
            self.pressed_vec.retain(|&b| b != button);
        }
        if button != Button::MouseLeft {
            self.released.push(button);
        }
    }

    /// Buttons released since the last call, in release order.
    pub fn drain_released(&mut self) -> Vec<Button> {
        std::mem::take(&mut self.released)
    }

    /// Left-click positions since the last call.
    pub fn drain_clicks(&mut self) -> Vec<(f32, f32)> {
        std::mem::take(&mut self.clicks)
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyL => Some(Button::KeyL),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::Digit1 => Some(Button::Digit1),
            KeyCode::Digit2 => Some(Button::Digit2),
            KeyCode::Digit3 => Some(Button::Digit3),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Button::Plus),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(Button::Minus),
            KeyCode::Comma => Some(Button::Comma),
            KeyCode::Period => Some(Button::Period),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}
