use std::collections::HashSet;

use glam::Vec2;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Raw hardware state for a single frame.
///
/// The host loop feeds events in (fields are public) and calls
/// [`clear_frame_state`](InputState::clear_frame_state) once per tick;
/// pressed/released sets are edge-triggered and live for one frame only.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    /// Cursor position in screen pixels.
    pub cursor: Vec2,
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Record a button press for this frame.
    pub fn press_mouse(&mut self, button: MouseButton) {
        self.mouse_pressed.insert(button);
        self.mouse_held.insert(button);
    }

    /// Record a button release for this frame.
    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_released.insert(button);
        self.mouse_held.remove(&button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_edge_triggered_held_persists() {
        let mut input = InputState::new();
        input.press_mouse(MouseButton::Left);
        assert!(input.is_mouse_pressed(MouseButton::Left));
        assert!(input.is_mouse_held(MouseButton::Left));

        input.clear_frame_state();
        assert!(!input.is_mouse_pressed(MouseButton::Left));
        assert!(input.is_mouse_held(MouseButton::Left));

        input.release_mouse(MouseButton::Left);
        assert!(input.is_mouse_released(MouseButton::Left));
        assert!(!input.is_mouse_held(MouseButton::Left));
    }
}
