//! Keyboard input state.
//!
//! [`Input`] tracks which keys are held, just pressed, or just released. The
//! window event handler writes into it; once all of a frame's events have been
//! processed the app captures an [`InputState`] snapshot and hands that to
//! the tank. The tank never reads the live key set.

use std::collections::HashSet;
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

/// Tracks the state of a set of inputs (keys).
///
/// - `pressed`: currently held down
/// - `just_pressed`: pressed this frame (not held last frame)
/// - `just_released`: released this frame
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Returns `true` if the input is currently held down.
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    /// Returns `true` if the input was pressed this frame.
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input was released this frame.
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Call when an input is pressed (from event handler). Key repeat is a
    /// no-op.
    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Call when an input is released (from event handler).
    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Release everything currently held, e.g. when the window loses focus
    /// and the matching release events will never arrive.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.pressed.drain());
    }

    /// Clear per-frame state. Called at the end of each frame.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Logical commands the demo understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
    Quit,
}

/// Maps each [`Command`] to a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub rotate_left: KeyCode,
    pub rotate_right: KeyCode,
    pub quit: KeyCode,
}

impl KeyBindings {
    pub fn key(&self, command: Command) -> KeyCode {
        match command {
            Command::Forward => self.forward,
            Command::Backward => self.backward,
            Command::RotateLeft => self.rotate_left,
            Command::RotateRight => self.rotate_right,
            Command::Quit => self.quit,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            rotate_left: KeyCode::KeyA,
            rotate_right: KeyCode::KeyD,
            quit: KeyCode::Escape,
        }
    }
}

/// Snapshot of the movement commands held during one frame.
///
/// Opposing pairs may both be set; resolving them is up to the consumer
/// (the tank lets forward and rotate-left win).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub quit: bool,
}

impl InputState {
    /// Read the held commands out of the live key set.
    ///
    /// Quit is edge-triggered: it fires on the frame the key goes down.
    pub fn capture(keys: &Input<KeyCode>, bindings: &KeyBindings) -> Self {
        let held = |command| keys.pressed(bindings.key(command));
        Self {
            forward: held(Command::Forward),
            backward: held(Command::Backward),
            rotate_left: held(Command::RotateLeft),
            rotate_right: held(Command::RotateRight),
            quit: keys.just_pressed(bindings.key(Command::Quit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_edges() {
        let mut keys = Input::new();
        keys.press(KeyCode::KeyW);
        assert!(keys.pressed(KeyCode::KeyW));
        assert!(keys.just_pressed(KeyCode::KeyW));

        keys.clear_just();
        keys.press(KeyCode::KeyW); // repeat
        assert!(!keys.just_pressed(KeyCode::KeyW));

        keys.release(KeyCode::KeyW);
        assert!(!keys.pressed(KeyCode::KeyW));
        assert!(keys.just_released(KeyCode::KeyW));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut keys: Input<KeyCode> = Input::new();
        keys.release(KeyCode::KeyA);
        assert!(!keys.just_released(KeyCode::KeyA));
    }

    #[test]
    fn release_all_drops_held_keys() {
        let mut keys = Input::new();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyA);
        keys.clear_just();

        keys.release_all();
        assert!(!keys.pressed(KeyCode::KeyW));
        assert!(!keys.pressed(KeyCode::KeyA));
        assert!(keys.just_released(KeyCode::KeyW));

        let state = InputState::capture(&keys, &KeyBindings::default());
        assert_eq!(state, InputState::default());
    }

    #[test]
    fn capture_reads_bound_keys() {
        let bindings = KeyBindings::default();
        let mut keys = Input::new();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyS);
        keys.press(KeyCode::KeyD);

        let state = InputState::capture(&keys, &bindings);
        assert!(state.forward);
        assert!(state.backward);
        assert!(!state.rotate_left);
        assert!(state.rotate_right);
        assert!(!state.quit);
    }

    #[test]
    fn quit_fires_only_on_the_press_frame() {
        let bindings = KeyBindings::default();
        let mut keys = Input::new();
        keys.press(KeyCode::Escape);
        assert!(InputState::capture(&keys, &bindings).quit);

        keys.clear_just();
        assert!(!InputState::capture(&keys, &bindings).quit);
    }

    #[test]
    fn custom_bindings() {
        let bindings = KeyBindings {
            forward: KeyCode::ArrowUp,
            ..KeyBindings::default()
        };
        let mut keys = Input::new();
        keys.press(KeyCode::KeyW);
        assert!(!InputState::capture(&keys, &bindings).forward);

        keys.press(KeyCode::ArrowUp);
        let state = InputState::capture(&keys, &bindings);
        assert!(state.forward);
        assert_eq!(bindings.key(Command::Forward), KeyCode::ArrowUp);
    }
}
