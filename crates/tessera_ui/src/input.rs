//! Normalized input events, queryable input state, and global event routing.
//!
//! The core never polls hardware. A windowing layer turns OS input into
//! [`Event`]s; the [`EventRouter`] folds each one into its [`InputState`] and
//! then notifies the callbacks registered for that event's kind.

use std::collections::HashMap;

use crate::value::Value;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Any further button. Not tracked in the held-button state.
    Other(u8),
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    /// A printable key, by its unshifted character.
    Character(char),
    /// Function key `F1`..`F24`.
    Function(u8),
    /// Platform key code with no named variant.
    Other(u32),
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A mouse button went down at a position.
    MouseDown {
        /// Cursor x.
        x: f32,
        /// Cursor y.
        y: f32,
        /// Button.
        button: MouseButton,
    },
    /// A mouse button went up at a position.
    MouseUp {
        /// Cursor x.
        x: f32,
        /// Cursor y.
        y: f32,
        /// Button.
        button: MouseButton,
    },
    /// The cursor moved.
    MouseMove {
        /// Cursor x.
        x: f32,
        /// Cursor y.
        y: f32,
    },
    /// Scroll input.
    MouseWheel {
        /// Horizontal scroll.
        dx: f32,
        /// Vertical scroll.
        dy: f32,
    },
    /// A key went down.
    KeyDown {
        /// Key.
        key: Key,
        /// Text the key produced, if any.
        text: Option<char>,
    },
    /// A key went up.
    KeyUp {
        /// Key.
        key: Key,
    },
    /// The window was resized.
    Resize {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// The user asked to close the window.
    Quit,
    /// Application-defined payload.
    Custom(Value),
}

impl Event {
    /// Returns the event's kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::MouseDown { .. } => EventKind::MouseDown,
            Self::MouseUp { .. } => EventKind::MouseUp,
            Self::MouseMove { .. } => EventKind::MouseMove,
            Self::MouseWheel { .. } => EventKind::MouseWheel,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::Resize { .. } => EventKind::Resize,
            Self::Quit => EventKind::Quit,
            Self::Custom(_) => EventKind::Custom,
        }
    }

    /// Cursor position carried by pointer events.
    #[must_use]
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            Self::MouseDown { x, y, .. } | Self::MouseUp { x, y, .. } | Self::MouseMove { x, y } => {
                Some((x, y))
            }
            _ => None,
        }
    }
}

/// Event kind, the key callbacks are registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `mouse_down`
    MouseDown,
    /// `mouse_up`
    MouseUp,
    /// `mouse_move`
    MouseMove,
    /// `mouse_wheel`
    MouseWheel,
    /// `key_down`
    KeyDown,
    /// `key_up`
    KeyUp,
    /// `resize`
    Resize,
    /// `quit`
    Quit,
    /// `custom`
    Custom,
}

impl EventKind {
    /// The kind's handler name, as used for node event handlers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MouseDown => "mouse_down",
            Self::MouseUp => "mouse_up",
            Self::MouseMove => "mouse_move",
            Self::MouseWheel => "mouse_wheel",
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::Resize => "resize",
            Self::Quit => "quit",
            Self::Custom => "custom",
        }
    }
}

/// Accumulated input state.
///
/// Held state (cursor, buttons, keys) persists across frames; edge state
/// (pressed/released this frame, scroll delta) is cleared by
/// [`InputState::begin_frame`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current mouse X position.
    pub mouse_x: f32,
    /// Current mouse Y position.
    pub mouse_y: f32,
    /// Mouse scroll delta (x, y) accumulated this frame.
    pub scroll_delta: (f32, f32),
    /// Mouse buttons pressed this frame.
    buttons_pressed: u8,
    /// Mouse buttons released this frame.
    buttons_released: u8,
    /// Mouse buttons currently held.
    buttons_down: u8,
    /// Keys pressed this frame.
    keys_pressed: Vec<Key>,
    /// Keys currently held.
    keys_down: Vec<Key>,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.buttons_pressed = 0;
        self.buttons_released = 0;
        self.scroll_delta = (0.0, 0.0);
        self.keys_pressed.clear();
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &Event) {
        if let Some((x, y)) = event.position() {
            self.mouse_x = x;
            self.mouse_y = y;
        }
        match *event {
            Event::MouseDown { button, .. } => {
                let mask = Self::button_mask(button);
                self.buttons_pressed |= mask;
                self.buttons_down |= mask;
            }
            Event::MouseUp { button, .. } => {
                let mask = Self::button_mask(button);
                self.buttons_released |= mask;
                self.buttons_down &= !mask;
            }
            Event::MouseWheel { dx, dy } => {
                self.scroll_delta.0 += dx;
                self.scroll_delta.1 += dy;
            }
            Event::KeyDown { key, .. } => {
                if !self.keys_down.contains(&key) {
                    self.keys_pressed.push(key);
                    self.keys_down.push(key);
                }
            }
            Event::KeyUp { key } => self.keys_down.retain(|&k| k != key),
            _ => {}
        }
    }

    /// Returns true if the mouse button was clicked this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button was released this frame.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        (self.buttons_released & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed_this_frame(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns the bit mask for a button. Untracked buttons map to 0.
    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
            MouseButton::Other(_) => 0,
        }
    }
}

/// Handle returned by [`EventRouter::register_callback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Global event callback. `C` is whatever the host lets callbacks mutate.
pub type Callback<C> = Box<dyn FnMut(&Event, &InputState, &mut C)>;

/// Maintains input state and notifies globally registered callbacks.
///
/// The router does no tree dispatch; components that care about the pointer
/// test their own bounds against [`EventRouter::get_mouse_position`].
pub struct EventRouter<C> {
    callbacks: HashMap<EventKind, Vec<(CallbackId, Callback<C>)>>,
    input: InputState,
    next_id: u64,
}

impl<C> EventRouter<C> {
    /// Creates a router with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            input: InputState::new(),
            next_id: 1,
        }
    }

    /// Registers a callback for an event kind.
    ///
    /// Callbacks for the same kind run in registration order.
    pub fn register_callback<F>(&mut self, kind: EventKind, callback: F) -> CallbackId
    where
        F: FnMut(&Event, &InputState, &mut C) + 'static,
    {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.callbacks.entry(kind).or_default().push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unregister_callback(&mut self, id: CallbackId) -> bool {
        for list in self.callbacks.values_mut() {
            if let Some(pos) = list.iter().position(|(cid, _)| *cid == id) {
                drop(list.remove(pos));
                return true;
            }
        }
        false
    }

    /// Updates input state from the event, then runs the callbacks for its kind.
    pub fn handle_event(&mut self, event: &Event, target: &mut C) {
        self.input.apply(event);

        let kind = event.kind();
        tracing::trace!("routing {} event", kind.as_str());
        if let Some(list) = self.callbacks.get_mut(&kind) {
            for (_, callback) in list.iter_mut() {
                callback(event, &self.input, target);
            }
        }
    }

    /// Clears per-frame edge state. Call once at the start of every tick.
    pub fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    /// Current input state.
    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Returns true while the key is held.
    #[must_use]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.input.key_held(key)
    }

    /// Last known cursor position.
    #[must_use]
    pub fn get_mouse_position(&self) -> (f32, f32) {
        (self.input.mouse_x, self.input.mouse_y)
    }

    /// Returns true while the button is held. Buttons beyond the first
    /// three always report false.
    #[must_use]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.input.mouse_down(button)
    }

    /// Number of callbacks registered for a kind.
    #[must_use]
    pub fn callback_count(&self, kind: EventKind) -> usize {
        self.callbacks.get(&kind).map_or(0, Vec::len)
    }
}

impl<C> Default for EventRouter<C> {
    fn default() -> Self {
        Self::new()
    }
}
