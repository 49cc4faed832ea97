//! Pointer and keyboard dispatch into the component tree.
//!
//! The [`crate::input::EventRouter`] only notifies global callbacks. Hosts
//! that want node-level handlers put a [`PointerDispatcher`] behind it: it
//! hit-tests pointer events against the tree and triggers the node's handlers
//! by name. Events go to the hit node only; there is no bubbling.
//!
//! | Input        | Handlers triggered                                  |
//! |--------------|-----------------------------------------------------|
//! | `MouseMove`  | `mouse_leave` / `mouse_enter` on hover change, `mouse_move` |
//! | `MouseDown`  | `blur` / `focus` on focus change, `mouse_down`      |
//! | `MouseUp`    | `mouse_up` (also on the pressed node if released elsewhere), then `click` if the down hit the same node |
//! | `MouseWheel` | `mouse_wheel` on the node under the last cursor position |
//! | `KeyDown/Up` | `key_down` / `key_up` on the focused node           |

use crate::input::Event;
use crate::value::Value;
use crate::widget::{ComponentId, ComponentTree};

/// Handler name fired when a node gains focus.
pub const FOCUS: &str = "focus";
/// Handler name fired when a node loses focus.
pub const BLUR: &str = "blur";
/// Handler name fired on press and release over the same node.
pub const CLICK: &str = "click";
/// Handler name fired when the cursor enters a node.
pub const MOUSE_ENTER: &str = "mouse_enter";
/// Handler name fired when the cursor leaves a node.
pub const MOUSE_LEAVE: &str = "mouse_leave";

/// Routes normalized events to node handlers.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    cursor: (f32, f32),
    hovered: Option<ComponentId>,
    pressed: Option<ComponentId>,
    focused: Option<ComponentId>,
}

impl PointerDispatcher {
    /// Creates a dispatcher with nothing hovered or focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Node under the cursor after the last pointer event.
    #[must_use]
    pub fn hovered(&self) -> Option<ComponentId> {
        self.hovered
    }

    /// Node that received keyboard events.
    #[must_use]
    pub fn focused(&self) -> Option<ComponentId> {
        self.focused
    }

    /// Node a button went down on and has not been released yet.
    #[must_use]
    pub fn pressed(&self) -> Option<ComponentId> {
        self.pressed
    }

    /// Dispatches one event below `root`. Returns the node it was delivered
    /// to, if any.
    pub fn dispatch(&mut self, tree: &mut ComponentTree, root: ComponentId, event: &Event) -> Option<ComponentId> {
        self.forget_dead(tree);

        match *event {
            Event::MouseMove { x, y } => {
                self.cursor = (x, y);
                let hit = tree.hit_test(root, x, y);
                self.hover(tree, hit, event);
                let id = hit?;
                tree.trigger_event(id, "mouse_move", event);
                Some(id)
            }
            Event::MouseDown { x, y, .. } => {
                self.cursor = (x, y);
                let hit = tree.hit_test(root, x, y);
                self.hover(tree, hit, event);
                self.pressed = hit;
                self.set_focus_with(tree, hit, event);
                let id = hit?;
                tree.trigger_event(id, "mouse_down", event);
                Some(id)
            }
            Event::MouseUp { x, y, .. } => {
                self.cursor = (x, y);
                let hit = tree.hit_test(root, x, y);
                let pressed = self.pressed.take();
                if let Some(held) = pressed.filter(|&held| hit != Some(held) && tree.is_alive(held)) {
                    tree.trigger_event(held, "mouse_up", event);
                }
                let id = hit?;
                tree.trigger_event(id, "mouse_up", event);
                if pressed == Some(id) && tree.is_alive(id) {
                    tree.trigger_event(id, CLICK, event);
                }
                Some(id)
            }
            Event::MouseWheel { .. } => {
                let id = tree.hit_test(root, self.cursor.0, self.cursor.1)?;
                tree.trigger_event(id, "mouse_wheel", event);
                Some(id)
            }
            Event::KeyDown { .. } | Event::KeyUp { .. } => {
                let id = self.focused?;
                tree.trigger_event(id, event.kind().as_str(), event);
                Some(id)
            }
            Event::Resize { .. } | Event::Quit | Event::Custom(_) => None,
        }
    }

    /// Moves keyboard focus, firing `blur` and `focus`. `None` clears it.
    pub fn set_focus(&mut self, tree: &mut ComponentTree, id: Option<ComponentId>) {
        self.set_focus_with(tree, id, &Event::Custom(Value::Null));
    }

    fn set_focus_with(&mut self, tree: &mut ComponentTree, id: Option<ComponentId>, event: &Event) {
        if self.focused == id {
            return;
        }
        if let Some(old) = self.focused.take() {
            tree.trigger_event(old, BLUR, event);
        }
        self.focused = id.filter(|&id| tree.is_alive(id));
        if let Some(new) = self.focused {
            tracing::trace!("focus moved to {}", new);
            tree.trigger_event(new, FOCUS, event);
        }
    }

    fn hover(&mut self, tree: &mut ComponentTree, hit: Option<ComponentId>, event: &Event) {
        if self.hovered == hit {
            return;
        }
        if let Some(old) = self.hovered.take() {
            tree.trigger_event(old, MOUSE_LEAVE, event);
        }
        self.hovered = hit;
        if let Some(new) = hit {
            tree.trigger_event(new, MOUSE_ENTER, event);
        }
    }

    /// Drops handles to nodes removed since the last event.
    fn forget_dead(&mut self, tree: &ComponentTree) {
        for slot in [&mut self.hovered, &mut self.pressed, &mut self.focused] {
            if slot.is_some_and(|id| !tree.is_alive(id)) {
                *slot = None;
            }
        }
    }
}
