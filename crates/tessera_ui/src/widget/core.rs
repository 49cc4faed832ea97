//! Core component types: ids, node data, and the behavior trait.

use std::collections::HashMap;
use std::fmt;

use crate::context::SharedContext;
use crate::input::Event;
use crate::layout::Rect;
use crate::render::DrawBackend;
use crate::style::StyleProperties;
use crate::value::Value;

use super::ComponentTree;

/// Handle to a node in a [`ComponentTree`].
///
/// The ID is split into two parts:
/// - Lower 32 bits: slot index in the tree's arena
/// - Upper 32 bits: generation counter for detecting stale handles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Creates an id from slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index(), self.generation())
    }
}

/// Handle returned by `add_event_handler`, used to remove the handler later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);

/// Node event handler. Receives the tree, the node it is attached to, and
/// the triggering event.
pub type EventHandler = Box<dyn FnMut(&mut ComponentTree, ComponentId, &Event)>;

/// Visual transform applied on top of the layout box.
///
/// Opacity and scale are applied to the node's own draw calls by
/// [`crate::render::render_tree`], scaled about the layout box center.
/// Rotation is tracked for transitions but not drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    /// Opacity (0-1).
    pub opacity: f32,
    /// Horizontal scale.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Rotation about the x axis in degrees.
    pub rotation_x: f32,
    /// Rotation about the y axis in degrees.
    pub rotation_y: f32,
}

impl Visual {
    /// Identity transform, fully opaque.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
    };
}

impl Default for Visual {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-node data owned by the tree.
///
/// Read freely through accessors; mutation goes through [`ComponentTree`] so
/// the update flag and context propagation stay consistent.
pub struct Node {
    pub(crate) props: HashMap<String, Value>,
    pub(crate) state: HashMap<String, Value>,
    pub(crate) rect: Rect,
    pub(crate) classes: String,
    pub(crate) style: StyleProperties,
    pub(crate) visual: Visual,
    /// Handler slots are `None` while their closure is running.
    pub(crate) handlers: HashMap<String, Vec<(HandlerId, Option<EventHandler>)>>,
    pub(crate) mounted: bool,
    pub(crate) needs_update: bool,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: Vec<ComponentId>,
    pub(crate) context: Option<SharedContext>,
}

impl Node {
    pub(crate) fn new(props: HashMap<String, Value>) -> Self {
        Self {
            props,
            state: HashMap::new(),
            rect: Rect::ZERO,
            classes: String::new(),
            style: StyleProperties::default(),
            visual: Visual::IDENTITY,
            handlers: HashMap::new(),
            mounted: false,
            needs_update: true,
            parent: None,
            children: Vec::new(),
            context: None,
        }
    }

    /// All props.
    #[must_use]
    pub fn props(&self) -> &HashMap<String, Value> {
        &self.props
    }

    /// A single prop.
    #[must_use]
    pub fn get_prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// All state entries.
    #[must_use]
    pub fn state(&self) -> &HashMap<String, Value> {
        &self.state
    }

    /// A single state entry.
    #[must_use]
    pub fn get_state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// A boolean state flag, false when unset.
    #[must_use]
    pub fn state_flag(&self, key: &str) -> bool {
        self.state.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Layout box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Style class string.
    #[must_use]
    pub fn classes(&self) -> &str {
        &self.classes
    }

    /// Resolved style.
    #[must_use]
    pub fn style(&self) -> &StyleProperties {
        &self.style
    }

    /// Visual transform.
    #[must_use]
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// True once the mount hook has run.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True if the next update pass should run the update hook.
    #[must_use]
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Parent handle, `None` for roots and detached nodes.
    #[must_use]
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Children in paint order.
    #[must_use]
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Shared context, once attached under a parent that has one.
    #[must_use]
    pub fn context(&self) -> Option<&SharedContext> {
        self.context.as_ref()
    }

    /// True if the point lies inside the layout box, edges included.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    /// Number of handlers registered for an event kind.
    #[must_use]
    pub fn handler_count(&self, kind: &str) -> usize {
        self.handlers.get(kind).map_or(0, Vec::len)
    }

    /// Reads a built-in animatable property.
    pub(crate) fn builtin_property(&self, key: &str) -> Option<f32> {
        let value = match key {
            "x" => self.rect.x,
            "y" => self.rect.y,
            "width" => self.rect.width,
            "height" => self.rect.height,
            "opacity" => self.visual.opacity,
            "scale_x" => self.visual.scale_x,
            "scale_y" => self.visual.scale_y,
            "rotation" => self.visual.rotation,
            "rotation_x" => self.visual.rotation_x,
            "rotation_y" => self.visual.rotation_y,
            _ => return None,
        };
        Some(value)
    }

    /// Writes a built-in animatable property. Returns false for unknown keys.
    pub(crate) fn set_builtin_property(&mut self, key: &str, value: f32) -> bool {
        let slot = match key {
            "x" => &mut self.rect.x,
            "y" => &mut self.rect.y,
            "width" => &mut self.rect.width,
            "height" => &mut self.rect.height,
            "opacity" => &mut self.visual.opacity,
            "scale_x" => &mut self.visual.scale_x,
            "scale_y" => &mut self.visual.scale_y,
            "rotation" => &mut self.visual.rotation,
            "rotation_x" => &mut self.visual.rotation_x,
            "rotation_y" => &mut self.visual.rotation_y,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Behavior of a tree node.
///
/// Only `render` is required. Lifecycle hooks get the tree and their own id;
/// while a hook runs the component is detached from its node, so the hook
/// may freely mutate the tree (including its own node's data).
pub trait Component {
    /// Short type name used in logs.
    fn name(&self) -> &'static str {
        "component"
    }

    /// Issues draw calls for this node. Children are drawn by the traversal.
    fn render(&self, node: &Node, backend: &mut dyn DrawBackend);

    /// Runs once, on the node's first update pass.
    fn component_did_mount(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {}

    /// Runs on every update pass where [`Component::should_component_update`] holds.
    fn component_did_update(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {}

    /// Runs when the node (or an ancestor) is removed from its parent.
    fn component_will_unmount(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {}

    /// Decides whether the update hook runs this pass.
    fn should_component_update(&self, node: &Node) -> bool {
        node.needs_update()
    }

    /// Positions children. Containers call this from their mount hook.
    fn layout_children(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {}

    /// Reads a component-specific animatable property.
    fn property(&self, _key: &str) -> Option<f32> {
        None
    }

    /// Writes a component-specific animatable property.
    ///
    /// Returns false if the component has no such property.
    fn set_property(&mut self, _key: &str, _value: f32) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_packing() {
        let id = ComponentId::new(7, 3);
        assert_eq!(id.index(), 7);
        assert_eq!(id.generation(), 3);
        assert_eq!(id.to_string(), "#7v3");
        assert_ne!(id, ComponentId::new(7, 4));
    }

    #[test]
    fn test_builtin_properties() {
        let mut node = Node::new(HashMap::new());
        assert!(node.set_builtin_property("width", 40.0));
        assert!(node.set_builtin_property("opacity", 0.25));
        assert!(!node.set_builtin_property("value", 1.0));

        assert_eq!(node.builtin_property("width"), Some(40.0));
        assert_eq!(node.rect().width, 40.0);
        assert_eq!(node.visual().opacity, 0.25);
        assert_eq!(node.builtin_property("value"), None);
    }

    #[test]
    fn test_fresh_node_flags() {
        let node = Node::new(HashMap::new());
        assert!(!node.is_mounted());
        assert!(node.needs_update());
        assert_eq!(node.rect(), Rect::ZERO);
        assert_eq!(*node.visual(), Visual::IDENTITY);
    }
}
