//! Arena-backed component tree.
//!
//! Nodes live in slots addressed by generational [`ComponentId`]s. Removing a
//! child only detaches it; [`ComponentTree::destroy`] frees a subtree, after
//! which any handle still pointing into it reports `is_alive() == false`.

use std::collections::HashMap;

use crate::animation::AnimationTargets;
use crate::context::SharedContext;
use crate::error::{TreeError, TreeResult};
use crate::input::Event;
use crate::layout::Rect;
use crate::style::{StyleProperties, StyleResolver};
use crate::value::Value;

use super::core::{Component, ComponentId, EventHandler, HandlerId, Node, Visual};

/// Live node plus its behavior.
struct Entry {
    node: Node,
    /// `None` while one of the component's hooks is running.
    component: Option<Box<dyn Component>>,
}

/// Arena slot.
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Owns every component node of a window.
pub struct ComponentTree {
    slots: Vec<Slot>,
    /// Indices of empty slots.
    free_indices: Vec<u32>,
    resolver: Option<Box<dyn StyleResolver>>,
    next_handler: u64,
    len: usize,
}

impl ComponentTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(256),
            free_indices: Vec::new(),
            resolver: None,
            next_handler: 1,
            len: 0,
        }
    }

    /// Installs the resolver used to turn class strings into styles at mount.
    pub fn set_style_resolver(&mut self, resolver: impl StyleResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    /// Creates a detached node with no props.
    pub fn create(&mut self, component: impl Component + 'static) -> ComponentId {
        self.create_with_props(component, HashMap::new())
    }

    /// Creates a detached node with the given props.
    ///
    /// The node starts unmounted, with a zeroed layout box and
    /// `needs_update` set.
    pub fn create_with_props(
        &mut self,
        component: impl Component + 'static,
        props: HashMap<String, Value>,
    ) -> ComponentId {
        let entry = Entry {
            node: Node::new(props),
            component: Some(Box::new(component)),
        };
        self.len += 1;

        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return ComponentId::new(index, slot.generation);
        }

        #[allow(clippy::cast_possible_truncation)]
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        ComponentId::new(index, 0)
    }

    /// Returns true if the id refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: ComponentId) -> bool {
        self.entry(id).is_some()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Node data.
    #[must_use]
    pub fn node(&self, id: ComponentId) -> Option<&Node> {
        self.entry(id).map(|entry| &entry.node)
    }

    /// The node's behavior. `None` for stale ids and while one of its hooks runs.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.entry(id).and_then(|entry| entry.component.as_deref())
    }

    /// Mutable access to the node's behavior.
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.entry_mut(id).and_then(|entry| entry.component.as_deref_mut())
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id).and_then(Node::parent)
    }

    /// Children of a node, empty for stale ids.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved. The parent is flagged for
    /// update and its context, if any, is pushed down the child's subtree.
    ///
    /// # Errors
    ///
    /// `StaleComponent` if either id is dead, `CycleDetected` if `child` is
    /// `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) -> TreeResult<()> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleComponent(parent));
        }
        if !self.is_alive(child) {
            return Err(TreeError::StaleComponent(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::CycleDetected { parent, child });
        }

        if let Some(old_parent) = self.parent(child) {
            if let Some(node) = self.node_mut(old_parent) {
                node.children.retain(|&c| c != child);
                node.needs_update = true;
            }
        }

        let context = match self.node_mut(parent) {
            Some(node) => {
                node.children.push(child);
                node.needs_update = true;
                node.context.clone()
            }
            None => return Err(TreeError::StaleComponent(parent)),
        };
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(context) = context {
            self.set_context(child, &context);
        }
        Ok(())
    }

    /// Detaches `child` from `parent`.
    ///
    /// Every node of the subtree gets `component_will_unmount`, parents
    /// before children, while still linked. The subtree stays alive as a
    /// detached root: it can be updated or attached again, and keeps its
    /// mounted flag. Use [`ComponentTree::destroy`] to free it.
    ///
    /// # Errors
    ///
    /// `StaleComponent` if either id is dead, `NotAChild` if `child` is not
    /// directly attached to `parent`.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) -> TreeResult<()> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleComponent(parent));
        }
        if !self.is_alive(child) {
            return Err(TreeError::StaleComponent(child));
        }
        if self.parent(child) != Some(parent) {
            tracing::warn!("remove_child: {} is not a child of {}", child, parent);
            return Err(TreeError::NotAChild { parent, child });
        }

        self.unmount_subtree(child);

        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
            node.needs_update = true;
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
        Ok(())
    }

    /// Unmounts and frees a node and its subtree, detaching it first if it
    /// has a parent. Every id in the subtree goes stale.
    ///
    /// # Errors
    ///
    /// `StaleComponent` if the id is dead.
    pub fn destroy(&mut self, id: ComponentId) -> TreeResult<()> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleComponent(id));
        }
        match self.parent(id) {
            Some(parent) => self.remove_child(parent, id)?,
            None => self.unmount_subtree(id),
        }
        self.free_subtree(id);
        Ok(())
    }

    /// Runs one update pass over `id` and its subtree.
    ///
    /// The first pass ever on a node resolves its classes, runs
    /// `component_did_mount` and marks it mounted. Every pass then asks
    /// `should_component_update`; if it holds, `component_did_update` runs and
    /// `needs_update` is cleared. Children are updated afterwards, in order,
    /// whether or not the parent did any work.
    pub fn update(&mut self, id: ComponentId) {
        let Some(node) = self.node(id) else {
            tracing::warn!("update on stale component {}", id);
            return;
        };

        if !node.mounted {
            self.apply_styles(id);
            self.run_hook(id, |component, tree| component.component_did_mount(tree, id));
            if let Some(node) = self.node_mut(id) {
                node.mounted = true;
            }
            tracing::debug!("mounted {}", id);
        }

        let should_update = match self.entry(id) {
            Some(entry) => entry
                .component
                .as_ref()
                .map_or(entry.node.needs_update, |c| c.should_component_update(&entry.node)),
            None => return,
        };
        if should_update {
            self.run_hook(id, |component, tree| component.component_did_update(tree, id));
            if let Some(node) = self.node_mut(id) {
                node.needs_update = false;
            }
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.update(child);
        }
    }

    /// Re-runs the node's `layout_children`.
    ///
    /// Layout containers arrange their children once, at mount. Call this
    /// after changing a mounted container's child list or box.
    pub fn relayout(&mut self, id: ComponentId) {
        if self.run_hook(id, |component, tree| component.layout_children(tree, id)).is_none() {
            tracing::warn!("relayout on stale component {}", id);
        }
    }

    /// Sets a state entry and flags the node for update, even if the value
    /// is unchanged.
    pub fn set_state(&mut self, id: ComponentId, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(node) = self.live_node_mut(id, "set_state") {
            node.state.insert(key.into(), value.into());
            node.needs_update = true;
        }
    }

    /// Reads a state entry.
    #[must_use]
    pub fn get_state(&self, id: ComponentId, key: &str) -> Option<&Value> {
        self.node(id).and_then(|node| node.get_state(key))
    }

    /// Sets a prop and flags the node for update, even if the value is
    /// unchanged.
    pub fn set_prop(&mut self, id: ComponentId, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(node) = self.live_node_mut(id, "set_prop") {
            node.props.insert(key.into(), value.into());
            node.needs_update = true;
        }
    }

    /// Reads a prop.
    #[must_use]
    pub fn get_prop(&self, id: ComponentId, key: &str) -> Option<&Value> {
        self.node(id).and_then(|node| node.get_prop(key))
    }

    /// Moves the layout box.
    pub fn set_position(&mut self, id: ComponentId, x: f32, y: f32) {
        if let Some(node) = self.live_node_mut(id, "set_position") {
            node.rect.x = x;
            node.rect.y = y;
        }
    }

    /// Resizes the layout box.
    pub fn set_size(&mut self, id: ComponentId, width: f32, height: f32) {
        if let Some(node) = self.live_node_mut(id, "set_size") {
            node.rect.width = width;
            node.rect.height = height;
        }
    }

    /// Replaces the layout box.
    pub fn set_bounds(&mut self, id: ComponentId, rect: Rect) {
        if let Some(node) = self.live_node_mut(id, "set_bounds") {
            node.rect = rect;
        }
    }

    /// Layout box, `None` for stale ids.
    #[must_use]
    pub fn bounds(&self, id: ComponentId) -> Option<Rect> {
        self.node(id).map(Node::rect)
    }

    /// True if the point is inside the node's box, edges included.
    #[must_use]
    pub fn contains_point(&self, id: ComponentId, x: f32, y: f32) -> bool {
        self.node(id).is_some_and(|node| node.contains_point(x, y))
    }

    /// Sets the style class string. Takes effect when the node mounts.
    pub fn set_classes(&mut self, id: ComponentId, classes: impl Into<String>) {
        if let Some(node) = self.live_node_mut(id, "set_classes") {
            node.classes = classes.into();
        }
    }

    /// Replaces the explicit style.
    pub fn set_style(&mut self, id: ComponentId, style: StyleProperties) {
        if let Some(node) = self.live_node_mut(id, "set_style") {
            node.style = style;
            node.needs_update = true;
        }
    }

    /// Replaces the visual transform.
    pub fn set_visual(&mut self, id: ComponentId, visual: Visual) {
        if let Some(node) = self.live_node_mut(id, "set_visual") {
            node.visual = visual;
        }
    }

    /// Gives the node and every node below it the context.
    pub fn set_context(&mut self, id: ComponentId, context: &SharedContext) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.context = Some(SharedContext::clone(context));
        let children = node.children.clone();
        for child in children {
            self.set_context(child, context);
        }
    }

    /// The node's context handle.
    #[must_use]
    pub fn context(&self, id: ComponentId) -> Option<SharedContext> {
        self.node(id).and_then(|node| node.context().cloned())
    }

    /// Registers a handler for an event kind on a node.
    ///
    /// # Errors
    ///
    /// `StaleComponent` if the node is dead.
    pub fn add_event_handler<F>(
        &mut self,
        id: ComponentId,
        kind: impl Into<String>,
        handler: F,
    ) -> TreeResult<HandlerId>
    where
        F: FnMut(&mut ComponentTree, ComponentId, &Event) + 'static,
    {
        let handler_id = HandlerId(self.next_handler);
        let node = self.node_mut(id).ok_or(TreeError::StaleComponent(id))?;
        let boxed: EventHandler = Box::new(handler);
        node.handlers
            .entry(kind.into())
            .or_default()
            .push((handler_id, Some(boxed)));
        self.next_handler += 1;
        Ok(handler_id)
    }

    /// Removes a handler. Returns false if the node or handler is gone.
    pub fn remove_event_handler(&mut self, id: ComponentId, handler: HandlerId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        for list in node.handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(hid, _)| *hid == handler) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Invokes the node's handlers for `kind` in registration order.
    ///
    /// Handlers registered during the call run from the next trigger on;
    /// handlers removed during the call are skipped. Returns how many ran.
    pub fn trigger_event(&mut self, id: ComponentId, kind: &str, event: &Event) -> usize {
        let handler_ids: Vec<HandlerId> = match self.node(id).and_then(|node| node.handlers.get(kind)) {
            Some(list) => list.iter().map(|(hid, _)| *hid).collect(),
            None => return 0,
        };

        let mut ran = 0;
        for handler_id in handler_ids {
            let Some(mut handler) = self.handler_slot(id, kind, handler_id).and_then(Option::take) else {
                continue;
            };
            handler(self, id, event);
            ran += 1;
            if let Some(slot) = self.handler_slot(id, kind, handler_id) {
                *slot = Some(handler);
            }
        }
        ran
    }

    /// Topmost node under the point in `root`'s subtree.
    ///
    /// Topmost means last in paint order; hidden subtrees are skipped.
    #[must_use]
    pub fn hit_test(&self, root: ComponentId, x: f32, y: f32) -> Option<ComponentId> {
        let node = self.node(root)?;
        if !node.style().is_displayed() {
            return None;
        }
        for &child in node.children().iter().rev() {
            if let Some(hit) = self.hit_test(child, x, y) {
                return Some(hit);
            }
        }
        node.contains_point(x, y).then_some(root)
    }

    /// Iterates `root` and its subtree depth-first, parents first.
    pub fn iter_dfs(&self, root: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        ComponentDfsIterator {
            tree: self,
            stack: if self.is_alive(root) { vec![root] } else { Vec::new() },
        }
    }

    fn entry(&self, id: ComponentId) -> Option<&Entry> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: ComponentId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entry.as_mut()
    }

    pub(crate) fn node_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.entry_mut(id).map(|entry| &mut entry.node)
    }

    fn live_node_mut(&mut self, id: ComponentId, op: &str) -> Option<&mut Node> {
        let node = self.node_mut(id);
        if node.is_none() {
            tracing::warn!("{} on stale component {}", op, id);
        }
        node
    }

    fn handler_slot(&mut self, id: ComponentId, kind: &str, handler: HandlerId) -> Option<&mut Option<EventHandler>> {
        self.node_mut(id)?
            .handlers
            .get_mut(kind)?
            .iter_mut()
            .find(|(hid, _)| *hid == handler)
            .map(|(_, slot)| slot)
    }

    /// Detaches the component, runs `f`, and puts it back if the node survived.
    fn run_hook<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Component, &mut Self) -> R,
    ) -> Option<R> {
        let mut component = self.entry_mut(id)?.component.take()?;
        let result = f(component.as_mut(), self);
        if let Some(entry) = self.entry_mut(id) {
            entry.component = Some(component);
        }
        Some(result)
    }

    fn apply_styles(&mut self, id: ComponentId) {
        let Some(resolver) = self.resolver.as_ref() else {
            return;
        };
        let Some(node) = self.node(id) else {
            return;
        };
        if node.classes.is_empty() {
            return;
        }
        let resolved = resolver.resolve(&node.classes);
        if let Some(node) = self.node_mut(id) {
            node.style = resolved.merge(&node.style);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: ComponentId, mut id: ComponentId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn unmount_subtree(&mut self, root: ComponentId) {
        let ids: Vec<ComponentId> = self.iter_dfs(root).collect();
        for id in ids {
            self.run_hook(id, |component, tree| component.component_will_unmount(tree, id));
            tracing::debug!("unmounted {}", id);
        }
    }

    fn free_subtree(&mut self, root: ComponentId) {
        let ids: Vec<ComponentId> = self.iter_dfs(root).collect();
        for id in ids {
            let slot = &mut self.slots[id.index() as usize];
            slot.entry = None;
            // Increment generation to invalidate old handles
            slot.generation = slot.generation.wrapping_add(1);
            self.free_indices.push(id.index());
            self.len -= 1;
        }
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationTargets for ComponentTree {
    fn is_alive(&self, target: ComponentId) -> bool {
        ComponentTree::is_alive(self, target)
    }

    fn get_property(&self, target: ComponentId, property: &str) -> Option<f32> {
        let entry = self.entry(target)?;
        entry
            .node
            .builtin_property(property)
            .or_else(|| entry.component.as_ref().and_then(|c| c.property(property)))
    }

    fn set_property(&mut self, target: ComponentId, property: &str, value: f32) -> bool {
        let Some(entry) = self.entry_mut(target) else {
            return false;
        };
        if entry.node.set_builtin_property(property, value) {
            return true;
        }
        entry
            .component
            .as_mut()
            .is_some_and(|c| c.set_property(property, value))
    }
}

/// Depth-first iterator over a subtree.
struct ComponentDfsIterator<'a> {
    tree: &'a ComponentTree,
    stack: Vec<ComponentId>,
}

impl Iterator for ComponentDfsIterator<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order so they're processed in order
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::context::Context;
    use crate::render::DrawBackend;
    use crate::style::{ClassTable, Color};

    #[derive(Default)]
    struct Counts {
        mounts: usize,
        updates: usize,
        unmounts: Vec<ComponentId>,
    }

    struct Counted(Rc<RefCell<Counts>>);

    impl Component for Counted {
        fn render(&self, _node: &Node, _backend: &mut dyn DrawBackend) {}

        fn component_did_mount(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
            self.0.borrow_mut().mounts += 1;
        }

        fn component_did_update(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
            self.0.borrow_mut().updates += 1;
        }

        fn component_will_unmount(&mut self, _tree: &mut ComponentTree, id: ComponentId) {
            self.0.borrow_mut().unmounts.push(id);
        }
    }

    fn counted(tree: &mut ComponentTree) -> (ComponentId, Rc<RefCell<Counts>>) {
        let counts = Rc::new(RefCell::new(Counts::default()));
        (tree.create(Counted(Rc::clone(&counts))), counts)
    }

    #[test]
    fn test_mount_runs_once() {
        let mut tree = ComponentTree::new();
        let (id, counts) = counted(&mut tree);

        for _ in 0..5 {
            tree.update(id);
        }

        assert_eq!(counts.borrow().mounts, 1);
        assert_eq!(counts.borrow().updates, 1);
        assert!(tree.node(id).is_some_and(Node::is_mounted));
    }

    #[test]
    fn test_set_state_forces_one_update() {
        let mut tree = ComponentTree::new();
        let (id, counts) = counted(&mut tree);
        tree.update(id);
        assert!(!tree.node(id).is_some_and(Node::needs_update));

        tree.set_state(id, "count", 1);
        tree.update(id);
        assert_eq!(counts.borrow().updates, 2);

        tree.update(id);
        assert_eq!(counts.borrow().updates, 2);

        // Same value still flags.
        tree.set_state(id, "count", 1);
        assert!(tree.node(id).is_some_and(Node::needs_update));
    }

    #[test]
    fn test_children_update_when_parent_skips() {
        let mut tree = ComponentTree::new();
        let (parent, _) = counted(&mut tree);
        let (child, child_counts) = counted(&mut tree);
        tree.add_child(parent, child).unwrap();
        tree.update(parent);

        tree.set_prop(child, "label", "x");
        tree.update(parent);
        assert_eq!(child_counts.borrow().updates, 2);
    }

    #[test]
    fn test_add_child_propagates_context() {
        let mut tree = ComponentTree::new();
        let (root, _) = counted(&mut tree);
        let (mid, _) = counted(&mut tree);
        let (leaf, _) = counted(&mut tree);
        tree.add_child(mid, leaf).unwrap();

        let ctx = Context::new().shared();
        tree.set_context(root, &ctx);
        tree.update(root);
        assert!(!tree.node(root).is_some_and(Node::needs_update));

        tree.add_child(root, mid).unwrap();
        assert!(tree.node(root).is_some_and(Node::needs_update));
        let leaf_ctx = tree.context(leaf).unwrap();
        assert!(std::sync::Arc::ptr_eq(&leaf_ctx, &ctx));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = ComponentTree::new();
        let (a, _) = counted(&mut tree);
        let (b, _) = counted(&mut tree);
        tree.add_child(a, b).unwrap();

        assert_eq!(tree.add_child(b, a), Err(TreeError::CycleDetected { parent: b, child: a }));
        assert!(matches!(tree.add_child(a, a), Err(TreeError::CycleDetected { .. })));
    }

    #[test]
    fn test_reparent_moves_child() {
        let mut tree = ComponentTree::new();
        let (a, _) = counted(&mut tree);
        let (b, _) = counted(&mut tree);
        let (c, _) = counted(&mut tree);
        tree.add_child(a, c).unwrap();
        tree.add_child(b, c).unwrap();

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[c]);
        assert_eq!(tree.parent(c), Some(b));
    }

    #[test]
    fn test_remove_child_unmounts_subtree() {
        let mut tree = ComponentTree::new();
        let (root, _) = counted(&mut tree);
        let (child, counts) = counted(&mut tree);
        let (grandchild, grand_counts) = counted(&mut tree);
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();
        tree.update(root);

        tree.remove_child(root, child).unwrap();

        assert_eq!(counts.borrow().unmounts, vec![child]);
        assert_eq!(grand_counts.borrow().unmounts, vec![grandchild]);
        assert!(tree.is_alive(child));
        assert!(tree.is_alive(grandchild));
        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.children(child), &[grandchild]);
        assert!(tree.children(root).is_empty());
        assert!(tree.node(root).is_some_and(Node::needs_update));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_removed_child_updates_and_reattaches() {
        let mut tree = ComponentTree::new();
        let (root, _) = counted(&mut tree);
        let (other, _) = counted(&mut tree);
        let (child, counts) = counted(&mut tree);
        tree.add_child(root, child).unwrap();
        tree.update(root);
        tree.remove_child(root, child).unwrap();

        tree.set_state(child, "count", 2.0);
        tree.update(child);
        assert_eq!(counts.borrow().mounts, 1);
        assert_eq!(counts.borrow().updates, 2);

        tree.add_child(other, child).unwrap();
        assert_eq!(tree.parent(child), Some(other));
        tree.update(other);
        assert_eq!(counts.borrow().mounts, 1);
    }

    #[test]
    fn test_destroy_attached_frees_subtree() {
        let mut tree = ComponentTree::new();
        let (root, _) = counted(&mut tree);
        let (child, counts) = counted(&mut tree);
        let (grandchild, _) = counted(&mut tree);
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        tree.destroy(child).unwrap();
        assert_eq!(counts.borrow().unmounts, vec![child]);
        assert!(!tree.is_alive(child));
        assert!(!tree.is_alive(grandchild));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_non_child() {
        let mut tree = ComponentTree::new();
        let (a, _) = counted(&mut tree);
        let (b, counts) = counted(&mut tree);

        assert_eq!(tree.remove_child(a, b), Err(TreeError::NotAChild { parent: a, child: b }));
        assert!(tree.is_alive(b));
        assert!(counts.borrow().unmounts.is_empty());
    }

    #[test]
    fn test_slot_reuse_invalidates_old_id() {
        let mut tree = ComponentTree::new();
        let (old, _) = counted(&mut tree);
        tree.destroy(old).unwrap();
        let (new, _) = counted(&mut tree);

        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(!tree.is_alive(old));
        assert!(tree.node(old).is_none());
        assert_eq!(tree.destroy(old), Err(TreeError::StaleComponent(old)));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let mut tree = ComponentTree::new();
        let (id, _) = counted(&mut tree);
        tree.set_position(id, 10.0, 10.0);
        tree.set_size(id, 20.0, 20.0);

        assert!(tree.contains_point(id, 10.0, 10.0));
        assert!(tree.contains_point(id, 30.0, 30.0));
        assert!(!tree.contains_point(id, 30.1, 30.0));
    }

    #[test]
    fn test_event_handlers_in_order() {
        let mut tree = ComponentTree::new();
        let (id, _) = counted(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        tree.add_event_handler(id, "click", move |_, _, _| l1.borrow_mut().push(1)).unwrap();
        let l2 = Rc::clone(&log);
        let second = tree
            .add_event_handler(id, "click", move |_, _, _| l2.borrow_mut().push(2))
            .unwrap();

        assert_eq!(tree.trigger_event(id, "click", &Event::Quit), 2);
        assert_eq!(*log.borrow(), vec![1, 2]);

        assert!(tree.remove_event_handler(id, second));
        assert_eq!(tree.trigger_event(id, "click", &Event::Quit), 1);
        assert_eq!(tree.trigger_event(id, "hover", &Event::Quit), 0);
    }

    #[test]
    fn test_handler_can_mutate_its_node() {
        let mut tree = ComponentTree::new();
        let (id, _) = counted(&mut tree);
        tree.add_event_handler(id, "click", |tree, id, _| {
            let clicks = tree.get_state(id, "clicks").and_then(Value::as_f64).unwrap_or(0.0);
            tree.set_state(id, "clicks", clicks + 1.0);
        })
        .unwrap();

        tree.trigger_event(id, "click", &Event::Quit);
        tree.trigger_event(id, "click", &Event::Quit);
        assert_eq!(tree.get_state(id, "clicks"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_hit_test_picks_topmost() {
        let mut tree = ComponentTree::new();
        let (root, _) = counted(&mut tree);
        let (under, _) = counted(&mut tree);
        let (over, _) = counted(&mut tree);
        tree.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.set_bounds(under, Rect::new(0.0, 0.0, 50.0, 50.0));
        tree.set_bounds(over, Rect::new(25.0, 25.0, 50.0, 50.0));
        tree.add_child(root, under).unwrap();
        tree.add_child(root, over).unwrap();

        assert_eq!(tree.hit_test(root, 30.0, 30.0), Some(over));
        assert_eq!(tree.hit_test(root, 10.0, 10.0), Some(under));
        assert_eq!(tree.hit_test(root, 90.0, 10.0), Some(root));
        assert_eq!(tree.hit_test(root, 200.0, 10.0), None);

        tree.set_style(
            over,
            StyleProperties {
                display: Some("none".into()),
                ..Default::default()
            },
        );
        assert_eq!(tree.hit_test(root, 30.0, 30.0), Some(under));
    }

    #[test]
    fn test_classes_resolved_at_mount() {
        let mut tree = ComponentTree::new();
        tree.set_style_resolver(ClassTable::new().with(
            "card",
            StyleProperties {
                background_color: Some(Color::BLACK),
                padding: Some(16.0),
                ..Default::default()
            },
        ));
        let (id, _) = counted(&mut tree);
        tree.set_classes(id, "card");
        tree.set_style(
            id,
            StyleProperties {
                padding: Some(4.0),
                ..Default::default()
            },
        );

        tree.update(id);
        let style = tree.node(id).unwrap().style();
        assert_eq!(style.background_color, Some(Color::BLACK));
        assert_eq!(style.padding, Some(4.0));
    }

    #[test]
    fn test_animation_targets_properties() {
        let mut tree = ComponentTree::new();
        let (id, _) = counted(&mut tree);

        assert!(AnimationTargets::set_property(&mut tree, id, "opacity", 0.5));
        assert_eq!(AnimationTargets::get_property(&tree, id, "opacity"), Some(0.5));
        assert!(!AnimationTargets::set_property(&mut tree, id, "nonexistent", 1.0));
        assert_eq!(AnimationTargets::get_property(&tree, id, "nonexistent"), None);
    }

    #[test]
    fn test_dfs_order() {
        let mut tree = ComponentTree::new();
        let (root, _) = counted(&mut tree);
        let (a, _) = counted(&mut tree);
        let (a1, _) = counted(&mut tree);
        let (b, _) = counted(&mut tree);
        tree.add_child(root, a).unwrap();
        tree.add_child(a, a1).unwrap();
        tree.add_child(root, b).unwrap();

        let order: Vec<_> = tree.iter_dfs(root).collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }
}
