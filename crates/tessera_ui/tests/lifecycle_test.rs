//! # Component Lifecycle Integration Test
//!
//! Mount runs once, unmount runs on removal, removed nodes stay usable until
//! destroyed, and context reaches late children.

use std::cell::RefCell;
use std::rc::Rc;

use tessera_ui::style::StyleResolver;
use tessera_ui::{
    ClassTable, Color, Component, ComponentId, ComponentTree, Context, DrawBackend, Node, StyleProperties, TreeError,
};

type Journal = Rc<RefCell<Vec<String>>>;

/// Records every hook it sees.
struct Journaled {
    label: &'static str,
    journal: Journal,
}

impl Journaled {
    fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: Rc::clone(journal),
        }
    }

    fn log(&self, hook: &str) {
        self.journal.borrow_mut().push(format!("{}:{hook}", self.label));
    }
}

impl Component for Journaled {
    fn render(&self, _node: &Node, _backend: &mut dyn DrawBackend) {}

    fn component_did_mount(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
        self.log("mount");
    }

    fn component_did_update(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
        self.log("update");
    }

    fn component_will_unmount(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {
        self.log("unmount");
    }
}

fn take(journal: &Journal) -> Vec<String> {
    std::mem::take(&mut *journal.borrow_mut())
}

#[test]
fn test_mount_once_update_when_flagged() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let root = tree.create(Journaled::new("root", &journal));
    let child = tree.create(Journaled::new("child", &journal));
    tree.add_child(root, child).unwrap();

    tree.update(root);
    assert_eq!(take(&journal), ["root:mount", "root:update", "child:mount", "child:update"]);

    // Nothing flagged: no hooks.
    tree.update(root);
    assert!(take(&journal).is_empty());

    tree.set_state(child, "count", 1.0);
    tree.update(root);
    assert_eq!(take(&journal), ["child:update"]);
}

#[test]
fn test_remove_child_unmounts_subtree() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let root = tree.create(Journaled::new("root", &journal));
    let panel = tree.create(Journaled::new("panel", &journal));
    let leaf = tree.create(Journaled::new("leaf", &journal));
    tree.add_child(root, panel).unwrap();
    tree.add_child(panel, leaf).unwrap();
    tree.update(root);
    take(&journal);

    tree.remove_child(root, panel).unwrap();
    assert_eq!(take(&journal), ["panel:unmount", "leaf:unmount"]);
    assert!(tree.children(root).is_empty());
    assert!(tree.is_alive(panel));
    assert!(tree.is_alive(leaf));
    assert_eq!(tree.parent(panel), None);
    assert_eq!(tree.children(panel), &[leaf]);

    assert_eq!(
        tree.remove_child(root, panel),
        Err(TreeError::NotAChild { parent: root, child: panel })
    );
}

#[test]
fn test_removed_node_stays_alive_and_updates() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let root = tree.create(Journaled::new("root", &journal));
    let panel = tree.create(Journaled::new("panel", &journal));
    tree.add_child(root, panel).unwrap();
    tree.update(root);
    tree.remove_child(root, panel).unwrap();
    take(&journal);

    tree.set_state(panel, "count", 2.0);
    assert_eq!(tree.node(panel).unwrap().get_state("count").and_then(|v| v.as_f64()), Some(2.0));
    tree.update(panel);
    assert_eq!(take(&journal), ["panel:update"]);
    assert!(tree.node(panel).unwrap().is_mounted());

    // The old parent no longer reaches it.
    tree.set_state(panel, "count", 3.0);
    tree.update(root);
    assert_eq!(take(&journal), ["root:update"]);
}

#[test]
fn test_removed_node_can_be_reparented() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let left = tree.create(Journaled::new("left", &journal));
    let right = tree.create(Journaled::new("right", &journal));
    let panel = tree.create(Journaled::new("panel", &journal));
    let leaf = tree.create(Journaled::new("leaf", &journal));
    tree.add_child(left, panel).unwrap();
    tree.add_child(panel, leaf).unwrap();
    tree.update(left);
    tree.update(right);
    tree.remove_child(left, panel).unwrap();
    take(&journal);

    let context = Context::new().shared();
    context.write().set_data("locale", "fr");
    tree.set_context(right, &context);

    tree.add_child(right, panel).unwrap();
    assert_eq!(tree.parent(panel), Some(right));
    assert_eq!(tree.children(right), &[panel]);
    let seen = tree.context(leaf).unwrap();
    assert_eq!(seen.read().get_data("locale").and_then(|v| v.as_str()), Some("fr"));

    // Already mounted: moving does not mount again.
    tree.set_state(leaf, "moved", true);
    tree.update(right);
    assert_eq!(take(&journal), ["right:update", "leaf:update"]);
}

#[test]
fn test_destroy_frees_ids() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let root = tree.create(Journaled::new("root", &journal));
    let panel = tree.create(Journaled::new("panel", &journal));
    let leaf = tree.create(Journaled::new("leaf", &journal));
    tree.add_child(root, panel).unwrap();
    tree.add_child(panel, leaf).unwrap();
    tree.update(root);
    take(&journal);

    tree.destroy(panel).unwrap();
    assert_eq!(take(&journal), ["panel:unmount", "leaf:unmount"]);
    assert!(!tree.is_alive(panel));
    assert!(!tree.is_alive(leaf));
    assert!(tree.children(root).is_empty());

    assert_eq!(tree.remove_child(root, panel), Err(TreeError::StaleComponent(panel)));
    assert_eq!(tree.destroy(panel), Err(TreeError::StaleComponent(panel)));
    let reused = tree.create(Journaled::new("reused", &journal));
    assert_ne!(reused, panel);
    assert!(!tree.is_alive(panel));
}

#[test]
fn test_structure_errors() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let a = tree.create(Journaled::new("a", &journal));
    let b = tree.create(Journaled::new("b", &journal));
    tree.add_child(a, b).unwrap();

    assert_eq!(tree.add_child(b, a), Err(TreeError::CycleDetected { parent: b, child: a }));
    assert_eq!(tree.add_child(a, a), Err(TreeError::CycleDetected { parent: a, child: a }));
    assert_eq!(tree.remove_child(b, a), Err(TreeError::NotAChild { parent: b, child: a }));
}

#[test]
fn test_context_reaches_existing_and_late_children() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let root = tree.create(Journaled::new("root", &journal));
    let panel = tree.create(Journaled::new("panel", &journal));
    let leaf = tree.create(Journaled::new("leaf", &journal));
    tree.add_child(panel, leaf).unwrap();

    let context = Context::new().shared();
    context.write().set_data("locale", "en");
    tree.set_context(root, &context);

    tree.add_child(root, panel).unwrap();
    let seen = tree.context(leaf).unwrap();
    assert_eq!(seen.read().get_data("locale").and_then(|v| v.as_str()), Some("en"));

    let late = tree.create(Journaled::new("late", &journal));
    tree.add_child(leaf, late).unwrap();
    assert!(tree.context(late).is_some());
}

#[test]
fn test_classes_resolve_at_mount_with_explicit_override() {
    let journal = Journal::default();
    let mut tree = ComponentTree::new();
    let classes = ClassTable::new()
        .with(
            "panel",
            StyleProperties {
                background_color: Some(Color::BLACK),
                padding: Some(4.0),
                ..StyleProperties::default()
            },
        )
        .with(
            "roomy",
            StyleProperties {
                padding: Some(16.0),
                ..StyleProperties::default()
            },
        );
    assert_eq!(classes.resolve("panel roomy unknown").padding, Some(16.0));
    tree.set_style_resolver(classes);

    let id = tree.create(Journaled::new("styled", &journal));
    tree.set_classes(id, "panel roomy");
    tree.set_style(
        id,
        StyleProperties {
            background_color: Some(Color::WHITE),
            ..StyleProperties::default()
        },
    );
    tree.update(id);

    let style = tree.node(id).unwrap().style();
    assert_eq!(style.background_color, Some(Color::WHITE));
    assert_eq!(style.padding, Some(16.0));
}
