//! Layout containers: [`Row`], [`Column`], [`Stack`], [`Grid`].
//!
//! Containers draw nothing. They arrange their children once, when they
//! mount; after changing a mounted container's children or box, call
//! [`ComponentTree::relayout`].
//!
//! Configuration comes from the builder, and the node's props override it
//! when present: `gap`, `padding`, `justify_content`, `align_items`,
//! `columns`, `rows`, `column_gap`, `row_gap`.

use crate::layout::{Alignment, FlexLayout, GridLayout, Justify, Rect, StackLayout};
use crate::render::DrawBackend;
use crate::value::Value;

use super::core::{Component, ComponentId, Node};
use super::ComponentTree;

/// Feeds the children's current boxes through `arrange` and writes back the
/// result.
fn arrange_children(tree: &mut ComponentTree, id: ComponentId, arrange: impl FnOnce(Rect, &[Rect]) -> Vec<Rect>) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let bounds = node.rect();
    let children = node.children().to_vec();
    if children.is_empty() {
        return;
    }

    let boxes: Vec<Rect> = children
        .iter()
        .map(|&child| tree.bounds(child).unwrap_or_default())
        .collect();
    let placed = arrange(bounds, &boxes);
    for (&child, rect) in children.iter().zip(placed) {
        tree.set_bounds(child, rect);
    }
    tracing::debug!("laid out {} children of {}", children.len(), id);
}

fn prop_f32(node: &Node, key: &str) -> Option<f32> {
    node.get_prop(key).and_then(Value::as_f32)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn prop_usize(node: &Node, key: &str) -> Option<usize> {
    node.get_prop(key)
        .and_then(Value::as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
}

fn prop_name<'a>(node: &'a Node, key: &str) -> Option<&'a str> {
    node.get_prop(key).and_then(Value::as_str)
}

/// Applies flex props over a base configuration.
fn flex_from_props(mut layout: FlexLayout, node: &Node) -> FlexLayout {
    if let Some(gap) = prop_f32(node, "gap") {
        layout.gap = gap;
    }
    if let Some(padding) = prop_f32(node, "padding") {
        layout.padding = padding;
    }
    if let Some(name) = prop_name(node, "justify_content") {
        layout.justify = Justify::from_name(name);
    }
    if let Some(name) = prop_name(node, "align_items") {
        layout.align = Alignment::from_name(name);
    }
    layout
}

macro_rules! flex_container {
    ($(#[$doc:meta])* $name:ident, $ctor:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            layout: FlexLayout,
        }

        impl $name {
            /// Creates the container with no gap, start justification and
            /// start alignment.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    layout: FlexLayout::$ctor(),
                }
            }

            /// Sets the gap between children.
            #[must_use]
            pub fn gap(mut self, gap: f32) -> Self {
                self.layout.gap = gap;
                self
            }

            /// Sets the main-axis distribution.
            #[must_use]
            pub fn justify(mut self, justify: Justify) -> Self {
                self.layout.justify = justify;
                self
            }

            /// Sets the cross-axis alignment.
            #[must_use]
            pub fn align(mut self, align: Alignment) -> Self {
                self.layout.align = align;
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Component for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn render(&self, _node: &Node, _backend: &mut dyn DrawBackend) {}

            fn component_did_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
                self.layout_children(tree, id);
            }

            fn layout_children(&mut self, tree: &mut ComponentTree, id: ComponentId) {
                let Some(layout) = tree.node(id).map(|node| flex_from_props(self.layout, node)) else {
                    return;
                };
                arrange_children(tree, id, |bounds, boxes| layout.arrange(bounds, boxes));
            }
        }
    };
}

flex_container!(
    /// Lays children out left to right.
    Row,
    row,
    "row"
);

flex_container!(
    /// Lays children out top to bottom.
    Column,
    column,
    "column"
);

/// Aligns every child against the same box. Later children paint on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    layout: StackLayout,
}

impl Stack {
    /// Creates a stack that centers its children.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout: StackLayout::new(Alignment::Center),
        }
    }

    /// Sets the alignment.
    #[must_use]
    pub fn align(mut self, align: Alignment) -> Self {
        self.layout.align = align;
        self
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Stack {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn render(&self, _node: &Node, _backend: &mut dyn DrawBackend) {}

    fn component_did_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        self.layout_children(tree, id);
    }

    fn layout_children(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        let mut layout = self.layout;
        if let Some(name) = tree.node(id).and_then(|node| prop_name(node, "align_items")) {
            layout.align = Alignment::from_name(name);
        }
        arrange_children(tree, id, |bounds, boxes| layout.arrange(bounds, boxes));
    }
}

/// Fixed-column grid, filled row by row. Each child gets exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Grid {
    layout: GridLayout,
}

impl Grid {
    /// Creates a grid with `columns` columns and as many rows as needed.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            layout: GridLayout::new(columns),
        }
    }

    /// Sets both gaps.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.layout = self.layout.with_gap(gap);
        self
    }

    /// Fixes the row count.
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.layout = self.layout.with_rows(rows);
        self
    }

    fn from_props(mut layout: GridLayout, node: &Node) -> GridLayout {
        if let Some(columns) = prop_usize(node, "columns") {
            layout.columns = columns.max(1);
        }
        if let Some(rows) = prop_usize(node, "rows") {
            layout.rows = Some(rows);
        }
        if let Some(gap) = prop_f32(node, "gap") {
            layout = layout.with_gap(gap);
        }
        if let Some(gap) = prop_f32(node, "column_gap") {
            layout.column_gap = gap;
        }
        if let Some(gap) = prop_f32(node, "row_gap") {
            layout.row_gap = gap;
        }
        layout
    }
}

impl Component for Grid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn render(&self, _node: &Node, _backend: &mut dyn DrawBackend) {}

    fn component_did_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        self.layout_children(tree, id);
    }

    fn layout_children(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        let Some(layout) = tree.node(id).map(|node| Self::from_props(self.layout, node)) else {
            return;
        };
        arrange_children(tree, id, |bounds, boxes| layout.arrange(bounds, boxes));
    }
}
