//! Render traversal and draw backends.
//!
//! The core never touches GPU state. A frame is a depth-first walk of the
//! component tree calling each component's `render` against a [`DrawBackend`].
//! [`CommandRecorder`] is a backend that records the calls and can tessellate
//! them into vertices for a GPU uploader.

use std::f32::consts::TAU;

use crate::layout::Rect;
use crate::style::Color;
use crate::widget::{ComponentId, ComponentTree, Visual};

/// Abstract drawing surface consumed by render traversal.
pub trait DrawBackend {
    /// Fills a rectangle.
    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Fills a circle approximated by `segments` edges.
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, segments: u32);

    /// Draws a text run at the given position.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color);

    /// Clears the surface before a frame. Backends without a clear step ignore it.
    fn clear(&mut self, _color: Color) {}
}

/// Renders `root` and its subtree, parents before children, children in order.
///
/// Later siblings paint over earlier ones. Subtrees whose style has
/// `display: none` are skipped. A node's [`Visual`] opacity and scale apply
/// to its own draw calls, scaled about the center of its layout box; rotation
/// is not applied. Returns the number of components rendered.
pub fn render_tree(tree: &ComponentTree, root: ComponentId, backend: &mut dyn DrawBackend) -> usize {
    let Some(node) = tree.node(root) else {
        tracing::warn!("render_tree called with stale root {}", root);
        return 0;
    };
    if !node.style().is_displayed() {
        return 0;
    }

    let mut rendered = 0;
    if let Some(component) = tree.component(root) {
        let visual = *node.visual();
        if visual == Visual::IDENTITY {
            component.render(node, backend);
        } else {
            let mut transformed = Transformed {
                inner: &mut *backend,
                center: node.rect().center(),
                visual,
            };
            component.render(node, &mut transformed);
        }
        rendered += 1;
    }
    for &child in node.children() {
        rendered += render_tree(tree, child, backend);
    }
    rendered
}

/// Forwards draw calls with a node's opacity and scale applied.
struct Transformed<'a> {
    inner: &'a mut dyn DrawBackend,
    center: (f32, f32),
    visual: Visual,
}

impl Transformed<'_> {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        let (cx, cy) = self.center;
        (cx + (x - cx) * self.visual.scale_x, cy + (y - cy) * self.visual.scale_y)
    }
}

impl DrawBackend for Transformed<'_> {
    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (x, y) = self.point(x, y);
        self.inner.draw_rectangle(
            x,
            y,
            width * self.visual.scale_x,
            height * self.visual.scale_y,
            color.fade(self.visual.opacity),
        );
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, segments: u32) {
        let (cx, cy) = self.point(cx, cy);
        let scale = self.visual.scale_x.abs().min(self.visual.scale_y.abs());
        self.inner
            .draw_circle(cx, cy, radius * scale, color.fade(self.visual.opacity), segments);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        let (x, y) = self.point(x, y);
        self.inner.draw_text(text, x, y, color.fade(self.visual.opacity));
    }

    fn clear(&mut self, color: Color) {
        self.inner.clear(color);
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Filled circle.
    Circle {
        /// Center x.
        cx: f32,
        /// Center y.
        cy: f32,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
        /// Edge count of the approximation.
        segments: u32,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Text color.
        color: Color,
    },
    /// Surface clear.
    Clear {
        /// Clear color.
        color: Color,
    },
}

/// Backend that records every call for later submission or inspection.
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    /// Begins a new frame, dropping last frame's commands.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Tessellates the filled shapes into a triangle list.
    ///
    /// Text and clears produce no geometry.
    #[must_use]
    pub fn tessellate(&self) -> Vec<UIVertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 6);
        for command in &self.commands {
            match command {
                RenderCommand::Rect { bounds, color } => {
                    let c = color.to_array();
                    let (x0, y0, x1, y1) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
                    vertices.extend_from_slice(&[
                        UIVertex::new(x0, y0, 0.0, 0.0, c),
                        UIVertex::new(x1, y0, 1.0, 0.0, c),
                        UIVertex::new(x0, y1, 0.0, 1.0, c),
                        UIVertex::new(x1, y0, 1.0, 0.0, c),
                        UIVertex::new(x1, y1, 1.0, 1.0, c),
                        UIVertex::new(x0, y1, 0.0, 1.0, c),
                    ]);
                }
                RenderCommand::Circle { cx, cy, radius, color, segments } => {
                    let c = color.to_array();
                    let segments = (*segments).max(3);
                    #[allow(clippy::cast_precision_loss)]
                    let step = TAU / segments as f32;
                    for i in 0..segments {
                        #[allow(clippy::cast_precision_loss)]
                        let (a0, a1) = (step * i as f32, step * (i + 1) as f32);
                        vertices.extend_from_slice(&[
                            UIVertex::new(*cx, *cy, 0.5, 0.5, c),
                            UIVertex::new(cx + radius * a0.cos(), cy + radius * a0.sin(), 0.0, 0.0, c),
                            UIVertex::new(cx + radius * a1.cos(), cy + radius * a1.sin(), 0.0, 0.0, c),
                        ]);
                    }
                }
                RenderCommand::Text { .. } | RenderCommand::Clear { .. } => {}
            }
        }
        vertices
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawBackend for CommandRecorder {
    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(RenderCommand::Rect {
            bounds: Rect::new(x, y, width, height),
            color,
        });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, segments: u32) {
        self.commands.push(RenderCommand::Circle { cx, cy, radius, color, segments });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
        });
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear { color });
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}
