//! Basic widgets: container, button, text, and text input.
//!
//! Interactive widgets keep their transient flags (`pressed`, `hovered`,
//! `focused`, `value`) in node state, so every change flags the node for
//! update and is visible to the host through [`ComponentTree::get_state`].

use crate::dispatch::{BLUR, CLICK, FOCUS, MOUSE_ENTER, MOUSE_LEAVE};
use crate::input::{Event, Key};
use crate::render::DrawBackend;
use crate::style::Color;
use crate::value::Value;

use super::core::{Component, ComponentId, Node};
use super::ComponentTree;

/// Default button fill.
const BUTTON_BACKGROUND: Color = Color::rgba(0.2, 0.6, 1.0, 1.0);
/// Default input fill.
const INPUT_BACKGROUND: Color = Color::rgba(0.2, 0.2, 0.2, 1.0);
/// Padding used when the style sets none.
const DEFAULT_PADDING: f32 = 8.0;

/// Click callback for [`Button`].
pub type ClickHandler = Box<dyn FnMut(&mut ComponentTree, ComponentId)>;

/// Registers a node handler from a mount hook, where the node is known to be
/// live.
fn listen<F>(tree: &mut ComponentTree, id: ComponentId, kind: &str, handler: F)
where
    F: FnMut(&mut ComponentTree, ComponentId, &Event) + 'static,
{
    if let Err(err) = tree.add_event_handler(id, kind, handler) {
        tracing::warn!("could not attach {} handler: {}", kind, err);
    }
}

/// Draws a border of `width` just inside `(x, y, w, h)`.
fn draw_border(backend: &mut dyn DrawBackend, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
    backend.draw_rectangle(x, y, w, width, color);
    backend.draw_rectangle(x, y + h - width, w, width, color);
    backend.draw_rectangle(x, y, width, h, color);
    backend.draw_rectangle(x + w - width, y, width, h, color);
}

/// Text from a `text` prop, falling back to the widget's own.
fn text_prop<'a>(node: &'a Node, fallback: &'a str) -> &'a str {
    node.get_prop("text").and_then(Value::as_str).unwrap_or(fallback)
}

/// Box with optional background and border, inset by its margin.
#[derive(Debug, Default, Clone, Copy)]
pub struct Container;

impl Component for Container {
    fn name(&self) -> &'static str {
        "container"
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let style = node.style();
        let margin = style.margin.unwrap_or(0.0);
        let rect = node.rect();
        let (x, y) = (rect.x + margin, rect.y + margin);
        let (w, h) = (rect.width - 2.0 * margin, rect.height - 2.0 * margin);

        if let Some(background) = style.background_color.filter(|c| !c.is_transparent()) {
            backend.draw_rectangle(x, y, w, h, background);
        }
        let border = style.border_width.unwrap_or(0.0);
        if border > 0.0 {
            let color = style.border_color.unwrap_or(Color::TRANSPARENT);
            draw_border(backend, x, y, w, h, border, color);
        }
    }
}

/// Clickable button.
///
/// Shaded darker while pressed and lighter while hovered. The click handler
/// fires on the `click` node event (press and release on the button).
pub struct Button {
    label: String,
    on_click: Option<ClickHandler>,
}

impl Button {
    /// Creates a button with a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
        }
    }

    /// Sets the click handler.
    #[must_use]
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut ComponentTree, ComponentId) + 'static,
    {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl Component for Button {
    fn name(&self) -> &'static str {
        "button"
    }

    fn component_did_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        listen(tree, id, "mouse_down", |tree, id, _| tree.set_state(id, "pressed", true));
        listen(tree, id, "mouse_up", |tree, id, _| tree.set_state(id, "pressed", false));
        listen(tree, id, MOUSE_ENTER, |tree, id, _| tree.set_state(id, "hovered", true));
        listen(tree, id, MOUSE_LEAVE, |tree, id, _| tree.set_state(id, "hovered", false));
        if let Some(mut on_click) = self.on_click.take() {
            listen(tree, id, CLICK, move |tree, id, _| on_click(tree, id));
        }
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let style = node.style();
        let mut color = style.background_color.unwrap_or(BUTTON_BACKGROUND);
        if node.state_flag("pressed") {
            color = color.shade(0.8);
        } else if node.state_flag("hovered") {
            color = color.shade(1.1);
        }

        let rect = node.rect();
        backend.draw_rectangle(rect.x, rect.y, rect.width, rect.height, color);

        let padding = style.padding.unwrap_or(DEFAULT_PADDING);
        let text_color = style.text_color.unwrap_or(Color::WHITE);
        backend.draw_text(text_prop(node, &self.label), rect.x + padding, rect.y + padding, text_color);
    }
}

/// Static text. A `text` prop overrides the constructor text.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
}

impl Text {
    /// Creates a text widget.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Component for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let rect = node.rect();
        let color = node.style().text_color.unwrap_or(Color::WHITE);
        backend.draw_text(text_prop(node, &self.text), rect.x, rect.y, color);
    }
}

/// Single-line text input.
///
/// Typing goes to the `value` state entry while the input has focus (see
/// [`crate::dispatch::PointerDispatcher`]). Backspace removes the last
/// character.
#[derive(Debug, Clone, Default)]
pub struct Input {
    placeholder: String,
}

impl Input {
    /// Creates an empty input showing `placeholder`.
    #[must_use]
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    fn edit(tree: &mut ComponentTree, id: ComponentId, event: &Event) {
        let Event::KeyDown { key, text } = event else {
            return;
        };
        let mut value = tree
            .get_state(id, "value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        match (key, text) {
            (Key::Backspace, _) => {
                value.pop();
            }
            (_, Some(c)) if !c.is_control() => value.push(*c),
            _ => return,
        }
        tree.set_state(id, "value", value);
    }
}

impl Component for Input {
    fn name(&self) -> &'static str {
        "input"
    }

    fn component_did_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        listen(tree, id, FOCUS, |tree, id, _| tree.set_state(id, "focused", true));
        listen(tree, id, BLUR, |tree, id, _| tree.set_state(id, "focused", false));
        listen(tree, id, "key_down", Self::edit);
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let style = node.style();
        let rect = node.rect();
        backend.draw_rectangle(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            style.background_color.unwrap_or(INPUT_BACKGROUND),
        );

        let border = style.border_width.unwrap_or(1.0);
        if border > 0.0 {
            let color = if node.state_flag("focused") {
                Color::ACCENT
            } else {
                style.border_color.unwrap_or(Color::MUTED)
            };
            draw_border(backend, rect.x, rect.y, rect.width, rect.height, border, color);
        }

        let value = node.get_state("value").and_then(Value::as_str).unwrap_or_default();
        let (text, color) = if value.is_empty() {
            (self.placeholder.as_str(), Color::MUTED)
        } else {
            (value, style.text_color.unwrap_or(Color::WHITE))
        };
        let padding = style.padding.unwrap_or(DEFAULT_PADDING);
        backend.draw_text(text, rect.x + padding, rect.y + padding, color);
    }
}
