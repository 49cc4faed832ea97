//! Display widgets: divider, card, badge, progress bar.

use crate::layout::Direction;
use crate::render::DrawBackend;
use crate::style::Color;

use super::core::{Component, Node};

/// Thin line centered in its box.
#[derive(Debug, Clone, Copy)]
pub struct Divider {
    /// Line direction.
    pub orientation: Direction,
    /// Line thickness.
    pub thickness: f32,
    /// Line color.
    pub color: Color,
    /// Inset from both ends.
    pub margin: f32,
}

impl Default for Divider {
    fn default() -> Self {
        Self {
            orientation: Direction::Horizontal,
            thickness: 1.0,
            color: Color::MUTED,
            margin: 0.0,
        }
    }
}

impl Divider {
    /// Horizontal divider.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Vertical divider.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            orientation: Direction::Vertical,
            ..Self::default()
        }
    }
}

impl Component for Divider {
    fn name(&self) -> &'static str {
        "divider"
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let rect = node.rect();
        match self.orientation {
            Direction::Horizontal => backend.draw_rectangle(
                rect.x + self.margin,
                rect.y + ((rect.height - self.thickness) / 2.0).floor(),
                rect.width - 2.0 * self.margin,
                self.thickness,
                self.color,
            ),
            Direction::Vertical => backend.draw_rectangle(
                rect.x + ((rect.width - self.thickness) / 2.0).floor(),
                rect.y + self.margin,
                self.thickness,
                rect.height - 2.0 * self.margin,
                self.color,
            ),
        }
    }
}

/// Panel with a drop shadow.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    /// Fill, unless the style sets a background.
    pub background: Color,
    /// Shadow fill.
    pub shadow_color: Color,
    /// Shadow offset from the card.
    pub shadow_offset: (f32, f32),
}

impl Default for Card {
    fn default() -> Self {
        Self {
            background: Color::rgba(0.2, 0.2, 0.2, 1.0),
            shadow_color: Color::rgba(0.0, 0.0, 0.0, 0.3),
            shadow_offset: (2.0, 2.0),
        }
    }
}

impl Component for Card {
    fn name(&self) -> &'static str {
        "card"
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let rect = node.rect();
        let (dx, dy) = self.shadow_offset;
        backend.draw_rectangle(rect.x + dx, rect.y + dy, rect.width, rect.height, self.shadow_color);
        let background = node.style().background_color.unwrap_or(self.background);
        backend.draw_rectangle(rect.x, rect.y, rect.width, rect.height, background);
    }
}

/// Small label for counts and statuses.
#[derive(Debug, Clone)]
pub struct Badge {
    text: String,
    background: Color,
    padding: f32,
}

impl Badge {
    /// Creates a red badge.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background: Color::rgba(1.0, 0.24, 0.24, 1.0),
            padding: 4.0,
        }
    }

    /// Changes the fill.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl Component for Badge {
    fn name(&self) -> &'static str {
        "badge"
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let rect = node.rect();
        let style = node.style();
        backend.draw_rectangle(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            style.background_color.unwrap_or(self.background),
        );
        let padding = style.padding.unwrap_or(self.padding);
        let color = style.text_color.unwrap_or(Color::WHITE);
        backend.draw_text(&self.text, rect.x + padding, rect.y + padding, color);
    }
}

/// Horizontal progress bar.
///
/// `value` is animatable: tween the `value` property to move the fill.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    value: f32,
    max_value: f32,
    /// Track color.
    pub background: Color,
    /// Fill color.
    pub fill: Color,
    /// Draw the percentage in the middle of the bar.
    pub show_text: bool,
}

impl Progress {
    /// Creates a bar at `value` out of `max_value`.
    #[must_use]
    pub fn new(value: f32, max_value: f32) -> Self {
        Self {
            value,
            max_value,
            background: Color::rgba(0.3, 0.3, 0.3, 1.0),
            fill: Color::rgba(0.23, 0.45, 1.0, 1.0),
            show_text: false,
        }
    }

    /// Shows the percentage label.
    #[must_use]
    pub fn with_text(mut self) -> Self {
        self.show_text = true;
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Filled fraction in `[0, 1]`. A non-positive maximum counts as empty.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.max_value <= 0.0 {
            return 0.0;
        }
        (self.value / self.max_value).clamp(0.0, 1.0)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl Component for Progress {
    fn name(&self) -> &'static str {
        "progress"
    }

    fn render(&self, node: &Node, backend: &mut dyn DrawBackend) {
        let rect = node.rect();
        backend.draw_rectangle(rect.x, rect.y, rect.width, rect.height, self.background);

        let ratio = self.ratio();
        let fill_width = (rect.width * ratio).floor();
        if fill_width > 0.0 {
            backend.draw_rectangle(rect.x, rect.y, fill_width, rect.height, self.fill);
        }

        if self.show_text {
            let label = format!("{}%", (ratio * 100.0).floor());
            #[allow(clippy::cast_precision_loss)]
            let text_x = rect.x + (rect.width / 2.0).floor() - label.len() as f32 * 4.0;
            let text_y = rect.y + (rect.height / 2.0).floor() - 8.0;
            backend.draw_text(&label, text_x, text_y, Color::WHITE);
        }
    }

    fn property(&self, key: &str) -> Option<f32> {
        (key == "value").then_some(self.value)
    }

    fn set_property(&mut self, key: &str, value: f32) -> bool {
        if key != "value" {
            return false;
        }
        self.value = value;
        true
    }
}
