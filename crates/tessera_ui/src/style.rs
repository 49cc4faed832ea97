//! Colors and resolved style properties.
//!
//! Turning a utility-class string into style values is the job of an external
//! [`StyleResolver`]. The tree only consumes the resolved [`StyleProperties`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Accent blue used by focused inputs and default buttons.
    pub const ACCENT: Self = Self::rgba(0.2, 0.6, 1.0, 1.0);
    /// Mid grey used for placeholders and dividers.
    pub const MUTED: Self = Self::rgba(0.5, 0.5, 0.5, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Multiplies the RGB channels, clamped to 1. Alpha is kept.
    #[must_use]
    pub fn shade(self, factor: f32) -> Self {
        Self::rgba(
            (self.r * factor).min(1.0),
            (self.g * factor).min(1.0),
            (self.b * factor).min(1.0),
            self.a,
        )
    }

    /// Multiplies alpha by `opacity`, clamped to `[0, 1]`.
    #[must_use]
    pub fn fade(self, opacity: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, self.a * opacity.clamp(0.0, 1.0))
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Returns true if the color would draw nothing.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Resolved style values for one component.
///
/// `None` means "not specified"; components fall back to their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProperties {
    /// Background fill.
    pub background_color: Option<Color>,
    /// Text color.
    pub text_color: Option<Color>,
    /// Border color.
    pub border_color: Option<Color>,
    /// Border width.
    pub border_width: Option<f32>,
    /// Inner padding.
    pub padding: Option<f32>,
    /// Outer margin.
    pub margin: Option<f32>,
    /// Font size.
    pub font_size: Option<f32>,
    /// Corner radius.
    pub border_radius: Option<f32>,
    /// Display mode (`block`, `flex`, `none`, ...).
    pub display: Option<String>,
}

impl StyleProperties {
    /// Returns a copy where every key set in `other` overrides this one.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            background_color: other.background_color.or(self.background_color),
            text_color: other.text_color.or(self.text_color),
            border_color: other.border_color.or(self.border_color),
            border_width: other.border_width.or(self.border_width),
            padding: other.padding.or(self.padding),
            margin: other.margin.or(self.margin),
            font_size: other.font_size.or(self.font_size),
            border_radius: other.border_radius.or(self.border_radius),
            display: other.display.clone().or_else(|| self.display.clone()),
        }
    }

    /// Returns true if nothing is specified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true unless `display` is `none`.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.display.as_deref() != Some("none")
    }
}

/// Turns a whitespace-separated class string into resolved style values.
///
/// Unknown classes contribute nothing; later classes override earlier ones
/// key by key.
pub trait StyleResolver {
    /// Resolves a class string.
    fn resolve(&self, classes: &str) -> StyleProperties;
}

/// A resolver backed by a fixed table of class name to properties.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, StyleProperties>,
}

impl ClassTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the properties contributed by one class.
    pub fn insert(&mut self, class: impl Into<String>, properties: StyleProperties) {
        self.classes.insert(class.into(), properties);
    }

    /// Builder form of [`ClassTable::insert`].
    #[must_use]
    pub fn with(mut self, class: impl Into<String>, properties: StyleProperties) -> Self {
        self.insert(class, properties);
        self
    }
}

impl StyleResolver for ClassTable {
    fn resolve(&self, classes: &str) -> StyleProperties {
        classes
            .split_whitespace()
            .filter_map(|class| self.classes.get(class))
            .fold(StyleProperties::default(), |acc, next| acc.merge(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);

        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_color_fade_clamps() {
        let c = Color::rgba(0.2, 0.4, 0.6, 0.8);
        assert_eq!(c.fade(0.5), Color::rgba(0.2, 0.4, 0.6, 0.4));
        assert_eq!(c.fade(2.0), c);
        assert_eq!(c.fade(-1.0).a, 0.0);
    }

    #[test]
    fn test_color_hex() {
        let color = Color::hex(0xFF00_00FF);
        assert!((color.r - 1.0).abs() < 0.01);
        assert!(color.g.abs() < 0.01);
        assert!((color.a - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_later_class_wins_key_by_key() {
        let table = ClassTable::new()
            .with(
                "bg-red",
                StyleProperties {
                    background_color: Some(Color::rgb(1.0, 0.0, 0.0)),
                    padding: Some(4.0),
                    ..Default::default()
                },
            )
            .with(
                "bg-blue",
                StyleProperties {
                    background_color: Some(Color::rgb(0.0, 0.0, 1.0)),
                    ..Default::default()
                },
            );

        let resolved = table.resolve("bg-red unknown bg-blue");
        assert_eq!(resolved.background_color, Some(Color::rgb(0.0, 0.0, 1.0)));
        assert_eq!(resolved.padding, Some(4.0));
        assert!(table.resolve("nothing here").is_empty());
    }

    #[test]
    fn test_display_none() {
        let hidden = StyleProperties {
            display: Some("none".into()),
            ..Default::default()
        };
        assert!(!hidden.is_displayed());
        assert!(StyleProperties::default().is_displayed());
    }
}
