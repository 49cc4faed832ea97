//! Tree-wide shared data: arbitrary key/value pairs plus a theme registry.
//!
//! One [`Context`] exists per application window. Components reach it through
//! a [`SharedContext`] handle that the tree hands to every node attached under
//! a parent that already has one.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::style::Color;
use crate::value::Value;

/// Shared handle to a [`Context`].
pub type SharedContext = Arc<RwLock<Context>>;

/// Name of the theme every context starts with.
pub const DEFAULT_THEME: &str = "default";

/// Fallback when a theme has no such color.
const FALLBACK_COLOR: Color = Color::WHITE;
/// Fallback when a theme has no such spacing step.
const FALLBACK_SPACING: f32 = 8.0;
/// Fallback when a theme has no such radius step.
const FALLBACK_RADIUS: f32 = 4.0;

/// Named design tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Named colors (`primary`, `background`, ...).
    pub colors: HashMap<String, Color>,
    /// Spacing scale (`xs` .. `xl`).
    pub spacing: HashMap<String, f32>,
    /// Border radius scale (`sm` .. `full`).
    pub border_radius: HashMap<String, f32>,
}

impl Theme {
    /// The built-in dark theme.
    #[must_use]
    pub fn dark() -> Self {
        let colors = [
            ("primary", Color::rgba(0.2, 0.6, 1.0, 1.0)),
            ("secondary", Color::rgba(0.6, 0.6, 0.6, 1.0)),
            ("success", Color::rgba(0.2, 0.8, 0.2, 1.0)),
            ("warning", Color::rgba(1.0, 0.8, 0.2, 1.0)),
            ("error", Color::rgba(1.0, 0.2, 0.2, 1.0)),
            ("background", Color::rgba(0.1, 0.1, 0.1, 1.0)),
            ("surface", Color::rgba(0.2, 0.2, 0.2, 1.0)),
            ("text", Color::rgba(1.0, 1.0, 1.0, 1.0)),
        ];
        let spacing = [("xs", 4.0), ("sm", 8.0), ("md", 16.0), ("lg", 24.0), ("xl", 32.0)];
        let border_radius = [("sm", 4.0), ("md", 8.0), ("lg", 16.0), ("full", 9999.0)];

        Self {
            colors: colors.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
            spacing: spacing.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
            border_radius: border_radius.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        }
    }
}

/// Tree-wide shared data.
#[derive(Debug, Clone)]
pub struct Context {
    data: HashMap<String, Value>,
    themes: HashMap<String, Theme>,
    current_theme: String,
}

impl Context {
    /// Creates a context holding only the default theme.
    #[must_use]
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert(DEFAULT_THEME.to_owned(), Theme::dark());
        Self {
            data: HashMap::new(),
            themes,
            current_theme: DEFAULT_THEME.to_owned(),
        }
    }

    /// Wraps the context in a shareable handle.
    #[must_use]
    pub fn shared(self) -> SharedContext {
        Arc::new(RwLock::new(self))
    }

    /// Stores a value.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Reads a value.
    #[must_use]
    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Registers or replaces a theme.
    pub fn set_theme(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    /// Returns the named theme.
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Returns the current theme.
    #[must_use]
    pub fn current_theme(&self) -> Option<&Theme> {
        self.themes.get(&self.current_theme)
    }

    /// Name of the current theme.
    #[must_use]
    pub fn current_theme_name(&self) -> &str {
        &self.current_theme
    }

    /// Switches the current theme. Unknown names are ignored.
    ///
    /// Returns true if the switch happened.
    pub fn set_current_theme(&mut self, name: &str) -> bool {
        if self.themes.contains_key(name) {
            self.current_theme = name.to_owned();
            true
        } else {
            false
        }
    }

    /// A color from the current theme, white if missing.
    #[must_use]
    pub fn theme_color(&self, name: &str) -> Color {
        self.current_theme()
            .and_then(|theme| theme.colors.get(name).copied())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// A spacing step from the current theme, 8 if missing.
    #[must_use]
    pub fn theme_spacing(&self, name: &str) -> f32 {
        self.current_theme()
            .and_then(|theme| theme.spacing.get(name).copied())
            .unwrap_or(FALLBACK_SPACING)
    }

    /// A radius step from the current theme, 4 if missing.
    #[must_use]
    pub fn theme_border_radius(&self, name: &str) -> f32 {
        self.current_theme()
            .and_then(|theme| theme.border_radius.get(name).copied())
            .unwrap_or(FALLBACK_RADIUS)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
