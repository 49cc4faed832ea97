//! # Application Configuration
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid config:
//!
//! ```toml
//! title = "Inventory"
//! width = 1280
//! height = 720
//! target_fps = 60
//! background = [0.1, 0.1, 0.1, 1.0]
//! current_theme = "light"
//!
//! [themes.light.colors]
//! primary = [0.1, 0.4, 0.9, 1.0]
//! text = [0.0, 0.0, 0.0, 1.0]
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tessera_ui::context::DEFAULT_THEME;
use tessera_ui::{Color, Context, SharedContext, Theme};

use crate::error::ConfigError;

/// Window and frame-loop settings plus the themes to register.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Initial viewport width.
    pub width: u32,
    /// Initial viewport height.
    pub height: u32,
    /// Frames per second [`crate::App::run`] paces to.
    pub target_fps: u32,
    /// Capacity of the input channel.
    pub event_capacity: usize,
    /// Color the surface is cleared to each frame.
    pub background: Color,
    /// Also hit-test pointer events against the tree and fire node handlers.
    pub pointer_dispatch: bool,
    /// Theme selected at startup.
    pub current_theme: String,
    /// Extra themes, by name. A theme named `default` replaces the built-in one.
    pub themes: HashMap<String, Theme>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tessera".to_owned(),
            width: 800,
            height: 600,
            target_fps: 60,
            event_capacity: 1024,
            background: Color::rgba(0.1, 0.1, 0.1, 1.0),
            pointer_dispatch: true,
            current_theme: DEFAULT_THEME.to_owned(),
            themes: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed TOML, `Invalid` if validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks ranges and that the startup theme exists.
    ///
    /// # Errors
    ///
    /// `Invalid` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be positive".to_owned()));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid("event_capacity must be positive".to_owned()));
        }
        if self.current_theme != DEFAULT_THEME && !self.themes.contains_key(&self.current_theme) {
            return Err(ConfigError::Invalid(format!("unknown theme '{}'", self.current_theme)));
        }
        Ok(())
    }

    /// Time one frame may take at the target rate.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }

    /// Viewport size as layout floats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn viewport(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// A fresh context holding the built-in theme, every configured theme,
    /// and the startup theme selected.
    #[must_use]
    pub fn build_context(&self) -> SharedContext {
        let mut context = Context::new();
        for (name, theme) in &self.themes {
            context.set_theme(name.clone(), theme.clone());
        }
        if !context.set_current_theme(&self.current_theme) {
            tracing::warn!("theme '{}' not registered, keeping default", self.current_theme);
        }
        context.shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.frame_budget(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn test_parse_themes_and_background() {
        let config = AppConfig::from_toml_str(
            r#"
            width = 1024
            background = [0.0, 0.0, 0.5, 1.0]
            current_theme = "light"

            [themes.light.colors]
            primary = [0.1, 0.4, 0.9, 1.0]

            [themes.light.spacing]
            md = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.background, Color::rgba(0.0, 0.0, 0.5, 1.0));

        let context = config.build_context();
        let context = context.read();
        assert_eq!(context.current_theme_name(), "light");
        assert_eq!(context.theme_color("primary"), Color::rgba(0.1, 0.4, 0.9, 1.0));
        assert_eq!(context.theme_spacing("md"), 12.0);
        assert!(context.theme(DEFAULT_THEME).is_some());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            AppConfig::from_toml_str("width = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml_str("target_fps = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml_str("current_theme = \"missing\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml_str("width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            AppConfig::load("/nonexistent/tessera.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
