//! # Host Error Types
//!
//! Configuration failures and frame-loop contract violations.

use thiserror::Error;

use tessera_ui::TreeError;

/// Errors raised while loading or validating [`crate::AppConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::AppConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or refers to something that does not exist.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised by [`crate::App`].
#[derive(Error, Debug)]
pub enum AppError {
    /// The frame loop was driven with no root component attached.
    #[error("no root component attached")]
    NoRoot,

    /// A tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for host operations.
pub type AppResult<T> = Result<T, AppError>;
