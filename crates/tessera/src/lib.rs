//! # Tessera
//!
//! Host side of the toolkit: loads an [`AppConfig`], owns the input channel
//! and runs the frame loop over a [`tessera_ui`] component tree.
//!
//! ```text
//! ┌───────────────┐   Event    ┌───────────────┐  DrawBackend  ┌─────────────┐
//! │   Windowing   │──────────> │      App      │─────────────> │   Renderer  │
//! │ (EventSender) │            │ route/animate │               │             │
//! └───────────────┘            │ update/render │               └─────────────┘
//!                              └───────────────┘
//! ```
//!
//! The windowing layer and the renderer are supplied by the embedder.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod stats;

pub use app::{App, Scene};
pub use config::AppConfig;
pub use error::{AppError, AppResult, ConfigError};
pub use events::{event_channel, EventReceiver, EventSender};
pub use stats::{FrameStats, FrameStatsAccumulator};
pub use tessera_ui;
