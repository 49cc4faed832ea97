//! # Tessera UI core
//!
//! A retained-mode component tree with declarative layout, property
//! animation, and an abstract draw interface.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                         ONE TICK                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  Events → Router/Dispatch → Animator → Update → Render    │
//! │     ↓           ↓              ↓          ↓        ↓      │
//! │  InputState  node handlers  tweens    mount/   DrawBackend│
//! │                                       layout              │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread, synchronously, inside the host's tick.
//! Nodes are addressed by generational [`ComponentId`]s, so animations and
//! focus can outlive the node they point at without dangling.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod context;
pub mod dispatch;
pub mod easing;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;
pub mod value;
pub mod widget;

pub use animation::{AnimationTargets, Animator, Clock, ManualClock, Sequence, SystemClock, Transition, Tween};
pub use context::{Context, SharedContext, Theme};
pub use dispatch::PointerDispatcher;
pub use easing::Easing;
pub use error::{TreeError, TreeResult};
pub use input::{Event, EventKind, EventRouter, InputState, Key, MouseButton};
pub use layout::{Alignment, Direction, FlexLayout, GridLayout, Justify, Rect, StackLayout};
pub use render::{render_tree, CommandRecorder, DrawBackend, RenderCommand, UIVertex};
pub use style::{ClassTable, Color, StyleProperties, StyleResolver};
pub use value::Value;
pub use widget::{Component, ComponentId, ComponentTree, Node};
