//! Component tree and the built-in widget set.
//!
//! [`ComponentTree`] owns node data and drives the lifecycle; widgets are
//! [`Component`] implementations that draw a node and react to its events.

mod basic;
mod containers;
mod core;
mod display;
mod tree;

pub use basic::{Button, ClickHandler, Container, Input, Text};
pub use containers::{Column, Grid, Row, Stack};
pub use self::core::{Component, ComponentId, EventHandler, HandlerId, Node, Visual};
pub use display::{Badge, Card, Divider, Progress};
pub use tree::ComponentTree;
