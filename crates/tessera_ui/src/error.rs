//! # Tree Error Types
//!
//! Contract violations on the component tree's structure.

use thiserror::Error;

use crate::widget::ComponentId;

/// Errors returned by structural tree operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The id refers to a removed (or never created) component.
    #[error("stale component id {0}")]
    StaleComponent(ComponentId),

    /// Attaching `child` under `parent` would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected {
        /// The would-be parent.
        parent: ComponentId,
        /// The would-be child.
        child: ComponentId,
    },

    /// `child` is not attached to `parent`.
    #[error("{child} is not a child of {parent}")]
    NotAChild {
        /// The parent that was asked.
        parent: ComponentId,
        /// The component that was not found among its children.
        child: ComponentId,
    },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
