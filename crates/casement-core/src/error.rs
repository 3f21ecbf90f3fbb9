//! Error types for Casement core.

use std::fmt;

use crate::tree::WidgetId;

/// Errors raised by widget tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The widget ID does not refer to a live widget.
    InvalidWidget(WidgetId),
    /// The parent ID does not refer to a live widget.
    InvalidParent(WidgetId),
    /// The popup owner ID does not refer to a live widget.
    InvalidOwner(WidgetId),
    /// The widget exists but does not have the Window role.
    NotAWindow(WidgetId),
    /// The root widget cannot be removed.
    RootRemoval,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidget(id) => write!(f, "Widget {id:?} is not alive"),
            Self::InvalidParent(id) => write!(f, "Parent widget {id:?} is not alive"),
            Self::InvalidOwner(id) => write!(f, "Popup owner {id:?} is not alive"),
            Self::NotAWindow(id) => write!(f, "Widget {id:?} does not have the Window role"),
            Self::RootRemoval => write!(f, "The root widget cannot be removed"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
