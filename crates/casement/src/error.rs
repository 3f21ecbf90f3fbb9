//! Error types for the screen crate.

use thiserror::Error;

/// Errors that can occur while running the screen.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// The render backend failed to initialize.
    #[error("render backend initialization failed: {0}")]
    BackendInit(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A widget handler panicked during event dispatch.
    ///
    /// The panic was caught at the dispatch boundary; the screen remains
    /// usable, with any in-flight capture and deferred requests discarded.
    #[error("widget handler panicked: {0}")]
    HandlerPanic(String),

    /// A tree operation failed.
    #[error(transparent)]
    Tree(#[from] casement_core::TreeError),
}

/// Result type for screen operations.
pub type ScreenResult<T> = Result<T, ScreenError>;
