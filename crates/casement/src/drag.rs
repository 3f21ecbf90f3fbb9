//! Pointer capture state for drag gestures.
//!
//! A press of the left or right button on a widget other than the root
//! captures the pointer: until the capture ends, motion is delivered to the
//! captured widget alone, regardless of where the pointer travels. Any
//! button release ends the capture, as does a press of a non-capturing
//! button.
//!
//! The captured widget is held as an arena key and revalidated before
//! every use; if the widget is removed while captured, the capture simply
//! ends.

use casement_core::logging::targets;
use casement_core::{WidgetId, WidgetTree};
use tracing::debug;

/// The pointer capture slot.
///
/// At most one widget holds capture at a time. [`active`](Self::active) and
/// [`widget`](Self::widget) always agree: capture is active exactly when a
/// captured widget is set.
#[derive(Debug, Default)]
pub struct DragState {
    widget: Option<WidgetId>,
}

impl DragState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether a drag capture is in progress.
    #[inline]
    pub fn active(&self) -> bool {
        self.widget.is_some()
    }

    /// The widget holding capture, if any.
    #[inline]
    pub fn widget(&self) -> Option<WidgetId> {
        self.widget
    }

    /// Start capturing pointer motion for `widget`.
    pub(crate) fn begin(&mut self, widget: WidgetId) {
        debug!(target: targets::DRAG, ?widget, "drag capture begins");
        self.widget = Some(widget);
    }

    /// End the capture, if one is in progress.
    pub(crate) fn clear(&mut self) {
        if let Some(widget) = self.widget.take() {
            debug!(target: targets::DRAG, ?widget, "drag capture ends");
        }
    }

    /// End the capture if the captured widget no longer exists.
    ///
    /// Returns the captured widget when it is still live.
    pub(crate) fn validate(&mut self, tree: &WidgetTree) -> Option<WidgetId> {
        if let Some(widget) = self.widget {
            if !tree.contains(widget) {
                debug!(target: targets::DRAG, ?widget, "captured widget gone, capture ends");
                self.widget = None;
            }
        }
        self.widget
    }

    /// End the capture if the captured widget lies inside the subtree
    /// rooted at `ancestor`. Used when a window is disposed.
    pub(crate) fn invalidate_subtree(&mut self, tree: &WidgetTree, ancestor: WidgetId) {
        if let Some(widget) = self.widget {
            if tree.is_in_subtree(widget, ancestor) {
                self.clear();
            }
        }
    }
}
