//! Core widget behavior trait definitions.
//!
//! This module defines the [`Widget`] trait which gives tree nodes their
//! behavior. A node in the [`WidgetTree`] carries only relationship and
//! geometry state; the matching `Box<dyn Widget>` stored by the
//! [`Screen`](crate::Screen) decides how the node reacts to events and how
//! it paints.
//!
//! # Key Types
//!
//! - [`Widget`] - Behavior trait for all UI elements
//! - [`EventCtx`] - Tree access and deferred requests during event handling
//! - [`PaintContext`] - Rendering context passed to [`Widget::paint`]
//! - [`Pane`] - A behavior that does nothing, for plain containers
//!
//! # Event Handling and Re-entrancy
//!
//! Handlers receive an [`EventCtx`] with mutable access to the tree, so a
//! handler may move, resize, hide, or re-cursor widgets immediately.
//! Structural operations that would invalidate dispatch state mid-flight
//! (focus changes, window disposal, raising) are queued on the context and
//! applied by the screen after the current dispatch completes.

use casement_core::{Rect, Size, WidgetId, WidgetTree};
use slotmap::SecondaryMap;

use crate::event::WidgetEvent;
use crate::platform::RenderBackend;

/// Behaviors keyed by the tree node they animate.
pub(crate) type BehaviorMap = SecondaryMap<WidgetId, Box<dyn Widget>>;

/// A structural request raised by a handler, applied after dispatch returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenAction {
    /// Move keyboard focus to the widget, or clear it entirely.
    RequestFocus(Option<WidgetId>),
    /// Remove a window and its subtree from the screen.
    DisposeWindow(WidgetId),
    /// Bring a window to the front of the stacking order.
    RaiseWindow(WidgetId),
}

/// Context provided to [`Widget::event`] during event handling.
///
/// Gives the handler its own id, read and write access to the tree, and a
/// queue for structural requests. Requests are applied in order once the
/// current dispatch completes; a request naming a widget that has since
/// been removed is dropped.
pub struct EventCtx<'a> {
    tree: &'a mut WidgetTree,
    actions: &'a mut Vec<ScreenAction>,
    widget: WidgetId,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(
        tree: &'a mut WidgetTree,
        actions: &'a mut Vec<ScreenAction>,
        widget: WidgetId,
    ) -> Self {
        Self {
            tree,
            actions,
            widget,
        }
    }

    /// The widget currently receiving the event.
    #[inline]
    pub fn widget_id(&self) -> WidgetId {
        self.widget
    }

    /// Read access to the widget tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// Write access to the widget tree.
    ///
    /// Geometry and state mutations take effect immediately. Structural
    /// mutations are also allowed; dispatch revalidates widget liveness at
    /// every step, so removing widgets from a handler is safe.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }

    /// Request keyboard focus for the given widget.
    pub fn request_focus(&mut self, widget: WidgetId) {
        self.actions.push(ScreenAction::RequestFocus(Some(widget)));
    }

    /// Request keyboard focus for the widget handling this event.
    pub fn request_focus_self(&mut self) {
        let widget = self.widget;
        self.request_focus(widget);
    }

    /// Request that keyboard focus be cleared entirely.
    pub fn clear_focus(&mut self) {
        self.actions.push(ScreenAction::RequestFocus(None));
    }

    /// Request removal of a window and its subtree.
    pub fn dispose_window(&mut self, window: WidgetId) {
        self.actions.push(ScreenAction::DisposeWindow(window));
    }

    /// Request that a window be brought to the front.
    pub fn raise_window(&mut self, window: WidgetId) {
        self.actions.push(ScreenAction::RaiseWindow(window));
    }
}

/// Context provided during widget painting.
///
/// This wraps the render backend and provides the widget's resolved
/// geometry for convenient access during the paint operation. Passed to
/// [`Widget::paint`].
pub struct PaintContext<'a> {
    backend: &'a mut dyn RenderBackend,
    /// The widget's rectangle in surface coordinates.
    widget_rect: Rect,
    /// Framebuffer pixels per logical unit.
    pixel_ratio: f32,
}

impl<'a> PaintContext<'a> {
    pub(crate) fn new(
        backend: &'a mut dyn RenderBackend,
        widget_rect: Rect,
        pixel_ratio: f32,
    ) -> Self {
        Self {
            backend,
            widget_rect,
            pixel_ratio,
        }
    }

    /// Get the render backend.
    #[inline]
    pub fn backend(&mut self) -> &mut dyn RenderBackend {
        self.backend
    }

    /// Get the widget's rectangle in surface coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    /// Get the widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.size.width
    }

    /// Get the widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.size.height
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.widget_rect.size
    }

    /// Get the framebuffer-to-logical scale factor.
    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }
}

/// The behavior trait for all widgets.
///
/// Every node inserted into the screen's tree is paired with a boxed
/// `Widget`. The screen routes events to behaviors according to hit
/// testing, focus, capture, and modality; behaviors never talk to each
/// other directly.
///
/// # Default Implementations
///
/// Both methods have defaults, so a behavior only overrides what it needs:
/// - [`event()`](Self::event) returns `false`, declining every event.
/// - [`paint()`](Self::paint) draws nothing.
///
/// # Example
///
/// ```ignore
/// use casement::{EventCtx, Widget, WidgetEvent};
///
/// struct Button {
///     pressed: bool,
/// }
///
/// impl Widget for Button {
///     fn event(&mut self, ctx: &mut EventCtx<'_>, event: &mut WidgetEvent) -> bool {
///         if let WidgetEvent::MouseButton(e) = event {
///             self.pressed = e.pressed;
///             if e.pressed {
///                 ctx.request_focus_self();
///             }
///             return true;
///         }
///         false
///     }
/// }
/// ```
pub trait Widget {
    /// Handle an event routed to this widget.
    ///
    /// Return `true` if the event was handled and should not propagate
    /// further. The default implementation returns `false`.
    fn event(&mut self, _ctx: &mut EventCtx<'_>, _event: &mut WidgetEvent) -> bool {
        false
    }

    /// Paint the widget.
    ///
    /// Called once per frame for every effectively visible widget, in
    /// back-to-front order. The context carries the widget's rectangle in
    /// surface coordinates.
    fn paint(&self, _ctx: &mut PaintContext<'_>) {}
}

/// A behavior with no behavior: declines every event, paints nothing.
///
/// Used as the default behavior for the root and for plain grouping
/// widgets whose children do all the work.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pane;

impl Widget for Pane {}
