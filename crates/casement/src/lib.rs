//! Casement - event routing and window stacking for retained-mode UIs.
//!
//! This is the main crate: it owns the [`Screen`] dispatcher and re-exports
//! the tree, geometry, and cursor types from `casement-core`.
//!
//! A [`Screen`] sits between a platform event loop and a tree of widget
//! behaviors. Raw callbacks go in one side; typed, correctly targeted
//! events come out the other, with focus, drag capture, modal gating, and
//! window stacking handled in between:
//!
//! - hit testing finds the topmost visible widget under the pointer;
//! - a press captures the pointer for drag gestures and moves focus;
//! - keyboard input walks the focus path from the leaf upward;
//! - modal windows swallow pointer input outside their bounds;
//! - promoted windows carry their popups above them in paint order.
//!
//! The platform and renderer stay outside: implement [`Platform`] and
//! [`RenderBackend`] for your windowing and graphics libraries and hand
//! them to [`Screen::new`].
//!
//! # Example
//!
//! ```ignore
//! use casement::{EventCtx, Screen, Widget, WidgetEvent};
//!
//! struct CloseButton;
//!
//! impl Widget for CloseButton {
//!     fn event(&mut self, ctx: &mut EventCtx<'_>, event: &mut WidgetEvent) -> bool {
//!         if let WidgetEvent::MouseButton(e) = event {
//!             if e.pressed {
//!                 let window = ctx.tree().ancestor_chain(ctx.widget_id())[1];
//!                 ctx.dispose_window(window);
//!             }
//!             return true;
//!         }
//!         false
//!     }
//! }
//!
//! let mut screen = Screen::new(Box::new(platform), Box::new(backend))?;
//! let window = screen.add_window(Box::new(MyWindow::default()), false)?;
//! screen.add_widget(window, Box::new(CloseButton))?;
//!
//! // In the platform event loop:
//! screen.pointer_moved(x, y)?;
//! screen.mouse_button(button, pressed, modifiers)?;
//! screen.draw_all();
//! ```

pub use casement_core::*;

mod dispatch;
mod drag;
mod error;
mod event;
mod focus;
mod modal;
mod platform;
mod screen;
mod widget;
mod zorder;

pub use drag::DragState;
pub use error::{ScreenError, ScreenResult};
pub use event::{
    CharEvent, DropEvent, KeyAction, KeyEvent, KeyboardModifiers, MouseButton, MouseButtonEvent,
    MouseDragEvent, MouseMoveEvent, ResizeEvent, WheelEvent, WidgetEvent,
};
pub use focus::FocusPath;
pub use platform::{Platform, RenderBackend};
pub use screen::Screen;
pub use widget::{EventCtx, PaintContext, Pane, Widget};
