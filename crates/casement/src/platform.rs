//! Platform service and render backend seams.
//!
//! The routing core never talks to a windowing system or a graphics API
//! directly. The embedding application implements [`Platform`] for
//! whatever window/event source it uses and [`RenderBackend`] for its
//! drawing context, and hands both to [`Screen::new`](crate::Screen::new).
//! Everything the core needs from the outside world flows through these
//! two traits, which keeps the core testable with scripted doubles.
//!
//! # Coordinate Conventions
//!
//! All sizes and positions crossing [`Platform`] are in logical units
//! except where a method says otherwise. Window systems that report
//! cursor positions in physical pixels (most X11 and Win32 setups) return
//! `true` from [`physical_cursor_coords`](Platform::physical_cursor_coords)
//! and the screen divides incoming positions by the pixel ratio.

use std::any::Any;
use std::error::Error;

use casement_core::{Point, Size};
use cursor_icon::CursorIcon;

/// Services the embedding platform layer provides to the screen.
///
/// Implementations wrap the application's windowing library. All methods
/// are queried on demand; the screen holds no cached platform state other
/// than the sizes it refreshes explicitly.
pub trait Platform {
    /// Current window size in logical units.
    fn window_size(&self) -> Size;

    /// Current framebuffer size in physical pixels.
    fn framebuffer_size(&self) -> Size;

    /// Monotonic time in seconds. Used for interaction timestamps and
    /// tooltip idle detection; the epoch does not matter.
    fn now(&self) -> f64;

    /// Apply a cursor shape to the system cursor.
    fn set_cursor(&mut self, icon: CursorIcon);

    /// Read the system clipboard, if it holds text.
    fn clipboard_text(&mut self) -> Option<String>;

    /// Replace the system clipboard contents.
    fn set_clipboard_text(&mut self, text: &str);

    /// Whether raw cursor positions arrive in physical pixels rather than
    /// logical units. The default matches the common window systems.
    fn physical_cursor_coords(&self) -> bool {
        cfg!(any(windows, target_os = "linux"))
    }

    /// Correction subtracted from raw cursor positions so the reported
    /// position lines up with the visible cursor hotspot.
    fn cursor_offset(&self) -> Point {
        Point::new(1.0, 2.0)
    }
}

/// The drawing context the screen drives once per frame.
///
/// The `Any` supertrait lets embedders recover their concrete backend
/// from the screen via [`downcast_mut`](dyn RenderBackend::downcast_mut)
/// when widgets need backend-specific drawing calls.
pub trait RenderBackend: Any {
    /// Prepare the backend. Called once from [`Screen::new`](crate::Screen::new).
    fn initialize(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Begin a new frame covering `logical_size` at the given ratio of
    /// framebuffer pixels per logical unit.
    fn begin_frame(&mut self, logical_size: Size, pixel_ratio: f32);

    /// Finish and present the current frame.
    fn end_frame(&mut self);
}

impl dyn RenderBackend {
    /// Downcast to the concrete backend type.
    pub fn downcast_mut<T: RenderBackend>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut()
    }

    /// Downcast to a shared reference of the concrete backend type.
    pub fn downcast_ref<T: RenderBackend>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }
}
