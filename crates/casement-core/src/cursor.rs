//! Cursor shape hints for widgets.
//!
//! Each widget carries a [`CursorShape`] hint; the dispatcher applies it
//! through the platform's cursor setter whenever the pointer moves onto a
//! widget whose hint differs from the shape currently shown.

use cursor_icon::CursorIcon;

/// The shape (icon) the mouse cursor should take over a widget.
///
/// The actual appearance varies by platform and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,

    /// An I-beam cursor, typically shown over editable text.
    IBeam,

    /// A crosshair cursor for precise selection.
    Crosshair,

    /// A pointing hand cursor for clickable elements.
    Hand,

    /// A horizontal resize cursor (east-west).
    HResize,

    /// A vertical resize cursor (north-south).
    VResize,
}

impl CursorShape {
    /// Map the shape to the shared [`CursorIcon`] vocabulary understood by
    /// platform cursor setters.
    pub fn to_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::IBeam => CursorIcon::Text,
            CursorShape::Crosshair => CursorIcon::Crosshair,
            CursorShape::Hand => CursorIcon::Pointer,
            CursorShape::HResize => CursorIcon::EwResize,
            CursorShape::VResize => CursorIcon::NsResize,
        }
    }
}
