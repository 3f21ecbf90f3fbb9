//! Input event types delivered to widget behaviors.
//!
//! Raw platform callbacks arrive at the [`Screen`](crate::Screen) with
//! primitive parameters (doubles for coordinates, small integers for buttons
//! and keys, a bitmask for modifiers). This module defines the typed events
//! the dispatcher builds from them, plus the decoding helpers for the raw
//! integer encodings.
//!
//! Positional events carry two coordinates: `pos` in surface coordinates and
//! `local` relative to the receiving widget. The dispatcher recomputes
//! `local` for every widget an event visits, so a handler never has to know
//! where it sits in the tree. Drag events are the exception: their position
//! is relative to the captured widget's parent, which is the natural frame
//! for move/resize gestures.

use std::path::PathBuf;

use casement_core::{Point, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Super/Meta key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Decode the raw platform bitmask (bit 0 = shift, bit 1 = control,
    /// bit 2 = alt, bit 3 = super).
    pub fn from_bits(bits: u32) -> Self {
        Self {
            shift: bits & 0x0001 != 0,
            control: bits & 0x0002 != 0,
            alt: bits & 0x0004 != 0,
            meta: bits & 0x0008 != 0,
        }
    }

    /// Encode back into the raw platform bitmask.
    pub fn bits(&self) -> u32 {
        (self.shift as u32)
            | (self.control as u32) << 1
            | (self.alt as u32) << 2
            | (self.meta as u32) << 3
    }

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons, in the raw platform numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left (primary) button, raw value 0.
    Left,
    /// The right (secondary) button, raw value 1.
    Right,
    /// The middle button, raw value 2.
    Middle,
    /// Navigation back, raw value 3.
    Back,
    /// Navigation forward, raw value 4.
    Forward,
}

impl MouseButton {
    /// Decode a raw platform button number.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Middle),
            3 => Some(Self::Back),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    /// The raw platform button number.
    pub fn raw(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
            Self::Back => 3,
            Self::Forward => 4,
        }
    }

    /// This button's bit in the pressed-button bitmask.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.raw()
    }

    /// Whether a press of this button starts a drag capture gesture.
    #[inline]
    pub fn starts_drag(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// What a raw keyboard callback reported about the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The key went down.
    Press,
    /// The key came up.
    Release,
    /// The key is auto-repeating while held.
    Repeat,
}

impl KeyAction {
    /// Decode the raw platform action value (0 = release, 1 = press,
    /// 2 = repeat).
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }
}

/// A mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    /// Pointer position in surface coordinates.
    pub pos: Point,
    /// Pointer position relative to the receiving widget.
    pub local: Point,
    /// The button that changed state.
    pub button: MouseButton,
    /// `true` for press, `false` for release.
    pub pressed: bool,
    /// Modifiers held at the time of the event.
    pub modifiers: KeyboardModifiers,
}

/// Pointer movement with no capture active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// Pointer position in surface coordinates.
    pub pos: Point,
    /// Pointer position relative to the receiving widget.
    pub local: Point,
    /// Movement since the previous pointer event.
    pub delta: Point,
    /// Bitmask of currently pressed buttons (see [`MouseButton::bit`]).
    pub buttons: u8,
    /// Modifiers held at the time of the event.
    pub modifiers: KeyboardModifiers,
}

/// Pointer movement delivered exclusively to the captured widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseDragEvent {
    /// Pointer position relative to the captured widget's parent.
    pub pos: Point,
    /// Movement since the previous pointer event.
    pub delta: Point,
    /// Bitmask of currently pressed buttons.
    pub buttons: u8,
    /// Modifiers held when the gesture state was last updated.
    pub modifiers: KeyboardModifiers,
}

/// Scroll wheel or trackpad scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Pointer position in surface coordinates.
    pub pos: Point,
    /// Pointer position relative to the receiving widget.
    pub local: Point,
    /// Scroll amount, x then y.
    pub delta: Point,
}

/// A raw keyboard key changed state.
///
/// Key and scancode values pass through from the platform untouched; the
/// routing core does not interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Platform key code.
    pub key: i32,
    /// Platform scancode.
    pub scancode: i32,
    /// Press, release, or repeat.
    pub action: KeyAction,
    /// Modifiers held at the time of the event.
    pub modifiers: KeyboardModifiers,
}

/// A translated text character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEvent {
    /// The character produced by the platform's input translation.
    pub codepoint: char,
}

/// The surface was resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// Logical size before the resize.
    pub old_size: Size,
    /// Logical size after the resize.
    pub new_size: Size,
}

/// Files dropped onto the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// The dropped paths, in the order the platform reported them.
    pub paths: Vec<PathBuf>,
}

/// Any event a widget behavior can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Mouse button press or release.
    MouseButton(MouseButtonEvent),
    /// Pointer movement (no capture active).
    MouseMove(MouseMoveEvent),
    /// Pointer movement routed exclusively to the captured widget.
    MouseDrag(MouseDragEvent),
    /// Scroll input.
    Wheel(WheelEvent),
    /// Raw keyboard key.
    Key(KeyEvent),
    /// Translated character.
    Char(CharEvent),
    /// The widget joined the focus path.
    FocusIn,
    /// The widget left the focus path.
    FocusOut,
    /// The surface was resized. Delivered to the root behavior.
    Resize(ResizeEvent),
    /// Files were dropped. Delivered to the root behavior.
    Drop(DropEvent),
}

impl WidgetEvent {
    /// Update the widget-relative position for positional events.
    ///
    /// The dispatcher calls this before each delivery so `local` always
    /// refers to the widget actually receiving the event. `widget_abs` is
    /// the receiving widget's absolute position.
    pub(crate) fn set_local(&mut self, widget_abs: Point) {
        match self {
            Self::MouseButton(e) => e.local = e.pos - widget_abs,
            Self::MouseMove(e) => e.local = e.pos - widget_abs,
            Self::Wheel(e) => e.local = e.pos - widget_abs,
            _ => {}
        }
    }
}
