//! Modal window gating for pointer input.
//!
//! When the focus path runs through a modal window, button and scroll
//! events landing outside that window are discarded before any hit test
//! or dispatch happens. Pointer motion, keyboard input, and file drops are
//! not gated.
//!
//! The gate inspects the focus path member directly below the root; since
//! the path is an ancestor chain, that member is always the top-level ui
//! element the focused widget lives in.

use casement_core::{Point, WidgetId, WidgetTree};

/// Check whether a pointer event at `pos` may proceed.
///
/// Returns `false` only when the focus path runs through a modal window
/// and `pos` falls outside that window's bounds.
pub(crate) fn modal_gate_allows(tree: &WidgetTree, focus_path: &[WidgetId], pos: Point) -> bool {
    if focus_path.len() < 2 {
        return true;
    }
    let candidate = focus_path[focus_path.len() - 2];
    match tree.role(candidate) {
        Some(role) if role.is_modal_window() => tree.contains_point(candidate, pos),
        _ => true,
    }
}
