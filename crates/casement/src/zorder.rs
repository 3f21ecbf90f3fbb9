//! Window stacking and popup promotion.
//!
//! Child sequence order is paint and hit-test order: the last child is
//! topmost. Bringing a window to the front appends it to its parent's
//! child sequence, then restores the stacking invariant for popups: every
//! popup must sit after its owning window in the sequence, or it would be
//! painted underneath the window it belongs to.
//!
//! The restore is a brute-force rescan. After the initial raise, scan the
//! sibling sequence for any popup owned by the promoted widget that sits
//! before it; promote that popup the same way (which cascades to popups it
//! owns in turn) and rescan from scratch. Indices are recomputed on every
//! pass because each promotion shifts them.
//!
//! Termination: promotions only append, so each pass strictly reduces the
//! number of misplaced popups, and owner references always point at older
//! widgets, so the cascade cannot revisit a widget. The promotion count is
//! returned for callers that want to bound it.

use casement_core::logging::targets;
use casement_core::{WidgetId, WidgetTree};
use tracing::debug;

/// Bring `window` to the front among its siblings and re-stack every popup
/// it transitively owns above it.
///
/// Works on any widget with a parent; the name reflects the expected use.
/// Returns the total number of raise operations performed, including the
/// initial one. A dead widget or the root returns 0.
pub(crate) fn move_window_to_front(tree: &mut WidgetTree, window: WidgetId) -> usize {
    let Some(parent) = tree.parent(window) else {
        return 0;
    };
    if tree.raise_child(window).is_err() {
        return 0;
    }
    debug!(target: targets::ZORDER, ?window, "raised to front");

    let mut raises = 1;
    loop {
        let children = tree.children(parent).to_vec();
        let Some(base_index) = children.iter().position(|&c| c == window) else {
            break;
        };
        let mut changed = false;
        for (index, &child) in children.iter().enumerate() {
            if index < base_index && tree.popup_owner(child) == Some(window) {
                raises += move_window_to_front(tree, child);
                changed = true;
                break;
            }
        }
        if !changed {
            break;
        }
    }
    raises
}
