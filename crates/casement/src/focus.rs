//! Keyboard focus path management.
//!
//! Focus in the routing core is a path, not a single widget: when a widget
//! gains focus, every ancestor up to and including the root joins the
//! focus path. Keyboard events later walk this path looking for a taker,
//! and the modal gate inspects it to find the active window.
//!
//! The path is stored leaf-first. All notification delivery goes through
//! [`dispatch::deliver_direct`](crate::dispatch::deliver_direct), so
//! handlers that mutate the tree during a focus change are safe.

use casement_core::logging::targets;
use casement_core::{WidgetId, WidgetTree};
use tracing::debug;

use crate::dispatch::deliver_direct;
use crate::event::WidgetEvent;
use crate::widget::{BehaviorMap, ScreenAction};

/// The chain of widgets holding keyboard focus, leaf-first.
///
/// Empty when nothing is focused. When non-empty, the last element is
/// always the tree root.
#[derive(Debug, Default)]
pub struct FocusPath {
    path: Vec<WidgetId>,
}

impl FocusPath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The path members, leaf-first. The root is the final element.
    #[inline]
    pub fn widgets(&self) -> &[WidgetId] {
        &self.path
    }

    /// Whether the path currently holds any widgets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether `widget` is a member of the path.
    pub fn contains(&self, widget: WidgetId) -> bool {
        self.path.contains(&widget)
    }

    /// Whether any path member lies inside the subtree rooted at `ancestor`.
    pub(crate) fn intersects_subtree(&self, tree: &WidgetTree, ancestor: WidgetId) -> bool {
        self.path
            .iter()
            .any(|&id| tree.is_in_subtree(id, ancestor))
    }

    /// Rebuild the path around a new focus target.
    ///
    /// Old path members still holding the focused flag receive a focus-lost
    /// notification with the flag cleared. The new path is then built by
    /// walking from `target` to the root, and each member receives a
    /// focus-gained notification in root-to-leaf order with the flag set.
    ///
    /// Returns the window nearest the new leaf (the target itself if it is
    /// a window), which the screen brings to the front.
    pub(crate) fn update(
        &mut self,
        tree: &mut WidgetTree,
        behaviors: &mut BehaviorMap,
        actions: &mut Vec<ScreenAction>,
        target: Option<WidgetId>,
    ) -> Option<WidgetId> {
        let old_path = std::mem::take(&mut self.path);
        for &id in &old_path {
            if tree.is_focused(id) == Some(true) {
                let _ = tree.set_focused(id, false);
                deliver_direct(tree, behaviors, actions, id, &mut WidgetEvent::FocusOut);
            }
        }

        let target = target.filter(|&id| tree.contains(id));
        let Some(target) = target else {
            debug!(target: targets::FOCUS, "focus cleared");
            return None;
        };

        let mut focus_window = None;
        for id in tree.ancestor_chain(target) {
            if focus_window.is_none() && tree.role(id).is_some_and(|r| r.is_window()) {
                focus_window = Some(id);
            }
            self.path.push(id);
        }

        for index in (0..self.path.len()).rev() {
            let id = self.path[index];
            if tree.contains(id) {
                let _ = tree.set_focused(id, true);
                deliver_direct(tree, behaviors, actions, id, &mut WidgetEvent::FocusIn);
            }
        }

        debug!(
            target: targets::FOCUS,
            ?target,
            depth = self.path.len(),
            window = ?focus_window,
            "focus path rebuilt"
        );
        focus_window
    }

    /// Drop the path without sending focus-lost notifications.
    ///
    /// Used during window disposal. The focused flag is still cleared on
    /// live members so no widget keeps a stale flag outside the path.
    pub(crate) fn clear_silent(&mut self, tree: &mut WidgetTree) {
        for &id in &self.path {
            let _ = tree.set_focused(id, false);
        }
        self.path.clear();
    }
}
