//! Logging and debugging facilities.
//!
//! Casement instruments its routing decisions with the `tracing` crate. To
//! see logs, install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Use [`format_tree`] to dump a widget tree for diagnostics.

use std::fmt::Write as FmtWrite;

use crate::tree::{WidgetId, WidgetRole, WidgetTree};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "casement_core";
    /// Widget tree target.
    pub const TREE: &str = "casement_core::tree";
    /// Root dispatcher target.
    pub const SCREEN: &str = "casement::screen";
    /// Focus path target.
    pub const FOCUS: &str = "casement::focus";
    /// Drag capture target.
    pub const DRAG: &str = "casement::drag";
    /// Z-order target.
    pub const ZORDER: &str = "casement::zorder";
}

/// Render an indented dump of the tree under `id` for diagnostics.
///
/// Each line shows the widget id, role, geometry, and any state flags that
/// differ from the defaults.
pub fn format_tree(tree: &WidgetTree, id: WidgetId) -> String {
    let mut out = String::new();
    format_node(tree, id, 0, &mut out);
    out
}

fn format_node(tree: &WidgetTree, id: WidgetId, depth: usize, out: &mut String) {
    let Some(role) = tree.role(id) else {
        let _ = writeln!(out, "{}<dead {:?}>", "  ".repeat(depth), id);
        return;
    };
    let pos = tree.position(id).unwrap_or_default();
    let size = tree.size(id).unwrap_or_default();
    let role_name = match role {
        WidgetRole::Plain => "widget".to_string(),
        WidgetRole::Window { modal: false } => "window".to_string(),
        WidgetRole::Window { modal: true } => "window (modal)".to_string(),
        WidgetRole::Popup { owner } => format!("popup (owner {owner:?})"),
    };
    let mut flags = String::new();
    if tree.is_visible(id) == Some(false) {
        flags.push_str(" hidden");
    }
    if tree.is_enabled(id) == Some(false) {
        flags.push_str(" disabled");
    }
    if tree.is_focused(id) == Some(true) {
        flags.push_str(" focused");
    }
    let _ = writeln!(
        out,
        "{}{:?} {} @ ({}, {}) {}x{}{}",
        "  ".repeat(depth),
        id,
        role_name,
        pos.x,
        pos.y,
        size.width,
        size.height,
        flags
    );
    for &child in tree.children(id) {
        format_node(tree, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn test_format_tree_shows_hierarchy_and_flags() {
        let mut t = WidgetTree::new(Size::new(640.0, 480.0));
        let win = t.insert(t.root(), WidgetRole::Window { modal: true }).unwrap();
        let child = t.insert(win, WidgetRole::Plain).unwrap();
        t.set_visible(child, false).unwrap();

        let dump = format_tree(&t, t.root());
        assert!(dump.contains("window (modal)"));
        assert!(dump.contains(" hidden"));
        // One line per widget.
        assert_eq!(dump.lines().count(), 3);
    }
}
