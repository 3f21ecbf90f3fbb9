//! The widget tree arena.
//!
//! Provides the hierarchical widget store with:
//! - Stable widget identifiers via arena-based storage
//! - Parent-child ownership with cascade removal
//! - Per-widget geometry, visibility, and role state
//! - Hit testing and traversal primitives
//!
//! # Key Types
//!
//! - [`WidgetId`] - Unique stable identifier for each widget
//! - [`WidgetRole`] - Stacking/gating classification (plain, window, popup)
//! - [`WidgetTree`] - The arena holding every widget node
//!
//! # Handles, not pointers
//!
//! All cross-widget references in the system (parent links, popup owners,
//! focus paths, drag capture) are [`WidgetId`] keys into this arena. A key
//! for a removed widget never resolves again, so holders of stale handles
//! discover the removal on their next lookup instead of dereferencing freed
//! state. Callers that keep ids across event dispatch must revalidate them
//! with [`WidgetTree::contains`].

use slotmap::{SlotMap, new_key_type};

use crate::cursor::CursorShape;
use crate::error::{TreeError, TreeResult};
use crate::geometry::{Point, Rect, Size};

new_key_type! {
    /// A unique identifier for a widget in the tree.
    ///
    /// `WidgetId`s are stable handles that remain valid as the tree changes
    /// around them. They become invalid when the widget is removed.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the WidgetId to a raw u64 value.
    ///
    /// Useful for interop with external systems that need a numeric ID. The
    /// raw value can be converted back using [`WidgetId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a WidgetId from a raw u64 value.
    ///
    /// This does not check whether the widget exists in any tree.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// The stacking and gating classification of a widget.
///
/// The role decides how the dispatcher treats the widget beyond plain event
/// delivery: windows are the unit of z-order management and may be modal;
/// popups are anchored to an owner window for stacking purposes, which may
/// differ from their tree parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetRole {
    /// An ordinary widget with no stacking significance.
    Plain,
    /// A top-level window. Modal windows suppress pointer and scroll input
    /// outside their bounds while they sit directly under the root of the
    /// focus path.
    Window {
        /// Whether the window exclusively owns interaction.
        modal: bool,
    },
    /// A popup logically anchored to an owner window. The z-order manager
    /// keeps it stacked after its owner.
    Popup {
        /// The window this popup trails in the stacking order.
        owner: WidgetId,
    },
}

impl WidgetRole {
    /// Whether this role is `Window`.
    #[inline]
    pub fn is_window(&self) -> bool {
        matches!(self, Self::Window { .. })
    }

    /// Whether this role is `Popup`.
    #[inline]
    pub fn is_popup(&self) -> bool {
        matches!(self, Self::Popup { .. })
    }

    /// Whether this role is a modal window.
    #[inline]
    pub fn is_modal_window(&self) -> bool {
        matches!(self, Self::Window { modal: true })
    }

    /// The owner window, if this role is `Popup`.
    #[inline]
    pub fn popup_owner(&self) -> Option<WidgetId> {
        match self {
            Self::Popup { owner } => Some(*owner),
            _ => None,
        }
    }
}

/// Per-widget state stored in the arena.
#[derive(Debug)]
struct WidgetNode {
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    pos: Point,
    size: Size,
    visible: bool,
    enabled: bool,
    focused: bool,
    cursor: CursorShape,
    tooltip: String,
    role: WidgetRole,
}

impl WidgetNode {
    fn new(parent: Option<WidgetId>, role: WidgetRole) -> Self {
        Self {
            parent,
            children: Vec::new(),
            pos: Point::ZERO,
            size: Size::ZERO,
            visible: true,
            enabled: true,
            focused: false,
            cursor: CursorShape::Arrow,
            tooltip: String::new(),
            role,
        }
    }

    /// Bounds in the parent's coordinate space.
    #[inline]
    fn bounds(&self) -> Rect {
        Rect {
            origin: self.pos,
            size: self.size,
        }
    }
}

/// The arena holding every widget of one surface.
///
/// A tree always has a root widget, created at construction and never
/// removable; top-level windows and popups are children of the root. All
/// mutation goes through the tree, so sibling order (which doubles as paint
/// and hit-test order, front = last) has a single authority.
#[derive(Debug)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    root: WidgetId,
}

impl WidgetTree {
    /// Create a tree whose root covers `size` at the origin.
    pub fn new(size: Size) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(WidgetNode::new(None, WidgetRole::Plain));
        nodes[root].size = size;
        Self { nodes, root }
    }

    /// The root widget.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Number of live widgets, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Check whether a widget is alive.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert a new widget as the last (topmost) child of `parent`.
    ///
    /// A `Popup` role must name a live owner; owners are fixed at insertion,
    /// so the owner graph can never form a cycle: an owner is always older
    /// than the popups anchored to it.
    pub fn insert(&mut self, parent: WidgetId, role: WidgetRole) -> TreeResult<WidgetId> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::InvalidParent(parent));
        }
        if let WidgetRole::Popup { owner } = role {
            if !self.nodes.contains_key(owner) {
                return Err(TreeError::InvalidOwner(owner));
            }
        }
        let id = self.nodes.insert(WidgetNode::new(Some(parent), role));
        self.nodes[parent].children.push(id);
        tracing::trace!(target: "casement_core::tree", ?id, ?parent, ?role, "inserted widget");
        Ok(id)
    }

    /// Remove a widget and its entire subtree.
    ///
    /// Returns the ids that were removed, leaf-most last. The root cannot be
    /// removed. Stale ids held elsewhere simply stop resolving.
    pub fn remove(&mut self, id: WidgetId) -> TreeResult<Vec<WidgetId>> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidWidget(id));
        }
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|&c| c != id);
        }
        let mut removed = Vec::new();
        self.collect_subtree(id, &mut removed);
        for &w in &removed {
            self.nodes.remove(w);
        }
        tracing::trace!(
            target: "casement_core::tree",
            ?id,
            removed_count = removed.len(),
            "removed widget subtree"
        );
        Ok(removed)
    }

    fn collect_subtree(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        out.push(id);
        for &child in &node.children {
            self.collect_subtree(child, out);
        }
    }

    /// The parent of a widget, `None` for the root or a dead id.
    #[inline]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// The children of a widget in paint order (front = last). Empty for a
    /// dead id.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Position of a widget within its parent's child sequence.
    pub fn child_index(&self, id: WidgetId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.nodes[parent].children.iter().position(|&c| c == id)
    }

    /// Walk from `id` up to the root, returning the chain leaf-first
    /// (starting with `id` itself). Empty if `id` is dead.
    pub fn ancestor_chain(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            chain.push(current);
            cursor = node.parent;
        }
        chain
    }

    /// Whether `id` is `ancestor` itself or lies in its subtree.
    pub fn is_in_subtree(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Move a widget to the end of its parent's child sequence (topmost among
    /// its siblings). Sibling order is otherwise preserved.
    pub fn raise_child(&mut self, id: WidgetId) -> TreeResult<()> {
        let parent = self
            .parent(id)
            .ok_or(TreeError::InvalidWidget(id))?;
        let children = &mut self.nodes[parent].children;
        children.retain(|&c| c != id);
        children.push(id);
        tracing::trace!(target: "casement_core::tree", ?id, "raised widget to front");
        Ok(())
    }

    // =========================================================================
    // Widget State
    // =========================================================================

    /// Position relative to the parent.
    #[inline]
    pub fn position(&self, id: WidgetId) -> Option<Point> {
        self.nodes.get(id).map(|n| n.pos)
    }

    pub fn set_position(&mut self, id: WidgetId, pos: Point) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.pos = pos;
        Ok(())
    }

    #[inline]
    pub fn size(&self, id: WidgetId) -> Option<Size> {
        self.nodes.get(id).map(|n| n.size)
    }

    pub fn set_size(&mut self, id: WidgetId, size: Size) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.size = size;
        Ok(())
    }

    /// Bounds in the parent's coordinate space.
    #[inline]
    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds())
    }

    #[inline]
    pub fn is_visible(&self, id: WidgetId) -> Option<bool> {
        self.nodes.get(id).map(|n| n.visible)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.visible = visible;
        Ok(())
    }

    #[inline]
    pub fn is_enabled(&self, id: WidgetId) -> Option<bool> {
        self.nodes.get(id).map(|n| n.enabled)
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.enabled = enabled;
        Ok(())
    }

    /// Whether the widget currently sits on the focus path.
    #[inline]
    pub fn is_focused(&self, id: WidgetId) -> Option<bool> {
        self.nodes.get(id).map(|n| n.focused)
    }

    pub fn set_focused(&mut self, id: WidgetId, focused: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.focused = focused;
        Ok(())
    }

    #[inline]
    pub fn cursor(&self, id: WidgetId) -> Option<CursorShape> {
        self.nodes.get(id).map(|n| n.cursor)
    }

    pub fn set_cursor(&mut self, id: WidgetId, cursor: CursorShape) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.cursor = cursor;
        Ok(())
    }

    /// Tooltip text; `None` for dead ids, empty string when unset.
    pub fn tooltip(&self, id: WidgetId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.tooltip.as_str())
    }

    pub fn set_tooltip(&mut self, id: WidgetId, tooltip: impl Into<String>) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.tooltip = tooltip.into();
        Ok(())
    }

    #[inline]
    pub fn role(&self, id: WidgetId) -> Option<WidgetRole> {
        self.nodes.get(id).map(|n| n.role)
    }

    /// The owner window, if `id` is a popup.
    #[inline]
    pub fn popup_owner(&self, id: WidgetId) -> Option<WidgetId> {
        self.role(id).and_then(|r| r.popup_owner())
    }

    /// Set or clear the modal flag of a window.
    pub fn set_modal(&mut self, id: WidgetId, modal: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        match &mut node.role {
            WidgetRole::Window { modal: m } => {
                *m = modal;
                Ok(())
            }
            _ => Err(TreeError::NotAWindow(id)),
        }
    }

    fn node_mut(&mut self, id: WidgetId) -> TreeResult<&mut WidgetNode> {
        self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))
    }

    // =========================================================================
    // Geometry Queries
    // =========================================================================

    /// Sum of all ancestor positions plus the widget's own.
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        let mut pos = Point::ZERO;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.nodes.get(current)?;
            pos += node.pos;
            cursor = node.parent;
        }
        Some(pos)
    }

    /// Bounds in surface coordinates.
    pub fn absolute_bounds(&self, id: WidgetId) -> Option<Rect> {
        Some(Rect {
            origin: self.absolute_position(id)?,
            size: self.nodes.get(id)?.size,
        })
    }

    /// Test a point in the parent's coordinate space against the widget's
    /// bounds.
    pub fn contains_point(&self, id: WidgetId, p: Point) -> bool {
        self.nodes.get(id).is_some_and(|n| n.bounds().contains(p))
    }

    /// Whether the widget and every ancestor are marked visible.
    pub fn is_effectively_visible(&self, id: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(current) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    // =========================================================================
    // Hit Testing and Traversal
    // =========================================================================

    /// Find the topmost widget whose bounds contain `p` (surface coordinates).
    ///
    /// Children are scanned in reverse paint order so the visually top widget
    /// wins ties, and the scan commits to the first visible child containing
    /// the point. Invisible subtrees are skipped entirely. Returns the root
    /// itself when no child matches but the point is within root bounds, and
    /// `None` outside all bounds.
    pub fn find_widget(&self, p: Point) -> Option<WidgetId> {
        self.find_widget_from(self.root, p)
    }

    fn find_widget_from(&self, id: WidgetId, p: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        let local = p - node.pos;
        for &child in node.children.iter().rev() {
            let Some(child_node) = self.nodes.get(child) else {
                continue;
            };
            if child_node.visible && child_node.bounds().contains(local) {
                return self.find_widget_from(child, local);
            }
        }
        if node.bounds().contains(p) { Some(id) } else { None }
    }

    /// Pre-order traversal from `id`, skipping invisible subtrees.
    ///
    /// This is the paint order: parents before children, siblings bottom to
    /// top. Empty if `id` is dead or invisible.
    pub fn visible_preorder(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        self.collect_visible(id, &mut out);
        out
    }

    fn collect_visible(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        out.push(id);
        for &child in &node.children {
            self.collect_visible(child, out);
        }
    }
}
