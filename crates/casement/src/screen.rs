//! The screen: root of the widget tree and single entry point for events.
//!
//! A [`Screen`] owns the widget tree, the behavior map, focus and drag
//! state, and the boxed platform and render services. The embedding
//! application forwards every raw platform callback to one of the screen's
//! entry points; the screen applies coordinate corrections, consults the
//! modal gate, chooses between capture and hit-test routing, and delivers
//! typed events to widget behaviors.
//!
//! # Event Flow
//!
//! Each entry point follows the same outline:
//!
//! 1. Drop the event if event processing is disabled.
//! 2. Record the interaction timestamp.
//! 3. Dispatch inside a panic guard. A panicking handler surfaces as
//!    [`ScreenError::HandlerPanic`] and the screen stays usable.
//! 4. Apply structural requests handlers queued on their [`EventCtx`].
//!
//! # Re-entrancy
//!
//! Handlers may mutate the tree while their event is in flight. Focus,
//! drag, and dispatch all hold widget ids rather than references and
//! revalidate them at each use, so a handler closing its own window is
//! safe.
//!
//! # Example
//!
//! ```ignore
//! use casement::{Screen, Widget};
//!
//! let mut screen = Screen::new(Box::new(platform), Box::new(backend))?;
//! let window = screen.add_window(Box::new(MyWindow::new()), false)?;
//! screen.center_window(window)?;
//!
//! // Inside the platform event loop:
//! screen.pointer_moved(x, y)?;
//! screen.mouse_button(0, true, mods)?;
//! screen.draw_all();
//! ```

use std::path::PathBuf;

use casement_core::logging::targets;
use casement_core::{CursorShape, Point, Size, TreeError, WidgetId, WidgetRole, WidgetTree};
use tracing::{error, trace, warn};

use crate::dispatch::{deliver_bubbling, deliver_direct};
use crate::drag::DragState;
use crate::error::{ScreenError, ScreenResult};
use crate::event::{
    CharEvent, DropEvent, KeyAction, KeyEvent, KeyboardModifiers, MouseButton, MouseButtonEvent,
    MouseDragEvent, MouseMoveEvent, ResizeEvent, WheelEvent, WidgetEvent,
};
use crate::focus::FocusPath;
use crate::modal::modal_gate_allows;
use crate::platform::{Platform, RenderBackend};
use crate::widget::{BehaviorMap, PaintContext, Pane, ScreenAction, Widget};
use crate::zorder;

/// How long the pointer must rest before [`Screen::tooltip_anchor`]
/// reports an anchor.
const TOOLTIP_DELAY_SECONDS: f64 = 0.5;

/// Rounds of deferred-request processing per event before the remainder
/// is dropped. Requests queued while applying requests re-enter the loop;
/// the bound stops two handlers endlessly re-focusing each other.
const MAX_ACTION_ROUNDS: usize = 8;

/// The root dispatcher.
///
/// Owns all routing state for one surface. See the [module
/// documentation](self) for the event flow.
pub struct Screen {
    tree: WidgetTree,
    behaviors: BehaviorMap,
    focus: FocusPath,
    drag: DragState,
    platform: Box<dyn Platform>,
    backend: Box<dyn RenderBackend>,
    /// Logical surface size.
    size: Size,
    /// Framebuffer size in physical pixels.
    framebuffer_size: Size,
    /// Framebuffer pixels per logical unit.
    pixel_ratio: f32,
    /// Pointer position in logical surface coordinates.
    mouse_pos: Point,
    /// Bitmask of currently pressed mouse buttons.
    button_state: u8,
    /// Modifiers as of the last button event.
    modifiers: KeyboardModifiers,
    /// The cursor shape most recently applied to the platform.
    cursor: CursorShape,
    /// Timestamp of the last inbound event, in platform time.
    last_interaction: f64,
    process_events: bool,
    /// Structural requests queued by handlers, drained after dispatch.
    actions: Vec<ScreenAction>,
}

impl Screen {
    /// Create a screen over the given platform services and render
    /// backend.
    ///
    /// Initializes the backend and sizes the tree root from the platform's
    /// current window size. The root starts with a [`Pane`] behavior;
    /// replace it with [`set_root_behavior`](Self::set_root_behavior) to
    /// observe resize and drop events.
    ///
    /// # Errors
    ///
    /// [`ScreenError::BackendInit`] if the backend fails to initialize.
    pub fn new(
        platform: Box<dyn Platform>,
        mut backend: Box<dyn RenderBackend>,
    ) -> ScreenResult<Self> {
        backend.initialize().map_err(ScreenError::BackendInit)?;

        let size = platform.window_size();
        let framebuffer_size = platform.framebuffer_size();
        let pixel_ratio = if size.width > 0.0 {
            framebuffer_size.width / size.width
        } else {
            1.0
        };
        let last_interaction = platform.now();

        let tree = WidgetTree::new(size);
        let mut behaviors = BehaviorMap::default();
        behaviors.insert(tree.root(), Box::new(Pane));

        trace!(
            target: targets::SCREEN,
            width = size.width,
            height = size.height,
            pixel_ratio,
            "screen created"
        );
        Ok(Self {
            tree,
            behaviors,
            focus: FocusPath::new(),
            drag: DragState::new(),
            platform,
            backend,
            size,
            framebuffer_size,
            pixel_ratio,
            mouse_pos: Point::ZERO,
            button_state: 0,
            modifiers: KeyboardModifiers::NONE,
            cursor: CursorShape::default(),
            last_interaction,
            process_events: true,
            actions: Vec::new(),
        })
    }

    // =========================================================================
    // Tree and behavior management
    // =========================================================================

    /// The widget tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable access to the widget tree.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The tree root.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    /// Insert a plain widget under `parent` with the given behavior.
    pub fn add_widget(
        &mut self,
        parent: WidgetId,
        behavior: Box<dyn Widget>,
    ) -> ScreenResult<WidgetId> {
        let id = self.tree.insert(parent, WidgetRole::Plain)?;
        self.behaviors.insert(id, behavior);
        Ok(id)
    }

    /// Insert a top-level window with the given behavior.
    pub fn add_window(&mut self, behavior: Box<dyn Widget>, modal: bool) -> ScreenResult<WidgetId> {
        let root = self.tree.root();
        let id = self.tree.insert(root, WidgetRole::Window { modal })?;
        self.behaviors.insert(id, behavior);
        Ok(id)
    }

    /// Insert a top-level popup stacked above `owner`.
    pub fn add_popup(&mut self, owner: WidgetId, behavior: Box<dyn Widget>) -> ScreenResult<WidgetId> {
        let root = self.tree.root();
        let id = self.tree.insert(root, WidgetRole::Popup { owner })?;
        self.behaviors.insert(id, behavior);
        Ok(id)
    }

    /// Attach a behavior to an existing widget, replacing any previous one.
    pub fn set_behavior(&mut self, widget: WidgetId, behavior: Box<dyn Widget>) -> ScreenResult<()> {
        if !self.tree.contains(widget) {
            return Err(TreeError::InvalidWidget(widget).into());
        }
        self.behaviors.insert(widget, behavior);
        Ok(())
    }

    /// Replace the root behavior. The root receives resize events, drop
    /// events, and any pointer event no other widget handled.
    pub fn set_root_behavior(&mut self, behavior: Box<dyn Widget>) {
        let root = self.tree.root();
        self.behaviors.insert(root, behavior);
    }

    /// Remove a window (or any widget) and its whole subtree.
    ///
    /// Focus-path members inside the subtree are dropped without
    /// focus-lost notifications, and an active drag capture inside the
    /// subtree ends.
    pub fn dispose_window(&mut self, window: WidgetId) -> ScreenResult<()> {
        if self.focus.intersects_subtree(&self.tree, window) {
            self.focus.clear_silent(&mut self.tree);
        }
        self.drag.invalidate_subtree(&self.tree, window);
        let removed = self.tree.remove(window)?;
        trace!(target: targets::SCREEN, ?window, widgets = removed.len(), "window disposed");
        for id in removed {
            self.behaviors.remove(id);
        }
        Ok(())
    }

    /// Center a window within the surface.
    pub fn center_window(&mut self, window: WidgetId) -> ScreenResult<()> {
        let Some(wsize) = self.tree.size(window) else {
            return Err(TreeError::InvalidWidget(window).into());
        };
        let pos = Point::new(
            (self.size.width - wsize.width) / 2.0,
            (self.size.height - wsize.height) / 2.0,
        );
        self.tree.set_position(window, pos)?;
        Ok(())
    }

    /// Bring a window to the front, re-stacking its owned popups above it.
    pub fn move_window_to_front(&mut self, window: WidgetId) {
        zorder::move_window_to_front(&mut self.tree, window);
    }

    /// Drop behaviors whose widgets no longer exist.
    ///
    /// Called automatically once per frame and after panic recovery;
    /// available for embedders that remove many widgets between frames.
    pub fn prune_behaviors(&mut self) {
        let tree = &self.tree;
        self.behaviors.retain(|id, _| tree.contains(id));
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The current focus path, leaf-first.
    #[inline]
    pub fn focus_path(&self) -> &FocusPath {
        &self.focus
    }

    /// Move keyboard focus to `widget`, or clear it with `None`.
    ///
    /// Rebuilds the focus path, delivers focus-lost and focus-gained
    /// notifications, and brings the widget's window to the front.
    pub fn update_focus(&mut self, widget: Option<WidgetId>) {
        self.update_focus_inner(widget);
        self.apply_actions();
    }

    fn update_focus_inner(&mut self, widget: Option<WidgetId>) {
        let window = self
            .focus
            .update(&mut self.tree, &mut self.behaviors, &mut self.actions, widget);
        if let Some(window) = window {
            zorder::move_window_to_front(&mut self.tree, window);
        }
    }

    // =========================================================================
    // Raw event entry points
    // =========================================================================

    /// The pointer moved to the raw device position `(x, y)`.
    ///
    /// Under an active drag capture the motion goes to the captured widget
    /// alone as a drag event; otherwise the position is hit-tested, the
    /// cursor shape updated from the hit widget's hint, and a motion event
    /// delivered through the hit widget's ancestor chain.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }
        let mut p = Point::new(x as f32, y as f32);
        if self.platform.physical_cursor_coords() {
            p = p / self.pixel_ratio;
        }
        self.catch_faults(move |screen| screen.pointer_moved_impl(p))
    }

    fn pointer_moved_impl(&mut self, raw: Point) -> bool {
        let p = raw - self.platform.cursor_offset();
        let handled = match self.drag.validate(&self.tree) {
            Some(captured) => {
                let parent_abs = self
                    .tree
                    .parent(captured)
                    .and_then(|parent| self.tree.absolute_position(parent))
                    .unwrap_or(Point::ZERO);
                let mut event = WidgetEvent::MouseDrag(MouseDragEvent {
                    pos: p - parent_abs,
                    delta: p - self.mouse_pos,
                    buttons: self.button_state,
                    modifiers: self.modifiers,
                });
                deliver_direct(
                    &mut self.tree,
                    &mut self.behaviors,
                    &mut self.actions,
                    captured,
                    &mut event,
                )
            }
            None => {
                let hit = self.tree.find_widget(p);
                if let Some(hit) = hit {
                    self.apply_cursor_hint(hit);
                }
                let target = hit.unwrap_or(self.tree.root());
                let mut event = WidgetEvent::MouseMove(MouseMoveEvent {
                    pos: p,
                    local: Point::ZERO,
                    delta: p - self.mouse_pos,
                    buttons: self.button_state,
                    modifiers: self.modifiers,
                });
                deliver_bubbling(
                    &mut self.tree,
                    &mut self.behaviors,
                    &mut self.actions,
                    target,
                    &mut event,
                )
            }
        };
        self.mouse_pos = p;
        self.apply_actions();
        handled
    }

    /// A mouse button changed state.
    ///
    /// `button` uses the raw platform numbering (0 = left, 1 = right).
    /// Presses of the left or right button on a widget other than the root
    /// begin a drag capture and move focus to the pressed widget; a press
    /// on empty space clears focus. Any release, and any press of another
    /// button, ends an active capture.
    pub fn mouse_button(&mut self, button: i32, pressed: bool, modifiers: u32) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }
        self.modifiers = KeyboardModifiers::from_bits(modifiers);
        let Some(button) = MouseButton::from_raw(button) else {
            return Ok(false);
        };
        self.catch_faults(move |screen| screen.mouse_button_impl(button, pressed))
    }

    fn mouse_button_impl(&mut self, button: MouseButton, pressed: bool) -> bool {
        if !modal_gate_allows(&self.tree, self.focus.widgets(), self.mouse_pos) {
            return false;
        }

        if pressed {
            self.button_state |= button.bit();
        } else {
            self.button_state &= !button.bit();
        }

        let drop_widget = self.tree.find_widget(self.mouse_pos);

        // A release landing on some other widget still notifies the widget
        // holding capture, so it can finish its gesture.
        if !pressed {
            if let Some(captured) = self.drag.validate(&self.tree) {
                if drop_widget != Some(captured) {
                    let mut event = WidgetEvent::MouseButton(MouseButtonEvent {
                        pos: self.mouse_pos,
                        local: Point::ZERO,
                        button,
                        pressed: false,
                        modifiers: self.modifiers,
                    });
                    deliver_direct(
                        &mut self.tree,
                        &mut self.behaviors,
                        &mut self.actions,
                        captured,
                        &mut event,
                    );
                }
            }
        }

        if let Some(hit) = drop_widget {
            self.apply_cursor_hint(hit);
        }

        if pressed && button.starts_drag() {
            let target = drop_widget.filter(|&w| w != self.tree.root());
            match target {
                Some(widget) => {
                    self.drag.begin(widget);
                    self.update_focus_inner(Some(widget));
                }
                None => {
                    self.drag.clear();
                    self.update_focus_inner(None);
                }
            }
        } else {
            self.drag.clear();
        }

        let target = drop_widget.unwrap_or(self.tree.root());
        let mut event = WidgetEvent::MouseButton(MouseButtonEvent {
            pos: self.mouse_pos,
            local: Point::ZERO,
            button,
            pressed,
            modifiers: self.modifiers,
        });
        let handled = deliver_bubbling(
            &mut self.tree,
            &mut self.behaviors,
            &mut self.actions,
            target,
            &mut event,
        );
        self.apply_actions();
        handled
    }

    /// A raw keyboard key changed state.
    ///
    /// Walks the focus path from the leaf toward the root, excluding the
    /// root, delivering to each focused member until one handles it. Not
    /// modally gated.
    pub fn key_event(
        &mut self,
        key: i32,
        scancode: i32,
        action: i32,
        modifiers: u32,
    ) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }
        let Some(action) = KeyAction::from_raw(action) else {
            return Ok(false);
        };
        let data = KeyEvent {
            key,
            scancode,
            action,
            modifiers: KeyboardModifiers::from_bits(modifiers),
        };
        self.catch_faults(move |screen| screen.keyboard_walk(WidgetEvent::Key(data)))
    }

    /// The platform translated keyboard input into a character.
    ///
    /// Routed like [`key_event`](Self::key_event). Codepoints outside the
    /// valid char range are dropped.
    pub fn char_event(&mut self, codepoint: u32) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }
        let Some(codepoint) = char::from_u32(codepoint) else {
            return Ok(false);
        };
        let data = CharEvent { codepoint };
        self.catch_faults(move |screen| screen.keyboard_walk(WidgetEvent::Char(data)))
    }

    fn keyboard_walk(&mut self, mut event: WidgetEvent) -> bool {
        let root = self.tree.root();
        let path = self.focus.widgets().to_vec();
        let mut handled = false;
        for &id in &path {
            if id == root {
                continue;
            }
            if self.tree.is_focused(id) != Some(true) {
                continue;
            }
            if deliver_direct(
                &mut self.tree,
                &mut self.behaviors,
                &mut self.actions,
                id,
                &mut event,
            ) {
                handled = true;
                break;
            }
        }
        self.apply_actions();
        handled
    }

    /// Scroll input at the current pointer position.
    ///
    /// Modally gated like button events.
    pub fn scroll_event(&mut self, x: f64, y: f64) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }
        let delta = Point::new(x as f32, y as f32);
        self.catch_faults(move |screen| screen.scroll_event_impl(delta))
    }

    fn scroll_event_impl(&mut self, delta: Point) -> bool {
        if !modal_gate_allows(&self.tree, self.focus.widgets(), self.mouse_pos) {
            return false;
        }
        let target = self
            .tree
            .find_widget(self.mouse_pos)
            .unwrap_or(self.tree.root());
        let mut event = WidgetEvent::Wheel(WheelEvent {
            pos: self.mouse_pos,
            local: Point::ZERO,
            delta,
        });
        let handled = deliver_bubbling(
            &mut self.tree,
            &mut self.behaviors,
            &mut self.actions,
            target,
            &mut event,
        );
        self.apply_actions();
        handled
    }

    /// The surface was resized.
    ///
    /// Queries the platform for the new logical and framebuffer sizes. If
    /// either is degenerate the stored sizes stay untouched and the event
    /// is reported unhandled; otherwise the sizes and pixel ratio are
    /// updated, the root resized, and a resize event delivered to the root
    /// behavior.
    pub fn resize_event(&mut self) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }

        let new_size = self.platform.window_size();
        let new_fb = self.platform.framebuffer_size();
        if new_size.is_empty() || new_fb.is_empty() {
            return Ok(false);
        }

        let old_size = self.size;
        self.size = new_size;
        self.framebuffer_size = new_fb;
        self.pixel_ratio = new_fb.width / new_size.width;
        let root = self.tree.root();
        let _ = self.tree.set_size(root, new_size);

        self.catch_faults(move |screen| {
            let mut event = WidgetEvent::Resize(ResizeEvent { old_size, new_size });
            let handled = deliver_direct(
                &mut screen.tree,
                &mut screen.behaviors,
                &mut screen.actions,
                root,
                &mut event,
            );
            screen.apply_actions();
            handled
        })
    }

    /// Files were dropped onto the surface.
    ///
    /// Forwarded to the root behavior without gating.
    pub fn files_dropped(&mut self, paths: Vec<PathBuf>) -> ScreenResult<bool> {
        self.last_interaction = self.platform.now();
        if !self.process_events {
            return Ok(false);
        }
        self.catch_faults(move |screen| {
            let root = screen.tree.root();
            let mut event = WidgetEvent::Drop(DropEvent { paths });
            let handled = deliver_direct(
                &mut screen.tree,
                &mut screen.behaviors,
                &mut screen.actions,
                root,
                &mut event,
            );
            screen.apply_actions();
            handled
        })
    }

    // =========================================================================
    // Frame driving
    // =========================================================================

    /// Draw one frame.
    ///
    /// Refreshes the surface sizes from the platform, begins a backend
    /// frame, paints every effectively visible widget in back-to-front
    /// order, and ends the frame. Does nothing while the root is hidden.
    pub fn draw_all(&mut self) {
        let root = self.tree.root();
        if self.tree.is_visible(root) != Some(true) {
            return;
        }

        let size = self.platform.window_size();
        let fb = self.platform.framebuffer_size();
        if !size.is_empty() && !fb.is_empty() {
            self.size = size;
            self.framebuffer_size = fb;
            self.pixel_ratio = fb.width / size.width;
            let _ = self.tree.set_size(root, size);
        }
        self.prune_behaviors();

        self.backend.begin_frame(self.size, self.pixel_ratio);
        for id in self.tree.visible_preorder(root) {
            let Some(rect) = self.tree.absolute_bounds(id) else {
                continue;
            };
            let Some(behavior) = self.behaviors.get(id) else {
                continue;
            };
            let mut ctx = PaintContext::new(self.backend.as_mut(), rect, self.pixel_ratio);
            behavior.paint(&mut ctx);
        }
        self.backend.end_frame();
    }

    /// Where a tooltip should appear, if one is due.
    ///
    /// Reports the hovered widget, its tooltip text, and an anchor point
    /// centered below it once the pointer has rested long enough over a
    /// widget with tooltip text.
    pub fn tooltip_anchor(&self) -> Option<(WidgetId, &str, Point)> {
        if self.idle_seconds() <= TOOLTIP_DELAY_SECONDS {
            return None;
        }
        let hovered = self.tree.find_widget(self.mouse_pos)?;
        let text = self.tree.tooltip(hovered)?;
        if text.is_empty() {
            return None;
        }
        let abs = self.tree.absolute_position(hovered)?;
        let size = self.tree.size(hovered)?;
        Some((
            hovered,
            text,
            Point::new(abs.x + size.width / 2.0, abs.y + size.height + 10.0),
        ))
    }

    // =========================================================================
    // Surface state
    // =========================================================================

    /// Logical surface size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Framebuffer size in physical pixels.
    #[inline]
    pub fn framebuffer_size(&self) -> Size {
        self.framebuffer_size
    }

    /// Framebuffer pixels per logical unit.
    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Current pointer position in logical surface coordinates.
    #[inline]
    pub fn mouse_pos(&self) -> Point {
        self.mouse_pos
    }

    /// Bitmask of currently pressed mouse buttons.
    #[inline]
    pub fn button_state(&self) -> u8 {
        self.button_state
    }

    /// Modifiers as of the last button event.
    #[inline]
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// The cursor shape currently applied to the platform.
    #[inline]
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Whether a drag capture is in progress.
    #[inline]
    pub fn drag_active(&self) -> bool {
        self.drag.active()
    }

    /// The widget holding drag capture, if any.
    #[inline]
    pub fn drag_widget(&self) -> Option<WidgetId> {
        self.drag.widget()
    }

    /// Seconds since the last inbound event.
    pub fn idle_seconds(&self) -> f64 {
        self.platform.now() - self.last_interaction
    }

    /// Enable or disable event processing. While disabled, every entry
    /// point reports the event unhandled without dispatching; the
    /// interaction timestamp still refreshes.
    pub fn set_process_events(&mut self, enabled: bool) {
        self.process_events = enabled;
    }

    /// Whether events are currently processed.
    #[inline]
    pub fn process_events(&self) -> bool {
        self.process_events
    }

    /// Read the system clipboard.
    pub fn clipboard_text(&mut self) -> Option<String> {
        self.platform.clipboard_text()
    }

    /// Replace the system clipboard contents.
    pub fn set_clipboard_text(&mut self, text: &str) {
        self.platform.set_clipboard_text(text);
    }

    /// Downcast access to the render backend for backend-specific drawing.
    pub fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }

    /// An indented dump of the widget tree, for debugging.
    pub fn dump_tree(&self) -> String {
        casement_core::logging::format_tree(&self.tree, self.tree.root())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply_cursor_hint(&mut self, widget: WidgetId) {
        if let Some(hint) = self.tree.cursor(widget) {
            if hint != self.cursor {
                self.cursor = hint;
                self.platform.set_cursor(hint.to_icon());
            }
        }
    }

    /// Drain deferred requests, including any queued while draining.
    fn apply_actions(&mut self) {
        let mut rounds = 0;
        while !self.actions.is_empty() {
            rounds += 1;
            if rounds > MAX_ACTION_ROUNDS {
                warn!(
                    target: targets::SCREEN,
                    dropped = self.actions.len(),
                    "deferred requests still queueing after {MAX_ACTION_ROUNDS} rounds, dropping the rest"
                );
                self.actions.clear();
                break;
            }
            let batch = std::mem::take(&mut self.actions);
            for action in batch {
                match action {
                    ScreenAction::RequestFocus(target) => self.update_focus_inner(target),
                    ScreenAction::DisposeWindow(window) => {
                        let _ = self.dispose_window(window);
                    }
                    ScreenAction::RaiseWindow(window) => {
                        zorder::move_window_to_front(&mut self.tree, window);
                    }
                }
            }
        }
    }

    /// Run `f` with panics contained to the dispatcher boundary.
    ///
    /// On a panic the in-flight capture and deferred requests are
    /// discarded, dead behaviors swept, and the panic surfaced as an
    /// error; stored input state from before the event remains valid.
    fn catch_faults<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> ScreenResult<T> {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&mut *self))) {
            Ok(value) => Ok(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(
                    target: targets::SCREEN,
                    %message,
                    "widget handler panicked; discarding in-flight event state"
                );
                self.actions.clear();
                self.drag.clear();
                self.prune_behaviors();
                Err(ScreenError::HandlerPanic(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
