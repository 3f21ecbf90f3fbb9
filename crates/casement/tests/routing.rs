//! Tests for event routing through the screen.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use casement::{
    CursorIcon, CursorShape, EventCtx, KeyboardModifiers, MouseButton, Pane, Platform, Point,
    RenderBackend, Screen, Size, Widget, WidgetEvent, WidgetId,
};
use tracing_subscriber::EnvFilter;

type EventLog = Rc<RefCell<Vec<(&'static str, WidgetEvent)>>>;

fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

fn receivers(log: &EventLog) -> Vec<&'static str> {
    log.borrow().iter().map(|(name, _)| *name).collect()
}

/// Records every event it sees and handles the ones `handles` accepts.
struct Probe {
    name: &'static str,
    log: EventLog,
    handles: fn(&WidgetEvent) -> bool,
}

impl Probe {
    fn silent(name: &'static str, log: &EventLog) -> Box<Self> {
        Box::new(Self {
            name,
            log: log.clone(),
            handles: |_| false,
        })
    }

    fn handling(
        name: &'static str,
        log: &EventLog,
        handles: fn(&WidgetEvent) -> bool,
    ) -> Box<Self> {
        Box::new(Self {
            name,
            log: log.clone(),
            handles,
        })
    }
}

impl Widget for Probe {
    fn event(&mut self, _ctx: &mut EventCtx<'_>, event: &mut WidgetEvent) -> bool {
        self.log.borrow_mut().push((self.name, event.clone()));
        (self.handles)(event)
    }
}

struct ScriptedPlatform {
    size: Rc<Cell<Size>>,
    framebuffer: Rc<Cell<Size>>,
    clock: Rc<Cell<f64>>,
    physical: bool,
    offset: Point,
    cursors: Rc<RefCell<Vec<CursorIcon>>>,
}

impl ScriptedPlatform {
    fn logical(width: f32, height: f32) -> Self {
        Self {
            size: Rc::new(Cell::new(Size::new(width, height))),
            framebuffer: Rc::new(Cell::new(Size::new(width, height))),
            clock: Rc::new(Cell::new(0.0)),
            physical: false,
            offset: Point::ZERO,
            cursors: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Platform for ScriptedPlatform {
    fn window_size(&self) -> Size {
        self.size.get()
    }
    fn framebuffer_size(&self) -> Size {
        self.framebuffer.get()
    }
    fn now(&self) -> f64 {
        self.clock.get()
    }
    fn set_cursor(&mut self, icon: CursorIcon) {
        self.cursors.borrow_mut().push(icon);
    }
    fn clipboard_text(&mut self) -> Option<String> {
        None
    }
    fn set_clipboard_text(&mut self, _text: &str) {}
    fn physical_cursor_coords(&self) -> bool {
        self.physical
    }
    fn cursor_offset(&self) -> Point {
        self.offset
    }
}

struct NullBackend;

impl RenderBackend for NullBackend {
    fn initialize(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
    fn begin_frame(&mut self, _logical_size: Size, _pixel_ratio: f32) {}
    fn end_frame(&mut self) {}
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl LogSink {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogSink {
    type Writer = LogSink;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn test_screen() -> Screen {
    Screen::new(
        Box::new(ScriptedPlatform::logical(800.0, 600.0)),
        Box::new(NullBackend),
    )
    .unwrap()
}

fn place(screen: &mut Screen, id: WidgetId, x: f32, y: f32, width: f32, height: f32) {
    screen.tree_mut().set_position(id, Point::new(x, y)).unwrap();
    screen
        .tree_mut()
        .set_size(id, Size::new(width, height))
        .unwrap();
}

/// A window holding a group holding a field, already focused by a click on
/// the field. The window handles key events, the field handles characters.
fn focus_chain(log: &EventLog) -> (Screen, WidgetId, WidgetId, WidgetId) {
    let mut screen = test_screen();
    let window = screen
        .add_window(
            Probe::handling("window", log, |e| matches!(e, WidgetEvent::Key(_))),
            false,
        )
        .unwrap();
    place(&mut screen, window, 100.0, 100.0, 300.0, 200.0);
    let group = screen.add_widget(window, Probe::silent("group", log)).unwrap();
    place(&mut screen, group, 10.0, 10.0, 200.0, 150.0);
    let field = screen
        .add_widget(
            group,
            Probe::handling("field", log, |e| matches!(e, WidgetEvent::Char(_))),
        )
        .unwrap();
    place(&mut screen, field, 10.0, 20.0, 80.0, 24.0);

    screen.pointer_moved(130.0, 140.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    screen.mouse_button(0, false, 0).unwrap();
    log.borrow_mut().clear();
    (screen, window, group, field)
}

#[test]
fn test_press_routes_to_topmost_hit() {
    let log = new_log();
    let mut screen = test_screen();
    let under = screen
        .add_widget(screen.root(), Probe::silent("under", &log))
        .unwrap();
    place(&mut screen, under, 100.0, 100.0, 200.0, 200.0);
    let over = screen
        .add_widget(screen.root(), Probe::silent("over", &log))
        .unwrap();
    place(&mut screen, over, 150.0, 150.0, 200.0, 200.0);

    screen.pointer_moved(200.0, 200.0).unwrap();
    log.borrow_mut().clear();
    screen.mouse_button(0, true, 0).unwrap();

    let entries = log.borrow();
    assert!(matches!(entries[0], ("over", WidgetEvent::FocusIn)));
    match &entries[1] {
        ("over", WidgetEvent::MouseButton(e)) => {
            assert!(e.pressed);
            assert_eq!(e.button, MouseButton::Left);
            assert_eq!(e.pos, Point::new(200.0, 200.0));
            assert_eq!(e.local, Point::new(50.0, 50.0));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
    assert!(entries.iter().all(|(name, _)| *name != "under"));
}

#[test]
fn test_unhandled_press_bubbles_to_ancestors() {
    let log = new_log();
    let mut screen = test_screen();
    let window = screen
        .add_window(
            Probe::handling("window", &log, |e| matches!(e, WidgetEvent::MouseButton(_))),
            false,
        )
        .unwrap();
    place(&mut screen, window, 100.0, 100.0, 300.0, 200.0);
    let child = screen.add_widget(window, Probe::silent("child", &log)).unwrap();
    place(&mut screen, child, 20.0, 30.0, 80.0, 24.0);

    screen.pointer_moved(130.0, 140.0).unwrap();
    log.borrow_mut().clear();
    let handled = screen.mouse_button(0, true, 0).unwrap();
    assert!(handled);

    // Focus-gained runs root to leaf, then the press climbs leaf to root.
    assert_eq!(receivers(&log), vec!["window", "child", "child", "window"]);
    let entries = log.borrow();
    match &entries[2] {
        ("child", WidgetEvent::MouseButton(e)) => {
            assert_eq!(e.local, Point::new(10.0, 10.0));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
    match &entries[3] {
        ("window", WidgetEvent::MouseButton(e)) => {
            assert_eq!(e.local, Point::new(30.0, 40.0));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
}

#[test]
fn test_focus_change_notifies_old_and_new_paths() {
    let log = new_log();
    let mut screen = test_screen();
    screen.set_root_behavior(Probe::silent("root", &log));
    let a = screen.add_widget(screen.root(), Probe::silent("a", &log)).unwrap();
    place(&mut screen, a, 100.0, 100.0, 50.0, 50.0);
    let b = screen.add_widget(screen.root(), Probe::silent("b", &log)).unwrap();
    place(&mut screen, b, 300.0, 100.0, 50.0, 50.0);

    screen.pointer_moved(110.0, 110.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    screen.mouse_button(0, false, 0).unwrap();
    screen.pointer_moved(310.0, 110.0).unwrap();
    log.borrow_mut().clear();

    screen.mouse_button(0, true, 0).unwrap();

    assert_eq!(receivers(&log), vec!["a", "root", "root", "b", "b", "root"]);
    let entries = log.borrow();
    assert!(matches!(entries[0], ("a", WidgetEvent::FocusOut)));
    assert!(matches!(entries[1], ("root", WidgetEvent::FocusOut)));
    assert!(matches!(entries[2], ("root", WidgetEvent::FocusIn)));
    assert!(matches!(entries[3], ("b", WidgetEvent::FocusIn)));

    // Each old-path member loses focus exactly once.
    let lost: Vec<_> = entries
        .iter()
        .filter(|(_, e)| matches!(e, WidgetEvent::FocusOut))
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(lost, vec!["a", "root"]);
    drop(entries);

    assert_eq!(screen.tree().is_focused(a), Some(false));
    assert_eq!(screen.tree().is_focused(b), Some(true));
    assert_eq!(screen.focus_path().widgets(), &[b, screen.root()]);
}

#[test]
fn test_press_on_empty_space_clears_focus() {
    let log = new_log();
    let mut screen = test_screen();
    let a = screen.add_widget(screen.root(), Probe::silent("a", &log)).unwrap();
    place(&mut screen, a, 100.0, 100.0, 50.0, 50.0);

    screen.pointer_moved(110.0, 110.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    screen.mouse_button(0, false, 0).unwrap();
    assert!(screen.focus_path().contains(a));

    screen.pointer_moved(600.0, 400.0).unwrap();
    log.borrow_mut().clear();
    screen.mouse_button(0, true, 0).unwrap();

    assert!(screen.focus_path().is_empty());
    assert!(!screen.drag_active());
    assert_eq!(screen.tree().is_focused(a), Some(false));
    assert_eq!(receivers(&log), vec!["a"]);
    assert!(matches!(log.borrow()[0], ("a", WidgetEvent::FocusOut)));
}

#[test]
fn test_capture_routes_motion_exclusively() {
    let log = new_log();
    let mut screen = test_screen();
    let grab = screen.add_widget(screen.root(), Probe::silent("grab", &log)).unwrap();
    place(&mut screen, grab, 100.0, 100.0, 100.0, 100.0);
    let other = screen
        .add_widget(screen.root(), Probe::silent("other", &log))
        .unwrap();
    place(&mut screen, other, 300.0, 100.0, 100.0, 100.0);

    screen.pointer_moved(150.0, 150.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    assert_eq!(screen.drag_widget(), Some(grab));
    log.borrow_mut().clear();

    // The pointer crosses onto `other`, but capture owns the motion.
    screen.pointer_moved(350.0, 150.0).unwrap();

    let entries = log.borrow();
    match entries.as_slice() {
        [("grab", WidgetEvent::MouseDrag(e))] => {
            assert_eq!(e.pos, Point::new(350.0, 150.0));
            assert_eq!(e.delta, Point::new(200.0, 0.0));
            assert_eq!(e.buttons, MouseButton::Left.bit());
        }
        other => panic!("unexpected log: {other:?}"),
    }
    drop(entries);
    assert_eq!(screen.mouse_pos(), Point::new(350.0, 150.0));
}

#[test]
fn test_release_elsewhere_still_notifies_captured() {
    let log = new_log();
    let mut screen = test_screen();
    let grab = screen.add_widget(screen.root(), Probe::silent("grab", &log)).unwrap();
    place(&mut screen, grab, 100.0, 100.0, 100.0, 100.0);
    let other = screen
        .add_widget(screen.root(), Probe::silent("other", &log))
        .unwrap();
    place(&mut screen, other, 300.0, 100.0, 100.0, 100.0);

    screen.pointer_moved(150.0, 150.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    screen.pointer_moved(350.0, 150.0).unwrap();
    log.borrow_mut().clear();

    screen.mouse_button(0, false, 0).unwrap();

    // The widget that lost the pointer hears about the release first.
    assert_eq!(receivers(&log), vec!["grab", "other"]);
    let entries = log.borrow();
    match &entries[0] {
        ("grab", WidgetEvent::MouseButton(e)) => {
            assert!(!e.pressed);
            assert_eq!(e.local, Point::new(250.0, 50.0));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
    match &entries[1] {
        ("other", WidgetEvent::MouseButton(e)) => {
            assert!(!e.pressed);
            assert_eq!(e.local, Point::new(50.0, 50.0));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
    drop(entries);
    assert!(!screen.drag_active());
    assert_eq!(screen.button_state(), 0);
}

#[test]
fn test_other_button_press_ends_capture() {
    let log = new_log();
    let mut screen = test_screen();
    let grab = screen.add_widget(screen.root(), Probe::silent("grab", &log)).unwrap();
    place(&mut screen, grab, 100.0, 100.0, 100.0, 100.0);

    screen.pointer_moved(150.0, 150.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    assert!(screen.drag_active());
    log.borrow_mut().clear();

    screen.mouse_button(2, true, 0).unwrap();

    assert!(!screen.drag_active());
    assert_eq!(
        screen.button_state(),
        MouseButton::Left.bit() | MouseButton::Middle.bit()
    );
    let entries = log.borrow();
    assert!(entries.iter().any(|(name, e)| {
        *name == "grab"
            && matches!(e, WidgetEvent::MouseButton(b) if b.button == MouseButton::Middle && b.pressed)
    }));
    // Focus stays where it was.
    assert!(!entries
        .iter()
        .any(|(_, e)| matches!(e, WidgetEvent::FocusIn | WidgetEvent::FocusOut)));
}

#[test]
fn test_modal_window_gates_outside_pointer_input() {
    let log = new_log();
    let mut screen = test_screen();
    let modal = screen.add_window(Probe::silent("modal", &log), true).unwrap();
    place(&mut screen, modal, 200.0, 200.0, 200.0, 200.0);
    let button = screen.add_widget(modal, Probe::silent("button", &log)).unwrap();
    place(&mut screen, button, 10.0, 10.0, 50.0, 50.0);

    // Click inside so the modal window anchors the focus path.
    screen.pointer_moved(220.0, 220.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    screen.mouse_button(0, false, 0).unwrap();

    screen.pointer_moved(100.0, 100.0).unwrap();
    log.borrow_mut().clear();

    let handled = screen.mouse_button(0, true, 0x0001).unwrap();
    assert!(!handled);
    assert_eq!(screen.button_state(), 0);
    assert_eq!(screen.modifiers(), KeyboardModifiers::SHIFT);
    assert!(log.borrow().is_empty());

    let scrolled = screen.scroll_event(0.0, -2.0).unwrap();
    assert!(!scrolled);
    assert!(log.borrow().is_empty());

    // Inside the modal bounds input flows normally.
    screen.pointer_moved(250.0, 380.0).unwrap();
    log.borrow_mut().clear();
    screen.mouse_button(0, true, 0).unwrap();
    assert!(log
        .borrow()
        .iter()
        .any(|(name, e)| *name == "modal" && matches!(e, WidgetEvent::MouseButton(_))));
}

#[test]
fn test_keyboard_walks_focus_path_leaf_first() {
    let log = new_log();
    let (mut screen, _window, _group, _field) = focus_chain(&log);

    let handled = screen.key_event(65, 30, 1, 0).unwrap();
    assert!(handled);
    assert_eq!(receivers(&log), vec!["field", "group", "window"]);

    log.borrow_mut().clear();
    let handled = screen.char_event('q' as u32).unwrap();
    assert!(handled);
    assert_eq!(receivers(&log), vec!["field"]);
    match &log.borrow()[0] {
        ("field", WidgetEvent::Char(e)) => assert_eq!(e.codepoint, 'q'),
        other => panic!("unexpected entry: {other:?}"),
    }
}

#[test]
fn test_unfocused_path_member_is_skipped() {
    let log = new_log();
    let (mut screen, _window, group, _field) = focus_chain(&log);
    screen.tree_mut().set_focused(group, false).unwrap();

    let handled = screen.key_event(65, 30, 1, 0).unwrap();
    assert!(handled);
    assert_eq!(receivers(&log), vec!["field", "window"]);
}

#[test]
fn test_key_event_without_focus_is_unhandled() {
    let mut screen = test_screen();
    assert!(screen.focus_path().is_empty());
    assert!(!screen.key_event(65, 30, 1, 0).unwrap());
    assert!(!screen.char_event('a' as u32).unwrap());

    // Out-of-range raw values are dropped, not delivered.
    assert!(!screen.key_event(65, 30, 9, 0).unwrap());
    assert!(!screen.char_event(0xD800).unwrap());
    assert!(!screen.mouse_button(9, true, 0).unwrap());
}

#[test]
fn test_physical_coordinates_are_corrected() {
    let log = new_log();
    let mut platform = ScriptedPlatform::logical(800.0, 600.0);
    platform.framebuffer.set(Size::new(1600.0, 1200.0));
    platform.physical = true;
    platform.offset = Point::new(1.0, 2.0);
    let mut screen = Screen::new(Box::new(platform), Box::new(NullBackend)).unwrap();
    assert_eq!(screen.pixel_ratio(), 2.0);

    let target = screen
        .add_widget(screen.root(), Probe::silent("target", &log))
        .unwrap();
    place(&mut screen, target, 150.0, 100.0, 100.0, 100.0);

    // Raw (402, 304) halves to (201, 152), then the hotspot offset lands
    // the position at (200, 150).
    screen.pointer_moved(402.0, 304.0).unwrap();

    assert_eq!(screen.mouse_pos(), Point::new(200.0, 150.0));
    let entries = log.borrow();
    match entries.as_slice() {
        [("target", WidgetEvent::MouseMove(e))] => {
            assert_eq!(e.pos, Point::new(200.0, 150.0));
            assert_eq!(e.local, Point::new(50.0, 50.0));
        }
        other => panic!("unexpected log: {other:?}"),
    }
}

#[test]
fn test_cursor_hint_tracks_hovered_widget() {
    let platform = ScriptedPlatform::logical(800.0, 600.0);
    let cursors = platform.cursors.clone();
    let mut screen = Screen::new(Box::new(platform), Box::new(NullBackend)).unwrap();
    let link = screen.add_widget(screen.root(), Box::new(Pane)).unwrap();
    place(&mut screen, link, 100.0, 100.0, 100.0, 40.0);
    screen.tree_mut().set_cursor(link, CursorShape::Hand).unwrap();

    screen.pointer_moved(120.0, 110.0).unwrap();
    assert_eq!(screen.cursor(), CursorShape::Hand);
    // Staying on the same widget does not re-apply the shape.
    screen.pointer_moved(130.0, 115.0).unwrap();
    screen.pointer_moved(500.0, 400.0).unwrap();
    assert_eq!(screen.cursor(), CursorShape::Arrow);

    assert_eq!(
        cursors.borrow().as_slice(),
        &[CursorIcon::Pointer, CursorIcon::Default]
    );
}

#[test]
fn test_wheel_bubbles_from_hovered_widget() {
    let log = new_log();
    let mut screen = test_screen();
    let window = screen.add_window(Probe::silent("window", &log), false).unwrap();
    place(&mut screen, window, 100.0, 100.0, 300.0, 200.0);
    let list = screen.add_widget(window, Probe::silent("list", &log)).unwrap();
    place(&mut screen, list, 10.0, 10.0, 200.0, 150.0);

    screen.pointer_moved(150.0, 150.0).unwrap();
    log.borrow_mut().clear();
    screen.scroll_event(0.0, -3.0).unwrap();

    assert_eq!(receivers(&log), vec!["list", "window"]);
    match &log.borrow()[0] {
        ("list", WidgetEvent::Wheel(e)) => {
            assert_eq!(e.delta, Point::new(0.0, -3.0));
            assert_eq!(e.pos, Point::new(150.0, 150.0));
            assert_eq!(e.local, Point::new(40.0, 40.0));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
}

#[test]
fn test_dispose_window_drops_focus_and_capture_silently() {
    let log = new_log();
    let mut screen = test_screen();
    let window = screen.add_window(Probe::silent("window", &log), false).unwrap();
    place(&mut screen, window, 100.0, 100.0, 200.0, 150.0);
    let button = screen.add_widget(window, Probe::silent("button", &log)).unwrap();
    place(&mut screen, button, 20.0, 20.0, 40.0, 30.0);

    screen.pointer_moved(130.0, 130.0).unwrap();
    screen.mouse_button(0, true, 0).unwrap();
    assert!(screen.drag_active());
    assert!(screen.focus_path().contains(button));
    log.borrow_mut().clear();

    screen.dispose_window(window).unwrap();

    // No focus-lost notifications on disposal.
    assert!(log.borrow().is_empty());
    assert!(screen.focus_path().is_empty());
    assert!(!screen.drag_active());
    assert!(!screen.tree().contains(window));
    assert!(!screen.tree().contains(button));

    // Routing continues against the remaining tree.
    screen.pointer_moved(130.0, 130.0).unwrap();
    assert_eq!(screen.mouse_pos(), Point::new(130.0, 130.0));
}

#[test]
fn test_handler_disposes_its_own_window() {
    struct CloseOnPress;

    impl Widget for CloseOnPress {
        fn event(&mut self, ctx: &mut EventCtx<'_>, event: &mut WidgetEvent) -> bool {
            if let WidgetEvent::MouseButton(e) = event {
                if e.pressed {
                    let chain = ctx.tree().ancestor_chain(ctx.widget_id());
                    let window = chain[chain.len() - 2];
                    ctx.dispose_window(window);
                    return true;
                }
            }
            false
        }
    }

    let mut screen = test_screen();
    let window = screen.add_window(Box::new(Pane), false).unwrap();
    place(&mut screen, window, 100.0, 100.0, 200.0, 150.0);
    let close = screen.add_widget(window, Box::new(CloseOnPress)).unwrap();
    place(&mut screen, close, 170.0, 10.0, 20.0, 20.0);

    screen.pointer_moved(275.0, 115.0).unwrap();
    let handled = screen.mouse_button(0, true, 0).unwrap();
    assert!(handled);
    assert!(!screen.tree().contains(window));
    assert!(screen.focus_path().is_empty());
    assert!(!screen.drag_active());

    // The release that follows lands on the root without incident.
    assert!(!screen.mouse_button(0, false, 0).unwrap());
    assert_eq!(screen.button_state(), 0);
}

#[test]
fn test_resize_routes_to_root_behavior() {
    let log = new_log();
    let platform = ScriptedPlatform::logical(800.0, 600.0);
    let size = platform.size.clone();
    let framebuffer = platform.framebuffer.clone();
    let mut screen = Screen::new(Box::new(platform), Box::new(NullBackend)).unwrap();
    screen.set_root_behavior(Probe::handling("root", &log, |e| {
        matches!(e, WidgetEvent::Resize(_))
    }));

    size.set(Size::new(1024.0, 768.0));
    framebuffer.set(Size::new(1024.0, 768.0));
    let handled = screen.resize_event().unwrap();
    assert!(handled);

    match log.borrow().as_slice() {
        [("root", WidgetEvent::Resize(e))] => {
            assert_eq!(e.old_size, Size::new(800.0, 600.0));
            assert_eq!(e.new_size, Size::new(1024.0, 768.0));
        }
        other => panic!("unexpected log: {other:?}"),
    }
    assert_eq!(screen.size(), Size::new(1024.0, 768.0));
    assert_eq!(
        screen.tree().size(screen.root()),
        Some(Size::new(1024.0, 768.0))
    );
}

#[test]
fn test_file_drop_routes_to_root_behavior() {
    let log = new_log();
    let mut screen = test_screen();
    screen.set_root_behavior(Probe::handling("root", &log, |e| {
        matches!(e, WidgetEvent::Drop(_))
    }));

    let paths = vec![PathBuf::from("/tmp/readme.md"), PathBuf::from("/tmp/data.csv")];
    let handled = screen.files_dropped(paths.clone()).unwrap();
    assert!(handled);

    match log.borrow().as_slice() {
        [("root", WidgetEvent::Drop(e))] => assert_eq!(e.paths, paths),
        other => panic!("unexpected log: {other:?}"),
    }
}

#[test]
fn test_state_transitions_log_at_debug() {
    let sink = LogSink::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("casement=debug"))
        .with_writer(sink.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut screen = test_screen();
        let back = screen.add_window(Box::new(Pane), false).unwrap();
        place(&mut screen, back, 100.0, 100.0, 200.0, 150.0);
        let front = screen.add_window(Box::new(Pane), false).unwrap();
        place(&mut screen, front, 400.0, 100.0, 200.0, 150.0);

        // A single click on the rear window drives every transition kind.
        screen.pointer_moved(150.0, 150.0).unwrap();
        screen.mouse_button(0, true, 0).unwrap();
        screen.mouse_button(0, false, 0).unwrap();
    });

    let output = sink.contents();
    assert!(output.contains("focus path rebuilt"), "missing focus transition:\n{output}");
    assert!(output.contains("drag capture begins"), "missing capture begin:\n{output}");
    assert!(output.contains("drag capture ends"), "missing capture end:\n{output}");
    assert!(output.contains("raised to front"), "missing raise:\n{output}");
    // Routine routing detail stays below the debug threshold.
    assert!(!output.contains("screen created"), "trace output leaked:\n{output}");
}
