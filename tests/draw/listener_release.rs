use crate::common::solid_photo;
use gesdro::draw::{
    CanvasRect, DragListeners, DrawSettings, DrawingSurface, ListenerToken, PointerInput,
    PointerKind,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct CountingListeners {
    next: Cell<u64>,
    live: RefCell<Vec<ListenerToken>>,
    kinds: RefCell<Vec<PointerKind>>,
}

impl CountingListeners {
    fn live(&self) -> usize {
        self.live.borrow().len()
    }
}

impl DragListeners for CountingListeners {
    fn attach(&self, kind: PointerKind) -> ListenerToken {
        self.next.set(self.next.get() + 1);
        let token = ListenerToken(self.next.get());
        self.live.borrow_mut().push(token);
        self.kinds.borrow_mut().push(kind);
        token
    }

    fn detach(&self, token: ListenerToken) {
        let mut live = self.live.borrow_mut();
        let before = live.len();
        live.retain(|held| *held != token);
        assert_eq!(live.len() + 1, before, "token {token:?} detached twice");
    }
}

fn setup() -> (DrawingSurface, Rc<CountingListeners>, CanvasRect) {
    let listeners = Rc::new(CountingListeners::default());
    let engine = DrawingSurface::new(DrawSettings::default(), listeners.clone());
    let rect = CanvasRect::unscaled(engine.surface().size());
    (engine, listeners, rect)
}

#[test]
fn touch_gesture_registers_touch_listeners_until_pointer_up() {
    let (mut engine, listeners, rect) = setup();
    engine.pointer_down(&PointerInput::touch(5.0, 5.0), rect);
    assert_eq!(listeners.live(), 1);
    assert_eq!(*listeners.kinds.borrow(), vec![PointerKind::Touch]);
    engine.pointer_move(&PointerInput::touch(25.0, 5.0), rect);
    engine.pointer_up();
    assert_eq!(listeners.live(), 0);
}

#[test]
fn changing_photo_mid_gesture_releases_listeners_without_history() {
    let (mut engine, listeners, rect) = setup();
    engine.pointer_down(&PointerInput::mouse(5.0, 5.0), rect);
    engine.load_reference(solid_photo("next", 100, 100, [0, 0, 0, 255]));
    assert_eq!(listeners.live(), 0);
    assert!(!engine.is_drawing());
    assert_eq!(engine.history().len(), 1);
    assert!(!engine.pointer_up());
}

#[test]
fn dropping_the_surface_mid_gesture_releases_listeners() {
    let (mut engine, listeners, rect) = setup();
    engine.pointer_down(&PointerInput::mouse(5.0, 5.0), rect);
    drop(engine);
    assert_eq!(listeners.live(), 0);
}

#[test]
fn touch_without_active_points_does_not_start_a_gesture() {
    let (mut engine, listeners, rect) = setup();
    let empty = PointerInput::Touch {
        touches: Vec::new(),
    };
    assert!(!engine.pointer_down(&empty, rect));
    assert_eq!(listeners.live(), 0);
}
