use std::cell::RefCell;
use std::rc::Rc;

use sparkline_rs::ChartError;
use sparkline_rs::interaction::{Brush, BrushExtent, BrushListener, BrushState};

#[derive(Clone)]
struct RecordingListener {
    id: String,
    seen: Rc<RefCell<Vec<Option<BrushExtent>>>>,
}

impl RecordingListener {
    fn new(id: impl Into<String>, seen: Rc<RefCell<Vec<Option<BrushExtent>>>>) -> Self {
        Self {
            id: id.into(),
            seen,
        }
    }
}

impl BrushListener for RecordingListener {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_selection_changed(&mut self, selection: Option<BrushExtent>) {
        self.seen.borrow_mut().push(selection);
    }
}

#[test]
fn listeners_see_each_distinct_change_once() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut brush = BrushState::new();
    brush
        .register_listener(Box::new(RecordingListener::new("linked", seen.clone())))
        .expect("register listener");

    brush.set_selection(Some((10.0, 40.0)));
    brush.set_selection(Some((10.0, 40.0)));
    brush.set_selection(Some((12.0, 40.0)));
    brush.clear();
    brush.clear();

    assert_eq!(
        *seen.borrow(),
        vec![Some((10.0, 40.0)), Some((12.0, 40.0)), None]
    );
    assert_eq!(brush.current_selection(), None);
}

#[test]
fn every_registered_listener_is_notified() {
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));
    let mut brush = BrushState::new();
    brush
        .register_listener(Box::new(RecordingListener::new("a", first.clone())))
        .expect("register a");
    brush
        .register_listener(Box::new(RecordingListener::new("b", second.clone())))
        .expect("register b");
    assert_eq!(brush.listener_count(), 2);

    brush.set_selection(Some((0.0, 5.0)));
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
    assert_eq!(brush.current_selection(), Some((0.0, 5.0)));
}

#[test]
fn duplicate_and_empty_ids_are_rejected() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut brush = BrushState::new();
    brush
        .register_listener(Box::new(RecordingListener::new("dup", seen.clone())))
        .expect("first registration");

    let duplicate = brush.register_listener(Box::new(RecordingListener::new("dup", seen.clone())));
    assert!(matches!(duplicate, Err(ChartError::InvalidData(_))));

    let empty = brush.register_listener(Box::new(RecordingListener::new("", seen)));
    assert!(matches!(empty, Err(ChartError::InvalidData(_))));
    assert_eq!(brush.listener_count(), 1);
}

#[test]
fn unregistered_listeners_stop_receiving_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut brush = BrushState::new();
    brush
        .register_listener(Box::new(RecordingListener::new("gone", seen.clone())))
        .expect("register listener");

    assert!(brush.unregister_listener("gone"));
    assert!(!brush.unregister_listener("gone"));
    assert!(!brush.has_listener("gone"));

    brush.set_selection(Some((1.0, 2.0)));
    assert!(seen.borrow().is_empty());
}

#[test]
fn plain_options_act_as_brush_snapshots() {
    let active: Option<BrushExtent> = Some((3.0, 9.0));
    let idle: Option<BrushExtent> = None;
    assert_eq!(active.current_selection(), Some((3.0, 9.0)));
    assert_eq!(idle.current_selection(), None);
}
