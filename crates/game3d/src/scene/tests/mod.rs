//! Scene tree integration tests

mod lifecycle;

use crate::events::Event;
use crate::scene::{NodeAccess, Object};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared log of node names in the order their objects saw an event
type Trace = Rc<RefCell<Vec<String>>>;

/// Records the owning node's name on every event
struct Tracer {
    trace: Trace,
}

impl Tracer {
    fn boxed(trace: &Trace) -> Box<Self> {
        Box::new(Self { trace: Rc::clone(trace) })
    }
}

impl Object for Tracer {
    fn on_event(&mut self, node: &mut NodeAccess<'_>, _event: &Event<'_>) {
        self.trace.borrow_mut().push(node.name().to_string());
    }
}
