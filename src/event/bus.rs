use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{EditorEvent, EventHandler};

type SharedHandler = Rc<RefCell<Box<dyn EventHandler>>>;

/// Fans editor events out to subscribers, in subscription order.
///
/// Handlers may subscribe more handlers while an event is being delivered;
/// those start receiving from the next event on.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<SharedHandler>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(Rc::new(RefCell::new(handler)));
    }

    pub fn emit(&self, event: EditorEvent) {
        log::trace!("Emitting {event:?}");
        // Snapshot first: the list must not stay borrowed while handlers run.
        let handlers: Vec<SharedHandler> = self.handlers.borrow().clone();
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => handler.handle_event(&event),
                Err(_) => log::warn!("Dropped re-entrant {event:?} for a busy handler"),
            }
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}
