mod bus;
mod events;

pub use bus::EventBus;
pub use events::{EditorEvent, ReplaceOrigin};

/// Receives editor events. Closures taking `&EditorEvent` implement it.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EditorEvent),
{
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
