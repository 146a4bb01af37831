//! Host events and listeners.

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;

use crate::node::HostId;

/// An event dispatched against a host node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Lower-cased event name, e.g. `click`
    pub name: CompactString,
    /// Host node the event was dispatched on
    pub target: HostId,
}

impl Event {
    /// Create a new event.
    pub fn new(name: impl Into<CompactString>, target: HostId) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// A shared event callback.
///
/// Cloning is cheap; clones compare equal to the original.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler(..)")
    }
}

impl<F: Fn(&Event) + 'static> From<F> for EventHandler {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_handler_call() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let handler = EventHandler::new(move |e: &Event| {
            assert_eq!(e.name, "click");
            counter.set(counter.get() + 1);
        });
        handler.call(&Event::new("click", 3));
        handler.call(&Event::new("click", 3));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_handler_identity() {
        let a = EventHandler::new(|_| {});
        let b = EventHandler::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
