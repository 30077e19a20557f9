use std::{cell::RefCell, rc::Rc};

/// A lifecycle event recorded by a [Tracked] value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The value with the given id was constructed
    Constructed(u32),
    /// The value with the given id was dropped
    Dropped(u32),
}

/// Captures lifecycle events in the order they happen
///
/// Clones of an `EventLog` share the same list of events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    /// Makes a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event to the log
    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Returns a copy of the events captured so far
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns the number of times the event has been captured
    pub fn count(&self, event: Event) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    /// Clears the captured events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// A value that records its construction and destruction in an [EventLog]
#[derive(Debug)]
pub struct Tracked {
    id: u32,
    log: EventLog,
}

impl Tracked {
    /// Makes a new value, recording an [Event::Constructed] event
    pub fn new(id: u32, log: &EventLog) -> Self {
        log.push(Event::Constructed(id));
        Self {
            id,
            log: log.clone(),
        }
    }

    /// Returns the value's id
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.push(Event::Dropped(self.id));
    }
}
