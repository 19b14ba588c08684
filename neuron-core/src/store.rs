//! Persistence collaborator.

use crate::error::CalendarResult;
use crate::event::Event;

/// Loads and saves the whole event collection.
///
/// `load` should return an empty collection when nothing was saved yet. Every
/// `save` replaces what was stored before.
pub trait Store {
    fn load(&self) -> CalendarResult<Vec<Event>>;

    fn save(&mut self, events: &[Event]) -> CalendarResult<()>;
}

/// Store that keeps the last saved collection in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    events: Vec<Event>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        MemoryStore { events, saves: 0 }
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Store for MemoryStore {
    fn load(&self) -> CalendarResult<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn save(&mut self, events: &[Event]) -> CalendarResult<()> {
        self.events = events.to_vec();
        self.saves += 1;
        Ok(())
    }
}
