//! In-memory event collection.
//!
//! Holds events in insertion order and tracks whether anything changed since
//! the last successful save. Persistence itself is the caller's job.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventDraft};

#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<Event>,
    dirty: bool,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a loaded collection. Later duplicates of an id are
    /// dropped. The result starts clean.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut seen = HashSet::new();
        let events = events
            .into_iter()
            .filter(|event| {
                let fresh = seen.insert(event.id.clone());
                if !fresh {
                    warn!(id = %event.id, "dropping event with duplicate id");
                }
                fresh
            })
            .collect();

        EventStore {
            events,
            dirty: false,
        }
    }

    /// Validate and append a new event, returning its id.
    pub fn add(&mut self, draft: &EventDraft) -> CalendarResult<String> {
        self.add_at(draft, Utc::now())
    }

    /// Like `add`, with an explicit creation timestamp.
    pub fn add_at(&mut self, draft: &EventDraft, created_at: DateTime<Utc>) -> CalendarResult<String> {
        let id = self.fresh_id();
        let event = Event::from_draft(id.clone(), draft, created_at)?;

        debug!(id = %id, date = %event.date, "event added");
        self.events.push(event);
        self.dirty = true;
        Ok(id)
    }

    /// Replace the editable fields of an existing event.
    pub fn update(&mut self, id: &str, patch: &EventDraft) -> CalendarResult<()> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;

        event.apply(patch)?;

        debug!(id = %id, date = %event.date, "event updated");
        self.dirty = true;
        Ok(())
    }

    /// Remove an event and hand it back.
    pub fn remove(&mut self, id: &str) -> CalendarResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;

        let removed = self.events.remove(index);

        debug!(id = %id, "event removed");
        self.dirty = true;
        Ok(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// All events in insertion order.
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True when a mutation happened since the last `mark_clean`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
