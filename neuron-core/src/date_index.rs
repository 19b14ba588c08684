//! Date lookup over the event collection.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::event::Event;

/// Events grouped by calendar day.
///
/// Built in one pass over the store; each day keeps insertion order. Cheap
/// enough to rebuild on every compose.
#[derive(Debug, Default)]
pub struct DateIndex<'a> {
    by_date: BTreeMap<NaiveDate, Vec<&'a Event>>,
}

impl<'a> DateIndex<'a> {
    pub fn build(events: &'a [Event]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<&'a Event>> = BTreeMap::new();
        for event in events {
            by_date.entry(event.date).or_default().push(event);
        }
        DateIndex { by_date }
    }

    /// Events on exactly `date`, in insertion order.
    ///
    /// Keys are `NaiveDate`s, so key equality is the same test as
    /// `is_same_date`.
    pub fn for_date(&self, date: NaiveDate) -> &[&'a Event] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_for_date(&self, date: NaiveDate) -> usize {
        self.for_date(date).len()
    }

    /// Events from `start` through `end` inclusive, ascending by date, ties
    /// in insertion order. Empty when `end` is before `start`. Bounds compare
    /// on `NaiveDate` ordering, which is day-granular.
    pub fn for_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&'a Event> {
        if end < start {
            return Vec::new();
        }

        self.by_date
            .range(start..=end)
            .flat_map(|(_, events)| events.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventColor, EventDraft};
    use crate::event_store::EventStore;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_store(entries: &[(&str, NaiveDate)]) -> EventStore {
        let mut store = EventStore::new();
        for (title, day) in entries {
            store.add(&EventDraft::new(title, *day)).unwrap();
        }
        store
    }

    fn titles(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn test_for_date_returns_standup() {
        let mut store = EventStore::new();
        let id = store
            .add(&EventDraft {
                title: "Standup".to_string(),
                date: Some(date(2024, 3, 4)),
                start_time: NaiveTime::from_hms_opt(9, 0, 0),
                end_time: NaiveTime::from_hms_opt(9, 30, 0),
                color: EventColor::Blue,
                ..Default::default()
            })
            .unwrap();
        store.add(&EventDraft::new("Other", date(2024, 3, 5))).unwrap();

        let index = DateIndex::build(store.all());
        let found = index.for_date(date(2024, 3, 4));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        let slot = found[0].slot_position().unwrap();
        assert_eq!((slot.offset_minutes, slot.duration_minutes), (540, 30));
    }

    #[test]
    fn test_for_date_without_events_is_empty() {
        let store = make_test_store(&[("A", date(2024, 3, 4))]);
        let index = DateIndex::build(store.all());

        assert!(index.for_date(date(2024, 3, 3)).is_empty());
        assert_eq!(index.count_for_date(date(2024, 3, 4)), 1);
    }

    #[test]
    fn test_for_range_sorts_by_date_then_insertion() {
        let store = make_test_store(&[
            ("late", date(2024, 3, 10)),
            ("first-on-4th", date(2024, 3, 4)),
            ("outside", date(2024, 4, 1)),
            ("second-on-4th", date(2024, 3, 4)),
            ("early", date(2024, 3, 1)),
        ]);
        let index = DateIndex::build(store.all());

        let found = index.for_range(date(2024, 3, 1), date(2024, 3, 10));

        assert_eq!(
            titles(&found),
            vec!["early", "first-on-4th", "second-on-4th", "late"]
        );
    }

    #[test]
    fn test_for_range_is_inclusive_and_handles_reversed_bounds() {
        let store = make_test_store(&[("a", date(2024, 3, 1)), ("b", date(2024, 3, 2))]);
        let index = DateIndex::build(store.all());

        assert_eq!(index.for_range(date(2024, 3, 2), date(2024, 3, 2)).len(), 1);
        assert!(index.for_range(date(2024, 3, 2), date(2024, 3, 1)).is_empty());
    }
}
