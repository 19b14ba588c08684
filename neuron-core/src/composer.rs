//! View composition.
//!
//! Turns the scheduler state and the event collection into a
//! `LayoutDescriptor`. Composing has no side effects, so the application can
//! recompose after every action.

use chrono::{Datelike, NaiveDate};

use crate::calendar_math::{
    HOURS_PER_DAY, SlotGeometry, WEEK_WINDOW_DAYS, add_days, is_same_date, month_grid,
    month_title, week_window, weekday_labels,
};
use crate::date_index::DateIndex;
use crate::event_store::EventStore;
use crate::layout::{
    DayColumn, EventChip, EventDetail, HourMark, LayoutDescriptor, MonthCell, MonthGrid,
    PlacedEvent, Sidebar, SidebarItem, TimeAxisLayout, ViewBody,
};
use crate::state::{SchedulerState, SidebarFilter, View};

/// Display settings for composed views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    /// Event chips shown per month cell before the rest collapse into an
    /// overflow count.
    pub month_cell_limit: usize,
    pub geometry: SlotGeometry,
    /// Days covered by the upcoming sidebar list, today included.
    pub upcoming_days: u32,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            month_cell_limit: 3,
            geometry: SlotGeometry::default(),
            upcoming_days: 7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewComposer {
    options: ViewOptions,
}

impl ViewComposer {
    pub fn new(options: ViewOptions) -> Self {
        ViewComposer { options }
    }

    pub fn compose(&self, state: &SchedulerState, store: &EventStore) -> LayoutDescriptor {
        let index = DateIndex::build(store.all());
        let selected = state.selected_date();

        let (title, body) = match state.view() {
            View::Month => (
                month_title(state.anchor()),
                ViewBody::Month(self.month_grid(state, &index)),
            ),
            View::Week => {
                let days = week_window(selected);
                (
                    week_title(&days),
                    ViewBody::Week(self.time_axis(&days, state, &index)),
                )
            }
            View::Day => (
                selected.format("%A, %B %-d, %Y").to_string(),
                ViewBody::Day(self.time_axis(&[selected], state, &index)),
            ),
        };

        let detail = state
            .selected_event()
            .and_then(|id| store.get(id))
            .map(EventDetail::from);

        LayoutDescriptor {
            view: state.view(),
            title,
            today: state.today(),
            selected_date: selected,
            body,
            sidebar: self.sidebar(state, &index),
            detail,
        }
    }

    fn month_grid(&self, state: &SchedulerState, index: &DateIndex) -> MonthGrid {
        let month = state.anchor();
        let limit = self.options.month_cell_limit;

        let cells = month_grid(month)
            .into_iter()
            .map(|date| {
                let events = index.for_date(date);
                MonthCell {
                    date,
                    day: date.day(),
                    is_current_month: month.contains(date),
                    is_today: is_same_date(&date, &state.today()),
                    is_selected: is_same_date(&date, &state.selected_date()),
                    events: events.iter().take(limit).map(|e| EventChip::from(*e)).collect(),
                    overflow: events.len().saturating_sub(limit),
                }
            })
            .collect();

        MonthGrid {
            month,
            weekday_labels: weekday_labels(),
            cells,
        }
    }

    fn time_axis(
        &self,
        days: &[NaiveDate],
        state: &SchedulerState,
        index: &DateIndex,
    ) -> TimeAxisLayout {
        let geometry = self.options.geometry;

        let hours = (0..HOURS_PER_DAY)
            .map(|hour| HourMark {
                hour,
                label: format!("{:02}:00", hour),
                top: geometry.hour_top(hour),
            })
            .collect();

        let columns = days
            .iter()
            .map(|&date| self.day_column(date, state, index))
            .collect();

        TimeAxisLayout {
            hour_height: geometry.hour_height,
            day_height: geometry.day_height(),
            hours,
            columns,
        }
    }

    fn day_column(&self, date: NaiveDate, state: &SchedulerState, index: &DateIndex) -> DayColumn {
        let geometry = self.options.geometry;
        let mut all_day = Vec::new();
        let mut timed = Vec::new();

        for event in index.for_date(date) {
            match event.slot_position() {
                Some(slot) => {
                    let (top, height) = geometry.place(&slot);
                    timed.push(PlacedEvent {
                        chip: EventChip::from(*event),
                        offset_minutes: slot.offset_minutes,
                        duration_minutes: slot.duration_minutes,
                        top,
                        height,
                    });
                }
                None => all_day.push(EventChip::from(*event)),
            }
        }

        // Stable, so events starting together keep insertion order.
        timed.sort_by_key(|placed| placed.offset_minutes);

        DayColumn {
            date,
            label: date.format("%a %-d").to_string(),
            is_today: is_same_date(&date, &state.today()),
            is_selected: is_same_date(&date, &state.selected_date()),
            all_day,
            timed,
        }
    }

    fn sidebar(&self, state: &SchedulerState, index: &DateIndex) -> Sidebar {
        let today = state.today();
        let filter = state.sidebar_filter();

        let events = match filter {
            SidebarFilter::Today => index.for_date(today).to_vec(),
            SidebarFilter::Upcoming => {
                let last = add_days(today, i64::from(self.options.upcoming_days.max(1)) - 1);
                index.for_range(today, last)
            }
        };

        let items: Vec<SidebarItem> = events
            .into_iter()
            .map(|event| SidebarItem {
                date: event.date,
                chip: EventChip::from(event),
                description: event.description.clone(),
            })
            .collect();

        Sidebar {
            filter,
            heading: match filter {
                SidebarFilter::Today => "Today".to_string(),
                SidebarFilter::Upcoming => "Upcoming".to_string(),
            },
            count: items.len(),
            items,
        }
    }
}

fn week_title(days: &[NaiveDate; WEEK_WINDOW_DAYS]) -> String {
    let first = days[0];
    let last = days[WEEK_WINDOW_DAYS - 1];
    format!("{} - {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
}
