//! Layout descriptors.
//!
//! Immutable, renderer-agnostic descriptions of what to paint for the active
//! view. Renderers depend on these types only; events are referenced by id.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar_math::YearMonth;
use crate::event::{Event, EventColor};
use crate::state::{SidebarFilter, View};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDescriptor {
    pub view: View,
    /// Header text: "March 2024", "Feb 27 - Mar 4, 2024" or "Monday, March 4, 2024".
    pub title: String,
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    pub body: ViewBody,
    pub sidebar: Sidebar,
    /// Detail panel for the selected event, if it still exists.
    pub detail: Option<EventDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewBody {
    Month(MonthGrid),
    Week(TimeAxisLayout),
    Day(TimeAxisLayout),
}

/// Compact event reference shown in cells, lanes and lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventChip {
    pub event_id: String,
    pub title: String,
    pub color: EventColor,
    pub time_label: String,
}

impl From<&Event> for EventChip {
    fn from(event: &Event) -> Self {
        EventChip {
            event_id: event.id.clone(),
            title: event.title.clone(),
            color: event.color,
            time_label: event.time_label(),
        }
    }
}

// Month view

/// Six Monday-first weeks, 42 cells in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub weekday_labels: [&'static str; 7],
    pub cells: Vec<MonthCell>,
}

impl MonthGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// At most the configured cell limit.
    pub events: Vec<EventChip>,
    /// Events on this date that did not fit.
    pub overflow: usize,
}

// Week and day views

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxisLayout {
    pub hour_height: f32,
    pub day_height: f32,
    pub hours: Vec<HourMark>,
    pub columns: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub hour: u32,
    /// "09:00"
    pub label: String,
    pub top: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// "Mon 4"
    pub label: String,
    pub is_today: bool,
    pub is_selected: bool,
    /// Events without a start time, shown above the time axis.
    pub all_day: Vec<EventChip>,
    /// Timed events ordered by start.
    pub timed: Vec<PlacedEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent {
    pub chip: EventChip,
    pub offset_minutes: u32,
    pub duration_minutes: u32,
    pub top: f32,
    pub height: f32,
}

// Sidebar and detail panel

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub filter: SidebarFilter,
    pub heading: String,
    pub count: usize,
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    pub date: NaiveDate,
    pub chip: EventChip,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetail {
    pub event_id: String,
    pub title: String,
    pub date: NaiveDate,
    /// "Monday, March 4, 2024"
    pub date_label: String,
    pub time_label: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub color: EventColor,
}

impl From<&Event> for EventDetail {
    fn from(event: &Event) -> Self {
        EventDetail {
            event_id: event.id.clone(),
            title: event.title.clone(),
            date: event.date,
            date_label: event.date.format("%A, %B %-d, %Y").to_string(),
            time_label: event.time_label(),
            description: event.description.clone(),
            location: event.location.clone(),
            color: event.color,
        }
    }
}
