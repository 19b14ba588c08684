//! User actions.
//!
//! Renderers bind controls to these values (dates and event ids), never to
//! callbacks, and hand them back to the application for dispatch.

use chrono::NaiveDate;

use crate::event::EventDraft;
use crate::state::{SidebarFilter, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the anchor month by the given number of months.
    NavigateMonth(i32),
    GoToToday,
    SelectDate(NaiveDate),
    /// Move the selected date by the given number of days.
    ShiftSelection(i64),
    CycleView,
    SetView(View),
    SetSidebarFilter(SidebarFilter),
    /// Open an event's detail panel.
    OpenEvent(String),
    CloseEvent,
    /// Create (`id: None`) or replace the editable fields of an event.
    SaveEvent {
        id: Option<String>,
        draft: EventDraft,
    },
    DeleteEvent(String),
}
