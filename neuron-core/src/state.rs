//! Navigation and selection state.
//!
//! One `SchedulerState` lives for the whole session. Every transition is
//! synchronous and total.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::calendar_math::{self, YearMonth, add_days};
use crate::event::Event;

/// Which grid is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Month,
    Week,
    Day,
}

impl View {
    /// Month → Week → Day → Month.
    pub fn next(&self) -> View {
        match self {
            View::Month => View::Week,
            View::Week => View::Day,
            View::Day => View::Month,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Month => "Month",
            View::Week => "Week",
            View::Day => "Day",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which events the sidebar lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarFilter {
    #[default]
    Today,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerState {
    view: View,
    anchor: YearMonth,
    selected_date: NaiveDate,
    selected_event: Option<String>,
    sidebar_filter: SidebarFilter,
    today: NaiveDate,
}

impl SchedulerState {
    /// Month view anchored on `today`, with `today` selected.
    pub fn new(today: NaiveDate) -> Self {
        SchedulerState {
            view: View::default(),
            anchor: YearMonth::of(today),
            selected_date: today,
            selected_event: None,
            sidebar_filter: SidebarFilter::default(),
            today,
        }
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn anchor(&self) -> YearMonth {
        self.anchor
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_event(&self) -> Option<&str> {
        self.selected_event.as_deref()
    }

    pub fn sidebar_filter(&self) -> SidebarFilter {
        self.sidebar_filter
    }

    /// The date highlighted as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move the anchor month. Selection and view are untouched.
    pub fn navigate_month(&mut self, delta: i32) {
        self.anchor = self.anchor.offset(delta);
    }

    /// Re-read the clock, then anchor and select today.
    pub fn go_to_today(&mut self) {
        self.go_to_today_at(calendar_math::today());
    }

    /// `go_to_today` with the current date supplied by the caller.
    pub fn go_to_today_at(&mut self, today: NaiveDate) {
        self.today = today;
        self.go_to_date(today);
    }

    /// Anchor on the month of `date` and select it.
    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.anchor = YearMonth::of(date);
        self.selected_date = date;
    }

    /// Select `date` without scrolling the month grid.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Move the selection by `days`, for paging the week and day views.
    pub fn shift_selection(&mut self, days: i64) {
        self.selected_date = add_days(self.selected_date, days);
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn select_event(&mut self, event: &Event) {
        self.selected_event = Some(event.id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected_event = None;
    }

    pub fn set_sidebar_filter(&mut self, filter: SidebarFilter) {
        self.sidebar_filter = filter;
    }

    /// Apply a navigation or selection action.
    ///
    /// Returns false, leaving the state alone, for actions this state does not
    /// own: store mutations and opening an event (which needs the store to
    /// resolve the id).
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::NavigateMonth(delta) => self.navigate_month(*delta),
            Action::GoToToday => self.go_to_today(),
            Action::SelectDate(date) => self.select_date(*date),
            Action::ShiftSelection(days) => self.shift_selection(*days),
            Action::CycleView => self.cycle_view(),
            Action::SetView(view) => self.set_view(*view),
            Action::SetSidebarFilter(filter) => self.set_sidebar_filter(*filter),
            Action::CloseEvent => self.clear_selection(),
            Action::OpenEvent(_) | Action::SaveEvent { .. } | Action::DeleteEvent(_) => {
                return false;
            }
        }
        true
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        SchedulerState::new(calendar_math::today())
    }
}
