//! Core types for Neuron Calendar.
//!
//! This crate holds everything that does not touch the outside world:
//! - `Event` and the in-memory `EventStore`
//! - `DateIndex` for date and range lookups
//! - `calendar_math` for month grids, week windows and time-slot geometry
//! - `SchedulerState` and the `Action`s that drive it
//! - `ViewComposer`, which produces the `LayoutDescriptor` renderers paint
//! - the `Store` and `Renderer` collaborator traits

pub mod action;
pub mod calendar_math;
pub mod composer;
pub mod date_index;
pub mod error;
pub mod event;
pub mod event_store;
pub mod layout;
pub mod renderer;
pub mod state;
pub mod store;

pub use action::Action;
pub use calendar_math::{SlotGeometry, SlotPosition, YearMonth};
pub use composer::{ViewComposer, ViewOptions};
pub use date_index::DateIndex;
pub use error::{CalendarError, CalendarResult};
pub use event::{Event, EventColor, EventDraft};
pub use event_store::EventStore;
pub use layout::LayoutDescriptor;
pub use renderer::{Notice, NoticeLevel, Renderer};
pub use state::{SchedulerState, SidebarFilter, View};
pub use store::{MemoryStore, Store};
