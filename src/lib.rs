//! Neuron Calendar: a personal event planner.
//!
//! The model, calendar math and view composition live in `neuron-core`. This
//! crate adds what an application needs around them:
//! - `PlannerConfig`, loaded from an optional TOML file
//! - `JsonFileStore`, the on-disk `Store`
//! - `Planner`, the application context that dispatches actions, persists
//!   changes and hands layouts to a `Renderer`

pub mod config;
pub mod file_store;
pub mod planner;

pub use config::PlannerConfig;
pub use file_store::JsonFileStore;
pub use planner::Planner;

pub use neuron_core;
