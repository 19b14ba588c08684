//! The application context.
//!
//! `Planner` owns the event collection, the scheduler state and the two
//! collaborators. Every action goes through `dispatch`: apply it, persist if
//! the collection changed, recompose, render.

use neuron_core::{
    Action, CalendarError, CalendarResult, EventDraft, EventStore, LayoutDescriptor, Notice,
    Renderer, SchedulerState, Store, ViewComposer, ViewOptions,
};
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::file_store::JsonFileStore;

pub struct Planner<S: Store, R: Renderer> {
    store: S,
    renderer: R,
    events: EventStore,
    state: SchedulerState,
    composer: ViewComposer,
    save_failed: bool,
}

impl<S: Store, R: Renderer> Planner<S, R> {
    /// Load events from `store` and render the initial view.
    ///
    /// A failed load starts with an empty collection and a warning notice.
    pub fn new(store: S, mut renderer: R, options: ViewOptions, state: SchedulerState) -> Self {
        let events = match store.load() {
            Ok(events) => {
                info!(count = events.len(), "events loaded");
                EventStore::from_events(events)
            }
            Err(e) => {
                warn!(error = %e, "could not load events, starting empty");
                renderer.notify(Notice::warning(format!(
                    "Saved events could not be loaded: {e}"
                )));
                EventStore::new()
            }
        };

        let mut planner = Planner {
            store,
            renderer,
            events,
            state,
            composer: ViewComposer::new(options),
            save_failed: false,
        };
        planner.render();
        planner
    }

    /// Start on today in the configured default view.
    pub fn from_config(config: &PlannerConfig, store: S, renderer: R) -> Self {
        let state = SchedulerState::default().with_view(config.default_view);
        Self::new(store, renderer, config.view_options(), state)
    }

    /// Apply one user action and re-render.
    ///
    /// Validation and lookup failures are returned and change nothing. Save
    /// failures are reported to the renderer; the change itself is kept.
    pub fn dispatch(&mut self, action: Action) -> CalendarResult<()> {
        debug!(?action, "dispatch");

        match action {
            Action::OpenEvent(id) => {
                let event = self
                    .events
                    .get(&id)
                    .ok_or(CalendarError::NotFound(id))?;
                self.state.select_event(event);
            }
            Action::SaveEvent { id: None, draft } => {
                self.events.add(&draft)?;
            }
            Action::SaveEvent { id: Some(id), draft } => {
                self.events.update(&id, &draft)?;
            }
            Action::DeleteEvent(id) => {
                let removed = self.events.remove(&id)?;
                if self.state.selected_event() == Some(removed.id.as_str()) {
                    self.state.clear_selection();
                }
            }
            other => {
                self.state.apply(&other);
            }
        }

        self.persist();
        self.render();
        Ok(())
    }

    /// Create an event and return its id.
    pub fn create_event(&mut self, draft: &EventDraft) -> CalendarResult<String> {
        let id = self.events.add(draft)?;
        self.persist();
        self.render();
        Ok(id)
    }

    /// The layout for the current state.
    pub fn layout(&self) -> LayoutDescriptor {
        self.composer.compose(&self.state, &self.events)
    }

    pub fn render(&mut self) {
        let layout = self.layout();
        self.renderer.render(&layout);
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Save the collection if it changed. On failure the store stays dirty,
    /// so the next action retries; a later success is reported once.
    fn persist(&mut self) {
        if !self.events.is_dirty() {
            return;
        }

        match self.store.save(self.events.all()) {
            Ok(()) => {
                self.events.mark_clean();
                debug!(count = self.events.len(), "events persisted");
                if self.save_failed {
                    self.save_failed = false;
                    info!("pending changes saved");
                    self.renderer.notify(Notice::info("Pending changes saved"));
                }
            }
            Err(e) => {
                self.save_failed = true;
                warn!(error = %e, "could not save events, keeping changes in memory");
                self.renderer
                    .notify(Notice::error(format!("Changes could not be saved: {e}")));
            }
        }
    }
}

impl<R: Renderer> Planner<JsonFileStore, R> {
    /// Load the user's config file and open the events file it names.
    pub fn open(renderer: R) -> anyhow::Result<Self> {
        let config = PlannerConfig::load()?;
        Ok(Self::open_with(&config, renderer))
    }

    pub fn open_with(config: &PlannerConfig, renderer: R) -> Self {
        let store = JsonFileStore::new(config.data_path());
        Self::from_config(config, store, renderer)
    }
}
