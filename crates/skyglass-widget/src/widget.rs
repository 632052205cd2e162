use std::sync::Arc;

use parking_lot::Mutex;
use skyglass_weather::{HostContext, SnapshotCallback, Subscription, WeatherSnapshot};

use crate::shadow::{NodeRef, ShadowRoot};
use crate::templates::{Rendered, Renderer};
use crate::{Action, WidgetError};

enum Lifecycle {
    Created,
    Connected(Subscription),
    Destroyed,
}

struct WidgetState {
    latest: Option<Arc<WeatherSnapshot>>,
    selected_day: Option<usize>,
    root: ShadowRoot,
}

impl WidgetState {
    fn update_from_data(&mut self, snapshot: Arc<WeatherSnapshot>) {
        if let Some(index) = self.selected_day {
            if index >= snapshot.forecast.len() {
                tracing::debug!(
                    "Selected day {} no longer in forecast of {} days, showing daily view",
                    index,
                    snapshot.forecast.len()
                );
                self.selected_day = None;
            }
        }
        self.latest = Some(snapshot);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::SelectDay(index) => {
                let days = self.latest.as_ref().map_or(0, |s| s.forecast.len());
                if index < days {
                    self.selected_day = Some(index);
                } else {
                    tracing::warn!("Ignoring selection of day {} ({} days)", index, days);
                }
            }
            Action::Back => self.selected_day = None,
        }
    }

    fn dispatch(&mut self, node: &NodeRef, renderer: &Renderer) -> bool {
        let Some(action) = self.root.listener(node) else {
            tracing::debug!(
                "Ignoring click on #{} from generation {}",
                node.id(),
                node.generation()
            );
            return false;
        };
        self.apply(action);
        self.render(renderer);
        true
    }

    /// Replace the content from `(latest, selected_day)` and attach the
    /// listeners of the new markup in the same step
    fn render(&mut self, renderer: &Renderer) {
        let result = match &self.latest {
            None => Ok(renderer.placeholder()),
            Some(snapshot) => match self.selected_day.and_then(|i| snapshot.forecast.get(i)) {
                Some(day) => renderer.render_hourly(day),
                None => renderer.render_daily(snapshot),
            },
        };

        let Rendered { markup, bindings } = result.unwrap_or_else(|e| {
            tracing::error!("Failed to render weather widget: {}", e);
            renderer.placeholder()
        });

        let generation = self.root.replace_children(markup);
        for (id, action) in bindings {
            self.root.add_listener(generation, &id, action);
        }
    }
}

/// The `<weather-widget>` element.
///
/// Holds the latest snapshot and which forecast day, if any, is expanded
/// into the hourly view. Every emission and every navigation click
/// triggers a full re-render.
pub struct WeatherWidget {
    renderer: Arc<Renderer>,
    state: Arc<Mutex<WidgetState>>,
    lifecycle: Lifecycle,
}

impl WeatherWidget {
    pub fn new(renderer: Arc<Renderer>) -> Self {
        let mut state = WidgetState {
            latest: None,
            selected_day: None,
            root: ShadowRoot::new(),
        };
        state.render(&renderer);

        Self {
            renderer,
            state: Arc::new(Mutex::new(state)),
            lifecycle: Lifecycle::Created,
        }
    }

    /// Subscribe to the host's data warehouse. Can only be done once.
    pub fn initialize(&mut self, host: &HostContext) -> Result<(), WidgetError> {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Connected(_) => return Err(WidgetError::AlreadyInitialized),
            Lifecycle::Destroyed => return Err(WidgetError::Destroyed),
        }

        let state = Arc::downgrade(&self.state);
        let renderer = self.renderer.clone();
        let callback: SnapshotCallback = Arc::new(move |snapshot| {
            let Some(snapshot) = snapshot else {
                tracing::trace!("Ignoring empty emission");
                return;
            };
            let Some(state) = state.upgrade() else {
                return;
            };
            tracing::debug!("Received snapshot for {}", snapshot.city);
            let mut state = state.lock();
            state.update_from_data(snapshot);
            state.render(&renderer);
        });

        let subscription = host.data_warehouse.subscribe(callback);
        self.lifecycle = Lifecycle::Connected(subscription);
        tracing::info!("Weather widget subscribed to data warehouse");
        Ok(())
    }

    /// Re-render from the current snapshot and selection
    pub fn render(&self) {
        self.state.lock().render(&self.renderer);
    }

    /// Click the element with `id` in the current content
    pub fn click(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        let Some(node) = state.root.query(id) else {
            tracing::debug!("Click on unknown element #{}", id);
            return false;
        };
        state.dispatch(&node, &self.renderer)
    }

    /// Click a previously queried node. Nodes from replaced content are
    /// ignored.
    pub fn dispatch(&self, node: &NodeRef) -> bool {
        self.state.lock().dispatch(node, &self.renderer)
    }

    pub fn query(&self, id: &str) -> Option<NodeRef> {
        self.state.lock().root.query(id)
    }

    /// Current content of the shadow root
    pub fn markup(&self) -> String {
        self.state.lock().root.content().to_string()
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().root.generation()
    }

    pub fn selected_day(&self) -> Option<usize> {
        self.state.lock().selected_day
    }

    pub fn snapshot(&self) -> Option<Arc<WeatherSnapshot>> {
        self.state.lock().latest.clone()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Connected(_))
    }

    /// Release the warehouse subscription. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Lifecycle::Connected(mut subscription) =
            std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed)
        {
            subscription.unsubscribe();
            tracing::info!("Weather widget unsubscribed");
        }
    }
}

impl std::fmt::Debug for WeatherWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherWidget")
            .field("connected", &self.is_connected())
            .field("selected_day", &self.selected_day())
            .finish_non_exhaustive()
    }
}
