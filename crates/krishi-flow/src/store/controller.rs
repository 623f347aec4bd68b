use std::sync::Arc;

use krishi_core::StoreRecord;

use super::resolver::{StoreEffect, StoreEvent, StoreResolver};
use crate::backend::StoreBackend;
use crate::device::{LocationProvider, PermissionStatus};
use crate::diagnosis::StoreHandoff;
use crate::notice::Notice;
use crate::runner::InFlight;

/// Runs a [`StoreResolver`] against a backend and a location provider.
///
/// The surrounding navigation calls [`activate`](Self::activate) whenever
/// the store screen comes into view; every activation starts over.
pub struct StoreResolverController<B, L> {
    resolver: StoreResolver,
    backend: Arc<B>,
    location: Arc<L>,
    in_flight: InFlight<StoreEvent>,
}

impl<B, L> StoreResolverController<B, L>
where
    B: StoreBackend + 'static,
    L: LocationProvider + 'static,
{
    pub fn new(backend: Arc<B>, location: Arc<L>) -> Self {
        Self {
            resolver: StoreResolver::new(),
            backend,
            location,
            in_flight: InFlight::new(),
        }
    }

    pub fn resolver(&self) -> &StoreResolver {
        &self.resolver
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.resolver.take_notices()
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn activate(&mut self, category_filter: Option<String>) {
        self.dispatch(StoreEvent::Activated { category_filter });
    }

    /// Activates with the category recommended by a diagnosis.
    pub fn activate_from(&mut self, handoff: StoreHandoff) {
        self.activate(Some(handoff.into_category()));
    }

    pub fn change_filter(&mut self, category_filter: Option<String>) {
        self.dispatch(StoreEvent::FilterChanged { category_filter });
    }

    pub fn refresh(&mut self) {
        self.dispatch(StoreEvent::RefreshRequested);
    }

    pub fn select_store(&mut self, store: StoreRecord) {
        self.dispatch(StoreEvent::StoreSelected(store));
    }

    /// Selects the listed store at `index`. Returns `false` when out of range.
    pub fn select_store_at(&mut self, index: usize) -> bool {
        let Some(store) = self.resolver.stores().get(index).cloned() else {
            return false;
        };
        self.select_store(store);
        true
    }

    pub fn dismiss_detail(&mut self) {
        self.dispatch(StoreEvent::DetailDismissed);
    }

    pub fn dispatch(&mut self, event: StoreEvent) {
        for effect in self.resolver.reduce(event) {
            self.start(effect);
        }
    }

    /// Waits for one pending operation and applies its result. Returns
    /// `false` when nothing was pending.
    pub async fn next_completion(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn start(&mut self, effect: StoreEffect) {
        match effect {
            StoreEffect::RequestLocation { generation } => {
                let location = Arc::clone(&self.location);
                self.in_flight.push(async move {
                    if location.request_foreground_permission().await == PermissionStatus::Denied {
                        return StoreEvent::LocationDenied { generation };
                    }
                    match location.current_position().await {
                        Ok(origin) => StoreEvent::LocationAcquired { generation, origin },
                        Err(error) => StoreEvent::LocationFailed { generation, error },
                    }
                });
            }
            StoreEffect::Query {
                generation,
                origin,
                category_filter,
            } => {
                let backend = Arc::clone(&self.backend);
                self.in_flight.push(async move {
                    let result = backend
                        .find_stores(origin, category_filter.as_deref())
                        .await;
                    StoreEvent::QueryCompleted { generation, result }
                });
            }
            StoreEffect::FetchDetail {
                generation,
                place_id,
            } => {
                let backend = Arc::clone(&self.backend);
                self.in_flight.push(async move {
                    let result = backend.place_details(&place_id).await;
                    StoreEvent::DetailCompleted { generation, result }
                });
            }
        }
    }
}
