use krishi_client::ClientError;
use krishi_core::{Coordinates, PlaceDetails, StoreRecord};

use crate::device::DeviceError;
use crate::generation::Generation;
use crate::notice::{Notice, NoticeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverPhase {
    Idle,
    AwaitingLocation,
    Querying,
    Listed,
}

/// Detail sub-state for the selected store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    Idle,
    FetchingDetail,
    DetailReady,
    /// The store has no place id; only the list fields are shown.
    SummaryOnly,
    /// The detail call failed. Not retried automatically.
    NoDetails,
}

#[derive(Debug)]
pub enum StoreEvent {
    Activated {
        category_filter: Option<String>,
    },
    LocationDenied {
        generation: Generation,
    },
    LocationFailed {
        generation: Generation,
        error: DeviceError,
    },
    LocationAcquired {
        generation: Generation,
        origin: Coordinates,
    },
    QueryCompleted {
        generation: Generation,
        result: Result<Vec<StoreRecord>, ClientError>,
    },
    /// Re-runs the search from the captured origin with the current filter.
    RefreshRequested,
    FilterChanged {
        category_filter: Option<String>,
    },
    StoreSelected(StoreRecord),
    DetailCompleted {
        generation: Generation,
        result: Result<PlaceDetails, ClientError>,
    },
    DetailDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEffect {
    /// Ask for foreground location permission, then read the position once.
    RequestLocation { generation: Generation },
    Query {
        generation: Generation,
        origin: Coordinates,
        category_filter: Option<String>,
    },
    FetchDetail {
        generation: Generation,
        place_id: String,
    },
}

/// Per-activation state for finding nearby stores.
///
/// `generation` guards location reads and searches; `detail_generation`
/// guards the detail call for the current selection. Stores are kept in
/// backend order and replaced wholesale by every search.
#[derive(Debug)]
pub struct StoreResolver {
    generation: Generation,
    detail_generation: Generation,
    phase: ResolverPhase,
    detail_phase: DetailPhase,
    origin: Option<Coordinates>,
    category_filter: Option<String>,
    stores: Vec<StoreRecord>,
    selected: Option<StoreRecord>,
    details: Option<PlaceDetails>,
    notices: Vec<Notice>,
}

impl Default for StoreResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: Generation::default(),
            detail_generation: Generation::default(),
            phase: ResolverPhase::Idle,
            detail_phase: DetailPhase::Idle,
            origin: None,
            category_filter: None,
            stores: Vec::new(),
            selected: None,
            details: None,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn detail_generation(&self) -> Generation {
        self.detail_generation
    }

    #[must_use]
    pub fn phase(&self) -> ResolverPhase {
        self.phase
    }

    #[must_use]
    pub fn detail_phase(&self) -> DetailPhase {
        self.detail_phase
    }

    #[must_use]
    pub fn origin(&self) -> Option<Coordinates> {
        self.origin
    }

    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        self.category_filter.as_deref()
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }

    #[must_use]
    pub fn selected(&self) -> Option<&StoreRecord> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn details(&self) -> Option<&PlaceDetails> {
        self.details.as_ref()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Applies one event and returns the device/backend work it requires.
    pub fn reduce(&mut self, event: StoreEvent) -> Vec<StoreEffect> {
        match event {
            StoreEvent::Activated { category_filter } => self.activate(category_filter),
            StoreEvent::LocationDenied { generation } => {
                if self.awaiting_location(generation) {
                    tracing::info!(%generation, "location permission denied");
                    self.notices
                        .push(Notice::warning("Permission to access location was denied"));
                }
                Vec::new()
            }
            StoreEvent::LocationFailed { generation, error } => {
                if self.awaiting_location(generation) {
                    tracing::warn!(%generation, error = %error, "position read failed");
                    self.notices.push(Notice::warning(format!(
                        "Could not determine your location: {error}"
                    )));
                }
                Vec::new()
            }
            StoreEvent::LocationAcquired { generation, origin } => {
                if !self.awaiting_location(generation) {
                    tracing::debug!(%generation, current = %self.generation, "dropping stale location");
                    return Vec::new();
                }
                tracing::debug!(%generation, %origin, "location acquired");
                self.origin = Some(origin);
                self.query(origin)
            }
            StoreEvent::QueryCompleted { generation, result } => {
                if generation != self.generation || self.phase != ResolverPhase::Querying {
                    tracing::debug!(%generation, current = %self.generation, "dropping stale store search");
                    return Vec::new();
                }
                self.on_query(result);
                Vec::new()
            }
            StoreEvent::RefreshRequested => match self.origin {
                Some(origin) => self.query(origin),
                None => {
                    tracing::debug!(phase = ?self.phase, "refresh ignored without an origin");
                    Vec::new()
                }
            },
            StoreEvent::FilterChanged { category_filter } => {
                if self.category_filter == category_filter {
                    return Vec::new();
                }
                self.category_filter = category_filter;
                // Without an origin the pending location read picks the filter up.
                match self.origin {
                    Some(origin) => self.query(origin),
                    None => Vec::new(),
                }
            }
            StoreEvent::StoreSelected(store) => self.select(store),
            StoreEvent::DetailCompleted { generation, result } => {
                if generation != self.detail_generation
                    || self.detail_phase != DetailPhase::FetchingDetail
                {
                    tracing::debug!(%generation, current = %self.detail_generation, "dropping stale place details");
                    return Vec::new();
                }
                self.on_detail(result);
                Vec::new()
            }
            StoreEvent::DetailDismissed => {
                self.clear_selection();
                Vec::new()
            }
        }
    }

    /// Restarts from scratch: nothing from a previous activation is reused.
    fn activate(&mut self, category_filter: Option<String>) -> Vec<StoreEffect> {
        self.generation = self.generation.next();
        self.clear_selection();
        self.origin = None;
        self.stores.clear();
        self.category_filter = category_filter;
        self.phase = ResolverPhase::AwaitingLocation;
        tracing::info!(
            generation = %self.generation,
            category = self.category_filter.as_deref().unwrap_or("any"),
            "store resolver activated"
        );
        vec![StoreEffect::RequestLocation {
            generation: self.generation,
        }]
    }

    fn query(&mut self, origin: Coordinates) -> Vec<StoreEffect> {
        self.generation = self.generation.next();
        self.clear_selection();
        self.phase = ResolverPhase::Querying;
        vec![StoreEffect::Query {
            generation: self.generation,
            origin,
            category_filter: self.category_filter.clone(),
        }]
    }

    fn on_query(&mut self, result: Result<Vec<StoreRecord>, ClientError>) {
        match result {
            Ok(stores) => {
                tracing::info!(generation = %self.generation, count = stores.len(), "stores listed");
                self.stores = stores;
            }
            Err(err) => {
                tracing::warn!(generation = %self.generation, error = %err, "store search failed");
                if err.is_domain() {
                    self.stores.clear();
                }
                self.notices.push(Notice::from_client(
                    NoticeLevel::Warning,
                    "Failed to fetch store data",
                    &err,
                ));
            }
        }
        self.phase = ResolverPhase::Listed;
    }

    fn select(&mut self, store: StoreRecord) -> Vec<StoreEffect> {
        if self.phase != ResolverPhase::Listed {
            tracing::debug!(phase = ?self.phase, "selection ignored before stores are listed");
            return Vec::new();
        }
        self.clear_selection();
        let place_id = store.place_id().map(str::to_string);
        self.selected = Some(store);
        match place_id {
            Some(place_id) => {
                self.detail_phase = DetailPhase::FetchingDetail;
                vec![StoreEffect::FetchDetail {
                    generation: self.detail_generation,
                    place_id,
                }]
            }
            None => {
                self.detail_phase = DetailPhase::SummaryOnly;
                Vec::new()
            }
        }
    }

    fn on_detail(&mut self, result: Result<PlaceDetails, ClientError>) {
        match result {
            Ok(details) => {
                self.details = Some(details);
                self.detail_phase = DetailPhase::DetailReady;
            }
            Err(err) => {
                tracing::warn!(generation = %self.detail_generation, error = %err, "place details failed");
                self.notices.push(Notice::from_client(
                    NoticeLevel::Warning,
                    "Could not load store details",
                    &err,
                ));
                self.detail_phase = DetailPhase::NoDetails;
            }
        }
    }

    fn clear_selection(&mut self) {
        self.detail_generation = self.detail_generation.next();
        self.selected = None;
        self.details = None;
        self.detail_phase = DetailPhase::Idle;
    }

    fn awaiting_location(&self, generation: Generation) -> bool {
        generation == self.generation && self.phase == ResolverPhase::AwaitingLocation
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
