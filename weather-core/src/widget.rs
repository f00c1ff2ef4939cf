use tracing::{debug, info};

use crate::{
    error::LookupError,
    location::Geolocator,
    lookup::lookup,
    model::{Query, WeatherReport},
    provider::WeatherProvider,
    state::{Event, RequestId, UiState, reduce},
};

pub const DEFAULT_CITY: &str = "London";

/// A dispatched lookup whose response has not been applied yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLookup {
    pub id: RequestId,
    pub query: Query,
}

/// Owns the view state and turns user intents into provider calls.
#[derive(Debug)]
pub struct WeatherWidget<P> {
    provider: P,
    state: UiState,
    last_id: RequestId,
    default_city: String,
}

impl<P: WeatherProvider> WeatherWidget<P> {
    pub fn new(provider: P) -> Self {
        Self::with_default_city(provider, DEFAULT_CITY)
    }

    pub fn with_default_city(provider: P, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            state: UiState::default(),
            last_id: RequestId::default(),
            default_city: default_city.into(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    fn issue_id(&mut self) -> RequestId {
        self.last_id = self.last_id.next();
        self.last_id
    }

    /// Validate a typed city name and dispatch it. An empty name records the
    /// validation error and returns `None`; nothing is sent.
    pub fn begin_search(&mut self, city: &str) -> Option<PendingLookup> {
        let city = city.trim();
        if city.is_empty() {
            self.apply(Event::QueryRejected(LookupError::EmptyQuery));
            return None;
        }
        Some(self.begin_query(Query::City(city.to_string())))
    }

    pub fn begin_query(&mut self, query: Query) -> PendingLookup {
        let id = self.issue_id();
        debug!(?id, %query, "lookup started");
        self.apply(Event::LookupStarted(id));
        PendingLookup { id, query }
    }

    /// Perform the network part of a pending lookup. Does not touch state.
    pub async fn resolve(&self, pending: &PendingLookup) -> Result<WeatherReport, LookupError> {
        lookup(&self.provider, &pending.query).await
    }

    /// Apply the outcome. Called for every resolved lookup, successful or not,
    /// so the loading flag is always released.
    pub fn complete(&mut self, pending: PendingLookup, outcome: Result<WeatherReport, LookupError>) {
        let event = match outcome {
            Ok(report) => {
                info!(query = %pending.query, location = %report.conditions.location, "weather updated");
                Event::LookupSucceeded(pending.id, Box::new(report))
            }
            Err(err) => {
                info!(query = %pending.query, error = %err, "lookup failed");
                Event::LookupFailed(pending.id, err)
            }
        };
        self.apply(event);
    }

    pub async fn run(&mut self, pending: PendingLookup) {
        let outcome = self.resolve(&pending).await;
        self.complete(pending, outcome);
    }

    pub async fn search(&mut self, city: &str) {
        if let Some(pending) = self.begin_search(city) {
            self.run(pending).await;
        }
    }

    /// Start a location request. Returns `None` when the platform has no
    /// location capability; the unsupported error is recorded instead.
    pub fn begin_locate(&mut self, geo: &dyn Geolocator) -> Option<RequestId> {
        if !geo.is_supported() {
            self.apply(Event::GeolocationUnsupported);
            return None;
        }

        let id = self.issue_id();
        self.apply(Event::LocateStarted(id));
        Some(id)
    }

    /// Resolve the position for a started location request and look it up.
    pub async fn finish_locate(&mut self, geo: &dyn Geolocator, id: RequestId) {
        match geo.current_position().await {
            Ok(at) => {
                let pending = self.begin_query(Query::Coordinates(at));
                self.run(pending).await;
            }
            Err(err) => {
                info!(error = %err, "could not determine position");
                self.apply(Event::LocateFailed(id, LookupError::PermissionDenied));
            }
        }
    }

    pub async fn search_by_location(&mut self, geo: &dyn Geolocator) {
        if let Some(id) = self.begin_locate(geo) {
            self.finish_locate(geo, id).await;
        }
    }

    /// Initial load: look up the default city.
    pub async fn mount(&mut self) {
        let city = self.default_city.clone();
        self.search(&city).await;
    }
}
