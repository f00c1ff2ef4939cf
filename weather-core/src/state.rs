//! View state and the pure reducer that drives it.
//!
//! Every dispatch is tagged with a [`RequestId`]. Only the completion of the
//! most recently issued request is applied; earlier ones that resolve late are
//! dropped, so the view always reflects the last thing the user asked for.

use serde::Serialize;

use crate::{
    background::Background,
    error::LookupError,
    model::{CurrentConditions, ForecastEntry, WeatherReport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiState {
    pub loading: bool,
    pub error: Option<LookupError>,
    pub conditions: Option<CurrentConditions>,
    pub forecast: Vec<ForecastEntry>,
    pub background: Background,
    #[serde(skip)]
    pub latest_request: RequestId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Input refused before any request went out.
    QueryRejected(LookupError),
    GeolocationUnsupported,
    LocateStarted(RequestId),
    LocateFailed(RequestId, LookupError),
    LookupStarted(RequestId),
    LookupSucceeded(RequestId, Box<WeatherReport>),
    LookupFailed(RequestId, LookupError),
}

impl UiState {
    fn is_latest(&self, id: RequestId) -> bool {
        id == self.latest_request
    }
}

pub fn reduce(state: UiState, event: Event) -> UiState {
    match event {
        Event::QueryRejected(error) => UiState { error: Some(error), ..state },
        Event::GeolocationUnsupported => {
            UiState { error: Some(LookupError::Unsupported), ..state }
        }
        Event::LocateStarted(id) => {
            UiState { loading: true, error: None, latest_request: id, ..state }
        }
        Event::LookupStarted(id) => UiState {
            loading: true,
            error: None,
            conditions: None,
            forecast: Vec::new(),
            latest_request: id,
            ..state
        },
        Event::LocateFailed(id, error) if state.is_latest(id) => {
            UiState { loading: false, error: Some(error), ..state }
        }
        Event::LookupSucceeded(id, report) if state.is_latest(id) => {
            let WeatherReport { conditions, forecast, background, .. } = *report;
            UiState {
                loading: false,
                error: None,
                conditions: Some(conditions),
                forecast,
                background,
                ..state
            }
        }
        Event::LookupFailed(id, error) if state.is_latest(id) => UiState {
            loading: false,
            error: Some(error),
            conditions: None,
            forecast: Vec::new(),
            ..state
        },
        // superseded by a newer request
        Event::LocateFailed(..) | Event::LookupSucceeded(..) | Event::LookupFailed(..) => state,
    }
}
