//! State machine behind the weather lookup widget.
//!
//! The widget owns the query text, the autocomplete list and a single
//! [`ViewState`]. Every network round trip is split into a `begin_*` step
//! that mutates state and hands out a ticket, and a `complete_*` step that
//! applies the result only if the ticket is still the latest one issued.
//! The `async` helpers chain both steps for callers that don't need to
//! render in between.

use crate::{
    Config, Query, Suggestion, WeatherError, WeatherProvider, WeatherReading, style::StyleBucket,
};

/// Inputs shorter than this never trigger a geocoding lookup.
pub const MIN_SUGGESTION_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Ready(WeatherReading),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            ViewState::Ready(reading) => Some(reading),
            _ => None,
        }
    }
}

/// An issued geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionTicket {
    generation: u64,
    text: String,
}

impl SuggestionTicket {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An issued weather request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    query: Query,
}

impl FetchTicket {
    pub fn query(&self) -> &Query {
        &self.query
    }
}

#[derive(Debug)]
pub struct WeatherWidget {
    provider: Box<dyn WeatherProvider>,
    lang: String,
    suggestion_limit: usize,
    query: String,
    suggestions: Vec<Suggestion>,
    state: ViewState,
    suggestion_generation: u64,
    fetch_generation: u64,
}

impl WeatherWidget {
    pub fn new(provider: Box<dyn WeatherProvider>, config: &Config) -> Self {
        Self {
            provider,
            lang: config.lang.clone(),
            suggestion_limit: config.suggestion_limit,
            query: String::new(),
            suggestions: Vec::new(),
            state: ViewState::Idle,
            suggestion_generation: 0,
            fetch_generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn style(&self) -> StyleBucket {
        StyleBucket::for_reading(self.state.reading())
    }

    /// Record a keystroke. Returns a lookup to run when the text is long enough.
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SuggestionTicket> {
        self.query = text.into();
        self.suggestion_generation += 1;

        if self.query.trim().chars().count() < MIN_SUGGESTION_CHARS {
            self.suggestions.clear();
            return None;
        }

        Some(SuggestionTicket {
            generation: self.suggestion_generation,
            text: self.query.clone(),
        })
    }

    /// Apply a lookup result. Stale tickets and failures leave the list untouched.
    pub fn complete_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<Vec<Suggestion>, WeatherError>,
    ) -> bool {
        if ticket.generation != self.suggestion_generation {
            tracing::debug!(text = %ticket.text, "Discarding stale suggestions");
            return false;
        }

        match result {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, text = %ticket.text, "Suggestion lookup failed");
                false
            }
        }
    }

    /// Name-based request. Blank queries are refused without touching state.
    pub fn begin_submit(&mut self) -> Option<FetchTicket> {
        let city = self.query.trim();
        if city.is_empty() {
            return None;
        }

        let query = Query::city(city);
        Some(self.begin_fetch(query))
    }

    /// Coordinate-based request seeded from a suggestion.
    pub fn begin_select(&mut self, index: usize) -> Option<FetchTicket> {
        let suggestion = self.suggestions.get(index)?.clone();

        self.query = suggestion.label();
        self.suggestions.clear();
        self.suggestion_generation += 1;

        Some(self.begin_fetch(suggestion.query()))
    }

    fn begin_fetch(&mut self, query: Query) -> FetchTicket {
        self.fetch_generation += 1;
        self.state = ViewState::Loading;

        FetchTicket {
            generation: self.fetch_generation,
            query,
        }
    }

    /// Settle a weather request. Every outcome leaves `Loading`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<WeatherReading, WeatherError>,
    ) -> bool {
        if ticket.generation != self.fetch_generation {
            tracing::debug!(query = %ticket.query, "Discarding superseded weather response");
            return false;
        }

        self.state = match result {
            Ok(reading) => ViewState::Ready(reading),
            Err(err) => {
                if err.is_domain() {
                    tracing::info!(error = %err, query = %ticket.query, "Weather lookup rejected");
                } else {
                    tracing::error!(error = %err, query = %ticket.query, "Weather lookup failed");
                }
                ViewState::Error(err.user_message(&self.lang))
            }
        };
        true
    }

    pub async fn input(&mut self, text: impl Into<String>) {
        if let Some(ticket) = self.set_query(text) {
            let result = self.provider.suggest(ticket.text(), self.suggestion_limit).await;
            self.complete_suggestions(ticket, result);
        }
    }

    /// Returns `false` when the query was blank and nothing was sent.
    pub async fn submit(&mut self) -> bool {
        match self.begin_submit() {
            Some(ticket) => {
                self.resolve(ticket).await;
                true
            }
            None => false,
        }
    }

    /// Returns `false` when `index` is not a current suggestion.
    pub async fn select_suggestion(&mut self, index: usize) -> bool {
        match self.begin_select(index) {
            Some(ticket) => {
                self.resolve(ticket).await;
                true
            }
            None => false,
        }
    }

    /// Perform an issued request and settle it.
    pub async fn resolve(&mut self, ticket: FetchTicket) {
        let result = self.provider.current(ticket.query()).await;
        self.complete_fetch(ticket, result);
    }
}
