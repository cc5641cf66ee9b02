//! Presentation Layer
//!
//! Server-side HTML for the single search page. Rendering only reads the
//! domain model; the page state lives in [`SearchView`].

mod page;
mod roadmap;

pub use page::render_page;
pub use roadmap::render_roadmap;

use crate::models::{RoadmapData, SearchMode};
use crate::services::roadmap::RoadmapError;

/// What the main panel currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Failed(String),
    Ready(RoadmapData),
}

/// Handle for one submitted search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Page state container.
///
/// Each search takes a ticket; only the latest ticket may resolve the view,
/// so a late response can never overwrite a newer one.
#[derive(Debug, Clone)]
pub struct SearchView {
    query: String,
    mode: SearchMode,
    state: ViewState,
    generation: u64,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            mode: SearchMode::default(),
            state: ViewState::Idle,
            generation: 0,
        }
    }

    /// Start a search: previous results are dropped and the view is loading
    pub fn begin(&mut self, query: impl Into<String>, mode: SearchMode) -> SearchTicket {
        self.generation += 1;
        self.query = query.into();
        self.mode = mode;
        self.state = ViewState::Loading;
        SearchTicket(self.generation)
    }

    /// Apply a search outcome. Returns `false` if the ticket was superseded.
    pub fn resolve(
        &mut self,
        ticket: SearchTicket,
        result: Result<RoadmapData, RoadmapError>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!("Discarding stale search result (ticket {})", ticket.0);
            return false;
        }

        self.state = match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Failed(e.user_message()),
        };
        true
    }

    /// Show an error that happened before any ticket was issued
    pub fn fail(&mut self, query: impl Into<String>, mode: SearchMode, message: impl Into<String>) {
        self.generation += 1;
        self.query = query.into();
        self.mode = mode;
        self.state = ViewState::Failed(message.into());
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn roadmap(&self) -> Option<&RoadmapData> {
        match &self.state {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }
}
