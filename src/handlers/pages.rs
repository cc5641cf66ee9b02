//! HTML page handlers
//!
//! The search form posts back to the server, which renders the whole page
//! in its final state (roadmap or error).

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::models::{SearchMode, SearchRequest};
use crate::services::RoadmapError;
use crate::services::roadmap::MISSING_QUERY_MESSAGE;
use crate::utils::StringExt;
use crate::views::{SearchView, render_page};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub mode: SearchMode,
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&SearchView::new(), state.roadmap_service.model_name()))
}

/// POST /search
pub async fn search(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Html<String> {
    let model = state.roadmap_service.model_name();
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Rejected search form: {}", rejection.body_text());
            let mut view = SearchView::new();
            view.fail("", SearchMode::default(), MISSING_QUERY_MESSAGE);
            return Html(render_page(&view, model));
        },
    };
    let query = form.query.clean().unwrap_or_default();
    let mut view = SearchView::new();

    let request = match SearchRequest::new(query.clone(), form.mode).normalized() {
        Ok(request) => request,
        Err(e) => {
            view.fail(query, form.mode, RoadmapError::from(e).user_message());
            return Html(render_page(&view, model));
        },
    };

    let ticket = view.begin(request.query.clone(), request.mode);
    let result = state.roadmap_service.generate_roadmap(&request).await;
    view.resolve(ticket, result);

    Html(render_page(&view, model))
}
