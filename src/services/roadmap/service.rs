//! Roadmap Service Trait and Implementation
//!
//! One search = one prompt, one model call, one validated roadmap.
//! No retries and no caching: every search is answered fresh.

use async_trait::async_trait;
use std::time::Instant;

use super::client::ContentGenerator;
use super::models::RoadmapError;
use super::parser::parse_roadmap;
use super::prompt::build_prompt;
use crate::models::{RoadmapData, SearchRequest};
use crate::utils::string_ext::truncate_chars;

/// Max characters of a rejected payload written to the diagnostic log
const PAYLOAD_LOG_CHARS: usize = 4000;

/// Roadmap Service - the seam between the HTTP layer and the model
#[async_trait]
pub trait RoadmapService: Send + Sync {
    /// Identifier of the model answering searches
    fn model_name(&self) -> &str;

    /// Generate a validated roadmap for a search
    async fn generate_roadmap(&self, request: &SearchRequest) -> Result<RoadmapData, RoadmapError>;
}

pub struct RoadmapServiceImpl<G> {
    generator: G,
}

impl<G: ContentGenerator> RoadmapServiceImpl<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl<G: ContentGenerator> RoadmapService for RoadmapServiceImpl<G> {
    fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    async fn generate_roadmap(&self, request: &SearchRequest) -> Result<RoadmapData, RoadmapError> {
        let request = request.normalized()?;
        let search_id = uuid::Uuid::new_v4();
        let prompt = build_prompt(&request);

        tracing::info!(
            "Roadmap search {} - mode: {}, template: {:?}, query: {}",
            search_id,
            request.mode.as_str(),
            prompt.template,
            request.query
        );

        let start = Instant::now();
        let result = self.generator.generate(&prompt).await;
        let latency_ms = start.elapsed().as_millis();

        let payload = match result {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::warn!(
                    "Roadmap search {} returned no payload ({}ms)",
                    search_id,
                    latency_ms
                );
                return Err(RoadmapError::EmptyResponse);
            },
            Err(e) => {
                tracing::warn!("Roadmap search {} failed ({}ms): {}", search_id, latency_ms, e);
                return Err(e);
            },
        };

        match parse_roadmap(&payload, request.mode) {
            Ok(data) => {
                tracing::info!(
                    "Roadmap search {} completed in {}ms - domain: {}",
                    search_id,
                    latency_ms,
                    data.domain
                );
                Ok(data)
            },
            Err(e) => {
                tracing::error!("Roadmap search {} rejected model output: {}", search_id, e);
                tracing::debug!(
                    "Roadmap search {} raw payload: {}",
                    search_id,
                    truncate_chars(&payload, PAYLOAD_LOG_CHARS)
                );
                Err(e)
            },
        }
    }
}
