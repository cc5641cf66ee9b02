//! Roadmap Service Module
//!
//! Positions a book (or topic) in its knowledge domain by asking a
//! generative model for a three-tier learning roadmap.
//!
//! # Flow
//! ```text
//! SearchRequest ──▶ prompt::build_prompt ──▶ GeminiClient ──▶ parser ──▶ RoadmapData
//!                   (instruction + schema)   (raw text)       (validate)
//! ```

mod client;
mod models;
mod parser;
mod prompt;
mod service;

pub use client::{
    Candidate, CandidateContent, CandidatePart, ContentGenerator, GeminiClient,
    GenerateContentResponse, extract_text,
};
pub use models::{FailureKind, LlmSettings, MISSING_QUERY_MESSAGE, RoadmapError};
pub use parser::{normalize_levels, parse_roadmap};
pub use prompt::{
    GenerationPrompt, NO_BOOK_TITLE, PromptTemplate, SYSTEM_INSTRUCTION, build_prompt,
    response_schema,
};
pub use service::{RoadmapService, RoadmapServiceImpl};
