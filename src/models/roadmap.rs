//! Roadmap domain model
//!
//! Shared between the request builder, the response parser and the views.
//! JSON keys are fixed camelCase identifiers; every free-text value is
//! produced by the model.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::StringExt;

/// Longest query (in characters) accepted from the search form
pub const MAX_QUERY_CHARS: u64 = 200;

/// Shown when a query is empty or longer than [`MAX_QUERY_CHARS`]
pub fn query_length_message() -> String {
    format!("请输入 1 到 {} 个字符的书名或主题。", MAX_QUERY_CHARS)
}

// ============================================================================
// Difficulty Level
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    /// All levels in roadmap order
    pub const ALL: [DifficultyLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Localized label shown on the timeline badge
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Beginner => "入门 / 新手",
            Self::Intermediate => "进阶 / 实践者",
            Self::Advanced => "高阶 / 专家",
        }
    }

    /// Colour theme used by the stylesheet (`theme--{name}`)
    pub fn theme(&self) -> &'static str {
        match self {
            Self::Beginner => "emerald",
            Self::Intermediate => "blue",
            Self::Advanced => "purple",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Roadmap
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRecommendation {
    pub title: String,
    pub author: String,
    /// Why this book belongs to its level
    pub reason: String,
    /// Set only on the entry matching the searched book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current: Option<bool>,
}

impl BookRecommendation {
    pub fn is_highlighted(&self) -> bool {
        self.is_current == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LevelNode {
    pub level_name: DifficultyLevel,
    /// What defines a reader at this level
    pub description: String,
    pub key_concepts: Vec<String>,
    pub books: Vec<BookRecommendation>,
}

/// Where the searched book sits in its domain.
///
/// `title` is `None` for topic searches. The model marks "not applicable"
/// with the string `"None"`; that sentinel never leaves deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBookAnalysis {
    #[serde(default, deserialize_with = "deserialize_book_title")]
    pub title: Option<String>,
    pub assigned_level: DifficultyLevel,
    pub gap_analysis: String,
    pub next_steps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapData {
    pub domain: String,
    pub summary: String,
    pub user_book_analysis: UserBookAnalysis,
    pub roadmap: Vec<LevelNode>,
}

impl RoadmapData {
    pub fn level(&self, level: DifficultyLevel) -> Option<&LevelNode> {
        self.roadmap.iter().find(|n| n.level_name == level)
    }

    /// The searched book, if this roadmap came from a book search
    pub fn analyzed_title(&self) -> Option<&str> {
        self.user_book_analysis.title.as_deref()
    }
}

const TITLE_SENTINELS: [&str; 2] = ["none", "null"];

fn deserialize_book_title<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|t| {
        let t = t.trim();
        !t.is_empty() && !TITLE_SENTINELS.iter().any(|s| t.eq_ignore_ascii_case(s))
    }))
}

// ============================================================================
// Search Request
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Position a single book within its domain
    #[default]
    Book,
    /// Explore a domain without a current book
    Topic,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Topic => "topic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = MAX_QUERY_CHARS))]
    pub query: String,
    #[serde(default)]
    pub mode: SearchMode,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, mode: SearchMode) -> Self {
        Self { query: query.into(), mode }
    }

    /// Trim the query and validate it
    pub fn normalized(&self) -> Result<SearchRequest, validator::ValidationErrors> {
        let request = SearchRequest { query: self.query.trimmed(), mode: self.mode };
        request.validate()?;
        Ok(request)
    }
}
