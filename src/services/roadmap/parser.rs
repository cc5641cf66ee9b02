//! Response parsing and validation
//!
//! The payload comes from a non-deterministic source, so it is parsed in two
//! steps: syntax first (`InvalidResponseFormat`), then shape
//! (`SchemaMismatch`). Only a fully validated [`RoadmapData`] leaves here.

use serde_json::Value;

use super::models::RoadmapError;
use crate::models::{DifficultyLevel, LevelNode, RoadmapData, SearchMode};

pub fn parse_roadmap(payload: &str, mode: SearchMode) -> Result<RoadmapData, RoadmapError> {
    if payload.trim().is_empty() {
        return Err(RoadmapError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| RoadmapError::InvalidResponseFormat(e.to_string()))?;

    let mut data: RoadmapData =
        serde_json::from_value(value).map_err(|e| RoadmapError::SchemaMismatch(e.to_string()))?;

    data.roadmap = normalize_levels(std::mem::take(&mut data.roadmap))?;

    if mode == SearchMode::Topic {
        data.user_book_analysis.title = None;
    }

    Ok(data)
}

/// Order nodes Beginner → Advanced, keeping the first node of each level.
///
/// Fails when any level is missing.
pub fn normalize_levels(nodes: Vec<LevelNode>) -> Result<Vec<LevelNode>, RoadmapError> {
    let mut slots: [Option<LevelNode>; 3] = Default::default();

    for node in nodes {
        let slot = &mut slots[level_index(node.level_name)];
        if slot.is_some() {
            tracing::warn!("Dropping duplicate roadmap level: {}", node.level_name);
            continue;
        }
        *slot = Some(node);
    }

    let missing: Vec<&str> = DifficultyLevel::ALL
        .iter()
        .zip(slots.iter())
        .filter(|(_, slot)| slot.is_none())
        .map(|(level, _)| level.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(RoadmapError::SchemaMismatch(format!(
            "roadmap is missing levels: {}",
            missing.join(", ")
        )));
    }

    Ok(slots.into_iter().flatten().collect())
}

fn level_index(level: DifficultyLevel) -> usize {
    match level {
        DifficultyLevel::Beginner => 0,
        DifficultyLevel::Intermediate => 1,
        DifficultyLevel::Advanced => 2,
    }
}
