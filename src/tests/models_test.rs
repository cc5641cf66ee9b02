use crate::models::{
    BookRecommendation, DifficultyLevel, MAX_QUERY_CHARS, RoadmapData, SearchMode, SearchRequest,
    UserBookAnalysis, query_length_message,
};
use crate::services::RoadmapError;
use crate::tests::common::{BOOK_QUERY, sample_roadmap, sample_roadmap_json};

#[test]
fn test_roadmap_deserializes_camel_case_payload() {
    let data: RoadmapData = serde_json::from_str(&sample_roadmap_json()).unwrap();

    assert_eq!(data.domain, "行为经济学");
    assert_eq!(data.user_book_analysis.title.as_deref(), Some(BOOK_QUERY));
    assert_eq!(data.user_book_analysis.assigned_level, DifficultyLevel::Intermediate);
    assert_eq!(data.roadmap.len(), 3);
    assert_eq!(data.roadmap[0].key_concepts, vec!["锚定效应", "损失厌恶"]);
}

#[test]
fn test_roadmap_serializes_back_to_same_shape() {
    let data = sample_roadmap();
    let value = serde_json::to_value(&data).unwrap();

    assert!(value.get("userBookAnalysis").is_some());
    assert_eq!(value["roadmap"][1]["levelName"], "Intermediate");
    assert_eq!(value["roadmap"][1]["books"][0]["isCurrent"], true);

    let back: RoadmapData = serde_json::from_value(value).unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_is_current_absence_is_preserved() {
    let data = sample_roadmap();
    let beginner = data.level(DifficultyLevel::Beginner).unwrap();

    assert_eq!(beginner.books[0].is_current, None);
    assert_eq!(beginner.books[1].is_current, Some(false));

    let value = serde_json::to_value(&beginner.books[0]).unwrap();
    assert!(value.get("isCurrent").is_none());
}

#[test]
fn test_is_highlighted_only_for_explicit_true() {
    let mut book = BookRecommendation {
        title: "助推".to_string(),
        author: "理查德·塞勒".to_string(),
        reason: "政策设计".to_string(),
        is_current: None,
    };
    assert!(!book.is_highlighted());

    book.is_current = Some(false);
    assert!(!book.is_highlighted());

    book.is_current = Some(true);
    assert!(book.is_highlighted());
}

#[test]
fn test_title_sentinel_maps_to_none() {
    for raw in [r#""None""#, r#""none""#, r#""null""#, r#""  ""#, "null"] {
        let json = format!(
            r#"{{"title": {raw}, "assignedLevel": "Beginner", "gapAnalysis": "g", "nextSteps": "n"}}"#
        );
        let analysis: UserBookAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis.title, None, "title {raw} should be absent");
    }
}

#[test]
fn test_missing_title_defaults_to_none() {
    let json = r#"{"assignedLevel": "Advanced", "gapAnalysis": "g", "nextSteps": "n"}"#;
    let analysis: UserBookAnalysis = serde_json::from_str(json).unwrap();
    assert_eq!(analysis.title, None);
}

#[test]
fn test_level_names_are_case_sensitive() {
    let json = r#"{"title": "x", "assignedLevel": "beginner", "gapAnalysis": "g", "nextSteps": "n"}"#;
    assert!(serde_json::from_str::<UserBookAnalysis>(json).is_err());
}

#[test]
fn test_difficulty_level_labels() {
    assert_eq!(DifficultyLevel::ALL[0], DifficultyLevel::Beginner);
    assert!(DifficultyLevel::Beginner < DifficultyLevel::Advanced);
    assert_eq!(DifficultyLevel::Intermediate.display_name(), "进阶 / 实践者");
    assert_eq!(DifficultyLevel::Advanced.theme(), "purple");
    assert_eq!(DifficultyLevel::Beginner.to_string(), "Beginner");
}

#[test]
fn test_search_mode_defaults_to_book() {
    let request: SearchRequest = serde_json::from_str(r#"{"query": "助推"}"#).unwrap();
    assert_eq!(request.mode, SearchMode::Book);

    let request: SearchRequest =
        serde_json::from_str(r#"{"query": "博弈论", "mode": "topic"}"#).unwrap();
    assert_eq!(request.mode, SearchMode::Topic);
}

#[test]
fn test_search_request_normalized_trims_query() {
    let request = SearchRequest::new("  助推 \n", SearchMode::Book).normalized().unwrap();
    assert_eq!(request.query, "助推");
}

#[test]
fn test_search_request_rejects_blank_query() {
    let err = SearchRequest::new("   ", SearchMode::Topic).normalized().unwrap_err();
    let err = RoadmapError::from(err);

    assert!(matches!(err, RoadmapError::InvalidRequest(_)));
    assert_eq!(err.user_message(), "请输入 1 到 200 个字符的书名或主题。");
}

#[test]
fn test_query_limit_follows_max_query_chars() {
    let limit = MAX_QUERY_CHARS as usize;
    assert!(SearchRequest::new("书".repeat(limit), SearchMode::Book).normalized().is_ok());

    let err =
        SearchRequest::new("书".repeat(limit + 1), SearchMode::Book).normalized().unwrap_err();
    let message = RoadmapError::from(err).user_message();
    assert_eq!(message, query_length_message());
    assert!(message.contains(&MAX_QUERY_CHARS.to_string()));
}

#[test]
fn test_search_request_rejects_overlong_query() {
    let long = "书".repeat(201);
    assert!(SearchRequest::new(long, SearchMode::Book).normalized().is_err());

    let max = "书".repeat(200);
    assert!(SearchRequest::new(max, SearchMode::Book).normalized().is_ok());
}
