// Common test utilities and helpers

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::AppState;
use crate::models::{RoadmapData, SearchMode, SearchRequest};
use crate::services::roadmap::{
    ContentGenerator, GenerationPrompt, RoadmapError, RoadmapService, parse_roadmap,
};

pub const BOOK_QUERY: &str = "思考，快与慢";
pub const TOPIC_QUERY: &str = "行为经济学";
pub const STUB_MODEL: &str = "stub-model";

/// A well-formed book-mode response, levels in order, current book at Intermediate
pub fn sample_roadmap_json() -> String {
    r#"{
        "domain": "行为经济学",
        "summary": "研究人类在经济决策中的心理偏差。它把心理学引入经济学模型。",
        "userBookAnalysis": {
            "title": "思考，快与慢",
            "assignedLevel": "Intermediate",
            "gapAnalysis": "缺少对助推政策与实验设计的系统介绍。",
            "nextSteps": "接着阅读《助推》，把认知偏差与政策设计联系起来。"
        },
        "roadmap": [
            {
                "levelName": "Beginner",
                "description": "理解常见的认知偏差。",
                "keyConcepts": ["锚定效应", "损失厌恶"],
                "books": [
                    { "title": "怪诞行为学", "author": "丹·艾瑞里", "reason": "用实验故事介绍非理性行为。" },
                    { "title": "助推", "author": "理查德·塞勒", "reason": "把行为洞见用于政策设计。", "isCurrent": false }
                ]
            },
            {
                "levelName": "Intermediate",
                "description": "掌握双系统理论与启发式。",
                "keyConcepts": ["系统1与系统2", "前景理论"],
                "books": [
                    { "title": "思考，快与慢", "author": "丹尼尔·卡尼曼", "reason": "双系统理论的权威阐述。", "isCurrent": true },
                    { "title": "错误的行为", "author": "理查德·塞勒", "reason": "行为经济学的发展史。" }
                ]
            },
            {
                "levelName": "Advanced",
                "description": "阅读原始研究与形式化模型。",
                "keyConcepts": ["前景理论的数学形式", "跨期选择"],
                "books": [
                    { "title": "行为博弈论", "author": "科林·凯莫勒", "reason": "用实验数据检验博弈论。" }
                ]
            }
        ]
    }"#
    .to_string()
}

pub fn sample_roadmap() -> RoadmapData {
    parse_roadmap(&sample_roadmap_json(), SearchMode::Book).expect("sample roadmap is valid")
}

/// Same domain answered for a topic search: title carries the sentinel
pub fn topic_roadmap_json() -> String {
    sample_roadmap_json().replace(r#""title": "思考，快与慢","#, r#""title": "None","#)
}

/// Generator returning a canned payload and recording the prompts it saw
pub struct StubGenerator {
    outcome: Box<dyn Fn() -> Result<Option<String>, RoadmapError> + Send + Sync>,
    pub prompts: Mutex<Vec<GenerationPrompt>>,
}

impl StubGenerator {
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let payload = payload.into();
        Self::with_outcome(move || Ok(Some(payload.clone())))
    }

    pub fn with_outcome(
        outcome: impl Fn() -> Result<Option<String>, RoadmapError> + Send + Sync + 'static,
    ) -> Self {
        Self { outcome: Box::new(outcome), prompts: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt log").len()
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    fn model_name(&self) -> &str {
        STUB_MODEL
    }

    async fn generate(&self, prompt: &GenerationPrompt) -> Result<Option<String>, RoadmapError> {
        self.prompts.lock().expect("prompt log").push(prompt.clone());
        (self.outcome)()
    }
}

/// Service stub for handler tests
pub struct StubRoadmapService {
    outcome: Box<dyn Fn(&SearchRequest) -> Result<RoadmapData, RoadmapError> + Send + Sync>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl StubRoadmapService {
    pub fn new<F>(outcome: F) -> Self
    where
        F: Fn(&SearchRequest) -> Result<RoadmapData, RoadmapError> + Send + Sync + 'static,
    {
        Self { outcome: Box::new(outcome), requests: Mutex::new(Vec::new()) }
    }

    pub fn returning_sample() -> Self {
        Self::new(|_| Ok(sample_roadmap()))
    }
}

#[async_trait]
impl RoadmapService for StubRoadmapService {
    fn model_name(&self) -> &str {
        STUB_MODEL
    }

    async fn generate_roadmap(&self, request: &SearchRequest) -> Result<RoadmapData, RoadmapError> {
        self.requests.lock().expect("request log").push(request.clone());
        (self.outcome)(request)
    }
}

pub fn test_state(service: Arc<StubRoadmapService>) -> Arc<AppState> {
    Arc::new(AppState::new(service))
}
