//! Request Builder
//!
//! Turns a [`SearchRequest`] into the instruction text, the persona and the
//! structured-output schema sent to the model. Pure functions only.

use once_cell::sync::Lazy;
use serde_json::{Value, json};

use crate::models::{DifficultyLevel, SearchMode, SearchRequest};

// ============================================================================
// Persona
// ============================================================================

/// System-level persona; JSON keys stay English, every value is Chinese
pub const SYSTEM_INSTRUCTION: &str = "你是一位博学的图书馆员，同时也是一名课程设计师。\
你的任务是帮助读者看清自己在某个知识领域中所处的位置，并用简体中文规划一条可视化的学习路线。\
除 JSON 键名保持英文外，所有输出字段的取值都必须使用简体中文。";

/// Value the model puts in `userBookAnalysis.title` when no book was given
pub const NO_BOOK_TITLE: &str = "None";

// ============================================================================
// Templates
// ============================================================================

/// Which instruction template a request selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    BookAnalysis,
    TopicExploration,
}

impl PromptTemplate {
    pub fn for_mode(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Book => Self::BookAnalysis,
            SearchMode::Topic => Self::TopicExploration,
        }
    }
}

/// Everything the client needs for one generation call
#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    pub template: PromptTemplate,
    pub instruction: String,
    pub system_instruction: &'static str,
    pub response_schema: &'static Value,
}

pub fn build_prompt(request: &SearchRequest) -> GenerationPrompt {
    let template = PromptTemplate::for_mode(request.mode);
    let instruction = match template {
        PromptTemplate::BookAnalysis => book_instruction(&request.query),
        PromptTemplate::TopicExploration => topic_instruction(&request.query),
    };

    GenerationPrompt {
        template,
        instruction,
        system_instruction: SYSTEM_INSTRUCTION,
        response_schema: response_schema(),
    }
}

fn book_instruction(query: &str) -> String {
    format!(
        r#"请分析书籍 "{query}"。
1. 判断这本书所属的主要非虚构领域或流派（例如：“微观经济学”、“斯多葛哲学”、“系统设计”），用中文作答。
2. 判断这本书在该领域中通常属于“入门 (Beginner)”、“进阶 (Intermediate)”还是“高阶 (Advanced)”。
3. 为该领域设计一条包含 3 个层级的学习路线图：
   - 入门 (Beginner)：适合完全没有基础的读者。
   - 进阶 (Intermediate)：帮助读者加深理解；如果合适，把用户的这本书放在这一层。
   - 高阶 (Advanced)：用于掌握理论与技术上的深层细节。
4. 给出“缺口分析 (Gap Analysis)”：用中文说明如果读者只读这一本书，会错过该领域的哪些核心概念。
5. 每个层级推荐 2-3 本各不相同的高质量书籍，并用中文说明推荐理由；与用户这本书对应的条目把 isCurrent 设为 true。"#
    )
}

fn topic_instruction(query: &str) -> String {
    format!(
        r#"请为主题 "{query}" 设计一条学习路线图。
1. 用中文清晰地界定这个领域。
2. 设计一条包含 3 个层级的学习路线图：
   - 入门 (Beginner)：最好的起点。
   - 进阶 (Intermediate)：深化知识。
   - 高阶 (Advanced)：走向精通。
3. 读者没有指定正在阅读的书籍，请把 userBookAnalysis.title 设为 "{NO_BOOK_TITLE}"，假设他们在寻找切入点，但希望看到完整路径。
4. 用中文列出每个阶段需要掌握的关键概念，并为每个层级推荐 2-3 本书籍。"#
    )
}

// ============================================================================
// Response Schema
// ============================================================================

static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let levels: Vec<&str> = DifficultyLevel::ALL.iter().map(|l| l.as_str()).collect();

    let book = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "中文书名" },
            "author": { "type": "STRING", "description": "作者中文名（或原名）" },
            "reason": { "type": "STRING", "description": "中文理由：这本书为什么对这个层级至关重要" },
            "isCurrent": {
                "type": "BOOLEAN",
                "description": "Set to true ONLY if this matches the user's search query."
            }
        },
        "required": ["title", "author", "reason"],
        "propertyOrdering": ["title", "author", "reason", "isCurrent"]
    });

    let level_node = json!({
        "type": "OBJECT",
        "properties": {
            "levelName": { "type": "STRING", "enum": levels },
            "description": { "type": "STRING", "description": "中文描述：这一层级的读者具备什么能力" },
            "keyConcepts": {
                "type": "ARRAY",
                "items": { "type": "STRING", "description": "这一阶段掌握的中文关键概念" }
            },
            "books": { "type": "ARRAY", "items": book }
        },
        "required": ["levelName", "description", "keyConcepts", "books"],
        "propertyOrdering": ["levelName", "description", "keyConcepts", "books"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "domain": { "type": "STRING", "description": "所属的研究领域或类别（中文）" },
            "summary": { "type": "STRING", "description": "用两句中文概括该领域涵盖的内容" },
            "userBookAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "title": {
                        "type": "STRING",
                        "description": format!("用户书籍的标准中文书名（主题搜索时为 '{}'）", NO_BOOK_TITLE)
                    },
                    "assignedLevel": { "type": "STRING", "enum": levels },
                    "gapAnalysis": { "type": "STRING", "description": "中文分析：与完整领域相比，这本书没有覆盖什么" },
                    "nextSteps": { "type": "STRING", "description": "中文建议：下一步的具体行动或推荐阅读的一本书" }
                },
                "required": ["title", "assignedLevel", "gapAnalysis", "nextSteps"],
                "propertyOrdering": ["title", "assignedLevel", "gapAnalysis", "nextSteps"]
            },
            "roadmap": { "type": "ARRAY", "items": level_node }
        },
        "required": ["domain", "summary", "userBookAnalysis", "roadmap"],
        "propertyOrdering": ["domain", "summary", "userBookAnalysis", "roadmap"]
    })
});

/// Structured-output schema in the Gemini OpenAPI subset
pub fn response_schema() -> &'static Value {
    &RESPONSE_SCHEMA
}
