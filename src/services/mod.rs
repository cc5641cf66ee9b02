pub mod roadmap;

pub use roadmap::{GeminiClient, LlmSettings, RoadmapError, RoadmapService, RoadmapServiceImpl};
