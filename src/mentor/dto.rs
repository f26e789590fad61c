use serde::{Deserialize, Serialize};

/// Request body for career-field suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestFieldsRequest {
    pub interests: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestFieldsResponse {
    pub fields: Vec<String>,
}

/// Request body for a personal guidance document.
#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    pub interests: String,
    pub field: String,
}

/// Markdown document, rendered by the client, never interpreted.
#[derive(Debug, Serialize)]
pub struct GuidanceResponse {
    pub guidance: String,
}

/// Request body for a career roadmap.
#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub field: String,
}

/// One phase of a career roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub title: String,
    pub timeline: String,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub networking: Vec<String>,
}

/// A four-phase career roadmap, deserialized from the model's JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub phases: Vec<RoadmapPhase>,
}
