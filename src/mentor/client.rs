//! Mentor client — the single point of entry for all text-generation calls.
//! No other module talks to the Gemini API directly.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::mentor::dto::Roadmap;
use crate::mentor::prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_RETRIES: u32 = 3;

/// The fields endpoint always proposes this many career paths.
pub const SUGGESTED_FIELD_COUNT: usize = 4;
/// Roadmaps are always structured into this many phases.
pub const ROADMAP_PHASE_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum MentorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("model returned malformed output: {0}")]
    Malformed(String),
}

/// The interface the rest of the app programs against; the production
/// implementation is `GeminiClient`, tests substitute fakes.
#[async_trait]
pub trait MentorClient: Send + Sync {
    /// Suggest exactly four career fields matching the described interests.
    async fn suggest_fields(&self, interests: &str) -> Result<Vec<String>, MentorError>;

    /// A markdown guidance document for the chosen field.
    async fn career_guidance(&self, interests: &str, field: &str) -> Result<String, MentorError>;

    /// A four-phase, schema-validated roadmap for the chosen field.
    async fn career_roadmap(&self, field: &str) -> Result<Roadmap, MentorError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Production mentor backed by the Gemini `generateContent` REST API.
/// Retries 429 and 5xx responses with exponential backoff.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model,
        }
    }

    async fn call(&self, prompt: &str, json_output: bool) -> Result<String, MentorError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: json_output.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);

        let mut last_error: Option<MentorError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "mentor call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(MentorError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(MentorError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(MentorError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generated: GenerateResponse = response.json().await?;
            let text = generated.text().ok_or(MentorError::EmptyContent)?;
            debug!(chars = text.len(), "mentor call succeeded");
            return Ok(text.to_string());
        }

        Err(last_error.unwrap_or(MentorError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the model and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    async fn call_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, MentorError> {
        let text = self.call(prompt, true).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(MentorError::Parse)
    }
}

#[async_trait]
impl MentorClient for GeminiClient {
    async fn suggest_fields(&self, interests: &str) -> Result<Vec<String>, MentorError> {
        let fields: Vec<String> = self.call_json(&prompts::suggest_fields(interests)).await?;
        validate_fields(fields)
    }

    async fn career_guidance(&self, interests: &str, field: &str) -> Result<String, MentorError> {
        self.call(&prompts::guidance(interests, field), false).await
    }

    async fn career_roadmap(&self, field: &str) -> Result<Roadmap, MentorError> {
        let roadmap: Roadmap = self.call_json(&prompts::roadmap(field)).await?;
        validate_roadmap(roadmap)
    }
}

fn validate_fields(fields: Vec<String>) -> Result<Vec<String>, MentorError> {
    if fields.len() != SUGGESTED_FIELD_COUNT || fields.iter().any(|f| f.trim().is_empty()) {
        return Err(MentorError::Malformed(format!(
            "expected {SUGGESTED_FIELD_COUNT} non-empty career fields, got {:?}",
            fields
        )));
    }
    Ok(fields)
}

fn validate_roadmap(roadmap: Roadmap) -> Result<Roadmap, MentorError> {
    if roadmap.phases.len() != ROADMAP_PHASE_COUNT {
        return Err(MentorError::Malformed(format!(
            "expected {ROADMAP_PHASE_COUNT} roadmap phases, got {}",
            roadmap.phases.len()
        )));
    }
    if roadmap.phases.iter().any(|p| p.title.trim().is_empty()) {
        return Err(MentorError::Malformed("phase with empty title".into()));
    }
    Ok(roadmap)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_json_fences_with_json_tag() {
        let input = "```json\n[\"a\", \"b\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"a\", \"b\"]");
    }

    #[test]
    fn strip_json_fences_without_tag() {
        let input = "```\n[\"a\", \"b\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"a\", \"b\"]");
    }

    #[test]
    fn strip_json_fences_no_fences() {
        let input = "[\"a\", \"b\"]";
        assert_eq!(strip_json_fences(input), "[\"a\", \"b\"]");
    }

    #[test]
    fn fields_must_be_exactly_four_and_non_empty() {
        let ok = vec![
            "Data Science".to_string(),
            "Robotics".to_string(),
            "Game Development".to_string(),
            "Bioinformatics".to_string(),
        ];
        assert!(validate_fields(ok).is_ok());
        assert!(validate_fields(vec!["One".into()]).is_err());
        assert!(validate_fields(vec![
            "A".into(),
            "B".into(),
            "  ".into(),
            "D".into()
        ])
        .is_err());
    }

    #[test]
    fn fields_parse_from_fenced_model_output() {
        let raw = "```json\n[\"Data Science\", \"Robotics\", \"Game Development\", \"Bioinformatics\"]\n```";
        let fields: Vec<String> = serde_json::from_str(strip_json_fences(raw)).unwrap();
        assert!(validate_fields(fields).is_ok());
    }

    #[test]
    fn python_list_syntax_is_rejected_not_evaluated() {
        // The original implementation eval'd this shape; here it must fail parsing.
        let raw = "['Data Science', 'Robotics', 'Game Development', 'Bioinformatics']";
        let parsed: Result<Vec<String>, _> = serde_json::from_str(strip_json_fences(raw));
        assert!(parsed.is_err());
    }

    #[test]
    fn roadmap_requires_four_titled_phases() {
        let phase = |title: &str| crate::mentor::dto::RoadmapPhase {
            title: title.into(),
            timeline: "6-12 Months".into(),
            skills: vec!["skill".into()],
            projects: vec!["project".into()],
            networking: vec!["tip".into()],
        };
        let ok = Roadmap {
            phases: vec![phase("P1"), phase("P2"), phase("P3"), phase("P4")],
        };
        assert!(validate_roadmap(ok).is_ok());

        let short = Roadmap {
            phases: vec![phase("P1")],
        };
        assert!(validate_roadmap(short).is_err());

        let untitled = Roadmap {
            phases: vec![phase("P1"), phase("P2"), phase("P3"), phase("")],
        };
        assert!(validate_roadmap(untitled).is_err());
    }

    #[test]
    fn roadmap_deserializes_from_model_json() {
        let raw = r#"{"phases": [
            {"title": "🎓 Phase 1: Foundations", "timeline": "6-12 Months",
             "skills": ["Python", "Statistics"], "projects": ["Portfolio site"],
             "networking": ["Join a local meetup"]},
            {"title": "Phase 2", "timeline": "3 Months", "skills": [], "projects": [], "networking": []},
            {"title": "Phase 3", "timeline": "3 Months", "skills": [], "projects": [], "networking": []},
            {"title": "Phase 4", "timeline": "6 Months", "skills": [], "projects": [], "networking": []}
        ]}"#;
        let roadmap: Roadmap = serde_json::from_str(raw).unwrap();
        let roadmap = validate_roadmap(roadmap).unwrap();
        assert_eq!(roadmap.phases.len(), 4);
        assert_eq!(roadmap.phases[0].skills, vec!["Python", "Statistics"]);
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn response_text_extraction() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "hello"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), Some("hello"));
    }
}
