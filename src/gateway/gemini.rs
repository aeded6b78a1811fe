//! Gemini `generateContent` client.
//!
//! All calls are blocking. ALWAYS run in a background thread!
//! Uses `ureq` for HTTP with a timeout on every request.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One independent call to the generative API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Enable search-grounded generation
    pub web_search: bool,
}

/// Anything that turns a prompt into text.
pub trait TextModel: Send + Sync {
    fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

// ═══════════════════════════════════════
//  WIRE TYPES
// ═══════════════════════════════════════

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

fn build_body(request: &GenerateRequest) -> GeminiRequest<'_> {
    let tools = if request.web_search {
        vec![GeminiTool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts: vec![GeminiTextPart {
                text: &request.prompt,
            }],
        }],
        tools,
    }
}

/// Concatenate the text parts of the first candidate.
/// `None` when there is no candidate or it carries no text.
fn extract_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        return None;
    }
    Some(text)
}

// ═══════════════════════════════════════
//  CLIENT
// ═══════════════════════════════════════

pub struct GeminiClient {
    agent: ureq::Agent,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

impl TextModel for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let body = serde_json::to_string(&build_body(request))?;

        let resp = self
            .agent
            .post(&self.endpoint(&request.model))
            .set("x-goog-api-key", &self.api_key)
            .set("content-type", "application/json")
            .send_string(&body);

        match resp {
            Ok(resp) => {
                let json: GeminiResponse = serde_json::from_reader(resp.into_reader())
                    .context("Failed to parse Gemini response")?;
                extract_text(&json).context("Gemini returned no text")
            }
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                let msg: String = body.chars().take(200).collect();
                anyhow::bail!("Gemini API error {}: {}", code, msg)
            }
            Err(ureq::Error::Transport(e)) => {
                anyhow::bail!("Network error (Gemini): {}", e)
            }
        }
    }
}
