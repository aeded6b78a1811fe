//! AI Gateway
//!
//! The only component that talks to the generative API. Builds prompts,
//! strips Markdown code fences from replies and parses the JSON payloads.
//! Stateless: no retry, no cache.

pub mod gemini;
pub mod prompts;
#[cfg(test)]
pub mod testing;

use crate::types::{DataSource, DataSourceDetails, FollowUpResponse};
use gemini::{GenerateRequest, TextModel};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;

/// Failure of a gateway operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Transport, HTTP status or empty reply
    #[error("service error: {0}")]
    Service(String),
    /// Reply was not the expected JSON shape
    #[error("parse error: {0}")]
    Parse(String),
}

static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[ \t]*[A-Za-z0-9_+-]*[ \t]*\r?\n?").unwrap());
static CLOSING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n?```$").unwrap());

/// Remove a leading ```` ```lang ```` line and a trailing ```` ``` ````.
/// Either fence may be missing.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let start = OPENING_FENCE.find(text).map(|m| m.end()).unwrap_or(0);
    let rest = &text[start..];
    let end = CLOSING_FENCE
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());
    rest[..end].trim()
}

/// Strip fences and deserialize; prose around the JSON is not recovered.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    serde_json::from_str(strip_fences(text)).map_err(|e| GatewayError::Parse(e.to_string()))
}

/// Handle to the generative model. Cheap to clone into worker threads.
#[derive(Clone)]
pub struct Gateway {
    model: Arc<dyn TextModel>,
    model_name: String,
}

impl Gateway {
    pub fn new(model: Arc<dyn TextModel>, model_name: &str) -> Self {
        Self {
            model,
            model_name: model_name.to_string(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Same backend, different model id
    pub fn with_model_name(&self, model_name: &str) -> Self {
        Self {
            model: Arc::clone(&self.model),
            model_name: model_name.to_string(),
        }
    }

    fn call(&self, op: &str, prompt: String, web_search: bool) -> Result<String, GatewayError> {
        tracing::debug!(op, model = %self.model_name, web_search, "gateway call");
        let request = GenerateRequest {
            model: self.model_name.clone(),
            prompt,
            web_search,
        };
        match self.model.generate(&request) {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!(op, "empty reply");
                Err(GatewayError::Service("empty reply".into()))
            }
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                tracing::warn!(op, error = %format!("{:#}", e), "gateway call failed");
                Err(GatewayError::Service(format!("{:#}", e)))
            }
        }
    }

    fn call_json<T: DeserializeOwned>(
        &self,
        op: &str,
        prompt: String,
        web_search: bool,
    ) -> Result<T, GatewayError> {
        let text = self.call(op, prompt, web_search)?;
        parse_json(&text).inspect_err(|e| {
            tracing::warn!(op, error = %e, "unparseable reply");
        })
    }

    /// Suggest data sources for a project (web search on).
    pub fn find_sources(&self, project_description: &str) -> Result<Vec<DataSource>, GatewayError> {
        let sources: Vec<DataSource> =
            self.call_json("find_sources", prompts::find_sources(project_description), true)?;

        let mut seen = HashSet::new();
        let unique: Vec<DataSource> = sources
            .into_iter()
            .filter(|s| {
                let fresh = seen.insert(s.name.clone());
                if !fresh {
                    tracing::warn!(name = %s.name, "dropping duplicate data source");
                }
                fresh
            })
            .collect();
        Ok(unique)
    }

    /// Access code for `source` in `language`. Returned verbatim (trimmed).
    pub fn generate_code(
        &self,
        source: &DataSource,
        project_description: &str,
        language: &str,
    ) -> Result<String, GatewayError> {
        self.call(
            "generate_code",
            prompts::generate_code(source, project_description, language),
            false,
        )
    }

    pub fn get_details(&self, source: &DataSource) -> Result<DataSourceDetails, GatewayError> {
        self.call_json("get_details", prompts::get_details(source), true)
    }

    pub fn answer_follow_up(&self, source: &DataSource, question: &str) -> Result<String, GatewayError> {
        let reply: FollowUpResponse = self.call_json(
            "answer_follow_up",
            prompts::answer_follow_up(source, question),
            true,
        )?;
        Ok(reply.answer)
    }

    /// Python scraper for `url`. Same contract as `generate_code`.
    pub fn generate_scraping_code(
        &self,
        url: &str,
        data_description: &str,
    ) -> Result<String, GatewayError> {
        self.call(
            "generate_scraping_code",
            prompts::generate_scraping_code(url, data_description, "Python"),
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{gateway, ScriptedModel};
    use super::*;

    fn source() -> DataSource {
        DataSource {
            name: "NOAA GHCN".into(),
            description: "Daily climate records".into(),
            access_method: "FTP Server".into(),
        }
    }

    const SOURCES: &str = r#"[{"name":"A","description":"d1","accessMethod":"Public API"},{"name":"B","description":"d2","accessMethod":"Website Download"}]"#;

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_fences("  ```\n{}\n```  "), "{}");
        assert_eq!(strip_fences("[1]"), "[1]");
        assert_eq!(strip_fences("```json\n[1]"), "[1]");
        assert_eq!(strip_fences("[1]\n```"), "[1]");
        assert_eq!(strip_fences("``` json\n[1]\n```"), "[1]");
        assert_eq!(strip_fences("```json\r\n{}\r\n```"), "{}");
    }

    #[test]
    fn test_spaced_and_crlf_fences_parse() {
        let spaced = format!("``` json\n{}\n```", SOURCES);
        let crlf = format!("```json\r\n{}\r\n```", SOURCES);
        let model = ScriptedModel::new(vec![Ok(spaced), Ok(crlf)]);
        let gw = gateway(&model);
        assert_eq!(gw.find_sources("x").unwrap().len(), 2);
        assert_eq!(gw.find_sources("x").unwrap().len(), 2);
    }

    #[test]
    fn test_blank_reply_is_service_error() {
        let model = ScriptedModel::new(vec![
            Ok("   ".into()),
            Ok("\n".into()),
            Ok(String::new()),
        ]);
        let gw = gateway(&model);
        assert!(matches!(
            gw.generate_code(&source(), "x", "Python"),
            Err(GatewayError::Service(_))
        ));
        assert!(matches!(
            gw.generate_scraping_code("https://example.com", "rows"),
            Err(GatewayError::Service(_))
        ));
        assert!(matches!(gw.find_sources("x"), Err(GatewayError::Service(_))));
    }

    #[test]
    fn test_fenced_and_unfenced_parse_identically() {
        let fenced = format!("```json\n{}\n```", SOURCES);
        let model = ScriptedModel::new(vec![Ok(SOURCES.into()), Ok(fenced)]);
        let gw = gateway(&model);

        let plain = gw.find_sources("climate").unwrap();
        let fenced = gw.find_sources("climate").unwrap();
        assert_eq!(plain, fenced);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[1].access_method, "Website Download");
    }

    #[test]
    fn test_not_json_is_parse_error_for_every_json_operation() {
        let model = ScriptedModel::new(vec![
            Ok("not json".into()),
            Ok("not json".into()),
            Ok("not json".into()),
        ]);
        let gw = gateway(&model);

        assert!(matches!(gw.find_sources("x"), Err(GatewayError::Parse(_))));
        assert!(matches!(gw.get_details(&source()), Err(GatewayError::Parse(_))));
        assert!(matches!(
            gw.answer_follow_up(&source(), "q"),
            Err(GatewayError::Parse(_))
        ));
    }

    #[test]
    fn test_prose_around_json_is_parse_error() {
        let model = ScriptedModel::new(vec![Ok(format!("Here you go: {}", SOURCES))]);
        assert!(matches!(
            gateway(&model).find_sources("x"),
            Err(GatewayError::Parse(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let model = ScriptedModel::new(vec![Ok(r#"{"name":"A"}"#.into())]);
        assert!(matches!(
            gateway(&model).find_sources("x"),
            Err(GatewayError::Parse(_))
        ));
    }

    #[test]
    fn test_transport_failure_is_service_error() {
        let model = ScriptedModel::new(vec![Err("Network error (Gemini): timed out".into())]);
        match gateway(&model).generate_code(&source(), "x", "Python") {
            Err(GatewayError::Service(msg)) => assert!(msg.contains("timed out")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_details_without_documentation_url() {
        let model = ScriptedModel::new(vec![Ok(
            r#"{"dataFormats":["CSV","JSON"],"updateFrequency":"Daily","usageRestrictions":"Public domain"}"#
                .into(),
        )]);
        let details = gateway(&model).get_details(&source()).unwrap();
        assert_eq!(details.data_formats, vec!["CSV", "JSON"]);
        assert!(details.documentation_url.is_none());
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let model = ScriptedModel::new(vec![Ok(
            r#"[{"name":"A","description":"first","accessMethod":"x"},{"name":"A","description":"second","accessMethod":"y"},{"name":"B","description":"b","accessMethod":"z"}]"#
                .into(),
        )]);
        let sources = gateway(&model).find_sources("x").unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].description, "first");
    }

    #[test]
    fn test_code_is_returned_trimmed_verbatim() {
        let model = ScriptedModel::new(vec![Ok("\n  import requests\nprint(1)  \n".into())]);
        let code = gateway(&model)
            .generate_code(&source(), "x", "Python")
            .unwrap();
        assert_eq!(code, "import requests\nprint(1)");
    }

    #[test]
    fn test_follow_up_returns_answer_field() {
        let model = ScriptedModel::new(vec![Ok(r#"```json
{"answer":"Yes, back to 1880."}
```"#
            .into())]);
        let answer = gateway(&model)
            .answer_follow_up(&source(), "Historical data?")
            .unwrap();
        assert_eq!(answer, "Yes, back to 1880.");
    }

    #[test]
    fn test_web_search_flag_per_operation() {
        let model = ScriptedModel::new(vec![
            Ok("[]".into()),
            Ok("code".into()),
            Ok(r#"{"dataFormats":[],"updateFrequency":"","usageRestrictions":""}"#.into()),
            Ok(r#"{"answer":"a"}"#.into()),
            Ok("scraper".into()),
        ]);
        let gw = gateway(&model);
        gw.find_sources("x").unwrap();
        gw.generate_code(&source(), "x", "R").unwrap();
        gw.get_details(&source()).unwrap();
        gw.answer_follow_up(&source(), "q").unwrap();
        gw.generate_scraping_code("https://example.com", "table").unwrap();

        let flags: Vec<bool> = model.requests().iter().map(|r| r.web_search).collect();
        assert_eq!(flags, vec![true, false, true, true, false]);
        assert!(model.requests()[4].prompt.contains("runnable Python"));
    }

    #[test]
    fn test_with_model_name_changes_request_model() {
        let model = ScriptedModel::new(vec![Ok("[]".into())]);
        let gw = gateway(&model).with_model_name("gemini-2.5-pro");
        gw.find_sources("x").unwrap();
        assert_eq!(model.requests()[0].model, "gemini-2.5-pro");
    }
}
