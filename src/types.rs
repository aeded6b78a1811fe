//! Core data types shared across all modules
//!
//! Plain data returned by the gateway and held by the flow controllers.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A temporary UI message shown to the user (e.g. success/error notifications)
#[derive(Clone)]
pub struct FlashMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

impl FlashMessage {
    pub fn new(text: String, is_error: bool) -> Self {
        Self {
            text,
            is_error,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, seconds: u64) -> bool {
        self.created.elapsed().as_secs() >= seconds
    }
}

/// A dataset suggested by the AI. `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub name: String,
    pub description: String,
    pub access_method: String,
}

/// Enriched facts about a data source, fetched at most once per card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceDetails {
    pub data_formats: Vec<String>,
    pub update_frequency: String,
    pub usage_restrictions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

/// One answered follow-up question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpExchange {
    pub question: String,
    pub answer: String,
}

/// Wire shape of a follow-up answer
#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpResponse {
    pub answer: String,
}

/// Target languages offered for access code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeLanguage {
    #[default]
    Python,
    JavaScript,
    R,
}

impl CodeLanguage {
    pub fn all() -> &'static [CodeLanguage] {
        &[CodeLanguage::Python, CodeLanguage::JavaScript, CodeLanguage::R]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeLanguage::Python => "Python",
            CodeLanguage::JavaScript => "JavaScript",
            CodeLanguage::R => "R",
        }
    }

    /// File extension used when saving a snippet
    pub fn extension(&self) -> &'static str {
        match self {
            CodeLanguage::Python => "py",
            CodeLanguage::JavaScript => "js",
            CodeLanguage::R => "R",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_uses_camel_case_keys() {
        let src: DataSource = serde_json::from_str(
            r#"{"name":"NOAA","description":"Weather","accessMethod":"Public API"}"#,
        )
        .unwrap();
        assert_eq!(src.access_method, "Public API");
    }

    #[test]
    fn test_details_documentation_url_is_optional() {
        let details: DataSourceDetails = serde_json::from_str(
            r#"{"dataFormats":["CSV"],"updateFrequency":"Daily","usageRestrictions":"None"}"#,
        )
        .unwrap();
        assert_eq!(details.documentation_url, None);

        let details: DataSourceDetails = serde_json::from_str(
            r#"{"dataFormats":[],"updateFrequency":"","usageRestrictions":"","documentationUrl":""}"#,
        )
        .unwrap();
        // Present-but-empty stays distinguishable from absent
        assert_eq!(details.documentation_url.as_deref(), Some(""));
    }

    #[test]
    fn test_code_language_cycle() {
        assert_eq!(CodeLanguage::default(), CodeLanguage::Python);
        assert_eq!(CodeLanguage::Python.next(), CodeLanguage::JavaScript);
        assert_eq!(CodeLanguage::R.next(), CodeLanguage::Python);
        assert_eq!(CodeLanguage::Python.prev(), CodeLanguage::R);
    }

    #[test]
    fn test_flash_message_expiry() {
        let msg = FlashMessage::new("test".into(), false);
        assert!(!msg.is_expired(3));
        assert_eq!(msg.text, "test");
        assert!(!msg.is_error);
    }
}
