//! Generated-code output shared by result cards and the scraper.
//!
//! Holds the generation sub-flow state, copy feedback, and snippet saving.

use crate::clipboard::{self, CopyFeedback, CopyOutcome};
use crate::gateway::GatewayError;
use crate::i18n::{Key, LocaleStore};
use crate::task::{self, Task};
use crate::types::CodeLanguage;
use crate::ui::widgets;
use crate::ui::Theme;
use anyhow::{Context, Result};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CodeState {
    #[default]
    Idle,
    Generating,
    Ready {
        code: String,
        language: CodeLanguage,
    },
    Failed(Key),
}

#[derive(Default)]
pub struct CodeOutput {
    pub state: CodeState,
    pub copy: CopyFeedback,
    task: Option<Task<String>>,
    language: CodeLanguage,
}

impl CodeOutput {
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Enter `Generating` and run `generate` in the background.
    /// Returns false (and does nothing) while a generation is in flight.
    pub fn start<F>(&mut self, language: CodeLanguage, generate: F) -> bool
    where
        F: FnOnce() -> Result<String, GatewayError> + Send + 'static,
    {
        if self.is_pending() {
            return false;
        }
        self.state = CodeState::Generating;
        self.language = language;
        self.copy = CopyFeedback::default();
        self.task = Some(Task::spawn(generate));
        true
    }

    /// Local validation failure; never reaches the gateway.
    pub fn fail(&mut self, key: Key) {
        if !self.is_pending() {
            self.state = CodeState::Failed(key);
        }
    }

    /// Apply a finished generation. Returns true when the state changed.
    pub fn poll(&mut self, failure: Key) -> bool {
        match task::poll_slot(&mut self.task) {
            None => false,
            Some(Ok(code)) => {
                tracing::debug!(language = self.language.as_str(), "code ready");
                self.state = CodeState::Ready {
                    code,
                    language: self.language,
                };
                true
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "code generation failed");
                self.state = CodeState::Failed(failure);
                true
            }
        }
    }

    pub fn code(&self) -> Option<(&str, CodeLanguage)> {
        match &self.state {
            CodeState::Ready { code, language } => Some((code.as_str(), *language)),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<Key> {
        match self.state {
            CodeState::Failed(key) => Some(key),
            _ => None,
        }
    }

    /// Copy the generated code; `None` when there is nothing to copy.
    pub fn copy(&mut self) -> Option<CopyOutcome> {
        let (code, _) = self.code()?;
        let outcome = clipboard::copy_to_clipboard(code);
        self.copy.record(outcome);
        Some(outcome)
    }

    /// Save the generated code under the snippets directory.
    pub fn save(&self, stem: &str) -> Option<Result<PathBuf>> {
        let (code, language) = self.code()?;
        Some(snippets_dir().and_then(|dir| save_snippet_in(&dir, stem, language, code)))
    }
}

fn snippets_dir() -> Result<PathBuf> {
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("datascout").join("snippets"))
}

/// Lowercase, keep letters and digits, collapse everything else into `-`.
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    let out = out.trim_end_matches('-').to_string();
    if out.is_empty() {
        "snippet".to_string()
    } else {
        out
    }
}

pub fn save_snippet_in(dir: &Path, stem: &str, language: CodeLanguage, code: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{}-{}.{}", slug(stem), timestamp, language.extension()));

    let mut content = code.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "snippet saved");
    Ok(path)
}

/// Lines for the code sub-flow. Code always reads left to right.
pub fn code_lines<'a>(
    output: &'a CodeOutput,
    locale: &LocaleStore,
    theme: &Theme,
) -> Vec<Line<'a>> {
    match &output.state {
        CodeState::Idle => vec![Line::styled(locale.t(Key::NoCodeYet), theme.text_dim())],
        CodeState::Generating => vec![widgets::loading_line(
            locale.t(Key::GeneratingCodeButton),
            theme,
        )],
        CodeState::Failed(key) => vec![Line::styled(locale.t(*key), theme.error())],
        CodeState::Ready { code, language } => {
            let mut lines = vec![Line::from(vec![
                Span::styled(format!(" {} ", language.as_str()), theme.chip()),
                Span::raw("  "),
                Span::styled("[c] ", theme.key_hint()),
                Span::styled(locale.t(output.copy.label()), theme.text()),
                Span::raw("  "),
                Span::styled("[w] ", theme.key_hint()),
                Span::styled(locale.t(Key::SaveSnippet), theme.text()),
            ])
            .alignment(Alignment::Left)];
            lines.extend(
                code.lines()
                    .map(|l| Line::styled(l, theme.code()).alignment(Alignment::Left)),
            );
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::wait_for;

    fn finish(output: &mut CodeOutput) {
        assert!(wait_for(|| output.poll(Key::ErrorCodeGeneration)));
    }

    #[test]
    fn test_generation_success() {
        let mut output = CodeOutput::default();
        assert!(output.start(CodeLanguage::R, || Ok("library(httr)".into())));
        assert_eq!(output.state, CodeState::Generating);
        finish(&mut output);
        assert_eq!(output.code(), Some(("library(httr)", CodeLanguage::R)));
    }

    #[test]
    fn test_failure_maps_to_key() {
        let mut output = CodeOutput::default();
        output.start(CodeLanguage::Python, || {
            Err(GatewayError::Service("quota".into()))
        });
        finish(&mut output);
        assert_eq!(output.error(), Some(Key::ErrorCodeGeneration));
        assert!(output.code().is_none());
    }

    #[test]
    fn test_start_ignored_while_pending() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let mut output = CodeOutput::default();
        assert!(output.start(CodeLanguage::Python, move || {
            let _ = rx.recv();
            Ok("first".into())
        }));
        assert!(!output.start(CodeLanguage::R, || Ok("second".into())));
        tx.send(()).unwrap();
        finish(&mut output);
        assert_eq!(output.code(), Some(("first", CodeLanguage::Python)));
    }

    #[test]
    fn test_regeneration_overwrites_error() {
        let mut output = CodeOutput::default();
        output.fail(Key::ErrorScrapingPrompt);
        assert_eq!(output.error(), Some(Key::ErrorScrapingPrompt));
        output.start(CodeLanguage::Python, || Ok("ok".into()));
        finish(&mut output);
        assert!(output.error().is_none());
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("NASA Earthdata (MODIS)"), "nasa-earthdata-modis");
        assert_eq!(slug("  ??? "), "snippet");
        assert_eq!(slug("داده های هواشناسی"), "داده-های-هواشناسی");
    }

    #[test]
    fn test_save_snippet_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_snippet_in(dir.path(), "NOAA GHCN", CodeLanguage::JavaScript, "fetch(url)").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("noaa-ghcn-"));
        assert!(name.ends_with(".js"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fetch(url)\n");
    }

    #[test]
    fn test_nothing_to_copy_or_save_without_code() {
        let mut output = CodeOutput::default();
        assert!(output.copy().is_none());
        assert!(output.save("x").is_none());
    }
}
