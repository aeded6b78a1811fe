//! Web scraper code generator: URL + data description in, Python out.

use crate::gateway::Gateway;
use crate::i18n::{Key, LocaleStore};
use crate::modules::code_block::{self, CodeOutput};
use crate::types::{CodeLanguage, FlashMessage};
use crate::ui::widgets;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// ── Form ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScraperField {
    #[default]
    Url,
    DataDescription,
}

impl ScraperField {
    pub fn next(&self) -> Self {
        match self {
            ScraperField::Url => ScraperField::DataDescription,
            ScraperField::DataDescription => ScraperField::Url,
        }
    }
}

pub struct ScraperState {
    pub url: String,
    pub data_description: String,
    pub active_field: ScraperField,
    pub input_mode: bool,
    pub output: CodeOutput,
    pub scroll: u16,
    pub flash_message: Option<FlashMessage>,
}

impl ScraperState {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            data_description: String::new(),
            active_field: ScraperField::Url,
            input_mode: false,
            output: CodeOutput::default(),
            scroll: 0,
            flash_message: None,
        }
    }

    fn field_mut(&mut self, field: ScraperField) -> &mut String {
        match field {
            ScraperField::Url => &mut self.url,
            ScraperField::DataDescription => &mut self.data_description,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.url.trim().is_empty() && !self.data_description.trim().is_empty()
    }

    pub fn show_flash(&mut self, msg: &str, is_error: bool) {
        self.flash_message = Some(FlashMessage::new(msg.to_string(), is_error));
    }

    /// Validate both fields, then generate. Ignored while generating.
    pub fn generate(&mut self, gateway: &Gateway) {
        if self.output.is_pending() {
            return;
        }
        if !self.is_valid() {
            self.output.fail(Key::ErrorScrapingPrompt);
            return;
        }

        let gateway = gateway.clone();
        let url = self.url.trim().to_string();
        let data_description = self.data_description.trim().to_string();
        tracing::debug!(url = %url, "generating scraper");
        self.scroll = 0;
        self.output.start(CodeLanguage::Python, move || {
            gateway.generate_scraping_code(&url, &data_description)
        });
    }

    pub fn poll(&mut self) {
        self.output.poll(Key::ErrorCodeGeneration);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent, gateway: &Gateway, locale: &LocaleStore) -> Result<()> {
        if self.input_mode {
            match key.code {
                KeyCode::Esc => self.input_mode = false,
                KeyCode::Tab | KeyCode::BackTab => self.active_field = self.active_field.next(),
                KeyCode::Enter => {
                    self.input_mode = false;
                    self.generate(gateway);
                }
                KeyCode::Backspace => {
                    self.field_mut(self.active_field).pop();
                }
                KeyCode::Char(c) => self.field_mut(self.active_field).push(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('i') | KeyCode::Enter => self.input_mode = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('j') | KeyCode::Char('k') => {
                self.active_field = self.active_field.next();
            }
            KeyCode::Char('g') => self.generate(gateway),
            KeyCode::Char('c') => {
                self.output.copy();
            }
            KeyCode::Char('w') => self.save(locale),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(5),
            _ => {}
        }
        Ok(())
    }

    fn save(&mut self, locale: &LocaleStore) {
        let stem = format!("scraper-{}", host_of(&self.url));
        match self.output.save(&stem) {
            Some(Ok(path)) => {
                let msg = format!("{} {}", locale.t(Key::SnippetSaved), path.display());
                self.show_flash(&msg, false);
            }
            Some(Err(e)) => {
                tracing::warn!(error = %format!("{:#}", e), "snippet save failed");
                let msg = format!("{}: {:#}", locale.t(Key::SnippetSaveFailed), e);
                self.show_flash(&msg, true);
            }
            None => self.show_flash(locale.t(Key::NoCodeYet), true),
        }
    }
}

/// Host part of a URL for file naming; falls back to the whole input.
fn host_of(url: &str) -> &str {
    let rest = url.trim().split("://").nth(1).unwrap_or(url.trim());
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

// ════════════════════════════════════════════════════════════════════
// RENDERING
// ════════════════════════════════════════════════════════════════════

pub fn render(frame: &mut Frame, state: &ScraperState, locale: &LocaleStore, theme: &Theme, area: Rect) {
    let align = widgets::chrome_alignment(locale);

    let layout = Layout::vertical([
        Constraint::Length(2), // Title + description
        Constraint::Length(3), // URL
        Constraint::Length(4), // Data description
        Constraint::Length(2), // Hints
        Constraint::Min(5),    // Output
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(locale.t(Key::WebScraperTitle), theme.title()),
            Line::styled(locale.t(Key::WebScraperDescription), theme.text_dim()),
        ])
        .alignment(align)
        .wrap(Wrap { trim: true }),
        layout[0],
    );

    widgets::render_text_input(
        frame,
        locale.t(Key::WebScraperUrlLabel),
        &state.url,
        locale.t(Key::WebScraperUrlPlaceholder),
        state.input_mode && state.active_field == ScraperField::Url,
        theme,
        layout[1],
    );
    widgets::render_text_input(
        frame,
        locale.t(Key::WebScraperDataLabel),
        &state.data_description,
        locale.t(Key::WebScraperDataPlaceholder),
        state.input_mode && state.active_field == ScraperField::DataDescription,
        theme,
        layout[2],
    );

    let mut hints = widgets::key_hint("g", locale.t(Key::GenerateScrapingCodeButton), theme);
    hints.extend(widgets::key_hint("Tab", locale.t(Key::StatusNextField), theme));
    hints.extend(widgets::key_hint("i", locale.t(Key::StatusEdit), theme));
    frame.render_widget(Paragraph::new(Line::from(hints)).alignment(align), layout[3]);

    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border());
    frame.render_widget(
        Paragraph::new(code_block::code_lines(&state.output, locale, theme))
            .block(block)
            .alignment(align)
            .scroll((state.scroll, 0)),
        layout[4],
    );

    if let Some(msg) = &state.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{gateway, wait_for, ScriptedModel};
    use crate::i18n::Locale;
    use crate::modules::code_block::CodeState;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_missing_field_fails_without_call() {
        let model = ScriptedModel::new(vec![]);
        let mut state = ScraperState::new();
        state.url = "https://example.com".into();
        state.data_description = "  ".into();

        state.generate(&gateway(&model));
        assert_eq!(state.output.error(), Some(Key::ErrorScrapingPrompt));
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_generates_python_and_overwrites() {
        let model = ScriptedModel::new(vec![Ok("import bs4".into()), Ok("import scrapy".into())]);
        let gw = gateway(&model);
        let mut state = ScraperState::new();
        state.url = "https://example.com/table".into();
        state.data_description = "the price table".into();

        state.generate(&gw);
        assert_eq!(state.output.state, CodeState::Generating);
        assert!(wait_for(|| {
            state.poll();
            !state.output.is_pending()
        }));
        assert_eq!(state.output.code(), Some(("import bs4", CodeLanguage::Python)));

        state.generate(&gw);
        assert!(wait_for(|| {
            state.poll();
            !state.output.is_pending()
        }));
        assert_eq!(state.output.code(), Some(("import scrapy", CodeLanguage::Python)));
        assert!(model.requests()[0].prompt.contains("https://example.com/table"));
        assert!(!model.requests()[0].web_search);
    }

    #[test]
    fn test_failure_uses_code_generation_key() {
        let model = ScriptedModel::new(vec![Err("HTTP 500".into())]);
        let mut state = ScraperState::new();
        state.url = "https://example.com".into();
        state.data_description = "rows".into();
        state.generate(&gateway(&model));
        assert!(wait_for(|| {
            state.poll();
            !state.output.is_pending()
        }));
        assert_eq!(state.output.error(), Some(Key::ErrorCodeGeneration));
    }

    #[test]
    fn test_form_typing_and_tab() {
        let model = ScriptedModel::new(vec![]);
        let gw = gateway(&model);
        let locale = LocaleStore::new(Locale::En);
        let mut state = ScraperState::new();

        state.handle_key(press(KeyCode::Char('i')), &gw, &locale).unwrap();
        state.handle_key(press(KeyCode::Char('u')), &gw, &locale).unwrap();
        state.handle_key(press(KeyCode::Tab), &gw, &locale).unwrap();
        state.handle_key(press(KeyCode::Char('d')), &gw, &locale).unwrap();

        assert_eq!(state.url, "u");
        assert_eq!(state.data_description, "d");
        assert!(state.input_mode);
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://data.gov.uk/dataset?x=1"), "data.gov.uk");
        assert_eq!(host_of("example.org/path"), "example.org");
    }
}
