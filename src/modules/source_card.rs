//! Result card: one suggested data source with three independent
//! sub-flows (access code, details, follow-up questions).

use crate::gateway::Gateway;
use crate::i18n::{Key, LocaleStore};
use crate::modules::code_block::{self, CodeOutput};
use crate::task::{self, Task};
use crate::types::{CodeLanguage, DataSource, DataSourceDetails, FollowUpExchange};
use crate::ui::widgets;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct SourceCard {
    pub source: DataSource,
    /// Description of the search that produced this card
    pub project_description: String,

    // Code
    pub language: CodeLanguage,
    pub code: CodeOutput,

    // Details
    pub details_open: bool,
    pub details: Option<DataSourceDetails>,
    pub details_error: Option<Key>,
    details_task: Option<Task<DataSourceDetails>>,

    // Follow-up
    pub question: String,
    pub history: Vec<FollowUpExchange>,
    pub follow_up_error: Option<Key>,
    asked: Option<String>,
    follow_up_task: Option<Task<String>>,

    pub scroll: u16,
}

impl SourceCard {
    pub fn new(source: DataSource, project_description: &str) -> Self {
        Self {
            source,
            project_description: project_description.to_string(),
            language: CodeLanguage::default(),
            code: CodeOutput::default(),
            details_open: false,
            details: None,
            details_error: None,
            details_task: None,
            question: String::new(),
            history: Vec::new(),
            follow_up_error: None,
            asked: None,
            follow_up_task: None,
            scroll: 0,
        }
    }

    // ── Code ──

    /// Local selection only; generated code is kept.
    pub fn set_language(&mut self, language: CodeLanguage) {
        self.language = language;
    }

    pub fn generate_code(&mut self, gateway: &Gateway) {
        let gateway = gateway.clone();
        let source = self.source.clone();
        let description = self.project_description.clone();
        let language = self.language;
        let started = self.code.start(language, move || {
            gateway.generate_code(&source, &description, language.as_str())
        });
        if started {
            tracing::debug!(source = %self.source.name, language = language.as_str(), "generating code");
        }
    }

    // ── Details ──

    pub fn is_loading_details(&self) -> bool {
        self.details_open && self.details.is_none() && self.details_task.is_some()
    }

    /// Collapse, or expand and fetch details once.
    pub fn toggle_details(&mut self, gateway: &Gateway) {
        if self.details_open {
            self.details_open = false;
            return;
        }

        self.details_open = true;
        self.details_error = None;
        if self.details.is_none() && self.details_task.is_none() {
            tracing::debug!(source = %self.source.name, "fetching details");
            let gateway = gateway.clone();
            let source = self.source.clone();
            self.details_task = Some(Task::spawn(move || gateway.get_details(&source)));
        }
    }

    // ── Follow-up ──

    pub fn can_ask(&self) -> bool {
        self.details_open && self.details.is_some()
    }

    pub fn is_asking(&self) -> bool {
        self.follow_up_task.is_some()
    }

    /// Send the current question. Blank input is ignored without feedback.
    pub fn ask(&mut self, gateway: &Gateway) {
        if !self.can_ask() || self.is_asking() || self.question.trim().is_empty() {
            return;
        }

        self.follow_up_error = None;
        let question = self.question.clone();
        let gateway = gateway.clone();
        let source = self.source.clone();
        self.asked = Some(question.clone());
        self.follow_up_task = Some(Task::spawn(move || {
            gateway.answer_follow_up(&source, &question)
        }));
    }

    // ── Polling ──

    /// Apply finished background calls. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.code.poll(Key::ErrorCodeGeneration);

        if let Some(result) = task::poll_slot(&mut self.details_task) {
            changed = true;
            match result {
                Ok(details) => self.details = Some(details),
                Err(e) => {
                    tracing::warn!(source = %self.source.name, error = %e, "details failed");
                    self.details_open = false;
                    self.details_error = Some(Key::ErrorDetails);
                }
            }
        }

        if let Some(result) = task::poll_slot(&mut self.follow_up_task) {
            changed = true;
            let question = self.asked.take().unwrap_or_default();
            match result {
                Ok(answer) => {
                    self.history.push(FollowUpExchange { question, answer });
                    self.question.clear();
                }
                Err(e) => {
                    tracing::warn!(source = %self.source.name, error = %e, "follow-up failed");
                    self.follow_up_error = Some(Key::ErrorFollowUp);
                }
            }
        }

        changed
    }
}

// ════════════════════════════════════════════════════════════════════
// RENDERING
// ════════════════════════════════════════════════════════════════════

pub fn render(
    frame: &mut Frame,
    card: &SourceCard,
    editing_question: bool,
    locale: &LocaleStore,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", card.source.name))
        .title_style(theme.title())
        .title_alignment(widgets::chrome_alignment(locale))
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let lines = card_lines(card, editing_question, locale, theme);

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(widgets::chrome_alignment(locale))
            .wrap(Wrap { trim: false })
            .scroll((card.scroll, 0)),
        area,
    );
}

fn section<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::styled(format!("── {} ──", title), theme.title())
}

fn card_lines<'a>(
    card: &'a SourceCard,
    editing_question: bool,
    locale: &LocaleStore,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::styled(card.source.description.as_str(), theme.text()),
        Line::raw(""),
        Line::from(vec![
            Span::styled(locale.t(Key::AccessMethod), theme.text_dim()),
            Span::raw(" "),
            Span::styled(card.source.access_method.as_str(), theme.accent()),
        ]),
        Line::raw(""),
    ];

    // Details
    let toggle = if card.details_open {
        Key::HideDetailsButton
    } else {
        Key::GetDetailsButton
    };
    lines.push(Line::from(widgets::key_hint("d", locale.t(toggle), theme)));
    if let Some(key) = card.details_error {
        lines.push(Line::styled(locale.t(key), theme.error()));
    }
    if card.is_loading_details() {
        lines.push(widgets::loading_line(locale.t(Key::LoadingDetails), theme));
    } else if card.details_open {
        if let Some(details) = &card.details {
            lines.extend(details_lines(card, details, editing_question, locale, theme));
        }
    }
    lines.push(Line::raw(""));

    // Code
    lines.push(section(locale.t(Key::GenerateCodeButton), theme));
    let mut chooser = vec![
        Span::styled(locale.t(Key::ProgrammingLanguage), theme.text_dim()),
        Span::raw(" "),
    ];
    for lang in CodeLanguage::all() {
        let style = if *lang == card.language {
            theme.selected()
        } else {
            theme.text_dim()
        };
        chooser.push(Span::styled(format!(" {} ", lang.as_str()), style));
    }
    lines.push(Line::from(chooser));
    lines.push(Line::from(widgets::key_hint(
        "g",
        locale.t(Key::GenerateCodeButton),
        theme,
    )));
    lines.extend(code_block::code_lines(&card.code, locale, theme));

    lines
}

fn details_lines<'a>(
    card: &'a SourceCard,
    details: &'a DataSourceDetails,
    editing_question: bool,
    locale: &LocaleStore,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let row = |key: Key, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", locale.t(key)), theme.text_dim()),
            Span::styled(value, theme.text()),
        ])
    };

    let mut lines = vec![
        row(Key::DataFormatsLabel, details.data_formats.join(", ")),
        row(Key::UpdateFrequencyLabel, details.update_frequency.clone()),
        row(Key::UsageRestrictionsLabel, details.usage_restrictions.clone()),
    ];
    if let Some(url) = &details.documentation_url {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", locale.t(Key::DocumentationLabel)), theme.text_dim()),
            Span::styled(url.as_str(), theme.accent()),
        ])
        .alignment(Alignment::Left));
    }

    lines.push(Line::raw(""));
    lines.push(section(locale.t(Key::FollowUpPrompt), theme));
    for exchange in &card.history {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", locale.t(Key::QuestionPrefix)), theme.key_hint()),
            Span::styled(exchange.question.as_str(), theme.text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", locale.t(Key::AnswerPrefix)), theme.success()),
            Span::styled(exchange.answer.as_str(), theme.text()),
        ]));
    }

    let input = if card.question.is_empty() && !editing_question {
        Span::styled(locale.t(Key::FollowUpPlaceholder), theme.text_dim())
    } else if editing_question {
        Span::styled(format!("{}▏", card.question), theme.text())
    } else {
        Span::styled(card.question.as_str(), theme.text())
    };
    lines.push(Line::from(vec![Span::styled("> ", theme.accent()), input]));

    if card.is_asking() {
        lines.push(widgets::loading_line(locale.t(Key::Asking), theme));
    } else {
        lines.push(Line::from(widgets::key_hint("f", locale.t(Key::AskButton), theme)));
    }
    if let Some(key) = card.follow_up_error {
        lines.push(Line::styled(locale.t(key), theme.error()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{gateway, wait_for, ScriptedModel};

    const DETAILS: &str =
        r#"{"dataFormats":["CSV"],"updateFrequency":"Daily","usageRestrictions":"Public domain"}"#;

    fn card() -> SourceCard {
        SourceCard::new(
            DataSource {
                name: "NOAA GHCN".into(),
                description: "Daily climate records".into(),
                access_method: "FTP Server".into(),
            },
            "climate trends",
        )
    }

    fn settle(card: &mut SourceCard) {
        assert!(wait_for(|| {
            card.poll();
            card.details_task.is_none() && card.follow_up_task.is_none() && !card.code.is_pending()
        }));
    }

    #[test]
    fn test_new_card_is_collapsed_without_code() {
        let card = card();
        assert!(!card.details_open);
        assert!(card.code.code().is_none());
        assert_eq!(card.language, CodeLanguage::Python);
    }

    #[test]
    fn test_details_fetched_once_across_toggles() {
        let model = ScriptedModel::new(vec![Ok(DETAILS.into())]);
        let gw = gateway(&model);
        let mut card = card();

        card.toggle_details(&gw);
        assert!(card.is_loading_details());
        settle(&mut card);
        assert!(card.details.is_some());

        card.toggle_details(&gw); // collapse
        card.toggle_details(&gw); // expand again
        assert!(card.details_open);
        assert!(!card.is_loading_details());
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_reexpand_while_pending_does_not_refetch() {
        let (model, gate) = ScriptedModel::gated(vec![Ok(DETAILS.into())]);
        let gw = gateway(&model);
        let mut card = card();

        card.toggle_details(&gw);
        card.toggle_details(&gw);
        card.toggle_details(&gw);
        gate.send(()).unwrap();
        settle(&mut card);

        assert_eq!(model.calls(), 1);
        assert!(card.details_open);
        assert!(card.details.is_some());
    }

    #[test]
    fn test_details_arriving_after_collapse_are_kept() {
        let (model, gate) = ScriptedModel::gated(vec![Ok(DETAILS.into())]);
        let gw = gateway(&model);
        let mut card = card();

        card.toggle_details(&gw);
        card.toggle_details(&gw); // collapse before the reply
        gate.send(()).unwrap();
        settle(&mut card);
        assert!(!card.details_open);
        assert!(card.details.is_some());

        card.toggle_details(&gw);
        assert!(card.details_open);
        assert!(!card.is_loading_details());
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_blank_code_reply_is_a_failure() {
        let model = ScriptedModel::new(vec![Ok("  \n ".into())]);
        let mut card = card();

        card.generate_code(&gateway(&model));
        settle(&mut card);
        assert!(card.code.code().is_none());
        assert_eq!(card.code.error(), Some(Key::ErrorCodeGeneration));
    }

    #[test]
    fn test_details_failure_collapses_and_records_error() {
        let model = ScriptedModel::new(vec![Ok("not json".into()), Ok(DETAILS.into())]);
        let gw = gateway(&model);
        let mut card = card();

        card.toggle_details(&gw);
        settle(&mut card);
        assert!(!card.details_open);
        assert_eq!(card.details_error, Some(Key::ErrorDetails));

        // Retry clears the error and fetches again
        card.toggle_details(&gw);
        assert!(card.details_error.is_none());
        settle(&mut card);
        assert!(card.details.is_some());
        assert_eq!(model.calls(), 2);
    }

    #[test]
    fn test_follow_up_history_in_order() {
        let model = ScriptedModel::new(vec![
            Ok(DETAILS.into()),
            Ok(r#"{"answer":"A1"}"#.into()),
            Ok(r#"{"answer":"A2"}"#.into()),
        ]);
        let gw = gateway(&model);
        let mut card = card();
        card.toggle_details(&gw);
        settle(&mut card);

        card.question = "Q1".into();
        card.ask(&gw);
        settle(&mut card);
        assert!(card.question.is_empty());

        card.question = "Q2".into();
        card.ask(&gw);
        settle(&mut card);

        let asked: Vec<(&str, &str)> = card
            .history
            .iter()
            .map(|e| (e.question.as_str(), e.answer.as_str()))
            .collect();
        assert_eq!(asked, vec![("Q1", "A1"), ("Q2", "A2")]);

        // History survives collapse/expand
        card.toggle_details(&gw);
        card.toggle_details(&gw);
        assert_eq!(card.history.len(), 2);
    }

    #[test]
    fn test_blank_question_is_ignored() {
        let model = ScriptedModel::new(vec![Ok(DETAILS.into())]);
        let gw = gateway(&model);
        let mut card = card();
        card.toggle_details(&gw);
        settle(&mut card);

        card.question = "   ".into();
        card.ask(&gw);
        assert!(!card.is_asking());
        assert!(card.follow_up_error.is_none());
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_follow_up_requires_loaded_details() {
        let model = ScriptedModel::new(vec![]);
        let mut card = card();
        card.question = "Anything?".into();
        card.ask(&gateway(&model));
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_follow_up_failure_keeps_input() {
        let model = ScriptedModel::new(vec![Ok(DETAILS.into()), Err("HTTP 429".into())]);
        let gw = gateway(&model);
        let mut card = card();
        card.toggle_details(&gw);
        settle(&mut card);

        card.question = "Is there an API?".into();
        card.ask(&gw);
        settle(&mut card);
        assert_eq!(card.follow_up_error, Some(Key::ErrorFollowUp));
        assert_eq!(card.question, "Is there an API?");
        assert!(card.history.is_empty());
    }

    #[test]
    fn test_language_change_never_calls_gateway() {
        let model = ScriptedModel::new(vec![Ok("import requests".into())]);
        let gw = gateway(&model);
        let mut card = card();

        card.set_language(CodeLanguage::R);
        card.set_language(CodeLanguage::Python);
        assert_eq!(model.calls(), 0);

        card.generate_code(&gw);
        settle(&mut card);
        assert!(model.requests()[0].prompt.contains("runnable Python code"));
        assert_eq!(card.code.code(), Some(("import requests", CodeLanguage::Python)));

        // Switching again keeps the generated code
        card.set_language(CodeLanguage::JavaScript);
        assert!(card.code.code().is_some());
    }

    #[test]
    fn test_sub_flow_errors_are_independent() {
        let model = ScriptedModel::new(vec![Err("down".into()), Ok(DETAILS.into())]);
        let gw = gateway(&model);
        let mut card = card();

        card.generate_code(&gw);
        settle(&mut card);
        assert_eq!(card.code.error(), Some(Key::ErrorCodeGeneration));

        card.toggle_details(&gw);
        settle(&mut card);
        assert!(card.details.is_some());
        assert!(card.details_error.is_none());
        assert_eq!(card.code.error(), Some(Key::ErrorCodeGeneration));
    }
}
