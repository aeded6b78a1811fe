//! Search flow: project description in, suggested data sources out.
//!
//! Holds the result cards and routes keys to the selected one.

use crate::gateway::Gateway;
use crate::i18n::{Key, LocaleStore};
use crate::modules::source_card::{self, SourceCard};
use crate::task::{self, Task};
use crate::types::{DataSource, FlashMessage};
use crate::ui::widgets;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Results,
    Failed(Key),
}

/// Which text field currently captures typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    None,
    Description,
    FollowUp,
}

pub struct SearchState {
    pub input: String,
    pub input_mode: InputMode,
    pub phase: SearchPhase,
    pub cards: Vec<SourceCard>,
    pub selected: usize,
    /// Trimmed description of the search in flight or last completed
    pub project_description: String,
    task: Option<Task<Vec<DataSource>>>,
    pub flash_message: Option<FlashMessage>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            input_mode: InputMode::Description,
            phase: SearchPhase::Idle,
            cards: Vec::new(),
            selected: 0,
            project_description: String::new(),
            task: None,
            flash_message: None,
        }
    }

    /// Prefilled description (pipe mode)
    pub fn with_input(input: String) -> Self {
        Self {
            input,
            input_mode: InputMode::None,
            ..Self::new()
        }
    }

    pub fn is_capturing_input(&self) -> bool {
        self.input_mode != InputMode::None
    }

    pub fn is_searching(&self) -> bool {
        self.task.is_some()
    }

    pub fn selected_card(&self) -> Option<&SourceCard> {
        self.cards.get(self.selected)
    }

    fn selected_card_mut(&mut self) -> Option<&mut SourceCard> {
        self.cards.get_mut(self.selected)
    }

    pub fn show_flash(&mut self, msg: &str, is_error: bool) {
        self.flash_message = Some(FlashMessage::new(msg.to_string(), is_error));
    }

    /// Start a search for the current input. Ignored while searching.
    pub fn search(&mut self, gateway: &Gateway) {
        if self.is_searching() {
            return;
        }

        self.cards.clear();
        self.selected = 0;

        let description = self.input.trim().to_string();
        if description.is_empty() {
            self.phase = SearchPhase::Failed(Key::ErrorPrompt);
            return;
        }

        tracing::debug!(description = %description, "searching");
        self.phase = SearchPhase::Searching;
        self.project_description = description.clone();
        let gateway = gateway.clone();
        self.task = Some(Task::spawn(move || gateway.find_sources(&description)));
    }

    /// Apply finished calls (search and every card's sub-flows).
    pub fn poll(&mut self) {
        if let Some(result) = task::poll_slot(&mut self.task) {
            match result {
                Ok(sources) => {
                    tracing::debug!(count = sources.len(), "search finished");
                    self.cards = sources
                        .into_iter()
                        .map(|s| SourceCard::new(s, &self.project_description))
                        .collect();
                    self.selected = 0;
                    self.phase = SearchPhase::Results;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "search failed");
                    self.cards.clear();
                    self.phase = SearchPhase::Failed(Key::ErrorAi);
                }
            }
        }

        for card in self.cards.iter_mut() {
            card.poll();
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent, gateway: &Gateway, locale: &LocaleStore) -> Result<()> {
        match self.input_mode {
            InputMode::Description => self.handle_description_key(key, gateway),
            InputMode::FollowUp => self.handle_follow_up_key(key, gateway),
            InputMode::None => self.handle_browse_key(key, gateway, locale),
        }
        Ok(())
    }

    fn handle_description_key(&mut self, key: KeyEvent, gateway: &Gateway) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::None,
            KeyCode::Enter => {
                if !self.is_searching() {
                    self.input_mode = InputMode::None;
                    self.search(gateway);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_follow_up_key(&mut self, key: KeyEvent, gateway: &Gateway) {
        if key.code == KeyCode::Esc || self.selected_card().is_none() {
            self.input_mode = InputMode::None;
            return;
        }
        let Some(card) = self.selected_card_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => card.ask(gateway),
            // Input is locked while the question is in flight
            KeyCode::Backspace if !card.is_asking() => {
                card.question.pop();
            }
            KeyCode::Char(c) if !card.is_asking() => card.question.push(c),
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent, gateway: &Gateway, locale: &LocaleStore) {
        match key.code {
            KeyCode::Char('i') | KeyCode::Char('/') => self.input_mode = InputMode::Description,
            KeyCode::Char('r') => self.search(gateway),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.cards.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::PageDown => {
                if let Some(card) = self.selected_card_mut() {
                    card.scroll = card.scroll.saturating_add(5);
                }
            }
            KeyCode::PageUp => {
                if let Some(card) = self.selected_card_mut() {
                    card.scroll = card.scroll.saturating_sub(5);
                }
            }
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some(card) = self.selected_card_mut() {
                    card.toggle_details(gateway);
                }
            }
            KeyCode::Char('g') => {
                if let Some(card) = self.selected_card_mut() {
                    card.generate_code(gateway);
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if let Some(card) = self.selected_card_mut() {
                    card.set_language(card.language.next());
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                if let Some(card) = self.selected_card_mut() {
                    card.set_language(card.language.prev());
                }
            }
            KeyCode::Char('f') => {
                if self.selected_card().is_some_and(|c| c.can_ask()) {
                    self.input_mode = InputMode::FollowUp;
                }
            }
            KeyCode::Char('c') => {
                let outcome = self.selected_card_mut().and_then(|c| c.code.copy());
                if let Some(outcome) = outcome {
                    tracing::debug!(?outcome, "copy");
                }
            }
            KeyCode::Char('w') => self.save_selected(locale),
            _ => {}
        }
    }

    fn save_selected(&mut self, locale: &LocaleStore) {
        let Some(card) = self.selected_card() else {
            return;
        };
        match card.code.save(&card.source.name) {
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

// ════════════════════════════════════════════════════════════════════
// RENDERING
// ════════════════════════════════════════════════════════════════════

pub fn render(frame: &mut Frame, state: &SearchState, locale: &LocaleStore, theme: &Theme, area: Rect) {
    let align = widgets::chrome_alignment(locale);

    let layout = Layout::vertical([
        Constraint::Length(2), // Title + description
        Constraint::Length(4), // Input
        Constraint::Length(2), // Action hints / status
        Constraint::Min(6),    // Results
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(locale.t(Key::AppTitle), theme.title()),
            Line::styled(locale.t(Key::AppDescription), theme.text_dim()),
        ])
        .alignment(align),
        layout[0],
    );

    widgets::render_text_input(
        frame,
        locale.t(Key::ProjectDescriptionLabel),
        &state.input,
        locale.t(Key::ProjectDescriptionPlaceholder),
        state.input_mode == InputMode::Description,
        theme,
        layout[1],
    );

    let status = match state.phase {
        SearchPhase::Searching => widgets::loading_line(locale.t(Key::SearchingButton), theme),
        SearchPhase::Failed(key) => Line::styled(locale.t(key), theme.error()),
        _ => {
            let mut spans = widgets::key_hint(
                search_key(state.input_mode),
                locale.t(Key::FindDataSourcesButton),
                theme,
            );
            spans.extend(widgets::key_hint("i", locale.t(Key::StatusEdit), theme));
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(status).alignment(align), layout[2]);

    render_results(frame, state, locale, theme, layout[3]);

    if let Some(msg) = &state.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, theme, area);
    }
}

/// Key that runs the search from the current input mode
fn search_key(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Description => "Enter",
        _ => "r",
    }
}

fn render_results(frame: &mut Frame, state: &SearchState, locale: &LocaleStore, theme: &Theme, area: Rect) {
    if state.phase != SearchPhase::Results {
        return;
    }

    if state.cards.is_empty() {
        frame.render_widget(
            Paragraph::new(locale.t(Key::NoSourcesFound))
                .style(theme.text_dim())
                .alignment(widgets::chrome_alignment(locale))
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    // The list sits on the reading-start side
    let (list_area, card_area) = if locale.is_rtl() {
        let columns = Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)]).split(area);
        (columns[1], columns[0])
    } else {
        let columns = Layout::horizontal([Constraint::Percentage(32), Constraint::Percentage(68)]).split(area);
        (columns[0], columns[1])
    };

    let items: Vec<ListItem> = state
        .cards
        .iter()
        .map(|card| ListItem::new(Line::styled(card.source.name.as_str(), theme.text())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .style(theme.block_style())
                .title(format!(" {} ({}) ", locale.t(Key::SuggestedDataSources), state.cards.len()))
                .title_style(theme.title())
                .title_alignment(widgets::chrome_alignment(locale))
                .borders(Borders::ALL)
                .border_style(theme.border()),
        )
        .highlight_style(theme.selected())
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    if let Some(card) = state.selected_card() {
        source_card::render(
            frame,
            card,
            state.input_mode == InputMode::FollowUp,
            locale,
            theme,
            card_area,
        );
    }
}
