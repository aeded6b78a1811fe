//! Application state and event handling for datascout

use crate::config::Config;
use crate::gateway::Gateway;
use crate::i18n::{Key, LocaleStore};
use crate::modules::scraper::ScraperState;
use crate::modules::search::SearchState;
use crate::types::FlashMessage;
use crate::ui::{ModuleTab, Theme};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

/// Selectable rows on the settings page (theme, language, model)
const SETTINGS_COUNT: usize = 3;
const SETTINGS_MODEL: usize = 2;

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub active_tab: ModuleTab,
    pub config: Config,
    /// Where settings are persisted; `None` keeps them in memory only
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    pub locale: LocaleStore,
    pub gateway: Gateway,
    pub settings_selected: usize,
    pub settings_editing: bool,
    pub settings_edit_buffer: String,
    pub popup: PopupState,
    pub flash_message: Option<FlashMessage>,

    // Module states
    pub search: SearchState,
    pub scraper: ScraperState,
}

#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Error { title: String, message: String },
}

impl App {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        locale: LocaleStore,
        gateway: Gateway,
        piped_input: Option<String>,
    ) -> Self {
        let theme = Theme::from_name(config.theme);

        // Piped description: prefill and search right away
        let search = match piped_input {
            Some(input) => {
                let mut search = SearchState::with_input(input);
                search.search(&gateway);
                search
            }
            None => SearchState::new(),
        };

        Self {
            should_quit: false,
            active_tab: ModuleTab::Search,
            config,
            config_path,
            theme,
            locale,
            gateway,
            settings_selected: 0,
            settings_editing: false,
            settings_edit_buffer: String::new(),
            popup: PopupState::None,
            flash_message: None,
            search,
            scraper: ScraperState::new(),
        }
    }

    /// True while a text field owns the keyboard
    pub fn is_capturing_input(&self) -> bool {
        self.settings_editing
            || match self.active_tab {
                ModuleTab::Search => self.search.is_capturing_input(),
                ModuleTab::Scraper => self.scraper.input_mode,
                _ => false,
            }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        expire_flash(&mut self.flash_message);

        // App-level popup handling
        if let PopupState::Error { .. } = &self.popup {
            if matches!(key.code, KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc) {
                self.popup = PopupState::None;
            }
            return Ok(());
        }

        // Settings text editing mode captures ALL keys
        if self.settings_editing {
            self.handle_settings_edit_key(key);
            return Ok(());
        }

        if self.try_module_key(key)? {
            return Ok(());
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.active_tab = ModuleTab::Search,
            KeyCode::Char('2') => self.active_tab = ModuleTab::Scraper,
            KeyCode::Char(',') => self.active_tab = ModuleTab::Settings,
            KeyCode::Char('?') => self.active_tab = ModuleTab::HelpAbout,
            KeyCode::Char('L') => self.toggle_language(),
            _ => {
                if self.active_tab == ModuleTab::Settings {
                    self.handle_settings_key(key);
                }
            }
        }

        Ok(())
    }

    /// Route to the active module. Returns true if the key was consumed.
    fn try_module_key(&mut self, key: KeyEvent) -> Result<bool> {
        let capturing = self.is_capturing_input();

        // Tab-switch keys, quit and language stay global unless typing
        let global = matches!(
            key.code,
            KeyCode::Char('1')
                | KeyCode::Char('2')
                | KeyCode::Char(',')
                | KeyCode::Char('?')
                | KeyCode::Char('q')
                | KeyCode::Char('L')
        );
        if global && !capturing {
            return Ok(false);
        }

        match self.active_tab {
            ModuleTab::Search => {
                self.search.handle_key(key, &self.gateway, &self.locale)?;
                Ok(true)
            }
            ModuleTab::Scraper => {
                self.scraper.handle_key(key, &self.gateway, &self.locale)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Poll background calls and expire flash messages (every tick)
    pub fn update_timers(&mut self) {
        self.search.poll();
        self.scraper.poll();

        expire_flash(&mut self.flash_message);
        expire_flash(&mut self.search.flash_message);
        expire_flash(&mut self.scraper.flash_message);
    }

    pub fn toggle_language(&mut self) {
        self.locale.toggle();
        self.config.language = self.locale.locale();
        self.save_config();
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < SETTINGS_COUNT - 1 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => match self.settings_selected {
                0 => {
                    self.config.theme = self.config.theme.next();
                    self.theme = Theme::from_name(self.config.theme);
                    self.save_config();
                }
                1 => self.toggle_language(),
                SETTINGS_MODEL => {
                    self.settings_editing = true;
                    self.settings_edit_buffer = self.config.model.clone();
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Handle key events while editing a settings text field.
    fn handle_settings_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.settings_editing = false;
                self.settings_edit_buffer.clear();
            }
            KeyCode::Enter => {
                let value = self.settings_edit_buffer.trim().to_string();
                if self.settings_selected == SETTINGS_MODEL && !value.is_empty() {
                    tracing::info!(model = %value, "model changed");
                    self.gateway = self.gateway.with_model_name(&value);
                    self.config.model = value;
                }
                self.settings_editing = false;
                self.settings_edit_buffer.clear();
                self.save_config();
            }
            KeyCode::Backspace => {
                self.settings_edit_buffer.pop();
            }
            KeyCode::Char(c) => self.settings_edit_buffer.push(c),
            _ => {}
        }
    }

    fn save_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        match self.config.save_to(path) {
            Ok(()) => {
                self.flash_message = Some(FlashMessage::new(
                    self.locale.t(Key::SettingsSaved).into(),
                    false,
                ));
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "config save failed");
                self.popup = PopupState::Error {
                    title: self.locale.t(Key::SaveFailed).into(),
                    message: format!("{:#}", e),
                };
            }
        }
    }
}

/// Expire a flash message after 3 seconds
fn expire_flash(msg: &mut Option<FlashMessage>) {
    if let Some(m) = msg {
        if m.is_expired(3) {
            *msg = None;
        }
    }
}
