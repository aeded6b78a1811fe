//! Localization for datascout
//!
//! One `LocaleStore` lives for the whole session, owned by the `App`
//! and handed by reference to every render function. Strings are looked
//! up by symbolic `Key`; a key missing from the active table falls back
//! to the English string.

mod en;
mod fa;

use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Fa,
}

impl Locale {
    /// BCP-47 style tag
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }

    /// Name of the language in that language
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fa => "فارسی",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Locale::En => Locale::Fa,
            Locale::Fa => Locale::En,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Locale::En => Direction::Ltr,
            Locale::Fa => Direction::Rtl,
        }
    }
}

/// Text direction of the interface chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Symbolic display-string keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // App chrome
    AppTitle,
    AppDescription,
    ToggleLanguage,
    TabSearch,
    TabScraper,
    TabSettings,
    TabHelp,

    // Search
    ProjectDescriptionLabel,
    ProjectDescriptionPlaceholder,
    SearchingButton,
    FindDataSourcesButton,
    SuggestedDataSources,
    NoSourcesFound,
    ErrorPrompt,
    ErrorAi,

    // Result card
    AccessMethod,
    GetDetailsButton,
    HideDetailsButton,
    LoadingDetails,
    DataFormatsLabel,
    UpdateFrequencyLabel,
    UsageRestrictionsLabel,
    DocumentationLabel,
    FollowUpPrompt,
    FollowUpPlaceholder,
    AskButton,
    Asking,
    QuestionPrefix,
    AnswerPrefix,
    ProgrammingLanguage,
    GenerateCodeButton,
    GeneratingCodeButton,
    ErrorCodeGeneration,
    ErrorDetails,
    ErrorFollowUp,

    // Code block
    Copy,
    Copied,
    CopyError,
    SaveSnippet,
    SnippetSaved,
    SnippetSaveFailed,
    NoCodeYet,

    // Scraper
    WebScraperTitle,
    WebScraperDescription,
    WebScraperUrlLabel,
    WebScraperUrlPlaceholder,
    WebScraperDataLabel,
    WebScraperDataPlaceholder,
    GenerateScrapingCodeButton,
    ErrorScrapingPrompt,

    // Settings
    SettingsTheme,
    SettingsLanguage,
    SettingsModel,
    SettingsTimeout,
    SettingsSaved,
    SaveFailed,
    SettingsConfigPath,
    SettingsEditingHint,

    // Status bar
    StatusNavigate,
    StatusQuit,
    StatusEdit,
    StatusConfirm,
    StatusBack,
    StatusScroll,
    StatusSwitchTab,
    StatusChange,
    StatusNextField,

    // Help
    HelpKeysTitle,
    HelpAboutTitle,
    HelpAbout,
    HelpEditDescription,
    HelpRunSearch,
    HelpSelectSource,
    HelpToggleDetails,
    HelpCycleLanguage,
    HelpGenerateCode,
    HelpAskFollowUp,
    HelpCopyCode,
    HelpSaveCode,
    HelpScrollCard,
    HelpToggleUiLanguage,
    HelpQuit,
}

/// Look up `key` for `locale`, falling back to English.
pub fn translate(locale: Locale, key: Key) -> &'static str {
    match locale {
        Locale::En => en::text(key),
        Locale::Fa => fa::lookup(key).unwrap_or_else(|| en::text(key)),
    }
}

type Listener = Box<dyn FnMut(Locale)>;

/// Process-wide locale state, threaded explicitly through the UI.
pub struct LocaleStore {
    locale: Locale,
    listeners: Vec<Listener>,
}

impl LocaleStore {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            listeners: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn direction(&self) -> Direction {
        self.locale.direction()
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == Direction::Rtl
    }

    /// Display string for `key` in the active language
    pub fn t(&self, key: Key) -> &'static str {
        translate(self.locale, key)
    }

    /// Register a callback run after every locale change.
    pub fn subscribe(&mut self, listener: impl FnMut(Locale) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Switch language; subscribers are only notified on an actual change.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale == self.locale {
            return;
        }
        self.locale = locale;
        tracing::debug!(locale = locale.tag(), "locale changed");
        for listener in self.listeners.iter_mut() {
            listener(locale);
        }
    }

    pub fn toggle(&mut self) {
        self.set_locale(self.locale.next());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_locale_cycle_and_direction() {
        assert_eq!(Locale::En.next(), Locale::Fa);
        assert_eq!(Locale::Fa.next(), Locale::En);
        assert_eq!(Locale::En.direction().as_str(), "ltr");
        assert_eq!(Locale::Fa.direction().as_str(), "rtl");
    }

    #[test]
    fn test_translate_uses_active_table() {
        assert_eq!(translate(Locale::En, Key::AppTitle), "AI Data Scout");
        assert_eq!(translate(Locale::Fa, Key::AppTitle), "هوشمند کاشف داده");
    }

    #[test]
    fn test_missing_persian_key_falls_back_to_english() {
        assert!(fa::lookup(Key::SettingsModel).is_none());
        assert_eq!(translate(Locale::Fa, Key::SettingsModel), en::text(Key::SettingsModel));
    }

    #[test]
    fn test_subscribers_notified_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = LocaleStore::new(Locale::En);
        let sink = Rc::clone(&seen);
        store.subscribe(move |l| sink.borrow_mut().push(l));

        store.set_locale(Locale::En);
        store.toggle();
        store.toggle();

        assert_eq!(*seen.borrow(), vec![Locale::Fa, Locale::En]);
        assert!(!store.is_rtl());
    }

    #[test]
    fn test_default_locale_is_persian() {
        assert_eq!(Locale::default(), Locale::Fa);
    }
}
