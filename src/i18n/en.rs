//! English strings (fallback table, must cover every key)

use super::Key;

pub(super) fn text(key: Key) -> &'static str {
    match key {
        Key::AppTitle => "AI Data Scout",
        Key::AppDescription => "Describe your project and let AI find the data you need.",
        Key::ToggleLanguage => "فارسی",
        Key::TabSearch => "Find Data",
        Key::TabScraper => "Web Scraper",
        Key::TabSettings => "Settings",
        Key::TabHelp => "Help",

        Key::ProjectDescriptionLabel => "Describe your project",
        Key::ProjectDescriptionPlaceholder => {
            "e.g. I want to build a model that predicts solar flares from satellite imagery"
        }
        Key::SearchingButton => "Searching...",
        Key::FindDataSourcesButton => "Find Data Sources",
        Key::SuggestedDataSources => "Suggested Data Sources",
        Key::NoSourcesFound => "The AI did not suggest any data sources. Try a more specific description.",
        Key::ErrorPrompt => "Please describe your project first.",
        Key::ErrorAi => "The AI could not find data sources right now. Please try again.",

        Key::AccessMethod => "Access method:",
        Key::GetDetailsButton => "Details",
        Key::HideDetailsButton => "Hide details",
        Key::LoadingDetails => "Looking up details...",
        Key::DataFormatsLabel => "Data formats",
        Key::UpdateFrequencyLabel => "Update frequency",
        Key::UsageRestrictionsLabel => "Usage restrictions",
        Key::DocumentationLabel => "Documentation",
        Key::FollowUpPrompt => "Ask a follow-up question about this source",
        Key::FollowUpPlaceholder => "e.g. Does it include historical data?",
        Key::AskButton => "Ask",
        Key::Asking => "Asking...",
        Key::QuestionPrefix => "Q",
        Key::AnswerPrefix => "A",
        Key::ProgrammingLanguage => "Language",
        Key::GenerateCodeButton => "Generate Code",
        Key::GeneratingCodeButton => "Generating...",
        Key::ErrorCodeGeneration => "Code generation failed. Please try again.",
        Key::ErrorDetails => "Could not load details for this source.",
        Key::ErrorFollowUp => "Could not answer your question. Please try again.",

        Key::Copy => "Copy",
        Key::Copied => "Copied!",
        Key::CopyError => "Copy failed",
        Key::SaveSnippet => "Save",
        Key::SnippetSaved => "Snippet saved to",
        Key::SnippetSaveFailed => "Could not save snippet",
        Key::NoCodeYet => "No code generated yet",

        Key::WebScraperTitle => "Web Scraper Code Generator",
        Key::WebScraperDescription => {
            "Give a page URL and describe the data you want; AI writes the extraction code."
        }
        Key::WebScraperUrlLabel => "Page URL",
        Key::WebScraperUrlPlaceholder => "https://example.com/data-table",
        Key::WebScraperDataLabel => "Data to extract",
        Key::WebScraperDataPlaceholder => "e.g. the table of daily temperatures with date and city",
        Key::GenerateScrapingCodeButton => "Generate Scraping Code",
        Key::ErrorScrapingPrompt => "Please enter both a URL and a description of the data.",

        Key::SettingsTheme => "Theme",
        Key::SettingsLanguage => "Language",
        Key::SettingsModel => "Model",
        Key::SettingsTimeout => "Request timeout",
        Key::SettingsSaved => "Settings saved",
        Key::SaveFailed => "Saving failed",
        Key::SettingsConfigPath => "Config file",
        Key::SettingsEditingHint => "Type to edit · [Enter] save · [Esc] cancel",

        Key::StatusNavigate => "Navigate",
        Key::StatusQuit => "[q] Quit",
        Key::StatusEdit => "Edit",
        Key::StatusConfirm => "Confirm",
        Key::StatusBack => "Back",
        Key::StatusScroll => "Scroll",
        Key::StatusSwitchTab => "[1-2] Switch tab",
        Key::StatusChange => "[Enter] Change",
        Key::StatusNextField => "Next field",

        Key::HelpKeysTitle => "Keybindings",
        Key::HelpAboutTitle => "About",
        Key::HelpAbout => {
            "datascout asks a generative AI with web search for datasets that fit your project, \
             then helps you inspect them and write the code to fetch them."
        }
        Key::HelpEditDescription => "Edit the project description",
        Key::HelpRunSearch => "Search for data sources",
        Key::HelpSelectSource => "Select a data source",
        Key::HelpToggleDetails => "Show / hide details",
        Key::HelpCycleLanguage => "Cycle code language",
        Key::HelpGenerateCode => "Generate access code",
        Key::HelpAskFollowUp => "Ask a follow-up question",
        Key::HelpCopyCode => "Copy code to clipboard",
        Key::HelpSaveCode => "Save code to a file",
        Key::HelpScrollCard => "Scroll the card",
        Key::HelpToggleUiLanguage => "Switch interface language",
        Key::HelpQuit => "Quit",
    }
}
