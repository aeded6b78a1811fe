//! Main rendering module for datascout
//!
//! Renders the complete UI:
//! - Vertical sidebar with the tabs (reading-start side)
//! - Active module content area
//! - Global status bar (bottom)
//! - Popup overlays + flash messages

use crate::app::{App, PopupState};
use crate::i18n::{Key, LocaleStore};
use crate::modules::{scraper, search};
use crate::ui::widgets;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Tab definition with index for keybinding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleTab {
    Search,
    Scraper,
    Settings,
    HelpAbout,
}

impl ModuleTab {
    pub fn label(&self, locale: &LocaleStore) -> &'static str {
        locale.t(match self {
            ModuleTab::Search => Key::TabSearch,
            ModuleTab::Scraper => Key::TabScraper,
            ModuleTab::Settings => Key::TabSettings,
            ModuleTab::HelpAbout => Key::TabHelp,
        })
    }

    /// Keybind hint shown in sidebar
    pub fn key_hint(&self) -> &'static str {
        match self {
            ModuleTab::Search => "1",
            ModuleTab::Scraper => "2",
            ModuleTab::Settings => ",",
            ModuleTab::HelpAbout => "?",
        }
    }
}

const SIDEBAR_MODULES: &[ModuleTab] = &[ModuleTab::Search, ModuleTab::Scraper];

/// Bottom items (below separator)
const SIDEBAR_BOTTOM: &[ModuleTab] = &[ModuleTab::Settings, ModuleTab::HelpAbout];

const SIDEBAR_WIDTH: u16 = 24;

/// Main render function – entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    // Fill entire background
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let vertical = Layout::vertical([
        Constraint::Min(8),    // sidebar + content
        Constraint::Length(1), // status bar
    ])
    .split(area);

    // Sidebar on the reading-start side
    let (sidebar_area, content_area) = if app.locale.is_rtl() {
        let h = Layout::horizontal([Constraint::Min(30), Constraint::Length(SIDEBAR_WIDTH)])
            .split(vertical[0]);
        (h[1], h[0])
    } else {
        let h = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
            .split(vertical[0]);
        (h[0], h[1])
    };

    render_sidebar(frame, app, sidebar_area);
    render_module_content(frame, app, content_area);
    render_status_bar(frame, app, vertical[1]);

    render_popups(frame, app, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let locale = &app.locale;

    let sidebar_block = Block::default()
        .style(theme.block_style())
        .borders(if locale.is_rtl() { Borders::LEFT } else { Borders::RIGHT })
        .border_style(theme.border());
    let inner = sidebar_block.inner(area);
    frame.render_widget(sidebar_block, area);

    let mut lines: Vec<Line> = vec![
        Line::styled(format!(" {}", locale.t(Key::AppTitle)), theme.title()),
        Line::styled(format!(" v{}", env!("CARGO_PKG_VERSION")), theme.text_dim()),
        Line::raw(""),
    ];

    for &module in SIDEBAR_MODULES {
        lines.push(sidebar_item(app, module, theme));
    }

    lines.push(Line::raw(""));
    let sep_width = inner.width.saturating_sub(2) as usize;
    lines.push(Line::styled(
        format!(" {}", "─".repeat(sep_width.min(20))),
        theme.border(),
    ));

    for &module in SIDEBAR_BOTTOM {
        lines.push(sidebar_item(app, module, theme));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(" [L] ", theme.key_hint()),
        Span::styled(locale.t(Key::ToggleLanguage), theme.text()),
    ]));

    frame.render_widget(
        Paragraph::new(lines)
            .style(theme.block_style())
            .alignment(widgets::chrome_alignment(locale)),
        inner,
    );
}

fn sidebar_item(app: &App, module: ModuleTab, theme: &Theme) -> Line<'static> {
    let label = module.label(&app.locale);
    if app.active_tab == module {
        Line::from(vec![
            Span::styled(" ▸ ", theme.accent()),
            Span::styled(module.key_hint(), theme.accent()),
            Span::styled(format!(" {} ", label), theme.tab_active()),
        ])
    } else {
        Line::from(vec![
            Span::raw("   "),
            Span::styled(module.key_hint(), theme.text_dim()),
            Span::styled(format!(" {} ", label), theme.tab_inactive()),
        ])
    }
}

fn render_module_content(frame: &mut Frame, app: &App, area: Rect) {
    let inner = Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    };
    match app.active_tab {
        ModuleTab::Search => search::render(frame, &app.search, &app.locale, &app.theme, inner),
        ModuleTab::Scraper => scraper::render(frame, &app.scraper, &app.locale, &app.theme, inner),
        ModuleTab::Settings => render_settings(frame, app, inner),
        ModuleTab::HelpAbout => render_help_about(frame, app, inner),
    }
}

fn render_help_about(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let locale = &app.locale;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", locale.t(Key::TabHelp)))
        .title_style(theme.title())
        .title_alignment(widgets::chrome_alignment(locale))
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let mut content: Vec<Line> = vec![
        Line::styled(locale.t(Key::AppTitle), theme.title()),
        Line::raw(""),
        Line::styled(format!("── {} ──", locale.t(Key::HelpAboutTitle)), theme.accent()),
        Line::styled(locale.t(Key::HelpAbout), theme.text()),
        Line::raw(""),
        Line::styled(format!("── {} ──", locale.t(Key::HelpKeysTitle)), theme.accent()),
    ];

    let keys: [(&str, Key); 13] = [
        ("i", Key::HelpEditDescription),
        ("Enter/r", Key::HelpRunSearch),
        ("j/k", Key::HelpSelectSource),
        ("Enter/d", Key::HelpToggleDetails),
        ("h/l", Key::HelpCycleLanguage),
        ("g", Key::HelpGenerateCode),
        ("f", Key::HelpAskFollowUp),
        ("c", Key::HelpCopyCode),
        ("w", Key::HelpSaveCode),
        ("PgUp/PgDn", Key::HelpScrollCard),
        ("L", Key::HelpToggleUiLanguage),
        ("q", Key::HelpQuit),
        ("Tab", Key::StatusNextField),
    ];
    for (key, text) in keys {
        content.push(Line::from(vec![
            Span::styled(format!("[{}] ", key), theme.key_hint()),
            Span::styled(locale.t(text), theme.text()),
        ]));
    }

    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .alignment(widgets::chrome_alignment(locale))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let locale = &app.locale;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", locale.t(Key::TabSettings)))
        .title_style(theme.title())
        .title_alignment(widgets::chrome_alignment(locale))
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let editing_model = app.settings_editing;
    let settings: Vec<(&str, String, bool)> = vec![
        (locale.t(Key::SettingsTheme), app.config.theme.as_str().to_string(), false),
        (locale.t(Key::SettingsLanguage), locale.locale().as_str().to_string(), false),
        (
            locale.t(Key::SettingsModel),
            if editing_model {
                format!("{}_", app.settings_edit_buffer)
            } else {
                app.config.model.clone()
            },
            editing_model,
        ),
    ];

    let mut items: Vec<ListItem> = settings
        .into_iter()
        .enumerate()
        .map(|(i, (label, value, editing))| {
            let style = if i == app.settings_selected {
                theme.selected()
            } else {
                theme.text()
            };
            let value_style = if editing { theme.success() } else { theme.accent() };
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {:<24}", label), style),
                Span::styled(format!("[{}]", value), value_style),
            ]))
        })
        .collect();

    // Read-only: baked into the HTTP agent at startup
    items.push(ListItem::new(Line::from(vec![
        Span::styled(format!("  {:<24}", locale.t(Key::SettingsTimeout)), theme.text_dim()),
        Span::styled(format!("{} s", app.config.timeout_secs), theme.text_dim()),
    ])));

    if app.settings_editing {
        items.push(ListItem::new(Line::raw("")));
        items.push(ListItem::new(Line::styled(
            format!("  {}", locale.t(Key::SettingsEditingHint)),
            theme.text_dim(),
        )));
    }

    frame.render_widget(List::new(items), inner);

    let config_path = app
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".into());
    let path_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(2),
        width: inner.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(format!("{}: {}", locale.t(Key::SettingsConfigPath), config_path))
            .style(theme.text_dim()),
        path_area,
    );
}

/// Context-sensitive keybinding hints
fn status_hints(app: &App) -> String {
    let t = |key| app.locale.t(key);

    if app.settings_editing || app.is_capturing_input() {
        return match app.active_tab {
            ModuleTab::Scraper => format!(
                "[Tab] {}  [Enter] {}  [Esc] {}",
                t(Key::StatusNextField),
                t(Key::StatusConfirm),
                t(Key::StatusBack)
            ),
            _ => format!("[Enter] {}  [Esc] {}", t(Key::StatusConfirm), t(Key::StatusBack)),
        };
    }

    match app.active_tab {
        ModuleTab::Search if !app.search.cards.is_empty() => format!(
            "[j/k] {}  [d] {}  [g] {}  [PgUp/PgDn] {}  {}",
            t(Key::StatusNavigate),
            t(Key::GetDetailsButton),
            t(Key::GenerateCodeButton),
            t(Key::StatusScroll),
            t(Key::StatusQuit)
        ),
        ModuleTab::Search | ModuleTab::Scraper => format!(
            "[i] {}  {}  {}",
            t(Key::StatusEdit),
            t(Key::StatusSwitchTab),
            t(Key::StatusQuit)
        ),
        ModuleTab::Settings => format!(
            "[j/k] {}  {}  {}",
            t(Key::StatusNavigate),
            t(Key::StatusChange),
            t(Key::StatusQuit)
        ),
        ModuleTab::HelpAbout => format!("{}  {}", t(Key::StatusSwitchTab), t(Key::StatusQuit)),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    widgets::render_status_bar(
        frame,
        &status_hints(app),
        app.gateway.model_name(),
        &app.locale,
        &app.theme,
        area,
    );
}

/// Render popup overlays
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    if let PopupState::Error { title, message } = &app.popup {
        widgets::render_error_popup(frame, title, message, &app.theme, area);
    }

    if let Some(msg) = &app.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, &app.theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::testing::{gateway, ScriptedModel};
    use crate::i18n::Locale;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_every_tab_renders() {
        let model = ScriptedModel::new(vec![]);
        let mut app = App::new(
            Config::default(),
            None,
            LocaleStore::new(Locale::En),
            gateway(&model),
            None,
        );
        for tab in [
            ModuleTab::Search,
            ModuleTab::Scraper,
            ModuleTab::Settings,
            ModuleTab::HelpAbout,
        ] {
            app.active_tab = tab;
            let screen = draw(&app);
            assert!(screen.contains("AI Data Scout"));
        }
    }

    #[test]
    fn test_help_lists_search_again_key() {
        let model = ScriptedModel::new(vec![]);
        let mut app = App::new(
            Config::default(),
            None,
            LocaleStore::new(Locale::En),
            gateway(&model),
            None,
        );
        app.active_tab = ModuleTab::HelpAbout;
        assert!(draw(&app).contains("[Enter/r] Search for data sources"));
    }

    #[test]
    fn test_status_hints_follow_locale() {
        let model = ScriptedModel::new(vec![]);
        let mut app = App::new(
            Config::default(),
            None,
            LocaleStore::new(Locale::En),
            gateway(&model),
            None,
        );
        app.active_tab = ModuleTab::HelpAbout;
        let en = status_hints(&app);
        app.locale.toggle();
        assert_ne!(en, status_hints(&app));
    }
}
