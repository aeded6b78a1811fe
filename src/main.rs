//! datascout - AI Data Scout
//!
//! Describe a project, get suggested datasets:
//! - Web-search grounded data source discovery
//! - Per-source details and follow-up questions
//! - Access code in Python, JavaScript or R
//! - Web scraper code generation
//!
//! Usage: datascout [--help] [--version]
//! Pipe:  echo "predict solar flares from satellite images" | datascout

mod app;
mod clipboard;
mod config;
mod gateway;
mod i18n;
mod logging;
mod modules;
mod task;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use gateway::gemini::GeminiClient;
use gateway::Gateway;
use i18n::{Key, Locale, LocaleStore};
use ratatui::prelude::*;
use std::io::{self, stdout, IsTerminal, Read};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("datascout {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Fail before the terminal is touched
    let api_key = match config::api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Check for piped input BEFORE starting TUI
    let piped_input = read_piped_input();

    // If stdin was a pipe, reattach to /dev/tty so crossterm can read key events
    if piped_input.is_some() {
        reattach_stdin_to_tty()
            .context("Failed to reattach stdin to terminal. Are you running in a TTY?")?;
    }

    if let Err(e) = run_app(&api_key, piped_input) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Read all of stdin if it's a pipe (not a terminal).
/// Returns None if stdin is a terminal (normal interactive mode).
fn read_piped_input() -> Option<String> {
    if io::stdin().is_terminal() {
        return None;
    }

    const MAX_PIPE_SIZE: u64 = 1024 * 1024;

    let mut input = String::new();
    if io::stdin().take(MAX_PIPE_SIZE).read_to_string(&mut input).is_err() {
        return None;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.to_string())
}

/// Reopen /dev/tty as fd 0 so crossterm can read keyboard events
/// after stdin was consumed as a pipe.
#[cfg(unix)]
fn reattach_stdin_to_tty() -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let tty = std::fs::File::open("/dev/tty")
        .context("Cannot open /dev/tty: pipe mode requires a controlling terminal")?;

    let result = unsafe { libc::dup2(tty.as_raw_fd(), libc::STDIN_FILENO) };
    if result == -1 {
        anyhow::bail!("dup2 failed: could not reattach stdin to /dev/tty");
    }

    // fd 0 keeps its own copy
    drop(tty);

    Ok(())
}

#[cfg(not(unix))]
fn reattach_stdin_to_tty() -> Result<()> {
    anyhow::bail!("Pipe mode is only supported on Unix systems (Linux, macOS)")
}

fn print_help() {
    println!(
        r#"datascout - AI Data Scout

Find datasets for your project with a web-search grounded AI assistant.

USAGE:
    datascout [OPTIONS]
    echo "predict solar flares" | datascout     # search right away

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

ENVIRONMENT:
    API_KEY          Gemini API key (required)
    DATASCOUT_LOG    Log filter, e.g. datascout=debug

KEYBINDINGS:
    1, 2             Search / Scraper
    ,  ?             Settings / Help
    i                Edit description
    Enter            Search (while editing) / toggle details
    r                Search again
    j/k              Select data source
    d                Show / hide details
    h/l              Code language
    g                Generate code
    f                Ask a follow-up question
    c / w            Copy / save code
    L                Toggle English / Persian
    q                Quit

CONFIG:
    ~/.config/datascout/config.toml
"#
    );
}

fn run_app(api_key: &str, piped_input: Option<String>) -> Result<()> {
    let config_path = config::Config::path().ok();
    let config = config::Config::load().context("Failed to load configuration")?;

    if let Some(path) = logging::init(&config.log_level) {
        tracing::debug!("log file: {:?}", path);
    }

    let client = GeminiClient::new(&config.api_base, api_key, config.timeout());
    let gateway = Gateway::new(Arc::new(client), &config.model);

    // Terminal title follows the interface language
    let mut locale = LocaleStore::new(config.language);
    locale.subscribe(set_terminal_title);

    let mut app = App::new(config, config_path, locale, gateway, piped_input);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    set_terminal_title(app.locale.locale());

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Restore the terminal on panic (raw mode + alternate screen)
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
        original_hook(info);
    }));

    tracing::info!(
        model = %app.config.model,
        locale = app.locale.locale().tag(),
        direction = app.locale.direction().as_str(),
        "started"
    );
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn set_terminal_title(locale: Locale) {
    let _ = execute!(std::io::stdout(), SetTitle(i18n::translate(locale, Key::AppTitle)));
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll background calls + expire flash messages
        app.update_timers();

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
