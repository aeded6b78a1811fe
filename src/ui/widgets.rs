//! Reusable UI widgets for datascout
//!
//! Popups, flash messages, status bar, spinner, text inputs
//! and the direction-aware alignment helper.

use crate::i18n::LocaleStore;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Alignment for interface chrome in the active text direction
pub fn chrome_alignment(locale: &LocaleStore) -> Alignment {
    if locale.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// `[k] label` pair, used in hint rows
pub fn key_hint<'a>(key: &str, label: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("[{}] ", key), theme.key_hint()),
        Span::styled(label, theme.text()),
        Span::raw("   "),
    ]
}

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)],
    theme: &Theme,
    area: Rect,
) {
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 8).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 2,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(5),
    };

    frame.render_widget(
        Paragraph::new(content)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        inner,
    );

    if !buttons.is_empty() {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height.saturating_sub(3),
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let spans: Vec<Span> = buttons
            .iter()
            .flat_map(|(label, key)| key_hint(&key.to_string(), label, theme))
            .collect();

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            button_area,
        );
    }
}

pub fn render_error_popup(frame: &mut Frame, title: &str, message: &str, theme: &Theme, area: Rect) {
    let content = vec![
        Line::raw(""),
        Line::styled(message, theme.error()),
        Line::raw(""),
    ];

    render_popup(frame, title, content, &[("OK", 'o')], theme, area);
}

/// Current braille spinner frame, advancing every 100 ms
pub fn spinner() -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100) as usize
        % FRAMES.len();
    FRAMES[idx]
}

/// Inline "⠋ message" line
pub fn loading_line<'a>(message: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(spinner(), theme.accent()),
        Span::raw(" "),
        Span::styled(message, theme.text()),
    ])
}

/// Render a flash message on the last row of `area`
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(message, style),
        ])),
        flash_area,
    );
}

/// Status bar: hints at the reading start, title at the reading end.
pub fn render_status_bar(
    frame: &mut Frame,
    hints: &str,
    title: &str,
    locale: &LocaleStore,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, status_area);

    let (start, end) = if locale.is_rtl() {
        (Alignment::Right, Alignment::Left)
    } else {
        (Alignment::Left, Alignment::Right)
    };

    frame.render_widget(
        Paragraph::new(hints)
            .style(theme.text_dim())
            .alignment(start),
        status_area,
    );

    let title_width = Line::from(title).width() as u16 + 1;
    let title_area = Rect {
        x: match end {
            Alignment::Left => status_area.x,
            _ => status_area.x + status_area.width.saturating_sub(title_width),
        },
        y: status_area.y,
        width: title_width.min(status_area.width),
        height: 1,
    };
    frame.render_widget(Paragraph::new(title).style(theme.title()), title_area);
}

/// Bordered single-value text input; shows the placeholder while empty
/// and places the terminal cursor when `focused`.
pub fn render_text_input(
    frame: &mut Frame,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(if focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused()
        } else {
            theme.border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = if value.is_empty() {
        Paragraph::new(placeholder).style(theme.text_dim())
    } else {
        Paragraph::new(value).style(theme.text())
    };
    frame.render_widget(text.wrap(Wrap { trim: false }), inner);

    if focused {
        if let Some(pos) = input_cursor(inner, Line::from(value).width()) {
            frame.set_cursor_position(pos);
        }
    }
}

/// Cursor after `len` columns of wrapped text, clamped to the last row.
fn input_cursor(inner: Rect, len: usize) -> Option<Position> {
    let width = inner.width as usize;
    let height = inner.height as usize;
    if width == 0 || height == 0 {
        return None;
    }
    let col = len % width;
    let row = (len / width).min(height - 1);
    Some(Position::new(
        inner.x.saturating_add(col as u16),
        inner.y.saturating_add(row as u16),
    ))
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}
