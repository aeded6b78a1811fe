//! Clipboard access through the terminal (OSC 52).

use crate::i18n::Key;
use base64::Engine;
use std::io::Write;
use std::time::{Duration, Instant};

/// How long "copied" / "copy failed" stays on the button
const FEEDBACK_SECS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

pub fn copy_with(out: &mut impl Write, text: &str) -> CopyOutcome {
    let written = out
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| out.flush());
    match written {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard write failed");
            CopyOutcome::Failed
        }
    }
}

/// Write directly to stdout, bypassing the ratatui buffer.
pub fn copy_to_clipboard(text: &str) -> CopyOutcome {
    copy_with(&mut std::io::stdout(), text)
}

/// Transient label state of a copy button
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    last: Option<(CopyOutcome, Instant)>,
}

impl CopyFeedback {
    pub fn record(&mut self, outcome: CopyOutcome) {
        self.last = Some((outcome, Instant::now()));
    }

    pub fn label(&self) -> Key {
        self.label_at(Instant::now())
    }

    fn label_at(&self, now: Instant) -> Key {
        match self.last {
            Some((outcome, at))
                if now.saturating_duration_since(at) < Duration::from_secs(FEEDBACK_SECS) =>
            {
                match outcome {
                    CopyOutcome::Copied => Key::Copied,
                    CopyOutcome::Failed => Key::CopyError,
                }
            }
            _ => Key::Copy,
        }
    }
}
