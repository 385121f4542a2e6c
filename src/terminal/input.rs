use crate::foundation::error::{ReelError, ReelResult};
use crate::playback::input::{InputSource, Key};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Keyboard input from the controlling terminal.
///
/// Raw mode is enabled for the lifetime of the value so single key presses arrive without Enter.
/// Ctrl+C is delivered as [`Key::Interrupt`] because raw mode suppresses SIGINT.
#[derive(Debug)]
pub struct TerminalInput {
    raw: bool,
}

impl TerminalInput {
    /// Switch the terminal to raw mode.
    pub fn new() -> ReelResult<Self> {
        crossterm::terminal::enable_raw_mode()
            .map_err(|e| ReelError::input(format!("failed to enable raw mode: {e}")))?;
        Ok(Self { raw: true })
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.raw {
            let _ = crossterm::terminal::disable_raw_mode();
            self.raw = false;
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, wait: Duration) -> ReelResult<Option<Key>> {
        let deadline = Instant::now() + wait;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left).map_err(io_err)? {
                return Ok(None);
            }
            if let Event::Key(ev) = event::read().map_err(io_err)?
                && let Some(key) = map_key(ev)
            {
                return Ok(Some(key));
            }
            if left.is_zero() {
                return Ok(None);
            }
        }
    }

    fn wait_key(&mut self) -> ReelResult<Key> {
        loop {
            if let Event::Key(ev) = event::read().map_err(io_err)?
                && let Some(key) = map_key(ev)
            {
                return Ok(key);
            }
        }
    }
}

fn io_err(e: std::io::Error) -> ReelError {
    ReelError::input(format!("terminal read failed: {e}"))
}

/// Translate a crossterm key event; releases and repeats are ignored.
pub(crate) fn map_key(ev: KeyEvent) -> Option<Key> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    Some(match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Esc,
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/terminal/input.rs"]
mod tests;
