use crate::foundation::error::{ReelError, ReelResult};
use std::collections::VecDeque;
use std::time::Duration;

/// A key code read from an input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Escape.
    Esc,
    /// Enter / return.
    Enter,
    /// Ctrl+C delivered as a key (raw terminals do not raise SIGINT).
    Interrupt,
    /// Anything else.
    Other,
}

/// Which characters pause and quit playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyMap {
    /// Pause until the next key.
    #[serde(default = "default_pause")]
    pub pause: char,
    /// Stop playback and finalize the output.
    #[serde(default = "default_quit")]
    pub quit: char,
}

fn default_pause() -> char {
    ' '
}

fn default_quit() -> char {
    'q'
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            pause: default_pause(),
            quit: default_quit(),
        }
    }
}

impl KeyMap {
    /// Pause and quit must be distinct.
    pub fn validate(self) -> ReelResult<()> {
        if self.pause == self.quit {
            return Err(ReelError::validation(format!(
                "pause and quit keys must differ (both are {:?})",
                self.pause
            )));
        }
        Ok(())
    }

    /// Short human-readable legend, e.g. `[space] pause  [q] quit`.
    pub fn legend(self) -> String {
        fn name(c: char) -> String {
            match c {
                ' ' => "space".to_owned(),
                c => c.to_string(),
            }
        }
        format!("[{}] pause  [{}] quit", name(self.pause), name(self.quit))
    }
}

/// What the scheduler does after a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
    /// Emit the next tick.
    Continue,
    /// Block until another key arrives.
    Pause,
    /// Stop emitting and finalize the sinks.
    Terminate,
}

/// Maps polled keys to [`GateAction`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputGate {
    keys: KeyMap,
}

impl InputGate {
    /// Gate using `keys`.
    pub fn new(keys: KeyMap) -> Self {
        Self { keys }
    }

    /// Interpret one poll result. No key and unrecognized keys continue.
    pub fn interpret(&self, key: Option<Key>) -> GateAction {
        match key {
            Some(Key::Interrupt) => GateAction::Terminate,
            Some(Key::Char(c)) if c == self.keys.quit => GateAction::Terminate,
            Some(Key::Char(c)) if c == self.keys.pause => GateAction::Pause,
            _ => GateAction::Continue,
        }
    }
}

/// A source of key presses.
pub trait InputSource {
    /// Wait up to `wait` for a key. Returns at most one key.
    ///
    /// The scheduler passes the time left until the next tick, so this call also paces playback.
    fn poll(&mut self, wait: Duration) -> ReelResult<Option<Key>>;

    /// Block until a key arrives.
    fn wait_key(&mut self) -> ReelResult<Key>;
}

/// Input source that never produces keys; `poll` only sleeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, wait: Duration) -> ReelResult<Option<Key>> {
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> ReelResult<Key> {
        Ok(Key::Other)
    }
}

/// Input source replaying a fixed key script.
///
/// A key registered with [`ScriptedInput::after_frames`]`(k, key)` is returned by the poll that
/// follows the `k`-th emitted frame (or the first poll after that). While paused, `wait_key` takes
/// the next scripted key regardless of its frame.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, Key)>,
    polls: u64,
}

impl ScriptedInput {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `key` after `frames` frames have been emitted.
    pub fn after_frames(mut self, frames: u64, key: Key) -> Self {
        let at = self.script.partition_point(|&(f, _)| f <= frames);
        self.script.insert(at, (frames, key));
        self
    }

    /// Keys not yet delivered.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, wait: Duration) -> ReelResult<Option<Key>> {
        self.polls += 1;
        match self.script.front() {
            Some(&(frames, key)) if frames <= self.polls => {
                self.script.pop_front();
                Ok(Some(key))
            }
            _ => {
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
                Ok(None)
            }
        }
    }

    fn wait_key(&mut self) -> ReelResult<Key> {
        self.script
            .pop_front()
            .map(|(_, key)| key)
            .ok_or_else(|| ReelError::input("key script exhausted while paused"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/input.rs"]
mod tests;
