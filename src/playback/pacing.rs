use crate::foundation::core::Fps;
use std::time::{Duration, Instant};

/// Whether ticks are spaced at the frame rate or emitted as fast as possible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// One tick per `1/fps` seconds of wall time.
    #[default]
    Realtime,
    /// No waiting between ticks (batch encoding, tests).
    Unpaced,
}

/// Deadline tracker turning [`Pacing`] into per-poll wait times.
#[derive(Debug)]
pub(crate) struct Pacer {
    pacing: Pacing,
    frame: Duration,
    deadline: Option<Instant>,
}

impl Pacer {
    pub(crate) fn new(fps: Fps, pacing: Pacing) -> Self {
        Self {
            pacing,
            frame: fps.frame_duration(),
            deadline: None,
        }
    }

    /// Time the input poll may block before the next tick is due.
    ///
    /// Deadlines advance by one frame from the previous deadline, so short polls do not drift.
    /// A late tick re-anchors at `now` instead of bursting to catch up.
    pub(crate) fn next_wait(&mut self) -> Duration {
        self.next_wait_at(Instant::now())
    }

    fn next_wait_at(&mut self, now: Instant) -> Duration {
        if self.pacing == Pacing::Unpaced {
            return Duration::ZERO;
        }
        let base = match self.deadline {
            Some(d) if d > now => d,
            _ => now,
        };
        let deadline = base + self.frame;
        self.deadline = Some(deadline);
        deadline.saturating_duration_since(now)
    }

    /// Forget the current deadline (after a pause).
    pub(crate) fn reset(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/pacing.rs"]
mod tests;
