use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::FrameBuffer;

/// Configuration provided to a [`VideoSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Persistent, authoritative frame sink.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex` values,
/// starting at 0, between one `begin` and one `end`. `end` must leave every accepted frame
/// durably persisted; it is called on every exit path, including cancellation and errors.
pub trait VideoSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Append one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<()>;
    /// Flush and finalize the output.
    fn end(&mut self) -> ReelResult<()>;
}

/// Best-effort live preview. Failures are logged by the scheduler and never stop playback.
pub trait DisplaySink {
    /// Show one frame.
    fn show(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<()>;
    /// Tear the preview down.
    fn close(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Display sink that discards frames (headless sessions).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show(&mut self, _idx: FrameIndex, _frame: &FrameBuffer) -> ReelResult<()> {
        Ok(())
    }
}

/// In-memory video sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameBuffer)>,
    closed: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameBuffer)] {
        &self.frames
    }

    /// Return `true` once `end` has run after a `begin`.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl VideoSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.closed = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<()> {
        if self.cfg.is_none() || self.closed {
            return Err(ReelError::sink("in-memory sink is not open"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx.0 <= last.0
        {
            return Err(ReelError::sink("in-memory sink received out-of-order frame index"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::sink("in-memory sink not started"));
        }
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
