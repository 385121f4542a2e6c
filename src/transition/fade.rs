use crate::foundation::core::{Fps, frames_within_bound};
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::FrameBuffer;
use std::iter::FusedIterator;

// Absorbs float noise such as 0.6 * 10 / 2 = 3.0000000000000004 before the ceiling.
const CEIL_EPSILON: f64 = 1e-9;

/// Frames allotted to each fade phase: `ceil(secs * fps / 2)`, at least 1.
///
/// Durations whose phase would exceed [`MAX_FRAMES`](crate::foundation::core::MAX_FRAMES) are
/// rejected.
pub fn fade_phase_frames(secs: f64, fps: Fps) -> ReelResult<u64> {
    fps.validate()?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(ReelError::precondition(format!(
            "fade duration must be finite and >= 0 (got {secs})"
        )));
    }
    let half = secs * fps.as_f64() / 2.0;
    Ok(frames_within_bound((half - CEIL_EPSILON).ceil(), secs)?.max(1))
}

/// Lazy fade-through-black between two frames.
///
/// The sequence has `2 * phase_frames` items:
///
/// - fade-out, `f in 0..n`: `from * (1 - f/n)`
/// - fade-in, `f in 0..n`: `to * (f/n)`
///
/// No frame mixes both inputs. Each item is freshly allocated; the inputs are only borrowed.
/// Cloning or calling [`FadeThroughBlack::restart`] replays the identical sequence.
#[derive(Clone, Debug)]
pub struct FadeThroughBlack<'a> {
    from: &'a FrameBuffer,
    to: &'a FrameBuffer,
    phase_frames: u64,
    cursor: u64,
}

impl<'a> FadeThroughBlack<'a> {
    /// Plan a fade of `secs` seconds at `fps`.
    ///
    /// Fails before producing anything if the frames differ in size or the timing is invalid.
    pub fn new(from: &'a FrameBuffer, to: &'a FrameBuffer, secs: f64, fps: Fps) -> ReelResult<Self> {
        if !from.same_dims(to) {
            return Err(ReelError::precondition(format!(
                "cannot fade between {}x{} and {}x{} frames",
                from.width(),
                from.height(),
                to.width(),
                to.height()
            )));
        }
        let phase_frames = fade_phase_frames(secs, fps)?;
        Ok(Self {
            from,
            to,
            phase_frames,
            cursor: 0,
        })
    }

    /// Frames in each phase.
    pub fn phase_frames(&self) -> u64 {
        self.phase_frames
    }

    /// Frames in the whole sequence.
    pub fn total_frames(&self) -> u64 {
        2 * self.phase_frames
    }

    /// Rewind to the first fade-out frame.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Render item `i` of the sequence without moving the cursor.
    pub fn frame_at(&self, i: u64) -> Option<FrameBuffer> {
        let n = self.phase_frames;
        if i < n {
            Some(self.from.scaled(1.0 - progress(i, n)))
        } else if i < 2 * n {
            Some(self.to.scaled(progress(i - n, n)))
        } else {
            None
        }
    }
}

fn progress(f: u64, n: u64) -> f64 {
    f as f64 / n as f64
}

impl Iterator for FadeThroughBlack<'_> {
    type Item = FrameBuffer;

    fn next(&mut self) -> Option<FrameBuffer> {
        let frame = self.frame_at(self.cursor)?;
        self.cursor += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_frames().saturating_sub(self.cursor) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FadeThroughBlack<'_> {}

impl FusedIterator for FadeThroughBlack<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/transition/fade.rs"]
mod tests;
