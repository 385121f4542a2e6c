use crate::foundation::error::{ReelError, ReelResult};
use std::time::Duration;

/// Upper bound on any frame count derived from a duration.
///
/// Keeps doubled fade lengths and summed timeline budgets inside `u64`.
pub const MAX_FRAMES: u64 = u64::MAX / 4;

/// Absolute 0-based frame index in session output order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Whole-number FPS shorthand (`Fps::new(n, 1)`).
    pub fn integer(num: u32) -> ReelResult<Self> {
        Self::new(num, 1)
    }

    /// Check that both terms are positive.
    ///
    /// `Fps` is a plain data type (it deserializes from manifests), so playback re-checks it.
    pub fn validate(self) -> ReelResult<()> {
        if self.den == 0 {
            return Err(ReelError::precondition("fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(ReelError::precondition("fps num must be > 0"));
        }
        Ok(())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of one frame as a [`Duration`], truncated to whole nanoseconds.
    pub fn frame_duration(self) -> Duration {
        Duration::from_nanos(u64::from(self.den) * 1_000_000_000 / u64::from(self.num.max(1)))
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to frame count using round-half-away-from-zero semantics.
    ///
    /// Fails when the result would exceed [`MAX_FRAMES`] or `secs` is not finite.
    pub fn secs_to_frames_round(self, secs: f64) -> ReelResult<u64> {
        frames_within_bound((secs * self.as_f64()).round(), secs)
    }
}

/// Convert a non-negative frame count computed in `f64` to `u64`, rejecting values above
/// [`MAX_FRAMES`].
pub(crate) fn frames_within_bound(frames: f64, secs: f64) -> ReelResult<u64> {
    if !frames.is_finite() || frames > MAX_FRAMES as f64 {
        return Err(ReelError::precondition(format!(
            "duration of {secs} seconds is too long to schedule"
        )));
    }
    Ok(frames.max(0.0) as u64)
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check that both dimensions are non-zero.
    pub fn validate(self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::precondition("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Number of bytes in one RGB8 frame of this size.
    pub fn rgb8_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 3
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
