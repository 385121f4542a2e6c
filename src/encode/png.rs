use crate::encode::sink::{SinkConfig, VideoSink};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::FrameBuffer;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Video sink writing one PNG per frame as `frame_000000.png`, `frame_000001.png`, …
///
/// Useful where no `ffmpeg` is installed; the directory can be turned into a video later.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: u64,
    last_idx: Option<FrameIndex>,
}

impl PngSequenceSink {
    /// Write frames into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: 0,
            last_idx: None,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written during the current or last session.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// File name used for frame `idx`.
    pub fn frame_file_name(idx: FrameIndex) -> String {
        format!("frame_{:06}.png", idx.0)
    }
}

impl VideoSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        cfg.fps.validate()?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frame directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written = 0;
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ReelError::sink("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::sink("png sink received out-of-order frame index"));
        }
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(ReelError::precondition(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }

        let path = self.dir.join(Self::frame_file_name(idx));
        frame
            .to_rgb_image()?
            .save(&path)
            .map_err(|e| ReelError::sink(format!("failed to write '{}': {e}", path.display())))?;
        self.last_idx = Some(idx);
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if self.cfg.take().is_none() {
            return Err(ReelError::sink("png sink not started"));
        }
        tracing::debug!(dir = %self.dir.display(), frames = self.written, "png sequence finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
