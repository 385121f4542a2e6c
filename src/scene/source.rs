use crate::foundation::color::Rgb8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::FrameBuffer;
use anyhow::Context as _;
use std::path::PathBuf;

/// Anything that can draw one frame of the configured canvas size.
///
/// Generators run once, before playback starts, and share no state with the scheduler.
/// Closures `Fn(Canvas) -> ReelResult<FrameBuffer>` qualify.
pub trait SceneSource {
    /// Produce a frame exactly `canvas` in size.
    fn produce(&self, canvas: Canvas) -> ReelResult<FrameBuffer>;
}

impl<F> SceneSource for F
where
    F: Fn(Canvas) -> ReelResult<FrameBuffer>,
{
    fn produce(&self, canvas: Canvas) -> ReelResult<FrameBuffer> {
        self(canvas)
    }
}

/// A black frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blank;

impl SceneSource for Blank {
    fn produce(&self, canvas: Canvas) -> ReelResult<FrameBuffer> {
        Ok(FrameBuffer::new(canvas))
    }
}

/// A frame filled with one color.
#[derive(Clone, Copy, Debug)]
pub struct Solid(pub Rgb8);

impl SceneSource for Solid {
    fn produce(&self, canvas: Canvas) -> ReelResult<FrameBuffer> {
        Ok(FrameBuffer::filled(canvas, self.0))
    }
}

/// Where an image is placed on the black canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Centered on both axes.
    #[default]
    Center,
    /// Centered horizontally; top edge at a quarter of the free vertical space (title-card
    /// logo placement).
    UpperQuarter,
}

impl Anchor {
    /// Top-left offset for a `w x h` image on `canvas`. May be negative when the image is larger.
    pub fn offset(self, canvas: Canvas, w: u32, h: u32) -> (i64, i64) {
        let free_x = i64::from(canvas.width) - i64::from(w);
        let free_y = i64::from(canvas.height) - i64::from(h);
        match self {
            Self::Center => (free_x.div_euclid(2), free_y.div_euclid(2)),
            Self::UpperQuarter => (free_x.div_euclid(2), free_y.div_euclid(4)),
        }
    }
}

/// A decoded image file, optionally decimated, placed on a black canvas.
#[derive(Clone, Debug)]
pub struct ImageScene {
    path: PathBuf,
    downsample: u32,
    anchor: Anchor,
}

impl ImageScene {
    /// Use the image at `path` at full resolution, centered.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            downsample: 1,
            anchor: Anchor::Center,
        }
    }

    /// Keep every `factor`-th row and column before placement.
    pub fn downsample(mut self, factor: u32) -> Self {
        self.downsample = factor;
        self
    }

    /// Choose the placement anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

impl SceneSource for ImageScene {
    fn produce(&self, canvas: Canvas) -> ReelResult<FrameBuffer> {
        if self.downsample == 0 {
            return Err(ReelError::validation("image downsample factor must be > 0"));
        }
        let img = image::open(&self.path)
            .with_context(|| format!("decode image '{}'", self.path.display()))?
            .to_rgb8();
        let img = FrameBuffer::from_rgb_image(img).downsample(self.downsample)?;
        let (x, y) = self.anchor.offset(canvas, img.width(), img.height());
        tracing::debug!(
            path = %self.path.display(),
            width = img.width(),
            height = img.height(),
            x,
            y,
            "placing image scene"
        );
        Ok(FrameBuffer::new(canvas).place(&img, x, y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/source.rs"]
mod tests;
