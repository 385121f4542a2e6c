use crate::foundation::color::Rgb8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// A fixed-size RGB8 raster.
///
/// Pixels are stored row-major, 3 bytes per pixel, tightly packed. The length invariant
/// `data.len() == width * height * 3` is enforced by every constructor.
///
/// Operations that derive a new image (`scaled`, `downsample`, `place`) never touch `self`;
/// they return freshly allocated buffers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl FrameBuffer {
    /// A black frame of `canvas` size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.rgb8_len()],
        }
    }

    /// A frame of `canvas` size filled with one color.
    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let mut data = Vec::with_capacity(canvas.rgb8_len());
        for _ in 0..(canvas.width as usize) * (canvas.height as usize) {
            data.extend_from_slice(&color.to_array());
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Wrap raw RGB8 bytes, checking the length against `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        let expected = (width as usize) * (height as usize) * 3;
        if data.len() != expected {
            return Err(ReelError::precondition(format!(
                "frame data length {} does not match {width}x{height}x3 = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an `image` RGB buffer.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` RGB buffer (for PNG output).
    pub fn to_rgb_image(&self) -> ReelResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ReelError::precondition("frame buffer length invariant broken"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the raw RGB8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, returning its raw RGB8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        Some(Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Return `true` when both frames have identical dimensions.
    pub fn same_dims(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with [`ReelError::Precondition`] unless this frame matches `canvas`.
    pub fn ensure_canvas(&self, canvas: Canvas, what: &str) -> ReelResult<()> {
        if self.canvas() != canvas {
            return Err(ReelError::precondition(format!(
                "{what} is {}x{}, expected {}x{}",
                self.width, self.height, canvas.width, canvas.height
            )));
        }
        Ok(())
    }

    /// Every channel multiplied by `factor`, converted back with a truncating cast.
    ///
    /// Truncation (not rounding) is part of the fade contract: `(c as f64 * factor) as u8`.
    pub fn scaled(&self, factor: f64) -> FrameBuffer {
        let data = self
            .data
            .iter()
            .map(|&c| (f64::from(c) * factor) as u8)
            .collect();
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Keep every `factor`-th row and column, starting at (0, 0).
    ///
    /// The result is `ceil(width / factor) x ceil(height / factor)`.
    pub fn downsample(&self, factor: u32) -> ReelResult<FrameBuffer> {
        if factor == 0 {
            return Err(ReelError::validation("downsample factor must be > 0"));
        }
        if factor == 1 {
            return Ok(self.clone());
        }

        let width = self.width.div_ceil(factor);
        let height = self.height.div_ceil(factor);
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
        let stride = (self.width as usize) * 3;
        for y in (0..self.height).step_by(factor as usize) {
            let row = &self.data[(y as usize) * stride..(y as usize + 1) * stride];
            for px in row.chunks_exact(3).step_by(factor as usize) {
                data.extend_from_slice(px);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy of `self` with `src` drawn with its top-left corner at `(x, y)`.
    ///
    /// Parts of `src` outside this frame are clipped.
    pub fn place(&self, src: &FrameBuffer, x: i64, y: i64) -> FrameBuffer {
        let mut out = self.clone();
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);

        let x0 = x.max(0);
        let x1 = (x + i64::from(src.width)).min(dst_w);
        if x0 >= x1 {
            return out;
        }
        let span = ((x1 - x0) as usize) * 3;
        let src_x = (x0 - x) as usize;

        for sy in 0..i64::from(src.height) {
            let dy = y + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            let s = ((sy as usize) * (src.width as usize) + src_x) * 3;
            let d = ((dy as usize) * (self.width as usize) + x0 as usize) * 3;
            out.data[d..d + span].copy_from_slice(&src.data[s..s + span]);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/buffer.rs"]
mod tests;
