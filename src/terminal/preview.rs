use crate::encode::sink::DisplaySink;
use crate::foundation::color::Rgb8;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::FrameBuffer;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};
use std::io::{Stdout, Write as _};

/// Live preview drawn with `▀` half blocks on the alternate screen.
///
/// Each character cell shows two vertically stacked pixels (foreground = top, background =
/// bottom). The frame is nearest-neighbor scaled to fit above a one-line status bar.
pub struct TerminalPreview {
    out: Stdout,
    legend: String,
    active: bool,
    drawn: Option<(FrameBuffer, (u16, u16))>,
}

impl TerminalPreview {
    /// Enter the alternate screen. `legend` is shown on the status line (see
    /// [`KeyMap::legend`](crate::KeyMap::legend)).
    pub fn new(legend: impl Into<String>) -> ReelResult<Self> {
        let mut out = std::io::stdout();
        crossterm::execute!(out, terminal::EnterAlternateScreen, cursor::Hide)
            .map_err(display_err)?;
        Ok(Self {
            out,
            legend: legend.into(),
            active: true,
            drawn: None,
        })
    }

    fn paint(&mut self, frame: &FrameBuffer, cols: u16, rows: u16) -> std::io::Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        let cells = half_block_cells(frame, cols, rows.saturating_sub(1));
        for (y, row) in cells.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for &(top, bottom) in row {
                queue!(
                    self.out,
                    SetForegroundColor(rgb(top)),
                    SetBackgroundColor(rgb(bottom)),
                    Print('▀')
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        Ok(())
    }

    fn status(&mut self, idx: FrameIndex, rows: u16) -> std::io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            ResetColor,
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(format!("frame {:>6}  {}", idx.0, self.legend))
        )
    }

    fn restore(&mut self) -> std::io::Result<()> {
        self.active = false;
        crossterm::execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )
    }
}

impl DisplaySink for TerminalPreview {
    fn show(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<()> {
        if !self.active {
            return Err(ReelError::display("preview already closed"));
        }
        let size = terminal::size().map_err(display_err)?;
        let unchanged = matches!(&self.drawn, Some((f, s)) if *s == size && f == frame);
        if !unchanged {
            self.paint(frame, size.0, size.1).map_err(display_err)?;
            self.drawn = Some((frame.clone(), size));
        }
        self.status(idx, size.1).map_err(display_err)?;
        self.out.flush().map_err(display_err)
    }

    fn close(&mut self) -> ReelResult<()> {
        if !self.active {
            return Ok(());
        }
        self.restore().map_err(display_err)
    }
}

impl Drop for TerminalPreview {
    fn drop(&mut self) {
        if self.active {
            let _ = self.restore();
        }
    }
}

fn display_err(e: std::io::Error) -> ReelError {
    ReelError::display(format!("terminal write failed: {e}"))
}

fn rgb(c: Rgb8) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Sample `frame` into at most `cols × rows` cells of (top, bottom) pixel pairs, keeping the
/// aspect ratio. An empty grid is returned when nothing fits.
pub(crate) fn half_block_cells(frame: &FrameBuffer, cols: u16, rows: u16) -> Vec<Vec<(Rgb8, Rgb8)>> {
    let (fw, fh) = (frame.width() as f64, frame.height() as f64);
    let scale = (cols as f64 / fw).min(rows as f64 * 2.0 / fh);
    let out_w = (fw * scale).floor() as u32;
    let out_h = ((fh * scale).floor() as u32) / 2 * 2;
    if out_w == 0 || out_h == 0 {
        return Vec::new();
    }

    let sample = |x: u32, y: u32| {
        let sx = ((x as f64 + 0.5) / scale) as u32;
        let sy = ((y as f64 + 0.5) / scale) as u32;
        frame
            .pixel(sx.min(frame.width() - 1), sy.min(frame.height() - 1))
            .unwrap_or(Rgb8::BLACK)
    };

    (0..out_h / 2)
        .map(|row| {
            (0..out_w)
                .map(|x| (sample(x, row * 2), sample(x, row * 2 + 1)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/terminal/preview.rs"]
mod tests;
