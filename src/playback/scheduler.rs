use crate::encode::sink::{DisplaySink, SinkConfig, VideoSink};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ReelResult;
use crate::frame::buffer::FrameBuffer;
use crate::playback::input::{GateAction, InputGate, InputSource, Key, KeyMap};
use crate::playback::pacing::{Pacer, Pacing};
use crate::scene::model::Timeline;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options for a [`PlaybackScheduler`].
#[derive(Clone, Debug, Default)]
pub struct PlaybackOpts {
    /// Tick spacing.
    pub pacing: Pacing,
    /// Pause and quit keys.
    pub keys: KeyMap,
    /// When set, the frame on screen when a pause engages is saved here as `pause_<tick>.png`.
    pub snapshot_dir: Option<PathBuf>,
}

/// How a playback session ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every tick of the timeline was emitted.
    #[default]
    Completed,
    /// The quit key (or Ctrl+C) stopped playback after `after_frames` frames.
    Terminated {
        /// Frames persisted before termination.
        after_frames: u64,
    },
}

/// Summary of one playback session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Frames pushed to the video sink.
    pub frames_emitted: u64,
    /// Whether the timeline ran out or the user stopped it.
    pub outcome: PlaybackOutcome,
    /// Times playback was paused.
    pub pauses: u64,
    /// Frames the display sink failed to show.
    pub display_failures: u64,
    /// Snapshots written while paused.
    pub snapshots: Vec<PathBuf>,
}

/// Drives a [`Timeline`] tick by tick into a display sink and a video sink.
///
/// Each tick shows the frame, appends it to the video sink, then polls the input gate. The poll is
/// where realtime pacing waits, so a terminate requested after tick `k` leaves exactly `k` frames
/// in the output.
#[derive(Clone, Debug)]
pub struct PlaybackScheduler {
    fps: Fps,
    opts: PlaybackOpts,
}

impl PlaybackScheduler {
    /// Scheduler ticking at `fps`.
    pub fn new(fps: Fps, opts: PlaybackOpts) -> ReelResult<Self> {
        fps.validate()?;
        opts.keys.validate()?;
        Ok(Self { fps, opts })
    }

    /// Tick rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Session options.
    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    /// Play `timeline` to completion or until the user terminates.
    ///
    /// Preconditions are checked before the video sink is opened. Once opened, the video sink is
    /// finalized on every exit path; a sink error is returned after that finalization.
    #[tracing::instrument(skip_all, fields(scenes = timeline.len()))]
    pub fn play(
        &self,
        timeline: &Timeline,
        video: &mut dyn VideoSink,
        display: &mut dyn DisplaySink,
        input: &mut dyn InputSource,
    ) -> ReelResult<PlaybackReport> {
        let frames = timeline.frames(self.fps)?;
        let budget = timeline.frame_budget(self.fps)?;
        let canvas = timeline.canvas();
        let gate = InputGate::new(self.opts.keys);
        let mut pacer = Pacer::new(self.fps, self.opts.pacing);
        let mut report = PlaybackReport::default();

        tracing::info!(frames = budget, pacing = ?self.opts.pacing, "playback started");
        let mut session = OpenSinks::begin(
            video,
            display,
            SinkConfig {
                width: canvas.width,
                height: canvas.height,
                fps: self.fps,
            },
        )?;

        for tick in frames {
            session.show(tick.index, &tick.frame);
            session.write(tick.index, &tick.frame)?;
            report.frames_emitted += 1;

            let mut action = gate.interpret(poll_key(input, pacer.next_wait()));
            if action == GateAction::Pause {
                report.pauses += 1;
                tracing::info!(frame = tick.index.0, "paused");
                if let Some(path) = self.snapshot(tick.index, &tick.frame) {
                    report.snapshots.push(path);
                }
                action = match gate.interpret(Some(wait_key(input))) {
                    GateAction::Terminate => GateAction::Terminate,
                    GateAction::Pause | GateAction::Continue => GateAction::Continue,
                };
                pacer.reset();
                tracing::info!(frame = tick.index.0, "resumed");
            }

            if action == GateAction::Terminate {
                report.outcome = PlaybackOutcome::Terminated {
                    after_frames: report.frames_emitted,
                };
                tracing::info!(frames = report.frames_emitted, "playback terminated by user");
                break;
            }
        }

        report.display_failures = session.display_failures;
        session.close()?;
        if report.outcome == PlaybackOutcome::Completed {
            tracing::info!(frames = report.frames_emitted, "playback completed");
        }
        Ok(report)
    }

    fn snapshot(&self, idx: FrameIndex, frame: &FrameBuffer) -> Option<PathBuf> {
        let dir = self.opts.snapshot_dir.as_deref()?;
        match write_snapshot(dir, idx, frame) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "saved pause snapshot");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save pause snapshot");
                None
            }
        }
    }
}

fn write_snapshot(dir: &Path, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<PathBuf> {
    use anyhow::Context as _;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create snapshot directory '{}'", dir.display()))?;
    let path = dir.join(format!("pause_{:06}.png", idx.0));
    frame
        .to_rgb_image()?
        .save(&path)
        .with_context(|| format!("failed to write snapshot '{}'", path.display()))?;
    Ok(path)
}

fn poll_key(input: &mut dyn InputSource, wait: Duration) -> Option<Key> {
    match input.poll(wait) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "input poll failed; continuing");
            std::thread::sleep(wait);
            None
        }
    }
}

fn wait_key(input: &mut dyn InputSource) -> Key {
    input.wait_key().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "input failed while paused; resuming");
        Key::Other
    })
}

/// Both sinks of one session. Dropping it without [`OpenSinks::close`] still finalizes them.
struct OpenSinks<'s> {
    video: &'s mut dyn VideoSink,
    display: &'s mut dyn DisplaySink,
    open: bool,
    display_failures: u64,
}

impl<'s> OpenSinks<'s> {
    fn begin(
        video: &'s mut dyn VideoSink,
        display: &'s mut dyn DisplaySink,
        cfg: SinkConfig,
    ) -> ReelResult<Self> {
        video.begin(cfg)?;
        Ok(Self {
            video,
            display,
            open: true,
            display_failures: 0,
        })
    }

    fn show(&mut self, idx: FrameIndex, frame: &FrameBuffer) {
        if let Err(e) = self.display.show(idx, frame) {
            self.display_failures += 1;
            if self.display_failures == 1 {
                tracing::warn!(frame = idx.0, error = %e, "display sink failed; further failures are logged at debug level");
            } else {
                tracing::debug!(frame = idx.0, error = %e, "display sink failed");
            }
        }
    }

    fn write(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> ReelResult<()> {
        self.video.push_frame(idx, frame)
    }

    fn close_display(&mut self) {
        if let Err(e) = self.display.close() {
            tracing::warn!(error = %e, "display sink failed to close");
        }
    }

    fn close(mut self) -> ReelResult<()> {
        self.open = false;
        self.close_display();
        self.video.end()
    }
}

impl Drop for OpenSinks<'_> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.close_display();
        if let Err(e) = self.video.end() {
            tracing::warn!(error = %e, "video sink failed to finalize after an aborted session");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
