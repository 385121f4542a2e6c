use super::*;
use crate::encode::sink::{InMemorySink, NullDisplay};
use crate::foundation::color::Rgb8;
use crate::foundation::core::Canvas;
use crate::foundation::error::ReelError;
use crate::playback::input::ScriptedInput;
use crate::scene::model::TimelineBuilder;
use crate::scene::source::Solid;
use crate::transition::kind::Transition;

const RED: Rgb8 = Rgb8::new(255, 0, 0);
const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

fn canvas() -> Canvas {
    Canvas::new(4, 2).unwrap()
}

fn red_blue() -> Timeline {
    TimelineBuilder::new(canvas())
        .generate(&Solid(RED), 1.0, Transition::Cut)
        .unwrap()
        .generate(&Solid(BLUE), 1.0, Transition::fade(0.5).unwrap())
        .unwrap()
        .build()
        .unwrap()
}

fn unpaced() -> PlaybackScheduler {
    PlaybackScheduler::new(
        Fps::integer(10).unwrap(),
        PlaybackOpts {
            pacing: Pacing::Unpaced,
            ..PlaybackOpts::default()
        },
    )
    .unwrap()
}

/// Video sink that fails on one frame and records whether `end` ran.
#[derive(Default)]
struct FailingSink {
    fail_at: u64,
    pushed: u64,
    ended: bool,
}

impl VideoSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameBuffer) -> ReelResult<()> {
        if idx.0 == self.fail_at {
            return Err(ReelError::sink("disk full"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Display sink that rejects every other frame.
#[derive(Default)]
struct FlakyDisplay {
    shown: u64,
    closed: bool,
}

impl DisplaySink for FlakyDisplay {
    fn show(&mut self, idx: FrameIndex, _frame: &FrameBuffer) -> ReelResult<()> {
        if idx.0 % 2 == 1 {
            return Err(ReelError::display("window gone"));
        }
        self.shown += 1;
        Ok(())
    }

    fn close(&mut self) -> ReelResult<()> {
        self.closed = true;
        Ok(())
    }
}

#[test]
fn full_playback_persists_every_tick_and_closes() {
    let timeline = red_blue();
    let mut sink = InMemorySink::new();
    let report = unpaced()
        .play(&timeline, &mut sink, &mut NullDisplay, &mut ScriptedInput::new())
        .unwrap();

    assert_eq!(report.frames_emitted, 26);
    assert_eq!(report.outcome, PlaybackOutcome::Completed);
    assert_eq!(sink.frames().len(), 26);
    assert!(sink.is_closed());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 4,
            height: 2,
            fps: Fps::integer(10).unwrap()
        })
    );
    assert_eq!(sink.frames()[25].1, FrameBuffer::filled(canvas(), BLUE));
}

#[test]
fn quit_after_k_frames_leaves_exactly_k_frames() {
    let timeline = red_blue();
    for k in [1u64, 7, 13] {
        let mut sink = InMemorySink::new();
        let mut input = ScriptedInput::new().after_frames(k, Key::Char('q'));
        let report = unpaced()
            .play(&timeline, &mut sink, &mut NullDisplay, &mut input)
            .unwrap();

        assert_eq!(report.outcome, PlaybackOutcome::Terminated { after_frames: k });
        assert_eq!(sink.frames().len() as u64, k);
        assert!(sink.is_closed());
    }
}

#[test]
fn ctrl_c_terminates_like_quit() {
    let mut sink = InMemorySink::new();
    let mut input = ScriptedInput::new().after_frames(3, Key::Interrupt);
    let report = unpaced()
        .play(&red_blue(), &mut sink, &mut NullDisplay, &mut input)
        .unwrap();
    assert_eq!(report.outcome, PlaybackOutcome::Terminated { after_frames: 3 });
}

#[test]
fn pause_resumes_without_dropping_or_repeating_frames() {
    let mut sink = InMemorySink::new();
    let mut input = ScriptedInput::new()
        .after_frames(5, Key::Char(' '))
        .after_frames(5, Key::Enter);
    let report = unpaced()
        .play(&red_blue(), &mut sink, &mut NullDisplay, &mut input)
        .unwrap();

    assert_eq!(report.pauses, 1);
    assert_eq!(report.outcome, PlaybackOutcome::Completed);
    assert_eq!(sink.frames().len(), 26);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn quit_while_paused_terminates() {
    let mut sink = InMemorySink::new();
    let mut input = ScriptedInput::new()
        .after_frames(4, Key::Char(' '))
        .after_frames(100, Key::Char('q'));
    let report = unpaced()
        .play(&red_blue(), &mut sink, &mut NullDisplay, &mut input)
        .unwrap();

    assert_eq!(report.pauses, 1);
    assert_eq!(report.outcome, PlaybackOutcome::Terminated { after_frames: 4 });
    assert_eq!(sink.frames().len(), 4);
}

#[test]
fn pause_with_snapshot_dir_saves_the_paused_frame() {
    let dir = PathBuf::from("target").join("unit_scheduler").join("snapshots");
    let _ = std::fs::remove_dir_all(&dir);
    let scheduler = PlaybackScheduler::new(
        Fps::integer(10).unwrap(),
        PlaybackOpts {
            pacing: Pacing::Unpaced,
            snapshot_dir: Some(dir.clone()),
            ..PlaybackOpts::default()
        },
    )
    .unwrap();

    let mut input = ScriptedInput::new()
        .after_frames(2, Key::Char(' '))
        .after_frames(2, Key::Char('x'));
    let report = scheduler
        .play(&red_blue(), &mut InMemorySink::new(), &mut NullDisplay, &mut input)
        .unwrap();

    assert_eq!(report.snapshots, vec![dir.join("pause_000001.png")]);
    let img = image::open(&report.snapshots[0]).unwrap().to_rgb8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
}

#[test]
fn display_failures_do_not_affect_persisted_frames() {
    let mut sink = InMemorySink::new();
    let mut display = FlakyDisplay::default();
    let report = unpaced()
        .play(&red_blue(), &mut sink, &mut display, &mut ScriptedInput::new())
        .unwrap();

    assert_eq!(report.display_failures, 13);
    assert_eq!(display.shown, 13);
    assert!(display.closed);
    assert_eq!(sink.frames().len(), 26);
}

#[test]
fn video_sink_failure_propagates_after_end() {
    let mut sink = FailingSink {
        fail_at: 3,
        ..FailingSink::default()
    };
    let mut display = FlakyDisplay::default();
    let err = unpaced()
        .play(&red_blue(), &mut sink, &mut display, &mut ScriptedInput::new())
        .unwrap_err();

    assert!(matches!(err, ReelError::Sink(_)));
    assert_eq!(sink.pushed, 3);
    assert!(sink.ended);
    assert!(display.closed);
}

#[test]
fn mismatched_timelines_are_rejected_before_playback() {
    let timeline = Timeline::new(canvas(), Vec::new());
    assert!(timeline.is_err());

    let bad = TimelineBuilder::new(canvas())
        .scene(
            crate::scene::model::Scene::new(
                FrameBuffer::new(Canvas::new(2, 2).unwrap()),
                1.0,
                Transition::Cut,
            )
            .unwrap(),
        )
        .build();
    assert!(matches!(bad, Err(ReelError::Precondition(_))));
}

#[test]
fn rejects_identical_pause_and_quit_keys() {
    let err = PlaybackScheduler::new(
        Fps::integer(10).unwrap(),
        PlaybackOpts {
            keys: KeyMap {
                pause: 'x',
                quit: 'x',
            },
            ..PlaybackOpts::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn realtime_pacing_spaces_ticks() {
    let timeline = TimelineBuilder::new(canvas())
        .generate(&Solid(RED), 0.5, Transition::Cut)
        .unwrap()
        .build()
        .unwrap();
    let scheduler = PlaybackScheduler::new(Fps::integer(50).unwrap(), PlaybackOpts::default())
        .unwrap();

    let started = std::time::Instant::now();
    let report = scheduler
        .play(&timeline, &mut InMemorySink::new(), &mut NullDisplay, &mut ScriptedInput::new())
        .unwrap();
    assert_eq!(report.frames_emitted, 25);
    assert!(started.elapsed() >= Duration::from_millis(400));
}
