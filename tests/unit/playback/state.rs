use super::*;
use crate::foundation::color::Rgb8;
use crate::foundation::core::Canvas;
use crate::scene::model::TimelineBuilder;
use crate::scene::source::Solid;

const RED: Rgb8 = Rgb8::new(255, 0, 0);
const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

fn canvas() -> Canvas {
    Canvas::new(2, 2).unwrap()
}

fn red_blue(fade_secs: f64) -> Timeline {
    TimelineBuilder::new(canvas())
        .generate(&Solid(RED), 1.0, Transition::Cut)
        .unwrap()
        .generate(&Solid(BLUE), 1.0, Transition::fade(fade_secs).unwrap())
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn red_blue_scenario_walks_hold_fade_hold() {
    let timeline = red_blue(0.5);
    let ticks: Vec<_> = timeline.frames(Fps::integer(10).unwrap()).unwrap().collect();
    assert_eq!(ticks.len(), 26);

    let phases: Vec<_> = ticks.iter().map(|t| (t.scene, t.phase)).collect();
    assert!(phases[..10].iter().all(|&p| p == (0, Phase::Hold)));
    assert!(phases[10..16].iter().all(|&p| p == (1, Phase::Transitioning)));
    assert!(phases[16..].iter().all(|&p| p == (1, Phase::Hold)));

    let red = FrameBuffer::filled(canvas(), RED);
    let blue = FrameBuffer::filled(canvas(), BLUE);
    assert!(ticks[..10].iter().all(|t| *t.frame == red));
    assert_eq!(*ticks[10].frame, red);
    assert_eq!(*ticks[13].frame, FrameBuffer::new(canvas()));
    assert_eq!(*ticks[25].frame, blue);

    for (i, t) in ticks.iter().enumerate() {
        assert_eq!(t.index, FrameIndex(i as u64));
    }
}

#[test]
fn hold_ticks_borrow_and_fade_ticks_own() {
    let timeline = red_blue(0.2);
    let mut frames = timeline.frames(Fps::integer(10).unwrap()).unwrap();
    assert!(matches!(frames.next().unwrap().frame, Cow::Borrowed(_)));
    let fade_tick = frames.nth(9).unwrap();
    assert_eq!(fade_tick.phase, Phase::Transitioning);
    assert!(matches!(fade_tick.frame, Cow::Owned(_)));
}

#[test]
fn cut_goes_straight_to_next_hold() {
    let timeline = TimelineBuilder::new(canvas())
        .generate(&Solid(RED), 0.2, Transition::Cut)
        .unwrap()
        .generate(&Solid(BLUE), 0.3, Transition::Cut)
        .unwrap()
        .build()
        .unwrap();
    let ticks: Vec<_> = timeline.frames(Fps::integer(10).unwrap()).unwrap().collect();
    assert_eq!(ticks.len(), 5);
    assert!(ticks.iter().all(|t| t.phase == Phase::Hold));
    assert_eq!(ticks[2].scene, 1);
}

#[test]
fn state_tracks_elapsed_and_finishes() {
    let timeline = red_blue(0.2);
    let fps = Fps::integer(10).unwrap();
    let mut frames = timeline.frames(fps).unwrap();
    let s = frames.state().unwrap();
    assert_eq!((s.scene(), s.phase(), s.elapsed()), (0, Phase::Hold, 0));

    frames.next();
    frames.next();
    assert_eq!(frames.state().unwrap().elapsed(), 2);

    let rest = frames.by_ref().count() as u64;
    assert_eq!(frames.emitted(), timeline.frame_budget(fps).unwrap());
    assert_eq!(rest + 2, frames.emitted());
    assert!(frames.state().is_none());
    assert!(frames.next().is_none());
}

#[test]
fn emitted_count_matches_budget_for_mixed_timelines() {
    let timeline = TimelineBuilder::new(canvas())
        .generate(&Solid(RED), 0.0, Transition::Cut)
        .unwrap()
        .generate(&Solid(BLUE), 1.5, Transition::fade(0.0).unwrap())
        .unwrap()
        .generate(&Solid(RED), 0.7, Transition::Fade { secs: 0.0 })
        .unwrap()
        .generate(&Solid(BLUE), 0.1, Transition::fade(1.3).unwrap())
        .unwrap()
        .build()
        .unwrap();
    for rate in [1, 7, 24, 30] {
        let fps = Fps::integer(rate).unwrap();
        let n = timeline.frames(fps).unwrap().count() as u64;
        assert_eq!(n, timeline.frame_budget(fps).unwrap());
    }
}

#[test]
fn invalid_fps_fails_before_iteration() {
    let timeline = red_blue(0.5);
    assert!(timeline.frames(Fps { num: 0, den: 1 }).is_err());
}
