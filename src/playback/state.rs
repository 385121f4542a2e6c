use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ReelResult;
use crate::frame::buffer::FrameBuffer;
use crate::scene::model::Timeline;
use crate::transition::fade::FadeThroughBlack;
use crate::transition::kind::Transition;
use std::borrow::Cow;
use std::iter::FusedIterator;

/// Sub-phase of the scene currently on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The scene's own frame is shown unchanged.
    Hold,
    /// Frames of the fade from the previous scene are shown.
    Transitioning,
}

/// Position of playback: scene index, sub-phase and ticks spent in that sub-phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    scene: usize,
    phase: Phase,
    elapsed: u64,
}

impl PlaybackState {
    fn hold(scene: usize) -> Self {
        Self {
            scene,
            phase: Phase::Hold,
            elapsed: 0,
        }
    }

    fn transitioning(scene: usize) -> Self {
        Self {
            scene,
            phase: Phase::Transitioning,
            elapsed: 0,
        }
    }

    fn advanced(self) -> Self {
        Self {
            elapsed: self.elapsed + 1,
            ..self
        }
    }

    /// Index of the scene being held or faded into.
    pub fn scene(&self) -> usize {
        self.scene
    }

    /// Current sub-phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks already emitted in the current sub-phase.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}

/// One emitted tick.
#[derive(Clone, Debug)]
pub struct TickFrame<'a> {
    /// Output position of this frame.
    pub index: FrameIndex,
    /// Scene the frame belongs to (the incoming scene during a fade).
    pub scene: usize,
    /// Sub-phase that produced the frame.
    pub phase: Phase,
    /// Hold ticks borrow the scene buffer; fade ticks own a fresh buffer.
    pub frame: Cow<'a, FrameBuffer>,
}

struct SceneSchedule<'a> {
    hold_ticks: u64,
    entry: Option<FadeThroughBlack<'a>>,
}

/// The playback state machine as an iterator of ticks.
///
/// `Hold(0)` → (`Transitioning(i)` →) `Hold(i)` → … → done. All fades are planned (and their
/// preconditions checked) up front, so iteration itself cannot fail.
pub struct Frames<'a> {
    timeline: &'a Timeline,
    plans: Vec<SceneSchedule<'a>>,
    state: Option<PlaybackState>,
    fade: Option<FadeThroughBlack<'a>>,
    emitted: u64,
}

impl<'a> Frames<'a> {
    pub(crate) fn new(timeline: &'a Timeline, fps: Fps) -> ReelResult<Self> {
        fps.validate()?;
        timeline.validate()?;

        let scenes = timeline.scenes();
        let mut plans = Vec::with_capacity(scenes.len());
        for (i, scene) in scenes.iter().enumerate() {
            let entry = match (i, scene.transition()) {
                (0, _) | (_, Transition::Cut) => None,
                (_, Transition::Fade { secs }) => Some(FadeThroughBlack::new(
                    scenes[i - 1].frame(),
                    scene.frame(),
                    secs,
                    fps,
                )?),
            };
            plans.push(SceneSchedule {
                hold_ticks: timeline.hold_ticks(i, fps)?,
                entry,
            });
        }

        Ok(Self {
            timeline,
            plans,
            state: Some(PlaybackState::hold(0)),
            fade: None,
            emitted: 0,
        })
    }

    /// State for the next tick, `None` once the timeline is exhausted.
    pub fn state(&self) -> Option<PlaybackState> {
        self.state
    }

    /// Ticks emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn emit(&mut self, state: PlaybackState, frame: Cow<'a, FrameBuffer>) -> TickFrame<'a> {
        self.state = Some(state.advanced());
        let index = FrameIndex(self.emitted);
        self.emitted += 1;
        TickFrame {
            index,
            scene: state.scene,
            phase: state.phase,
            frame,
        }
    }

    fn leave_hold(&mut self, scene: usize) {
        let next = scene + 1;
        if next >= self.plans.len() {
            tracing::debug!(scene, ticks = self.emitted, "timeline exhausted");
            self.state = None;
            return;
        }

        self.fade = self.plans[next].entry.clone();
        self.state = Some(if self.fade.is_some() {
            PlaybackState::transitioning(next)
        } else {
            PlaybackState::hold(next)
        });
        tracing::debug!(from = scene, to = next, fade = self.fade.is_some(), "scene change");
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = TickFrame<'a>;

    fn next(&mut self) -> Option<TickFrame<'a>> {
        loop {
            let state = self.state?;
            match state.phase {
                Phase::Hold => {
                    if state.elapsed < self.plans[state.scene].hold_ticks {
                        let timeline = self.timeline;
                        let frame = timeline.scenes()[state.scene].frame();
                        return Some(self.emit(state, Cow::Borrowed(frame)));
                    }
                    self.leave_hold(state.scene);
                }
                Phase::Transitioning => match self.fade.as_mut().and_then(Iterator::next) {
                    Some(frame) => return Some(self.emit(state, Cow::Owned(frame))),
                    None => {
                        self.fade = None;
                        self.state = Some(PlaybackState::hold(state.scene));
                    }
                },
            }
        }
    }
}

impl FusedIterator for Frames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
