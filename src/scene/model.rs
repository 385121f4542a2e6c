use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::FrameBuffer;
use crate::playback::state::Frames;
use crate::scene::source::SceneSource;
use crate::transition::kind::Transition;

/// One frame plus its scheduling attributes. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    frame: FrameBuffer,
    hold_secs: f64,
    transition: Transition,
}

impl Scene {
    /// Build a scene held for `hold_secs` and entered through `transition`.
    pub fn new(frame: FrameBuffer, hold_secs: f64, transition: Transition) -> ReelResult<Self> {
        if !hold_secs.is_finite() || hold_secs < 0.0 {
            return Err(ReelError::validation(format!(
                "scene hold must be finite and >= 0 seconds (got {hold_secs})"
            )));
        }
        transition.validate()?;
        Ok(Self {
            frame,
            hold_secs,
            transition,
        })
    }

    /// The scene's raster.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Seconds the frame stays on screen once reached.
    pub fn hold_secs(&self) -> f64 {
        self.hold_secs
    }

    /// How this scene is entered from the previous one (ignored for the first scene).
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Ticks spent in the hold phase: `round(hold * fps)`. May be 0.
    ///
    /// See [`Timeline::hold_ticks`] for the count actually scheduled.
    pub fn hold_ticks(&self, fps: Fps) -> ReelResult<u64> {
        fps.secs_to_frames_round(self.hold_secs)
    }
}

/// Scheduled hold ticks: `round(hold * fps)`, raised to 1 for the final scene so a playback
/// always ends on the last scene's raw buffer.
pub(crate) fn hold_ticks(hold_secs: f64, fps: Fps, last: bool) -> ReelResult<u64> {
    let ticks = fps.secs_to_frames_round(hold_secs)?;
    Ok(if last { ticks.max(1) } else { ticks })
}

/// Ordered scenes sharing one canvas. Insertion order is playback order.
#[derive(Clone, Debug)]
pub struct Timeline {
    canvas: Canvas,
    scenes: Vec<Scene>,
}

impl Timeline {
    /// Build and validate a timeline.
    pub fn new(canvas: Canvas, scenes: Vec<Scene>) -> ReelResult<Self> {
        let timeline = Self { canvas, scenes };
        timeline.validate()?;
        Ok(timeline)
    }

    /// Check the playback preconditions: a valid canvas, at least one scene, matching sizes.
    pub fn validate(&self) -> ReelResult<()> {
        self.canvas.validate()?;
        if self.scenes.is_empty() {
            return Err(ReelError::precondition("timeline must contain at least one scene"));
        }
        for (i, scene) in self.scenes.iter().enumerate() {
            scene
                .frame
                .ensure_canvas(self.canvas, &format!("scene {i} frame"))?;
        }
        Ok(())
    }

    /// Canvas every scene matches.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Scenes in playback order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Return `true` when the timeline has no scenes (never the case after validation).
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Hold ticks scheduled for scene `i`; only the final scene is floored at 1.
    pub fn hold_ticks(&self, i: usize, fps: Fps) -> ReelResult<u64> {
        let scene = self
            .scenes
            .get(i)
            .ok_or_else(|| ReelError::precondition(format!("no scene at index {i}")))?;
        hold_ticks(scene.hold_secs, fps, i + 1 == self.scenes.len())
    }

    /// Total ticks a full playback emits at `fps`, computed without rendering.
    pub fn frame_budget(&self, fps: Fps) -> ReelResult<u64> {
        fps.validate()?;
        let mut total = 0u64;
        for (i, scene) in self.scenes.iter().enumerate() {
            if i > 0 {
                total = add_ticks(total, scene.transition.frame_count(fps)?)?;
            }
            total = add_ticks(total, self.hold_ticks(i, fps)?)?;
        }
        Ok(total)
    }

    /// The tick-by-tick frame sequence of a full playback at `fps`.
    pub fn frames(&self, fps: Fps) -> ReelResult<Frames<'_>> {
        Frames::new(self, fps)
    }
}

pub(crate) fn add_ticks(total: u64, more: u64) -> ReelResult<u64> {
    total
        .checked_add(more)
        .ok_or_else(|| ReelError::precondition("timeline frame budget overflows"))
}

/// Builder for [`Timeline`].
pub struct TimelineBuilder {
    canvas: Canvas,
    scenes: Vec<Scene>,
}

impl TimelineBuilder {
    /// Start an empty timeline for `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            scenes: Vec::new(),
        }
    }

    /// Append a prepared scene.
    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Run a generator once for this canvas and append the result.
    pub fn generate(
        mut self,
        source: &dyn SceneSource,
        hold_secs: f64,
        transition: Transition,
    ) -> ReelResult<Self> {
        let frame = source.produce(self.canvas)?;
        self.scenes.push(Scene::new(frame, hold_secs, transition)?);
        Ok(self)
    }

    /// Build and validate the final [`Timeline`].
    pub fn build(self) -> ReelResult<Timeline> {
        Timeline::new(self.canvas, self.scenes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
