use crate::encode::ffmpeg::{FfmpegSinkOpts, VideoCodec};
use crate::foundation::color::Rgb8;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::playback::input::KeyMap;
use crate::playback::pacing::Pacing;
use crate::playback::scheduler::PlaybackOpts;
use crate::scene::model::{Timeline, TimelineBuilder, add_ticks, hold_ticks};
use crate::scene::source::{Anchor, Blank, ImageScene, SceneSource, Solid};
use crate::transition::kind::Transition;
use anyhow::Context as _;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// JSON description of one playback session.
///
/// Relative paths (images, output, snapshots) resolve against the directory the manifest was
/// loaded from. The manifest is read once and fixed for the whole session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Frame size shared by every scene.
    pub canvas: Canvas,
    /// Tick rate.
    pub fps: Fps,
    /// Video file settings.
    #[serde(default)]
    pub output: OutputDef,
    /// Pause and quit keys.
    #[serde(default)]
    pub keys: KeyMap,
    /// Directory for pause snapshots; disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
    /// Scenes in playback order.
    pub scenes: Vec<SceneDef>,
}

/// Output file settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputDef {
    /// Video file path.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Video codec.
    #[serde(default)]
    pub codec: VideoCodec,
    /// Replace an existing file.
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("out.mp4")
}

fn default_true() -> bool {
    true
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            codec: VideoCodec::default(),
            overwrite: true,
        }
    }
}

/// One scene entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// What to draw.
    pub source: SourceDef,
    /// Seconds to hold the frame.
    pub hold_secs: f64,
    /// How to enter from the previous scene: `"cut"` or fade seconds.
    #[serde(default)]
    pub transition: Transition,
}

/// Planned tick counts of one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenePlan {
    /// Ticks of the fade into this scene (0 for cuts and the first scene).
    pub transition_ticks: u64,
    /// Ticks the scene is held.
    pub hold_ticks: u64,
}

/// Built-in scene generators.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceDef {
    /// Fill with one color (`"#RRGGBB"` or `[r, g, b]`).
    Solid {
        /// Fill color.
        color: Rgb8,
    },
    /// Black frame.
    Blank,
    /// Image file placed on a black canvas.
    Image {
        /// Path relative to the manifest directory.
        path: String,
        /// Keep every n-th row and column.
        #[serde(default = "default_downsample")]
        downsample: u32,
        /// Placement on the canvas.
        #[serde(default)]
        anchor: Anchor,
    },
}

fn default_downsample() -> u32 {
    1
}

impl SourceDef {
    fn validate(&self, field: &str) -> ReelResult<()> {
        match self {
            Self::Solid { .. } | Self::Blank => Ok(()),
            Self::Image {
                path, downsample, ..
            } => {
                validate_rel_source(path, &format!("{field}.path"))?;
                if *downsample == 0 {
                    return Err(ReelError::validation(format!(
                        "{field}.downsample must be >= 1"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Generator for this entry, with image paths resolved against `root`.
    pub fn to_source(&self, root: &Path) -> Box<dyn SceneSource> {
        match self {
            Self::Solid { color } => Box::new(Solid(*color)),
            Self::Blank => Box::new(Blank),
            Self::Image {
                path,
                downsample,
                anchor,
            } => Box::new(
                ImageScene::new(root.join(path))
                    .downsample(*downsample)
                    .anchor(*anchor),
            ),
        }
    }
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse manifest JSON: {e}")))
    }

    /// Read and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
        let manifest = Self::from_reader(BufReader::new(f))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("serialize manifest JSON: {e}")))
    }

    /// Check every value that can be checked without touching the filesystem.
    pub fn validate(&self) -> ReelResult<()> {
        self.canvas.validate()?;
        self.fps.validate()?;
        self.keys.validate()?;
        if self.output.path.as_os_str().is_empty() {
            return Err(ReelError::validation("output.path must be non-empty"));
        }
        if self.scenes.is_empty() {
            return Err(ReelError::validation("scenes must contain at least one entry"));
        }
        for (i, scene) in self.scenes.iter().enumerate() {
            let field = format!("scenes[{i}]");
            if !scene.hold_secs.is_finite() || scene.hold_secs < 0.0 {
                return Err(ReelError::validation(format!(
                    "{field}.hold_secs must be finite and >= 0"
                )));
            }
            scene.transition.validate()?;
            scene.source.validate(&format!("{field}.source"))?;
        }
        Ok(())
    }

    /// Run every scene generator and assemble the timeline.
    #[tracing::instrument(skip_all, fields(scenes = self.scenes.len()))]
    pub fn build_timeline(&self, root: &Path) -> ReelResult<Timeline> {
        self.validate()?;
        if let Some(first) = self.scenes.first()
            && first.transition != Transition::Cut
        {
            tracing::debug!("transition of the first scene has nothing to fade from; ignored");
        }

        let mut builder = TimelineBuilder::new(self.canvas);
        for scene in &self.scenes {
            let source = scene.source.to_source(root);
            builder = builder.generate(source.as_ref(), scene.hold_secs, scene.transition)?;
        }
        builder.build()
    }

    /// Per-scene tick counts, computed without running any generator.
    pub fn plan(&self) -> ReelResult<Vec<ScenePlan>> {
        self.validate()?;
        let last = self.scenes.len() - 1;
        self.scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| {
                Ok(ScenePlan {
                    transition_ticks: if i == 0 {
                        0
                    } else {
                        scene.transition.frame_count(self.fps)?
                    },
                    hold_ticks: hold_ticks(scene.hold_secs, self.fps, i == last)?,
                })
            })
            .collect()
    }

    /// Total ticks of a full playback, computed without running any generator.
    pub fn frame_budget(&self) -> ReelResult<u64> {
        self.plan()?.iter().try_fold(0u64, |total, scene| {
            add_ticks(add_ticks(total, scene.transition_ticks)?, scene.hold_ticks)
        })
    }

    /// Output path resolved against `root`.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output.path)
    }

    /// Snapshot directory resolved against `root`.
    pub fn snapshot_dir(&self, root: &Path) -> Option<PathBuf> {
        self.snapshot_dir.as_ref().map(|d| root.join(d))
    }

    /// ffmpeg sink options for this manifest.
    pub fn sink_opts(&self, root: &Path) -> FfmpegSinkOpts {
        FfmpegSinkOpts {
            out_path: self.output_path(root),
            overwrite: self.output.overwrite,
            codec: self.output.codec,
        }
    }

    /// Scheduler options for this manifest.
    pub fn playback_opts(&self, root: &Path, pacing: Pacing) -> PlaybackOpts {
        PlaybackOpts {
            pacing,
            keys: self.keys,
            snapshot_dir: self.snapshot_dir(root),
        }
    }
}

fn validate_rel_source(source: &str, field: &str) -> ReelResult<()> {
    if source.trim().is_empty() {
        return Err(ReelError::validation(format!("{field} must be non-empty")));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    if s.split('/').any(|part| part == "..") {
        return Err(ReelError::validation(format!(
            "{field} must not contain '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/manifest.rs"]
mod tests;
