//! slidereel plays an ordered sequence of still scenes as a timed video.
//!
//! Scenes are joined by cuts or two-phase fades through black. Every frame is shown on a display
//! sink and appended to a persistent video sink, and the viewer can pause or quit at any frame
//! boundary without corrupting the output file.
//!
//! - Build a [`Timeline`] with [`TimelineBuilder`] or load a [`Manifest`]
//! - Create a [`PlaybackScheduler`]
//! - [`PlaybackScheduler::play`] into a [`VideoSink`] such as [`FfmpegSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod frame;
pub(crate) mod playback;
pub(crate) mod scene;
pub(crate) mod terminal;
pub(crate) mod transition;

pub use crate::foundation::color::Rgb8;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::config::manifest::{Manifest, OutputDef, SceneDef, ScenePlan, SourceDef};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec, is_ffmpeg_on_path};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{DisplaySink, InMemorySink, NullDisplay, SinkConfig, VideoSink};
pub use crate::frame::buffer::FrameBuffer;
pub use crate::playback::input::{
    GateAction, InputGate, InputSource, Key, KeyMap, NoInput, ScriptedInput,
};
pub use crate::playback::pacing::Pacing;
pub use crate::playback::scheduler::{
    PlaybackOpts, PlaybackOutcome, PlaybackReport, PlaybackScheduler,
};
pub use crate::playback::state::{Frames, Phase, PlaybackState, TickFrame};
pub use crate::scene::model::{Scene, Timeline, TimelineBuilder};
pub use crate::scene::source::{Anchor, Blank, ImageScene, SceneSource, Solid};
pub use crate::terminal::input::TerminalInput;
pub use crate::terminal::preview::TerminalPreview;
pub use crate::transition::fade::{FadeThroughBlack, fade_phase_frames};
pub use crate::transition::kind::Transition;
