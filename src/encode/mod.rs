//! Output sinks.
//!
//! Video sinks persist frames in emission order and are owned by one playback session at a time.
//! Display sinks are best-effort previews.

pub(crate) mod ffmpeg;
pub(crate) mod png;
pub(crate) mod sink;
