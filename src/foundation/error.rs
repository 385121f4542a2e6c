/// Convenience result type used across slidereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by playback APIs.
///
/// User-requested termination is not an error; it is reported through
/// [`PlaybackOutcome::Terminated`](crate::PlaybackOutcome::Terminated).
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A playback precondition does not hold (dimension mismatch, empty timeline, bad fps).
    ///
    /// Raised before any frame reaches a sink.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Invalid user-provided configuration or manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The persistent video sink rejected an operation.
    #[error("sink error: {0}")]
    Sink(String),

    /// The display sink rejected a frame. Never fatal to playback.
    #[error("display error: {0}")]
    Display(String),

    /// The interactive input source failed. Never fatal to playback.
    #[error("input error: {0}")]
    Input(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`ReelError::Display`] value.
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }

    /// Build a [`ReelError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
