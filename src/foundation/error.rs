/// Convenience alias for results carrying a [`StageError`].
pub type StageResult<T> = Result<T, StageError>;

/// Error taxonomy for storyboard loading and playback.
///
/// Only [`StageError::Document`] ever surfaces out of a storyboard load; the
/// other variants are contained per stage object and logged.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// The top-level document could not be parsed at all.
    #[error("document error: {0}")]
    Document(String),

    /// A per-object configuration error (bad keyframe ordering, required
    /// field never set, unknown note id).
    #[error("configuration error: {0}")]
    Config(String),

    /// A render resource could not be acquired.
    #[error("resource error: {0}")]
    Resource(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::Document`] from a message.
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Build a [`StageError::Config`] from a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StageError::Resource`] from a message.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}
