/// Result alias used across the crate.
pub type ShadowResult<T> = Result<T, ShadowError>;

/// Errors raised while configuring a shadow or fetching frames from the host.
#[derive(thiserror::Error, Debug)]
pub enum ShadowError {
    /// Host-supplied input failed a precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Shadow configuration could not be understood.
    #[error("config error: {0}")]
    Config(String),

    /// A frame source failed to provide history.
    #[error("frame source error: {0}")]
    Source(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error bubbled up from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShadowError {
    /// Build a [`ShadowError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShadowError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ShadowError::Source`].
    pub fn frame_source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`ShadowError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
