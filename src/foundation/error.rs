/// Convenience result type used across scrollmotion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Error taxonomy for configuration and construction APIs.
///
/// Per-tick sampling never returns these; measurement problems degrade to safe defaults instead.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid user-provided page or component configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed keyframe tracks or easing parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
