/// Convenience result type used across reeltime.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error taxonomy for construction, validation and frame evaluation.
///
/// Timing functions themselves are total; errors only come from building or checking
/// configuration and from asking for frames outside a composition.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Rejected configuration: frame rates and ranges, scene windows, element
    /// parameters, character rates, narration bindings or training metrics.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unusable animation source: keyframes, springs, waves or shakes.
    #[error("animation error: {0}")]
    Animation(String),

    /// A frame outside the composition, or an element missing its inputs at render
    /// time (a loss chart without metrics).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Composition or metrics JSON that does not parse into the data model.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Failure raised by the embedding host and passed back through reeltime APIs.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
