use thiserror::Error;

/// Failures raised while evaluating or sampling a property.
///
/// A missing value is not an error: properties report it as `Ok(None)` or as
/// an empty sample sequence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// The caller broke a precondition, e.g. no time or `stop` before `start`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A delegate failed to produce its value.
    #[error("evaluation failed: {0}")]
    Evaluation(String)
}

impl PropertyError {
    pub fn invalid_argument(message: impl Into<String>) -> PropertyError {
        PropertyError::InvalidArgument(message.into())
    }

    pub fn evaluation(message: impl Into<String>) -> PropertyError {
        PropertyError::Evaluation(message.into())
    }

    pub fn time_required() -> PropertyError {
        PropertyError::invalid_argument("time is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(PropertyError::time_required().to_string(), "invalid argument: time is required");
        assert_eq!(PropertyError::evaluation("no fix").to_string(), "evaluation failed: no fix");
    }
}
