//! Error types for the canvas engine.
//!
//! The pure derivations (mappings, suggestions, validation) never fail — their
//! failure modes are represented as data ([`crate::validation::NodeReport`],
//! empty result lists). [`GraphError`] covers the replay path and structural
//! checks, where the caller genuinely needs a typed outcome.

use thiserror::Error;

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    #[error("Execution step not found: {0}")]
    StepNotFound(String),
    #[error("Cycle detected in graph at node: {0}")]
    Cycle(String),
    #[error("Replay backend error: {0}")]
    Backend(String),
}

/// Convenience alias for engine-level results.
pub type EngineResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            GraphError::NodeNotFound("n1".into()).to_string(),
            "Node not found: n1"
        );
        assert_eq!(
            GraphError::StepNotFound("step_3".into()).to_string(),
            "Execution step not found: step_3"
        );
        assert_eq!(
            GraphError::Cycle("loop".into()).to_string(),
            "Cycle detected in graph at node: loop"
        );
        assert_eq!(
            GraphError::Backend("boom".into()).to_string(),
            "Replay backend error: boom"
        );
    }
}
