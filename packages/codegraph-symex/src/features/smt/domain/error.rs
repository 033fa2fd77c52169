use thiserror::Error;

/// Structural term construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("function '{function}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },
}
