use thiserror::Error;

/// Canonical result for a pull from a cursor or an eager constructor.
pub type SeqResult<T> = std::result::Result<T, SeqError>;

/// Every failure a pipeline can report.
///
/// `Precondition` is the only eager kind: it comes back from a constructor
/// before any cursor exists. All other kinds surface during traversal, at the
/// element where the condition is reached, and end that traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error("invalid argument to '{operator}': {reason}")]
    Precondition {
        operator: &'static str,
        reason: String,
    },

    #[error("sequence contains no elements ('{operator}')")]
    NoElements { operator: &'static str },

    #[error("cannot cast {found} to {expected}")]
    InvalidCast {
        expected: &'static str,
        found: String,
    },

    #[error("arithmetic overflow in '{operator}'")]
    Overflow { operator: &'static str },

    #[error("'{operator}' exceeded the buffer limit of {limit} elements")]
    BufferLimit { operator: &'static str, limit: usize },

    // Sources map their own failures into this variant.
    #[error("source error: {0}")]
    Source(String),
}

impl SeqError {
    pub fn precondition(operator: &'static str, reason: impl Into<String>) -> Self {
        SeqError::Precondition {
            operator,
            reason: reason.into(),
        }
    }

    /// True for the eager kind, false for anything raised mid-traversal.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SeqError::Precondition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_message() {
        let err = SeqError::precondition("range", "count must be non-negative");
        assert!(err.is_precondition());
        assert_eq!(
            err.to_string(),
            "invalid argument to 'range': count must be non-negative"
        );
    }

    #[test]
    fn test_runtime_kinds_are_not_preconditions() {
        assert!(!SeqError::NoElements { operator: "first" }.is_precondition());
        assert!(!SeqError::Source("disk gone".into()).is_precondition());
    }
}
