use crate::{QuestionId, SurveyId};

/// Error taxonomy shared across the flowpoll crates.
///
/// Callers are expected to match on the variant, not on message text, so
/// each failure mode the platform distinguishes gets its own variant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input: empty required field, blank choice text, an edge
    /// pointing at a question that does not exist. The attempted mutation
    /// is rejected and prior state is left untouched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Attempted mutation of a survey that already has responses.
    #[error("survey {0} already has responses and can no longer be edited")]
    EditLocked(SurveyId),

    /// A second response for the same (survey, user) pair, or a second
    /// registration for the same identity triple.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// A referenced record does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// The question graph loops back on itself; the estimation or
    /// reconstruction that hit the cycle is abandoned.
    #[error("cycle detected in question graph at {0}")]
    Cycle(QuestionId),

    /// Persistence failure (I/O, malformed data file).
    #[error("storage error: {0}")]
    Store(#[from] anyhow::Error),
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    /// Create a not-found error for a record kind and id.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_edit_locked(&self) -> bool {
        matches!(self, Self::EditLocked(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }
}
