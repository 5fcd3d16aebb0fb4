use thiserror::Error;

/// Errors surfaced by the placement and settlement engines.
///
/// Every variant except `Storage` is terminal and caller-visible: the
/// request layer maps each kind to a distinct response so the UI can tell
/// "pick a team first" apart from "already bet". None of them are retried
/// internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed identifier or out-of-range value.
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced user or game does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// User-state precondition not met (no favorite team, wrong team).
    #[error("{0}")]
    Ineligible(&'static str),

    /// Timing or lifecycle precondition violated.
    #[error("{0}")]
    InvalidState(&'static str),

    /// Uniqueness violation detected at commit time (duplicate bet).
    #[error("{0}")]
    Conflict(&'static str),

    /// Underlying database failure.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the underlying storage error is a unique-index violation.
    /// Used by the bet store to turn the duplicate-bet race into `Conflict`.
    pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
        err.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
    }
}
