//! Error types for roster operations.

use crate::model::EntityKind;

/// Errors that can occur while creating or listing roster records.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// An enrollment referenced a student or course that does not exist.
    #[error("{entity} {id} does not exist")]
    DanglingReference {
        /// The entity the reference points into.
        entity: EntityKind,
        /// The identity that failed to resolve.
        id: i64,
    },

    /// The store rejected the write on a constraint, but the offending
    /// reference could not be pinned down afterwards.
    #[error("constraint violation: {0}")]
    Constraint(rusqlite::Error),

    /// Any other database failure.
    #[error("roster database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl RosterError {
    /// Returns `true` for referential-integrity failures, which are the
    /// caller's fault rather than the store's.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::DanglingReference { .. } | Self::Constraint(_))
    }
}
