//! Common error types used across the workspace.
//!
//! Every failure here is a local, recoverable input problem: the ledger
//! validates before it mutates, so none of them leave state half-applied.

/// Top-level domain error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitBillError {
    /// Input rejected by a domain invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The targeted record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// Input that violates a participant or item invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name is empty once leading and trailing whitespace is removed.
    #[error("name must not be empty")]
    EmptyName,

    /// Price is not a positive finite number.
    #[error("price must be a positive finite number")]
    InvalidPrice,

    /// Item is not assigned to any participant.
    #[error("item must be assigned to at least one participant")]
    NoAssignees,
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (`"Item"`, `"Participant"`).
    pub entity: &'static str,
    /// The id that was requested.
    pub id: String,
}
