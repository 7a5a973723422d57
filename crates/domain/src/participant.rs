//! Participant: a person sharing the bill.

use serde::{Deserialize, Serialize};

use crate::error::{SplitBillError, ValidationError};
use crate::id::ParticipantId;

/// A person the bill is split between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Create a participant, trimming `name` before validating it.
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] when the trimmed name is empty.
    pub fn new(id: ParticipantId, name: &str) -> Result<Self, SplitBillError> {
        let participant = Self {
            id,
            name: name.trim().to_string(),
        };
        participant.validate()?;
        Ok(participant)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), SplitBillError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}
