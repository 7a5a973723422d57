//! Bill item: a priced line split equally between its assignees.

use serde::{Deserialize, Serialize};

use crate::error::{SplitBillError, ValidationError};
use crate::id::{ItemId, ParticipantId};

/// A priced line on the bill.
///
/// `assigned_to` keeps insertion order and is not deduplicated. It may become
/// empty after a participant is removed, in which case the item still counts
/// toward the bill total but toward nobody's share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub assigned_to: Vec<ParticipantId>,
}

impl BillItem {
    /// Create a builder for constructing a [`BillItem`] with the given id.
    #[must_use]
    pub fn builder(id: ItemId) -> BillItemBuilder {
        BillItemBuilder {
            id,
            name: String::new(),
            price: None,
            assigned_to: Vec::new(),
        }
    }

    /// Check domain invariants, in order: name, price, assignees.
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] when:
    /// - `name` is blank ([`ValidationError::EmptyName`])
    /// - `price` is not finite or not above zero ([`ValidationError::InvalidPrice`])
    /// - `assigned_to` is empty ([`ValidationError::NoAssignees`])
    pub fn validate(&self) -> Result<(), SplitBillError> {
        validate_fields(&self.name, self.price, &self.assigned_to)
    }

    /// Number of assignee slots the price is divided by.
    #[must_use]
    pub fn assignee_count(&self) -> usize {
        self.assigned_to.len()
    }

    #[must_use]
    pub fn is_assigned_to(&self, participant: &ParticipantId) -> bool {
        self.assigned_to.contains(participant)
    }

    /// Whether nobody currently carries this item.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.assigned_to.is_empty()
    }

    /// The part of this item owed by `participant`.
    ///
    /// Computed from the current assignees, so it changes when they do.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, participant: &ParticipantId) -> f64 {
        if self.is_assigned_to(participant) {
            self.price / self.assigned_to.len() as f64
        } else {
            0.0
        }
    }

    /// Drop every occurrence of `participant` from the assignees.
    ///
    /// Returns `true` if anything was removed.
    pub fn unassign(&mut self, participant: &ParticipantId) -> bool {
        let before = self.assigned_to.len();
        self.assigned_to.retain(|id| id != participant);
        before != self.assigned_to.len()
    }
}

/// Shared validation used by the builder and by in-place edits.
///
/// # Errors
///
/// See [`BillItem::validate`].
pub fn validate_fields(
    name: &str,
    price: f64,
    assigned_to: &[ParticipantId],
) -> Result<(), SplitBillError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidPrice.into());
    }
    if assigned_to.is_empty() {
        return Err(ValidationError::NoAssignees.into());
    }
    Ok(())
}

/// Step-by-step builder for [`BillItem`].
#[derive(Debug)]
pub struct BillItemBuilder {
    id: ItemId,
    name: String,
    price: Option<f64>,
    assigned_to: Vec<ParticipantId>,
}

impl BillItemBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn assign(mut self, participant: ParticipantId) -> Self {
        self.assigned_to.push(participant);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, participants: Vec<ParticipantId>) -> Self {
        self.assigned_to = participants;
        self
    }

    /// Consume the builder, trim the name, validate, and return a [`BillItem`].
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] with the first failing rule.
    /// A missing price counts as [`ValidationError::InvalidPrice`].
    pub fn build(self) -> Result<BillItem, SplitBillError> {
        let item = BillItem {
            id: self.id,
            name: self.name.trim().to_string(),
            price: self.price.unwrap_or(f64::NAN),
            assigned_to: self.assigned_to,
        };
        item.validate()?;
        Ok(item)
    }
}
