//! Bill sheet: a TOML description of one bill, replayed into a ledger.
//!
//! ```toml
//! tax_rate = 10.0
//!
//! [[participants]]
//! name = "Alice"
//!
//! [[participants]]
//! name = "Bob"
//!
//! [[items]]
//! name = "Pizza"
//! price = 30.0
//! assigned_to = ["Alice", "Bob"]
//! ```
//!
//! Items refer to participants by name. Every row goes through the ledger
//! operations, so the same validation applies as for interactive use.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use splitbill_app::BillLedger;
use splitbill_app::ports::IdGenerator;
use splitbill_domain::error::SplitBillError;
use splitbill_domain::id::ParticipantId;

/// Parsed bill sheet.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sheet {
    /// Tax rate in percent for this bill.
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub participants: Vec<SheetParticipant>,
    #[serde(default)]
    pub items: Vec<SheetItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetParticipant {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetItem {
    pub name: String,
    pub price: f64,
    /// Participant names.
    #[serde(default)]
    pub assigned_to: Vec<String>,
}

impl Sheet {
    /// Read and parse a sheet file.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Io`] or [`SheetError::Parse`].
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a sheet from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, SheetError> {
        Ok(toml::from_str(content)?)
    }

    /// Replay the sheet into a fresh ledger, participants first.
    ///
    /// # Errors
    ///
    /// Returns the first row the ledger rejects, a participant name listed
    /// twice, or an assignee name that matches no participant.
    pub fn into_ledger<G: IdGenerator>(self, ids: G) -> Result<BillLedger<G>, SheetError> {
        let mut ledger = BillLedger::new(ids);
        let mut by_name: HashMap<String, ParticipantId> = HashMap::new();

        for (row, entry) in self.participants.into_iter().enumerate() {
            let participant = ledger
                .add_participant(&entry.name)
                .map_err(|source| SheetError::InvalidParticipant { row: row + 1, source })?;
            if by_name
                .insert(participant.name.clone(), participant.id)
                .is_some()
            {
                return Err(SheetError::DuplicateParticipant(participant.name));
            }
        }

        for (row, entry) in self.items.into_iter().enumerate() {
            let assigned_to = entry
                .assigned_to
                .iter()
                .map(|name| {
                    by_name.get(name.trim()).cloned().ok_or_else(|| {
                        SheetError::UnknownParticipant {
                            item: entry.name.clone(),
                            name: name.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            ledger
                .add_item(&entry.name, entry.price, assigned_to)
                .map_err(|source| SheetError::InvalidItem { row: row + 1, source })?;
        }

        tracing::debug!(
            participants = ledger.participants().len(),
            items = ledger.item_count(),
            "sheet replayed"
        );
        Ok(ledger)
    }
}

/// Errors raised while loading a bill sheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// File I/O failure.
    #[error("failed to read bill sheet")]
    Io(#[from] std::io::Error),
    /// TOML parse failure.
    #[error("failed to parse bill sheet")]
    Parse(#[from] toml::de::Error),
    /// Two participants share a name, so items cannot refer to them.
    #[error("participant {0:?} is listed more than once")]
    DuplicateParticipant(String),
    /// An item names someone who is not a participant.
    #[error("item {item:?} is assigned to unknown participant {name:?}")]
    UnknownParticipant { item: String, name: String },
    /// The ledger rejected a participant row.
    #[error("participant #{row} is invalid")]
    InvalidParticipant {
        row: usize,
        #[source]
        source: SplitBillError,
    },
    /// The ledger rejected an item row.
    #[error("item #{row} is invalid")]
    InvalidItem {
        row: usize,
        #[source]
        source: SplitBillError,
    },
}
